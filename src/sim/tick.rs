//! Fixed timestep simulation tick
//!
//! Advances the world one frame at a time in a fixed order: steering,
//! jumping, gravity, integration, platform resolution, collectibles,
//! enemies, the fall check, then visual bookkeeping (particles, camera,
//! animation). When two events change the status in the same tick, the
//! later one wins.

use std::time::Instant;

use glam::Vec2;

use super::collision::{Contact, aabb_overlap, classify_contact};
use super::state::{
    ActiveQuiz, CollectibleKind, Facing, GameState, GameStatus, ParticleColor, Player,
};
use crate::consts::*;
use crate::input::{InputState, TickInput};

/// Advance the game state by one frame.
///
/// Does nothing unless play is active, and samples the jump latch only
/// then, so a press made while a modal is up fires on the first tick
/// after play resumes. `now` feeds the late-jump grace window and is the
/// only wall-clock input to the sim.
pub fn tick(state: &mut GameState, input: &mut InputState, now: Instant) {
    if state.status != GameStatus::Playing {
        return;
    }
    let cmd = input.sample();

    steer(&mut state.player, &cmd);
    try_jump(state, &cmd, now);

    // Gravity accumulates without a terminal velocity cap.
    state.player.vel.y += GRAVITY;
    state.player.pos += state.player.vel;
    if state.player.pos.x < 0.0 {
        state.player.pos.x = 0.0;
    }

    resolve_platforms(state, now);
    check_collectibles(state);
    update_enemies(state);

    if state.player.pos.y > GAME_HEIGHT {
        state.status = GameStatus::GameOver;
    }

    // A hazard in the same tick overrides a star's quiz; drop the
    // pending question so modal state stays paired with the status.
    if state.status != GameStatus::Quiz {
        state.active_quiz = None;
    }

    update_particles(state);
    update_camera(state);
    update_animation(&mut state.player);
}

fn steer(player: &mut Player, cmd: &TickInput) {
    if cmd.right {
        player.vel.x += ACCELERATION;
        player.facing = Facing::Right;
    } else if cmd.left {
        player.vel.x -= ACCELERATION;
        player.facing = Facing::Left;
    } else {
        player.vel.x *= FRICTION;
    }
    player.vel.x = player.vel.x.clamp(-MAX_SPEED, MAX_SPEED);
}

fn try_jump(state: &mut GameState, cmd: &TickInput, now: Instant) {
    if !cmd.jump {
        return;
    }
    let player = &mut state.player;
    let in_grace = player
        .grounded_at
        .is_some_and(|at| now.saturating_duration_since(at) < GROUND_GRACE);

    if player.on_ground || in_grace {
        player.vel.y = JUMP_FORCE;
        player.on_ground = false;
        player.can_double_jump = true;
        player.grounded_at = None;
    } else if player.can_double_jump {
        player.vel.y = JUMP_FORCE * DOUBLE_JUMP_SCALE;
        player.can_double_jump = false;
        let center = player.pos + player.size / 2.0;
        state.spawn_particles(center, ParticleColor::White, DOUBLE_JUMP_PARTICLES);
    }
}

/// Single-pass resolution against every platform, in level order. An
/// earlier platform's correction feeds the contact test for later ones.
fn resolve_platforms(state: &mut GameState, now: Instant) {
    let player = &mut state.player;
    player.on_ground = false;
    for platform in &state.platforms {
        match classify_contact(player.pos, player.size, player.vel, platform) {
            Some(Contact::Land) => {
                player.pos.y = platform.pos.y - player.size.y;
                player.vel.y = 0.0;
                player.on_ground = true;
                player.can_double_jump = true;
                player.grounded_at = Some(now);
            }
            Some(Contact::Bump) => {
                player.pos.y = platform.pos.y + platform.size.y;
                player.vel.y = 0.0;
            }
            Some(Contact::WallLeft) => {
                player.pos.x = platform.pos.x - player.size.x;
            }
            Some(Contact::WallRight) => {
                player.pos.x = platform.pos.x + platform.size.x;
            }
            None => {}
        }
    }
}

fn check_collectibles(state: &mut GameState) {
    let size = Vec2::splat(COLLECTIBLE_SIZE);
    for i in 0..state.collectibles.len() {
        let c = state.collectibles[i];
        if c.collected || !aabb_overlap(state.player.pos, state.player.size, c.pos, size) {
            continue;
        }
        match c.kind {
            CollectibleKind::Snitch => {
                state.score += SNITCH_SCORE;
                state.status = GameStatus::Won;
            }
            CollectibleKind::Star => {
                // With an empty bank there is nothing to ask; the star
                // stays where it is.
                if let Some(question) = state.quiz.sample(&mut state.rng).cloned() {
                    state.active_quiz = Some(ActiveQuiz {
                        question,
                        collectible: i,
                    });
                    state.status = GameStatus::Quiz;
                }
            }
        }
    }
}

fn update_enemies(state: &mut GameState) {
    let inset = Vec2::splat(ENEMY_HIT_INSET);
    for enemy in &mut state.enemies {
        enemy.pos.x += enemy.vel.x;
        if (enemy.pos.x - enemy.start_x).abs() > enemy.patrol_range {
            enemy.vel.x = -enemy.vel.x;
        }
        // The hurt box is inset from the sprite box.
        if aabb_overlap(
            state.player.pos,
            state.player.size,
            enemy.pos + inset,
            enemy.size - 2.0 * inset,
        ) {
            state.status = GameStatus::GameOver;
        }
    }
}

fn update_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.ttl = p.ttl.saturating_sub(1);
    }
    state.particles.retain(|p| p.ttl > 0);
}

fn update_camera(state: &mut GameState) {
    let target = state.player.pos.x - GAME_WIDTH / 3.0;
    state.camera_x += (target - state.camera_x) * CAMERA_SMOOTHING;
    state.camera_x = state.camera_x.max(0.0);
}

fn update_animation(player: &mut Player) {
    let speed = player.vel.x.abs();
    if !player.on_ground {
        // Fixed airborne frame on the sprite sheet.
        player.anim_frame = 3.0;
    } else if speed > 0.1 {
        player.anim_frame += speed * 0.05 + 0.1;
    } else {
        player.anim_frame += 0.06;
    }
}
