//! Game state and core simulation types
//!
//! Everything the tick mutates lives here, along with the transitions the
//! frontend drives directly: starting a run, retrying after the end
//! screens, and answering the quiz that pauses play.

use std::time::Instant;

use glam::{Vec2, vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::level::{Level, Platform};
use crate::quiz::{Question, QuizBank};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Title screen, waiting for the player to start
    Start,
    /// Active gameplay
    Playing,
    /// A quiz modal is up; the world is frozen until it is answered
    Quiz,
    /// Run ended by an enemy or by falling off the world
    GameOver,
    /// Run ended by catching the snitch
    Won,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// True while standing on a platform this tick
    pub on_ground: bool,
    /// One mid-air jump is banked until used
    pub can_double_jump: bool,
    pub facing: Facing,
    /// Sprite frame cursor, advanced by the tick
    pub anim_frame: f32,
    /// When the player last stood on ground, for the late-jump grace window
    pub grounded_at: Option<Instant>,
}

impl Player {
    fn spawn(at: Vec2) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            on_ground: false,
            can_double_jump: true,
            facing: Facing::Right,
            anim_frame: 0.0,
            grounded_at: None,
        }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal distance from `start_x` before turning around
    pub patrol_range: f32,
    pub start_x: f32,
}

/// What a collectible awards when picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Opens a quiz; collected only on a correct answer
    Star,
    /// Ends the run as a win on touch
    Snitch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub pos: Vec2,
    pub kind: CollectibleKind,
    pub collected: bool,
}

/// Particle tint, resolved to a concrete color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    White,
    Gold,
    Red,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining; the particle is removed when this reaches zero
    pub ttl: u32,
    pub color: ParticleColor,
}

impl Particle {
    /// Remaining life as a 1.0 -> 0.0 fraction, for fading in the renderer.
    pub fn life(&self) -> f32 {
        self.ttl as f32 / PARTICLE_TTL_TICKS as f32
    }
}

/// The question currently blocking play, and the star that raised it
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveQuiz {
    pub question: Question,
    /// Index into `GameState::collectibles` of the star to award on success
    pub collectible: usize,
}

/// Complete game state (deterministic given inputs, tick times, and seed)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub platforms: Vec<Platform>,
    /// Stars in level order, then the snitch last
    pub collectibles: Vec<Collectible>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Left edge of the camera in world coordinates
    pub camera_x: f32,
    pub score: u32,
    pub status: GameStatus,
    /// Set while `status == Quiz`, cleared on answer or status override
    pub active_quiz: Option<ActiveQuiz>,
    pub quiz: QuizBank,
    /// Where `begin_game`/`reset_game` put the player
    pub player_spawn: Vec2,
    /// Seeded RNG; the only source of randomness in the sim
    pub rng: Pcg32,
}

impl GameState {
    /// Builds the initial state for a level. The game waits on the title
    /// screen until [`begin_game`](Self::begin_game).
    pub fn new(level: &Level, quiz: QuizBank, seed: u64) -> Self {
        log::info!(
            "level: {} platforms, {} stars, {} enemies; bank: {} questions",
            level.platforms.len(),
            level.stars.len(),
            level.enemies.len(),
            quiz.len()
        );
        if quiz.is_empty() {
            log::warn!("question bank is empty; stars will not open quizzes");
        }

        let mut collectibles: Vec<Collectible> = level
            .stars
            .iter()
            .map(|&pos| Collectible {
                pos,
                kind: CollectibleKind::Star,
                collected: false,
            })
            .collect();
        collectibles.push(Collectible {
            pos: level.snitch,
            kind: CollectibleKind::Snitch,
            collected: false,
        });

        let enemies = level
            .enemies
            .iter()
            .map(|spawn| Enemy {
                pos: spawn.pos,
                vel: vec2(ENEMY_SPEED, 0.0),
                size: Vec2::splat(ENEMY_SIZE),
                patrol_range: spawn.range,
                start_x: spawn.pos.x,
            })
            .collect();

        Self {
            player: Player::spawn(level.player_spawn),
            platforms: level.platforms.clone(),
            collectibles,
            enemies,
            particles: Vec::new(),
            camera_x: 0.0,
            score: 0,
            status: GameStatus::Start,
            active_quiz: None,
            quiz,
            player_spawn: level.player_spawn,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Leaves the title screen and starts a run. Does nothing from any
    /// other status.
    pub fn begin_game(&mut self) {
        if self.status != GameStatus::Start {
            return;
        }
        self.respawn();
    }

    /// Restarts the run from any status. Collectibles, score, and the
    /// camera reset; enemies keep patrolling from wherever they are.
    pub fn reset_game(&mut self) {
        self.respawn();
    }

    fn respawn(&mut self) {
        self.player = Player::spawn(self.player_spawn);
        for c in &mut self.collectibles {
            c.collected = false;
        }
        self.particles.clear();
        self.camera_x = 0.0;
        self.score = 0;
        self.status = GameStatus::Playing;
        self.active_quiz = None;
    }

    /// Resolves the open quiz with the chosen option index.
    ///
    /// A correct answer collects the star and awards [`STAR_SCORE`]; any
    /// other index (including out of range) knocks the player back
    /// instead. Either way play resumes. Ignored unless a quiz is up.
    pub fn submit_quiz_answer(&mut self, index: usize) {
        if self.status != GameStatus::Quiz {
            return;
        }
        let Some(active) = self.active_quiz.take() else {
            // Modal with no question on record; just resume.
            self.status = GameStatus::Playing;
            return;
        };

        if index == active.question.answer {
            let reward = self.collectibles.get_mut(active.collectible).map(|c| {
                c.collected = true;
                c.pos
            });
            if let Some(pos) = reward {
                self.score += STAR_SCORE;
                self.spawn_particles(pos, ParticleColor::Gold, PICKUP_PARTICLES);
            }
        } else {
            self.player.vel = vec2(KNOCKBACK_X, KNOCKBACK_Y);
            let pos = self.player.pos;
            self.spawn_particles(pos, ParticleColor::Red, PENALTY_PARTICLES);
        }
        self.status = GameStatus::Playing;
    }

    /// Emits a burst of particles at `origin` with random velocities.
    pub fn spawn_particles(&mut self, origin: Vec2, color: ParticleColor, count: usize) {
        for _ in 0..count {
            let vel = vec2(
                self.rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                self.rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                ttl: PARTICLE_TTL_TICKS,
                color,
            });
        }
    }

    pub fn stars_collected(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Star && c.collected)
            .count()
    }

    pub fn stars_total(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Star)
            .count()
    }
}
