//! Quiz Dash - a side-scrolling quiz platformer for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `input`: Held-action latch between the async event source and the sim
//! - `level`: Level geometry and spawn data
//! - `quiz`: Question bank the star pickups draw from
//! - `tui`: Terminal renderer (pure consumer of simulation state)
//!
//! The simulation advances one tick per rendered frame; the binary wires the
//! pieces into a frame loop.

pub mod input;
pub mod level;
pub mod quiz;
pub mod sim;
pub mod tui;

pub use input::{Action, InputState, TickInput};
pub use level::{Level, Platform};
pub use quiz::{Question, QuizBank};
pub use sim::{GameState, GameStatus};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// World dimensions in pixels; falling past GAME_HEIGHT is death
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Target frame cadence (one simulation tick per frame, ~60 Hz)
    pub const FRAME: Duration = Duration::from_micros(16_667);

    /// Player movement
    pub const GRAVITY: f32 = 0.35;
    pub const JUMP_FORCE: f32 = -11.0;
    /// The mid-air jump is slightly weaker than a grounded one
    pub const DOUBLE_JUMP_SCALE: f32 = 0.9;
    pub const MAX_SPEED: f32 = 4.8;
    pub const ACCELERATION: f32 = 0.45;
    pub const FRICTION: f32 = 0.9;
    /// Jumps this soon after leaving the ground still count as grounded
    pub const GROUND_GRACE: Duration = Duration::from_millis(150);

    /// Entity boxes
    pub const PLAYER_SIZE: f32 = 64.0;
    pub const ENEMY_SIZE: f32 = 64.0;
    /// Collectible pickup box edge
    pub const COLLECTIBLE_SIZE: f32 = 30.0;

    /// Vertical snap tolerance when classifying platform contacts
    pub const CONTACT_TOLERANCE: f32 = 10.0;

    /// Enemy patrol speed (units per tick)
    pub const ENEMY_SPEED: f32 = 1.5;
    /// The hurt box is inset this much from the enemy's outer box
    pub const ENEMY_HIT_INSET: f32 = 20.0;

    /// Scoring
    pub const STAR_SCORE: u32 = 500;
    pub const SNITCH_SCORE: u32 = 5000;

    /// Knockback impulse for a wrong quiz answer
    pub const KNOCKBACK_X: f32 = -15.0;
    pub const KNOCKBACK_Y: f32 = -5.0;

    /// Particle lifespan in ticks (decays 1/50 per tick)
    pub const PARTICLE_TTL_TICKS: u32 = 50;
    /// Burst velocities are drawn per axis from [-SPREAD, SPREAD)
    pub const PARTICLE_SPREAD: f32 = 3.0;
    pub const DOUBLE_JUMP_PARTICLES: usize = 5;
    pub const PICKUP_PARTICLES: usize = 40;
    pub const PENALTY_PARTICLES: usize = 20;

    /// Camera follow smoothing factor per tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;
}
