//! Deterministic platformer simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, fixed order of operations
//! - Seeded RNG only
//! - The tick timestamp is injected by the caller (it feeds the late-jump
//!   grace window), so tests can steer the clock
//! - No rendering or terminal dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contact, aabb_overlap, classify_contact};
pub use state::{
    ActiveQuiz, Collectible, CollectibleKind, Enemy, Facing, GameState, GameStatus, Particle,
    ParticleColor, Player,
};
pub use tick::tick;
