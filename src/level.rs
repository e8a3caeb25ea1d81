//! Level data
//!
//! A level is read-only data consumed once when a session is created:
//! platform geometry, star and snitch positions, enemy spawns, and the player
//! spawn point. [`Level::builtin`] is the shipped layout; arbitrary levels
//! load from JSON (positions and sizes are `[x, y]` pairs in world pixels,
//! y growing downward).

use glam::{Vec2, vec2};
use serde::{Deserialize, Serialize};

/// Static geometry the player collides with. Immutable after load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Render theming only; collision ignores it
    #[serde(default)]
    pub kind: PlatformKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    #[default]
    Stone,
}

/// Where an enemy starts and how far it patrols from there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub range: f32,
}

/// Everything needed to seed a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default = "default_player_spawn")]
    pub player_spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub stars: Vec<Vec2>,
    pub snitch: Vec2,
    pub enemies: Vec<EnemySpawn>,
}

fn default_player_spawn() -> Vec2 {
    vec2(50.0, 400.0)
}

impl Level {
    /// The shipped layout: a long ground strip with a staircase of ledges,
    /// eight stars, four patrolling enemies, and the snitch near the far end.
    pub fn builtin() -> Self {
        let stone = |x: f32, y: f32, w: f32, h: f32| Platform {
            pos: vec2(x, y),
            size: vec2(w, h),
            kind: PlatformKind::Stone,
        };
        let enemy = |x: f32, y: f32, range: f32| EnemySpawn {
            pos: vec2(x, y),
            range,
        };
        Self {
            player_spawn: default_player_spawn(),
            platforms: vec![
                stone(0.0, 550.0, 3500.0, 100.0),
                stone(280.0, 460.0, 220.0, 35.0),
                stone(550.0, 350.0, 180.0, 35.0),
                stone(820.0, 440.0, 220.0, 35.0),
                stone(1100.0, 320.0, 250.0, 35.0),
                stone(1450.0, 420.0, 200.0, 35.0),
                stone(1750.0, 300.0, 140.0, 35.0),
                stone(2100.0, 420.0, 180.0, 35.0),
                stone(2450.0, 550.0, 100.0, 500.0),
            ],
            stars: vec![
                vec2(350.0, 410.0),
                vec2(600.0, 300.0),
                vec2(900.0, 390.0),
                vec2(450.0, 130.0),
                vec2(1200.0, 270.0),
                vec2(1400.0, 100.0),
                vec2(1800.0, 250.0),
                vec2(2200.0, 370.0),
            ],
            snitch: vec2(2400.0, 300.0),
            enemies: vec![
                enemy(800.0, 500.0, 300.0),
                enemy(1500.0, 500.0, 450.0),
                enemy(1050.0, 270.0, 180.0),
                enemy(1900.0, 480.0, 350.0),
            ],
        }
    }

    /// Parse a level from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
