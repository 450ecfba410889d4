//! Reverse Dodge - A top-down avoidance game with reversed controls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `game_loop`: Frame driver and session lifecycle
//! - `config`: Difficulty tiers and gameplay tuning
//! - `shop`: Skin catalog and wallet
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `persistence`: Profile load/save with corruption recovery
//! - `render`: Sprite list handed to the DOM adapter

pub mod config;
pub mod game_loop;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod shop;
pub mod sim;

pub use config::{Difficulty, GameConfig};
pub use game_loop::{GameLoop, SessionObserver, SessionResult};
pub use highscores::HighScores;
pub use persistence::Profile;
pub use settings::Settings;
pub use shop::{ShopError, ShopOutcome, Wallet};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 12;
    /// Longest frame delta the driver will simulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (square)
    pub const PLAYFIELD_SIZE: f32 = 600.0;
    /// Player may not get closer than this to any playfield edge
    pub const PLAYER_MARGIN: f32 = 15.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 280.0;
    pub const DASH_DURATION: f32 = 0.2;
    pub const DASH_COOLDOWN: f32 = 2.0;
    pub const DASH_SPEED_MULTIPLIER: f32 = 2.0;

    /// Enemies spawn this far outside the playfield edge
    pub const ENEMY_SPAWN_OFFSET: f32 = 30.0;
    /// Enemies are removed once this far outside the playfield
    pub const ENEMY_DESPAWN_MARGIN: f32 = 100.0;
    /// Squared contact distance between player and enemy (~25 units)
    pub const ENEMY_HIT_DISTANCE_SQ: f32 = 600.0;

    /// Coins spawn inside the playfield inset by this much
    pub const COIN_INSET: f32 = 50.0;
    /// Squared pickup distance between player and coin (30 units)
    pub const COIN_PICKUP_DISTANCE_SQ: f32 = 900.0;
    /// Coins per second
    pub const COIN_SPAWN_RATE: f32 = 0.05;

    /// Particle burst on coin pickup
    pub const PARTICLE_BURST: usize = 8;
    pub const PARTICLE_LIFE: f32 = 0.5;
    pub const PARTICLE_MAX_SPEED: f32 = 150.0;

    /// Default reversal toggle period for the periodic policy (seconds)
    pub const REVERSAL_INTERVAL: f32 = 5.0;
}

/// Center of a square playfield of the given size
#[inline]
pub fn playfield_center(size: f32) -> Vec2 {
    Vec2::splat(size / 2.0)
}

/// Clamp a position to the playable area (playfield inset by the player margin)
#[inline]
pub fn clamp_to_playfield(pos: Vec2, size: f32) -> Vec2 {
    let min = Vec2::splat(consts::PLAYER_MARGIN);
    let max = Vec2::splat(size - consts::PLAYER_MARGIN);
    pos.clamp(min, max)
}
