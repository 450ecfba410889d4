//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod direction;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{coin_in_reach, collect_coins, enemy_hits_player, player_hit};
pub use direction::{HeldDirections, ReversalPolicy, ReversalState, direction_vector};
pub use spawn::{SpawnTimer, spawn_coin, spawn_enemy, spawn_particles};
pub use state::{Coin, Enemy, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
