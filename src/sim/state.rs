//! Game state and core simulation types
//!
//! One `GameState` value holds everything a session needs. It is owned by
//! the frame driver and mutated only through `tick` and `start`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::ReversalState;
use super::spawn::SpawnTimer;
use crate::config::GameConfig;
use crate::playfield_center;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle in the menus, nothing simulated
    Stopped,
    /// Active gameplay
    Running,
    /// Session ended by a terminal collision; score has been reported
    Result,
}

/// The player's dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Seconds of dash remaining (0 = not dashing)
    pub dash_timer: f32,
    /// Seconds until another dash may start
    pub dash_cooldown: f32,
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
        }
    }

    /// Dashing players move faster and ignore enemy contact
    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }
}

/// An enemy flying in a straight line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A collectible coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

/// A cosmetic particle from a pickup burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before removal
    pub life: f32,
    pub size: f32,
}

/// Something that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    CoinSpawned { id: u32 },
    CoinCollected { id: u32, pos: Vec2 },
    /// Controls flipped; carries the new reversal flag
    ReversalToggled { reversed: bool },
    DashStarted,
    DashEnded,
    /// Terminal collision; the session is now in `GamePhase::Result`
    GameOver { score: f32, coins: u32 },
}

/// Complete world state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tuning this session runs with
    pub config: GameConfig,
    /// Seed the session RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Elapsed seconds while running
    pub score: f32,
    /// Coins collected this session
    pub coins: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins_on_field: Vec<Coin>,
    pub particles: Vec<Particle>,
    pub reversal: ReversalState,
    pub enemy_spawner: SpawnTimer,
    pub coin_spawner: SpawnTimer,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle state; call `start` to begin a session
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let center = playfield_center(config.playfield_size);
        let mut rng = Pcg32::seed_from_u64(seed);
        let enemy_spawner = SpawnTimer::new(config.spawn_rate, &mut rng);
        let coin_spawner = SpawnTimer::new(config.coin_spawn_rate, &mut rng);
        Self {
            reversal: ReversalState::new(config.reversal),
            config,
            seed,
            rng,
            phase: GamePhase::Stopped,
            score: 0.0,
            coins: 0,
            player: Player::at(center),
            enemies: Vec::new(),
            coins_on_field: Vec::new(),
            particles: Vec::new(),
            enemy_spawner,
            coin_spawner,
            next_id: 1,
        }
    }

    /// Begin (or restart) a session: everything is reset and the phase becomes `Running`
    pub fn start(&mut self, config: GameConfig, seed: u64) {
        *self = Self::new(config, seed);
        self.phase = GamePhase::Running;
        log::info!(
            "Session started ({}, seed {})",
            self.config.difficulty.as_str(),
            seed
        );
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate `count` consecutive entity IDs, returning the first
    pub fn next_id_block(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id += count;
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_stopped_and_centered() {
        let state = GameState::new(GameConfig::default(), 7);
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.player.pos, Vec2::new(300.0, 300.0));
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(GameConfig::default(), 7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.start(GameConfig::default(), 1);
        state.score = 42.0;
        state.coins = 3;
        state.player.pos = Vec2::new(20.0, 500.0);
        state.player.dash_cooldown = 1.0;
        let id = state.next_entity_id();
        state.enemies.push(Enemy { id, pos: Vec2::ZERO, vel: Vec2::X });
        state.coins_on_field.push(Coin { id: 99, pos: Vec2::ONE });
        state.particles.push(Particle {
            id: 100,
            pos: Vec2::ONE,
            vel: Vec2::ZERO,
            life: 0.5,
            size: 4.0,
        });
        state.phase = GamePhase::Result;

        state.start(GameConfig::default(), 2);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.coins, 0);
        assert_eq!(state.player.pos, Vec2::new(300.0, 300.0));
        assert_eq!(state.player.dash_cooldown, 0.0);
        assert!(state.enemies.is_empty());
        assert!(state.coins_on_field.is_empty());
        assert!(state.particles.is_empty());
    }
}
