//! Gameplay tuning and difficulty tiers
//!
//! Every tier fixes the enemy base speed and spawn rate; the rest of the
//! knobs share defaults from `consts` and can be overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ReversalPolicy;

/// Difficulty tier selected from the level menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Enemy speed at the start of a session (units/s)
    pub fn enemy_base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 180.0,
            Difficulty::Hard => 240.0,
        }
    }

    /// Mean enemy spawns per second
    pub fn spawn_rate(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.5,
            // Higher tiers always spawn more often
            Difficulty::Hard => 3.0,
        }
    }
}

/// Dash tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    /// How long a dash lasts (seconds)
    pub duration: f32,
    /// Time between dash starts (seconds)
    pub cooldown: f32,
    /// Player speed multiplier while dashing
    pub speed_multiplier: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            duration: DASH_DURATION,
            cooldown: DASH_COOLDOWN,
            speed_multiplier: DASH_SPEED_MULTIPLIER,
        }
    }
}

/// Complete set of tunables for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Side length of the square playfield
    pub playfield_size: f32,
    /// Player speed (units/s)
    pub player_speed: f32,
    /// Enemy speed at score 0 (units/s)
    pub enemy_base_speed: f32,
    /// Mean enemy spawns per second
    pub spawn_rate: f32,
    /// Extra enemy speed per second of score
    pub difficulty_multiplier: f32,
    /// Mean coin spawns per second
    pub coin_spawn_rate: f32,
    /// How held directions map to movement
    pub reversal: ReversalPolicy,
    /// Dash tuning; `None` disables dashing
    pub dash: Option<DashConfig>,
    /// Particles emitted per coin pickup
    pub particle_burst: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

impl GameConfig {
    /// Tuning for a difficulty tier
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            playfield_size: PLAYFIELD_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_base_speed: difficulty.enemy_base_speed(),
            spawn_rate: difficulty.spawn_rate(),
            difficulty_multiplier: 1.5,
            coin_spawn_rate: COIN_SPAWN_RATE,
            reversal: ReversalPolicy::Permanent,
            dash: Some(DashConfig::default()),
            particle_burst: PARTICLE_BURST,
        }
    }

    /// Enemy speed for a spawn happening at the given session score
    pub fn enemy_speed_at(&self, score: f32) -> f32 {
        self.enemy_base_speed + self.difficulty_multiplier * score
    }

    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_scale_monotonically() {
        let easy = GameConfig::for_difficulty(Difficulty::Easy);
        let medium = GameConfig::for_difficulty(Difficulty::Medium);
        let hard = GameConfig::for_difficulty(Difficulty::Hard);

        assert!(easy.spawn_rate < medium.spawn_rate);
        assert!(medium.spawn_rate < hard.spawn_rate);
        assert!(easy.enemy_base_speed < medium.enemy_base_speed);
        assert!(medium.enemy_base_speed < hard.enemy_base_speed);
    }

    #[test]
    fn test_enemy_speed_ramp() {
        let config = GameConfig::for_difficulty(Difficulty::Medium);
        assert_eq!(config.enemy_speed_at(0.0), 180.0);
        assert!((config.enemy_speed_at(10.0) - 195.0).abs() < 1e-4);
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_partial_json_override() {
        let config = GameConfig::from_json(r#"{"player_speed": 300.0, "dash": null}"#).unwrap();
        assert_eq!(config.player_speed, 300.0);
        assert!(config.dash.is_none());
        assert_eq!(config.spawn_rate, Difficulty::Medium.spawn_rate());
    }
}
