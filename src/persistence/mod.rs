//! Profile persistence with corruption recovery
//!
//! Features:
//! - One storage key per field (plain numbers, strings, one JSON list)
//! - Every key loads independently
//! - Missing or corrupt values fall back to defaults instead of failing

use thiserror::Error;

use crate::config::Difficulty;
use crate::game_loop::SessionResult;
use crate::highscores::HighScores;
use crate::platform::{KeyValueStore, StorageError};
use crate::shop::Wallet;

/// Storage keys
pub mod keys {
    pub const BEST_SCORE: &str = "rd_best_score";
    pub const COINS: &str = "rd_coins";
    pub const OWNED: &str = "rd_owned";
    pub const EQUIPPED: &str = "rd_equipped";
    pub const HIGH_SCORES: &str = "rd_highscores";
}

/// Failure writing persisted data
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What recording a finished session changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    /// Score beat the previous best
    pub new_best: bool,
    /// Leaderboard rank, if the score made the board
    pub rank: Option<usize>,
}

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub wallet: Wallet,
    /// Best whole-second score
    pub best_score: u32,
    pub highscores: HighScores,
}

impl Profile {
    /// Load the profile. Never fails: each key that is missing or unreadable
    /// is replaced by its default.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Wallet::default();

        let total_coins = load_number(store, keys::COINS).unwrap_or(0);
        let best_score = load_number(store, keys::BEST_SCORE).unwrap_or(0);
        let owned = load_json::<Vec<String>>(store, keys::OWNED).unwrap_or(defaults.owned);
        let equipped = store.get(keys::EQUIPPED).unwrap_or(defaults.equipped);
        let mut highscores = load_json::<HighScores>(store, keys::HIGH_SCORES).unwrap_or_default();
        highscores.normalize();

        let mut wallet = Wallet {
            total_coins,
            owned,
            equipped,
        };
        wallet.sanitize();

        log::info!(
            "Loaded profile: {} coins, {} skins, best {}s",
            wallet.total_coins,
            wallet.owned.len(),
            best_score
        );

        Self {
            wallet,
            best_score,
            highscores,
        }
    }

    /// Write every profile key
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        self.save_wallet(store)?;
        store.set(keys::BEST_SCORE, &self.best_score.to_string())?;
        store.set(keys::HIGH_SCORES, &serde_json::to_string(&self.highscores)?)?;
        Ok(())
    }

    /// Write only the wallet keys (after a shop action)
    pub fn save_wallet(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        store.set(keys::COINS, &self.wallet.total_coins.to_string())?;
        store.set(keys::OWNED, &serde_json::to_string(&self.wallet.owned)?)?;
        store.set(keys::EQUIPPED, &self.wallet.equipped)?;
        Ok(())
    }

    /// Fold a finished session into the profile: deposit its coins, update
    /// the best score and the leaderboard.
    pub fn record_session(
        &mut self,
        result: SessionResult,
        difficulty: Difficulty,
        timestamp: f64,
    ) -> SessionRecord {
        let score = result.whole_seconds();
        self.wallet.deposit(result.coins);

        let new_best = score > self.best_score;
        if new_best {
            self.best_score = score;
            log::info!("New best score: {}s", score);
        }
        let rank = self
            .highscores
            .add_score(score, result.coins, difficulty, timestamp);

        SessionRecord { new_best, rank }
    }
}

/// Non-negative whole number stored as text. Accepts floats ("12.7" -> 12).
fn load_number(store: &impl KeyValueStore, key: &str) -> Option<u32> {
    let raw = store.get(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.min(u32::MAX as f64) as u32),
        _ => {
            log::warn!("Ignoring corrupt value for {}: {:?}", key, raw);
            None
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt value for {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use crate::shop::DEFAULT_SKIN;

    #[test]
    fn test_empty_store_gives_defaults() {
        let profile = Profile::load(&MemoryStore::new());
        assert_eq!(profile.wallet, Wallet::default());
        assert_eq!(profile.best_score, 0);
        assert!(profile.highscores.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::default();
        profile.wallet.deposit(120);
        profile.wallet.select("emerald").unwrap();
        profile.record_session(SessionResult { score: 33.4, coins: 2 }, Difficulty::Hard, 5.0);
        profile.save(&mut store).unwrap();

        let loaded = Profile::load(&store);
        assert_eq!(loaded, profile);
        assert_eq!(loaded.wallet.total_coins, 22);
        assert_eq!(loaded.wallet.equipped, "emerald");
        assert_eq!(loaded.best_score, 33);
    }

    #[test]
    fn test_plain_value_formats() {
        let mut store = MemoryStore::new();
        Profile::default().save(&mut store).unwrap();
        assert_eq!(store.get(keys::COINS).as_deref(), Some("0"));
        assert_eq!(store.get(keys::OWNED).as_deref(), Some(r#"["neon"]"#));
        assert_eq!(store.get(keys::EQUIPPED).as_deref(), Some("neon"));
    }

    #[test]
    fn test_corrupt_values_treated_as_absent() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "lots").unwrap();
        store.set(keys::OWNED, "[\"ruby\"").unwrap();
        store.set(keys::EQUIPPED, "ruby").unwrap();
        store.set(keys::BEST_SCORE, "-4").unwrap();
        store.set(keys::HIGH_SCORES, "null").unwrap();

        let profile = Profile::load(&store);
        assert_eq!(profile.wallet.total_coins, 0);
        assert_eq!(profile.wallet.owned, vec![DEFAULT_SKIN.to_string()]);
        // ruby is not owned once the list is discarded
        assert_eq!(profile.wallet.equipped, DEFAULT_SKIN);
        assert_eq!(profile.best_score, 0);
        assert!(profile.highscores.is_empty());
    }

    #[test]
    fn test_good_keys_survive_bad_neighbours() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "75").unwrap();
        store.set(keys::OWNED, "{}").unwrap();
        store.set(keys::BEST_SCORE, "41.9").unwrap();

        let profile = Profile::load(&store);
        assert_eq!(profile.wallet.total_coins, 75);
        assert_eq!(profile.best_score, 41);
    }

    #[test]
    fn test_record_session() {
        let mut profile = Profile::default();
        let first = profile.record_session(SessionResult { score: 10.5, coins: 3 }, Difficulty::Easy, 1.0);
        assert_eq!(first, SessionRecord { new_best: true, rank: Some(1) });
        assert_eq!(profile.wallet.total_coins, 3);

        let second = profile.record_session(SessionResult { score: 4.0, coins: 1 }, Difficulty::Easy, 2.0);
        assert_eq!(second, SessionRecord { new_best: false, rank: Some(2) });
        assert_eq!(profile.best_score, 10);
        assert_eq!(profile.wallet.total_coins, 4);

        // Under a second never reaches the board
        let third = profile.record_session(SessionResult { score: 0.4, coins: 0 }, Difficulty::Easy, 3.0);
        assert_eq!(third.rank, None);
    }
}
