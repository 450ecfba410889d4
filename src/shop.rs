//! Skin shop and coin wallet
//!
//! Skins are purely cosmetic. Coins earned in sessions are deposited into the
//! wallet and spent here; a failed purchase is an ordinary `Err` for the UI
//! to show, never a blocking prompt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A purchasable player skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS color used for the player dot and its glow
    pub color: &'static str,
    pub cost: u32,
}

/// Skin every wallet owns from the start
pub const DEFAULT_SKIN: &str = "neon";

/// Everything the shop sells
pub static SKINS: [Skin; 4] = [
    Skin { id: "neon", name: "NEON BLUE", color: "#00f3ff", cost: 0 },
    Skin { id: "ruby", name: "RUBY RED", color: "#ff0055", cost: 50 },
    Skin { id: "emerald", name: "TOXIC GREEN", color: "#00ff00", cost: 100 },
    Skin { id: "gold", name: "GOLDEN OP", color: "#ffcc00", cost: 300 },
];

/// Look up a skin by id
pub fn find_skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

/// The default skin
pub fn default_skin() -> &'static Skin {
    &SKINS[0]
}

/// What a successful shop action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    /// Skin bought (and equipped)
    Purchased { cost: u32 },
    /// Already-owned skin equipped
    Equipped,
    /// Nothing to do
    AlreadyEquipped,
}

/// Why a shop action failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("not enough coins: need {cost}, have {available}")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("unknown skin `{0}`")]
    UnknownSkin(String),
}

/// Cross-session coins and skin ownership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub total_coins: u32,
    pub owned: Vec<String>,
    pub equipped: String,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            total_coins: 0,
            owned: vec![DEFAULT_SKIN.to_string()],
            equipped: DEFAULT_SKIN.to_string(),
        }
    }
}

impl Wallet {
    pub fn owns(&self, skin_id: &str) -> bool {
        self.owned.iter().any(|s| s == skin_id)
    }

    /// The equipped skin, falling back to the default for unknown ids
    pub fn equipped_skin(&self) -> &'static Skin {
        find_skin(&self.equipped).unwrap_or_else(default_skin)
    }

    /// Add coins earned in a session
    pub fn deposit(&mut self, coins: u32) {
        self.total_coins = self.total_coins.saturating_add(coins);
    }

    /// Buy or equip a skin, the single action behind a shop card click.
    ///
    /// Owned skins are equipped for free; unowned skins are bought and
    /// equipped if affordable. On error the wallet is left untouched.
    pub fn select(&mut self, skin_id: &str) -> Result<ShopOutcome, ShopError> {
        let skin = find_skin(skin_id).ok_or_else(|| ShopError::UnknownSkin(skin_id.to_string()))?;

        if self.equipped == skin.id {
            return Ok(ShopOutcome::AlreadyEquipped);
        }

        if self.owns(skin.id) {
            self.equipped = skin.id.to_string();
            log::info!("Equipped skin {}", skin.id);
            return Ok(ShopOutcome::Equipped);
        }

        if self.total_coins < skin.cost {
            return Err(ShopError::InsufficientFunds {
                cost: skin.cost,
                available: self.total_coins,
            });
        }

        self.total_coins -= skin.cost;
        self.owned.push(skin.id.to_string());
        self.equipped = skin.id.to_string();
        log::info!("Bought skin {} for {} coins", skin.id, skin.cost);
        Ok(ShopOutcome::Purchased { cost: skin.cost })
    }

    /// Repair a wallet loaded from storage: known skins only, no duplicates,
    /// default always owned, equipped always owned.
    pub fn sanitize(&mut self) {
        let mut owned: Vec<String> = Vec::with_capacity(self.owned.len() + 1);
        owned.push(DEFAULT_SKIN.to_string());
        for id in self.owned.drain(..) {
            if find_skin(&id).is_some() && !owned.contains(&id) {
                owned.push(id);
            }
        }
        self.owned = owned;

        if !self.owns(&self.equipped) {
            log::warn!("Equipped skin `{}` not owned, using default", self.equipped);
            self.equipped = DEFAULT_SKIN.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet_with(coins: u32) -> Wallet {
        Wallet {
            total_coins: coins,
            ..Wallet::default()
        }
    }

    #[test]
    fn test_exact_cost_purchase() {
        let mut wallet = wallet_with(50);
        assert_eq!(wallet.select("ruby"), Ok(ShopOutcome::Purchased { cost: 50 }));
        assert_eq!(wallet.total_coins, 0);
        assert!(wallet.owns("ruby"));
        assert_eq!(wallet.equipped, "ruby");
    }

    #[test]
    fn test_insufficient_funds_leaves_wallet_unchanged() {
        let mut wallet = wallet_with(99);
        let before = wallet.clone();
        assert_eq!(
            wallet.select("emerald"),
            Err(ShopError::InsufficientFunds { cost: 100, available: 99 })
        );
        assert_eq!(wallet, before);
        assert_eq!(wallet.equipped, DEFAULT_SKIN);
    }

    #[test]
    fn test_equip_owned_skin_is_free() {
        let mut wallet = wallet_with(400);
        wallet.select("gold").unwrap();
        assert_eq!(wallet.total_coins, 100);

        assert_eq!(wallet.select("neon"), Ok(ShopOutcome::Equipped));
        assert_eq!(wallet.select("gold"), Ok(ShopOutcome::Equipped));
        assert_eq!(wallet.total_coins, 100);
        assert_eq!(wallet.select("gold"), Ok(ShopOutcome::AlreadyEquipped));
    }

    #[test]
    fn test_unknown_skin() {
        let mut wallet = wallet_with(1000);
        assert_eq!(
            wallet.select("plaid"),
            Err(ShopError::UnknownSkin("plaid".to_string()))
        );
        assert_eq!(wallet.total_coins, 1000);
    }

    #[test]
    fn test_deposit_saturates() {
        let mut wallet = wallet_with(u32::MAX - 1);
        wallet.deposit(5);
        assert_eq!(wallet.total_coins, u32::MAX);
    }

    #[test]
    fn test_sanitize() {
        let mut wallet = Wallet {
            total_coins: 3,
            owned: vec!["ruby".into(), "ruby".into(), "plaid".into()],
            equipped: "gold".into(),
        };
        wallet.sanitize();
        assert_eq!(wallet.owned, vec!["neon".to_string(), "ruby".to_string()]);
        assert_eq!(wallet.equipped, DEFAULT_SKIN);
    }
}
