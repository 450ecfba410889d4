//! Player contact tests
//!
//! Everything is a circle, so both tests compare squared distances against a
//! squared radius and never take a square root.

use glam::Vec2;

use super::state::GameState;
use crate::consts::{COIN_PICKUP_DISTANCE_SQ, ENEMY_HIT_DISTANCE_SQ};

/// Whether an enemy at `enemy_pos` touches the player
#[inline]
pub fn enemy_hits_player(player_pos: Vec2, enemy_pos: Vec2) -> bool {
    player_pos.distance_squared(enemy_pos) < ENEMY_HIT_DISTANCE_SQ
}

/// Whether a coin at `coin_pos` is close enough to be picked up
#[inline]
pub fn coin_in_reach(player_pos: Vec2, coin_pos: Vec2) -> bool {
    player_pos.distance_squared(coin_pos) < COIN_PICKUP_DISTANCE_SQ
}

/// Whether any live enemy touches the player. Dashing players are immune.
pub fn player_hit(state: &GameState) -> bool {
    if state.player.is_dashing() {
        return false;
    }
    let player = state.player.pos;
    state.enemies.iter().any(|e| enemy_hits_player(player, e.pos))
}

/// Remove every coin the player is touching.
///
/// Returns `(id, position)` of the collected coins. Removal happens here, so a
/// coin can only ever be collected once.
pub fn collect_coins(state: &mut GameState) -> Vec<(u32, Vec2)> {
    let player = state.player.pos;
    let mut collected = Vec::new();
    state.coins_on_field.retain(|coin| {
        if coin_in_reach(player, coin.pos) {
            collected.push((coin.id, coin.pos));
            false
        } else {
            true
        }
    });
    collected
}
