//! Simulation step
//!
//! Advances a running session by `dt` seconds and reports what happened.

use super::collision::{collect_coins, player_hit};
use super::direction::{HeldDirections, direction_vector};
use super::physics::{cull_enemies, integrate_enemies, integrate_player, update_particles};
use super::spawn::{spawn_coin, spawn_enemy, spawn_particles};
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction keys currently held
    pub held: HeldDirections,
    /// Dash key held
    pub action: bool,
}

/// Advance the game state by `dt` seconds.
///
/// Does nothing unless the session is running. A terminal collision still
/// lets the rest of the step finish before the phase moves to `Result`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    let dt = dt.max(0.0);
    let size = state.config.playfield_size;

    state.score += dt;

    if let Some(reversed) = state.reversal.advance(dt) {
        log::debug!("Controls {}", if reversed { "reversed" } else { "restored" });
        events.push(GameEvent::ReversalToggled { reversed });
    }

    // Dash countdown
    let player = &mut state.player;
    player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
    if player.is_dashing() {
        player.dash_timer = (player.dash_timer - dt).max(0.0);
        if !player.is_dashing() {
            events.push(GameEvent::DashEnded);
        }
    }
    if let Some(dash) = state.config.dash {
        if input.action && !player.is_dashing() && player.dash_cooldown <= 0.0 {
            player.dash_timer = dash.duration;
            player.dash_cooldown = dash.cooldown;
            log::debug!("Dash");
            events.push(GameEvent::DashStarted);
        }
    }

    // Movement
    let direction = direction_vector(input.held, state.reversal.reversed);
    let speed = match state.config.dash {
        Some(dash) if player.is_dashing() => state.config.player_speed * dash.speed_multiplier,
        _ => state.config.player_speed,
    };
    integrate_player(player, direction, speed, dt, size);

    // Spawning
    let enemy_count = state.enemy_spawner.advance(dt, &mut state.rng);
    for _ in 0..enemy_count {
        let id = state.next_entity_id();
        let speed = state.config.enemy_speed_at(state.score);
        let enemy = spawn_enemy(&mut state.rng, id, state.player.pos, speed, size);
        state.enemies.push(enemy);
        events.push(GameEvent::EnemySpawned { id });
    }
    let coin_count = state.coin_spawner.advance(dt, &mut state.rng);
    for _ in 0..coin_count {
        let id = state.next_entity_id();
        let coin = spawn_coin(&mut state.rng, id, size);
        state.coins_on_field.push(coin);
        events.push(GameEvent::CoinSpawned { id });
    }

    // Enemies: move, hit test, then drop the ones that left the field
    integrate_enemies(&mut state.enemies, dt);
    let hit = player_hit(state);
    cull_enemies(&mut state.enemies, size);

    // Coins
    for (id, pos) in collect_coins(state) {
        state.coins += 1;
        let burst = state.config.particle_burst;
        let first_id = state.next_id_block(burst as u32);
        let particles = spawn_particles(&mut state.rng, first_id..first_id + burst as u32, pos);
        state.particles.extend(particles);
        events.push(GameEvent::CoinCollected { id, pos });
    }

    update_particles(&mut state.particles, dt);

    if hit {
        state.phase = GamePhase::Result;
        log::info!(
            "Game over after {:.1}s with {} coins",
            state.score,
            state.coins
        );
        events.push(GameEvent::GameOver {
            score: state.score,
            coins: state.coins,
        });
    }

    events
}
