//! Position integration and culling

use glam::Vec2;

use super::state::{Enemy, Particle, Player};
use crate::clamp_to_playfield;
use crate::consts::ENEMY_DESPAWN_MARGIN;

/// Move the player along `direction` and keep it inside the playfield
pub fn integrate_player(player: &mut Player, direction: Vec2, speed: f32, dt: f32, size: f32) {
    player.pos = clamp_to_playfield(player.pos + direction * speed * dt, size);
}

pub fn integrate_enemies(enemies: &mut [Enemy], dt: f32) {
    for enemy in enemies {
        enemy.pos += enemy.vel * dt;
    }
}

/// Whether an enemy has left the expanded playfield bounds
#[inline]
pub fn is_out_of_bounds(pos: Vec2, size: f32) -> bool {
    pos.x < -ENEMY_DESPAWN_MARGIN
        || pos.y < -ENEMY_DESPAWN_MARGIN
        || pos.x > size + ENEMY_DESPAWN_MARGIN
        || pos.y > size + ENEMY_DESPAWN_MARGIN
}

/// Drop enemies that flew off the field; returns how many were removed
pub fn cull_enemies(enemies: &mut Vec<Enemy>, size: f32) -> usize {
    let before = enemies.len();
    enemies.retain(|e| !is_out_of_bounds(e.pos, size));
    before - enemies.len()
}

/// Age, move and expire particles
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.life -= dt;
        particle.pos += particle.vel * dt;
    }
    particles.retain(|p| p.life > 0.0);
}
