//! Entity spawning
//!
//! Spawn timing is a Poisson process driven by exponential inter-arrival
//! times, so the long-run rate does not depend on the frame rate and a
//! seeded session always spawns at the same moments.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Enemy, Particle};
use crate::consts::*;

/// Countdown to the next spawn of one entity kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    /// Mean spawns per second
    pub rate: f32,
    /// Seconds until the next spawn
    pub until_next: f32,
}

impl SpawnTimer {
    pub fn new(rate: f32, rng: &mut impl Rng) -> Self {
        let mut timer = Self {
            rate,
            until_next: f32::INFINITY,
        };
        timer.until_next = timer.sample_interval(rng);
        timer
    }

    /// Advance by `dt` and return how many spawns fell inside this step
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng) -> u32 {
        if self.rate <= 0.0 || dt <= 0.0 {
            return 0;
        }

        let mut count = 0;
        self.until_next -= dt;
        while self.until_next <= 0.0 {
            count += 1;
            self.until_next += self.sample_interval(rng);
        }
        count
    }

    fn sample_interval(&self, rng: &mut impl Rng) -> f32 {
        if self.rate <= 0.0 {
            return f32::INFINITY;
        }
        // (0, 1] so the log stays finite
        let u: f32 = 1.0 - rng.random::<f32>();
        -u.ln() / self.rate
    }
}

/// Spawn an enemy just outside a random edge, aimed at `target`
pub fn spawn_enemy(rng: &mut impl Rng, id: u32, target: Vec2, speed: f32, size: f32) -> Enemy {
    let along = rng.random::<f32>() * size;
    let pos = match rng.random_range(0..4) {
        0 => Vec2::new(along, -ENEMY_SPAWN_OFFSET),
        1 => Vec2::new(size + ENEMY_SPAWN_OFFSET, along),
        2 => Vec2::new(along, size + ENEMY_SPAWN_OFFSET),
        _ => Vec2::new(-ENEMY_SPAWN_OFFSET, along),
    };
    Enemy {
        id,
        pos,
        vel: (target - pos).normalize_or_zero() * speed,
    }
}

/// Spawn a coin somewhere inside the inset playfield
pub fn spawn_coin(rng: &mut impl Rng, id: u32, size: f32) -> Coin {
    let span = size - 2.0 * COIN_INSET;
    Coin {
        id,
        pos: Vec2::new(
            COIN_INSET + rng.random::<f32>() * span,
            COIN_INSET + rng.random::<f32>() * span,
        ),
    }
}

/// Burst of particles flying out of `pos`, one per id
pub fn spawn_particles(rng: &mut impl Rng, ids: impl IntoIterator<Item = u32>, pos: Vec2) -> Vec<Particle> {
    ids.into_iter()
        .map(|id| Particle {
            id,
            pos,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            ),
            life: PARTICLE_LIFE,
            size: rng.random_range(3.0..6.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_rate_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut timer = SpawnTimer::new(0.0, &mut rng);
        for _ in 0..10_000 {
            assert_eq!(timer.advance(0.1, &mut rng), 0);
        }
    }

    #[test]
    fn test_long_run_rate_is_frame_rate_independent() {
        let total_time = 10_000.0;
        for dt in [1.0 / 120.0, 1.0 / 30.0, 0.5] {
            let mut rng = Pcg32::seed_from_u64(42);
            let mut timer = SpawnTimer::new(1.5, &mut rng);
            let steps = (total_time / dt) as u32;
            let spawned: u32 = (0..steps).map(|_| timer.advance(dt, &mut rng)).sum();
            let expected = 1.5 * total_time;
            let error = (spawned as f32 - expected).abs() / expected;
            assert!(error < 0.05, "dt={dt}: spawned {spawned}, expected ~{expected}");
        }
    }

    #[test]
    fn test_seeded_timer_is_deterministic() {
        let run = || {
            let mut rng = Pcg32::seed_from_u64(9);
            let mut timer = SpawnTimer::new(3.0, &mut rng);
            (0..600).map(|_| timer.advance(1.0 / 60.0, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_enemy_spawns_outside_and_aims_at_target() {
        let mut rng = Pcg32::seed_from_u64(3);
        let target = Vec2::new(300.0, 300.0);
        for id in 0..200 {
            let enemy = spawn_enemy(&mut rng, id, target, 180.0, PLAYFIELD_SIZE);
            let outside = enemy.pos.x < 0.0
                || enemy.pos.y < 0.0
                || enemy.pos.x > PLAYFIELD_SIZE
                || enemy.pos.y > PLAYFIELD_SIZE;
            assert!(outside, "enemy spawned inside at {:?}", enemy.pos);
            assert!((enemy.vel.length() - 180.0).abs() < 1e-3);
            let to_target = (target - enemy.pos).normalize();
            assert!(enemy.vel.normalize().dot(to_target) > 0.9999);
        }
    }

    #[test]
    fn test_aimed_enemy_reaches_stationary_player() {
        let mut rng = Pcg32::seed_from_u64(11);
        let target = Vec2::new(120.0, 470.0);
        for id in 0..50 {
            let mut enemy = spawn_enemy(&mut rng, id, target, 200.0, PLAYFIELD_SIZE);
            let time_to_impact = enemy.pos.distance(target) / 200.0;
            let dt = 1.0 / 120.0;
            let mut t = 0.0;
            let mut reached = false;
            while t <= time_to_impact + dt {
                enemy.pos += enemy.vel * dt;
                t += dt;
                if enemy.pos.distance_squared(target) < ENEMY_HIT_DISTANCE_SQ {
                    reached = true;
                    break;
                }
            }
            assert!(reached);
            assert!(t <= time_to_impact);
        }
    }

    #[test]
    fn test_coins_spawn_inside_inset() {
        let mut rng = Pcg32::seed_from_u64(5);
        for id in 0..500 {
            let coin = spawn_coin(&mut rng, id, PLAYFIELD_SIZE);
            assert!(coin.pos.x >= COIN_INSET && coin.pos.x <= PLAYFIELD_SIZE - COIN_INSET);
            assert!(coin.pos.y >= COIN_INSET && coin.pos.y <= PLAYFIELD_SIZE - COIN_INSET);
        }
    }

    #[test]
    fn test_particle_burst() {
        let mut rng = Pcg32::seed_from_u64(5);
        let burst = spawn_particles(&mut rng, 10..18, Vec2::new(100.0, 100.0));
        assert_eq!(burst.len(), 8);
        assert!(burst.iter().all(|p| p.life == PARTICLE_LIFE));
        assert!(burst.iter().all(|p| p.vel.x.abs() <= PARTICLE_MAX_SPEED));
    }
}
