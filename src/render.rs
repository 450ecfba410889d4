//! Render sink
//!
//! The game draws nothing itself. Each frame the world is flattened into a
//! list of sprites with stable ids; the DOM adapter keeps one element per id
//! and writes its transform.

use glam::Vec2;

use crate::consts::PARTICLE_LIFE;
use crate::shop::Skin;
use crate::sim::GameState;

/// Player sprites use this id; entity ids start at 1
pub const PLAYER_SPRITE_ID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Coin,
    Particle,
}

impl SpriteKind {
    /// CSS class of the element backing this sprite
    pub fn css_class(&self) -> &'static str {
        match self {
            SpriteKind::Player => "player",
            SpriteKind::Enemy => "enemy",
            SpriteKind::Coin => "coin",
            SpriteKind::Particle => "particle",
        }
    }
}

/// One positioned element
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: u32,
    pub kind: SpriteKind,
    /// Center in playfield units
    pub pos: Vec2,
    pub rotation_deg: f32,
    pub opacity: f32,
    /// Edge length in playfield units (particles only, 0 = stylesheet size)
    pub size: f32,
    pub color: Option<&'static str>,
}

impl Sprite {
    /// CSS `transform` for an element positioned at the sprite center
    pub fn css_transform(&self) -> String {
        let mut transform = format!(
            "translate({:.2}px, {:.2}px) translate(-50%, -50%)",
            self.pos.x, self.pos.y
        );
        if self.rotation_deg != 0.0 {
            transform.push_str(&format!(" rotate({}deg)", self.rotation_deg));
        }
        transform
    }
}

/// Flatten the world into sprites, player first
pub fn sprites(state: &GameState, skin: &Skin) -> Vec<Sprite> {
    let mut out = Vec::with_capacity(
        1 + state.enemies.len() + state.coins_on_field.len() + state.particles.len(),
    );

    out.push(Sprite {
        id: PLAYER_SPRITE_ID,
        kind: SpriteKind::Player,
        pos: state.player.pos,
        rotation_deg: 0.0,
        opacity: 1.0,
        size: 0.0,
        color: Some(skin.color),
    });

    out.extend(state.enemies.iter().map(|e| Sprite {
        id: e.id,
        kind: SpriteKind::Enemy,
        pos: e.pos,
        rotation_deg: 45.0,
        opacity: 1.0,
        size: 0.0,
        color: None,
    }));

    out.extend(state.coins_on_field.iter().map(|c| Sprite {
        id: c.id,
        kind: SpriteKind::Coin,
        pos: c.pos,
        rotation_deg: 0.0,
        opacity: 1.0,
        size: 0.0,
        color: None,
    }));

    out.extend(state.particles.iter().map(|p| Sprite {
        id: p.id,
        kind: SpriteKind::Particle,
        pos: p.pos,
        rotation_deg: 0.0,
        opacity: (p.life / PARTICLE_LIFE).clamp(0.0, 1.0),
        size: p.size,
        color: Some("#ffcc00"),
    }));

    out
}
