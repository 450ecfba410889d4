//! Mapping held directions to a movement vector
//!
//! The whole gimmick of the game lives here: the mapping can be inverted,
//! either for the whole session or on a timer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which direction keys are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// How the control mapping is inverted during a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ReversalPolicy {
    /// Normal controls
    Off,
    /// Controls are inverted for the whole session
    #[default]
    Permanent,
    /// Starts inverted and flips every `interval` seconds
    Periodic { interval: f32 },
}

/// Movement vector for the held directions, magnitude 0 or 1
pub fn direction_vector(held: HeldDirections, reversed: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if held.up {
        dir.y -= 1.0;
    }
    if held.down {
        dir.y += 1.0;
    }
    if held.left {
        dir.x -= 1.0;
    }
    if held.right {
        dir.x += 1.0;
    }
    if reversed {
        dir = -dir;
    }
    dir.normalize_or_zero()
}

/// Reversal flag plus the timer driving periodic toggles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReversalState {
    pub policy: ReversalPolicy,
    pub reversed: bool,
    /// Seconds since the last toggle
    pub timer: f32,
}

impl ReversalState {
    pub fn new(policy: ReversalPolicy) -> Self {
        Self {
            policy,
            reversed: !matches!(policy, ReversalPolicy::Off),
            timer: 0.0,
        }
    }

    /// Advance the toggle timer. Returns the new flag if it flipped this step.
    pub fn advance(&mut self, dt: f32) -> Option<bool> {
        let ReversalPolicy::Periodic { interval } = self.policy else {
            return None;
        };
        if interval <= 0.0 {
            return None;
        }

        self.timer += dt;
        if self.timer > interval {
            self.reversed = !self.reversed;
            self.timer = 0.0;
            return Some(self.reversed);
        }
        None
    }
}
