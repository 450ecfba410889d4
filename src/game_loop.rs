//! Frame driver and session lifecycle
//!
//! The host calls `frame` once per display frame with the wall-clock delta.
//! The delta is split into fixed `SIM_DT` substeps so a session plays out the
//! same regardless of display refresh rate.

use crate::config::GameConfig;
use crate::consts::*;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Final numbers of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    /// Seconds survived
    pub score: f32,
    /// Coins collected during the session
    pub coins: u32,
}

impl SessionResult {
    /// Score as displayed and stored (whole seconds)
    pub fn whole_seconds(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }
}

/// Receives the end of a session
pub trait SessionObserver {
    fn on_game_over(&mut self, result: SessionResult);
}

impl<F: FnMut(SessionResult)> SessionObserver for F {
    fn on_game_over(&mut self, result: SessionResult) {
        self(result)
    }
}

/// Owns the world state and drives it frame by frame
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
    accumulator: f32,
}

impl GameLoop {
    /// Idle loop; nothing runs until `start`
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(config, 0),
            accumulator: 0.0,
        }
    }

    /// Start or restart a session
    pub fn start(&mut self, config: GameConfig, seed: u64) {
        self.state.start(config, seed);
        self.accumulator = 0.0;
    }

    /// Abandon the current session without reporting a result
    pub fn stop(&mut self) {
        self.state.phase = GamePhase::Stopped;
        self.accumulator = 0.0;
    }

    /// Whether the host should schedule another frame
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Simulate one display frame.
    ///
    /// Runs as many fixed substeps as `dt` covers (capped), stopping early if
    /// the session ends; the observer is told about the end exactly once.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &TickInput,
        observer: &mut impl SessionObserver,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;

            let step_events = tick(&mut self.state, input, SIM_DT);
            let game_over = step_events.iter().find_map(|e| match *e {
                GameEvent::GameOver { score, coins } => Some(SessionResult { score, coins }),
                _ => None,
            });
            events.extend(step_events);

            if let Some(result) = game_over {
                self.accumulator = 0.0;
                observer.on_game_over(result);
                break;
            }
        }

        events
    }
}
