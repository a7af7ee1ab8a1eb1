//! HUD text and game-over overlay
//!
//! Frontends draw these however they like; the content lives here so every
//! frontend shows the same thing.

use crate::sim::GameState;

pub const GAME_OVER_TITLE: &str = "GAME OVER";
pub const RESTART_LABEL: &str = "TAP TO RESTART";

/// Score readout shown in the corner
pub fn score_label(score: u64) -> String {
    format!("Score: {}", score)
}

/// Overlay shown once a run has ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverOverlay {
    pub title: &'static str,
    /// Why the run ended, e.g. "fell into the void"
    pub reason: String,
    pub restart_label: &'static str,
    pub final_score: u64,
    /// Restart control accepts taps (grace period over)
    pub restart_armed: bool,
}

impl GameOverOverlay {
    /// Overlay for the current state (None while playing)
    pub fn from_state(state: &GameState) -> Option<Self> {
        let reason = state.game_over_reason()?;
        Some(Self {
            title: GAME_OVER_TITLE,
            reason: reason.to_string(),
            restart_label: RESTART_LABEL,
            final_score: state.score,
            restart_armed: state.restart_armed(),
        })
    }
}
