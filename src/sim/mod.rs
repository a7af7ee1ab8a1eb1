//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod jump;
pub mod lane;
pub mod platforms;
pub mod state;
pub mod tick;
pub mod tween;

pub use difficulty::scroll_speed;
pub use jump::{JumpOutcome, try_jump};
pub use lane::{Direction, Lane, WrapKind};
pub use platforms::{Platform, PlatformPool};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState, JumpKind, Motion, Player};
pub use tick::{TickInput, tick};
pub use tween::{Ease, Tween, TweenStage};

#[cfg(test)]
pub(crate) mod testing {
    use glam::Vec2;

    use super::{GameState, Lane, Platform, PlatformPool, Player};

    /// Session with the player unanchored at `lane`/`y` and exactly the given
    /// `(lane, y)` platforms in the pool
    pub fn staged(lane: u8, y: f32, platforms: &[(u8, f32)]) -> GameState {
        let mut state = GameState::new(1);
        let tuning = state.tuning.clone();
        state.platforms = PlatformPool::from_platforms(
            platforms
                .iter()
                .map(|&(l, py)| Platform::new(Lane::new(l), py, &tuning))
                .collect(),
        );
        state.player = Player::new(&tuning);
        state.player.lane = Lane::new(lane);
        state.player.pos = Vec2::new(Lane::new(lane).x(&tuning), y);
        state
    }
}
