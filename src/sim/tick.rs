//! Per-frame simulation tick
//!
//! Order within a tick is fixed:
//! 1. Recompute scroll speed from score
//! 2. Scroll and recycle platforms
//! 3. Move the player (scroll + anchor snap, or advance the jump tween)
//! 4. Boundary check (fell / crushed)
//! 5. Input, against the post-movement positions

use serde::{Deserialize, Serialize};

use super::difficulty::scroll_speed;
use super::jump::{finish_jump, try_jump};
use super::lane::Direction;
use super::state::{GameOverReason, GameState, Motion};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Lane move pressed this frame (left wins if both were pressed)
    pub direction: Option<Direction>,
    /// Restart tap/click
    pub restart: bool,
    /// Idle/demo mode - the game plays itself
    pub idle_mode: bool,
}

impl TickInput {
    /// Build from "just pressed" flags for the two move keys
    pub fn from_keys(left: bool, right: bool) -> Self {
        let direction = if left {
            Some(Direction::Left)
        } else if right {
            Some(Direction::Right)
        } else {
            None
        };
        Self {
            direction,
            ..Default::default()
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_game_over() {
        state.restart_grace = (state.restart_grace - dt).max(0.0);
        if (input.restart || input.idle_mode) && state.restart_armed() {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;

    // Difficulty follows score only
    state.scroll_speed = scroll_speed(state.score, &state.tuning);

    let recycled = state
        .platforms
        .advance(dt, state.scroll_speed, &mut state.rng, &state.tuning);
    if state.player.anchor.is_some_and(|a| recycled.contains(&a)) {
        state.player.anchor = None;
    }

    update_player(state, dt);
    check_boundaries(state);

    if state.is_game_over() {
        return;
    }

    let direction = if input.idle_mode {
        autopilot(state)
    } else {
        input.direction
    };
    if let Some(dir) = direction {
        try_jump(state, dir);
    }
}

fn update_player(state: &mut GameState, dt: f32) {
    let finished = match &mut state.player.motion {
        Motion::Grounded => {
            state.player.pos.y += state.scroll_speed * dt;
            None
        }
        Motion::Jumping { kind, tween } => {
            state.player.pos = tween.advance(dt);
            tween.is_finished().then_some(*kind)
        }
        Motion::Falling => None,
    };

    if let Some(kind) = finished {
        finish_jump(state, kind);
    }

    // Lock to the anchor so the player never slides off it
    if matches!(state.player.motion, Motion::Grounded) {
        if let Some(y) = state.anchor_platform().map(|p| p.y) {
            state.player.pos.y = y;
        }
    }
}

fn check_boundaries(state: &mut GameState) {
    let y = state.player.pos.y;
    if y > state.tuning.fall_line() {
        state.game_over(GameOverReason::FellIntoVoid);
    }
    if y < state.tuning.ceiling_y {
        state.game_over(GameOverReason::CrushedByCeiling);
    }
}

/// Demo-mode move choice: once the player has sunk into the lower half of the
/// screen, jump to the nearest reachable platform that isn't too close to the
/// ceiling.
fn autopilot(state: &GameState) -> Option<Direction> {
    if state.player.is_jumping() {
        return None;
    }

    let tuning = &state.tuning;
    let player = &state.player;
    if player.pos.y < tuning.screen_height / 2.0 {
        return None;
    }

    let safe_y = tuning.ceiling_y + tuning.platform_gap;
    [Direction::Left, Direction::Right]
        .into_iter()
        .filter_map(|dir| {
            let index = state.platforms.find_landing(
                player.lane.wrap(dir),
                player.pos.y,
                tuning.jump_distance_limit,
                tuning,
            )?;
            let platform = state.platforms.get(index)?;
            (platform.y > safe_y).then_some((dir, player.pos.y - platform.y))
        })
        .fold(None, |best: Option<(Direction, f32)>, (dir, dist)| match best {
            Some((_, d)) if d <= dist => best,
            _ => Some((dir, dist)),
        })
        .map(|(dir, _)| dir)
}
