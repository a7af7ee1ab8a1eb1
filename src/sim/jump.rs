//! Lane-jump resolution
//!
//! A jump targets the neighbouring lane (wrapping 0 <-> 2). If a platform in
//! that lane is above the player and within reach, the player is committed to
//! it immediately (lane, anchor, score) and a tween carries the capsule
//! there. Otherwise the player hops toward the lane and drops out of the
//! world; the boundary check ends the run once the hop finishes.

use glam::Vec2;

use super::lane::{Direction, WrapKind};
use super::state::{GameEvent, GameState, JumpKind, Motion};
use super::tween::{Ease, Tween, TweenStage};
use crate::consts::*;

/// Result of a jump attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Landing found; index of the target platform
    Landing { platform: usize, kind: JumpKind },
    /// No landing in reach
    Void,
    /// Player was already mid-jump (or the run is over)
    Ignored,
}

/// Attempt a jump toward `dir`
pub fn try_jump(state: &mut GameState, dir: Direction) -> JumpOutcome {
    if state.is_game_over() || state.player.is_jumping() {
        return JumpOutcome::Ignored;
    }

    let tuning = &state.tuning;
    let from_lane = state.player.lane;
    let target_lane = from_lane.wrap(dir);
    let wrap = WrapKind::between(from_lane, target_lane);
    let start = state.player.pos;

    let landing = state.platforms.find_landing(
        target_lane,
        start.y,
        tuning.jump_distance_limit,
        tuning,
    );

    match landing.and_then(|i| state.platforms.get(i).map(|p| (i, Vec2::new(p.x, p.y)))) {
        Some((index, target)) => {
            let (kind, tween) = match wrap {
                WrapKind::None => (
                    JumpKind::Normal,
                    Tween::new(
                        start,
                        vec![TweenStage::new(target, JUMP_DURATION, Ease::SineOut)],
                    ),
                ),
                WrapKind::Left | WrapKind::Right => {
                    let mid_y = (start.y + target.y) / 2.0 - WRAP_ARC_LIFT;
                    let exit_x = wrap.exit_x(tuning).unwrap_or(target.x);
                    let entry_x = wrap.entry_x(tuning).unwrap_or(target.x);
                    let kind = if wrap == WrapKind::Left {
                        JumpKind::WrapLeft
                    } else {
                        JumpKind::WrapRight
                    };
                    (
                        kind,
                        Tween::new(
                            start,
                            vec![
                                TweenStage::new(
                                    Vec2::new(exit_x, mid_y),
                                    WRAP_STAGE_DURATION,
                                    Ease::QuadIn,
                                ),
                                TweenStage::teleport(Vec2::new(entry_x, mid_y)),
                                TweenStage::new(target, WRAP_STAGE_DURATION, Ease::QuadOut),
                            ],
                        ),
                    )
                }
            };

            let player = &mut state.player;
            player.lane = target_lane;
            player.anchor = Some(index);
            if kind == JumpKind::Normal {
                player.scale = Vec2::new(JUMP_STRETCH_X, JUMP_STRETCH_Y);
            }
            player.motion = Motion::Jumping { kind, tween };

            state.events.push(GameEvent::Jumped { kind });
            state.add_score();
            log::debug!(
                "Jump {:?} to lane {} (platform {}), score {}",
                kind,
                target_lane.index(),
                index,
                state.score
            );

            JumpOutcome::Landing {
                platform: index,
                kind,
            }
        }
        None => {
            let target_x = wrap.exit_x(tuning).unwrap_or(target_lane.x(tuning));
            let tween = Tween::yoyo(
                start,
                TweenStage::new(
                    Vec2::new(target_x, start.y - VOID_HOP_HEIGHT),
                    VOID_HOP_DURATION,
                    Ease::Linear,
                ),
            );
            state.player.motion = Motion::Jumping {
                kind: JumpKind::Void,
                tween,
            };
            state.events.push(GameEvent::VoidJump);
            log::debug!("Void jump toward lane {}", target_lane.index());

            JumpOutcome::Void
        }
    }
}

/// Apply the end of a finished jump tween
pub(crate) fn finish_jump(state: &mut GameState, kind: JumpKind) {
    let player = &mut state.player;
    player.scale = Vec2::ONE;

    if kind == JumpKind::Void {
        player.pos.y = state.tuning.screen_height + VOID_DROP_BELOW;
        player.motion = Motion::Falling;
        return;
    }

    player.motion = Motion::Grounded;
    let anchor_y = player
        .anchor
        .and_then(|i| state.platforms.get(i))
        .filter(|p| p.active)
        .map(|p| p.y);
    if let Some(y) = anchor_y {
        player.pos.y = y;
    }
}
