//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; restarting replaces it with a
//! fresh one seeded from the old RNG.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::scroll_speed;
use super::lane::Lane;
use super::platforms::{Platform, PlatformPool};
use super::tween::Tween;
use crate::consts::START_LANE;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Run ended, waiting for a restart tap
    GameOver { reason: GameOverReason },
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Dropped below the bottom of the screen
    FellIntoVoid,
    /// Pushed above the top of the screen
    CrushedByCeiling,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::FellIntoVoid => write!(f, "fell into the void"),
            GameOverReason::CrushedByCeiling => write!(f, "crushed by the ceiling"),
        }
    }
}

/// What kind of jump is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Straight hop to an adjacent lane
    Normal,
    /// Lane 0 -> lane 2 through the left edge
    WrapLeft,
    /// Lane 2 -> lane 0 through the right edge
    WrapRight,
    /// No landing in range; ends below the screen
    Void,
}

/// Player motion state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Standing on (or scrolling with) the world
    Grounded,
    /// A jump tween is running; input is ignored
    Jumping { kind: JumpKind, tween: Tween },
    /// Void hop finished; waiting for the boundary check
    Falling,
}

/// The player capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lane: Lane,
    /// Bottom-centre of the capsule
    pub pos: Vec2,
    /// Cosmetic squash/stretch (1, 1 at rest)
    pub scale: Vec2,
    pub motion: Motion,
    /// Index into the platform pool of the platform being stood on
    pub anchor: Option<usize>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let lane = Lane::new(START_LANE);
        Self {
            lane,
            pos: Vec2::new(lane.x(tuning), tuning.player_start_y),
            scale: Vec2::ONE,
            motion: Motion::Grounded,
            anchor: None,
        }
    }

    /// True while any jump (including a void hop) is unresolved
    pub fn is_jumping(&self) -> bool {
        !matches!(self.motion, Motion::Grounded)
    }
}

/// Events for frontends (score label, sounds, logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { kind: JumpKind },
    Scored(u64),
    VoidJump,
    GameOver(GameOverReason),
    Restarted { run: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Lane choice RNG
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Runs started in this process (0 for the first)
    pub run: u32,
    /// Successful jumps this run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Scroll speed used for the latest tick
    pub scroll_speed: f32,
    /// Seconds until the restart control responds (game over only)
    pub restart_grace: f32,
    pub player: Player,
    pub platforms: PlatformPool,
    /// Pending events, drained by the frontend
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut platforms = PlatformPool::for_tuning(&tuning);
        let anchor = platforms.init_level(&mut rng, &tuning);

        let mut player = Player::new(&tuning);
        player.anchor = anchor;

        Self {
            seed,
            rng,
            scroll_speed: scroll_speed(0, &tuning),
            tuning,
            run: 0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            restart_grace: 0.0,
            player,
            platforms,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            GamePhase::GameOver { reason } => Some(reason),
            GamePhase::Playing => None,
        }
    }

    /// Game over with the restart control accepting input
    pub fn restart_armed(&self) -> bool {
        self.is_game_over() && self.restart_grace <= 0.0
    }

    /// Platform the player is standing on, if it is still active
    pub fn anchor_platform(&self) -> Option<&Platform> {
        self.player
            .anchor
            .and_then(|i| self.platforms.get(i))
            .filter(|p| p.active)
    }

    /// End the run. Repeated calls keep the first reason and emit nothing.
    pub fn game_over(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver { reason };
        self.restart_grace = self.tuning.restart_grace_secs;
        self.events.push(GameEvent::GameOver(reason));
        log::info!("Game over: {} (score {})", reason, self.score);
    }

    /// Replace this run with a fresh one. Tuning carries over; score and
    /// layout do not.
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let run = self.run + 1;
        let events = std::mem::take(&mut self.events);

        *self = Self::with_tuning(seed, self.tuning.clone());
        self.run = run;
        self.events = events;
        self.events.push(GameEvent::Restarted { run });
        log::info!("Run {} started with seed: {}", run, seed);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn add_score(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Scored(self.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lane, Lane::new(1));
        assert_eq!(state.player.pos, Vec2::new(400.0, 400.0));
        assert_eq!(state.player.anchor, Some(0));
        assert_eq!(state.anchor_platform().map(|p| p.y), Some(400.0));
        assert_eq!(state.scroll_speed, 180.0);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = GameState::new(1);
        state.game_over(GameOverReason::CrushedByCeiling);
        state.game_over(GameOverReason::FellIntoVoid);

        assert_eq!(state.game_over_reason(), Some(GameOverReason::CrushedByCeiling));
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(9);
        state.score = 12;
        state.player.lane = Lane::new(0);
        state.game_over(GameOverReason::FellIntoVoid);
        state.drain_events();

        state.restart();

        assert_eq!(state.run, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lane, Lane::new(1));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platforms.len(), 8);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted { run: 1 }]);
    }

    #[test]
    fn test_restart_keeps_tuning() {
        let tuning = Tuning {
            base_scroll_speed: 90.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(5, tuning.clone());
        state.restart();
        assert_eq!(state.tuning, tuning);
        assert_eq!(state.scroll_speed, 90.0);
    }

    #[test]
    fn test_restart_sequence_is_reproducible() {
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        a.restart();
        b.restart();
        assert_eq!(a.seed, b.seed);
        let lanes = |s: &GameState| {
            s.platforms
                .platforms()
                .iter()
                .map(|p| p.lane)
                .collect::<Vec<_>>()
        };
        assert_eq!(lanes(&a), lanes(&b));
    }

    #[test]
    fn test_reason_text() {
        assert_eq!(GameOverReason::FellIntoVoid.to_string(), "fell into the void");
        assert_eq!(GameOverReason::CrushedByCeiling.to_string(), "crushed by the ceiling");
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(3);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 3);
        assert_eq!(back.platforms.len(), state.platforms.len());
    }
}
