//! Scheduled position interpolation
//!
//! A tween is a chain of stages, each moving toward a target over a duration
//! with an easing curve. Time is supplied by the simulation tick, so a tween
//! finishes after a fixed amount of simulated time regardless of frame rate.
//! Zero-length stages are instantaneous teleports.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
    SineOut,
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
        }
    }
}

/// One leg of a tween
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenStage {
    pub to: Vec2,
    /// Seconds (0 = teleport)
    pub duration: f32,
    pub ease: Ease,
}

impl TweenStage {
    pub fn new(to: Vec2, duration: f32, ease: Ease) -> Self {
        Self { to, duration, ease }
    }

    /// Instantaneous jump to `to`
    pub fn teleport(to: Vec2) -> Self {
        Self::new(to, 0.0, Ease::Linear)
    }
}

/// A running chain of stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    stages: Vec<TweenStage>,
    /// Index of the stage in progress (== len when finished)
    current: usize,
    /// Start point of the current stage
    from: Vec2,
    /// Time spent in the current stage
    elapsed: f32,
    /// Last position produced
    pos: Vec2,
}

impl Tween {
    pub fn new(start: Vec2, stages: Vec<TweenStage>) -> Self {
        Self {
            stages,
            current: 0,
            from: start,
            elapsed: 0.0,
            pos: start,
        }
    }

    /// Out-and-back tween: `out` then return to `start` with the same timing
    pub fn yoyo(start: Vec2, out: TweenStage) -> Self {
        let back = TweenStage::new(start, out.duration, out.ease);
        Self::new(start, vec![out, back])
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.stages.len()
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Total duration of all stages
    #[cfg(test)]
    pub(crate) fn duration(&self) -> f32 {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Advance by `dt` seconds and return the new position. Leftover time
    /// after a stage ends carries into the next one.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let mut remaining = dt.max(0.0);

        while let Some(stage) = self.stages.get(self.current).copied() {
            let left_in_stage = stage.duration - self.elapsed;
            if remaining < left_in_stage {
                self.elapsed += remaining;
                let t = stage.ease.apply(self.elapsed / stage.duration);
                self.pos = self.from.lerp(stage.to, t);
                return self.pos;
            }

            remaining -= left_in_stage.max(0.0);
            self.pos = stage.to;
            self.from = stage.to;
            self.elapsed = 0.0;
            self.current += 1;
        }

        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::QuadIn, Ease::QuadOut, Ease::SineOut] {
            assert!(ease.apply(0.0).abs() < EPS, "{:?}", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{:?}", ease);
        }
        // Ease-in lags, ease-out leads
        assert!(Ease::QuadIn.apply(0.5) < 0.5);
        assert!(Ease::QuadOut.apply(0.5) > 0.5);
        assert!(Ease::SineOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_single_stage() {
        let mut tween = Tween::new(
            Vec2::ZERO,
            vec![TweenStage::new(Vec2::new(100.0, -50.0), 1.0, Ease::Linear)],
        );
        let pos = tween.advance(0.5);
        assert!((pos - Vec2::new(50.0, -25.0)).length() < EPS);
        assert!(!tween.is_finished());

        let pos = tween.advance(0.6);
        assert_eq!(pos, Vec2::new(100.0, -50.0));
        assert!(tween.is_finished());
    }

    #[test]
    fn test_teleport_stage_is_instant() {
        let mut tween = Tween::new(
            Vec2::ZERO,
            vec![
                TweenStage::new(Vec2::new(850.0, 300.0), 0.1, Ease::QuadIn),
                TweenStage::teleport(Vec2::new(-50.0, 300.0)),
                TweenStage::new(Vec2::new(200.0, 280.0), 0.1, Ease::QuadOut),
            ],
        );
        // Exactly the end of the first stage also consumes the teleport
        let pos = tween.advance(0.1);
        assert_eq!(pos, Vec2::new(-50.0, 300.0));
        assert!(!tween.is_finished());

        tween.advance(0.1);
        assert!(tween.is_finished());
        assert_eq!(tween.position(), Vec2::new(200.0, 280.0));
    }

    #[test]
    fn test_leftover_time_carries_over() {
        let mut tween = Tween::new(
            Vec2::ZERO,
            vec![
                TweenStage::new(Vec2::new(10.0, 0.0), 1.0, Ease::Linear),
                TweenStage::new(Vec2::new(10.0, 10.0), 1.0, Ease::Linear),
            ],
        );
        let pos = tween.advance(1.5);
        assert!((pos - Vec2::new(10.0, 5.0)).length() < EPS);
    }

    #[test]
    fn test_yoyo_returns_to_start() {
        let start = Vec2::new(600.0, 400.0);
        let mut tween = Tween::yoyo(
            start,
            TweenStage::new(Vec2::new(850.0, 350.0), 0.2, Ease::Linear),
        );
        assert!((tween.duration() - 0.4).abs() < EPS);

        let peak = tween.advance(0.2);
        assert_eq!(peak, Vec2::new(850.0, 350.0));
        tween.advance(0.2);
        assert!(tween.is_finished());
        assert_eq!(tween.position(), start);
    }

    #[test]
    fn test_empty_tween_is_finished() {
        let mut tween = Tween::new(Vec2::ONE, Vec::new());
        assert!(tween.is_finished());
        assert_eq!(tween.advance(1.0), Vec2::ONE);
    }
}
