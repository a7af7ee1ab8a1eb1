//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Loaded from a JSON file on native builds; the web build uses defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the tuning file (native only)
pub const TUNING_PATH_ENV: &str = "LANE_LEAP_TUNING";
/// Tuning file used when the environment variable is unset
pub const DEFAULT_TUNING_PATH: &str = "tuning.json";
/// Upper bound for `platforms_above`
pub const MAX_PLATFORMS_ABOVE: usize = 64;

/// Errors from parsing or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lane_x must be strictly increasing, got {0:?}")]
    LanesNotIncreasing([f32; 3]),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("platform_gap ({gap}) must be below jump_distance_limit ({limit})")]
    GapOutOfReach { gap: f32, limit: f32 },
    #[error("platforms_above must be in 1..={max}, got {value}")]
    PlatformCount { value: usize, max: usize },
    #[error("lane_match_tolerance ({tolerance}) must be below half the lane spacing ({limit})")]
    ToleranceTooWide { tolerance: f32, limit: f32 },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal centre of each lane
    pub lane_x: [f32; 3],
    pub screen_width: f32,
    pub screen_height: f32,
    /// How far past a screen edge a wrap jump exits/enters
    pub wrap_margin: f32,

    // === Difficulty ===
    /// Scroll speed at score 0 (units/s)
    pub base_scroll_speed: f32,
    /// Fractional speed increase per point
    pub difficulty_coefficient: f32,

    // === Platforms ===
    /// Vertical distance between consecutive platforms
    pub platform_gap: f32,
    /// Platforms generated above the starting one
    pub platforms_above: usize,
    /// Platforms this far below the screen bottom get recycled
    pub recycle_margin: f32,
    /// Horizontal slack when matching a platform to a lane
    pub lane_match_tolerance: f32,

    // === Player ===
    pub player_start_y: f32,
    /// Maximum vertical distance a jump can cover
    pub jump_distance_limit: f32,
    /// Player below `screen_height + fall_margin` has fallen
    pub fall_margin: f32,
    /// Player above this y has been crushed
    pub ceiling_y: f32,

    /// Delay before the restart control responds (seconds)
    pub restart_grace_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_x: [200.0, 400.0, 600.0],
            screen_width: 800.0,
            screen_height: 600.0,
            wrap_margin: 50.0,

            base_scroll_speed: 180.0,
            difficulty_coefficient: 0.005,

            platform_gap: 120.0,
            platforms_above: 7,
            recycle_margin: 100.0,
            lane_match_tolerance: 10.0,

            player_start_y: 400.0,
            jump_distance_limit: 150.0,
            fall_margin: 50.0,
            ceiling_y: -20.0,

            restart_grace_secs: 0.5,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let [a, b, c] = self.lane_x;
        if !(a < b && b < c) {
            return Err(TuningError::LanesNotIncreasing(self.lane_x));
        }

        for (field, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("base_scroll_speed", self.base_scroll_speed),
            ("platform_gap", self.platform_gap),
            ("jump_distance_limit", self.jump_distance_limit),
            ("lane_match_tolerance", self.lane_match_tolerance),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("difficulty_coefficient", self.difficulty_coefficient),
            ("wrap_margin", self.wrap_margin),
            ("restart_grace_secs", self.restart_grace_secs),
        ] {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        // Wider than this and a lane would match its neighbour's platforms
        let limit = (b - a).min(c - b) / 2.0;
        if self.lane_match_tolerance >= limit {
            return Err(TuningError::ToleranceTooWide {
                tolerance: self.lane_match_tolerance,
                limit,
            });
        }

        if !(1..=MAX_PLATFORMS_ABOVE).contains(&self.platforms_above) {
            return Err(TuningError::PlatformCount {
                value: self.platforms_above,
                max: MAX_PLATFORMS_ABOVE,
            });
        }

        if self.platform_gap >= self.jump_distance_limit {
            return Err(TuningError::GapOutOfReach {
                gap: self.platform_gap,
                limit: self.jump_distance_limit,
            });
        }

        Ok(())
    }

    /// Size of the platform pool: the start platform plus those above it.
    /// Never more than `MAX_PLATFORMS_ABOVE + 1`, validated or not.
    #[inline]
    pub fn platform_count(&self) -> usize {
        self.platforms_above.min(MAX_PLATFORMS_ABOVE) + 1
    }

    /// y beyond which the player has fallen into the void
    #[inline]
    pub fn fall_line(&self) -> f32 {
        self.screen_height + self.fall_margin
    }

    /// y beyond which a platform is recycled
    #[inline]
    pub fn recycle_line(&self) -> f32 {
        self.screen_height + self.recycle_margin
    }

    /// Off-screen x a wrap jump leaves through on the left
    #[inline]
    pub fn left_edge(&self) -> f32 {
        -self.wrap_margin
    }

    /// Off-screen x a wrap jump leaves through on the right
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.screen_width + self.wrap_margin
    }

    /// Load tuning from the file named by `LANE_LEAP_TUNING` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(TUNING_PATH_ENV).unwrap_or_else(|_| DEFAULT_TUNING_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    /// Load tuning from `path`. Falls back to defaults if the file is missing
    /// or invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("No tuning file at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_scroll_speed": 240.0 }"#).unwrap();
        assert_eq!(tuning.base_scroll_speed, 240.0);
        assert_eq!(tuning.lane_x, [200.0, 400.0, 600.0]);
        assert_eq!(tuning.platforms_above, 7);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_unordered_lanes() {
        let err = Tuning::from_json(r#"{ "lane_x": [400.0, 200.0, 600.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::LanesNotIncreasing(_)));
    }

    #[test]
    fn test_rejects_unreachable_gap() {
        let err = Tuning::from_json(r#"{ "platform_gap": 200.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GapOutOfReach { .. }));
    }

    #[test]
    fn test_rejects_negative_grace() {
        let err = Tuning::from_json(r#"{ "restart_grace_secs": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative {
                field: "restart_grace_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_platform_count_out_of_range() {
        let json = r#"{ "platforms_above": 18446744073709551615 }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            TuningError::PlatformCount {
                value: usize::MAX,
                ..
            }
        ));
        let err = Tuning::from_json(r#"{ "platforms_above": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::PlatformCount { value: 0, .. }));
        assert!(Tuning::from_json(r#"{ "platforms_above": 64 }"#).is_ok());
    }

    #[test]
    fn test_platform_count_is_bounded() {
        let tuning = Tuning {
            platforms_above: usize::MAX,
            ..Default::default()
        };
        assert_eq!(tuning.platform_count(), MAX_PLATFORMS_ABOVE + 1);
        assert_eq!(Tuning::default().platform_count(), 8);
    }

    #[test]
    fn test_rejects_tolerance_spanning_lanes() {
        let err = Tuning::from_json(r#"{ "lane_match_tolerance": 250.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ToleranceTooWide { limit, .. } if limit == 100.0));
        let err = Tuning::from_json(r#"{ "lane_match_tolerance": 100.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ToleranceTooWide { .. }));
        assert!(Tuning::from_json(r#"{ "lane_match_tolerance": 99.0 }"#).is_ok());

        // Narrowest spacing decides
        let json = r#"{ "lane_x": [200.0, 260.0, 600.0], "lane_match_tolerance": 40.0 }"#;
        assert!(matches!(
            Tuning::from_json(json).unwrap_err(),
            TuningError::ToleranceTooWide { .. }
        ));
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lane-leap-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tuning = Tuning::load_from(&temp_path("does-not-exist.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let path = temp_path("invalid.json");
        std::fs::write(&path, r#"{ "platform_gap": 500.0 }"#).unwrap();
        let tuning = Tuning::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning, Tuning::default());

        let path = temp_path("garbage.json");
        std::fs::write(&path, "{ not json").unwrap();
        let tuning = Tuning::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_load_valid_file() {
        let path = temp_path("valid.json");
        std::fs::write(&path, r#"{ "base_scroll_speed": 200.0 }"#).unwrap();
        let tuning = Tuning::load_from(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(tuning.base_scroll_speed, 200.0);
        assert_eq!(tuning.platform_gap, 120.0);
    }

    #[test]
    fn test_derived_lines() {
        let tuning = Tuning::default();
        assert_eq!(tuning.fall_line(), 650.0);
        assert_eq!(tuning.recycle_line(), 700.0);
        assert_eq!(tuning.left_edge(), -50.0);
        assert_eq!(tuning.right_edge(), 850.0);
    }
}
