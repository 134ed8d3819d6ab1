//! Game balance constants
//!
//! Fixed at construction. Loaded from JSON (any missing field falls back to
//! its default) and validated before a session is built, so a bad file fails
//! at setup instead of mid-run.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geometry::Rect;
use crate::sim::physics::jump_reach;

/// Reasons a tuning set is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("camera_smoothing must be in (0, 1] (got {0})")]
    Smoothing(f32),

    #[error("obstacle width {obstacle} does not fit on the narrowest platform ({platform})")]
    ObstacleTooWide { obstacle: f32, platform: f32 },

    #[error("worst-case gap of {gap}px exceeds jump reach of {reach}px when climbing {rise}px")]
    UnreachableGap { gap: f32, reach: f32, rise: f32 },

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunable constants. Velocities and accelerations are per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tick_rate: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_bottom: f32,

    pub player_size: Vec2,
    pub player_start: Vec2,

    pub gravity: f32,
    pub jump_impulse: f32,
    pub max_speed: f32,

    pub start_platform: Rect,

    // === Platform generation ===
    pub base_spacing: f32,
    pub extra_spacing: f32,
    pub max_height_delta: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    pub platform_y_min: f32,
    pub platform_y_max: f32,
    pub platform_spawn_interval: u32,
    pub spawn_lookahead: f32,

    // === Obstacle generation ===
    pub obstacle_spawn_interval: u32,
    pub obstacle_min_camera_x: f32,
    pub obstacle_size: Vec2,

    pub landing_tolerance: f32,

    // === Starvation fallback ===
    pub starvation_y: f32,
    pub emergency_platform_width: f32,

    // === Camera ===
    pub lead_offset: f32,
    pub camera_smoothing: f32,
    pub scroll_bias: f32,
    pub camera_margin: f32,
    pub prune_margin: f32,
    pub speed_ramp: f32,

    // === Scoring ===
    pub obstacle_reward: u64,
    pub distance_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE_HZ,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            world_bottom: WORLD_BOTTOM,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_speed: MAX_SPEED,

            start_platform: Rect::new(
                START_PLATFORM_X,
                START_PLATFORM_Y,
                START_PLATFORM_WIDTH,
                PLATFORM_HEIGHT,
            ),

            base_spacing: BASE_SPACING,
            extra_spacing: EXTRA_SPACING,
            max_height_delta: MAX_HEIGHT_DELTA,
            platform_min_width: PLATFORM_MIN_WIDTH,
            platform_max_width: PLATFORM_MAX_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_y_min: PLATFORM_Y_MIN,
            platform_y_max: PLATFORM_Y_MAX,
            platform_spawn_interval: PLATFORM_SPAWN_INTERVAL,
            spawn_lookahead: SPAWN_LOOKAHEAD,

            obstacle_spawn_interval: OBSTACLE_SPAWN_INTERVAL,
            obstacle_min_camera_x: OBSTACLE_MIN_CAMERA_X,
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),

            landing_tolerance: LANDING_TOLERANCE,

            starvation_y: STARVATION_Y,
            emergency_platform_width: EMERGENCY_PLATFORM_WIDTH,

            lead_offset: CAMERA_LEAD_OFFSET,
            camera_smoothing: CAMERA_SMOOTHING,
            scroll_bias: SCROLL_BIAS,
            camera_margin: CAMERA_MARGIN,
            prune_margin: PRUNE_MARGIN,
            speed_ramp: SPEED_RAMP,

            obstacle_reward: OBSTACLE_REWARD,
            distance_scale: DISTANCE_SCALE,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Largest left-edge to left-edge distance between consecutive platforms
    pub fn max_gap(&self) -> f32 {
        self.base_spacing + self.extra_spacing
    }

    /// Narrowest platform the chain can be extended from: a generated one,
    /// the start platform, or an emergency platform
    pub fn narrowest_anchor(&self) -> f32 {
        self.platform_min_width
            .min(self.start_platform.width)
            .min(self.emergency_platform_width)
    }

    /// Widest empty span the player may have to jump across
    pub fn worst_edge_gap(&self) -> f32 {
        self.max_gap() - self.narrowest_anchor()
    }

    /// Seconds between ticks
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("tick_rate", self.tick_rate),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("max_speed", self.max_speed),
            ("start_platform.width", self.start_platform.width),
            ("start_platform.height", self.start_platform.height),
            ("base_spacing", self.base_spacing),
            ("platform_min_width", self.platform_min_width),
            ("platform_height", self.platform_height),
            ("platform_spawn_interval", self.platform_spawn_interval as f32),
            ("obstacle_spawn_interval", self.obstacle_spawn_interval as f32),
            ("obstacle_size.x", self.obstacle_size.x),
            ("obstacle_size.y", self.obstacle_size.y),
            ("landing_tolerance", self.landing_tolerance),
            ("emergency_platform_width", self.emergency_platform_width),
            ("distance_scale", self.distance_scale),
        ];
        for (field, value) in positive {
            // Written as a negation so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("extra_spacing", self.extra_spacing),
            ("max_height_delta", self.max_height_delta),
            ("spawn_lookahead", self.spawn_lookahead),
            ("scroll_bias", self.scroll_bias),
            ("camera_margin", self.camera_margin),
            ("prune_margin", self.prune_margin),
            ("speed_ramp", self.speed_ramp),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        let ranges = [
            ("platform width", self.platform_min_width, self.platform_max_width),
            ("platform y", self.platform_y_min, self.platform_y_max),
        ];
        for (field, min, max) in ranges {
            if !(min <= max) {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }

        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(TuningError::Smoothing(self.camera_smoothing));
        }

        if self.obstacle_size.x > self.platform_min_width {
            return Err(TuningError::ObstacleTooWide {
                obstacle: self.obstacle_size.x,
                platform: self.platform_min_width,
            });
        }

        // Climbing is the hardest case, so check reach at the full height delta
        let rise = self.max_height_delta;
        let reach = jump_reach(self, rise);
        let gap = self.worst_edge_gap();
        if gap > reach {
            return Err(TuningError::UnreachableGap { gap, reach, rise });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.max_gap(), 300.0);
        assert_eq!(tuning.start_platform, Rect::new(0.0, 380.0, 300.0, 20.0));
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.6, "max_speed": 7.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.max_speed, 7.0);
        assert_eq!(tuning.jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        let tuning = Tuning {
            base_spacing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { field: "base_spacing", .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_inverted_width_range_rejected() {
        let tuning = Tuning {
            platform_min_width: 150.0,
            platform_max_width: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_unreachable_gap_rejected() {
        let tuning = Tuning {
            extra_spacing: 400.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnreachableGap { .. })
        ));
    }

    #[test]
    fn test_narrow_start_platform_rejected() {
        let tuning = Tuning {
            start_platform: Rect::new(0.0, 380.0, 40.0, 20.0),
            ..Default::default()
        };
        assert_eq!(tuning.worst_edge_gap(), 260.0);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnreachableGap { gap, .. }) if gap == 260.0
        ));
    }

    #[test]
    fn test_narrow_emergency_platform_rejected() {
        let tuning = Tuning {
            emergency_platform_width: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnreachableGap { .. })
        ));
    }

    #[test]
    fn test_climb_higher_than_jump_rejected() {
        // Apex of a 12px/tick jump under 0.5 gravity is ~144px
        let tuning = Tuning {
            max_height_delta: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnreachableGap { reach, .. }) if reach == 0.0
        ));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity: "),
            Err(TuningError::Parse(_))
        ));
    }
}
