//! Data-driven game balance
//!
//! Every balance constant the simulation reads at runtime. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Millis;
use crate::consts::*;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_width: f32,
    pub speed_initial: f32,
    pub speed_max: f32,
    pub speed_increment: f32,
    pub speed_checkpoint: f32,
    pub jump_force: f32,
    pub jump_force_boosted: f32,
    pub gravity: f32,
    pub fast_drop_gravity: f32,
    pub lateral_response: f32,
    pub powerup_duration_ms: Millis,
    pub slide_duration_ms: Millis,
    pub chase_clear_ms: Millis,
    pub coin_value: u64,
    pub magnet_range: f32,
    pub magnet_capture_radius: f32,
    pub magnet_pull_rate: f32,
    pub chase_distance: f32,
    pub follow_base_distance: f32,
    pub follow_distance_per_speed: f32,
    pub follow_visibility_cutoff: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            speed_initial: PLAYER_SPEED_INITIAL,
            speed_max: PLAYER_SPEED_MAX,
            speed_increment: SPEED_INCREMENT,
            speed_checkpoint: SPEED_CHECKPOINT,
            jump_force: JUMP_FORCE,
            jump_force_boosted: JUMP_FORCE_BOOSTED,
            gravity: GRAVITY,
            fast_drop_gravity: FAST_DROP_GRAVITY,
            lateral_response: LATERAL_RESPONSE,
            powerup_duration_ms: POWERUP_DURATION_MS,
            slide_duration_ms: SLIDE_DURATION_MS,
            chase_clear_ms: CHASE_CLEAR_MS,
            coin_value: COIN_VALUE,
            magnet_range: MAGNET_RANGE,
            magnet_capture_radius: MAGNET_CAPTURE_RADIUS,
            magnet_pull_rate: MAGNET_PULL_RATE,
            chase_distance: CHASE_DISTANCE,
            follow_base_distance: FOLLOW_BASE_DISTANCE,
            follow_distance_per_speed: FOLLOW_DISTANCE_PER_SPEED,
            follow_visibility_cutoff: FOLLOW_VISIBILITY_CUTOFF,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.speed_initial <= 0.0 || self.speed_max < self.speed_initial {
            return Err(TuningError::Invalid(format!(
                "speed bounds [{}, {}]",
                self.speed_initial, self.speed_max
            )));
        }
        if self.speed_increment < 0.0 || self.speed_checkpoint <= 0.0 {
            return Err(TuningError::Invalid("speed progression".into()));
        }
        if self.gravity >= 0.0 || self.fast_drop_gravity >= 0.0 {
            return Err(TuningError::Invalid("gravity must pull down".into()));
        }
        if self.jump_force <= 0.0 || self.jump_force_boosted <= 0.0 {
            return Err(TuningError::Invalid("jump forces must be positive".into()));
        }
        if self.lane_width <= 0.0 || self.lateral_response <= 0.0 {
            return Err(TuningError::Invalid("lane steering".into()));
        }
        if self.magnet_capture_radius <= 0.0
            || self.magnet_range < self.magnet_capture_radius
            || self.magnet_pull_rate < 0.0
        {
            return Err(TuningError::Invalid(format!(
                "magnet capture {} outside range {}",
                self.magnet_capture_radius, self.magnet_range
            )));
        }
        if self.powerup_duration_ms <= 0.0
            || self.slide_duration_ms <= 0.0
            || self.chase_clear_ms <= 0.0
        {
            return Err(TuningError::Invalid("durations must be positive".into()));
        }
        Ok(())
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
        let tuning = Tuning::from_json(r#"{ "speed_max": 50.0, "coin_value": 25 }"#).unwrap();
        assert_eq!(tuning.speed_max, 50.0);
        assert_eq!(tuning.coin_value, 25);
        assert_eq!(tuning.speed_initial, PLAYER_SPEED_INITIAL);
    }

    #[test]
    fn test_rejects_inverted_speeds() {
        let err = Tuning::from_json(r#"{ "speed_initial": 40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unstable_physics() {
        for json in [
            r#"{ "lateral_response": -12.0 }"#,
            r#"{ "lateral_response": 0.0 }"#,
            r#"{ "jump_force": 0.0 }"#,
            r#"{ "jump_force_boosted": -18.0 }"#,
        ] {
            assert!(matches!(Tuning::from_json(json), Err(TuningError::Invalid(_))), "{json}");
        }
    }

    #[test]
    fn test_rejects_capture_radius_beyond_range() {
        let err = Tuning::from_json(r#"{ "magnet_range": 2.0, "magnet_capture_radius": 3.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
        assert!(Tuning::from_json(r#"{ "magnet_range": 3.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }
}
