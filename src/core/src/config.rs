use crate::PlaybookResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How often the physics world advances during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// One physics step after every actor update (N steps per frame).
    #[default]
    PerActor,
    /// One physics step after the whole actor pass.
    PerFrame,
}

/// Gameplay constants. Raw speeds are in ft/s and accelerations in ft/s², they are
/// divided by `distance_scale` before reaching the physics world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub distance_scale: f32,

    pub field_length: f32,
    pub field_width: f32,
    pub field_tick_width: f32,
    pub major_line_spacing: f32,
    pub minor_line_spacing: f32,

    pub player_max_speed: f32,
    pub player_acceleration: f32,
    pub player_deceleration: f32,
    pub player_radius: f32,
    pub player_deadzone: f32,

    pub football_width: f32,
    pub football_height: f32,
    pub football_speed: f32,
    pub gravity: f32,
    pub velocity_scale: f32,

    pub pointer_radius: f32,

    pub frame_ms: f64,
    pub step_mode: StepMode,
    pub track_world_history: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            distance_scale: 5.5555,

            field_length: 120.0 * 3.0,
            field_width: 53.5 * 3.0,
            field_tick_width: 2.0,
            major_line_spacing: 10.0 * 3.0,
            minor_line_spacing: 3.0,

            player_max_speed: 17.6,
            player_acceleration: 4.1,
            player_deceleration: 4.1,
            player_radius: 2.0,
            player_deadzone: 0.1,

            football_width: 0.9375,
            football_height: 1.25,
            football_speed: 44.0,
            gravity: 32.174,
            velocity_scale: 1.0,

            pointer_radius: 0.25,

            frame_ms: 1000.0 / 60.0,
            step_mode: StepMode::PerActor,
            track_world_history: false,
        }
    }
}

impl Tuning {
    pub fn from_json_str(json: &str) -> PlaybookResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PlaybookResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.player_max_speed / self.distance_scale
    }

    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.player_acceleration / self.distance_scale
    }

    #[inline]
    pub fn deceleration(&self) -> f32 {
        self.player_deceleration / self.distance_scale
    }

    #[inline]
    pub fn throw_speed(&self) -> f32 {
        self.football_speed / self.distance_scale
    }

    #[inline]
    pub fn scaled_gravity(&self) -> f32 {
        self.gravity / self.distance_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "football_speed": 60.0, "step_mode": "per_frame" }"#)
            .unwrap();

        assert_eq!(tuning.football_speed, 60.0);
        assert_eq!(tuning.step_mode, StepMode::PerFrame);
        assert_eq!(tuning.player_radius, Tuning::default().player_radius);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(Tuning::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_scaled_values() {
        let tuning = Tuning {
            distance_scale: 2.0,
            player_max_speed: 10.0,
            gravity: 30.0,
            ..Tuning::default()
        };

        assert_eq!(tuning.max_speed(), 5.0);
        assert_eq!(tuning.scaled_gravity(), 15.0);
    }
}
