//! Scene configuration
//!
//! Every tunable constant of the demo lives here. All fields default to the
//! values the demo ships with, so an empty TOML document is a valid config.

use std::path::Path;
use std::time::Duration;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Camera placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Forward offset of the static look-at camera
    pub camera_z: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { camera_z: 0.01 }
    }
}

/// Per-frame spin of the target cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Fixed increment applied once per frame, not scaled by frame time
    pub degrees_per_frame: f32,
    pub axis: [f32; 3],
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            degrees_per_frame: 0.3,
            axis: [0.5, 0.5, 1.0],
        }
    }
}

impl SpinConfig {
    pub fn axis(&self) -> Vec3 {
        Vec3::from_array(self.axis)
    }
}

/// Gaze cone half-angles, in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub pitch_limit: f32,
    pub yaw_limit: f32,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            pitch_limit: 0.12,
            yaw_limit: 0.12,
        }
    }
}

/// Ranges used when the target is relocated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance of the first placement, directly ahead
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_azimuth_deg: f32,
    pub azimuth_span_deg: f32,
    /// Vertical angle is drawn from `[-max_vertical_deg, max_vertical_deg)`
    pub max_vertical_deg: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            initial_distance: 12.0,
            min_distance: 5.0,
            max_distance: 20.0,
            min_azimuth_deg: 90.0,
            azimuth_span_deg: 180.0,
            max_vertical_deg: 40.0,
        }
    }
}

/// Static scene layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// How far below the user the floor sits
    pub floor_depth: f32,
    /// World-space light, just above the user
    pub light_position: [f32; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            floor_depth: 20.0,
            light_position: [0.0, 2.0, 0.0],
        }
    }
}

impl LayoutConfig {
    pub fn light(&self) -> Vec4 {
        Vec3::from_array(self.light_position).extend(1.0)
    }
}

/// Haptic and overlay feedback timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub vibrate_ms: u64,
    pub toast_fade_ms: u64,
    /// Horizontal shift of the overlay per eye, as a fraction of the eye width
    pub depth_offset: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            vibrate_ms: 50,
            toast_fade_ms: 5000,
            depth_offset: 0.016,
        }
    }
}

impl FeedbackConfig {
    pub fn vibrate(&self) -> Duration {
        Duration::from_millis(self.vibrate_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub spin: SpinConfig,
    pub gaze: GazeConfig,
    pub placement: PlacementConfig,
    pub scene: LayoutConfig,
    pub feedback: FeedbackConfig,
}

impl SceneConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the transform and placement math cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.camera.camera_z > 0.0) {
            return Err(invalid("camera.camera_z must be positive"));
        }
        if self.spin.axis().length_squared() == 0.0 || !self.spin.axis().is_finite() {
            return Err(invalid("spin.axis must be a finite non-zero vector"));
        }
        if !(self.gaze.pitch_limit > 0.0 && self.gaze.yaw_limit > 0.0) {
            return Err(invalid("gaze limits must be positive"));
        }

        let p = &self.placement;
        if !(p.initial_distance > 0.0) {
            return Err(invalid("placement.initial_distance must be positive"));
        }
        if !(p.min_distance > 0.0 && p.max_distance > p.min_distance) {
            return Err(invalid(
                "placement distances must satisfy 0 < min_distance < max_distance",
            ));
        }
        if !(p.azimuth_span_deg > 0.0) || !p.min_azimuth_deg.is_finite() {
            return Err(invalid("placement azimuth range must be non-empty"));
        }
        if !(p.max_vertical_deg >= 0.0 && p.max_vertical_deg < 90.0) {
            return Err(invalid("placement.max_vertical_deg must be in [0, 90)"));
        }

        if !self.scene.floor_depth.is_finite() {
            return Err(invalid("scene.floor_depth must be finite"));
        }
        if !(self.feedback.depth_offset.abs() < 0.5) {
            return Err(invalid("feedback.depth_offset must be in (-0.5, 0.5)"));
        }
        if self.feedback.toast_fade_ms == 0 {
            return Err(invalid("feedback.toast_fade_ms must be non-zero"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.camera_z, 0.01);
        assert_eq!(config.spin.degrees_per_frame, 0.3);
        assert_eq!(config.spin.axis, [0.5, 0.5, 1.0]);
        assert_eq!(config.gaze.pitch_limit, 0.12);
        assert_eq!(config.gaze.yaw_limit, 0.12);
        assert_eq!(config.placement.initial_distance, 12.0);
        assert_eq!(config.placement.min_distance, 5.0);
        assert_eq!(config.placement.max_distance, 20.0);
        assert_eq!(config.scene.floor_depth, 20.0);
        assert_eq!(config.scene.light(), Vec4::new(0.0, 2.0, 0.0, 1.0));
        assert_eq!(config.feedback.vibrate(), Duration::from_millis(50));
        assert_eq!(config.feedback.toast_fade(), Duration::from_millis(5000));
        assert_eq!(config.feedback.depth_offset, 0.016);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SceneConfig::from_toml_str(
            r#"
            [gaze]
            yaw_limit = 0.2

            [placement]
            max_distance = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.gaze.yaw_limit, 0.2);
        assert_eq!(config.gaze.pitch_limit, 0.12);
        assert_eq!(config.placement.max_distance, 30.0);
        assert_eq!(config.placement.min_distance, 5.0);
    }

    #[test]
    fn test_rejects_empty_distance_range() {
        let err = SceneConfig::from_toml_str(
            r#"
            [placement]
            min_distance = 10.0
            max_distance = 10.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_axis() {
        let err = SceneConfig::from_toml_str("[spin]\naxis = [0.0, 0.0, 0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_depth_offset_override_and_range() {
        let config = SceneConfig::from_toml_str("[feedback]\ndepth_offset = 0.03\n").unwrap();
        assert_eq!(config.feedback.depth_offset, 0.03);
        assert_eq!(config.feedback.vibrate_ms, 50);

        let err = SceneConfig::from_toml_str("[feedback]\ndepth_offset = 0.7\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = SceneConfig::from_toml_str("[gaze\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scene]\nfloor_depth = 15.0").unwrap();

        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.scene.floor_depth, 15.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
