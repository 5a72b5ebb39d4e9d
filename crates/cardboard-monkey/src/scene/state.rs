//! Session state shared by the transform engine and the gaze controller

use glam::{Mat4, Vec3};

use crate::config::SceneConfig;

/// Everything that changes over a session.
///
/// Exactly one cube placement exists at any time. Relocation replaces
/// `cube_model` wholesale; the per-frame spin composes onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Number of successful finds
    pub score: u32,
    /// Radial distance of the cube from the origin
    pub object_distance: f32,
    pub cube_model: Mat4,
    /// Fixed after construction
    pub floor_model: Mat4,
}

impl SessionState {
    /// Cube directly in front of the user, floor below
    pub fn new(config: &SceneConfig) -> Self {
        let object_distance = config.placement.initial_distance;
        Self {
            score: 0,
            object_distance,
            cube_model: Mat4::from_translation(Vec3::new(0.0, 0.0, -object_distance)),
            floor_model: Mat4::from_translation(Vec3::new(0.0, -config.scene.floor_depth, 0.0)),
        }
    }

    /// World position of the cube centre
    pub fn cube_position(&self) -> Vec3 {
        self.cube_model.w_axis.truncate()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
