//! Gaze cone hit test
//!
//! The target counts as "looked at" when its centre, seen from the head, sits
//! inside a small pitch/yaw cone around the forward axis. The test is a pure
//! function of the head view and the cube matrix and is polled every frame.

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::config::GazeConfig;
use crate::spatial::object_origin;

/// Whether the target is currently being looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookState {
    NotFound,
    Found,
}

impl LookState {
    pub fn is_found(&self) -> bool {
        matches!(self, LookState::Found)
    }
}

impl From<bool> for LookState {
    fn from(found: bool) -> Self {
        if found {
            LookState::Found
        } else {
            LookState::NotFound
        }
    }
}

/// Target centre in head space and its angular offset from straight ahead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeAngles {
    pub position: Vec3,
    /// `atan2(y, -z)`, radians
    pub pitch: f32,
    /// `atan2(x, -z)`, radians
    pub yaw: f32,
}

impl GazeAngles {
    /// Angles of the object-local origin after `head_view * model`
    pub fn from_matrices(head_view: &Mat4, model: &Mat4) -> Self {
        let position = object_origin(&(*head_view * *model)).truncate();
        Self::from_position(position)
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            pitch: position.y.atan2(-position.z),
            yaw: position.x.atan2(-position.z),
        }
    }
}

/// Pitch/yaw half-angle limits of the gaze cone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeCone {
    pub pitch_limit: f32,
    pub yaw_limit: f32,
}

impl GazeCone {
    pub fn new(pitch_limit: f32, yaw_limit: f32) -> Self {
        Self {
            pitch_limit,
            yaw_limit,
        }
    }

    /// Strictly inside on both axes; the boundary itself is a miss
    pub fn contains(&self, pitch: f32, yaw: f32) -> bool {
        pitch.abs() < self.pitch_limit && yaw.abs() < self.yaw_limit
    }

    pub fn is_looking_at(&self, head_view: &Mat4, model: &Mat4) -> bool {
        let angles = GazeAngles::from_matrices(head_view, model);
        debug!(
            x = angles.position.x,
            y = angles.position.y,
            z = angles.position.z,
            pitch = angles.pitch,
            yaw = angles.yaw,
            "object in head space"
        );
        self.contains(angles.pitch, angles.yaw)
    }

    pub fn look_state(&self, head_view: &Mat4, model: &Mat4) -> LookState {
        self.is_looking_at(head_view, model).into()
    }
}

impl Default for GazeCone {
    fn default() -> Self {
        GazeConfig::default().into()
    }
}

impl From<GazeConfig> for GazeCone {
    fn from(config: GazeConfig) -> Self {
        Self::new(config.pitch_limit, config.yaw_limit)
    }
}

/// Hit test with the default 0.12 rad cone
pub fn is_looking_at_target(head_view: &Mat4, cube_model: &Mat4) -> bool {
    GazeCone::default().is_looking_at(head_view, cube_model)
}
