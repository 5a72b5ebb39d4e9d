//! Per-frame transform pipeline
//!
//! Once per frame the host calls [`TransformEngine::begin_frame`] with the
//! latest head pose, then composes matrices for each eye and each drawable.
//! The engine never issues graphics commands.

use glam::{Mat4, Vec3, Vec4};
use tracing::trace;

use super::SessionState;
use crate::config::SceneConfig;
use crate::spatial::{camera_look_at, rotate_local, Eye, EyeView, Pose};

/// Matrices for one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedMatrices {
    pub model: Mat4,
    pub model_view: Mat4,
    pub model_view_projection: Mat4,
}

/// Everything a renderer needs to draw the scene for one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeFrame {
    pub eye: Eye,
    pub cube: ComposedMatrices,
    pub floor: ComposedMatrices,
    /// Light position in this eye's space, for shading
    pub light_in_eye_space: Vec3,
}

/// Maintains the shared per-frame matrices
#[derive(Debug, Clone)]
pub struct TransformEngine {
    camera_z: f32,
    spin_degrees: f32,
    spin_axis: Vec3,
    light_in_world_space: Vec4,
    head_view: Mat4,
    camera: Mat4,
    light_in_camera_space: Vec3,
    frames: u64,
}

impl TransformEngine {
    pub fn new(config: &SceneConfig) -> Self {
        let camera = camera_look_at(config.camera.camera_z);
        let light = config.scene.light();
        Self {
            camera_z: config.camera.camera_z,
            spin_degrees: config.spin.degrees_per_frame,
            spin_axis: config.spin.axis(),
            light_in_world_space: light,
            head_view: Mat4::IDENTITY,
            camera,
            light_in_camera_space: (camera * light).truncate(),
            frames: 0,
        }
    }

    /// Start a frame: store the head pose, spin the cube, refresh the camera.
    ///
    /// The spin is a fixed step per call; frame time is not taken into account.
    pub fn begin_frame(&mut self, state: &mut SessionState, pose: &Pose) {
        self.head_view = pose.head_view;
        state.cube_model = rotate_local(state.cube_model, self.spin_degrees, self.spin_axis);

        self.camera = camera_look_at(self.camera_z);
        self.light_in_camera_space = (self.camera * self.light_in_world_space).truncate();
        self.frames += 1;

        trace!(frame = self.frames, "begin frame");
    }

    /// Compose `eye.projection * eye.view * camera * model`
    pub fn compose_for_eye(&self, eye: &EyeView, model: &Mat4) -> ComposedMatrices {
        let view = eye.view * self.camera;
        let model_view = view * *model;
        ComposedMatrices {
            model: *model,
            model_view,
            model_view_projection: eye.projection * model_view,
        }
    }

    pub fn light_in_eye_space(&self, eye: &EyeView) -> Vec3 {
        (eye.view * self.camera * self.light_in_world_space).truncate()
    }

    /// Cube and floor matrices plus the eye-space light for one eye
    pub fn draw_eye(&self, state: &SessionState, eye: &EyeView) -> EyeFrame {
        EyeFrame {
            eye: eye.eye,
            cube: self.compose_for_eye(eye, &state.cube_model),
            floor: self.compose_for_eye(eye, &state.floor_model),
            light_in_eye_space: self.light_in_eye_space(eye),
        }
    }

    /// Head view stored by the last `begin_frame`
    pub fn head_view(&self) -> Mat4 {
        self.head_view
    }

    pub fn camera(&self) -> Mat4 {
        self.camera
    }

    pub fn light_in_camera_space(&self) -> Vec3 {
        self.light_in_camera_space
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}
