//! cardboard-monkey: core of a stereoscopic find-the-target demo
//!
//! A floor and a spinning cube are rendered once per eye with head-tracked
//! perspective. The user finds the cube by looking straight at it and pulling
//! the trigger, which scores a point and moves the cube somewhere else.
//!
//! This crate provides:
//! - Per-frame transform pipeline (camera, head pose, per-eye composition)
//! - Gaze cone hit test
//! - Target relocation driven by an injectable random source
//! - Haptic and stereo overlay feedback hooks
//! - TOML scene configuration
//!
//! It issues no graphics calls; a render host draws with the returned matrices.

pub mod config;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod input;
pub mod scene;
pub mod spatial;

// Re-export commonly used types
pub use config::SceneConfig;
pub use controller::GazeController;
pub use error::ConfigError;
pub use feedback::{Haptics, NullHaptics, OverlayView};
pub use input::{is_looking_at_target, GazeCone, LookState, TriggerResult};
pub use scene::{
    relocate, ComposedMatrices, EyeFrame, RandomSource, RngSource, SessionState, TransformEngine,
};
pub use spatial::{Eye, EyeView, Pose};
