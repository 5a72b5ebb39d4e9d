//! Head pose and per-eye view inputs supplied by the tracking host

use glam::Mat4;

/// Head transform for one frame.
///
/// Holds the head view matrix, mapping world space into head space. The core
/// reads it and never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub head_view: Mat4,
}

impl Pose {
    pub fn new(head_view: Mat4) -> Self {
        Self { head_view }
    }

    /// Pose looking straight down -Z from the origin
    pub fn identity() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Which eye a view belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Sign of the eye's horizontal offset from the head centre
    pub fn side(&self) -> f32 {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }
}

/// Per-eye view and perspective projection for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeView {
    pub eye: Eye,
    /// World (camera) space to this eye's space
    pub view: Mat4,
    /// This eye's space to clip space
    pub projection: Mat4,
}

impl EyeView {
    pub fn new(eye: Eye, view: Mat4, projection: Mat4) -> Self {
        Self {
            eye,
            view,
            projection,
        }
    }

    /// Eye with identity view and projection
    pub fn identity(eye: Eye) -> Self {
        Self::new(eye, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}
