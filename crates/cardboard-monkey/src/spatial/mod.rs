//! Spatial primitives for the stereo scene
//!
//! All matrices are `glam::Mat4`, column-major, with the rightmost factor of a
//! product applied first (object -> world -> eye -> clip). Uses a right-handed
//! coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Backward (+) / Forward (-)

mod pose;
mod transform;

pub use pose::{Eye, EyeView, Pose};
pub use transform::{camera_look_at, object_origin, rotate_local, translation_of};
