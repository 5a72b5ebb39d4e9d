//! Matrix helpers shared by the transform engine and the placement code

use glam::{Mat4, Vec3, Vec4};

/// Static camera view: a look-at from `(0, 0, camera_z)` toward the origin, +Y up
pub fn camera_look_at(camera_z: f32) -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, camera_z), Vec3::ZERO, Vec3::Y)
}

/// Rotate `model` about `axis` in its own object space.
///
/// The rotation is composed on the right (`model * R`), so it is applied before
/// the existing transform and the translation column stays where it was.
pub fn rotate_local(model: Mat4, degrees: f32, axis: Vec3) -> Mat4 {
    model * Mat4::from_axis_angle(axis.normalize(), degrees.to_radians())
}

/// Translation column of a model matrix, as a homogeneous point
pub fn translation_of(model: &Mat4) -> Vec4 {
    model.w_axis
}

/// Where the object-local origin lands after `matrix`
pub fn object_origin(matrix: &Mat4) -> Vec4 {
    *matrix * Vec4::W
}
