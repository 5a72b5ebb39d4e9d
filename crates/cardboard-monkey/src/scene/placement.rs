//! Target relocation
//!
//! A found target is moved to a new spot behind or beside the user: a random
//! azimuth in the XZ plane, a random distance, and a random vertical angle.

use glam::{Mat4, Vec3};
use tracing::info;

use super::SessionState;
use crate::config::PlacementConfig;

/// Source of uniform random floats in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: rand::Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

impl RngSource<rand::rngs::StdRng> {
    /// Deterministic source for replays
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Result of one relocation, mostly for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub azimuth_deg: f32,
    pub distance: f32,
    pub vertical_deg: f32,
    pub position: Vec3,
}

/// Move the cube to a new random placement.
///
/// Draws azimuth, distance and vertical angle in that order. The new cube
/// matrix is a pure translation: any accumulated spin is dropped.
pub fn relocate(
    state: &mut SessionState,
    rng: &mut dyn RandomSource,
    range: &PlacementConfig,
) -> Placement {
    let azimuth_deg = rng.next_unit() * range.azimuth_span_deg + range.min_azimuth_deg;
    let rotation = Mat4::from_axis_angle(Vec3::Y, azimuth_deg.to_radians());

    let span = range.max_distance - range.min_distance;
    let mut distance = rng.next_unit() * span + range.min_distance;
    if distance >= range.max_distance {
        // f32 rounding can land a draw just under 1.0 on the upper bound
        distance = just_below(range.max_distance);
    }
    let scale = distance / state.object_distance;
    let rotate_scale = rotation * Mat4::from_scale(Vec3::splat(scale));

    let swept = rotate_scale * state.cube_model.w_axis;

    let vertical_deg = rng.next_unit() * range.max_vertical_deg * 2.0 - range.max_vertical_deg;
    let new_y = vertical_deg.to_radians().tan() * distance;

    let position = Vec3::new(swept.x, new_y, swept.z);
    state.cube_model = Mat4::from_translation(position);
    state.object_distance = distance;

    info!(
        azimuth_deg,
        distance,
        vertical_deg,
        x = position.x,
        y = position.y,
        z = position.z,
        "target relocated"
    );

    Placement {
        azimuth_deg,
        distance,
        vertical_deg,
        position,
    }
}

/// Largest f32 strictly below a positive `value`
fn just_below(value: f32) -> f32 {
    f32::from_bits(value.to_bits() - 1)
}
