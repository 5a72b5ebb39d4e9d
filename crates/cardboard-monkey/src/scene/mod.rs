//! Scene state, the per-frame transform engine, and target relocation

mod engine;
mod placement;
mod state;

pub use engine::{ComposedMatrices, EyeFrame, TransformEngine};
pub use placement::{relocate, Placement, RandomSource, RngSource, SequenceSource};
pub use state::SessionState;
