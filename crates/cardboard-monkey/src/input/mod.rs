//! Input side of the demo
//!
//! - Gaze cone hit test, polled once per frame
//! - Trigger outcomes, produced when the user pulls the magnet

mod gaze;
mod trigger;

pub use gaze::{is_looking_at_target, GazeAngles, GazeCone, LookState};
pub use trigger::TriggerResult;
