//! Feedback collaborators: vibration and the stereo text overlay

mod haptics;
mod overlay;

pub use haptics::{Haptics, NullHaptics, RecordingHaptics};
pub use overlay::{OverlayLayout, OverlayView, Rect, WELCOME_MESSAGE};
