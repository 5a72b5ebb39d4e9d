//! Haptic feedback backend trait

use std::time::Duration;

/// Vibration output on the viewer
pub trait Haptics: Send + Sync {
    /// Vibrate for `duration`
    fn pulse(&mut self, duration: Duration);

    /// Check if a vibration motor is available
    fn is_available(&self) -> bool;
}

/// Null haptics backend (no-op)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn pulse(&mut self, _duration: Duration) {}

    fn is_available(&self) -> bool {
        false
    }
}

/// Keeps every pulse it receives; useful for headless hosts
#[derive(Debug, Default, Clone)]
pub struct RecordingHaptics {
    pub pulses: Vec<Duration>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Haptics for RecordingHaptics {
    fn pulse(&mut self, duration: Duration) {
        self.pulses.push(duration);
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_haptics() {
        let mut haptics = RecordingHaptics::new();
        haptics.pulse(Duration::from_millis(50));
        haptics.pulse(Duration::from_millis(50));
        assert_eq!(haptics.pulses.len(), 2);
        assert!(haptics.is_available());
        assert!(!NullHaptics.is_available());
    }
}
