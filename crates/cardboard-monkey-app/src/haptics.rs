//! Terminal stand-in for the viewer's vibration motor

use std::time::{Duration, Instant};

use cardboard_monkey::Haptics;

/// Flashes the eye divider for the length of each pulse
#[derive(Debug, Default, Clone)]
pub struct FlashHaptics {
    until: Option<Instant>,
    pulses: u32,
}

impl FlashHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_buzzing(&self, now: Instant) -> bool {
        self.until.map(|until| now < until).unwrap_or(false)
    }

    pub fn pulse_count(&self) -> u32 {
        self.pulses
    }
}

impl Haptics for FlashHaptics {
    fn pulse(&mut self, duration: Duration) {
        self.until = Some(Instant::now() + duration);
        self.pulses += 1;
    }

    fn is_available(&self) -> bool {
        true
    }
}
