//! Headless autopilot
//!
//! Plays the game without a terminal: each round aims the simulated head at
//! the target, runs one full frame for both eyes, and pulls the trigger.

use std::time::Instant;

use tracing::{debug, info};

use cardboard_monkey::feedback::RecordingHaptics;
use cardboard_monkey::{GazeController, RandomSource, SceneConfig, TriggerResult};

use crate::simulator::HeadSimulator;

/// Summary of an autopilot run
#[derive(Debug, Clone, PartialEq)]
pub struct AutopilotReport {
    pub rounds: u32,
    pub found: u32,
    pub score: u32,
    pub pulses: usize,
    pub frames: u64,
    /// Eye frames in which the cube sat in front of the viewer
    pub eye_frames_ahead: u32,
}

pub fn run_autopilot<R: RandomSource>(config: SceneConfig, rng: R, rounds: u32) -> AutopilotReport {
    let mut controller = GazeController::new(config, rng, RecordingHaptics::new());
    let mut simulator = HeadSimulator::new();
    let mut found = 0;
    let mut eye_frames_ahead = 0;

    for round in 1..=rounds {
        simulator.aim_at(controller.state().cube_position());
        controller.begin_frame(&simulator.pose());

        for eye in simulator.eye_views(1.0) {
            let frame = controller.draw_eye(&eye);
            let depth = frame.cube.model_view.w_axis.z;
            if depth < 0.0 {
                eye_frames_ahead += 1;
            }
            debug!(round, eye = ?frame.eye, depth, "cube in eye space");
        }

        let angles = controller.gaze_angles();
        let result = controller.on_trigger_at(Instant::now());
        if let TriggerResult::Found { .. } = result {
            found += 1;
        }

        info!(
            round,
            pitch = angles.pitch,
            yaw = angles.yaw,
            found = result.is_found(),
            score = controller.score(),
            distance = controller.state().object_distance,
            "autopilot round"
        );
    }

    AutopilotReport {
        rounds,
        found,
        score: controller.score(),
        pulses: controller.haptics().pulses.len(),
        frames: controller.engine().frame_count(),
        eye_frames_ahead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardboard_monkey::RngSource;

    #[test]
    fn test_every_round_is_found() {
        let report = run_autopilot(SceneConfig::default(), RngSource::seeded(11), 25);

        assert_eq!(report.rounds, 25);
        assert_eq!(report.found, 25);
        assert_eq!(report.score, 25);
        assert_eq!(report.pulses, 25);
        assert_eq!(report.frames, 25);
        assert_eq!(report.eye_frames_ahead, 50);
    }

    #[test]
    fn test_same_seed_same_run() {
        let a = run_autopilot(SceneConfig::default(), RngSource::seeded(5), 10);
        let b = run_autopilot(SceneConfig::default(), RngSource::seeded(5), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_rounds() {
        let report = run_autopilot(SceneConfig::default(), RngSource::seeded(1), 0);
        assert_eq!(report.score, 0);
        assert_eq!(report.pulses, 0);
        assert_eq!(report.eye_frames_ahead, 0);
    }
}
