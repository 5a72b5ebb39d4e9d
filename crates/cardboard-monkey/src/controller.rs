//! Game controller
//!
//! Owns the session state together with the transform engine, random source
//! and feedback collaborators. The render host drives it from a single thread:
//! `begin_frame`, then `draw_eye` per eye, with `on_trigger` calls serialized
//! in between frames.

use std::time::Instant;

use glam::Mat4;
use tracing::info;

use crate::config::SceneConfig;
use crate::feedback::{Haptics, OverlayView, WELCOME_MESSAGE};
use crate::input::{GazeAngles, GazeCone, LookState, TriggerResult};
use crate::scene::{relocate, ComposedMatrices, EyeFrame, Placement, RandomSource, SessionState, TransformEngine};
use crate::spatial::{EyeView, Pose};

pub struct GazeController<R: RandomSource, H: Haptics> {
    config: SceneConfig,
    engine: TransformEngine,
    state: SessionState,
    cone: GazeCone,
    rng: R,
    haptics: H,
    overlay: OverlayView,
}

impl<R: RandomSource, H: Haptics> GazeController<R, H> {
    pub fn new(config: SceneConfig, rng: R, haptics: H) -> Self {
        Self::new_at(config, rng, haptics, Instant::now())
    }

    /// Like [`new`](Self::new) with an explicit clock for the welcome toast
    pub fn new_at(config: SceneConfig, rng: R, haptics: H, now: Instant) -> Self {
        let mut overlay = OverlayView::new(config.feedback.toast_fade());
        overlay.set_depth_offset(config.feedback.depth_offset);
        overlay.show_toast(WELCOME_MESSAGE, now);

        Self {
            engine: TransformEngine::new(&config),
            state: SessionState::new(&config),
            cone: config.gaze.into(),
            config,
            rng,
            haptics,
            overlay,
        }
    }

    pub fn begin_frame(&mut self, pose: &Pose) {
        self.engine.begin_frame(&mut self.state, pose);
    }

    pub fn compose_for_eye(&self, eye: &EyeView, model: &Mat4) -> ComposedMatrices {
        self.engine.compose_for_eye(eye, model)
    }

    pub fn draw_eye(&self, eye: &EyeView) -> EyeFrame {
        self.engine.draw_eye(&self.state, eye)
    }

    /// Gaze test against the head view of the current frame
    pub fn is_looking_at_target(&self) -> bool {
        self.cone
            .is_looking_at(&self.engine.head_view(), &self.state.cube_model)
    }

    pub fn look_state(&self) -> LookState {
        self.is_looking_at_target().into()
    }

    pub fn gaze_angles(&self) -> GazeAngles {
        GazeAngles::from_matrices(&self.engine.head_view(), &self.state.cube_model)
    }

    pub fn on_trigger(&mut self) -> TriggerResult {
        self.on_trigger_at(Instant::now())
    }

    /// Score and relocate when the target is in view. Vibrates either way when
    /// the viewer has a motor.
    pub fn on_trigger_at(&mut self, now: Instant) -> TriggerResult {
        let result = if self.is_looking_at_target() {
            self.state.score += 1;
            self.relocate();
            TriggerResult::Found {
                score: self.state.score,
            }
        } else {
            TriggerResult::Missed
        };

        info!(found = result.is_found(), score = self.state.score, "trigger");
        self.overlay.show_toast(result.message(), now);
        if self.haptics.is_available() {
            self.haptics.pulse(self.config.feedback.vibrate());
        }
        result
    }

    pub fn relocate(&mut self) -> Placement {
        relocate(&mut self.state, &mut self.rng, &self.config.placement)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    pub fn overlay(&self) -> &OverlayView {
        &self.overlay
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::RecordingHaptics;
    use crate::scene::{RngSource, SequenceSource};
    use glam::Vec3;
    use std::time::Duration;

    fn controller(draws: &[f32]) -> GazeController<SequenceSource, RecordingHaptics> {
        GazeController::new(
            SceneConfig::default(),
            SequenceSource::new(draws.to_vec()),
            RecordingHaptics::new(),
        )
    }

    /// Head turned to look away from the starting target
    fn look_away() -> Pose {
        Pose::new(Mat4::from_rotation_y(1.0))
    }

    #[test]
    fn test_initially_looking_at_target() {
        let mut game = controller(&[0.5]);
        game.begin_frame(&Pose::identity());
        assert!(game.is_looking_at_target());
        assert_eq!(game.look_state(), LookState::Found);
    }

    #[test]
    fn test_trigger_miss_changes_nothing() {
        let mut game = controller(&[0.5]);
        game.begin_frame(&look_away());
        let before = game.state().clone();

        let result = game.on_trigger();

        assert_eq!(result, TriggerResult::Missed);
        assert_eq!(game.state(), &before);
        assert_eq!(game.haptics().pulses, vec![Duration::from_millis(50)]);
        assert_eq!(game.overlay().text(), Some("Look around to find the object!"));
    }

    #[test]
    fn test_trigger_hit_scores_and_relocates() {
        let mut game = controller(&[0.5, 1.0 / 3.0, 0.5]);
        game.begin_frame(&Pose::identity());
        let before = game.state().cube_position();

        let result = game.on_trigger();

        assert_eq!(result, TriggerResult::Found { score: 1 });
        assert_eq!(game.score(), 1);
        assert_ne!(game.state().cube_position(), before);
        assert!(game
            .state()
            .cube_position()
            .abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-4));
        assert_eq!(game.haptics().pulses.len(), 1);
        assert_eq!(
            game.overlay().text(),
            Some("Found it! Look around for another one.\nScore = 1")
        );
    }

    #[test]
    fn test_target_behind_after_relocation() {
        let mut game = controller(&[0.5, 1.0 / 3.0, 0.5]);
        game.begin_frame(&Pose::identity());
        game.on_trigger();

        // Same head pose, target now behind: a second pull misses
        game.begin_frame(&Pose::identity());
        assert!(!game.is_looking_at_target());
        assert_eq!(game.on_trigger(), TriggerResult::Missed);
        assert_eq!(game.score(), 1);
        assert_eq!(game.haptics().pulses.len(), 2);
    }

    #[test]
    fn test_turning_around_finds_it_again() {
        let mut game = controller(&[0.5, 1.0 / 3.0, 0.5]);
        game.begin_frame(&Pose::identity());
        game.on_trigger();

        game.begin_frame(&Pose::new(Mat4::from_rotation_y(std::f32::consts::PI)));
        assert!(game.is_looking_at_target());
        assert_eq!(game.on_trigger(), TriggerResult::Found { score: 2 });
    }

    #[test]
    fn test_query_alone_never_scores() {
        let mut game = controller(&[0.5]);
        for _ in 0..100 {
            game.begin_frame(&Pose::identity());
            assert!(game.is_looking_at_target());
        }
        assert_eq!(game.score(), 0);
        assert!(game.haptics().pulses.is_empty());
    }

    #[test]
    fn test_welcome_toast() {
        let start = Instant::now();
        let game = GazeController::new_at(
            SceneConfig::default(),
            RngSource::seeded(1),
            RecordingHaptics::new(),
            start,
        );
        assert_eq!(game.overlay().visible_text(start), Some((WELCOME_MESSAGE, 1.0)));
    }

    #[test]
    fn test_draw_eye_uses_current_state() {
        let mut game = controller(&[0.5]);
        game.begin_frame(&Pose::identity());
        let frame = game.draw_eye(&EyeView::identity(crate::spatial::Eye::Left));
        assert_eq!(frame.cube.model, game.state().cube_model);
        assert_eq!(
            game.compose_for_eye(&EyeView::identity(crate::spatial::Eye::Left), &Mat4::IDENTITY)
                .model_view,
            game.engine().camera()
        );
    }

    /// Viewer without a vibration motor
    #[derive(Default)]
    struct NoMotor {
        pulses: usize,
    }

    impl Haptics for NoMotor {
        fn pulse(&mut self, _duration: Duration) {
            self.pulses += 1;
        }

        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_trigger_skips_missing_motor() {
        let mut game = GazeController::new(
            SceneConfig::default(),
            SequenceSource::new(vec![0.5]),
            NoMotor::default(),
        );
        game.begin_frame(&Pose::identity());

        assert!(game.on_trigger().is_found());
        assert_eq!(game.haptics().pulses, 0);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_overlay_offset_from_config() {
        let mut config = SceneConfig::default();
        config.feedback.depth_offset = 0.05;
        let game = GazeController::new(config, SequenceSource::new(vec![0.5]), RecordingHaptics::new());

        assert_eq!(game.overlay().eye_offset(crate::spatial::Eye::Left), 0.05);
        assert_eq!(game.overlay().eye_offset(crate::spatial::Eye::Right), -0.05);
    }
}
