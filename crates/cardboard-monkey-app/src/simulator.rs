//! Head tracker simulator for terminal development
//!
//! Maps keyboard input to a simulated head orientation so the demo can run
//! without a viewer. Produces the head pose and both eye views each frame.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glam::{Mat4, Vec3};

use cardboard_monkey::{Eye, EyeView, Pose};

/// What a key press asks the runner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    /// Head orientation changed
    Moved,
    /// Magnet pull
    Trigger,
    Quit,
}

/// Simulates head tracking and stereo eye geometry from keyboard input
#[derive(Debug, Clone)]
pub struct HeadSimulator {
    /// Rotation about +Y; positive turns left
    yaw: f32,
    /// Rotation about +X; positive looks up
    pitch: f32,
    /// Radians per key press
    head_speed: f32,
    /// Distance between the eyes, world units
    ipd: f32,
    /// Vertical field of view, radians
    fov_y: f32,
    near: f32,
    far: f32,
}

impl Default for HeadSimulator {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            head_speed: 0.05,
            ipd: 0.064,
            fov_y: 80f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl HeadSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a key press into a head movement or runner action
    pub fn process_key(&mut self, key: KeyEvent) -> Option<SimAction> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            self.head_speed * 4.0
        } else {
            self.head_speed
        };

        match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.pitch = (self.pitch + step).min(std::f32::consts::FRAC_PI_2);
                Some(SimAction::Moved)
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.pitch = (self.pitch - step).max(-std::f32::consts::FRAC_PI_2);
                Some(SimAction::Moved)
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.yaw += step;
                Some(SimAction::Moved)
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.yaw -= step;
                Some(SimAction::Moved)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
                Some(SimAction::Moved)
            }
            KeyCode::Char(' ') | KeyCode::Enter => Some(SimAction::Trigger),
            KeyCode::Char('q') | KeyCode::Esc => Some(SimAction::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(SimAction::Quit)
            }
            _ => None,
        }
    }

    /// Point the head straight at `target`
    pub fn aim_at(&mut self, target: Vec3) {
        let horizontal = (target.x * target.x + target.z * target.z).sqrt();
        self.yaw = (-target.x).atan2(-target.z);
        self.pitch = target.y.atan2(horizontal);
    }

    /// World to head space: the inverse of yaw-then-pitch
    pub fn head_view(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.pitch) * Mat4::from_rotation_y(-self.yaw)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.head_view())
    }

    /// Per-eye view and projection for an eye viewport of the given aspect
    pub fn eye_view(&self, eye: Eye, aspect: f32) -> EyeView {
        // Left eye sits at -x, so its view shifts the world toward +x
        let offset = Mat4::from_translation(Vec3::new(-eye.side() * self.ipd / 2.0, 0.0, 0.0));
        let projection = Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far);
        EyeView::new(eye, offset * self.head_view(), projection)
    }

    pub fn eye_views(&self, aspect: f32) -> [EyeView; 2] {
        Eye::BOTH.map(|eye| self.eye_view(eye, aspect))
    }

    /// Current (yaw, pitch) in degrees, for the HUD
    pub fn angles_deg(&self) -> (f32, f32) {
        (self.yaw.to_degrees(), self.pitch.to_degrees())
    }

    /// Look straight ahead again
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardboard_monkey::is_looking_at_target;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_head_view_is_identity() {
        let sim = HeadSimulator::new();
        assert_eq!(sim.head_view(), Mat4::IDENTITY);
    }

    #[test]
    fn test_keys_move_head() {
        let mut sim = HeadSimulator::new();
        assert_eq!(sim.process_key(press(KeyCode::Char('a'))), Some(SimAction::Moved));
        assert_eq!(sim.process_key(press(KeyCode::Up)), Some(SimAction::Moved));
        let (yaw, pitch) = sim.angles_deg();
        assert!(yaw > 0.0);
        assert!(pitch > 0.0);

        sim.process_key(press(KeyCode::Char('r')));
        assert_eq!(sim.angles_deg(), (0.0, 0.0));
    }

    #[test]
    fn test_trigger_and_quit_keys() {
        let mut sim = HeadSimulator::new();
        assert_eq!(sim.process_key(press(KeyCode::Char(' '))), Some(SimAction::Trigger));
        assert_eq!(sim.process_key(press(KeyCode::Enter)), Some(SimAction::Trigger));
        assert_eq!(sim.process_key(press(KeyCode::Esc)), Some(SimAction::Quit));
        assert_eq!(sim.process_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_aim_at_targets_in_every_direction() {
        let targets = [
            Vec3::new(0.0, 0.0, -12.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(-7.0, 4.0, 3.0),
            Vec3::new(0.5, -6.0, 9.0),
        ];
        let mut sim = HeadSimulator::new();

        for target in targets {
            sim.aim_at(target);
            let model = Mat4::from_translation(target);
            assert!(is_looking_at_target(&sim.head_view(), &model), "{target:?}");
        }
    }

    #[test]
    fn test_turning_left_moves_target_right() {
        let mut sim = HeadSimulator::new();
        sim.process_key(press(KeyCode::Char('a')));
        let ahead = sim.head_view().transform_point3(Vec3::new(0.0, 0.0, -10.0));
        assert!(ahead.x > 0.0);
    }

    #[test]
    fn test_eye_views_are_offset() {
        let sim = HeadSimulator::new();
        let [left, right] = sim.eye_views(1.0);
        assert_eq!(left.eye, Eye::Left);
        assert_eq!(right.eye, Eye::Right);

        let origin_left = left.view.transform_point3(Vec3::ZERO);
        let origin_right = right.view.transform_point3(Vec3::ZERO);
        assert!((origin_left.x - 0.032).abs() < 1e-6);
        assert!((origin_right.x + 0.032).abs() < 1e-6);
    }
}
