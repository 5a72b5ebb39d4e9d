//! Stereo text overlay
//!
//! One line of toast text drawn over both eyes. The text is shifted
//! horizontally in opposite directions per eye so it appears at a comfortable
//! depth, and fades out after each message.

use std::time::{Duration, Instant};

use crate::spatial::Eye;

/// Shown once at startup
pub const WELCOME_MESSAGE: &str = "Pull the magnet when you find an object.";

/// Placement of overlay elements inside one eye's half of the screen, as
/// fractions of that half's width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    /// Reticle box size
    pub image_size: f32,
    /// Reticle shift off centre; negative is up
    pub vertical_image_offset: f32,
    /// Top of the text block
    pub vertical_text_pos: f32,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            image_size: 0.12,
            vertical_image_offset: -0.07,
            vertical_text_pos: 0.52,
        }
    }
}

/// Screen rectangle in one eye's pixel (or cell) space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone)]
struct Toast {
    text: String,
    shown_at: Instant,
}

/// Overlay state shared by both eyes
#[derive(Debug, Clone)]
pub struct OverlayView {
    toast: Option<Toast>,
    fade: Duration,
    depth_offset: f32,
    pub color: (u8, u8, u8),
    pub layout: OverlayLayout,
}

impl OverlayView {
    pub fn new(fade: Duration) -> Self {
        Self {
            toast: None,
            fade,
            depth_offset: 0.016,
            color: (150, 255, 180),
            layout: OverlayLayout::default(),
        }
    }

    /// Replace the current message and restart the fade
    pub fn show_toast(&mut self, text: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            text: text.into(),
            shown_at: now,
        });
    }

    /// Linear fade from 1 at show time to 0 once the fade duration has passed
    pub fn alpha(&self, now: Instant) -> f32 {
        match &self.toast {
            Some(toast) => {
                let elapsed = now.saturating_duration_since(toast.shown_at);
                (1.0 - elapsed.as_secs_f32() / self.fade.as_secs_f32()).clamp(0.0, 1.0)
            }
            None => 0.0,
        }
    }

    /// Current text and its alpha, if still visible
    pub fn visible_text(&self, now: Instant) -> Option<(&str, f32)> {
        let alpha = self.alpha(now);
        match &self.toast {
            Some(toast) if alpha > 0.0 => Some((toast.text.as_str(), alpha)),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.toast.as_ref().map(|t| t.text.as_str())
    }

    /// Horizontal offset for `eye` as a fraction of its half width
    pub fn eye_offset(&self, eye: Eye) -> f32 {
        match eye {
            Eye::Left => self.depth_offset,
            Eye::Right => -self.depth_offset,
        }
    }

    pub fn set_depth_offset(&mut self, offset: f32) {
        self.depth_offset = offset;
    }

    /// Reticle box for `eye` in a half of `width` x `height`
    pub fn image_rect(&self, eye: Eye, width: f32, height: f32) -> Rect {
        let size = self.layout.image_size;
        let margin = (1.0 - size) / 2.0;
        let left = (width * (margin + self.eye_offset(eye))).trunc();
        let top = (height * (margin + self.layout.vertical_image_offset)).trunc();
        Rect {
            left,
            top,
            right: left + width * size,
            bottom: top + height * size,
        }
    }

    /// Text block for `eye` in a half of `width` x `height`
    pub fn text_rect(&self, eye: Eye, width: f32, height: f32) -> Rect {
        let left = self.eye_offset(eye) * width;
        let top = height * self.layout.vertical_text_pos;
        Rect {
            left,
            top,
            right: left + width,
            bottom: top + height * (1.0 - self.layout.vertical_text_pos),
        }
    }
}

impl Default for OverlayView {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade() {
        let mut overlay = OverlayView::default();
        let start = Instant::now();
        assert_eq!(overlay.alpha(start), 0.0);

        overlay.show_toast("hello", start);
        assert_eq!(overlay.alpha(start), 1.0);
        assert!((overlay.alpha(start + Duration::from_millis(2500)) - 0.5).abs() < 1e-4);
        assert_eq!(overlay.alpha(start + Duration::from_secs(5)), 0.0);
        assert!(overlay.visible_text(start + Duration::from_secs(6)).is_none());
        assert_eq!(overlay.text(), Some("hello"));
    }

    #[test]
    fn test_new_toast_restarts_fade() {
        let mut overlay = OverlayView::default();
        let start = Instant::now();
        overlay.show_toast("first", start);
        let later = start + Duration::from_secs(4);
        overlay.show_toast("second", later);

        let (text, alpha) = overlay.visible_text(later).unwrap();
        assert_eq!(text, "second");
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn test_eye_offsets_are_mirrored() {
        let overlay = OverlayView::default();
        assert_eq!(overlay.eye_offset(Eye::Left), 0.016);
        assert_eq!(overlay.eye_offset(Eye::Right), -0.016);
    }

    #[test]
    fn test_layout_rects() {
        let overlay = OverlayView::default();
        let text = overlay.text_rect(Eye::Left, 1000.0, 500.0);
        assert!((text.left - 16.0).abs() < 1e-3);
        assert!((text.top - 260.0).abs() < 1e-3);

        let image = overlay.image_rect(Eye::Right, 1000.0, 500.0);
        // margin 0.44, shifted left by 0.016
        assert!((image.left - 424.0).abs() <= 1.0);
        assert!((image.top - 185.0).abs() <= 1.0);
        assert!((image.right - image.left - 120.0).abs() < 1e-3);
    }
}
