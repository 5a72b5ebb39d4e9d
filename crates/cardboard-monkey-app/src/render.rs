//! Side-by-side stereo renderer for the terminal
//!
//! The screen is split into a left and a right eye viewport. Geometry arrives
//! as composed matrices from the transform engine; this module only projects
//! a handful of points per object and rasterizes them into a character buffer
//! with a depth test, then diff-renders the buffer to the terminal.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor, queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use glam::{Mat4, Vec3};

use cardboard_monkey::feedback::Rect;
use cardboard_monkey::{Eye, EyeFrame, LookState, OverlayView};

/// Half extent of the cube mesh in object space
const CUBE_HALF: f32 = 1.0;
/// Floor grid spacing and reach, object space
const FLOOR_STEP: f32 = 4.0;
const FLOOR_REACH: i32 = 10;

const BACKGROUND: Color = Color::Rgb { r: 26, g: 26, b: 26 };
const FLOOR_COLOR: Color = Color::Rgb { r: 60, g: 110, b: 70 };
const CUBE_COLOR: Color = Color::Rgb { r: 230, g: 170, b: 60 };
const FOUND_COLOR: Color = Color::Rgb { r: 250, g: 240, b: 90 };

/// Cell in the terminal buffer
#[derive(Clone, PartialEq)]
struct Cell {
    symbol: char,
    fg: Color,
    bg: Color,
    depth: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: Color::White,
            bg: BACKGROUND,
            depth: f32::MAX,
        }
    }
}

/// Screen position of a projected point inside one viewport, plus NDC depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: u16,
    pub y: u16,
    pub depth: f32,
}

/// Project an object-space point through `mvp` into a `width` x `height`
/// viewport. Returns `None` when the point is clipped.
pub fn project(mvp: &Mat4, point: Vec3, width: u16, height: u16) -> Option<Projected> {
    if width == 0 || height == 0 {
        return None;
    }

    let clip = *mvp * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
        return None;
    }

    let x = ((ndc.x + 1.0) / 2.0 * width as f32).floor() as u16;
    let y = ((1.0 - ndc.y) / 2.0 * height as f32).floor() as u16;
    Some(Projected {
        x: x.min(width - 1),
        y: y.min(height - 1),
        depth: ndc.z,
    })
}

/// Stereo terminal renderer with depth buffer
pub struct StereoRenderer {
    width: u16,
    height: u16,
    buffer: Vec<Cell>,
    prev_buffer: Vec<Cell>,
    /// Screen contents are unknown; emit every cell on the next frame
    full_repaint: bool,
}

impl StereoRenderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(width, height))
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            buffer: vec![Cell::default(); size],
            prev_buffer: vec![Cell::default(); size],
            full_repaint: true,
        }
    }

    /// Width of one eye viewport
    pub fn eye_width(&self) -> u16 {
        self.width / 2
    }

    /// Rows available to the eye viewports; the last row holds the status line
    pub fn eye_height(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    /// Aspect ratio of one eye viewport, correcting for cells twice as tall as wide
    pub fn eye_aspect(&self) -> f32 {
        let h = self.eye_height().max(1) as f32 * 2.0;
        self.eye_width().max(1) as f32 / h
    }

    /// Refresh terminal size
    pub fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.width || height != self.height {
            self.resize(width, height);
        }
        Ok(())
    }

    /// Rebuild both buffers for a new size and schedule a full repaint
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::with_size(width, height);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a cell in the buffer with depth test
    fn set_cell(&mut self, x: u16, y: u16, symbol: char, fg: Color, depth: f32) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            if depth < cell.depth {
                cell.symbol = symbol;
                cell.fg = fg;
                cell.depth = depth;
            }
        }
    }

    /// Set a cell without depth test (for overlay elements)
    fn set_cell_overlay(&mut self, x: u16, y: u16, symbol: char, fg: Color) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            cell.symbol = symbol;
            cell.fg = fg;
            cell.depth = f32::MIN;
        }
    }

    fn set_background(&mut self, x: u16, y: u16, bg: Color) {
        if let Some(idx) = self.index(x, y) {
            self.buffer[idx].bg = bg;
        }
    }

    fn symbol_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|idx| self.buffer[idx].symbol)
    }

    pub fn begin_frame(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        self.clear();
        Ok(())
    }

    /// Swap buffers and blank the back buffer
    pub fn clear(&mut self) {
        std::mem::swap(&mut self.buffer, &mut self.prev_buffer);
        for cell in &mut self.buffer {
            *cell = Cell::default();
        }
    }

    /// Rasterize one eye's view of the scene
    pub fn draw_eye(&mut self, frame: &EyeFrame, look: LookState, overlay: &OverlayView, now: Instant) {
        let x0 = match frame.eye {
            Eye::Left => 0,
            Eye::Right => self.eye_width(),
        };
        let (w, h) = (self.eye_width(), self.eye_height());

        // Floor grid
        for i in -FLOOR_REACH..=FLOOR_REACH {
            for j in -FLOOR_REACH..=FLOOR_REACH {
                let point = Vec3::new(i as f32 * FLOOR_STEP, 0.0, j as f32 * FLOOR_STEP);
                if let Some(p) = project(&frame.floor.model_view_projection, point, w, h) {
                    self.set_cell(x0 + p.x, p.y, '.', FLOOR_COLOR, p.depth);
                }
            }
        }

        // Cube corners and centre
        let (corner, centre, color) = match look {
            LookState::Found => ('*', '@', FOUND_COLOR),
            LookState::NotFound => ('+', '#', CUBE_COLOR),
        };
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let point = Vec3::new(sx, sy, sz) * CUBE_HALF;
                    if let Some(p) = project(&frame.cube.model_view_projection, point, w, h) {
                        self.set_cell(x0 + p.x, p.y, corner, color, p.depth);
                    }
                }
            }
        }
        if let Some(p) = project(&frame.cube.model_view_projection, Vec3::ZERO, w, h) {
            self.set_cell(x0 + p.x, p.y, centre, color, p.depth);
        }

        self.draw_overlay(frame.eye, x0, overlay, now);
    }

    fn draw_overlay(&mut self, eye: Eye, x0: u16, overlay: &OverlayView, now: Instant) {
        let (w, h) = (self.eye_width() as f32, self.eye_height() as f32);
        let (r, g, b) = overlay.color;

        // Reticle at the centre of the image box
        let Rect { left, top, right, bottom } = overlay.image_rect(eye, w, h);
        let cx = ((left + right) / 2.0).max(0.0) as u16;
        let cy = ((top + bottom) / 2.0).max(0.0) as u16;
        let reticle = Color::Rgb { r, g, b };
        if cx < self.eye_width() {
            self.set_cell_overlay(x0 + cx, cy, 'o', reticle);
        }

        if let Some((text, alpha)) = overlay.visible_text(now) {
            let fg = Color::Rgb {
                r: (r as f32 * alpha) as u8,
                g: (g as f32 * alpha) as u8,
                b: (b as f32 * alpha) as u8,
            };
            let rect = overlay.text_rect(eye, w, h);
            let eye_width = self.eye_width();
            for (row, line) in text.lines().enumerate() {
                let y = rect.top as u16 + row as u16;
                let len = line.chars().count() as f32;
                // Centred within the text block, shifted by the eye offset
                let start = (rect.left + (w - len) / 2.0).max(0.0) as u16;
                for (col, ch) in line.chars().enumerate() {
                    let x = start + col as u16;
                    if x < eye_width {
                        self.set_cell_overlay(x0 + x, y, ch, fg);
                    }
                }
            }
        }
    }

    /// Bottom status line, and an inverted divider while the viewer vibrates
    pub fn draw_status(&mut self, status: &str, buzzing: bool) {
        let y = self.height.saturating_sub(1);
        for (col, ch) in status.chars().enumerate() {
            self.set_cell_overlay(col as u16, y, ch, Color::Grey);
        }

        let divider = self.eye_width();
        let bg = if buzzing { Color::White } else { Color::DarkGrey };
        for y in 0..self.eye_height() {
            if self.symbol_at(divider, y) == Some(' ') {
                self.set_background(divider, y, bg);
            }
        }
    }

    fn is_dirty(&self, idx: usize) -> bool {
        if self.full_repaint {
            return true;
        }
        let (cell, prev) = (&self.buffer[idx], &self.prev_buffer[idx]);
        cell.symbol != prev.symbol || cell.fg != prev.fg || cell.bg != prev.bg
    }

    /// Number of cells the next `end_frame` will write
    pub fn pending_cells(&self) -> usize {
        (0..self.buffer.len()).filter(|&idx| self.is_dirty(idx)).count()
    }

    /// Diff-render changed cells to stdout
    pub fn end_frame(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::Hide)?;
        if self.full_repaint {
            queue!(stdout, terminal::Clear(ClearType::All))?;
        }

        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(idx) = self.index(x, y) {
                    if self.is_dirty(idx) {
                        let cell = &self.buffer[idx];
                        queue!(
                            stdout,
                            cursor::MoveTo(x, y),
                            SetForegroundColor(cell.fg),
                            SetBackgroundColor(cell.bg),
                            Print(cell.symbol)
                        )?;
                    }
                }
            }
        }

        self.full_repaint = false;
        stdout.flush()
    }

    /// Text of one buffer row, for inspection
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.symbol_at(x, y))
            .collect()
    }
}
