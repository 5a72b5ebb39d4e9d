//! Interactive terminal runner
//!
//! Drives the frame loop: poll input, then on each tick run `begin_frame`,
//! draw both eyes and present. Trigger presses are handled between frames, so
//! the controller is only ever touched from this loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info};

use cardboard_monkey::{GazeController, RandomSource};

use crate::haptics::FlashHaptics;
use crate::render::StereoRenderer;
use crate::simulator::{HeadSimulator, SimAction};

/// Application runner for the stereo demo
pub struct InteractiveRunner<R: RandomSource> {
    controller: GazeController<R, FlashHaptics>,
    simulator: HeadSimulator,
    renderer: StereoRenderer,
    tick_rate: Duration,
    running: bool,
}

impl<R: RandomSource> InteractiveRunner<R> {
    pub fn new(controller: GazeController<R, FlashHaptics>) -> io::Result<Self> {
        Ok(Self {
            controller,
            simulator: HeadSimulator::new(),
            renderer: StereoRenderer::new()?,
            tick_rate: Duration::from_millis(16),
            running: true,
        })
    }

    /// Set tick rate
    pub fn with_tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate;
        self
    }

    pub fn score(&self) -> u32 {
        self.controller.score()
    }

    /// Run until the user quits; always restores the terminal
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        info!("interactive session started");

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        info!(score = self.controller.score(), "interactive session ended");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.running {
            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_default();

            if event::poll(timeout)? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    match self.simulator.process_key(key) {
                        Some(SimAction::Quit) => {
                            self.running = false;
                            continue;
                        }
                        Some(SimAction::Trigger) => {
                            let result = self.controller.on_trigger();
                            debug!(?result, "trigger handled");
                        }
                        Some(SimAction::Moved) | None => {}
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.render_frame()?;
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let now = Instant::now();
        self.controller.begin_frame(&self.simulator.pose());
        let look = self.controller.look_state();

        self.renderer.begin_frame()?;
        for eye in self.simulator.eye_views(self.renderer.eye_aspect()) {
            let frame = self.controller.draw_eye(&eye);
            self.renderer
                .draw_eye(&frame, look, self.controller.overlay(), now);
        }

        let (yaw, pitch) = self.simulator.angles_deg();
        let status = format!(
            " Score = {}  yaw {:+.0}  pitch {:+.0}  | WASD/arrows look, space trigger, r recentre, q quit",
            self.controller.score(),
            yaw,
            pitch,
        );
        let buzzing = self.controller.haptics().is_buzzing(now);
        self.renderer.draw_status(&status, buzzing);

        self.renderer.end_frame()
    }
}
