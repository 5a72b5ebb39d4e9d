//! cardboard-monkey-app: terminal host for the stereo find-the-target demo
//!
//! Renders both eyes side by side in the terminal, simulating head tracking
//! from the keyboard. Look at the spinning cube until it lights up, then pull
//! the trigger (space) to score and send it somewhere else.
//!
//! Two modes:
//! - Interactive: raw-mode terminal UI
//! - Autopilot: headless scripted rounds, logged through `tracing`

pub mod autopilot;
pub mod haptics;
pub mod render;
pub mod runner;
pub mod simulator;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::{info, warn};

use cardboard_monkey::{GazeController, RandomSource, SceneConfig};

use haptics::FlashHaptics;
use runner::InteractiveRunner;

pub use autopilot::{run_autopilot, AutopilotReport};

/// File name looked up in the platform config directory
pub const CONFIG_FILE: &str = "monkey.toml";

/// Default config location, e.g. `~/.config/monkey-demo/monkey.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "cardboard", "monkey-demo")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load the scene config.
///
/// An explicit path must exist. Without one, the default location is tried
/// and built-in defaults are used when nothing is there.
pub fn load_config(explicit: Option<&Path>) -> Result<SceneConfig> {
    if let Some(path) = explicit {
        let config = SceneConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        return Ok(config);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = SceneConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Some(path) => {
            warn!(path = %path.display(), "no config file, using defaults");
            Ok(SceneConfig::default())
        }
        None => {
            warn!("no config directory on this platform, using defaults");
            Ok(SceneConfig::default())
        }
    }
}

/// Run the interactive terminal demo
pub fn run_interactive<R: RandomSource>(config: SceneConfig, rng: R, tick_rate: Duration) -> Result<u32> {
    let controller = GazeController::new(config, rng, FlashHaptics::new());
    let mut runner = InteractiveRunner::new(controller)
        .context("initializing terminal renderer")?
        .with_tick_rate(tick_rate);

    runner.run().context("terminal session failed")?;
    Ok(runner.score())
}
