//! Command line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;
use emergent_config::{Config, ConfigError};
use emergent_core::{AnimationSpeed, ColorTheme};

/// Ambient particle field for the terminal.
#[derive(Debug, Parser)]
#[command(name = "emergent", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of particles.
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Distance below which particles are connected, in logical units.
    #[arg(long, value_name = "UNITS")]
    pub threshold: Option<f64>,

    /// Target frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Color theme (emergent, cyan, ocean, violet, ember, mono).
    #[arg(long)]
    pub theme: Option<ColorTheme>,

    /// Animation speed (slow, medium, fast).
    #[arg(long)]
    pub speed: Option<AnimationSpeed>,

    /// Seed for a reproducible particle layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here instead of the default data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a default configuration file and exit.
    #[arg(long, conflicts_with = "print_config")]
    pub write_default_config: bool,
}

impl Cli {
    /// Read the config file, apply flag overrides, then validate the result.
    ///
    /// A flag can replace an out-of-range file value, so validation only
    /// happens once everything is merged.
    pub fn load_config(&self, path: &Path) -> Result<Config, ConfigError> {
        let mut config = Config::read_from(path)?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Override file settings with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.field.particle_count = count;
        }
        if let Some(threshold) = self.threshold {
            config.field.connection_threshold = threshold;
        }
        if let Some(seed) = self.seed {
            config.field.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if let Some(theme) = self.theme {
            config.display.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.display.speed = speed;
        }
    }
}
