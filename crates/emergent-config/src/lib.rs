//! Configuration for the emergent particle field.
//!
//! Settings live in `config.toml` inside the platform configuration
//! directory. A missing file is not an error: every setting has a default.

mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use emergent_core::{AnimationSpeed, CellScale, ColorTheme, FieldConfig, MAX_FPS, MIN_FPS};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

/// Largest particle count accepted from configuration.
pub const MAX_PARTICLES: usize = 5000;

/// Largest per-frame velocity component accepted from configuration.
pub const MAX_SPEED: f64 = 50.0;

const CONFIG_FILE: &str = "config.toml";

/// Everything the terminal host can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub field: FieldConfig,
    pub display: DisplayConfig,
}

/// How the field is presented in the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub theme: ColorTheme,
    pub speed: AnimationSpeed,
    /// Target frames per second.
    pub fps: u32,
    pub show_title: bool,
    pub show_help: bool,
    /// Logical units covered by one terminal cell.
    pub cell: CellScale,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            speed: AnimationSpeed::default(),
            fps: 30,
            show_title: true,
            show_help: true,
            cell: CellScale::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "emergent", "emergent")
}

/// Directory for log files and other runtime data.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

impl Config {
    /// Location of the configuration file for the current user.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load and validate a configuration file, falling back to defaults
    /// when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without validating it, falling back to
    /// defaults when it does not exist.
    ///
    /// Callers that layer overrides on top validate the merged result.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write a default configuration file, refusing to replace one that
    /// already exists.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        Self::default().save_to(path)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        if field.particle_count > MAX_PARTICLES {
            return Err(invalid(
                "field.particle_count",
                format!("must be at most {MAX_PARTICLES}"),
            ));
        }
        if !(field.connection_threshold.is_finite() && field.connection_threshold > 0.0) {
            return Err(invalid("field.connection_threshold", "must be positive"));
        }
        if !is_opacity(field.max_line_opacity) {
            return Err(invalid("field.max_line_opacity", "must be in (0, 1]"));
        }
        if !(0.0..=MAX_SPEED).contains(&field.max_speed) {
            return Err(invalid(
                "field.max_speed",
                format!("must be between 0 and {MAX_SPEED}"),
            ));
        }
        if !(field.radius_min.is_finite() && field.radius_min > 0.0) {
            return Err(invalid("field.radius_min", "must be positive"));
        }
        if !(field.radius_max.is_finite() && field.radius_max >= field.radius_min) {
            return Err(invalid(
                "field.radius_max",
                "must be at least field.radius_min",
            ));
        }
        if !is_opacity(field.opacity_min) {
            return Err(invalid("field.opacity_min", "must be in (0, 1]"));
        }
        if !is_opacity(field.opacity_max) || field.opacity_max < field.opacity_min {
            return Err(invalid(
                "field.opacity_max",
                "must be in (0, 1] and at least field.opacity_min",
            ));
        }
        if field.seed.is_some_and(|seed| i64::try_from(seed).is_err()) {
            return Err(invalid("field.seed", format!("must be at most {}", i64::MAX)));
        }

        let display = &self.display;
        if !(MIN_FPS..=MAX_FPS).contains(&display.fps) {
            return Err(invalid(
                "display.fps",
                format!("must be between {MIN_FPS} and {MAX_FPS}"),
            ));
        }
        for (name, value) in [
            ("display.cell.width", display.cell.width),
            ("display.cell.height", display.cell.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, "must be positive"));
            }
        }
        Ok(())
    }
}

fn is_opacity(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emergent_core::ResizePolicy;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [field]
            particle_count = 120
            resize_policy = "resample"

            [display]
            theme = "violet"
            "#,
        )
        .unwrap();

        assert_eq!(config.field.particle_count, 120);
        assert_eq!(config.field.resize_policy, ResizePolicy::Resample);
        assert_eq!(config.field.connection_threshold, 100.0);
        assert_eq!(config.display.theme, ColorTheme::Violet);
        assert_eq!(config.display.fps, 30);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[field]\nparticles = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validation_names_the_bad_field() {
        let cases: Vec<(&str, Config)> = vec![
            ("field.particle_count", {
                let mut c = Config::default();
                c.field.particle_count = MAX_PARTICLES + 1;
                c
            }),
            ("field.connection_threshold", {
                let mut c = Config::default();
                c.field.connection_threshold = 0.0;
                c
            }),
            ("field.max_line_opacity", {
                let mut c = Config::default();
                c.field.max_line_opacity = 1.5;
                c
            }),
            ("field.max_speed", {
                let mut c = Config::default();
                c.field.max_speed = -1.0;
                c
            }),
            ("field.max_speed", {
                let mut c = Config::default();
                c.field.max_speed = 1e308;
                c
            }),
            ("field.radius_max", {
                let mut c = Config::default();
                c.field.radius_max = 0.1;
                c
            }),
            ("field.opacity_min", {
                let mut c = Config::default();
                c.field.opacity_min = 0.0;
                c
            }),
            ("field.opacity_max", {
                let mut c = Config::default();
                c.field.opacity_max = 0.1;
                c
            }),
            ("field.seed", {
                let mut c = Config::default();
                c.field.seed = Some(u64::MAX);
                c
            }),
            ("display.fps", {
                let mut c = Config::default();
                c.display.fps = 0;
                c
            }),
            ("display.cell.height", {
                let mut c = Config::default();
                c.display.cell.height = f64::NAN;
                c
            }),
        ];

        for (expected, config) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = Config::default();
        config.field.particle_count = 80;
        config.field.seed = Some(1234);
        config.display.speed = AnimationSpeed::Fast;
        config.display.show_help = false;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_read_from_leaves_validation_to_the_caller() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[field]\nparticle_count = 6000\n").unwrap();

        let mut config = Config::read_from(&path).unwrap();
        assert_eq!(config.field.particle_count, 6000);
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid { field: "field.particle_count", .. })
        ));

        config.field.particle_count = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_write_default_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[display]\ntheme = \"ember\"\n").unwrap();

        let err = Config::write_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(
            Config::load_from(&path).unwrap().display.theme,
            ColorTheme::Ember
        );
    }

    #[test]
    fn test_write_default_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh").join(CONFIG_FILE);
        Config::write_default(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[display]\nfps = \"fast\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
