//! Runtime configuration for `twomass`.
//!
//! [`Config`] is the single source of truth for settings, independent of how
//! they were specified. Sources in increasing precedence:
//!
//! 1. built-in defaults,
//! 2. a TOML file (`--config` or `TWOMASS_CONFIG`),
//! 3. command-line flags.
//!
//! # File format
//!
//! ```toml
//! time_step = 0.03
//! frame_interval_ms = 20
//!
//! [parameters]
//! k1 = "10"
//! k2 = "4"
//! k3 = "10"
//! m1 = "1"
//! m2 = "3"
//!
//! [window]
//! min = 1.0
//! max = 100.0
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use normal_modes::{REFERENCE_DISPLACEMENT, TIME_STEP};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{Cli, ParameterArgs};
use crate::error::{Result, TwomassError};
use crate::input::{ParameterWindow, RawParameters};
use crate::session;

/// Default delay between frames.
pub const FRAME_INTERVAL_MS: u64 = 20;

/// Radius of a unit mass in terminal cells.
pub const CELL_RADIUS_SCALE: f64 = 2.0;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain parameters as text.
    pub parameters: RawParameters,

    /// Range every parameter must fall in.
    pub window: ParameterWindow,

    /// Simulation time advanced per frame.
    pub time_step: f64,

    /// Initial displacement of mass 1.
    pub reference_displacement: f64,

    /// Delay between animation frames in milliseconds.
    pub frame_interval_ms: u64,

    /// Radius of a unit mass in cells.
    pub radius_scale: f64,

    /// Session file location. Defaults to a file in the temp directory.
    pub session_path: Option<PathBuf>,

    /// Whether to style the animation with colors.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parameters: RawParameters::default(),
            window: ParameterWindow::default(),
            time_step: TIME_STEP,
            reference_displacement: REFERENCE_DISPLACEMENT,
            frame_interval_ms: FRAME_INTERVAL_MS,
            radius_scale: CELL_RADIUS_SCALE,
            session_path: None,
            color: true,
        }
    }
}

impl Config {
    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// I/O errors, or [`TwomassError::Config`] when the file is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text).map_err(|source| TwomassError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        config.checked()
    }

    /// Builds the config from CLI arguments, reading the config file they
    /// name and applying flag overrides on top.
    ///
    /// # Errors
    ///
    /// Config file errors and out-of-range settings.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_parameter_flags(&cli.parameters);
        if let Some(time_step) = cli.time_step {
            config.time_step = time_step;
        }
        if let Some(interval) = cli.frame_interval_ms {
            config.frame_interval_ms = interval;
        }
        if let Some(path) = &cli.session {
            config.session_path = Some(path.clone());
        }
        if cli.no_color {
            config.color = false;
        }

        config.checked()
    }

    /// Replaces the parameter fields given on the command line.
    pub fn apply_parameter_flags(&mut self, flags: &ParameterArgs) {
        let overrides = [
            (&flags.k1, &mut self.parameters.k1),
            (&flags.k2, &mut self.parameters.k2),
            (&flags.k3, &mut self.parameters.k3),
            (&flags.m1, &mut self.parameters.m1),
            (&flags.m2, &mut self.parameters.m2),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                field.clone_from(value);
            }
        }
    }

    fn checked(self) -> Result<Self> {
        let setting = |name: &'static str, message: String| TwomassError::Setting { name, message };

        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(setting(
                "time_step",
                format!("{} is not a positive number", self.time_step),
            ));
        }
        if !self.reference_displacement.is_finite() {
            return Err(setting(
                "reference_displacement",
                format!("{} is not finite", self.reference_displacement),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(setting("frame_interval_ms", "must be at least 1".into()));
        }
        if !(self.radius_scale.is_finite() && self.radius_scale > 0.0) {
            return Err(setting(
                "radius_scale",
                format!("{} is not a positive number", self.radius_scale),
            ));
        }
        if !(self.window.min.is_finite() && self.window.max.is_finite())
            || self.window.min > self.window.max
        {
            return Err(setting("window", format!("{} is not a valid range", self.window)));
        }
        Ok(self)
    }

    /// Delay between animation frames.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Session file location, falling back to the default path.
    #[must_use]
    pub fn effective_session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(session::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_match_animation_constants() {
        let config = Config::default();
        assert_eq!(config.time_step, 0.03);
        assert_eq!(config.reference_displacement, 1.0);
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
        assert_eq!(config.window, ParameterWindow::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("time_step = 0.01\n[parameters]\nk2 = \"4\"\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.time_step, 0.01);
        assert_eq!(config.parameters.k2, "4");
        assert_eq!(config.parameters.k1, "10");
        assert_eq!(config.frame_interval_ms, FRAME_INTERVAL_MS);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_config("[parameters]\nk1 = \"50\"\nk3 = \"60\"\n");
        let cli = Cli::try_parse_from([
            "twomass",
            "--config",
            file.path().to_str().unwrap(),
            "--k1",
            "5",
            "--time-step",
            "0.5",
            "--no-color",
            "modes",
        ])
        .unwrap();

        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.parameters.k1, "5");
        assert_eq!(config.parameters.k3, "60");
        assert_eq!(config.time_step, 0.5);
        assert!(!config.color);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let file = write_config("time_step = \"fast\"\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, TwomassError::Config { .. }));
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn test_rejects_bad_settings() {
        let file = write_config("frame_interval_ms = 0\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(TwomassError::Setting {
                name: "frame_interval_ms",
                ..
            })
        ));

        let file = write_config("[window]\nmin = 10.0\nmax = 1.0\n");
        assert!(Config::load(file.path()).is_err());

        let cli = Cli::try_parse_from(["twomass", "--time-step", "-1", "modes"]);
        // clap may treat "-1" as a flag; either way it must not be accepted.
        if let Ok(cli) = cli {
            assert!(Config::from_cli(&cli).is_err());
        }
    }

    #[test]
    fn test_session_path_override() {
        let config = Config {
            session_path: Some(PathBuf::from("/tmp/custom.json")),
            ..Config::default()
        };
        assert_eq!(config.effective_session_path(), PathBuf::from("/tmp/custom.json"));
        assert!(Config::default()
            .effective_session_path()
            .ends_with("twomass-session.json"));
    }
}
