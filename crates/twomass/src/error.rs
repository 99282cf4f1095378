//! Error types for the `twomass` host.

use std::path::PathBuf;

use normal_modes::DegenerateSystemError;
use thiserror::Error;

use crate::input::InputError;

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, TwomassError>;

/// Everything that can stop the host from animating.
#[derive(Debug, Error)]
pub enum TwomassError {
    /// A parameter field was rejected.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The parameters passed the window but not the solver.
    #[error("the parameters do not describe an oscillating chain: {0}")]
    Degenerate(#[from] DegenerateSystemError),

    /// The config file could not be parsed.
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The session file could not be read or written.
    #[error("invalid session file {}: {source}", path.display())]
    Session {
        /// Session file path.
        path: PathBuf,
        /// Encoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A setting has an unusable value.
    #[error("invalid setting {name}: {message}")]
    Setting {
        /// Setting name.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TwomassError {
    /// Whether asking the user for different parameters can fix the error.
    #[must_use]
    pub const fn is_parameter_error(&self) -> bool {
        matches!(self, Self::Input(_) | Self::Degenerate(_))
    }
}
