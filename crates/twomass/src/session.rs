//! Persistence of the running animation across restarts.
//!
//! The session file remembers the last accepted parameters and whether an
//! animation was running when the program exited. `--resume` restarts from
//! it; a stopped session is ignored.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TwomassError};
use crate::input::RawParameters;

/// File name used when no session path is configured.
pub const SESSION_FILE_NAME: &str = "twomass-session.json";

/// Default session location in the system temp directory.
#[must_use]
pub fn default_path() -> PathBuf {
    std::env::temp_dir().join(SESSION_FILE_NAME)
}

/// Saved state of an animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Parameters the animation was started with.
    pub parameters: RawParameters,
    /// Whether the animation was still running.
    pub running: bool,
}

impl Session {
    /// A session for an animation that just started.
    #[must_use]
    pub const fn started(parameters: RawParameters) -> Self {
        Self {
            parameters,
            running: true,
        }
    }

    /// Reads the session at `path`.
    ///
    /// Returns `Ok(None)` when no session has been saved yet.
    ///
    /// # Errors
    ///
    /// I/O failures other than a missing file, and malformed JSON.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved session");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let session = serde_json::from_str(&text).map_err(|source| TwomassError::Session {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(session))
    }

    /// Parameters to resume with, if the saved animation was running.
    ///
    /// A corrupt session file is logged and treated as absent.
    #[must_use]
    pub fn resumable(path: &Path) -> Option<RawParameters> {
        match Self::load(path) {
            Ok(Some(session)) if session.running => Some(session.parameters),
            Ok(_) => None,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session");
                None
            }
        }
    }

    /// Writes the session to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// I/O and encoding failures.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| TwomassError::Session {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        debug!(path = %path.display(), running = self.running, "saved session");
        Ok(())
    }

    /// Records that the animation at `path` has stopped.
    ///
    /// # Errors
    ///
    /// Same as [`Session::save`].
    pub fn mark_stopped(mut self, path: &Path) -> Result<()> {
        self.running = false;
        self.save(path)
    }
}
