//! Command-line interface for `twomass`.
//!
//! # Examples
//!
//! ```bash
//! # Animate the default symmetric chain
//! twomass
//!
//! # Animate a custom chain
//! twomass --k1 20 --k2 5 --k3 40 --m1 2 --m2 8
//!
//! # Pick up the last running animation after a restart
//! twomass --resume
//!
//! # Print the normal modes as JSON
//! twomass --k2 3 modes --format json
//!
//! # Print 100 steps of motion
//! twomass trace --steps 100
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Two-mass, three-spring normal-mode animator.
///
/// Solves the chain wall–k1–m1–k2–m2–k3–wall in closed form and animates
/// the free oscillation that starts with mass 1 displaced and mass 2 at rest.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "twomass",
    author,
    version,
    about = "Animate the normal modes of a two-mass, three-spring chain",
    long_about = "Solves the chain wall-k1-m1-k2-m2-k3-wall in closed form and animates \
                  its free oscillation in the terminal. All parameters must be numbers \
                  between 1 and 100 unless the config file widens the window."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "TWOMASS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Chain parameters; each overrides the config file
    #[command(flatten)]
    pub parameters: ParameterArgs,

    /// Simulation time advanced per frame
    #[arg(long, global = true)]
    pub time_step: Option<f64>,

    /// Milliseconds between animation frames
    #[arg(long, global = true)]
    pub frame_interval_ms: Option<u64>,

    /// Where the running session is remembered
    #[arg(long, global = true, env = "TWOMASS_SESSION")]
    pub session: Option<PathBuf>,

    /// Restart with the parameters of the last running animation
    #[arg(long, global = true)]
    pub resume: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand; animates when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// The five chain parameters as entered.
///
/// Kept as text so that inputs like `12kg` can be read the same way as a
/// form field and reported.
#[derive(Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// Left wall spring stiffness
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub k1: Option<String>,

    /// Coupling spring stiffness
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub k2: Option<String>,

    /// Right wall spring stiffness
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub k3: Option<String>,

    /// Left mass
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub m1: Option<String>,

    /// Right mass
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub m2: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Animate the chain in the terminal (default)
    Run,

    /// Print the eigenfrequencies, eigenvectors and amplitude
    Modes(ModesArgs),

    /// Print displacements for a number of steps
    Trace(TraceArgs),

    /// Print a single rendered frame as plain text
    Frame(FrameArgs),
}

/// Arguments for `modes`.
#[derive(Args, Debug, Clone)]
pub struct ModesArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for `trace`.
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Number of steps to print
    #[arg(long, short = 'n', default_value = "50")]
    pub steps: u64,

    /// Output format
    #[arg(long, short = 'f', default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for `frame`.
#[derive(Args, Debug, Clone)]
pub struct FrameArgs {
    /// Steps to advance before rendering
    #[arg(long, short = 'n', default_value = "0")]
    pub steps: u64,

    /// Canvas width in cells
    #[arg(long, default_value = "80")]
    pub width: u16,

    /// Canvas height in cells
    #[arg(long, default_value = "12")]
    pub height: u16,
}

/// Output formats for the report subcommands.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text
    #[default]
    Plain,
    /// One JSON document (modes) or one JSON object per line (trace)
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Whether the interactive animation was requested.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Run))
    }
}
