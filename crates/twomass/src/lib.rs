#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! # twomass
//!
//! Terminal host for the [`normal_modes`] solver: reads the five chain
//! parameters from flags, a config file or a saved session, validates them
//! and either animates the chain or prints headless reports.
//!
//! ## Modules
//!
//! - [`cli`]: command-line arguments
//! - [`config`]: layered settings
//! - [`input`]: parameter text parsing and range checks
//! - [`session`]: resumable animation state
//! - [`render`]: character-cell drawing
//! - [`report`]: `modes`, `trace` and `frame` output
//! - [`app`]: the interactive loop

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod report;
pub mod session;

use std::io::{self, Write};

use normal_modes::{MotionEvaluator, PhysicalParameters, compute_amplitude, solve_modes};
use tracing::{info, warn};

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Result, TwomassError};

use app::Animation;
use render::Renderer;
use session::Session;

/// Parameters and motion ready to display.
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Final settings.
    pub config: Config,
    /// Validated parameters.
    pub params: PhysicalParameters,
    /// Evaluator at `t = 0`.
    pub evaluator: MotionEvaluator,
}

/// Resolves settings and solves the chain.
///
/// Truncated fields are reported on stderr and in the log.
///
/// # Errors
///
/// Config, input and degenerate-system errors.
pub fn prepare(cli: &Cli) -> Result<Prepared> {
    let mut config = Config::from_cli(cli)?;

    if cli.resume {
        let path = config.effective_session_path();
        match Session::resumable(&path) {
            Some(parameters) => {
                info!(path = %path.display(), "resuming saved session");
                config.parameters = parameters;
                config.apply_parameter_flags(&cli.parameters);
            }
            None => info!(path = %path.display(), "no running session to resume"),
        }
    }

    let validated = input::validate(&config.parameters, config.window)?;
    for warning in &validated.warnings {
        warn!(field = warning.name, input = %warning.input, "truncated parameter");
        eprintln!("warning: {warning}");
    }

    let modes = solve_modes(validated.params)?;
    let scale = compute_amplitude(modes, config.reference_displacement)?;
    let evaluator = MotionEvaluator::with_time_step(modes, scale, config.time_step);

    Ok(Prepared {
        params: validated.params,
        evaluator,
        config,
    })
}

/// Runs the command selected on the command line.
///
/// # Errors
///
/// Everything [`prepare`] returns, plus terminal and output I/O errors.
pub fn run(cli: &Cli) -> Result<()> {
    let Prepared {
        config,
        params,
        mut evaluator,
    } = prepare(cli)?;

    if cli.is_interactive() {
        let renderer = Renderer::new(0, 0, config.radius_scale);
        let session = Session::started(config.parameters.clone());
        return app::run(
            Animation::new(params, evaluator, renderer, config.color),
            config.frame_interval(),
            Some((session, config.effective_session_path())),
        );
    }

    let mut out = io::stdout().lock();
    if let Some(command) = &cli.command {
        write_report(&mut out, command, &config, &params, &mut evaluator)?;
    }
    out.flush()?;
    Ok(())
}

fn write_report<W: Write>(
    out: &mut W,
    command: &Command,
    config: &Config,
    params: &PhysicalParameters,
    evaluator: &mut MotionEvaluator,
) -> Result<()> {
    match command {
        Command::Run => Ok(()),
        Command::Modes(args) => {
            let report = report::ModesReport::new(*params, *evaluator.modes(), evaluator.scale());
            report::write_modes(out, &report, args.format)
        }
        Command::Trace(args) => report::write_trace(out, evaluator, args.steps, args.format),
        Command::Frame(args) => {
            let renderer = Renderer::new(args.width, args.height, config.radius_scale);
            report::write_frame(out, &renderer, params, evaluator, args.steps)
        }
    }
}
