//! Headless output for the `modes`, `trace` and `frame` commands.

use std::f64::consts::TAU;
use std::io::Write;

use normal_modes::{
    AmplitudeScale, DisplacementPair, ModeSolution, MotionEvaluator, PhysicalParameters,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{Result, TwomassError};
use crate::render::Renderer;

/// Everything `modes` prints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModesReport {
    /// Parameters that were solved.
    pub parameters: PhysicalParameters,
    /// Frequencies and eigenvectors.
    pub modes: ModeSolution,
    /// Common mode amplitude.
    pub amplitude: AmplitudeScale,
    /// Period of mode 1.
    pub period1: f64,
    /// Period of mode 2.
    pub period2: f64,
}

impl ModesReport {
    /// Collects a report for a solved chain.
    #[must_use]
    pub fn new(
        parameters: PhysicalParameters,
        modes: ModeSolution,
        amplitude: AmplitudeScale,
    ) -> Self {
        Self {
            parameters,
            modes,
            amplitude,
            period1: TAU / modes.omega1(),
            period2: TAU / modes.omega2(),
        }
    }
}

/// One line of `trace`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceSample {
    /// Step index, starting at 0 for the initial state.
    pub step: u64,
    /// Simulation time.
    pub t: f64,
    /// Displacement of mass 1.
    pub x1: f64,
    /// Displacement of mass 2.
    pub x2: f64,
}

impl TraceSample {
    fn at(evaluator: &MotionEvaluator, pair: DisplacementPair) -> Self {
        Self {
            step: evaluator.steps(),
            t: evaluator.elapsed(),
            x1: pair.x1,
            x2: pair.x2,
        }
    }
}

fn json_error(err: serde_json::Error) -> TwomassError {
    TwomassError::Io(err.into())
}

/// Writes the mode report.
///
/// # Errors
///
/// I/O failures on `out`.
pub fn write_modes<W: Write>(
    out: &mut W,
    report: &ModesReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).map_err(json_error)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            let fields: Vec<String> = report
                .parameters
                .fields()
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect();
            writeln!(out, "{}", fields.join("  "))?;

            let modes = &report.modes;
            let rows = [
                (1, modes.omega1(), report.period1, modes.eigenvectors()[0]),
                (2, modes.omega2(), report.period2, modes.eigenvectors()[1]),
            ];
            for (index, omega, period, (x1, x2)) in rows {
                writeln!(
                    out,
                    "mode {index}: omega = {omega:.6}  period = {period:.6}  \
                     eigenvector = ({x1:.6}, {x2:.6})"
                )?;
            }
            writeln!(out, "amplitude = {:.6}", report.amplitude.value())?;
        }
    }
    Ok(())
}

/// Writes the initial state followed by `steps` stepped samples.
///
/// # Errors
///
/// I/O failures on `out`.
pub fn write_trace<W: Write>(
    out: &mut W,
    evaluator: &mut MotionEvaluator,
    steps: u64,
    format: OutputFormat,
) -> Result<()> {
    let first = TraceSample::at(evaluator, evaluator.current());
    let samples = std::iter::once(first).chain((0..steps).map(|_| {
        let pair = evaluator.step();
        TraceSample::at(evaluator, pair)
    }));

    if format == OutputFormat::Plain {
        writeln!(out, "{:>6} {:>10} {:>12} {:>12}", "step", "t", "x1", "x2")?;
    }
    for sample in samples {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &sample).map_err(json_error)?;
                writeln!(out)?;
            }
            OutputFormat::Plain => writeln!(
                out,
                "{:>6} {:>10.4} {:>12.6} {:>12.6}",
                sample.step, sample.t, sample.x1, sample.x2
            )?,
        }
    }
    Ok(())
}

/// Writes one rendered frame as plain text after advancing `steps` steps.
///
/// # Errors
///
/// I/O failures on `out`.
pub fn write_frame<W: Write>(
    out: &mut W,
    renderer: &Renderer,
    params: &PhysicalParameters,
    evaluator: &mut MotionEvaluator,
    steps: u64,
) -> Result<()> {
    let mut pair = evaluator.current();
    for _ in 0..steps {
        pair = evaluator.step();
    }
    let canvas = renderer.render(params, pair);
    writeln!(out, "{}", canvas.to_plain())?;
    writeln!(out, "t = {:.2}  x1 = {:.4}  x2 = {:.4}", evaluator.elapsed(), pair.x1, pair.x2)?;
    Ok(())
}
