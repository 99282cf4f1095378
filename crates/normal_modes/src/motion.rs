//! Time evolution of the chain as a superposition of its two normal modes.
//!
//! # Example
//!
//! ```rust
//! use normal_modes::{compute_amplitude, solve_modes, MotionEvaluator, PhysicalParameters,
//!     REFERENCE_DISPLACEMENT};
//!
//! let modes = solve_modes(PhysicalParameters::new(10.0, 20.0, 30.0, 2.0, 3.0)).unwrap();
//! let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
//! let mut evaluator = MotionEvaluator::new(modes, scale);
//!
//! for _ in 0..100 {
//!     let pair = evaluator.step();
//!     assert!(pair.x1.is_finite() && pair.x2.is_finite());
//! }
//! ```

use crate::error::DegenerateSystemError;
use crate::math::cos;
use crate::modes::ModeSolution;

/// Initial displacement of mass 1 used to normalize the mode amplitudes.
pub const REFERENCE_DISPLACEMENT: f64 = 1.0;

/// Simulation time advanced per animation frame.
pub const TIME_STEP: f64 = 0.03;

/// Common amplitude `a` of both modes.
///
/// With `a = reference / (eigen1 − eigen2)` the motion starts at
/// `x1 = reference`, `x2 = 0`, both masses at rest.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AmplitudeScale(f64);

impl AmplitudeScale {
    /// The scalar `a`.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Computes the amplitude that displaces mass 1 by `reference_displacement`
/// at `t = 0` while mass 2 sits at its rest position.
///
/// # Errors
///
/// [`DegenerateSystemError::InvalidAmplitude`] when `eigen1 − eigen2` is zero
/// or not finite, or the quotient is not finite.
pub fn compute_amplitude(
    modes: ModeSolution,
    reference_displacement: f64,
) -> Result<AmplitudeScale, DegenerateSystemError> {
    let denominator = modes.eigen1() - modes.eigen2();
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(DegenerateSystemError::InvalidAmplitude { denominator });
    }

    let a = reference_displacement / denominator;
    if !a.is_finite() {
        return Err(DegenerateSystemError::InvalidAmplitude { denominator });
    }
    Ok(AmplitudeScale(a))
}

/// Signed, dimensionless displacements of the two masses from rest.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplacementPair {
    /// Mass 1 (left).
    pub x1: f64,
    /// Mass 2 (right).
    pub x2: f64,
}

/// Evaluates the closed-form motion at an arbitrary time `t`.
///
/// ```text
/// x1 = a·eigen1·cos(ω1·t) − a·eigen2·cos(ω2·t)
/// x2 = a·cos(ω1·t) − a·cos(ω2·t)
/// ```
#[inline]
pub fn displacement_at(modes: &ModeSolution, scale: AmplitudeScale, t: f64) -> DisplacementPair {
    let a = scale.value();
    let mode1 = cos(modes.omega1() * t);
    let mode2 = cos(modes.omega2() * t);

    DisplacementPair {
        x1: a * modes.eigen1() * mode1 - a * modes.eigen2() * mode2,
        x2: a * mode1 - a * mode2,
    }
}

/// Fixed-step clock over a solved chain.
///
/// Each [`step`](Self::step) advances simulation time by the configured
/// step and returns the displacements at the new time. Time is kept as a
/// step count, so `elapsed()` after `n` steps is `n·Δt` with a single
/// rounding rather than `n` accumulated ones.
///
/// One evaluator belongs to one animation run; build a new one (or
/// [`reset`](Self::reset)) to start over.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvaluator {
    modes: ModeSolution,
    scale: AmplitudeScale,
    time_step: f64,
    steps: u64,
}

impl MotionEvaluator {
    /// Creates an evaluator at `t = 0` advancing by [`TIME_STEP`].
    pub const fn new(modes: ModeSolution, scale: AmplitudeScale) -> Self {
        Self::with_time_step(modes, scale, TIME_STEP)
    }

    /// Creates an evaluator at `t = 0` advancing by `time_step`.
    pub const fn with_time_step(
        modes: ModeSolution,
        scale: AmplitudeScale,
        time_step: f64,
    ) -> Self {
        Self {
            modes,
            scale,
            time_step,
            steps: 0,
        }
    }

    /// Advances time by one step and returns the new displacements.
    #[inline]
    pub fn step(&mut self) -> DisplacementPair {
        self.steps += 1;
        self.current()
    }

    /// Displacements at the current time without advancing.
    #[inline]
    pub fn current(&self) -> DisplacementPair {
        displacement_at(&self.modes, self.scale, self.elapsed())
    }

    /// Simulation time reached so far.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * self.time_step
    }

    /// Number of steps taken since construction or the last reset.
    #[inline]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Time advanced per step.
    #[inline]
    pub const fn time_step(&self) -> f64 {
        self.time_step
    }

    /// The mode solution being evaluated.
    #[inline]
    pub const fn modes(&self) -> &ModeSolution {
        &self.modes
    }

    /// The amplitude being applied.
    #[inline]
    pub const fn scale(&self) -> AmplitudeScale {
        self.scale
    }

    /// Rewinds to `t = 0`.
    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

impl Iterator for MotionEvaluator {
    type Item = DisplacementPair;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.step())
    }
}
