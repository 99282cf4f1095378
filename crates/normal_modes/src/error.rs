//! Error type for the normal-mode solver.

use thiserror::Error;

/// The supplied parameters do not admit a valid two-mode decomposition.
///
/// Every variant names the algebraic precondition that failed. None of them
/// are transient: the caller has to supply a different parameter set.
///
/// # Example
///
/// ```rust
/// use normal_modes::{solve_modes, DegenerateSystemError, PhysicalParameters};
///
/// let uncoupled = PhysicalParameters::new(10.0, 0.0, 10.0, 1.0, 1.0);
/// assert_eq!(solve_modes(uncoupled), Err(DegenerateSystemError::ZeroCoupling));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateSystemError {
    /// A parameter was NaN, infinite, zero or negative.
    #[error("parameter {name} must be finite and strictly positive, got {value}")]
    InvalidParameter {
        /// Parameter name (`k1`, `k2`, `k3`, `m1` or `m2`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The coupling spring `k2` is zero, so the two masses are independent
    /// oscillators and the eigenvector normalization divides by zero.
    #[error("coupling stiffness k2 is zero; the masses oscillate independently")]
    ZeroCoupling,

    /// `B1² − 4·B2` is negative: the characteristic equation has no real roots.
    #[error("negative discriminant {discriminant:e}; no real eigenvalues")]
    NegativeDiscriminant {
        /// The computed discriminant.
        discriminant: f64,
    },

    /// An eigenvalue came out positive, which is a growing rather than an
    /// oscillating solution.
    #[error("eigenvalue {eigenvalue:e} is positive; mode does not oscillate")]
    NonOscillatoryRoot {
        /// The offending eigenvalue.
        eigenvalue: f64,
    },

    /// Both modes share the same eigenvector component, so they cannot be
    /// separated by the amplitude normalization.
    #[error("eigenvector components coincide ({eigen}); modes are not separable")]
    CoincidentEigenvectors {
        /// The shared component.
        eigen: f64,
    },

    /// `eigen1 − eigen2` is zero or the resulting amplitude is not finite.
    #[error("amplitude denominator {denominator} is zero or not finite")]
    InvalidAmplitude {
        /// The computed `eigen1 − eigen2`.
        denominator: f64,
    },

    /// An intermediate result overflowed or became NaN.
    #[error("non-finite value in {quantity}")]
    NonFinite {
        /// Which quantity went non-finite.
        quantity: &'static str,
    },
}
