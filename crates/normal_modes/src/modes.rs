//! Closed-form normal modes of the two-mass, three-spring chain.
//!
//! The equations of motion
//!
//! ```text
//! m1·x1'' = −(k1 + k2)·x1 + k2·x2
//! m2·x2'' =  k2·x1 − (k2 + k3)·x2
//! ```
//!
//! have solutions `x = v·cos(ω·t)` whenever `μ = m1·m2·ω²` is a root of the
//! characteristic equation
//!
//! ```text
//! μ² − B1·μ + B2 = 0
//! B1 = k1·m2 + k2·m1 + k2·m2 + k3·m1
//! B2 = (k1·k2 + k1·k3 + k2·k3)·m1·m2
//! ```
//!
//! Both the eigenvalues `λ = −μ / (m1·m2)` and the eigenvector components
//! `v1 = (m1·(k2 + k3) − μ) / (k2·m1)` (with `v2 = 1`) come from the same two
//! roots, so they are computed once by [`Characteristic::roots`].

use tracing::{debug, warn};

use crate::error::DegenerateSystemError;
use crate::math::sqrt;
use crate::params::PhysicalParameters;

/// Monic quadratic `μ² − sum·μ + product = 0` with real coefficients.
///
/// # Example
///
/// ```rust
/// use normal_modes::Characteristic;
///
/// // μ² − 40μ + 300 = (μ − 30)(μ − 10)
/// let roots = Characteristic::new(40.0, 300.0).roots().unwrap();
/// assert_eq!(roots, (30.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristic {
    sum: f64,
    product: f64,
}

impl Characteristic {
    /// Creates the equation from the sum and product of its roots.
    #[inline]
    pub const fn new(sum: f64, product: f64) -> Self {
        Self { sum, product }
    }

    /// `sum² − 4·product`.
    #[inline]
    pub fn discriminant(&self) -> f64 {
        self.sum * self.sum - 4.0 * self.product
    }

    /// Returns the two real roots as `(upper, lower)`.
    ///
    /// # Errors
    ///
    /// [`DegenerateSystemError::NegativeDiscriminant`] when the roots are
    /// complex, [`DegenerateSystemError::NonFinite`] when the coefficients
    /// overflow.
    pub fn roots(&self) -> Result<(f64, f64), DegenerateSystemError> {
        let discriminant = self.discriminant();
        if discriminant.is_nan() || discriminant.is_infinite() {
            return Err(DegenerateSystemError::NonFinite {
                quantity: "discriminant",
            });
        }
        if discriminant < 0.0 {
            return Err(DegenerateSystemError::NegativeDiscriminant { discriminant });
        }

        let root = sqrt(discriminant);
        Ok((0.5 * (self.sum + root), 0.5 * (self.sum - root)))
    }
}

/// Eigenfrequencies and eigenvector components of the two normal modes.
///
/// Mode `i` moves the masses in the ratio `(eigen_i, 1)` at angular
/// frequency `omega_i`. Mode 1 is taken from the upper root of the
/// characteristic equation, so `omega1 > omega2` for every solution produced
/// by [`solve_modes`], which is the only way to obtain one outside this
/// crate. With the `serde` feature a solution can be serialized for reports
/// but not deserialized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModeSolution {
    omega1: f64,
    omega2: f64,
    eigen1: f64,
    eigen2: f64,
}

impl ModeSolution {
    /// Builds a solution without any checks, for exercising the amplitude
    /// guards on values [`solve_modes`] never returns.
    #[cfg(test)]
    pub(crate) const fn from_parts(omega1: f64, omega2: f64, eigen1: f64, eigen2: f64) -> Self {
        Self {
            omega1,
            omega2,
            eigen1,
            eigen2,
        }
    }

    /// Angular frequency of mode 1.
    #[inline]
    pub const fn omega1(&self) -> f64 {
        self.omega1
    }

    /// Angular frequency of mode 2.
    #[inline]
    pub const fn omega2(&self) -> f64 {
        self.omega2
    }

    /// First eigenvector component of mode 1.
    #[inline]
    pub const fn eigen1(&self) -> f64 {
        self.eigen1
    }

    /// First eigenvector component of mode 2.
    #[inline]
    pub const fn eigen2(&self) -> f64 {
        self.eigen2
    }

    /// Full eigenvectors `[(eigen1, 1), (eigen2, 1)]`.
    pub const fn eigenvectors(&self) -> [(f64, f64); 2] {
        [(self.eigen1, 1.0), (self.eigen2, 1.0)]
    }
}

/// Solves the chain for its two normal modes.
///
/// # Errors
///
/// Returns [`DegenerateSystemError`] when a parameter is not finite and
/// strictly positive, when `k2` is zero, or when the closed form breaks
/// down (negative discriminant, positive eigenvalue, coincident
/// eigenvectors, overflow).
///
/// # Example
///
/// ```rust
/// use normal_modes::{solve_modes, PhysicalParameters};
///
/// let modes = solve_modes(PhysicalParameters::new(10.0, 10.0, 10.0, 1.0, 1.0)).unwrap();
/// assert!((modes.omega1() - 30f64.sqrt()).abs() < 1e-12);
/// assert!((modes.omega2() - 10f64.sqrt()).abs() < 1e-12);
/// ```
pub fn solve_modes(params: PhysicalParameters) -> Result<ModeSolution, DegenerateSystemError> {
    let result = solve(params);
    match &result {
        Ok(modes) => debug!(
            omega1 = modes.omega1,
            omega2 = modes.omega2,
            eigen1 = modes.eigen1,
            eigen2 = modes.eigen2,
            "normal modes solved"
        ),
        Err(err) => warn!(error = %err, "degenerate parameter set"),
    }
    result
}

fn solve(params: PhysicalParameters) -> Result<ModeSolution, DegenerateSystemError> {
    for (name, value) in params.fields() {
        if name == "k2" && value == 0.0 {
            return Err(DegenerateSystemError::ZeroCoupling);
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(DegenerateSystemError::InvalidParameter { name, value });
        }
    }

    let (k1, k2, k3) = (params.k1(), params.k2(), params.k3());
    let (m1, m2) = (params.m1(), params.m2());
    let mass_product = m1 * m2;

    let characteristic = Characteristic::new(
        k1 * m2 + k2 * m1 + k2 * m2 + k3 * m1,
        k1 * k2 * mass_product + k1 * k3 * mass_product + k2 * k3 * mass_product,
    );
    let (upper, lower) = characteristic.roots()?;

    let lambda1 = -upper / mass_product;
    let lambda2 = -lower / mass_product;
    for eigenvalue in [lambda1, lambda2] {
        if eigenvalue > 0.0 {
            return Err(DegenerateSystemError::NonOscillatoryRoot { eigenvalue });
        }
    }

    let diagonal = m1 * (k2 + k3);
    let normalizer = k2 * m1;
    let modes = ModeSolution {
        omega1: sqrt(-lambda1),
        omega2: sqrt(-lambda2),
        eigen1: (diagonal - upper) / normalizer,
        eigen2: (diagonal - lower) / normalizer,
    };

    let quantities = [
        ("omega1", modes.omega1),
        ("omega2", modes.omega2),
        ("eigen1", modes.eigen1),
        ("eigen2", modes.eigen2),
    ];
    for (quantity, value) in quantities {
        if !value.is_finite() {
            return Err(DegenerateSystemError::NonFinite { quantity });
        }
    }
    if modes.eigen1 == modes.eigen2 {
        return Err(DegenerateSystemError::CoincidentEigenvectors {
            eigen: modes.eigen1,
        });
    }

    Ok(modes)
}
