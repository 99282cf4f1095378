//! Physical parameters of the mass-spring chain.

/// Names of the five parameters, in the order returned by
/// [`PhysicalParameters::fields`].
pub const PARAMETER_NAMES: [&str; 5] = ["k1", "k2", "k3", "m1", "m2"];

/// Stiffnesses and masses of a wall–k1–m1–k2–m2–k3–wall chain.
///
/// `k1` and `k3` tie the masses to the fixed walls, `k2` couples the two
/// masses. The value is immutable once built; [`solve_modes`] rejects any
/// field that is not finite and strictly positive, and hosts are expected
/// to apply their own sanity window before getting that far.
///
/// [`solve_modes`]: crate::solve_modes
///
/// # Example
///
/// ```rust
/// use normal_modes::PhysicalParameters;
///
/// let params = PhysicalParameters::new(10.0, 10.0, 10.0, 1.0, 1.0);
/// assert_eq!(params.k2(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalParameters {
    k1: f64,
    k2: f64,
    k3: f64,
    m1: f64,
    m2: f64,
}

impl PhysicalParameters {
    /// Creates a parameter set. Values are checked when solved, not here.
    #[inline]
    pub const fn new(k1: f64, k2: f64, k3: f64, m1: f64, m2: f64) -> Self {
        Self { k1, k2, k3, m1, m2 }
    }

    /// Left wall spring stiffness.
    #[inline]
    pub const fn k1(&self) -> f64 {
        self.k1
    }

    /// Coupling spring stiffness.
    #[inline]
    pub const fn k2(&self) -> f64 {
        self.k2
    }

    /// Right wall spring stiffness.
    #[inline]
    pub const fn k3(&self) -> f64 {
        self.k3
    }

    /// Left mass.
    #[inline]
    pub const fn m1(&self) -> f64 {
        self.m1
    }

    /// Right mass.
    #[inline]
    pub const fn m2(&self) -> f64 {
        self.m2
    }

    /// All five values paired with their names, in `k1, k2, k3, m1, m2` order.
    pub const fn fields(&self) -> [(&'static str, f64); 5] {
        [
            (PARAMETER_NAMES[0], self.k1),
            (PARAMETER_NAMES[1], self.k2),
            (PARAMETER_NAMES[2], self.k3),
            (PARAMETER_NAMES[3], self.m1),
            (PARAMETER_NAMES[4], self.m2),
        ]
    }

    /// The same chain seen in a mirror: `(k1, m1)` swapped with `(k3, m2)`.
    pub const fn mirrored(&self) -> Self {
        Self {
            k1: self.k3,
            k2: self.k2,
            k3: self.k1,
            m1: self.m2,
            m2: self.m1,
        }
    }
}
