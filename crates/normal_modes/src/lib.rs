#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::similar_names)]

//! # Normal Modes
//!
//! Closed-form normal modes of a two-mass, three-spring chain and the
//! motion they produce.
//!
//! ```text
//! |wall|--k1--(m1)--k2--(m2)--k3--|wall|
//! ```
//!
//! The crate provides:
//! - **[`solve_modes`]**: eigenfrequencies and eigenvectors from `k1, k2, k3, m1, m2`
//! - **[`compute_amplitude`]**: the common mode amplitude for a given start displacement
//! - **[`MotionEvaluator`]**: a fixed-step clock yielding both displacements per frame
//! - **[`Layout`]**: mapping of displacements onto a canvas of any size
//!
//! ## Example
//!
//! ```rust
//! use normal_modes::{compute_amplitude, solve_modes, MotionEvaluator, PhysicalParameters,
//!     REFERENCE_DISPLACEMENT};
//!
//! // Solve once per parameter set
//! let params = PhysicalParameters::new(10.0, 10.0, 10.0, 1.0, 1.0);
//! let modes = solve_modes(params).unwrap();
//! let scale = compute_amplitude(modes, REFERENCE_DISPLACEMENT).unwrap();
//!
//! // Step once per animation frame
//! let mut evaluator = MotionEvaluator::new(modes, scale);
//! let pair = evaluator.step();
//! assert!(pair.x1.abs() <= 1.0 + 1e-12);
//! ```
//!
//! ## Mode Ordering
//!
//! Mode 1 is the faster mode (`omega1 > omega2`). For a symmetric chain it is
//! the out-of-phase mode (`eigen1 = -1`) and mode 2 the in-phase one
//! (`eigen2 = 1`).
//!
//! ## Degenerate Parameters
//!
//! A zero coupling spring, non-positive or non-finite inputs, and any
//! parameter set for which the closed form breaks down are reported as
//! [`DegenerateSystemError`]. Once a [`ModeSolution`] exists, stepping the
//! motion cannot fail.

mod error;
mod geometry;
mod math;
mod modes;
mod motion;
mod params;

pub use error::DegenerateSystemError;
pub use geometry::{
    CANVAS_HEIGHT_RATIO, CANVAS_WIDTH_RATIO, COIL_AMPLITUDE, COUPLING_SPRING_TURNS, CoilPoints,
    DISPLACEMENT_SCALE, Frame, Layout, MASS1_REST, MASS2_REST, MassBody, RADIUS_SCALE,
    SpringCoil, WALL_SPRING_TURNS,
};
pub use modes::{Characteristic, ModeSolution, solve_modes};
pub use motion::{
    AmplitudeScale, DisplacementPair, MotionEvaluator, REFERENCE_DISPLACEMENT, TIME_STEP,
    compute_amplitude, displacement_at,
};
pub use params::{PARAMETER_NAMES, PhysicalParameters};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::DegenerateSystemError;
    pub use crate::geometry::Layout;
    pub use crate::modes::{ModeSolution, solve_modes};
    pub use crate::motion::{
        AmplitudeScale, DisplacementPair, MotionEvaluator, REFERENCE_DISPLACEMENT, TIME_STEP,
        compute_amplitude,
    };
    pub use crate::params::PhysicalParameters;
}
