//! Mapping from dimensionless displacements to drawing coordinates.
//!
//! Everything here is unit-agnostic: pass a width and height in pixels for a
//! canvas or in cells for a terminal. The x axis runs left to right from the
//! left wall (`x = 0`) to the right wall (`x = width`), and the chain sits on
//! the horizontal centre line.
//!
//! # Example
//!
//! ```rust
//! use normal_modes::{DisplacementPair, Layout, PhysicalParameters};
//!
//! let layout = Layout::new(800.0, 60.0);
//! let params = PhysicalParameters::new(10.0, 10.0, 10.0, 1.0, 8.0);
//! let frame = layout.frame(&params, DisplacementPair::default());
//!
//! assert_eq!(frame.mass1.center_x, 200.0);
//! assert_eq!(frame.mass2.center_x, 600.0);
//! assert!((frame.mass2.radius - 40.0).abs() < 1e-9);
//! ```

use core::cmp::Ordering;
use core::f64::consts::PI;

use crate::math::{cbrt, sin};
use crate::motion::DisplacementPair;
use crate::params::PhysicalParameters;

/// Fraction of the width one unit of displacement moves a mass.
pub const DISPLACEMENT_SCALE: f64 = 0.136_36;

/// Rest position of mass 1 as a fraction of the width.
pub const MASS1_REST: f64 = 0.25;

/// Rest position of mass 2 as a fraction of the width.
pub const MASS2_REST: f64 = 0.75;

/// Radius of a unit mass on a pixel canvas. Radius grows with `m^(1/3)`.
pub const RADIUS_SCALE: f64 = 20.0;

/// Coil half-height as a fraction of the height.
pub const COIL_AMPLITUDE: f64 = 0.1;

/// Turns drawn on the wall springs `k1` and `k3`.
pub const WALL_SPRING_TURNS: f64 = 20.0;

/// Turns drawn on the coupling spring `k2`.
pub const COUPLING_SPRING_TURNS: f64 = 40.0;

/// Canvas width as a fraction of the hosting window width.
pub const CANVAS_WIDTH_RATIO: f64 = 0.79;

/// Canvas height as a fraction of the hosting window height.
pub const CANVAS_HEIGHT_RATIO: f64 = 0.075;

/// Drawing area and scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    width: f64,
    height: f64,
    radius_scale: f64,
}

impl Layout {
    /// Creates a layout using the pixel [`RADIUS_SCALE`].
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            radius_scale: RADIUS_SCALE,
        }
    }

    /// Sizes a canvas from a hosting window with the standard ratios.
    #[inline]
    pub fn for_window(window_width: f64, window_height: f64) -> Self {
        Self::new(
            window_width * CANVAS_WIDTH_RATIO,
            window_height * CANVAS_HEIGHT_RATIO,
        )
    }

    /// Replaces the radius of a unit mass.
    #[inline]
    pub const fn with_radius_scale(mut self, radius_scale: f64) -> Self {
        self.radius_scale = radius_scale;
        self
    }

    /// Width of the drawing area.
    #[inline]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Height of the drawing area.
    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Vertical position of the chain.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Drawn radius of a mass.
    #[inline]
    pub fn mass_radius(&self, mass: f64) -> f64 {
        self.radius_scale * cbrt(mass)
    }

    /// Horizontal centres of the two masses for a given displacement.
    #[inline]
    pub fn positions(&self, pair: DisplacementPair) -> (f64, f64) {
        let unit = DISPLACEMENT_SCALE * self.width;
        (
            pair.x1 * unit + MASS1_REST * self.width,
            pair.x2 * unit + MASS2_REST * self.width,
        )
    }

    /// Everything needed to draw one animation frame.
    pub fn frame(&self, params: &PhysicalParameters, pair: DisplacementPair) -> Frame {
        let (x1, x2) = self.positions(pair);
        let center_y = self.center_y();

        let mass1 = MassBody {
            center_x: x1,
            center_y,
            radius: self.mass_radius(params.m1()),
        };
        let mass2 = MassBody {
            center_x: x2,
            center_y,
            radius: self.mass_radius(params.m2()),
        };

        let amplitude = COIL_AMPLITUDE * self.height;
        let coil = |start: f64, end: f64, turns: f64| SpringCoil {
            start,
            end,
            center_y,
            amplitude,
            turns,
        };

        Frame {
            springs: [
                coil(0.0, mass1.left(), WALL_SPRING_TURNS),
                coil(mass1.right(), mass2.left(), COUPLING_SPRING_TURNS),
                coil(mass2.right(), self.width, WALL_SPRING_TURNS),
            ],
            mass1,
            mass2,
        }
    }
}

/// A mass drawn as a filled disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBody {
    /// Horizontal centre.
    pub center_x: f64,
    /// Vertical centre.
    pub center_y: f64,
    /// Disc radius.
    pub radius: f64,
}

impl MassBody {
    /// Leftmost x of the disc.
    #[inline]
    pub fn left(&self) -> f64 {
        self.center_x - self.radius
    }

    /// Rightmost x of the disc.
    #[inline]
    pub fn right(&self) -> f64 {
        self.center_x + self.radius
    }

    /// Whether a point lies inside the disc, stretching the vertical axis by
    /// `aspect` (2.0 for terminal cells that are twice as tall as wide).
    #[inline]
    pub fn contains(&self, x: f64, y: f64, aspect: f64) -> bool {
        let dx = x - self.center_x;
        let dy = (y - self.center_y) * aspect;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// A spring drawn as a sine wave between two x positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCoil {
    /// x where the coil starts.
    pub start: f64,
    /// x where the coil ends.
    pub end: f64,
    /// Centre line of the wave.
    pub center_y: f64,
    /// Half-height of the wave.
    pub amplitude: f64,
    /// Number of full periods over the length.
    pub turns: f64,
}

impl SpringCoil {
    /// Horizontal extent. Negative when the masses overlap the anchor.
    #[inline]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Height of the wave `distance` units from the start.
    #[inline]
    pub fn sample(&self, distance: f64) -> f64 {
        let wavenumber = 2.0 * PI * self.turns / self.length();
        self.center_y + self.amplitude * sin(wavenumber * distance)
    }

    /// Points along the coil at unit spacing, starting at `start`.
    ///
    /// Yields nothing when the coil has no positive length.
    pub fn points(&self) -> CoilPoints {
        CoilPoints {
            coil: *self,
            distance: 0.0,
        }
    }
}

/// Iterator returned by [`SpringCoil::points`].
#[derive(Debug, Clone)]
pub struct CoilPoints {
    coil: SpringCoil,
    distance: f64,
}

impl Iterator for CoilPoints {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        // NaN lengths end the iteration too.
        if self.distance.partial_cmp(&self.coil.length()) != Some(Ordering::Less) {
            return None;
        }
        let point = (
            self.coil.start + self.distance,
            self.coil.sample(self.distance),
        );
        self.distance += 1.0;
        Some(point)
    }
}

/// Drawable state of the chain at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Left mass.
    pub mass1: MassBody,
    /// Right mass.
    pub mass2: MassBody,
    /// `k1`, `k2` and `k3`, left to right.
    pub springs: [SpringCoil; 3],
}
