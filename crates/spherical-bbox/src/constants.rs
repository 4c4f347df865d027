//! Shared constants for spherical bounds.

use std::f64::consts::{FRAC_PI_2, PI};

/// Angular distance (radians) within which an element edge counts as lying on a
/// pole, the equator, or a cartesian axis direction.
///
/// Grid edges generated with `linspace`-style arithmetic land a few ulps away
/// from the special angles; 1e-10 rad is far above that noise and far below any
/// realistic cell width.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 1e-10;

/// Batches at least this large are processed with rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Azimuths of the in-plane axis directions: `(phi, cartesian axis, sign)`.
///
/// At `phi = 0` the element reaches furthest along +x, at `pi/2` along +y, and so on.
pub(crate) const AXIS_DIRECTIONS: [(f64, usize, f64); 4] = [
    (0.0, 0, 1.0),
    (FRAC_PI_2, 1, 1.0),
    (PI, 0, -1.0),
    (3.0 * FRAC_PI_2, 1, -1.0),
];
