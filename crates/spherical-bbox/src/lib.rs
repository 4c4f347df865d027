//! Cartesian bounding boxes for spherical volume elements.
//!
//! A spherical element spans `[r_lo, r_hi] x [theta_lo, theta_hi] x [phi_lo, phi_hi]`
//! with `theta` the colatitude measured from the +z pole and `phi` the azimuth in
//! the x-y plane. Its image in cartesian space is bounded by spherical shells,
//! cones and half-planes, so the tightest axis-aligned box is not simply the box
//! around its eight corners: elements touching a pole, the equator or one of the
//! `±x`/`±y` directions bulge past their corners.
//!
//! # Example
//!
//! ```
//! use spherical_bbox::{cartesian_bboxes, Spherical, SphericalElement};
//!
//! // A thin shell element sitting on the north pole.
//! let bboxes = cartesian_bboxes(&[0.95], &[0.05], &[0.05], &[0.1], &[0.1], &[0.05])
//!     .expect("slices have equal lengths");
//!
//! assert_eq!(bboxes[0].max.z, 1.0);
//! assert!(bboxes[0].min.x.abs() < 1e-12);
//!
//! let element = SphericalElement::from_center_width(
//!     Spherical::new(0.95, 0.05, 0.05),
//!     Spherical::new(0.1, 0.1, 0.05),
//! );
//! assert_eq!(element.hi.r, 1.0);
//! ```

mod bounds;
mod constants;
mod coords;
mod error;
mod types;

pub use bounds::{BoundsConfig, SphericalBoundsEngine};
pub use constants::{DEFAULT_ANGLE_TOLERANCE, DEFAULT_PARALLEL_THRESHOLD};
pub use coords::{
    cartesian_to_spherical, cartesian_to_spherical_batch, spherical_to_cartesian,
    spherical_to_cartesian_batch, wrap_phi,
};
pub use error::BoundsError;
pub use types::{CartesianBBox, Spherical, SphericalElement};

/// Bounding boxes from element centers and full widths, with default settings.
///
/// Equivalent to [`SphericalBoundsEngine::cartesian_bboxes`] on a default engine.
pub fn cartesian_bboxes(
    r: &[f64],
    theta: &[f64],
    phi: &[f64],
    dr: &[f64],
    dtheta: &[f64],
    dphi: &[f64],
) -> Result<Vec<CartesianBBox>, BoundsError> {
    SphericalBoundsEngine::default().cartesian_bboxes(r, theta, phi, dr, dtheta, dphi)
}

/// Bounding boxes from element left/right edges, with default settings.
///
/// The `min`/`max` corners of the returned boxes are the cartesian left and
/// right edges.
pub fn cartesian_bboxes_edges(
    r_lo: &[f64],
    theta_lo: &[f64],
    phi_lo: &[f64],
    r_hi: &[f64],
    theta_hi: &[f64],
    phi_hi: &[f64],
) -> Result<Vec<CartesianBBox>, BoundsError> {
    SphericalBoundsEngine::default()
        .cartesian_bboxes_edges(r_lo, theta_lo, phi_lo, r_hi, theta_hi, phi_hi)
}
