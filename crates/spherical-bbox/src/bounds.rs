//! Bounding boxes of spherical elements.
//!
//! The box of each element starts from its 8 corners and is then widened by a
//! fixed sequence of correction passes, each a masked update over the whole
//! batch:
//!
//! 1. equator: when the theta range contains `pi/2` the in-plane radius peaks
//!    at `r_hi` between the corners;
//! 2. poles: a theta range touching 0 (or `pi`) reaches `z = r_hi` (or `-r_hi`)
//!    and the z-axis itself, so `x = y = 0` is inside the element;
//! 3. axis directions: a phi range containing `0`, `pi/2`, `pi` or `3pi/2`
//!    reaches the largest in-plane radius along `±x` or `±y`.
//!
//! Together these give the exact extent: along z the element is monotone in
//! theta, and in the x-y plane it is an annular sector whose radial extent is
//! `[r_lo * min(sin), r_hi * max(sin)]` over the theta range.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::constants::{AXIS_DIRECTIONS, DEFAULT_ANGLE_TOLERANCE, DEFAULT_PARALLEL_THRESHOLD};
use crate::error::{check_lengths, BoundsError};
use crate::types::{CartesianBBox, Spherical, SphericalElement};

/// Configuration for [`SphericalBoundsEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Edges within this many radians of a special angle are treated as lying on it.
    pub angle_tolerance: f64,
    /// Minimum batch size for parallel processing.
    pub parallel_threshold: usize,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Computes cartesian bounding boxes for batches of spherical elements.
///
/// The engine is stateless apart from its configuration; every call is a pure
/// function of its inputs and results do not depend on whether the batch was
/// processed in parallel.
#[derive(Debug, Clone, Default)]
pub struct SphericalBoundsEngine {
    config: BoundsConfig,
}

type Correction = fn(&SphericalElement, &mut CartesianBBox, f64) -> bool;

const CORRECTIONS: [(&str, Correction); 3] = [
    ("equator", equatorial_bulge),
    ("pole", pole_contact),
    ("axis", axis_crossings),
];

impl SphericalBoundsEngine {
    pub fn new(config: BoundsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoundsConfig {
        &self.config
    }

    /// Bounding boxes of elements given by center and full width.
    ///
    /// Edges are derived as `center ∓ width / 2`, so this agrees exactly with
    /// [`cartesian_bboxes_edges`](Self::cartesian_bboxes_edges) on the same edges.
    pub fn cartesian_bboxes(
        &self,
        r: &[f64],
        theta: &[f64],
        phi: &[f64],
        dr: &[f64],
        dtheta: &[f64],
        dphi: &[f64],
    ) -> Result<Vec<CartesianBBox>, BoundsError> {
        let n = check_lengths(&[
            ("r", r.len()),
            ("theta", theta.len()),
            ("phi", phi.len()),
            ("dr", dr.len()),
            ("dtheta", dtheta.len()),
            ("dphi", dphi.len()),
        ])?;

        let elements: Vec<SphericalElement> = (0..n)
            .map(|i| {
                SphericalElement::from_center_width(
                    Spherical::new(r[i], theta[i], phi[i]),
                    Spherical::new(dr[i], dtheta[i], dphi[i]),
                )
            })
            .collect();

        Ok(self.element_bboxes(&elements))
    }

    /// Bounding boxes of elements given by left and right edges.
    ///
    /// The returned boxes' `min`/`max` are the cartesian left/right edges.
    pub fn cartesian_bboxes_edges(
        &self,
        r_lo: &[f64],
        theta_lo: &[f64],
        phi_lo: &[f64],
        r_hi: &[f64],
        theta_hi: &[f64],
        phi_hi: &[f64],
    ) -> Result<Vec<CartesianBBox>, BoundsError> {
        let n = check_lengths(&[
            ("r_lo", r_lo.len()),
            ("theta_lo", theta_lo.len()),
            ("phi_lo", phi_lo.len()),
            ("r_hi", r_hi.len()),
            ("theta_hi", theta_hi.len()),
            ("phi_hi", phi_hi.len()),
        ])?;

        let elements: Vec<SphericalElement> = (0..n)
            .map(|i| {
                SphericalElement::from_edges(
                    Spherical::new(r_lo[i], theta_lo[i], phi_lo[i]),
                    Spherical::new(r_hi[i], theta_hi[i], phi_hi[i]),
                )
            })
            .collect();

        Ok(self.element_bboxes(&elements))
    }

    /// Bounding boxes of a batch of elements, one per element, in input order.
    pub fn element_bboxes(&self, elements: &[SphericalElement]) -> Vec<CartesianBBox> {
        let parallel = elements.len() >= self.config.parallel_threshold;
        let tol = self.config.angle_tolerance;

        let elements: Vec<SphericalElement> = if parallel {
            elements.par_iter().map(SphericalElement::canonical).collect()
        } else {
            elements.iter().map(SphericalElement::canonical).collect()
        };

        let mut boxes: Vec<CartesianBBox> = if parallel {
            elements.par_iter().map(corner_bbox).collect()
        } else {
            elements.iter().map(corner_bbox).collect()
        };

        for (name, correction) in CORRECTIONS {
            let applied: usize = if parallel {
                boxes
                    .par_iter_mut()
                    .zip(elements.par_iter())
                    .map(|(bbox, element)| correction(element, bbox, tol) as usize)
                    .sum()
            } else {
                boxes
                    .iter_mut()
                    .zip(&elements)
                    .map(|(bbox, element)| correction(element, bbox, tol) as usize)
                    .sum()
            };
            log::trace!("{} correction applied to {}/{} elements", name, applied, elements.len());
        }

        boxes
    }

    /// Bounding box of a single element.
    pub fn element_bbox(&self, element: &SphericalElement) -> CartesianBBox {
        let element = element.canonical();
        let mut bbox = corner_bbox(&element);
        for (_, correction) in CORRECTIONS {
            correction(&element, &mut bbox, self.config.angle_tolerance);
        }
        bbox
    }
}

fn corner_bbox(element: &SphericalElement) -> CartesianBBox {
    let mut bbox = CartesianBBox::EMPTY;
    for corner in element.corners() {
        bbox.include(corner);
    }
    bbox
}

#[inline]
fn contains_equator(element: &SphericalElement, tol: f64) -> bool {
    element.lo.theta - tol <= FRAC_PI_2 && FRAC_PI_2 <= element.hi.theta + tol
}

/// Largest distance from the z-axis reached by the element.
#[inline]
fn max_in_plane_radius(element: &SphericalElement, tol: f64) -> f64 {
    if contains_equator(element, tol) {
        element.hi.r
    } else {
        element.hi.r * element.lo.theta.sin().max(element.hi.theta.sin())
    }
}

/// True if `angle + 2pi k` lies in `[lo - tol, hi + tol]` for some integer `k`.
#[inline]
fn crosses_azimuth(lo: f64, hi: f64, angle: f64, tol: f64) -> bool {
    if hi - lo >= TAU - tol {
        return true;
    }
    let k = ((lo - tol - angle) / TAU).ceil();
    angle + k * TAU <= hi + tol
}

fn equatorial_bulge(element: &SphericalElement, bbox: &mut CartesianBBox, tol: f64) -> bool {
    if !contains_equator(element, tol) {
        return false;
    }
    let r = element.hi.r;
    for phi in [element.lo.phi, element.hi.phi] {
        let (sin_phi, cos_phi) = phi.sin_cos();
        bbox.include_axis(0, r * cos_phi);
        bbox.include_axis(1, r * sin_phi);
    }
    true
}

fn pole_contact(element: &SphericalElement, bbox: &mut CartesianBBox, tol: f64) -> bool {
    let north = element.lo.theta <= tol;
    let south = element.hi.theta >= PI - tol;
    if north {
        bbox.max.z = element.hi.r;
    }
    if south {
        bbox.min.z = -element.hi.r;
    }
    if north || south {
        bbox.include_axis(0, 0.0);
        bbox.include_axis(1, 0.0);
    }
    north || south
}

fn axis_crossings(element: &SphericalElement, bbox: &mut CartesianBBox, tol: f64) -> bool {
    let mut crossed = false;
    let mut rho_max = None;
    for (angle, axis, sign) in AXIS_DIRECTIONS {
        if crosses_azimuth(element.lo.phi, element.hi.phi, angle, tol) {
            let rho = *rho_max.get_or_insert_with(|| max_in_plane_radius(element, tol));
            bbox.include_axis(axis, sign * rho);
            crossed = true;
        }
    }
    crossed
}
