use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use crate::coords::spherical_to_cartesian;

/// A position in spherical coordinates.
///
/// `theta` is the colatitude (0 at the +z pole, `pi` at the -z pole) and `phi`
/// the azimuth measured from +x towards +y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Spherical {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

impl Spherical {
    #[inline]
    pub const fn new(r: f64, theta: f64, phi: f64) -> Self {
        Self { r, theta, phi }
    }

    #[inline]
    pub fn to_cartesian(self) -> DVec3 {
        spherical_to_cartesian(self.r, self.theta, self.phi)
    }
}

/// A curved volume element spanning `[lo, hi]` along each spherical axis.
///
/// Edges are the primitive representation. The center/width form converts with
/// `lo = center - width / 2` and `hi = center + width / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalElement {
    pub lo: Spherical,
    pub hi: Spherical,
}

impl SphericalElement {
    #[inline]
    pub const fn from_edges(lo: Spherical, hi: Spherical) -> Self {
        Self { lo, hi }
    }

    /// Build an element from its center and full widths.
    #[inline]
    pub fn from_center_width(center: Spherical, width: Spherical) -> Self {
        Self {
            lo: Spherical::new(
                center.r - width.r / 2.0,
                center.theta - width.theta / 2.0,
                center.phi - width.phi / 2.0,
            ),
            hi: Spherical::new(
                center.r + width.r / 2.0,
                center.theta + width.theta / 2.0,
                center.phi + width.phi / 2.0,
            ),
        }
    }

    pub fn center(&self) -> Spherical {
        Spherical::new(
            (self.lo.r + self.hi.r) / 2.0,
            (self.lo.theta + self.hi.theta) / 2.0,
            (self.lo.phi + self.hi.phi) / 2.0,
        )
    }

    pub fn width(&self) -> Spherical {
        Spherical::new(
            self.hi.r - self.lo.r,
            self.hi.theta - self.lo.theta,
            self.hi.phi - self.lo.phi,
        )
    }

    /// Order each edge pair and clamp theta into `[0, pi]`.
    ///
    /// `r` and `theta` edges given high-to-low are swapped. A `phi` range with
    /// `hi < lo` is read as wrapping through `phi = 0`, so `hi` is shifted by a
    /// full turn.
    pub fn canonical(&self) -> Self {
        let (r_lo, r_hi) = ordered(self.lo.r, self.hi.r);
        let (theta_lo, theta_hi) = ordered(self.lo.theta, self.hi.theta);
        let phi_hi = if self.hi.phi < self.lo.phi {
            self.hi.phi + TAU
        } else {
            self.hi.phi
        };
        Self {
            lo: Spherical::new(r_lo, theta_lo.max(0.0), self.lo.phi),
            hi: Spherical::new(r_hi, theta_hi.min(PI), phi_hi),
        }
    }

    /// Cartesian positions of the 8 corners of the `(r, theta, phi)` box.
    pub fn corners(&self) -> [DVec3; 8] {
        let rs = [self.lo.r, self.hi.r];
        let thetas = [self.lo.theta, self.hi.theta];
        let phis = [self.lo.phi, self.hi.phi];
        std::array::from_fn(|i| {
            spherical_to_cartesian(rs[i & 1], thetas[(i >> 1) & 1], phis[i >> 2])
        })
    }
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// An axis-aligned cartesian box stored by its left (`min`) and right (`max`) edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianBBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl CartesianBBox {
    /// A box containing nothing; any included point replaces both edges.
    pub const EMPTY: Self = Self {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_width(center: DVec3, width: DVec3) -> Self {
        Self {
            min: center - width / 2.0,
            max: center + width / 2.0,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.max + self.min) / 2.0
    }

    #[inline]
    pub fn width(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Grow the box to contain `p`.
    #[inline]
    pub fn include(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box along a single axis to contain `value`.
    #[inline]
    pub fn include_axis(&mut self, axis: usize, value: f64) {
        self.min[axis] = self.min[axis].min(value);
        self.max[axis] = self.max[axis].max(value);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True if `p` is inside the box grown by `tol` on every side.
    pub fn contains(&self, p: DVec3, tol: f64) -> bool {
        p.cmpge(self.min - tol).all() && p.cmple(self.max + tol).all()
    }
}

impl Default for CartesianBBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_width_roundtrip() {
        let element = SphericalElement::from_edges(
            Spherical::new(0.5, 0.25, 1.0),
            Spherical::new(0.75, 0.5, 1.5),
        );
        let rebuilt = SphericalElement::from_center_width(element.center(), element.width());
        assert_eq!(rebuilt, element);
    }

    #[test]
    fn test_canonical_orders_and_clamps() {
        let element = SphericalElement::from_edges(
            Spherical::new(1.0, 0.2, 6.0),
            Spherical::new(0.5, -1e-17, 0.2),
        );
        let c = element.canonical();
        assert_eq!((c.lo.r, c.hi.r), (0.5, 1.0));
        assert_eq!((c.lo.theta, c.hi.theta), (0.0, 0.2));
        assert_eq!(c.lo.phi, 6.0);
        assert!((c.hi.phi - (0.2 + TAU)).abs() < 1e-15);
    }

    #[test]
    fn test_corners_cover_all_combinations() {
        let element = SphericalElement::from_edges(
            Spherical::new(1.0, PI / 2.0, 0.0),
            Spherical::new(2.0, PI / 2.0, PI / 2.0),
        );
        let corners = element.corners();
        let radii: Vec<f64> = corners.iter().map(|c| c.length()).collect();
        assert_eq!(radii.iter().filter(|&&r| (r - 1.0).abs() < 1e-12).count(), 4);
        assert_eq!(radii.iter().filter(|&&r| (r - 2.0).abs() < 1e-12).count(), 4);
        assert!(corners.iter().any(|c| (c.y - 2.0).abs() < 1e-12));
        assert!(corners.iter().any(|c| (c.x - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_bbox_include_and_empty() {
        let mut bbox = CartesianBBox::EMPTY;
        assert!(bbox.is_empty());
        bbox.include(DVec3::new(1.0, -2.0, 0.5));
        bbox.include(DVec3::new(-1.0, 2.0, 0.5));
        assert!(!bbox.is_empty());
        assert_eq!(bbox.center(), DVec3::new(0.0, 0.0, 0.5));
        assert_eq!(bbox.width(), DVec3::new(2.0, 4.0, 0.0));

        bbox.include_axis(2, -0.5);
        assert_eq!(bbox.min.z, -0.5);
        assert_eq!(bbox.max.z, 0.5);
        assert!(bbox.contains(DVec3::ZERO, 0.0));
        assert!(!bbox.contains(DVec3::new(0.0, 0.0, 0.6), 0.05));

        let rebuilt = CartesianBBox::from_center_width(bbox.center(), bbox.width());
        assert_eq!(rebuilt, bbox);
    }
}
