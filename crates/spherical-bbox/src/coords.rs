//! Spherical <-> cartesian conversion.

use glam::DVec3;
use std::f64::consts::TAU;

use crate::types::Spherical;

/// `x = r sin(theta) cos(phi)`, `y = r sin(theta) sin(phi)`, `z = r cos(theta)`.
#[inline]
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> DVec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let r_xy = r * sin_theta;
    DVec3::new(r_xy * cos_phi, r_xy * sin_phi, r * cos_theta)
}

/// Inverse of [`spherical_to_cartesian`], with `phi` in `[0, 2pi)`.
///
/// The origin maps to `theta = 0`. On the z-axis `phi` is whatever `atan2`
/// returns for a zero in-plane component, which is 0 or pi.
#[inline]
pub fn cartesian_to_spherical(p: DVec3) -> Spherical {
    let r = p.length();
    let theta = if r > 0.0 {
        (p.z / r).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    Spherical::new(r, theta, wrap_phi(p.y.atan2(p.x)))
}

/// Map an azimuth into `[0, 2pi)`.
#[inline]
pub fn wrap_phi(phi: f64) -> f64 {
    let wrapped = phi.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// [`Spherical::to_cartesian`] over a batch.
pub fn spherical_to_cartesian_batch(points: &[Spherical]) -> Vec<DVec3> {
    points.iter().map(|s| s.to_cartesian()).collect()
}

/// [`cartesian_to_spherical`] over a batch.
pub fn cartesian_to_spherical_batch(points: &[DVec3]) -> Vec<Spherical> {
    points.iter().map(|&p| cartesian_to_spherical(p)).collect()
}
