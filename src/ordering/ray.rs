//! Projection and sorting of points along a ray.
//!
//! Blended primitives (grid blocks, particles) composite correctly only when
//! drawn in order of depth. Depth here is the scalar projection of each
//! primitive's center onto the camera ray, `(p - origin) · dir`.

use glam::DVec3;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use thiserror::Error;

/// Batches at least this large are projected and sorted with rayon.
pub const DEFAULT_SORT_PARALLEL_THRESHOLD: usize = 16_384;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RayError {
    #[error("points must be at most a 2D array of shape (N, 3), found {0:?}")]
    Rank(Vec<usize>),
    #[error("points must have shape (3,) or (N, 3), found {shape:?} with {len} values")]
    Shape { shape: Vec<usize>, len: usize },
    #[error("camera position and focus coincide, no view direction")]
    DegenerateRay,
}

/// Order in which sorted primitives are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawOrder {
    /// Nearest projection first.
    FrontToBack,
    /// Farthest projection first.
    #[default]
    BackToFront,
}

impl From<bool> for DrawOrder {
    /// `true` means back-to-front.
    fn from(back_to_front: bool) -> Self {
        if back_to_front {
            DrawOrder::BackToFront
        } else {
            DrawOrder::FrontToBack
        }
    }
}

/// Distances along the ray, one per input point, or a single value for a
/// single point.
#[derive(Debug, Clone, PartialEq)]
pub enum RayDistances {
    Single(f64),
    Batch(Vec<f64>),
}

impl RayDistances {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            RayDistances::Single(t) => std::slice::from_ref(t),
            RayDistances::Batch(ts) => ts,
        }
    }
}

/// Scalar projection of one point onto the ray.
#[inline]
pub fn point_dist_along_ray(point: DVec3, ray_origin: DVec3, ray_unit_dir: DVec3) -> f64 {
    (point - ray_origin).dot(ray_unit_dir)
}

/// Scalar projection of each point onto the ray.
///
/// `ray_unit_dir` is expected to be normalized; it is not checked.
pub fn dist_along_ray(points: &[DVec3], ray_origin: DVec3, ray_unit_dir: DVec3) -> Vec<f64> {
    project(points, ray_origin, ray_unit_dir, DEFAULT_SORT_PARALLEL_THRESHOLD)
}

/// [`dist_along_ray`] over a flat array with an explicit shape.
///
/// Accepts shape `[3]` (one point) or `[N, 3]`; higher ranks are rejected.
pub fn dist_along_ray_shaped(
    data: &[f64],
    shape: &[usize],
    ray_origin: DVec3,
    ray_unit_dir: DVec3,
) -> Result<RayDistances, RayError> {
    if shape.len() > 2 {
        return Err(RayError::Rank(shape.to_vec()));
    }
    let shape_error = || RayError::Shape {
        shape: shape.to_vec(),
        len: data.len(),
    };
    match *shape {
        [3] if data.len() == 3 => {
            let p = DVec3::from_slice(data);
            Ok(RayDistances::Single(point_dist_along_ray(p, ray_origin, ray_unit_dir)))
        }
        [n, 3] if n.checked_mul(3) == Some(data.len()) => {
            let points: &[DVec3] = bytemuck::try_cast_slice(data).map_err(|_| shape_error())?;
            Ok(RayDistances::Batch(dist_along_ray(points, ray_origin, ray_unit_dir)))
        }
        _ => Err(shape_error()),
    }
}

/// Indices that order `points` along the ray.
///
/// Equal projections keep their input order (the sort is stable) before the
/// optional reversal for back-to-front.
pub fn sort_points_along_ray(
    points: &[DVec3],
    ray_origin: DVec3,
    ray_unit_dir: DVec3,
    order: DrawOrder,
) -> Vec<usize> {
    RaySorter::new(ray_origin, ray_unit_dir).sort(points, order)
}

/// A view ray that orders primitives for compositing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySorter {
    pub origin: DVec3,
    pub direction: DVec3,
    pub parallel_threshold: usize,
}

impl RaySorter {
    pub fn new(origin: DVec3, unit_direction: DVec3) -> Self {
        Self {
            origin,
            direction: unit_direction,
            parallel_threshold: DEFAULT_SORT_PARALLEL_THRESHOLD,
        }
    }

    /// Ray from the camera position towards its focus point.
    pub fn from_camera(position: DVec3, focus: DVec3) -> Result<Self, RayError> {
        let direction = (focus - position)
            .try_normalize()
            .ok_or(RayError::DegenerateRay)?;
        Ok(Self::new(position, direction))
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn distances(&self, points: &[DVec3]) -> Vec<f64> {
        project(points, self.origin, self.direction, self.parallel_threshold)
    }

    pub fn sort(&self, points: &[DVec3], order: DrawOrder) -> Vec<usize> {
        let t = self.distances(points);
        let mut indices: Vec<usize> = (0..t.len()).collect();
        if t.len() >= self.parallel_threshold {
            indices.par_sort_by_key(|&i| OrderedFloat(t[i]));
        } else {
            indices.sort_by_key(|&i| OrderedFloat(t[i]));
        }
        if order == DrawOrder::BackToFront {
            indices.reverse();
        }
        indices
    }
}

fn project(points: &[DVec3], origin: DVec3, dir: DVec3, parallel_threshold: usize) -> Vec<f64> {
    if points.len() >= parallel_threshold {
        points
            .par_iter()
            .map(|&p| point_dist_along_ray(p, origin, dir))
            .collect()
    } else {
        points
            .iter()
            .map(|&p| point_dist_along_ray(p, origin, dir))
            .collect()
    }
}
