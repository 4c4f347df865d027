//! Public API integration tests for spherical-bbox.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spherical_bbox::{
    cartesian_bboxes, cartesian_bboxes_edges, BoundsConfig, BoundsError, CartesianBBox, Spherical,
    SphericalBoundsEngine, SphericalElement,
};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    let mut v: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    v[n - 1] = stop;
    v
}

/// Centers and widths of every cell of an (r, theta, phi) edge grid, flattened.
struct GridCells {
    center: [Vec<f64>; 3],
    width: [Vec<f64>; 3],
}

impl GridCells {
    fn new(r_edges: &[f64], theta_edges: &[f64], phi_edges: &[f64]) -> Self {
        let mut cells = GridCells {
            center: Default::default(),
            width: Default::default(),
        };
        for t in theta_edges.windows(2) {
            for r in r_edges.windows(2) {
                for p in phi_edges.windows(2) {
                    for (axis, e) in [r, t, p].into_iter().enumerate() {
                        cells.center[axis].push((e[0] + e[1]) / 2.0);
                        cells.width[axis].push(e[1] - e[0]);
                    }
                }
            }
        }
        cells
    }

    fn shell(n_r: usize, n_angles: usize) -> Self {
        Self::new(
            &linspace(0.4, 1.0, n_r),
            &linspace(0.0, PI, n_angles),
            &linspace(0.0, TAU, n_angles),
        )
    }

    fn bboxes(&self, engine: &SphericalBoundsEngine) -> Vec<CartesianBBox> {
        let [r, theta, phi] = &self.center;
        let [dr, dtheta, dphi] = &self.width;
        engine
            .cartesian_bboxes(r, theta, phi, dr, dtheta, dphi)
            .expect("grid slices have equal lengths")
    }
}

fn single(r: f64, theta: f64, phi: f64, dr: f64, dtheta: f64, dphi: f64) -> CartesianBBox {
    cartesian_bboxes(&[r], &[theta], &[phi], &[dr], &[dtheta], &[dphi]).unwrap()[0]
}

fn union(boxes: &[CartesianBBox]) -> CartesianBBox {
    boxes.iter().fold(CartesianBBox::EMPTY, |acc, b| acc.union(b))
}

#[test]
fn test_north_pole_element() {
    let bbox = single(0.95, 0.05, 0.05, 0.1, 0.1, 0.05);
    assert_eq!(bbox.max.z, 1.0);
    assert!(bbox.min.x.abs() < 1e-12);
    assert!(bbox.min.y.abs() < 1e-12);
}

#[test]
fn test_south_pole_element() {
    let bbox = single(0.95, PI - 0.05, 0.05, 0.1, 0.1, 0.05);
    assert_eq!(bbox.min.z, -1.0);
    assert!(bbox.min.x.abs() < 1e-12);
    assert!(bbox.min.y.abs() < 1e-12);
}

#[test]
fn test_equatorial_axis_crossings() {
    let (r, dr, dtheta, dphi) = (0.95, 0.1, 0.1, 0.05);

    let plus_y = single(r, FRAC_PI_2, FRAC_PI_2, dr, dtheta, dphi);
    assert_eq!(plus_y.max.y, 1.0);
    assert!(plus_y.center().x.abs() < 1e-12);
    assert!(plus_y.center().z.abs() < 1e-12);
    assert!(plus_y.min.x < 0.0 && plus_y.max.x > 0.0);

    let minus_x = single(r, FRAC_PI_2, PI, dr, dtheta, dphi);
    assert_eq!(minus_x.min.x, -1.0);
    assert!(minus_x.center().y.abs() < 1e-12);
    assert!(minus_x.center().z.abs() < 1e-12);

    let minus_y = single(r, FRAC_PI_2, 3.0 * FRAC_PI_2, dr, dtheta, dphi);
    assert_eq!(minus_y.min.y, -1.0);
    assert!(minus_y.center().x.abs() < 1e-12);
    assert!(minus_y.center().z.abs() < 1e-12);

    let plus_x = single(r, FRAC_PI_2, dphi / 2.0, dr, dtheta, dphi);
    assert_eq!(plus_x.max.x, 1.0);
}

#[test]
fn test_theta_edge_on_equator() {
    let (r, dr, dtheta, dphi) = (0.95, 0.1, 0.1, 0.05);

    // element ends at the equator from above
    let above = single(r, FRAC_PI_2 - dtheta / 2.0, dphi / 2.0, dr, dtheta, dphi);
    assert_eq!(above.max.x, 1.0);

    // element starts at the equator going south
    let below = single(r, FRAC_PI_2 + dtheta / 2.0, dphi / 2.0, dr, dtheta, dphi);
    assert_eq!(below.max.x, 1.0);
}

#[test]
fn test_full_sphere_coverage() {
    let cells = GridCells::shell(10, 10);
    let boxes = cells.bboxes(&SphericalBoundsEngine::default());
    assert_eq!(boxes.len(), 9 * 9 * 9);

    for b in &boxes {
        assert!(b.min.is_finite() && b.max.is_finite());
    }

    let all = union(&boxes);
    assert_eq!(all.max, DVec3::ONE);
    assert_eq!(all.min, -DVec3::ONE);
}

#[test]
fn test_large_elements() {
    for n_angles in [2, 4, 8, 16] {
        let cells = GridCells::shell(10, n_angles);
        let boxes = cells.bboxes(&SphericalBoundsEngine::default());

        let all = union(&boxes);
        assert_eq!(all.max, DVec3::ONE, "n_angles={}", n_angles);
        assert_eq!(all.min, -DVec3::ONE, "n_angles={}", n_angles);
    }
}

#[test]
fn test_coverage_survives_edge_jitter() {
    // Grid edges a few ulps off the special angles must still be detected.
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..5 {
        let jitter = |v: Vec<f64>, rng: &mut ChaCha8Rng| -> Vec<f64> {
            v.into_iter().map(|x| x + rng.gen_range(-1e-12..1e-12)).collect()
        };
        let theta_edges = jitter(linspace(0.0, PI, 9), &mut rng);
        let phi_edges = jitter(linspace(0.0, TAU, 9), &mut rng);
        let cells = GridCells::new(&linspace(0.4, 1.0, 4), &theta_edges, &phi_edges);

        let all = union(&cells.bboxes(&SphericalBoundsEngine::default()));
        for axis in 0..3 {
            assert!((all.max[axis] - 1.0).abs() < 1e-15, "axis {} max {}", axis, all.max[axis]);
            assert!((all.min[axis] + 1.0).abs() < 1e-15, "axis {} min {}", axis, all.min[axis]);
        }
    }
}

#[test]
fn test_edges_agree_with_centers() {
    let cells = GridCells::new(
        &linspace(0.0, 10.0, 20),
        &linspace(0.0, PI, 20),
        &linspace(0.0, TAU, 20),
    );
    let engine = SphericalBoundsEngine::default();
    let from_centers = cells.bboxes(&engine);

    let lo: Vec<Vec<f64>> = (0..3)
        .map(|a| cells.center[a].iter().zip(&cells.width[a]).map(|(c, w)| c - w / 2.0).collect())
        .collect();
    let hi: Vec<Vec<f64>> = (0..3)
        .map(|a| cells.center[a].iter().zip(&cells.width[a]).map(|(c, w)| c + w / 2.0).collect())
        .collect();
    let from_edges =
        cartesian_bboxes_edges(&lo[0], &lo[1], &lo[2], &hi[0], &hi[1], &hi[2]).unwrap();

    assert_eq!(from_centers.len(), from_edges.len());
    for (a, b) in from_centers.iter().zip(&from_edges) {
        assert!((a.center() - b.center()).abs().max_element() < 1e-12);
        assert!((a.width() - b.width()).abs().max_element() < 1e-12);
    }
}

#[test]
fn test_boxes_enclose_sampled_elements() {
    // Dense sampling of each element must stay inside its box and come close
    // to every face.
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let engine = SphericalBoundsEngine::default();
    let steps = 24;

    for _ in 0..200 {
        let r_lo = rng.gen_range(0.0..2.0);
        let theta_lo = rng.gen_range(0.0..PI);
        let phi_lo = rng.gen_range(-PI..TAU);
        let lo = Spherical::new(r_lo, theta_lo, phi_lo);
        let hi = Spherical::new(
            r_lo + rng.gen_range(0.0..1.0),
            (theta_lo + rng.gen_range(0.0..1.5)).min(PI),
            phi_lo + rng.gen_range(0.0..3.0),
        );
        let element = SphericalElement::from_edges(lo, hi);
        let bbox = engine.element_bbox(&element);

        let mut sampled = CartesianBBox::EMPTY;
        for i in 0..=steps {
            for j in 0..=steps {
                for k in 0..=steps {
                    let f = |a: f64, b: f64, t: usize| a + (b - a) * t as f64 / steps as f64;
                    let p = Spherical::new(
                        f(lo.r, hi.r, i),
                        f(lo.theta, hi.theta, j),
                        f(lo.phi, hi.phi, k),
                    )
                    .to_cartesian();
                    assert!(
                        bbox.contains(p, 1e-12),
                        "{:?} escapes {:?} for {:?}",
                        p,
                        bbox,
                        element
                    );
                    sampled.include(p);
                }
            }
        }

        // Each sampled angle is within half a step of the true extremum.
        let max_step = (hi.theta - lo.theta).max(hi.phi - lo.phi) / steps as f64;
        let slack = 2.0 * hi.r * (1.0 - (max_step / 2.0).cos()) + 1e-12;
        assert!((sampled.min - bbox.min).max_element() <= slack, "{:?} vs {:?}", bbox, sampled);
        assert!((bbox.max - sampled.max).max_element() <= slack, "{:?} vs {:?}", bbox, sampled);
    }
}

#[test]
fn test_wrapped_phi_range() {
    // phi from 350 to 10 degrees crosses +x
    let lo = Spherical::new(1.0, FRAC_PI_2 - 0.1, 350f64.to_radians());
    let hi = Spherical::new(2.0, FRAC_PI_2 + 0.1, 10f64.to_radians());
    let bbox = SphericalBoundsEngine::default().element_bbox(&SphericalElement::from_edges(lo, hi));
    assert_eq!(bbox.max.x, 2.0);
    assert!(bbox.min.y < 0.0 && bbox.max.y > 0.0);
}

#[test]
fn test_parallel_engine_on_large_batch() {
    let cells = GridCells::shell(12, 24);
    let sequential = SphericalBoundsEngine::new(BoundsConfig {
        parallel_threshold: usize::MAX,
        ..BoundsConfig::default()
    });
    let parallel = SphericalBoundsEngine::new(BoundsConfig {
        parallel_threshold: 16,
        ..BoundsConfig::default()
    });
    assert_eq!(cells.bboxes(&sequential), cells.bboxes(&parallel));
}

#[test]
fn test_length_mismatch() {
    let result = cartesian_bboxes(
        &[1.0, 2.0],
        &[0.5, 0.5],
        &[0.1],
        &[0.1, 0.1],
        &[0.1, 0.1],
        &[0.1, 0.1],
    );
    assert!(matches!(
        result,
        Err(BoundsError::LengthMismatch { name: "phi", expected: 2, found: 1 })
    ));
}

#[test]
fn test_empty_batch() {
    let boxes = cartesian_bboxes(&[], &[], &[], &[], &[], &[]).unwrap();
    assert!(boxes.is_empty());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn center_form_matches_edge_form(
            r in 0.0f64..10.0,
            theta in 0.0f64..PI,
            phi in -TAU..TAU,
            dr in 0.0f64..2.0,
            dtheta in 0.0f64..1.0,
            dphi in 0.0f64..TAU,
        ) {
            let from_center = single(r, theta, phi, dr, dtheta, dphi);
            let element = SphericalElement::from_center_width(
                Spherical::new(r, theta, phi),
                Spherical::new(dr, dtheta, dphi),
            );
            let (lo, hi) = (element.lo, element.hi);
            let from_edges = cartesian_bboxes_edges(
                &[lo.r],
                &[lo.theta],
                &[lo.phi],
                &[hi.r],
                &[hi.theta],
                &[hi.phi],
            )
            .unwrap()[0];
            prop_assert_eq!(from_center, from_edges);
        }

        #[test]
        fn box_contains_element_center(
            r in 0.1f64..10.0,
            theta in 0.0f64..PI,
            phi in 0.0f64..TAU,
            dr in 0.0f64..0.1,
            dtheta in 0.0f64..0.5,
            dphi in 0.0f64..1.0,
        ) {
            let bbox = single(r, theta, phi, dr, dtheta, dphi);
            let center = Spherical::new(r, theta.clamp(0.0, PI), phi).to_cartesian();
            prop_assert!(bbox.contains(center, 1e-12));
        }
    }
}
