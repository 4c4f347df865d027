use std::f64::consts::{PI, TAU};

use crate::geometry::{AxisOrder, Spherical};

/// Evenly spaced edges of a regular spherical grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellGrid {
    pub r: Vec<f64>,
    pub theta: Vec<f64>,
    pub phi: Vec<f64>,
}

impl ShellGrid {
    /// `n_r x n_theta x n_phi` cells covering the shell `r_min..r_max` over the
    /// whole sphere.
    pub fn new(r_min: f64, r_max: f64, n_r: usize, n_theta: usize, n_phi: usize) -> Self {
        Self {
            r: linspace(r_min, r_max, n_r + 1),
            theta: linspace(0.0, PI, n_theta + 1),
            phi: linspace(0.0, TAU, n_phi + 1),
        }
    }

    pub fn num_cells(&self) -> usize {
        self.r.len().saturating_sub(1)
            * self.theta.len().saturating_sub(1)
            * self.phi.len().saturating_sub(1)
    }

    /// Left and right edges of every cell in native order, phi varying fastest.
    pub fn native_edges(&self, order: AxisOrder) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
        let n = self.num_cells();
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        for r in self.r.windows(2) {
            for theta in self.theta.windows(2) {
                for phi in self.phi.windows(2) {
                    left.push(order.to_native(Spherical::new(r[0], theta[0], phi[0])));
                    right.push(order.to_native(Spherical::new(r[1], theta[1], phi[1])));
                }
            }
        }
        (left, right)
    }
}

/// `n` values from `start` to `end` inclusive; the last is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}
