//! Native axis ordering of spherical datasets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Spherical;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AxisOrderError {
    #[error("expected 3 axis names, found {0}")]
    WrongCount(usize),
    #[error("unknown spherical axis '{0}' (expected r, theta or phi)")]
    UnknownAxis(String),
    #[error("axis '{0}' listed more than once")]
    Duplicate(&'static str),
}

/// Position of each spherical axis within a dataset's native 3-vectors.
///
/// Datasets store `(r, theta, phi)` or `(r, phi, theta)` depending on how they
/// were written; bounds and planes always work in `(r, theta, phi)`.
///
/// Only built through [`AxisOrder::parse`] or the constants, so the three
/// indices are always a permutation of `0..3`. Serialized as its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AxisOrder {
    r: usize,
    theta: usize,
    phi: usize,
}

impl AxisOrder {
    pub const R_THETA_PHI: Self = Self {
        r: 0,
        theta: 1,
        phi: 2,
    };

    pub const R_PHI_THETA: Self = Self {
        r: 0,
        theta: 2,
        phi: 1,
    };

    /// Parse a comma- or whitespace-separated list such as `"r, phi, theta"`.
    pub fn parse(s: &str) -> Result<Self, AxisOrderError> {
        let names: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|n| !n.is_empty())
            .collect();
        if names.len() != 3 {
            return Err(AxisOrderError::WrongCount(names.len()));
        }

        let mut slots: [Option<usize>; 3] = [None; 3];
        for (index, name) in names.iter().enumerate() {
            let (slot, canonical) = match name.to_ascii_lowercase().as_str() {
                "r" => (0, "r"),
                "theta" => (1, "theta"),
                "phi" => (2, "phi"),
                _ => return Err(AxisOrderError::UnknownAxis(name.to_string())),
            };
            if slots[slot].replace(index).is_some() {
                return Err(AxisOrderError::Duplicate(canonical));
            }
        }

        // three distinct known names fill all three slots
        match slots {
            [Some(r), Some(theta), Some(phi)] => Ok(Self { r, theta, phi }),
            _ => Err(AxisOrderError::WrongCount(names.len())),
        }
    }

    /// Index of `r` in native 3-vectors.
    pub fn r(&self) -> usize {
        self.r
    }

    pub fn theta(&self) -> usize {
        self.theta
    }

    pub fn phi(&self) -> usize {
        self.phi
    }

    #[inline]
    pub fn to_spherical(&self, native: [f64; 3]) -> Spherical {
        Spherical::new(native[self.r], native[self.theta], native[self.phi])
    }

    #[inline]
    pub fn to_native(&self, s: Spherical) -> [f64; 3] {
        let mut native = [0.0; 3];
        native[self.r] = s.r;
        native[self.theta] = s.theta;
        native[self.phi] = s.phi;
        native
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::R_THETA_PHI
    }
}

impl FromStr for AxisOrder {
    type Err = AxisOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AxisOrder {
    type Error = AxisOrderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AxisOrder> for String {
    fn from(order: AxisOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = [""; 3];
        names[self.r] = "r";
        names[self.theta] = "theta";
        names[self.phi] = "phi";
        write!(f, "{},{},{}", names[0], names[1], names[2])
    }
}
