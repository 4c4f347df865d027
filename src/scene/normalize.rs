//! Scene extents and normalisation into the unit viewport.
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::geometry::CartesianBBox;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl SceneBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min: DVec3::INFINITY,
            max: DVec3::NEG_INFINITY,
        }
    }

    pub fn from_boxes(boxes: &[CartesianBBox]) -> Self {
        let mut bounds = Self::new();
        for b in boxes {
            bounds.update_box(b);
        }
        bounds
    }

    /// Update bounds with a new point
    pub fn update(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn update_box(&mut self, b: &CartesianBBox) {
        self.update(b.min);
        self.update(b.max);
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// World space dimensions
    pub fn extent(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            (self.max + self.min) / 2.0
        }
    }

    pub fn diagonal(&self) -> f64 {
        self.extent().length()
    }

    /// Matrix that moves the scene center to the origin and scales the largest
    /// extent to 1, so the scene fits in `[-0.5, 0.5]³` with its aspect kept.
    ///
    /// Empty and zero-size scenes map to the identity.
    pub fn normalization_matrix(&self) -> DMat4 {
        let largest = self.extent().max_element();
        if !(largest > 0.0 && largest.is_finite()) {
            return DMat4::IDENTITY;
        }
        DMat4::from_scale(DVec3::splat(1.0 / largest)) * DMat4::from_translation(-self.center())
    }

    pub fn normalize_point(&self, p: DVec3) -> DVec3 {
        self.normalization_matrix().transform_point3(p)
    }

    pub fn normalize_box(&self, b: &CartesianBBox) -> CartesianBBox {
        let m = self.normalization_matrix();
        CartesianBBox::new(m.transform_point3(b.min), m.transform_point3(b.max))
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new()
    }
}
