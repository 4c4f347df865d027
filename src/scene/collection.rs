use glam::DVec3;
use thiserror::Error;

use super::SceneBounds;
use crate::geometry::{
    phi_normal_planes, phi_normal_planes_f32, AxisOrder, BoundsConfig, CartesianBBox,
    SphericalBoundsEngine, SphericalElement,
};
use crate::ordering::{DrawOrder, RayError, RaySorter};
use crate::util::Timed;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("{left} left edges but {right} right edges")]
    EdgeCountMismatch { left: usize, right: usize },
    #[error(transparent)]
    Ray(#[from] RayError),
}

/// Phi-normal planes of an element's two phi faces, `[nx, ny, nz, d]` each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhiPlanes<T> {
    pub left: [T; 4],
    pub right: [T; 4],
}

/// A batch of spherical blocks with everything the renderer needs per frame.
///
/// Built once from native-ordered edges; afterwards only the draw order changes
/// with the camera.
#[derive(Debug, Clone)]
pub struct SphericalBlockCollection {
    order: AxisOrder,
    left_edges: Vec<[f64; 3]>,
    right_edges: Vec<[f64; 3]>,
    elements: Vec<SphericalElement>,
    boxes: Vec<CartesianBBox>,
    centers: Vec<DVec3>,
    bounds: SceneBounds,
}

impl SphericalBlockCollection {
    pub fn from_native_edges(
        left: &[[f64; 3]],
        right: &[[f64; 3]],
        order: AxisOrder,
        config: &BoundsConfig,
    ) -> Result<Self, CollectionError> {
        if left.len() != right.len() {
            return Err(CollectionError::EdgeCountMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let _t = Timed::debug("Spherical block bounds").items(left.len());

        let elements: Vec<SphericalElement> = left
            .iter()
            .zip(right)
            .map(|(&lo, &hi)| {
                SphericalElement::from_edges(order.to_spherical(lo), order.to_spherical(hi))
            })
            .collect();

        let boxes = SphericalBoundsEngine::new(*config).element_bboxes(&elements);
        let centers = boxes.iter().map(CartesianBBox::center).collect();
        let bounds = SceneBounds::from_boxes(&boxes);

        log::debug!(
            "{} spherical blocks, cartesian extent {:?} .. {:?}",
            elements.len(),
            bounds.min,
            bounds.max
        );

        Ok(Self {
            order,
            left_edges: left.to_vec(),
            right_edges: right.to_vec(),
            elements,
            boxes,
            centers,
            bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.order
    }

    pub fn elements(&self) -> &[SphericalElement] {
        &self.elements
    }

    pub fn boxes(&self) -> &[CartesianBBox] {
        &self.boxes
    }

    pub fn centers(&self) -> &[DVec3] {
        &self.centers
    }

    pub fn bounds(&self) -> &SceneBounds {
        &self.bounds
    }

    /// Boxes mapped into the unit viewport.
    pub fn normalized_boxes(&self) -> Vec<CartesianBBox> {
        self.boxes
            .iter()
            .map(|b| self.bounds.normalize_box(b))
            .collect()
    }

    /// Element indices in draw order for a camera at `position` looking at `focus`.
    pub fn draw_order(
        &self,
        position: DVec3,
        focus: DVec3,
        order: DrawOrder,
    ) -> Result<Vec<usize>, CollectionError> {
        let sorter = RaySorter::from_camera(position, focus)?;
        Ok(sorter.sort(&self.centers, order))
    }

    /// Phi-normal planes through each element's left and right edges.
    pub fn phi_planes(&self) -> Vec<PhiPlanes<f64>> {
        let left = phi_normal_planes(&self.left_edges, self.order);
        let right = phi_normal_planes(&self.right_edges, self.order);
        left.into_iter()
            .zip(right)
            .map(|(left, right)| PhiPlanes { left, right })
            .collect()
    }

    pub fn phi_planes_f32(&self) -> Vec<PhiPlanes<f32>> {
        let left = phi_normal_planes_f32(&self.left_edges, self.order);
        let right = phi_normal_planes_f32(&self.right_edges, self.order);
        left.into_iter()
            .zip(right)
            .map(|(left, right)| PhiPlanes { left, right })
            .collect()
    }
}
