mod axes;
mod planes;

pub use axes::*;
pub use planes::*;

pub use spherical_bbox::{
    cartesian_bboxes, cartesian_bboxes_edges, cartesian_to_spherical,
    cartesian_to_spherical_batch, spherical_to_cartesian, spherical_to_cartesian_batch, wrap_phi,
    BoundsConfig, BoundsError, CartesianBBox, Spherical, SphericalBoundsEngine, SphericalElement,
};
