//! Scene-level helpers: global extents, viewport normalization and the
//! spherical block collection.

mod collection;
mod grid;
mod normalize;

pub use collection::*;
pub use grid::*;
pub use normalize::*;
