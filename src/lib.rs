//! Geometry core for interactive volume rendering.
//!
//! The rendering front-end hands this crate per-element edges in the dataset's
//! native coordinates and gets back plain arrays: cartesian bounding boxes for
//! ray-marching geometry and viewport normalization, and draw-order
//! permutations for compositing.

pub mod config;
pub mod geometry;
pub mod ordering;
pub mod scene;
pub mod util;
