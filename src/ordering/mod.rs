//! Draw ordering of primitives along a view ray.

mod ray;

pub use ray::*;
