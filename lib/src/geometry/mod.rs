//! Geometric primitives.
//!
//! This module provides the 3D point and axis-aligned bounding box types
//! used by the mesh readers, the assembler, and the region seeding logic.

mod bounding_box;
mod point;

pub use bounding_box::BoundingBox3;
pub use point::Point3;
