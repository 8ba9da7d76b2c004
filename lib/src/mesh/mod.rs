//! Mesh types and loading.
//!
//! This module provides the mesh data structures used by the pipeline:
//! - [`SurfaceMesh`] - a triangle surface mesh read from ASCII PLY input
//! - [`Face`] - a single triangular face
//! - [`VolumeMesh`] - a tetrahedral volume mesh
//! - [`Tetrahedron`] - a single tetrahedral element
//! - ASCII PLY file loading

mod ply;
mod surface_mesh;
mod volume_mesh;

pub use ply::{load_ply, parse_ply};
pub use surface_mesh::{Face, SurfaceMesh, MATERIAL_KEY};
pub use volume_mesh::{Tetrahedron, VolumeMesh};
