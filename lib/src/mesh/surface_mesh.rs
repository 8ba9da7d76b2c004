//! Triangle surface mesh data structure.
//!
//! A [`SurfaceMesh`] is the in-memory form of one ASCII PLY input file:
//! a vertex list, a triangle list indexing into it, and the key-value
//! metadata captured from the file's header comments.

use crate::geometry::Point3;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known metadata key naming the material a mesh is made of.
pub const MATERIAL_KEY: &str = "material";

/// A single triangular face defined by three vertex indices.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Indices into the vertex array for the three corners.
    pub indices: [u32; 3],
}

impl Face {
    /// Create a new face from vertex indices.
    #[inline]
    pub const fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            indices: [v0, v1, v2],
        }
    }

    /// Get the vertex index at position i (0, 1, or 2).
    #[inline]
    pub fn vertex(&self, i: usize) -> u32 {
        self.indices[i]
    }

    /// Check if this face is degenerate (has duplicate vertices).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.indices[0] == self.indices[1]
            || self.indices[1] == self.indices[2]
            || self.indices[2] == self.indices[0]
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Face({}, {}, {})",
            self.indices[0], self.indices[1], self.indices[2]
        )
    }
}

impl From<[u32; 3]> for Face {
    #[inline]
    fn from(indices: [u32; 3]) -> Self {
        Self { indices }
    }
}

impl From<Face> for [u32; 3] {
    #[inline]
    fn from(face: Face) -> Self {
        face.indices
    }
}

/// A triangle surface mesh with header metadata.
///
/// Meshes are read-only after parsing; the assembler consumes them by
/// value and never mutates geometry.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SurfaceMesh {
    /// Name of the mesh, taken from the source file stem.
    name: String,
    /// Vertex positions.
    vertices: Vec<Point3>,
    /// Triangle indices into the vertex array.
    faces: Vec<Face>,
    /// Key-value pairs captured from `comment` header lines.
    metadata: BTreeMap<String, String>,
}

impl SurfaceMesh {
    /// Create a new empty mesh.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with preallocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            name: String::new(),
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            metadata: BTreeMap::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    pub fn from_parts(vertices: Vec<Point3>, faces: Vec<Face>) -> Self {
        Self {
            name: String::new(),
            vertices,
            faces,
            metadata: BTreeMap::new(),
        }
    }

    /// Get the mesh name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the mesh name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the vertices of the mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Get the faces of the mesh.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Get the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Reserve capacity for vertices and faces.
    pub fn reserve(&mut self, vertex_count: usize, face_count: usize) {
        self.vertices.reserve(vertex_count);
        self.faces.reserve(face_count);
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, v: Point3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(v);
        idx
    }

    /// Add a face.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Get a vertex by index.
    #[inline]
    pub fn vertex(&self, idx: u32) -> Point3 {
        self.vertices[idx as usize]
    }

    /// Get the header metadata.
    #[inline]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Insert a metadata entry, returning the previous value for the key.
    pub fn insert_metadata(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.metadata.insert(key.into(), value.into())
    }

    /// Get the material name, if the header declared one.
    pub fn material(&self) -> Option<&str> {
        self.metadata.get(MATERIAL_KEY).map(String::as_str)
    }

    /// Validate the mesh (check that face indices are in range).
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len() as u32;
        for (i, face) in self.faces.iter().enumerate() {
            for &idx in &face.indices {
                if idx >= vertex_count {
                    return Err(Error::Mesh(format!(
                        "face {} has invalid vertex index {} (only {} vertices)",
                        i, idx, vertex_count
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SurfaceMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurfaceMesh({:?}, {} vertices, {} faces)",
            self.name,
            self.vertices.len(),
            self.faces.len()
        )
    }
}

impl fmt::Display for SurfaceMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} vertices, {} faces",
            if self.name.is_empty() {
                "<unnamed>"
            } else {
                &self.name
            },
            self.vertices.len(),
            self.faces.len()
        )
    }
}
