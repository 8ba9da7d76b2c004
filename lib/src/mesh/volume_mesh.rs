//! Tetrahedral volume mesh data structure.

use crate::geometry::{BoundingBox3, Point3};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tetrahedral element defined by four vertex indices.
///
/// The optional attribute is the raw region marker column carried by
/// TetGen `.ele` files when attributes are enabled.
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    /// Indices into the vertex array for the four corners.
    pub indices: [usize; 4],
    /// Region attribute, if the element file carried one.
    pub attribute: Option<f64>,
}

impl Tetrahedron {
    /// Create a new tetrahedron from vertex indices.
    #[inline]
    pub const fn new(v0: usize, v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            indices: [v0, v1, v2, v3],
            attribute: None,
        }
    }

    /// Create a new tetrahedron with a region attribute.
    #[inline]
    pub const fn with_attribute(v0: usize, v1: usize, v2: usize, v3: usize, attribute: f64) -> Self {
        Self {
            indices: [v0, v1, v2, v3],
            attribute: Some(attribute),
        }
    }

    /// Get the vertex index at position i (0 through 3).
    #[inline]
    pub fn vertex(&self, i: usize) -> usize {
        self.indices[i]
    }
}

impl fmt::Debug for Tetrahedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute {
            Some(attr) => write!(
                f,
                "Tetrahedron({}, {}, {}, {}; attr {})",
                self.indices[0], self.indices[1], self.indices[2], self.indices[3], attr
            ),
            None => write!(
                f,
                "Tetrahedron({}, {}, {}, {})",
                self.indices[0], self.indices[1], self.indices[2], self.indices[3]
            ),
        }
    }
}

/// A tetrahedral volume mesh, as produced by the external tetrahedralizer.
///
/// Read-only after parsing.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct VolumeMesh {
    /// Vertex positions.
    vertices: Vec<Point3>,
    /// Tetrahedral elements indexing into the vertex array.
    tetrahedra: Vec<Tetrahedron>,
}

impl VolumeMesh {
    /// Create a new empty volume mesh.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a volume mesh with preallocated capacity.
    pub fn with_capacity(vertex_count: usize, tetrahedron_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            tetrahedra: Vec::with_capacity(tetrahedron_count),
        }
    }

    /// Create a volume mesh from vertices and elements.
    pub fn from_parts(vertices: Vec<Point3>, tetrahedra: Vec<Tetrahedron>) -> Self {
        Self {
            vertices,
            tetrahedra,
        }
    }

    /// Get the vertices of the mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Get the tetrahedral elements.
    #[inline]
    pub fn tetrahedra(&self) -> &[Tetrahedron] {
        &self.tetrahedra
    }

    /// Get the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of tetrahedra.
    #[inline]
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Check if the mesh has no tetrahedra.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tetrahedra.is_empty()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, v: Point3) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(v);
        idx
    }

    /// Add a tetrahedral element.
    pub fn add_tetrahedron(&mut self, tet: Tetrahedron) {
        self.tetrahedra.push(tet);
    }

    /// Get a vertex by index.
    #[inline]
    pub fn vertex(&self, idx: usize) -> Point3 {
        self.vertices[idx]
    }

    /// Get the four corner positions of a tetrahedron.
    ///
    /// Panics if any index is out of range; call [`validate`] first on
    /// untrusted input.
    ///
    /// [`validate`]: VolumeMesh::validate
    #[inline]
    pub fn tetrahedron_vertices(&self, tet_idx: usize) -> [Point3; 4] {
        let tet = &self.tetrahedra[tet_idx];
        [
            self.vertices[tet.indices[0]],
            self.vertices[tet.indices[1]],
            self.vertices[tet.indices[2]],
            self.vertices[tet.indices[3]],
        ]
    }

    /// Validate the mesh (check that element indices are in range).
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (i, tet) in self.tetrahedra.iter().enumerate() {
            for &idx in &tet.indices {
                if idx >= vertex_count {
                    return Err(Error::Mesh(format!(
                        "tetrahedron {} has invalid vertex index {} (only {} vertices)",
                        i, idx, vertex_count
                    )));
                }
            }
        }
        Ok(())
    }

    /// Compute an interior seed point for the region this mesh fills.
    ///
    /// The seed is the bounding-box midpoint of the FIRST tetrahedron's
    /// four corners: `min + (max - min) / 2` per axis. A point inside any
    /// tetrahedron is inside the meshed region, and the box midpoint of a
    /// tetrahedron's own corners lies inside it for the well-shaped
    /// elements the tetrahedralizer emits.
    pub fn seed_point(&self) -> Result<Point3> {
        let tet = self
            .tetrahedra
            .first()
            .ok_or_else(|| Error::Mesh("cannot seed an empty volume mesh".into()))?;

        let mut bb = BoundingBox3::new();
        for &idx in &tet.indices {
            let v = self.vertices.get(idx).ok_or_else(|| {
                Error::Mesh(format!(
                    "tetrahedron 0 has invalid vertex index {} (only {} vertices)",
                    idx,
                    self.vertices.len()
                ))
            })?;
            bb.merge_point(*v);
        }
        Ok(bb.center())
    }
}

impl fmt::Debug for VolumeMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VolumeMesh({} vertices, {} tetrahedra)",
            self.vertices.len(),
            self.tetrahedra.len()
        )
    }
}

impl fmt::Display for VolumeMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VolumeMesh: {} vertices, {} tetrahedra",
            self.vertices.len(),
            self.tetrahedra.len()
        )
    }
}
