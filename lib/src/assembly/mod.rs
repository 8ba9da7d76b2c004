//! Assembly of surface meshes into a combined piecewise linear complex.
//!
//! Sub-meshes are concatenated in insertion order into one `.smesh` file:
//! a global node list, a facet list with cumulative vertex offsets, an
//! empty hole section, and one interior seed point per sub-mesh. Facets
//! carry their sub-mesh index as boundary marker; seed points carry the
//! NEGATED sub-mesh index, which is the TetGen convention for marking a
//! region attribute rather than a boundary.

use crate::geometry::Point3;
use crate::mesh::SurfaceMesh;
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// An interior seed point tagging one region of the combined complex.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSeed {
    /// A point strictly inside the sub-mesh's enclosed volume.
    pub point: Point3,
    /// Position of the sub-mesh in the assembly.
    pub region: usize,
}

impl fmt::Debug for RegionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSeed({}, {:?})", self.region, self.point)
    }
}

/// Accumulates surface meshes and writes them as one `.smesh` complex.
///
/// Meshes are consumed by value together with an interior seed point.
/// Running totals of vertices, facets and regions are kept as meshes are
/// added; at write time the emitted line counts are verified against
/// them, and any disagreement aborts with
/// [`Error::AssemblyInvariant`].
#[derive(Debug, Default)]
pub struct CombinedAssembly {
    meshes: Vec<SurfaceMesh>,
    seeds: Vec<RegionSeed>,
    vertex_count: usize,
    face_count: usize,
    region_count: usize,
}

impl CombinedAssembly {
    /// Create a new empty assembly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sub-mesh with an interior seed point.
    ///
    /// The sub-mesh is assigned the next region index; insertion order
    /// determines both facet markers and vertex offsets.
    pub fn add(&mut self, mesh: SurfaceMesh, seed: Point3) {
        let region = self.meshes.len();
        self.vertex_count += mesh.vertex_count();
        self.face_count += mesh.face_count();
        self.region_count += 1;
        debug!(
            "assembly region {}: {} ({} vertices, {} faces)",
            region,
            mesh.name(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        self.meshes.push(mesh);
        self.seeds.push(RegionSeed {
            point: seed,
            region,
        });
    }

    /// Get the added sub-meshes.
    #[inline]
    pub fn meshes(&self) -> &[SurfaceMesh] {
        &self.meshes
    }

    /// Get the region seed points.
    #[inline]
    pub fn seeds(&self) -> &[RegionSeed] {
        &self.seeds
    }

    /// Number of sub-meshes added so far.
    #[inline]
    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Total vertices across all sub-meshes.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Total faces across all sub-meshes.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// Write the assembled complex to `<base>.smesh`.
    ///
    /// Returns the path of the written file.
    pub fn write_smesh(&self, base: &Path) -> Result<PathBuf> {
        let path = base.with_extension("smesh");
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!(
            "wrote {} ({} nodes, {} facets, {} regions)",
            path.display(),
            self.vertex_count,
            self.face_count,
            self.region_count
        );
        Ok(path)
    }

    /// Write the assembled complex to an arbitrary writer.
    ///
    /// The `.smesh` layout has four parts: nodes, facets, holes (always
    /// empty) and region seed points. Nodes are renumbered globally from
    /// 0 in insertion order; each facet's vertex indices are shifted by
    /// the total vertex count of all earlier sub-meshes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        // Part 1: nodes.
        writeln!(writer, "# Part 1 - node list")?;
        writeln!(writer, "{} 3 0 0", self.vertex_count)?;
        let mut node_id = 0usize;
        for mesh in &self.meshes {
            for v in mesh.vertices() {
                writeln!(writer, "{} {} {} {}", node_id, v.x, v.y, v.z)?;
                node_id += 1;
            }
        }
        if node_id != self.vertex_count {
            return Err(Error::AssemblyInvariant(format!(
                "expected {} nodes, emitted {}",
                self.vertex_count, node_id
            )));
        }

        // Part 2: facets, marked with their sub-mesh index.
        writeln!(writer, "# Part 2 - facet list")?;
        writeln!(writer, "{} 1", self.face_count)?;
        let mut facet_total = 0usize;
        let mut offset = 0usize;
        for (region, mesh) in self.meshes.iter().enumerate() {
            for face in mesh.faces() {
                writeln!(
                    writer,
                    "3 {} {} {} {}",
                    face.indices[0] as usize + offset,
                    face.indices[1] as usize + offset,
                    face.indices[2] as usize + offset,
                    region
                )?;
                facet_total += 1;
            }
            offset += mesh.vertex_count();
        }
        if facet_total != self.face_count {
            return Err(Error::AssemblyInvariant(format!(
                "expected {} facets, emitted {}",
                self.face_count, facet_total
            )));
        }

        // Part 3: holes. The complex never has any.
        writeln!(writer, "# Part 3 - hole list")?;
        writeln!(writer, "0")?;

        // Part 4: region seed points with negated region markers.
        writeln!(writer, "# Part 4 - region list")?;
        writeln!(writer, "{}", self.region_count)?;
        let mut region_total = 0usize;
        for seed in &self.seeds {
            let marker = -(seed.region as i64);
            writeln!(
                writer,
                "{} {} {} {} {}",
                seed.region, seed.point.x, seed.point.y, seed.point.z, marker
            )?;
            region_total += 1;
        }
        if region_total != self.region_count {
            return Err(Error::AssemblyInvariant(format!(
                "expected {} regions, emitted {}",
                self.region_count, region_total
            )));
        }

        Ok(())
    }
}

impl fmt::Display for CombinedAssembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CombinedAssembly: {} regions, {} vertices, {} faces",
            self.region_count, self.vertex_count, self.face_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;

    fn triangle_mesh(origin: Point3) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();
        mesh.add_vertex(origin);
        mesh.add_vertex(origin + Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(origin + Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(Face::new(0, 1, 2));
        mesh
    }

    fn write_to_string(assembly: &CombinedAssembly) -> String {
        let mut buffer = Vec::new();
        assembly.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_totals_track_added_meshes() {
        let mut assembly = CombinedAssembly::new();
        assembly.add(triangle_mesh(Point3::zero()), Point3::new(0.3, 0.3, 0.0));
        assembly.add(
            triangle_mesh(Point3::new(10.0, 0.0, 0.0)),
            Point3::new(10.3, 0.3, 0.0),
        );

        assert_eq!(assembly.region_count(), 2);
        assert_eq!(assembly.vertex_count(), 6);
        assert_eq!(assembly.face_count(), 2);
    }

    #[test]
    fn test_second_mesh_faces_are_offset() {
        let mut assembly = CombinedAssembly::new();
        assembly.add(triangle_mesh(Point3::zero()), Point3::new(0.3, 0.3, 0.0));
        assembly.add(
            triangle_mesh(Point3::new(10.0, 0.0, 0.0)),
            Point3::new(10.3, 0.3, 0.0),
        );

        let text = write_to_string(&assembly);
        let lines: Vec<&str> = text.lines().collect();

        // Nodes: header comment, count line, then six renumbered nodes.
        assert_eq!(lines[1], "6 3 0 0");
        assert!(lines[2].starts_with("0 "));
        assert!(lines[7].starts_with("5 "));

        // Facets: the second mesh's triangle is shifted by the first
        // mesh's vertex count and marked with region 1.
        assert_eq!(lines[9], "2 1");
        assert_eq!(lines[10], "3 0 1 2 0");
        assert_eq!(lines[11], "3 3 4 5 1");
    }

    #[test]
    fn test_hole_section_is_empty() {
        let mut assembly = CombinedAssembly::new();
        assembly.add(triangle_mesh(Point3::zero()), Point3::new(0.3, 0.3, 0.0));

        let text = write_to_string(&assembly);
        let lines: Vec<&str> = text.lines().collect();
        let hole_header = lines.iter().position(|l| *l == "# Part 3 - hole list").unwrap();
        assert_eq!(lines[hole_header + 1], "0");
    }

    #[test]
    fn test_region_markers_are_negated() {
        let mut assembly = CombinedAssembly::new();
        assembly.add(triangle_mesh(Point3::zero()), Point3::new(0.25, 0.25, 0.0));
        assembly.add(
            triangle_mesh(Point3::new(5.0, 0.0, 0.0)),
            Point3::new(5.25, 0.25, 0.0),
        );

        let text = write_to_string(&assembly);
        let lines: Vec<&str> = text.lines().collect();
        let region_header = lines.iter().position(|l| *l == "# Part 4 - region list").unwrap();
        assert_eq!(lines[region_header + 1], "2");
        assert_eq!(lines[region_header + 2], "0 0.25 0.25 0 0");
        assert_eq!(lines[region_header + 3], "1 5.25 0.25 0 -1");
    }

    #[test]
    fn test_empty_assembly_writes_empty_sections() {
        let assembly = CombinedAssembly::new();
        let text = write_to_string(&assembly);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "0 3 0 0");
        assert_eq!(lines[3], "0 1");
        assert_eq!(lines[5], "0");
        assert_eq!(lines[7], "0");
    }

    #[test]
    fn test_write_smesh_to_disk() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let base = dir.path().join("combined");

        let mut assembly = CombinedAssembly::new();
        assembly.add(triangle_mesh(Point3::zero()), Point3::new(0.3, 0.3, 0.0));

        let path = assembly.write_smesh(&base).unwrap();
        assert_eq!(path, dir.path().join("combined.smesh"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Part 1 - node list\n3 3 0 0\n"));
    }
}
