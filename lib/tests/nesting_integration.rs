//! End-to-end nesting integration tests.
//!
//! These tests drive the on-disk flow without invoking the external
//! tetrahedralizer, including:
//! - PLY loading with material metadata
//! - Seed computation from a stand-alone volume
//! - Combined `.smesh` assembly
//! - Region splitting of a combined volume
//! - Vertex correspondence between two volumes

use meshnest::assembly::CombinedAssembly;
use meshnest::correspondence::CorrespondenceReport;
use meshnest::geometry::Point3;
use meshnest::mesh::load_ply;
use meshnest::split::{split_by_region, write_regions, RegionId};
use meshnest::tetgen::{ele_path, load_volume, node_path, output_base};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Write a tetrahedron surface PLY shifted along x, returning its path.
fn write_tet_ply(dir: &Path, name: &str, offset: f64, material: Option<&str>) -> PathBuf {
    let path = dir.join(name);
    let comment = match material {
        Some(material) => format!("comment material {material}\n"),
        None => String::new(),
    };
    let content = format!(
        "ply\n\
         format ascii 1.0\n\
         {comment}\
         element vertex 4\n\
         property float x\n\
         property float y\n\
         property float z\n\
         element face 4\n\
         property list uchar int vertex_indices\n\
         end_header\n\
         {offset} 0 0\n\
         {} 0 0\n\
         {offset} 1 0\n\
         {offset} 0 1\n\
         3 0 1 2\n\
         3 0 3 1\n\
         3 0 2 3\n\
         3 1 3 2\n",
        offset + 1.0
    );
    std::fs::write(&path, content).unwrap();
    path
}

/// Write the `.node`/`.ele` pair a stand-alone tetrahedralization of the
/// shifted tetrahedron would produce.
fn write_solo_volume(base: &Path, offset: f64) {
    let nodes = format!(
        "4 3 0 0\n0 {offset} 0 0\n1 {} 0 0\n2 {offset} 1 0\n3 {offset} 0 1\n",
        offset + 1.0
    );
    std::fs::write(node_path(base), nodes).unwrap();
    std::fs::write(ele_path(base), "1 4 0\n0 0 1 2 3\n").unwrap();
}

/// Test that a loaded surface and its solo volume assemble into the
/// combined `.smesh` layout with offsets, markers, and negated regions
#[test]
fn test_two_surfaces_assemble_to_smesh() {
    let dir = tempdir().unwrap();

    let inner_ply = write_tet_ply(dir.path(), "inner.ply", 0.0, Some("G4_WATER"));
    let outer_ply = write_tet_ply(dir.path(), "outer.ply", 10.0, None);

    let inner = load_ply(&inner_ply).unwrap();
    assert_eq!(inner.name(), "inner");
    assert_eq!(inner.vertex_count(), 4);
    assert_eq!(inner.face_count(), 4);
    assert_eq!(inner.material(), Some("G4_WATER"));

    let outer = load_ply(&outer_ply).unwrap();
    assert_eq!(outer.name(), "outer");
    assert!(outer.material().is_none());

    // Seeds come from the solo tetrahedralizations.
    write_solo_volume(&output_base(&inner_ply), 0.0);
    write_solo_volume(&output_base(&outer_ply), 10.0);

    let inner_volume = load_volume(&output_base(&inner_ply)).unwrap();
    let inner_seed = inner_volume.seed_point().unwrap();
    assert_eq!(inner_seed, Point3::new(0.5, 0.5, 0.5));

    let outer_volume = load_volume(&output_base(&outer_ply)).unwrap();
    let outer_seed = outer_volume.seed_point().unwrap();
    assert_eq!(outer_seed, Point3::new(10.5, 0.5, 0.5));

    let mut assembly = CombinedAssembly::new();
    assembly.add(inner, inner_seed);
    assembly.add(outer, outer_seed);
    assert_eq!(assembly.vertex_count(), 8);
    assert_eq!(assembly.face_count(), 8);

    let smesh = assembly.write_smesh(&dir.path().join("combined")).unwrap();
    assert!(smesh.ends_with("combined.smesh"));

    let content = std::fs::read_to_string(&smesh).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    let nodes = lines.iter().position(|l| *l == "# Part 1 - node list").unwrap();
    assert_eq!(lines[nodes + 1], "8 3 0 0");
    assert_eq!(lines[nodes + 2], "0 0 0 0");
    assert_eq!(lines[nodes + 6], "4 10 0 0");

    // Outer faces reference the combined numbering and carry marker 1.
    let facets = lines.iter().position(|l| *l == "# Part 2 - facet list").unwrap();
    assert_eq!(lines[facets + 1], "8 1");
    assert_eq!(lines[facets + 2], "3 0 1 2 0");
    assert_eq!(lines[facets + 6], "3 4 5 6 1");

    let holes = lines.iter().position(|l| *l == "# Part 3 - hole list").unwrap();
    assert_eq!(lines[holes + 1], "0");

    let regions = lines.iter().position(|l| *l == "# Part 4 - region list").unwrap();
    assert_eq!(lines[regions + 1], "2");
    assert_eq!(lines[regions + 2], "0 0.5 0.5 0.5 0");
    assert_eq!(lines[regions + 3], "1 10.5 0.5 0.5 -1");
}

/// Test that a combined volume splits into per-region element files
/// paired with node copies
#[test]
fn test_combined_volume_splits_into_regions() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("combined.1");

    let nodes = "8 3 0 0\n\
                 0 0 0 0\n\
                 1 1 0 0\n\
                 2 0 1 0\n\
                 3 0 0 1\n\
                 4 10 0 0\n\
                 5 11 0 0\n\
                 6 10 1 0\n\
                 7 10 0 1\n";
    std::fs::write(node_path(&base), nodes).unwrap();
    std::fs::write(ele_path(&base), "2 4 1\n0 0 1 2 3 0\n1 4 5 6 7 -1\n").unwrap();

    let volume = load_volume(&base).unwrap();
    assert_eq!(volume.vertex_count(), 8);
    assert_eq!(volume.tetrahedron_count(), 2);

    let groups = split_by_region(&volume).unwrap();
    let written = write_regions(&groups, &base).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].0, RegionId(-1));
    assert_eq!(written[1].0, RegionId(0));

    let outer_ele = std::fs::read_to_string(dir.path().join("combined.1_-1_.ele")).unwrap();
    assert_eq!(outer_ele, "1 4 0\n0 4 5 6 7\n");

    let inner_ele = std::fs::read_to_string(dir.path().join("combined.1_0_.ele")).unwrap();
    assert_eq!(inner_ele, "1 4 0\n0 0 1 2 3\n");

    // Each region pairs with an unmodified copy of the combined nodes.
    let copied = std::fs::read_to_string(dir.path().join("combined.1_-1_.node")).unwrap();
    assert_eq!(copied, nodes);
}

/// Test vertex correspondence between two volumes loaded from disk
#[test]
fn test_correspondence_between_volumes() {
    let dir = tempdir().unwrap();

    let target_base = dir.path().join("inner.1");
    write_solo_volume(&target_base, 0.0);

    // The combined volume keeps three of the four vertices and displaces
    // the apex slightly.
    let reference_base = dir.path().join("combined.1");
    let nodes = "5 3 0 0\n\
                 0 0 0 0\n\
                 1 1 0 0\n\
                 2 0 1 0\n\
                 3 0 0 1.05\n\
                 4 10 0 0\n";
    std::fs::write(node_path(&reference_base), nodes).unwrap();
    std::fs::write(ele_path(&reference_base), "1 4 0\n0 0 1 2 3\n").unwrap();

    let target = load_volume(&target_base).unwrap();
    let reference = load_volume(&reference_base).unwrap();

    let report = CorrespondenceReport::compare(target.vertices(), reference.vertices(), 1.0);
    assert_eq!(report.missing, vec![Point3::new(0.0, 0.0, 1.0)]);
    assert_eq!(report.matches, vec![Point3::new(0.0, 0.0, 1.05)]);
    assert!((report.distances[0] - 0.05).abs() < 1e-9);
    assert_eq!(report.near_misses, vec![Point3::new(0.0, 0.0, 1.05)]);
    assert_eq!(report.unmatched_count(), 0);
}
