//! TetGen `.node` and `.ele` file parsing.
//!
//! Both formats share the same plaintext shape: a header line of counts
//! and flags, one data line per item with a leading running index, and
//! `#` comment lines anywhere. The leading index column is positional
//! bookkeeping and is ignored; vertex references inside element lines are
//! kept exactly as written.

use crate::geometry::Point3;
use crate::mesh::{Tetrahedron, VolumeMesh};
use crate::{Coord, Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Path of the element file for a mesh basename.
///
/// The suffix is appended rather than substituted, so the basename
/// `combined.1` maps to `combined.1.ele`.
pub fn ele_path(base: &Path) -> PathBuf {
    append_suffix(base, "ele")
}

/// Path of the node file for a mesh basename.
pub fn node_path(base: &Path) -> PathBuf {
    append_suffix(base, "node")
}

fn append_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Load a tetrahedral volume mesh from a `.ele`/`.node` file pair.
///
/// `base` is the shared basename; the `.ele` and `.node` suffixes are
/// appended to it. Element vertex references are validated against the
/// node count before the mesh is returned.
pub fn load_volume<P: AsRef<Path>>(base: P) -> Result<VolumeMesh> {
    let base = base.as_ref();
    let ele = ele_path(base);
    let node = node_path(base);

    let file = File::open(&ele)?;
    let tetrahedra = parse_ele(BufReader::new(file), &ele)?;
    let file = File::open(&node)?;
    let vertices = parse_node(BufReader::new(file), &node)?;

    let mesh = VolumeMesh::from_parts(vertices, tetrahedra);
    mesh.validate()?;
    Ok(mesh)
}

/// Parse a TetGen `.ele` element file.
///
/// The header line is `<count> <nodes_per_tet> <n_attributes>`. Only
/// 4-node tetrahedra are supported. Each data line must carry exactly
/// the leading element index, four vertex indices, and the declared
/// attribute columns; the first attribute is kept as the region
/// attribute. The header count is not checked against the number of
/// data lines.
pub fn parse_ele<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Tetrahedron>> {
    let mut tetrahedra = Vec::new();
    let mut nodes_per_tet = 0usize;
    let mut attribute_count = 0usize;
    let mut seen_header = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = idx + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        if !seen_header {
            if parts.len() < 3 {
                return Err(Error::format(
                    path,
                    format!(
                        "line {}: element header has {} fields, expected 3",
                        lineno,
                        parts.len()
                    ),
                ));
            }
            let declared = parse_usize(parts[0], path, lineno, "element count")?;
            nodes_per_tet = parse_usize(parts[1], path, lineno, "nodes per element")?;
            attribute_count = parse_usize(parts[2], path, lineno, "attribute count")?;
            if nodes_per_tet != 4 {
                return Err(Error::format(
                    path,
                    format!(
                        "line {}: {} nodes per element, only 4-node tetrahedra are supported",
                        lineno, nodes_per_tet
                    ),
                ));
            }
            tetrahedra.reserve(declared);
            seen_header = true;
            continue;
        }

        let expected = 1 + nodes_per_tet + attribute_count;
        if parts.len() != expected {
            return Err(Error::format(
                path,
                format!(
                    "line {}: element line has {} fields, expected {}",
                    lineno,
                    parts.len(),
                    expected
                ),
            ));
        }

        // parts[0] is the running element index.
        let v0 = parse_usize(parts[1], path, lineno, "vertex index")?;
        let v1 = parse_usize(parts[2], path, lineno, "vertex index")?;
        let v2 = parse_usize(parts[3], path, lineno, "vertex index")?;
        let v3 = parse_usize(parts[4], path, lineno, "vertex index")?;
        let attribute = if attribute_count > 0 {
            Some(parse_coord(parts[5], path, lineno, "region attribute")?)
        } else {
            None
        };

        tetrahedra.push(Tetrahedron {
            indices: [v0, v1, v2, v3],
            attribute,
        });
    }

    if !seen_header {
        return Err(Error::format(path, "missing element header line"));
    }
    Ok(tetrahedra)
}

/// Parse a TetGen `.node` file.
///
/// The header line is `<count> <dimension> <n_attributes> <n_markers>`.
/// Only 3D nodes are supported. Each data line must carry exactly the
/// leading node index, the coordinates, and the declared attribute and
/// marker columns; attributes and markers are skipped. The header count
/// is not checked against the number of data lines.
pub fn parse_node<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Point3>> {
    let mut vertices = Vec::new();
    let mut dimension = 0usize;
    let mut attribute_count = 0usize;
    let mut marker_count = 0usize;
    let mut seen_header = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = idx + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();

        if !seen_header {
            if parts.len() < 4 {
                return Err(Error::format(
                    path,
                    format!(
                        "line {}: node header has {} fields, expected 4",
                        lineno,
                        parts.len()
                    ),
                ));
            }
            let declared = parse_usize(parts[0], path, lineno, "node count")?;
            dimension = parse_usize(parts[1], path, lineno, "dimension")?;
            attribute_count = parse_usize(parts[2], path, lineno, "attribute count")?;
            marker_count = parse_usize(parts[3], path, lineno, "marker count")?;
            if dimension != 3 {
                return Err(Error::format(
                    path,
                    format!(
                        "line {}: dimension {}, only 3D nodes are supported",
                        lineno, dimension
                    ),
                ));
            }
            vertices.reserve(declared);
            seen_header = true;
            continue;
        }

        let expected = 1 + dimension + attribute_count + marker_count;
        if parts.len() != expected {
            return Err(Error::format(
                path,
                format!(
                    "line {}: node line has {} fields, expected {}",
                    lineno,
                    parts.len(),
                    expected
                ),
            ));
        }

        // parts[0] is the running node index; attribute and marker
        // columns after the coordinates are skipped.
        let x = parse_coord(parts[1], path, lineno, "coordinate")?;
        let y = parse_coord(parts[2], path, lineno, "coordinate")?;
        let z = parse_coord(parts[3], path, lineno, "coordinate")?;
        vertices.push(Point3::new(x, y, z));
    }

    if !seen_header {
        return Err(Error::format(path, "missing node header line"));
    }
    Ok(vertices)
}

fn parse_usize(field: &str, path: &Path, lineno: usize, what: &str) -> Result<usize> {
    field.parse().map_err(|_| {
        Error::format(
            path,
            format!("line {}: invalid {} `{}`", lineno, what, field),
        )
    })
}

fn parse_coord(field: &str, path: &Path, lineno: usize, what: &str) -> Result<Coord> {
    field.parse().map_err(|_| {
        Error::format(
            path,
            format!("line {}: invalid {} `{}`", lineno, what, field),
        )
    })
}
