//! ASCII PLY surface mesh loading.
//!
//! Supports the subset of the Stanford PLY format used for closed triangle
//! surfaces: an ASCII header declaring vertex and face element counts,
//! optional key-value comments, and a body of vertex coordinate lines
//! followed by triangle index lines. Binary PLY variants are rejected by
//! the format declaration check.

use super::{Face, SurfaceMesh};
use crate::geometry::Point3;
use crate::{Coord, Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// States of the header and body scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Expecting the `ply` magic token.
    Magic,
    /// Expecting the `format ascii 1.0` declaration.
    Format,
    /// Inside the header, before `end_header`.
    Header,
    /// Reading declared vertex lines.
    Vertices,
    /// Reading declared face lines.
    Faces,
    /// All declared elements consumed.
    Done,
}

/// Load a surface mesh from an ASCII PLY file.
///
/// The mesh name is taken from the file stem.
pub fn load_ply<P: AsRef<Path>>(path: P) -> Result<SurfaceMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse_ply(BufReader::new(file), path)
}

/// Parse an ASCII PLY surface mesh from a reader.
///
/// `path` supplies the mesh name and error context; it does not have to
/// exist on disk.
pub fn parse_ply<R: BufRead>(reader: R, path: &Path) -> Result<SurfaceMesh> {
    let mut state = ParseState::Magic;
    let mut declared_vertices = 0usize;
    let mut declared_faces = 0usize;

    let mut mesh = SurfaceMesh::new();
    if let Some(stem) = path.file_stem() {
        mesh.set_name(stem.to_string_lossy());
    }

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let lineno = idx + 1;

        match state {
            ParseState::Magic => {
                if line.is_empty() {
                    continue;
                }
                if line != "ply" {
                    return Err(Error::format(
                        path,
                        format!("line {}: expected `ply` magic, found `{}`", lineno, line),
                    ));
                }
                state = ParseState::Format;
            }
            ParseState::Format => {
                if line.is_empty() {
                    continue;
                }
                if line != "format ascii 1.0" {
                    return Err(Error::format(
                        path,
                        format!(
                            "line {}: expected `format ascii 1.0`, found `{}`",
                            lineno, line
                        ),
                    ));
                }
                state = ParseState::Header;
            }
            ParseState::Header => {
                if line.is_empty() {
                    continue;
                }
                if line == "end_header" {
                    mesh.reserve(declared_vertices, declared_faces);
                    state = body_state(declared_vertices, declared_faces);
                    continue;
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 3 && parts[0] == "element" && parts[1] == "vertex" {
                    declared_vertices = parse_count(parts[2], path, lineno, "vertex")?;
                } else if parts.len() >= 3 && parts[0] == "element" && parts[1] == "face" {
                    declared_faces = parse_count(parts[2], path, lineno, "face")?;
                } else if parts.len() >= 3 && parts[0] == "comment" {
                    mesh.insert_metadata(parts[1], parts[2..].join(" "));
                }
                // Property declarations and other header lines are ignored.
            }
            ParseState::Vertices => {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 3 {
                    return Err(Error::format(
                        path,
                        format!(
                            "line {}: vertex line has {} fields, expected at least 3",
                            lineno,
                            parts.len()
                        ),
                    ));
                }
                let x = parse_coord(parts[0], path, lineno)?;
                let y = parse_coord(parts[1], path, lineno)?;
                let z = parse_coord(parts[2], path, lineno)?;
                mesh.add_vertex(Point3::new(x, y, z));

                if mesh.vertex_count() == declared_vertices {
                    state = if declared_faces > 0 {
                        ParseState::Faces
                    } else {
                        ParseState::Done
                    };
                }
            }
            ParseState::Faces => {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let arity: usize = parts
                    .first()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| {
                        Error::format(
                            path,
                            format!("line {}: malformed face vertex count", lineno),
                        )
                    })?;
                if arity != 3 {
                    return Err(Error::format(
                        path,
                        format!(
                            "line {}: face with {} vertices, only triangles are supported",
                            lineno, arity
                        ),
                    ));
                }
                if parts.len() < 4 {
                    return Err(Error::format(
                        path,
                        format!(
                            "line {}: face line has {} fields, expected at least 4",
                            lineno,
                            parts.len()
                        ),
                    ));
                }
                let v0 = parse_index(parts[1], path, lineno)?;
                let v1 = parse_index(parts[2], path, lineno)?;
                let v2 = parse_index(parts[3], path, lineno)?;
                mesh.add_face(Face::new(v0, v1, v2));

                if mesh.face_count() == declared_faces {
                    state = ParseState::Done;
                }
            }
            // Anything after the declared elements is ignored.
            ParseState::Done => break,
        }
    }

    match state {
        ParseState::Done => {}
        ParseState::Magic => {
            return Err(Error::format(path, "missing `ply` magic"));
        }
        ParseState::Format => {
            return Err(Error::format(path, "missing `format ascii 1.0` declaration"));
        }
        ParseState::Header => {
            return Err(Error::format(path, "missing `end_header`"));
        }
        ParseState::Vertices => {
            return Err(Error::format(
                path,
                format!(
                    "expected {} vertices, file ended after {}",
                    declared_vertices,
                    mesh.vertex_count()
                ),
            ));
        }
        ParseState::Faces => {
            return Err(Error::format(
                path,
                format!(
                    "expected {} faces, file ended after {}",
                    declared_faces,
                    mesh.face_count()
                ),
            ));
        }
    }

    mesh.validate()?;
    Ok(mesh)
}

fn body_state(declared_vertices: usize, declared_faces: usize) -> ParseState {
    if declared_vertices > 0 {
        ParseState::Vertices
    } else if declared_faces > 0 {
        ParseState::Faces
    } else {
        ParseState::Done
    }
}

fn parse_count(field: &str, path: &Path, lineno: usize, element: &str) -> Result<usize> {
    field.parse().map_err(|_| {
        Error::format(
            path,
            format!("line {}: invalid {} count `{}`", lineno, element, field),
        )
    })
}

fn parse_coord(field: &str, path: &Path, lineno: usize) -> Result<Coord> {
    field.parse().map_err(|_| {
        Error::format(
            path,
            format!("line {}: invalid coordinate `{}`", lineno, field),
        )
    })
}

fn parse_index(field: &str, path: &Path, lineno: usize) -> Result<u32> {
    field.parse().map_err(|_| {
        Error::format(
            path,
            format!("line {}: invalid vertex index `{}`", lineno, field),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(content: &str) -> Result<SurfaceMesh> {
        parse_ply(Cursor::new(content), Path::new("test.ply"))
    }

    #[test]
    fn test_parse_minimal() {
        let content = "\
ply
format ascii 1.0
element vertex 3
element face 1
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.name(), "test");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.faces()[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_parse_metadata() {
        let content = "\
ply
format ascii 1.0
comment material G4_WATER
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.material(), Some("G4_WATER"));
    }

    #[test]
    fn test_parse_multi_word_metadata_value() {
        let content = "\
ply
format ascii 1.0
comment source detector cap, outer shell
element vertex 3
end_header
0 0 0
1 0 0
0 1 0
";
        let mesh = parse(content).unwrap();
        assert_eq!(
            mesh.metadata().get("source").map(String::as_str),
            Some("detector cap, outer shell")
        );
    }

    #[test]
    fn test_missing_magic() {
        let content = "solid test\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
        assert!(err.to_string().contains("ply"));
    }

    #[test]
    fn test_wrong_format_declaration() {
        let content = "\
ply
format binary_little_endian 1.0
end_header
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("format ascii 1.0"));
    }

    #[test]
    fn test_missing_end_header() {
        let content = "\
ply
format ascii 1.0
element vertex 1
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("end_header"));
    }

    #[test]
    fn test_vertex_count_short() {
        let content = "\
ply
format ascii 1.0
element vertex 4
element face 0
end_header
0 0 0
1 0 0
0 1 0
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("expected 4 vertices"));
    }

    #[test]
    fn test_face_count_short() {
        let content = "\
ply
format ascii 1.0
element vertex 3
element face 2
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("expected 2 faces"));
    }

    #[test]
    fn test_vertex_line_too_short() {
        let content = "\
ply
format ascii 1.0
element vertex 1
end_header
0 0
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_extra_vertex_fields_ignored() {
        let content = "\
ply
format ascii 1.0
element vertex 3
element face 1
end_header
0 0 0 0.5 0.5 0.5
1 0 0 255 0 0
0 1 0 0 255 0
3 0 1 2 99
";
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces()[0], Face::new(0, 1, 2));
    }

    #[test]
    fn test_non_triangle_face() {
        let content = "\
ply
format ascii 1.0
element vertex 4
element face 1
end_header
0 0 0
1 0 0
1 1 0
0 1 0
4 0 1 2 3
";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("only triangles"));
    }

    #[test]
    fn test_face_index_out_of_range() {
        let content = "\
ply
format ascii 1.0
element vertex 3
element face 1
end_header
0 0 0
1 0 0
0 1 0
3 0 1 7
";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, Error::Mesh(_)));
    }

    #[test]
    fn test_blank_lines_before_magic() {
        let content =
            "\n\nply\nformat ascii 1.0\nelement vertex 3\nend_header\n0 0 0\n1 0 0\n0 1 0\n";
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_trailing_lines_ignored() {
        let content = "\
ply
format ascii 1.0
element vertex 3
element face 1
end_header
0 0 0
1 0 0
0 1 0
3 0 1 2
leftover garbage
";
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_load_ply_from_disk() {
        use std::io::Write;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.ply");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            "ply\nformat ascii 1.0\nelement vertex 3\nelement face 1\nend_header\n\
             0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n"
        )
        .unwrap();

        let mesh = load_ply(&path).unwrap();
        assert_eq!(mesh.name(), "shell");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_load_ply_missing_file() {
        let err = load_ply("no/such/file.ply").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
