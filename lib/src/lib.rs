//! Core library for the meshnest tetrahedral meshing pipeline.
//!
//! meshnest takes several independently meshed closed surfaces, assembles
//! them into a single piecewise linear complex with one interior seed point
//! per sub-mesh, hands the complex to an external tetrahedralizer, and
//! splits the resulting volume back into per-region tetrahedral meshes.
//!
//! The library is organized as:
//! - [`geometry`] - points and bounding boxes
//! - [`mesh`] - surface and volume mesh types plus the ASCII PLY reader
//! - [`tetgen`] - TetGen `.node`/`.ele` parsing and the external process wrapper
//! - [`assembly`] - concatenation of surface meshes into a `.smesh` complex
//! - [`correspondence`] - exact and tolerance-based vertex matching
//! - [`split`] - regrouping a combined volume into per-region meshes
//! - [`pipeline`] - end-to-end orchestration of the above

use std::path::PathBuf;
use thiserror::Error;

pub mod assembly;
pub mod correspondence;
pub mod geometry;
pub mod mesh;
pub mod pipeline;
pub mod split;
pub mod tetgen;

/// Floating-point coordinate type used for all mesh geometry.
pub type Coord = f64;

/// Errors that can occur across the meshing pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mesh file does not conform to its declared format.
    #[error("format error in {}: {message}", path.display())]
    Format {
        /// File that failed to parse.
        path: PathBuf,
        /// What was expected and what was found.
        message: String,
    },

    /// A structurally valid file describes an inconsistent mesh.
    #[error("mesh error: {0}")]
    Mesh(String),

    /// Assembly bookkeeping disagrees with the emitted output.
    #[error("assembly invariant violated: {0}")]
    AssemblyInvariant(String),

    /// The external tetrahedralizer failed or produced no usable output.
    #[error("external tool {tool}: {message}")]
    ExternalTool {
        /// Name of the external binary.
        tool: String,
        /// Exit status or missing-output description.
        message: String,
    },
}

impl Error {
    /// Build an [`Error::Format`] for the given file.
    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
