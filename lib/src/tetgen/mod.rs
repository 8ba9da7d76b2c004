//! TetGen integration.
//!
//! This module covers both sides of the TetGen boundary: parsing the
//! `.node`/`.ele` file pairs the tetrahedralizer reads and writes, and
//! invoking the external `tetgen` binary itself.

mod files;
mod runner;

pub use files::{ele_path, load_volume, node_path, parse_ele, parse_node};
pub use runner::{output_base, TetgenOptions, TetgenRunner, TETGEN_BINARY};
