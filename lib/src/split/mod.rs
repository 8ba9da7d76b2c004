//! Splitting a combined tetrahedral mesh back into per-region meshes.
//!
//! After the combined tetrahedralization every tetrahedron carries the
//! region attribute of the seed it grew from. [`split_by_region`] groups
//! the elements by that attribute and [`write_regions`] emits one
//! `.ele`/`.node` pair per region. Element ids are renumbered from zero
//! within each region while vertex indices keep their combined-volume
//! numbering, so every region file pairs with a copy of the shared node
//! file.

use crate::mesh::{Tetrahedron, VolumeMesh};
use crate::tetgen::node_path;
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Region label of a tetrahedron, taken from its attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub i64);

impl RegionId {
    /// Label for a raw attribute as written by the mesher.
    ///
    /// Attributes are carried as floats in `.ele` files; they are
    /// rounded to the nearest integer so `1` and `1.0` name the same
    /// region.
    #[inline]
    pub fn from_attribute(attribute: f64) -> Self {
        RegionId(attribute.round() as i64)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group the tetrahedra of `volume` by their region attribute.
///
/// Groups keep the element order of the input mesh. A tetrahedron
/// without an attribute cannot be assigned to a region and is an error.
pub fn split_by_region(volume: &VolumeMesh) -> Result<BTreeMap<RegionId, Vec<Tetrahedron>>> {
    let mut groups: BTreeMap<RegionId, Vec<Tetrahedron>> = BTreeMap::new();

    for (index, tetrahedron) in volume.tetrahedra().iter().enumerate() {
        let attribute = tetrahedron
            .attribute
            .ok_or_else(|| Error::Mesh(format!("tetrahedron {index} has no region attribute")))?;
        groups
            .entry(RegionId::from_attribute(attribute))
            .or_default()
            .push(*tetrahedron);
    }

    debug!(
        "split {} tetrahedra into {} regions",
        volume.tetrahedron_count(),
        groups.len()
    );
    Ok(groups)
}

/// Write one `.ele`/`.node` pair per region next to `base`.
///
/// For a base of `combined.1` and region `-1` this produces
/// `combined.1_-1_.ele` and `combined.1_-1_.node`. The element file
/// renumbers ids from zero and keeps the combined vertex indices; the
/// node file is a copy of `combined.1.node`, which must already exist.
///
/// Returns the region ids paired with their element file paths.
pub fn write_regions(
    groups: &BTreeMap<RegionId, Vec<Tetrahedron>>,
    base: &Path,
) -> Result<Vec<(RegionId, PathBuf)>> {
    let node_source = node_path(base);
    let mut written = Vec::with_capacity(groups.len());

    for (&region, tetrahedra) in groups {
        let ele = region_path(base, region, "ele");
        let file = File::create(&ele)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{} 4 0", tetrahedra.len())?;
        for (local, tetrahedron) in tetrahedra.iter().enumerate() {
            writeln!(
                writer,
                "{} {} {} {} {}",
                local,
                tetrahedron.indices[0],
                tetrahedron.indices[1],
                tetrahedron.indices[2],
                tetrahedron.indices[3]
            )?;
        }
        writer.flush()?;

        fs::copy(&node_source, region_path(base, region, "node"))?;
        info!(
            "wrote region {} with {} tetrahedra to {}",
            region,
            tetrahedra.len(),
            ele.display()
        );
        written.push((region, ele));
    }

    Ok(written)
}

/// Path of a per-region file: `<base>_<region>_.<extension>`.
fn region_path(base: &Path, region: RegionId, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("_{region}_.{extension}"));
    PathBuf::from(name)
}
