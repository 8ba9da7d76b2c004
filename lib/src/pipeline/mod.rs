//! End-to-end mesh nesting.
//!
//! [`NestPipeline`] drives the full flow: each input surface is
//! tetrahedralized on its own to locate an interior seed point, all
//! surfaces are assembled into one `.smesh` with a region seed per
//! input, the combined file is tetrahedralized with region attributes,
//! and the resulting volume is split back into per-region element
//! files.

use crate::assembly::CombinedAssembly;
use crate::geometry::Point3;
use crate::mesh::load_ply;
use crate::split::{split_by_region, write_regions, RegionId};
use crate::tetgen::{load_volume, TetgenOptions, TetgenRunner};
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a nesting run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NestConfig {
    /// Base name for the combined mesh files (`<base>.smesh`, `<base>.1.*`).
    pub output_base: PathBuf,

    /// Switches for the per-surface tetrahedralizations.
    pub surface_options: TetgenOptions,

    /// Switches for the combined tetrahedralization.
    pub combined_options: TetgenOptions,

    /// Explicit tetgen executable; resolved from `PATH` when unset.
    pub executable: Option<PathBuf>,
}

impl NestConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the combined output base name.
    pub fn output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.output_base = base.into();
        self
    }

    /// Builder method: set an explicit tetgen executable.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            output_base: PathBuf::from("combined"),
            surface_options: TetgenOptions::surface(),
            combined_options: TetgenOptions::combined(),
            executable: None,
        }
    }
}

impl fmt::Display for NestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NestConfig(output={}, surface={}, combined={})",
            self.output_base.display(),
            self.surface_options.switch_string().unwrap_or_default(),
            self.combined_options.switch_string().unwrap_or_default()
        )
    }
}

/// Summary of one nested input surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputReport {
    /// Mesh name, taken from the file stem.
    pub name: String,
    /// Path of the input PLY file.
    pub input: PathBuf,
    /// Vertices in the input surface.
    pub vertices: usize,
    /// Faces in the input surface.
    pub faces: usize,
    /// Tetrahedra in the stand-alone tetrahedralization.
    pub tetrahedra: usize,
    /// Seed point marking the interior of this surface.
    pub seed: Point3,
}

/// Outcome of a full nesting run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NestReport {
    /// One entry per input surface, in input order.
    pub inputs: Vec<InputReport>,
    /// Path of the combined `.smesh` file.
    pub smesh: PathBuf,
    /// Tetrahedra in the combined volume.
    pub combined_tetrahedra: usize,
    /// Region ids paired with their element file paths.
    pub regions: Vec<(RegionId, PathBuf)>,
}

impl fmt::Display for NestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NestReport({} inputs, {} tetrahedra, {} regions)",
            self.inputs.len(),
            self.combined_tetrahedra,
            self.regions.len()
        )
    }
}

/// Runs the nesting flow against an external tetgen executable.
#[derive(Debug)]
pub struct NestPipeline {
    config: NestConfig,
    runner: TetgenRunner,
}

impl NestPipeline {
    /// Create a pipeline for `config`, resolving the tetgen executable.
    pub fn new(config: NestConfig) -> Result<Self> {
        let runner = match &config.executable {
            Some(path) => TetgenRunner::with_executable(path.clone()),
            None => TetgenRunner::from_path()?,
        };
        Ok(Self { config, runner })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Get the resolved runner.
    pub fn runner(&self) -> &TetgenRunner {
        &self.runner
    }

    /// Nest `inputs` into one volume and split it back into regions.
    ///
    /// Inputs are processed strictly in order; the facet marker of each
    /// surface and the region grown from its seed both equal the input's
    /// position in `inputs`.
    pub fn run(&self, inputs: &[PathBuf]) -> Result<NestReport> {
        if inputs.is_empty() {
            return Err(Error::Mesh("no input meshes to nest".to_string()));
        }

        let mut assembly = CombinedAssembly::new();
        let mut reports = Vec::with_capacity(inputs.len());

        for input in inputs {
            reports.push(self.nest_input(input, &mut assembly)?);
        }

        let smesh = assembly.write_smesh(&self.config.output_base)?;
        let combined_base = self.runner.run(self.config.combined_options, &smesh)?;
        let volume = load_volume(&combined_base)?;
        debug!(
            "combined volume has {} vertices and {} tetrahedra",
            volume.vertex_count(),
            volume.tetrahedron_count()
        );

        let groups = split_by_region(&volume)?;
        let regions = write_regions(&groups, &combined_base)?;
        info!(
            "nested {} meshes into {} regions under {}",
            reports.len(),
            regions.len(),
            combined_base.display()
        );

        Ok(NestReport {
            inputs: reports,
            smesh,
            combined_tetrahedra: volume.tetrahedron_count(),
            regions,
        })
    }

    /// Tetrahedralize one input on its own and add it to the assembly.
    fn nest_input(&self, input: &Path, assembly: &mut CombinedAssembly) -> Result<InputReport> {
        let surface = load_ply(input)?;
        info!(
            "loaded {} ({} vertices, {} faces)",
            surface.name(),
            surface.vertex_count(),
            surface.face_count()
        );

        let base = self.runner.run(self.config.surface_options, input)?;
        let volume = load_volume(&base)?;
        let seed = volume.seed_point()?;
        debug!("seed for {} is {}", surface.name(), seed);

        let report = InputReport {
            name: surface.name().to_string(),
            input: input.to_path_buf(),
            vertices: surface.vertex_count(),
            faces: surface.face_count(),
            tetrahedra: volume.tetrahedron_count(),
            seed,
        };
        assembly.add(surface, seed);
        Ok(report)
    }
}
