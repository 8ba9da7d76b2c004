//! External tetrahedralizer invocation.
//!
//! The `tetgen` binary is run synchronously per input file. Its exit
//! status is checked and the expected output pair must exist afterwards;
//! a silent failure of the external tool is never carried forward into
//! the pipeline.

use super::files::{ele_path, node_path};
use crate::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the external tetrahedralizer binary.
pub const TETGEN_BINARY: &str = "tetgen";

/// Switches passed to the tetrahedralizer, rendered as one combined
/// argument the way TetGen expects its switch string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetgenOptions {
    /// Preserve the input surface mesh exactly (`Y`).
    pub preserve_surface: bool,
    /// Propagate region attributes from seed points (`A`).
    pub region_attributes: bool,
    /// Optimize the output mesh quality (`O`).
    pub optimize: bool,
}

impl TetgenOptions {
    /// Options for tetrahedralizing a single closed surface (`-Y`).
    pub const fn surface() -> Self {
        Self {
            preserve_surface: true,
            region_attributes: false,
            optimize: false,
        }
    }

    /// Options for tetrahedralizing the assembled complex (`-YAO`).
    pub const fn combined() -> Self {
        Self {
            preserve_surface: true,
            region_attributes: true,
            optimize: true,
        }
    }

    /// Render the combined switch argument, e.g. `-YAO`.
    ///
    /// Returns `None` when no switch is enabled.
    pub fn switch_string(&self) -> Option<String> {
        let mut switches = String::new();
        if self.preserve_surface {
            switches.push('Y');
        }
        if self.region_attributes {
            switches.push('A');
        }
        if self.optimize {
            switches.push('O');
        }
        if switches.is_empty() {
            None
        } else {
            Some(format!("-{}", switches))
        }
    }
}

impl Default for TetgenOptions {
    fn default() -> Self {
        Self::surface()
    }
}

/// Basename of the output pair TetGen writes for an input file.
///
/// TetGen substitutes the input extension with the run number, so
/// `inner.ply` yields `inner.1.ele` and `inner.1.node`, and
/// `combined.smesh` yields `combined.1.ele` and `combined.1.node`.
pub fn output_base(input: &Path) -> PathBuf {
    input.with_extension("1")
}

/// Blocking wrapper around the external `tetgen` binary.
#[derive(Debug, Clone)]
pub struct TetgenRunner {
    executable: PathBuf,
}

impl TetgenRunner {
    /// Locate the tetrahedralizer on the search path.
    pub fn from_path() -> Result<Self> {
        let executable = which::which(TETGEN_BINARY).map_err(|e| Error::ExternalTool {
            tool: TETGEN_BINARY.into(),
            message: format!("not found on PATH: {}", e),
        })?;
        Ok(Self { executable })
    }

    /// Use an explicit executable path.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Get the resolved executable path.
    #[inline]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Tetrahedralize `input`, blocking until the process exits.
    ///
    /// Fails when the process cannot be started, exits non-zero, or does
    /// not leave the expected `.ele`/`.node` output pair behind. On
    /// success returns the output basename (see [`output_base`]).
    pub fn run(&self, options: TetgenOptions, input: &Path) -> Result<PathBuf> {
        let mut cmd = Command::new(&self.executable);
        if let Some(switches) = options.switch_string() {
            cmd.arg(switches);
        }
        cmd.arg(input);

        info!(
            "running {} {} {}",
            self.tool_name(),
            options.switch_string().unwrap_or_default(),
            input.display()
        );
        let status = cmd.status().map_err(|e| Error::ExternalTool {
            tool: self.tool_name(),
            message: format!("failed to start: {}", e),
        })?;
        if !status.success() {
            return Err(Error::ExternalTool {
                tool: self.tool_name(),
                message: format!("{} for input {}", status, input.display()),
            });
        }

        let output = output_base(input);
        for required in [ele_path(&output), node_path(&output)] {
            if !required.exists() {
                return Err(Error::ExternalTool {
                    tool: self.tool_name(),
                    message: format!("expected output file {} was not written", required.display()),
                });
            }
        }
        debug!("tetrahedralized {} -> {}", input.display(), output.display());
        Ok(output)
    }

    fn tool_name(&self) -> String {
        self.executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| TETGEN_BINARY.to_string())
    }
}
