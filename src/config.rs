// src/config.rs
//
// Two kinds of configuration:
//   - `KernelConfig`: process-wide runtime knobs read once from the environment
//     (parallel threshold, opt-in timing). Nothing here changes results.
//   - `RunConfig`: serialisable record of a run (grid + coefficients) written as
//     `config.json` next to a run's outputs, and readable back.
//
// Environment variables:
//   STENCIL_PAR_THRESHOLD=<points>   parallelise loops over fields with at least this many points
//   STENCIL_TIMING=1                 enable per-operator timing
//   STENCIL_TIMING_EVERY=<calls>     report timing averages every N calls (default 200)

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::GridResult;
use crate::grid::Grid;

pub const PAR_THRESHOLD_DEFAULT: usize = 262_144;
pub const TIMING_EVERY_DEFAULT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Fields with fewer points than this are processed on the calling thread.
    pub par_threshold: usize,
    pub timing: bool,
    pub timing_every: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            par_threshold: PAR_THRESHOLD_DEFAULT,
            timing: false,
            timing_every: TIMING_EVERY_DEFAULT,
        }
    }
}

impl KernelConfig {
    pub fn from_env() -> Self {
        fn get_usize(name: &str) -> Option<usize> {
            std::env::var(name)
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok())
        }

        let mut cfg = Self::default();
        if let Some(v) = get_usize("STENCIL_PAR_THRESHOLD") {
            cfg.par_threshold = v.max(1);
        }
        if let Ok(v) = std::env::var("STENCIL_TIMING") {
            cfg.timing = !matches!(v.trim(), "" | "0" | "false" | "no" | "off");
        }
        if let Some(v) = get_usize("STENCIL_TIMING_EVERY") {
            cfg.timing_every = v.max(1);
        }
        cfg
    }
}

/// Kernel configuration for this process (environment is read on first use).
pub fn kernel_config() -> &'static KernelConfig {
    static CONFIG: OnceLock<KernelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        let cfg = KernelConfig::from_env();
        log::debug!(
            "[stencil] par_threshold={} timing={} timing_every={}",
            cfg.par_threshold,
            cfg.timing,
            cfg.timing_every
        );
        cfg
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub lx: f64,
    pub ly: f64,
    pub lz: f64,
}

impl GridConfig {
    pub fn build(&self) -> GridResult<Grid> {
        Grid::new(self.nx, self.ny, self.nz, self.lx, self.ly, self.lz)
    }
}

impl From<&Grid> for GridConfig {
    fn from(g: &Grid) -> Self {
        Self {
            nx: g.nx(),
            ny: g.ny(),
            nz: g.nz(),
            lx: g.lx(),
            ly: g.ly(),
            lz: g.lz(),
        }
    }
}

/// Diffusivities/viscosities handed to the diffusion operators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub kappa_h: f64,
    pub kappa_v: f64,
    pub nu_h: f64,
    pub nu_v: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            kappa_h: 1.0e-3,
            kappa_v: 1.0e-4,
            nu_h: 1.0e-2,
            nu_v: 1.0e-3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub binary: String,
    pub run_id: String,
    pub repeats: usize,
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub grid: GridConfig,
    pub coefficients: Coefficients,
    pub kernel: KernelConfig,
    pub run: RunInfo,
}

impl RunConfig {
    pub fn write_to_dir(&self, out_dir: &Path) -> std::io::Result<()> {
        let path = out_dir.join("config.json");
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn read_from_dir(dir: &Path) -> std::io::Result<Self> {
        let file = File::open(dir.join("config.json"))?;
        let cfg = serde_json::from_reader(BufReader::new(file))?;
        Ok(cfg)
    }
}
