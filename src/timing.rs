// src/timing.rs
//
// Opt-in per-operator timing (STENCIL_TIMING=1). Each composite operator calls
// `start()` on entry and `record()` on exit; when timing is off `start()` returns
// None and `record()` is a no-op. Averages are logged every `timing_every` calls
// of a given operator.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use crate::config::kernel_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Divergence,
    AdvectiveFlux,
    MomentumU,
    MomentumV,
    MomentumW,
    ScalarDiffusion,
    VectorDiffusionU,
    VectorDiffusionV,
    VectorDiffusionW,
    Biharmonic,
    LaplacianPpn,
}

impl Op {
    pub const ALL: [Op; 11] = [
        Op::Divergence,
        Op::AdvectiveFlux,
        Op::MomentumU,
        Op::MomentumV,
        Op::MomentumW,
        Op::ScalarDiffusion,
        Op::VectorDiffusionU,
        Op::VectorDiffusionV,
        Op::VectorDiffusionW,
        Op::Biharmonic,
        Op::LaplacianPpn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Op::Divergence => "divergence",
            Op::AdvectiveFlux => "advective_flux_divergence",
            Op::MomentumU => "momentum_advection_u",
            Op::MomentumV => "momentum_advection_v",
            Op::MomentumW => "momentum_advection_w",
            Op::ScalarDiffusion => "scalar_diffusion",
            Op::VectorDiffusionU => "vector_diffusion_u",
            Op::VectorDiffusionV => "vector_diffusion_v",
            Op::VectorDiffusionW => "vector_diffusion_w",
            Op::Biharmonic => "scalar_biharmonic",
            Op::LaplacianPpn => "laplacian_ppn",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

const N_OPS: usize = Op::ALL.len();

static CALLS: [AtomicUsize; N_OPS] = [const { AtomicUsize::new(0) }; N_OPS];
static TOTAL_NS: [AtomicU64; N_OPS] = [const { AtomicU64::new(0) }; N_OPS];

#[inline]
pub fn start() -> Option<Instant> {
    if kernel_config().timing {
        Some(Instant::now())
    } else {
        None
    }
}

#[inline]
pub fn record(op: Op, t0: Option<Instant>) {
    let Some(t0) = t0 else {
        return;
    };
    let ns = t0.elapsed().as_nanos() as u64;
    let s = op.slot();
    let c = CALLS[s].fetch_add(1, Ordering::Relaxed) + 1;
    let total = TOTAL_NS[s].fetch_add(ns, Ordering::Relaxed) + ns;

    if c % kernel_config().timing_every == 0 {
        log::info!(
            "[stencil timing] {} calls={} avg={:.3} ms",
            op.name(),
            c,
            total as f64 * 1.0e-6 / c as f64
        );
    }
}

/// (calls, average milliseconds) for every operator that has been timed at least once.
pub fn summary() -> Vec<(Op, usize, f64)> {
    Op::ALL
        .into_iter()
        .filter_map(|op| {
            let c = CALLS[op.slot()].load(Ordering::Relaxed);
            if c == 0 {
                return None;
            }
            let total = TOTAL_NS[op.slot()].load(Ordering::Relaxed);
            Some((op, c, total as f64 * 1.0e-6 / c as f64))
        })
        .collect()
}
