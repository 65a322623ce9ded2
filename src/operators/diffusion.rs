// src/operators/diffusion.rs
//
// Laplacian-type diffusion with separate horizontal/vertical coefficients.
//
// Every operator here is "difference, scale by coefficient/spacing, take the
// divergence": the first difference lands on the dual positions of the input,
// and `divergence_with_scratch` brings it back with the area/volume weights, so
// e.g. the x term becomes κh * δx(δx q) / Δx².

use crate::field::Field;
use crate::grid::Grid;
use crate::position::{Cell, FaceX, FaceY, FaceZ};
use crate::scratch::ScratchPool;
use crate::timing::{self, Op};

use super::divergence::divergence_with_scratch;
use super::{delta_x, delta_y, delta_z};

/// Diffusive fluxes κ∇q of a cell field, written to the three face slots.
fn scalar_fluxes(
    grid: &Grid,
    q: &Field<Cell>,
    kappa_h: f64,
    kappa_v: f64,
    fx: &mut Field<FaceX>,
    fy: &mut Field<FaceY>,
    fz: &mut Field<FaceZ>,
) {
    delta_x(grid, q, fx);
    fx.scale(kappa_h / grid.dx());
    delta_y(grid, q, fy);
    fy.scale(kappa_h / grid.dy());
    delta_z(grid, q, fz);
    fz.scale(kappa_v / grid.dz());
}

/// `out = ∇·(κ ∇q)` with κ = (κh, κh, κv).
///
/// Steps:
///   1. δx q -> face_x[0], δy q -> face_y[0], δz q -> face_z[0], each scaled by κ/Δ
///   2. divergence of (face_x[0], face_y[0], face_z[0]) -> out, through cell[0..3]
pub fn scalar_diffusion(
    grid: &Grid,
    q: &Field<Cell>,
    out: &mut Field<Cell>,
    kappa_h: f64,
    kappa_v: f64,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    let ScratchPool {
        cell,
        face_x,
        face_y,
        face_z,
        ..
    } = pool;

    scalar_fluxes(
        grid,
        q,
        kappa_h,
        kappa_v,
        &mut face_x[0],
        &mut face_y[0],
        &mut face_z[0],
    );
    divergence_with_scratch(grid, &face_x[0], &face_y[0], &face_z[0], out, cell);
    timing::record(Op::ScalarDiffusion, t0);
}

/// Unit-coefficient Laplacian ∇²q with the zero-flux vertical boundaries.
pub fn laplacian(grid: &Grid, q: &Field<Cell>, out: &mut Field<Cell>, pool: &mut ScratchPool) {
    scalar_diffusion(grid, q, out, 1.0, 1.0, pool);
}

/// `out = ∇·(κ ∇(∇²q))`; negate the result for a dissipative hyperdiffusion tendency.
///
/// Steps:
///   1. ∇²q -> out, as in `scalar_diffusion` with unit coefficients
///   2. δx out -> face_x[0], δy out -> face_y[0], δz out -> face_z[0], scaled by κ/Δ
///      (out is fully read here)
///   3. divergence of (face_x[0], face_y[0], face_z[0]) -> out, through cell[0..3]
pub fn scalar_biharmonic(
    grid: &Grid,
    q: &Field<Cell>,
    out: &mut Field<Cell>,
    kappa_h: f64,
    kappa_v: f64,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    let ScratchPool {
        cell,
        face_x,
        face_y,
        face_z,
        ..
    } = pool;

    scalar_fluxes(grid, q, 1.0, 1.0, &mut face_x[0], &mut face_y[0], &mut face_z[0]);
    divergence_with_scratch(grid, &face_x[0], &face_y[0], &face_z[0], out, cell);

    scalar_fluxes(
        grid,
        out,
        kappa_h,
        kappa_v,
        &mut face_x[0],
        &mut face_y[0],
        &mut face_z[0],
    );
    divergence_with_scratch(grid, &face_x[0], &face_y[0], &face_z[0], out, cell);
    timing::record(Op::Biharmonic, t0);
}

/// `out = ∇·(ν ∇u)` for the x-face velocity.
///
/// Steps:
///   1. δx u -> cell[0] (ν_h/Δx), δy u -> edge_z[0] (ν_h/Δy), δz u -> edge_y[0] (ν_v/Δz)
///   2. divergence of (cell[0], edge_z[0], edge_y[0]) -> out, through face_x[0..3]
pub fn vector_diffusion_u(
    grid: &Grid,
    u: &Field<FaceX>,
    out: &mut Field<FaceX>,
    nu_h: f64,
    nu_v: f64,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    let ScratchPool {
        cell,
        face_x,
        edge_y,
        edge_z,
        ..
    } = pool;

    let gx = &mut cell[0];
    delta_x(grid, u, gx);
    gx.scale(nu_h / grid.dx());
    let gy = &mut edge_z[0];
    delta_y(grid, u, gy);
    gy.scale(nu_h / grid.dy());
    let gz = &mut edge_y[0];
    delta_z(grid, u, gz);
    gz.scale(nu_v / grid.dz());

    divergence_with_scratch(grid, &cell[0], &edge_z[0], &edge_y[0], out, face_x);
    timing::record(Op::VectorDiffusionU, t0);
}

/// `out = ∇·(ν ∇v)` for the y-face velocity.
///
/// Steps:
///   1. δx v -> edge_z[0] (ν_h/Δx), δy v -> cell[0] (ν_h/Δy), δz v -> edge_x[0] (ν_v/Δz)
///   2. divergence of (edge_z[0], cell[0], edge_x[0]) -> out, through face_y[0..3]
pub fn vector_diffusion_v(
    grid: &Grid,
    v: &Field<FaceY>,
    out: &mut Field<FaceY>,
    nu_h: f64,
    nu_v: f64,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    let ScratchPool {
        cell,
        face_y,
        edge_x,
        edge_z,
        ..
    } = pool;

    let gx = &mut edge_z[0];
    delta_x(grid, v, gx);
    gx.scale(nu_h / grid.dx());
    let gy = &mut cell[0];
    delta_y(grid, v, gy);
    gy.scale(nu_h / grid.dy());
    let gz = &mut edge_x[0];
    delta_z(grid, v, gz);
    gz.scale(nu_v / grid.dz());

    divergence_with_scratch(grid, &edge_z[0], &cell[0], &edge_x[0], out, face_y);
    timing::record(Op::VectorDiffusionV, t0);
}

/// `out = ∇·(ν ∇w)` for the z-face velocity.
///
/// Steps:
///   1. δx w -> edge_y[0] (ν_h/Δx), δy w -> edge_x[0] (ν_h/Δy), δz w -> cell[0] (ν_v/Δz)
///   2. divergence of (edge_y[0], edge_x[0], cell[0]) -> out, through face_z[0..3]
pub fn vector_diffusion_w(
    grid: &Grid,
    w: &Field<FaceZ>,
    out: &mut Field<FaceZ>,
    nu_h: f64,
    nu_v: f64,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    let ScratchPool {
        cell,
        face_z,
        edge_x,
        edge_y,
        ..
    } = pool;

    let gx = &mut edge_y[0];
    delta_x(grid, w, gx);
    gx.scale(nu_h / grid.dx());
    let gy = &mut edge_x[0];
    delta_y(grid, w, gy);
    gy.scale(nu_h / grid.dy());
    let gz = &mut cell[0];
    delta_z(grid, w, gz);
    gz.scale(nu_v / grid.dz());

    divergence_with_scratch(grid, &edge_y[0], &edge_x[0], &cell[0], out, face_z);
    timing::record(Op::VectorDiffusionW, t0);
}
