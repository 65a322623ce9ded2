// src/operators/divergence.rs
//
// Finite-volume divergence and the advective flux divergence of a tracer.

use crate::field::Field;
use crate::grid::Grid;
use crate::par::for_each_point;
use crate::position::{Cell, DualX, DualY, DualZ, FaceX, FaceY, FaceZ};
use crate::scratch::ScratchPool;
use crate::timing::{self, Op};

use super::{avg_x, avg_y, avg_z, delta_x, delta_y, delta_z};

/// A position at which a divergence can be formed: it has a dual along all three
/// axes, and the pool carries three scratch slots for it.
pub trait DivergenceSite: DualX + DualY + DualZ {
    fn divergence_scratch(pool: &mut ScratchPool) -> &mut [Field<Self>; 3];
}

impl DivergenceSite for Cell {
    fn divergence_scratch(pool: &mut ScratchPool) -> &mut [Field<Self>; 3] {
        &mut pool.cell
    }
}

impl DivergenceSite for FaceX {
    fn divergence_scratch(pool: &mut ScratchPool) -> &mut [Field<Self>; 3] {
        &mut pool.face_x
    }
}

impl DivergenceSite for FaceY {
    fn divergence_scratch(pool: &mut ScratchPool) -> &mut [Field<Self>; 3] {
        &mut pool.face_y
    }
}

impl DivergenceSite for FaceZ {
    fn divergence_scratch(pool: &mut ScratchPool) -> &mut [Field<Self>; 3] {
        &mut pool.face_z
    }
}

/// `out = (Ax δx fx + Ay δy fy + Az δz fz) / V`
///
/// The fluxes live at the x-, y- and z-duals of the output position; for a cell
/// output that is (FaceX, FaceY, FaceZ), for a face-x output (Cell, EdgeZ, EdgeY).
pub fn divergence<L: DivergenceSite>(
    grid: &Grid,
    fx: &Field<<L as DualX>::Out>,
    fy: &Field<<L as DualY>::Out>,
    fz: &Field<<L as DualZ>::Out>,
    out: &mut Field<L>,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    divergence_with_scratch(grid, fx, fy, fz, out, L::divergence_scratch(pool));
    timing::record(Op::Divergence, t0);
}

/// Same as [`divergence`], with the three scratch slots passed explicitly so that
/// composites can take a divergence of fields that themselves live in the pool.
///
/// Steps: fx -> s0, fy -> s1, fz -> s2; (s0, s1, s2) -> out.
pub fn divergence_with_scratch<L: DivergenceSite>(
    grid: &Grid,
    fx: &Field<<L as DualX>::Out>,
    fy: &Field<<L as DualY>::Out>,
    fz: &Field<<L as DualZ>::Out>,
    out: &mut Field<L>,
    scratch: &mut [Field<L>; 3],
) {
    out.assert_fits(grid);
    let [dfx, dfy, dfz] = scratch;
    delta_x(grid, fx, dfx);
    delta_y(grid, fy, dfy);
    delta_z(grid, fz, dfz);

    let (ax, ay, az) = (grid.ax(), grid.ay(), grid.az());
    let inv_v = 1.0 / grid.volume();
    let (a, b, c) = (&dfx.data, &dfy.data, &dfz.data);
    for_each_point(&mut out.data, |n, o| {
        *o = inv_v * (ax * a[n] + ay * b[n] + az * c[n]);
    });
}

/// Divergence of the advective flux of a cell tracer `q` by the velocity (u, v, w).
///
/// Steps:
///   1. avg_x q -> face_x[0];  face_x[0] = Ax * u * face_x[0]        (x flux)
///   2. avg_y q -> face_y[0];  face_y[0] = Ay * v * face_y[0]        (y flux)
///   3. avg_z q -> face_z[0];  face_z[0] = Az * w * face_z[0];
///      top layer of face_z[0] set to zero                            (z flux)
///   4. δx face_x[0] -> cell[0], δy face_y[0] -> cell[1], δz face_z[0] -> cell[2]
///   5. out = (cell[0] + cell[1] + cell[2]) / V
pub fn advective_flux_divergence(
    grid: &Grid,
    u: &Field<FaceX>,
    v: &Field<FaceY>,
    w: &Field<FaceZ>,
    q: &Field<Cell>,
    out: &mut Field<Cell>,
    pool: &mut ScratchPool,
) {
    let t0 = timing::start();
    out.assert_fits(grid);
    let ScratchPool {
        cell,
        face_x,
        face_y,
        face_z,
        ..
    } = pool;

    let flux_x = &mut face_x[0];
    avg_x(grid, q, flux_x);
    flux_x.mul_scaled(u, grid.ax());

    let flux_y = &mut face_y[0];
    avg_y(grid, q, flux_y);
    flux_y.mul_scaled(v, grid.ay());

    let flux_z = &mut face_z[0];
    avg_z(grid, q, flux_z);
    flux_z.mul_scaled(w, grid.az());
    // No flux through the top, whatever w holds there.
    flux_z.layer_mut(0).fill(0.0);

    let [dx, dy, dz] = cell;
    delta_x(grid, &face_x[0], dx);
    delta_y(grid, &face_y[0], dy);
    delta_z(grid, &face_z[0], dz);

    let inv_v = 1.0 / grid.volume();
    let (a, b, c) = (&dx.data, &dy.data, &dz.data);
    for_each_point(&mut out.data, |n, o| {
        *o = inv_v * (a[n] + b[n] + c[n]);
    });
    timing::record(Op::AdvectiveFlux, t0);
}
