// src/operators/advection.rs
//
// Momentum self-advection u·∇u, u·∇v, u·∇w in flux form on the C grid.
//
// Each component is the divergence of three momentum fluxes: the self term is
// formed at cell centers, the two cross terms at the edges shared by the two
// velocity components involved. In every step the slot holding an averaged
// velocity is overwritten with the flux product only after the product has read it.

use crate::field::Field;
use crate::grid::Grid;
use crate::par::for_each_point;
use crate::position::{FaceX, FaceY, FaceZ, Location};
use crate::scratch::ScratchPool;
use crate::timing::{self, Op};

use super::{avg_x, avg_y, avg_z, delta_x, delta_y, delta_z};

/// The three velocity components, borrowed together.
#[derive(Debug, Clone, Copy)]
pub struct Velocities<'a> {
    pub u: &'a Field<FaceX>,
    pub v: &'a Field<FaceY>,
    pub w: &'a Field<FaceZ>,
}

impl<'a> Velocities<'a> {
    pub fn new(u: &'a Field<FaceX>, v: &'a Field<FaceY>, w: &'a Field<FaceZ>) -> Self {
        Self { u, v, w }
    }
}

/// `out = (c0 + c1 + c2) / V`
fn sum_over_volume<L: Location>(grid: &Grid, parts: &[Field<L>; 3], out: &mut Field<L>) {
    out.assert_fits(grid);
    let inv_v = 1.0 / grid.volume();
    let (a, b, c) = (&parts[0].data, &parts[1].data, &parts[2].data);
    for_each_point(&mut out.data, |n, o| {
        *o = inv_v * (a[n] + b[n] + c[n]);
    });
}

/// Advection of u (x-face) by the full velocity.
///
/// Steps:
///   1. avg_x u -> cell[0];   cell[0] = Ax * cell[0]²;              δx cell[0] -> face_x[0]
///   2. avg_y u -> edge_z[0]; avg_x v -> edge_z[1];
///      edge_z[0] = Ay * edge_z[0] * edge_z[1];                     δy edge_z[0] -> face_x[1]
///   3. avg_z u -> edge_y[0]; avg_x w -> edge_y[1];
///      edge_y[0] = Az * edge_y[0] * edge_y[1];                     δz edge_y[0] -> face_x[2]
///   4. out = (face_x[0] + face_x[1] + face_x[2]) / V
pub fn momentum_advection_u(
    grid: &Grid,
    vel: Velocities<'_>,
    out: &mut Field<FaceX>,
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
    let [uu, uv, uw] = face_x;

    let u_c = &mut cell[0];
    avg_x(grid, vel.u, u_c);
    u_c.square_scaled(grid.ax());
    delta_x(grid, u_c, uu);

    let [u_e, v_e] = edge_z;
    avg_y(grid, vel.u, u_e);
    avg_x(grid, vel.v, v_e);
    u_e.mul_scaled(v_e, grid.ay());
    delta_y(grid, u_e, uv);

    let [u_e, w_e] = edge_y;
    avg_z(grid, vel.u, u_e);
    avg_x(grid, vel.w, w_e);
    u_e.mul_scaled(w_e, grid.az());
    delta_z(grid, u_e, uw);

    sum_over_volume(grid, face_x, out);
    timing::record(Op::MomentumU, t0);
}

/// Advection of v (y-face) by the full velocity.
///
/// Steps:
///   1. avg_x v -> edge_z[0]; avg_y u -> edge_z[1];
///      edge_z[0] = Ax * edge_z[0] * edge_z[1];                     δx edge_z[0] -> face_y[0]
///   2. avg_y v -> cell[0];   cell[0] = Ay * cell[0]²;              δy cell[0] -> face_y[1]
///   3. avg_z v -> edge_x[0]; avg_y w -> edge_x[1];
///      edge_x[0] = Az * edge_x[0] * edge_x[1];                     δz edge_x[0] -> face_y[2]
///   4. out = (face_y[0] + face_y[1] + face_y[2]) / V
pub fn momentum_advection_v(
    grid: &Grid,
    vel: Velocities<'_>,
    out: &mut Field<FaceY>,
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
    let [vu, vv, vw] = face_y;

    let [v_e, u_e] = edge_z;
    avg_x(grid, vel.v, v_e);
    avg_y(grid, vel.u, u_e);
    v_e.mul_scaled(u_e, grid.ax());
    delta_x(grid, v_e, vu);

    let v_c = &mut cell[0];
    avg_y(grid, vel.v, v_c);
    v_c.square_scaled(grid.ay());
    delta_y(grid, v_c, vv);

    let [v_e, w_e] = edge_x;
    avg_z(grid, vel.v, v_e);
    avg_y(grid, vel.w, w_e);
    v_e.mul_scaled(w_e, grid.az());
    delta_z(grid, v_e, vw);

    sum_over_volume(grid, face_y, out);
    timing::record(Op::MomentumV, t0);
}

/// Advection of w (z-face) by the full velocity.
///
/// Steps:
///   1. avg_x w -> edge_y[0]; avg_z u -> edge_y[1];
///      edge_y[0] = Ax * edge_y[0] * edge_y[1];                     δx edge_y[0] -> face_z[0]
///   2. avg_y w -> edge_x[0]; avg_z v -> edge_x[1];
///      edge_x[0] = Ay * edge_x[0] * edge_x[1];                     δy edge_x[0] -> face_z[1]
///   3. avg_z w -> cell[0];   cell[0] = Az * cell[0]²;              δz cell[0] -> face_z[2]
///   4. out = (face_z[0] + face_z[1] + face_z[2]) / V
pub fn momentum_advection_w(
    grid: &Grid,
    vel: Velocities<'_>,
    out: &mut Field<FaceZ>,
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
    let [wu, wv, ww] = face_z;

    let [w_e, u_e] = edge_y;
    avg_x(grid, vel.w, w_e);
    avg_z(grid, vel.u, u_e);
    w_e.mul_scaled(u_e, grid.ax());
    delta_x(grid, w_e, wu);

    let [w_e, v_e] = edge_x;
    avg_y(grid, vel.w, w_e);
    avg_z(grid, vel.v, v_e);
    w_e.mul_scaled(v_e, grid.ay());
    delta_y(grid, w_e, wv);

    let w_c = &mut cell[0];
    avg_z(grid, vel.w, w_c);
    w_c.square_scaled(grid.az());
    delta_z(grid, w_c, ww);

    sum_over_volume(grid, face_z, out);
    timing::record(Op::MomentumW, t0);
}
