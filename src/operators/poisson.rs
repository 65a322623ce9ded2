// src/operators/poisson.rs
//
// Direct 7-point Laplacian on a cell field, consistent with a pressure problem that
// is periodic in x/y and has zero normal gradient at the top and bottom.
//
//   interior k : (f[i+1] - 2f + f[i-1])/Δx² + (f[j+1] - 2f + f[j-1])/Δy² + (f[k+1] - 2f + f[k-1])/Δz²
//   k = 0      : horizontal terms as above + (f[1] - f[0])/Δz²
//   k = nz-1   : horizontal terms as above + (f[nz-2] - f[nz-1])/Δz²
//
// Same values as `laplacian` in diffusion.rs, without the scratch pool or the
// flux scaling passes.

use crate::field::Field;
use crate::grid::{Grid, wrap_next, wrap_prev};
use crate::par::for_each_row;
use crate::position::Cell;
use crate::timing::{self, Op};

pub fn laplacian_ppn(grid: &Grid, f: &Field<Cell>, out: &mut Field<Cell>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let t0 = timing::start();

    let (nx, ny, nz) = (grid.nx(), grid.ny(), grid.nz());
    let slab = nx * ny;
    let inv_dx2 = 1.0 / (grid.dx() * grid.dx());
    let inv_dy2 = 1.0 / (grid.dy() * grid.dy());
    let inv_dz2 = 1.0 / (grid.dz() * grid.dz());
    let src = &f.data;

    for_each_row(&mut out.data, nx, |row, o| {
        let (j, k) = (row % ny, row / ny);
        let here = &src[row * nx..(row + 1) * nx];
        let south = (k * ny + wrap_prev(j, ny)) * nx;
        let north = (k * ny + wrap_next(j, ny)) * nx;
        let south = &src[south..south + nx];
        let north = &src[north..north + nx];

        for i in 0..nx {
            let c = here[i];
            let xx = (here[wrap_next(i, nx)] - 2.0 * c + here[wrap_prev(i, nx)]) * inv_dx2;
            let yy = (north[i] - 2.0 * c + south[i]) * inv_dy2;
            let zz = if k == 0 {
                src[row * nx + slab + i] - c
            } else if k == nz - 1 {
                src[row * nx - slab + i] - c
            } else {
                src[row * nx + slab + i] - 2.0 * c + src[row * nx - slab + i]
            } * inv_dz2;
            o[i] = xx + yy + zz;
        }
    });

    timing::record(Op::LaplacianPpn, t0);
}
