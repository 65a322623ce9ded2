// src/operators/average.rs
//
// Two-point averages along one axis, with the same position pairing as the
// differences.
//
// x, y (periodic):
//   center -> face : out[i] = (in[i] + in[i-1]) / 2,   out[0]   = (in[0] + in[n-1]) / 2
//   face -> center : out[i] = (in[i] + in[i+1]) / 2,   out[n-1] = (in[n-1] + in[0]) / 2
//
// z (k = 0 at the top):
//   center -> face : out[k] = (in[k] + in[k-1]) / 2,   out[0]    = in[0]          (top takes the top cell)
//   face -> center : out[k] = (in[k] + in[k+1]) / 2,   out[nz-1] = in[nz-1] / 2   (zero below the bottom)
//
// The two vertical end rules are deliberately different.

use crate::field::Field;
use crate::grid::{Grid, wrap_next, wrap_prev};
use crate::par::for_each_row;
use crate::position::{Axis, DualX, DualY, DualZ, Stagger};

pub fn avg_x<L: DualX>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let nx = grid.nx();
    let src = &f.data;

    match L::POSITION.stagger(Axis::X) {
        Stagger::Center => for_each_row(&mut out.data, nx, |row, o| {
            let s = &src[row * nx..(row + 1) * nx];
            o[0] = 0.5 * (s[0] + s[nx - 1]);
            for i in 1..nx {
                o[i] = 0.5 * (s[i] + s[i - 1]);
            }
        }),
        Stagger::Face => for_each_row(&mut out.data, nx, |row, o| {
            let s = &src[row * nx..(row + 1) * nx];
            for i in 0..nx - 1 {
                o[i] = 0.5 * (s[i] + s[i + 1]);
            }
            o[nx - 1] = 0.5 * (s[nx - 1] + s[0]);
        }),
    }
}

pub fn avg_y<L: DualY>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let nx = grid.nx();
    let ny = grid.ny();
    let src = &f.data;

    // Both directions average a row with one periodic neighbour row; only the neighbour differs.
    let neighbour: fn(usize, usize) -> usize = match L::POSITION.stagger(Axis::Y) {
        Stagger::Center => wrap_prev,
        Stagger::Face => wrap_next,
    };

    for_each_row(&mut out.data, nx, |row, o| {
        let (j, k) = (row % ny, row / ny);
        let here = &src[row * nx..(row + 1) * nx];
        let other = (k * ny + neighbour(j, ny)) * nx;
        let other = &src[other..other + nx];
        for i in 0..nx {
            o[i] = 0.5 * (here[i] + other[i]);
        }
    });
}

pub fn avg_z<L: DualZ>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let nx = grid.nx();
    let ny = grid.ny();
    let nz = grid.nz();
    let slab = nx * ny;
    let src = &f.data;

    match L::POSITION.stagger(Axis::Z) {
        Stagger::Center => for_each_row(&mut out.data, nx, |row, o| {
            let k = row / ny;
            let here = &src[row * nx..(row + 1) * nx];
            if k == 0 {
                o.copy_from_slice(here);
                return;
            }
            let above = &src[row * nx - slab..(row + 1) * nx - slab];
            for i in 0..nx {
                o[i] = 0.5 * (here[i] + above[i]);
            }
        }),
        Stagger::Face => for_each_row(&mut out.data, nx, |row, o| {
            let k = row / ny;
            let here = &src[row * nx..(row + 1) * nx];
            if k == nz - 1 {
                for i in 0..nx {
                    o[i] = 0.5 * here[i];
                }
                return;
            }
            let below = &src[row * nx + slab..(row + 1) * nx + slab];
            for i in 0..nx {
                o[i] = 0.5 * (here[i] + below[i]);
            }
        }),
    }
}
