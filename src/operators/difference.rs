// src/operators/difference.rs
//
// First differences along one axis. The output position is the input position
// with its staggering flipped along that axis (see `position.rs`).
//
// x, y (periodic):
//   center -> face : out[i] = in[i] - in[i-1],    out[0]   = in[0] - in[n-1]
//   face -> center : out[i] = in[i+1] - in[i],    out[n-1] = in[0] - in[n-1]
//
// z (k = 0 at the top, zero flux through top and bottom):
//   center -> face : out[k] = in[k-1] - in[k],    out[0]    = 0
//   face -> center : out[k] = in[k] - in[k+1],    out[nz-1] = in[nz-1]   (nothing below the bottom)

use crate::field::Field;
use crate::grid::{Grid, wrap_next, wrap_prev};
use crate::par::for_each_row;
use crate::position::{Axis, DualX, DualY, DualZ, Stagger};

pub fn delta_x<L: DualX>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let nx = grid.nx();
    let src = &f.data;

    match L::POSITION.stagger(Axis::X) {
        Stagger::Center => for_each_row(&mut out.data, nx, |row, o| {
            let s = &src[row * nx..(row + 1) * nx];
            o[0] = s[0] - s[nx - 1];
            for i in 1..nx {
                o[i] = s[i] - s[i - 1];
            }
        }),
        Stagger::Face => for_each_row(&mut out.data, nx, |row, o| {
            let s = &src[row * nx..(row + 1) * nx];
            for i in 0..nx - 1 {
                o[i] = s[i + 1] - s[i];
            }
            o[nx - 1] = s[0] - s[nx - 1];
        }),
    }
}

pub fn delta_y<L: DualY>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
    f.assert_fits(grid);
    out.assert_fits(grid);
    let nx = grid.nx();
    let ny = grid.ny();
    let src = &f.data;

    match L::POSITION.stagger(Axis::Y) {
        Stagger::Center => for_each_row(&mut out.data, nx, |row, o| {
            let (j, k) = (row % ny, row / ny);
            let here = &src[row * nx..(row + 1) * nx];
            let south = (k * ny + wrap_prev(j, ny)) * nx;
            let south = &src[south..south + nx];
            for i in 0..nx {
                o[i] = here[i] - south[i];
            }
        }),
        Stagger::Face => for_each_row(&mut out.data, nx, |row, o| {
            let (j, k) = (row % ny, row / ny);
            let here = &src[row * nx..(row + 1) * nx];
            let north = (k * ny + wrap_next(j, ny)) * nx;
            let north = &src[north..north + nx];
            for i in 0..nx {
                o[i] = north[i] - here[i];
            }
        }),
    }
}

pub fn delta_z<L: DualZ>(grid: &Grid, f: &Field<L>, out: &mut Field<L::Out>) {
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
            if k == 0 {
                o.fill(0.0);
                return;
            }
            let here = &src[row * nx..(row + 1) * nx];
            let above = &src[row * nx - slab..(row + 1) * nx - slab];
            for i in 0..nx {
                o[i] = above[i] - here[i];
            }
        }),
        Stagger::Face => for_each_row(&mut out.data, nx, |row, o| {
            let k = row / ny;
            let here = &src[row * nx..(row + 1) * nx];
            if k == nz - 1 {
                o.copy_from_slice(here);
                return;
            }
            let below = &src[row * nx + slab..(row + 1) * nx + slab];
            for i in 0..nx {
                o[i] = here[i] - below[i];
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Cell, EdgeX, EdgeY, EdgeZ, FaceX, FaceY, FaceZ};

    fn grid() -> Grid {
        Grid::from_spacing(4, 3, 5, 1.0, 1.0, 1.0).unwrap()
    }

    /// Reference loop form of the x-difference for any input staggering.
    fn reference_x(g: &Grid, s: Stagger, f: impl Fn(usize, usize, usize) -> f64) -> Vec<f64> {
        let mut out = vec![0.0; g.n_cells()];
        for k in 0..g.nz() {
            for j in 0..g.ny() {
                for i in 0..g.nx() {
                    out[g.idx(i, j, k)] = match s {
                        Stagger::Center => f(i, j, k) - f(wrap_prev(i, g.nx()), j, k),
                        Stagger::Face => f(wrap_next(i, g.nx()), j, k) - f(i, j, k),
                    };
                }
            }
        }
        out
    }

    fn sample(i: usize, j: usize, k: usize) -> f64 {
        ((i * i) as f64) + 0.3 * (j as f64).powi(3) - 1.7 * (k as f64) + 0.01 * (i * j * k) as f64
    }

    #[test]
    fn x_difference_matches_loop_form() {
        let g = grid();
        let c = Field::<Cell>::from_fn(g, sample);
        let mut fx = Field::<FaceX>::new(g);
        delta_x(&g, &c, &mut fx);
        assert_eq!(fx.data, reference_x(&g, Stagger::Center, sample));

        let mut back = Field::<Cell>::new(g);
        let u = Field::<FaceX>::from_fn(g, sample);
        delta_x(&g, &u, &mut back);
        assert_eq!(back.data, reference_x(&g, Stagger::Face, sample));
    }

    #[test]
    fn edge_variants_reuse_face_rules() {
        let g = grid();
        let v = Field::<FaceY>::from_fn(g, sample);
        let mut e = Field::<EdgeZ>::new(g);
        delta_x(&g, &v, &mut e);
        assert_eq!(e.data, reference_x(&g, Stagger::Center, sample));

        let e = Field::<EdgeY>::from_fn(g, sample);
        let mut w = Field::<FaceZ>::new(g);
        delta_x(&g, &e, &mut w);
        assert_eq!(w.data, reference_x(&g, Stagger::Face, sample));
    }

    #[test]
    fn y_difference_wraps_south_and_north() {
        let g = grid();
        let c = Field::<Cell>::from_fn(g, |_, j, _| (j + 1) as f64);
        let mut fy = Field::<FaceY>::new(g);
        delta_y(&g, &c, &mut fy);
        for k in 0..g.nz() {
            for i in 0..g.nx() {
                assert_eq!(fy.get(i, 0, k), 1.0 - 3.0);
                assert_eq!(fy.get(i, 1, k), 1.0);
                assert_eq!(fy.get(i, 2, k), 1.0);
            }
        }

        let e = Field::<EdgeX>::from_fn(g, |_, j, _| (j * j) as f64);
        let mut w = Field::<FaceZ>::new(g);
        delta_y(&g, &e, &mut w);
        assert_eq!(w.get(1, 0, 2), 1.0);
        assert_eq!(w.get(1, 1, 2), 3.0);
        assert_eq!(w.get(1, 2, 2), 0.0 - 4.0);
    }

    #[test]
    fn z_difference_is_zero_at_top_and_one_sided_at_bottom() {
        let g = grid();
        let c = Field::<Cell>::from_fn(g, |i, _, k| (i + 1) as f64 * (k * k) as f64 + 7.0);
        let mut fz = Field::<FaceZ>::new(g);
        delta_z(&g, &c, &mut fz);
        for j in 0..g.ny() {
            for i in 0..g.nx() {
                assert_eq!(fz.get(i, j, 0), 0.0, "top face must carry no difference");
                for k in 1..g.nz() {
                    assert_eq!(fz.get(i, j, k), c.get(i, j, k - 1) - c.get(i, j, k));
                }
            }
        }

        let w = Field::<FaceZ>::from_fn(g, |_, j, k| (j + 2 * k) as f64 + 0.5);
        let mut out = Field::<Cell>::new(g);
        delta_z(&g, &w, &mut out);
        let kb = g.nz() - 1;
        for j in 0..g.ny() {
            for i in 0..g.nx() {
                assert_eq!(out.get(i, j, kb), w.get(i, j, kb));
                for k in 0..kb {
                    assert_eq!(out.get(i, j, k), -2.0);
                }
            }
        }
    }

    #[test]
    fn z_difference_on_edges() {
        let g = grid();
        let u = Field::<FaceX>::from_fn(g, |_, _, k| (k + 1) as f64);
        let mut e = Field::<EdgeY>::new(g);
        delta_z(&g, &u, &mut e);
        assert_eq!(e.get(0, 0, 0), 0.0);
        assert_eq!(e.get(3, 2, 4), -1.0);

        let e = Field::<EdgeX>::from_fn(g, |_, _, k| (k + 1) as f64);
        let mut v = Field::<FaceY>::new(g);
        delta_z(&g, &e, &mut v);
        assert_eq!(v.get(0, 0, 0), -1.0);
        assert_eq!(v.get(0, 0, 4), 5.0);
    }

    #[test]
    fn two_point_axes_are_supported() {
        let g = Grid::from_spacing(2, 2, 2, 1.0, 1.0, 1.0).unwrap();
        let c = Field::<Cell>::from_fn(g, |i, _, _| i as f64);
        let mut fx = Field::<FaceX>::new(g);
        delta_x(&g, &c, &mut fx);
        assert_eq!(fx.get(0, 0, 0), -1.0);
        assert_eq!(fx.get(1, 0, 0), 1.0);
    }

    #[test]
    #[should_panic(expected = "Cell field is 8x4x2, grid is 4x8x2")]
    fn input_built_for_a_transposed_grid_is_rejected() {
        // Same point count: only the shape tells the two layouts apart.
        let built = Grid::from_spacing(8, 4, 2, 1.0, 1.0, 1.0).unwrap();
        let passed = Grid::from_spacing(4, 8, 2, 1.0, 1.0, 1.0).unwrap();
        let f = Field::<Cell>::from_fn(built, |i, _, _| i as f64);
        let mut out = Field::<FaceX>::new(passed);
        delta_x(&passed, &f, &mut out);
    }
}
