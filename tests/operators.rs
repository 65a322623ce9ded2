// tests/operators.rs
//
// Integration checks of the public operator surface.
// Run with: cargo test
// Or only these tests: cargo test --test operators

use staggered_ops::operators::{
    Velocities, advective_flux_divergence, avg_x, avg_y, avg_z, delta_x, delta_y, delta_z,
    divergence, laplacian, laplacian_ppn, momentum_advection_u, momentum_advection_v,
    momentum_advection_w, scalar_biharmonic, scalar_diffusion, vector_diffusion_u,
    vector_diffusion_v, vector_diffusion_w,
};
use staggered_ops::{
    Axis, Cell, EdgeX, EdgeY, EdgeZ, FaceX, FaceY, FaceZ, Field, Grid, GridError, ScratchPool,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn grid() -> Grid {
    Grid::from_spacing(6, 5, 4, 0.4, 0.25, 0.8).unwrap()
}

fn wiggly(i: usize, j: usize, k: usize) -> f64 {
    ((i * 13 + j * 7 + k * 3) % 17) as f64 * 0.25 - 1.5
}

#[test]
fn end_to_end_four_cube_x_difference_and_average() {
    let g = Grid::from_spacing(4, 4, 4, 1.0, 1.0, 1.0).unwrap();
    let f = Field::<Cell>::from_fn(g, |i, _, _| (i + 1) as f64);

    let mut d = Field::<FaceX>::new(g);
    delta_x(&g, &f, &mut d);
    let mut a = Field::<FaceX>::new(g);
    avg_x(&g, &f, &mut a);

    for k in 0..4 {
        for j in 0..4 {
            let dx: Vec<f64> = (0..4).map(|i| d.get(i, j, k)).collect();
            let ax: Vec<f64> = (0..4).map(|i| a.get(i, j, k)).collect();
            assert_eq!(dx, vec![-3.0, 1.0, 1.0, 1.0], "delta_x at j={j} k={k}");
            assert_eq!(ax, vec![2.5, 1.5, 2.5, 3.5], "avg_x at j={j} k={k}");
        }
    }
}

#[test]
fn periodic_round_trip_differences_sum_to_zero() {
    let g = grid();
    let f = Field::<Cell>::from_fn(g, wiggly);

    let mut fx = Field::<FaceX>::new(g);
    let mut back = Field::<Cell>::new(g);
    delta_x(&g, &f, &mut fx);
    delta_x(&g, &fx, &mut back);
    assert!(approx_eq(back.sum(), 0.0, 1e-10), "x: sum = {}", back.sum());

    let mut fy = Field::<FaceY>::new(g);
    delta_y(&g, &f, &mut fy);
    delta_y(&g, &fy, &mut back);
    assert!(approx_eq(back.sum(), 0.0, 1e-10), "y: sum = {}", back.sum());

    // Vertically the round trip telescopes to the zero top face.
    let mut fz = Field::<FaceZ>::new(g);
    delta_z(&g, &f, &mut fz);
    delta_z(&g, &fz, &mut back);
    assert!(approx_eq(back.sum(), 0.0, 1e-10), "z: sum = {}", back.sum());
}

#[test]
fn constant_averages_except_bottom_half() {
    let g = grid();
    let c0 = -2.75;

    let c = Field::<Cell>::from_fn(g, |_, _, _| c0);
    let mut fx = Field::<FaceX>::new(g);
    let mut fy = Field::<FaceY>::new(g);
    let mut fz = Field::<FaceZ>::new(g);
    avg_x(&g, &c, &mut fx);
    avg_y(&g, &c, &mut fy);
    avg_z(&g, &c, &mut fz);
    assert!(fx.data.iter().all(|&v| v == c0));
    assert!(fy.data.iter().all(|&v| v == c0));
    assert!(fz.data.iter().all(|&v| v == c0));

    let mut back = Field::<Cell>::new(g);
    avg_x(&g, &fx, &mut back);
    assert!(back.data.iter().all(|&v| v == c0));
    avg_y(&g, &fy, &mut back);
    assert!(back.data.iter().all(|&v| v == c0));
    avg_z(&g, &fz, &mut back);
    let kb = g.nz() - 1;
    for k in 0..g.nz() {
        for j in 0..g.ny() {
            for i in 0..g.nx() {
                let expected = if k == kb { 0.5 * c0 } else { c0 };
                assert_eq!(back.get(i, j, k), expected, "({i},{j},{k})");
            }
        }
    }
}

#[test]
fn vertical_end_rules_are_exact() {
    let g = grid();
    let f = Field::<Cell>::from_fn(g, wiggly);
    let mut fz = Field::<FaceZ>::new(g);
    fz.fill(7.0);
    delta_z(&g, &f, &mut fz);
    for j in 0..g.ny() {
        for i in 0..g.nx() {
            assert_eq!(fz.get(i, j, 0), 0.0);
        }
    }

    let w = Field::<FaceZ>::from_fn(g, wiggly);
    let mut c = Field::<Cell>::new(g);
    avg_z(&g, &w, &mut c);
    let kb = g.nz() - 1;
    for j in 0..g.ny() {
        for i in 0..g.nx() {
            assert_eq!(c.get(i, j, kb), 0.5 * w.get(i, j, kb));
        }
    }
}

#[test]
fn uniform_flux_divergence_vanishes_above_the_bottom_layer() {
    let g = grid();
    let mut pool = ScratchPool::new(g);
    let c = 1.75;
    let fx = Field::<FaceX>::from_fn(g, |_, _, _| c);
    let fy = Field::<FaceY>::from_fn(g, |_, _, _| c);
    let fz = Field::<FaceZ>::from_fn(g, |_, _, _| c);
    let mut div = Field::<Cell>::new(g);
    divergence(&g, &fx, &fy, &fz, &mut div, &mut pool);

    // The bottom face is not stored and counts as zero, so the bottom layer sees
    // the full outflow c through its top face.
    let kb = g.nz() - 1;
    let bottom = c * g.az() / g.volume();
    for k in 0..g.nz() {
        for j in 0..g.ny() {
            for i in 0..g.nx() {
                let expected = if k == kb { bottom } else { 0.0 };
                assert!(
                    approx_eq(div.get(i, j, k), expected, 1e-12),
                    "({i},{j},{k}): got {}, expected {expected}",
                    div.get(i, j, k)
                );
            }
        }
    }

    // With no flux through the top face the column integral is zero as well.
    let mut fz0 = fz.clone();
    fz0.layer_mut(0).fill(0.0);
    divergence(&g, &fx, &fy, &fz0, &mut div, &mut pool);
    assert!(approx_eq(div.sum(), 0.0, 1e-9), "sum = {}", div.sum());
}

#[test]
fn divergence_scales_with_cell_geometry() {
    // Same index-space flux, twice the x spacing: the x contribution halves.
    let g1 = Grid::from_spacing(5, 4, 3, 1.0, 1.0, 1.0).unwrap();
    let g2 = Grid::from_spacing(5, 4, 3, 2.0, 1.0, 1.0).unwrap();
    let profile = |i: usize, _: usize, _: usize| (i * i) as f64;

    let mut div1 = Field::<Cell>::new(g1);
    let mut pool1 = ScratchPool::new(g1);
    divergence(
        &g1,
        &Field::<FaceX>::from_fn(g1, profile),
        &Field::<FaceY>::new(g1),
        &Field::<FaceZ>::new(g1),
        &mut div1,
        &mut pool1,
    );

    let mut div2 = Field::<Cell>::new(g2);
    let mut pool2 = ScratchPool::new(g2);
    divergence(
        &g2,
        &Field::<FaceX>::from_fn(g2, profile),
        &Field::<FaceY>::new(g2),
        &Field::<FaceZ>::new(g2),
        &mut div2,
        &mut pool2,
    );

    for (a, b) in div1.data.iter().zip(&div2.data) {
        assert!(approx_eq(*b, 0.5 * a, 1e-12), "{b} vs {a}/2");
    }
}

#[test]
fn every_operator_maps_zero_to_zero() {
    let g = grid();
    let mut pool = ScratchPool::new(g);
    // Leave garbage in every slot: outputs must not depend on it.
    for f in &mut pool.cell {
        f.fill(3.0);
    }
    for f in &mut pool.face_x {
        f.fill(-1.0);
    }
    for f in &mut pool.edge_y {
        f.fill(8.0);
    }

    let u = Field::<FaceX>::new(g);
    let v = Field::<FaceY>::new(g);
    let w = Field::<FaceZ>::new(g);
    let q = Field::<Cell>::new(g);
    let vel = Velocities::new(&u, &v, &w);

    let mut c = Field::<Cell>::new(g);
    let mut fx = Field::<FaceX>::new(g);
    let mut fy = Field::<FaceY>::new(g);
    let mut fz = Field::<FaceZ>::new(g);
    let mut ex = Field::<EdgeX>::new(g);
    let mut ey = Field::<EdgeY>::new(g);
    let mut ez = Field::<EdgeZ>::new(g);

    fn check<L: staggered_ops::Location>(name: &str, f: &mut Field<L>) {
        assert_eq!(f.max_abs(), 0.0, "{name}");
        f.fill(5.0);
    }

    c.fill(5.0);
    fx.fill(5.0);
    fy.fill(5.0);
    fz.fill(5.0);
    ex.fill(5.0);
    ey.fill(5.0);
    ez.fill(5.0);

    delta_x(&g, &q, &mut fx);
    check("delta_x", &mut fx);
    delta_y(&g, &u, &mut ez);
    check("delta_y", &mut ez);
    delta_z(&g, &v, &mut ex);
    check("delta_z", &mut ex);
    avg_x(&g, &w, &mut ey);
    check("avg_x", &mut ey);
    avg_y(&g, &q, &mut fy);
    check("avg_y", &mut fy);
    avg_z(&g, &w, &mut c);
    check("avg_z", &mut c);

    divergence(&g, &u, &v, &w, &mut c, &mut pool);
    check("divergence", &mut c);
    advective_flux_divergence(&g, &u, &v, &w, &q, &mut c, &mut pool);
    check("advective_flux_divergence", &mut c);
    momentum_advection_u(&g, vel, &mut fx, &mut pool);
    check("momentum_advection_u", &mut fx);
    momentum_advection_v(&g, vel, &mut fy, &mut pool);
    check("momentum_advection_v", &mut fy);
    momentum_advection_w(&g, vel, &mut fz, &mut pool);
    check("momentum_advection_w", &mut fz);
    scalar_diffusion(&g, &q, &mut c, 0.3, 0.1, &mut pool);
    check("scalar_diffusion", &mut c);
    laplacian(&g, &q, &mut c, &mut pool);
    check("laplacian", &mut c);
    scalar_biharmonic(&g, &q, &mut c, 0.3, 0.1, &mut pool);
    check("scalar_biharmonic", &mut c);
    vector_diffusion_u(&g, &u, &mut fx, 0.3, 0.1, &mut pool);
    check("vector_diffusion_u", &mut fx);
    vector_diffusion_v(&g, &v, &mut fy, 0.3, 0.1, &mut pool);
    check("vector_diffusion_v", &mut fy);
    vector_diffusion_w(&g, &w, &mut fz, 0.3, 0.1, &mut pool);
    check("vector_diffusion_w", &mut fz);
    laplacian_ppn(&g, &q, &mut c);
    check("laplacian_ppn", &mut c);
}

#[test]
fn tracer_advection_matches_flux_form_by_hand() {
    // q varies in x only, u uniform: div = Ax u (avg_x q [i+1] - avg_x q [i]) / V
    let g = grid();
    let mut pool = ScratchPool::new(g);
    let u0 = 0.6;
    let u = Field::<FaceX>::from_fn(g, |_, _, _| u0);
    let v = Field::<FaceY>::new(g);
    let w = Field::<FaceZ>::new(g);
    let q = Field::<Cell>::from_fn(g, |i, _, _| (i * i) as f64);
    let mut out = Field::<Cell>::new(g);
    advective_flux_divergence(&g, &u, &v, &w, &q, &mut out, &mut pool);

    let nx = g.nx();
    let qf = |i: usize| 0.5 * ((i * i) as f64 + ((i + nx - 1) % nx).pow(2) as f64);
    for i in 0..nx {
        let expected = g.ax() * u0 * (qf((i + 1) % nx) - qf(i)) / g.volume();
        assert!(
            approx_eq(out.get(i, 2, 1), expected, 1e-12),
            "i={i}: got {}, expected {expected}",
            out.get(i, 2, 1)
        );
    }
}

#[test]
fn degenerate_grids_are_rejected() {
    assert_eq!(
        Grid::new(8, 1, 4, 1.0, 1.0, 1.0),
        Err(GridError::TooFewCells { axis: Axis::Y, n: 1 })
    );
    assert!(matches!(
        Grid::from_spacing(4, 4, 4, 1.0, 1.0, -0.5),
        Err(GridError::NonPositiveLength { axis: Axis::Z, .. })
    ));
    assert!(Grid::new(4, 4, 4, f64::NAN, 1.0, 1.0).is_err());
}
