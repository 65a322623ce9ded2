// src/bin/stencil_bench.rs
//
// Runs every composite operator on smooth analytic fields and reports wall time.
//
// Usage:
//   cargo run --release --bin stencil_bench -- [n=N] [nx=N] [ny=N] [nz=N]
//       [lx=VAL] [ly=VAL] [lz=VAL] [repeats=N] [out=DIR] [run=RUN_ID]
//
//   RUST_LOG=info STENCIL_TIMING=1 cargo run --release --bin stencil_bench -- n=128 repeats=50
//       -> also logs the per-operator running averages kept by the library.
//
// Outputs (per run directory):
//   runs/<run_id>/
//     ├── config.json
//     └── timings.csv        (operator, repeats, total_ms, avg_ms, checksum)

use std::env;
use std::f64::consts::PI;
use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use staggered_ops::config::{Coefficients, GridConfig, RunConfig, RunInfo, kernel_config};
use staggered_ops::operators::{
    Velocities, advective_flux_divergence, divergence, laplacian_ppn, momentum_advection_u,
    momentum_advection_v, momentum_advection_w, scalar_biharmonic, scalar_diffusion,
    vector_diffusion_u, vector_diffusion_v, vector_diffusion_w,
};
use staggered_ops::timing;
use staggered_ops::{Cell, FaceX, FaceY, FaceZ, Field, Grid, Location, ScratchPool};

fn print_usage() {
    eprintln!(
        r#"Usage:
  cargo run --release --bin stencil_bench -- [n=N] [nx=N] [ny=N] [nz=N]
      [lx=VAL] [ly=VAL] [lz=VAL] [repeats=N] [out=DIR] [run=RUN_ID]

Notes:
  - n=N sets nx = ny = nz = N; nx/ny/nz override it per axis.
  - Parallel loops kick in above STENCIL_PAR_THRESHOLD points (default 262144).
"#
    );
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn default_run_id(grid: &Grid) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    format!(
        "{}{:03}_{}x{}x{}",
        now.as_secs(),
        now.subsec_millis(),
        grid.nx(),
        grid.ny(),
        grid.nz()
    )
}

fn parse<T: std::str::FromStr>(key: &str, v: &str) -> io::Result<T> {
    v.parse::<T>().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bad value for {key}: {v:?}"),
        )
    })
}

struct Args {
    grid: GridConfig,
    repeats: usize,
    out_root: String,
    run_id: Option<String>,
}

fn parse_args() -> io::Result<Option<Args>> {
    let mut grid = GridConfig {
        nx: 64,
        ny: 64,
        nz: 32,
        lx: 1.0,
        ly: 1.0,
        lz: 0.5,
    };
    let mut repeats = 20usize;
    let mut out_root = String::from("runs");
    let mut run_id = None;

    for arg in env::args().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(None);
        }
        let Some((key, v)) = arg.split_once('=') else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected key=value, got {arg:?}"),
            ));
        };
        match key {
            "n" => {
                let n = parse(key, v)?;
                grid.nx = n;
                grid.ny = n;
                grid.nz = n;
            }
            "nx" => grid.nx = parse(key, v)?,
            "ny" => grid.ny = parse(key, v)?,
            "nz" => grid.nz = parse(key, v)?,
            "lx" => grid.lx = parse(key, v)?,
            "ly" => grid.ly = parse(key, v)?,
            "lz" => grid.lz = parse(key, v)?,
            "repeats" => repeats = parse::<usize>(key, v)?.max(1),
            "out" => out_root = v.to_string(),
            "run" => run_id = Some(sanitize_run_id(v)),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown option {key:?}"),
                ));
            }
        }
    }

    Ok(Some(Args {
        grid,
        repeats,
        out_root,
        run_id,
    }))
}

fn smooth<L: Location>(grid: &Grid, phase: f64) -> Field<L> {
    let (kx, ky) = (2.0 * PI / grid.lx(), 2.0 * PI / grid.ly());
    let lz = grid.lz();
    let mut f = Field::new(*grid);
    f.set_from_coords(|x, y, z| (kx * x + phase).sin() * (ky * y).cos() * (1.0 + z / lz));
    f
}

struct Timing {
    name: &'static str,
    total_ms: f64,
    checksum: f64,
}

fn bench<L: Location>(
    name: &'static str,
    repeats: usize,
    out: &mut Field<L>,
    mut op: impl FnMut(&mut Field<L>),
) -> Timing {
    let t0 = Instant::now();
    for _ in 0..repeats {
        op(out);
    }
    let total_ms = t0.elapsed().as_secs_f64() * 1.0e3;
    log::info!(
        "{name:<28} total={total_ms:>10.3} ms  avg={:>8.4} ms",
        total_ms / repeats as f64
    );
    Timing {
        name,
        total_ms,
        checksum: out.sum(),
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let grid = args
        .grid
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let coeffs = Coefficients::default();
    let repeats = args.repeats;

    log::info!(
        "grid {}x{}x{} ({} cells), repeats={}, threads={}, par_threshold={}",
        grid.nx(),
        grid.ny(),
        grid.nz(),
        grid.n_cells(),
        repeats,
        rayon::current_num_threads(),
        kernel_config().par_threshold
    );

    let u: Field<FaceX> = smooth(&grid, 0.0);
    let v: Field<FaceY> = smooth(&grid, 0.7);
    let mut w: Field<FaceZ> = smooth(&grid, 1.3);
    w.layer_mut(0).fill(0.0);
    let q: Field<Cell> = smooth(&grid, 2.1);
    let vel = Velocities::new(&u, &v, &w);

    let mut pool = ScratchPool::new(grid);
    let mut c_out = Field::<Cell>::new(grid);
    let mut u_out = Field::<FaceX>::new(grid);
    let mut v_out = Field::<FaceY>::new(grid);
    let mut w_out = Field::<FaceZ>::new(grid);

    let results = vec![
        bench("divergence", repeats, &mut c_out, |o| {
            divergence(&grid, &u, &v, &w, o, &mut pool)
        }),
        bench("advective_flux_divergence", repeats, &mut c_out, |o| {
            advective_flux_divergence(&grid, &u, &v, &w, &q, o, &mut pool)
        }),
        bench("momentum_advection_u", repeats, &mut u_out, |o| {
            momentum_advection_u(&grid, vel, o, &mut pool)
        }),
        bench("momentum_advection_v", repeats, &mut v_out, |o| {
            momentum_advection_v(&grid, vel, o, &mut pool)
        }),
        bench("momentum_advection_w", repeats, &mut w_out, |o| {
            momentum_advection_w(&grid, vel, o, &mut pool)
        }),
        bench("scalar_diffusion", repeats, &mut c_out, |o| {
            scalar_diffusion(&grid, &q, o, coeffs.kappa_h, coeffs.kappa_v, &mut pool)
        }),
        bench("scalar_biharmonic", repeats, &mut c_out, |o| {
            scalar_biharmonic(&grid, &q, o, coeffs.kappa_h, coeffs.kappa_v, &mut pool)
        }),
        bench("vector_diffusion_u", repeats, &mut u_out, |o| {
            vector_diffusion_u(&grid, &u, o, coeffs.nu_h, coeffs.nu_v, &mut pool)
        }),
        bench("vector_diffusion_v", repeats, &mut v_out, |o| {
            vector_diffusion_v(&grid, &v, o, coeffs.nu_h, coeffs.nu_v, &mut pool)
        }),
        bench("vector_diffusion_w", repeats, &mut w_out, |o| {
            vector_diffusion_w(&grid, &w, o, coeffs.nu_h, coeffs.nu_v, &mut pool)
        }),
        bench("laplacian_ppn", repeats, &mut c_out, |o| {
            laplacian_ppn(&grid, &q, o)
        }),
    ];

    for (op, calls, avg_ms) in timing::summary() {
        log::info!("[stencil timing] {} calls={} avg={:.4} ms", op.name(), calls, avg_ms);
    }

    let run_id = args.run_id.unwrap_or_else(|| default_run_id(&grid));
    let out_dir = PathBuf::from(&args.out_root).join(&run_id);
    create_dir_all(&out_dir)?;

    let run_config = RunConfig {
        grid: GridConfig::from(&grid),
        coefficients: coeffs,
        kernel: *kernel_config(),
        run: RunInfo {
            binary: "stencil_bench".to_string(),
            run_id,
            repeats,
            threads: rayon::current_num_threads(),
        },
    };
    run_config.write_to_dir(&out_dir)?;

    let mut csv = BufWriter::new(File::create(out_dir.join("timings.csv"))?);
    writeln!(csv, "operator,repeats,total_ms,avg_ms,checksum")?;
    for r in &results {
        writeln!(
            csv,
            "{},{},{:.6},{:.6},{:.12e}",
            r.name,
            repeats,
            r.total_ms,
            r.total_ms / repeats as f64,
            r.checksum
        )?;
    }
    csv.flush()?;

    log::info!("wrote {}", out_dir.display());
    Ok(())
}
