// src/par.rs
//
// Loop drivers shared by all operators. Work is split into x-rows (nx contiguous
// values, one per (j, k) pair); rows are handed to rayon when the field is large
// enough, otherwise processed in order on the calling thread.

use rayon::prelude::*;

use crate::config::kernel_config;

const PAR_MIN_WORK_PER_THREAD: usize = 4096;

#[inline]
pub fn should_parallel(len: usize) -> bool {
    if len < kernel_config().par_threshold {
        return false;
    }
    let threads = rayon::current_num_threads().max(1);
    len / threads >= PAR_MIN_WORK_PER_THREAD
}

/// Call `f(row, values)` for every x-row of `out`; `row = k*ny + j`.
pub fn for_each_row<F>(out: &mut [f64], nx: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + Sync + Send,
{
    debug_assert_eq!(out.len() % nx, 0);
    if should_parallel(out.len()) {
        out.par_chunks_mut(nx)
            .enumerate()
            .for_each(|(row, values)| f(row, values));
    } else {
        out.chunks_mut(nx)
            .enumerate()
            .for_each(|(row, values)| f(row, values));
    }
}

/// Call `f(n, value)` for every point of `out`; `n` is the flat index.
pub fn for_each_point<F>(out: &mut [f64], f: F)
where
    F: Fn(usize, &mut f64) + Sync + Send,
{
    if should_parallel(out.len()) {
        out.par_iter_mut().enumerate().for_each(|(n, v)| f(n, v));
    } else {
        out.iter_mut().enumerate().for_each(|(n, v)| f(n, v));
    }
}
