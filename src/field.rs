// src/field.rs

use std::marker::PhantomData;

use crate::error::FieldError;
use crate::grid::Grid;
use crate::par::for_each_point;
use crate::position::{Location, Position};

/// Scalar samples on every (i, j, k) of a grid, stored at position `L`.
///
/// All positions share the grid's shape `nx × ny × nz`; there are no halo layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<L: Location> {
    grid: Grid,
    pub data: Vec<f64>,
    loc: PhantomData<L>,
}

impl<L: Location> Field<L> {
    /// Zero-initialised field.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
            loc: PhantomData,
        }
    }

    /// Wrap an existing buffer laid out as `(k*ny + j)*nx + i`.
    pub fn from_vec(grid: Grid, data: Vec<f64>) -> Result<Self, FieldError> {
        if data.len() != grid.n_cells() {
            return Err(FieldError::ShapeMismatch {
                nx: grid.nx(),
                ny: grid.ny(),
                nz: grid.nz(),
                expected: grid.n_cells(),
                got: data.len(),
            });
        }
        Ok(Self {
            grid,
            data,
            loc: PhantomData,
        })
    }

    /// Field with `f(i, j, k)` at every index.
    pub fn from_fn(grid: Grid, f: impl Fn(usize, usize, usize) -> f64) -> Self {
        let mut field = Self::new(grid);
        for k in 0..grid.nz() {
            for j in 0..grid.ny() {
                for i in 0..grid.nx() {
                    let n = grid.idx(i, j, k);
                    field.data[n] = f(i, j, k);
                }
            }
        }
        field
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn position(&self) -> Position {
        L::POSITION
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        self.grid.idx(i, j, k)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.idx(i, j, k)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let n = self.idx(i, j, k);
        self.data[n] = value;
    }

    /// Set every sample from its physical coordinates `f(x, y, z)` (z ≤ 0, top at 0).
    pub fn set_from_coords(&mut self, f: impl Fn(f64, f64, f64) -> f64) {
        let g = self.grid;
        for k in 0..g.nz() {
            for j in 0..g.ny() {
                for i in 0..g.nx() {
                    let [x, y, z] = g.node(L::POSITION, i, j, k);
                    self.data[g.idx(i, j, k)] = f(x, y, z);
                }
            }
        }
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    pub fn copy_from(&mut self, other: &Field<L>) {
        other.assert_fits(&self.grid);
        self.data.copy_from_slice(&other.data);
    }

    /// Horizontal slab at vertical index k.
    pub fn layer_mut(&mut self, k: usize) -> &mut [f64] {
        let n = self.grid.nx() * self.grid.ny();
        &mut self.data[k * n..(k + 1) * n]
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }

    /// `self = s * self`
    pub fn scale(&mut self, s: f64) {
        for_each_point(&mut self.data, |_, v| *v *= s);
    }

    /// `self = s * self * other`
    pub fn mul_scaled(&mut self, other: &Field<L>, s: f64) {
        other.assert_fits(&self.grid);
        let b = &other.data;
        for_each_point(&mut self.data, |n, v| *v = s * *v * b[n]);
    }

    /// `self = s * self²`
    pub fn square_scaled(&mut self, s: f64) {
        for_each_point(&mut self.data, |_, v| *v = s * *v * *v);
    }

    /// True when the field was built for a grid of the same shape as `grid`.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.grid.nx() == grid.nx()
            && self.grid.ny() == grid.ny()
            && self.grid.nz() == grid.nz()
            && self.data.len() == grid.n_cells()
    }

    /// Panic unless the field was built for a grid of the same shape as `grid`.
    ///
    /// Two shapes with the same point count (8x4x2 and 4x8x2) index the same buffer
    /// differently, so a length check alone is not enough.
    #[track_caller]
    pub fn assert_fits(&self, grid: &Grid) {
        assert!(
            self.fits(grid),
            "{} field is {}x{}x{}, grid is {}x{}x{}",
            L::POSITION,
            self.grid.nx(),
            self.grid.ny(),
            self.grid.nz(),
            grid.nx(),
            grid.ny(),
            grid.nz()
        );
    }
}
