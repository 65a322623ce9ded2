// src/error.rs
//
// Construction-time errors. The operators return nothing: positions are encoded
// in the types, and a field passed with a grid of another shape panics
// (`Field::assert_fits`).

use thiserror::Error;

use crate::position::Axis;

pub type GridResult<T> = Result<T, GridError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Stencils pair the first and last index along every axis, so each axis needs two cells.
    #[error("grid needs at least 2 cells along {axis}, got {n}")]
    TooFewCells { axis: Axis, n: usize },

    #[error("grid length along {axis} must be positive and finite, got {value}")]
    NonPositiveLength { axis: Axis, value: f64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field data has {got} values, grid {nx}x{ny}x{nz} needs {expected}")]
    ShapeMismatch {
        nx: usize,
        ny: usize,
        nz: usize,
        expected: usize,
        got: usize,
    },
}
