// src/grid.rs
//
// Regular Cartesian grid, periodic in x/y, bounded in z.
//
// Conventions:
//   - 0-based indices; flat layout idx = (k*ny + j)*nx + i (x fastest).
//   - k = 0 is the physical top of the domain; k grows downward.
//   - Face-x index i is the west face of cell i, face-y index j the south face of cell j,
//     face-z index k the top face of cell k. The bottom face of the domain is not stored.

use crate::error::{GridError, GridResult};
use crate::position::{Axis, Position, Stagger};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    nz: usize,
    lx: f64,
    ly: f64,
    lz: f64,
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Grid {
    /// Grid with `nx × ny × nz` cells spanning `lx × ly × lz`.
    pub fn new(nx: usize, ny: usize, nz: usize, lx: f64, ly: f64, lz: f64) -> GridResult<Self> {
        for (axis, n) in [(Axis::X, nx), (Axis::Y, ny), (Axis::Z, nz)] {
            if n < 2 {
                return Err(GridError::TooFewCells { axis, n });
            }
        }
        for (axis, value) in [(Axis::X, lx), (Axis::Y, ly), (Axis::Z, lz)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::NonPositiveLength { axis, value });
            }
        }

        Ok(Self {
            nx,
            ny,
            nz,
            lx,
            ly,
            lz,
            dx: lx / nx as f64,
            dy: ly / ny as f64,
            dz: lz / nz as f64,
        })
    }

    /// Grid with `nx × ny × nz` cells of size `dx × dy × dz`.
    pub fn from_spacing(
        nx: usize,
        ny: usize,
        nz: usize,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> GridResult<Self> {
        Self::new(nx, ny, nz, nx as f64 * dx, ny as f64 * dy, nz as f64 * dz)
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn nz(&self) -> usize {
        self.nz
    }

    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    #[inline]
    pub fn ly(&self) -> f64 {
        self.ly
    }

    #[inline]
    pub fn lz(&self) -> f64 {
        self.lz
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    #[inline]
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Area of an x-face (dy*dz).
    #[inline]
    pub fn ax(&self) -> f64 {
        self.dy * self.dz
    }

    /// Area of a y-face (dx*dz).
    #[inline]
    pub fn ay(&self) -> f64 {
        self.dx * self.dz
    }

    /// Area of a z-face (dx*dy).
    #[inline]
    pub fn az(&self) -> f64 {
        self.dx * self.dy
    }

    /// Cell volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }

    pub fn n(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    pub fn spacing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
            Axis::Z => self.dz,
        }
    }

    /// Total number of cells (also the length of every field buffer).
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny && k < self.nz);
        (k * self.ny + j) * self.nx + i
    }

    #[inline]
    pub fn x_center(&self, i: usize) -> f64 {
        (i as f64 + 0.5) * self.dx
    }

    #[inline]
    pub fn x_face(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    #[inline]
    pub fn y_center(&self, j: usize) -> f64 {
        (j as f64 + 0.5) * self.dy
    }

    #[inline]
    pub fn y_face(&self, j: usize) -> f64 {
        j as f64 * self.dy
    }

    /// Depth of cell center k (z = 0 at the top, negative downward).
    #[inline]
    pub fn z_center(&self, k: usize) -> f64 {
        -(k as f64 + 0.5) * self.dz
    }

    /// Depth of the top face of cell k.
    #[inline]
    pub fn z_face(&self, k: usize) -> f64 {
        -(k as f64) * self.dz
    }

    /// Physical coordinates of sample (i, j, k) stored at `position`.
    pub fn node(&self, position: Position, i: usize, j: usize, k: usize) -> [f64; 3] {
        let x = match position.stagger(Axis::X) {
            Stagger::Center => self.x_center(i),
            Stagger::Face => self.x_face(i),
        };
        let y = match position.stagger(Axis::Y) {
            Stagger::Center => self.y_center(j),
            Stagger::Face => self.y_face(j),
        };
        let z = match position.stagger(Axis::Z) {
            Stagger::Center => self.z_center(k),
            Stagger::Face => self.z_face(k),
        };
        [x, y, z]
    }
}

/// Periodic successor of index `i` on an axis of length `n`.
#[inline]
pub fn wrap_next(i: usize, n: usize) -> usize {
    debug_assert!(i < n);
    if i + 1 == n { 0 } else { i + 1 }
}

/// Periodic predecessor of index `i` on an axis of length `n`.
#[inline]
pub fn wrap_prev(i: usize, n: usize) -> usize {
    debug_assert!(i < n);
    if i == 0 { n - 1 } else { i - 1 }
}
