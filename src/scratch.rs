// src/scratch.rs
//
// Preallocated scratch fields shared by the composite operators.
//
// The pool is allocated once alongside the model state and lent (`&mut`) to one
// composite operator at a time. Inside a call, each slot is reused under several
// logical names; every composite documents its step order as (reads -> writes),
// and no slot is written before the previous quantity held in it has been consumed.
//
// Slot counts per position: the largest simultaneous demand of any composite
// (three for a divergence at that position, two for an edge product).

use crate::field::Field;
use crate::grid::Grid;
use crate::position::{Cell, EdgeX, EdgeY, EdgeZ, FaceX, FaceY, FaceZ, Location};

#[derive(Debug, Clone)]
pub struct ScratchPool {
    pub cell: [Field<Cell>; 3],
    pub face_x: [Field<FaceX>; 3],
    pub face_y: [Field<FaceY>; 3],
    pub face_z: [Field<FaceZ>; 3],
    pub edge_x: [Field<EdgeX>; 2],
    pub edge_y: [Field<EdgeY>; 2],
    pub edge_z: [Field<EdgeZ>; 2],
}

fn slots<L: Location, const N: usize>(grid: Grid) -> [Field<L>; N] {
    std::array::from_fn(|_| Field::new(grid))
}

impl ScratchPool {
    pub fn new(grid: Grid) -> Self {
        log::debug!(
            "[scratch] allocating pool: 20 fields of {} points ({:.1} MiB)",
            grid.n_cells(),
            20.0 * grid.n_cells() as f64 * 8.0 / (1024.0 * 1024.0)
        );
        Self {
            cell: slots(grid),
            face_x: slots(grid),
            face_y: slots(grid),
            face_z: slots(grid),
            edge_x: slots(grid),
            edge_y: slots(grid),
            edge_z: slots(grid),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.cell[0].grid()
    }

    /// Zero every slot. Operators never rely on prior slot contents; this is for diagnostics.
    pub fn clear(&mut self) {
        self.cell.iter_mut().for_each(|f| f.fill(0.0));
        self.face_x.iter_mut().for_each(|f| f.fill(0.0));
        self.face_y.iter_mut().for_each(|f| f.fill(0.0));
        self.face_z.iter_mut().for_each(|f| f.fill(0.0));
        self.edge_x.iter_mut().for_each(|f| f.fill(0.0));
        self.edge_y.iter_mut().for_each(|f| f.fill(0.0));
        self.edge_z.iter_mut().for_each(|f| f.fill(0.0));
    }
}
