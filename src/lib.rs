// src/lib.rs

pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod operators;
pub mod par;
pub mod position;
pub mod scratch;
pub mod timing;

pub use error::{FieldError, GridError, GridResult};
pub use field::Field;
pub use grid::Grid;
pub use position::{
    Axis, Cell, DualX, DualY, DualZ, EdgeX, EdgeY, EdgeZ, FaceX, FaceY, FaceZ, Location,
    Position, Stagger,
};
pub use scratch::ScratchPool;
