// src/position.rs
//
// Storage positions on the staggered (Arakawa C) grid.
//
// Every position is described by its staggering along each axis:
//
//   position | x      | y      | z
//   ---------+--------+--------+-------
//   Cell     | center | center | center
//   FaceX    | face   | center | center
//   FaceY    | center | face   | center
//   FaceZ    | center | center | face
//   EdgeX    | center | face   | face     (edge parallel to x)
//   EdgeY    | face   | center | face     (edge parallel to y)
//   EdgeZ    | face   | face   | center   (edge parallel to z)
//
// A difference or average along an axis flips the staggering along that axis
// and leaves the other two alone. The `DualX`/`DualY`/`DualZ` impls below are
// the complete table of flips the kernel supports (flips that would produce a
// vertex position are not provided).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(s)
    }
}

/// Where a sample sits along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stagger {
    /// Cell center along this axis.
    Center,
    /// On the west/south/top face along this axis (same index as the cell it bounds).
    Face,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Cell,
    FaceX,
    FaceY,
    FaceZ,
    EdgeX,
    EdgeY,
    EdgeZ,
}

impl Position {
    pub const ALL: [Position; 7] = [
        Position::Cell,
        Position::FaceX,
        Position::FaceY,
        Position::FaceZ,
        Position::EdgeX,
        Position::EdgeY,
        Position::EdgeZ,
    ];

    pub const fn stagger(self, axis: Axis) -> Stagger {
        use Stagger::{Center, Face};
        let (sx, sy, sz) = match self {
            Position::Cell => (Center, Center, Center),
            Position::FaceX => (Face, Center, Center),
            Position::FaceY => (Center, Face, Center),
            Position::FaceZ => (Center, Center, Face),
            Position::EdgeX => (Center, Face, Face),
            Position::EdgeY => (Face, Center, Face),
            Position::EdgeZ => (Face, Face, Center),
        };
        match axis {
            Axis::X => sx,
            Axis::Y => sy,
            Axis::Z => sz,
        }
    }

    /// Position reached by flipping the staggering along `axis`, if the kernel stores it.
    pub fn dual(self, axis: Axis) -> Option<Position> {
        let flip = |s: Stagger| match s {
            Stagger::Center => Stagger::Face,
            Stagger::Face => Stagger::Center,
        };
        let target = [
            if axis == Axis::X { flip(self.stagger(Axis::X)) } else { self.stagger(Axis::X) },
            if axis == Axis::Y { flip(self.stagger(Axis::Y)) } else { self.stagger(Axis::Y) },
            if axis == Axis::Z { flip(self.stagger(Axis::Z)) } else { self.stagger(Axis::Z) },
        ];
        Position::ALL.into_iter().find(|p| {
            p.stagger(Axis::X) == target[0]
                && p.stagger(Axis::Y) == target[1]
                && p.stagger(Axis::Z) == target[2]
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level storage position. Implemented only by the marker types in this module.
pub trait Location: sealed::Sealed + fmt::Debug + Copy + Send + Sync + 'static {
    const POSITION: Position;
}

/// Cell-centered samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell;
/// Samples on x-faces (u velocity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceX;
/// Samples on y-faces (v velocity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceY;
/// Samples on z-faces (w velocity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceZ;
/// Samples on edges parallel to x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeX;
/// Samples on edges parallel to y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeY;
/// Samples on edges parallel to z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeZ;

impl sealed::Sealed for Cell {}
impl sealed::Sealed for FaceX {}
impl sealed::Sealed for FaceY {}
impl sealed::Sealed for FaceZ {}
impl sealed::Sealed for EdgeX {}
impl sealed::Sealed for EdgeY {}
impl sealed::Sealed for EdgeZ {}

impl Location for Cell {
    const POSITION: Position = Position::Cell;
}
impl Location for FaceX {
    const POSITION: Position = Position::FaceX;
}
impl Location for FaceY {
    const POSITION: Position = Position::FaceY;
}
impl Location for FaceZ {
    const POSITION: Position = Position::FaceZ;
}
impl Location for EdgeX {
    const POSITION: Position = Position::EdgeX;
}
impl Location for EdgeY {
    const POSITION: Position = Position::EdgeY;
}
impl Location for EdgeZ {
    const POSITION: Position = Position::EdgeZ;
}

/// Position pairing for differences/averages along x.
pub trait DualX: Location {
    type Out: DualX<Out = Self>;
}

/// Position pairing for differences/averages along y.
pub trait DualY: Location {
    type Out: DualY<Out = Self>;
}

/// Position pairing for differences/averages along z.
pub trait DualZ: Location {
    type Out: DualZ<Out = Self>;
}

impl DualX for Cell {
    type Out = FaceX;
}
impl DualX for FaceX {
    type Out = Cell;
}
impl DualX for FaceY {
    type Out = EdgeZ;
}
impl DualX for EdgeZ {
    type Out = FaceY;
}
impl DualX for FaceZ {
    type Out = EdgeY;
}
impl DualX for EdgeY {
    type Out = FaceZ;
}

impl DualY for Cell {
    type Out = FaceY;
}
impl DualY for FaceY {
    type Out = Cell;
}
impl DualY for FaceX {
    type Out = EdgeZ;
}
impl DualY for EdgeZ {
    type Out = FaceX;
}
impl DualY for FaceZ {
    type Out = EdgeX;
}
impl DualY for EdgeX {
    type Out = FaceZ;
}

impl DualZ for Cell {
    type Out = FaceZ;
}
impl DualZ for FaceZ {
    type Out = Cell;
}
impl DualZ for FaceX {
    type Out = EdgeY;
}
impl DualZ for EdgeY {
    type Out = FaceX;
}
impl DualZ for FaceY {
    type Out = EdgeX;
}
impl DualZ for EdgeX {
    type Out = FaceY;
}
