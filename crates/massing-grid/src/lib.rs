//! Fixed-capacity voxel grid with a resizable active region.
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{Cell, CellState, ParseStateError};
pub use error::GridError;
pub use grid::{ActiveCells, Grid};
pub use massing_geom::{CellBox, IVec3, Vec3};
