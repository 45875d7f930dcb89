//! Interactive selection boxes and corner-stamped boxes over a massing grid.
#![forbid(unsafe_code)]

pub mod boxes;
pub mod selection;

pub use boxes::{
    BoxFill, BoxRanges, DirectionOrder, box_from_corner, opposite_corner, populate_random_boxes,
    random_box,
};
pub use selection::{Selection, SelectionPhase, clamp_height};

use massing_geom::IVec3;
use massing_grid::{CellState, GridError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Selection operation called in a phase that does not allow it.
    InvalidTransition {
        op: &'static str,
        phase: SelectionPhase,
    },
    /// Corner cell is in a state that cannot start a selection.
    NotSelectable { coord: IVec3, state: CellState },
    Grid(GridError),
}

impl From<GridError> for EditError {
    fn from(e: GridError) -> Self {
        EditError::Grid(e)
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::InvalidTransition { op, phase } => {
                write!(f, "invalid transition: {} while {}", op, phase)
            }
            EditError::NotSelectable { coord, state } => {
                write!(f, "cell {} in state {} cannot start a selection", coord, state)
            }
            EditError::Grid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditError::Grid(e) => Some(e),
            _ => None,
        }
    }
}
