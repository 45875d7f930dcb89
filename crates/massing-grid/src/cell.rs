use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use massing_geom::IVec3;
use serde::{Deserialize, Serialize};

/// Categorical state of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// Resting state of the y=0 layer.
    Ground,
    /// Resting state above the ground layer.
    Empty,
    /// Placed building mass.
    Solid,
    /// Structure proposed by the image model.
    Flagged,
    /// Inside a pending, uncommitted selection box.
    Highlighted,
    /// Allocated but outside the active region.
    Unallocated,
}

impl CellState {
    pub const ALL: [CellState; 6] = [
        CellState::Ground,
        CellState::Empty,
        CellState::Solid,
        CellState::Flagged,
        CellState::Highlighted,
        CellState::Unallocated,
    ];

    /// Default state of an active cell at height `y`.
    #[inline]
    pub fn default_for(y: i32) -> CellState {
        if y == 0 {
            CellState::Ground
        } else {
            CellState::Empty
        }
    }

    #[inline]
    pub fn is_default(self) -> bool {
        matches!(self, CellState::Ground | CellState::Empty)
    }

    pub fn name(self) -> &'static str {
        match self {
            CellState::Ground => "ground",
            CellState::Empty => "empty",
            CellState::Solid => "solid",
            CellState::Flagged => "flagged",
            CellState::Highlighted => "highlighted",
            CellState::Unallocated => "unallocated",
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStateError(pub String);

impl fmt::Display for ParseStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cell state '{}'", self.0)
    }
}

impl std::error::Error for ParseStateError {}

impl FromStr for CellState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellState::ALL
            .into_iter()
            .find(|st| st.name() == s)
            .ok_or_else(|| ParseStateError(s.to_string()))
    }
}

/// One addressable grid unit. Identity is the coordinate alone.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    coord: IVec3,
    state: CellState,
}

impl Cell {
    #[inline]
    pub const fn new(coord: IVec3, state: CellState) -> Self {
        Self { coord, state }
    }

    #[inline]
    pub fn coord(&self) -> IVec3 {
        self.coord
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}
