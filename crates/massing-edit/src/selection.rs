//! Two-corner selection gesture: begin on one corner, drag to another,
//! then commit the footprint as a solid box of a chosen height.

use std::collections::BTreeMap;
use std::fmt;

use massing_geom::{CellBox, IVec3};
use massing_grid::{CellState, Grid};

use crate::EditError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    /// First corner placed, no box yet.
    Selecting,
    /// Box highlighted and waiting for commit or cancel.
    Pending,
}

impl fmt::Display for SelectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionPhase::Idle => "idle",
            SelectionPhase::Selecting => "selecting",
            SelectionPhase::Pending => "pending",
        })
    }
}

/// Box heights are measured from the floor and limited to the active height.
#[inline]
pub fn clamp_height(height: i32, grid: &Grid) -> i32 {
    height.clamp(1, grid.active_size().y)
}

/// Transient selection state. Holds coordinates only; the grid is passed in.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    first: Option<IVec3>,
    second: Option<IVec3>,
    pending: Option<CellBox>,
    /// Non-default states the gesture painted over, restored on revert.
    saved: BTreeMap<IVec3, CellState>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.first, self.pending) {
            (None, _) => SelectionPhase::Idle,
            (Some(_), None) => SelectionPhase::Selecting,
            (Some(_), Some(_)) => SelectionPhase::Pending,
        }
    }

    #[inline]
    pub fn first(&self) -> Option<IVec3> {
        self.first
    }

    #[inline]
    pub fn second(&self) -> Option<IVec3> {
        self.second
    }

    #[inline]
    pub fn pending_box(&self) -> Option<CellBox> {
        self.pending
    }

    pub fn begin(&mut self, grid: &mut Grid, corner: IVec3) -> Result<(), EditError> {
        let phase = self.phase();
        if phase != SelectionPhase::Idle {
            return Err(EditError::InvalidTransition { op: "begin", phase });
        }
        grid.check_active(corner)?;
        let state = grid.state_at(corner)?;
        if !(state.is_default() || state == CellState::Highlighted) {
            return Err(EditError::NotSelectable {
                coord: corner,
                state,
            });
        }
        self.mark(grid, corner, CellState::Flagged)?;
        self.first = Some(corner);
        log::debug!("selection started at {}", corner);
        Ok(())
    }

    /// Highlight the box between the first corner and `corner`, replacing any
    /// previously highlighted box.
    pub fn extend(&mut self, grid: &mut Grid, corner: IVec3) -> Result<(), EditError> {
        let Some(first) = self.first else {
            return Err(EditError::InvalidTransition {
                op: "extend",
                phase: self.phase(),
            });
        };
        grid.check_active(corner)?;
        if corner == first {
            return Ok(());
        }
        let next = CellBox::from_corners(first, corner);
        if let Some(prev) = self.pending {
            for c in prev.iter().filter(|c| !next.contains(*c)) {
                self.revert(grid, c, CellState::Highlighted)?;
            }
        }
        for c in next.iter().filter(|c| *c != first) {
            self.mark(grid, c, CellState::Highlighted)?;
        }
        self.second = Some(corner);
        self.pending = Some(next);
        Ok(())
    }

    /// Fill every footprint column of the pending box from the floor up to
    /// `height - 1` and return to idle. Returns the filled region.
    pub fn commit(&mut self, grid: &mut Grid, height: i32) -> Result<CellBox, EditError> {
        let (Some(first), Some(pending)) = (self.first, self.pending) else {
            return Err(EditError::InvalidTransition {
                op: "commit",
                phase: self.phase(),
            });
        };
        let h = clamp_height(height, grid);
        for (x, z) in pending.footprint() {
            for y in 0..h {
                grid.set_state(IVec3::new(x, y, z), CellState::Solid)?;
            }
        }
        // Highlights above the committed height belong to the discarded box.
        for c in pending.iter() {
            self.revert(grid, c, CellState::Highlighted)?;
        }
        self.revert(grid, first, CellState::Flagged)?;
        self.reset();
        let filled = CellBox::from_corners(
            IVec3::new(pending.min.x, 0, pending.min.z),
            IVec3::new(pending.max.x, h - 1, pending.max.z),
        );
        log::debug!(
            "selection committed: {} columns, height {}",
            filled.extent().x * filled.extent().z,
            h
        );
        Ok(filled)
    }

    /// Drop the gesture, restoring highlighted cells and the first corner to
    /// what they held before.
    pub fn cancel(&mut self, grid: &mut Grid) -> Result<(), EditError> {
        let Some(first) = self.first else {
            return Err(EditError::InvalidTransition {
                op: "cancel",
                phase: self.phase(),
            });
        };
        if let Some(pending) = self.pending {
            for c in pending.iter() {
                self.revert(grid, c, CellState::Highlighted)?;
            }
        }
        self.revert(grid, first, CellState::Flagged)?;
        self.reset();
        Ok(())
    }

    fn mark(&mut self, grid: &mut Grid, c: IVec3, state: CellState) -> Result<(), EditError> {
        let prior = grid.state_at(c)?;
        if !(prior.is_default() || prior == CellState::Highlighted) {
            self.saved.entry(c).or_insert(prior);
        }
        grid.set_state(c, state)?;
        Ok(())
    }

    /// Undo `mark` on `c` if it still shows `state`.
    fn revert(&mut self, grid: &mut Grid, c: IVec3, state: CellState) -> Result<(), EditError> {
        if grid.state_at(c)? != state {
            self.saved.remove(&c);
            return Ok(());
        }
        match self.saved.remove(&c) {
            Some(prior) => grid.set_state(c, prior)?,
            None => grid.reset(c)?,
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.first = None;
        self.second = None;
        self.pending = None;
        self.saved.clear();
    }
}
