use massing_geom::{CellBox, CellBoxIter, IVec3, Vec3, cell_center};

use crate::cell::{Cell, CellState};
use crate::error::GridError;

/// Dense grid of `capacity` cells with an active sub-region.
///
/// Cells inside `active` are never `Unallocated`; cells between `active`
/// and `capacity` always are.
#[derive(Clone, Debug)]
pub struct Grid {
    capacity: IVec3,
    active: IVec3,
    origin: Vec3,
    cell_scale: f32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(
        active: IVec3,
        capacity: IVec3,
        origin: Vec3,
        cell_scale: f32,
    ) -> Result<Self, GridError> {
        check_dimensions(active, capacity)?;
        let mut cells = Vec::with_capacity(capacity.volume());
        for y in 0..capacity.y {
            for z in 0..capacity.z {
                for x in 0..capacity.x {
                    let coord = IVec3::new(x, y, z);
                    let state = if coord.inside(active) {
                        CellState::default_for(y)
                    } else {
                        CellState::Unallocated
                    };
                    cells.push(Cell::new(coord, state));
                }
            }
        }
        log::debug!(
            "grid allocated: capacity {} active {} ({} cells)",
            capacity,
            active,
            cells.len()
        );
        Ok(Self {
            capacity,
            active,
            origin,
            cell_scale,
            cells,
        })
    }

    #[inline]
    pub fn capacity(&self) -> IVec3 {
        self.capacity
    }

    #[inline]
    pub fn active_size(&self) -> IVec3 {
        self.active
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn cell_scale(&self) -> f32 {
        self.cell_scale
    }

    #[inline]
    fn idx(&self, c: IVec3) -> usize {
        let (sx, sz) = (self.capacity.x as usize, self.capacity.z as usize);
        (c.y as usize * sz + c.z as usize) * sx + c.x as usize
    }

    #[inline]
    pub fn in_capacity(&self, c: IVec3) -> bool {
        c.inside(self.capacity)
    }

    #[inline]
    pub fn is_active(&self, c: IVec3) -> bool {
        c.inside(self.active)
    }

    /// Box covering the whole active region.
    #[inline]
    pub fn active_box(&self) -> CellBox {
        CellBox::from_corners(IVec3::ZERO, self.active - IVec3::ONE)
    }

    pub fn cell_at(&self, c: IVec3) -> Result<&Cell, GridError> {
        if !self.in_capacity(c) {
            return Err(GridError::OutOfCapacity {
                coord: c,
                capacity: self.capacity,
            });
        }
        Ok(&self.cells[self.idx(c)])
    }

    #[inline]
    pub fn state_at(&self, c: IVec3) -> Result<CellState, GridError> {
        self.cell_at(c).map(Cell::state)
    }

    /// Ok if `c` is inside the active region, with the precise failure otherwise.
    pub fn check_active(&self, c: IVec3) -> Result<(), GridError> {
        if !self.in_capacity(c) {
            return Err(GridError::OutOfCapacity {
                coord: c,
                capacity: self.capacity,
            });
        }
        if !self.is_active(c) {
            return Err(GridError::Inactive {
                coord: c,
                active: self.active,
            });
        }
        Ok(())
    }

    /// Like [`Grid::check_active`], but anything outside the active region is
    /// `OutOfCapacity` measured against the active size. Used where a computed
    /// coordinate overshoots the usable grid.
    pub fn check_in_range(&self, c: IVec3) -> Result<(), GridError> {
        if !self.is_active(c) {
            return Err(GridError::OutOfCapacity {
                coord: c,
                capacity: self.active,
            });
        }
        Ok(())
    }

    /// Set the state of an active cell. Inactive cells stay `Unallocated`.
    pub fn set_state(&mut self, c: IVec3, state: CellState) -> Result<(), GridError> {
        self.check_active(c)?;
        let i = self.idx(c);
        self.cells[i].set_state(state);
        Ok(())
    }

    /// Reset an active cell to its ground/interior default.
    pub fn reset(&mut self, c: IVec3) -> Result<(), GridError> {
        self.set_state(c, CellState::default_for(c.y))
    }

    /// Change the active region in one pass over the union of old and new sizes.
    pub fn resize(&mut self, new_size: IVec3) -> Result<(), GridError> {
        check_dimensions(new_size, self.capacity)?;
        if new_size == self.active {
            return Ok(());
        }
        let old = self.active;
        let end = old.component_max(new_size);
        let (mut added, mut removed) = (0usize, 0usize);
        for y in 0..end.y {
            for z in 0..end.z {
                for x in 0..end.x {
                    let c = IVec3::new(x, y, z);
                    let (was, is) = (c.inside(old), c.inside(new_size));
                    if was == is {
                        continue;
                    }
                    let i = self.idx(c);
                    if was {
                        self.cells[i].set_state(CellState::Unallocated);
                        removed += 1;
                    } else {
                        self.cells[i].set_state(CellState::default_for(y));
                        added += 1;
                    }
                }
            }
        }
        self.active = new_size;
        log::debug!(
            "grid resized {} -> {}: {} cells activated, {} released",
            old,
            new_size,
            added,
            removed
        );
        Ok(())
    }

    /// Reset every active cell to its default. Returns how many changed.
    pub fn clear(&mut self) -> usize {
        self.reset_where(|_| true)
    }

    /// Reset active cells currently in `target` to their default.
    pub fn clear_state(&mut self, target: CellState) -> usize {
        if target == CellState::Unallocated {
            return 0;
        }
        self.reset_where(|st| st == target)
    }

    fn reset_where(&mut self, pred: impl Fn(CellState) -> bool) -> usize {
        let mut n = 0;
        for c in self.active_box().iter() {
            let i = self.idx(c);
            let cell = &mut self.cells[i];
            if pred(cell.state()) {
                let def = CellState::default_for(c.y);
                if cell.state() != def {
                    n += 1;
                }
                cell.set_state(def);
            }
        }
        n
    }

    /// Cells sharing a face with `c`, restricted to the active region.
    /// Order: +x, -x, +y, -y, +z, -z.
    pub fn face_neighbors(&self, c: IVec3) -> Result<Vec<&Cell>, GridError> {
        self.cell_at(c)?;
        const DIRS: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        Ok(DIRS
            .iter()
            .map(|&(dx, dy, dz)| c.offset(dx, dy, dz))
            .filter(|n| self.is_active(*n))
            .map(|n| &self.cells[self.idx(n)])
            .collect())
    }

    /// Every active cell, x-major then y then z. Call again to restart.
    pub fn active_cells(&self) -> ActiveCells<'_> {
        ActiveCells {
            grid: self,
            coords: self.active_box().iter(),
        }
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.active_cells().filter(|c| c.state() == state).count()
    }

    #[inline]
    pub fn cell_center(&self, c: IVec3) -> Vec3 {
        cell_center(c, self.origin, self.cell_scale)
    }
}

fn check_dimensions(active: IVec3, capacity: IVec3) -> Result<(), GridError> {
    if !active.is_positive() || !capacity.is_positive() || !active.fits_within(capacity) {
        return Err(GridError::InvalidDimensions { active, capacity });
    }
    Ok(())
}

#[derive(Clone)]
pub struct ActiveCells<'a> {
    grid: &'a Grid,
    coords: CellBoxIter,
}

impl<'a> Iterator for ActiveCells<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<&'a Cell> {
        let c = self.coords.next()?;
        Some(&self.grid.cells[self.grid.idx(c)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(active: (i32, i32, i32), capacity: (i32, i32, i32)) -> Grid {
        Grid::new(active.into(), capacity.into(), Vec3::ZERO, 1.0).unwrap()
    }

    #[test]
    fn create_sets_defaults_and_unallocated() {
        let g = grid((2, 3, 2), (4, 4, 4));
        assert_eq!(g.state_at(IVec3::new(1, 0, 1)).unwrap(), CellState::Ground);
        assert_eq!(g.state_at(IVec3::new(1, 2, 1)).unwrap(), CellState::Empty);
        assert_eq!(
            g.state_at(IVec3::new(3, 0, 0)).unwrap(),
            CellState::Unallocated
        );
        assert_eq!(g.active_cells().count(), 12);
    }

    #[test]
    fn create_rejects_bad_dimensions() {
        for (a, c) in [
            ((5, 1, 1), (4, 4, 4)),
            ((0, 1, 1), (4, 4, 4)),
            ((1, 1, 1), (4, -4, 4)),
        ] {
            assert!(matches!(
                Grid::new(a.into(), c.into(), Vec3::ZERO, 1.0),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn cell_at_reports_out_of_capacity() {
        let g = grid((2, 2, 2), (3, 3, 3));
        assert!(matches!(
            g.cell_at(IVec3::new(3, 0, 0)),
            Err(GridError::OutOfCapacity { .. })
        ));
        assert!(matches!(
            g.cell_at(IVec3::new(0, -1, 0)),
            Err(GridError::OutOfCapacity { .. })
        ));
        assert_eq!(
            g.cell_at(IVec3::new(2, 2, 2)).unwrap().state(),
            CellState::Unallocated
        );
    }

    #[test]
    fn set_state_refuses_inactive_cells() {
        let mut g = grid((2, 2, 2), (3, 3, 3));
        assert!(matches!(
            g.set_state(IVec3::new(2, 0, 0), CellState::Solid),
            Err(GridError::Inactive { .. })
        ));
        assert_eq!(
            g.state_at(IVec3::new(2, 0, 0)).unwrap(),
            CellState::Unallocated
        );
    }

    #[test]
    fn range_check_reports_inactive_band_as_out_of_capacity() {
        let g = grid((2, 2, 2), (4, 4, 4));
        assert!(g.check_in_range(IVec3::new(1, 1, 1)).is_ok());
        assert_eq!(
            g.check_in_range(IVec3::new(0, 2, 0)),
            Err(GridError::OutOfCapacity {
                coord: IVec3::new(0, 2, 0),
                capacity: IVec3::new(2, 2, 2),
            })
        );
        assert!(matches!(
            g.check_in_range(IVec3::new(0, 9, 0)),
            Err(GridError::OutOfCapacity { .. })
        ));
        assert!(matches!(
            g.check_active(IVec3::new(0, 2, 0)),
            Err(GridError::Inactive { .. })
        ));
    }

    #[test]
    fn clear_state_only_touches_target() {
        let mut g = grid((3, 3, 3), (3, 3, 3));
        g.set_state(IVec3::new(0, 0, 0), CellState::Flagged).unwrap();
        g.set_state(IVec3::new(1, 2, 1), CellState::Flagged).unwrap();
        g.set_state(IVec3::new(2, 1, 2), CellState::Solid).unwrap();
        assert_eq!(g.clear_state(CellState::Flagged), 2);
        assert_eq!(g.state_at(IVec3::new(0, 0, 0)).unwrap(), CellState::Ground);
        assert_eq!(g.state_at(IVec3::new(1, 2, 1)).unwrap(), CellState::Empty);
        assert_eq!(g.state_at(IVec3::new(2, 1, 2)).unwrap(), CellState::Solid);
        assert_eq!(g.clear(), 1);
        assert_eq!(g.count_state(CellState::Solid), 0);
    }

    #[test]
    fn neighbors_skip_directions_outside_active() {
        let g = grid((3, 3, 3), (5, 5, 5));
        assert_eq!(g.face_neighbors(IVec3::new(1, 1, 1)).unwrap().len(), 6);
        assert_eq!(g.face_neighbors(IVec3::new(0, 0, 0)).unwrap().len(), 3);
        // (2,2,2) sits on the active edge; +x/+y/+z fall into the inactive band.
        let n: Vec<IVec3> = g
            .face_neighbors(IVec3::new(2, 2, 2))
            .unwrap()
            .into_iter()
            .map(Cell::coord)
            .collect();
        assert_eq!(
            n,
            vec![IVec3::new(1, 2, 2), IVec3::new(2, 1, 2), IVec3::new(2, 2, 1)]
        );
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let g = grid((1, 1, 1), (1, 1, 1));
        assert!(g.face_neighbors(IVec3::ZERO).unwrap().is_empty());
    }
}
