//! Single-corner box stamping and randomized box population.

use massing_geom::IVec3;
use massing_grid::{CellState, Grid};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::EditError;

/// Trial order of the four (x, z) extent sign combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionOrder([(i32, i32); 4]);

impl DirectionOrder {
    pub const FIXED: DirectionOrder = DirectionOrder([(1, 1), (1, -1), (-1, 1), (-1, -1)]);

    /// Signs are normalized to +1/-1 (zero counts as +1).
    pub fn new(order: [(i32, i32); 4]) -> Self {
        let norm = |s: i32| if s < 0 { -1 } else { 1 };
        Self(order.map(|(sx, sz)| (norm(sx), norm(sz))))
    }

    /// Shuffle the x signs and the z signs independently, then try every
    /// x sign against every z sign.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut xs = [1, -1];
        let mut zs = [1, -1];
        xs.shuffle(rng);
        zs.shuffle(rng);
        Self([
            (xs[0], zs[0]),
            (xs[0], zs[1]),
            (xs[1], zs[0]),
            (xs[1], zs[1]),
        ])
    }

    #[inline]
    pub fn signs(&self) -> &[(i32, i32); 4] {
        &self.0
    }
}

impl Default for DirectionOrder {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Outcome of a corner-stamped box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxFill {
    pub origin: IVec3,
    pub corner: IVec3,
    /// False when no sign combination fit and the last trial was used.
    pub fitted: bool,
    pub cells: usize,
}

/// Pick the corner opposite `origin` for a box of `size`. Y always grows
/// upward. Returns the first corner inside `active`, or the last trial.
pub fn opposite_corner(
    origin: IVec3,
    size: IVec3,
    order: &DirectionOrder,
    active: IVec3,
) -> (IVec3, bool) {
    let mut corner = origin;
    for &(sx, sz) in order.signs() {
        corner = IVec3::new(
            origin.x + sx * size.x,
            origin.y + size.y,
            origin.z + sz * size.z,
        );
        if corner.inside(active) {
            return (corner, true);
        }
    }
    (corner, false)
}

/// Fill the box between `origin` and its opposite corner with `Solid`.
///
/// X and Z are half-open (`[min, max)`), Y is inclusive, so a fitted box
/// covers `size.x * (size.y + 1) * size.z` cells. When the region leaves the
/// active grid nothing is written and the grid error is returned.
pub fn box_from_corner(
    grid: &mut Grid,
    origin: IVec3,
    size: IVec3,
    order: &DirectionOrder,
) -> Result<BoxFill, EditError> {
    grid.check_in_range(origin)?;
    let (corner, fitted) = opposite_corner(origin, size, order, grid.active_size());
    let lo = origin.component_min(corner);
    let hi = origin.component_max(corner);
    let (xs, ys, zs) = (lo.x..hi.x, lo.y..=hi.y, lo.z..hi.z);
    if !xs.is_empty() && !zs.is_empty() {
        grid.check_in_range(lo)?;
        grid.check_in_range(IVec3::new(hi.x - 1, hi.y, hi.z - 1))?;
    }
    let mut cells = 0;
    for x in xs {
        for y in ys.clone() {
            for z in zs.clone() {
                grid.set_state(IVec3::new(x, y, z), CellState::Solid)?;
                cells += 1;
            }
        }
    }
    if !fitted {
        log::debug!("box from {} used unfitted corner {}", origin, corner);
    }
    Ok(BoxFill {
        origin,
        corner,
        fitted,
        cells,
    })
}

/// Footprint size ranges for random boxes; upper bounds are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxRanges {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl Default for BoxRanges {
    fn default() -> Self {
        Self {
            min_x: 3,
            max_x: 10,
            min_z: 3,
            max_z: 10,
        }
    }
}

#[inline]
fn pick<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if hi <= lo { lo } else { rng.random_range(lo..hi) }
}

/// Stamp one full-height box of random footprint at a random ground cell.
pub fn random_box<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    ranges: &BoxRanges,
) -> Result<BoxFill, EditError> {
    let active = grid.active_size();
    let size = IVec3::new(
        pick(rng, ranges.min_x, ranges.max_x),
        active.y - 1,
        pick(rng, ranges.min_z, ranges.max_z),
    );
    let origin = IVec3::new(pick(rng, 0, active.x), 0, pick(rng, 0, active.z));
    let order = DirectionOrder::shuffled(rng);
    box_from_corner(grid, origin, size, &order)
}

/// Stamp `quantity` random boxes. Boxes that cannot be placed are skipped.
/// Returns how many landed.
pub fn populate_random_boxes<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    quantity: usize,
    ranges: &BoxRanges,
) -> usize {
    let mut placed = 0;
    for _ in 0..quantity {
        match random_box(grid, rng, ranges) {
            Ok(_) => placed += 1,
            Err(e) => log::debug!("random box skipped: {}", e),
        }
    }
    placed
}
