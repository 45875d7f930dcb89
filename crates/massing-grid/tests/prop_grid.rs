use massing_grid::{CellState, Grid, IVec3, Vec3};
use proptest::prelude::*;

fn extent(max: i32) -> impl Strategy<Value = IVec3> {
    (1..=max, 1..=max, 1..=max).prop_map(|(x, y, z)| IVec3::new(x, y, z))
}

/// (active, capacity) with active <= capacity.
fn dims() -> impl Strategy<Value = (IVec3, IVec3)> {
    extent(6).prop_flat_map(|cap| {
        (
            (1..=cap.x, 1..=cap.y, 1..=cap.z).prop_map(|(x, y, z)| IVec3::new(x, y, z)),
            Just(cap),
        )
    })
}

fn sub_extent(cap: IVec3) -> impl Strategy<Value = IVec3> {
    (1..=cap.x, 1..=cap.y, 1..=cap.z).prop_map(|(x, y, z)| IVec3::new(x, y, z))
}

fn snapshot(g: &Grid) -> Vec<CellState> {
    let cap = g.capacity();
    let mut out = Vec::with_capacity(cap.volume());
    for x in 0..cap.x {
        for y in 0..cap.y {
            for z in 0..cap.z {
                out.push(g.state_at(IVec3::new(x, y, z)).unwrap());
            }
        }
    }
    out
}

/// Paint a deterministic pattern of non-default states over the active region.
fn paint(g: &mut Grid) {
    let coords: Vec<IVec3> = g.active_cells().map(|c| c.coord()).collect();
    for (i, c) in coords.into_iter().enumerate() {
        let st = match i % 4 {
            0 => CellState::Solid,
            1 => CellState::Flagged,
            2 => CellState::Highlighted,
            _ => continue,
        };
        g.set_state(c, st).unwrap();
    }
}

fn check_invariant(g: &Grid) -> Result<(), TestCaseError> {
    let cap = g.capacity();
    for x in 0..cap.x {
        for y in 0..cap.y {
            for z in 0..cap.z {
                let c = IVec3::new(x, y, z);
                let st = g.state_at(c).unwrap();
                if g.is_active(c) {
                    prop_assert_ne!(st, CellState::Unallocated);
                } else {
                    prop_assert_eq!(st, CellState::Unallocated);
                }
            }
        }
    }
    Ok(())
}

proptest! {
    // A fresh grid enumerates exactly active.volume() cells, none Unallocated
    #[test]
    fn fresh_grid_enumerates_active_volume((active, cap) in dims()) {
        let g = Grid::new(active, cap, Vec3::ZERO, 1.0).unwrap();
        prop_assert_eq!(g.active_cells().count(), active.volume());
        prop_assert!(g.active_cells().all(|c| c.state() != CellState::Unallocated));
        check_invariant(&g)?;
    }

    // resize(s); resize(s) == resize(s)
    #[test]
    fn resize_is_idempotent(
        (active, cap, target) in dims().prop_flat_map(|(a, c)| (Just(a), Just(c), sub_extent(c)))
    ) {
        let mut g = Grid::new(active, cap, Vec3::ZERO, 1.0).unwrap();
        paint(&mut g);
        g.resize(target).unwrap();
        let once = snapshot(&g);
        g.resize(target).unwrap();
        prop_assert_eq!(once, snapshot(&g));
        prop_assert_eq!(g.active_size(), target);
        check_invariant(&g)?;
    }

    // Growing then shrinking back restores every originally active cell
    #[test]
    fn grow_then_shrink_restores_state(
        (active, cap, grown) in dims().prop_flat_map(|(a, c)| {
            let grown = (a.x..=c.x, a.y..=c.y, a.z..=c.z).prop_map(|(x, y, z)| IVec3::new(x, y, z));
            (Just(a), Just(c), grown)
        })
    ) {
        let mut g = Grid::new(active, cap, Vec3::ZERO, 1.0).unwrap();
        paint(&mut g);
        let before = snapshot(&g);
        g.resize(grown).unwrap();
        check_invariant(&g)?;
        g.resize(active).unwrap();
        prop_assert_eq!(before, snapshot(&g));
    }

    // Newly activated cells always come back at their defaults
    #[test]
    fn shrink_then_grow_resets_released_cells(
        (active, cap, shrunk) in dims().prop_flat_map(|(a, c)| (Just(a), Just(c), sub_extent(a)))
    ) {
        let mut g = Grid::new(active, cap, Vec3::ZERO, 1.0).unwrap();
        paint(&mut g);
        g.resize(shrunk).unwrap();
        g.resize(active).unwrap();
        for cell in g.active_cells() {
            if !cell.coord().inside(shrunk) {
                prop_assert_eq!(cell.state(), CellState::default_for(cell.coord().y));
            }
        }
    }

    // active_cells order is stable across calls
    #[test]
    fn enumeration_is_restartable((active, cap) in dims()) {
        let g = Grid::new(active, cap, Vec3::ZERO, 1.0).unwrap();
        let a: Vec<IVec3> = g.active_cells().map(|c| c.coord()).collect();
        let b: Vec<IVec3> = g.active_cells().map(|c| c.coord()).collect();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn resize_rejects_over_capacity() {
    let mut g = Grid::new(IVec3::new(2, 2, 2), IVec3::new(3, 3, 3), Vec3::ZERO, 1.0).unwrap();
    assert!(g.resize(IVec3::new(4, 2, 2)).is_err());
    assert!(g.resize(IVec3::new(2, 0, 2)).is_err());
    assert_eq!(g.active_size(), IVec3::new(2, 2, 2));
}

#[test]
fn enumeration_order_is_x_then_y_then_z() {
    let g = Grid::new(IVec3::new(2, 2, 2), IVec3::new(2, 2, 2), Vec3::ZERO, 1.0).unwrap();
    let first: Vec<(i32, i32, i32)> = g.active_cells().take(3).map(|c| c.coord().into()).collect();
    assert_eq!(first, vec![(0, 0, 0), (0, 0, 1), (0, 1, 0)]);
}
