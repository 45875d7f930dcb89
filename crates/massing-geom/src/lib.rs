//! Integer cell coordinates, extents, and boxes for the massing grid.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// Integer triple used both as a cell coordinate and as a grid extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };
    pub const ONE: IVec3 = IVec3 { x: 1, y: 1, z: 1 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    #[inline]
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// Number of cells spanned when read as an extent; zero for degenerate extents.
    #[inline]
    pub fn volume(self) -> usize {
        if !self.is_positive() {
            return 0;
        }
        self.x as usize * self.y as usize * self.z as usize
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.x > 0 && self.y > 0 && self.z > 0
    }

    /// Componentwise `self <= other`.
    #[inline]
    pub fn fits_within(self, other: IVec3) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    /// `0 <= self < extent` on every axis.
    #[inline]
    pub fn inside(self, extent: IVec3) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.z >= 0
            && self.x < extent.x
            && self.y < extent.y
            && self.z < extent.z
    }

    #[inline]
    pub fn component_max(self, other: IVec3) -> IVec3 {
        IVec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[inline]
    pub fn component_min(self, other: IVec3) -> IVec3 {
        IVec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }
}

impl Add for IVec3 {
    type Output = IVec3;
    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;
    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for IVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<IVec3> for (i32, i32, i32) {
    fn from(value: IVec3) -> Self {
        (value.x, value.y, value.z)
    }
}

/// Placement metadata (grid origin); the grid algorithms never read it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl From<IVec3> for Vec3 {
    fn from(v: IVec3) -> Self {
        Vec3::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

/// World-space center of a cell: `(coord + origin) * scale`.
#[inline]
pub fn cell_center(coord: IVec3, origin: Vec3, scale: f32) -> Vec3 {
    (Vec3::from(coord) + origin) * scale
}

/// Axis-aligned box of cells, inclusive on all six faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellBox {
    pub min: IVec3,
    pub max: IVec3,
}

impl CellBox {
    /// Box spanned by two corners given in any order.
    #[inline]
    pub fn from_corners(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.component_min(b),
            max: a.component_max(b),
        }
    }

    #[inline]
    pub fn contains(&self, c: IVec3) -> bool {
        c.x >= self.min.x
            && c.y >= self.min.y
            && c.z >= self.min.z
            && c.x <= self.max.x
            && c.y <= self.max.y
            && c.z <= self.max.z
    }

    /// Per-axis cell counts.
    #[inline]
    pub fn extent(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.extent().volume()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every cell, x-major then y then z.
    pub fn iter(&self) -> CellBoxIter {
        CellBoxIter {
            bx: *self,
            next: if self.is_empty() { None } else { Some(self.min) },
        }
    }

    /// Distinct (x, z) columns covered by the box.
    pub fn footprint(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.z..=max.z).map(move |z| (x, z)))
    }
}

#[derive(Clone, Debug)]
pub struct CellBoxIter {
    bx: CellBox,
    next: Option<IVec3>,
}

impl Iterator for CellBoxIter {
    type Item = IVec3;

    fn next(&mut self) -> Option<IVec3> {
        let cur = self.next?;
        let (min, max) = (self.bx.min, self.bx.max);
        let mut n = cur;
        n.z += 1;
        if n.z > max.z {
            n.z = min.z;
            n.y += 1;
            if n.y > max.y {
                n.y = min.y;
                n.x += 1;
            }
        }
        self.next = if n.x > max.x { None } else { Some(n) };
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn from_corners_is_order_independent(a: IVec3, b: IVec3) {
            prop_assert_eq!(CellBox::from_corners(a, b), CellBox::from_corners(b, a));
        }
    }

    #[test]
    fn cell_center_applies_origin_then_scale() {
        let c = cell_center(IVec3::new(1, 2, 3), Vec3::new(0.5, 0.0, -1.0), 2.0);
        assert_eq!(c, Vec3::new(3.0, 4.0, 4.0));
    }
}
