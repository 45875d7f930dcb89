use massing_geom::IVec3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Non-positive extents, or an active size larger than capacity.
    InvalidDimensions { active: IVec3, capacity: IVec3 },
    /// Coordinate outside `capacity`: the allocation for lookups, the active
    /// size for computed coordinates that overshoot it.
    OutOfCapacity { coord: IVec3, capacity: IVec3 },
    /// Coordinate allocated but outside the active region.
    Inactive { coord: IVec3, active: IVec3 },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidDimensions { active, capacity } => write!(
                f,
                "invalid grid dimensions: active {} with capacity {}",
                active, capacity
            ),
            GridError::OutOfCapacity { coord, capacity } => {
                write!(f, "coordinate {} outside capacity {}", coord, capacity)
            }
            GridError::Inactive { coord, active } => {
                write!(f, "coordinate {} outside active size {}", coord, active)
            }
        }
    }
}

impl std::error::Error for GridError {}
