use std::cmp::Ordering;

use crate::grid::Elevation;

/// A unit of flood work: a cell position and the water level it was discovered at.
///
/// `z` is the key the scheduler orders on. It is the frontier level at discovery,
/// which can be above the elevation stored for the cell.
#[derive(Debug, Clone, Copy)]
pub struct GridCellZ<T> {
    pub x: usize,
    pub y: usize,
    pub z: T,
}

impl<T> GridCellZ<T> {
    pub fn new(x: usize, y: usize, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Elevation> PartialEq for GridCellZ<T> {
    fn eq(&self, other: &Self) -> bool {
        self.z == other.z
    }
}

impl<T: Elevation> Eq for GridCellZ<T> {}

impl<T: Elevation> PartialOrd for GridCellZ<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// reversed so BinaryHeap pops the lowest z first
impl<T: Elevation> Ord for GridCellZ<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.z.partial_cmp(&self.z).unwrap_or(Ordering::Equal)
    }
}
