//! The flood frontier: a priority queue and a stack working together.
//!
//! Cells that rise above the current water level go into the priority queue
//! ("open") so that the frontier always advances from its lowest point. Cells at or
//! below the water level cannot start a new local minimum, so they go onto a plain
//! stack ("meander") and are drained before the queue is consulted again. Only the
//! boundary and the true elevation rises pay for a heap operation.

use std::collections::BinaryHeap;

use crate::cell::GridCellZ;
use crate::error::{HydroError, Result};
use crate::grid::Elevation;

/// Which worklist a popped cell came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Worklist {
    /// The stack of cells at or below the water level.
    Meander,
    /// The priority queue, lowest key first.
    Open,
}

#[derive(Debug)]
pub struct FloodScheduler<T: Elevation> {
    open: BinaryHeap<GridCellZ<T>>,
    meander: Vec<GridCellZ<T>>,
    open_pops: u64,
    meander_pops: u64,
    width: usize,
    height: usize,
}

impl<T: Elevation> Default for FloodScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Elevation> FloodScheduler<T> {
    pub fn new() -> Self {
        Self {
            open: BinaryHeap::new(),
            meander: Vec::new(),
            open_pops: 0,
            meander_pops: 0,
            width: 0,
            height: 0,
        }
    }

    /// Pre-size both worklists for a `width` x `height` raster. The queue is sized
    /// for the perimeter; the stack for one row.
    pub fn for_extent(width: usize, height: usize) -> Result<Self> {
        let oom = |what| HydroError::OutOfMemory { what, width, height };
        let perimeter = width.saturating_add(height).saturating_mul(2);
        let mut scheduler = Self { width, height, ..Self::new() };
        scheduler
            .open
            .try_reserve(perimeter)
            .map_err(|_| oom("open priority queue"))?;
        scheduler
            .meander
            .try_reserve(width)
            .map_err(|_| oom("meander stack"))?;
        Ok(scheduler)
    }

    /// Make room for `additional` more cells on one worklist without aborting on
    /// allocation failure.
    fn reserve(&mut self, worklist: Worklist, additional: usize) -> Result<()> {
        let (what, reserved) = match worklist {
            Worklist::Open => ("open priority queue", self.open.try_reserve(additional)),
            Worklist::Meander => ("meander stack", self.meander.try_reserve(additional)),
        };
        reserved.map_err(|_| HydroError::OutOfMemory {
            what,
            width: self.width,
            height: self.height,
        })
    }

    pub fn push_open(&mut self, cell: GridCellZ<T>) -> Result<()> {
        self.reserve(Worklist::Open, 1)?;
        self.open.push(cell);
        Ok(())
    }

    pub fn push_meander(&mut self, cell: GridCellZ<T>) -> Result<()> {
        self.reserve(Worklist::Meander, 1)?;
        self.meander.push(cell);
        Ok(())
    }

    /// Next cell to expand: the top of the stack if there is one, otherwise the
    /// lowest cell in the queue.
    pub fn pop(&mut self) -> Option<(GridCellZ<T>, Worklist)> {
        if let Some(cell) = self.meander.pop() {
            self.meander_pops += 1;
            return Some((cell, Worklist::Meander));
        }
        let cell = self.open.pop()?;
        self.open_pops += 1;
        Some((cell, Worklist::Open))
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Cells taken from the priority queue so far.
    pub fn open_pops(&self) -> u64 {
        self.open_pops
    }

    /// Cells taken from the stack so far; these are the cells inside pits and flats.
    pub fn meander_pops(&self) -> u64 {
        self.meander_pops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_preferred() {
        let mut s = FloodScheduler::new();
        s.push_open(GridCellZ::new(0, 0, 1.0_f64)).unwrap();
        s.push_meander(GridCellZ::new(1, 1, 7.0)).unwrap();
        s.push_meander(GridCellZ::new(2, 2, 7.0)).unwrap();

        let (c, from) = s.pop().unwrap();
        assert_eq!((c.x, c.y, from), (2, 2, Worklist::Meander));
        let (c, from) = s.pop().unwrap();
        assert_eq!((c.x, c.y, from), (1, 1, Worklist::Meander));
        let (c, from) = s.pop().unwrap();
        assert_eq!((c.x, c.y, from), (0, 0, Worklist::Open));
        assert!(s.pop().is_none());
        assert_eq!((s.meander_pops(), s.open_pops()), (2, 1));
    }

    #[test]
    fn test_open_ascending() {
        let mut s = FloodScheduler::new();
        for (i, z) in [4.0_f32, 1.0, 3.0, 2.0, 1.5].into_iter().enumerate() {
            s.push_open(GridCellZ::new(i, 0, z)).unwrap();
        }
        assert_eq!(s.open_len(), 5);
        let mut last = f32::NEG_INFINITY;
        while let Some((c, from)) = s.pop() {
            assert_eq!(from, Worklist::Open);
            assert!(c.z >= last);
            last = c.z;
        }
        assert_eq!(s.open_len(), 0);
    }

    #[test]
    fn test_presized() {
        let mut s: FloodScheduler<f64> = FloodScheduler::for_extent(100, 50).unwrap();
        assert_eq!(s.open_len(), 0);
        assert!(s.pop().is_none());
    }

    #[test]
    fn test_growth_failure_is_reported() {
        let mut s: FloodScheduler<f64> = FloodScheduler::for_extent(100, 50).unwrap();
        s.push_meander(GridCellZ::new(3, 4, 2.0)).unwrap();

        // no allocator can hand out usize::MAX more cells
        for worklist in [Worklist::Meander, Worklist::Open] {
            match s.reserve(worklist, usize::MAX) {
                Err(HydroError::OutOfMemory { what, width, height }) => {
                    assert_eq!((width, height), (100, 50));
                    assert!(what.contains(if worklist == Worklist::Open { "queue" } else { "stack" }));
                }
                other => panic!("expected OutOfMemory, got {:?}", other),
            }
        }

        // a failed reservation leaves the worklists intact
        let (c, from) = s.pop().unwrap();
        assert_eq!((c.x, c.y, from), (3, 4, Worklist::Meander));
        s.push_open(GridCellZ::new(5, 6, 1.0)).unwrap();
        assert_eq!(s.open_len(), 1);
    }
}
