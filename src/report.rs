use std::collections::BTreeMap;
use std::fmt;

use crate::grid::Grid;

/// Number of cells carrying each watershed label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatershedAreas {
    cells: BTreeMap<i32, usize>,
    cell_area: f64,
}

impl WatershedAreas {
    /// Cells labelled `label`, zero if there are none.
    pub fn cells(&self, label: i32) -> usize {
        self.cells.get(&label).copied().unwrap_or(0)
    }

    /// Area of watershed `label` in squared map units.
    pub fn area(&self, label: i32) -> f64 {
        self.cells(label) as f64 * self.cell_area
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `(label, cells)` pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.cells.iter().map(|(&label, &n)| (label, n))
    }

    pub fn log_summary(&self) {
        for (label, n) in self.iter() {
            log::info!("Watershed {} has area {}", label, n);
        }
    }
}

impl fmt::Display for WatershedAreas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, n) in self.iter() {
            writeln!(f, "Watershed {} has area {}", label, n)?;
        }
        Ok(())
    }
}

/// Count the cells in each watershed of a finished label grid, skipping its
/// no-data sentinel.
pub fn watershed_areas(labels: &Grid<i32>) -> WatershedAreas {
    let no_data = labels.no_data();
    let mut cells = BTreeMap::new();
    for &label in labels.array().iter().filter(|&&l| l != no_data) {
        *cells.entry(label).or_insert(0) += 1;
    }
    let size = labels.cell_size();
    WatershedAreas {
        cells,
        cell_area: size * size,
    }
}
