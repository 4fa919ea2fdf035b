//! Dense raster grids sharing spatial metadata.
//!
//! A [`Grid`] is addressed by `(x, y)` where `x` is the column and `y` the row,
//! with `y` growing downwards. The underlying [`Array2`] is stored row-major, so
//! `grid[(x, y)]` is `array[[y, x]]`.

use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use ndarray::Array2;
use num::Float;

use crate::error::{HydroError, Result};

/// A value that can be stored in a [`Grid`] cell.
pub trait GridValue: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Whether `self` should be treated as no-data given the grid's sentinel.
    fn is_no_data(self, no_data: Self) -> bool {
        self == no_data
    }
}

macro_rules! impl_grid_value_exact {
    ($($t:ty),*) => {
        $(impl GridValue for $t {})*
    };
}

macro_rules! impl_grid_value_float {
    ($($t:ty),*) => {
        $(impl GridValue for $t {
            // NaN never compares equal to anything, the sentinel included
            fn is_no_data(self, no_data: Self) -> bool {
                self == no_data || self.is_nan()
            }
        })*
    };
}

impl_grid_value_exact!(bool, u8, u16, u32, i16, i32, i64);
impl_grid_value_float!(f32, f64);

/// Real-valued cell type usable as an elevation.
pub trait Elevation: GridValue + Float {}

impl<T: GridValue + Float> Elevation for T {}

/// A dense 2D grid with an isotropic cell size and a no-data sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Array2<T>,
    cell_size: f64,
    no_data: T,
}

fn validate(width: usize, height: usize, cell_size: f64) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(HydroError::InvalidDimensions { width, height });
    }
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(HydroError::InvalidCellSize(cell_size));
    }
    Ok(())
}

/// Allocate `width * height` cells of `value`, reporting allocation failure rather
/// than aborting.
fn try_filled<T: Clone>(
    width: usize,
    height: usize,
    value: T,
    what: &'static str,
) -> Result<Array2<T>> {
    let oom = || HydroError::OutOfMemory { what, width, height };
    let len = width.checked_mul(height).ok_or_else(oom)?;
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|_| oom())?;
    cells.resize(len, value);
    Ok(Array2::from_shape_vec((height, width), cells)?)
}

impl<T: GridValue> Grid<T> {
    /// A `width` x `height` grid with every cell set to `no_data`.
    pub fn new(width: usize, height: usize, cell_size: f64, no_data: T) -> Result<Self> {
        Self::filled(width, height, cell_size, no_data, no_data)
    }

    /// A `width` x `height` grid with every cell set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        cell_size: f64,
        no_data: T,
        value: T,
    ) -> Result<Self> {
        validate(width, height, cell_size)?;
        Ok(Self {
            data: try_filled(width, height, value, "grid")?,
            cell_size,
            no_data,
        })
    }

    /// Wrap an existing array, shaped `(height, width)`.
    pub fn from_array(data: Array2<T>, cell_size: f64, no_data: T) -> Result<Self> {
        validate(data.ncols(), data.nrows(), cell_size)?;
        Ok(Self { data, cell_size, no_data })
    }

    /// Allocate a grid of another value type with this grid's extent and cell size,
    /// filled with its own `no_data` sentinel.
    pub fn copy_props<U: GridValue>(&self, no_data: U) -> Result<Grid<U>> {
        self.derive(no_data, "derived grid")
    }

    pub(crate) fn derive<U: GridValue>(&self, no_data: U, what: &'static str) -> Result<Grid<U>> {
        Ok(Grid {
            data: try_filled(self.width(), self.height(), no_data, what)?,
            cell_size: self.cell_size,
            no_data,
        })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn no_data(&self) -> T {
        self.no_data
    }

    /// Total number of cells, data or not.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a validated grid; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether signed coordinates fall inside the grid.
    #[inline]
    pub fn in_grid(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<T> {
        self.data.get((y, x)).copied().ok_or(HydroError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        match self.data.get_mut((y, x)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(HydroError::OutOfBounds { x, y, width, height }),
        }
    }

    /// Set every cell to `value`.
    pub fn init(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn is_no_data_at(&self, x: usize, y: usize) -> bool {
        self[(x, y)].is_no_data(self.no_data)
    }

    pub fn data_cell_count(&self) -> usize {
        self.data.iter().filter(|v| !v.is_no_data(self.no_data)).count()
    }

    /// Refuse to pair grids whose extents differ.
    pub fn check_congruent<U: GridValue>(&self, other: &Grid<U>) -> Result<()> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(HydroError::DimensionMismatch {
                expected_width: self.width(),
                expected_height: self.height(),
                width: other.width(),
                height: other.height(),
            });
        }
        Ok(())
    }

    /// Row-major view of the cells, shaped `(height, width)`.
    pub fn array(&self) -> &Array2<T> {
        &self.data
    }

    pub fn array_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    pub fn into_array(self) -> Array2<T> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[[y, x]]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        &mut self.data[[y, x]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_xy_addressing() {
        let grid = Grid::from_array(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], 10.0, -9999.0).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[(2, 0)], 3.0);
        assert_eq!(grid[(0, 1)], 4.0);
        assert_eq!(grid.get(1, 1).unwrap(), 5.0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3, 2, 1.0, 0_i32).unwrap();
        assert!(matches!(grid.get(3, 0), Err(HydroError::OutOfBounds { x: 3, y: 0, .. })));
        assert!(grid.set(0, 2, 7).is_err());
        assert!(grid.set(2, 1, 7).is_ok());
        assert_eq!(grid[(2, 1)], 7);
    }

    #[test]
    fn test_in_grid() {
        let grid = Grid::new(4, 3, 1.0, false).unwrap();
        assert!(grid.in_grid(0, 0));
        assert!(grid.in_grid(3, 2));
        assert!(!grid.in_grid(-1, 0));
        assert!(!grid.in_grid(0, -1));
        assert!(!grid.in_grid(4, 0));
        assert!(!grid.in_grid(0, 3));
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(matches!(
            Grid::new(0, 5, 1.0, 0.0_f64),
            Err(HydroError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(matches!(Grid::new(2, 2, 0.0, 0.0_f64), Err(HydroError::InvalidCellSize(_))));
        assert!(Grid::new(2, 2, f64::NAN, 0.0_f64).is_err());
    }

    #[test]
    fn test_copy_props_is_congruent() {
        let elev = Grid::filled(5, 4, 30.0, -9999.0_f32, 1.0).unwrap();
        let labels = elev.copy_props(-1_i32).unwrap();
        assert_eq!((labels.width(), labels.height()), (5, 4));
        assert_eq!(labels.cell_size(), 30.0);
        assert_eq!(labels.no_data(), -1);
        assert!(labels.array().iter().all(|&l| l == -1));
        assert!(elev.check_congruent(&labels).is_ok());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Grid::new(3, 3, 1.0, 0.0_f64).unwrap();
        let b = Grid::new(3, 4, 1.0, 0_i32).unwrap();
        assert!(matches!(
            a.check_congruent(&b),
            Err(HydroError::DimensionMismatch { expected_height: 3, height: 4, .. })
        ));
    }

    #[test]
    fn test_nan_is_no_data() {
        let grid = Grid::from_array(array![[1.0, f64::NAN], [-9999.0, 2.0]], 1.0, -9999.0).unwrap();
        assert!(!grid.is_no_data_at(0, 0));
        assert!(grid.is_no_data_at(1, 0));
        assert!(grid.is_no_data_at(0, 1));
        assert_eq!(grid.data_cell_count(), 2);
    }
}
