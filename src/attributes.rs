//! Per-cell terrain attributes from a 3x3 neighbourhood.
//!
//! Slope and aspect follow Horn (1981), curvatures follow Zevenbergen and Thorne
//! (1987), both as presented in Burrough (1998) "Principles of Geographical
//! Information Systems", p. 190. Cells are labelled
//!
//! ```text
//! a b c
//! d e f
//! g h i
//! ```
//!
//! with north at the top. Neighbours that are off the grid or no-data take the
//! value of the centre cell.

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::Result;
use crate::grid::{Elevation, Grid};
use crate::progress::Timed;

/// No-data value of every attribute grid.
pub const ATTRIBUTE_NO_DATA: f64 = -99999.0;

/// Elevation multiplier for DEMs stored in feet.
pub const FEET_TO_METRES: f64 = 0.3048;

/// Aspect given to cells with no slope.
pub const FLAT_ASPECT: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlopeUnits {
    /// Rise over run, 0 for flat
    RiseOverRun,
    /// Rise over run times 100
    Percent,
    Radians,
    #[default]
    Degrees,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainAttribute {
    /// Difference of profile and planform curvature, times 100
    Curvature,
    PlanformCurvature,
    ProfileCurvature,
    /// Degrees clockwise from north in [0, 360), or [`FLAT_ASPECT`]
    Aspect,
    Slope(SlopeUnits),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeParams {
    /// Factor applied to elevations before differencing, so that they are in the
    /// same units as the cell size.
    pub z_factor: f64,
}

impl Default for AttributeParams {
    fn default() -> Self {
        Self { z_factor: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Derivatives {
    rise_over_run: f64,
    aspect: f64,
    curvature: f64,
    profile_curvature: f64,
    planform_curvature: f64,
}

/// Evaluate the stencil around `(x, y)`, which must be a data cell.
fn derivatives<T: Elevation>(elevations: &Grid<T>, x: usize, y: usize, z_factor: f64) -> Derivatives {
    let no_data = elevations.no_data();
    let centre = elevations[(x, y)];
    let at = |dx: isize, dy: isize| -> f64 {
        let (nx, ny) = (x as isize + dx, y as isize + dy);
        let mut v = centre;
        if elevations.in_grid(nx, ny) {
            v = elevations[(nx as usize, ny as usize)];
            if v.is_no_data(no_data) {
                v = centre;
            }
        }
        num::cast::<T, f64>(v).unwrap_or(f64::NAN) * z_factor
    };
    let (a, b, c) = (at(-1, -1), at(0, -1), at(1, -1));
    let (d, e, f) = (at(-1, 0), at(0, 0), at(1, 0));
    let (g, h, i) = (at(-1, 1), at(0, 1), at(1, 1));

    // aspect ignores the cell size
    let mut dzdx = ((c + 2.0 * f + i) - (a + 2.0 * d + g)) / 8.0;
    let mut dzdy = ((g + 2.0 * h + i) - (a + 2.0 * b + c)) / 8.0;
    let mut aspect = dzdy.atan2(-dzdx).to_degrees();
    aspect = if aspect < 0.0 {
        90.0 - aspect
    } else if aspect > 90.0 {
        360.0 - aspect + 90.0
    } else {
        90.0 - aspect
    };

    let l = elevations.cell_size();
    dzdx /= l;
    dzdy /= l;
    let rise_over_run = (dzdx * dzdx + dzdy * dzdy).sqrt();
    if rise_over_run == 0.0 {
        return Derivatives {
            rise_over_run,
            aspect: FLAT_ASPECT,
            curvature: 0.0,
            profile_curvature: 0.0,
            planform_curvature: 0.0,
        };
    }

    let dd = ((d + f) / 2.0 - e) / l / l;
    let ee = ((b + h) / 2.0 - e) / l / l;
    let ff = (-a + c + g - i) / 4.0 / l / l;
    let gg = (-d + f) / 2.0 / l;
    let hh = (b - h) / 2.0 / l;
    let curvature = -2.0 * (dd + ee) * 100.0;

    let (profile_curvature, planform_curvature) = if gg == 0.0 && hh == 0.0 {
        (0.0, 0.0)
    } else {
        let g2h2 = gg * gg + hh * hh;
        (
            2.0 * (dd * gg * gg + ee * hh * hh + ff * gg * hh) / g2h2 * 100.0,
            -2.0 * (dd * hh * hh + ee * gg * gg - ff * gg * hh) / g2h2 * 100.0,
        )
    };

    Derivatives {
        rise_over_run,
        aspect,
        curvature,
        profile_curvature,
        planform_curvature,
    }
}

fn select(attribute: TerrainAttribute, v: &Derivatives) -> f64 {
    match attribute {
        TerrainAttribute::Curvature => v.curvature,
        TerrainAttribute::PlanformCurvature => v.planform_curvature,
        TerrainAttribute::ProfileCurvature => v.profile_curvature,
        TerrainAttribute::Aspect => v.aspect,
        TerrainAttribute::Slope(SlopeUnits::RiseOverRun) => v.rise_over_run,
        TerrainAttribute::Slope(SlopeUnits::Percent) => v.rise_over_run * 100.0,
        TerrainAttribute::Slope(SlopeUnits::Radians) => v.rise_over_run.atan(),
        TerrainAttribute::Slope(SlopeUnits::Degrees) => v.rise_over_run.atan().to_degrees(),
    }
}

/// Compute one terrain attribute for every cell of `elevations`.
///
/// The result has the extent and cell size of `elevations` and a no-data value of
/// [`ATTRIBUTE_NO_DATA`], which is also written wherever the input is no-data.
/// Rows are processed in parallel.
pub fn terrain_attribute<T: Elevation>(
    elevations: &Grid<T>,
    attribute: TerrainAttribute,
    params: AttributeParams,
) -> Result<Grid<T>> {
    let _t = Timed::new("terrain attribute");
    log::debug!("Calculating terrain attribute {:?}", attribute);

    let (width, height) = (elevations.width(), elevations.height());
    let out_no_data: T = num::cast(ATTRIBUTE_NO_DATA).unwrap_or_else(T::nan);

    let values: Vec<T> = (0..height)
        .into_par_iter()
        .flat_map(|y| {
            let mut row = Vec::with_capacity(width);
            for x in 0..width {
                if elevations.is_no_data_at(x, y) {
                    row.push(out_no_data);
                    continue;
                }
                let v = select(attribute, &derivatives(elevations, x, y, params.z_factor));
                row.push(num::cast(v).unwrap_or(out_no_data));
            }
            row
        })
        .collect();

    let data = Array2::from_shape_vec((height, width), values)?;
    Grid::from_array(data, elevations.cell_size(), out_no_data)
}

pub fn slope<T: Elevation>(elevations: &Grid<T>, units: SlopeUnits) -> Result<Grid<T>> {
    terrain_attribute(elevations, TerrainAttribute::Slope(units), AttributeParams::default())
}

pub fn aspect<T: Elevation>(elevations: &Grid<T>) -> Result<Grid<T>> {
    terrain_attribute(elevations, TerrainAttribute::Aspect, AttributeParams::default())
}

pub fn curvature<T: Elevation>(elevations: &Grid<T>) -> Result<Grid<T>> {
    terrain_attribute(elevations, TerrainAttribute::Curvature, AttributeParams::default())
}

pub fn planform_curvature<T: Elevation>(elevations: &Grid<T>) -> Result<Grid<T>> {
    terrain_attribute(elevations, TerrainAttribute::PlanformCurvature, AttributeParams::default())
}

pub fn profile_curvature<T: Elevation>(elevations: &Grid<T>) -> Result<Grid<T>> {
    terrain_attribute(elevations, TerrainAttribute::ProfileCurvature, AttributeParams::default())
}
