//! Indices combining flow accumulation with slope.
//!
//! Both inputs come from elsewhere: flow accumulation from an upslope-area
//! algorithm, percent slope from [`crate::attributes::slope`].

use ndarray::Zip;

use crate::error::Result;
use crate::grid::{Elevation, Grid};
use crate::progress::Timed;

/// No-data value of index grids. A valid index can also come out as -1, though
/// only for an unlucky combination of inputs.
pub const INDEX_NO_DATA: f64 = -1.0;

fn combine<T, F>(
    name: &'static str,
    flow_accumulation: &Grid<T>,
    percent_slope: &Grid<T>,
    index: F,
) -> Result<Grid<T>>
where
    T: Elevation,
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    flow_accumulation.check_congruent(percent_slope)?;
    let _t = Timed::new(name);

    let out_no_data: T = num::cast(INDEX_NO_DATA).unwrap_or_else(T::nan);
    let mut result = flow_accumulation.derive(out_no_data, name)?;
    let acc_no_data = flow_accumulation.no_data();
    let slope_no_data = percent_slope.no_data();

    Zip::from(result.array_mut())
        .and(flow_accumulation.array())
        .and(percent_slope.array())
        .par_for_each(|out, &acc, &slope| {
            if acc.is_no_data(acc_no_data) || slope.is_no_data(slope_no_data) {
                return;
            }
            let acc = num::cast::<T, f64>(acc).unwrap_or(f64::NAN);
            let slope = num::cast::<T, f64>(slope).unwrap_or(f64::NAN);
            *out = num::cast(index(acc, slope)).unwrap_or(out_no_data);
        });
    Ok(result)
}

/// Stream power index, `ln(L (A + 0.001) (S/100 + 0.001))` for cell size `L`,
/// flow accumulation `A` and percent slope `S`.
///
/// The result takes the extent and cell size of `flow_accumulation`; mismatched
/// grids are refused.
pub fn spi<T: Elevation>(flow_accumulation: &Grid<T>, percent_slope: &Grid<T>) -> Result<Grid<T>> {
    let l = flow_accumulation.cell_size();
    combine("SPI", flow_accumulation, percent_slope, move |acc, slope| {
        (l * (acc + 0.001) * (slope / 100.0 + 0.001)).ln()
    })
}

/// Compound topographic index, `ln(L (A + 0.001) / (S/100 + 0.001))`.
pub fn cti<T: Elevation>(flow_accumulation: &Grid<T>, percent_slope: &Grid<T>) -> Result<Grid<T>> {
    let l = flow_accumulation.cell_size();
    combine("CTI", flow_accumulation, percent_slope, move |acc, slope| {
        (l * (acc + 0.001) / (slope / 100.0 + 0.001)).ln()
    })
}
