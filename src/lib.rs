//! # Hydro-watersheds
//!
//! `hydro-watersheds` labels the watersheds of a digital elevation model (DEM) and
//! optionally corrects its drainage so that every cell drains to the edge, in a
//! single priority-flood pass from the edge of the DEM inwards. Around that core it
//! provides the terrain attributes and indices usually computed from a corrected
//! DEM, a per-watershed area report and single band TIFF I/O.
//!
//! Grids are addressed by `(x, y)`, column then row.
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use hydro_watersheds::{find_watersheds, watershed_areas, FloodConfig, Grid};
//!
//! let mut dem = Grid::from_array(
//!     array![
//!         [10.0, 12.0, 10.0],
//!         [12.0, 9.0,  12.0],
//!         [10.0, 12.0, 10.0],
//!     ],
//!     8.0,
//!     -3.0,
//! ).expect("Failed to create DEM");
//!
//! let sheds = find_watersheds(&mut dem, FloodConfig { correct_drainage: true })
//!     .expect("Failed to find watersheds");
//! // the pit in the middle now spills over the lowest rim cell
//! assert_eq!(dem[(1, 1)], 10.0);
//! print!("{}", watershed_areas(&sheds.labels));
//! ```

pub mod attributes;
pub mod cell;
pub mod error;
pub mod grid;
pub mod indices;
pub mod io;
pub mod progress;
pub mod report;
pub mod scheduler;
pub mod watershed;

pub use attributes::{
    aspect, curvature, planform_curvature, profile_curvature, slope, terrain_attribute,
    AttributeParams, SlopeUnits, TerrainAttribute,
};
pub use error::{HydroError, Result};
pub use grid::{Elevation, Grid, GridValue};
pub use indices::{cti, spi};
pub use io::{read_grid, write_grid};
pub use progress::{LogProgress, NoProgress, Progress};
pub use report::{watershed_areas, WatershedAreas};
pub use watershed::{
    fill_depressions, find_watersheds, find_watersheds_with_progress, FloodConfig, FloodStats,
    Watersheds, LABEL_NO_DATA,
};
