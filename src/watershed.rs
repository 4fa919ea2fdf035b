//! Priority-flood watershed labelling with optional drainage correction.
//!
//! The flood starts from every edge cell of the DEM and works inwards, always
//! continuing from the lowest point of the frontier. Every data cell is reached
//! exactly once and inherits the label of the cell that reached it, so each
//! watershed ends up labelled with the outlet it drains through. With drainage
//! correction on, cells reached from above are raised to the water level that
//! reached them, leaving no closed depressions.
//!
//! Data cells that touch a no-data cell are treated exactly like edge cells: water
//! can leave the DEM there.
//!
//! Reference:
//! Barnes, R., Lehman, C., & Mulla, D. (2014). Priority-Flood: An optimal
//! depression-filling and watershed-labeling algorithm for digital elevation
//! models. *Computers & Geosciences*, 62, 117–127.

use std::time::Duration;

use crate::cell::GridCellZ;
use crate::error::Result;
use crate::grid::{Elevation, Grid};
use crate::progress::{NoProgress, Progress};
use crate::scheduler::{FloodScheduler, Worklist};

/// Label given to cells that belong to no watershed.
pub const LABEL_NO_DATA: i32 = -1;

const DX: [isize; 8] = [1, 1, 1, 0, -1, -1, -1, 0];
const DY: [isize; 8] = [-1, 0, 1, 1, 1, 0, -1, -1];

/// Options fixed for one run of the flood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloodConfig {
    /// Raise cells inside depressions to their spill level so that every cell
    /// drains to the edge of the DEM. When false the elevations are left untouched.
    pub correct_drainage: bool,
}

impl FloodConfig {
    pub fn correcting() -> Self {
        Self { correct_drainage: true }
    }
}

/// Counters describing a finished flood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloodStats {
    /// Data cells expanded; equals the number of data cells in the DEM.
    pub processed_cells: u64,
    /// Cells drained through the meander stack, i.e. inside pits and flats.
    pub pit_cells: u64,
    /// Cells taken from the priority queue.
    pub open_cells: u64,
    /// Distinct labels handed out.
    pub watersheds: usize,
    pub elapsed: Duration,
}

/// Output of [`find_watersheds`].
#[derive(Debug, Clone)]
pub struct Watersheds {
    /// One label per data cell, counting up from 1; [`LABEL_NO_DATA`] elsewhere.
    pub labels: Grid<i32>,
    pub stats: FloodStats,
}

/// Label the watersheds of `elevations`, working inwards from the edges of the DEM.
///
/// If `config.correct_drainage` is set, `elevations` is altered so that every cell
/// drains to the edge: cells inside depressions are raised to the lowest level at
/// which water could spill out of them.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use hydro_watersheds::{find_watersheds, FloodConfig, Grid};
///
/// let mut dem = Grid::from_array(
///     array![
///         [5.0, 5.0, 5.0],
///         [5.0, 1.0, 5.0],
///         [5.0, 5.0, 5.0],
///     ],
///     1.0,
///     -9999.0,
/// ).expect("Failed to create DEM");
///
/// let sheds = find_watersheds(&mut dem, FloodConfig { correct_drainage: true })
///     .expect("Failed to flood DEM");
/// assert_eq!(dem[(1, 1)], 5.0);
/// assert_eq!(sheds.stats.watersheds, 1);
/// ```
pub fn find_watersheds<T: Elevation>(
    elevations: &mut Grid<T>,
    config: FloodConfig,
) -> Result<Watersheds> {
    find_watersheds_with_progress(elevations, config, &mut NoProgress)
}

/// [`find_watersheds`], reporting the number of cells expanded to `progress`.
pub fn find_watersheds_with_progress<T, P>(
    elevations: &mut Grid<T>,
    config: FloodConfig,
    progress: &mut P,
) -> Result<Watersheds>
where
    T: Elevation,
    P: Progress + ?Sized,
{
    flood(elevations, config, progress, |_, _| {})
}

/// Fill every depression in `elevations` in place, discarding the labels.
pub fn fill_depressions<T: Elevation>(elevations: &mut Grid<T>) -> Result<FloodStats> {
    find_watersheds(elevations, FloodConfig::correcting()).map(|sheds| sheds.stats)
}

/// Whether a data cell starts on the frontier: it is on the edge of the DEM or
/// beside a no-data cell.
fn is_seed<T: Elevation>(elevations: &Grid<T>, x: usize, y: usize) -> bool {
    if x == 0 || y == 0 || x + 1 == elevations.width() || y + 1 == elevations.height() {
        return true;
    }
    (0..8).any(|n| {
        let nx = (x as isize + DX[n]) as usize;
        let ny = (y as isize + DY[n]) as usize;
        elevations.is_no_data_at(nx, ny)
    })
}

/// The flood proper. `on_pop` sees every cell as it leaves the scheduler.
pub(crate) fn flood<T, P, F>(
    elevations: &mut Grid<T>,
    config: FloodConfig,
    progress: &mut P,
    mut on_pop: F,
) -> Result<Watersheds>
where
    T: Elevation,
    P: Progress + ?Sized,
    F: FnMut(&GridCellZ<T>, Worklist),
{
    let (width, height) = (elevations.width(), elevations.height());
    let no_data = elevations.no_data();

    log::debug!("Setting up {}x{} label and visited grids", width, height);
    let mut labels = elevations.derive(LABEL_NO_DATA, "label grid")?;
    let mut visited = elevations.derive(false, "visited grid")?;
    let mut scheduler = FloodScheduler::for_extent(width, height)?;

    let mut data_cells: u64 = 0;
    for y in 0..height {
        for x in 0..width {
            if elevations.is_no_data_at(x, y) {
                continue;
            }
            data_cells += 1;
            if is_seed(elevations, x, y) {
                visited[(x, y)] = true;
                scheduler.push_open(GridCellZ::new(x, y, elevations[(x, y)]))?;
            }
        }
    }
    log::debug!(
        "Seeded {} of {} data cells, correct_drainage={}",
        scheduler.open_len(),
        data_cells,
        config.correct_drainage
    );

    progress.start(data_cells);
    let mut next_label: i32 = 1;
    let mut processed: u64 = 0;
    while let Some((cell, from)) = scheduler.pop() {
        on_pop(&cell, from);
        processed += 1;
        let (x, y) = (cell.x, cell.y);

        // Still unlabelled: nothing has flooded into this seed, it opens a new watershed
        if labels[(x, y)] == LABEL_NO_DATA && !elevations.is_no_data_at(x, y) {
            labels[(x, y)] = next_label;
            next_label += 1;
        }
        let label = labels[(x, y)];
        debug_assert_ne!(label, LABEL_NO_DATA, "expanded no-data cell ({x}, {y})");

        for n in 0..8 {
            let (nx, ny) = (x as isize + DX[n], y as isize + DY[n]);
            if !elevations.in_grid(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let zn = elevations[(nx, ny)];
            if zn.is_no_data(no_data) {
                continue;
            }
            if visited[(nx, ny)] {
                // a seed still waiting on the frontier joins whoever reaches it first
                if labels[(nx, ny)] == LABEL_NO_DATA {
                    labels[(nx, ny)] = label;
                }
                continue;
            }

            labels[(nx, ny)] = label;
            visited[(nx, ny)] = true;
            if zn <= cell.z {
                if config.correct_drainage {
                    elevations[(nx, ny)] = cell.z;
                }
                scheduler.push_meander(GridCellZ::new(nx, ny, cell.z))?;
            } else {
                scheduler.push_open(GridCellZ::new(nx, ny, zn))?;
            }
        }
        progress.update(processed);
    }
    let elapsed = progress.stop();

    let stats = FloodStats {
        processed_cells: processed,
        pit_cells: scheduler.meander_pops(),
        open_cells: scheduler.open_pops(),
        watersheds: (next_label - 1) as usize,
        elapsed,
    };
    log::info!(
        "{} cells processed. {} in pits, {} not in pits. {} watersheds",
        stats.processed_cells,
        stats.pit_cells,
        stats.open_cells,
        stats.watersheds
    );
    debug_assert_eq!(processed, data_cells);

    Ok(Watersheds { labels, stats })
}
