use anyhow::Result;
use ndarray::array;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use hydro_watersheds::{find_watersheds, read_grid, write_grid, FloodConfig, Grid};

fn main() -> Result<()> {
    env_logger::init();

    let dem: Grid<f32> = Grid::from_array(
        array![
            [10.0, 12.0, 10.0, 10.0],
            [12.0, 1.0,  10.0, 12.0],
            [10.0, 12.0, 10.0, 9.0],
        ],
        8.0,
        -100.0,
    )?;
    let tmp = NamedTempFile::new()?;
    let ofn: PathBuf = tmp.path().to_path_buf();
    println!("Writing DEM to {:?}", ofn);
    write_grid(&dem, &ofn)?;

    // read file back in
    println!("Reading {:?} into a new grid and checking got same values", ofn);
    let mut dem_new: Grid<f32> = read_grid(&ofn, -1.0)?;
    assert_eq!(dem_new, dem);

    let sheds = find_watersheds(&mut dem_new, FloodConfig::correcting())?;
    let labels_tmp = NamedTempFile::new()?;
    write_grid(&sheds.labels, labels_tmp.path())?;
    let labels: Grid<i32> = read_grid(labels_tmp.path(), 0)?;
    assert_eq!(labels, sheds.labels);
    println!("labels are {:?}", labels.array());

    tmp.close()?;
    labels_tmp.close()?;

    Ok(())
}
