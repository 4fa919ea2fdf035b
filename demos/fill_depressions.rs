use anyhow::Result;
use ndarray::array;
use hydro_watersheds::{fill_depressions, Grid};

fn main() -> Result<()> {
    env_logger::init();

    let nd: f64 = -100.0;
    let mut dem = Grid::from_array(
        array![
            [3.0, 3.0, 3.0, 7.0],
            [3.0, 2.0, 4.0, 2.0],
            [5.0, 6.0, 8.0, 0.0],
        ],
        8.0,
        nd,
    )?;
    println!("Filling depressions on {:?}", dem.array());
    fill_depressions(&mut dem)?;
    println!("now is {:?}", dem.array());

    let mut dem = Grid::from_array(
        array![
            [10.0, 12.0, 10.0, 10.0, 10.0],
            [12.0, 1.0,  10.0, 12.0, 10.0],
            [10.0, 12.0, 2.0,  11.0, 10.0],
            [10.0, 12.0, 12.0, 11.0, 10.0],
        ],
        8.0,
        nd,
    )?;
    println!("Filling depressions on {:?}", dem.array());
    let stats = fill_depressions(&mut dem)?;
    println!("now is {:?}", dem.array());
    println!("{} of {} cells were in pits", stats.pit_cells, stats.processed_cells);

    Ok(())
}
