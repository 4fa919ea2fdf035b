use anyhow::Result;
use ndarray::array;
use hydro_watersheds::{find_watersheds_with_progress, watershed_areas, FloodConfig, Grid, LogProgress};

fn main() -> Result<()> {
    env_logger::init();

    let mut dem = Grid::from_array(
        array![
            [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
            [1.0,  3.0,  5.0,  9.0,  5.0,  3.0,  2.0],
            [10.0, 4.0,  10.0, 10.0, 10.0, 0.5,  10.0],
            [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
        ],
        8.0,
        -100.0,
    )?;
    println!("Finding watersheds on {:?}", dem.array());

    let mut progress = LogProgress::new("watersheds");
    let sheds = find_watersheds_with_progress(&mut dem, FloodConfig::default(), &mut progress)?;
    println!("labels are {:?}", sheds.labels.array());
    println!("{:?}", sheds.stats);
    print!("{}", watershed_areas(&sheds.labels));

    Ok(())
}
