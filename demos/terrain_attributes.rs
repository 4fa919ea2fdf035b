use anyhow::Result;
use ndarray::Array2;
use hydro_watersheds::{aspect, cti, curvature, fill_depressions, slope, Grid, SlopeUnits};

fn main() -> Result<()> {
    env_logger::init();

    // a tilted bowl
    let data = Array2::from_shape_fn((9, 9), |(y, x)| {
        let (dx, dy) = (x as f64 - 4.0, y as f64 - 4.0);
        dx * dx + dy * dy + 2.0 * x as f64
    });
    let mut dem = Grid::from_array(data, 30.0, -9999.0)?;
    fill_depressions(&mut dem)?;

    let percent = slope(&dem, SlopeUnits::Percent)?;
    println!("slope (%) is {:?}", percent.array());
    println!("aspect is {:?}", aspect(&dem)?.array());
    println!("curvature is {:?}", curvature(&dem)?.array());

    // stand-in for a real flow accumulation grid
    let accumulation = Grid::from_array(Array2::from_elem((9, 9), 4.0), 30.0, -1.0)?;
    println!("CTI is {:?}", cti(&accumulation, &percent)?.array());

    Ok(())
}
