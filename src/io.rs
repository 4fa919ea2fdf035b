//! Reading and writing single-band TIFF rasters.
//!
//! Only the parts of GeoTIFF the flood needs are honoured: the pixel scale gives the
//! cell size and the GDAL no-data tag gives the sentinel. Georeferencing beyond
//! that is not carried.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::Path;

use ndarray::Array2;
use num::NumCast;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tiff::ColorType;

use crate::error::{HydroError, Result};
use crate::grid::{Grid, GridValue};

/// A cell type that can be stored in a TIFF band.
pub trait RasterSample: GridValue + NumCast + Display {
    #[doc(hidden)]
    fn write_image<W: Write + Seek>(
        encoder: &mut TiffEncoder<W>,
        width: u32,
        height: u32,
        cell_size: f64,
        no_data: &str,
        data: &[Self],
    ) -> Result<()>;
}

macro_rules! impl_raster_sample {
    ($t:ty, $colour:ty) => {
        impl RasterSample for $t {
            fn write_image<W: Write + Seek>(
                encoder: &mut TiffEncoder<W>,
                width: u32,
                height: u32,
                cell_size: f64,
                no_data: &str,
                data: &[Self],
            ) -> Result<()> {
                let mut image = encoder.new_image::<$colour>(width, height)?;
                image
                    .encoder()
                    .write_tag(Tag::ModelPixelScaleTag, &[cell_size, cell_size, 0.0][..])?;
                image.encoder().write_tag(Tag::GdalNodata, no_data)?;
                image.write_data(data)?;
                Ok(())
            }
        }
    };
}

impl_raster_sample!(u8, colortype::Gray8);
impl_raster_sample!(i32, colortype::GrayI32);
impl_raster_sample!(f32, colortype::Gray32Float);
impl_raster_sample!(f64, colortype::Gray64Float);

fn cast_all<S: NumCast, T: NumCast>(samples: Vec<S>) -> Result<Vec<T>> {
    samples
        .into_iter()
        .map(|s| {
            num::cast(s).ok_or_else(|| {
                HydroError::UnsupportedRaster("sample does not fit the grid's cell type".to_string())
            })
        })
        .collect()
}

/// Read the first band of the TIFF at `path` into a grid.
///
/// Samples are converted to `T`. The no-data value comes from the GDAL no-data tag
/// when present, otherwise `default_no_data` is used. The cell size comes from the
/// GeoTIFF pixel scale, defaulting to 1.
pub fn read_grid<T: RasterSample>(path: impl AsRef<Path>, default_no_data: T) -> Result<Grid<T>> {
    let path = path.as_ref();
    log::info!("Reading raster {}", path.display());

    let mut decoder = Decoder::new(BufReader::new(File::open(path)?))?.with_limits(Limits::unlimited());
    let (width, height) = decoder.dimensions()?;
    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(HydroError::UnsupportedRaster(format!(
                "{} has colour type {:?}, expected a single band",
                path.display(),
                other
            )));
        }
    }

    let cell_size = match decoder.find_tag(Tag::ModelPixelScaleTag)? {
        Some(value) => {
            let scale = value.into_f64_vec()?;
            if scale.len() >= 2 && scale[0] != scale[1] {
                log::warn!("{}: cells are not square, using x scale {}", path.display(), scale[0]);
            }
            scale.first().copied().unwrap_or(1.0)
        }
        None => 1.0,
    };
    let no_data = match decoder.find_tag(Tag::GdalNodata)? {
        Some(value) => value
            .into_string()?
            .trim_matches(char::from(0))
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(num::cast::<f64, T>)
            .unwrap_or(default_no_data),
        None => default_no_data,
    };

    let samples: Vec<T> = match decoder.read_image()? {
        DecodingResult::U8(v) => cast_all(v)?,
        DecodingResult::U16(v) => cast_all(v)?,
        DecodingResult::U32(v) => cast_all(v)?,
        DecodingResult::U64(v) => cast_all(v)?,
        DecodingResult::I8(v) => cast_all(v)?,
        DecodingResult::I16(v) => cast_all(v)?,
        DecodingResult::I32(v) => cast_all(v)?,
        DecodingResult::I64(v) => cast_all(v)?,
        DecodingResult::F32(v) => cast_all(v)?,
        DecodingResult::F64(v) => cast_all(v)?,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(HydroError::UnsupportedRaster(format!(
                "{} has an unsupported sample format",
                path.display()
            )));
        }
    };
    log::debug!("{}: {}x{}, cell size {}, no-data {:?}", path.display(), width, height, cell_size, no_data);

    let data = Array2::from_shape_vec((height as usize, width as usize), samples)?;
    Grid::from_array(data, cell_size, no_data)
}

/// Write `grid` to `path` as a single band TIFF, recording its cell size and
/// no-data value.
pub fn write_grid<T: RasterSample>(grid: &Grid<T>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    log::info!("Writing raster {}", path.display());

    let too_big = || {
        HydroError::UnsupportedRaster(format!(
            "{}x{} is too large for a TIFF",
            grid.width(),
            grid.height()
        ))
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_big())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_big())?;

    // row-major with x fastest, which is what TIFF strips expect
    let data: Vec<T> = grid.array().iter().copied().collect();
    let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path)?))?;
    T::write_image(
        &mut encoder,
        width,
        height,
        grid.cell_size(),
        &grid.no_data().to_string(),
        &data,
    )
}
