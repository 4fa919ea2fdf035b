use thiserror::Error;

/// Everything that can go wrong in this crate.
///
/// The flood itself cannot fail once started; every variant here is raised either
/// while validating inputs, while allocating the working grids, or by raster I/O.
#[derive(Error, Debug)]
pub enum HydroError {
    #[error("invalid grid dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid cell size {0}, must be finite and positive")]
    InvalidCellSize(f64),

    #[error("grid dimensions differ: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("out of memory allocating {what} for a {width}x{height} grid")]
    OutOfMemory {
        what: &'static str,
        width: usize,
        height: usize,
    },

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("unsupported raster: {0}")]
    UnsupportedRaster(String),
}

pub type Result<T> = std::result::Result<T, HydroError>;
