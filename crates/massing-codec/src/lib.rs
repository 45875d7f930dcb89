//! Conversion between grid layers and raster images, and the round trip
//! through an external image-translation model.
#![forbid(unsafe_code)]

pub mod color;
pub mod decode;
pub mod encode;
pub mod raster;
pub mod refine;

pub use decode::{DecodeParams, DecodeReport, decode};
pub use encode::{EncodeOptions, encode};
pub use raster::{PixelFormat, Raster, Rgba};
pub use refine::{ImageTranslator, TRANSLATOR_SIDE, TranslateError, refine};

use massing_grid::GridError;

#[derive(Debug)]
pub enum CodecError {
    /// Raster with a zero dimension.
    EmptyRaster,
    /// Pixel buffer length does not match the stated dimensions.
    MalformedRaster { expected: usize, actual: usize },
    InvalidParams(&'static str),
    /// Translator returned a raster of the wrong size.
    UnexpectedSize {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    Translate(TranslateError),
    Grid(GridError),
}

impl From<GridError> for CodecError {
    fn from(e: GridError) -> Self {
        CodecError::Grid(e)
    }
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::EmptyRaster => write!(f, "raster has a zero dimension"),
            CodecError::MalformedRaster { expected, actual } => write!(
                f,
                "raster buffer holds {} pixels, expected {}",
                actual, expected
            ),
            CodecError::InvalidParams(msg) => write!(f, "invalid decode parameters: {}", msg),
            CodecError::UnexpectedSize { expected, actual } => write!(
                f,
                "translator returned {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            CodecError::Translate(e) => write!(f, "image translation failed: {}", e),
            CodecError::Grid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Grid(e) => Some(e),
            CodecError::Translate(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
