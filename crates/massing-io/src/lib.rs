//! File formats around the massing grid: cell exports, PNG rasters, training
//! sample sets and the TOML configuration.
#![forbid(unsafe_code)]

pub mod config;
pub mod export;
pub mod png;
pub mod samples;

pub use config::{Config, DecodeSection, GridSection, SamplesSection, load_config, parse_config};
pub use export::{read_cells, write_cells};
pub use png::{decode_png, encode_png, load_raster, save_raster};
pub use samples::{
    MemorySink, PngDirSink, SampleSetParams, SampleSink, generate_samples, sample_name,
};

use massing_codec::CodecError;
use massing_grid::GridError;

#[derive(Debug)]
pub enum IoError {
    Io(std::io::Error),
    Image(image::ImageError),
    Config(toml::de::Error),
    /// Malformed line in a cell export; `line` is 1-based.
    Parse { line: usize, msg: String },
    Grid(GridError),
    Codec(CodecError),
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io(e)
    }
}

impl From<image::ImageError> for IoError {
    fn from(e: image::ImageError) -> Self {
        IoError::Image(e)
    }
}

impl From<toml::de::Error> for IoError {
    fn from(e: toml::de::Error) -> Self {
        IoError::Config(e)
    }
}

impl From<GridError> for IoError {
    fn from(e: GridError) -> Self {
        IoError::Grid(e)
    }
}

impl From<CodecError> for IoError {
    fn from(e: CodecError) -> Self {
        IoError::Codec(e)
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::Io(e) => write!(f, "io error: {e}"),
            IoError::Image(e) => write!(f, "image error: {e}"),
            IoError::Config(e) => write!(f, "config error: {e}"),
            IoError::Parse { line, msg } => write!(f, "line {line}: {msg}"),
            IoError::Grid(e) => write!(f, "{e}"),
            IoError::Codec(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::Io(e) => Some(e),
            IoError::Image(e) => Some(e),
            IoError::Config(e) => Some(e),
            IoError::Grid(e) => Some(e),
            IoError::Codec(e) => Some(e),
            IoError::Parse { .. } => None,
        }
    }
}
