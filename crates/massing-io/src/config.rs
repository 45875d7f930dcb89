use std::fs;
use std::path::Path;

use massing_codec::DecodeParams;
use massing_edit::BoxRanges;
use massing_grid::{Grid, GridError, IVec3, Vec3};
use serde::Deserialize;

use crate::IoError;
use crate::samples::SampleSetParams;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub grid: GridSection,
    #[serde(default)]
    pub decode: DecodeSection,
    #[serde(default)]
    pub samples: SamplesSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            grid: GridSection::default(),
            decode: DecodeSection::default(),
            samples: SamplesSection::default(),
        }
    }
}

fn default_seed() -> u64 {
    666
}

#[derive(Clone, Debug, Deserialize)]
pub struct GridSection {
    #[serde(default = "default_grid_size")]
    pub size: IVec3,
    #[serde(default = "default_grid_capacity")]
    pub capacity: IVec3,
    #[serde(default)]
    pub origin: Vec3,
    #[serde(default = "default_cell_scale")]
    pub cell_scale: f32,
}
fn default_grid_size() -> IVec3 {
    IVec3::new(32, 8, 32)
}
fn default_grid_capacity() -> IVec3 {
    IVec3::new(64, 16, 64)
}
fn default_cell_scale() -> f32 {
    1.0
}
impl Default for GridSection {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
            capacity: default_grid_capacity(),
            origin: Vec3::ZERO,
            cell_scale: default_cell_scale(),
        }
    }
}

impl GridSection {
    pub fn build(&self) -> Result<Grid, GridError> {
        Grid::new(self.size, self.capacity, self.origin, self.cell_scale)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DecodeSection {
    #[serde(default)]
    pub bottom_fraction: f32,
    #[serde(default = "d_one")]
    pub top_fraction: f32,
    #[serde(default = "d_thickness")]
    pub thickness: u32,
    #[serde(default = "d_one")]
    pub sensitivity: f32,
    #[serde(default)]
    pub include_solid_pixels: bool,
}
fn d_one() -> f32 {
    1.0
}
fn d_thickness() -> u32 {
    1
}
impl Default for DecodeSection {
    fn default() -> Self {
        Self {
            bottom_fraction: 0.0,
            top_fraction: d_one(),
            thickness: d_thickness(),
            sensitivity: d_one(),
            include_solid_pixels: false,
        }
    }
}

impl From<&DecodeSection> for DecodeParams {
    fn from(s: &DecodeSection) -> Self {
        DecodeParams {
            bottom_fraction: s.bottom_fraction,
            top_fraction: s.top_fraction,
            thickness: s.thickness,
            sensitivity: s.sensitivity,
            include_solid_pixels: s.include_solid_pixels,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SamplesSection {
    #[serde(default = "default_sample_count")]
    pub count: usize,
    #[serde(default = "d_three")]
    pub min_quantity: usize,
    #[serde(default = "d_ten")]
    pub max_quantity: usize,
    #[serde(default = "d_three_i")]
    pub min_x: i32,
    #[serde(default = "d_ten_i")]
    pub max_x: i32,
    #[serde(default = "d_three_i")]
    pub min_z: i32,
    #[serde(default = "d_ten_i")]
    pub max_z: i32,
}
fn default_sample_count() -> usize {
    500
}
fn d_three() -> usize {
    3
}
fn d_ten() -> usize {
    10
}
fn d_three_i() -> i32 {
    3
}
fn d_ten_i() -> i32 {
    10
}
impl Default for SamplesSection {
    fn default() -> Self {
        Self {
            count: default_sample_count(),
            min_quantity: d_three(),
            max_quantity: d_ten(),
            min_x: d_three_i(),
            max_x: d_ten_i(),
            min_z: d_three_i(),
            max_z: d_ten_i(),
        }
    }
}

impl SamplesSection {
    pub fn ranges(&self) -> BoxRanges {
        BoxRanges {
            min_x: self.min_x,
            max_x: self.max_x,
            min_z: self.min_z,
            max_z: self.max_z,
        }
    }
}

impl From<&SamplesSection> for SampleSetParams {
    fn from(s: &SamplesSection) -> Self {
        SampleSetParams {
            samples: s.count,
            min_quantity: s.min_quantity,
            max_quantity: s.max_quantity,
            ranges: s.ranges(),
        }
    }
}

pub fn parse_config(text: &str) -> Result<Config, IoError> {
    let cfg: Config = toml::from_str(text)?;
    if DecodeParams::from(&cfg.decode).validate().is_err() {
        log::warn!("decode section is out of range; decoding will be refused until it is fixed");
    }
    if cfg.samples.max_quantity < cfg.samples.min_quantity {
        log::warn!(
            "samples.max_quantity {} below min_quantity {}; using min_quantity",
            cfg.samples.max_quantity,
            cfg.samples.min_quantity
        );
    }
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<Config, IoError> {
    let s = fs::read_to_string(path)?;
    let cfg = parse_config(&s)?;
    log::info!("loaded config from {}", path.display());
    Ok(cfg)
}
