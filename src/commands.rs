use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use massing_codec::{DecodeParams, EncodeOptions, decode as decode_raster, encode};
use massing_edit::populate_random_boxes;
use massing_grid::{CellState, Grid};
use massing_io::{Config, IoError, PngDirSink, SampleSetParams, load_raster, save_raster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EXPORTED: [CellState; 2] = [CellState::Flagged, CellState::Solid];

fn setup(config: &Config) -> Result<(Grid, StdRng), IoError> {
    let grid = config.grid.build()?;
    Ok((grid, StdRng::seed_from_u64(config.seed)))
}

fn export(grid: &Grid, states: &[CellState], csv: Option<&Path>) -> Result<usize, IoError> {
    match csv {
        Some(path) => massing_io::write_cells(grid, states, BufWriter::new(File::create(path)?)),
        None => massing_io::write_cells(grid, states, io::stdout().lock()),
    }
}

pub fn samples(config: &Config, out: &Path, count: Option<usize>) -> Result<usize, IoError> {
    let (mut grid, mut rng) = setup(config)?;
    let mut params = SampleSetParams::from(&config.samples);
    if let Some(n) = count {
        params.samples = n;
    }
    let mut sink = PngDirSink::create(out)?;
    let written = massing_io::generate_samples(&mut grid, &mut rng, &params, &mut sink)?;
    log::info!("{} samples in {}", written, out.display());
    Ok(written)
}

pub fn random(
    config: &Config,
    out: &Path,
    csv: Option<&Path>,
    boxes: Option<usize>,
) -> Result<usize, IoError> {
    let (mut grid, mut rng) = setup(config)?;
    let s = &config.samples;
    let quantity = boxes.unwrap_or_else(|| {
        if s.max_quantity > s.min_quantity {
            rng.random_range(s.min_quantity..s.max_quantity)
        } else {
            s.min_quantity
        }
    });
    let placed = populate_random_boxes(&mut grid, &mut rng, quantity, &s.ranges());
    log::info!("placed {} of {} boxes", placed, quantity);
    save_raster(out, &encode(&grid, &EncodeOptions::default())?)?;
    if let Some(path) = csv {
        export(&grid, &[CellState::Solid], Some(path))?;
    }
    Ok(placed)
}

pub fn decode(
    config: &Config,
    image: &Path,
    include_solid: bool,
    csv: Option<&Path>,
) -> Result<usize, IoError> {
    let (mut grid, _) = setup(config)?;
    let raster = load_raster(image)?;
    let mut params = DecodeParams::from(&config.decode);
    params.include_solid_pixels |= include_solid;
    let report = decode_raster(&mut grid, &raster, &params)?;
    log::info!(
        "{}: {} structural columns, {} solid columns",
        image.display(),
        report.structural_columns,
        report.solid_columns
    );
    let n = export(&grid, &EXPORTED, csv)?;
    if csv.is_none() {
        io::stdout().flush()?;
    }
    Ok(n)
}
