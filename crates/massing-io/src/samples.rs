//! Training sample sets: random box layouts rendered as padded square images.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use massing_codec::color::WHITE;
use massing_codec::{EncodeOptions, PixelFormat, Raster, TRANSLATOR_SIDE, encode};
use massing_edit::{BoxRanges, populate_random_boxes};
use massing_grid::Grid;
use rand::Rng;

use crate::IoError;
use crate::png::save_raster;

/// Destination for generated samples.
pub trait SampleSink {
    fn write_sample(&mut self, name: &str, raster: &Raster) -> Result<(), IoError>;
}

/// Writes each sample as `<dir>/<name>`.
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    /// Creates `dir` (and parents) if missing.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, IoError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SampleSink for PngDirSink {
    fn write_sample(&mut self, name: &str, raster: &Raster) -> Result<(), IoError> {
        save_raster(&self.dir.join(name), raster)
    }
}

/// Keeps samples in memory, keyed by name.
#[derive(Default)]
pub struct MemorySink {
    pub samples: BTreeMap<String, Raster>,
}

impl SampleSink for MemorySink {
    fn write_sample(&mut self, name: &str, raster: &Raster) -> Result<(), IoError> {
        self.samples.insert(name.to_string(), raster.clone());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSetParams {
    pub samples: usize,
    /// Boxes per sample are drawn from `min_quantity..max_quantity`.
    pub min_quantity: usize,
    pub max_quantity: usize,
    pub ranges: BoxRanges,
}

impl Default for SampleSetParams {
    fn default() -> Self {
        Self {
            samples: 500,
            min_quantity: 3,
            max_quantity: 10,
            ranges: BoxRanges::default(),
        }
    }
}

pub fn sample_name(index: usize) -> String {
    format!("sample_{index:04}.png")
}

/// Fill `grid` with a fresh random layout per sample and hand its ground
/// layer to `sink`. The grid holds the last layout on return. Returns the
/// number of samples written.
pub fn generate_samples<R: Rng + ?Sized, S: SampleSink + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    params: &SampleSetParams,
    sink: &mut S,
) -> Result<usize, IoError> {
    let opts = EncodeOptions {
        layer: 0,
        format: PixelFormat::Rgba,
    };
    for i in 0..params.samples {
        grid.clear();
        let quantity = if params.max_quantity > params.min_quantity {
            rng.random_range(params.min_quantity..params.max_quantity)
        } else {
            params.min_quantity
        };
        let placed = populate_random_boxes(grid, rng, quantity, &params.ranges);
        let image = encode(grid, &opts)?.fit_square(TRANSLATOR_SIDE, WHITE)?;
        let name = sample_name(i);
        sink.write_sample(&name, &image)?;
        log::debug!("{}: {} of {} boxes placed", name, placed, quantity);
    }
    log::info!("generated {} samples", params.samples);
    Ok(params.samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use massing_codec::color::{BLACK, CLEAR_WHITE};
    use massing_grid::{CellState, IVec3, Vec3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(samples: usize) -> SampleSetParams {
        SampleSetParams {
            samples,
            ..Default::default()
        }
    }

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(sample_name(7), "sample_0007.png");
        assert_eq!(sample_name(1234), "sample_1234.png");
    }

    #[test]
    fn samples_are_square_with_clear_footprint_and_white_padding() {
        let size = IVec3::new(20, 5, 10);
        let mut g = Grid::new(size, size, Vec3::ZERO, 1.0).unwrap();
        let mut sink = MemorySink::default();
        let mut rng = StdRng::seed_from_u64(666);
        let n = generate_samples(&mut g, &mut rng, &params(3), &mut sink).unwrap();
        assert_eq!(n, 3);
        assert_eq!(sink.samples.len(), 3);

        let last = &sink.samples["sample_0002.png"];
        assert_eq!((last.width(), last.height()), (TRANSLATOR_SIDE, TRANSLATOR_SIDE));
        assert_eq!(last.format(), PixelFormat::Rgba);
        // z in 10..20 of the padded square is filler
        assert_eq!(last.get(0, 255), Some(WHITE));
        for px in last.pixels() {
            assert!([WHITE, CLEAR_WHITE, BLACK].contains(px));
        }
        // The last layout is left on the grid and matches the last image.
        let black = last.pixels().iter().filter(|&&p| p == BLACK).count();
        assert_eq!(black > 0, g.count_state(CellState::Solid) > 0);
    }

    #[test]
    fn same_seed_same_sample_set() {
        let size = IVec3::new(16, 4, 16);
        let run = |seed| {
            let mut g = Grid::new(size, size, Vec3::ZERO, 1.0).unwrap();
            let mut sink = MemorySink::default();
            generate_samples(&mut g, &mut StdRng::seed_from_u64(seed), &params(4), &mut sink)
                .unwrap();
            sink.samples
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn png_sink_writes_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let size = IVec3::new(8, 3, 8);
        let mut g = Grid::new(size, size, Vec3::ZERO, 1.0).unwrap();
        let mut sink = PngDirSink::create(tmp.path().join("nested/samples")).unwrap();
        generate_samples(&mut g, &mut StdRng::seed_from_u64(1), &params(2), &mut sink).unwrap();
        assert!(sink.dir().join("sample_0000.png").is_file());
        assert!(sink.dir().join("sample_0001.png").is_file());
    }
}
