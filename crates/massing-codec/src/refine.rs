//! Round trip through an external image-translation model.

use massing_grid::{CellState, Grid};

use crate::CodecError;
use crate::color::WHITE;
use crate::decode::{DecodeParams, DecodeReport, decode};
use crate::encode::{EncodeOptions, encode};
use crate::raster::Raster;

/// Edge length of the square images the translation model consumes and emits.
pub const TRANSLATOR_SIDE: usize = 256;

pub type TranslateError = Box<dyn std::error::Error + Send + Sync>;

/// Synchronous image-to-image model. The grid must not change while a call
/// is outstanding.
pub trait ImageTranslator {
    fn translate(&mut self, input: &Raster) -> Result<Raster, TranslateError>;
}

impl<F> ImageTranslator for F
where
    F: FnMut(&Raster) -> Result<Raster, TranslateError>,
{
    fn translate(&mut self, input: &Raster) -> Result<Raster, TranslateError> {
        self(input)
    }
}

/// Encode the ground layer and fit it to the model's input size.
pub fn translator_input(grid: &Grid) -> Result<Raster, CodecError> {
    encode(grid, &EncodeOptions::default())?.fit_square(TRANSLATOR_SIDE, WHITE)
}

/// Map a model output back onto the grid footprint.
pub fn translator_output(grid: &Grid, output: &Raster) -> Result<Raster, CodecError> {
    let actual = (output.width(), output.height());
    if actual != (TRANSLATOR_SIDE, TRANSLATOR_SIDE) {
        return Err(CodecError::UnexpectedSize {
            expected: (TRANSLATOR_SIDE, TRANSLATOR_SIDE),
            actual,
        });
    }
    let size = grid.active_size();
    output.unfit_square(size.x as usize, size.z as usize)
}

/// Strip earlier model flags, ask the model for a refinement of the current
/// footprint, and decode its answer into the grid.
pub fn refine<T: ImageTranslator + ?Sized>(
    grid: &mut Grid,
    translator: &mut T,
    params: &DecodeParams,
) -> Result<DecodeReport, CodecError> {
    params.validate()?;
    let cleared = grid.clear_state(CellState::Flagged);
    let input = translator_input(grid)?;
    let output = translator
        .translate(&input)
        .map_err(CodecError::Translate)?;
    let footprint = translator_output(grid, &output)?;
    let report = decode(grid, &footprint, params)?;
    log::info!(
        "refined grid: {} stale flags cleared, {} structural columns proposed",
        cleared,
        report.structural_columns
    );
    Ok(report)
}
