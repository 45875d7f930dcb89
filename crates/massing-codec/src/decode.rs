//! Raster to grid: red pixels become flagged structure at a height read from
//! their saturation, pure black pixels optionally become solid columns.

use massing_geom::IVec3;
use massing_grid::{CellState, Grid};

use crate::CodecError;
use crate::color::{grayscale, is_pure_black, is_red_dominant, rgb_to_hsv};
use crate::raster::Raster;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeParams {
    /// Lower bound of the structure as a fraction of the grid height.
    pub bottom_fraction: f32,
    /// Upper bound of the structure as a fraction of the grid height.
    pub top_fraction: f32,
    /// Cells marked downward from each reconstructed height.
    pub thickness: u32,
    /// Red pixels are read only when their luminance is below this.
    pub sensitivity: f32,
    pub include_solid_pixels: bool,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            bottom_fraction: 0.0,
            top_fraction: 1.0,
            thickness: 1,
            sensitivity: 1.0,
            include_solid_pixels: false,
        }
    }
}

impl DecodeParams {
    pub fn validate(&self) -> Result<(), CodecError> {
        let unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !unit(self.bottom_fraction) || !unit(self.top_fraction) {
            return Err(CodecError::InvalidParams("fractions must lie in [0, 1]"));
        }
        if self.bottom_fraction > self.top_fraction {
            return Err(CodecError::InvalidParams(
                "bottom fraction exceeds top fraction",
            ));
        }
        if !unit(self.sensitivity) {
            return Err(CodecError::InvalidParams("sensitivity must lie in [0, 1]"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub structural_columns: usize,
    pub solid_columns: usize,
    pub cells_marked: usize,
}

/// Height index for a structural pixel of the given saturation.
pub fn reconstruct_height(params: &DecodeParams, grid_height: i32, saturation: f32) -> i32 {
    let span = (grid_height - 1) as f32;
    let rise = ((params.top_fraction - params.bottom_fraction) * span * saturation).round_ties_even();
    let base = (params.bottom_fraction * span).round_ties_even();
    rise as i32 + base as i32
}

/// Apply `raster` to the grid. Columns whose pixel carries no signal are left
/// alone, y=0 is never written, and nothing is written if any mark fails.
pub fn decode(
    grid: &mut Grid,
    raster: &Raster,
    params: &DecodeParams,
) -> Result<DecodeReport, CodecError> {
    params.validate()?;
    if raster.is_empty() {
        return Err(CodecError::EmptyRaster);
    }
    let size = grid.active_size();
    let sampled = raster.resample_nearest(size.x as usize, size.z as usize)?;

    let mut report = DecodeReport::default();
    let mut marks: Vec<(IVec3, CellState)> = Vec::new();
    for z in 0..size.z {
        for x in 0..size.x {
            let Some(px) = sampled.get(x as usize, z as usize) else {
                continue;
            };
            if is_red_dominant(px) && grayscale(px) < params.sensitivity {
                let (_, s, _) = rgb_to_hsv(px);
                let y = reconstruct_height(params, size.y, s);
                if y == 0 {
                    continue;
                }
                let top = IVec3::new(x, y, z);
                grid.check_in_range(top)?;
                marks.push((top, CellState::Flagged));
                for i in 1..params.thickness as i32 {
                    let ny = y - i;
                    if ny == 0 {
                        break;
                    }
                    marks.push((top.with_y(ny), CellState::Flagged));
                }
                report.structural_columns += 1;
            } else if params.include_solid_pixels && is_pure_black(px) {
                for y in 1..size.y {
                    marks.push((IVec3::new(x, y, z), CellState::Solid));
                }
                report.solid_columns += 1;
            }
        }
    }

    for (c, state) in &marks {
        grid.set_state(*c, *state)?;
    }
    report.cells_marked = marks.len();
    log::debug!(
        "decoded {}x{} raster: {} structural columns, {} solid columns, {} cells",
        raster.width(),
        raster.height(),
        report.structural_columns,
        report.solid_columns,
        report.cells_marked
    );
    Ok(report)
}
