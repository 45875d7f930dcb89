use massing_geom::IVec3;
use massing_grid::Grid;

use crate::CodecError;
use crate::color::state_color;
use crate::raster::{PixelFormat, Raster};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Horizontal layer to sample.
    pub layer: i32,
    pub format: PixelFormat,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            layer: 0,
            format: PixelFormat::Rgb,
        }
    }
}

/// Render one horizontal layer as an `active.x` by `active.z` raster.
pub fn encode(grid: &Grid, opts: &EncodeOptions) -> Result<Raster, CodecError> {
    let size = grid.active_size();
    grid.check_active(IVec3::new(0, opts.layer, 0))?;
    let (w, h) = (size.x as usize, size.z as usize);
    let mut image = Raster::new(w, h, opts.format, [0; 4]);
    for z in 0..size.z {
        for x in 0..size.x {
            let state = grid.state_at(IVec3::new(x, opts.layer, z))?;
            image.put(x as usize, z as usize, state_color(state, opts.format));
        }
    }
    Ok(image)
}
