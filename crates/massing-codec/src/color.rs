//! Fixed color table and the color-space helpers used by decoding.

use massing_grid::CellState;

use crate::raster::{PixelFormat, Rgba};

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const YELLOW: Rgba = [255, 235, 4, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const CLEAR_WHITE: Rgba = [255, 255, 255, 0];

pub fn state_color(state: CellState, format: PixelFormat) -> Rgba {
    match state {
        CellState::Solid => BLACK,
        CellState::Flagged => RED,
        CellState::Highlighted => YELLOW,
        CellState::Ground | CellState::Empty | CellState::Unallocated => match format {
            PixelFormat::Rgb => WHITE,
            PixelFormat::Rgba => CLEAR_WHITE,
        },
    }
}

#[inline]
fn unit(px: Rgba) -> (f32, f32, f32) {
    (
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
    )
}

/// Luminance in [0, 1].
#[inline]
pub fn grayscale(px: Rgba) -> f32 {
    let (r, g, b) = unit(px);
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Hue, saturation, value, each in [0, 1].
pub fn rgb_to_hsv(px: Rgba) -> (f32, f32, f32) {
    let (r, g, b) = unit(px);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    (h, s, max)
}

/// Red channel strictly above green and blue.
#[inline]
pub fn is_red_dominant(px: Rgba) -> bool {
    px[0] > px[1] && px[0] > px[2]
}

/// Opaque black only; a transparent black pixel is background.
#[inline]
pub fn is_pure_black(px: Rgba) -> bool {
    px == BLACK
}
