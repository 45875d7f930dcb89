use crate::CodecError;

pub type Rgba = [u8; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Opaque; alpha is always 255.
    Rgb,
    Rgba,
}

/// Row-major pixel buffer. Column index is grid x, row index is grid z.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    format: PixelFormat,
    pixels: Vec<Rgba>,
}

impl Raster {
    pub fn new(width: usize, height: usize, format: PixelFormat, fill: Rgba) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![normalize(format, fill); width * height],
        }
    }

    pub fn from_pixels(
        width: usize,
        height: usize,
        format: PixelFormat,
        pixels: Vec<Rgba>,
    ) -> Result<Self, CodecError> {
        if pixels.len() != width * height {
            return Err(CodecError::MalformedRaster {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let pixels = match format {
            PixelFormat::Rgba => pixels,
            PixelFormat::Rgb => pixels.into_iter().map(|p| normalize(format, p)).collect(),
        };
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the raster.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, rgba: Rgba) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        let idx = y * self.width + x;
        self.pixels[idx] = normalize(self.format, rgba);
    }

    /// Nearest-neighbor resample; each target pixel takes the source pixel
    /// under its center. No blending, so color classes stay crisp.
    pub fn resample_nearest(&self, width: usize, height: usize) -> Result<Raster, CodecError> {
        if self.is_empty() || width == 0 || height == 0 {
            return Err(CodecError::EmptyRaster);
        }
        let mut out = Raster::new(width, height, self.format, [0; 4]);
        for y in 0..height {
            let sy = nearest(y, height, self.height);
            for x in 0..width {
                let sx = nearest(x, width, self.width);
                out.pixels[y * width + x] = self.pixels[sy * self.width + sx];
            }
        }
        Ok(out)
    }

    /// Pad to a square anchored at (0, 0) with `fill`, then resample to `side`.
    pub fn fit_square(&self, side: usize, fill: Rgba) -> Result<Raster, CodecError> {
        if self.is_empty() || side == 0 {
            return Err(CodecError::EmptyRaster);
        }
        let n = self.width.max(self.height);
        let mut padded = Raster::new(n, n, self.format, fill);
        for y in 0..self.height {
            let row = &self.pixels[y * self.width..(y + 1) * self.width];
            padded.pixels[y * n..y * n + self.width].copy_from_slice(row);
        }
        padded.resample_nearest(side, side)
    }

    /// Inverse of [`Raster::fit_square`]: crop the part of a square raster that
    /// covers a `width` x `height` footprint and resample it to that size.
    pub fn unfit_square(&self, width: usize, height: usize) -> Result<Raster, CodecError> {
        if self.is_empty() || width == 0 || height == 0 {
            return Err(CodecError::EmptyRaster);
        }
        let n = width.max(height);
        let cw = covered(self.width, n, width);
        let ch = covered(self.height, n, height);
        let mut crop = Raster::new(cw, ch, self.format, [0; 4]);
        for y in 0..ch {
            crop.pixels[y * cw..(y + 1) * cw]
                .copy_from_slice(&self.pixels[y * self.width..y * self.width + cw]);
        }
        crop.resample_nearest(width, height)
    }
}

#[inline]
fn normalize(format: PixelFormat, mut rgba: Rgba) -> Rgba {
    if format == PixelFormat::Rgb {
        rgba[3] = 255;
    }
    rgba
}

/// Source index under the center of target pixel `dst`.
#[inline]
fn nearest(dst: usize, dst_len: usize, src_len: usize) -> usize {
    (((2 * dst + 1) * src_len) / (2 * dst_len)).min(src_len - 1)
}

/// Number of leading pixels of a `side`-long axis that sample the first
/// `len` cells of an `n`-long padded axis.
fn covered(side: usize, n: usize, len: usize) -> usize {
    (0..side)
        .take_while(|&i| nearest(i, side, n) < len)
        .count()
        .max(1)
}
