//! PNG encoding of rasters. Raster row 0 (z = 0) is the bottom row of the
//! picture.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use massing_codec::{CodecError, PixelFormat, Raster};

use crate::IoError;

fn to_image(raster: &Raster) -> Result<DynamicImage, IoError> {
    if raster.is_empty() {
        return Err(CodecError::EmptyRaster.into());
    }
    let (w, h) = (raster.width(), raster.height());
    let mut bytes = Vec::with_capacity(w * h * 4);
    for row in (0..h).rev() {
        for px in &raster.pixels()[row * w..(row + 1) * w] {
            match raster.format() {
                PixelFormat::Rgb => bytes.extend_from_slice(&px[..3]),
                PixelFormat::Rgba => bytes.extend_from_slice(px),
            }
        }
    }
    let image = match raster.format() {
        PixelFormat::Rgb => RgbImage::from_raw(w as u32, h as u32, bytes).map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba => {
            RgbaImage::from_raw(w as u32, h as u32, bytes).map(DynamicImage::ImageRgba8)
        }
    };
    image.ok_or(IoError::Codec(CodecError::MalformedRaster {
        expected: w * h,
        actual: raster.pixels().len(),
    }))
}

fn from_image(image: DynamicImage) -> Result<Raster, IoError> {
    let format = if image.color().has_alpha() {
        PixelFormat::Rgba
    } else {
        PixelFormat::Rgb
    };
    let rgba = image.to_rgba8();
    let (w, h) = (rgba.width() as usize, rgba.height() as usize);
    let mut pixels = Vec::with_capacity(w * h);
    for row in (0..h as u32).rev() {
        pixels.extend((0..w as u32).map(|x| rgba.get_pixel(x, row).0));
    }
    Ok(Raster::from_pixels(w, h, format, pixels)?)
}

pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, IoError> {
    let mut out = Cursor::new(Vec::new());
    to_image(raster)?.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

pub fn decode_png(bytes: &[u8]) -> Result<Raster, IoError> {
    from_image(image::load_from_memory_with_format(bytes, ImageFormat::Png)?)
}

pub fn load_raster(path: &Path) -> Result<Raster, IoError> {
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let raster = from_image(image)?;
    log::debug!(
        "loaded {}x{} raster from {}",
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(raster)
}

pub fn save_raster(path: &Path, raster: &Raster) -> Result<(), IoError> {
    to_image(raster)?.save_with_format(path, ImageFormat::Png)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use massing_codec::color::{BLACK, CLEAR_WHITE, RED};

    #[test]
    fn png_bytes_round_trip_both_formats() {
        for format in [PixelFormat::Rgb, PixelFormat::Rgba] {
            let mut r = Raster::new(3, 2, format, CLEAR_WHITE);
            r.put(0, 0, RED);
            r.put(2, 1, BLACK);
            let back = decode_png(&encode_png(&r).unwrap()).unwrap();
            assert_eq!(back, r);
        }
    }

    #[test]
    fn first_row_is_stored_at_the_bottom() {
        let mut r = Raster::new(1, 2, PixelFormat::Rgb, BLACK);
        r.put(0, 0, RED);
        let bytes = encode_png(&r).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 1).0, RED);
        assert_eq!(img.get_pixel(0, 0).0, BLACK);
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(decode_png(b"not a png"), Err(IoError::Image(_))));
    }

    #[test]
    fn saves_and_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.png");
        let r = Raster::new(4, 4, PixelFormat::Rgb, RED);
        save_raster(&path, &r).unwrap();
        assert_eq!(load_raster(&path).unwrap(), r);
    }
}
