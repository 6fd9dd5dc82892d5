use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tga::TgaEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, ImageEncoder, ImageError, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ops::DamageMask;

/// Raster formats the tool can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
    Tga,
    Tiff,
}

impl SaveFormat {
    /// Case-insensitive; accepts both a `--format` value and a file extension.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpeg" | "jpg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "tga" => Some(SaveFormat::Tga),
            "tiff" | "tif" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }
}

/// Error type for loading and saving images
#[derive(Debug, Error)]
pub enum IoError {
    #[error("could not load '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("could not save '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Decode any supported image file to 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, IoError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| IoError::Load {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode a mask image; pixels with non-zero alpha are damaged.
pub fn load_mask(path: &Path) -> Result<DamageMask, IoError> {
    let rgba = load_rgba(path)?;
    Ok(DamageMask::from_alpha(&rgba))
}

/// Encode `image` in `format` and write it to `path`.
pub fn save_image(
    image: &RgbaImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), IoError> {
    encode_and_write(image, path, format, quality).map_err(|source| IoError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn encode_and_write(
    image: &RgbaImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match format {
        SaveFormat::Png => {
            PngEncoder::new(&mut writer).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        SaveFormat::Jpeg => {
            // JPEG has no alpha
            let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
            encoder.encode(
                rgb_image.as_raw(),
                rgb_image.width(),
                rgb_image.height(),
                image::ColorType::Rgb8,
            )?;
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut writer);
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        SaveFormat::Tga => {
            TgaEncoder::new(&mut writer).encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        SaveFormat::Tiff => {
            TiffEncoder::new(&mut writer).encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
    }

    Ok(())
}
