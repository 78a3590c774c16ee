use egui::ColorImage;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions offered by the open dialog.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to determine format for {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("{0} has no pixels")]
    Empty(PathBuf),
}

/// Pixels of the image being tagged. Animated formats contribute their first
/// frame only.
pub struct LoadedImage {
    pub image: ColorImage,
    pub size: egui::Vec2,
}

impl LoadedImage {
    fn from_color_image(image: ColorImage) -> Self {
        let [w, h] = image.size;
        Self {
            image,
            size: egui::vec2(w as f32, h as f32),
        }
    }
}

pub fn load_image(path: &Path) -> Result<LoadedImage, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes, path)
}

pub fn decode_image(bytes: &[u8], path: &Path) -> Result<LoadedImage, LoadError> {
    let format = image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map_err(|source| LoadError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    let image = image::load_from_memory_with_format(bytes, format)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    Ok(LoadedImage::from_color_image(color_image_from_dynamic(image)))
}

fn color_image_from_dynamic(image: DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw())
}
