use crate::model;
use eframe::egui;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum DecodeError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has no pixels")]
    Empty,
}

pub(super) fn decode_image(bytes: &[u8]) -> Result<model::ImageSource, DecodeError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    if size[0] == 0 || size[1] == 0 {
        return Err(DecodeError::Empty);
    }
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(model::ImageSource::new(pixels))
}

pub(super) fn load_image(path: &Path) -> Result<model::ImageSource, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode_image(&bytes)
}

pub(super) fn pick_image_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
        .pick_file()
}
