use super::model::LogoImage;
use image::RgbaImage;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where the report logo comes from. Caller-supplied bytes win over the
/// default file; a logo that cannot be read or decoded is left out.
#[derive(Debug, Clone, Default)]
pub struct LogoSource {
    pub supplied: Option<Vec<u8>>,
    pub default_path: Option<PathBuf>,
}

impl LogoSource {
    pub fn supplied(bytes: Vec<u8>) -> Self {
        Self {
            supplied: Some(bytes),
            default_path: None,
        }
    }

    pub fn default_path(path: impl Into<PathBuf>) -> Self {
        Self {
            supplied: None,
            default_path: Some(path.into()),
        }
    }

    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    pub fn resolve(&self) -> Option<LogoImage> {
        if let Some(bytes) = &self.supplied {
            return decode_logo(bytes)
                .map_err(|error| warn!(%error, "supplied logo could not be decoded; omitting it"))
                .ok();
        }

        let path = self.default_path.as_ref()?;
        if !path.is_file() {
            debug!(path = %path.display(), "no default logo present");
            return None;
        }
        match std::fs::read(path) {
            Ok(bytes) => decode_logo(&bytes)
                .map_err(|error| {
                    warn!(path = %path.display(), %error, "default logo could not be decoded; omitting it")
                })
                .ok(),
            Err(error) => {
                warn!(path = %path.display(), %error, "default logo could not be read; omitting it");
                None
            }
        }
    }
}

/// Decodes PNG or JPEG bytes and flattens any transparency onto white.
pub fn decode_logo(bytes: &[u8]) -> Result<LogoImage, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(flatten_on_white(&decoded.to_rgba8()))
}

fn flatten_on_white(image: &RgbaImage) -> LogoImage {
    let (width_px, height_px) = image.dimensions();
    let mut rgb = Vec::with_capacity(width_px as usize * height_px as usize * 3);
    for pixel in image.pixels() {
        let [red, green, blue, alpha] = pixel.0;
        let alpha = u32::from(alpha);
        for channel in [red, green, blue] {
            let blended = (u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    LogoImage {
        width_px,
        height_px,
        rgb,
    }
}
