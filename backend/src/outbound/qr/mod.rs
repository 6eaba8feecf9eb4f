//! PNG QR encoder backing the registration workflow's renderer port.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode, Version};

use crate::domain::ports::{QrRenderError, QrRenderer};

/// Renderer producing a monochrome PNG with a fixed encoding profile.
///
/// Version 3 with medium error correction fits a canonical 36-character UUID
/// string with headroom; 10x10-pixel modules keep the image comfortably
/// scannable on commodity phone cameras.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngQrRenderer;

impl PngQrRenderer {
    /// Create a renderer with the fixed encoding profile.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for PngQrRenderer {
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrRenderError> {
        let code = QrCode::with_version(payload.as_bytes(), Version::Normal(3), EcLevel::M)
            .map_err(|err| QrRenderError::encode(err.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(10, 10)
            .build();

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|err| QrRenderError::encode(err.to_string()))?;
        Ok(png.into_inner())
    }
}
