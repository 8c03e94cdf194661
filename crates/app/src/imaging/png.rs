//! PNG QR renderer backed by the `qrcode` and `image` crates.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use super::{QrRenderer, RenderError};

/// Default minimum edge length of rendered images, in pixels.
const DEFAULT_MIN_SIZE: u32 = 512;

/// Renders black-on-white PNG QR codes with medium error correction.
#[derive(Debug, Clone, Copy)]
pub struct PngQrRenderer {
    min_size: u32,
}

impl PngQrRenderer {
    #[must_use]
    pub fn new(min_size: u32) -> Self {
        Self { min_size }
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIZE)
    }
}

impl QrRenderer for PngQrRenderer {
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, RenderError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;

        let symbol = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        let mut png = Vec::new();

        DynamicImage::ImageLuma8(symbol).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(png)
    }
}
