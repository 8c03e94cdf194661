//! QR image rendering

use image::ImageError;
use mockall::automock;
use qrcode::types::QrError;
use thiserror::Error;

mod png;

pub use png::PngQrRenderer;

/// Errors raised while rendering a QR image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload could not be encoded as a QR symbol.
    #[error("failed to encode qr payload: {0}")]
    Encode(#[from] QrError),

    /// The rendered symbol could not be written as an image.
    #[error("failed to write qr image: {0}")]
    Image(#[from] ImageError),
}

/// Turns a payload string into a scannable image.
#[automock]
pub trait QrRenderer: Send + Sync {
    /// Render `payload` as PNG bytes.
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, RenderError>;
}
