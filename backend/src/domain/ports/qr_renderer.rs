//! Driven port for rendering a QR payload as a PNG image.

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Failures surfaced while encoding a payload into a QR image.
    pub enum QrRenderError {
        /// The payload could not be encoded with the fixed profile.
        Encode { message: String } => "qr encoding failed: {message}",
    }
}

/// Encode an opaque payload into a scannable PNG image.
///
/// Rendering is pure CPU work with no external system behind it, so the
/// production encoder is wired in every configuration; the trait exists to
/// keep the workflow service free of image-library types and to let tests
/// substitute failing or pass-through encoders.
///
/// Implementations must be deterministic for a given payload and encoder
/// configuration.
pub trait QrRenderer: Send + Sync {
    /// Render `payload` as PNG bytes.
    ///
    /// # Errors
    /// Returns [`QrRenderError::Encode`] when the payload cannot be encoded;
    /// the failure is fatal to the registration attempt and is not retried.
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrRenderError>;
}
