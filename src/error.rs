//! # Error Types
//!
//! This module defines the error type used throughout the dotqr library.

use thiserror::Error;

/// Main error type for dotqr operations
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Content was empty or whitespace-only
    #[error("Please enter content to generate QR code")]
    EmptyContent,

    /// The encoder could not represent the content (e.g. capacity exceeded)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The encoder's raster output could not be read back as pixels
    #[error("Render decode error: {0}")]
    RenderDecode(String),

    /// Export requested without a valid source
    #[error("{0}")]
    ExportPrecondition(String),

    /// Style id not present in the registry
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Malformed `#rrggbb` color string
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Invalid render config or preset file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Message shown inline to the user.
    ///
    /// Encoder and decode failures collapse into one generic message; the
    /// detailed `Display` form is meant for logs.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::EmptyContent => self.to_string(),
            GenerationError::Encoding(_) | GenerationError::RenderDecode(_) => {
                "Failed to generate QR code".to_string()
            }
            GenerationError::ExportPrecondition(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Export attempted before any styled image exists.
    pub(crate) fn nothing_to_export() -> Self {
        GenerationError::ExportPrecondition("No QR code to export".to_string())
    }

    /// SVG export attempted with blank content.
    pub(crate) fn empty_export() -> Self {
        GenerationError::ExportPrecondition("Please enter content to export".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GenerationError::EmptyContent.user_message(),
            "Please enter content to generate QR code"
        );
        assert_eq!(
            GenerationError::Encoding("data too long".into()).user_message(),
            "Failed to generate QR code"
        );
        assert_eq!(
            GenerationError::RenderDecode("bad png".into()).user_message(),
            "Failed to generate QR code"
        );
        assert_eq!(
            GenerationError::nothing_to_export().user_message(),
            "No QR code to export"
        );
        assert_eq!(
            GenerationError::empty_export().user_message(),
            "Please enter content to export"
        );
    }

    #[test]
    fn test_display_keeps_detail() {
        let err = GenerationError::UnknownStyle("neon".into());
        assert_eq!(err.to_string(), "Unknown style: neon");
    }
}
