//! Error types returned by the SVG renderer.

/// Everything that can go wrong while turning a module matrix into a document.
///
/// Errors are raised before any markup is assembled, so a failed call never
/// yields a partial document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType { media_type: String },
}

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }
}
