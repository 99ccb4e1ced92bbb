//! Error types with HTTP status code mapping.

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of form discovery, indexing, and rendering.
///
/// Every variant names the file or form path it concerns; nothing is
/// retried or silently swallowed.
#[derive(Error, Debug)]
pub enum FormError {
    /// A `form-data.json` file without the mandatory top-level `form` key.
    #[error("The JSON should have a 'form' key in {}", .file.display())]
    MissingFormKey { file: PathBuf },

    /// File contents that do not parse as the expected JSON shape.
    #[error("Invalid JSON format: {}", .file.display())]
    InvalidJson {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Backing JSON file missing at read time.
    #[error("JSON file not found: {}", .file.display())]
    FileNotFound { file: PathBuf },

    /// Any other I/O failure while reading a form file.
    #[error("Error processing form data from {}: {source}", .file.display())]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Form path absent from the metadata index.
    #[error("Form metadata not found for path: {0}")]
    MetadataNotFound(String),

    /// Form path indexed but absent from the freshly re-read JSON.
    #[error("Form data not found for path: {0}")]
    FormDataNotFound(String),

    /// Rendering template not registered with the engine.
    #[error("Template {template} not found.")]
    TemplateNotFound { template: String },

    /// Template present but failed to render.
    #[error("Error rendering template {template}: {source}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Template root failed to load into the engine.
    #[error("Error loading templates from {glob}: {source}")]
    TemplateLoad {
        glob: String,
        #[source]
        source: tera::Error,
    },
}

pub type FormResult<T> = Result<T, FormError>;

impl FormError {
    /// Classify a filesystem failure for `file`: a missing file is a 404,
    /// anything else an unexpected read failure.
    pub fn from_io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let file = file.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { file }
        } else {
            Self::Read { file, source }
        }
    }

    /// HTTP status code this error surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFormKey { .. } | Self::InvalidJson { .. } => 400,
            Self::FileNotFound { .. }
            | Self::MetadataNotFound(_)
            | Self::FormDataNotFound(_)
            | Self::TemplateNotFound { .. } => 404,
            Self::Read { .. } | Self::Render { .. } | Self::TemplateLoad { .. } => 500,
        }
    }
}

#[cfg(feature = "http-server")]
mod response {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use super::FormError;

    /// JSON error response body.
    #[derive(Serialize)]
    struct ErrorBody {
        error: String,
        status: u16,
    }

    impl IntoResponse for FormError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = ErrorBody {
                error: self.to_string(),
                status: status.as_u16(),
            };
            (status, axum::Json(body)).into_response()
        }
    }
}
