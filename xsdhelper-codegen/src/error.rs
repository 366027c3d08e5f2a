//! Error types for code generation.

use thiserror::Error;
use xsdhelper_model::{DocumentError, InvalidDescriptorError};

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Descriptor failed validation.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[from] InvalidDescriptorError),

    /// Descriptor document could not be loaded.
    #[error("descriptor document: {0}")]
    Document(#[from] DocumentError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported output extension.
    #[error("unsupported output extension '{extension}'")]
    UnsupportedExtension {
        /// Extension hint.
        extension: String,
    },
}

impl CodegenError {
    /// Creates an unsupported extension error.
    pub fn unsupported_extension(extension: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }
}
