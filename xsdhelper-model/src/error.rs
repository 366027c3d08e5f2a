//! Error types for descriptor validation and loading.

use thiserror::Error;

/// Error raised when a class descriptor cannot drive generation.
///
/// Detected before any AST construction; a run that hits one of these
/// writes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDescriptorError {
    /// A required field is empty.
    #[error("descriptor field '{field}' is empty")]
    MissingField {
        /// Field name.
        field: &'static str,
    },

    /// A field is not a valid identifier.
    #[error("descriptor field '{field}' has invalid identifier '{value}'")]
    InvalidIdentifier {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },

    /// The input file path has no usable file name.
    #[error("input file '{path}' has no file stem")]
    InvalidInputFile {
        /// Offending path.
        path: String,
    },

    /// A name would shadow a framework type used by the generated members.
    #[error("descriptor field '{field}' value '{value}' shadows framework type '{framework}'")]
    ShadowsFrameworkType {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Shadowed framework type.
        framework: &'static str,
    },

    /// The forwarding property would clash with another generated member.
    #[error("property name '{name}' clashes with generated member '{member}'")]
    MemberClash {
        /// Property name.
        name: String,
        /// Clashing member name.
        member: String,
    },
}

impl InvalidDescriptorError {
    /// Creates a missing field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            field,
            value: value.into(),
        }
    }

    /// Creates a member clash error.
    pub fn clash(name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MemberClash {
            name: name.into(),
            member: member.into(),
        }
    }
}

/// Error type for loading descriptor documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// XML deserialization error.
    #[error("descriptor document error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Unknown `kind` attribute value.
    #[error("unknown generated kind '{value}'")]
    UnknownKind {
        /// Invalid value.
        value: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Loaded descriptor failed validation.
    #[error(transparent)]
    Invalid(#[from] InvalidDescriptorError),
}
