//! Faults raised by executed helper code.

use std::io;
use thiserror::Error;

/// Fault raised while executing a helper member.
///
/// Generated code never translates a fault: what a framework call raises is
/// what the caller of `LoadXmlFile`/`SaveXMLFile` receives.
#[derive(Debug, Error)]
pub enum Fault {
    /// File system failure, kept as raised.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed XML that does not describe the expected object.
    #[error("invalid document: {message}")]
    InvalidDocument {
        /// Error message.
        message: String,
    },

    /// A cast to an incompatible type.
    #[error("cannot cast {found} to {expected}")]
    InvalidCast {
        /// Target type.
        expected: String,
        /// Runtime type of the value.
        found: String,
    },

    /// Member access on a null value.
    #[error("null reference accessing '{member}'")]
    NullReference {
        /// Accessed member.
        member: String,
    },

    /// Unknown variable, property or method.
    #[error("missing member '{name}'")]
    MissingMember {
        /// Member name.
        name: String,
    },

    /// No single constructor accepts the given arguments.
    #[error("no matching constructor for ({signature})")]
    NoMatchingConstructor {
        /// Argument kinds, comma separated.
        signature: String,
    },

    /// Construct the interpreter cannot execute.
    #[error("unsupported: {what}")]
    Unsupported {
        /// Description.
        what: String,
    },
}

impl Fault {
    /// Creates an invalid document fault.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Creates a missing member fault.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingMember { name: name.into() }
    }

    /// Creates a null reference fault.
    pub fn null_reference(member: impl Into<String>) -> Self {
        Self::NullReference {
            member: member.into(),
        }
    }

    /// Creates an unsupported construct fault.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }

    /// Returns the I/O error kind for [`Fault::Io`].
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Exception type name this fault surfaces as in generated code.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Io(err) if err.kind() == io::ErrorKind::NotFound => "FileNotFoundException",
            Self::Io(_) => "IOException",
            Self::Xml(_) | Self::InvalidDocument { .. } => "InvalidOperationException",
            Self::InvalidCast { .. } => "InvalidCastException",
            Self::NullReference { .. } => "NullReferenceException",
            Self::MissingMember { .. } => "MissingMemberException",
            Self::NoMatchingConstructor { .. } => "MissingMethodException",
            Self::Unsupported { .. } => "NotSupportedException",
        }
    }

    /// Returns `true` if a `catch` clause for `exception` handles this fault.
    ///
    /// `Exception` handles everything and `IOException` also handles
    /// file-not-found.
    #[must_use]
    pub fn is_caught_by(&self, exception: &str) -> bool {
        match exception {
            "Exception" => true,
            "IOException" => matches!(self, Self::Io(_)),
            other => self.type_name() == other,
        }
    }
}
