//! Output path derivation and file writing.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};
use xsdhelper_model::naming::helper_file_stem;
use xsdhelper_model::{InvalidDescriptorError, TargetLanguage};

/// What to do when the helper file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Leave an existing file untouched.
    #[default]
    IfMissing,
    /// Replace an existing file.
    Overwrite,
}

/// Result of a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was created.
    Created,
    /// An existing file was replaced.
    Overwritten,
    /// The file existed and was left untouched.
    Skipped,
}

/// Derives the helper file path for a schema file.
///
/// `dir/Invoice.xsd` with C# gives `dir/Invoice_HelperClass.cs`. The schema
/// stem is kept verbatim; only the class name inside the file is sanitized.
///
/// # Errors
/// Returns `InvalidDescriptorError::InvalidInputFile` if the path has no
/// file stem.
pub fn helper_file_path(
    input_file: &Path,
    language: TargetLanguage,
) -> Result<PathBuf, InvalidDescriptorError> {
    let stem = helper_file_stem(input_file).ok_or_else(|| {
        InvalidDescriptorError::InvalidInputFile {
            path: input_file.display().to_string(),
        }
    })?;
    let file_name = format!("{stem}{}", language.extension());
    Ok(input_file.with_file_name(file_name))
}

/// Writes `text` to `path` according to `policy`.
///
/// Parent directories are created as needed.
///
/// # Errors
/// Returns `CodegenError::Io` if the directory or file cannot be written.
pub fn write_helper(
    path: &Path,
    text: &str,
    policy: WritePolicy,
) -> Result<WriteOutcome, CodegenError> {
    let exists = path.exists();
    if exists && policy == WritePolicy::IfMissing {
        tracing::info!(path = %path.display(), "helper file exists, skipping");
        return Ok(WriteOutcome::Skipped);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;

    let outcome = if exists {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };
    tracing::info!(path = %path.display(), ?outcome, "helper file written");
    Ok(outcome)
}
