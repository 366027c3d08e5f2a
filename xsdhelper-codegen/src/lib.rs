//! # xsdhelper codegen
//!
//! Helper-class generation for schema-generated data classes.
//!
//! This crate provides:
//! - The class model builder (constructors, forwarding property, load/save)
//! - Documentation comment synthesis
//! - C# and Visual Basic source renderers
//! - Output path derivation and only-if-missing file writing

pub mod builder;
pub mod comments;
pub mod config;
pub mod error;
pub mod output;
pub mod render;

pub use builder::{ClassModelBuilder, IMPORTS};
pub use config::{BuilderConfig, GeneratorConfig, RenderConfig};
pub use error::CodegenError;
pub use output::{WriteOutcome, WritePolicy, helper_file_path, write_helper};
pub use render::{CSharpRenderer, SourceRenderer, VisualBasicRenderer, renderer_for};

use std::path::{Path, PathBuf};
use xsdhelper_model::{TargetLanguage, TopLevelClassDescriptor};

/// Resolves an output-extension hint such as `".vb"` or `"cs"`.
///
/// # Errors
/// Returns `CodegenError::UnsupportedExtension` for an unknown extension.
pub fn language_for_extension(extension: &str) -> Result<TargetLanguage, CodegenError> {
    TargetLanguage::from_extension(extension)
        .ok_or_else(|| CodegenError::unsupported_extension(extension))
}

/// Generates helper-class source for a descriptor.
///
/// # Arguments
/// * `descriptor` - The wrapped class description
/// * `language` - Output language
/// * `config` - Builder and renderer settings
///
/// # Returns
/// Generated source text.
///
/// # Errors
/// Returns `CodegenError::InvalidDescriptor` if the descriptor is invalid.
pub fn generate_helper(
    descriptor: &TopLevelClassDescriptor,
    language: TargetLanguage,
    config: &GeneratorConfig,
) -> Result<String, CodegenError> {
    let model = ClassModelBuilder::new(config.builder.clone()).build(descriptor)?;
    let renderer = renderer_for(language, config.render.clone());
    Ok(renderer.render(&model))
}

/// Generates the helper class and writes it next to the schema file.
///
/// # Returns
/// The output path and what happened to it.
///
/// # Errors
/// Returns `CodegenError` if the descriptor is invalid or the file cannot be
/// written. Nothing is written when the descriptor is invalid.
pub fn generate_helper_file(
    descriptor: &TopLevelClassDescriptor,
    language: TargetLanguage,
    config: &GeneratorConfig,
    policy: WritePolicy,
) -> Result<(PathBuf, WriteOutcome), CodegenError> {
    let text = generate_helper(descriptor, language, config)?;
    let path = helper_file_path(descriptor.input_file(), language)?;
    let outcome = write_helper(&path, &text, policy)?;
    Ok((path, outcome))
}

/// Loads a descriptor document and generates its helper file.
///
/// # Errors
/// Returns `CodegenError` if loading, generation or writing fails.
pub fn generate_from_descriptor_file(
    descriptor_path: &Path,
    language: TargetLanguage,
    config: &GeneratorConfig,
    policy: WritePolicy,
) -> Result<(PathBuf, WriteOutcome), CodegenError> {
    let descriptor = xsdhelper_model::load_descriptor(descriptor_path)?;
    generate_helper_file(&descriptor, language, config, policy)
}
