//! Command implementations.

use crate::cli::GenerateArgs;
use anyhow::{Context, Result};
use std::path::Path;
use xsdhelper::codegen::language_for_extension;
use xsdhelper::prelude::*;

impl GenerateArgs {
    /// Builds the descriptor from the document or the individual flags.
    pub fn descriptor(&self) -> Result<TopLevelClassDescriptor> {
        if let Some(path) = &self.descriptor {
            return load_descriptor(path)
                .with_context(|| format!("failed to load descriptor {}", path.display()));
        }

        let (Some(input), Some(class), Some(property)) = (&self.input, &self.class, &self.property)
        else {
            anyhow::bail!("--input, --class and --property are required without --descriptor");
        };

        let mut descriptor = TopLevelClassDescriptor::new(class, property, input);
        if let Some(namespace) = &self.namespace {
            descriptor = descriptor.with_namespace(namespace);
        }
        if let Some(field) = &self.backing_field {
            descriptor = descriptor.with_storage(PropertyStorage::BackingField(field.clone()));
        }
        if self.dataset {
            descriptor = descriptor.with_kind(GeneratedKind::DataSet);
        }
        Ok(descriptor)
    }

    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            builder: BuilderConfig::default(),
            render: RenderConfig::default().regions(!self.no_regions),
        }
    }

    fn policy(&self) -> WritePolicy {
        if self.force {
            WritePolicy::Overwrite
        } else {
            WritePolicy::IfMissing
        }
    }
}

/// Generates a helper class and either prints or writes it.
///
/// # Returns
/// The line reported to the user.
pub fn generate(args: &GenerateArgs) -> Result<String> {
    let language = language_for_extension(&args.language)?;
    let descriptor = args.descriptor()?;
    let config = args.config();
    tracing::debug!(class = %descriptor.class_name, %language, "generating helper");

    if args.stdout {
        return generate_helper(&descriptor, language, &config)
            .with_context(|| format!("failed to generate helper for {}", descriptor.class_name));
    }

    let (path, outcome) = generate_helper_file(&descriptor, language, &config, args.policy())
        .with_context(|| format!("failed to generate helper for {}", descriptor.class_name))?;
    Ok(match outcome {
        WriteOutcome::Created => format!("created {}", path.display()),
        WriteOutcome::Overwritten => format!("overwrote {}", path.display()),
        WriteOutcome::Skipped => format!("kept existing {}", path.display()),
    })
}

/// Derives the helper file path for a schema file.
pub fn path(input: &Path, language: &str) -> Result<String> {
    let language = language_for_extension(language)?;
    let path = helper_file_path(input, language)
        .with_context(|| format!("cannot derive helper path from {}", input.display()))?;
    Ok(path.display().to_string())
}
