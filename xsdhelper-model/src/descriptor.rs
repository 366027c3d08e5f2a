//! Description of the schema-generated class a helper wraps.

use crate::error::InvalidDescriptorError;
use crate::naming;
use crate::validation::validate_descriptor;
use std::path::{Path, PathBuf};

/// How the forwarding property stores the wrapped instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PropertyStorage {
    /// Auto-implemented property.
    #[default]
    Auto,
    /// Property backed by a named field declared in the generated class.
    BackingField(String),
}

/// What the schema-to-code step produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratedKind {
    /// Plain data classes.
    #[default]
    Class,
    /// A typed dataset.
    DataSet,
}

impl GeneratedKind {
    /// Lowercase name used in comments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::DataSet => "dataset",
        }
    }
}

/// Immutable description of the wrapped top-level class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopLevelClassDescriptor {
    /// Namespace of the wrapped class; empty for the global namespace.
    pub namespace: String,
    /// Wrapped class name.
    pub class_name: String,
    /// Name of the forwarding property on the helper class.
    pub helper_property_name: String,
    /// Storage behind the forwarding property.
    pub property_storage: PropertyStorage,
    /// Originating schema file.
    pub input_file: PathBuf,
    /// Class or dataset.
    pub kind: GeneratedKind,
}

impl TopLevelClassDescriptor {
    /// Creates a descriptor in the global namespace with an auto property.
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        helper_property_name: impl Into<String>,
        input_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            namespace: String::new(),
            class_name: class_name.into(),
            helper_property_name: helper_property_name.into(),
            property_storage: PropertyStorage::Auto,
            input_file: input_file.into(),
            kind: GeneratedKind::Class,
        }
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the property storage.
    #[must_use]
    pub fn with_storage(mut self, storage: PropertyStorage) -> Self {
        self.property_storage = storage;
        self
    }

    /// Sets the generated kind.
    #[must_use]
    pub fn with_kind(mut self, kind: GeneratedKind) -> Self {
        self.kind = kind;
        self
    }

    /// Checks every invariant the builder relies on.
    ///
    /// # Errors
    /// Returns `InvalidDescriptorError` naming the first offending field.
    pub fn validate(&self) -> Result<(), InvalidDescriptorError> {
        validate_descriptor(self)
    }

    /// Name of the helper class, derived from the input file stem.
    ///
    /// # Errors
    /// Returns `InvalidDescriptorError::InvalidInputFile` if the path has no
    /// file stem.
    pub fn helper_class_name(&self) -> Result<String, InvalidDescriptorError> {
        naming::helper_class_name(&self.input_file).ok_or_else(|| {
            InvalidDescriptorError::InvalidInputFile {
                path: self.input_file.display().to_string(),
            }
        })
    }

    /// File name of the input schema, as shown in comments.
    #[must_use]
    pub fn input_file_name(&self) -> String {
        self.input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Parameter name of the wrap-existing-instance constructor.
    #[must_use]
    pub fn instance_parameter_name(&self) -> String {
        naming::to_lower_first(&self.helper_property_name)
    }

    /// Path of the schema file.
    #[must_use]
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> TopLevelClassDescriptor {
        TopLevelClassDescriptor::new("Invoice", "InvoiceData", "schemas/Invoice.xsd")
    }

    #[test]
    fn test_new_defaults() {
        let d = invoice();
        assert!(d.namespace.is_empty());
        assert_eq!(d.property_storage, PropertyStorage::Auto);
        assert_eq!(d.kind, GeneratedKind::Class);
    }

    #[test]
    fn test_builder_setters() {
        let d = invoice()
            .with_namespace("Billing")
            .with_storage(PropertyStorage::BackingField("invoiceDataField".into()))
            .with_kind(GeneratedKind::DataSet);
        assert_eq!(d.namespace, "Billing");
        assert_eq!(d.kind.as_str(), "dataset");
        assert!(matches!(d.property_storage, PropertyStorage::BackingField(_)));
    }

    #[test]
    fn test_derived_names() {
        let d = invoice();
        assert_eq!(d.helper_class_name().unwrap(), "Invoice_HelperClass");
        assert_eq!(d.input_file_name(), "Invoice.xsd");
        assert_eq!(d.instance_parameter_name(), "invoiceData");
    }

    #[test]
    fn test_helper_class_name_without_stem() {
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "");
        assert!(matches!(
            d.helper_class_name(),
            Err(InvalidDescriptorError::InvalidInputFile { .. })
        ));
    }
}
