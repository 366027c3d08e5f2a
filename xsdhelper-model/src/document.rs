//! Descriptor documents.
//!
//! The schema-parsing step hands descriptors over as a small XML document:
//!
//! ```xml
//! <helperClass namespace="Billing" className="Invoice"
//!              propertyName="InvoiceData" backingField="invoiceDataField"
//!              inputFile="schemas/Invoice.xsd" kind="class"/>
//! ```

use crate::descriptor::{GeneratedKind, PropertyStorage, TopLevelClassDescriptor};
use crate::error::DocumentError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DescriptorDocument {
    #[serde(rename = "@namespace", default)]
    namespace: String,
    #[serde(rename = "@className", default)]
    class_name: String,
    #[serde(rename = "@propertyName", default)]
    property_name: String,
    #[serde(rename = "@backingField", default)]
    backing_field: Option<String>,
    #[serde(rename = "@inputFile", default)]
    input_file: String,
    #[serde(rename = "@kind", default)]
    kind: Option<String>,
}

impl DescriptorDocument {
    fn into_descriptor(self) -> Result<TopLevelClassDescriptor, DocumentError> {
        let kind = match self.kind.as_deref() {
            None | Some("class") => GeneratedKind::Class,
            Some("dataset") => GeneratedKind::DataSet,
            Some(other) => {
                return Err(DocumentError::UnknownKind {
                    value: other.to_string(),
                });
            }
        };
        let storage = match self.backing_field {
            Some(field) => PropertyStorage::BackingField(field),
            None => PropertyStorage::Auto,
        };

        Ok(
            TopLevelClassDescriptor::new(self.class_name, self.property_name, self.input_file)
                .with_namespace(self.namespace)
                .with_storage(storage)
                .with_kind(kind),
        )
    }
}

/// Parses and validates a descriptor document.
///
/// # Errors
/// Returns `DocumentError` if the XML is malformed, `kind` is unknown, or the
/// resulting descriptor fails validation.
pub fn parse_descriptor(xml: &str) -> Result<TopLevelClassDescriptor, DocumentError> {
    let document: DescriptorDocument = quick_xml::de::from_str(xml)?;
    let descriptor = document.into_descriptor()?;
    descriptor.validate()?;
    Ok(descriptor)
}

/// Reads and parses a descriptor document from disk.
///
/// # Errors
/// Returns `DocumentError` if reading, parsing or validation fails.
pub fn load_descriptor(path: &Path) -> Result<TopLevelClassDescriptor, DocumentError> {
    let xml = std::fs::read_to_string(path)?;
    parse_descriptor(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidDescriptorError;
    use std::io::Write;

    const INVOICE: &str = r#"<helperClass namespace="Billing" className="Invoice"
        propertyName="InvoiceData" backingField="invoiceDataField"
        inputFile="schemas/Invoice.xsd" kind="class"/>"#;

    #[test]
    fn test_parse_full_document() {
        let d = parse_descriptor(INVOICE).expect("Failed to parse descriptor");
        assert_eq!(d.namespace, "Billing");
        assert_eq!(d.class_name, "Invoice");
        assert_eq!(d.helper_property_name, "InvoiceData");
        assert_eq!(
            d.property_storage,
            PropertyStorage::BackingField("invoiceDataField".into())
        );
        assert_eq!(d.input_file, Path::new("schemas/Invoice.xsd"));
        assert_eq!(d.kind, GeneratedKind::Class);
    }

    #[test]
    fn test_parse_minimal_document() {
        let d = parse_descriptor(
            r#"<helperClass className="Order" propertyName="OrderData" inputFile="Order.xsd"/>"#,
        )
        .expect("Failed to parse descriptor");
        assert!(d.namespace.is_empty());
        assert_eq!(d.property_storage, PropertyStorage::Auto);
    }

    #[test]
    fn test_parse_dataset_kind() {
        let d = parse_descriptor(
            r#"<helperClass className="Orders" propertyName="OrderSet" inputFile="Orders.xsd" kind="dataset"/>"#,
        )
        .expect("Failed to parse descriptor");
        assert_eq!(d.kind, GeneratedKind::DataSet);
    }

    #[test]
    fn test_unknown_kind_fails() {
        let err = parse_descriptor(
            r#"<helperClass className="A" propertyName="B" inputFile="A.xsd" kind="table"/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::UnknownKind { .. }));
    }

    #[test]
    fn test_missing_property_fails_validation() {
        let err =
            parse_descriptor(r#"<helperClass className="Invoice" inputFile="Invoice.xsd"/>"#)
                .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Invalid(InvalidDescriptorError::MissingField {
                field: "helper_property_name"
            })
        ));
    }

    #[test]
    fn test_load_descriptor_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(INVOICE.as_bytes()).unwrap();
        let d = load_descriptor(file.path()).expect("Failed to load descriptor");
        assert_eq!(d.class_name, "Invoice");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_descriptor(Path::new("/nonexistent/descriptor.xml")).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
