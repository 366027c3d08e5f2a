//! Identifier helpers shared by the builder and the renderers.

use std::path::Path;

/// Suffix appended to the schema file stem to name the helper class.
pub const HELPER_SUFFIX: &str = "_HelperClass";

/// Name of the generated load method.
pub const LOAD_METHOD: &str = "LoadXmlFile";

/// Name of the generated save method.
pub const SAVE_METHOD: &str = "SaveXMLFile";

/// Parameter name shared by the load/save methods and the file constructor.
pub const FILE_PATH_PARAM: &str = "FilePath";

/// Returns `true` if `s` is a valid identifier in every supported target.
///
/// The first character must be a letter or `_`, the rest letters, digits or
/// `_`. A lone `_` is rejected because Visual Basic does not accept it.
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if s == "_" {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns `true` if `s` is empty or a dot-separated list of identifiers.
#[must_use]
pub fn is_valid_namespace(s: &str) -> bool {
    s.is_empty() || s.split('.').all(is_valid_identifier)
}

/// Lowercases the first character only.
///
/// `InvoiceData` becomes `invoiceData`; the rest of the string is kept.
#[must_use]
pub fn to_lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces characters that cannot appear in an identifier with `_`.
#[must_use]
pub fn sanitize_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    for (i, c) in s.chars().enumerate() {
        if i == 0 && c.is_numeric() {
            result.push('_');
        }
        if c.is_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    result
}

/// Derives the helper class name from the schema file path.
///
/// `schemas/Invoice.xsd` gives `Invoice_HelperClass`. Returns `None` when the
/// path has no file stem.
#[must_use]
pub fn helper_class_name(input_file: &Path) -> Option<String> {
    let stem = input_file.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}{}", sanitize_identifier(stem), HELPER_SUFFIX))
}

/// Derives the helper file stem from the schema file path.
///
/// Unlike [`helper_class_name`] the stem is kept as written, so
/// `purchase-order.xsd` gives `purchase-order_HelperClass`.
#[must_use]
pub fn helper_file_stem(input_file: &Path) -> Option<String> {
    let stem = input_file.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}{HELPER_SUFFIX}"))
}
