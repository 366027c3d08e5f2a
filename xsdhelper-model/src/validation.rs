//! Descriptor validation.
//!
//! Every check here runs before the builder touches the AST, so a failed
//! validation never leaves a partial model or file behind.

use crate::ast::FrameworkType;
use crate::descriptor::{PropertyStorage, TopLevelClassDescriptor};
use crate::error::InvalidDescriptorError;
use crate::naming::{LOAD_METHOD, SAVE_METHOD, is_valid_identifier, is_valid_namespace};

/// Validates a descriptor for generation.
///
/// # Arguments
/// * `descriptor` - The descriptor to validate
///
/// # Returns
/// Ok(()) if valid, or the first problem found.
///
/// # Errors
/// Returns `InvalidDescriptorError` if a field is empty, is not an
/// identifier, or would produce clashing member names.
pub fn validate_descriptor(
    descriptor: &TopLevelClassDescriptor,
) -> Result<(), InvalidDescriptorError> {
    validate_identifier("class_name", &descriptor.class_name)?;
    validate_identifier("helper_property_name", &descriptor.helper_property_name)?;
    validate_not_framework("class_name", &descriptor.class_name)?;
    validate_not_framework("helper_property_name", &descriptor.helper_property_name)?;

    if !is_valid_namespace(&descriptor.namespace) {
        return Err(InvalidDescriptorError::invalid_identifier(
            "namespace",
            descriptor.namespace.clone(),
        ));
    }

    if let PropertyStorage::BackingField(field) = &descriptor.property_storage {
        validate_identifier("backing_field", field)?;
        if field.eq_ignore_ascii_case(&descriptor.helper_property_name) {
            return Err(InvalidDescriptorError::clash(
                descriptor.helper_property_name.clone(),
                field.clone(),
            ));
        }
    }

    let helper_class = descriptor.helper_class_name()?;
    validate_member_names(&descriptor.helper_property_name, &helper_class)?;

    Ok(())
}

/// Validates a single identifier field.
fn validate_identifier(field: &'static str, value: &str) -> Result<(), InvalidDescriptorError> {
    if value.is_empty() {
        return Err(InvalidDescriptorError::missing(field));
    }
    if !is_valid_identifier(value) {
        return Err(InvalidDescriptorError::invalid_identifier(field, value));
    }
    Ok(())
}

/// Rejects a name that would hide a framework type inside the helper class.
///
/// `File.OpenRead` or `typeof(Stream)` would otherwise bind to the wrapped
/// class or the forwarding property.
fn validate_not_framework(field: &'static str, value: &str) -> Result<(), InvalidDescriptorError> {
    match FrameworkType::ALL
        .iter()
        .find(|ty| ty.name().eq_ignore_ascii_case(value))
    {
        Some(ty) => Err(InvalidDescriptorError::ShadowsFrameworkType {
            field,
            value: value.to_string(),
            framework: ty.name(),
        }),
        None => Ok(()),
    }
}

/// Rejects a property name that collides with another member of the helper.
///
/// Comparison ignores case because Visual Basic identifiers are
/// case-insensitive.
fn validate_member_names(
    property: &str,
    helper_class: &str,
) -> Result<(), InvalidDescriptorError> {
    for member in [helper_class, LOAD_METHOD, SAVE_METHOD] {
        if property.eq_ignore_ascii_case(member) {
            return Err(InvalidDescriptorError::clash(property, member));
        }
    }
    Ok(())
}
