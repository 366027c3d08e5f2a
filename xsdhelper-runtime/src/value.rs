//! Runtime values.

use crate::resources::StreamId;
use std::path::PathBuf;
use xsdhelper_model::{FrameworkType, TypeRef};

/// Element content: either text or child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Scalar text.
    Text(String),
    /// Nested elements, in document order.
    Children(Vec<Element>),
}

/// An XML-serializable object.
///
/// A wrapped-class instance is an element named after the class; its fields
/// are child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name.
    pub name: String,
    /// Element content.
    pub content: Content,
}

impl Element {
    /// Creates an element with text content.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Content::Text(text.into()),
        }
    }

    /// Creates an element with child elements.
    pub fn with_children(name: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            content: Content::Children(children),
        }
    }

    /// Returns the first child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        match &self.content {
            Content::Children(children) => children.iter().find(|c| c.name == name),
            Content::Text(_) => None,
        }
    }
}

/// A value flowing through executed helper code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `null` / `Nothing`.
    Null,
    /// The helper instance itself.
    This,
    /// Boolean produced by a comparison.
    Bool(bool),
    /// String.
    Str(String),
    /// Wrapped-class instance.
    Object(Element),
    /// Open or released file stream.
    Stream(StreamId),
    /// Serializer bound to a root type name.
    Serializer(String),
    /// File information for a path.
    FileInfo(PathBuf),
    /// Type reference.
    Type(TypeRef),
}

impl Value {
    /// Creates a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime type name used in fault messages and overload resolution.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::This => "this".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Str(_) => "string".to_string(),
            Self::Object(element) => element.name.clone(),
            Self::Stream(_) => "Stream".to_string(),
            Self::Serializer(_) => "XmlSerializer".to_string(),
            Self::FileInfo(_) => "FileInfo".to_string(),
            Self::Type(_) => "Type".to_string(),
        }
    }

    /// Reference identity as the target languages see it.
    ///
    /// Strings compare by value; objects have no identity beyond their
    /// contents here, so equal objects are identical.
    #[must_use]
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::This, Self::This) => true,
            (Self::Stream(a), Self::Stream(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }

    /// Returns `true` if the value can be stored in a slot of type `ty`.
    #[must_use]
    pub fn is_assignable_to(&self, ty: &TypeRef) -> bool {
        match (self, ty) {
            (_, TypeRef::Void) => false,
            (Self::Null, _) => true,
            (Self::Str(_), TypeRef::String) => true,
            (Self::Object(element), TypeRef::Named(name)) => &element.name == name,
            (Self::Stream(_), TypeRef::Framework(FrameworkType::Stream)) => true,
            (Self::Serializer(_), TypeRef::Framework(FrameworkType::XmlSerializer)) => true,
            (Self::FileInfo(_), TypeRef::Framework(FrameworkType::FileInfo)) => true,
            _ => false,
        }
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        Self::Object(element)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
