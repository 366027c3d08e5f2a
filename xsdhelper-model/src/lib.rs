//! # xsdhelper model
//!
//! Inputs and intermediate representation for helper-class generation.
//!
//! This crate provides:
//! - The descriptor of the schema-generated class being wrapped
//! - Descriptor validation and descriptor document loading
//! - The language-neutral class AST consumed by renderers
//! - Target language and identifier helpers

pub mod ast;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod language;
pub mod naming;
pub mod validation;

pub use ast::{
    Accessors, BinaryOp, Block, CatchClause, ClassDecl, ClassModel, Constructor, DocComment, Expr,
    FrameworkType, Member, Method, Namespace, Param, Property, Region, Statement, TypeRef,
    Visibility,
};
pub use descriptor::{GeneratedKind, PropertyStorage, TopLevelClassDescriptor};
pub use document::{load_descriptor, parse_descriptor};
pub use error::{DocumentError, InvalidDescriptorError};
pub use language::TargetLanguage;
pub use validation::validate_descriptor;
