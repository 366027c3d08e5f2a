//! # xsdhelper
//!
//! Helper-class generator for classes produced from XML Schema files.
//!
//! For a schema-generated class such as `Invoice`, xsdhelper writes a
//! companion `Invoice_HelperClass` that wraps an instance and loads or saves
//! it as an XML file. The companion is written once, next to the schema, and
//! left alone afterwards so it can be edited by hand.
//!
//! ## Quick Start
//!
//! ```ignore
//! use xsdhelper::prelude::*;
//!
//! let descriptor = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "schemas/Invoice.xsd")
//!     .with_namespace("Billing");
//! let (path, outcome) = generate_helper_file(
//!     &descriptor,
//!     TargetLanguage::CSharp,
//!     &GeneratorConfig::default(),
//!     WritePolicy::IfMissing,
//! )?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Descriptor, validation and the class AST
//! - [`codegen`] - AST builder, renderers and output writing
//! - [`runtime`] - Interpreter that executes generated members

pub mod prelude;

/// Descriptor, validation and the language-neutral class AST.
pub mod model {
    pub use xsdhelper_model::*;
}

/// Class model building, rendering and output.
pub mod codegen {
    pub use xsdhelper_codegen::*;
}

/// Execution of generated members against real files.
pub mod runtime {
    pub use xsdhelper_runtime::*;
}
