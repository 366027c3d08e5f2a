//! Prelude module for convenient imports.
//!
//! ```ignore
//! use xsdhelper::prelude::*;
//! ```

// Model types
pub use xsdhelper_model::{
    ClassModel, GeneratedKind, InvalidDescriptorError, PropertyStorage, TargetLanguage,
    TopLevelClassDescriptor, load_descriptor, parse_descriptor,
};

// Generation
pub use xsdhelper_codegen::{
    BuilderConfig, ClassModelBuilder, CodegenError, GeneratorConfig, RenderConfig,
    SourceRenderer, WriteOutcome, WritePolicy, generate_helper, generate_helper_file,
    helper_file_path, renderer_for,
};

// Runtime
pub use xsdhelper_runtime::{Element, Fault, HelperObject, Interpreter, ResourceLedger, Value};
