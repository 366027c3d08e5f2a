//! # xsdhelper runtime
//!
//! In-process execution of generated helper classes.
//!
//! This crate provides:
//! - An interpreter for the class AST's constructors, properties and methods
//! - A file stream table with a release ledger and event trace
//! - The XML serializer the generated load/save bodies call
//!
//! # Example
//!
//! ```ignore
//! use xsdhelper_runtime::{Element, Interpreter, Value};
//!
//! let mut interp = Interpreter::new(&model);
//! let mut helper = interp.construct(vec![Element::text("Invoice", "7").into()])?;
//! interp.call(&mut helper, "SaveXMLFile", vec![Value::str("out/invoice.xml")])?;
//! assert!(interp.ledger().is_balanced());
//! ```

pub mod fault;
pub mod interp;
pub mod resources;
pub mod value;
pub mod xml;

pub use fault::Fault;
pub use interp::{HelperObject, Interpreter};
pub use resources::{Access, ResourceLedger, Resources, StreamId, TraceEvent};
pub use value::{Content, Element, Value};
