//! Executes helper-class members straight from the class AST.
//!
//! Statements and expressions follow the semantics the renderers print:
//! `catch` clauses match by exception type, `throw;` re-raises the caught
//! fault as it is, and `finally` runs on every exit path. Framework calls go
//! to the real file system through [`Resources`].

use crate::fault::Fault;
use crate::resources::{ResourceLedger, Resources, TraceEvent};
use crate::value::Value;
use crate::xml;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use xsdhelper_model::{
    Accessors, BinaryOp, Block, CatchClause, ClassDecl, ClassModel, Expr, FrameworkType, Method,
    Param, Property, Statement, TypeRef,
};

/// State of one helper instance: its fields and auto-property values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelperObject {
    fields: HashMap<String, Value>,
}

impl HelperObject {
    /// Returns the stored value of a field or auto property.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Interpreter for one generated class.
pub struct Interpreter<'m> {
    class: &'m ClassDecl,
    resources: Resources,
}

/// How a statement completed.
enum Flow {
    Normal,
    Return(Value),
}

/// Locals of one member invocation.
#[derive(Default)]
struct Frame {
    member: String,
    locals: HashMap<String, Value>,
    setter_value: Option<Value>,
    caught: Vec<Fault>,
}

impl Frame {
    fn new(member: &str) -> Self {
        Self {
            member: member.to_string(),
            ..Self::default()
        }
    }

    fn bind(&mut self, params: &[Param], args: Vec<Value>) -> Result<(), Fault> {
        if params.len() != args.len() {
            return Err(Fault::missing(format!(
                "{}({} argument(s))",
                self.member,
                args.len()
            )));
        }
        for (param, arg) in params.iter().zip(args) {
            if !arg.is_assignable_to(&param.ty) {
                return Err(Fault::InvalidCast {
                    expected: type_name(&param.ty),
                    found: arg.type_name(),
                });
            }
            self.locals.insert(param.name.clone(), arg);
        }
        Ok(())
    }
}

fn type_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Void => "void".to_string(),
        TypeRef::String => "string".to_string(),
        TypeRef::Framework(f) => f.name().to_string(),
        TypeRef::Named(name) => name.clone(),
    }
}

impl<'m> Interpreter<'m> {
    /// Creates an interpreter for the class in `model`.
    pub fn new(model: &'m ClassModel) -> Self {
        Self {
            class: model.class(),
            resources: Resources::new(),
        }
    }

    /// Runs the constructor whose parameters accept `args`.
    ///
    /// # Errors
    /// Returns `Fault::NoMatchingConstructor` unless exactly one constructor
    /// accepts the arguments, or any fault its body raises.
    pub fn construct(&mut self, args: Vec<Value>) -> Result<HelperObject, Fault> {
        let class: &'m ClassDecl = self.class;
        let candidates: Vec<_> = class
            .constructors()
            .filter(|ctor| {
                ctor.params.len() == args.len()
                    && ctor
                        .params
                        .iter()
                        .zip(&args)
                        .all(|(param, arg)| arg.is_assignable_to(&param.ty))
            })
            .collect();
        let [ctor] = candidates.as_slice() else {
            let signature = args
                .iter()
                .map(Value::type_name)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Fault::NoMatchingConstructor { signature });
        };

        tracing::debug!(class = %class.name, arity = args.len(), "constructing");
        let mut object = HelperObject::default();
        let mut frame = Frame::new(&class.name);
        frame.bind(&ctor.params, args)?;
        let mut exec = Exec {
            interp: self,
            object: &mut object,
        };
        exec.block(&ctor.initializers, &mut frame)?;
        exec.block(&ctor.body, &mut frame)?;
        Ok(object)
    }

    /// Calls a method on `object`.
    ///
    /// # Returns
    /// The returned value, or [`Value::Null`] for a void method.
    ///
    /// # Errors
    /// Returns any fault the method raises, unchanged.
    pub fn call(
        &mut self,
        object: &mut HelperObject,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, Fault> {
        Exec {
            interp: self,
            object,
        }
        .call(method, args)
    }

    /// Reads a property or field of `object`. Unset members read as null.
    ///
    /// # Errors
    /// Returns any fault an explicit getter raises.
    pub fn get_property(&mut self, object: &mut HelperObject, name: &str) -> Result<Value, Fault> {
        Exec {
            interp: self,
            object,
        }
        .get_property(name)
    }

    /// Writes a property or field of `object`.
    ///
    /// # Errors
    /// Returns `Fault::InvalidCast` for a value of the wrong type.
    pub fn set_property(
        &mut self,
        object: &mut HelperObject,
        name: &str,
        value: Value,
    ) -> Result<(), Fault> {
        Exec {
            interp: self,
            object,
        }
        .set_property(name, value)
    }

    /// Returns the stream acquisition counts.
    #[must_use]
    pub fn ledger(&self) -> ResourceLedger {
        self.resources.ledger()
    }

    /// Returns recorded runtime events.
    #[must_use]
    pub fn trace(&self) -> &[TraceEvent] {
        self.resources.trace()
    }

    /// Returns the number of streams still open.
    #[must_use]
    pub fn open_streams(&self) -> usize {
        self.resources.open_streams()
    }
}

/// Execution context: the interpreter plus the receiving object.
struct Exec<'a, 'm> {
    interp: &'a mut Interpreter<'m>,
    object: &'a mut HelperObject,
}

impl<'m> Exec<'_, 'm> {
    fn method(&self, name: &str) -> Result<&'m Method, Fault> {
        let class: &'m ClassDecl = self.interp.class;
        class.method(name).ok_or_else(|| Fault::missing(name))
    }

    fn property(&self, name: &str) -> Option<&'m Property> {
        let class: &'m ClassDecl = self.interp.class;
        class.property(name)
    }

    fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value, Fault> {
        let method = self.method(name)?;
        tracing::debug!(method = name, "calling");
        let mut frame = Frame::new(name);
        frame.bind(&method.params, args)?;
        match self.block(&method.body, &mut frame)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    fn get_property(&mut self, name: &str) -> Result<Value, Fault> {
        // Fields are declared by the other half of the partial class.
        let Some(property) = self.property(name) else {
            return Ok(self.object.fields.get(name).cloned().unwrap_or(Value::Null));
        };
        match &property.accessors {
            Accessors::Auto => Ok(self.object.fields.get(name).cloned().unwrap_or(Value::Null)),
            Accessors::Explicit { get, .. } => {
                let mut frame = Frame::new(name);
                match self.block(get, &mut frame)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Err(Fault::unsupported(format!(
                        "getter of '{name}' returned no value"
                    ))),
                }
            }
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), Fault> {
        let Some(property) = self.property(name) else {
            self.object.fields.insert(name.to_string(), value);
            return Ok(());
        };
        if !value.is_assignable_to(&property.ty) {
            return Err(Fault::InvalidCast {
                expected: type_name(&property.ty),
                found: value.type_name(),
            });
        }
        match &property.accessors {
            Accessors::Auto => {
                self.object.fields.insert(name.to_string(), value);
            }
            Accessors::Explicit { set, .. } => {
                let mut frame = Frame::new(name);
                frame.setter_value = Some(value);
                self.block(set, &mut frame)?;
            }
        }
        Ok(())
    }

    fn block(&mut self, block: &[Statement], frame: &mut Frame) -> Result<Flow, Fault> {
        for statement in block {
            if let Flow::Return(value) = self.statement(statement, frame)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn statement(&mut self, statement: &Statement, frame: &mut Frame) -> Result<Flow, Fault> {
        match statement {
            Statement::Declare { name, init, .. } => {
                let value = match init {
                    Some(expr) => self.expr(expr, frame)?,
                    None => Value::Null,
                };
                frame.locals.insert(name.clone(), value);
            }
            Statement::Assign { target, value } => {
                let value = self.expr(value, frame)?;
                self.assign(target, value, frame)?;
            }
            Statement::Expr(expr) => {
                self.expr(expr, frame)?;
            }
            Statement::If {
                condition,
                then,
                otherwise,
            } => {
                let taken = match self.expr(condition, frame)? {
                    Value::Bool(b) => b,
                    other => {
                        return Err(Fault::InvalidCast {
                            expected: "bool".to_string(),
                            found: other.type_name(),
                        });
                    }
                };
                return self.block(if taken { then } else { otherwise }, frame);
            }
            Statement::Try {
                body,
                catches,
                finally,
            } => return self.try_statement(body, catches, finally, frame),
            Statement::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.expr(expr, frame)?,
                    None => Value::Null,
                };
                return Ok(Flow::Return(value));
            }
            Statement::Rethrow => {
                return Err(frame
                    .caught
                    .pop()
                    .unwrap_or_else(|| Fault::unsupported("rethrow outside a catch clause")));
            }
            Statement::Comment(_) => {}
        }
        Ok(Flow::Normal)
    }

    fn try_statement(
        &mut self,
        body: &Block,
        catches: &[CatchClause],
        finally: &Block,
        frame: &mut Frame,
    ) -> Result<Flow, Fault> {
        let mut outcome = self.block(body, frame);

        if let Err(fault) = outcome {
            outcome = match catches
                .iter()
                .find(|clause| fault.is_caught_by(&type_name(&clause.exception)))
            {
                Some(clause) => {
                    tracing::trace!(fault = %fault, "caught");
                    if let Some(binding) = &clause.binding {
                        frame
                            .locals
                            .insert(binding.clone(), Value::Str(fault.to_string()));
                    }
                    let depth = frame.caught.len();
                    frame.caught.push(fault);
                    let handled = self.block(&clause.body, frame);
                    frame.caught.truncate(depth);
                    handled
                }
                None => Err(fault),
            };
        }

        if !finally.is_empty() {
            self.interp.resources.enter_finally(&frame.member);
            if let Flow::Return(value) = self.block(finally, frame)? {
                return Ok(Flow::Return(value));
            }
        }
        outcome
    }

    fn assign(&mut self, target: &Expr, value: Value, frame: &mut Frame) -> Result<(), Fault> {
        match target {
            Expr::Var(name) => match frame.locals.get_mut(name) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(Fault::missing(name.as_str())),
            },
            Expr::Property { target, name } => match self.expr(target, frame)? {
                Value::This => self.set_property(name, value),
                Value::Null => Err(Fault::null_reference(name.as_str())),
                other => Err(Fault::unsupported(format!(
                    "assigning '{name}' on {}",
                    other.type_name()
                ))),
            },
            other => Err(Fault::unsupported(format!("assignment to {other:?}"))),
        }
    }

    fn exprs(&mut self, exprs: &[Expr], frame: &mut Frame) -> Result<Vec<Value>, Fault> {
        exprs.iter().map(|e| self.expr(e, frame)).collect()
    }

    fn expr(&mut self, expr: &Expr, frame: &mut Frame) -> Result<Value, Fault> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::This => Ok(Value::This),
            Expr::Str(s) => Ok(Value::str(s.as_str())),
            Expr::Var(name) => frame
                .locals
                .get(name)
                .cloned()
                .ok_or_else(|| Fault::missing(name.as_str())),
            Expr::SetterValue => frame
                .setter_value
                .clone()
                .ok_or_else(|| Fault::unsupported("setter value outside a setter")),
            Expr::Type(ty) | Expr::TypeOf(ty) => Ok(Value::Type(ty.clone())),
            Expr::Property { target, name } => {
                let target = self.expr(target, frame)?;
                self.property_of(target, name)
            }
            Expr::Invoke {
                target,
                method,
                args,
            } => {
                let target = self.expr(target, frame)?;
                let args = self.exprs(args, frame)?;
                self.invoke(target, method, args)
            }
            Expr::New { ty, args } => {
                let args = self.exprs(args, frame)?;
                construct_framework(ty, args)
            }
            Expr::Cast { ty, expr } => {
                let value = self.expr(expr, frame)?;
                if value.is_assignable_to(ty) {
                    Ok(value)
                } else {
                    Err(Fault::InvalidCast {
                        expected: type_name(ty),
                        found: value.type_name(),
                    })
                }
            }
            Expr::Binary { left, op, right } => {
                let left = self.expr(left, frame)?;
                let right = self.expr(right, frame)?;
                let same = left.is_identical(&right);
                let result = match op {
                    BinaryOp::IdentityEquality => same,
                    BinaryOp::IdentityInequality => !same,
                };
                Ok(Value::Bool(result))
            }
        }
    }

    fn property_of(&mut self, target: Value, name: &str) -> Result<Value, Fault> {
        match (target, name) {
            (Value::This, _) => self.get_property(name),
            (Value::FileInfo(path), "DirectoryName") => Ok(Value::str(directory_name(&path))),
            (Value::Null, _) => Err(Fault::null_reference(name)),
            (other, _) => Err(Fault::missing(format!("{}.{name}", other.type_name()))),
        }
    }

    fn invoke(&mut self, target: Value, method: &str, args: Vec<Value>) -> Result<Value, Fault> {
        match target {
            Value::This => return self.call(method, args),
            Value::Null => return Err(Fault::null_reference(method)),
            _ => {}
        }

        let resources = &mut self.interp.resources;
        match (target, method, args.as_slice()) {
            (Value::Type(TypeRef::Framework(FrameworkType::File)), "OpenRead", [Value::Str(p)]) => {
                Ok(Value::Stream(resources.open_read(Path::new(p))?))
            }
            (Value::Type(TypeRef::Framework(FrameworkType::File)), "Create", [Value::Str(p)]) => {
                Ok(Value::Stream(resources.create(Path::new(p))?))
            }
            (
                Value::Type(TypeRef::Framework(FrameworkType::Directory)),
                "CreateDirectory",
                [Value::Str(p)],
            ) => {
                std::fs::create_dir_all(p)?;
                Ok(Value::Null)
            }

            (Value::Stream(id), "Flush", []) => {
                resources.flush(id)?;
                Ok(Value::Null)
            }
            (Value::Stream(id), "Dispose", []) => {
                resources.release(id)?;
                Ok(Value::Null)
            }

            (Value::Serializer(root), "Serialize", [Value::Stream(id), instance]) => {
                let element = match instance {
                    Value::Null => None,
                    Value::Object(element) if element.name == root => Some(element),
                    other => {
                        return Err(Fault::InvalidCast {
                            expected: root,
                            found: other.type_name(),
                        });
                    }
                };
                let bytes = xml::write_document(&root, element)?;
                resources.write_all(*id, &bytes)?;
                Ok(Value::Null)
            }
            (Value::Serializer(root), "Deserialize", [Value::Stream(id)]) => {
                let text = resources.read_to_string(*id)?;
                Ok(xml::read_document(&text, &root)?.map_or(Value::Null, Value::Object))
            }

            (target, method, _) => Err(Fault::missing(format!(
                "{}.{method}({} argument(s))",
                target.type_name(),
                args.len()
            ))),
        }
    }
}

/// `new T(args)` for the framework types generated bodies create.
fn construct_framework(ty: &TypeRef, args: Vec<Value>) -> Result<Value, Fault> {
    match (ty, args.as_slice()) {
        (TypeRef::Framework(FrameworkType::XmlSerializer), [Value::Type(TypeRef::Named(root))]) => {
            Ok(Value::Serializer(root.clone()))
        }
        (TypeRef::Framework(FrameworkType::FileInfo), [Value::Str(path)]) => {
            Ok(Value::FileInfo(PathBuf::from(path)))
        }
        (TypeRef::Framework(FrameworkType::FileInfo), [Value::Null]) => {
            Err(Fault::null_reference("FileInfo"))
        }
        _ => Err(Fault::unsupported(format!("new {}", type_name(ty)))),
    }
}

/// Directory part of a file path; `.` for a bare file name.
fn directory_name(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.display().to_string(),
        _ => ".".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Access;
    use crate::value::Element;
    use xsdhelper_codegen::ClassModelBuilder;
    use xsdhelper_model::{PropertyStorage, TopLevelClassDescriptor};

    fn model(storage: PropertyStorage) -> ClassModel {
        let descriptor = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "Invoice.xsd")
            .with_namespace("Billing")
            .with_storage(storage);
        ClassModelBuilder::default()
            .build(&descriptor)
            .expect("Failed to build model")
    }

    fn invoice() -> Element {
        Element::with_children(
            "Invoice",
            vec![
                Element::text("Number", "INV-7"),
                Element::with_children("Customer", vec![Element::text("Name", "Ada")]),
            ],
        )
    }

    fn path_value(path: &Path) -> Value {
        Value::str(path.display().to_string())
    }

    fn finally_entered(interp: &Interpreter<'_>, member: &str) -> bool {
        interp.trace().iter().any(|event| {
            matches!(event, TraceEvent::FinallyEntered { member: m } if m == member)
        })
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![]).unwrap();

        let missing = dir.path().join("missing.xml");
        let fault = interp
            .call(&mut helper, "LoadXmlFile", vec![path_value(&missing)])
            .unwrap_err();

        let direct = std::fs::File::open(&missing).unwrap_err();
        assert_eq!(fault.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert_eq!(fault.to_string(), format!("I/O error: {direct}"));
        assert_eq!(interp.ledger(), ResourceLedger::default());
        assert!(finally_entered(&interp, "LoadXmlFile"));
    }

    #[test]
    fn test_file_path_constructor_propagates_fault() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);

        let fault = interp
            .construct(vec![path_value(&dir.path().join("missing.xml"))])
            .unwrap_err();
        assert_eq!(fault.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert_eq!(interp.open_streams(), 0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/data/invoice.xml");
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);

        let mut helper = interp.construct(vec![invoice().into()]).unwrap();
        let result = interp
            .call(&mut helper, "SaveXMLFile", vec![path_value(&path)])
            .unwrap();
        assert_eq!(result, Value::Null);
        assert!(path.exists());

        let ledger = interp.ledger();
        assert_eq!(ledger.acquired, 1);
        assert_eq!(ledger.released, 1);

        let mut loaded = interp.construct(vec![path_value(&path)]).unwrap();
        let value = interp.get_property(&mut loaded, "InvoiceData").unwrap();
        assert_eq!(value, Value::Object(invoice()));

        let ledger = interp.ledger();
        assert_eq!(ledger.acquired, 2);
        assert_eq!(ledger.released, 2);
        assert_eq!(ledger.double_released, 0);
        assert!(matches!(
            interp.trace().first(),
            Some(TraceEvent::StreamOpened {
                access: Access::Write,
                ..
            })
        ));
    }

    #[test]
    fn test_load_returns_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.xml");
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);

        let mut helper = interp.construct(vec![invoice().into()]).unwrap();
        interp
            .call(&mut helper, "SaveXMLFile", vec![path_value(&path)])
            .unwrap();
        let loaded = interp
            .call(&mut helper, "LoadXmlFile", vec![path_value(&path)])
            .unwrap();
        assert_eq!(loaded, Value::Object(invoice()));
        assert!(interp.ledger().is_balanced());
    }

    #[test]
    fn test_save_to_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![invoice().into()]).unwrap();

        let fault = interp
            .call(&mut helper, "SaveXMLFile", vec![path_value(dir.path())])
            .unwrap_err();

        let direct = std::fs::File::create(dir.path()).unwrap_err();
        assert_eq!(fault.io_kind(), Some(direct.kind()));
        assert!(finally_entered(&interp, "SaveXMLFile"));
        assert_eq!(interp.ledger(), ResourceLedger::default());
    }

    #[test]
    fn test_null_instance_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xml");
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);

        let mut helper = interp.construct(vec![]).unwrap();
        assert_eq!(
            interp.get_property(&mut helper, "InvoiceData").unwrap(),
            Value::Null
        );
        interp
            .call(&mut helper, "SaveXMLFile", vec![path_value(&path)])
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("xsi:nil=\"true\""));

        let mut loaded = interp.construct(vec![path_value(&path)]).unwrap();
        assert_eq!(
            interp.get_property(&mut loaded, "InvoiceData").unwrap(),
            Value::Null
        );
        assert!(interp.ledger().is_balanced());
    }

    #[test]
    fn test_load_wrong_root_releases_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.xml");
        std::fs::write(&path, "<Order/>").unwrap();
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![]).unwrap();

        let fault = interp
            .call(&mut helper, "LoadXmlFile", vec![path_value(&path)])
            .unwrap_err();
        assert!(matches!(fault, Fault::InvalidDocument { .. }));
        let ledger = interp.ledger();
        assert_eq!(ledger.acquired, 1);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_backing_field_storage() {
        let model = model(PropertyStorage::BackingField("invoiceDataField".into()));
        let mut interp = Interpreter::new(&model);

        let mut helper = interp.construct(vec![invoice().into()]).unwrap();
        assert_eq!(
            helper.field("invoiceDataField"),
            Some(&Value::Object(invoice()))
        );
        assert_eq!(helper.field("InvoiceData"), None);
        assert_eq!(
            interp.get_property(&mut helper, "InvoiceData").unwrap(),
            Value::Object(invoice())
        );
    }

    #[test]
    fn test_constructor_resolution() {
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);

        let fault = interp.construct(vec![Value::Null]).unwrap_err();
        assert!(matches!(fault, Fault::NoMatchingConstructor { .. }));

        let fault = interp
            .construct(vec![Element::text("Order", "1").into()])
            .unwrap_err();
        assert!(matches!(fault, Fault::NoMatchingConstructor { .. }));

        let fault = interp
            .construct(vec![Value::str("a"), Value::str("b")])
            .unwrap_err();
        assert!(matches!(fault, Fault::NoMatchingConstructor { .. }));
    }

    #[test]
    fn test_set_property_checks_type() {
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![]).unwrap();

        let fault = interp
            .set_property(&mut helper, "InvoiceData", Value::str("x"))
            .unwrap_err();
        assert!(matches!(fault, Fault::InvalidCast { .. }));

        interp
            .set_property(&mut helper, "InvoiceData", invoice().into())
            .unwrap();
        assert_eq!(helper.field("InvoiceData"), Some(&Value::Object(invoice())));
    }

    #[test]
    fn test_unknown_method() {
        let model = model(PropertyStorage::Auto);
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![]).unwrap();

        let fault = interp.call(&mut helper, "Load", vec![]).unwrap_err();
        assert!(matches!(fault, Fault::MissingMember { .. }));
    }

    #[test]
    fn test_rethrow_preserves_fault_through_nested_try() {
        let stream = Expr::var("s");
        let open = Expr::framework(FrameworkType::File).call("OpenRead", vec![Expr::var("p")]);
        let inner = Statement::Try {
            body: vec![Statement::assign(stream.clone(), open)],
            catches: vec![CatchClause {
                exception: TypeRef::named("IOException"),
                binding: Some("ex".into()),
                body: vec![Statement::Rethrow],
            }],
            finally: vec![],
        };
        let outer = Statement::Try {
            body: vec![inner],
            catches: vec![CatchClause {
                exception: TypeRef::Framework(FrameworkType::Exception),
                binding: None,
                body: vec![Statement::Rethrow],
            }],
            finally: vec![Statement::comment("done")],
        };

        let mut model = model(PropertyStorage::Auto);
        let probe = Method {
            visibility: xsdhelper_model::Visibility::Public,
            doc: xsdhelper_model::DocComment::summary("probe"),
            name: "Probe".into(),
            params: vec![Param::new("p", TypeRef::String)],
            returns: TypeRef::Void,
            body: vec![
                Statement::declare(TypeRef::Framework(FrameworkType::Stream), "s", Expr::Null),
                outer,
            ],
        };
        model.namespace.class.regions[0]
            .members
            .push(xsdhelper_model::Member::Method(probe));

        let dir = tempfile::tempdir().unwrap();
        let mut interp = Interpreter::new(&model);
        let mut helper = interp.construct(vec![]).unwrap();
        let fault = interp
            .call(&mut helper, "Probe", vec![path_value(&dir.path().join("x"))])
            .unwrap_err();
        assert_eq!(fault.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(finally_entered(&interp, "Probe"));
    }
}
