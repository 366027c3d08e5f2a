//! Visual Basic backend.

use super::{CodeWriter, SourceRenderer};
use crate::config::RenderConfig;
use xsdhelper_model::{
    Accessors, BinaryOp, Block, ClassDecl, ClassModel, Constructor, DocComment, Expr,
    FrameworkType, Member, Method, Param, Property, Statement, TargetLanguage, TypeRef,
    Visibility,
};

const KEYWORDS: &[&str] = &[
    "AddHandler", "AddressOf", "Alias", "And", "AndAlso", "As", "Boolean", "ByRef", "Byte",
    "ByVal", "Call", "Case", "Catch", "CBool", "CByte", "CChar", "CDate", "CDbl", "CDec", "Char",
    "CInt", "Class", "CLng", "CObj", "Const", "Continue", "CSByte", "CShort", "CSng", "CStr",
    "CType", "CUInt", "CULng", "CUShort", "Date", "Decimal", "Declare", "Default", "Delegate",
    "Dim", "DirectCast", "Do", "Double", "Each", "Else", "ElseIf", "End", "EndIf", "Enum",
    "Erase", "Error", "Event", "Exit", "False", "Finally", "For", "Friend", "Function", "Get",
    "GetType", "GetXMLNamespace", "Global", "GoSub", "GoTo", "Handles", "If", "Implements",
    "Imports", "In", "Inherits", "Integer", "Interface", "Is", "IsNot", "Let", "Lib", "Like",
    "Long", "Loop", "Me", "Mod", "Module", "MustInherit", "MustOverride", "MyBase", "MyClass",
    "NameOf", "Namespace", "Narrowing", "New", "Next", "Not", "Nothing", "NotInheritable",
    "NotOverridable", "Object", "Of", "On", "Operator", "Option", "Optional", "Or", "OrElse",
    "Overloads", "Overridable", "Overrides", "ParamArray", "Partial", "Private", "Property",
    "Protected", "Public", "RaiseEvent", "ReadOnly", "ReDim", "REM", "RemoveHandler", "Resume",
    "Return", "SByte", "Select", "Set", "Shadows", "Shared", "Short", "Single", "Static", "Step",
    "Stop", "String", "Structure", "Sub", "SyncLock", "Then", "Throw", "To", "True", "Try",
    "TryCast", "TypeOf", "UInteger", "ULong", "UShort", "Using", "Variant", "Wend", "When",
    "While", "Widening", "With", "WithEvents", "WriteOnly", "Xor",
];

/// Variable name used for catch clauses that need one syntactically.
const CATCH_VAR: &str = "ex";

/// Escapes an identifier that collides with a Visual Basic keyword.
///
/// Visual Basic keywords are case-insensitive.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    if KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name)) {
        format!("[{name}]")
    } else {
        name.to_string()
    }
}

/// Escapes each segment of a dotted namespace.
#[must_use]
pub fn escape_namespace(name: &str) -> String {
    name.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// Renders class models as Visual Basic source.
#[derive(Debug, Clone, Default)]
pub struct VisualBasicRenderer {
    config: RenderConfig,
}

impl VisualBasicRenderer {
    /// Creates a Visual Basic renderer.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn visibility(visibility: Visibility) -> &'static str {
        match visibility {
            Visibility::Public => "Public",
        }
    }

    fn type_name(ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "Object".to_string(),
            TypeRef::String => "String".to_string(),
            TypeRef::Framework(f) => f.name().to_string(),
            TypeRef::Named(name) => escape_identifier(name),
        }
    }

    fn params(params: &[Param]) -> String {
        params
            .iter()
            .map(|p| {
                format!(
                    "ByVal {} As {}",
                    escape_identifier(&p.name),
                    Self::type_name(&p.ty)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn args(args: &[Expr]) -> String {
        args.iter().map(Self::expr).collect::<Vec<_>>().join(", ")
    }

    /// Renders an expression used as the target of a member access.
    fn target(expr: &Expr) -> String {
        match expr {
            Expr::New { .. } | Expr::Binary { .. } => format!("({})", Self::expr(expr)),
            _ => Self::expr(expr),
        }
    }

    fn expr(expr: &Expr) -> String {
        match expr {
            Expr::Null => "Nothing".to_string(),
            Expr::This => "Me".to_string(),
            Expr::Var(name) => escape_identifier(name),
            Expr::Str(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            Expr::SetterValue => "value".to_string(),
            Expr::Type(ty) => Self::type_name(ty),
            Expr::Property { target, name } => {
                format!("{}.{}", Self::target(target), escape_identifier(name))
            }
            Expr::Invoke {
                target,
                method,
                args,
            } => format!(
                "{}.{}({})",
                Self::target(target),
                escape_identifier(method),
                Self::args(args)
            ),
            Expr::New { ty, args } => format!("New {}({})", Self::type_name(ty), Self::args(args)),
            Expr::TypeOf(ty) => format!("GetType({})", Self::type_name(ty)),
            Expr::Cast { ty, expr } => {
                format!("CType({}, {})", Self::expr(expr), Self::type_name(ty))
            }
            Expr::Binary { left, op, right } => {
                let op = match op {
                    BinaryOp::IdentityEquality => "Is",
                    BinaryOp::IdentityInequality => "IsNot",
                };
                format!("{} {} {}", Self::target(left), op, Self::target(right))
            }
        }
    }

    fn doc(w: &mut CodeWriter, doc: &DocComment) {
        for line in doc.to_xml_lines() {
            w.line(format!("''' {line}"));
        }
    }

    fn body(w: &mut CodeWriter, block: &Block) {
        w.indent();
        for statement in block {
            Self::statement(w, statement);
        }
        w.dedent();
    }

    fn statement(w: &mut CodeWriter, statement: &Statement) {
        match statement {
            Statement::Declare { ty, name, init } => match init {
                Some(init) => w.line(format!(
                    "Dim {} As {} = {}",
                    escape_identifier(name),
                    Self::type_name(ty),
                    Self::expr(init)
                )),
                None => w.line(format!(
                    "Dim {} As {}",
                    escape_identifier(name),
                    Self::type_name(ty)
                )),
            },
            Statement::Assign { target, value } => {
                w.line(format!("{} = {}", Self::expr(target), Self::expr(value)));
            }
            Statement::Expr(expr) => w.line(Self::expr(expr)),
            Statement::If {
                condition,
                then,
                otherwise,
            } => {
                w.line(format!("If {} Then", Self::expr(condition)));
                Self::body(w, then);
                if !otherwise.is_empty() {
                    w.line("Else");
                    Self::body(w, otherwise);
                }
                w.line("End If");
            }
            Statement::Try {
                body,
                catches,
                finally,
            } => {
                w.line("Try");
                Self::body(w, body);
                for clause in catches {
                    let catch_all =
                        clause.exception == TypeRef::Framework(FrameworkType::Exception);
                    match (&clause.binding, catch_all) {
                        (None, true) => w.line("Catch"),
                        (binding, _) => w.line(format!(
                            "Catch {} As {}",
                            escape_identifier(binding.as_deref().unwrap_or(CATCH_VAR)),
                            Self::type_name(&clause.exception)
                        )),
                    }
                    Self::body(w, &clause.body);
                }
                if !finally.is_empty() {
                    w.line("Finally");
                    Self::body(w, finally);
                }
                w.line("End Try");
            }
            Statement::Return(Some(expr)) => w.line(format!("Return {}", Self::expr(expr))),
            Statement::Return(None) => w.line("Return"),
            Statement::Rethrow => w.line("Throw"),
            Statement::Comment(text) => w.line(format!("'{text}")),
        }
    }

    fn constructor(w: &mut CodeWriter, ctor: &Constructor) {
        Self::doc(w, &ctor.doc);
        w.line(format!(
            "{} Sub New({})",
            Self::visibility(ctor.visibility),
            Self::params(&ctor.params)
        ));
        w.indent();
        for statement in ctor.initializers.iter().chain(&ctor.body) {
            Self::statement(w, statement);
        }
        w.dedent();
        w.line("End Sub");
    }

    fn property(w: &mut CodeWriter, property: &Property) {
        Self::doc(w, &property.doc);
        let visibility = Self::visibility(property.visibility);
        let name = escape_identifier(&property.name);
        let ty = Self::type_name(&property.ty);
        match &property.accessors {
            Accessors::Auto => w.line(format!("{visibility} Property {name} As {ty}")),
            Accessors::Explicit { get, set } => {
                w.line(format!("{visibility} Property {name}() As {ty}"));
                w.indent();
                w.line("Get");
                Self::body(w, get);
                w.line("End Get");
                w.line(format!("Set(ByVal value As {ty})"));
                Self::body(w, set);
                w.line("End Set");
                w.dedent();
                w.line("End Property");
            }
        }
    }

    fn method(w: &mut CodeWriter, method: &Method) {
        Self::doc(w, &method.doc);
        let visibility = Self::visibility(method.visibility);
        let name = escape_identifier(&method.name);
        let params = Self::params(&method.params);
        let kind = if method.returns.is_void() {
            w.line(format!("{visibility} Sub {name}({params})"));
            "Sub"
        } else {
            w.line(format!(
                "{visibility} Function {name}({params}) As {}",
                Self::type_name(&method.returns)
            ));
            "Function"
        };
        Self::body(w, &method.body);
        w.line(format!("End {kind}"));
    }

    fn class(&self, w: &mut CodeWriter, class: &ClassDecl) {
        Self::doc(w, &class.doc);
        let partial = if class.is_partial { "Partial " } else { "" };
        w.line(format!(
            "{}{} Class {}",
            partial,
            Self::visibility(class.visibility),
            escape_identifier(&class.name)
        ));
        w.indent();
        for (i, region) in class.regions.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            if self.config.emits_regions() {
                w.line(format!("#Region \"{}\"", region.label.replace('"', "\"\"")));
                w.blank();
            }
            for (j, member) in region.members.iter().enumerate() {
                if j > 0 {
                    w.blank();
                }
                match member {
                    Member::Constructor(c) => Self::constructor(w, c),
                    Member::Property(p) => Self::property(w, p),
                    Member::Method(m) => Self::method(w, m),
                }
            }
            if self.config.emits_regions() {
                w.blank();
                w.line("#End Region");
            }
        }
        w.dedent();
        w.line("End Class");
    }
}

impl SourceRenderer for VisualBasicRenderer {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::VisualBasic
    }

    fn render(&self, model: &ClassModel) -> String {
        tracing::debug!(class = %model.class().name, "rendering Visual Basic");
        let mut w = CodeWriter::new(self.config.get_indent());

        for line in &model.banner {
            w.line(format!("' {line}").trim_end());
        }
        if !model.banner.is_empty() {
            w.blank();
        }

        w.line("Option Strict On");
        w.line("Option Explicit On");
        w.blank();

        for import in &model.imports {
            w.line(format!("Imports {import}"));
        }
        w.blank();

        let namespace = &model.namespace;
        if namespace.name.is_empty() {
            self.class(&mut w, &namespace.class);
        } else {
            w.line(format!("Namespace {}", escape_namespace(&namespace.name)));
            w.blank();
            w.indent();
            self.class(&mut w, &namespace.class);
            w.dedent();
            w.line("End Namespace");
        }

        w.finish()
    }
}
