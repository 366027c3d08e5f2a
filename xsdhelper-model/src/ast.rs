//! Language-neutral class AST.
//!
//! The builder assembles a [`ClassModel`] from a descriptor; renderers and
//! the runtime interpreter consume it by matching on the variants below.
//! Nothing in here knows about concrete target-language syntax.

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Public member.
    #[default]
    Public,
}

/// Framework types referenced by generated bodies.
///
/// Their spelling is the same in every supported target because the
/// declaring namespaces are imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameworkType {
    /// `System.IO.Stream`.
    Stream,
    /// `System.IO.File`.
    File,
    /// `System.IO.FileInfo`.
    FileInfo,
    /// `System.IO.Directory`.
    Directory,
    /// `System.Xml.Serialization.XmlSerializer`.
    XmlSerializer,
    /// `System.Exception`.
    Exception,
}

impl FrameworkType {
    /// Every framework type referenced by generated code.
    pub const ALL: [Self; 6] = [
        Self::Stream,
        Self::File,
        Self::FileInfo,
        Self::Directory,
        Self::XmlSerializer,
        Self::Exception,
    ];

    /// Simple type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stream => "Stream",
            Self::File => "File",
            Self::FileInfo => "FileInfo",
            Self::Directory => "Directory",
            Self::XmlSerializer => "XmlSerializer",
            Self::Exception => "Exception",
        }
    }
}

/// Type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// No value.
    Void,
    /// Built-in string type.
    String,
    /// Framework type.
    Framework(FrameworkType),
    /// A user type, e.g. the wrapped class.
    Named(String),
}

impl TypeRef {
    /// Creates a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Returns `true` for [`TypeRef::Void`].
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Reference equality.
    IdentityEquality,
    /// Reference inequality.
    IdentityInequality,
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The neutral empty value.
    Null,
    /// The current instance.
    This,
    /// Local variable or parameter.
    Var(String),
    /// String literal.
    Str(String),
    /// Implicit argument of a property setter.
    SetterValue,
    /// A type used as the target of a static member access.
    Type(TypeRef),
    /// Property or field access.
    Property {
        /// Target object.
        target: Box<Expr>,
        /// Member name.
        name: String,
    },
    /// Method invocation.
    Invoke {
        /// Target object or type.
        target: Box<Expr>,
        /// Method name.
        method: String,
        /// Arguments, in order.
        args: Vec<Expr>,
    },
    /// Object creation.
    New {
        /// Created type.
        ty: TypeRef,
        /// Constructor arguments.
        args: Vec<Expr>,
    },
    /// Runtime type object of a type.
    TypeOf(TypeRef),
    /// Type cast.
    Cast {
        /// Target type.
        ty: TypeRef,
        /// Cast operand.
        expr: Box<Expr>,
    },
    /// Binary operation.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Creates a variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// Creates a property access on `self`.
    #[must_use]
    pub fn prop(self, name: impl Into<String>) -> Self {
        Self::Property {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// Creates a method invocation on `self`.
    #[must_use]
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Invoke {
            target: Box::new(self),
            method: method.into(),
            args,
        }
    }

    /// Creates a static type target.
    #[must_use]
    pub fn framework(ty: FrameworkType) -> Self {
        Self::Type(TypeRef::Framework(ty))
    }

    /// Creates `self != other`.
    #[must_use]
    pub fn not_identical(self, other: Expr) -> Self {
        Self::Binary {
            left: Box::new(self),
            op: BinaryOp::IdentityInequality,
            right: Box::new(other),
        }
    }

    /// Creates a cast of `self` to `ty`.
    #[must_use]
    pub fn cast(self, ty: TypeRef) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(self),
        }
    }
}

/// Ordered statement list.
pub type Block = Vec<Statement>;

/// A catch clause of a try statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatchClause {
    /// Caught exception type.
    pub exception: TypeRef,
    /// Variable bound to the fault, if any.
    pub binding: Option<String>,
    /// Handler body.
    pub body: Block,
}

/// Statement node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// Local variable declaration.
    Declare {
        /// Declared type.
        ty: TypeRef,
        /// Variable name.
        name: String,
        /// Initial value.
        init: Option<Expr>,
    },
    /// Assignment.
    Assign {
        /// Assigned location.
        target: Expr,
        /// Assigned value.
        value: Expr,
    },
    /// Expression evaluated for its side effects.
    Expr(Expr),
    /// Conditional.
    If {
        /// Condition.
        condition: Expr,
        /// Taken branch.
        then: Block,
        /// Other branch; empty when there is none.
        otherwise: Block,
    },
    /// Try/catch/finally.
    Try {
        /// Protected block.
        body: Block,
        /// Catch clauses, in match order.
        catches: Vec<CatchClause>,
        /// Block run on every exit path.
        finally: Block,
    },
    /// Return from the enclosing member.
    Return(Option<Expr>),
    /// Re-raises the fault caught by the enclosing catch clause unchanged.
    Rethrow,
    /// Raw comment line.
    Comment(String),
}

impl Statement {
    /// Creates a declaration with an initial value.
    pub fn declare(ty: TypeRef, name: impl Into<String>, init: Expr) -> Self {
        Self::Declare {
            ty,
            name: name.into(),
            init: Some(init),
        }
    }

    /// Creates an assignment.
    #[must_use]
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign { target, value }
    }

    /// Creates a comment.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }
}

/// Method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeRef,
}

impl Param {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Structured documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocComment {
    /// Summary text.
    pub summary: String,
    /// Parameter descriptions as `(name, text)`.
    pub params: Vec<(String, String)>,
    /// Description of the return value.
    pub returns: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
}

impl DocComment {
    /// Creates a comment with a summary only.
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            summary: text.into(),
            ..Self::default()
        }
    }

    /// Adds a parameter description.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.params.push((name.into(), text.into()));
        self
    }

    /// Sets the return description.
    #[must_use]
    pub fn returns(mut self, text: impl Into<String>) -> Self {
        self.returns = Some(text.into());
        self
    }

    /// Sets the remarks.
    #[must_use]
    pub fn remarks(mut self, text: impl Into<String>) -> Self {
        self.remarks = Some(text.into());
        self
    }

    /// Renders the comment as XML documentation lines, without the comment
    /// prefix of the target language.
    #[must_use]
    pub fn to_xml_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "<summary>".to_string(),
            self.summary.clone(),
            "</summary>".to_string(),
        ];
        for (name, text) in &self.params {
            lines.push(format!("<param name=\"{name}\">{text}</param>"));
        }
        if let Some(returns) = &self.returns {
            lines.push(format!("<returns>{returns}</returns>"));
        }
        if let Some(remarks) = &self.remarks {
            lines.push(format!("<remarks>{remarks}</remarks>"));
        }
        lines
    }
}

/// Constructor member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    /// Visibility.
    pub visibility: Visibility,
    /// Documentation.
    pub doc: DocComment,
    /// Parameters.
    pub params: Vec<Param>,
    /// Assignments run before the body.
    pub initializers: Vec<Statement>,
    /// Body.
    pub body: Block,
}

/// Property accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Accessors {
    /// Auto-implemented getter and setter.
    Auto,
    /// Explicit accessor bodies.
    Explicit {
        /// Getter body.
        get: Block,
        /// Setter body; the assigned value is [`Expr::SetterValue`].
        set: Block,
    },
}

/// Property member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    /// Visibility.
    pub visibility: Visibility,
    /// Documentation.
    pub doc: DocComment,
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: TypeRef,
    /// Accessors.
    pub accessors: Accessors,
}

/// Method member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    /// Visibility.
    pub visibility: Visibility,
    /// Documentation.
    pub doc: DocComment,
    /// Method name.
    pub name: String,
    /// Parameters.
    pub params: Vec<Param>,
    /// Return type; [`TypeRef::Void`] for none.
    pub returns: TypeRef,
    /// Body.
    pub body: Block,
}

/// Class member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    /// Constructor.
    Constructor(Constructor),
    /// Property.
    Property(Property),
    /// Method.
    Method(Method),
}

impl Member {
    /// Member name; `None` for constructors.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Constructor(_) => None,
            Self::Property(p) => Some(&p.name),
            Self::Method(m) => Some(&m.name),
        }
    }

    /// Documentation comment.
    #[must_use]
    pub fn doc(&self) -> &DocComment {
        match self {
            Self::Constructor(c) => &c.doc,
            Self::Property(p) => &p.doc,
            Self::Method(m) => &m.doc,
        }
    }
}

/// Group of members delimited by region markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    /// Region label.
    pub label: String,
    /// Members, in order.
    pub members: Vec<Member>,
}

/// Class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassDecl {
    /// Class name.
    pub name: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Whether the declaration is partial.
    pub is_partial: bool,
    /// Documentation.
    pub doc: DocComment,
    /// Member regions, in order.
    pub regions: Vec<Region>,
}

impl ClassDecl {
    /// Iterates all members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.regions.iter().flat_map(|region| region.members.iter())
    }

    /// Iterates constructors in declaration order.
    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.members().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }

    /// Iterates properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            _ => None,
        })
    }

    /// Iterates methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
    }

    /// Finds a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().find(|p| p.name == name)
    }

    /// Finds a method by name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods().find(|m| m.name == name)
    }
}

/// Namespace holding the class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Dotted name; empty for the global namespace.
    pub name: String,
    /// The single class.
    pub class: ClassDecl,
}

/// Root of the AST.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassModel {
    /// Comment lines preceding the whole file.
    pub banner: Vec<String>,
    /// Imported namespaces, in order.
    pub imports: Vec<String>,
    /// Namespace and class.
    pub namespace: Namespace,
}

impl ClassModel {
    /// The class declaration.
    #[must_use]
    pub fn class(&self) -> &ClassDecl {
        &self.namespace.class
    }
}
