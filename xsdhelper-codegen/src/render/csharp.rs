//! C# backend.

use super::{CodeWriter, SourceRenderer};
use crate::config::RenderConfig;
use xsdhelper_model::{
    Accessors, BinaryOp, Block, ClassDecl, ClassModel, Constructor, DocComment, Expr, Member,
    Method, Param, Property, Statement, TargetLanguage, TypeRef, Visibility,
};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Escapes an identifier that collides with a C# keyword.
#[must_use]
pub fn escape_identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("@{name}")
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

/// Renders class models as C# source.
#[derive(Debug, Clone, Default)]
pub struct CSharpRenderer {
    config: RenderConfig,
}

impl CSharpRenderer {
    /// Creates a C# renderer.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn visibility(visibility: Visibility) -> &'static str {
        match visibility {
            Visibility::Public => "public",
        }
    }

    fn type_name(ty: &TypeRef) -> String {
        match ty {
            TypeRef::Void => "void".to_string(),
            TypeRef::String => "string".to_string(),
            TypeRef::Framework(f) => f.name().to_string(),
            TypeRef::Named(name) => escape_identifier(name),
        }
    }

    fn params(params: &[Param]) -> String {
        params
            .iter()
            .map(|p| format!("{} {}", Self::type_name(&p.ty), escape_identifier(&p.name)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn args(args: &[Expr]) -> String {
        args.iter().map(Self::expr).collect::<Vec<_>>().join(", ")
    }

    /// Renders an expression used as the target of a member access.
    fn target(expr: &Expr) -> String {
        match expr {
            Expr::Cast { .. } | Expr::Binary { .. } => format!("({})", Self::expr(expr)),
            _ => Self::expr(expr),
        }
    }

    fn expr(expr: &Expr) -> String {
        match expr {
            Expr::Null => "null".to_string(),
            Expr::This => "this".to_string(),
            Expr::Var(name) => escape_identifier(name),
            Expr::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
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
            Expr::New { ty, args } => format!("new {}({})", Self::type_name(ty), Self::args(args)),
            Expr::TypeOf(ty) => format!("typeof({})", Self::type_name(ty)),
            Expr::Cast { ty, expr } => format!("({}){}", Self::type_name(ty), Self::target(expr)),
            Expr::Binary { left, op, right } => {
                let op = match op {
                    BinaryOp::IdentityEquality => "==",
                    BinaryOp::IdentityInequality => "!=",
                };
                format!("{} {} {}", Self::target(left), op, Self::target(right))
            }
        }
    }

    fn doc(w: &mut CodeWriter, doc: &DocComment) {
        for line in doc.to_xml_lines() {
            w.line(format!("/// {line}"));
        }
    }

    fn block(w: &mut CodeWriter, block: &Block) {
        w.line("{");
        w.indent();
        for statement in block {
            Self::statement(w, statement);
        }
        w.dedent();
        w.line("}");
    }

    fn statement(w: &mut CodeWriter, statement: &Statement) {
        match statement {
            Statement::Declare { ty, name, init } => match init {
                Some(init) => w.line(format!(
                    "{} {} = {};",
                    Self::type_name(ty),
                    escape_identifier(name),
                    Self::expr(init)
                )),
                None => w.line(format!("{} {};", Self::type_name(ty), escape_identifier(name))),
            },
            Statement::Assign { target, value } => {
                w.line(format!("{} = {};", Self::expr(target), Self::expr(value)));
            }
            Statement::Expr(expr) => w.line(format!("{};", Self::expr(expr))),
            Statement::If {
                condition,
                then,
                otherwise,
            } => {
                w.line(format!("if ({})", Self::expr(condition)));
                Self::block(w, then);
                if !otherwise.is_empty() {
                    w.line("else");
                    Self::block(w, otherwise);
                }
            }
            Statement::Try {
                body,
                catches,
                finally,
            } => {
                w.line("try");
                Self::block(w, body);
                for clause in catches {
                    match &clause.binding {
                        Some(binding) => w.line(format!(
                            "catch ({} {})",
                            Self::type_name(&clause.exception),
                            escape_identifier(binding)
                        )),
                        None => w.line(format!("catch ({})", Self::type_name(&clause.exception))),
                    }
                    Self::block(w, &clause.body);
                }
                if !finally.is_empty() {
                    w.line("finally");
                    Self::block(w, finally);
                }
            }
            Statement::Return(Some(expr)) => w.line(format!("return {};", Self::expr(expr))),
            Statement::Return(None) => w.line("return;"),
            Statement::Rethrow => w.line("throw;"),
            Statement::Comment(text) => w.line(format!("// {text}")),
        }
    }

    fn constructor(w: &mut CodeWriter, class: &str, ctor: &Constructor) {
        Self::doc(w, &ctor.doc);
        w.line(format!(
            "{} {}({})",
            Self::visibility(ctor.visibility),
            escape_identifier(class),
            Self::params(&ctor.params)
        ));
        w.line("{");
        w.indent();
        for statement in ctor.initializers.iter().chain(&ctor.body) {
            Self::statement(w, statement);
        }
        w.dedent();
        w.line("}");
    }

    fn property(w: &mut CodeWriter, property: &Property) {
        Self::doc(w, &property.doc);
        let header = format!(
            "{} {} {}",
            Self::visibility(property.visibility),
            Self::type_name(&property.ty),
            escape_identifier(&property.name)
        );
        match &property.accessors {
            Accessors::Auto => w.line(format!("{header} {{ get; set; }}")),
            Accessors::Explicit { get, set } => {
                w.line(header);
                w.line("{");
                w.indent();
                w.line("get");
                Self::block(w, get);
                w.line("set");
                Self::block(w, set);
                w.dedent();
                w.line("}");
            }
        }
    }

    fn method(w: &mut CodeWriter, method: &Method) {
        Self::doc(w, &method.doc);
        w.line(format!(
            "{} {} {}({})",
            Self::visibility(method.visibility),
            Self::type_name(&method.returns),
            escape_identifier(&method.name),
            Self::params(&method.params)
        ));
        Self::block(w, &method.body);
    }

    fn class(&self, w: &mut CodeWriter, class: &ClassDecl) {
        Self::doc(w, &class.doc);
        let partial = if class.is_partial { "partial " } else { "" };
        w.line(format!(
            "{} {}class {}",
            Self::visibility(class.visibility),
            partial,
            escape_identifier(&class.name)
        ));
        w.line("{");
        w.indent();
        for (i, region) in class.regions.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            if self.config.emits_regions() {
                w.line(format!("#region {}", region.label));
                w.blank();
            }
            for (j, member) in region.members.iter().enumerate() {
                if j > 0 {
                    w.blank();
                }
                match member {
                    Member::Constructor(c) => Self::constructor(w, &class.name, c),
                    Member::Property(p) => Self::property(w, p),
                    Member::Method(m) => Self::method(w, m),
                }
            }
            if self.config.emits_regions() {
                w.blank();
                w.line("#endregion");
            }
        }
        w.dedent();
        w.line("}");
    }
}

impl SourceRenderer for CSharpRenderer {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::CSharp
    }

    fn render(&self, model: &ClassModel) -> String {
        tracing::debug!(class = %model.class().name, "rendering C#");
        let mut w = CodeWriter::new(self.config.get_indent());

        for line in &model.banner {
            w.line(format!("// {line}").trim_end());
        }
        if !model.banner.is_empty() {
            w.blank();
        }

        for import in &model.imports {
            w.line(format!("using {import};"));
        }
        w.blank();

        let namespace = &model.namespace;
        if namespace.name.is_empty() {
            self.class(&mut w, &namespace.class);
        } else {
            w.line(format!("namespace {}", escape_namespace(&namespace.name)));
            w.line("{");
            w.indent();
            self.class(&mut w, &namespace.class);
            w.dedent();
            w.line("}");
        }

        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ClassModelBuilder;
    use crate::config::BuilderConfig;
    use xsdhelper_model::{PropertyStorage, TopLevelClassDescriptor};

    fn render(d: &TopLevelClassDescriptor, config: RenderConfig) -> String {
        let builder = ClassModelBuilder::new(BuilderConfig::new().banner(["<auto-generated/>"]));
        let model = builder.build(d).expect("Failed to build model");
        CSharpRenderer::new(config).render(&model)
    }

    const EXPECTED: &str = r#"// <auto-generated/>

using System;
using System.IO;
using System.Xml.Serialization;

namespace Billing
{
    /// <summary>
    /// Helper class to ease working with Invoice.xsd autogenerated class
    /// </summary>
    public partial class Invoice_HelperClass
    {
        #region Constructors

        /// <summary>
        /// Construct a new instance of the Invoice_HelperClass object.
        /// </summary>
        public Invoice_HelperClass()
        {
            // TO DO: assign values for all the properties
        }

        /// <summary>
        /// Construct a new instance of the Invoice_HelperClass object by Deserializing an XML file.
        /// </summary>
        /// <param name="FilePath">This XML file to read into the class object</param>
        public Invoice_HelperClass(string FilePath)
        {
            this.InvoiceData = this.LoadXmlFile(FilePath);
        }

        /// <summary>
        /// Construct a new instance of the Invoice_HelperClass object from an existing <typeparamref name="Invoice"/> object.
        /// </summary>
        /// <param name="invoiceData">A pre-existing <typeparamref name="Invoice"/> object.</param>
        public Invoice_HelperClass(Invoice invoiceData)
        {
            this.InvoiceData = invoiceData;
        }

        #endregion

        #region Properties

        /// <summary>
        /// The <typeparamref name="Invoice"/> object wrapped by this helper.
        /// </summary>
        public Invoice InvoiceData { get; set; }

        #endregion

        #region Saving & Loading XML Files

        /// <summary>
        /// Load a file path and produce a Deserialized <typeparamref name="Invoice"/> Object
        /// </summary>
        /// <param name="FilePath">This XML file to read into the class object</param>
        /// <returns>A new <typeparamref name="Invoice"/> object</returns>
        /// <remarks>This code was generated by xsdhelper.</remarks>
        public Invoice LoadXmlFile(string FilePath)
        {
            Invoice retObj = null;
            Stream streamObj = null;
            try
            {
                streamObj = File.OpenRead(FilePath);
                XmlSerializer serializer = new XmlSerializer(typeof(Invoice));
                retObj = (Invoice)serializer.Deserialize(streamObj);
            }
            catch (Exception)
            {
                throw;
            }
            finally
            {
                if (streamObj != null)
                {
                    streamObj.Dispose();
                }
            }
            return retObj;
        }

        /// <summary>
        /// This method will take the Invoice object, create an XML serializer for it, and write the XML to the <paramref name="FilePath"/>
        /// </summary>
        /// <param name="FilePath">Destination file path to save the file into.</param>
        /// <remarks>This code was generated by xsdhelper.</remarks>
        public void SaveXMLFile(string FilePath)
        {
            Stream streamObj = null;
            try
            {
                Directory.CreateDirectory(new FileInfo(FilePath).DirectoryName);
                streamObj = File.Create(FilePath);
                XmlSerializer serializer = new XmlSerializer(typeof(Invoice));
                serializer.Serialize(streamObj, this.InvoiceData);
                streamObj.Flush();
            }
            catch (Exception)
            {
                throw;
            }
            finally
            {
                if (streamObj != null)
                {
                    streamObj.Dispose();
                }
            }
        }

        #endregion
    }
}
"#;

    #[test]
    fn test_render_invoice() {
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "schemas/Invoice.xsd")
            .with_namespace("Billing");
        assert_eq!(render(&d, RenderConfig::default()), EXPECTED);
    }

    #[test]
    fn test_render_without_regions() {
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "Invoice.xsd");
        let text = render(&d, RenderConfig::new().regions(false));
        assert!(!text.contains("#region"));
        assert!(!text.contains("#endregion"));
    }

    #[test]
    fn test_render_global_namespace() {
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "Invoice.xsd");
        let text = render(&d, RenderConfig::default());
        assert!(!text.contains("namespace"));
        assert!(text.contains("\npublic partial class Invoice_HelperClass\n"));
    }

    #[test]
    fn test_render_backing_field_property() {
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "Invoice.xsd")
            .with_storage(PropertyStorage::BackingField("invoiceDataField".into()));
        let text = render(&d, RenderConfig::new().indent("  "));
        let expected = "  public Invoice InvoiceData\n  {\n    get\n    {\n      return this.invoiceDataField;\n    }\n    set\n    {\n      this.invoiceDataField = value;\n    }\n  }\n";
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn test_keyword_escaping() {
        assert_eq!(escape_identifier("class"), "@class");
        assert_eq!(escape_identifier("Class"), "Class");

        let d = TopLevelClassDescriptor::new("Event", "Event", "Event.xsd");
        let text = render(&d, RenderConfig::default());
        assert!(text.contains("public Event_HelperClass(Event @event)"));
        assert!(text.contains("this.Event = @event;"));
    }

    #[test]
    fn test_namespace_keyword_segments_escaped() {
        assert_eq!(escape_namespace("Acme.Billing"), "Acme.Billing");
        let d = TopLevelClassDescriptor::new("Invoice", "InvoiceData", "Invoice.xsd")
            .with_namespace("Acme.class");
        let text = render(&d, RenderConfig::default());
        assert!(text.contains("\nnamespace Acme.@class\n"), "{text}");
    }

    #[test]
    fn test_expression_forms() {
        let cast = Expr::var("o").not_identical(Expr::Null).cast(TypeRef::String);
        assert_eq!(CSharpRenderer::expr(&cast), "(string)(o != null)");
        assert_eq!(
            CSharpRenderer::expr(&Expr::Str("a\"b".into())),
            "\"a\\\"b\""
        );
        let call = Expr::var("o").cast(TypeRef::named("T")).call("Run", vec![]);
        assert_eq!(CSharpRenderer::expr(&call), "((T)o).Run()");
    }

    #[test]
    fn test_statement_forms() {
        let mut w = CodeWriter::new("  ");
        CSharpRenderer::statement(
            &mut w,
            &Statement::If {
                condition: Expr::var("a"),
                then: vec![Statement::Return(None)],
                otherwise: vec![Statement::Rethrow],
            },
        );
        assert_eq!(
            w.finish(),
            "if (a)\n{\n  return;\n}\nelse\n{\n  throw;\n}\n"
        );
    }

    #[test]
    fn test_constructor_initializers_precede_body() {
        let mut w = CodeWriter::new("  ");
        let ctor = Constructor {
            visibility: Visibility::Public,
            doc: DocComment::summary("s"),
            params: vec![],
            initializers: vec![Statement::assign(Expr::This.prop("A"), Expr::Null)],
            body: vec![Statement::comment("body")],
        };
        CSharpRenderer::constructor(&mut w, "C", &ctor);
        let text = w.finish();
        let init = text.find("this.A = null;").unwrap();
        let body = text.find("// body").unwrap();
        assert!(init < body);
    }
}
