//! Helper-class model construction.
//!
//! [`ClassModelBuilder`] turns a validated descriptor into a [`ClassModel`]:
//! three imports, three constructors, one forwarding property and the
//! `LoadXmlFile`/`SaveXMLFile` pair. Stream handling in the load/save bodies
//! uses try/catch/finally rather than scoped-resource syntax, so every target
//! can express it.

use crate::comments::CommentWriter;
use crate::config::BuilderConfig;
use xsdhelper_model::naming::{FILE_PATH_PARAM, LOAD_METHOD, SAVE_METHOD};
use xsdhelper_model::{
    Accessors, Block, CatchClause, ClassDecl, ClassModel, Constructor, Expr, FrameworkType,
    InvalidDescriptorError, Member, Method, Namespace, Param, Property, PropertyStorage, Region,
    Statement, TopLevelClassDescriptor, TypeRef, Visibility,
};

/// Namespaces imported by every helper, in emission order.
pub const IMPORTS: [&str; 3] = ["System", "System.IO", "System.Xml.Serialization"];

const RESULT_VAR: &str = "retObj";
const STREAM_VAR: &str = "streamObj";
const SERIALIZER_VAR: &str = "serializer";

/// Builds the helper-class AST for a descriptor.
#[derive(Debug, Clone, Default)]
pub struct ClassModelBuilder {
    config: BuilderConfig,
}

impl ClassModelBuilder {
    /// Creates a builder with the given settings.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Returns the builder settings.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Builds the complete class model.
    ///
    /// # Errors
    /// Returns `InvalidDescriptorError` if the descriptor is invalid. No part
    /// of the model is built in that case.
    pub fn build(
        &self,
        descriptor: &TopLevelClassDescriptor,
    ) -> Result<ClassModel, InvalidDescriptorError> {
        descriptor.validate()?;
        let helper_class = descriptor.helper_class_name()?;
        tracing::debug!(
            class = %descriptor.class_name,
            helper = %helper_class,
            "building helper class model"
        );

        let session = Session {
            descriptor,
            comments: CommentWriter::new(
                descriptor,
                &helper_class,
                self.config.get_generator_name(),
            ),
            wrapped: TypeRef::named(&descriptor.class_name),
        };

        let regions = vec![
            Region {
                label: self.config.get_constructors_region().to_string(),
                members: session.constructors(self.config.get_placeholder_comment()),
            },
            Region {
                label: self.config.get_properties_region().to_string(),
                members: vec![Member::Property(session.forwarding_property())],
            },
            Region {
                label: self.config.get_persistence_region().to_string(),
                members: vec![
                    Member::Method(session.load_method()),
                    Member::Method(session.save_method()),
                ],
            },
        ];

        let class = ClassDecl {
            name: helper_class.clone(),
            visibility: Visibility::Public,
            is_partial: true,
            doc: session.comments.class(),
            regions,
        };

        Ok(ClassModel {
            banner: self.config.banner_lines(),
            imports: IMPORTS.iter().map(ToString::to_string).collect(),
            namespace: Namespace {
                name: descriptor.namespace.clone(),
                class,
            },
        })
    }
}

/// Per-descriptor state shared by the member builders.
struct Session<'a> {
    descriptor: &'a TopLevelClassDescriptor,
    comments: CommentWriter<'a>,
    wrapped: TypeRef,
}

impl Session<'_> {
    fn this_property(&self) -> Expr {
        Expr::This.prop(&self.descriptor.helper_property_name)
    }

    fn file_path_param() -> Param {
        Param::new(FILE_PATH_PARAM, TypeRef::String)
    }

    /// The three constructors, in order.
    fn constructors(&self, placeholder: &str) -> Vec<Member> {
        tracing::debug!("generating constructors");
        let parameterless = Constructor {
            visibility: Visibility::Public,
            doc: self.comments.parameterless_constructor(),
            params: vec![],
            initializers: vec![],
            body: vec![Statement::comment(placeholder)],
        };

        let file_path = Constructor {
            visibility: Visibility::Public,
            doc: self.comments.file_path_constructor(),
            params: vec![Self::file_path_param()],
            initializers: vec![],
            body: vec![Statement::assign(
                self.this_property(),
                Expr::This.call(LOAD_METHOD, vec![Expr::var(FILE_PATH_PARAM)]),
            )],
        };

        let instance_param = self.descriptor.instance_parameter_name();
        let instance = Constructor {
            visibility: Visibility::Public,
            doc: self.comments.instance_constructor(),
            params: vec![Param::new(&instance_param, self.wrapped.clone())],
            initializers: vec![],
            body: vec![Statement::assign(
                self.this_property(),
                Expr::var(instance_param),
            )],
        };

        vec![
            Member::Constructor(parameterless),
            Member::Constructor(file_path),
            Member::Constructor(instance),
        ]
    }

    fn forwarding_property(&self) -> Property {
        tracing::debug!(property = %self.descriptor.helper_property_name, "generating property");
        let accessors = match &self.descriptor.property_storage {
            PropertyStorage::Auto => Accessors::Auto,
            PropertyStorage::BackingField(field) => Accessors::Explicit {
                get: vec![Statement::Return(Some(Expr::This.prop(field)))],
                set: vec![Statement::assign(Expr::This.prop(field), Expr::SetterValue)],
            },
        };

        Property {
            visibility: Visibility::Public,
            doc: self.comments.property(),
            name: self.descriptor.helper_property_name.clone(),
            ty: self.wrapped.clone(),
            accessors,
        }
    }

    /// `XmlSerializer serializer = new XmlSerializer(typeof(Wrapped))`.
    fn declare_serializer(&self) -> Statement {
        let ty = TypeRef::Framework(FrameworkType::XmlSerializer);
        Statement::declare(
            ty.clone(),
            SERIALIZER_VAR,
            Expr::New {
                ty,
                args: vec![Expr::TypeOf(self.wrapped.clone())],
            },
        )
    }

    /// Wraps `body` so the stream is released on every exit path and any
    /// fault reaches the caller unchanged.
    fn guarded(body: Block) -> Statement {
        let stream = Expr::var(STREAM_VAR);
        Statement::Try {
            body,
            catches: vec![CatchClause {
                exception: TypeRef::Framework(FrameworkType::Exception),
                binding: None,
                body: vec![Statement::Rethrow],
            }],
            finally: vec![Statement::If {
                condition: stream.clone().not_identical(Expr::Null),
                then: vec![Statement::Expr(stream.call("Dispose", vec![]))],
                otherwise: vec![],
            }],
        }
    }

    fn declare_stream() -> Statement {
        Statement::declare(
            TypeRef::Framework(FrameworkType::Stream),
            STREAM_VAR,
            Expr::Null,
        )
    }

    fn load_method(&self) -> Method {
        tracing::debug!("generating {}", LOAD_METHOD);
        let file = Expr::framework(FrameworkType::File);
        let try_body = vec![
            Statement::assign(
                Expr::var(STREAM_VAR),
                file.call("OpenRead", vec![Expr::var(FILE_PATH_PARAM)]),
            ),
            self.declare_serializer(),
            Statement::assign(
                Expr::var(RESULT_VAR),
                Expr::var(SERIALIZER_VAR)
                    .call("Deserialize", vec![Expr::var(STREAM_VAR)])
                    .cast(self.wrapped.clone()),
            ),
        ];

        Method {
            visibility: Visibility::Public,
            doc: self.comments.load_method(),
            name: LOAD_METHOD.to_string(),
            params: vec![Self::file_path_param()],
            returns: self.wrapped.clone(),
            body: vec![
                Statement::declare(self.wrapped.clone(), RESULT_VAR, Expr::Null),
                Self::declare_stream(),
                Self::guarded(try_body),
                Statement::Return(Some(Expr::var(RESULT_VAR))),
            ],
        }
    }

    fn save_method(&self) -> Method {
        tracing::debug!("generating {}", SAVE_METHOD);
        let directory_name = Expr::New {
            ty: TypeRef::Framework(FrameworkType::FileInfo),
            args: vec![Expr::var(FILE_PATH_PARAM)],
        }
        .prop("DirectoryName");

        let try_body = vec![
            Statement::Expr(
                Expr::framework(FrameworkType::Directory)
                    .call("CreateDirectory", vec![directory_name]),
            ),
            Statement::assign(
                Expr::var(STREAM_VAR),
                Expr::framework(FrameworkType::File)
                    .call("Create", vec![Expr::var(FILE_PATH_PARAM)]),
            ),
            self.declare_serializer(),
            Statement::Expr(Expr::var(SERIALIZER_VAR).call(
                "Serialize",
                vec![Expr::var(STREAM_VAR), self.this_property()],
            )),
            Statement::Expr(Expr::var(STREAM_VAR).call("Flush", vec![])),
        ];

        Method {
            visibility: Visibility::Public,
            doc: self.comments.save_method(),
            name: SAVE_METHOD.to_string(),
            params: vec![Self::file_path_param()],
            returns: TypeRef::Void,
            body: vec![Self::declare_stream(), Self::guarded(try_body)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsdhelper_model::BinaryOp;

    fn invoice() -> TopLevelClassDescriptor {
        TopLevelClassDescriptor::new("Invoice", "InvoiceData", "schemas/Invoice.xsd")
            .with_namespace("Billing")
    }

    fn build(d: &TopLevelClassDescriptor) -> ClassModel {
        ClassModelBuilder::default()
            .build(d)
            .expect("Failed to build model")
    }

    /// Asserts the try statement follows the rethrow + conditional-release
    /// shape and returns its protected body.
    fn assert_guarded(statement: &Statement) -> &Block {
        let Statement::Try {
            body,
            catches,
            finally,
        } = statement
        else {
            panic!("expected try statement, got {statement:?}");
        };
        assert_eq!(catches.len(), 1);
        assert_eq!(
            catches[0].exception,
            TypeRef::Framework(FrameworkType::Exception)
        );
        assert_eq!(catches[0].body, vec![Statement::Rethrow]);

        assert_eq!(finally.len(), 1);
        let Statement::If {
            condition,
            then,
            otherwise,
        } = &finally[0]
        else {
            panic!("expected conditional release");
        };
        assert!(matches!(
            condition,
            Expr::Binary {
                op: BinaryOp::IdentityInequality,
                ..
            }
        ));
        assert_eq!(
            then,
            &vec![Statement::Expr(
                Expr::var(STREAM_VAR).call("Dispose", vec![])
            )]
        );
        assert!(otherwise.is_empty());
        body
    }

    #[test]
    fn test_build_is_deterministic() {
        let d = invoice();
        assert_eq!(build(&d), build(&d));
    }

    #[test]
    fn test_model_completeness() {
        let model = build(&invoice());
        let class = model.class();

        assert_eq!(model.imports, IMPORTS.to_vec());
        assert_eq!(class.constructors().count(), 3);
        assert_eq!(class.properties().count(), 1);
        assert_eq!(class.methods().count(), 2);
        assert_eq!(class.members().count(), 6);
        assert!(class.is_partial);
        assert_eq!(class.name, "Invoice_HelperClass");
        assert_eq!(model.namespace.name, "Billing");
    }

    #[test]
    fn test_naming_contract() {
        let model = build(&invoice());
        let class = model.class();

        let names: Vec<_> = class.members().filter_map(Member::name).collect();
        assert_eq!(names, vec!["InvoiceData", "LoadXmlFile", "SaveXMLFile"]);

        let ctor = class.constructors().nth(2).unwrap();
        assert_eq!(ctor.params, vec![Param::new("invoiceData", TypeRef::named("Invoice"))]);
        assert_eq!(class.property("InvoiceData").unwrap().ty, TypeRef::named("Invoice"));
    }

    #[test]
    fn test_region_order_and_labels() {
        let config = BuilderConfig::new()
            .constructors_region("Ctors")
            .properties_region("Props")
            .persistence_region("IO");
        let model = ClassModelBuilder::new(config).build(&invoice()).unwrap();
        let labels: Vec<_> = model
            .class()
            .regions
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Ctors", "Props", "IO"]);
    }

    #[test]
    fn test_constructor_bodies() {
        let model = build(&invoice());
        let ctors: Vec<_> = model.class().constructors().collect();

        assert!(ctors[0].params.is_empty());
        assert_eq!(
            ctors[0].body,
            vec![Statement::comment("TO DO: assign values for all the properties")]
        );

        assert_eq!(ctors[1].params, vec![Param::new("FilePath", TypeRef::String)]);
        assert_eq!(
            ctors[1].body,
            vec![Statement::assign(
                Expr::This.prop("InvoiceData"),
                Expr::This.call("LoadXmlFile", vec![Expr::var("FilePath")]),
            )]
        );

        assert_eq!(
            ctors[2].body,
            vec![Statement::assign(
                Expr::This.prop("InvoiceData"),
                Expr::var("invoiceData"),
            )]
        );
        assert!(ctors.iter().all(|c| c.initializers.is_empty()));
    }

    #[test]
    fn test_property_storage() {
        let model = build(&invoice());
        assert_eq!(
            model.class().property("InvoiceData").unwrap().accessors,
            Accessors::Auto
        );

        let d = invoice().with_storage(PropertyStorage::BackingField("invoiceDataField".into()));
        let model = build(&d);
        let Accessors::Explicit { get, set } =
            &model.class().property("InvoiceData").unwrap().accessors
        else {
            panic!("expected explicit accessors");
        };
        assert_eq!(
            get,
            &vec![Statement::Return(Some(Expr::This.prop("invoiceDataField")))]
        );
        assert_eq!(
            set,
            &vec![Statement::assign(
                Expr::This.prop("invoiceDataField"),
                Expr::SetterValue
            )]
        );
    }

    #[test]
    fn test_load_method_shape() {
        let model = build(&invoice());
        let load = model.class().method("LoadXmlFile").unwrap();

        assert_eq!(load.returns, TypeRef::named("Invoice"));
        assert_eq!(load.params, vec![Param::new("FilePath", TypeRef::String)]);
        assert_eq!(load.body.len(), 4);
        assert_eq!(
            load.body[0],
            Statement::declare(TypeRef::named("Invoice"), "retObj", Expr::Null)
        );
        assert_eq!(
            load.body[1],
            Statement::declare(
                TypeRef::Framework(FrameworkType::Stream),
                "streamObj",
                Expr::Null
            )
        );

        let body = assert_guarded(&load.body[2]);
        assert_eq!(body.len(), 3);
        assert!(matches!(
            &body[1],
            Statement::Declare { name, .. } if name == "serializer"
        ));
        assert!(matches!(
            &body[2],
            Statement::Assign { value: Expr::Cast { .. }, .. }
        ));

        assert_eq!(load.body[3], Statement::Return(Some(Expr::var("retObj"))));
    }

    #[test]
    fn test_save_method_shape() {
        let model = build(&invoice());
        let save = model.class().method("SaveXMLFile").unwrap();

        assert!(save.returns.is_void());
        assert_eq!(save.body.len(), 2);

        let body = assert_guarded(&save.body[1]);
        assert_eq!(body.len(), 5);
        assert!(matches!(
            &body[0],
            Statement::Expr(Expr::Invoke { method, .. }) if method == "CreateDirectory"
        ));
        assert_eq!(
            body[3],
            Statement::Expr(Expr::var("serializer").call(
                "Serialize",
                vec![Expr::var("streamObj"), Expr::This.prop("InvoiceData")]
            ))
        );
        assert_eq!(
            body[4],
            Statement::Expr(Expr::var("streamObj").call("Flush", vec![]))
        );
    }

    #[test]
    fn test_every_member_documented() {
        let model = build(&invoice());
        assert!(!model.class().doc.summary.is_empty());
        for member in model.class().members() {
            assert!(!member.doc().summary.is_empty());
        }
    }

    #[test]
    fn test_invalid_descriptor_fails_fast() {
        let mut d = invoice();
        d.helper_property_name = String::new();
        let err = ClassModelBuilder::default().build(&d).unwrap_err();
        assert_eq!(err, InvalidDescriptorError::missing("helper_property_name"));
    }

    #[test]
    fn test_banner_from_config() {
        let config = BuilderConfig::new().banner(["custom banner"]);
        let model = ClassModelBuilder::new(config).build(&invoice()).unwrap();
        assert_eq!(model.banner, vec!["custom banner"]);
    }
}
