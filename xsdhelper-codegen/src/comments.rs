//! Documentation comments for generated members.
//!
//! Every comment is derived from descriptor names alone. Interpolated text
//! is XML-escaped because the renderers emit it inside doc tags.

use quick_xml::escape::partial_escape;
use xsdhelper_model::naming::FILE_PATH_PARAM;
use xsdhelper_model::{DocComment, TopLevelClassDescriptor};

/// Builds doc comments for one descriptor.
pub struct CommentWriter<'a> {
    descriptor: &'a TopLevelClassDescriptor,
    helper_class: &'a str,
    generator_name: &'a str,
}

impl<'a> CommentWriter<'a> {
    /// Creates a comment writer.
    #[must_use]
    pub fn new(
        descriptor: &'a TopLevelClassDescriptor,
        helper_class: &'a str,
        generator_name: &'a str,
    ) -> Self {
        Self {
            descriptor,
            helper_class,
            generator_name,
        }
    }

    fn type_ref(&self) -> String {
        format!("<typeparamref name=\"{}\"/>", self.descriptor.class_name)
    }

    fn generated_by(&self) -> String {
        format!(
            "This code was generated by {}.",
            partial_escape(self.generator_name)
        )
    }

    /// Class summary.
    #[must_use]
    pub fn class(&self) -> DocComment {
        DocComment::summary(format!(
            "Helper class to ease working with {} autogenerated {}",
            partial_escape(&self.descriptor.input_file_name()),
            self.descriptor.kind.as_str()
        ))
    }

    /// Parameterless constructor.
    #[must_use]
    pub fn parameterless_constructor(&self) -> DocComment {
        DocComment::summary(format!(
            "Construct a new instance of the {} object.",
            self.helper_class
        ))
    }

    /// File path constructor.
    #[must_use]
    pub fn file_path_constructor(&self) -> DocComment {
        DocComment::summary(format!(
            "Construct a new instance of the {} object by Deserializing an XML file.",
            self.helper_class
        ))
        .param(FILE_PATH_PARAM, "This XML file to read into the class object")
    }

    /// Wrap-existing-instance constructor.
    #[must_use]
    pub fn instance_constructor(&self) -> DocComment {
        DocComment::summary(format!(
            "Construct a new instance of the {} object from an existing {} object.",
            self.helper_class,
            self.type_ref()
        ))
        .param(
            self.descriptor.instance_parameter_name(),
            format!("A pre-existing {} object.", self.type_ref()),
        )
    }

    /// Forwarding property.
    #[must_use]
    pub fn property(&self) -> DocComment {
        DocComment::summary(format!(
            "The {} object wrapped by this helper.",
            self.type_ref()
        ))
    }

    /// Load method.
    #[must_use]
    pub fn load_method(&self) -> DocComment {
        DocComment::summary(format!(
            "Load a file path and produce a Deserialized {} Object",
            self.type_ref()
        ))
        .param(FILE_PATH_PARAM, "This XML file to read into the class object")
        .returns(format!("A new {} object", self.type_ref()))
        .remarks(self.generated_by())
    }

    /// Save method.
    #[must_use]
    pub fn save_method(&self) -> DocComment {
        DocComment::summary(format!(
            "This method will take the {} object, create an XML serializer for it, \
             and write the XML to the <paramref name=\"{}\"/>",
            self.descriptor.class_name, FILE_PATH_PARAM
        ))
        .param(FILE_PATH_PARAM, "Destination file path to save the file into.")
        .remarks(self.generated_by())
    }
}
