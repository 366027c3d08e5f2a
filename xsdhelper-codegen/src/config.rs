//! Generation settings.
//!
//! Banner text, region labels and layout are passed in explicitly so that
//! tests and callers can vary them.

/// Default generator name used in the banner and `remarks` tags.
pub const DEFAULT_GENERATOR_NAME: &str = "xsdhelper";

/// Settings for the class model builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    generator_name: String,
    banner: Option<Vec<String>>,
    constructors_region: String,
    properties_region: String,
    persistence_region: String,
    placeholder_comment: String,
}

impl BuilderConfig {
    /// Creates a builder configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator_name: DEFAULT_GENERATOR_NAME.to_string(),
            banner: None,
            constructors_region: "Constructors".to_string(),
            properties_region: "Properties".to_string(),
            persistence_region: "Saving & Loading XML Files".to_string(),
            placeholder_comment: "TO DO: assign values for all the properties".to_string(),
        }
    }

    /// Sets the generator name.
    #[must_use]
    pub fn generator_name(mut self, name: impl Into<String>) -> Self {
        self.generator_name = name.into();
        self
    }

    /// Replaces the file banner.
    #[must_use]
    pub fn banner<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banner = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the constructors region label.
    #[must_use]
    pub fn constructors_region(mut self, label: impl Into<String>) -> Self {
        self.constructors_region = label.into();
        self
    }

    /// Sets the properties region label.
    #[must_use]
    pub fn properties_region(mut self, label: impl Into<String>) -> Self {
        self.properties_region = label.into();
        self
    }

    /// Sets the load/save region label.
    #[must_use]
    pub fn persistence_region(mut self, label: impl Into<String>) -> Self {
        self.persistence_region = label.into();
        self
    }

    /// Sets the comment placed in the parameterless constructor.
    #[must_use]
    pub fn placeholder_comment(mut self, text: impl Into<String>) -> Self {
        self.placeholder_comment = text.into();
        self
    }

    /// Returns the generator name.
    #[must_use]
    pub fn get_generator_name(&self) -> &str {
        &self.generator_name
    }

    /// Returns the constructors region label.
    #[must_use]
    pub fn get_constructors_region(&self) -> &str {
        &self.constructors_region
    }

    /// Returns the properties region label.
    #[must_use]
    pub fn get_properties_region(&self) -> &str {
        &self.properties_region
    }

    /// Returns the load/save region label.
    #[must_use]
    pub fn get_persistence_region(&self) -> &str {
        &self.persistence_region
    }

    /// Returns the placeholder comment.
    #[must_use]
    pub fn get_placeholder_comment(&self) -> &str {
        &self.placeholder_comment
    }

    /// Banner lines, either the custom banner or the standard one.
    #[must_use]
    pub fn banner_lines(&self) -> Vec<String> {
        if let Some(lines) = &self.banner {
            return lines.clone();
        }
        let rule = "-".repeat(78);
        vec![
            rule.clone(),
            "<auto-generated>".to_string(),
            format!("   This code was generated by {}.", self.generator_name),
            "   This file is only generated if it is missing, so it is safe to modify this file as needed.".to_string(),
            "   If the file is renamed or deleted, then it will be regenerated the next time the generator is run.".to_string(),
            "   The base file contains the LoadXmlFile(string), SaveXMLFile(string) methods, several constructors,".to_string(),
            "   and several properties to work with the class file generated from the schema.".to_string(),
            "</auto-generated>".to_string(),
            rule,
        ]
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the source renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    indent: String,
    regions: bool,
}

impl RenderConfig {
    /// Creates a render configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
            regions: true,
        }
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn indent(mut self, unit: impl Into<String>) -> Self {
        self.indent = unit.into();
        self
    }

    /// Enables or disables region markers.
    #[must_use]
    pub fn regions(mut self, enabled: bool) -> Self {
        self.regions = enabled;
        self
    }

    /// Returns the indentation unit.
    #[must_use]
    pub fn get_indent(&self) -> &str {
        &self.indent
    }

    /// Returns whether region markers are emitted.
    #[must_use]
    pub const fn emits_regions(&self) -> bool {
        self.regions
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder and renderer settings for a whole generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Builder settings.
    pub builder: BuilderConfig,
    /// Renderer settings.
    pub render: RenderConfig,
}
