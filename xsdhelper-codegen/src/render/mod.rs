//! Source renderers.
//!
//! One [`SourceRenderer`] per target language turns a [`ClassModel`] into
//! text. Renderers keep member order exactly as built, place doc comments
//! directly above their member and wrap each region in the target's region
//! markers when enabled.

pub mod csharp;
pub mod vb;
pub mod writer;

pub use csharp::CSharpRenderer;
pub use vb::VisualBasicRenderer;
pub use writer::CodeWriter;

use crate::config::RenderConfig;
use xsdhelper_model::{ClassModel, TargetLanguage};

/// Renders a class model to source text for one target language.
pub trait SourceRenderer: Send + Sync {
    /// Target language of this renderer.
    fn language(&self) -> TargetLanguage;

    /// Renders the whole file.
    fn render(&self, model: &ClassModel) -> String;
}

/// Returns the renderer for `language`.
#[must_use]
pub fn renderer_for(language: TargetLanguage, config: RenderConfig) -> Box<dyn SourceRenderer> {
    match language {
        TargetLanguage::CSharp => Box::new(CSharpRenderer::new(config)),
        TargetLanguage::VisualBasic => Box::new(VisualBasicRenderer::new(config)),
    }
}
