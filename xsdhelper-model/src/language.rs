//! Supported output languages.

use std::fmt;

/// Target language of the rendered helper class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetLanguage {
    /// C#.
    #[default]
    CSharp,
    /// Visual Basic .NET.
    VisualBasic,
}

impl TargetLanguage {
    /// All supported languages.
    pub const ALL: [Self; 2] = [Self::CSharp, Self::VisualBasic];

    /// Returns the output file extension, including the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::CSharp => ".cs",
            Self::VisualBasic => ".vb",
        }
    }

    /// Resolves an output-file-extension hint.
    ///
    /// The leading dot is optional and the comparison ignores case, so
    /// `".cs"`, `"cs"` and `"CS"` all select C#.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        Self::ALL
            .into_iter()
            .find(|lang| lang.extension()[1..].eq_ignore_ascii_case(ext))
    }

    /// Human-readable language name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CSharp => "C#",
            Self::VisualBasic => "Visual Basic",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
