//! Indented line writer shared by the renderers.

/// Accumulates source text line by line at a tracked indentation level.
#[derive(Debug)]
pub struct CodeWriter {
    out: String,
    unit: String,
    level: usize,
}

impl CodeWriter {
    /// Creates a writer that indents with `unit`.
    #[must_use]
    pub fn new(unit: &str) -> Self {
        Self {
            out: String::new(),
            unit: unit.to_string(),
            level: 0,
        }
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str(&self.unit);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Increases indentation by one level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases indentation by one level.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = CodeWriter::new("  ");
        w.line("a");
        w.indent();
        w.line("b");
        w.blank();
        w.indent();
        w.line("c");
        w.dedent();
        w.dedent();
        w.dedent();
        w.line("d");
        assert_eq!(w.finish(), "a\n  b\n\n    c\nd\n");
    }

    #[test]
    fn test_empty_line_has_no_trailing_whitespace() {
        let mut w = CodeWriter::new("    ");
        w.indent();
        w.line("");
        assert_eq!(w.finish(), "\n");
    }
}
