//! Turn model text into a comment that fits its place in the file.

use omni_ast::NodeSpan;

use crate::languages::DocLanguage;

/// A rendered, indented comment block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedComment {
    text: String,
    indent: String,
}

impl SynthesizedComment {
    /// The comment block. Continuation lines carry the anchor's indentation;
    /// the first line carries none.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Indentation of the anchor the comment was synthesized for.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// The block followed by a newline and the anchor indentation, ready to
    /// be inserted at the anchor's start.
    #[must_use]
    pub fn as_prefix(&self) -> String {
        format!("{}\n{}", self.text, self.indent)
    }
}

/// Render `raw` with `adapter` and align it to `anchor`.
#[must_use]
pub fn synthesize(adapter: &dyn DocLanguage, raw: &str, anchor: &NodeSpan) -> SynthesizedComment {
    let rendered = adapter.render_comment(raw);
    SynthesizedComment {
        text: indent_continuation(&rendered, &anchor.indent),
        indent: anchor.indent.clone(),
    }
}

/// Prefix every non-blank continuation line with exactly `indent`.
///
/// Adapters render without indentation (re-rendering strips what a previous
/// pass added), so the result is the same whether `text` came straight from
/// the model or from an earlier synthesis.
fn indent_continuation(text: &str, indent: &str) -> String {
    let text = text.trim_end();
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().trim_start();

    let mut out = String::with_capacity(text.len());
    out.push_str(first);
    for line in lines {
        out.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        out.push_str(indent);
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::{CSharpDocs, PythonDocs, TypeScriptDocs};

    fn anchor(source: &str, needle: &str) -> NodeSpan {
        let start = source.find(needle).unwrap();
        NodeSpan::at(source, "declaration", start..start + needle.len())
    }

    #[test]
    fn test_column_zero_anchor() {
        let source = "function add(a, b) { return a + b }\n";
        let comment = synthesize(&TypeScriptDocs, "Adds.", &anchor(source, "function"));
        assert_eq!(comment.text(), "/**\n * Adds.\n */");
        assert_eq!(comment.as_prefix(), "/**\n * Adds.\n */\n");
    }

    #[test]
    fn test_nested_anchor_is_reindented() {
        let source = "class A {\n    run() {}\n}\n";
        let comment = synthesize(&TypeScriptDocs, "Runs.\n\nTwice.", &anchor(source, "run()"));
        assert_eq!(comment.text(), "/**\n     * Runs.\n     *\n     * Twice.\n     */");
        assert_eq!(comment.indent(), "    ");
        assert!(comment.as_prefix().ends_with("*/\n    "));
    }

    #[test]
    fn test_reindent_is_idempotent() {
        let source = "class A:\n    def f(self):\n        return 1\n";
        let span = anchor(source, "return 1");
        let once = synthesize(&PythonDocs, "Returns one.\n\nReturns:\n    int: one", &span);
        let twice = synthesize(&PythonDocs, once.text(), &span);
        assert_eq!(once, twice);
        assert_eq!(
            once.text(),
            "\"\"\"Returns one.\n\n        Returns:\n            int: one\n        \"\"\""
        );
    }

    #[test]
    fn test_narrow_indents_are_exact() {
        let one = "class A {\n run() {}\n}\n";
        let comment = synthesize(&TypeScriptDocs, "Line one.", &anchor(one, "run()"));
        assert_eq!(comment.text(), "/**\n  * Line one.\n  */");
        assert_eq!(synthesize(&TypeScriptDocs, comment.text(), &anchor(one, "run()")), comment);

        let two = "class A {\n  run() {}\n}\n";
        let comment = synthesize(&TypeScriptDocs, "Line one.", &anchor(two, "run()"));
        assert_eq!(comment.text(), "/**\n   * Line one.\n   */");
        assert_eq!(comment.as_prefix(), "/**\n   * Line one.\n   */\n  ");

        let csharp = "class A\n{\n void M() {}\n}\n";
        let comment = synthesize(&CSharpDocs, "<summary>\nM.\n</summary>", &anchor(csharp, "void"));
        assert_eq!(comment.text(), "/// <summary>\n /// M.\n /// </summary>");
    }

    #[test]
    fn test_tabs_are_kept() {
        let source = "class A\n{\n\tvoid M() {}\n}\n";
        let comment = synthesize(&CSharpDocs, "<summary>\nM.\n</summary>", &anchor(source, "void"));
        assert_eq!(
            comment.text(),
            "/// <summary>\n\t/// M.\n\t/// </summary>"
        );
    }

    #[test]
    fn test_trailing_blank_lines_removed() {
        assert_eq!(indent_continuation("a\nb\n\n\n", "  "), "a\n  b");
    }
}
