//! Python: docstrings.
//!
//! Python documents a declaration from the inside: the docstring is the first
//! statement of the body block, so "has doc" is a property of the body rather
//! than of a preceding sibling, and new docstrings are inserted in front of
//! the body's first statement.

use omni_ast::{Rule, SgNode, StopBy};

use super::{COMMENT_KIND, DocLanguage, strip_code_fences};
use crate::entity::{EntityKind, EntityKinds};

const FUNCTION: &str = "function_definition";
const CLASS: &str = "class_definition";
const BLOCK: &str = "block";
const DOUBLE: &str = "\"\"\"";
const TRIPLE_QUOTES: [&str; 2] = [DOUBLE, "'''"];
const STRING_PREFIXES: [&str; 5] = ["", "r", "R", "u", "U"];

/// Adapter for Python.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonDocs;

/// Directly inside `container`, possibly through a `decorated_definition`.
fn placed_in(container: &Rule) -> Rule {
    Rule::any([
        Rule::inside(container.clone(), StopBy::Neighbor),
        Rule::inside(
            Rule::all([
                Rule::kind("decorated_definition"),
                Rule::inside(container.clone(), StopBy::Neighbor),
            ]),
            StopBy::Neighbor,
        ),
    ])
}

fn body_block<'r>(declaration: &SgNode<'r>) -> Option<SgNode<'r>> {
    declaration.children().find(|child| child.kind() == BLOCK)
}

impl DocLanguage for PythonDocs {
    fn name(&self) -> &'static str {
        "python"
    }

    fn fence(&self) -> &'static str {
        "python"
    }

    fn style_guide(&self) -> &'static str {
        "Write a PEP 257 docstring: a one-line summary ending with a period, \
         then, separated by a blank line, Args, Returns and Raises sections \
         where they apply. Do not include the surrounding triple quotes."
    }

    /// Module-level functions count as `function`, functions in a class body
    /// as `method`. There is no export marker, so `exports_only` is ignored.
    fn build_match_rule(
        &self,
        kinds: &EntityKinds,
        _exports_only: bool,
        with_existing_doc: bool,
    ) -> Rule {
        let module = Rule::kind("module");
        let class_body = Rule::all([
            Rule::kind(BLOCK),
            Rule::inside(Rule::kind(CLASS), StopBy::Neighbor),
        ]);

        let mut targets = Vec::new();
        if kinds.contains(&EntityKind::Function) {
            targets.push(Rule::all([Rule::kind(FUNCTION), placed_in(&module)]));
        }
        if kinds.contains(&EntityKind::Method) {
            targets.push(Rule::all([Rule::kind(FUNCTION), placed_in(&class_body)]));
        }
        if kinds.contains(&EntityKind::Class) {
            targets.push(Rule::all([
                Rule::kind(CLASS),
                placed_in(&Rule::any([module, class_body])),
            ]));
        }

        let documented = Rule::has(
            Rule::all([
                Rule::kind(BLOCK),
                Rule::has(
                    Rule::all([
                        Rule::kind("expression_statement"),
                        Rule::nth_child_of(1, Rule::not(Rule::kind(COMMENT_KIND))),
                        Rule::has(Rule::kind("string"), StopBy::Neighbor),
                    ]),
                    StopBy::Neighbor,
                ),
            ]),
            StopBy::Neighbor,
        );
        Rule::all([
            Rule::any(targets),
            if with_existing_doc {
                documented
            } else {
                Rule::not(documented)
            },
        ])
    }

    fn find_existing_comment_nodes<'r>(&self, declaration: &SgNode<'r>) -> Vec<SgNode<'r>> {
        let Some(block) = body_block(declaration) else {
            return Vec::new();
        };
        let Some(first) = block
            .children()
            .find(|child| child.is_named() && child.kind() != COMMENT_KIND)
        else {
            return Vec::new();
        };
        if first.kind() != "expression_statement" {
            return Vec::new();
        }
        first
            .children()
            .find(|child| child.kind() == "string")
            .into_iter()
            .collect()
    }

    /// The body block, unless it starts on the header line (`def f(): pass`),
    /// where no docstring line can be placed in front of it.
    fn find_insertion_point<'r>(&self, declaration: &SgNode<'r>) -> Option<SgNode<'r>> {
        let block = body_block(declaration)?;
        let offset = block.range().start.checked_sub(declaration.range().start)?;
        let text = declaration.text();
        if text.get(..offset).is_some_and(|header| header.contains('\n')) {
            Some(block)
        } else {
            None
        }
    }

    /// Replies already written as a string literal are unwrapped first:
    /// `'''` and `u`-prefixed literals become plain `"""` docstrings, raw
    /// literals stay raw only while their body needs the backslashes.
    /// Continuation lines lose their common indentation (PEP 257 trim).
    fn render_comment(&self, raw: &str) -> String {
        let text = strip_code_fences(raw);
        match split_docstring(&text) {
            Some((prefix, _, body))
                if prefix.eq_ignore_ascii_case("r")
                    && body.contains('\\')
                    && !body.contains(DOUBLE) =>
            {
                wrap("r", body)
            }
            Some((_, _, body)) => wrap("", body),
            None => wrap("", &text),
        }
    }
}

/// `(prefix, quote, body)` when `text` is exactly one triple-quoted literal.
fn split_docstring(text: &str) -> Option<(&'static str, &'static str, &str)> {
    STRING_PREFIXES.iter().find_map(|&prefix| {
        let rest = text.strip_prefix(prefix)?;
        TRIPLE_QUOTES.iter().find_map(|&quote| {
            let body = rest.strip_prefix(quote)?.strip_suffix(quote)?;
            (!body.contains(quote)).then_some((prefix, quote, body))
        })
    })
}

fn wrap(prefix: &str, text: &str) -> String {
    let body = dedent_continuation(text.trim());
    let mut body = if prefix.is_empty() {
        body.replace(DOUBLE, "\\\"\\\"\\\"")
    } else {
        body
    };
    if body.ends_with('"') || body.ends_with('\\') {
        body.push(' ');
    }
    if body.contains('\n') {
        format!("{prefix}{DOUBLE}{body}\n{DOUBLE}")
    } else {
        format!("{prefix}{DOUBLE}{body}{DOUBLE}")
    }
}

/// Strip the indentation shared by every non-blank line after the first.
fn dedent_continuation(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default();
    let rest: Vec<&str> = lines.collect();
    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = first.to_string();
    for line in rest {
        out.push('\n');
        out.push_str(line.get(margin..).unwrap_or(line.trim_start()).trim_end());
    }
    out
}
