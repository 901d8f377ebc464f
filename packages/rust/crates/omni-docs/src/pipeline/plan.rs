//! Synchronous planning: query a parsed file once and keep owned snapshots,
//! so the model calls that follow never hold a borrow of the tree.

use omni_ast::{NodeSpan, Rule, SourceTree};

use crate::classify::classify_declaration;
use crate::error::DocsError;
use crate::languages::DocLanguage;
use crate::stats::Mode;

/// Everything the pipeline needs about one matched declaration.
#[derive(Debug, Clone)]
pub struct PlannedDeclaration {
    /// The matched node (for TS possibly an `export_statement`).
    pub matched: NodeSpan,
    /// The concrete declaration inside it.
    pub declaration: NodeSpan,
    /// Classifier label.
    pub label: &'static str,
    /// Existing comment nodes, oldest first (update pass only).
    pub comments: Vec<NodeSpan>,
    /// Where the comment is placed: the insertion point for new comments,
    /// the first existing comment for updates.
    pub anchor: NodeSpan,
}

/// Plan every match of `rule` in source order.
///
/// Matches without an insertion point or, in the update pass, without a
/// locatable comment are skipped.
///
/// # Errors
/// Returns `DocsError::Ast` if `rule` does not compile for the tree's grammar.
pub fn plan_declarations(
    adapter: &dyn DocLanguage,
    tree: &SourceTree,
    rule: &Rule,
    mode: Mode,
) -> Result<Vec<PlannedDeclaration>, DocsError> {
    let mut planned = Vec::new();
    for node in tree.search(rule)? {
        let declaration = classify_declaration(&node);
        let matched = tree.span(&node);

        let (comments, anchor) = match mode {
            Mode::Missing => {
                let Some(point) = adapter.find_insertion_point(&node) else {
                    tracing::debug!(
                        line = matched.line,
                        kind = %matched.kind,
                        "no insertion point; skipping"
                    );
                    continue;
                };
                (Vec::new(), tree.span(&point))
            }
            Mode::Update => {
                let comments: Vec<NodeSpan> = adapter
                    .find_existing_comment_nodes(&node)
                    .iter()
                    .map(|comment| tree.span(comment))
                    .collect();
                let Some(first) = comments.first().cloned() else {
                    tracing::warn!(
                        line = matched.line,
                        kind = %matched.kind,
                        "documented declaration has no locatable comment; skipping"
                    );
                    continue;
                };
                (comments, first)
            }
        };

        planned.push(PlannedDeclaration {
            declaration: tree.span(&declaration.node),
            label: declaration.label,
            matched,
            comments,
            anchor,
        });
    }
    Ok(planned)
}
