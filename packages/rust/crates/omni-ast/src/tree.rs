//! Parsed source files.
//!
//! `SourceTree` owns the ast-grep tree for one file and answers rule queries
//! in document order.

use crate::error::AstError;
use crate::lang::Lang;
use crate::re_exports::{LanguageExt, MatcherExt, SgNode, SgRoot};
use crate::rule::Rule;
use crate::span::NodeSpan;

/// A parsed source file.
pub struct SourceTree {
    lang: Lang,
    source: String,
    grep: SgRoot,
}

impl SourceTree {
    /// Parse `source` with the grammar for `lang`.
    #[must_use]
    pub fn parse(lang: Lang, source: impl Into<String>) -> Self {
        let source = source.into();
        let grep = lang.support_lang().ast_grep(&source);
        Self { lang, source, grep }
    }

    /// Grammar used to parse this file.
    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Full file text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whole-file node.
    #[must_use]
    pub fn root(&self) -> SgNode<'_> {
        self.grep.root()
    }

    /// All nodes matching `rule`, in document (pre-order) order.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::InvalidRule`] if the rule does not compile for
    /// this tree's grammar.
    pub fn search(&self, rule: &Rule) -> Result<Vec<SgNode<'_>>, AstError> {
        let Some(matcher) = rule.compile(self.lang)? else {
            tracing::trace!(lang = self.lang.as_str(), "rule cannot match this grammar");
            return Ok(Vec::new());
        };
        let root = self.root();
        let found: Vec<SgNode<'_>> = root
            .dfs()
            .filter(|node| matcher.match_node(node.clone()).is_some())
            .collect();
        tracing::trace!(lang = self.lang.as_str(), matches = found.len(), "rule search");
        Ok(found)
    }

    /// All nodes of syntax kind `kind`, in document order.
    #[must_use]
    pub fn nodes_of_kind(&self, kind: &str) -> Vec<SgNode<'_>> {
        self.root().dfs().filter(|node| node.kind() == kind).collect()
    }

    /// Owned snapshot of `node` with line/column information.
    #[must_use]
    pub fn span(&self, node: &SgNode<'_>) -> NodeSpan {
        NodeSpan::from_node(node, &self.source)
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("lang", &self.lang)
            .field("len", &self.source.len())
            .finish_non_exhaustive()
    }
}
