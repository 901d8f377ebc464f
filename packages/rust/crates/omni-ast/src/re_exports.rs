//! Re-exports from ast-grep (Unified ast-grep v0.40.5)
//!
//! This module provides unified access to ast-grep-core, ast-grep-config and
//! ast-grep-language types, ensuring consistent version usage across the
//! project.

// ============================================================================
// Re-exports (Unified ast-grep version)
// ============================================================================

// Rule compilation
pub use ast_grep_config::{DeserializeEnv, RuleCore, SerializableRuleCore};

// Core tree types
pub use ast_grep_core::AstGrep;
pub use ast_grep_core::Doc;
pub use ast_grep_core::Language as AstLanguage;
pub use ast_grep_core::Node;
pub use ast_grep_core::matcher::{Matcher, MatcherExt};
pub use ast_grep_core::tree_sitter::StrDoc;

// Language support
pub use ast_grep_language::LanguageExt;
pub use ast_grep_language::SupportLang;

/// Parsed document type produced by every supported grammar.
pub type SgDoc = StrDoc<SupportLang>;

/// Owned syntax tree for one source file.
pub type SgRoot = AstGrep<SgDoc>;

/// Borrowed node handle into an [`SgRoot`].
pub type SgNode<'r> = Node<'r, SgDoc>;
