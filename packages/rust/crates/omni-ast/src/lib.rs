//! omni-ast - Structural Matching using ast-grep
//!
//! This crate parses source files with ast-grep grammars and evaluates
//! declarative structural rules against them through `ast-grep-config`.
//!
//! ## Architecture
//!
//! ```text
//! omni-ast/src/
//! ├── lib.rs           # Re-exports (entry point)
//! ├── re_exports.rs    # ast-grep re-exports
//! ├── error.rs         # AstError enum (thiserror)
//! ├── lang.rs          # Lang enum and extension detection
//! ├── rule.rs          # Rule tree, lowered to ast-grep RuleCore
//! ├── tree.rs          # SourceTree: parse + search
//! └── span.rs          # NodeSpan owned snapshots
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use omni_ast::{Lang, Rule, SourceTree, StopBy};
//!
//! let tree = SourceTree::parse(Lang::Python, "def hello():\n    pass\n");
//! let rule = Rule::all([
//!     Rule::kind("function_definition"),
//!     Rule::inside(Rule::kind("module"), StopBy::Neighbor),
//! ]);
//! assert_eq!(tree.search(&rule).unwrap().len(), 1);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod lang;
mod re_exports;
mod rule;
mod span;
mod tree;

// ============================================================================
// Re-exports
// ============================================================================

pub use re_exports::*;

pub use error::AstError;
pub use lang::Lang;
pub use rule::{Relation, Rule, StopBy};
pub use span::NodeSpan;
pub use tree::SourceTree;
