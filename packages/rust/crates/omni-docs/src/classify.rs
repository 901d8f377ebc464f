//! Human labels for matched declarations.

use std::fmt;

use omni_ast::SgNode;

/// Concrete declaration kinds in lookup order, with their prompt labels.
const PRIORITY: &[(&str, &str)] = &[
    ("function_declaration", "function"),
    ("generator_function_declaration", "function"),
    ("function_definition", "function"),
    ("class_declaration", "class"),
    ("abstract_class_declaration", "class"),
    ("class_definition", "class"),
    ("record_declaration", "record"),
    ("struct_declaration", "struct"),
    ("interface_declaration", "interface"),
    ("type_alias_declaration", "type alias"),
    ("enum_declaration", "enum"),
    ("delegate_declaration", "delegate"),
    ("namespace_declaration", "namespace"),
    ("file_scoped_namespace_declaration", "namespace"),
    ("method_definition", "method"),
    ("abstract_method_signature", "method"),
    ("method_declaration", "method"),
    ("constructor_declaration", "constructor"),
    ("operator_declaration", "operator"),
    ("public_field_definition", "property"),
    ("field_definition", "property"),
    ("field_declaration", "property"),
    ("property_declaration", "property"),
    ("indexer_declaration", "indexer"),
    ("event_declaration", "event"),
    ("event_field_declaration", "event"),
    ("lexical_declaration", "variable"),
    ("variable_declaration", "variable"),
];

/// Label used when no concrete kind is found.
pub const FALLBACK_LABEL: &str = "declaration";

/// A matched node resolved to its concrete declaration.
#[derive(Clone)]
pub struct Declaration<'r> {
    /// The concrete declaration, or the matched node itself.
    pub node: SgNode<'r>,
    /// Prompt label such as `method` or `type alias`.
    pub label: &'static str,
}

impl fmt::Debug for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("kind", &self.node.kind())
            .field("range", &self.node.range())
            .field("label", &self.label)
            .finish()
    }
}

/// Resolve a matched node (possibly a wrapper such as `export_statement`)
/// to the declaration it carries.
///
/// Only the node itself and its direct children are inspected, so a class
/// is never mistaken for a function it happens to contain.
#[must_use]
pub fn classify_declaration<'r>(node: &SgNode<'r>) -> Declaration<'r> {
    let candidates: Vec<SgNode<'r>> = std::iter::once(node.clone())
        .chain(node.children().filter(|child| child.is_named()))
        .collect();

    for (kind, label) in PRIORITY {
        if let Some(found) = candidates.iter().find(|candidate| candidate.kind() == *kind) {
            let label = if *label == "function" && is_python_method(found) {
                "method"
            } else {
                *label
            };
            return Declaration {
                node: found.clone(),
                label,
            };
        }
    }

    Declaration {
        node: node.clone(),
        label: FALLBACK_LABEL,
    }
}

fn is_python_method(node: &SgNode<'_>) -> bool {
    if node.kind() != "function_definition" {
        return false;
    }
    let mut parent = node.parent();
    if parent.as_ref().is_some_and(|p| p.kind() == "decorated_definition") {
        parent = parent.and_then(|p| p.parent());
    }
    parent.is_some_and(|block| {
        block.kind() == "block" && block.parent().is_some_and(|p| p.kind() == "class_definition")
    })
}
