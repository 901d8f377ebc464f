//! C#: `///` XML documentation lines.

use omni_ast::{Rule, SgNode, StopBy};

use super::{COMMENT_KIND, DocLanguage, preceding_comments, requested_kinds, strip_code_fences};
use crate::entity::{EntityKind, EntityKinds};

const DECLARATIONS: &[(&str, EntityKind)] = &[
    ("namespace_declaration", EntityKind::Namespace),
    ("file_scoped_namespace_declaration", EntityKind::Namespace),
    ("delegate_declaration", EntityKind::Delegate),
    ("struct_declaration", EntityKind::Struct),
    ("record_declaration", EntityKind::Class),
    ("class_declaration", EntityKind::Class),
    ("interface_declaration", EntityKind::Interface),
    ("enum_declaration", EntityKind::Enum),
    ("field_declaration", EntityKind::Property),
    ("event_declaration", EntityKind::Property),
    ("event_field_declaration", EntityKind::Property),
    ("property_declaration", EntityKind::Property),
    ("indexer_declaration", EntityKind::Property),
    ("method_declaration", EntityKind::Method),
    ("constructor_declaration", EntityKind::Method),
    ("operator_declaration", EntityKind::Method),
];

const CONTAINERS: [&str; 3] = [
    "compilation_unit",
    "declaration_list",
    "file_scoped_namespace_declaration",
];

const DOC_PREFIX: &str = "///";

/// Adapter for C#.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpDocs;

impl DocLanguage for CSharpDocs {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn fence(&self) -> &'static str {
        "csharp"
    }

    fn style_guide(&self) -> &'static str {
        "Write C# XML documentation: a <summary> element, plus <param>, \
         <typeparam>, <returns> and <exception> elements where they apply. \
         Keep the summary to one or two sentences."
    }

    fn build_match_rule(
        &self,
        kinds: &EntityKinds,
        exports_only: bool,
        with_existing_doc: bool,
    ) -> Rule {
        let mut target = vec![
            Rule::any_kind(requested_kinds(DECLARATIONS, kinds)),
            Rule::inside(Rule::any_kind(CONTAINERS), StopBy::Neighbor),
        ];
        if exports_only {
            target.push(Rule::has(
                Rule::all([Rule::kind("modifier"), Rule::text("public")]),
                StopBy::Neighbor,
            ));
        }

        let documented = Rule::follows(
            Rule::all([Rule::kind(COMMENT_KIND), Rule::regex(format!("^{DOC_PREFIX}"))]),
            StopBy::Neighbor,
        );
        Rule::all([
            Rule::all(target),
            if with_existing_doc {
                documented
            } else {
                Rule::not(documented)
            },
        ])
    }

    /// The `///` lines directly above the declaration. Plain `//` and block
    /// comments end the run and are never part of the documentation.
    fn find_existing_comment_nodes<'r>(&self, declaration: &SgNode<'r>) -> Vec<SgNode<'r>> {
        preceding_comments(declaration, None, |comment| {
            comment.text().starts_with(DOC_PREFIX)
        })
    }

    fn find_insertion_point<'r>(&self, declaration: &SgNode<'r>) -> Option<SgNode<'r>> {
        Some(declaration.clone())
    }

    fn render_comment(&self, raw: &str) -> String {
        strip_code_fences(raw)
            .lines()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    DOC_PREFIX.to_string()
                } else if trimmed.starts_with(DOC_PREFIX) {
                    line.trim_start().trim_end().to_string()
                } else {
                    format!("{DOC_PREFIX} {}", line.trim_end())
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
