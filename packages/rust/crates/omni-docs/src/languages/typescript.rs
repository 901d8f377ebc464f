//! TypeScript, TSX and JavaScript: JSDoc/TSDoc blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use omni_ast::{Rule, SgNode, StopBy};

use super::{COMMENT_KIND, DocLanguage, preceding_comments, requested_kinds, strip_code_fences};
use crate::entity::{EntityKind, EntityKinds};

/// Top-level declarations, matched bare or wrapped by `export_statement`.
const DECLARATIONS: &[(&str, EntityKind)] = &[
    ("function_declaration", EntityKind::Function),
    ("generator_function_declaration", EntityKind::Function),
    ("class_declaration", EntityKind::Class),
    ("abstract_class_declaration", EntityKind::Class),
    ("interface_declaration", EntityKind::Interface),
    ("type_alias_declaration", EntityKind::Type),
    ("lexical_declaration", EntityKind::Variable),
    ("variable_declaration", EntityKind::Variable),
    ("enum_declaration", EntityKind::Enum),
];

/// Class members.
const MEMBERS: &[(&str, EntityKind)] = &[
    ("public_field_definition", EntityKind::Property),
    ("field_definition", EntityKind::Property),
    ("method_definition", EntityKind::Method),
    ("abstract_method_signature", EntityKind::Method),
];

static JSDOC_BLOCK: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?s)\A/\*\*.*\*/\z").ok());

/// Adapter for the TypeScript family of grammars.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptDocs;

impl DocLanguage for TypeScriptDocs {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn fence(&self) -> &'static str {
        "ts"
    }

    fn style_guide(&self) -> &'static str {
        "Write a TSDoc comment: a one-sentence summary, then details only if \
         they help a caller. Use @param and @returns where they add information. \
         Do not state TypeScript types; they are already in the signature. \
         Do not describe the implementation line by line."
    }

    fn build_match_rule(
        &self,
        kinds: &EntityKinds,
        exports_only: bool,
        with_existing_doc: bool,
    ) -> Rule {
        let declarations = requested_kinds(DECLARATIONS, kinds);
        let members = requested_kinds(MEMBERS, kinds);
        let in_program = || Rule::inside(Rule::kind("program"), StopBy::Neighbor);

        let exported = Rule::all([
            Rule::kind("export_statement"),
            Rule::has(Rule::any_kind(declarations.clone()), StopBy::Neighbor),
            in_program(),
        ]);
        let mut member = vec![
            Rule::any_kind(members),
            Rule::inside(Rule::kind("class_body"), StopBy::Neighbor),
        ];
        if exports_only {
            member.push(Rule::inside(Rule::kind("export_statement"), StopBy::End));
        }

        let mut targets = Vec::with_capacity(3);
        if !exports_only {
            targets.push(Rule::all([Rule::any_kind(declarations), in_program()]));
        }
        targets.push(exported);
        targets.push(Rule::all(member));

        let documented = Rule::follows(Rule::kind(COMMENT_KIND), StopBy::Neighbor);
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
        preceding_comments(declaration, Some(1), |_| true)
    }

    fn find_insertion_point<'r>(&self, declaration: &SgNode<'r>) -> Option<SgNode<'r>> {
        Some(declaration.clone())
    }

    fn render_comment(&self, raw: &str) -> String {
        let text = strip_code_fences(raw);
        if JSDOC_BLOCK.as_ref().is_some_and(|re| re.is_match(&text)) {
            return realign_block(&text);
        }

        let text = text.replace("*/", "*\\/");
        let mut out = String::from("/**\n");
        for line in text.lines().map(str::trim_end) {
            if line.is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(" * ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(" */");
        out
    }
}

/// Continuation lines of an existing block at column 0: ` * text`, ` */`.
fn realign_block(block: &str) -> String {
    let mut lines = block.lines();
    let mut out = lines.next().unwrap_or_default().trim().to_string();
    for line in lines {
        let line = line.trim();
        out.push('\n');
        if line.starts_with('*') {
            out.push(' ');
            out.push_str(line);
        } else if line.is_empty() {
            out.push_str(" *");
        } else {
            out.push_str(" * ");
            out.push_str(line);
        }
    }
    out
}
