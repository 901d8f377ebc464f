//! Declarative structural rules.
//!
//! A [`Rule`] is plain data: adapters build a tree of predicates once per file
//! and it is lowered into an ast-grep rule object (`kind`, `regex`, `all`,
//! `any`, `not`, `inside`, `has`, `follows`, `nthChild`), which
//! `ast-grep-config` compiles into a [`RuleCore`] for the target grammar.
//!
//! Kinds the grammar does not define are pruned while lowering: a `kind` the
//! parser cannot produce never matches, and ast-grep rejects it outright.

use serde_json::{Map, Value, json};

use crate::error::AstError;
use crate::lang::Lang;
use crate::re_exports::{AstLanguage, DeserializeEnv, RuleCore, SerializableRuleCore};

/// How far a relational rule may walk from the node under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopBy {
    /// Only the direct parent, child or sibling.
    #[default]
    Neighbor,
    /// Keep walking until the root, the leaves, or the first sibling.
    End,
}

impl StopBy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Neighbor => "neighbor",
            Self::End => "end",
        }
    }
}

/// Target of a relational rule (`inside`, `has`, `follows`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Rule the related node must satisfy.
    pub rule: Box<Rule>,
    /// Traversal limit.
    pub stop_by: StopBy,
}

/// Composable node predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Node kind equals the given syntax kind.
    Kind(String),
    /// Node text matches the regular expression.
    Regex(String),
    /// Every sub-rule matches.
    All(Vec<Rule>),
    /// At least one sub-rule matches.
    Any(Vec<Rule>),
    /// The sub-rule does not match.
    Not(Box<Rule>),
    /// An ancestor matches.
    Inside(Relation),
    /// A descendant matches.
    Has(Relation),
    /// A preceding sibling matches.
    Follows(Relation),
    /// 1-based position among named siblings, optionally only counting
    /// siblings that match `of_rule`.
    NthChild {
        /// Position, starting at 1.
        position: usize,
        /// Filter applied to the siblings before counting.
        of_rule: Option<Box<Rule>>,
    },
}

/// Rule object that matches every node.
fn always() -> Value {
    json!({ "regex": "" })
}

impl Rule {
    /// `kind: <kind>`
    #[must_use]
    pub fn kind(kind: impl Into<String>) -> Self {
        Self::Kind(kind.into())
    }

    /// `regex: <pattern>` over the node text.
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    /// Node text equals `text` exactly (`regex: ^<escaped>$`).
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Regex(format!("^{}$", regex::escape(text)))
    }

    /// `any` over a list of kinds.
    ///
    /// An empty list yields a rule that never matches.
    #[must_use]
    pub fn any_kind<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Any(kinds.into_iter().map(Self::kind).collect())
    }

    /// `all` over sub-rules.
    #[must_use]
    pub fn all(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::All(rules.into_iter().collect())
    }

    /// `any` over sub-rules.
    #[must_use]
    pub fn any(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::Any(rules.into_iter().collect())
    }

    /// `not: <rule>`
    #[must_use]
    pub fn not(rule: Rule) -> Self {
        Self::Not(Box::new(rule))
    }

    /// `inside: <rule>` with the given traversal limit.
    #[must_use]
    pub fn inside(rule: Rule, stop_by: StopBy) -> Self {
        Self::Inside(Relation::new(rule, stop_by))
    }

    /// `has: <rule>` with the given traversal limit.
    #[must_use]
    pub fn has(rule: Rule, stop_by: StopBy) -> Self {
        Self::Has(Relation::new(rule, stop_by))
    }

    /// `follows: <rule>` with the given traversal limit.
    #[must_use]
    pub fn follows(rule: Rule, stop_by: StopBy) -> Self {
        Self::Follows(Relation::new(rule, stop_by))
    }

    /// `nthChild: <n>`
    #[must_use]
    pub fn nth_child(position: usize) -> Self {
        Self::NthChild {
            position,
            of_rule: None,
        }
    }

    /// `nthChild: { position: <n>, ofRule: <rule> }`
    #[must_use]
    pub fn nth_child_of(position: usize, of_rule: Rule) -> Self {
        Self::NthChild {
            position,
            of_rule: Some(Box::new(of_rule)),
        }
    }

    /// The ast-grep rule object, without grammar-specific pruning.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.lower(&|_| true).unwrap_or_else(|| json!({ "not": always() }))
    }

    /// Pretty JSON of [`Rule::to_value`] for diagnostics.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_else(|_| format!("{self:?}"))
    }

    /// Lower into an ast-grep rule core for `lang`.
    ///
    /// Returns `Ok(None)` when the rule can never match in that grammar.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::InvalidRule`] if ast-grep rejects the rule object.
    pub fn to_rule_core(&self, lang: Lang) -> Result<Option<SerializableRuleCore>, AstError> {
        let grammar = lang.support_lang();
        let Some(rule) = self.lower(&|kind| grammar.kind_to_id(kind) != 0) else {
            return Ok(None);
        };
        serde_json::from_value(json!({ "rule": rule }))
            .map(Some)
            .map_err(|e| AstError::InvalidRule(e.to_string()))
    }

    /// Compile into a matcher for `lang`. `Ok(None)` means "never matches".
    ///
    /// # Errors
    ///
    /// Returns [`AstError::InvalidRule`] if ast-grep rejects the rule.
    pub fn compile(&self, lang: Lang) -> Result<Option<RuleCore>, AstError> {
        let Some(core) = self.to_rule_core(lang)? else {
            return Ok(None);
        };
        core.get_matcher(DeserializeEnv::new(lang.support_lang()))
            .map(Some)
            .map_err(|e| AstError::InvalidRule(e.to_string()))
    }

    /// `None` means the rule can never match under `known`.
    fn lower(&self, known: &dyn Fn(&str) -> bool) -> Option<Value> {
        match self {
            Self::Kind(kind) => known(kind).then(|| json!({ "kind": kind })),
            Self::Regex(pattern) => Some(json!({ "regex": pattern })),
            Self::All(rules) => {
                let lowered = rules
                    .iter()
                    .map(|rule| rule.lower(known))
                    .collect::<Option<Vec<_>>>()?;
                Some(json!({ "all": lowered }))
            }
            Self::Any(rules) => {
                let lowered: Vec<Value> = rules.iter().filter_map(|rule| rule.lower(known)).collect();
                (!lowered.is_empty()).then(|| json!({ "any": lowered }))
            }
            Self::Not(rule) => Some(match rule.lower(known) {
                Some(inner) => json!({ "not": inner }),
                None => always(),
            }),
            Self::Inside(relation) => relation.lower("inside", known),
            Self::Has(relation) => relation.lower("has", known),
            Self::Follows(relation) => relation.lower("follows", known),
            Self::NthChild { position, of_rule } => match of_rule {
                None => Some(json!({ "nthChild": position })),
                Some(rule) => {
                    let of_rule = rule.lower(known)?;
                    Some(json!({ "nthChild": { "position": position, "ofRule": of_rule } }))
                }
            },
        }
    }
}

impl Relation {
    /// Create a relation target.
    #[must_use]
    pub fn new(rule: Rule, stop_by: StopBy) -> Self {
        Self {
            rule: Box::new(rule),
            stop_by,
        }
    }

    /// Relational rules take the target's fields inline next to `stopBy`.
    fn lower(&self, key: &str, known: &dyn Fn(&str) -> bool) -> Option<Value> {
        let mut fields = match self.rule.lower(known)? {
            Value::Object(fields) => fields,
            other => Map::from_iter([("all".to_string(), Value::Array(vec![other]))]),
        };
        fields.insert("stopBy".to_string(), json!(self.stop_by.as_str()));
        let mut outer = Map::new();
        outer.insert(key.to_string(), Value::Object(fields));
        Some(Value::Object(outer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowered_shape_is_ast_grep_rule() {
        let rule = Rule::all([
            Rule::kind("function_declaration"),
            Rule::inside(Rule::kind("program"), StopBy::Neighbor),
        ]);
        let value = rule.to_value();
        assert_eq!(value["all"][0]["kind"], "function_declaration");
        assert_eq!(value["all"][1]["inside"]["kind"], "program");
        assert_eq!(value["all"][1]["inside"]["stopBy"], "neighbor");
    }

    #[test]
    fn test_text_is_anchored_and_escaped() {
        assert_eq!(Rule::text("a.b"), Rule::Regex("^a\\.b$".to_string()));
    }

    #[test]
    fn test_nth_child_of_rule() {
        let value = Rule::nth_child_of(1, Rule::not(Rule::kind("comment"))).to_value();
        assert_eq!(value["nthChild"]["position"], 1);
        assert_eq!(value["nthChild"]["ofRule"]["not"]["kind"], "comment");
    }

    #[test]
    fn test_unknown_kinds_are_pruned() {
        let known = |kind: &str| kind != "interface_declaration";
        let rule = Rule::any_kind(["interface_declaration", "class_declaration"]);
        let value = rule.lower(&known).unwrap();
        assert_eq!(value, json!({ "any": [{ "kind": "class_declaration" }] }));

        let impossible = Rule::all([
            Rule::kind("class_declaration"),
            Rule::inside(Rule::kind("interface_declaration"), StopBy::End),
        ]);
        assert!(impossible.lower(&known).is_none());
    }

    #[test]
    fn test_not_of_impossible_rule_always_matches() {
        let known = |kind: &str| kind != "interface_declaration";
        let rule = Rule::all([
            Rule::kind("class_declaration"),
            Rule::not(Rule::kind("interface_declaration")),
        ]);
        let value = rule.lower(&known).unwrap();
        assert_eq!(value["all"][1], always());
    }

    #[test]
    fn test_compile_for_grammar() {
        assert!(Rule::kind("interface_declaration").compile(Lang::JavaScript).unwrap().is_none());
        assert!(Rule::kind("interface_declaration").compile(Lang::TypeScript).unwrap().is_some());
        assert!(Rule::any_kind(Vec::<&str>::new()).compile(Lang::Python).unwrap().is_none());
    }
}
