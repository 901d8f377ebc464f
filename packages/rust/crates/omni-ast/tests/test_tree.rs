//! Tests for tree module - parsing, search order and rule compilation.

use omni_ast::{Lang, Rule, SourceTree, StopBy};

fn search_texts(tree: &SourceTree, rule: &Rule) -> Vec<String> {
    tree.search(rule)
        .unwrap()
        .iter()
        .map(|node| node.text().to_string())
        .collect()
}

#[test]
fn test_search_returns_document_order() {
    let source = "class A {}\nfunction b() {}\ninterface C {}\n";
    let tree = SourceTree::parse(Lang::TypeScript, source);
    let rule = Rule::all([
        Rule::any_kind(["class_declaration", "function_declaration", "interface_declaration"]),
        Rule::inside(Rule::kind("program"), StopBy::Neighbor),
    ]);

    let spans: Vec<_> = tree
        .search(&rule)
        .unwrap()
        .iter()
        .map(|n| tree.span(n))
        .collect();
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].kind, "class_declaration");
    assert_eq!(spans[1].kind, "function_declaration");
    assert_eq!(spans[2].kind, "interface_declaration");
    assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
    assert_eq!(spans[1].line, 2);
    assert_eq!(spans[1].column, 0);
}

#[test]
fn test_root_covers_file() {
    let source = "x = 1\n";
    let tree = SourceTree::parse(Lang::Python, source);
    assert_eq!(tree.root().kind(), "module");
    assert_eq!(tree.source(), source);
    assert_eq!(tree.lang(), Lang::Python);
}

#[test]
fn test_inside_neighbor_excludes_nested() {
    let tree = SourceTree::parse(Lang::TypeScript, "function outer() { function inner() {} }\n");
    let rule = Rule::all([
        Rule::kind("function_declaration"),
        Rule::inside(Rule::kind("program"), StopBy::Neighbor),
    ]);
    let found = search_texts(&tree, &rule);
    assert_eq!(found.len(), 1);
    assert!(found[0].starts_with("function outer"));
}

#[test]
fn test_inside_end_reaches_ancestors() {
    let tree = SourceTree::parse(Lang::TypeScript, "function outer() { function inner() {} }\n");
    let rule = Rule::all([
        Rule::kind("function_declaration"),
        Rule::inside(Rule::kind("function_declaration"), StopBy::End),
    ]);
    assert_eq!(search_texts(&tree, &rule), vec!["function inner() {}"]);
}

#[test]
fn test_follows_neighbor_only_checks_previous_sibling() {
    let tree = SourceTree::parse(Lang::TypeScript, "// note\nconst a = 1;\nfunction f() {}\n");
    let neighbor = Rule::all([
        Rule::kind("function_declaration"),
        Rule::follows(Rule::kind("comment"), StopBy::Neighbor),
    ]);
    assert!(tree.search(&neighbor).unwrap().is_empty());

    let end = Rule::all([
        Rule::kind("function_declaration"),
        Rule::follows(Rule::kind("comment"), StopBy::End),
    ]);
    assert_eq!(tree.search(&end).unwrap().len(), 1);
}

#[test]
fn test_nth_child_of_rule_skips_comments() {
    let source = "def f():\n    # lead\n    \"\"\"Doc.\"\"\"\n    return 1\n\ndef g():\n    return 2\n";
    let tree = SourceTree::parse(Lang::Python, source);
    let docstring = Rule::all([
        Rule::kind("expression_statement"),
        Rule::nth_child_of(1, Rule::not(Rule::kind("comment"))),
        Rule::has(Rule::kind("string"), StopBy::Neighbor),
    ]);
    let rule = Rule::all([
        Rule::kind("function_definition"),
        Rule::has(
            Rule::all([Rule::kind("block"), Rule::has(docstring, StopBy::Neighbor)]),
            StopBy::Neighbor,
        ),
    ]);
    let found = search_texts(&tree, &rule);
    assert_eq!(found.len(), 1);
    assert!(found[0].starts_with("def f"));
}

#[test]
fn test_text_and_not() {
    let tree = SourceTree::parse(
        Lang::CSharp,
        "class A { public void M() {} private void N() {} }\n",
    );
    let public = Rule::has(
        Rule::all([Rule::kind("modifier"), Rule::text("public")]),
        StopBy::Neighbor,
    );
    let public_methods = Rule::all([Rule::kind("method_declaration"), public.clone()]);
    let found = search_texts(&tree, &public_methods);
    assert_eq!(found, vec!["public void M() {}"]);

    let others = Rule::all([Rule::kind("method_declaration"), Rule::not(public)]);
    assert_eq!(search_texts(&tree, &others), vec!["private void N() {}"]);
}

#[test]
fn test_kinds_missing_from_grammar_are_ignored() {
    let tree = SourceTree::parse(Lang::JavaScript, "class A {}\nfunction f() {}\n");
    let rule = Rule::all([
        Rule::any_kind(["interface_declaration", "class_declaration"]),
        Rule::inside(Rule::kind("program"), StopBy::Neighbor),
    ]);
    assert_eq!(search_texts(&tree, &rule), vec!["class A {}"]);
    assert!(
        tree.search(&Rule::kind("type_alias_declaration"))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_empty_any_matches_nothing() {
    let tree = SourceTree::parse(Lang::CSharp, "class A {}\n");
    assert!(
        tree.search(&Rule::any_kind(Vec::<&str>::new()))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_nodes_of_kind() {
    let tree = SourceTree::parse(Lang::Python, "def a():\n    def b():\n        pass\n");
    assert_eq!(tree.nodes_of_kind("function_definition").len(), 2);
}
