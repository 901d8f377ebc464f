//! Tests for diff module - unified diff generation.

use omni_edit::diff::{generate_file_diff, generate_unified_diff};

#[test]
fn test_simple_diff() {
    let old = "line1\nline2\nline3\n";
    let new = "line1\nmodified\nline3\n";

    let diff = generate_unified_diff(old, new);

    assert!(diff.contains("-line2"));
    assert!(diff.contains("+modified"));
}

#[test]
fn test_no_changes() {
    let content = "same content\n";
    assert!(generate_unified_diff(content, content).is_empty());
}

#[test]
fn test_addition_only() {
    let diff = generate_unified_diff("", "new line\n");
    assert!(diff.contains("+new line"));
}

#[test]
fn test_distant_edits_form_two_hunks() {
    let old: String = (0..20).map(|i| format!("line{i}\n")).collect();
    let new = old.replace("line1\n", "LINE1\n").replace("line18\n", "LINE18\n");

    let diff = generate_file_diff("a.ts", &old, &new);
    assert!(diff.starts_with("--- a/a.ts\n+++ b/a.ts\n"));
    assert_eq!(diff.matches("@@ -").count(), 2);
}
