//! Diff generation utilities.
//!
//! Provides unified diff output for committed changesets using the `similar` crate.

use similar::{ChangeTag, TextDiff};

/// Generate a unified diff between two strings.
///
/// Hunks carry three lines of context and are separated by `@@` headers with
/// 1-indexed line ranges. Lines are prefixed with `+`, `-` or ` `.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    for group in diff.grouped_ops(3) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let old_len = last.old_range().end - old_start;
        let new_start = first.new_range().start;
        let new_len = last.new_range().end - new_start;
        output.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start + 1,
            old_len,
            new_start + 1,
            new_len
        ));

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}

/// Unified diff with `---`/`+++` file headers.
#[must_use]
pub fn generate_file_diff(path: &str, original: &str, modified: &str) -> String {
    let body = generate_unified_diff(original, modified);
    if body.is_empty() {
        return body;
    }
    format!("--- a/{path}\n+++ b/{path}\n{body}")
}
