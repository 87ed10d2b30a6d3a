//! Text repairs applied to diagram descriptions before they reach the diagram engine.
//!
//! Upstream payloads are frequently malformed: mixed line endings, quotes and `\n` escapes left
//! over from JSON encoding, nested parentheses inside node labels. The rules below are lossy
//! heuristics that favor a renderable diagram over preserving the payload. They run in
//! [`REPAIR_RULES`] order and each one is a pure `&str -> String` transformation.

use regex::{Captures, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy)]
pub struct RepairRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

pub const REPAIR_RULES: [RepairRule; 4] = [
    RepairRule {
        name: "normalize_whitespace",
        apply: normalize_whitespace,
    },
    RepairRule {
        name: "nested_paren_labels",
        apply: nested_paren_labels,
    },
    RepairRule {
        name: "node_labels",
        apply: node_labels,
    },
    RepairRule {
        name: "bracket_labels",
        apply: bracket_labels,
    },
];

/// Runs every rule of [`REPAIR_RULES`] in order.
pub fn repair_diagram_text(input: &str) -> String {
    REPAIR_RULES
        .iter()
        .fold(input.to_string(), |text, rule| (rule.apply)(&text))
}

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("valid regex"))
        }
    };
}

cached_regex!(crlf_regex, r"\r\n");
cached_regex!(cr_regex, r"\r");
cached_regex!(blank_lines_regex, r"\n\s*\n");
cached_regex!(
    nested_paren_label_regex,
    r"([A-Z][0-9]*)\(([^)]*\([^)]*\)[^)]*)\)"
);
cached_regex!(inner_paren_group_regex, r"\(([^)]+)\)");
cached_regex!(node_label_regex, r"([A-Z][0-9]*)([\(\[])([^\)\]]*)[\)\]]");
cached_regex!(bracket_label_regex, r"([A-Z][0-9]*)(\[[^\]]*\])");
cached_regex!(escaped_quote_regex, r#"\\""#);
cached_regex!(escaped_newline_regex, r"\\n");
cached_regex!(escaped_cr_regex, r"\\r");
cached_regex!(escaped_tab_regex, r"\\t");
cached_regex!(whitespace_run_regex, r"\s+");
cached_regex!(unclosed_open_paren_regex, r"\([^)]*$");
cached_regex!(leading_close_paren_regex, r"^[^(]*\)");
cached_regex!(double_open_paren_regex, r"\([^)]*\(");
cached_regex!(double_close_paren_regex, r"\).*\)");
cached_regex!(lone_leading_quote_regex, r"^'[^']*$");
cached_regex!(lone_trailing_quote_regex, r"^[^']*'$");

/// Single `\n` line endings, no blank lines, no surrounding whitespace.
pub fn normalize_whitespace(input: &str) -> String {
    let text = crlf_regex().replace_all(input, "\n");
    let text = cr_regex().replace_all(&text, "\n");
    let text = blank_lines_regex().replace_all(&text, "\n");
    text.trim().to_string()
}

/// `A(Suma (1+2)+3)` becomes `A(Suma [1+2]+3)`: inner groups of a parenthesized label are
/// switched to brackets, then escapes and whitespace are cleaned.
pub fn nested_paren_labels(input: &str) -> String {
    nested_paren_label_regex()
        .replace_all(input, |caps: &Captures| {
            let node_id = &caps[1];
            let content = inner_paren_group_regex().replace_all(&caps[2], "[${1}]");
            let content = unescape_and_collapse(&content, "\"");
            format!("{node_id}({})", content.trim())
        })
        .to_string()
}

/// Aggressive cleanup of every `Id(label)` / `Id[label]` token.
///
/// The closing delimiter is derived from the opening one, so `A(texto]` comes out as `A(texto)`.
pub fn node_labels(input: &str) -> String {
    node_label_regex()
        .replace_all(input, |caps: &Captures| {
            let node_id = &caps[1];
            let open = &caps[2];
            let close = if open == "(" { ")" } else { "]" };

            let content = caps[3].replace('"', "'");
            let content = unescape_and_collapse(&content, "'");
            let content = unclosed_open_paren_regex().replace_all(&content, "");
            let content = leading_close_paren_regex().replace_all(&content, "");
            let content = double_open_paren_regex().replace_all(&content, "(");
            let content = double_close_paren_regex().replace_all(&content, ")");
            let content = strip_unbalanced_quotes(&content);

            format!("{node_id}{open}{}{close}", content.trim())
        })
        .to_string()
}

/// Escape and whitespace cleanup of `Id[label]` tokens; quotes are left alone.
pub fn bracket_labels(input: &str) -> String {
    bracket_label_regex()
        .replace_all(input, |caps: &Captures| {
            let node_id = &caps[1];
            let label = unescape_and_collapse(&caps[2], "\"");
            format!("{node_id}{}", label.trim())
        })
        .to_string()
}

/// Replaces `\"` with `quote`, literal `\n`/`\t` with a space, drops literal `\r`, then
/// collapses whitespace runs to one space.
fn unescape_and_collapse(text: &str, quote: &str) -> String {
    let text = escaped_quote_regex().replace_all(text, quote);
    let text = escaped_newline_regex().replace_all(&text, " ");
    let text = escaped_cr_regex().replace_all(&text, "");
    let text = escaped_tab_regex().replace_all(&text, " ");
    whitespace_run_regex().replace_all(&text, " ").to_string()
}

fn strip_unbalanced_quotes(text: &str) -> String {
    if lone_leading_quote_regex().is_match(text) || lone_trailing_quote_regex().is_match(text) {
        text.replace('\'', "")
    } else {
        text.to_string()
    }
}
