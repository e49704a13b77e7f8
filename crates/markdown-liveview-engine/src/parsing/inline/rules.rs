use std::sync::LazyLock;

use regex::Regex;

use super::{parser::parse_inline, types::InlineNode};

/// One ordered rewrite applied to escaped text outside code spans.
pub struct SubstitutionRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl SubstitutionRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            // Patterns are literals covered by `all_rules_compile`.
            pattern: Regex::new(pattern).unwrap_or_else(|e| panic!("rule {name}: {e}")),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

pub static RULES: LazyLock<Vec<SubstitutionRule>> = LazyLock::new(|| {
    vec![
        SubstitutionRule::new(
            "image",
            r#"!\[([^\]]*)\]\(([^)\s"]+)\)"#,
            r#"<img src="${2}" alt="${1}">"#,
        ),
        SubstitutionRule::new(
            "link",
            r#"\[([^\]]+)\]\(([^)\s"]+)\)"#,
            r#"<a href="${2}">${1}</a>"#,
        ),
        SubstitutionRule::new(
            "strong",
            r"\*\*(\S(?:.*?\S)?)\*\*",
            "<strong>${1}</strong>",
        ),
        SubstitutionRule::new(
            "strong_underscore",
            r"\b__(\S(?:.*?\S)?)__\b",
            "<strong>${1}</strong>",
        ),
        SubstitutionRule::new("emphasis", r"\*(\S(?:.*?\S)?)\*", "<em>${1}</em>"),
        SubstitutionRule::new(
            "emphasis_underscore",
            r"\b_(\S(?:.*?\S)?)_\b",
            "<em>${1}</em>",
        ),
        SubstitutionRule::new(
            "strikethrough",
            r"~~(\S(?:.*?\S)?)~~",
            "<del>${1}</del>",
        ),
    ]
});

/// Escapes a text run and applies every rule in order.
pub(crate) fn substitute(text: &str) -> String {
    let mut text = html_escape::encode_text(text).into_owned();
    for rule in RULES.iter() {
        text = rule.apply(&text);
    }
    text
}

/// Renders inline markdown to HTML.
///
/// Code spans pass through escaped but otherwise untouched; all other text is
/// escaped and then run through [`RULES`] in order.
pub fn render_inline(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for node in parse_inline(0, s) {
        match node {
            InlineNode::Text(sp) => out.push_str(&substitute(&s[sp.start..sp.end])),
            InlineNode::CodeSpan { inner, .. } => {
                out.push_str("<code>");
                out.push_str(&html_escape::encode_text(&s[inner.start..inner.end]));
                out.push_str("</code>");
            }
        }
    }
    out
}
