use std::fmt::Write;

use crate::parsing::{blocks::BlockKind, blocks::kinds::ListMarker, inline::render_inline};

use super::{BlockMarker, MARKER_ATTRIBUTE};

struct Emitter {
    out: String,
    quote_depth: u8,
    /// Open lists as (marker, indent), innermost last.
    lists: Vec<(ListMarker, usize)>,
}

pub(super) fn emit(markers: &[BlockMarker]) -> String {
    let mut e = Emitter {
        out: String::new(),
        quote_depth: 0,
        lists: vec![],
    };

    for m in markers {
        if m.quote_depth != e.quote_depth {
            e.close_lists(0);
            e.set_quote_depth(m.quote_depth, m.source_line);
        }
        match &m.kind {
            BlockKind::ListItem { marker, indent } => e.list_item(m, *marker, *indent),
            kind => {
                e.close_lists(0);
                e.leaf(m, kind);
            }
        }
    }

    e.close_lists(0);
    e.set_quote_depth(0, 0);
    e.out
}

impl Emitter {
    fn tag_open(&mut self, tag: &str, line: usize) {
        let _ = write!(self.out, r#"<{tag} {MARKER_ATTRIBUTE}="{line}">"#);
    }

    fn set_quote_depth(&mut self, depth: u8, line: usize) {
        while self.quote_depth > depth {
            self.out.push_str("</blockquote>\n");
            self.quote_depth -= 1;
        }
        while self.quote_depth < depth {
            self.tag_open("blockquote", line);
            self.out.push('\n');
            self.quote_depth += 1;
        }
    }

    fn close_lists(&mut self, keep: usize) {
        while self.lists.len() > keep {
            if let Some((marker, _)) = self.lists.pop() {
                self.out.push_str(list_close(marker));
            }
        }
    }

    fn list_item(&mut self, m: &BlockMarker, marker: ListMarker, indent: usize) {
        // Close lists nested deeper than this item, or a sibling list of the other type.
        while let Some(&(top_marker, top_indent)) = self.lists.last() {
            if top_indent > indent || (top_indent == indent && top_marker != marker) {
                self.lists.pop();
                self.out.push_str(list_close(top_marker));
            } else {
                break;
            }
        }
        if self.lists.last().is_none_or(|&(_, top)| top < indent) {
            self.out.push_str(list_open(marker));
            self.lists.push((marker, indent));
        }

        self.tag_open("li", m.source_line);
        self.out.push_str(&render_inline(&m.lines.join("\n")));
        self.out.push_str("</li>\n");
    }

    fn leaf(&mut self, m: &BlockMarker, kind: &BlockKind) {
        match kind {
            BlockKind::Paragraph => {
                self.tag_open("p", m.source_line);
                self.out.push_str(&render_inline(&m.lines.join("\n")));
                self.out.push_str("</p>\n");
            }
            BlockKind::Heading { level } => {
                self.tag_open(&format!("h{level}"), m.source_line);
                self.out.push_str(&render_inline(&m.lines.join(" ")));
                let _ = writeln!(self.out, "</h{level}>");
            }
            BlockKind::FencedCode { info, .. } => {
                self.tag_open("pre", m.source_line);
                match info {
                    Some(lang) => {
                        let _ = write!(
                            self.out,
                            r#"<code class="language-{}">"#,
                            html_escape::encode_double_quoted_attribute(lang)
                        );
                    }
                    None => self.out.push_str("<code>"),
                }
                self.out
                    .push_str(&html_escape::encode_text(&m.lines.join("\n")));
                self.out.push_str("</code></pre>\n");
            }
            BlockKind::ThematicBreak => {
                let _ = writeln!(self.out, r#"<hr {MARKER_ATTRIBUTE}="{}">"#, m.source_line);
            }
            BlockKind::ListItem { .. } => {}
        }
    }
}

fn list_open(marker: ListMarker) -> &'static str {
    match marker {
        ListMarker::Bullet => "<ul>\n",
        ListMarker::Ordered => "<ol>\n",
    }
}

fn list_close(marker: ListMarker) -> &'static str {
    match marker {
        ListMarker::Bullet => "</ul>\n",
        ListMarker::Ordered => "</ol>\n",
    }
}

#[cfg(test)]
mod tests {
    use crate::render::render_markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_list_opens_inner_list() {
        let html = render_markdown("- a\n  - b\n- c\n").html;
        assert_eq!(
            html,
            concat!(
                "<ul>\n",
                "<li data-line=\"0\">a</li>\n",
                "<ul>\n",
                "<li data-line=\"1\">b</li>\n",
                "</ul>\n",
                "<li data-line=\"2\">c</li>\n",
                "</ul>\n",
            )
        );
    }

    #[test]
    fn switching_list_type_closes_previous_list() {
        let html = render_markdown("- a\n1. b\n").html;
        assert_eq!(
            html,
            "<ul>\n<li data-line=\"0\">a</li>\n</ul>\n<ol>\n<li data-line=\"1\">b</li>\n</ol>\n"
        );
    }

    #[test]
    fn code_is_escaped_not_substituted() {
        let html = render_markdown("```\n<b>**x**</b>\n```\n").html;
        assert_eq!(
            html,
            "<pre data-line=\"0\"><code>&lt;b&gt;**x**&lt;/b&gt;</code></pre>\n"
        );
    }

    #[test]
    fn blockquote_closes_at_end() {
        let html = render_markdown("> q\n").html;
        assert_eq!(
            html,
            "<blockquote data-line=\"0\">\n<p data-line=\"0\">q</p>\n</blockquote>\n"
        );
    }
}
