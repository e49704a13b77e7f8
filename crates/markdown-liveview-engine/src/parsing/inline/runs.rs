use super::{parser::parse_inline, rules::substitute, types::InlineNode};

/// Inline formatting in effect for a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    pub link: bool,
    pub image: bool,
}

/// Display text with one style. The text is unescaped and free of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: InlineStyle,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: InlineStyle::default(),
        }
    }
}

/// Appends `text`, merging it into the last run when the style matches.
pub fn push_run(runs: &mut Vec<StyledRun>, text: &str, style: InlineStyle) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut()
        && last.style == style
    {
        last.text.push_str(text);
        return;
    }
    runs.push(StyledRun {
        text: text.to_string(),
        style,
    });
}

/// Renders inline markdown to styled runs.
///
/// Text outside code spans goes through the same escape and rule pipeline as
/// [`render_inline`](super::render_inline); the tags the rules emit become
/// styles and the entities are decoded again. An image shows its alt text.
pub fn render_inline_spans(s: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    for node in parse_inline(0, s) {
        match node {
            InlineNode::Text(sp) => read_substituted(&substitute(&s[sp.start..sp.end]), &mut runs),
            InlineNode::CodeSpan { inner, .. } => push_run(
                &mut runs,
                &s[inner.start..inner.end],
                InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                },
            ),
        }
    }
    runs
}

#[derive(Default)]
struct Depth {
    strong: u8,
    emphasis: u8,
    strikethrough: u8,
    link: u8,
}

impl Depth {
    fn style(&self) -> InlineStyle {
        InlineStyle {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            link: self.link > 0,
            ..InlineStyle::default()
        }
    }

    fn apply(&mut self, tag: &str) {
        let (closing, name) = match tag.strip_prefix('/') {
            Some(name) => (true, name),
            None => (false, tag.split(' ').next().unwrap_or(tag)),
        };
        let counter = match name {
            "strong" => &mut self.strong,
            "em" => &mut self.emphasis,
            "del" => &mut self.strikethrough,
            "a" => &mut self.link,
            _ => {
                log::trace!("ignoring inline tag <{tag}>");
                return;
            }
        };
        *counter = if closing {
            counter.saturating_sub(1)
        } else {
            counter.saturating_add(1)
        };
    }
}

/// Reads rule output back into runs. Source text is escaped before the rules
/// run, so every raw `<` here opens a tag a rule emitted.
fn read_substituted(html: &str, runs: &mut Vec<StyledRun>) {
    let mut depth = Depth::default();
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        push_text(runs, &rest[..open], depth.style());
        let Some(len) = rest[open..].find('>') else {
            rest = &rest[open..];
            break;
        };
        let tag = &rest[open + 1..open + len];
        rest = &rest[open + len + 1..];

        if let Some(attrs) = tag.strip_prefix("img ") {
            let alt = attribute(attrs, "alt").filter(|a| !a.is_empty());
            let style = InlineStyle {
                image: true,
                ..depth.style()
            };
            push_text(runs, alt.unwrap_or("image"), style);
        } else {
            depth.apply(tag);
        }
    }

    push_text(runs, rest, depth.style());
}

fn push_text(runs: &mut Vec<StyledRun>, escaped: &str, style: InlineStyle) {
    push_run(runs, &html_escape::decode_html_entities(escaped), style);
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let start = attrs.find(&format!("{name}=\""))? + name.len() + 2;
    let len = attrs[start..].find('"')?;
    Some(&attrs[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn label(style: InlineStyle) -> String {
        let names = [
            (style.strong, "strong"),
            (style.emphasis, "em"),
            (style.strikethrough, "del"),
            (style.code, "code"),
            (style.link, "link"),
            (style.image, "image"),
        ];
        let set: Vec<&str> = names.iter().filter(|(on, _)| *on).map(|(_, n)| *n).collect();
        if set.is_empty() {
            "plain".to_string()
        } else {
            set.join("+")
        }
    }

    fn runs(s: &str) -> Vec<(String, String)> {
        render_inline_spans(s)
            .into_iter()
            .map(|r| (r.text, label(r.style)))
            .collect()
    }

    #[rstest]
    #[case::empty("", &[])]
    #[case::plain("hello", &[("hello", "plain")])]
    #[case::strong("some **bold**", &[("some ", "plain"), ("bold", "strong")])]
    #[case::link_and_strong(
        "some **bold** and [link](http://x.io)",
        &[("some ", "plain"), ("bold", "strong"), (" and ", "plain"), ("link", "link")]
    )]
    #[case::nested("**a *b* c**", &[("a ", "strong"), ("b", "strong+em"), (" c", "strong")])]
    #[case::strike("~~gone~~ now", &[("gone", "del"), (" now", "plain")])]
    #[case::entities_decoded("a < b & c", &[("a < b & c", "plain")])]
    #[case::literal_tags_stay_text("<b>hi</b>", &[("<b>hi</b>", "plain")])]
    #[case::code_is_raw("`**x**` y", &[("**x**", "code"), (" y", "plain")])]
    #[case::image_alt("![cat](c.png)", &[("cat", "image")])]
    #[case::image_without_alt("![](c.png)", &[("image", "image")])]
    #[case::lone_star("2 * 3", &[("2 * 3", "plain")])]
    fn styled_runs(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(t, s)| (t.to_string(), s.to_string()))
            .collect();
        assert_eq!(runs(input), expected);
    }

    #[test]
    fn push_run_merges_matching_styles() {
        let mut out = vec![StyledRun::plain("a")];
        push_run(&mut out, "b", InlineStyle::default());
        push_run(&mut out, "", InlineStyle::default());
        assert_eq!(out, vec![StyledRun::plain("ab")]);
    }
}
