//! Lays rendered blocks out as terminal rows.
//!
//! Each block becomes one or more rows, so block heights vary with the pane
//! width. The row span of every block is recorded as a [`MarkerNode`], which
//! is what the scroll sync engine anchors on. Text blocks are laid out from
//! their inline runs, so wrapping is measured on what is displayed rather
//! than on the markup.

use markdown_liveview_engine::{
    BlockMarker, InlineStyle, MarkerNode, StyledRun,
    parsing::{
        blocks::{BlockKind, kinds::ListMarker},
        inline::runs::push_run,
    },
    render_inline_spans,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Blank,
    Heading,
    Text,
    Code,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub runs: Vec<StyledRun>,
    pub style: RowStyle,
}

impl Row {
    fn blank() -> Self {
        Self {
            runs: Vec::new(),
            style: RowStyle::Blank,
        }
    }

    fn plain(text: String, style: RowStyle) -> Self {
        Self {
            runs: vec![StyledRun::plain(text)],
            style,
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreviewLayout {
    pub rows: Vec<Row>,
    pub nodes: Vec<MarkerNode>,
}

/// Lays `markers` out for a pane `width` columns wide.
///
/// Blocks are separated by one blank row, except between consecutive list
/// items. Code rows are clipped rather than wrapped so one source line stays
/// one row.
pub fn layout_blocks(markers: &[BlockMarker], width: usize) -> PreviewLayout {
    let mut layout = PreviewLayout::default();
    let mut ordinal = 0;
    let mut prev_was_item = false;

    for (i, m) in markers.iter().enumerate() {
        let is_item = matches!(m.kind, BlockKind::ListItem { .. });
        if i > 0 && !(is_item && prev_was_item) {
            layout.rows.push(Row::blank());
        }
        prev_was_item = is_item;

        ordinal = match m.kind {
            BlockKind::ListItem {
                marker: ListMarker::Ordered,
                ..
            } => ordinal + 1,
            _ => 0,
        };

        let start = layout.rows.len();
        let quote = "│ ".repeat(m.quote_depth as usize);
        let rows = &mut layout.rows;

        match &m.kind {
            BlockKind::Heading { level } => {
                let lead = format!("{quote}{} ", "#".repeat(*level as usize));
                let hang = format!("{quote}{}", " ".repeat(*level as usize + 1));
                let runs = render_inline_spans(&m.lines.join(" "));
                push_wrapped(rows, &lead, &hang, &runs, width, RowStyle::Heading);
            }
            BlockKind::Paragraph => {
                let runs = render_inline_spans(&m.lines.join(" "));
                push_wrapped(rows, &quote, &quote, &runs, width, RowStyle::Text);
            }
            BlockKind::ListItem { marker, indent } => {
                let bullet = match marker {
                    ListMarker::Bullet => "• ".to_string(),
                    ListMarker::Ordered => format!("{ordinal}. "),
                };
                let lead = format!("{quote}{}{bullet}", " ".repeat(*indent));
                let hang = format!("{quote}{}", " ".repeat(*indent + bullet.width()));
                let runs = render_inline_spans(&m.lines.join(" "));
                push_wrapped(rows, &lead, &hang, &runs, width, RowStyle::Text);
            }
            BlockKind::FencedCode { .. } => {
                for line in &m.lines {
                    rows.push(Row::plain(clip(&format!("{quote}{line}"), width), RowStyle::Code));
                }
                if m.lines.is_empty() {
                    rows.push(Row::plain(quote.clone(), RowStyle::Code));
                }
            }
            BlockKind::ThematicBreak => {
                let rule = "─".repeat(width.saturating_sub(quote.width()));
                rows.push(Row::plain(format!("{quote}{rule}"), RowStyle::Rule));
            }
        }

        layout.nodes.push(MarkerNode::new(
            m.source_line.to_string(),
            start as f64,
            (layout.rows.len() - start) as f64,
        ));
    }

    layout
}

fn push_wrapped(
    rows: &mut Vec<Row>,
    lead: &str,
    hang: &str,
    runs: &[StyledRun],
    width: usize,
    style: RowStyle,
) {
    let available = width.saturating_sub(lead.width()).max(1);
    for (i, line) in wrap_runs(runs, available).into_iter().enumerate() {
        let prefix = if i == 0 { lead } else { hang };
        let mut row = Vec::with_capacity(line.len() + 1);
        push_run(&mut row, prefix, InlineStyle::default());
        for run in &line {
            push_run(&mut row, &run.text, run.style);
        }
        rows.push(Row { runs: row, style });
    }
}

/// Greedy word wrap by display width. Words wider than a row are split.
///
/// A word may span several runs (`**bold**,` is one word in two styles).
/// Whitespace collapses to one unstyled space. A width of zero never wraps.
pub fn wrap_runs(runs: &[StyledRun], width: usize) -> Vec<Vec<StyledRun>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut current_width = 0;

    for word in words(runs) {
        let word_width: usize = word.iter().map(|r| r.text.width()).sum();

        if current_width > 0 && (width == 0 || current_width + 1 + word_width <= width) {
            push_run(&mut current, " ", InlineStyle::default());
            append(&mut current, &word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if width == 0 || word_width <= width {
            append(&mut current, &word);
            current_width = word_width;
            continue;
        }

        let mut buf = [0; 4];
        for run in &word {
            for ch in run.text.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width > 0 && current_width + ch_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                push_run(&mut current, ch.encode_utf8(&mut buf), run.style);
                current_width += ch_width;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Splits runs at whitespace. Pieces of one word keep their own styles.
fn words(runs: &[StyledRun]) -> Vec<Vec<StyledRun>> {
    let mut words = Vec::new();
    let mut word = Vec::new();

    for run in runs {
        let mut start = None;
        for (i, ch) in run.text.char_indices() {
            if ch.is_whitespace() {
                if let Some(s) = start.take() {
                    push_run(&mut word, &run.text[s..i], run.style);
                }
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(s) = start {
            push_run(&mut word, &run.text[s..], run.style);
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

fn append(line: &mut Vec<StyledRun>, word: &[StyledRun]) {
    for run in word {
        push_run(line, &run.text, run.style);
    }
}

/// Cuts `s` to at most `width` display columns.
fn clip(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}
