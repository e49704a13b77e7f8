//! # Marker-Producing Renderer
//!
//! Turns markdown source into HTML in which every structural node carries a
//! [`MARKER_ATTRIBUTE`] holding the 0-based source line it starts on. The
//! scroll synchronizer reads those markers back from the live view.
//!
//! Rendering is wholesale: every call parses the whole source and returns a
//! fresh marker set. Nothing is patched incrementally.

mod html;

use xi_rope::Rope;

use crate::parsing::{
    blocks::{BlockKind, BlockNode, kinds::BlockQuote},
    parse_document,
    rope::{preview, slice_to_string},
};

/// Attribute name carrying the source line on rendered nodes.
pub const MARKER_ATTRIBUTE: &str = "data-line";

/// One rendered block as seen by a host that lays blocks out itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMarker {
    /// 0-based line the block starts on.
    pub source_line: usize,
    /// 0-based last line of the block (inclusive).
    pub end_line: usize,
    pub kind: BlockKind,
    pub quote_depth: u8,
    /// Block text with markdown prefixes removed, one entry per source line.
    pub lines: Vec<String>,
}

/// Output of one render pass.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    pub markers: Vec<BlockMarker>,
}

/// Renders `source` to marker-annotated HTML.
pub fn render_markdown(source: &str) -> Rendered {
    let rope = Rope::from(source);
    let doc = parse_document(&rope);

    let markers: Vec<BlockMarker> = doc
        .blocks
        .iter()
        .map(|b| {
            log::trace!(
                "line {}..={} {:?}: {}",
                b.start_line,
                b.end_line,
                b.kind,
                preview(&rope, b.content_span, 40)
            );
            BlockMarker {
                source_line: b.start_line,
                end_line: b.end_line,
                kind: b.kind.clone(),
                quote_depth: b.quote_depth(),
                lines: block_lines(&rope, b),
            }
        })
        .collect();

    log::trace!("rendered {} blocks", markers.len());

    Rendered {
        html: html::emit(&markers),
        markers,
    }
}

/// Content lines of a block with quote prefixes and (outside code) indentation removed.
fn block_lines(rope: &Rope, b: &BlockNode) -> Vec<String> {
    let content = slice_to_string(rope, b.content_span);
    let quoted = b.quote_depth() > 0;
    let is_code = matches!(b.kind, BlockKind::FencedCode { .. });

    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            let line = if quoted {
                let (_, idx) = BlockQuote::strip_prefixes(line);
                &line[idx..]
            } else {
                line
            };
            if is_code {
                line.to_string()
            } else {
                line.trim().to_string()
            }
        })
        .collect();

    if let BlockKind::Heading { .. } = b.kind
        && let Some(first) = lines.first_mut()
    {
        // Closing sequence of an ATX heading: "# Title ##"
        *first = first.trim_end_matches('#').trim_end().to_string();
    }

    lines
}
