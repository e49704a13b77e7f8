use crate::parsing::rope::span::Span;

use super::kinds::{FenceKind, ListMarker};

/// A frame in the container stack representing a nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerFrame {
    /// A blockquote container with its nesting depth.
    BlockQuote {
        /// How many `>` prefixes (1 = single quote, 2 = nested, etc.)
        depth: u8,
    },
}

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// A paragraph block (default when no other block opener matches).
    Paragraph,
    /// An ATX heading, level 1-6.
    Heading { level: u8 },
    /// A single list item, including any lazy continuation lines.
    ListItem {
        marker: ListMarker,
        /// Leading spaces before the marker; drives nesting in the renderer.
        indent: usize,
    },
    /// A fenced code block (``` or ~~~).
    FencedCode {
        kind: FenceKind,
        /// First word of the info string, used as the language class.
        info: Option<String>,
    },
    /// `---`, `***` or `___`.
    ThematicBreak,
}

/// A parsed block node with its containers, kind, spans and source lines.
#[derive(Debug, Clone)]
pub struct BlockNode {
    /// The container stack this block is nested within.
    pub containers: Vec<ContainerFrame>,
    /// The kind of leaf block.
    pub kind: BlockKind,
    /// Full byte span of the block including delimiters.
    pub span: Span,
    /// Content span for inline rendering (excludes prefixes like `>` or `#`).
    pub content_span: Span,
    /// 0-based line the block starts on.
    pub start_line: usize,
    /// 0-based line the block ends on (inclusive).
    pub end_line: usize,
}

impl BlockNode {
    /// Blockquote depth of the innermost container, 0 outside quotes.
    pub fn quote_depth(&self) -> u8 {
        self.containers
            .iter()
            .map(|c| match c {
                ContainerFrame::BlockQuote { depth } => *depth,
            })
            .max()
            .unwrap_or(0)
    }
}
