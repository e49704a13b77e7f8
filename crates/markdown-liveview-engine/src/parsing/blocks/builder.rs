use crate::parsing::rope::span::Span;

use super::{
    classify::LineClass,
    containers::ContainerPath,
    kinds::{CodeFence, FenceKind},
    open::{BlockOpen, try_open_leaf},
    types::{BlockKind, BlockNode},
};

#[derive(Debug, Clone)]
enum LeafState {
    None,
    /// A leaf that absorbs following non-blank lines (paragraph or list item).
    Text {
        kind: BlockKind,
        start: Span,
        content_start: usize,
        start_line: usize,
        last_line_end: usize,
        last_line: usize,
    },
    Fence {
        kind: FenceKind,
        info: Option<String>,
        start: Span,
        start_line: usize,
        last_line_end: usize,
        last_line: usize,
    },
}

/// Line-driven state machine that turns classified lines into [`BlockNode`]s.
pub struct BlockBuilder {
    containers: ContainerPath,
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            containers: ContainerPath::default(),
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        if self.in_fence() {
            self.consume_fence_line(c);
            return;
        }

        if c.quote_depth != self.containers.blockquote_depth() {
            self.flush_text();
            self.containers.set_blockquote_depth(c.quote_depth);
        }

        if c.is_blank {
            self.flush_text();
            return;
        }

        if let Some(open) = try_open_leaf(&c.remainder_text) {
            self.flush_text();
            self.open_leaf(open, c);
            return;
        }

        self.extend_text(c);
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF flush
        self.flush_text();
        self.flush_fence();
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn emit(&mut self, kind: BlockKind, span: Span, content_span: Span, lines: (usize, usize)) {
        self.out.push(BlockNode {
            containers: self.containers.0.clone(),
            kind,
            span,
            content_span,
            start_line: lines.0,
            end_line: lines.1,
        });
    }

    fn open_leaf(&mut self, open: BlockOpen, c: &LineClass) {
        let content_end = c.remainder_span.end;
        match open {
            BlockOpen::FencedCode { kind, info } => {
                self.leaf = LeafState::Fence {
                    kind,
                    info,
                    start: c.line,
                    start_line: c.index,
                    last_line_end: c.line.end,
                    last_line: c.index,
                }
            }
            BlockOpen::Heading {
                level,
                content_offset,
            } => {
                let content_start = (c.remainder_span.start + content_offset).min(content_end);
                self.emit(
                    BlockKind::Heading { level },
                    c.line,
                    Span {
                        start: content_start,
                        end: content_end,
                    },
                    (c.index, c.index),
                );
            }
            BlockOpen::ThematicBreak => {
                self.emit(
                    BlockKind::ThematicBreak,
                    c.line,
                    Span {
                        start: content_end,
                        end: content_end,
                    },
                    (c.index, c.index),
                );
            }
            BlockOpen::ListItem {
                marker,
                indent,
                content_offset,
            } => {
                self.leaf = LeafState::Text {
                    kind: BlockKind::ListItem { marker, indent },
                    start: c.line,
                    content_start: (c.remainder_span.start + content_offset).min(content_end),
                    start_line: c.index,
                    last_line_end: content_end,
                    last_line: c.index,
                };
            }
        }
    }

    fn consume_fence_line(&mut self, c: &LineClass) {
        let LeafState::Fence {
            kind,
            info,
            start,
            start_line,
            ..
        } = std::mem::replace(&mut self.leaf, LeafState::None)
        else {
            return;
        };

        if CodeFence::closes(kind, c.fence_sig) {
            self.emit(
                BlockKind::FencedCode { kind, info },
                start.cover(c.line),
                Span {
                    start: start.end,
                    end: c.line.start,
                },
                (start_line, c.index),
            );
            return;
        }

        self.leaf = LeafState::Fence {
            kind,
            info,
            start,
            start_line,
            last_line_end: c.line.end,
            last_line: c.index,
        };
    }

    fn extend_text(&mut self, c: &LineClass) {
        match &mut self.leaf {
            LeafState::Text {
                last_line_end,
                last_line,
                ..
            } => {
                *last_line_end = c.remainder_span.end;
                *last_line = c.index;
            }
            _ => {
                self.leaf = LeafState::Text {
                    kind: BlockKind::Paragraph,
                    start: c.line,
                    content_start: c.remainder_span.start,
                    start_line: c.index,
                    last_line_end: c.remainder_span.end,
                    last_line: c.index,
                };
            }
        }
    }

    fn flush_text(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Text {
            kind,
            start,
            content_start,
            start_line,
            last_line_end,
            last_line,
        } = prev
        {
            self.emit(
                kind,
                Span {
                    start: start.start,
                    end: last_line_end,
                },
                Span {
                    start: content_start,
                    end: last_line_end,
                },
                (start_line, last_line),
            );
        } else {
            self.leaf = prev; // put back non-text leaf (e.g. fence)
        }
    }

    fn flush_fence(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Fence {
            kind,
            info,
            start,
            start_line,
            last_line_end,
            last_line,
        } = prev
        {
            // Unterminated fence: emit as fence block anyway
            self.emit(
                BlockKind::FencedCode { kind, info },
                Span {
                    start: start.start,
                    end: last_line_end,
                },
                Span {
                    start: start.end.min(last_line_end),
                    end: last_line_end,
                },
                (start_line, last_line),
            );
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
