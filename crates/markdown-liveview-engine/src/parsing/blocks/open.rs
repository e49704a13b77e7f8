use super::kinds::{CodeFence, FenceKind, Heading, ListItem, ListMarker, ThematicBreak};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen {
    FencedCode {
        kind: FenceKind,
        info: Option<String>,
    },
    Heading {
        level: u8,
        content_offset: usize,
    },
    ThematicBreak,
    ListItem {
        marker: ListMarker,
        indent: usize,
        content_offset: usize,
    },
}

/// Detects a leaf opener on a prefix-stripped line.
///
/// Precedence: fence, heading, thematic break, list item. Thematic break
/// goes before list items so `- - -` is a rule, not a bullet.
pub fn try_open_leaf(remainder: &str) -> Option<BlockOpen> {
    if let Some(sig) = CodeFence::sig(remainder) {
        return Some(BlockOpen::FencedCode {
            kind: CodeFence::kind(sig),
            info: CodeFence::info(remainder),
        });
    }
    if let Some((level, content_offset)) = Heading::parse(remainder) {
        return Some(BlockOpen::Heading {
            level,
            content_offset,
        });
    }
    if ThematicBreak::matches(remainder) {
        return Some(BlockOpen::ThematicBreak);
    }
    if let Some((marker, indent, content_offset)) = ListItem::parse(remainder) {
        return Some(BlockOpen::ListItem {
            marker,
            indent,
            content_offset,
        });
    }
    None
}
