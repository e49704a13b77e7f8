use crate::parsing::rope::span::Span;

/// An inline segment with byte spans relative to the parsed string's base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text that the substitution rules may rewrite.
    Text(Span),
    /// A code span (backtick-delimited). This is a raw zone.
    CodeSpan {
        /// Full span including backticks.
        full: Span,
        /// Inner span (content between backticks).
        inner: Span,
    },
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::CodeSpan { full, .. } => *full,
        }
    }
}
