//! # Inline Substitution
//!
//! The first stage of the transformer: an ordered list of substitution rules
//! applied to the text of a block.
//!
//! ## Architecture
//!
//! - Code spans are raw zones. They are cut out first with a cursor scan
//!   and no rule ever runs inside them.
//! - Everything outside a code span is HTML-escaped, then rewritten by each
//!   rule in [`rules::RULES`] order. Later rules see the output of earlier
//!   ones, so order is part of the contract (images before links, strong
//!   before emphasis).
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` (Text, CodeSpan)
//! - **`cursor`**: byte cursor with absolute position tracking
//! - **`parser`**: `parse_inline()` raw zone splitting
//! - **`rules`**: `SubstitutionRule` table and `render_inline()`
//! - **`runs`**: `render_inline_spans()`, the same substitution output read
//!   back as styled text runs for hosts that do not render HTML

pub mod cursor;
pub mod parser;
pub mod rules;
pub mod runs;
pub mod types;

pub use parser::parse_inline;
pub use rules::{SubstitutionRule, render_inline};
pub use runs::{InlineStyle, StyledRun, render_inline_spans};
pub use types::InlineNode;
