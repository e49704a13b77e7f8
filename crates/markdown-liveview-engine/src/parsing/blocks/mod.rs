//! # Block Structuring
//!
//! Two-phase block parsing with a container stack.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    holding local facts (line number, blockquote depth, fence signature,
//!    blank status)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps the container
//!    stack and emits `BlockNode`s as leaves open and close
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `BlockKind`, `ContainerFrame`
//! - **`kinds`**: per-construct delimiter knowledge (quote, fence, heading, list item, rule)
//! - **`classify`**: `MarkdownLineClassifier`
//! - **`containers`**: `ContainerPath`
//! - **`open`**: `try_open_leaf` opener dispatch
//! - **`builder`**: `BlockBuilder`
//!
//! ## Key Invariants
//!
//! - Blank lines never produce a node, so line coverage is sparse
//! - `start_line` is non-decreasing across the emitted blocks
//! - Fenced code blocks are raw zones: no block or inline parsing inside

pub mod builder;
pub mod classify;
pub mod containers;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{BlockKind, BlockNode, ContainerFrame};
