pub mod parsing;
pub mod render;
pub mod sync;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use parsing::inline::{InlineStyle, StyledRun, render_inline_spans};
pub use render::{BlockMarker, MARKER_ATTRIBUTE, Rendered, render_markdown};
pub use sync::{
    MarkerNode, RenderedSurface, ScrollSurface, ScrollSync, SourceSurface, SyncError, SyncOptions,
    SyncOutcome, ViewRole,
};
