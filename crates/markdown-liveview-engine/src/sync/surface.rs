use std::fmt;

use super::marker::MarkerNode;

/// Which of the two synchronized views an event or write concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewRole {
    /// Fixed line height, line-indexed plain text.
    Source,
    /// Variable height, block-indexed rendered markup.
    Rendered,
}

impl ViewRole {
    pub fn counterpart(self) -> ViewRole {
        match self {
            ViewRole::Source => ViewRole::Rendered,
            ViewRole::Rendered => ViewRole::Source,
        }
    }
}

impl fmt::Display for ViewRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRole::Source => f.write_str("source"),
            ViewRole::Rendered => f.write_str("rendered"),
        }
    }
}

/// Handle returned when a scroll listener is attached to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A scrollable surface. All lengths are in the host's pixel unit.
///
/// Implementations clamp written offsets to `0..=scroll_height - client_height`
/// the way a browser clamps `scrollTop`.
pub trait ScrollSurface {
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, top: f64);
    /// Total scrollable content height.
    fn scroll_height(&self) -> f64;
    /// Height of the visible area.
    fn client_height(&self) -> f64;

    /// Attaches a scroll listener. The host delivers one
    /// [`ScrollSync::handle_scroll`](super::ScrollSync::handle_scroll) call per
    /// attached listener per scroll event.
    fn add_scroll_listener(&mut self) -> ListenerId;
    fn remove_scroll_listener(&mut self, id: ListenerId);
}

/// The plain text view.
pub trait SourceSurface: ScrollSurface {
    /// Computed line height from the live style, `None` if it cannot be resolved.
    fn computed_line_height(&self) -> Option<f64>;
}

/// The rendered view.
pub trait RenderedSurface: ScrollSurface {
    /// Marker-bearing nodes currently in the view, in document order.
    fn marker_nodes(&self) -> Vec<MarkerNode>;
}
