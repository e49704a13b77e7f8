use markdown_liveview_engine::{
    BlockMarker, MarkerNode, RenderedSurface, ScrollSurface, SourceSurface, sync::ListenerId,
};

use crate::layout::{PreviewLayout, Row, layout_blocks};

/// Scroll position of a pane in rows, plus the listeners attached to it.
///
/// Moving the viewport records a pending scroll event, the way a browser
/// queues one after `scrollTop` changes. The app drains it with
/// [`take_scroll_events`](Self::take_scroll_events) and delivers one call per
/// attached listener.
#[derive(Debug, Default)]
pub struct Viewport {
    top: usize,
    content_rows: usize,
    visible_rows: usize,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    scrolled: bool,
}

impl Viewport {
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn max_top(&self) -> usize {
        self.content_rows.saturating_sub(self.visible_rows)
    }

    /// Scrolls to `top`, rounded to a whole row and clamped to the range.
    pub fn scroll_to(&mut self, top: f64) {
        if !top.is_finite() {
            return;
        }
        let top = (top.round().max(0.0) as usize).min(self.max_top());
        if top != self.top {
            self.top = top;
            self.scrolled = true;
        }
    }

    pub fn scroll_by(&mut self, rows: i64) {
        self.scroll_to(self.top as f64 + rows as f64);
    }

    /// Number of listener calls owed for the last movement, then clears it.
    pub fn take_scroll_events(&mut self) -> usize {
        if std::mem::take(&mut self.scrolled) {
            self.listeners.len()
        } else {
            0
        }
    }

    /// Content or window size changed; the offset is re-clamped silently.
    fn resize(&mut self, content_rows: usize, visible_rows: usize) {
        self.content_rows = content_rows;
        self.visible_rows = visible_rows;
        self.top = self.top.min(self.max_top());
    }

    fn add_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}

macro_rules! impl_scroll_surface {
    ($pane:ty) => {
        impl ScrollSurface for $pane {
            fn scroll_top(&self) -> f64 {
                self.viewport.top as f64
            }

            fn set_scroll_top(&mut self, top: f64) {
                self.viewport.scroll_to(top);
            }

            fn scroll_height(&self) -> f64 {
                self.viewport.content_rows as f64
            }

            fn client_height(&self) -> f64 {
                self.viewport.visible_rows as f64
            }

            fn add_scroll_listener(&mut self) -> ListenerId {
                self.viewport.add_listener()
            }

            fn remove_scroll_listener(&mut self, id: ListenerId) {
                self.viewport.remove_listener(id);
            }
        }
    };
}

/// The raw file, one row per line.
#[derive(Debug, Default)]
pub struct SourcePane {
    lines: Vec<String>,
    pub viewport: Viewport,
}

impl SourcePane {
    pub fn new(content: &str) -> Self {
        let mut pane = Self::default();
        pane.set_content(content);
        pane
    }

    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(str::to_string).collect();
        let visible = self.viewport.visible_rows;
        self.viewport.resize(self.lines.len(), visible);
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.viewport.resize(self.lines.len(), rows);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(self.viewport.top)
            .take(self.viewport.visible_rows)
            .map(|(i, l)| (i, l.as_str()))
    }
}

impl_scroll_surface!(SourcePane);

impl SourceSurface for SourcePane {
    fn computed_line_height(&self) -> Option<f64> {
        Some(1.0)
    }
}

/// Rendered blocks laid out as wrapped rows.
#[derive(Debug, Default)]
pub struct PreviewPane {
    blocks: Vec<BlockMarker>,
    width: usize,
    layout: PreviewLayout,
    pub viewport: Viewport,
}

impl PreviewPane {
    pub fn new(blocks: Vec<BlockMarker>) -> Self {
        let mut pane = Self::default();
        pane.set_blocks(blocks);
        pane
    }

    /// Replaces every block; the old marker geometry is discarded.
    pub fn set_blocks(&mut self, blocks: Vec<BlockMarker>) {
        self.blocks = blocks;
        self.relayout();
    }

    /// Sets the pane size. Returns true when the width change moved blocks.
    pub fn set_size(&mut self, width: usize, rows: usize) -> bool {
        let rewrapped = width != self.width;
        if rewrapped {
            self.width = width;
            self.relayout();
        }
        self.viewport.resize(self.layout.rows.len(), rows);
        rewrapped
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.layout
            .rows
            .iter()
            .skip(self.viewport.top)
            .take(self.viewport.visible_rows)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn relayout(&mut self) {
        self.layout = layout_blocks(&self.blocks, self.width);
        let visible = self.viewport.visible_rows;
        self.viewport.resize(self.layout.rows.len(), visible);
        log::debug!(
            "preview laid out {} blocks in {} rows at width {}",
            self.blocks.len(),
            self.layout.rows.len(),
            self.width
        );
    }
}

impl_scroll_surface!(PreviewPane);

impl RenderedSurface for PreviewPane {
    fn marker_nodes(&self) -> Vec<MarkerNode> {
        self.layout.nodes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_liveview_engine::render_markdown;
    use pretty_assertions::assert_eq;

    fn source(lines: usize, visible: usize) -> SourcePane {
        let content: String = (0..lines).map(|i| format!("line {i}\n")).collect();
        let mut pane = SourcePane::new(&content);
        pane.set_visible_rows(visible);
        pane
    }

    #[test]
    fn test_scroll_is_clamped_and_rounded() {
        let mut pane = source(30, 10);

        pane.set_scroll_top(7.6);
        assert_eq!(pane.scroll_top(), 8.0);

        pane.set_scroll_top(500.0);
        assert_eq!(pane.scroll_top(), 20.0);

        pane.set_scroll_top(-3.0);
        assert_eq!(pane.scroll_top(), 0.0);

        pane.set_scroll_top(f64::NAN);
        assert_eq!(pane.scroll_top(), 0.0);
    }

    #[test]
    fn test_movement_owes_one_event_per_listener() {
        let mut pane = source(30, 10);
        let first = pane.add_scroll_listener();
        pane.add_scroll_listener();

        pane.viewport.scroll_by(3);
        assert_eq!(pane.viewport.take_scroll_events(), 2);
        assert_eq!(pane.viewport.take_scroll_events(), 0);

        // Writing the current offset again is not a scroll.
        pane.set_scroll_top(3.0);
        assert_eq!(pane.viewport.take_scroll_events(), 0);

        pane.remove_scroll_listener(first);
        pane.viewport.scroll_by(1);
        assert_eq!(pane.viewport.take_scroll_events(), 1);
    }

    #[test]
    fn test_shrinking_content_reclamps_without_event() {
        let mut pane = source(30, 10);
        pane.add_scroll_listener();
        pane.viewport.scroll_by(20);
        pane.viewport.take_scroll_events();

        pane.set_content("a\nb\nc\n");
        assert_eq!(pane.scroll_top(), 0.0);
        assert_eq!(pane.viewport.take_scroll_events(), 0);
    }

    #[test]
    fn test_visible_lines_follow_offset() {
        let mut pane = source(30, 3);
        pane.set_scroll_top(5.0);

        let visible: Vec<_> = pane.visible_lines().collect();
        assert_eq!(visible, vec![(5, "line 5"), (6, "line 6"), (7, "line 7")]);
    }

    #[test]
    fn test_preview_width_change_moves_markers() {
        let rendered = render_markdown("one two three four\n\nnext\n");
        let mut pane = PreviewPane::new(rendered.markers);

        assert!(pane.set_size(40, 10));
        assert_eq!(pane.marker_nodes()[1].offset_top, 2.0);
        assert!(!pane.set_size(40, 12));

        assert!(pane.set_size(8, 10));
        assert_eq!(pane.marker_nodes()[1].offset_top, 4.0);
        assert_eq!(pane.scroll_height(), 5.0);
    }
}
