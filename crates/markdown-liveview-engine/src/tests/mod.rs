//! Test doubles shared by the unit tests.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use crate::sync::{
    Clock, ListenerId, MarkerNode, RenderedSurface, ScrollSurface, SourceSurface,
};

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

#[derive(Default)]
struct Scroll {
    top: f64,
    writes: usize,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl Scroll {
    fn clamp(top: f64, max: f64) -> f64 {
        // `min` ignores a NaN max, unlike `clamp`.
        top.min(max).max(0.0)
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

/// Text view with `lines` rows of `line_height` in a 400px viewport.
pub struct FakeSource {
    line_height: f64,
    lines: usize,
    scroll: Scroll,
}

impl FakeSource {
    pub const CLIENT_HEIGHT: f64 = 400.0;

    pub fn new(line_height: f64, lines: usize) -> Self {
        Self {
            line_height,
            lines,
            scroll: Scroll::default(),
        }
    }

    /// User scroll: moves without counting as a programmatic write.
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll.top = Scroll::clamp(top, self.scroll_height() - self.client_height());
    }

    pub fn set_line_height(&mut self, line_height: f64) {
        self.line_height = line_height;
    }

    pub fn writes(&self) -> usize {
        self.scroll.writes
    }

    pub fn listener_count(&self) -> usize {
        self.scroll.listeners.len()
    }
}

impl ScrollSurface for FakeSource {
    fn scroll_top(&self) -> f64 {
        self.scroll.top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_to(top);
        self.scroll.writes += 1;
    }

    fn scroll_height(&self) -> f64 {
        self.line_height * self.lines as f64
    }

    fn client_height(&self) -> f64 {
        Self::CLIENT_HEIGHT
    }

    fn add_scroll_listener(&mut self) -> ListenerId {
        self.scroll.add_listener()
    }

    fn remove_scroll_listener(&mut self, id: ListenerId) {
        self.scroll.remove_listener(id);
    }
}

impl SourceSurface for FakeSource {
    fn computed_line_height(&self) -> Option<f64> {
        Some(self.line_height)
    }
}

pub struct FakeRendered {
    scroll_height: f64,
    client_height: f64,
    markers: Vec<MarkerNode>,
    scroll: Scroll,
}

impl FakeRendered {
    pub fn new(scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_height,
            client_height,
            markers: vec![],
            scroll: Scroll::default(),
        }
    }

    pub fn with_markers(mut self, markers: Vec<MarkerNode>) -> Self {
        self.markers = markers;
        self
    }

    pub fn writes(&self) -> usize {
        self.scroll.writes
    }

    pub fn listener_count(&self) -> usize {
        self.scroll.listeners.len()
    }
}

impl ScrollSurface for FakeRendered {
    fn scroll_top(&self) -> f64 {
        self.scroll.top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll.top = Scroll::clamp(top, self.scroll_height - self.client_height);
        self.scroll.writes += 1;
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn client_height(&self) -> f64 {
        self.client_height
    }

    fn add_scroll_listener(&mut self) -> ListenerId {
        self.scroll.add_listener()
    }

    fn remove_scroll_listener(&mut self, id: ListenerId) {
        self.scroll.remove_listener(id);
    }
}

impl RenderedSurface for FakeRendered {
    fn marker_nodes(&self) -> Vec<MarkerNode> {
        self.markers.clone()
    }
}
