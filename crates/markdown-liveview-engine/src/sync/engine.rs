use super::{
    SyncError,
    guard::{Clock, SyncGuard, SystemClock},
    mapping::{self, Extent, SkipReason, Target},
    marker::collect_markers,
    options::SyncOptions,
    surface::{ListenerId, RenderedSurface, ScrollSurface, SourceSurface, ViewRole},
};

/// What a single handler invocation did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The counterpart of `driver` was scrolled to `target`.
    Synced { driver: ViewRole, target: Target },
    /// Dropped because the counterpart is inside its guard window.
    Suppressed,
    /// Not enabled, or no views bound.
    Inactive,
    /// Nothing sensible to write this tick.
    Skipped(SkipReason),
}

struct Bound<S, R> {
    source: S,
    rendered: R,
    listeners: Option<(ListenerId, ListenerId)>,
}

/// Bidirectional scroll synchronizer for one editor instance.
///
/// Lifecycle: [`new`](Self::new) → [`initialize`](Self::initialize) →
/// [`enable`](Self::enable) / [`disable`](Self::disable) any number of times →
/// [`destroy`](Self::destroy). The host calls
/// [`handle_scroll`](Self::handle_scroll) once per attached listener whenever a
/// view scrolls, and [`tick`](Self::tick) from its event loop so a pending
/// guard release fires even when no further scroll arrives.
pub struct ScrollSync<S, R, C = SystemClock> {
    views: Option<Bound<S, R>>,
    options: SyncOptions,
    guard: SyncGuard,
    cached_line_height: Option<f64>,
    clock: C,
}

impl<S, R> ScrollSync<S, R, SystemClock>
where
    S: SourceSurface,
    R: RenderedSurface,
{
    pub fn new(options: SyncOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<S, R, C> ScrollSync<S, R, C>
where
    S: SourceSurface,
    R: RenderedSurface,
    C: Clock,
{
    pub fn with_clock(options: SyncOptions, clock: C) -> Self {
        Self {
            views: None,
            options,
            guard: SyncGuard::default(),
            cached_line_height: None,
            clock,
        }
    }

    /// Binds the two views. Listeners are not attached until [`enable`](Self::enable).
    ///
    /// Rebinding replaces (and detaches from) any previous pair. If either
    /// view is absent the engine is left unbound.
    pub fn initialize(&mut self, source: Option<S>, rendered: Option<R>) -> Result<(), SyncError> {
        self.disable();
        self.views = None;
        self.cached_line_height = None;

        let (source, rendered) = match (source, rendered) {
            (Some(source), Some(rendered)) => (source, rendered),
            (None, _) => return Err(missing(ViewRole::Source)),
            (_, None) => return Err(missing(ViewRole::Rendered)),
        };

        self.views = Some(Bound {
            source,
            rendered,
            listeners: None,
        });
        log::debug!("scroll sync initialized");
        Ok(())
    }

    /// Attaches one scroll listener per view. Enabling twice is a no-op.
    pub fn enable(&mut self) -> Result<(), SyncError> {
        let Some(views) = self.views.as_mut() else {
            log::warn!("scroll sync enable ignored: {}", SyncError::NotInitialized);
            return Err(SyncError::NotInitialized);
        };
        if views.listeners.is_none() {
            let source = views.source.add_scroll_listener();
            let rendered = views.rendered.add_scroll_listener();
            views.listeners = Some((source, rendered));
            log::debug!("scroll sync enabled");
        }
        Ok(())
    }

    /// Detaches the listeners. Safe to call when already disabled.
    pub fn disable(&mut self) {
        if let Some(views) = self.views.as_mut()
            && let Some((source, rendered)) = views.listeners.take()
        {
            views.source.remove_scroll_listener(source);
            views.rendered.remove_scroll_listener(rendered);
            log::debug!("scroll sync disabled");
        }
        self.guard.cancel();
    }

    /// Flips the enabled state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
            false
        } else {
            self.enable().is_ok()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.views.as_ref().is_some_and(|v| v.listeners.is_some())
    }

    /// True while the guard window is open, judged against the clock rather
    /// than the last [`tick`](Self::tick).
    pub fn is_syncing(&self) -> bool {
        self.guard
            .pending_release()
            .is_some_and(|at| self.clock.now() < at)
    }

    pub fn line_offset(&self) -> i64 {
        self.options.line_offset
    }

    /// Takes effect on the next sync.
    pub fn set_line_offset(&mut self, line_offset: i64) {
        self.options.line_offset = line_offset;
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Forgets the memoized line height; call after font size or zoom changes.
    pub fn invalidate_cache(&mut self) {
        self.cached_line_height = None;
    }

    pub fn source(&self) -> Option<&S> {
        self.views.as_ref().map(|v| &v.source)
    }

    pub fn rendered(&self) -> Option<&R> {
        self.views.as_ref().map(|v| &v.rendered)
    }

    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.views.as_mut().map(|v| &mut v.source)
    }

    pub fn rendered_mut(&mut self) -> Option<&mut R> {
        self.views.as_mut().map(|v| &mut v.rendered)
    }

    /// Fires the guard release if its delay has elapsed.
    pub fn tick(&mut self) {
        if self.guard.poll(self.clock.now()) {
            log::trace!("sync guard released");
        }
    }

    /// Listener body for a scroll event on `role`.
    ///
    /// While the guard is held for one view, events from the other view are
    /// the echo of our own write and are suppressed. Further events from the
    /// driving view re-arm the window and sync again.
    pub fn handle_scroll(&mut self, role: ViewRole) -> SyncOutcome {
        self.tick();
        if !self.is_enabled() {
            return SyncOutcome::Inactive;
        }
        if self.guard.driver().is_some_and(|driver| driver != role) {
            log::trace!("suppressed {role} scroll inside guard window");
            return SyncOutcome::Suppressed;
        }
        self.sync_from(role)
    }

    /// Immediately maps source to rendered, ignoring any pending guard window.
    ///
    /// Used after the rendered content has been replaced.
    pub fn force_sync(&mut self) -> SyncOutcome {
        if !self.is_enabled() {
            return SyncOutcome::Inactive;
        }
        self.sync_from(ViewRole::Source)
    }

    /// Disables, cancels the guard and hands the views back.
    pub fn destroy(mut self) -> Option<(S, R)> {
        self.disable();
        self.cached_line_height = None;
        self.views.take().map(|v| (v.source, v.rendered))
    }

    fn sync_from(&mut self, driver: ViewRole) -> SyncOutcome {
        let now = self.clock.now();
        self.guard.arm(driver, now, self.options.debounce);

        let line_height = self.line_height();
        let line_offset = self.options.line_offset;
        let Some(views) = self.views.as_mut() else {
            return SyncOutcome::Inactive;
        };

        let source = extent(&views.source);
        let rendered = extent(&views.rendered);
        let markers = collect_markers(&views.rendered.marker_nodes());

        let result = match driver {
            ViewRole::Source => {
                mapping::source_to_rendered(source, line_height, line_offset, &markers, rendered)
            }
            ViewRole::Rendered => {
                mapping::rendered_to_source(rendered, &markers, line_height, line_offset, source)
            }
        };

        match result {
            Ok(target) => {
                log::trace!(
                    "{driver} -> {}: {:.1} via {:?}",
                    driver.counterpart(),
                    target.offset,
                    target.anchor
                );
                match driver {
                    ViewRole::Source => views.rendered.set_scroll_top(target.offset),
                    ViewRole::Rendered => views.source.set_scroll_top(target.offset),
                }
                SyncOutcome::Synced { driver, target }
            }
            Err(reason) => {
                log::debug!("{driver} sync skipped: {reason:?}");
                SyncOutcome::Skipped(reason)
            }
        }
    }

    fn line_height(&mut self) -> f64 {
        if let Some(cached) = self.cached_line_height {
            return cached;
        }
        let computed = self
            .views
            .as_ref()
            .and_then(|v| v.source.computed_line_height())
            .filter(|h| h.is_finite() && *h > 0.0);
        let line_height = computed.unwrap_or_else(|| {
            log::debug!(
                "source line height unresolved, using {}",
                self.options.fallback_line_height
            );
            self.options.fallback_line_height
        });
        self.cached_line_height = Some(line_height);
        line_height
    }
}

fn extent(view: &impl ScrollSurface) -> Extent {
    Extent {
        scroll_top: view.scroll_top(),
        scroll_height: view.scroll_height(),
        client_height: view.client_height(),
    }
}

fn missing(role: ViewRole) -> SyncError {
    let err = SyncError::MissingView { role };
    log::warn!("scroll sync not initialized: {err}");
    err
}
