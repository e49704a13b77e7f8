use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use markdown_liveview_config::SyncSettings;
use markdown_liveview_engine::{
    ScrollSync, SyncOptions, SyncOutcome, ViewRole, render_markdown,
    sync::{Clock, SystemClock},
};

use crate::pane::{PreviewPane, SourcePane, Viewport};

pub fn sync_options(settings: &SyncSettings) -> SyncOptions {
    SyncOptions {
        fallback_line_height: settings.fallback_line_height,
        ..SyncOptions::default()
    }
    .with_line_offset(settings.line_offset)
    .with_debounce(Duration::from_millis(settings.debounce_ms))
}

fn read_markdown(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub struct App<C: Clock = SystemClock> {
    path: PathBuf,
    sync: ScrollSync<SourcePane, PreviewPane, C>,
    focus: ViewRole,
    /// First terminal column of the preview pane, for routing mouse wheel events.
    preview_column: u16,
    status: String,
}

impl App {
    pub fn open(path: PathBuf, settings: &SyncSettings) -> Result<Self> {
        let content = read_markdown(&path)?;
        Self::with_clock(path, &content, settings, SystemClock)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(
        path: PathBuf,
        content: &str,
        settings: &SyncSettings,
        clock: C,
    ) -> Result<Self> {
        let mut sync = ScrollSync::with_clock(sync_options(settings), clock);
        let rendered = render_markdown(content);
        sync.initialize(
            Some(SourcePane::new(content)),
            Some(PreviewPane::new(rendered.markers)),
        )?;
        if settings.enabled {
            sync.enable()?;
        }

        log::info!(
            "opened {} (sync {}, line offset {})",
            path.display(),
            if settings.enabled { "on" } else { "off" },
            settings.line_offset
        );

        Ok(Self {
            path,
            sync,
            focus: ViewRole::Source,
            preview_column: u16::MAX,
            status: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn focus(&self) -> ViewRole {
        self.focus
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn is_sync_enabled(&self) -> bool {
        self.sync.is_enabled()
    }

    pub fn line_offset(&self) -> i64 {
        self.sync.line_offset()
    }

    pub fn source(&self) -> Option<&SourcePane> {
        self.sync.source()
    }

    pub fn preview(&self) -> Option<&PreviewPane> {
        self.sync.rendered()
    }

    /// Applies the current pane sizes. A new preview width rewraps every
    /// block, so the preview is re-aligned to the source afterwards.
    pub fn resize(
        &mut self,
        source_rows: usize,
        preview_column: u16,
        preview_width: usize,
        preview_rows: usize,
    ) {
        self.preview_column = preview_column;
        if let Some(source) = self.sync.source_mut() {
            source.set_visible_rows(source_rows);
        }
        let rewrapped = self
            .sync
            .rendered_mut()
            .is_some_and(|p| p.set_size(preview_width, preview_rows));
        if rewrapped {
            self.follow_source();
        }
    }

    /// Pane under terminal column `column`.
    pub fn role_at(&self, column: u16) -> ViewRole {
        if column >= self.preview_column {
            ViewRole::Rendered
        } else {
            ViewRole::Source
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.counterpart();
    }

    /// A user scroll of `role` by `rows`; the other pane follows if sync is on.
    pub fn scroll(&mut self, role: ViewRole, rows: i64) {
        if let Some(viewport) = self.viewport_mut(role) {
            viewport.scroll_by(rows);
        }
        self.pump();
    }

    pub fn scroll_focused(&mut self, rows: i64) {
        self.scroll(self.focus, rows);
    }

    pub fn page_focused(&mut self, pages: i64) {
        let page = self
            .viewport_mut(self.focus)
            .map_or(1, |v| v.visible_rows().max(1));
        self.scroll_focused(pages * page as i64);
    }

    /// Home / End.
    pub fn jump_focused(&mut self, to_end: bool) {
        if let Some(viewport) = self.viewport_mut(self.focus) {
            let top = if to_end { viewport.max_top() } else { 0 };
            viewport.scroll_to(top as f64);
        }
        self.pump();
    }

    pub fn toggle_sync(&mut self) {
        let enabled = self.sync.toggle();
        if enabled {
            self.follow_source();
        }
        self.status = format!("sync {}", if enabled { "on" } else { "off" });
    }

    pub fn adjust_line_offset(&mut self, delta: i64) {
        let offset = self.sync.line_offset().saturating_add(delta);
        self.sync.set_line_offset(offset);
        self.status = format!("line offset {offset}");
    }

    /// `base` with the enabled flag and line offset as they are now.
    pub fn sync_settings(&self, base: &SyncSettings) -> SyncSettings {
        SyncSettings {
            enabled: self.is_sync_enabled(),
            line_offset: self.line_offset(),
            ..base.clone()
        }
    }

    /// Re-reads the file and replaces both panes' content.
    pub fn reload(&mut self) -> Result<()> {
        let content = read_markdown(&self.path)?;
        let rendered = render_markdown(&content);
        let blocks = rendered.markers.len();

        if let Some(source) = self.sync.source_mut() {
            source.set_content(&content);
        }
        if let Some(preview) = self.sync.rendered_mut() {
            preview.set_blocks(rendered.markers);
        }
        self.follow_source();

        log::info!("reloaded {} ({blocks} blocks)", self.path.display());
        self.status = format!("reloaded, {blocks} blocks");
        Ok(())
    }

    pub fn tick(&mut self) {
        self.sync.tick();
    }

    fn follow_source(&mut self) {
        self.sync.force_sync();
        self.pump();
    }

    fn viewport_mut(&mut self, role: ViewRole) -> Option<&mut Viewport> {
        match role {
            ViewRole::Source => self.sync.source_mut().map(|p| &mut p.viewport),
            ViewRole::Rendered => self.sync.rendered_mut().map(|p| &mut p.viewport),
        }
    }

    /// Delivers pending scroll events until neither pane has moved.
    fn pump(&mut self) {
        loop {
            let source_events = self
                .viewport_mut(ViewRole::Source)
                .map_or(0, |v| v.take_scroll_events());
            let preview_events = self
                .viewport_mut(ViewRole::Rendered)
                .map_or(0, |v| v.take_scroll_events());
            if source_events + preview_events == 0 {
                break;
            }
            for _ in 0..source_events {
                self.dispatch(ViewRole::Source);
            }
            for _ in 0..preview_events {
                self.dispatch(ViewRole::Rendered);
            }
        }
    }

    fn dispatch(&mut self, role: ViewRole) {
        match self.sync.handle_scroll(role) {
            SyncOutcome::Synced { target, .. } => {
                log::trace!("{role} scroll synced to {:.1}", target.offset)
            }
            outcome => log::trace!("{role} scroll: {outcome:?}"),
        }
    }
}
