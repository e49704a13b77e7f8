use std::time::Duration;

pub const DEFAULT_LINE_OFFSET: i64 = 3;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);
pub const DEFAULT_LINE_HEIGHT: f64 = 20.0;

/// Tunables for [`ScrollSync`](super::ScrollSync).
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOptions {
    /// Lines subtracted when mapping source to rendered and added on the way back.
    pub line_offset: i64,
    /// How long the guard stays up after the last sync.
    pub debounce: Duration,
    /// Used when the source view cannot report a usable line height.
    pub fallback_line_height: f64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            line_offset: DEFAULT_LINE_OFFSET,
            debounce: DEFAULT_DEBOUNCE,
            fallback_line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl SyncOptions {
    pub fn with_line_offset(mut self, line_offset: i64) -> Self {
        self.line_offset = line_offset;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
