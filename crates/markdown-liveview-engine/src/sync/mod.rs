/*!
 * # Scroll Synchronization
 *
 * Keeps a fixed-line-height source view and a variable-height rendered view
 * visually aligned while either one is scrolled.
 *
 * ## How a sync works
 *
 * ### Source → rendered
 * - The line at the top of the source viewport is `floor(scroll_top / line_height)`,
 *   shifted back by the tunable `line_offset`
 * - Rendered markers are scanned (in any order) for an exact match, else the
 *   nearest marker before and after that line
 * - Two brackets interpolate linearly; a single marker is scaled by how far
 *   the viewport top is through the current line
 * - With no usable markers both views are mapped by scroll percentage
 *
 * ### Rendered → source
 * - The first marker whose bottom edge has not scrolled past the viewport top
 *   leads; its line plus `line_offset` gives the source offset, plus the
 *   fraction of the node already scrolled past (at most one line)
 *
 * ### Guard window
 * - Every sync raises a guard and schedules its release `debounce` later,
 *   replacing any pending release
 * - While it is up, scroll events from the view we just wrote to are our own
 *   echo and are suppressed; events from the driving view keep syncing
 *
 * ## Modules
 *
 * - **`surface`**: view traits the host implements
 * - **`marker`**: marker nodes and their parsing
 * - **`mapping`**: the pure offset arithmetic
 * - **`guard`**: `SyncGuard` and the `Clock` it runs on
 * - **`options`**: tunables and their defaults
 * - **`engine`**: `ScrollSync`, lifecycle and listener handling
 *
 * Nothing in a scroll handler returns an error or panics: a tick that cannot
 * sync reports [`SyncOutcome::Skipped`] and writes nothing.
 */

pub mod engine;
pub mod guard;
pub mod mapping;
pub mod marker;
pub mod options;
pub mod surface;

pub use engine::{ScrollSync, SyncOutcome};
pub use guard::{Clock, SyncGuard, SystemClock};
pub use mapping::{Anchor, Extent, SkipReason, Target};
pub use marker::{Marker, MarkerError, MarkerNode, collect_markers};
pub use options::SyncOptions;
pub use surface::{ListenerId, RenderedSurface, ScrollSurface, SourceSurface, ViewRole};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("{role} view is missing")]
    MissingView { role: ViewRole },
    #[error("views have not been initialized")]
    NotInitialized,
}
