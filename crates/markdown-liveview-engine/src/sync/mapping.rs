//! Pure offset mapping between the two views.
//!
//! Nothing here touches a view; the engine snapshots geometry into
//! [`Extent`]s, calls one of these functions and writes the result.

use super::marker::Marker;

/// Scroll geometry of one view at the moment of a sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl Extent {
    /// Largest valid scroll offset; zero or negative when nothing overflows.
    pub fn max_scroll(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// Why a sync tick wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// One side has no scrollable range (content shorter than the viewport).
    DegenerateLayout,
    /// Markers exist but none could anchor the target line.
    NoAnchor,
}

/// How a target offset was derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A marker sits exactly on the target line.
    Exact { line: usize },
    /// Linear interpolation between two bracketing markers.
    Interpolated { before: usize, after: usize },
    /// Single nearest marker, scaled by the progress through the line.
    Nearest { line: usize },
    /// Proportional mapping of the scrollable ranges.
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub offset: f64,
    pub anchor: Anchor,
}

/// Result of scanning the marker set for a target line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bracket {
    pub exact: Option<Marker>,
    /// Greatest line strictly below the target.
    pub before: Option<Marker>,
    /// Least line strictly above the target.
    pub after: Option<Marker>,
}

impl Bracket {
    /// Exact match first, else `before`, else `after`.
    pub fn resolved(&self) -> Option<Marker> {
        self.exact.or(self.before).or(self.after)
    }
}

/// Scans `markers` in any order for the ones around `target_line`.
///
/// Keeps running best candidates so the input need not be sorted; among
/// duplicates the first one seen wins.
pub fn find_bracket(markers: &[Marker], target_line: usize) -> Bracket {
    let mut bracket = Bracket::default();
    for &m in markers {
        if m.source_line == target_line {
            if bracket.exact.is_none() {
                bracket.exact = Some(m);
            }
        } else if m.source_line < target_line {
            if bracket.before.is_none_or(|b| m.source_line > b.source_line) {
                bracket.before = Some(m);
            }
        } else if bracket.after.is_none_or(|a| m.source_line < a.source_line) {
            bracket.after = Some(m);
        }
    }
    bracket
}

/// Applies `from`'s scroll fraction to `to`'s range.
///
/// `None` when either side has nothing to scroll.
pub fn percentage(from: Extent, to: Extent) -> Option<f64> {
    let from_range = from.max_scroll();
    let to_range = to.max_scroll();
    if !has_range(from_range) || !has_range(to_range) {
        return None;
    }
    Some(from.scroll_top / from_range * to_range)
}

fn has_range(range: f64) -> bool {
    range.is_finite() && range > 0.0
}

/// Line at the top of the source viewport after the offset correction.
pub fn target_line(scroll_top: f64, line_height: f64, line_offset: i64) -> usize {
    let visible = (scroll_top / line_height).floor().max(0.0) as i64;
    visible.saturating_sub(line_offset).max(0) as usize
}

/// Maps the source view's offset to a rendered view offset.
///
/// The progress through a line is the fractional part of
/// `scroll_top / line_height`, measured on the visible line rather than on
/// the offset-corrected target line. Measured from the target line it would
/// never drop below `line_offset`.
pub fn source_to_rendered(
    source: Extent,
    line_height: f64,
    line_offset: i64,
    markers: &[Marker],
    rendered: Extent,
) -> Result<Target, SkipReason> {
    if markers.is_empty() {
        return percentage(source, rendered)
            .map(|offset| Target {
                offset,
                anchor: Anchor::Percentage,
            })
            .ok_or(SkipReason::DegenerateLayout);
    }

    let target = target_line(source.scroll_top, line_height, line_offset);
    let bracket = find_bracket(markers, target);
    let marker = bracket.resolved().ok_or(SkipReason::NoAnchor)?;

    // Progress through the line at the viewport top, nominally [0, 1).
    let line_progress = (source.scroll_top / line_height).fract();

    if marker.source_line != target
        && let (Some(before), Some(after)) = (bracket.before, bracket.after)
        && after.source_line != before.source_line
    {
        let span = (after.source_line - before.source_line) as f64;
        let weight = ((target - before.source_line) as f64 + line_progress) / span;
        return Ok(Target {
            offset: before.offset_top + (after.offset_top - before.offset_top) * weight,
            anchor: Anchor::Interpolated {
                before: before.source_line,
                after: after.source_line,
            },
        });
    }

    let anchor = if marker.source_line == target {
        Anchor::Exact { line: target }
    } else {
        Anchor::Nearest {
            line: marker.source_line,
        }
    };
    Ok(Target {
        offset: marker.offset_top + marker.height * line_progress,
        anchor,
    })
}

/// Maps the rendered view's offset to a source view offset.
///
/// `markers` must be in document order: the first one whose bottom edge is
/// still at or below the viewport top leads.
pub fn rendered_to_source(
    rendered: Extent,
    markers: &[Marker],
    line_height: f64,
    line_offset: i64,
    source: Extent,
) -> Result<Target, SkipReason> {
    let top = rendered.scroll_top;
    let Some(lead) = markers.iter().find(|m| m.bottom() >= top) else {
        return percentage(rendered, source)
            .map(|offset| Target {
                offset,
                anchor: Anchor::Percentage,
            })
            .ok_or(SkipReason::DegenerateLayout);
    };

    let line = (lead.source_line as i64).saturating_add(line_offset).max(0);
    let scrolled_past = if lead.height > 0.0 {
        ((top - lead.offset_top) / lead.height).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(Target {
        offset: line as f64 * line_height + scrolled_past * line_height,
        anchor: Anchor::Nearest {
            line: lead.source_line,
        },
    })
}
