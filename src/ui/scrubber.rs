//! Scrubber column — a vertical track with one mark per gallery item and
//! a handle that mirrors the gallery's scroll progress.
//!
//! The row/fraction mapping lives here as free functions so the mouse
//! handler and the renderer share one geometry and cannot drift apart.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use crate::core::geometry::{GalleryLayout, LayoutQuery};
use crate::core::projection::span_fraction;

use super::theme::Theme;

// ───────────────────────────────────────── geometry ──────────

/// What a press on the scrubber column landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubberHit {
    /// The mark of a specific gallery item.
    Mark(usize),
    /// Bare track between marks.
    Track,
}

/// Terminal row for a span fraction in `[0, 1]` along `track`.
pub fn row_for_fraction(track: Rect, fraction: f64) -> u16 {
    if track.height <= 1 {
        return track.y;
    }
    let span = f64::from(track.height - 1);
    track.y + (fraction.clamp(0.0, 1.0) * span).round() as u16
}

/// Inverse of [`row_for_fraction`]: span fraction for a terminal row.
pub fn fraction_for_row(track: Rect, row: u16) -> f64 {
    if track.height <= 1 {
        return 0.0;
    }
    let offset = f64::from(row.saturating_sub(track.y));
    (offset / f64::from(track.height - 1)).clamp(0.0, 1.0)
}

/// Rows of every item mark, in item order.
pub fn mark_rows(layout: &GalleryLayout, track: Rect) -> Vec<u16> {
    let Some((first, last)) = layout.snap_span() else {
        return Vec::new();
    };
    (0..layout.item_count())
        .filter_map(|i| layout.snap_position(i))
        .map(|snap| row_for_fraction(track, span_fraction(snap, first, last)))
        .collect()
}

/// Hit-test a press at `row` against the marks, falling back to the
/// bare track. Marks win so a press near one scrubs to that item.
pub fn hit_test(layout: &GalleryLayout, track: Rect, row: u16) -> ScrubberHit {
    for (i, mark) in mark_rows(layout, track).into_iter().enumerate() {
        if mark == row {
            return ScrubberHit::Mark(i);
        }
    }
    ScrubberHit::Track
}

// ───────────────────────────────────────── widget ────────────

/// The scrubber widget — created fresh each frame.
pub struct ScrubberWidget<'a> {
    layout: &'a GalleryLayout,
    position: f64,
    active: usize,
}

impl<'a> ScrubberWidget<'a> {
    pub fn new(layout: &'a GalleryLayout, position: f64, active: usize) -> Self {
        Self {
            layout,
            position,
            active,
        }
    }
}

impl Widget for ScrubberWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let x = area.x + area.width / 2;

        for y in area.y..area.y + area.height {
            buf[(x, y)].set_symbol("│").set_style(Theme::track_style());
        }

        for (i, row) in mark_rows(self.layout, area).into_iter().enumerate() {
            let style = if i == self.active {
                Theme::active_mark_style()
            } else {
                Theme::mark_style()
            };
            buf[(x, row)].set_symbol("●").set_style(style);
        }

        // Handle drawn last so it reads over a mark it is passing.
        if let Some((first, last)) = self.layout.snap_span() {
            let row = row_for_fraction(area, span_fraction(self.position, first, last));
            buf[(x, row)].set_symbol("█").set_style(Theme::handle_style());
        }
    }
}
