//! Narrative pane — the case-study text, scrolled by its own physics
//! and styled per measured line kind.
//!
//! Rendering consumes the same [`NarrativeLayout`] the simulation
//! measured this frame, so what the auto-tracking targeted is exactly
//! what ends up on screen.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use crate::core::geometry::{NarrativeLayout, NarrativeLineKind};

use super::theme::Theme;

/// Pivot index under a pointer row, for click-to-scrub. `position` is
/// the pane's committed scroll offset; `row` is relative to the
/// viewport top.
pub fn heading_at(layout: &NarrativeLayout, position: f64, row: u16) -> Option<usize> {
    let index = position.round() as usize + usize::from(row);
    match layout.lines().get(index)?.kind {
        NarrativeLineKind::Heading(pivot) => Some(pivot),
        _ => None,
    }
}

/// The narrative widget — created fresh each frame.
pub struct NarrativeWidget<'a> {
    layout: &'a NarrativeLayout,
    position: f64,
    /// Pivot index whose section is currently tracking the active item.
    active_pivot: Option<usize>,
}

impl<'a> NarrativeWidget<'a> {
    pub fn new(layout: &'a NarrativeLayout, position: f64, active_pivot: Option<usize>) -> Self {
        Self {
            layout,
            position,
            active_pivot,
        }
    }
}

impl Widget for NarrativeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let first = self.position.round().max(0.0) as usize;
        let visible = self
            .layout
            .lines()
            .iter()
            .skip(first)
            .take(usize::from(area.height));

        for (row, line) in visible.enumerate() {
            let style = match line.kind {
                NarrativeLineKind::Heading(pivot) if self.active_pivot == Some(pivot) => {
                    Theme::active_heading_style()
                }
                NarrativeLineKind::Heading(_) => Theme::heading_style(),
                NarrativeLineKind::Body(_) => Theme::body_style(),
                NarrativeLineKind::Text => Theme::text_style(),
                NarrativeLineKind::Meta => Theme::meta_style(),
                NarrativeLineKind::Blank => continue,
            };
            buf.set_stringn(
                area.x,
                area.y + row as u16,
                &line.text,
                usize::from(area.width),
                style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::ProjectData;

    fn demo_layout() -> NarrativeLayout {
        let project = ProjectData::demo();
        NarrativeLayout::measure(
            &project.narrative,
            &project.meta,
            40,
            20.0,
            &[1.0, 0.0, 0.0, 0.0],
        )
    }

    #[test]
    fn heading_hit_test_resolves_the_pivot() {
        let layout = demo_layout();
        let offset = layout.heading_offset("main-mural").unwrap();

        // Pane scrolled so that heading sits three rows below the top.
        let position = offset - 3.0;
        assert_eq!(heading_at(&layout, position, 3), Some(1));
        // A body or blank row is not a heading.
        assert_eq!(heading_at(&layout, position, 4), None);
    }

    #[test]
    fn heading_hit_test_past_the_end_is_none() {
        let layout = demo_layout();
        assert_eq!(heading_at(&layout, 1e6, 0), None);
    }

    #[test]
    fn render_clips_to_the_viewport() {
        let layout = demo_layout();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        NarrativeWidget::new(&layout, 0.0, Some(0)).render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(!top.trim().is_empty());
    }
}
