//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: gallery pane, scrubber column, narrative pane,
/// and a bottom status bar.
pub struct AppLayout {
    pub gallery_area: Rect,
    pub scrubber_area: Rect,
    pub narrative_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // panes (all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // image gallery
                Constraint::Length(3),      // scrubber track
                Constraint::Min(20),        // narrative text
            ])
            .split(rows[0]);

        Self {
            gallery_area: columns[0],
            scrubber_area: columns[1],
            narrative_area: columns[2],
            status_area: rows[1],
        }
    }

    /// Gallery content region inside the pane border — the measurable
    /// viewport the physics engine scrolls.
    pub fn gallery_viewport(&self) -> Rect {
        inner(self.gallery_area)
    }

    /// Narrative content region inside the pane border.
    pub fn narrative_viewport(&self) -> Rect {
        inner(self.narrative_area)
    }

    /// The scrubber track itself, inset one row from the column's ends.
    pub fn scrubber_track(&self) -> Rect {
        let area = self.scrubber_area;
        Rect {
            x: area.x,
            y: area.y.saturating_add(1),
            width: area.width,
            height: area.height.saturating_sub(2),
        }
    }
}

/// Shrink a rect by a one-cell border on all sides.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_terminal() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(
            layout.gallery_area.width + layout.scrubber_area.width + layout.narrative_area.width,
            120
        );
        assert!(layout.gallery_viewport().height < layout.gallery_area.height);
    }

    #[test]
    fn degenerate_area_never_underflows() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 2, 2));
        assert_eq!(layout.gallery_viewport().height, 0);
        assert_eq!(layout.narrative_viewport().height, 0);
    }
}
