//! Input handling — maps key/mouse events to pane physics commands.
//!
//! Input never writes pane positions directly: every gesture becomes a
//! physics command (wheel impulse, drag delta, scrub target) and the
//! frame step does the actual movement.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::geometry::LayoutQuery;
use crate::ui::layout::AppLayout;
use crate::ui::narrative::heading_at;
use crate::ui::scrubber::{self, ScrubberHit};

use super::state::{AppState, PointerCapture};

// ── keys ────────────────────────────────────────────────────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_to_adjacent_item(state, 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_to_adjacent_item(state, -1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_item(state, 0);
        }
        KeyCode::Char('G') | KeyCode::End => {
            let count = state.project.gallery().len();
            if count > 0 {
                scroll_to_item(state, count - 1);
            }
        }
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            scroll_to_item(state, index);
        }
        KeyCode::PageDown => {
            wheel_gallery(state, 1.0, pane_rows(state));
        }
        KeyCode::PageUp => {
            wheel_gallery(state, -1.0, pane_rows(state));
        }
        _ => {}
    }
}

fn scroll_to_adjacent_item(state: &mut AppState, step: isize) {
    let count = state.project.gallery().len() as isize;
    let next = state.sync.active_index() as isize + step;
    if (0..count).contains(&next) {
        scroll_to_item(state, next as usize);
    }
}

/// Command the gallery to centre item `index` — the scrub that every
/// item-addressed gesture funnels into.
fn scroll_to_item(state: &mut AppState, index: usize) {
    let layout = AppLayout::from_area(state.terminal_area);
    let gallery = state.gallery_layout(&layout);
    if let Some(snap) = gallery.snap_position(index) {
        state.gallery.scrub_to(snap, gallery.max_scroll());
        tracing::debug!("scrub to item {index} at {snap:.1}");
    }
}

/// Rows one page gesture covers — the visible gallery height.
fn pane_rows(state: &AppState) -> f64 {
    let layout = AppLayout::from_area(state.terminal_area);
    f64::from(layout.gallery_viewport().height)
}

fn wheel_gallery(state: &mut AppState, direction: f64, rows: f64) {
    let layout = AppLayout::from_area(state.terminal_area);
    let max = state.gallery_layout(&layout).max_scroll();
    state.gallery.wheel(direction * rows, max);
}

// ── mouse ───────────────────────────────────────────────────────

/// Process a mouse event. Press decides which pane captures the
/// pointer; drag and release route to the capturing pane even when the
/// cursor has left it.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_press(state, &layout, mouse.column, mouse.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            handle_drag(state, &layout, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            handle_release(state);
        }
        MouseEventKind::ScrollDown => {
            handle_wheel(state, &layout, mouse.column, mouse.row, 1.0);
        }
        MouseEventKind::ScrollUp => {
            handle_wheel(state, &layout, mouse.column, mouse.row, -1.0);
        }
        _ => {}
    }
}

fn handle_press(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    if point_in_rect(layout.scrubber_area, col, row) {
        let track = layout.scrubber_track();
        let gallery = state.gallery_layout(layout);
        match scrubber::hit_test(&gallery, track, row) {
            ScrubberHit::Mark(index) => {
                // A mark press is an item command, not a hold on the track.
                scroll_to_item(state, index);
            }
            ScrubberHit::Track => {
                state.capture = Some(PointerCapture::ScrubberTrack);
                state.gallery.begin_manual_scrub();
                scrub_track_to_row(state, layout, row);
            }
        }
        return;
    }

    if point_in_rect(layout.gallery_area, col, row) {
        state.capture = Some(PointerCapture::GalleryBody);
        state.gallery.begin_drag(f64::from(row));
        return;
    }

    if point_in_rect(layout.narrative_area, col, row) {
        let narrative = state.narrative_layout(layout);
        let inner = layout.narrative_viewport();
        if point_in_rect(inner, col, row) {
            let pane_row = row - inner.y;
            if let Some(pivot) = heading_at(&narrative, state.narrative.position(), pane_row) {
                // Heading press pivots the gallery to the tracked item.
                let target_id = state.project.pivots()[pivot].target_id.clone();
                if let Some(index) = state.project.gallery_index(&target_id) {
                    scroll_to_item(state, index);
                }
                return;
            }
        }
        state.capture = Some(PointerCapture::NarrativeBody);
        state.narrative.begin_drag(f64::from(row));
    }
}

fn handle_drag(state: &mut AppState, layout: &AppLayout, row: u16) {
    match state.capture {
        Some(PointerCapture::GalleryBody) => {
            let max = state.gallery_layout(layout).max_scroll();
            state.gallery.drag_move(f64::from(row), max);
        }
        Some(PointerCapture::NarrativeBody) => {
            let max = state.narrative_layout(layout).max_scroll();
            state.narrative.drag_move(f64::from(row), max);
        }
        Some(PointerCapture::ScrubberTrack) => {
            scrub_track_to_row(state, layout, row);
        }
        None => {}
    }
}

fn handle_release(state: &mut AppState) {
    match state.capture.take() {
        Some(PointerCapture::GalleryBody) => state.gallery.end_drag(),
        Some(PointerCapture::NarrativeBody) => state.narrative.end_drag(),
        Some(PointerCapture::ScrubberTrack) => state.gallery.end_manual_scrub(),
        None => {}
    }
}

fn handle_wheel(state: &mut AppState, layout: &AppLayout, col: u16, row: u16, direction: f64) {
    let rows = direction * state.config.wheel_step_rows;
    if point_in_rect(layout.narrative_area, col, row) {
        let max = state.narrative_layout(layout).max_scroll();
        state.narrative.wheel(rows, max);
    } else {
        // Gallery and scrubber columns both wheel the gallery.
        let max = state.gallery_layout(layout).max_scroll();
        state.gallery.wheel(rows, max);
    }
}

/// Map a pointer row on the track to a scrub target inside the snap
/// span, using the same row/fraction geometry the scrubber renders with.
fn scrub_track_to_row(state: &mut AppState, layout: &AppLayout, row: u16) {
    let track = layout.scrubber_track();
    let gallery = state.gallery_layout(layout);
    let Some((first, last)) = gallery.snap_span() else {
        return;
    };
    let fraction = scrubber::fraction_for_row(track, row);
    let target = first + fraction * (last - first);
    state.gallery.manual_scrub_to(target, gallery.max_scroll());
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::content::ProjectData;
    use crate::core::physics::PaneMode;
    use ratatui::layout::Rect;

    fn demo_state() -> AppState {
        let mut state = AppState::new(ProjectData::demo(), AppConfig::default());
        state.terminal_area = Rect::new(0, 0, 120, 40);
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);

        let mut state = demo_state();
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn j_scrubs_the_gallery_to_the_next_item() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.gallery.mode(), PaneMode::Scrubbing);
        assert!(state.gallery.target() > 0.0);
    }

    #[test]
    fn k_on_the_first_item_is_a_no_op() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('k')));
        assert_eq!(state.gallery.mode(), PaneMode::Idle);
        assert_eq!(state.gallery.target(), 0.0);
    }

    #[test]
    fn digit_out_of_range_is_ignored() {
        let mut state = demo_state();
        handle_key(&mut state, key(KeyCode::Char('9')));
        assert_eq!(state.gallery.mode(), PaneMode::Idle);
    }

    #[test]
    fn gallery_press_captures_and_drag_survives_leaving_the_pane() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let area = layout.gallery_area;

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), area.x + 2, area.y + 5),
        );
        assert_eq!(state.capture, Some(PointerCapture::GalleryBody));
        assert_eq!(state.gallery.mode(), PaneMode::Dragging);

        // Pointer now over the narrative pane; the drag still goes to
        // the gallery.
        let far = layout.narrative_area;
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Drag(MouseButton::Left), far.x + 2, far.y + 2),
        );
        assert_eq!(state.gallery.mode(), PaneMode::Dragging);
        assert_eq!(state.narrative.mode(), PaneMode::Idle);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(state.capture, None);
        assert_eq!(state.gallery.mode(), PaneMode::Idle);
    }

    #[test]
    fn track_press_enters_manual_scrub_until_release() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let track = layout.scrubber_track();
        let gallery = state.gallery_layout(&layout);
        let marks = scrubber::mark_rows(&gallery, track);
        let free_row = (track.y..track.y + track.height)
            .find(|r| !marks.contains(r))
            .unwrap();

        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), track.x + 1, free_row),
        );
        assert_eq!(state.capture, Some(PointerCapture::ScrubberTrack));
        assert_eq!(state.gallery.mode(), PaneMode::ManualScrubbing);

        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(state.gallery.mode(), PaneMode::Idle);
    }

    #[test]
    fn wheel_routes_by_pane() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);

        let g = layout.gallery_area;
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, g.x + 1, g.y + 1),
        );
        assert!(state.gallery.target() > 0.0);
        assert_eq!(state.narrative.target(), 0.0);

        let n = layout.narrative_area;
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, n.x + 1, n.y + 1),
        );
        assert!(state.narrative.target() > 0.0);
    }

    #[test]
    fn gallery_wheel_gain_outruns_narrative() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);

        let g = layout.gallery_area;
        let n = layout.narrative_area;
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, g.x + 1, g.y + 1),
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::ScrollDown, n.x + 1, n.y + 1),
        );
        assert!(state.gallery.target() > state.narrative.target());
    }
}
