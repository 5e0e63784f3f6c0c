//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling). Each pane owns its physics exclusively; the sync
//! coordinator only reads the gallery position through its accessor.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::content::ProjectData;
use crate::core::geometry::{GalleryLayout, LayoutQuery, NarrativeLayout};
use crate::core::physics::PanePhysics;
use crate::core::sync::SyncCoordinator;
use crate::ui::layout::AppLayout;

/// Which pane grabbed the pointer on the last press. Drag and release
/// events route to the capturing pane no matter where the cursor is —
/// a drag must not be lost when it leaves the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapture {
    GalleryBody,
    NarrativeBody,
    ScrubberTrack,
}

/// Top-level application state.
pub struct AppState {
    /// The case study being shown. Immutable after startup.
    pub project: ProjectData,
    /// Physics tuning and timing parameters.
    pub config: AppConfig,
    /// Image gallery pane physics — owned here, stepped every frame.
    pub gallery: PanePhysics,
    /// Narrative text pane physics.
    pub narrative: PanePhysics,
    /// Reveal fraction per pivot section, in narrative order.
    pub expansion: Vec<f64>,
    /// Active-item signal owner and tracking-window timer.
    pub sync: SyncCoordinator,
    /// Pane currently holding the pointer, if any.
    pub capture: Option<PointerCapture>,
    /// Last known terminal size, updated on resize.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(project: ProjectData, config: AppConfig) -> Self {
        let pivots = project.pivots();
        let gallery_items = project.gallery();
        // Sections tied to the initially active (first) item start fully
        // revealed; everything else starts collapsed.
        let expansion = pivots
            .iter()
            .map(|pivot| {
                let initially_active = gallery_items
                    .first()
                    .is_some_and(|item| item.id == pivot.target_id);
                if initially_active {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        let gallery = PanePhysics::new(config.gallery_tuning());
        let narrative = PanePhysics::new(config.narrative_tuning());
        let sync = SyncCoordinator::new(config.tracking_window());

        Self {
            project,
            config,
            gallery,
            narrative,
            expansion,
            sync,
            capture: None,
            terminal_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Id of the currently active gallery item.
    pub fn active_id(&self) -> Option<String> {
        self.project
            .gallery()
            .get(self.sync.active_index())
            .map(|item| item.id.clone())
    }

    /// Measure the gallery pane's geometry for the current terminal size.
    pub fn gallery_layout(&self, layout: &AppLayout) -> GalleryLayout {
        let viewport = layout.gallery_viewport();
        GalleryLayout::measure(
            &self.project.gallery(),
            f64::from(viewport.height),
            &self.config.gallery_metrics(),
        )
    }

    /// Measure the narrative pane's geometry, including the current
    /// reveal fractions.
    pub fn narrative_layout(&self, layout: &AppLayout) -> NarrativeLayout {
        let viewport = layout.narrative_viewport();
        NarrativeLayout::measure(
            &self.project.narrative,
            &self.project.meta,
            viewport.width,
            f64::from(viewport.height),
            &self.expansion,
        )
    }

    /// One display frame: step both panes, refresh the active-item
    /// signal, and run the narrative auto-tracking window.
    pub fn advance(&mut self, now: Instant) {
        let layout = AppLayout::from_area(self.terminal_area);
        if layout.gallery_viewport().height == 0 || layout.narrative_viewport().height == 0 {
            // Terminal too small to have measurable panes — retry next frame.
            return;
        }

        // Gallery first: its committed position feeds the sync signal.
        let gallery_layout = self.gallery_layout(&layout);
        let snap_points = gallery_layout.snap_points();
        self.gallery
            .step(gallery_layout.max_scroll(), &snap_points);

        self.sync
            .observe(now, self.gallery.position(), &gallery_layout);

        self.advance_expansion();

        // Narrative second, against geometry that already includes this
        // frame's expansion change.
        let narrative_layout = self.narrative_layout(&layout);
        if self.sync.tracking(now) {
            if let Some(active_id) = self.active_id() {
                if let Some(offset) = narrative_layout.heading_offset(&active_id) {
                    let target = offset - self.config.heading_margin_rows;
                    self.narrative
                        .retarget(target, narrative_layout.max_scroll());
                }
            }
        }
        self.narrative.step(narrative_layout.max_scroll(), &[]);
    }

    /// Move each pivot section's reveal fraction toward its resting
    /// state: 1 for sections tracking the active item, 0 otherwise.
    fn advance_expansion(&mut self) {
        let active_id = self.active_id();
        let dt = self.config.frame_interval().as_secs_f64();
        let rate = dt / self.config.reveal().as_secs_f64().max(dt);

        let pivots = self.project.pivots();
        for (i, fraction) in self.expansion.iter_mut().enumerate() {
            let open = pivots
                .get(i)
                .zip(active_id.as_deref())
                .is_some_and(|(pivot, id)| pivot.target_id == id);
            let goal = if open { 1.0 } else { 0.0 };
            if *fraction < goal {
                *fraction = (*fraction + rate).min(goal);
            } else if *fraction > goal {
                *fraction = (*fraction - rate).max(goal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn demo_state() -> AppState {
        let mut state = AppState::new(ProjectData::demo(), AppConfig::default());
        state.terminal_area = Rect::new(0, 0, 120, 40);
        state
    }

    #[test]
    fn first_section_starts_revealed() {
        let state = demo_state();
        assert_eq!(state.expansion[0], 1.0);
        assert!(state.expansion[1..].iter().all(|&f| f == 0.0));
    }

    #[test]
    fn advance_preserves_boundaries_for_both_panes() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let gallery_max = state.gallery_layout(&layout).max_scroll();

        state.gallery.wheel(10_000.0, gallery_max);
        let mut now = Instant::now();
        for _ in 0..200 {
            state.advance(now);
            now += Duration::from_millis(16);
            assert!(state.gallery.position() >= 0.0);
            assert!(state.gallery.position() <= gallery_max);
            assert!(state.narrative.position() >= 0.0);
        }
    }

    #[test]
    fn scrolling_to_last_item_flips_the_active_signal_and_reveal() {
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let gallery_layout = state.gallery_layout(&layout);
        let last = gallery_layout.item_count() - 1;
        let snap = gallery_layout.snap_position(last).unwrap();
        state.gallery.scrub_to(snap, gallery_layout.max_scroll());

        let mut now = Instant::now();
        for _ in 0..300 {
            state.advance(now);
            now += Duration::from_millis(16);
        }

        assert_eq!(state.sync.active_index(), last);
        // Last pivot fully revealed, first fully collapsed again.
        let n = state.expansion.len();
        assert_eq!(state.expansion[n - 1], 1.0);
        assert_eq!(state.expansion[0], 0.0);
    }

    #[test]
    fn demo_narrative_outgrows_a_full_screen_pane() {
        // The narrative pane must have scroll range at an ordinary
        // terminal size, or wheel input and auto-tracking both clamp
        // straight back to zero.
        let mut state = demo_state();
        let layout = AppLayout::from_area(state.terminal_area);
        let narrative = state.narrative_layout(&layout);
        assert!(narrative.max_scroll() > 0.0);

        state.narrative.wheel(3.0, narrative.max_scroll());
        assert!(state.narrative.target() > 0.0);
    }

    #[test]
    fn tiny_terminal_is_a_no_op_frame() {
        let mut state = demo_state();
        state.terminal_area = Rect::new(0, 0, 4, 2);
        let before = state.gallery.position();
        state.advance(Instant::now());
        assert_eq!(state.gallery.position(), before);
    }
}
