//! Cross-pane synchronization — active-item detection and the narrative
//! auto-tracking window.
//!
//! The coordinator reads the gallery pane's position each frame (never
//! mutates it), owns the active-item signal, and times the window during
//! which the narrative pane re-targets onto the active section's heading.
//! The window is a two-state machine rather than scattered clock checks,
//! so expiry and cancellation are explicit and testable.

use std::time::{Duration, Instant};

use crate::core::geometry::LayoutQuery;

/// Whether the narrative pane is currently being auto-tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackingWindow {
    Inactive,
    /// Open until `deadline`; long enough to cover the content-reveal
    /// animation plus a buffer, since heading offsets keep shifting while
    /// sibling sections expand and collapse.
    Active { deadline: Instant },
}

/// Owner of the active-item signal.
#[derive(Debug)]
pub struct SyncCoordinator {
    /// Index into the visible gallery of the item nearest the viewport
    /// centre last frame.
    active: usize,
    window: TrackingWindow,
    window_len: Duration,
}

impl SyncCoordinator {
    pub fn new(window_len: Duration) -> Self {
        Self {
            active: 0,
            window: TrackingWindow::Inactive,
            window_len,
        }
    }

    /// The current active gallery item index.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Run nearest-centre detection against the gallery's live geometry.
    ///
    /// Returns `Some(new_index)` only on change (edge-triggered); the
    /// tracking window opens on that edge. Items without obtainable
    /// bounds are skipped for this frame.
    pub fn observe<L: LayoutQuery>(
        &mut self,
        now: Instant,
        position: f64,
        layout: &L,
    ) -> Option<usize> {
        let viewport_centre = position + layout.viewport() / 2.0;

        let mut candidate = None;
        let mut min_distance = f64::INFINITY;
        for index in 0..layout.item_count() {
            let Some(bounds) = layout.item_bounds(index) else {
                continue;
            };
            let distance = (bounds.center() - viewport_centre).abs();
            if distance < min_distance {
                min_distance = distance;
                candidate = Some(index);
            }
        }

        let candidate = candidate?;
        if candidate == self.active {
            return None;
        }
        self.active = candidate;
        self.window = TrackingWindow::Active {
            deadline: now + self.window_len,
        };
        tracing::debug!(item = candidate, "active gallery item changed");
        Some(candidate)
    }

    /// Is the auto-tracking window open? Expires it lazily on read.
    pub fn tracking(&mut self, now: Instant) -> bool {
        match self.window {
            TrackingWindow::Inactive => false,
            TrackingWindow::Active { deadline } => {
                if now >= deadline {
                    self.window = TrackingWindow::Inactive;
                    false
                } else {
                    true
                }
            }
        }
    }

    /// Close the window immediately (pane teardown).
    pub fn cancel(&mut self) {
        self.window = TrackingWindow::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{ItemBounds, SyntheticLayout};

    fn three_items() -> SyntheticLayout {
        SyntheticLayout {
            viewport: 200.0,
            content: 1100.0,
            items: vec![
                ItemBounds { top: 50.0, height: 100.0 },  // centre 100
                ItemBounds { top: 450.0, height: 100.0 }, // centre 500
                ItemBounds { top: 850.0, height: 100.0 }, // centre 900
            ],
        }
    }

    #[test]
    fn edges_fire_exactly_once_per_crossing() {
        let layout = three_items();
        let mut sync = SyncCoordinator::new(Duration::from_millis(850));
        let now = Instant::now();

        let mut edges = Vec::new();
        let mut position = 0.0;
        while position <= 800.0 {
            if let Some(index) = sync.observe(now, position, &layout) {
                edges.push((position, index));
            }
            position += 10.0;
        }

        // Viewport centre is position + 100: item 1 wins past 300, item 2
        // past 700 — one emission per boundary, none in between.
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].1, 1);
        assert_eq!(edges[1].1, 2);
        assert!(edges[0].0 > 200.0 && edges[0].0 <= 310.0);
        assert!(edges[1].0 > 600.0 && edges[1].0 <= 710.0);
        assert_eq!(sync.active_index(), 2);
    }

    #[test]
    fn stationary_position_never_re_emits() {
        let layout = three_items();
        let mut sync = SyncCoordinator::new(Duration::from_millis(850));
        let now = Instant::now();
        assert!(sync.observe(now, 400.0, &layout).is_some());
        for _ in 0..50 {
            assert!(sync.observe(now, 400.0, &layout).is_none());
        }
    }

    #[test]
    fn window_opens_on_edge_and_expires() {
        let layout = three_items();
        let mut sync = SyncCoordinator::new(Duration::from_millis(850));
        let t0 = Instant::now();

        assert!(!sync.tracking(t0));
        sync.observe(t0, 400.0, &layout).unwrap();
        assert!(sync.tracking(t0));
        assert!(sync.tracking(t0 + Duration::from_millis(849)));
        assert!(!sync.tracking(t0 + Duration::from_millis(850)));
        // Once expired it stays closed.
        assert!(!sync.tracking(t0 + Duration::from_millis(851)));
    }

    #[test]
    fn cancel_closes_the_window() {
        let layout = three_items();
        let mut sync = SyncCoordinator::new(Duration::from_secs(60));
        let t0 = Instant::now();
        sync.observe(t0, 400.0, &layout).unwrap();
        assert!(sync.tracking(t0));
        sync.cancel();
        assert!(!sync.tracking(t0));
    }

    #[test]
    fn unreadable_items_are_skipped_for_the_frame() {
        let layout = SyntheticLayout {
            viewport: 200.0,
            content: 0.0,
            items: vec![],
        };
        let mut sync = SyncCoordinator::new(Duration::from_millis(850));
        // No geometry at all: no candidate, no edge, active unchanged.
        assert!(sync.observe(Instant::now(), 0.0, &layout).is_none());
        assert_eq!(sync.active_index(), 0);
    }
}
