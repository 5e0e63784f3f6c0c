//! Per-pane scroll physics — the inertial drag / scrub engine.
//!
//! Each scrollable pane owns one [`PanePhysics`]. Input handlers mutate the
//! target position, velocity, and interaction mode; a per-frame [`step`]
//! integrates momentum, applies soft snapping, clamps to bounds, and eases
//! the rendered position toward the target. Rendering reads the committed
//! position — nothing here depends on any TUI crate.
//!
//! [`step`]: PanePhysics::step

/// Mutually exclusive interaction states of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneMode {
    /// No active interaction; momentum and snapping run free.
    #[default]
    Idle,
    /// Pointer held on the pane body — target follows the pointer.
    Dragging,
    /// Animated, eased approach toward a commanded target.
    Scrubbing,
    /// Pointer held on the scrubber track — target jumps with the pointer.
    ManualScrubbing,
}

/// Tunable constants for one pane.
///
/// The gallery and narrative panes deliberately use different gains and
/// decay rates; the asymmetry is a feel parameter, not an accident. The
/// three easing tiers (glide < drag < scrub) must stay ordered: dragging
/// tracks tightly, free glide feels weighty, commanded scrubs land smooth.
#[derive(Debug, Clone)]
pub struct PaneTuning {
    /// Multiplier applied to wheel deltas.
    pub wheel_gain: f64,
    /// Multiplier applied to pointer drag deltas.
    pub drag_gain: f64,
    /// Multiplicative momentum decay per frame.
    pub momentum_decay: f64,
    /// Momentum magnitude below which it is zeroed (finite decay tail).
    pub momentum_floor: f64,
    /// Momentum magnitude below which soft snapping engages.
    pub snap_threshold: f64,
    /// Fraction of the gap to the nearest snap point applied per frame.
    pub snap_ease: f64,
    /// Easing fraction while gliding (Idle / ManualScrubbing).
    pub glide_ease: f64,
    /// Easing fraction while dragging — tighter than glide.
    pub drag_ease: f64,
    /// Easing fraction while scrubbing to a commanded target.
    pub scrub_ease: f64,
    /// Remaining distance below which a scrub is considered arrived.
    pub arrive_epsilon: f64,
    /// Gap below which the position locks exactly onto the target.
    pub settle_epsilon: f64,
}

impl PaneTuning {
    /// Defaults for the image gallery pane.
    pub fn gallery() -> Self {
        Self {
            wheel_gain: 1.25,
            drag_gain: 1.5,
            momentum_decay: 0.97,
            momentum_floor: 1.0,
            snap_threshold: 1.0,
            snap_ease: 0.10,
            glide_ease: 0.10,
            drag_ease: 0.15,
            scrub_ease: 0.18,
            arrive_epsilon: 0.1,
            settle_epsilon: 1e-4,
        }
    }

    /// Defaults for the narrative text pane — no snapping, softer decay.
    pub fn narrative() -> Self {
        Self {
            wheel_gain: 1.0,
            momentum_decay: 0.95,
            momentum_floor: 0.1,
            ..Self::gallery()
        }
    }
}

/// Physics state for one scrollable pane.
///
/// Owned exclusively by the pane's controller. Cross-pane readers go
/// through [`position`] and friends — there is no shared mutable handle.
///
/// [`position`]: PanePhysics::position
#[derive(Debug, Clone)]
pub struct PanePhysics {
    /// Rendered scroll offset, kept within `[0, max_scroll]` by `step`.
    current: f64,
    /// Position the simulation steers toward; may transiently overshoot.
    target: f64,
    /// Instantaneous input-derived speed (seeds momentum, drives visuals).
    velocity: f64,
    /// Decaying carry-over speed applied to the target after a drag ends.
    momentum: f64,
    mode: PaneMode,
    /// Last pointer row seen while dragging.
    last_pointer: f64,
    tuning: PaneTuning,
}

impl PanePhysics {
    pub fn new(tuning: PaneTuning) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            velocity: 0.0,
            momentum: 0.0,
            mode: PaneMode::Idle,
            last_pointer: 0.0,
            tuning,
        }
    }

    // ── read-only accessors ─────────────────────────────────────

    /// The committed scroll offset.
    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn mode(&self) -> PaneMode {
        self.mode
    }

    /// Remaining target-to-position gap — the "velocity" the visual
    /// distortion layer derives its parameters from.
    pub fn displacement(&self) -> f64 {
        self.target - self.current
    }

    // ── input adapter ───────────────────────────────────────────

    /// Wheel input: displace the target by `delta` rows × wheel gain.
    pub fn wheel(&mut self, delta: f64, max_scroll: f64) {
        self.target += delta * self.tuning.wheel_gain;
        self.target = clamp(self.target, max_scroll);
    }

    /// Pointer pressed on the pane body: enter `Dragging`, anchor the
    /// pointer, and kill any carried speed. Cancels an in-flight scrub.
    pub fn begin_drag(&mut self, pointer: f64) {
        self.mode = PaneMode::Dragging;
        self.last_pointer = pointer;
        self.momentum = 0.0;
        self.velocity = 0.0;
    }

    /// Pointer moved while dragging: the target follows the pointer delta.
    pub fn drag_move(&mut self, pointer: f64, max_scroll: f64) {
        if self.mode != PaneMode::Dragging {
            return;
        }
        let delta = (self.last_pointer - pointer) * self.tuning.drag_gain;
        self.last_pointer = pointer;
        self.target += delta;
        self.velocity = delta;
        self.target = clamp(self.target, max_scroll);
    }

    /// Pointer released while dragging: the last drag velocity carries
    /// over as momentum and decays during free glide.
    pub fn end_drag(&mut self) {
        if self.mode == PaneMode::Dragging {
            self.mode = PaneMode::Idle;
            self.momentum = self.velocity;
        }
    }

    /// Explicit scroll-to command: eased approach rather than a jump.
    pub fn scrub_to(&mut self, target: f64, max_scroll: f64) {
        self.target = clamp(target, max_scroll);
        self.mode = PaneMode::Scrubbing;
        self.momentum = 0.0;
        self.velocity = 0.0;
    }

    /// Pointer pressed on the scrubber track itself: continuous,
    /// unanimated position control until release.
    pub fn begin_manual_scrub(&mut self) {
        self.mode = PaneMode::ManualScrubbing;
        self.momentum = 0.0;
        self.velocity = 0.0;
    }

    /// Re-target from the latest track pointer sample.
    pub fn manual_scrub_to(&mut self, target: f64, max_scroll: f64) {
        if self.mode == PaneMode::ManualScrubbing {
            self.target = clamp(target, max_scroll);
        }
    }

    pub fn end_manual_scrub(&mut self) {
        if self.mode == PaneMode::ManualScrubbing {
            self.mode = PaneMode::Idle;
        }
    }

    /// Overwrite the target without touching the interaction mode — used
    /// by the narrative auto-tracking window, which re-targets every
    /// frame while section heights are still changing.
    pub fn retarget(&mut self, target: f64, max_scroll: f64) {
        self.target = clamp(target, max_scroll);
    }

    // ── simulation ──────────────────────────────────────────────

    /// One simulation step. Call once per display frame.
    ///
    /// `snap_points` are the clamp-eligible snap offsets for this pane
    /// (empty for panes without snapping). `max_scroll` is recomputed by
    /// the caller from live geometry each frame.
    pub fn step(&mut self, max_scroll: f64, snap_points: &[f64]) {
        let max = max_scroll.max(0.0);
        let t = &self.tuning;

        match self.mode {
            PaneMode::Scrubbing => {
                self.current += (self.target - self.current) * t.scrub_ease;
                if (self.target - self.current).abs() < t.arrive_epsilon {
                    // Arrived — drop back to Idle with no residual pull.
                    self.mode = PaneMode::Idle;
                    self.momentum = 0.0;
                }
            }
            PaneMode::Dragging => {
                self.current += (self.target - self.current) * t.drag_ease;
            }
            PaneMode::Idle | PaneMode::ManualScrubbing => {
                self.target += self.momentum;
                self.momentum *= t.momentum_decay;
                if self.momentum.abs() < t.momentum_floor {
                    self.momentum = 0.0;
                }

                // Soft lock onto the nearest snap point once the glide has
                // nearly spent itself. Distances use the intended target,
                // not the rendered position.
                if self.momentum.abs() < t.snap_threshold {
                    if let Some(nearest) = nearest_snap(self.target, snap_points, max) {
                        self.target += (nearest - self.target) * t.snap_ease;
                    }
                }

                self.target = self.target.clamp(0.0, max);
                // Kill momentum at the boundaries so the pane doesn't
                // float against the edge.
                if self.target <= 0.0 || self.target >= max {
                    self.momentum = 0.0;
                }

                let diff = self.target - self.current;
                if diff.abs() < t.settle_epsilon {
                    self.current = self.target;
                    self.momentum = 0.0;
                } else {
                    self.current += diff * t.glide_ease;
                }
            }
        }

        // Boundary invariant: the committed position never leaves the
        // scrollable range, even if the viewport shrank this frame.
        self.current = self.current.clamp(0.0, max);
    }
}

fn clamp(value: f64, max_scroll: f64) -> f64 {
    value.clamp(0.0, max_scroll.max(0.0))
}

/// The snap point nearest to `target`, with each candidate clamped to the
/// scrollable range before the distance check.
fn nearest_snap(target: f64, snap_points: &[f64], max: f64) -> Option<f64> {
    let mut nearest = None;
    let mut min_dist = f64::INFINITY;
    for &point in snap_points {
        let point = point.clamp(0.0, max);
        let dist = (point - target).abs();
        if dist < min_dist {
            min_dist = dist;
            nearest = Some(point);
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> PanePhysics {
        PanePhysics::new(PaneTuning::gallery())
    }

    #[test]
    fn momentum_decays_to_exactly_zero() {
        let mut p = gallery();
        p.begin_drag(100.0);
        p.drag_move(66.6, 10_000.0); // velocity ≈ 50
        p.end_drag();
        assert!(p.momentum.abs() > 49.0);

        let mut steps = 0;
        while p.momentum != 0.0 {
            p.step(10_000.0, &[]);
            steps += 1;
            assert!(steps < 200, "momentum never reached zero");
        }
        // ln(50)/ln(1/0.97) ≈ 129 frames to cross the 1.0 floor.
        assert!(steps < 140, "decay tail too long: {steps} steps");
    }

    #[test]
    fn snap_converges_and_stays() {
        let snaps = [0.0, 400.0, 900.0];
        let mut p = gallery();
        p.scrub_to(390.0, 900.0);
        // Let the scrub arrive, then leave it Idle with zero momentum.
        for _ in 0..100 {
            p.step(900.0, &snaps);
        }
        assert_eq!(p.mode(), PaneMode::Idle);

        for _ in 0..300 {
            p.step(900.0, &snaps);
        }
        assert!((p.position() - 400.0).abs() <= 0.5, "pos={}", p.position());

        // Stability: no oscillation away from the snap point afterward.
        for _ in 0..200 {
            p.step(900.0, &snaps);
            assert!((p.position() - 400.0).abs() <= 0.5);
        }
    }

    #[test]
    fn scroll_to_item_arrives_and_returns_to_idle() {
        let snaps = [0.0, 500.0, 1000.0];
        let mut p = gallery();
        p.scrub_to(1000.0, 1000.0);
        assert_eq!(p.mode(), PaneMode::Scrubbing);
        for _ in 0..60 {
            p.step(1000.0, &snaps);
        }
        assert!((p.position() - 1000.0).abs() < 1.0, "pos={}", p.position());
        assert_eq!(p.mode(), PaneMode::Idle);
    }

    #[test]
    fn boundary_invariant_under_input_barrage() {
        let max = 500.0;
        let snaps = [0.0, 250.0, 500.0];
        let mut p = gallery();

        // Hard fling downward past the end.
        p.begin_drag(400.0);
        for row in (0..400).rev().step_by(40) {
            p.drag_move(row as f64, max);
            p.step(max, &snaps);
            assert!(p.position() >= 0.0 && p.position() <= max);
        }
        p.end_drag();
        for _ in 0..200 {
            p.step(max, &snaps);
            assert!(p.position() >= 0.0 && p.position() <= max);
        }

        // Wheel hammering upward past the start.
        for _ in 0..50 {
            p.wheel(-30.0, max);
            p.step(max, &snaps);
            assert!(p.position() >= 0.0 && p.position() <= max);
        }
    }

    #[test]
    fn drag_release_seeds_momentum_glide() {
        let mut p = gallery();
        p.begin_drag(50.0);
        p.drag_move(40.0, 2000.0);
        p.end_drag();
        assert_eq!(p.mode(), PaneMode::Idle);
        assert!(p.momentum > 0.0);

        let before = p.target();
        p.step(2000.0, &[]);
        assert!(p.target() > before, "momentum should push the target on");
    }

    #[test]
    fn modes_stay_mutually_exclusive() {
        let mut p = gallery();
        let max = 1000.0;

        p.begin_drag(10.0);
        assert_eq!(p.mode(), PaneMode::Dragging);
        p.drag_move(5.0, max);
        assert_eq!(p.mode(), PaneMode::Dragging);
        p.end_drag();
        assert_eq!(p.mode(), PaneMode::Idle);

        p.scrub_to(800.0, max);
        assert_eq!(p.mode(), PaneMode::Scrubbing);
        // A new drag cancels the scrub — never both.
        p.begin_drag(20.0);
        assert_eq!(p.mode(), PaneMode::Dragging);
        p.end_drag();

        p.begin_manual_scrub();
        assert_eq!(p.mode(), PaneMode::ManualScrubbing);
        p.manual_scrub_to(300.0, max);
        assert_eq!(p.mode(), PaneMode::ManualScrubbing);
        p.end_manual_scrub();
        assert_eq!(p.mode(), PaneMode::Idle);
    }

    #[test]
    fn scrub_target_clamps_at_command_time() {
        let mut p = gallery();
        p.scrub_to(5000.0, 1000.0);
        assert_eq!(p.target(), 1000.0);
        p.scrub_to(-50.0, 1000.0);
        assert_eq!(p.target(), 0.0);
    }

    #[test]
    fn settle_locks_position_exactly_onto_target() {
        let mut p = gallery();
        p.wheel(8.0, 1000.0); // target = 10, no snap points
        for _ in 0..400 {
            p.step(1000.0, &[]);
        }
        assert_eq!(p.position(), p.target());
        assert_eq!(p.momentum, 0.0);
    }

    #[test]
    fn zero_max_scroll_pins_everything_to_origin() {
        let mut p = gallery();
        p.wheel(100.0, 0.0);
        p.step(0.0, &[]);
        assert_eq!(p.position(), 0.0);
        assert_eq!(p.target(), 0.0);
    }

    #[test]
    fn drag_tracks_tighter_than_glide() {
        // Same displacement, one frame: dragging closes more of the gap.
        let mut dragging = gallery();
        dragging.begin_drag(100.0);
        dragging.drag_move(0.0, 10_000.0); // target = 150
        let mut gliding = gallery();
        gliding.wheel(120.0, 10_000.0); // target = 150

        dragging.step(10_000.0, &[]);
        gliding.step(10_000.0, &[]);
        assert!(dragging.position() > gliding.position());
    }
}
