//! Pure projection from physics state to visual parameters — scrubber
//! handle placement and per-item distortion. Nothing here is ever read
//! back into the simulation.

/// Where along a snap span a position sits, in `[0, 1]`.
///
/// Degenerate spans (single item, or first == last snap) short-circuit
/// to 0 instead of dividing by zero.
pub fn span_fraction(position: f64, first_snap: f64, last_snap: f64) -> f64 {
    let span = last_snap - first_snap;
    if span == 0.0 {
        return 0.0;
    }
    ((position - first_snap) / span).clamp(0.0, 1.0)
}

/// Plain scroll progress in `[0, 1]`; 0 when the content fits entirely.
pub fn scroll_fraction(position: f64, max_scroll: f64) -> f64 {
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (position / max_scroll).clamp(0.0, 1.0)
}

/// Cosmetic distortion derived from the target-to-position gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distortion {
    /// Degrees, clamped to ±12.
    pub rotation: f64,
    /// Vertical stretch factor, `1.0 ..= 1.15`.
    pub scale_y: f64,
    /// Degrees, clamped to ±6.
    pub skew: f64,
    /// Whole-stack recession, `0.96 ..= 1.0`.
    pub group_scale: f64,
}

impl Distortion {
    pub fn from_velocity(v: f64) -> Self {
        let v_abs = v.abs();
        Self {
            rotation: (v * 0.1).clamp(-12.0, 12.0),
            scale_y: 1.0 + (v_abs * 0.0015).min(0.15),
            skew: (v * 0.06).clamp(-6.0, 6.0),
            group_scale: 1.0 - (v_abs * 0.0002).min(0.04),
        }
    }

    /// True once the motion is too small to be worth rendering.
    pub fn is_settled(&self) -> bool {
        self.rotation.abs() < 0.05 && self.skew.abs() < 0.05 && self.scale_y < 1.001
    }
}
