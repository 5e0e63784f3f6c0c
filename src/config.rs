//! User configuration — physics tuning and persistence.
//!
//! Every feel constant of the scroll engine is a config field with the
//! shipped defaults, stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).

use std::path::PathBuf;
use std::time::Duration;

use crate::core::geometry::GalleryMetrics;
use crate::core::physics::PaneTuning;

/// Application configuration — all tunable engine parameters.
///
/// The gallery and narrative panes intentionally carry different gains
/// and decay rates; both sets are exposed so the asymmetry stays a
/// parameter rather than a hard-coded contract.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ── input gains ────────────────────────────────────────────
    pub gallery_wheel_gain: f64,
    pub narrative_wheel_gain: f64,
    pub drag_gain: f64,
    /// Rows one wheel notch scrolls before the pane gain applies.
    pub wheel_step_rows: f64,

    // ── glide & snap ───────────────────────────────────────────
    pub gallery_momentum_decay: f64,
    pub narrative_momentum_decay: f64,
    pub gallery_momentum_floor: f64,
    pub narrative_momentum_floor: f64,
    pub snap_ease: f64,
    pub glide_ease: f64,
    pub drag_ease: f64,
    pub scrub_ease: f64,

    // ── sync timing ────────────────────────────────────────────
    /// Narrative auto-tracking window after an active-item change.
    pub tracking_window_ms: u64,
    /// Length of a pivot section's reveal/collapse animation. Keep it
    /// shorter than the tracking window so retargeting covers it.
    pub reveal_ms: u64,
    /// Rows above the active heading the narrative pane stops at.
    pub heading_margin_rows: f64,

    // ── gallery card metrics ───────────────────────────────────
    pub big_rows: f64,
    pub small_rows: f64,
    pub gap_rows: f64,

    // ── frame loop ─────────────────────────────────────────────
    pub fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gallery_wheel_gain: 1.25,
            narrative_wheel_gain: 1.0,
            drag_gain: 1.5,
            wheel_step_rows: 3.0,
            gallery_momentum_decay: 0.97,
            narrative_momentum_decay: 0.95,
            gallery_momentum_floor: 1.0,
            narrative_momentum_floor: 0.1,
            snap_ease: 0.10,
            glide_ease: 0.10,
            drag_ease: 0.15,
            scrub_ease: 0.18,
            tracking_window_ms: 850,
            reveal_ms: 700,
            heading_margin_rows: 1.0,
            big_rows: 16.0,
            small_rows: 8.0,
            gap_rows: 2.0,
            fps: 60,
        }
    }
}

impl AppConfig {
    // ── derived views ──────────────────────────────────────────

    pub fn gallery_tuning(&self) -> PaneTuning {
        PaneTuning {
            wheel_gain: self.gallery_wheel_gain,
            drag_gain: self.drag_gain,
            momentum_decay: self.gallery_momentum_decay,
            momentum_floor: self.gallery_momentum_floor,
            snap_ease: self.snap_ease,
            glide_ease: self.glide_ease,
            drag_ease: self.drag_ease,
            scrub_ease: self.scrub_ease,
            ..PaneTuning::gallery()
        }
    }

    pub fn narrative_tuning(&self) -> PaneTuning {
        PaneTuning {
            wheel_gain: self.narrative_wheel_gain,
            drag_gain: self.drag_gain,
            momentum_decay: self.narrative_momentum_decay,
            momentum_floor: self.narrative_momentum_floor,
            snap_ease: self.snap_ease,
            glide_ease: self.glide_ease,
            drag_ease: self.drag_ease,
            scrub_ease: self.scrub_ease,
            ..PaneTuning::narrative()
        }
    }

    pub fn gallery_metrics(&self) -> GalleryMetrics {
        GalleryMetrics {
            big_rows: self.big_rows,
            small_rows: self.small_rows,
            gap_rows: self.gap_rows,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1))
    }

    pub fn tracking_window(&self) -> Duration {
        Duration::from_millis(self.tracking_window_ms)
    }

    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    // ── persistence ────────────────────────────────────────────

    /// Load config from disk. On first run the defaults are written out
    /// so every tunable is discoverable in the file.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        let config = Self::default();
        if let Err(error) = config.save() {
            tracing::warn!(%error, "could not write default config");
        }
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "gallery_wheel_gain" => set_f64(&mut config.gallery_wheel_gain, value, 0.1, 10.0),
                "narrative_wheel_gain" => {
                    set_f64(&mut config.narrative_wheel_gain, value, 0.1, 10.0)
                }
                "drag_gain" => set_f64(&mut config.drag_gain, value, 0.1, 10.0),
                "wheel_step_rows" => set_f64(&mut config.wheel_step_rows, value, 0.5, 20.0),
                "gallery_momentum_decay" => {
                    set_f64(&mut config.gallery_momentum_decay, value, 0.5, 0.999)
                }
                "narrative_momentum_decay" => {
                    set_f64(&mut config.narrative_momentum_decay, value, 0.5, 0.999)
                }
                "gallery_momentum_floor" => {
                    set_f64(&mut config.gallery_momentum_floor, value, 0.01, 10.0)
                }
                "narrative_momentum_floor" => {
                    set_f64(&mut config.narrative_momentum_floor, value, 0.01, 10.0)
                }
                "snap_ease" => set_f64(&mut config.snap_ease, value, 0.01, 0.95),
                "glide_ease" => set_f64(&mut config.glide_ease, value, 0.01, 0.95),
                "drag_ease" => set_f64(&mut config.drag_ease, value, 0.01, 0.95),
                "scrub_ease" => set_f64(&mut config.scrub_ease, value, 0.01, 0.95),
                "tracking_window_ms" => set_u64(&mut config.tracking_window_ms, value, 100, 5000),
                "reveal_ms" => set_u64(&mut config.reveal_ms, value, 50, 5000),
                "heading_margin_rows" => {
                    set_f64(&mut config.heading_margin_rows, value, 0.0, 10.0)
                }
                "big_rows" => set_f64(&mut config.big_rows, value, 4.0, 60.0),
                "small_rows" => set_f64(&mut config.small_rows, value, 2.0, 60.0),
                "gap_rows" => set_f64(&mut config.gap_rows, value, 0.0, 20.0),
                "fps" => set_u64(&mut config.fps, value, 15, 240),
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let lines = vec![
            "# folio configuration".to_string(),
            String::new(),
            "# Input gains".to_string(),
            format!("gallery_wheel_gain = {}", self.gallery_wheel_gain),
            format!("narrative_wheel_gain = {}", self.narrative_wheel_gain),
            format!("drag_gain = {}", self.drag_gain),
            format!("wheel_step_rows = {}", self.wheel_step_rows),
            String::new(),
            "# Glide & snap".to_string(),
            format!("gallery_momentum_decay = {}", self.gallery_momentum_decay),
            format!("narrative_momentum_decay = {}", self.narrative_momentum_decay),
            format!("gallery_momentum_floor = {}", self.gallery_momentum_floor),
            format!("narrative_momentum_floor = {}", self.narrative_momentum_floor),
            format!("snap_ease = {}", self.snap_ease),
            format!("glide_ease = {}", self.glide_ease),
            format!("drag_ease = {}", self.drag_ease),
            format!("scrub_ease = {}", self.scrub_ease),
            String::new(),
            "# Narrative sync".to_string(),
            format!("tracking_window_ms = {}", self.tracking_window_ms),
            format!("reveal_ms = {}", self.reveal_ms),
            format!("heading_margin_rows = {}", self.heading_margin_rows),
            String::new(),
            "# Gallery card metrics".to_string(),
            format!("big_rows = {}", self.big_rows),
            format!("small_rows = {}", self.small_rows),
            format!("gap_rows = {}", self.gap_rows),
            String::new(),
            "# Frame loop".to_string(),
            format!("fps = {}", self.fps),
            String::new(),
        ];
        lines.join("\n")
    }
}

fn set_f64(field: &mut f64, value: &str, min: f64, max: f64) {
    if let Ok(v) = value.parse::<f64>() {
        if v.is_finite() {
            *field = v.clamp(min, max);
        }
    }
}

fn set_u64(field: &mut u64, value: &str, min: u64, max: u64) {
    if let Ok(v) = value.parse::<u64>() {
        *field = v.clamp(min, max);
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}
