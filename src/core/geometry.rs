//! Layout measurement — the geometry the simulation reads.
//!
//! Live layout is an external dependency, so every geometry read goes
//! through the narrow [`LayoutQuery`] interface (or a measured snapshot
//! struct). The simulation core can then be driven headlessly with
//! synthetic geometry. All extents are in fractional terminal rows.

use crate::core::content::{GalleryItem, ItemSize, NarrativeBlock, PivotSection};

/// Vertical extent of one item within its pane's content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub top: f64,
    pub height: f64,
}

impl ItemBounds {
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Read-only view of a pane's measurable geometry.
pub trait LayoutQuery {
    /// Visible extent of the pane.
    fn viewport(&self) -> f64;
    /// Total content extent.
    fn content(&self) -> f64;
    fn item_count(&self) -> usize;
    /// Bounds of the item at `index`, if its geometry is available.
    fn item_bounds(&self, index: usize) -> Option<ItemBounds>;

    /// Scrollable range. Zero when the content fits the viewport.
    fn max_scroll(&self) -> f64 {
        (self.content() - self.viewport()).max(0.0)
    }

    /// Scroll offset that centres item `index` in the viewport, clamped
    /// to the scrollable range.
    fn snap_position(&self, index: usize) -> Option<f64> {
        let bounds = self.item_bounds(index)?;
        let raw = bounds.center() - self.viewport() / 2.0;
        Some(raw.clamp(0.0, self.max_scroll()))
    }

    /// Snap positions for every item. Items whose geometry cannot be
    /// obtained are excluded for this frame.
    fn snap_points(&self) -> Vec<f64> {
        (0..self.item_count())
            .filter_map(|i| self.snap_position(i))
            .collect()
    }

    /// Snap positions of the first and last items — the scrubber's span.
    fn snap_span(&self) -> Option<(f64, f64)> {
        let count = self.item_count();
        if count == 0 {
            return None;
        }
        Some((self.snap_position(0)?, self.snap_position(count - 1)?))
    }
}

// ───────────────────────────────────────── gallery ───────────

/// Row heights used when measuring the gallery stack.
#[derive(Debug, Clone)]
pub struct GalleryMetrics {
    pub big_rows: f64,
    pub small_rows: f64,
    pub gap_rows: f64,
}

impl Default for GalleryMetrics {
    fn default() -> Self {
        Self {
            big_rows: 16.0,
            small_rows: 8.0,
            gap_rows: 2.0,
        }
    }
}

/// Measured geometry of the gallery pane for one frame.
///
/// The stack is padded by half a viewport at both ends so the first and
/// last cards can reach the viewport centre.
#[derive(Debug, Clone)]
pub struct GalleryLayout {
    viewport: f64,
    content: f64,
    items: Vec<ItemBounds>,
}

impl GalleryLayout {
    pub fn measure(items: &[&GalleryItem], viewport: f64, metrics: &GalleryMetrics) -> Self {
        let pad = viewport / 2.0;
        let mut bounds = Vec::with_capacity(items.len());
        let mut top = pad;
        for item in items {
            let height = match item.size {
                ItemSize::Big => metrics.big_rows,
                ItemSize::Small => metrics.small_rows,
                // Callers filter placeholders out; treat a stray one as flat.
                ItemSize::Empty => 0.0,
            };
            bounds.push(ItemBounds { top, height });
            top += height + metrics.gap_rows;
        }
        let stack_end = if items.is_empty() { pad } else { top - metrics.gap_rows };
        Self {
            viewport,
            content: stack_end + pad,
            items: bounds,
        }
    }
}

impl LayoutQuery for GalleryLayout {
    fn viewport(&self) -> f64 {
        self.viewport
    }

    fn content(&self) -> f64 {
        self.content
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_bounds(&self, index: usize) -> Option<ItemBounds> {
        self.items.get(index).copied()
    }
}

// ───────────────────────────────────────── narrative ─────────

/// What a measured narrative line is, for styling and hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeLineKind {
    Text,
    /// A pivot heading; carries the pivot's order index.
    Heading(usize),
    /// Revealed paragraph content of the pivot at the given index.
    Body(usize),
    /// A project meta pair, shown after the last section.
    Meta,
    Blank,
}

#[derive(Debug, Clone)]
pub struct NarrativeLine {
    pub text: String,
    pub kind: NarrativeLineKind,
}

/// Measured narrative pane content for one frame.
///
/// Pivot paragraph blocks are scaled by their expansion fraction, so
/// heading offsets shift while a reveal animation runs — exactly the
/// geometry the auto-tracking window re-reads every frame. The same
/// measured lines are handed to the widget, so simulation and rendering
/// can never disagree about offsets.
#[derive(Debug, Clone)]
pub struct NarrativeLayout {
    viewport: f64,
    lines: Vec<NarrativeLine>,
    /// Pivot index → line offset of its heading.
    heading_offsets: Vec<(String, f64)>,
}

impl NarrativeLayout {
    /// Measure `blocks` wrapped at `width` columns, with the project's
    /// `meta` pairs appended after the last section. `expansion` holds
    /// one reveal fraction in `[0, 1]` per pivot section, in narrative
    /// order.
    pub fn measure(
        blocks: &[NarrativeBlock],
        meta: &[(String, String)],
        width: u16,
        viewport: f64,
        expansion: &[f64],
    ) -> Self {
        let width = width.max(1) as usize;
        let mut lines = Vec::new();
        let mut heading_offsets = Vec::new();
        let mut pivot_index = 0usize;

        for block in blocks {
            match block {
                NarrativeBlock::Text(paragraphs) => {
                    for paragraph in paragraphs {
                        for wrapped in wrap_text(paragraph, width) {
                            lines.push(NarrativeLine {
                                text: wrapped,
                                kind: NarrativeLineKind::Text,
                            });
                        }
                        lines.push(blank());
                    }
                }
                NarrativeBlock::PivotGroup(sections) => {
                    for section in sections {
                        measure_pivot(
                            section,
                            pivot_index,
                            width,
                            expansion.get(pivot_index).copied().unwrap_or(0.0),
                            &mut lines,
                            &mut heading_offsets,
                        );
                        pivot_index += 1;
                    }
                }
            }
        }

        if !meta.is_empty() {
            lines.push(blank());
            for (label, value) in meta {
                lines.push(NarrativeLine {
                    text: format!("{label}: {value}"),
                    kind: NarrativeLineKind::Meta,
                });
            }
        }

        Self {
            viewport,
            lines,
            heading_offsets,
        }
    }

    pub fn lines(&self) -> &[NarrativeLine] {
        &self.lines
    }

    pub fn max_scroll(&self) -> f64 {
        (self.lines.len() as f64 - self.viewport).max(0.0)
    }

    /// Line offset of the heading whose section tracks `target_id`.
    pub fn heading_offset(&self, target_id: &str) -> Option<f64> {
        self.heading_offsets
            .iter()
            .find(|(id, _)| id == target_id)
            .map(|&(_, offset)| offset)
    }
}

fn measure_pivot(
    section: &PivotSection,
    pivot_index: usize,
    width: usize,
    expansion: f64,
    lines: &mut Vec<NarrativeLine>,
    heading_offsets: &mut Vec<(String, f64)>,
) {
    heading_offsets.push((section.target_id.clone(), lines.len() as f64));
    lines.push(NarrativeLine {
        text: section.heading.to_uppercase(),
        kind: NarrativeLineKind::Heading(pivot_index),
    });

    // Full body: wrapped paragraphs separated by blanks. The reveal shows
    // a prefix of it proportional to the expansion fraction.
    let mut body = Vec::new();
    for (i, paragraph) in section.paragraphs.iter().enumerate() {
        if i > 0 {
            body.push(blank());
        }
        for wrapped in wrap_text(paragraph, width) {
            body.push(NarrativeLine {
                text: wrapped,
                kind: NarrativeLineKind::Body(pivot_index),
            });
        }
    }
    let visible = (body.len() as f64 * expansion.clamp(0.0, 1.0)).round() as usize;
    lines.extend(body.into_iter().take(visible));
    lines.push(blank());
}

fn blank() -> NarrativeLine {
    NarrativeLine {
        text: String::new(),
        kind: NarrativeLineKind::Blank,
    }
}

/// Greedy word wrap. Words longer than the width get their own line and
/// are clipped by the renderer.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.chars().count() + 1 + word.chars().count() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            out.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

// ───────────────────────────────────────── test support ──────

/// Hand-authored geometry for headless simulation tests.
#[cfg(test)]
pub struct SyntheticLayout {
    pub viewport: f64,
    pub content: f64,
    pub items: Vec<ItemBounds>,
}

#[cfg(test)]
impl LayoutQuery for SyntheticLayout {
    fn viewport(&self) -> f64 {
        self.viewport
    }

    fn content(&self) -> f64 {
        self.content
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_bounds(&self, index: usize) -> Option<ItemBounds> {
        self.items.get(index).copied()
    }
}
