//! Gallery pane — the vertical card stack the physics engine scrolls.
//!
//! Cards are drawn from the same measured geometry the simulation steps
//! against, offset by the committed scroll position. While the pane is
//! in motion the cards lean and stretch with the velocity-derived
//! distortion; once motion settles they render perfectly straight.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use crate::core::content::{GalleryItem, ItemSize};
use crate::core::geometry::{GalleryLayout, LayoutQuery};
use crate::core::projection::Distortion;

use super::theme::Theme;

/// The gallery widget — created fresh each frame.
pub struct GalleryWidget<'a> {
    items: &'a [&'a GalleryItem],
    layout: &'a GalleryLayout,
    position: f64,
    distortion: Distortion,
    active: usize,
}

impl<'a> GalleryWidget<'a> {
    pub fn new(
        items: &'a [&'a GalleryItem],
        layout: &'a GalleryLayout,
        position: f64,
        distortion: Distortion,
        active: usize,
    ) -> Self {
        Self {
            items,
            layout,
            position,
            distortion,
            active,
        }
    }

    /// Columns of lean across a card's height, derived from skew. Zero
    /// once the distortion has settled so resting cards are straight.
    fn lean_cols(&self) -> i32 {
        if self.distortion.is_settled() {
            return 0;
        }
        (self.distortion.skew / 3.0).round() as i32
    }
}

impl Widget for GalleryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height == 0 {
            return;
        }

        // Whole-stack recession: shrink the card width while in motion.
        let card_width = ((f64::from(area.width) - 2.0) * self.distortion.group_scale)
            .round()
            .max(4.0) as u16;
        let lean = self.lean_cols();

        for (i, item) in self.items.iter().enumerate() {
            let Some(bounds) = self.layout.item_bounds(i) else {
                continue;
            };

            // Vertical stretch is applied about the card centre.
            let height = bounds.height * self.distortion.scale_y;
            let top = bounds.center() - height / 2.0 - self.position;
            let card_rows = height.round().max(2.0) as i32;
            let screen_top = top.round() as i32;

            let style = if i == self.active {
                Theme::active_card_style()
            } else {
                Theme::card_style()
            };

            for row in 0..card_rows {
                let y = screen_top + row;
                if y < 0 || y >= i32::from(area.height) {
                    continue;
                }
                let y = area.y + y as u16;

                // Lean shifts rows progressively across the card height.
                let shift = if card_rows > 1 {
                    lean * row / (card_rows - 1)
                } else {
                    0
                };
                let x0 = i32::from(area.x) + 1 + shift;
                let x1 = x0 + i32::from(card_width) - 1;
                let (Ok(x0), Ok(x1)) = (u16::try_from(x0), u16::try_from(x1)) else {
                    continue;
                };
                if x1 >= area.x + area.width {
                    continue;
                }

                if row == 0 {
                    draw_run(buf, x0, x1, y, "▁", style);
                } else if row == card_rows - 1 {
                    draw_run(buf, x0, x1, y, "▔", style);
                } else {
                    buf[(x0, y)].set_symbol("▏").set_style(style);
                    buf[(x1, y)].set_symbol("▕").set_style(style);
                    if row == 1 {
                        let caption = caption_for(item);
                        let max = usize::from(card_width.saturating_sub(3));
                        buf.set_stringn(
                            x0 + 2,
                            y,
                            caption,
                            max,
                            Theme::card_caption_style(),
                        );
                    }
                }
            }
        }
    }
}

fn draw_run(buf: &mut Buffer, x0: u16, x1: u16, y: u16, symbol: &str, style: ratatui::style::Style) {
    for x in x0..=x1 {
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}

fn caption_for(item: &GalleryItem) -> String {
    let size = match item.size {
        ItemSize::Big => "big",
        ItemSize::Small => "small",
        ItemSize::Empty => "empty",
    };
    format!("{} · {} · {}", item.id, size, item.src)
}
