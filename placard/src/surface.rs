//! Collaborator interfaces: glyph metrics and render targets.
//!
//! The engine never rasterizes glyphs or owns a window. It asks a
//! [`MetricsProvider`] for widths and glyph images and writes into a
//! [`RenderTarget`]. Widgets cache their output in an [`image::RgbaImage`],
//! which is itself a render target.

use image::RgbaImage;

use crate::primitives::{BoundingRect, Rgba};

/// Font metrics for one concrete font face at one size.
pub trait MetricsProvider {
    /// Pixel width of `text` when rendered on one row.
    fn measure(&self, text: &str) -> u32;

    /// Height of one text row in pixels.
    fn line_height(&self) -> u32;

    /// Render `text` as a single row. The image is `line_height()` tall.
    fn render(&self, text: &str, color: Rgba) -> RgbaImage;
}

/// A pixel surface that accepts image blits and solid fills.
pub trait RenderTarget {
    /// Alpha-blend `image` with its top-left corner at `rect`'s origin.
    fn blit(&mut self, image: &RgbaImage, rect: BoundingRect);

    /// Alpha-blend a solid color over `rect`.
    fn fill_rect(&mut self, rect: BoundingRect, color: Rgba);
}

impl RenderTarget for RgbaImage {
    fn blit(&mut self, image: &RgbaImage, rect: BoundingRect) {
        image::imageops::overlay(self, image, i64::from(rect.x), i64::from(rect.y));
    }

    fn fill_rect(&mut self, rect: BoundingRect, color: Rgba) {
        let bounds = BoundingRect::new(0, 0, self.width() as i32, self.height() as i32);
        let Some(area) = rect.intersection(&bounds) else {
            return;
        };

        let pixel = color.to_pixel();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                image::Pixel::blend(self.get_pixel_mut(x as u32, y as u32), &pixel);
            }
        }
    }
}
