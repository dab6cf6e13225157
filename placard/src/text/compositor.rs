//! Glyph row compositor.
//!
//! Places formatted lines inside a widget surface and draws them:
//! vertical window selection, per-row horizontal alignment, accelerator
//! underlines and uniform text alpha.
//!
//! All positions are local to the widget surface, `(0, 0)` being its
//! top-left corner.

use image::RgbaImage;

use super::format::{FormattedLine, FormattedText};
use crate::primitives::{BoundingRect, Point, Rgba, Size};
use crate::properties::ColorSet;
use crate::style::{StyleFlag, StyleFlagSet};
use crate::surface::{MetricsProvider, RenderTarget};

/// Number of rows of `line_height` pixels that fit in `height`, capped at
/// `total`.
pub fn lines_can_draw(total: usize, line_height: u32, height: u32) -> usize {
    if line_height == 0 {
        return total;
    }
    total.min((height / line_height) as usize)
}

/// Inputs to one compositing pass.
#[derive(Debug, Clone, Copy)]
pub struct CompositeParams<'a> {
    /// Full widget surface size.
    pub size: Size,
    /// Width of the client rect, used for horizontal alignment.
    pub client_width: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub flags: &'a StyleFlagSet,
    pub colors: ColorSet,
    /// Nominal font size, drives underline thickness.
    pub font_size: u32,
}

/// Where one formatted line lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedRow {
    /// Index into the formatted lines.
    pub index: usize,
    pub position: Point,
    pub width: u32,
    /// False for a row skipped because it lies above the surface.
    pub drawn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPlan {
    pub lines_can_draw: usize,
    pub rows: Vec<PlacedRow>,
}

impl RowPlan {
    /// Indices of the rows that are actually drawn.
    pub fn drawn_indices(&self) -> Vec<usize> {
        self.rows.iter().filter(|r| r.drawn).map(|r| r.index).collect()
    }
}

/// Compute row positions without drawing anything.
pub fn plan_rows(
    text: &FormattedText,
    metrics: &dyn MetricsProvider,
    params: &CompositeParams<'_>,
) -> RowPlan {
    let line_height = metrics.line_height();
    let total = text.len();
    let visible = lines_can_draw(total, line_height, params.size.height);

    let fh = line_height as i32;
    let h = params.size.height as i32;
    let flags = params.flags;
    let multiline = flags.is_multiline();
    let bottom = flags.contains(StyleFlag::BOTTOM);

    let (window, mut y) = if flags.contains(StyleFlag::VCENTER) {
        if multiline {
            let start = if visible < total { total / 2 - visible / 2 } else { 0 };
            let y = (h - visible as i32 * fh).div_euclid(2) - 1;
            (start..start + visible, y)
        } else {
            (0..total.min(1), (h - fh).div_euclid(2))
        }
    } else if bottom {
        if multiline {
            (0..total, h - params.y_offset - total as i32 * fh)
        } else {
            (0..total.min(1), h - params.y_offset - fh)
        }
    } else {
        (0..total, 0)
    };

    // Bottom placement already accounts for the inset.
    if !bottom {
        y += params.y_offset;
    }

    let mut rows = Vec::with_capacity(window.len());
    for index in window {
        let Some(line) = text.get(index) else {
            break;
        };

        if bottom {
            if y < 0 {
                rows.push(PlacedRow {
                    index,
                    position: Point::new(0, y),
                    width: 0,
                    drawn: false,
                });
                y += fh;
                continue;
            }
        } else if y + fh > h {
            break;
        }

        let width = metrics.measure(line.text());
        let x = row_x(flags, params.client_width, width) + params.x_offset;
        rows.push(PlacedRow {
            index,
            position: Point::new(x, y),
            width,
            drawn: true,
        });
        y += fh;
    }

    RowPlan {
        lines_can_draw: visible,
        rows,
    }
}

fn row_x(flags: &StyleFlagSet, client_width: u32, width: u32) -> i32 {
    if flags.word_wrap_disabled() {
        return 0;
    }
    let slack = client_width as i32 - width as i32;
    if flags.contains(StyleFlag::HCENTER) {
        slack.div_euclid(2)
    } else if flags.contains(StyleFlag::RIGHT) {
        slack
    } else {
        0
    }
}

/// Draw the background and every placed row onto `surface`.
///
/// A fully transparent background or text color skips that part.
pub fn composite(
    text: &FormattedText,
    metrics: &dyn MetricsProvider,
    params: &CompositeParams<'_>,
    surface: &mut dyn RenderTarget,
) -> RowPlan {
    let background = params.colors.background;
    if !background.is_transparent() {
        surface.fill_rect(BoundingRect::from_origin_size(Point::ORIGIN, params.size), background);
    }

    let color = params.colors.text;
    if color.is_transparent() {
        return RowPlan::default();
    }

    let plan = plan_rows(text, metrics, params);
    for row in plan.rows.iter().filter(|r| r.drawn) {
        let Some(line) = text.get(row.index) else {
            continue;
        };

        let mut image = metrics.render(line.text(), color.with_alpha(255));
        underline_accelerators(&mut image, line, metrics, color, params.font_size);
        if color.a < 255 {
            apply_alpha(&mut image, color.a);
        }

        let rect = BoundingRect::new(
            row.position.x,
            row.position.y,
            image.width() as i32,
            image.height() as i32,
        );
        surface.blit(&image, rect);
    }

    plan
}

/// Underline each accelerator character along the bottom of `image`.
fn underline_accelerators(
    image: &mut RgbaImage,
    line: &FormattedLine,
    metrics: &dyn MetricsProvider,
    color: Rgba,
    font_size: u32,
) {
    let thickness = (font_size * 10 / 100).max(1);
    if line.accelerators().is_empty() {
        return;
    }

    let chars: Vec<char> = line.text().chars().collect();
    let y = image.height() as i32 - thickness as i32;
    for &offset in line.accelerators() {
        let Some(&c) = chars.get(offset) else {
            continue;
        };
        let prefix: String = chars[..offset].iter().collect();
        let x = metrics.measure(&prefix) as i32;
        let width = metrics.measure(c.encode_utf8(&mut [0; 4])) as i32;
        image.fill_rect(
            BoundingRect::new(x, y, width, thickness as i32),
            color.with_alpha(255),
        );
    }
}

/// Scale every pixel's alpha by `alpha / 255`.
fn apply_alpha(image: &mut RgbaImage, alpha: u8) {
    let alpha = u32::from(alpha);
    for pixel in image.pixels_mut() {
        let a = u32::from(pixel.0[3]);
        pixel.0[3] = ((a * alpha + 255) >> 8) as u8;
    }
}
