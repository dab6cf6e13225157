//! Frame decoration and client-rect insets.

use crate::primitives::{BoundingRect, Rgba, Size};
use crate::properties::{ColorSet, ControlProperties};
use crate::style::{StyleFlag, StyleFlagSet};
use crate::surface::RenderTarget;

/// Minimum inset next to a sunken or etched edge.
const FRAME_INSET: i32 = 3;

/// Distance from the widget edge to its client rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub x: i32,
    pub y: i32,
}

impl Insets {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Label insets for the given border and frame style.
    ///
    /// Only the first frame style present raises the insets, checked in the
    /// order sunken, etched frame or horizontal, etched vertical.
    pub fn for_label(properties: &ControlProperties, flags: &StyleFlagSet) -> Self {
        let mut insets = Self::new(1, 0);

        let border = properties.px_border() as i32;
        if border > 0 {
            insets = Self::new(border + 1, border + 1);
        }

        if flags.contains(StyleFlag::SUNKEN) {
            insets.x = insets.x.max(FRAME_INSET);
            insets.y = insets.y.max(FRAME_INSET);
        } else if flags.contains(StyleFlag::ETCHED_FRAME)
            || flags.contains(StyleFlag::ETCHED_HORZ)
        {
            insets.y = insets.y.max(FRAME_INSET);
        } else if flags.contains(StyleFlag::ETCHED_VERT) {
            insets.x = insets.x.max(FRAME_INSET);
        }

        insets
    }

    /// Shrink `rect` by these insets on every side.
    pub fn client_rect(&self, rect: BoundingRect) -> BoundingRect {
        rect.inset(self.x, self.y)
    }
}

/// Draw the border and the frame style onto a widget surface of `size`.
///
/// The border is drawn only when it is visible against the background.
/// At most one frame style applies, checked in the order etched frame,
/// etched horizontal, etched vertical, sunken.
pub fn draw_frame(
    surface: &mut dyn RenderTarget,
    size: Size,
    flags: &StyleFlagSet,
    colors: &ColorSet,
    px_border: u32,
) {
    let w = size.width as i32;
    let h = size.height as i32;
    if w == 0 || h == 0 {
        return;
    }

    if px_border > 0 && colors.background != colors.border {
        let t = px_border as i32;
        surface.fill_rect(BoundingRect::new(0, 0, w, t), colors.border);
        surface.fill_rect(BoundingRect::new(0, h - t, w, t), colors.border);
        surface.fill_rect(BoundingRect::new(0, t, t, h - 2 * t), colors.border);
        surface.fill_rect(BoundingRect::new(w - t, t, t, h - 2 * t), colors.border);
    }

    let light = Rgba::WHITE;
    let shadow = Rgba::ETCH_SHADOW;

    if flags.contains(StyleFlag::ETCHED_FRAME) {
        outline(surface, BoundingRect::new(0, 0, w, h), 2, light);
        outline(surface, BoundingRect::new(0, 0, w - 1, h - 1), 1, shadow);
    } else if flags.contains(StyleFlag::ETCHED_HORZ) {
        surface.fill_rect(BoundingRect::new(0, 0, w, 2), light);
        surface.fill_rect(BoundingRect::new(0, 0, w - 1, 1), shadow);
    } else if flags.contains(StyleFlag::ETCHED_VERT) {
        surface.fill_rect(BoundingRect::new(0, 0, 2, h), light);
        surface.fill_rect(BoundingRect::new(0, 0, 1, h - 1), shadow);
    } else if flags.contains(StyleFlag::SUNKEN) {
        surface.fill_rect(BoundingRect::new(0, 0, 1, h - 1), shadow);
        surface.fill_rect(BoundingRect::new(0, 0, w - 1, 1), shadow);
        surface.fill_rect(BoundingRect::new(0, h - 1, w, 1), light);
        surface.fill_rect(BoundingRect::new(w - 1, 0, 1, h), light);
    }
}

/// A `thickness`-wide ring just inside `rect`.
fn outline(surface: &mut dyn RenderTarget, rect: BoundingRect, thickness: i32, color: Rgba) {
    let (x, y) = (rect.x, rect.y);
    let (w, h) = (rect.width as i32, rect.height as i32);
    let t = thickness.min(w).min(h);
    if t <= 0 {
        return;
    }
    surface.fill_rect(BoundingRect::new(x, y, w, t), color);
    surface.fill_rect(BoundingRect::new(x, y + h - t, w, t), color);
    surface.fill_rect(BoundingRect::new(x, y + t, t, h - 2 * t), color);
    surface.fill_rect(BoundingRect::new(x + w - t, y + t, t, h - 2 * t), color);
}
