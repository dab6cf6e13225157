//! Picture widget: one image per interaction state.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::cache::{RenderCache, RenderStats};
use crate::error::{Error, Result};
use crate::frame::draw_frame;
use crate::primitives::{BoundingRect, Point, Size};
use crate::properties::{ControlProperties, InteractionState};
use crate::style::{StyleFlag, StyleFlagSet};
use crate::surface::RenderTarget;

/// Style used when none is given.
pub const PICTURE_DEFAULT_STYLE: [StyleFlag; 2] = [StyleFlag::BITMAP, StyleFlag::REAL_SIZE_IMAGE];

/// Flags every picture carries.
pub const PICTURE_FORCED_STYLE: [StyleFlag; 1] = [StyleFlag::BITMAP];

/// Images for the five visible states.
#[derive(Debug, Clone, Default)]
pub struct PictureImages {
    slots: [Option<RgbaImage>; 5],
}

impl PictureImages {
    /// No images at all; the picture then needs an explicit size.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One image for every state.
    pub fn single(image: RgbaImage) -> Self {
        Self {
            slots: std::array::from_fn(|_| Some(image.clone())),
        }
    }

    /// Images for some states; the rest share the normal image.
    pub fn per_state(images: impl IntoIterator<Item = (InteractionState, RgbaImage)>) -> Self {
        let mut slots: [Option<RgbaImage>; 5] = Default::default();
        for (state, image) in images {
            if let Some(slot) = state.slot() {
                slots[slot] = Some(image);
            }
        }
        if let Some(normal) = slots[0].clone() {
            for slot in slots.iter_mut().skip(1) {
                if slot.is_none() {
                    *slot = Some(normal.clone());
                }
            }
        }
        Self { slots }
    }

    pub fn get(&self, state: InteractionState) -> Option<&RgbaImage> {
        state.slot().and_then(|s| self.slots[s].as_ref())
    }

    pub fn normal(&self) -> Option<&RgbaImage> {
        self.slots[0].as_ref()
    }

    pub fn set(&mut self, state: InteractionState, image: Option<RgbaImage>) {
        if let Some(slot) = state.slot() {
            self.slots[slot] = image;
        }
    }

    /// Largest width and height over all images.
    pub fn max_size(&self) -> Size {
        self.slots.iter().flatten().fold(Size::ZERO, |acc, img| {
            Size::new(acc.width.max(img.width()), acc.height.max(img.height()))
        })
    }
}

/// How one state's image sits inside the control.
#[derive(Debug, Clone, Default)]
struct Placement {
    /// Control size while in this state.
    size: Size,
    /// Image position inside the control.
    offset: Point,
    image: Option<RgbaImage>,
}

impl Placement {
    fn compute(image: Option<&RgbaImage>, size: Size, style: &StyleFlagSet) -> Self {
        let Some(image) = image else {
            return Self {
                size,
                ..Self::default()
            };
        };

        let mut size = size;
        let image = if style.contains(StyleFlag::REAL_SIZE_CONTROL) {
            if size.is_empty() {
                image.clone()
            } else {
                imageops::resize(image, size.width, size.height, FilterType::Triangle)
            }
        } else {
            if style.contains(StyleFlag::REAL_SIZE_IMAGE) {
                size = Size::new(image.width(), image.height());
            }
            image.clone()
        };

        let slack_x = size.width as i32 - image.width() as i32;
        let slack_y = size.height as i32 - image.height() as i32;
        let offset = if style.contains(StyleFlag::RIGHT_JUST) {
            Point::new(slack_x, slack_y)
        } else {
            Point::new(
                if style.contains(StyleFlag::HCENTER_IMAGE) { slack_x.div_euclid(2) } else { 0 },
                if style.contains(StyleFlag::VCENTER_IMAGE) { slack_y.div_euclid(2) } else { 0 },
            )
        };

        Self {
            size,
            offset,
            image: Some(image),
        }
    }
}

/// An image control with per-state images and colors.
#[derive(Debug)]
pub struct Picture {
    origin: Point,
    size: Size,
    style: StyleFlagSet,
    properties: ControlProperties,
    state: InteractionState,
    images: PictureImages,
    placements: [Placement; 5],
    cache: RenderCache,
}

impl Picture {
    pub fn builder(images: PictureImages) -> PictureBuilder {
        PictureBuilder::new(images)
    }

    /// Bounding rect for the current state.
    pub fn rect(&self) -> BoundingRect {
        BoundingRect::from_origin_size(self.origin, self.placement().size)
    }

    pub fn style(&self) -> &StyleFlagSet {
        &self.style
    }

    pub fn properties(&self) -> &ControlProperties {
        &self.properties
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state
    }

    pub fn images(&self) -> &PictureImages {
        &self.images
    }

    /// Where the current state's image is drawn, relative to the rect.
    pub fn image_offset(&self) -> Point {
        self.placement().offset
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    pub fn stats(&self) -> RenderStats {
        self.cache.stats()
    }

    pub fn set_rect(&mut self, rect: BoundingRect) {
        let (origin, size) = (rect.origin(), rect.size());
        if origin != self.origin || size != self.size {
            self.origin = origin;
            self.size = size;
            self.cache.mark_layout();
        }
    }

    /// Replace the style. An empty set keeps the current style.
    pub fn set_style(&mut self, style: impl Into<StyleFlagSet>) {
        let style = style.into();
        if style.is_empty() {
            return;
        }
        let style = StyleFlagSet::normalized(&style, &PICTURE_DEFAULT_STYLE, &PICTURE_FORCED_STYLE);
        if style != self.style {
            self.style = style;
            self.cache.mark_layout();
        }
    }

    pub fn set_properties(&mut self, properties: ControlProperties) {
        if properties != self.properties {
            self.properties = properties;
            self.cache.mark_surface();
        }
    }

    pub fn set_interaction_state(&mut self, state: InteractionState) {
        if state != self.state {
            self.state = state;
            self.cache.mark_surface();
        }
    }

    /// Set the state from its integer code. Out-of-range codes are
    /// rejected and the current state is kept.
    pub fn set_state_code(&mut self, code: i32) -> Result<()> {
        let state = InteractionState::try_from(code)?;
        self.set_interaction_state(state);
        Ok(())
    }

    /// Replace one state's image; `None` leaves that state blank.
    pub fn set_image(&mut self, state: InteractionState, image: Option<RgbaImage>) {
        self.images.set(state, image);
        self.cache.mark_layout();
    }

    pub fn draw(&mut self, target: &mut dyn RenderTarget) {
        if self.state == InteractionState::Hidden {
            return;
        }

        if self.cache.take_dirty().layout {
            self.place_all();
        }

        let rect = self.rect();
        if let Some(surface) = self.cache.cached() {
            target.blit(surface, rect);
            return;
        }

        let surface = self.compose();
        let surface = self.cache.store(surface);
        target.blit(surface, rect);
    }

    fn placement(&self) -> &Placement {
        &self.placements[self.state.slot().unwrap_or(0)]
    }

    fn place_all(&mut self) {
        for state in InteractionState::VISIBLE {
            if let Some(slot) = state.slot() {
                self.placements[slot] =
                    Placement::compute(self.images.get(state), self.size, &self.style);
            }
        }
        debug!(size = ?self.size, "picture images placed");
    }

    fn compose(&self) -> RgbaImage {
        let placement = self.placement();
        let size = placement.size;
        let colors = *self.properties.colors(self.state);

        let mut surface = RgbaImage::new(size.width, size.height);
        if !colors.background.is_transparent() {
            let area = BoundingRect::from_origin_size(Point::ORIGIN, size);
            surface.fill_rect(area, colors.background);
        }
        if let Some(image) = &placement.image {
            let at = BoundingRect::new(
                placement.offset.x,
                placement.offset.y,
                image.width() as i32,
                image.height() as i32,
            );
            surface.blit(image, at);
        } else {
            debug!(state = ?self.state, "picture has no image for state");
        }
        draw_frame(&mut surface, size, &self.style, &colors, self.properties.px_border());
        surface
    }
}

/// Builder for [`Picture`].
#[derive(Debug, Clone)]
pub struct PictureBuilder {
    images: PictureImages,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    style: StyleFlagSet,
    properties: Option<ControlProperties>,
    state: InteractionState,
}

impl PictureBuilder {
    pub fn new(images: PictureImages) -> Self {
        Self {
            images,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            style: StyleFlagSet::new(),
            properties: None,
            state: InteractionState::Normal,
        }
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Control size; 0 takes the largest image's extent.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn style(mut self, style: impl Into<StyleFlagSet>) -> Self {
        self.style = style.into();
        self
    }

    pub fn properties(mut self, properties: ControlProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn state(mut self, state: InteractionState) -> Self {
        self.state = state;
        self
    }

    pub fn build(self) -> Result<Picture> {
        if self.images.normal().is_none() && self.width == 0 && self.height == 0 {
            return Err(Error::MissingGeometry(
                "picture without a normal image needs an explicit size",
            ));
        }

        let largest = self.images.max_size();
        let size = Size::new(
            if self.width == 0 { largest.width } else { self.width },
            if self.height == 0 { largest.height } else { self.height },
        );

        let mut picture = Picture {
            origin: Point::new(self.x, self.y),
            size,
            style: StyleFlagSet::normalized(
                &self.style,
                &PICTURE_DEFAULT_STYLE,
                &PICTURE_FORCED_STYLE,
            ),
            properties: self.properties.unwrap_or_else(ControlProperties::picture),
            state: self.state,
            images: self.images,
            placements: Default::default(),
            cache: RenderCache::new(),
        };
        picture.cache.take_dirty();
        picture.place_all();
        Ok(picture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Rgba;
    use crate::properties::ControlKind;
    use crate::testing::{RecordingTarget, TargetCall};

    fn solid(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]))
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn default_style_is_real_size_image() {
        let pic = Picture::builder(PictureImages::single(solid(16, 8)))
            .position(4, 5)
            .build()
            .unwrap();
        assert_eq!(
            pic.style().iter().collect::<Vec<_>>(),
            vec![StyleFlag::BITMAP, StyleFlag::REAL_SIZE_IMAGE]
        );
        assert_eq!(pic.rect(), BoundingRect::new(4, 5, 16, 8));
        assert_eq!(pic.properties().kind(), ControlKind::Picture);
    }

    #[test]
    fn bitmap_is_forced() {
        let pic = Picture::builder(PictureImages::single(solid(4, 4)))
            .style(StyleFlag::HCENTER_IMAGE)
            .build()
            .unwrap();
        assert!(pic.style().contains(StyleFlag::BITMAP));
        assert!(!pic.style().contains(StyleFlag::REAL_SIZE_IMAGE));
    }

    #[test]
    fn missing_normal_without_size_fails() {
        let images = PictureImages::per_state([(InteractionState::Hot, solid(4, 4))]);
        let err = Picture::builder(images).build().unwrap_err();
        assert!(matches!(err, Error::MissingGeometry(_)));

        let images = PictureImages::per_state([(InteractionState::Hot, solid(4, 4))]);
        assert!(Picture::builder(images).size(10, 10).build().is_ok());
    }

    #[test]
    fn per_state_fills_from_normal() {
        let images = PictureImages::per_state([
            (InteractionState::Normal, solid(4, 4)),
            (InteractionState::Pressed, solid(6, 2)),
        ]);
        assert_eq!(images.get(InteractionState::Hot).map(|i| i.width()), Some(4));
        assert_eq!(images.get(InteractionState::Pressed).map(|i| i.width()), Some(6));
        assert_eq!(images.max_size(), Size::new(6, 4));
        assert!(images.get(InteractionState::Hidden).is_none());
    }

    // =========================================================================
    // Placement
    // =========================================================================

    #[test]
    fn centered_image() {
        let pic = Picture::builder(PictureImages::single(solid(4, 2)))
            .size(10, 10)
            .style([StyleFlag::HCENTER_IMAGE, StyleFlag::VCENTER_IMAGE])
            .build()
            .unwrap();
        assert_eq!(pic.image_offset(), Point::new(3, 4));
        assert_eq!(pic.rect().size(), Size::new(10, 10));
    }

    #[test]
    fn right_justified_image() {
        let pic = Picture::builder(PictureImages::single(solid(4, 2)))
            .size(10, 10)
            .style([StyleFlag::RIGHT_JUST, StyleFlag::HCENTER_IMAGE])
            .build()
            .unwrap();
        assert_eq!(pic.image_offset(), Point::new(6, 8));
    }

    #[test]
    fn real_size_control_scales_image() {
        let mut pic = Picture::builder(PictureImages::single(solid(4, 2)))
            .size(8, 8)
            .style(StyleFlag::REAL_SIZE_CONTROL)
            .build()
            .unwrap();
        assert_eq!(pic.image_offset(), Point::ORIGIN);

        let mut surface = RgbaImage::new(8, 8);
        pic.draw(&mut surface);
        assert_eq!(surface.get_pixel(7, 7).0[3], 255);
    }

    #[test]
    fn real_size_image_follows_state() {
        let images = PictureImages::per_state([
            (InteractionState::Normal, solid(4, 4)),
            (InteractionState::Hot, solid(12, 6)),
        ]);
        let mut pic = Picture::builder(images).build().unwrap();
        assert_eq!(pic.rect().size(), Size::new(4, 4));

        pic.set_interaction_state(InteractionState::Hot);
        assert_eq!(pic.rect().size(), Size::new(12, 6));
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    #[test]
    fn draw_caches_until_state_changes() {
        let mut pic = Picture::builder(PictureImages::single(solid(4, 4))).build().unwrap();
        let mut target = RecordingTarget::default();

        pic.draw(&mut target);
        pic.draw(&mut target);
        assert_eq!(pic.stats().composites, 1);
        assert_eq!(pic.stats().hits, 1);

        pic.set_interaction_state(InteractionState::Pressed);
        pic.draw(&mut target);
        assert_eq!(pic.stats().composites, 2);
        assert_eq!(target.blits(), 3);
    }

    #[test]
    fn blank_state_draws_background_only() {
        let images = PictureImages::per_state([(InteractionState::Hot, solid(4, 4))]);
        let props = ControlProperties::builder(ControlKind::Picture)
            .background(InteractionState::Normal, Rgba::WHITE)
            .build();
        let mut pic = Picture::builder(images)
            .size(6, 6)
            .properties(props)
            .build()
            .unwrap();

        let mut surface = RgbaImage::new(6, 6);
        pic.draw(&mut surface);
        assert_eq!(surface.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn hidden_draws_nothing() {
        let mut pic = Picture::builder(PictureImages::single(solid(4, 4)))
            .state(InteractionState::Hidden)
            .build()
            .unwrap();
        let mut target = RecordingTarget::default();
        pic.draw(&mut target);
        assert!(target.calls.is_empty());
    }

    #[test]
    fn replaced_image_is_drawn() {
        let mut pic = Picture::builder(PictureImages::single(solid(4, 4))).build().unwrap();
        let mut target = RecordingTarget::default();
        pic.draw(&mut target);

        pic.set_image(InteractionState::Normal, Some(solid(9, 3)));
        target.clear();
        pic.draw(&mut target);
        assert_eq!(
            target.calls,
            vec![TargetCall::Blit {
                rect: BoundingRect::new(0, 0, 9, 3),
                size: Size::new(9, 3),
            }]
        );
    }
}
