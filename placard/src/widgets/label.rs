//! Text label widget.

use image::RgbaImage;
use tracing::debug;

use crate::cache::{RenderCache, RenderStats};
use crate::error::Result;
use crate::font::Font;
use crate::frame::{draw_frame, Insets};
use crate::primitives::BoundingRect;
use crate::properties::{ControlProperties, InteractionState};
use crate::style::{StyleFlag, StyleFlagSet};
use crate::surface::RenderTarget;
use crate::text::format::physical_lines;
use crate::text::{composite, format_text, CompositeParams, FormattedText, LabelText};

/// Style used when none is given.
pub const LABEL_DEFAULT_STYLE: [StyleFlag; 2] = [StyleFlag::LEFT, StyleFlag::TOP];

/// A block of text drawn inside a rect.
///
/// Formatting and compositing run only when an input changed; otherwise
/// `draw` blits the surface stored by the previous draw.
#[derive(Debug)]
pub struct Label {
    text: LabelText,
    font: Font,
    rect: BoundingRect,
    style: StyleFlagSet,
    properties: ControlProperties,
    state: InteractionState,
    wrap_at_letter: bool,

    insets: Insets,
    client_rect: BoundingRect,
    formatted: FormattedText,
    cache: RenderCache,
}

impl Label {
    pub fn builder(text: impl Into<LabelText>, font: Font) -> LabelBuilder {
        LabelBuilder::new(text, font)
    }

    fn new(
        text: LabelText,
        font: Font,
        rect: BoundingRect,
        style: StyleFlagSet,
        properties: ControlProperties,
        state: InteractionState,
        wrap_at_letter: bool,
    ) -> Self {
        let insets = Insets::for_label(&properties, &style);
        let mut label = Self {
            text,
            font,
            rect,
            style,
            properties,
            state,
            wrap_at_letter,
            insets,
            client_rect: insets.client_rect(rect),
            formatted: FormattedText::default(),
            cache: RenderCache::new(),
        };
        label.cache.take_dirty();
        label.reformat();
        label
    }

    // Getters

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn rect(&self) -> BoundingRect {
        self.rect
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

    pub fn wrap_at_letter(&self) -> bool {
        self.wrap_at_letter
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Text area: the rect shrunk by the insets.
    pub fn client_rect(&self) -> BoundingRect {
        self.client_rect
    }

    /// Lines produced by the last formatting pass.
    pub fn formatted(&self) -> &FormattedText {
        &self.formatted
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    pub fn stats(&self) -> RenderStats {
        self.cache.stats()
    }

    // Setters. Each is a no-op when the value is unchanged.

    pub fn set_text(&mut self, text: impl Into<LabelText>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.cache.mark_layout();
        }
    }

    pub fn set_rect(&mut self, rect: BoundingRect) {
        if rect != self.rect {
            self.rect = rect;
            self.cache.mark_layout();
        }
    }

    /// Replace the style. An empty set keeps the current style.
    pub fn set_style(&mut self, style: impl Into<StyleFlagSet>) {
        let style = style.into();
        if style.is_empty() {
            return;
        }
        let style = StyleFlagSet::normalized(&style, &LABEL_DEFAULT_STYLE, &[]);
        if style != self.style {
            self.style = style;
            self.cache.mark_layout();
            self.cache.mark_insets();
        }
    }

    pub fn set_properties(&mut self, properties: ControlProperties) {
        if properties != self.properties {
            self.properties = properties;
            self.cache.mark_insets();
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

    pub fn set_font(&mut self, font: Font) {
        if font != self.font {
            self.font = font;
            self.cache.mark_layout();
        }
    }

    pub fn set_wrap_at_letter(&mut self, wrap_at_letter: bool) {
        if wrap_at_letter != self.wrap_at_letter {
            self.wrap_at_letter = wrap_at_letter;
            self.cache.mark_layout();
        }
    }

    /// Blit the label onto `target`, recomputing only what is stale.
    pub fn draw(&mut self, target: &mut dyn RenderTarget) {
        if self.state == InteractionState::Hidden {
            return;
        }

        let dirty = self.cache.take_dirty();
        let mut relayout = dirty.layout;
        if dirty.insets {
            let insets = Insets::for_label(&self.properties, &self.style);
            if insets != self.insets {
                self.insets = insets;
                relayout = true;
            }
        }
        if relayout {
            self.client_rect = self.insets.client_rect(self.rect);
            self.reformat();
        }

        let rect = self.rect;
        if let Some(surface) = self.cache.cached() {
            target.blit(surface, rect);
            return;
        }

        let surface = self.compose();
        let surface = self.cache.store(surface);
        target.blit(surface, rect);
    }

    fn reformat(&mut self) {
        self.formatted = format_text(
            self.text.as_str(),
            self.font.metrics(),
            self.client_rect,
            &self.style,
            self.wrap_at_letter,
        );
        self.cache.record_format();
        debug!(
            lines = self.formatted.len(),
            width = self.client_rect.width,
            "label text formatted"
        );
    }

    fn compose(&self) -> RgbaImage {
        let size = self.rect.size();
        let mut surface = RgbaImage::new(size.width, size.height);
        let colors = *self.properties.colors(self.state);

        let params = CompositeParams {
            size,
            client_width: self.client_rect.width,
            x_offset: self.insets.x,
            y_offset: self.insets.y,
            flags: &self.style,
            colors,
            font_size: self.font.size(),
        };
        let plan = composite(&self.formatted, self.font.metrics(), &params, &mut surface);
        draw_frame(&mut surface, size, &self.style, &colors, self.properties.px_border());

        debug!(
            state = ?self.state,
            rows = plan.rows.iter().filter(|r| r.drawn).count(),
            "label composited"
        );
        surface
    }
}

/// Builder for [`Label`].
#[derive(Debug, Clone)]
pub struct LabelBuilder {
    text: LabelText,
    font: Font,
    x: i32,
    y: i32,
    width: Option<u32>,
    height: Option<u32>,
    style: StyleFlagSet,
    properties: Option<ControlProperties>,
    state: InteractionState,
    wrap_at_letter: bool,
}

impl LabelBuilder {
    pub fn new(text: impl Into<LabelText>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            x: 0,
            y: 0,
            width: None,
            height: None,
            style: StyleFlagSet::new(),
            properties: None,
            state: InteractionState::Normal,
            wrap_at_letter: true,
        }
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Width in pixels; 0 means fit the text.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Height in pixels; 0 means one line of text.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn size(self, width: u32, height: u32) -> Self {
        self.width(width).height(height)
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

    pub fn wrap_at_letter(mut self, wrap_at_letter: bool) -> Self {
        self.wrap_at_letter = wrap_at_letter;
        self
    }

    pub fn build(self) -> Label {
        let metrics = self.font.metrics();

        let width = match self.width {
            Some(w) if w > 0 => w,
            _ => {
                physical_lines(self.text.as_str())
                    .into_iter()
                    .map(|line| metrics.measure(line))
                    .max()
                    .unwrap_or(0)
                    + 2
            }
        };
        let height = match self.height {
            Some(h) if h > 0 => h,
            _ => metrics.line_height() + 2,
        };

        let rect = BoundingRect::new(self.x, self.y, width as i32, height as i32);
        let style = StyleFlagSet::normalized(&self.style, &LABEL_DEFAULT_STYLE, &[]);
        let properties = self.properties.unwrap_or_else(ControlProperties::label);

        Label::new(
            self.text,
            self.font,
            rect,
            style,
            properties,
            self.state,
            self.wrap_at_letter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontAttribute, FontSource, ResolvedFace};
    use crate::primitives::Rgba;
    use crate::properties::ControlKind;
    use crate::testing::{FixedMetrics, RecordingTarget, TargetCall};

    fn font(size: u32) -> Font {
        let face = ResolvedFace {
            family: "Fixed".into(),
            style: "regular".into(),
            source: FontSource::new("/fixed.ttf"),
        };
        Font::new(face, FontAttribute::Regular, size, FixedMetrics::new(8, 16))
    }

    fn hello() -> Label {
        Label::builder("Hello", font(11))
            .position(0, 0)
            .size(100, 20)
            .style([StyleFlag::LEFT, StyleFlag::TOP])
            .build()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn builds_with_defaults() {
        let label = hello();
        assert_eq!(label.style().iter().collect::<Vec<_>>(), vec![StyleFlag::LEFT]);
        assert_eq!(label.insets(), Insets::new(1, 0));
        assert_eq!(label.client_rect(), BoundingRect::new(1, 0, 98, 20));
        assert_eq!(label.formatted().texts(), vec!["Hello"]);
        assert_eq!(label.properties().kind(), ControlKind::Label);
    }

    #[test]
    fn auto_size_fits_widest_line() {
        let label = Label::builder("ab\nabcd", font(11)).position(5, 6).build();
        assert_eq!(label.rect(), BoundingRect::new(5, 6, 34, 18));

        let label = Label::builder("", font(11)).size(0, 0).build();
        assert_eq!(label.rect().size().width, 2);
    }

    // =========================================================================
    // Caching
    // =========================================================================

    #[test]
    fn second_draw_reuses_surface() {
        let mut label = hello();
        let mut target = RecordingTarget::default();

        label.draw(&mut target);
        label.draw(&mut target);

        let stats = label.stats();
        assert_eq!(stats.formats, 1);
        assert_eq!(stats.composites, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(target.blits(), 2);
    }

    #[test]
    fn unchanged_setters_do_not_dirty() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        label.set_text("Hello");
        label.set_rect(BoundingRect::new(0, 0, 100, 20));
        label.set_style([StyleFlag::LEFT]);
        label.set_style(StyleFlagSet::new());
        label.set_properties(ControlProperties::label());
        label.set_interaction_state(InteractionState::Normal);
        label.set_font(font(11));
        assert!(!label.is_dirty());

        label.draw(&mut target);
        assert_eq!(label.stats().composites, 1);
    }

    #[test]
    fn state_change_recomposites_without_reformat() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        label.set_interaction_state(InteractionState::Disabled);
        assert!(label.is_dirty());
        label.draw(&mut target);

        let stats = label.stats();
        assert_eq!(stats.formats, 1);
        assert_eq!(stats.composites, 2);
    }

    #[test]
    fn text_change_reformats() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        label.set_text("Goodbye");
        label.draw(&mut target);
        assert_eq!(label.stats().formats, 2);
        assert_eq!(label.formatted().texts(), vec!["Goodbye"]);
    }

    #[test]
    fn font_change_reformats() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        label.set_font(font(14));
        label.draw(&mut target);
        assert_eq!(label.stats().formats, 2);
    }

    #[test]
    fn border_changes_insets_and_client_rect() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        let props = ControlProperties::builder(ControlKind::Label)
            .px_border(2)
            .border_color(InteractionState::Normal, Rgba::BLACK)
            .build();
        label.set_properties(props);
        label.draw(&mut target);

        assert_eq!(label.insets(), Insets::new(3, 3));
        assert_eq!(label.client_rect(), BoundingRect::new(3, 3, 94, 14));
        assert_eq!(label.stats().formats, 2);
    }

    #[test]
    fn color_change_keeps_layout() {
        let mut label = hello();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        let props = ControlProperties::builder(ControlKind::Label)
            .text(InteractionState::Normal, Rgba::rgb(200, 0, 0))
            .build();
        label.set_properties(props);
        label.draw(&mut target);

        assert_eq!(label.stats().formats, 1);
        assert_eq!(label.stats().composites, 2);
    }

    // =========================================================================
    // State
    // =========================================================================

    #[test]
    fn hidden_draws_nothing() {
        let mut label = hello();
        label.set_interaction_state(InteractionState::Hidden);

        let mut target = RecordingTarget::default();
        label.draw(&mut target);
        assert!(target.calls.is_empty());
        assert_eq!(label.stats().composites, 0);
    }

    #[test]
    fn bad_state_code_keeps_current_state() {
        let mut label = hello();
        label.set_state_code(1).unwrap();
        assert_eq!(label.interaction_state(), InteractionState::Hot);

        assert!(label.set_state_code(9).is_err());
        assert_eq!(label.interaction_state(), InteractionState::Hot);
    }

    #[test]
    fn blit_lands_at_rect() {
        let mut label = Label::builder("Hi", font(11)).position(7, 9).size(40, 18).build();
        let mut target = RecordingTarget::default();
        label.draw(&mut target);

        assert_eq!(
            target.calls,
            vec![TargetCall::Blit {
                rect: BoundingRect::new(7, 9, 40, 18),
                size: crate::primitives::Size::new(40, 18),
            }]
        );
    }
}
