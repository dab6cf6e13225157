//! Per-state visual properties shared by every control.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::primitives::Rgba;

/// Which property subset a widget draws with. `Hidden` draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Normal,
    Hot,
    Pressed,
    Focused,
    Disabled,
    Hidden,
}

impl InteractionState {
    /// The five states that carry their own colors.
    pub const VISIBLE: [InteractionState; 5] = [
        InteractionState::Normal,
        InteractionState::Hot,
        InteractionState::Pressed,
        InteractionState::Focused,
        InteractionState::Disabled,
    ];

    /// Index into per-state tables, `None` for `Hidden`.
    #[inline]
    pub fn slot(self) -> Option<usize> {
        match self {
            InteractionState::Normal => Some(0),
            InteractionState::Hot => Some(1),
            InteractionState::Pressed => Some(2),
            InteractionState::Focused => Some(3),
            InteractionState::Disabled => Some(4),
            InteractionState::Hidden => None,
        }
    }
}

impl TryFrom<i32> for InteractionState {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            0 => Ok(InteractionState::Normal),
            1 => Ok(InteractionState::Hot),
            2 => Ok(InteractionState::Pressed),
            3 => Ok(InteractionState::Focused),
            4 => Ok(InteractionState::Disabled),
            5 => Ok(InteractionState::Hidden),
            other => Err(Error::InvalidState(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Label,
    Button,
    Picture,
    Animation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStyle {
    #[default]
    Flat,
    Gradient,
}

/// Colors used for one interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSet {
    pub background: Rgba,
    pub text: Rgba,
    pub border: Rgba,
}

impl Default for ColorSet {
    fn default() -> Self {
        Self {
            background: Rgba::TRANSPARENT,
            text: Rgba::BLACK,
            border: Rgba::TRANSPARENT,
        }
    }
}

/// Colors and border for every visible state of a control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlProperties {
    kind: ControlKind,
    style: ControlStyle,
    colors: [ColorSet; 5],
    px_border: u32,
}

impl ControlProperties {
    /// Default properties: every state shares the default color set.
    pub fn new(kind: ControlKind) -> Self {
        Self::builder(kind).build()
    }

    pub fn builder(kind: ControlKind) -> ControlPropertiesBuilder {
        ControlPropertiesBuilder::new(kind)
    }

    /// Label defaults: black text, grey when disabled.
    pub fn label() -> Self {
        Self::builder(ControlKind::Label)
            .text(InteractionState::Normal, Rgba::BLACK)
            .text(InteractionState::Disabled, Rgba::DISABLED_TEXT)
            .build()
    }

    pub fn picture() -> Self {
        Self::new(ControlKind::Picture)
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn style(&self) -> ControlStyle {
        self.style
    }

    pub fn px_border(&self) -> u32 {
        self.px_border
    }

    /// Colors for `state`. `Hidden` resolves to the normal set.
    pub fn colors(&self, state: InteractionState) -> &ColorSet {
        &self.colors[state.slot().unwrap_or(0)]
    }

    pub fn set_style(&mut self, style: ControlStyle) {
        self.style = style;
    }

    pub fn set_px_border(&mut self, px_border: i32) {
        self.px_border = px_border.max(0) as u32;
    }

    pub fn set_colors(&mut self, state: InteractionState, colors: ColorSet) {
        if let Some(slot) = state.slot() {
            self.colors[slot] = colors;
        }
    }
}

/// Builder resolving unset state colors from the normal state.
#[derive(Debug, Clone)]
pub struct ControlPropertiesBuilder {
    kind: ControlKind,
    style: ControlStyle,
    background: [Option<Rgba>; 5],
    text: [Option<Rgba>; 5],
    border: [Option<Rgba>; 5],
    px_border: i32,
}

impl ControlPropertiesBuilder {
    fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            style: ControlStyle::Flat,
            background: [None; 5],
            text: [None; 5],
            border: [None; 5],
            px_border: 0,
        }
    }

    pub fn style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }

    pub fn background(mut self, state: InteractionState, color: impl Into<Rgba>) -> Self {
        if let Some(slot) = state.slot() {
            self.background[slot] = Some(color.into());
        }
        self
    }

    pub fn text(mut self, state: InteractionState, color: impl Into<Rgba>) -> Self {
        if let Some(slot) = state.slot() {
            self.text[slot] = Some(color.into());
        }
        self
    }

    pub fn border_color(mut self, state: InteractionState, color: impl Into<Rgba>) -> Self {
        if let Some(slot) = state.slot() {
            self.border[slot] = Some(color.into());
        }
        self
    }

    /// Border width in pixels; values below 1 mean no border.
    pub fn px_border(mut self, px_border: i32) -> Self {
        self.px_border = px_border;
        self
    }

    pub fn build(self) -> ControlProperties {
        let defaults = ColorSet::default();
        let normal = ColorSet {
            background: self.background[0].unwrap_or(defaults.background),
            text: self.text[0].unwrap_or(defaults.text),
            border: self.border[0].unwrap_or(defaults.border),
        };

        let mut colors = [normal; 5];
        for slot in 1..5 {
            colors[slot] = ColorSet {
                background: self.background[slot].unwrap_or(normal.background),
                text: self.text[slot].unwrap_or(normal.text),
                border: self.border[slot].unwrap_or(normal.border),
            };
        }

        ControlProperties {
            kind: self.kind,
            style: self.style,
            colors,
            px_border: self.px_border.max(0) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes() {
        assert_eq!(InteractionState::try_from(0).unwrap(), InteractionState::Normal);
        assert_eq!(InteractionState::try_from(5).unwrap(), InteractionState::Hidden);
        assert!(matches!(InteractionState::try_from(6), Err(Error::InvalidState(6))));
        assert!(matches!(InteractionState::try_from(-1), Err(Error::InvalidState(-1))));
    }

    #[test]
    fn unset_states_inherit_normal() {
        let props = ControlProperties::builder(ControlKind::Button)
            .background(InteractionState::Normal, Rgba::rgb(10, 20, 30))
            .background(InteractionState::Pressed, Rgba::rgb(1, 2, 3))
            .build();

        assert_eq!(props.colors(InteractionState::Hot).background, Rgba::rgb(10, 20, 30));
        assert_eq!(props.colors(InteractionState::Pressed).background, Rgba::rgb(1, 2, 3));
        assert_eq!(props.colors(InteractionState::Focused).text, Rgba::BLACK);
        assert_eq!(props.colors(InteractionState::Disabled).border, Rgba::TRANSPARENT);
    }

    #[test]
    fn label_defaults() {
        let props = ControlProperties::label();
        assert_eq!(props.kind(), ControlKind::Label);
        assert_eq!(props.style(), ControlStyle::Flat);
        assert_eq!(props.colors(InteractionState::Normal).text, Rgba::BLACK);
        assert_eq!(props.colors(InteractionState::Disabled).text, Rgba::DISABLED_TEXT);
        assert!(props.colors(InteractionState::Normal).background.is_transparent());
    }

    #[test]
    fn negative_border_clamps_to_zero() {
        let props = ControlProperties::builder(ControlKind::Label).px_border(-4).build();
        assert_eq!(props.px_border(), 0);

        let mut props = props;
        props.set_px_border(2);
        assert_eq!(props.px_border(), 2);
    }
}
