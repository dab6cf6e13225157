//! Text layout: accelerator markers, line formatting and row compositing.

pub mod accelerator;
pub mod compositor;
pub mod format;

pub use compositor::{composite, lines_can_draw, plan_rows, CompositeParams, PlacedRow, RowPlan};
pub use format::{format_text, FormattedLine, FormattedText};

use std::fmt;

/// Label text, coerced from the values a caller might hand a label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelText(String);

impl LabelText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// One item per line, each followed by a newline.
    pub fn from_lines<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut text = String::new();
        for item in items {
            text.push_str(&item.to_string());
            text.push('\n');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LabelText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LabelText {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for LabelText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

macro_rules! label_text_from_display {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LabelText {
            fn from(value: $ty) -> Self {
                Self(value.to_string())
            }
        })*
    };
}

label_text_from_display!(i32, i64, u32, u64, f32, f64);
