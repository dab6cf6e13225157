//! Retained-mode widgets.

pub mod label;
pub mod picture;

pub use label::{Label, LabelBuilder, LABEL_DEFAULT_STYLE};
pub use picture::{
    Picture, PictureBuilder, PictureImages, PICTURE_DEFAULT_STYLE, PICTURE_FORCED_STYLE,
};
