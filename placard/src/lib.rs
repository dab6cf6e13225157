//! Placard: retained-mode labels and pictures with cached text layout.
//!
//! Placard draws text labels and image pictures onto any pixel surface that
//! implements [`RenderTarget`]. The engine owns text layout (word wrap,
//! letter wrap, accelerator markers, alignment) and per-widget render
//! caching. Glyph rasterization, font discovery and image decoding are
//! supplied by the caller through [`MetricsProvider`], [`FontLoader`] and a
//! pre-built [`FontCatalog`].
//!
//! # Architecture
//!
//! A widget draw goes Label -> Text Formatter -> Glyph Row Compositor ->
//! cached surface -> blit. Setters mark the cache dirty; a clean widget
//! blits its stored surface without formatting or compositing.
//!
//! # Usage
//!
//! ```ignore
//! use placard::{Toolkit, ToolkitConfig, StyleFlag};
//!
//! let mut toolkit = Toolkit::new(catalog, loader, ToolkitConfig::default())?;
//! let mut label = toolkit
//!     .label("&Save changes", 10, 10)?
//!     .size(120, 20)
//!     .style([StyleFlag::HCENTER, StyleFlag::VCENTER])
//!     .build();
//! label.draw(&mut surface);
//! ```

// Core primitives
pub mod error;
pub mod primitives;
pub mod style;
pub mod properties;

// Collaborator interfaces
pub mod surface;
pub mod font;

// Layout engine
pub mod text;
pub mod frame;
pub mod cache;

// Widgets and factory
pub mod widgets;
pub mod config;
pub mod toolkit;

#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod testing;

// Re-export core types
pub use error::{Error, Result};
pub use primitives::{BoundingRect, Point, Rgba, Size};
pub use style::{StyleFlag, StyleFlagSet};
pub use properties::{
    ColorSet, ControlKind, ControlProperties, ControlPropertiesBuilder, ControlStyle,
    InteractionState,
};
pub use surface::{MetricsProvider, RenderTarget};
pub use font::{Font, FontAttribute, FontCatalog, FontKey, FontLoader, FontSource, ResolvedFace};
pub use text::{format_text, lines_can_draw, FormattedLine, FormattedText, LabelText};
pub use frame::Insets;
pub use cache::{DirtyFlags, RenderStats};
pub use widgets::{Label, LabelBuilder, Picture, PictureBuilder, PictureImages};
pub use config::ToolkitConfig;
pub use toolkit::Toolkit;
