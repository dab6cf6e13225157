//! Placard Raster - concrete collaborators for the placard engine.
//!
//! fontdue provides glyph metrics and coverage masks, fontdb (via
//! cosmic-text) enumerates installed fonts, and the image crate decodes
//! picture files. Nothing here touches a window; output goes to
//! `image::RgbaImage`.

mod catalog;
mod images;
mod metrics;

pub use catalog::{catalog_from_database, style_name, system_catalog};
pub use images::{load_image, load_picture_images, read_image};
pub use metrics::{FontdueLoader, FontdueMetrics};

use placard::{Result, Toolkit, ToolkitConfig};

/// Build a toolkit over the system catalog with the fontdue loader.
pub fn raster_toolkit(config: ToolkitConfig) -> Result<Toolkit> {
    config.validate()?;
    let catalog = system_catalog(&config);
    Toolkit::new(catalog, FontdueLoader::new(), config)
}
