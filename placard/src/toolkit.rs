//! The toolkit: font catalog, font cache and widget factories.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::ToolkitConfig;
use crate::error::{Error, Result};
use crate::font::{Font, FontAttribute, FontCatalog, FontLoader, FontSource, ResolvedFace};
use crate::text::LabelText;
use crate::widgets::{LabelBuilder, PictureBuilder, PictureImages};

/// Memo key: lowercase family, requested attribute, size.
type FontMemoKey = (String, FontAttribute, u32);

/// Entry point for creating fonts and widgets.
///
/// Each distinct (family, attribute, size) is loaded once; later requests
/// share the loaded metrics.
pub struct Toolkit {
    catalog: FontCatalog,
    loader: Box<dyn FontLoader>,
    config: ToolkitConfig,
    fonts: HashMap<FontMemoKey, Font>,
}

impl Toolkit {
    pub fn new(
        mut catalog: FontCatalog,
        loader: impl FontLoader + 'static,
        config: ToolkitConfig,
    ) -> Result<Self> {
        config.validate()?;
        let families = catalog.len();
        let family = catalog.choose_default(&config.family_preferences())?;
        info!(family, families, "default font chosen");

        Ok(Self {
            catalog,
            loader: Box::new(loader),
            config,
            fonts: HashMap::new(),
        })
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Number of distinct fonts loaded so far.
    pub fn loaded_fonts(&self) -> usize {
        self.fonts.len()
    }

    /// Resolve and load a font. `None` picks the default family and size 0
    /// the configured default size.
    ///
    /// A face that fails to load is replaced by the default regular face.
    pub fn create_font(
        &mut self,
        family: Option<&str>,
        size: u32,
        attribute: FontAttribute,
    ) -> Result<Font> {
        let family = match family {
            Some(f) => f.to_owned(),
            None => self.catalog.default_family().ok_or(Error::NoFonts)?.to_owned(),
        };
        let size = if size == 0 { self.config.default_font_size } else { size };

        let key = (family.to_lowercase(), attribute, size);
        if let Some(font) = self.fonts.get(&key) {
            return Ok(font.clone());
        }

        let face = self.catalog.resolve(&family, attribute)?;
        let font = self.load_face(face, attribute, size)?;
        debug!(family = %family, %attribute, size, resolved = font.style(), "font created");

        self.fonts.insert(key, font.clone());
        Ok(font)
    }

    /// The default family's regular face at the configured size.
    pub fn default_font(&mut self) -> Result<Font> {
        self.create_font(None, 0, FontAttribute::Regular)
    }

    fn load_face(&self, face: ResolvedFace, attribute: FontAttribute, size: u32) -> Result<Font> {
        match self.loader.load(&face, size) {
            Ok(metrics) => Ok(Font::new(face, attribute, size, metrics)),
            Err(err) => {
                let fallback = self.catalog.default_face()?;
                if fallback == face {
                    return Err(err);
                }
                warn!(
                    path = %face.source.path.display(),
                    error = %err,
                    fallback = %fallback.family,
                    "font failed to load, using default"
                );
                let metrics = self.loader.load(&fallback, size)?;
                Ok(Font::new(fallback, attribute, size, metrics))
            }
        }
    }

    /// Register an extra face.
    pub fn add_font(&mut self, family: &str, style: &str, source: FontSource) {
        if let Some(old) = self.catalog.register(family, style, source) {
            debug!(family, style, replaced = %old.path.display(), "font face replaced");
        }
        // Resolution results may have changed.
        self.fonts.clear();
    }

    /// Make `family` the default. Returns whether the default changed.
    pub fn set_default_font(&mut self, family: &str) -> bool {
        let changed = self.catalog.set_default(family);
        if changed {
            info!(family, "default font changed");
            self.fonts.clear();
        }
        changed
    }

    /// Start a label at `(x, y)` using the default font.
    pub fn label(&mut self, text: impl Into<LabelText>, x: i32, y: i32) -> Result<LabelBuilder> {
        let font = self.default_font()?;
        Ok(LabelBuilder::new(text, font).position(x, y))
    }

    /// Start a picture at `(x, y)`.
    pub fn picture(&self, images: PictureImages, x: i32, y: i32) -> PictureBuilder {
        PictureBuilder::new(images).position(x, y)
    }
}

impl std::fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolkit")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedLoader;

    fn catalog() -> FontCatalog {
        let mut c = FontCatalog::new();
        c.register("FreeSans", "Regular", FontSource::new("/f/FreeSans.ttf"));
        c.register("FreeSans", "Bold", FontSource::new("/f/FreeSansBold.ttf"));
        c.register("Serif", "Regular", FontSource::new("/f/Serif.ttf"));
        c
    }

    fn toolkit() -> (Toolkit, FixedLoader) {
        let loader = FixedLoader::new();
        let tk = Toolkit::new(catalog(), loader.clone(), ToolkitConfig::default()).unwrap();
        (tk, loader)
    }

    #[test]
    fn picks_fallback_family_as_default() {
        let (tk, _) = toolkit();
        assert_eq!(tk.catalog().default_family(), Some("FreeSans"));
    }

    #[test]
    fn preferred_family_wins() {
        let config = ToolkitConfig {
            default_family: Some("serif".into()),
            ..ToolkitConfig::default()
        };
        let tk = Toolkit::new(catalog(), FixedLoader::new(), config).unwrap();
        assert_eq!(tk.catalog().default_family(), Some("Serif"));
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let err = Toolkit::new(FontCatalog::new(), FixedLoader::new(), ToolkitConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoFonts));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let config = ToolkitConfig {
            default_font_size: 0,
            ..ToolkitConfig::default()
        };
        let err = Toolkit::new(catalog(), FixedLoader::new(), config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn fonts_are_memoized() {
        let (mut tk, loader) = toolkit();
        let a = tk.create_font(Some("FreeSans"), 12, FontAttribute::Bold).unwrap();
        let b = tk.create_font(Some("freesans"), 12, FontAttribute::Bold).unwrap();
        assert_eq!(a, b);
        assert_eq!(loader.loads(), 1);

        tk.create_font(Some("FreeSans"), 14, FontAttribute::Bold).unwrap();
        assert_eq!(loader.loads(), 2);
        assert_eq!(tk.loaded_fonts(), 2);
    }

    #[test]
    fn size_zero_uses_config_default() {
        let (mut tk, _) = toolkit();
        let font = tk.default_font().unwrap();
        assert_eq!(font.size(), 11);
        assert_eq!(font.family(), "FreeSans");
        assert_eq!(font.style(), "regular");
    }

    #[test]
    fn unloadable_face_falls_back_to_default() {
        let (mut tk, loader) = toolkit();
        loader.fail_on("/f/FreeSansBold.ttf");

        let font = tk.create_font(Some("FreeSans"), 12, FontAttribute::Bold).unwrap();
        assert_eq!(font.style(), "regular");
        assert_eq!(font.attribute(), FontAttribute::Bold);
    }

    #[test]
    fn unloadable_default_is_an_error() {
        let (mut tk, loader) = toolkit();
        loader.fail_on("/f/FreeSans.ttf");
        assert!(matches!(tk.default_font(), Err(Error::FontLoad { .. })));
    }

    #[test]
    fn set_default_font_clears_memo() {
        let (mut tk, _) = toolkit();
        tk.default_font().unwrap();
        assert!(tk.set_default_font("Serif"));
        assert_eq!(tk.loaded_fonts(), 0);
        assert_eq!(tk.default_font().unwrap().family(), "Serif");
    }

    #[test]
    fn add_font_makes_style_available() {
        let (mut tk, _) = toolkit();
        let before = tk.create_font(Some("Serif"), 12, FontAttribute::Italic).unwrap();
        assert_eq!(before.style(), "regular");

        tk.add_font("Serif", "Italic", FontSource::new("/f/SerifItalic.ttf"));
        let after = tk.create_font(Some("Serif"), 12, FontAttribute::Italic).unwrap();
        assert_eq!(after.style(), "italic");
    }

    #[test]
    fn label_uses_default_font() {
        let (mut tk, _) = toolkit();
        let label = tk.label("Hi", 3, 4).unwrap().build();
        assert_eq!(label.rect().origin(), crate::primitives::Point::new(3, 4));
        assert_eq!(label.font().family(), "FreeSans");
    }
}
