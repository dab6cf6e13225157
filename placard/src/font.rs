//! Font catalog, style resolution and font handles.
//!
//! The catalog is built by the caller (see `placard-raster` for a system
//! font scan) and maps a family name to its available styles. Resolution
//! never fails once a default family is set: unknown families and missing
//! styles fall back through similar styles to the default regular face.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::surface::MetricsProvider;

/// Requested font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FontAttribute {
    #[default]
    Regular,
    Oblique,
    Condensed,
    ExtraLight,
    SemiBold,
    SemiLight,
    Italic,
    Bold,
    Light,
    Black,
    Book,
    CondensedBold,
    SemiBoldItalic,
    SemiLightItalic,
    BoldItalic,
    BlackItalic,
    LightItalic,
}

impl FontAttribute {
    pub const ALL: [FontAttribute; 17] = [
        FontAttribute::Regular,
        FontAttribute::Oblique,
        FontAttribute::Condensed,
        FontAttribute::ExtraLight,
        FontAttribute::SemiBold,
        FontAttribute::SemiLight,
        FontAttribute::Italic,
        FontAttribute::Bold,
        FontAttribute::Light,
        FontAttribute::Black,
        FontAttribute::Book,
        FontAttribute::CondensedBold,
        FontAttribute::SemiBoldItalic,
        FontAttribute::SemiLightItalic,
        FontAttribute::BoldItalic,
        FontAttribute::BlackItalic,
        FontAttribute::LightItalic,
    ];

    /// Style name as fonts report it, lowercase.
    pub fn as_str(self) -> &'static str {
        match self {
            FontAttribute::Regular => "regular",
            FontAttribute::Oblique => "oblique",
            FontAttribute::Condensed => "condensed",
            FontAttribute::ExtraLight => "extralight",
            FontAttribute::SemiBold => "semibold",
            FontAttribute::SemiLight => "semilight",
            FontAttribute::Italic => "italic",
            FontAttribute::Bold => "bold",
            FontAttribute::Light => "light",
            FontAttribute::Black => "black",
            FontAttribute::Book => "book",
            FontAttribute::CondensedBold => "condensed bold",
            FontAttribute::SemiBoldItalic => "semibold italic",
            FontAttribute::SemiLightItalic => "semilight italic",
            FontAttribute::BoldItalic => "bold italic",
            FontAttribute::BlackItalic => "black italic",
            FontAttribute::LightItalic => "light italic",
        }
    }
}

impl fmt::Display for FontAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontAttribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == lower)
            .ok_or_else(|| Error::InvalidAttribute(s.to_owned()))
    }
}

impl From<FontAttribute> for String {
    fn from(attr: FontAttribute) -> Self {
        attr.as_str().to_owned()
    }
}

impl TryFrom<String> for FontAttribute {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Styles tried, in order, when a bold-and-italic style is missing.
const ITALIC_FALLBACKS: [&str; 5] = ["semibold", "semilight", "bold", "black", "light"];

/// Plain styles tried last, in order.
const PLAIN_FALLBACKS: [&str; 10] = [
    "oblique",
    "condensed",
    "extralight",
    "semibold",
    "semilight",
    "italic",
    "bold",
    "light",
    "black",
    "book",
];

/// Where a face's data lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontSource {
    pub path: PathBuf,
    /// Face index inside a font collection.
    #[serde(default)]
    pub index: u32,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: 0,
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }
}

/// Result of resolving a (family, attribute) request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedFace {
    /// Family display name.
    pub family: String,
    /// Lowercase style name actually chosen.
    pub style: String,
    pub source: FontSource,
}

#[derive(Debug, Clone)]
struct Family {
    name: String,
    styles: BTreeMap<String, FontSource>,
}

/// Registered font families, keyed by lowercase family name.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    families: BTreeMap<String, Family>,
    default_key: Option<String>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face, replacing any face already registered for the same
    /// family and style. Returns the replaced source.
    pub fn register(
        &mut self,
        family: &str,
        style: &str,
        source: FontSource,
    ) -> Option<FontSource> {
        let key = family.to_lowercase();
        let entry = self.families.entry(key).or_insert_with(|| Family {
            name: family.to_owned(),
            styles: BTreeMap::new(),
        });
        entry.styles.insert(style.trim().to_lowercase(), source)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(&family.to_lowercase())
    }

    /// Display names of every family, sorted by key.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.values().map(|f| f.name.as_str())
    }

    /// Lowercase style names registered for `family`.
    pub fn styles(&self, family: &str) -> Vec<&str> {
        self.families
            .get(&family.to_lowercase())
            .map(|f| f.styles.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn default_family(&self) -> Option<&str> {
        self.default_key
            .as_ref()
            .and_then(|k| self.families.get(k))
            .map(|f| f.name.as_str())
    }

    /// The default family's regular face.
    pub fn default_face(&self) -> Result<ResolvedFace> {
        let key = self.default_key.as_ref().ok_or(Error::NoFonts)?;
        let family = self.families.get(key).ok_or(Error::NoFonts)?;
        Self::face(family, FontAttribute::Regular.as_str()).ok_or(Error::NoFonts)
    }

    /// Make `family` the default if it has a regular face.
    ///
    /// Returns whether the default changed.
    pub fn set_default(&mut self, family: &str) -> bool {
        let key = family.to_lowercase();
        if !self.has_regular(&key) || self.default_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.default_key = Some(key);
        true
    }

    /// Pick the first of `preferred` with a regular face, else the first
    /// registered family with one.
    pub fn choose_default<S: AsRef<str>>(&mut self, preferred: &[S]) -> Result<&str> {
        let chosen = preferred
            .iter()
            .map(|p| p.as_ref().to_lowercase())
            .find(|k| self.has_regular(k))
            .or_else(|| self.families.keys().find(|k| self.has_regular(k)).cloned())
            .ok_or(Error::NoFonts)?;

        self.default_key = Some(chosen);
        self.default_family().ok_or(Error::NoFonts)
    }

    fn has_regular(&self, key: &str) -> bool {
        self.families
            .get(key)
            .is_some_and(|f| f.styles.contains_key(FontAttribute::Regular.as_str()))
    }

    /// Resolve a family and style to a registered face.
    ///
    /// Order: exact style; for a non-regular request the italic weights,
    /// then the plain styles; for a regular request the
    /// family's regular face; finally the default family's regular face.
    pub fn resolve(&self, family: &str, attribute: FontAttribute) -> Result<ResolvedFace> {
        if let Some(found) = self.families.get(&family.to_lowercase()) {
            let wanted = attribute.as_str();
            if let Some(face) = Self::face(found, wanted) {
                return Ok(face);
            }

            if !wanted.contains("regular") {
                let italic = ITALIC_FALLBACKS
                    .iter()
                    .find_map(|w| Self::face(found, &format!("{w} italic")));
                if let Some(face) = italic {
                    return Ok(face);
                }

                if let Some(face) = PLAIN_FALLBACKS.iter().find_map(|s| Self::face(found, s)) {
                    return Ok(face);
                }
            } else if let Some(face) = Self::face(found, "regular") {
                return Ok(face);
            }
        }

        self.default_face()
    }

    fn face(family: &Family, style: &str) -> Option<ResolvedFace> {
        family.styles.get(style).map(|source| ResolvedFace {
            family: family.name.clone(),
            style: style.to_owned(),
            source: source.clone(),
        })
    }
}

/// Identity of a loaded font: changing any part invalidates layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub family: String,
    pub style: String,
    pub source: FontSource,
    pub size: u32,
}

/// Turns a resolved face into metrics at a size.
pub trait FontLoader {
    fn load(&self, face: &ResolvedFace, size: u32) -> Result<Rc<dyn MetricsProvider>>;
}

/// A loaded font: a face at a size plus its metrics.
///
/// Clones share the metrics provider.
#[derive(Clone)]
pub struct Font {
    key: FontKey,
    attribute: FontAttribute,
    metrics: Rc<dyn MetricsProvider>,
}

impl Font {
    pub fn new(
        face: ResolvedFace,
        attribute: FontAttribute,
        size: u32,
        metrics: Rc<dyn MetricsProvider>,
    ) -> Self {
        Self {
            key: FontKey {
                family: face.family,
                style: face.style,
                source: face.source,
                size,
            },
            attribute,
            metrics,
        }
    }

    pub fn key(&self) -> &FontKey {
        &self.key
    }

    pub fn family(&self) -> &str {
        &self.key.family
    }

    /// Style actually resolved, which may differ from the request.
    pub fn style(&self) -> &str {
        &self.key.style
    }

    /// Style that was requested.
    pub fn attribute(&self) -> FontAttribute {
        self.attribute
    }

    pub fn size(&self) -> u32 {
        self.key.size
    }

    pub fn metrics(&self) -> &dyn MetricsProvider {
        self.metrics.as_ref()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Font {}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.key.family)
            .field("style", &self.key.style)
            .field("size", &self.key.size)
            .finish()
    }
}
