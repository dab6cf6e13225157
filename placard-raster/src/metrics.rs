//! fontdue-backed glyph metrics and row rendering.
//!
//! One `FontdueMetrics` per (face, size). Glyph coverage masks are
//! rasterized lazily and kept for the life of the metrics object, with an
//! array fast path for ASCII.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontdue::{Font, FontSettings, Metrics};
use image::RgbaImage;
use placard::{Error, FontLoader, MetricsProvider, ResolvedFace, Result, Rgba};
use tracing::debug;

/// A rasterized glyph: placement metrics plus its coverage mask.
#[derive(Debug, Clone)]
struct CachedGlyph {
    metrics: Metrics,
    coverage: Rc<[u8]>,
}

struct GlyphCache {
    /// Fast lookup for ASCII characters.
    ascii: Vec<Option<CachedGlyph>>,
    glyphs: HashMap<char, CachedGlyph>,
}

/// Metrics and rendering for one face at one pixel size.
pub struct FontdueMetrics {
    font: Rc<Font>,
    px: f32,
    line_height: u32,
    ascent: f32,
    glyphs: RefCell<GlyphCache>,
}

impl FontdueMetrics {
    pub fn new(font: Rc<Font>, px: f32) -> Self {
        let (line_height, ascent) = match font.horizontal_line_metrics(px) {
            Some(lm) => (lm.new_line_size.ceil() as u32, lm.ascent),
            None => ((px * 1.2).ceil() as u32, px),
        };

        Self {
            font,
            px,
            line_height: line_height.max(1),
            ascent,
            glyphs: RefCell::new(GlyphCache {
                ascii: vec![None; 128],
                glyphs: HashMap::new(),
            }),
        }
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    fn glyph(&self, ch: char) -> CachedGlyph {
        let mut cache = self.glyphs.borrow_mut();
        if ch < '\u{80}' {
            if let Some(glyph) = &cache.ascii[ch as usize] {
                return glyph.clone();
            }
        } else if let Some(glyph) = cache.glyphs.get(&ch) {
            return glyph.clone();
        }

        let (metrics, bitmap) = self.font.rasterize(ch, self.px);
        let glyph = CachedGlyph {
            metrics,
            coverage: bitmap.into(),
        };
        if ch < '\u{80}' {
            cache.ascii[ch as usize] = Some(glyph.clone());
        } else {
            cache.glyphs.insert(ch, glyph.clone());
        }
        glyph
    }
}

impl MetricsProvider for FontdueMetrics {
    fn measure(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|ch| self.font.metrics(ch, self.px).advance_width)
            .sum();
        width.ceil() as u32
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn render(&self, text: &str, color: Rgba) -> RgbaImage {
        let mut image = RgbaImage::new(self.measure(text), self.line_height);
        let baseline = self.ascent.ceil() as i32;
        let mut pen_x = 0.0f32;

        for ch in text.chars() {
            let glyph = self.glyph(ch);
            let m = &glyph.metrics;
            let left = pen_x.round() as i32 + m.xmin;
            let top = baseline - (m.ymin + m.height as i32);

            for gy in 0..m.height {
                for gx in 0..m.width {
                    let coverage = glyph.coverage[gy * m.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let (x, y) = (left + gx as i32, top + gy as i32);
                    if x < 0 || y < 0 || x >= image.width() as i32 || y >= image.height() as i32 {
                        continue;
                    }
                    let pixel = image.get_pixel_mut(x as u32, y as u32);
                    // Overlapping glyphs keep the stronger coverage.
                    let alpha = pixel.0[3].max(coverage);
                    *pixel = image::Rgba([color.r, color.g, color.b, alpha]);
                }
            }

            pen_x += m.advance_width;
        }

        image
    }
}

/// Loads font files with fontdue, parsing each (path, index) once.
#[derive(Default)]
pub struct FontdueLoader {
    parsed: RefCell<HashMap<(PathBuf, u32), Rc<Font>>>,
}

impl FontdueLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct font files parsed so far.
    pub fn parsed(&self) -> usize {
        self.parsed.borrow().len()
    }

    fn parse(&self, path: &Path, index: u32, px: f32) -> Result<Rc<Font>> {
        let key = (path.to_path_buf(), index);
        if let Some(font) = self.parsed.borrow().get(&key) {
            return Ok(Rc::clone(font));
        }

        let bytes = std::fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings = FontSettings {
            collection_index: index,
            scale: px.max(1.0),
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|reason| Error::FontLoad {
            path: path.to_path_buf(),
            reason: reason.to_owned(),
        })?;
        debug!(path = %path.display(), index, "font file parsed");

        let font = Rc::new(font);
        self.parsed.borrow_mut().insert(key, Rc::clone(&font));
        Ok(font)
    }
}

impl FontLoader for FontdueLoader {
    fn load(&self, face: &ResolvedFace, size: u32) -> Result<Rc<dyn MetricsProvider>> {
        let px = size as f32;
        let font = self.parse(&face.source.path, face.source.index, px)?;
        let metrics: Rc<dyn MetricsProvider> = Rc::new(FontdueMetrics::new(font, px));
        Ok(metrics)
    }
}
