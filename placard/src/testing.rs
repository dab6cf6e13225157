//! Deterministic collaborators for tests.
//!
//! `FixedMetrics` gives every character the same advance, `RecordingTarget`
//! logs draw calls instead of touching pixels, and `FixedLoader` hands out
//! `FixedMetrics` while counting loads.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::font::{FontLoader, ResolvedFace};
use crate::primitives::{BoundingRect, Rgba, Size};
use crate::surface::{MetricsProvider, RenderTarget};

/// Monospace metrics: `advance` pixels per char, fixed line height.
#[derive(Debug)]
pub struct FixedMetrics {
    advance: u32,
    line_height: u32,
    hollow: bool,
    measures: Cell<usize>,
    renders: Cell<usize>,
}

impl FixedMetrics {
    pub fn new(advance: u32, line_height: u32) -> Rc<Self> {
        Rc::new(Self {
            advance,
            line_height,
            hollow: false,
            measures: Cell::new(0),
            renders: Cell::new(0),
        })
    }

    /// Like `new`, but rendered rows are fully transparent.
    pub fn hollow(advance: u32, line_height: u32) -> Rc<Self> {
        Rc::new(Self {
            advance,
            line_height,
            hollow: true,
            measures: Cell::new(0),
            renders: Cell::new(0),
        })
    }

    pub fn measures(&self) -> usize {
        self.measures.get()
    }

    pub fn renders(&self) -> usize {
        self.renders.get()
    }
}

impl MetricsProvider for FixedMetrics {
    fn measure(&self, text: &str) -> u32 {
        self.measures.set(self.measures.get() + 1);
        text.chars().count() as u32 * self.advance
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn render(&self, text: &str, color: Rgba) -> RgbaImage {
        self.renders.set(self.renders.get() + 1);
        let width = text.chars().count() as u32 * self.advance;
        if self.hollow {
            RgbaImage::new(width, self.line_height)
        } else {
            RgbaImage::from_pixel(width, self.line_height, color.to_pixel())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCall {
    Blit { rect: BoundingRect, size: Size },
    Fill { rect: BoundingRect, color: Rgba },
}

/// Render target that records calls in order.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<TargetCall>,
}

impl RecordingTarget {
    pub fn blits(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, TargetCall::Blit { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn blit(&mut self, image: &RgbaImage, rect: BoundingRect) {
        self.calls.push(TargetCall::Blit {
            rect,
            size: Size::new(image.width(), image.height()),
        });
    }

    fn fill_rect(&mut self, rect: BoundingRect, color: Rgba) {
        self.calls.push(TargetCall::Fill { rect, color });
    }
}

/// Font loader producing `FixedMetrics` with `advance = size / 2`.
///
/// Clones share their counters.
#[derive(Debug, Clone, Default)]
pub struct FixedLoader {
    loads: Rc<Cell<usize>>,
    failing: Rc<RefCell<HashSet<PathBuf>>>,
}

impl FixedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later load of `path` fail.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing.borrow_mut().insert(path.into());
    }

    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl FontLoader for FixedLoader {
    fn load(&self, face: &ResolvedFace, size: u32) -> Result<Rc<dyn MetricsProvider>> {
        if self.failing.borrow().contains(&face.source.path) {
            return Err(Error::FontLoad {
                path: face.source.path.clone(),
                reason: "unreadable".into(),
            });
        }
        self.loads.set(self.loads.get() + 1);
        let metrics: Rc<dyn MetricsProvider> =
            FixedMetrics::new((size / 2).max(1), size + size / 4);
        Ok(metrics)
    }
}
