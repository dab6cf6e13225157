//! Per-widget render cache.
//!
//! Setters mark what they invalidated; `draw` takes the accumulated flags,
//! redoes only the invalidated work and stores the composited surface.
//! While nothing is dirty the stored surface is blitted as-is.

use image::RgbaImage;

/// What must be recomputed before the next blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    /// Formatted lines are stale (text, rect, style or font changed).
    pub layout: bool,
    /// Insets and client rect are stale (style or properties changed).
    pub insets: bool,
    /// Only the composited surface is stale (colors or state changed).
    pub surface: bool,
}

impl DirtyFlags {
    /// Everything stale: the state of a freshly built widget.
    pub const ALL: Self = Self {
        layout: true,
        insets: true,
        surface: true,
    };

    #[inline]
    pub fn any(&self) -> bool {
        self.layout || self.insets || self.surface
    }
}

/// Counters for the expensive steps of the draw path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Text formatting passes.
    pub formats: u64,
    /// Surfaces composited from scratch.
    pub composites: u64,
    /// Draws served from the stored surface.
    pub hits: u64,
}

/// The stored surface plus pending invalidations.
#[derive(Debug, Default)]
pub struct RenderCache {
    surface: Option<RgbaImage>,
    dirty: DirtyFlags,
    stats: RenderStats,
}

impl RenderCache {
    /// A cache with nothing stored and everything dirty.
    pub fn new() -> Self {
        Self {
            surface: None,
            dirty: DirtyFlags::ALL,
            stats: RenderStats::default(),
        }
    }

    pub fn mark_layout(&mut self) {
        self.dirty.layout = true;
        self.surface = None;
    }

    pub fn mark_insets(&mut self) {
        self.dirty.insets = true;
        self.surface = None;
    }

    pub fn mark_surface(&mut self) {
        self.dirty.surface = true;
        self.surface = None;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.any() || self.surface.is_none()
    }

    /// Return and clear the pending invalidations.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// The stored surface, counting a hit when present.
    pub fn cached(&mut self) -> Option<&RgbaImage> {
        if self.surface.is_some() {
            self.stats.hits += 1;
        }
        self.surface.as_ref()
    }

    /// Store a freshly composited surface.
    pub fn store(&mut self, surface: RgbaImage) -> &RgbaImage {
        self.stats.composites += 1;
        self.surface.insert(surface)
    }

    pub fn record_format(&mut self) {
        self.stats.formats += 1;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}
