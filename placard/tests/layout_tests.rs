//! Integration tests for the label draw path.
//!
//! These go through the public API only: a `Toolkit` built over an
//! in-memory catalog, labels created from it, and drawing onto either a
//! call-recording target or a real `RgbaImage`.
//!
//! The fixed loader gives every font a monospace advance of `size / 2`
//! and a line height of `size + size / 4`, so at size 16 each char is 8px
//! wide and each row is 20px tall.

use image::RgbaImage;
use placard::testing::{FixedLoader, FixedMetrics, RecordingTarget};
use placard::{
    format_text, lines_can_draw, BoundingRect, ColorSet, ControlKind, ControlProperties,
    FontCatalog, FontSource, InteractionState, Label, Rgba, StyleFlag, StyleFlagSet, Toolkit,
    ToolkitConfig,
};

/// Toolkit over a one-family catalog with a counting loader.
struct Harness {
    toolkit: Toolkit,
    loader: FixedLoader,
}

impl Harness {
    fn new() -> Self {
        let mut catalog = FontCatalog::new();
        catalog.register("FreeSans", "Regular", FontSource::new("/fonts/FreeSans.ttf"));
        catalog.register("FreeSans", "Bold", FontSource::new("/fonts/FreeSansBold.ttf"));

        let loader = FixedLoader::new();
        let config = ToolkitConfig {
            default_font_size: 16,
            ..ToolkitConfig::default()
        };
        let toolkit = Toolkit::new(catalog, loader.clone(), config).expect("toolkit");
        Self { toolkit, loader }
    }

    fn label(&mut self, text: &str, width: u32, height: u32, style: &[StyleFlag]) -> Label {
        self.toolkit
            .label(text, 0, 0)
            .expect("default font")
            .size(width, height)
            .style(style.iter().copied().collect::<StyleFlagSet>())
            .build()
    }
}

// =========================================================================
// Caching
// =========================================================================

#[test]
fn hello_formats_once_across_two_draws() {
    let mut h = Harness::new();
    let mut label = h.label("Hello", 100, 20, &[StyleFlag::LEFT, StyleFlag::TOP]);
    let mut target = RecordingTarget::default();

    label.draw(&mut target);
    label.draw(&mut target);

    assert_eq!(label.stats().formats, 1);
    assert_eq!(label.stats().composites, 1);
    assert_eq!(target.blits(), 2);
    assert_eq!(h.loader.loads(), 1);
}

#[test]
fn many_labels_share_one_font_load() {
    let mut h = Harness::new();
    for i in 0..10 {
        let mut label = h.label(&format!("row {i}"), 80, 20, &[]);
        label.draw(&mut RecordingTarget::default());
    }
    assert_eq!(h.loader.loads(), 1);
}

#[test]
fn only_changed_inputs_redo_work() {
    let mut h = Harness::new();
    let mut label = h.label("Status: ok", 120, 40, &[StyleFlag::MULTILINE]);
    let mut target = RecordingTarget::default();
    label.draw(&mut target);

    label.set_interaction_state(InteractionState::Hot);
    label.draw(&mut target);
    label.set_style([StyleFlag::MULTILINE, StyleFlag::HCENTER]);
    label.draw(&mut target);
    label.draw(&mut target);

    let stats = label.stats();
    assert_eq!(stats.formats, 2);
    assert_eq!(stats.composites, 3);
    assert_eq!(stats.hits, 1);
}

// =========================================================================
// Layout scenarios
// =========================================================================

#[test]
fn accelerator_underline_lands_under_b() {
    let mut h = Harness::new();
    let props = ControlProperties::builder(ControlKind::Label)
        .text(InteractionState::Normal, Rgba::rgb(0, 0, 255))
        .build();
    let mut label = h
        .toolkit
        .label("A&B", 0, 0)
        .unwrap()
        .size(40, 20)
        .properties(props)
        .build();

    assert_eq!(label.formatted().texts(), vec!["AB"]);
    assert_eq!(label.formatted().lines()[0].accelerators(), &[1]);

    let mut surface = RgbaImage::new(40, 20);
    label.draw(&mut surface);
    // Text starts at the 1px inset; `B` spans x 9..17.
    assert_eq!(surface.get_pixel(12, 19).0, [0, 0, 255, 255]);
}

#[test]
fn bottom_multiline_draws_last_two_of_five() {
    let m = FixedMetrics::new(8, 20);
    let flags = StyleFlagSet::from([StyleFlag::BOTTOM, StyleFlag::MULTILINE]);
    let rect = BoundingRect::new(0, 0, 200, 45);
    let text = format_text("one\ntwo\nthree\nfour\nfive", &*m, rect, &flags, true);
    assert_eq!(text.len(), 5);

    let params = placard::text::CompositeParams {
        size: rect.size(),
        client_width: rect.width,
        x_offset: 0,
        y_offset: 0,
        flags: &flags,
        colors: ColorSet::default(),
        font_size: 16,
    };
    let mut target = RecordingTarget::default();
    let plan = placard::text::composite(&text, &*m, &params, &mut target);

    assert_eq!(plan.lines_can_draw, 2);
    assert_eq!(plan.drawn_indices(), vec![3, 4]);
    assert_eq!(target.blits(), 2);
}

#[test]
fn long_word_splits_by_letter() {
    let m = FixedMetrics::new(8, 20);
    let flags = StyleFlagSet::from(StyleFlag::MULTILINE);
    let text = format_text(
        "verylongwordthatdoesnotfit",
        &*m,
        BoundingRect::new(0, 0, 60, 200),
        &flags,
        true,
    );
    assert!(text.len() > 1);
    assert_eq!(text.lines()[0].text(), "verylon");
    assert_eq!(text.texts().concat(), "verylongwordthatdoesnotfit");
}

#[test]
fn transparent_colors_skip_all_drawing() {
    let mut h = Harness::new();
    let props = ControlProperties::builder(ControlKind::Label)
        .text(InteractionState::Normal, Rgba::new(0, 0, 0, 0))
        .build();
    let mut label = h.toolkit.label("Invisible", 0, 0).unwrap().properties(props).build();

    let mut surface = RgbaImage::new(200, 40);
    label.draw(&mut surface);
    assert!(surface.pixels().all(|p| p.0[3] == 0));
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn formatting_is_idempotent() {
    let m = FixedMetrics::new(7, 14);
    let flags = StyleFlagSet::from(StyleFlag::MULTILINE);
    let rect = BoundingRect::new(0, 0, 90, 300);
    let samples = [
        "The quick brown fox jumps over the lazy dog",
        "&File\n&Edit\n\nView &options for this window",
        "supercalifragilisticexpialidocious and more",
        "tabs\tare\tdropped",
    ];
    for sample in samples {
        let once = format_text(sample, &*m, rect, &flags, true);
        let twice = format_text(&once.to_source_text(), &*m, rect, &flags, true);
        assert_eq!(once, twice, "{sample:?}");
    }
}

#[test]
fn no_wordwrap_yields_one_line_per_physical_line() {
    let m = FixedMetrics::new(7, 14);
    let flags = StyleFlagSet::from([StyleFlag::MULTILINE, StyleFlag::LEFT_NO_WORDWRAP]);
    let source = "first physical line that is long\nsecond\tline\nthi&rd";
    let text = format_text(source, &*m, BoundingRect::new(0, 0, 30, 300), &flags, true);
    assert_eq!(text.texts(), vec!["first physical line that is long", "secondline", "third"]);
}

#[test]
fn lines_can_draw_shrinks_with_height() {
    let mut previous = usize::MAX;
    for height in (0..=240).rev() {
        let n = lines_can_draw(12, 20, height);
        assert!(n <= previous);
        assert!(n * 20 <= height as usize);
        previous = n;
    }
    assert_eq!(previous, 0);
}
