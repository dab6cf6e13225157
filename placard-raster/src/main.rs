//! placard-demo - render a sheet of sample labels to a PNG.
//!
//! Usage: `placard-demo [config.json] [out.png]`

use anyhow::{Context, bail};
use image::{Rgba as Pixel, RgbaImage};
use placard::{
    ControlKind, ControlProperties, InteractionState, PictureImages, Rgba, StyleFlag, ToolkitConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SHEET_WIDTH: u32 = 420;
const SHEET_HEIGHT: u32 = 300;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ToolkitConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => ToolkitConfig::default(),
    };
    let out = args.next().unwrap_or_else(|| "placard-demo.png".to_owned());

    let mut toolkit = placard_raster::raster_toolkit(config).context("no usable fonts found")?;
    if toolkit.catalog().is_empty() {
        bail!("font catalog is empty");
    }
    info!(default = ?toolkit.catalog().default_family(), "toolkit ready");

    let mut sheet = RgbaImage::from_pixel(SHEET_WIDTH, SHEET_HEIGHT, Pixel([255, 255, 255, 255]));

    let plain = ControlProperties::builder(ControlKind::Label)
        .text(InteractionState::Normal, Rgba::rgb(20, 20, 20))
        .build();
    let boxed = ControlProperties::builder(ControlKind::Label)
        .background(InteractionState::Normal, Rgba::rgb(236, 240, 250))
        .text(InteractionState::Normal, Rgba::rgb(30, 40, 120))
        .border_color(InteractionState::Normal, Rgba::rgb(90, 100, 160))
        .px_border(1)
        .build();

    let mut labels = vec![
        toolkit
            .label("&File  &Edit  &View", 10, 10)?
            .size(400, 24)
            .properties(plain.clone())
            .build(),
        toolkit
            .label("Centered in its box", 10, 44)?
            .size(400, 40)
            .style([StyleFlag::HCENTER, StyleFlag::VCENTER, StyleFlag::SUNKEN])
            .properties(boxed.clone())
            .build(),
        toolkit
            .label(
                "Word wrapping keeps whole words on a row until one word is wider than the row.",
                10,
                94,
            )?
            .size(190, 100)
            .style([StyleFlag::MULTILINE, StyleFlag::ETCHED_FRAME])
            .properties(plain.clone())
            .build(),
        toolkit
            .label("Right aligned\nbottom anchored\nlast rows win", 210, 94)?
            .size(200, 100)
            .style([StyleFlag::MULTILINE, StyleFlag::RIGHT, StyleFlag::BOTTOM])
            .properties(boxed)
            .build(),
        toolkit
            .label("Supercalifragilisticexpialidocious", 10, 204)?
            .size(120, 60)
            .style(StyleFlag::MULTILINE)
            .properties(plain)
            .wrap_at_letter(true)
            .build(),
    ];

    for label in &mut labels {
        label.draw(&mut sheet);
    }

    let swatch = RgbaImage::from_pixel(24, 24, Pixel([200, 60, 40, 255]));
    let mut picture = toolkit
        .picture(PictureImages::single(swatch), 150, 204)
        .size(60, 60)
        .style([StyleFlag::BITMAP, StyleFlag::HCENTER_IMAGE, StyleFlag::VCENTER_IMAGE])
        .properties(ControlProperties::picture())
        .build()?;
    picture.draw(&mut sheet);

    sheet.save(&out).with_context(|| format!("writing {out}"))?;
    info!(
        path = %out,
        labels = labels.len(),
        fonts = toolkit.loaded_fonts(),
        "sheet written"
    );
    Ok(())
}
