//! Font catalog built from installed and configured font files.
//!
//! Faces are enumerated with fontdb (through cosmic-text). Only faces backed
//! by a `.ttf`, `.ttc` or `.otf` file are registered, since the loader reads
//! fonts by path.

use std::path::Path;

use cosmic_text::fontdb::{Database, FaceInfo, Source, Stretch, Style, Weight};
use placard::{FontCatalog, FontSource, ToolkitConfig};
use tracing::{debug, info};

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "ttc", "otf"];

/// Scan system fonts (if enabled) and every configured directory.
pub fn system_catalog(config: &ToolkitConfig) -> FontCatalog {
    let mut db = Database::new();
    if config.include_system_fonts {
        db.load_system_fonts();
    }
    for dir in &config.font_dirs {
        debug!(dir = %dir.display(), "scanning font directory");
        db.load_fonts_dir(dir);
    }

    let catalog = catalog_from_database(&db);
    info!(
        faces = db.len(),
        families = catalog.len(),
        "font catalog built"
    );
    catalog
}

/// Register every file-backed face in `db`.
pub fn catalog_from_database(db: &Database) -> FontCatalog {
    let mut catalog = FontCatalog::new();
    for face in db.faces() {
        let Some(path) = face_path(face) else {
            continue;
        };
        if !has_font_extension(path) {
            continue;
        }
        let Some((family, _)) = face.families.first() else {
            continue;
        };

        let style = style_name(face.weight, face.style, face.stretch);
        let source = FontSource::new(path).with_index(face.index);
        catalog.register(family, &style, source);
    }
    catalog
}

fn face_path(face: &FaceInfo) -> Option<&Path> {
    match &face.source {
        Source::File(path) => Some(path.as_path()),
        // Memory-mapped or in-memory faces have no path the loader can read.
        _ => None,
    }
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FONT_EXTENSIONS.iter().any(|f| e.eq_ignore_ascii_case(f)))
}

/// Style name in the form fonts usually report: `"condensed bold"`,
/// `"light italic"`, `"regular"`.
pub fn style_name(weight: Weight, style: Style, stretch: Stretch) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if stretch < Stretch::Normal {
        parts.push("condensed");
    }

    let weight = match weight.0 {
        0..250 => Some("extralight"),
        250..325 => Some("light"),
        325..375 => Some("semilight"),
        375..450 => None,
        450..550 => Some("medium"),
        550..650 => Some("semibold"),
        650..750 => Some("bold"),
        _ => Some("black"),
    };
    parts.extend(weight);

    match style {
        Style::Normal => {}
        Style::Italic => parts.push("italic"),
        Style::Oblique => parts.push("oblique"),
    }

    if parts.is_empty() {
        "regular".to_owned()
    } else {
        parts.join(" ")
    }
}
