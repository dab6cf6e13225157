//! Image files for pictures.
//!
//! A file that cannot be read or decoded is logged and treated as absent,
//! leaving that picture state blank.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use placard::{Error, InteractionState, PictureImages, Result};
use tracing::warn;

/// Decode `path` into RGBA.
pub fn read_image(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| Error::ImageLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Decode `path`, logging and returning `None` on failure.
pub fn load_image(path: &Path) -> Option<RgbaImage> {
    match read_image(path) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(error = %err, "image unavailable");
            None
        }
    }
}

/// Load per-state picture images. States without a path, or whose file
/// fails to load, use the normal image.
pub fn load_picture_images<I>(paths: I) -> PictureImages
where
    I: IntoIterator<Item = (InteractionState, PathBuf)>,
{
    PictureImages::per_state(
        paths
            .into_iter()
            .filter_map(|(state, path)| load_image(&path).map(|img| (state, img))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let img = read_image(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3, 255]);
    }

    #[test]
    fn missing_file_is_image_load_error() {
        let err = read_image(Path::new("/no/such/image.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(load_image(Path::new("/no/such/image.png")).is_none());
    }

    #[test]
    fn broken_state_image_falls_back_to_normal() {
        let dir = tempfile::tempdir().unwrap();
        let normal = dir.path().join("normal.png");
        RgbaImage::new(5, 5).save(&normal).unwrap();
        let broken = dir.path().join("hot.png");
        std::fs::write(&broken, b"not a png").unwrap();

        let images = load_picture_images([
            (InteractionState::Normal, normal),
            (InteractionState::Hot, broken),
        ]);
        assert_eq!(images.get(InteractionState::Hot).map(|i| i.width()), Some(5));
    }
}
