//! Asset catalog: native pixel sizes of image sprites.
//!
//! The editor never decodes images itself. It asks an [`ImageSizes`] source
//! how large an image is, and this catalog is that source. Sizes are
//! registered explicitly, read from image file headers, or read from a JSON
//! manifest kept next to the scene files.
//!
//! # Layout
//! A manifest is a JSON object mapping image path to `{"width", "height"}`.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use stagecraft_view::ImageSizes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Native dimensions of one image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn as_vec(self) -> DVec2 {
        DVec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has zero size")]
    EmptyImage { path: String },
}

impl AssetError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Image path to native size.
///
/// Paths are stored exactly as scene objects reference them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    images: BTreeMap<String, ImageSize>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of an image, replacing any previous entry.
    pub fn register(&mut self, path: impl Into<String>, size: ImageSize) -> Result<(), AssetError> {
        let path = path.into();
        if size.width == 0 || size.height == 0 {
            return Err(AssetError::EmptyImage { path });
        }
        tracing::debug!(%path, width = size.width, height = size.height, "image registered");
        self.images.insert(path, size);
        Ok(())
    }

    /// Read the size of the image at `root/path` and register it under `path`.
    pub fn register_file(&mut self, root: impl AsRef<Path>, path: &str) -> Result<ImageSize, AssetError> {
        let file = root.as_ref().join(path);
        let size = read_image_size(&file)?;
        self.register(path, size)?;
        Ok(size)
    }

    pub fn get(&self, path: &str) -> Option<ImageSize> {
        self.images.get(path).copied()
    }

    pub fn remove(&mut self, path: &str) -> Option<ImageSize> {
        self.images.remove(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Registered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Load a manifest written by [`AssetCatalog::save_manifest`].
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| AssetError::io(path, e))?;
        let catalog: Self = serde_json::from_slice(&data)?;
        if let Some((bad, _)) = catalog.images.iter().find(|(_, s)| s.width == 0 || s.height == 0) {
            return Err(AssetError::EmptyImage { path: bad.clone() });
        }
        tracing::info!(path = %path.display(), images = catalog.len(), "asset manifest loaded");
        Ok(catalog)
    }

    /// Write the catalog as pretty JSON.
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let mut data = serde_json::to_vec_pretty(self)?;
        data.push(b'\n');
        std::fs::write(path, data).map_err(|e| AssetError::io(path, e))?;
        tracing::info!(path = %path.display(), images = self.len(), "asset manifest saved");
        Ok(())
    }
}

impl ImageSizes for AssetCatalog {
    fn native_size(&self, path: &str) -> Option<DVec2> {
        self.get(path).map(ImageSize::as_vec)
    }
}

/// Read width and height from an image file's header without decoding pixels.
pub fn read_image_size(path: impl AsRef<Path>) -> Result<ImageSize, AssetError> {
    let path = path.as_ref();
    let (width, height) = image::image_dimensions(path).map_err(|e| match e {
        image::ImageError::IoError(source) => AssetError::io(path, source),
        source => AssetError::Image {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if width == 0 || height == 0 {
        return Err(AssetError::EmptyImage {
            path: path.display().to_string(),
        });
    }
    Ok(ImageSize { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecraft_scene::SceneObject;
    use stagecraft_view::display_size;

    #[test]
    fn register_and_lookup() {
        let mut catalog = AssetCatalog::new();
        catalog
            .register("hero.png", ImageSize { width: 32, height: 48 })
            .unwrap();
        assert_eq!(catalog.native_size("hero.png"), Some(DVec2::new(32.0, 48.0)));
        assert_eq!(catalog.native_size("villain.png"), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut catalog = AssetCatalog::new();
        let err = catalog
            .register("blank.png", ImageSize { width: 0, height: 10 })
            .unwrap_err();
        assert!(matches!(err, AssetError::EmptyImage { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn sizes_feed_hit_testing() {
        let mut catalog = AssetCatalog::new();
        catalog
            .register("tree.png", ImageSize { width: 100, height: 200 })
            .unwrap();
        let mut obj = SceneObject::image("tree", "tree.png", DVec2::ZERO);
        obj.transform.scale_x = 0.5;
        assert_eq!(display_size(&obj, &catalog), DVec2::new(50.0, 200.0));
    }

    #[test]
    fn manifest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        let mut catalog = AssetCatalog::new();
        catalog.register("b.png", ImageSize { width: 4, height: 4 }).unwrap();
        catalog.register("a.png", ImageSize { width: 16, height: 8 }).unwrap();
        catalog.save_manifest(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.find("a.png").unwrap() < text.find("b.png").unwrap());

        let loaded = AssetCatalog::load_manifest(&path).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded.paths().collect::<Vec<_>>(), ["a.png", "b.png"]);
    }

    #[test]
    fn manifest_with_zero_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, r#"{"x.png": {"width": 0, "height": 3}}"#).unwrap();
        assert!(matches!(
            AssetCatalog::load_manifest(&path),
            Err(AssetError::EmptyImage { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetCatalog::load_manifest(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn sizes_read_from_png_and_jpeg_headers() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("art")).unwrap();
        image::RgbaImage::new(120, 45)
            .save(dir.path().join("art/ship.png"))
            .unwrap();
        image::RgbImage::new(30, 18)
            .save(dir.path().join("art/tree.jpg"))
            .unwrap();

        let mut catalog = AssetCatalog::new();
        let ship = catalog.register_file(dir.path(), "art/ship.png").unwrap();
        assert_eq!(ship, ImageSize { width: 120, height: 45 });
        let tree = catalog.register_file(dir.path(), "art/tree.jpg").unwrap();
        assert_eq!(tree, ImageSize { width: 30, height: 18 });
        assert_eq!(catalog.native_size("art/tree.jpg"), Some(DVec2::new(30.0, 18.0)));
    }

    #[test]
    fn non_images_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.png"), b"definitely not an image").unwrap();

        let mut catalog = AssetCatalog::new();
        let err = catalog.register_file(dir.path(), "notes.png").unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
        let err = catalog.register_file(dir.path(), "missing.png").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(catalog.is_empty());
    }
}
