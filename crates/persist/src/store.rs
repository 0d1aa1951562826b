//! File-backed scene persistence.
//!
//! Saves go to a sibling temporary file first and are renamed into place, so
//! a failed save never truncates the previous file.

use std::path::{Path, PathBuf};

use stagecraft_scene::Scene;

use crate::codec;

/// File extension used for scene files.
pub const SCENE_EXTENSION: &str = "json";

/// Errors from scene persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene data: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and parse a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, StoreError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let scene = codec::decode(&bytes)?;
    tracing::info!(path = %path.display(), objects = scene.len(), "scene loaded");
    Ok(scene)
}

/// Write a scene file, replacing any existing file atomically.
///
/// The parent directory must already exist.
pub fn save_scene(path: impl AsRef<Path>, scene: &Scene) -> Result<(), StoreError> {
    let path = path.as_ref();
    let bytes = codec::encode(scene)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, &bytes).map_err(|e| StoreError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StoreError::io(path, e));
    }
    tracing::info!(path = %path.display(), objects = scene.len(), bytes = bytes.len(), "scene saved");
    Ok(())
}

/// Scene files directly inside `dir`, sorted by path.
pub fn list_scenes(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, StoreError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SCENE_EXTENSION) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
