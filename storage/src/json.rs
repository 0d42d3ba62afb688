use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;
use worldgen_core::Grid;

use crate::error::StorageError;
use crate::models::MapDoc;

// Maps kept as `<seed in lowercase hex>.json` files under one directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, seed: u64) -> PathBuf {
        self.root.join(format!("{seed:x}.json"))
    }

    // Write `grid`, replacing any earlier map for the same seed
    pub async fn save(&self, seed: u64, grid: &Grid) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;
        let path = self.path_for(seed);
        let data = serde_json::to_vec(&MapDoc::from(grid))?;
        fs::write(&path, data)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::info!(target: "worldgen::storage", path = %path.display(), "json.save");
        Ok(path)
    }

    // None when no map was saved for `seed`
    pub async fn load(&self, seed: u64) -> Result<Option<Grid>, StorageError> {
        let path = self.path_for(seed);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        let doc: MapDoc = serde_json::from_slice(&data)?;
        let grid = Grid::try_from(doc)?;
        tracing::info!(
            target: "worldgen::storage",
            path = %path.display(),
            height = grid.height(),
            width = grid.width(),
            "json.load"
        );
        Ok(Some(grid))
    }
}
