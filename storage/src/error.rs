use std::{io, path::PathBuf};

use thiserror::Error;
use worldgen_core::GridError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode or decode map: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("no free file name for {stem} in {dir:?}")]
    NameExhausted { dir: PathBuf, stem: String },
}
