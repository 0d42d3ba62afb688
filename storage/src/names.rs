use std::path::{Path, PathBuf};

use crate::error::StorageError;

const MAX_SUFFIX: u32 = 1024;

// First free image path for `kind` renderings of `seed` inside `dir`:
// `<seed hex>-<kind>.png`, then `<seed hex>-<kind>-0001.png` and upwards.
pub fn unique_name(dir: &Path, kind: &str, seed: u64) -> Result<PathBuf, StorageError> {
    let stem = format!("{seed:x}-{kind}");
    let path = dir.join(format!("{stem}.png"));
    if !path.exists() {
        return Ok(path);
    }
    for n in 1..MAX_SUFFIX {
        let path = dir.join(format!("{stem}-{n:04}.png"));
        if !path.exists() {
            return Ok(path);
        }
    }
    Err(StorageError::NameExhausted {
        dir: dir.to_path_buf(),
        stem,
    })
}
