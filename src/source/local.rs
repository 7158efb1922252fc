//! Local filesystem source strategy.

use std::path::{Path, PathBuf};

use crate::error::RetrievalError;

/// Joins a working-directory-relative path onto `base`.
///
/// Leading and trailing slashes are stripped so `/bots/a.py` and `bots/a.py`
/// resolve to the same file.
pub fn resolve_relative(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.trim_matches('/'))
}

/// Reads a bot source file relative to `base`.
pub async fn read_local_source(base: &Path, relative: &str) -> Result<Vec<u8>, RetrievalError> {
    let path = resolve_relative(base, relative);
    tokio::fs::read(&path)
        .await
        .map_err(|source| RetrievalError::LocalRead { path, source })
}
