//! Flat JSON files shared by the file-backed stores.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub(crate) enum JsonFileError {
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and parses `path`. `Ok(None)` means the file does not exist.
pub(crate) async fn read_json<T: DeserializeOwned>(
    path: &Path,
) -> Result<Option<T>, JsonFileError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(JsonFileError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| JsonFileError::Parse {
            path: path.to_owned(),
            source,
        })
}

/// Replaces `path` with the serialized `value`. Readers see either the old or
/// the new content, never a partial write.
pub(crate) async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), JsonFileError> {
    let io_error = |source| JsonFileError::Io {
        path: path.to_owned(),
        source,
    };

    let bytes = serde_json::to_vec_pretty(value).map_err(|source| JsonFileError::Parse {
        path: path.to_owned(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)
}
