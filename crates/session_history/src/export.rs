use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::history::SessionHistory;
use crate::item::HistoryItem;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("nothing to save: no clip has been generated yet")]
    Empty,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write the clip to `dir/voice-gen-{id}.wav`, creating `dir` if needed.
pub fn export_item(item: &HistoryItem, dir: &Path) -> Result<PathBuf, HistoryError> {
    let path = dir.join(item.file_name());
    let write_err = |source| HistoryError::Write {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;
    std::fs::write(&path, item.clip.as_bytes()).map_err(write_err)?;
    log::info!(
        "history: saved {} ({} bytes)",
        path.display(),
        item.clip.len()
    );
    Ok(path)
}

/// Save the most recent clip.
pub fn export_latest(history: &SessionHistory, dir: &Path) -> Result<PathBuf, HistoryError> {
    let item = history.latest().ok_or(HistoryError::Empty)?;
    export_item(item, dir)
}
