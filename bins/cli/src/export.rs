//! Text export of rendered reports.

use std::fs;
use std::path::{Path, PathBuf};

use billsplit_shared::AppResult;
use chrono::Local;
use tracing::info;

/// Timestamp format used in generated filenames.
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Current local time formatted for filenames (e.g. `20261016-142501`).
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Default export filename, e.g. `bill_split_20261016-142501.txt`.
pub fn default_filename(prefix: &str) -> String {
    format!("{prefix}_{}.txt", timestamp())
}

/// Writes `contents` to `filename` under `directory`.
///
/// A missing extension becomes `.txt`. An existing file is never
/// overwritten: a timestamp suffix is appended to the stem instead.
/// Returns the path actually written.
pub fn export_report(directory: &Path, filename: &str, contents: &str) -> AppResult<PathBuf> {
    let mut path = directory.join(filename);
    if path.extension().is_none() {
        path.set_extension("txt");
    }

    if path.exists() {
        path = with_timestamp_suffix(&path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;

    info!(path = %path.display(), "Exported split report");
    Ok(path)
}

fn with_timestamp_suffix(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "txt".to_string());

    path.with_file_name(format!("{stem}_{}.{extension}", timestamp()))
}
