// Cache path utilities.
// Maps cache keys and the log file onto the platform cache directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/shutter on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shutter").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the application log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("shutter.log"))
}

/// Path to the file backing a key under `root`.
pub fn key_path(root: &Path, key: &str) -> PathBuf {
    root.join(format!("{}.json", sanitize_key(key)))
}

/// Sanitize a key for use as a file name.
/// Replaces problematic characters with underscores.
fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '@' => '_',
            _ => c,
        })
        .collect();
    cleaned.trim_start_matches(['_', '.']).to_string()
}
