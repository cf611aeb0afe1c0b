//! Platform-specific paths for presets and configuration.
//!
//! - **User presets**: `~/.config/shelf/presets/` (Linux),
//!   `~/Library/Application Support/shelf/presets/` (macOS),
//!   `%APPDATA%\shelf\presets\` (Windows)
//! - **User config**: the same paths without `presets/`
//!
//! ```rust,no_run
//! use shelf_config::paths;
//!
//! if let Some(path) = paths::find_preset("warm_bass") {
//!     println!("Found preset at: {path:?}");
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "shelf";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Find a preset file by path or name.
///
/// An existing file path is returned as is. Otherwise `name` (with `.toml`
/// appended if missing) is looked up in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir()])
}

/// Like [`find_preset`], searching `dirs` in order.
pub fn find_preset_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    dirs.iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Creates the user presets directory if needed and returns it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Lists the `.toml` files in the user presets directory, sorted.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Lists the `.toml` files in `dir`, sorted. Missing or unreadable
/// directories give an empty list.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// The preset name of a file: its stem.
///
/// ```rust
/// use shelf_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(
///     preset_name_from_path(Path::new("/presets/warm_bass.toml")),
///     Some("warm_bass".to_string())
/// );
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
