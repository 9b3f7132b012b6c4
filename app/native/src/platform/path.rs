//! Shell-like path expansion for paths read from configuration.

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Absolute and relative paths are returned unchanged. Surrounding
/// whitespace is trimmed and an empty input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
