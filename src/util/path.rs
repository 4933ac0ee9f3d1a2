use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
///
/// Unknown variables leave the input unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Directory a relative source path lives in (for local config lookup).
pub fn source_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
