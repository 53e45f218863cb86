//! Data file location policy.
//!
//! # Responsibility
//! - Decide which snapshot file a front end opens.
//!
//! # Invariants
//! - Precedence: explicit path, then `RESURRECT_DATA_PATH`, then
//!   `<fallback_dir>/items.json`.
//! - Blank values are treated as unset; any other path is used verbatim.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the snapshot file path.
pub const DATA_PATH_ENV: &str = "RESURRECT_DATA_PATH";
/// Snapshot file name used when no path is configured.
pub const DEFAULT_DATA_FILE_NAME: &str = "items.json";

/// Resolves the snapshot file path for a front end.
///
/// `fallback_dir` is where `items.json` lives when neither `explicit` nor
/// the environment names a path.
pub fn resolve_data_path(explicit: Option<&Path>, fallback_dir: &Path) -> PathBuf {
    resolve_with_env(explicit, std::env::var_os(DATA_PATH_ENV), fallback_dir)
}

fn resolve_with_env(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    fallback_dir: &Path,
) -> PathBuf {
    if let Some(path) = explicit.and_then(non_blank_path) {
        return path;
    }
    if let Some(path) = env_value.as_deref().map(Path::new).and_then(non_blank_path) {
        return path;
    }
    fallback_dir.join(DEFAULT_DATA_FILE_NAME)
}

fn non_blank_path(path: &Path) -> Option<PathBuf> {
    if path.to_string_lossy().trim().is_empty() {
        None
    } else {
        Some(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_with_env;
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    #[test]
    fn explicit_path_wins_over_env() {
        let resolved = resolve_with_env(
            Some(Path::new("/data/mine.json")),
            Some("/env/items.json".into()),
            Path::new("/fallback"),
        );
        assert_eq!(resolved, PathBuf::from("/data/mine.json"));
    }

    #[test]
    fn env_path_used_when_explicit_missing_or_blank() {
        let resolved = resolve_with_env(
            Some(Path::new("  ")),
            Some("/env/items.json".into()),
            Path::new("/fallback"),
        );
        assert_eq!(resolved, PathBuf::from("/env/items.json"));
    }

    #[test]
    fn configured_paths_are_not_rewritten() {
        let resolved = resolve_with_env(
            Some(Path::new(" items .json ")),
            None,
            Path::new("/fallback"),
        );
        assert_eq!(resolved, PathBuf::from(" items .json "));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_explicit_path_is_kept_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = Path::new(OsStr::from_bytes(b"/data/items-\xff.json"));
        let resolved = resolve_with_env(Some(raw), None, Path::new("/fallback"));
        assert_eq!(resolved.as_os_str().as_bytes(), b"/data/items-\xff.json");
    }

    #[test]
    fn falls_back_to_default_file_name() {
        let resolved = resolve_with_env(None, Some(OsString::new()), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/items.json"));
    }
}
