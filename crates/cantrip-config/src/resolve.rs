//! Path resolution for configured directories.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths. Unlike file discovery,
//! resolution does not require the path to exist: the music home may be created later.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path.
///
/// - Tilde paths (`~/music`) are expanded to the home directory
/// - Relative paths are joined onto `base`, the directory of the declaring file
/// - Absolute paths are returned unchanged
pub fn resolve_path(path: &str, base: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
pub fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_path("music", Path::new("/etc/cantrip")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/cantrip/music"));
    }

    #[test]
    fn test_resolve_parent_relative_path() {
        let resolved = resolve_path("../music", Path::new("/a/b")).unwrap();
        assert_eq!(resolved, PathBuf::from("/a/b/../music"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_path("/srv/music", Path::new("/ignored")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/music"));
    }

    #[test]
    fn test_resolve_tilde() {
        let Ok(home) = home_dir() else {
            return;
        };
        assert_eq!(resolve_path("~", Path::new("/x")).unwrap(), home);
        assert_eq!(
            resolve_path("~/music", Path::new("/x")).unwrap(),
            home.join("music")
        );
    }

    #[test]
    fn test_tilde_only_at_start() {
        assert_eq!(expand_tilde("a/~/b").unwrap(), PathBuf::from("a/~/b"));
        assert_eq!(expand_tilde("~user").unwrap(), PathBuf::from("~user"));
    }
}
