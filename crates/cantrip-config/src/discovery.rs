//! Configuration file discovery.
//!
//! Walks up the directory tree from a starting point collecting `.cantrip.toml` files,
//! then appends the global `~/.cantrip.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".cantrip.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global last. Discovery
/// stops at a file with `root = true`, in which case the global file is skipped too.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    debug!("discovered config files: {configs:?}");
    configs
}

/// Returns the path to the global configuration file (`~/.cantrip.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Filters out the global config, which depends on the test machine.
    fn local(configs: Vec<PathBuf>) -> Vec<PathBuf> {
        configs.into_iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.mkdir("a/b/c");
        assert!(local(discover_config_files(&subdir)).is_empty());
    }

    #[test]
    fn test_discover_closest_first() {
        let test_dir = TestDir::new();
        let outer = test_dir.write_config("a", "");
        let inner = test_dir.write_config("a/b", "");
        let subdir = test_dir.mkdir("a/b/c");

        assert_eq!(local(discover_config_files(&subdir)), vec![inner, outer]);
    }

    #[test]
    fn test_discover_stops_at_root() {
        let test_dir = TestDir::new();
        test_dir.write_config("a", "");
        let root = test_dir.write_config("a/b", "root = true\n");
        let subdir = test_dir.mkdir("a/b/c");

        assert_eq!(discover_config_files(&subdir), vec![root]);
    }

    #[test]
    fn test_discover_ignores_directories_named_like_config() {
        let test_dir = TestDir::new();
        test_dir.mkdir(&format!("a/{CONFIG_FILENAME}"));
        let subdir = test_dir.mkdir("a/b");
        assert!(local(discover_config_files(&subdir)).is_empty());
    }

    #[test]
    fn test_global_config_path_uses_filename() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
            assert!(is_global_config(&path));
        }
    }
}
