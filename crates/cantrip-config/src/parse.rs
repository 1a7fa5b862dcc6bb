//! Configuration file parsing.
//!
//! Parses individual `.cantrip.toml` files into [`RawConfig`] structures whose fields
//! are all optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Library section.
    pub library: Option<RawLibrarySettings>,
    /// Player section.
    pub player: Option<RawPlayerSettings>,
}

/// Raw `[library]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLibrarySettings {
    /// Music directory, possibly relative or `~`-prefixed.
    pub music_home: Option<String>,
    /// Database file, relative to the music directory.
    pub database: Option<String>,
}

/// Raw `[player]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlayerSettings {
    /// Player executable.
    pub command: Option<String>,
    /// Arguments placed before the track paths. A single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub args: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.library.is_none());
        assert!(config.player.is_none());
    }

    #[test]
    fn test_parse_library() {
        let config = parse(
            r#"
[library]
music_home = "~/music"
database = "lib.db"
"#,
        );
        let library = config.library.unwrap();
        assert_eq!(library.music_home.as_deref(), Some("~/music"));
        assert_eq!(library.database.as_deref(), Some("lib.db"));
    }

    #[test]
    fn test_parse_player_args_list() {
        let config = parse(
            r#"
[player]
command = "mpv"
args = ["--no-video", "--shuffle"]
"#,
        );
        let player = config.player.unwrap();
        assert_eq!(player.command.as_deref(), Some("mpv"));
        assert_eq!(
            player.args,
            Some(vec!["--no-video".to_string(), "--shuffle".to_string()])
        );
    }

    #[test]
    fn test_parse_player_single_arg() {
        let config = parse("[player]\nargs = \"--no-video\"\n");
        assert_eq!(
            config.player.unwrap().args,
            Some(vec!["--no-video".to_string()])
        );
    }

    #[test]
    fn test_parse_partial_player() {
        let config = parse("[player]\ncommand = \"vlc\"\n");
        let player = config.player.unwrap();
        assert!(player.args.is_none());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config_str("[library", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/.cantrip.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_is_root_config() {
        let test_dir = TestDir::new();
        let root = test_dir.write_config("a", "root = true\n");
        let plain = test_dir.write_config("b", "");
        let broken = test_dir.write_config("c", "root = [");
        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
    }
}
