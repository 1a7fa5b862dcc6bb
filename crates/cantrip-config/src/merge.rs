//! Configuration merging.
//!
//! Merges multiple [`RawConfig`] files into a single [`Config`]. Files are given
//! highest precedence first; for every field the first file that defines it wins.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, LibrarySettings, PlayerSettings,
    parse::{RawConfig, RawLibrarySettings, RawPlayerSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Returns the directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges configuration files into a single `Config`.
///
/// Configs should be provided highest precedence first (closest to the working
/// directory) and lowest precedence last (global config).
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if configs.is_empty() {
        return Ok(config);
    }

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(library) = &parsed.config.library {
            apply_raw_library(&mut config.library, library, parsed.dir())?;
        }
        if let Some(player) = &parsed.config.player {
            apply_raw_player(&mut config.player, player);
        }
    }

    config.config_root = configs.first().map(|c| c.dir().to_path_buf());
    config.files = configs.iter().map(|c| c.path.clone()).collect();
    Ok(config)
}

/// Applies a raw `[library]` section, resolving paths against `config_dir`.
fn apply_raw_library(
    result: &mut LibrarySettings,
    raw: &RawLibrarySettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref music_home) = raw.music_home {
        result.music_home = resolve_path(music_home, config_dir)?;
    }
    if let Some(ref database) = raw.database {
        result.database = PathBuf::from(database);
    }
    Ok(())
}

/// Applies a raw `[player]` section.
fn apply_raw_player(result: &mut PlayerSettings, raw: &RawPlayerSettings) {
    if let Some(ref command) = raw.command {
        result.command.clone_from(command);
    }
    if let Some(ref args) = raw.args {
        result.args.clone_from(args);
    }
}
