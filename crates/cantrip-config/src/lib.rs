//! Configuration system for cantrip.
//!
//! cantrip uses TOML configuration files named `.cantrip.toml`. Configuration is
//! resolved by walking up the directory tree from the current working directory,
//! collecting any `.cantrip.toml` files found, then loading `~/.cantrip.toml` as the
//! global config with lowest precedence.
//!
//! ```toml
//! [library]
//! music_home = "~/music"
//! database = ".metadata.db"
//!
//! [player]
//! command = "mpv"
//! args = ["--no-video"]
//! ```

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use log::debug;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawLibrarySettings, RawPlayerSettings, parse_config_file, parse_config_str,
};
pub use resolve::{expand_tilde, resolve_path};
use serde::Serialize;
pub use templates::template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Directory name of the default music home, inside the home directory.
const DEFAULT_MUSIC_HOME: &str = ".cantrip";

/// Default database file name, relative to the music home.
const DEFAULT_DATABASE: &str = ".metadata.db";

/// Top-level merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Library settings.
    pub library: LibrarySettings,
    /// Player settings.
    pub player: PlayerSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that were merged, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.cantrip.toml`
    /// files, closest to `cwd` winning.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths, highest
    /// precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed)?;
        debug!("loaded config {config:?}");
        Ok(config)
    }

    /// Overrides the music home, as the command line and environment do.
    pub fn with_music_home(mut self, music_home: &str, cwd: &Path) -> Result<Self, ConfigError> {
        self.library.music_home = resolve_path(music_home, cwd)?;
        Ok(self)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.cantrip.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            library: &self.library,
            player: &self.player,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Library settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySettings {
    /// Directory holding the music. Stored track paths are relative to it.
    pub music_home: PathBuf,
    /// Database file, relative to the music home unless absolute.
    pub database: PathBuf,
}

impl LibrarySettings {
    /// Returns the database location.
    pub fn database_path(&self) -> PathBuf {
        self.music_home.join(&self.database)
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        let music_home = resolve::home_dir()
            .map(|home| home.join(DEFAULT_MUSIC_HOME))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MUSIC_HOME));
        Self {
            music_home,
            database: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

/// External player settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSettings {
    /// Player executable.
    pub command: String,
    /// Arguments placed before the track paths.
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            command: String::from("mpv"),
            args: vec![String::from("--no-video")],
        }
    }
}

/// Borrowed settings in TOML layout.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Library section.
    library: &'a LibrarySettings,
    /// Player section.
    player: &'a PlayerSettings,
}
