//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The music home does not exist.
    MusicHomeMissing {
        /// The configured path.
        path: String,
    },
    /// The music home exists but is not a directory.
    MusicHomeNotDirectory {
        /// The configured path.
        path: String,
    },
    /// The player command is empty.
    EmptyPlayerCommand,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MusicHomeMissing { path } => write!(f, "music home does not exist: {path}"),
            Self::MusicHomeNotDirectory { path } => {
                write!(f, "music home is not a directory: {path}")
            }
            Self::EmptyPlayerCommand => write!(f, "player command is empty"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let music_home = &config.library.music_home;
    let path = music_home.display().to_string();
    if !music_home.exists() {
        warnings.push(ConfigWarning::MusicHomeMissing { path });
    } else if !music_home.is_dir() {
        warnings.push(ConfigWarning::MusicHomeNotDirectory { path });
    }

    if config.player.command.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyPlayerCommand);
    }

    warnings
}
