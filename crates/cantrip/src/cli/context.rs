//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use cantrip_config::Config;
use cantrip_library::Library;
use cantrip_ql::ParseError;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Library opened lazily for this invocation.
    library: Option<Library>,
}

impl CommandContext {
    /// Loads the current directory and configuration, applying a music home override.
    pub fn load(music_home: Option<&str>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let mut config = load_config_or_failure(&cwd)?;
        if let Some(music_home) = music_home {
            config = config.with_music_home(music_home, &cwd).map_err(|e| {
                eprintln!("error: invalid music home: {e}");
                ExitCode::FAILURE
            })?;
        }
        Ok(Self {
            cwd,
            config,
            library: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is
    /// invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            library: None,
        })
    }

    /// Returns the library, opening the configured database on first use.
    pub fn library(&mut self) -> Result<&mut Library, ExitCode> {
        let library = match self.library.take() {
            Some(library) => library,
            None => open_library_or_failure(&self.config)?,
        };
        Ok(self.library.insert(library))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Opens the configured library database or exits with an error.
fn open_library_or_failure(config: &Config) -> Result<Library, ExitCode> {
    let settings = &config.library;
    Library::open(&settings.music_home, &settings.database_path()).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Prints a query parse error with its caret diagnostic.
pub fn report_parse_error(err: &ParseError) -> ExitCode {
    eprintln!("{err}");
    ExitCode::FAILURE
}
