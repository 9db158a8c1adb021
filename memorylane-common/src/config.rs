//! Configuration loading and album file resolution
//!
//! The album file is resolved with a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MEMORYLANE_ALBUM` environment variable
//! 3. TOML config file (`album_file` key)
//! 4. None — the built-in sample album is used
//!
//! A missing or malformed config file never terminates startup: the
//! resolver logs a warning and falls through to the next tier.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable naming the album file
pub const ALBUM_ENV_VAR: &str = "MEMORYLANE_ALBUM";

/// Logging section of the TOML config file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "memorylane_book=debug")
    pub level: Option<String>,
}

impl LoggingConfig {
    /// Filter directive to use when no environment override is set
    pub fn directive_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.level.as_deref().unwrap_or(default)
    }
}

/// TOML config file contents
///
/// All fields are optional; absent fields fall back to compiled defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    /// HTTP listen port
    pub port: Option<u16>,
    /// Album file path
    pub album_file: Option<PathBuf>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse config file contents, tolerating malformed input
    ///
    /// Malformed TOML yields the default (empty) config with a warning,
    /// never an error.
    pub fn parse_lenient(contents: &str) -> Self {
        match toml::from_str::<TomlConfig>(contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("Malformed config file ignored: {}", e);
                TomlConfig::default()
            }
        }
    }
}

/// Compiled platform defaults
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    /// Default HTTP port
    pub port: u16,
    /// Default log level
    pub log_level: String,
}

impl CompiledDefaults {
    /// Defaults for the current platform
    pub fn for_current_platform() -> Self {
        Self {
            port: 5780,
            log_level: "info".to_string(),
        }
    }
}

/// Resolves the album file path following the documented priority order
pub struct AlbumPathResolver {
    module_name: &'static str,
    config: TomlConfig,
}

impl AlbumPathResolver {
    /// Create a resolver, loading the platform config file if present
    pub fn new(module_name: &'static str) -> Self {
        let config = load_config_file().unwrap_or_default();
        Self {
            module_name,
            config,
        }
    }

    /// Create a resolver with an explicit pre-loaded config (for tests)
    pub fn with_config(module_name: &'static str, config: TomlConfig) -> Self {
        Self {
            module_name,
            config,
        }
    }

    /// Loaded TOML config (port, logging overrides)
    pub fn config(&self) -> &TomlConfig {
        &self.config
    }

    /// Resolve the album path
    ///
    /// Returns `None` when no tier names a file, in which case the caller
    /// uses the built-in sample album.
    pub fn resolve(&self, cli_arg: Option<&PathBuf>) -> Option<PathBuf> {
        // Priority 1: command-line argument
        if let Some(path) = cli_arg {
            debug!("{}: album from command line: {}", self.module_name, path.display());
            return Some(path.clone());
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(ALBUM_ENV_VAR) {
            if !path.is_empty() {
                debug!("{}: album from {}: {}", self.module_name, ALBUM_ENV_VAR, path);
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &self.config.album_file {
            debug!("{}: album from config file: {}", self.module_name, path.display());
            return Some(path.clone());
        }

        // Priority 4: built-in sample album
        debug!("{}: no album configured, using built-in sample", self.module_name);
        None
    }
}

/// Load the platform config file, if any
///
/// Tries the user config directory first, then `/etc/memorylane` on Linux.
fn load_config_file() -> Option<TomlConfig> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("memorylane").join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc/memorylane/config.toml"));
    }

    for path in candidates {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => {
                    debug!("Loaded config file: {}", path.display());
                    return Some(TomlConfig::parse_lenient(&contents));
                }
                Err(e) => {
                    warn!("Could not read config file {}: {}", path.display(), e);
                }
            }
        }
    }
    None
}
