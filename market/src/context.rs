//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! Environment variables and CLI flags are merged by clap (a flag wins over
//! its variable) and arrive here together as [`CliOverrides`]. Once built,
//! the context is passed as read-only throughout the application.

use libmarket::config::ColorChoice;
use libmarket::{Arch, Config, Result};
use std::path::PathBuf;

/// Verbosity level derived from the number of `-v` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Warnings and errors only
    Normal,
    /// `-v`: progress information
    Verbose,
    /// `-vv`: requests and pages
    VeryVerbose,
    /// `-vvv` and more: everything, including filtered-out images
    Trace,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }
}

/// Values taken from CLI flags and their environment variables
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub timeout: Option<u64>,
    pub arch: Option<Arch>,
    pub color: Option<ColorChoice>,
    pub name: String,
    pub verbose: u8,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved configuration
    pub config: Config,
    /// Name filter for this run
    pub name: String,
    /// Verbosity requested on the command line
    pub verbosity: VerbosityLevel,
}

impl AppContext {
    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn build(overrides: CliOverrides) -> Result<Self> {
        // 1 + 2. Defaults merged with the config file, if any
        let mut config = match overrides.config_path.or_else(default_config_file) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration file");
                Config::load(Some(&path))?
            }
            None => Config::default(),
        };

        // 3 + 4. Environment variables and CLI flags
        if let Some(url) = overrides.api_url {
            config.api.url = url;
        }
        if let Some(timeout) = overrides.timeout {
            config.api.timeout = (timeout > 0).then_some(timeout);
        }
        if let Some(arch) = overrides.arch {
            config.search.arch = arch;
        }
        if let Some(color) = overrides.color {
            config.output.color = color;
        }

        Ok(Self {
            config,
            name: overrides.name,
            verbosity: VerbosityLevel::from_count(overrides.verbose),
        })
    }

    /// Architecture requested for this run
    pub fn arch(&self) -> Arch {
        self.config.search.arch
    }

    /// Color choice for this run
    pub fn color(&self) -> ColorChoice {
        self.config.output.color
    }
}

/// Get the default config file path (`<config dir>/market/config.yaml`)
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("market").join("config.yaml"))
}

/// The default config file, only when it exists
fn default_config_file() -> Option<PathBuf> {
    get_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
