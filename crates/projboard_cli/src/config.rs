//! Command-line configuration.
//!
//! # Responsibility
//! - Declare CLI flags.
//! - Load and check form rules from an optional JSON file.

use clap::Parser;
use projboard_core::{default_log_level, FormRules, RulesError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Drag-and-drop project board driven from line commands.
#[derive(Parser, Debug)]
#[command(name = "projboard", version, about)]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// JSON file overriding form rules.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,
}

impl Cli {
    pub fn effective_log_level(&self) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string())
    }

    /// Log directory as UTF-8, as the logger takes it.
    ///
    /// A path that is not valid UTF-8 is refused instead of being rewritten.
    pub fn log_dir_str(&self) -> Result<Option<&str>, ConfigError> {
        match &self.log_dir {
            None => Ok(None),
            Some(dir) => dir
                .to_str()
                .map(Some)
                .ok_or_else(|| ConfigError::NonUtf8Path(dir.clone())),
        }
    }
}

/// Startup failures; these end the process.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidRules(RulesError),
    NonUtf8Path(PathBuf),
    Logging(String),
    Write(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse rules `{}`: {source}", path.display())
            }
            Self::InvalidRules(err) => write!(f, "invalid rules: {err}"),
            Self::NonUtf8Path(path) => {
                write!(f, "path is not valid UTF-8: `{}`", path.display())
            }
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Write(source) => write!(f, "failed to write output: {source}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidRules(err) => Some(err),
            Self::Write(source) => Some(source),
            Self::NonUtf8Path(_) | Self::Logging(_) => None,
        }
    }
}

/// Loads rules from `path`, or defaults when no file is given.
///
/// Missing keys fall back to their defaults.
pub fn load_rules(path: Option<&Path>) -> Result<FormRules, ConfigError> {
    let rules = match path {
        None => FormRules::default(),
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str::<FormRules>(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    rules.validate().map_err(ConfigError::InvalidRules)?;
    Ok(rules)
}
