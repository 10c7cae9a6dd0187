//! Benchmark configuration.
//!
//! Settings come from an optional TOML file, overridden by command-line flags
//! and their environment variables:
//!
//! ```toml
//! ipfs_bin = "ipfs"
//! repo_root = "/scratch/bench"
//!
//! [logging]
//! level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{BenchError, Result};

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Storage binary to benchmark
    #[serde(default = "default_ipfs_bin")]
    pub ipfs_bin: String,

    /// Directory the per-run repositories are created in
    #[serde(default = "default_repo_root")]
    pub repo_root: PathBuf,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_ipfs_bin() -> String {
    "ipfs".to_string()
}

fn default_repo_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            ipfs_bin: default_ipfs_bin(),
            repo_root: default_repo_root(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BenchError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| BenchError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Resolve the effective configuration for a command line
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };

        if let Some(bin) = &cli.ipfs_bin {
            config.ipfs_bin = bin.clone();
        }
        if let Some(root) = &cli.repo_root {
            config.repo_root = root.clone();
        }
        if cli.verbose {
            config.logging.level = "debug".to_string();
        }

        Ok(config)
    }
}
