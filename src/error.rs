//! Error types and exit codes for ipfs-add-bench

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for benchmark operations
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("failed to execute `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("binary not found on PATH: {name}")]
    MissingBinary { name: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl BenchError {
    /// Convert error to the process exit code.
    ///
    /// Every failure that reaches `main` aborts the sweep with status 1;
    /// printing usage for a missing argument is not an error and exits 0.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Launch { .. }
            | Self::CommandFailed { .. }
            | Self::MissingBinary { .. }
            | Self::Config { .. }
            | Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;
