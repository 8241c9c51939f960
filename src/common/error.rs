//! Error types for the step runner
//!
//! Every failure is fatal. Each variant maps to the process exit status the
//! run terminates with, see [`Error::exit_code`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ci-prepare
#[derive(Error, Debug)]
pub enum Error {
    // === Step Errors ===
    #[error("step '{name}' failed with exit code {code}")]
    StepFailed { name: String, code: i32 },

    #[error("failed to run script '{}': {source}", .path.display())]
    ScriptSpawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // === Log Command Errors ===
    #[error("unsupported log command: {0}")]
    UnsupportedLogCommand(String),

    // === Configuration Errors ===
    #[error("Invalid configuration file '{path}': {error}")]
    ConfigParse { path: String, error: String },

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a step failure error
    pub fn step_failed(name: &str, code: i32) -> Self {
        Self::StepFailed {
            name: name.to_string(),
            code,
        }
    }

    /// Create a spawn failure error for the given script path
    pub fn script_spawn(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ScriptSpawn {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error
    ///
    /// A failed step propagates the child's own exit code, everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { code, .. } => *code,
            _ => 1,
        }
    }

    /// Whether the runner already printed this failure to the console
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::StepFailed { .. } | Self::UnsupportedLogCommand(_)
        )
    }
}
