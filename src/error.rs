use std::io;
use std::path::PathBuf;

/// Conditions that stop the whole run. Per-case problems are
/// `CaseOutcome`s, never errors.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("{what} not found at {}", .path.display())]
    MissingBinary { what: &'static str, path: PathBuf },

    #[error("no checker binary is known for platform `{0}`; pass --checker")]
    UnsupportedPlatform(String),

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("empty command line")]
    EmptyCommand,

    #[error("i/o error while running `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write report: {0}")]
    Report(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
