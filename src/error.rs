use std::io;
use std::path::PathBuf;

use jlblock::FormatOptionsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Invalid integer for {flag}: {value}")]
    InvalidInteger { flag: String, value: String },
    #[error("Unknown option: {0}\nRun 'jlblock --help' for usage information.")]
    UnknownOption(String),
    #[error("{0} are mutually exclusive and cannot be combined.")]
    ConflictingModes(String),
    #[error("Nothing to do. Use one of --at, --count, --check or --fmt (see --help).")]
    NoMode,
    #[error("Invalid cursor spec: '{spec}'. {reason}")]
    InvalidCursorSpec { spec: String, reason: String },
    #[error(transparent)]
    Format(#[from] FormatOptionsError),
    #[error("Directory not found: {0}")]
    RootNotFound(String),
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Binary content")]
    Binary,
    #[error("Not valid UTF-8")]
    NotUtf8,
}

impl CliError {
    pub fn io(path: &std::path::Path, source: io::Error) -> Self {
        CliError::Io { path: path.to_path_buf(), source }
    }
}
