//! Error types for configuration, parsing and planning failures.

use std::io;
use std::path::PathBuf;

/// Problems with the `--track-list-format` template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("you must specify %from% in --track-list-format")]
    NoFrom,

    #[error("there are duplicate parameters in --track-list-format: %{0}%")]
    Duplicate(String),

    #[error("failed to compile --track-list-format: {0}")]
    Pattern(String),
}

/// Every failure that stops a run.
///
/// Per-track `ffmpeg` failures are not represented here; they are collected in
/// the execution summary and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("command {tool} not found")]
    MissingTool { tool: String },

    #[error("can't read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't access {}", path.display())]
    OutputDir { path: PathBuf },

    #[error("parameter {flag} is required")]
    MissingArgument { flag: &'static str },

    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    #[error(
        "unable to parse line {line_number} of the track list\n    {line}\nplease provide a proper --track-list-format option"
    )]
    LineMismatch { line_number: usize, line: String },

    #[error("unexpected failure while reading the track list: {0}")]
    Read(#[source] io::Error),

    #[error("unsupported track list encoding: {label}")]
    UnsupportedEncoding { label: String },

    #[error("invalid time value {value:?}")]
    InvalidTime { value: String },

    #[error("tracks {first} and {second} would both be written to {}", path.display())]
    DuplicateOutput {
        first: String,
        second: String,
        path: PathBuf,
    },

    #[error("output file already exists: {} (use --overwrite)", path.display())]
    OutputExists { path: PathBuf },

    #[error("failed to get current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

impl Error {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_time(value: &str) -> Self {
        Self::InvalidTime {
            value: value.to_string(),
        }
    }

    /// Whether `main` should point the user at `--help` after the message.
    pub fn wants_usage_hint(&self) -> bool {
        matches!(self, Self::MissingArgument { .. } | Self::InvalidFormat(_))
    }
}
