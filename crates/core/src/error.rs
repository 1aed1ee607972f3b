//! Error types for s3shell-core
//!
//! One variant per failure kind a shell command can report. Messages are
//! written to be printed verbatim after the `[ERROR] <command>:` tag.

use thiserror::Error;

use crate::bucket::Violation;

/// Result type alias for s3shell-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3shell-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong argument count or shape, or a command used at the wrong location
    #[error("{0}")]
    Usage(String),

    /// Command attempted while logged out, or profile missing/misconfigured
    #[error("{0}")]
    Auth(String),

    /// Credential probe failed right before a gated command
    #[error("Session failure - {0}")]
    SessionExpired(String),

    /// Path tokens folded into an empty or non-rooted result
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Referenced bucket, folder or object is absent
    #[error("{0}")]
    NotFound(String),

    /// Expected a leaf but found a folder, or vice versa
    #[error("{0}")]
    WrongKind(String),

    /// Name already taken or target already exists
    #[error("{0}")]
    Conflict(String),

    /// Folder still has children
    #[error("{0}")]
    NotEmpty(String),

    /// Bucket name breaks one or more naming rules
    #[error("Invalid bucket name '{name}' - {}", join_violations(.violations))]
    InvalidBucketName {
        name: String,
        violations: Vec<Violation>,
    },

    /// Unclassified object store failure, surfaced verbatim
    #[error("{0}")]
    Store(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Whether this error means the active session has been discarded
    pub const fn ends_session(&self) -> bool {
        matches!(self, Error::SessionExpired(_))
    }
}
