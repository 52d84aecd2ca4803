use thiserror::Error;

/// Unified error type for the devscripts utilities
#[derive(Error, Debug)]
pub enum DevscriptsError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Found multiple versions in release output: {}", .0.join(", "))]
    AmbiguousVersion(Vec<String>),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Nothing to release: {0}")]
    NothingToRelease(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in devscripts
pub type Result<T> = std::result::Result<T, DevscriptsError>;

impl DevscriptsError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DevscriptsError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        DevscriptsError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        DevscriptsError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        DevscriptsError::Remote(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        DevscriptsError::Command(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        DevscriptsError::Environment(msg.into())
    }

    /// Create a nothing-to-release error with context
    pub fn nothing_to_release(msg: impl Into<String>) -> Self {
        DevscriptsError::NothingToRelease(msg.into())
    }
}
