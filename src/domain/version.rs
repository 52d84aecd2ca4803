use crate::error::{DevscriptsError, Result};
use std::fmt;

/// The version token written into the marker file and stamped files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// A release version as announced, rendered with a `v` prefix
    Release(String),
    /// Placeholder used when no version could be found, rendered verbatim
    Sentinel(String),
}

impl ResolvedVersion {
    /// A version announced by the release tool, kept exactly as captured
    pub fn release(text: &str) -> Self {
        let clean = text.trim();
        ResolvedVersion::Release(clean.strip_prefix('v').unwrap_or(clean).to_string())
    }

    /// A repository tag such as `v1.2.3`. Tags that are not semantic versions are rejected.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let clean = tag.trim();
        let clean = clean.strip_prefix('v').unwrap_or(clean);
        semver::Version::parse(clean)
            .map(|version| ResolvedVersion::Release(version.to_string()))
            .map_err(|e| DevscriptsError::version(format!("Invalid version '{}': {}", tag, e)))
    }

    pub fn sentinel(value: impl Into<String>) -> Self {
        ResolvedVersion::Sentinel(value.into())
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedVersion::Release(version) => write!(f, "v{}", version),
            ResolvedVersion::Sentinel(value) => write!(f, "{}", value),
        }
    }
}
