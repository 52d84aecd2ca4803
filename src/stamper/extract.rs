//! Version extraction from release dry-run output.
//!
//! Callers only see [`VersionExtractor`]: raw text in, an optional bare
//! `X.Y.Z` out. Swapping the release tool means swapping the patterns.

use regex::{Regex, RegexBuilder};

use crate::config::VersionConfig;
use crate::error::{DevscriptsError, Result};

/// semantic-release: "The next release version is X.Y.Z" (or the first-release phrasing)
pub const SEMANTIC_RELEASE_NEXT_VERSION: &str = r"^\[\d{1,2}:\d{1,2}:\d{1,2} (?:A|P)M\] \[semantic-release\] . .  (?:There is no previous release, t|T)he next release version is (\d+\.\d+\.\d+)$";

/// semantic-release: "Found git tag vX.Y.Z associated with version X.Y.Z on branch NAME"
pub const SEMANTIC_RELEASE_PREVIOUS_VERSION: &str = r"^\[\d{1,2}:\d{1,2}:\d{1,2} (?:A|P)M\] \[semantic-release\] . .  Found git tag v(\d+\.\d+\.\d+) associated with version \d+\.\d+\.\d+ on branch .+$";

/// Pulls version strings out of release tool output
pub trait VersionExtractor {
    /// Version the next release would get.
    ///
    /// # Returns
    /// * `Ok(Some(version))` - Exactly one announcement found
    /// * `Ok(None)` - No announcement
    /// * `Err(AmbiguousVersion)` - More than one announcement
    fn next_version(&self, output: &str) -> Result<Option<String>>;

    /// Version of the existing release the tool associated with a tag.
    /// Same contract as [`VersionExtractor::next_version`].
    fn previous_version(&self, output: &str) -> Result<Option<String>>;
}

/// Regex-driven extractor; each pattern's first capture group is the version
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    next: Regex,
    previous: Regex,
}

impl PatternExtractor {
    /// Extractor for semantic-release's default log format
    pub fn semantic_release() -> Self {
        // The built-in patterns are constants and always compile
        Self::new(SEMANTIC_RELEASE_NEXT_VERSION, SEMANTIC_RELEASE_PREVIOUS_VERSION)
            .expect("built-in semantic-release patterns")
    }

    /// Compile custom patterns. Each is matched per line and needs a capture group.
    pub fn new(next: &str, previous: &str) -> Result<Self> {
        Ok(PatternExtractor {
            next: compile(next)?,
            previous: compile(previous)?,
        })
    }

    /// Use the overrides from configuration, defaulting to semantic-release
    pub fn from_config(config: &VersionConfig) -> Result<Self> {
        Self::new(
            config
                .next_version_pattern
                .as_deref()
                .unwrap_or(SEMANTIC_RELEASE_NEXT_VERSION),
            config
                .previous_version_pattern
                .as_deref()
                .unwrap_or(SEMANTIC_RELEASE_PREVIOUS_VERSION),
        )
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::semantic_release()
    }
}

impl VersionExtractor for PatternExtractor {
    fn next_version(&self, output: &str) -> Result<Option<String>> {
        find_unique(&self.next, output)
    }

    fn previous_version(&self, output: &str) -> Result<Option<String>> {
        find_unique(&self.previous, output)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| DevscriptsError::config(format!("Invalid version pattern: {}", e)))?;

    if regex.captures_len() < 2 {
        return Err(DevscriptsError::config(format!(
            "Version pattern '{}' has no capture group",
            pattern
        )));
    }

    Ok(regex)
}

fn find_unique(pattern: &Regex, output: &str) -> Result<Option<String>> {
    let normalized = output.replace("\r\n", "\n");
    let mut found: Vec<String> = pattern
        .captures_iter(&normalized)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str().to_string()))
        .collect();

    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        _ => Err(DevscriptsError::AmbiguousVersion(found)),
    }
}
