use crate::error::{DevscriptsError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn release_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^v\d+\.\d+\.\d+$").expect("release tag pattern"))
}

/// A release tag of the form `vMAJOR.MINOR.PATCH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    name: String,
}

impl ReleaseTag {
    /// Validate and wrap a tag name
    pub fn parse(name: &str) -> Result<Self> {
        if !release_tag_pattern().is_match(name) {
            return Err(DevscriptsError::tag(format!(
                "'{}' must be in the form vMAJOR.MINOR.PATCH (e.g. v1.2.3)",
                name
            )));
        }

        Ok(ReleaseTag {
            name: name.to_string(),
        })
    }

    /// Full tag name, e.g. "v1.2.3"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag without the leading `v`, e.g. "1.2.3"
    pub fn version_part(&self) -> &str {
        self.name.strip_prefix('v').unwrap_or(&self.name)
    }
}

impl FromStr for ReleaseTag {
    type Err = DevscriptsError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseTag::parse(s)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
