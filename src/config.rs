use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{DevscriptsError, Result};

/// File name looked up in the repository root and the user config directory.
pub const CONFIG_FILE_NAME: &str = "devscripts.toml";

/// Disclaimer expected at the top of every recognized source file.
pub const DEFAULT_LICENSE_TEXT: &str = "\
This file is part of the GlyphVisualizer project, a Glyph composition
player that plays Glyph compositions from Nothing phones.
Copyright (C) 2025  Sebastian Aigner (aka. SebiAi)

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.";

/// Represents the complete configuration shared by the three utilities.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub license: LicenseConfig,

    #[serde(default)]
    pub release_notes: ReleaseNotesConfig,
}

/// What to write when the release output announces no new version.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Recover the existing version from the output's tag line, then from the repository.
    #[default]
    PreviousTag,
    /// Use the sentinel value directly.
    Sentinel,
}

impl std::str::FromStr for FallbackPolicy {
    type Err = DevscriptsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "previous-tag" => Ok(FallbackPolicy::PreviousTag),
            "sentinel" => Ok(FallbackPolicy::Sentinel),
            other => Err(DevscriptsError::config(format!(
                "Unknown fallback policy '{}' (expected 'previous-tag' or 'sentinel')",
                other
            ))),
        }
    }
}

fn default_release_command() -> String {
    "npx semantic-release --dry-run".to_string()
}

fn default_marker_file() -> String {
    ".version".to_string()
}

fn default_version_placeholder() -> String {
    "VERSION_HERE".to_string()
}

fn default_commit_placeholder() -> String {
    "GIT_COMMIT_HASH_HERE".to_string()
}

fn default_sentinel() -> String {
    "0.0.0".to_string()
}

/// Settings for the version stamper.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VersionConfig {
    /// Shell command whose output announces the next release version.
    #[serde(default = "default_release_command")]
    pub command: String,

    #[serde(default = "default_marker_file")]
    pub marker_file: String,

    #[serde(default = "default_version_placeholder")]
    pub version_placeholder: String,

    #[serde(default = "default_commit_placeholder")]
    pub commit_placeholder: String,

    #[serde(default)]
    pub fallback: FallbackPolicy,

    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Overrides the "next release version" pattern. Must have one capture group.
    #[serde(default)]
    pub next_version_pattern: Option<String>,

    /// Overrides the "found git tag" pattern. Must have one capture group.
    #[serde(default)]
    pub previous_version_pattern: Option<String>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            command: default_release_command(),
            marker_file: default_marker_file(),
            version_placeholder: default_version_placeholder(),
            commit_placeholder: default_commit_placeholder(),
            fallback: FallbackPolicy::default(),
            sentinel: default_sentinel(),
            next_version_pattern: None,
            previous_version_pattern: None,
        }
    }
}

fn default_license_text() -> String {
    DEFAULT_LICENSE_TEXT.to_string()
}

/// Returns the default extension to comment delimiter mapping.
fn default_extensions() -> HashMap<String, Vec<String>> {
    let c_style = vec!["/*".to_string(), "*/".to_string()];
    let hash = vec!["#".to_string()];

    let mut map = HashMap::new();
    map.insert("c".to_string(), c_style.clone());
    map.insert("cpp".to_string(), c_style.clone());
    map.insert("h".to_string(), c_style.clone());
    map.insert("hpp".to_string(), c_style);
    map.insert("py".to_string(), hash.clone());
    map.insert("sh".to_string(), hash);
    map.insert(
        "bat".to_string(),
        vec!["REM".to_string(), "rem".to_string(), "::".to_string()],
    );
    map
}

fn default_shebang_extensions() -> Vec<String> {
    vec!["py".to_string(), "sh".to_string()]
}

fn default_batch_extensions() -> Vec<String> {
    vec!["bat".to_string()]
}

/// Settings for the license auditor.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LicenseConfig {
    #[serde(default = "default_license_text")]
    pub text: String,

    /// Recognized extensions and the comment delimiters stripped for each.
    #[serde(default = "default_extensions")]
    pub extensions: HashMap<String, Vec<String>>,

    /// Extensions whose first line may be a shebang.
    #[serde(default = "default_shebang_extensions")]
    pub shebang_extensions: Vec<String>,

    /// Extensions whose first line may be `@echo off`.
    #[serde(default = "default_batch_extensions")]
    pub batch_extensions: Vec<String>,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        LicenseConfig {
            text: default_license_text(),
            extensions: default_extensions(),
            shebang_extensions: default_shebang_extensions(),
            batch_extensions: default_batch_extensions(),
        }
    }
}

fn default_notes_output() -> String {
    "RELEASE_NOTES.md".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Settings for the release notes generator.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseNotesConfig {
    #[serde(default = "default_notes_output")]
    pub output: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        ReleaseNotesConfig {
            output: default_notes_output(),
            remote: default_remote(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `devscripts.toml` in the repository root
/// 3. `devscripts.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            DevscriptsError::config(format!("Cannot read '{}': {}", path.display(), e))
        })?
    } else if root.join(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(root.join(CONFIG_FILE_NAME))?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML document into a [`Config`], filling in defaults.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| DevscriptsError::config(e.to_string()))
}
