// tests/config_test.rs
use devscripts::config::{load_config, parse_config, Config, FallbackPolicy, DEFAULT_LICENSE_TEXT};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.version.command, "npx semantic-release --dry-run");
    assert_eq!(config.version.marker_file, ".version");
    assert_eq!(config.version.version_placeholder, "VERSION_HERE");
    assert_eq!(config.version.commit_placeholder, "GIT_COMMIT_HASH_HERE");
    assert_eq!(config.version.sentinel, "0.0.0");
    assert_eq!(config.release_notes.output, "RELEASE_NOTES.md");
    assert_eq!(config.release_notes.remote, "origin");
    assert_eq!(config.license.text, DEFAULT_LICENSE_TEXT);
}

#[test]
fn test_default_extensions() {
    let config = Config::default();
    let ext = &config.license.extensions;
    assert_eq!(ext.get("cpp"), Some(&vec!["/*".to_string(), "*/".to_string()]));
    assert_eq!(ext.get("sh"), Some(&vec!["#".to_string()]));
    assert_eq!(
        ext.get("bat"),
        Some(&vec!["REM".to_string(), "rem".to_string(), "::".to_string()])
    );
    assert!(ext.get("rs").is_none());
    assert_eq!(config.license.shebang_extensions, vec!["py", "sh"]);
    assert_eq!(config.license.batch_extensions, vec!["bat"]);
}

#[test]
fn test_load_from_fixture() {
    let config = load_config(
        Some(Path::new("tests/fixtures/devscripts.toml")),
        Path::new("."),
    )
    .expect("Failed to load test config");

    assert_eq!(config.version.marker_file, "VERSION.txt");
    assert_eq!(config.version.fallback, FallbackPolicy::Sentinel);
    assert_eq!(config.version.sentinel, "unreleased");
    // Unset keys keep their defaults
    assert_eq!(config.version.version_placeholder, "VERSION_HERE");

    assert_eq!(config.license.text, "SPDX-License-Identifier: MIT");
    assert_eq!(config.license.extensions.len(), 2);
    assert_eq!(config.license.batch_extensions, vec!["bat"]);

    assert_eq!(config.release_notes.output, "CHANGES.md");
    assert_eq!(config.release_notes.remote, "upstream");
}

#[test]
fn test_root_config_is_picked_up() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("devscripts.toml"),
        "[release_notes]\noutput = \"NOTES.md\"\n",
    )
    .unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.release_notes.output, "NOTES.md");
}

#[test]
fn test_explicit_path_wins_over_root() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("devscripts.toml"),
        "[release_notes]\noutput = \"ROOT.md\"\n",
    )
    .unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit
        .write_all(b"[release_notes]\noutput = \"EXPLICIT.md\"\n")
        .unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), root.path()).unwrap();
    assert_eq!(config.release_notes.output, "EXPLICIT.md");
}

#[test]
fn test_missing_explicit_path_is_error() {
    let root = TempDir::new().unwrap();
    let result = load_config(Some(root.path().join("nope.toml").as_path()), root.path());
    assert!(result.is_err());
}

#[test]
fn test_unknown_fallback_rejected() {
    assert!(parse_config("[version]\nfallback = \"latest\"\n").is_err());
}
