//! Version stamping
//!
//! Resolves the release version from dry-run output, records it in the
//! marker file and substitutes the version and commit placeholders in the
//! given files. Files are rewritten one by one; an error partway through
//! leaves the earlier files stamped.

pub mod extract;

pub use extract::{PatternExtractor, VersionExtractor};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::command::ShellCommand;
use crate::config::{FallbackPolicy, VersionConfig};
use crate::domain::ResolvedVersion;
use crate::error::Result;
use crate::git::Repository;
use crate::ui;

/// Where the resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// The tool announced the next release version
    NextRelease,
    /// The tool reported the tag of the existing release
    OutputTag,
    /// The nearest tag in the repository
    RepositoryTag,
    /// Nothing found; the configured sentinel
    Sentinel,
}

/// A resolved version and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    pub source: VersionSource,
}

/// What a stamping run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampOutcome {
    pub resolution: Resolution,
    pub commit: String,
    pub marker: PathBuf,
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Run the configured dry-run command from `root` and capture its output.
pub fn release_dry_run(root: &Path, config: &VersionConfig) -> Result<String> {
    ShellCommand::new(&config.command).output_in(root)
}

/// Decide which version to stamp.
///
/// Ambiguous output aborts with [`crate::DevscriptsError::AmbiguousVersion`]
/// before anything is written.
pub fn resolve_version<E, R>(
    output: &str,
    extractor: &E,
    config: &VersionConfig,
    repo: &R,
) -> Result<Resolution>
where
    E: VersionExtractor + ?Sized,
    R: Repository + ?Sized,
{
    if let Some(next) = extractor.next_version(output)? {
        return Ok(Resolution {
            version: ResolvedVersion::release(&next),
            source: VersionSource::NextRelease,
        });
    }

    let sentinel = Resolution {
        version: ResolvedVersion::sentinel(config.sentinel.clone()),
        source: VersionSource::Sentinel,
    };

    if config.fallback == FallbackPolicy::Sentinel {
        ui::display_warning("Could not find new version in release output => Using default");
        return Ok(sentinel);
    }

    ui::display_warning(
        "Could not find new version in release output, trying to extract the old version instead",
    );

    if let Some(previous) = extractor.previous_version(output)? {
        return Ok(Resolution {
            version: ResolvedVersion::release(&previous),
            source: VersionSource::OutputTag,
        });
    }

    match repo.latest_tag() {
        Ok(Some(tag)) => match ResolvedVersion::from_tag(&tag) {
            Ok(version) => {
                ui::display_info(&format!("Using version from latest tag {:?}", tag));
                return Ok(Resolution {
                    version,
                    source: VersionSource::RepositoryTag,
                });
            }
            Err(e) => ui::display_warning(&format!("Ignoring latest tag: {}", e)),
        },
        Ok(None) => {}
        Err(e) => ui::display_warning(&format!("Could not look up the latest tag: {}", e)),
    }

    ui::display_warning("Could not find the old version => Using default");
    Ok(sentinel)
}

/// Overwrite the marker file in `root` with the version token.
pub fn write_marker(root: &Path, file_name: &str, version: &ResolvedVersion) -> Result<PathBuf> {
    let path = root.join(file_name);
    fs::write(&path, version.to_string())?;
    Ok(path)
}

/// Replace every placeholder occurrence in `content`.
pub fn stamp_content(content: &str, config: &VersionConfig, version: &str, commit: &str) -> String {
    content
        .replace(&config.version_placeholder, version)
        .replace(&config.commit_placeholder, commit)
}

/// Stamp each file in place. Missing files are reported and skipped.
///
/// # Returns
/// * `Ok((updated, skipped))` - Paths as resolved against `root`
/// * `Err` - On the first read or write failure other than "not found"
pub fn stamp_files(
    root: &Path,
    files: &[PathBuf],
    config: &VersionConfig,
    version: &ResolvedVersion,
    commit: &str,
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let version = version.to_string();
    let mut updated = Vec::new();
    let mut skipped = Vec::new();

    for file in files {
        let path = root.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                ui::display_warning(&format!("Could not find file {}", path.display()));
                skipped.push(path);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        fs::write(&path, stamp_content(&content, config, &version, commit))?;
        ui::display_debug(&format!("Stamped {}", path.display()));
        updated.push(path);
    }

    Ok((updated, skipped))
}

/// Resolves, records and stamps against one repository root
pub struct VersionStamper<'a, R: Repository + ?Sized> {
    root: &'a Path,
    repo: &'a R,
    config: &'a VersionConfig,
}

impl<'a, R: Repository + ?Sized> VersionStamper<'a, R> {
    pub fn new(root: &'a Path, repo: &'a R, config: &'a VersionConfig) -> Self {
        VersionStamper { root, repo, config }
    }

    /// Process already captured dry-run output.
    pub fn run<E: VersionExtractor + ?Sized>(
        &self,
        output: &str,
        extractor: &E,
        files: &[PathBuf],
    ) -> Result<StampOutcome> {
        let resolution = resolve_version(output, extractor, self.config, self.repo)?;
        ui::display_debug(&format!(
            "Resolved {} from {:?}",
            resolution.version, resolution.source
        ));

        let marker = write_marker(self.root, &self.config.marker_file, &resolution.version)?;
        let commit = self.repo.head_commit_hash()?;

        let (updated, skipped) =
            stamp_files(self.root, files, self.config, &resolution.version, &commit)?;

        Ok(StampOutcome {
            resolution,
            commit,
            marker,
            updated,
            skipped,
        })
    }
}
