//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository queries
//! the utilities need, allowing for a real `git2`-backed implementation and a
//! mock implementation for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for tests
//!
//! Code that only reads history should depend on the [Repository] trait.
//!
//! ```rust
//! # use devscripts::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> devscripts::Result<()> {
//! let latest = repo.latest_tag()?;
//! let commits = repo.commits_since(latest.as_deref())?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::error::Result;

/// One line of `git log --pretty=format:"%h %s"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The abbreviated commit hash
    pub hash: String,
    /// The first line of the commit message
    pub subject: String,
}

impl CommitInfo {
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        CommitInfo {
            hash: hash.into(),
            subject: subject.into(),
        }
    }
}

/// Repository queries used by the release utilities
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the matching
/// [crate::error::DevscriptsError] variants.
pub trait Repository {
    /// Full hash of the commit HEAD points to.
    fn head_commit_hash(&self) -> Result<String>;

    /// Most recent tag reachable from HEAD, like `git describe --tags --abbrev=0`.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The nearest tag name
    /// * `Ok(None)` - If no tag is reachable
    /// * `Err` - If the repository cannot be walked
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Commits in `(tag, HEAD]`, newest first. `None` means all of history.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>>;

    /// Configured URL of a remote.
    fn remote_url(&self, remote: &str) -> Result<String>;

    /// Fetch every tag from a remote into `refs/tags`.
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Tracked files plus untracked files that are not ignored, relative to the root.
    fn list_files(&self) -> Result<Vec<PathBuf>>;
}
