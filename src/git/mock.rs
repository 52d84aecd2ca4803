use crate::error::{DevscriptsError, Result};
use crate::git::{CommitInfo, Repository};
use std::cell::Cell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are appended oldest first and tags point at
/// the commit that was newest when they were added.
#[derive(Debug, Default)]
pub struct MockRepository {
    history: Vec<CommitInfo>,
    tags: Vec<(String, usize)>,
    remotes: HashMap<String, String>,
    files: Vec<PathBuf>,
    fetch_count: Cell<usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of the current HEAD
    pub fn add_commit(&mut self, hash: impl Into<String>, subject: impl Into<String>) {
        self.history.push(CommitInfo::new(hash, subject));
    }

    /// Tag the current HEAD commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let position = self.history.len().saturating_sub(1);
        self.tags.push((name.into(), position));
    }

    /// Register a remote with its URL
    pub fn add_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    /// Register a file that `list_files` reports
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Number of successful `fetch_tags` calls so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.get()
    }
}

impl Repository for MockRepository {
    fn head_commit_hash(&self) -> Result<String> {
        self.history
            .last()
            .map(|c| c.hash.clone())
            .ok_or_else(|| DevscriptsError::environment("HEAD does not point to a commit"))
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self
            .tags
            .iter()
            .max_by_key(|(_, position)| *position)
            .map(|(name, _)| name.clone()))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let start = match tag {
            Some(tag) => {
                let (_, position) = self
                    .tags
                    .iter()
                    .find(|(name, _)| name == tag)
                    .ok_or_else(|| DevscriptsError::tag(format!("Cannot resolve tag '{}'", tag)))?;
                position + 1
            }
            None => 0,
        };

        Ok(self
            .history
            .iter()
            .skip(start)
            .rev()
            .cloned()
            .collect())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.remotes
            .get(remote)
            .cloned()
            .ok_or_else(|| DevscriptsError::remote(format!("Cannot find remote '{}'", remote)))
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        if !self.remotes.contains_key(remote) {
            return Err(DevscriptsError::remote(format!(
                "Cannot find remote '{}'",
                remote
            )));
        }
        self.fetch_count.set(self.fetch_count.get() + 1);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files.clone())
    }
}
