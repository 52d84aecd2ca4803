use crate::error::{DevscriptsError, Result};
use crate::git::CommitInfo;
use git2::{
    DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Repository as Git2Repo, Sort,
    Status, StatusOptions,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    root: PathBuf,
}

impl Git2Repository {
    /// Discover the repository containing `path` and remember its working tree root.
    ///
    /// # Returns
    /// * `Ok(Git2Repository)` - Repository with a working tree
    /// * `Err(Environment)` - If `path` is not inside a working tree
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            DevscriptsError::environment(format!(
                "'{}' is not inside a git repository: {}",
                path.display(),
                e.message()
            ))
        })?;

        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let root = repo
            .workdir()
            .ok_or_else(|| {
                DevscriptsError::environment("Bare repositories have no working tree")
            })?
            .to_path_buf();

        Ok(Git2Repository { repo, root })
    }

    /// Root of the working tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn remote_callbacks<'cb>(&self) -> git2::RemoteCallbacks<'cb> {
        let config = self.repo.config().ok();
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(config) = config.as_ref() {
                    if let Ok(cred) = git2::Cred::credential_helper(config, url, username_from_url)
                    {
                        return Ok(cred);
                    }
                }
            }

            git2::Cred::default()
        });
        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn head_commit_hash(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        Ok(Some(describe.format(Some(&format))?))
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = tag {
            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag))
                .and_then(|reference| reference.peel_to_commit())
                .map_err(|e| DevscriptsError::tag(format!("Cannot resolve tag '{}': {}", tag, e)))?;
            revwalk.hide(target.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let short = commit.as_object().short_id()?;
            commits.push(CommitInfo {
                hash: short.as_str().unwrap_or_default().to_string(),
                subject: commit.summary().unwrap_or_default().to_string(),
            });
        }

        Ok(commits)
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let found = self
            .repo
            .find_remote(remote)
            .map_err(|e| DevscriptsError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        found
            .url()
            .map(str::to_string)
            .ok_or_else(|| DevscriptsError::remote(format!("Remote '{}' has no URL", remote)))
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut found = self
            .repo
            .find_remote(remote)
            .map_err(|e| DevscriptsError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(self.remote_callbacks());

        found
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                DevscriptsError::remote(format!("Failed to fetch tags from '{}': {}", remote, e))
            })?;

        Ok(())
    }

    fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for entry in self.repo.index()?.iter() {
            files.insert(PathBuf::from(
                String::from_utf8_lossy(&entry.path).into_owned(),
            ));
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        for entry in self.repo.statuses(Some(&mut options))?.iter() {
            if entry.status().contains(Status::WT_NEW) {
                if let Some(path) = entry.path() {
                    files.insert(PathBuf::from(path));
                }
            }
        }

        Ok(files.into_iter().collect())
    }
}
