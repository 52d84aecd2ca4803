//! Release notes from conventional commits
//!
//! Only `fix` and `feat` commits make it into the document; everything else
//! since the previous tag is dropped.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::ReleaseNotesConfig;
use crate::domain::{ClassifiedCommit, CommitCategory, ReleaseTag};
use crate::error::{DevscriptsError, Result};
use crate::git::{CommitInfo, Repository};
use crate::ui;

/// Everything the heading and links depend on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesContext {
    pub tag: ReleaseTag,
    pub previous_tag: Option<String>,
    pub repo_url: Option<String>,
    pub date: NaiveDate,
}

/// A written release notes document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub path: PathBuf,
    pub content: String,
    pub fixes: usize,
    pub features: usize,
}

/// Trim whitespace and a trailing `.git` from a remote URL
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.trim();
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Classify commits, keeping their order and dropping the unmatched ones
pub fn classify_commits(commits: &[CommitInfo]) -> Vec<ClassifiedCommit> {
    commits.iter().filter_map(ClassifiedCommit::classify).collect()
}

/// Render the Markdown document.
///
/// ```text
/// # [1.2.0](URL/compare/v1.1.0...v1.2.0) (2025-01-31)
///
/// ### Bug Fixes
/// * **scope:** message ([abc1234](URL/commit/abc1234))
///
/// ### Features
/// * message ([def5678](URL/commit/def5678))
/// ```
pub fn render(context: &NotesContext, commits: &[ClassifiedCommit]) -> String {
    let mut notes = String::new();
    let version = context.tag.version_part();
    let date = context.date.format("%Y-%m-%d");

    match (&context.previous_tag, &context.repo_url) {
        (Some(previous), Some(url)) => {
            let _ = write!(
                notes,
                "# [{}]({}/compare/{}...{}) ({})",
                version,
                url,
                previous,
                context.tag.name(),
                date
            );
        }
        _ => {
            let _ = write!(notes, "# {} ({})", version, date);
        }
    }
    notes.push_str("\n\n");

    for category in [CommitCategory::Fix, CommitCategory::Feature] {
        let section: Vec<&ClassifiedCommit> =
            commits.iter().filter(|c| c.category == category).collect();
        if section.is_empty() {
            continue;
        }

        let _ = writeln!(notes, "### {}", category.heading());
        for commit in section {
            notes.push_str("* ");
            if let Some(scope) = &commit.scope {
                let _ = write!(notes, "**{}:** ", scope);
            }
            notes.push_str(&commit.description);
            match &context.repo_url {
                Some(url) => {
                    let _ = writeln!(notes, " ([{0}]({1}/commit/{0}))", commit.hash, url);
                }
                None => {
                    let _ = writeln!(notes, " ({})", commit.hash);
                }
            }
        }
        notes.push('\n');
    }

    notes
}

/// Generates and writes release notes for one repository root
pub struct ReleaseNotesGenerator<'a, R: Repository + ?Sized> {
    root: &'a Path,
    repo: &'a R,
    config: &'a ReleaseNotesConfig,
}

impl<'a, R: Repository + ?Sized> ReleaseNotesGenerator<'a, R> {
    pub fn new(root: &'a Path, repo: &'a R, config: &'a ReleaseNotesConfig) -> Self {
        ReleaseNotesGenerator { root, repo, config }
    }

    /// Output location, resolved against the root
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output)
    }

    /// Build the notes for `tag` and write them to the output file.
    ///
    /// # Returns
    /// * `Err(NothingToRelease)` - `tag` is already the latest tag, or no
    ///   fix/feature commits exist since it. Nothing is written.
    /// * `Err(Remote)` - The tag fetch failed (only when `fetch` is set)
    pub fn generate(&self, tag: &ReleaseTag, date: NaiveDate, fetch: bool) -> Result<ReleaseNotes> {
        let repo_url = match self.repo.remote_url(&self.config.remote) {
            Ok(url) => Some(normalize_remote_url(&url)),
            Err(e) => {
                ui::display_warning(&format!(
                    "Failed to get the repository URL! Please check the remote URL. ({})",
                    e
                ));
                None
            }
        };
        ui::display_info(&format!(
            "Repository URL: {}",
            repo_url.as_deref().unwrap_or("<none>")
        ));

        if fetch {
            self.repo.fetch_tags(&self.config.remote)?;
        }

        let previous_tag = match self.repo.latest_tag() {
            Ok(Some(latest)) => Some(latest),
            Ok(None) => {
                ui::display_warning(
                    "No tags found in the repository! Creating release notes from the first commit onwards.",
                );
                None
            }
            Err(e) => {
                ui::display_warning(&format!(
                    "Could not determine the latest tag ({}). Creating release notes from the first commit onwards.",
                    e
                ));
                None
            }
        };
        ui::display_info(&format!(
            "Latest Tag: {}",
            previous_tag.as_deref().unwrap_or("<none>")
        ));

        if previous_tag.as_deref() == Some(tag.name()) {
            return Err(DevscriptsError::nothing_to_release(format!(
                "The latest tag is the same as the current tag {:?}. Skipping the release notes generation.",
                tag.name()
            )));
        }

        let commits = self.repo.commits_since(previous_tag.as_deref())?;
        ui::display_info(&format!(
            "Parsing {} commits since last tag...",
            commits.len()
        ));
        for commit in &commits {
            ui::display_debug(&format!("\t{}", commit.subject));
        }

        let classified = classify_commits(&commits);
        let fixes = count(&classified, CommitCategory::Fix);
        let features = count(&classified, CommitCategory::Feature);
        ui::display_info(&format!("Found {} bug fix commits.", fixes));
        ui::display_info(&format!("Found {} feature commits.", features));

        if classified.is_empty() {
            return Err(DevscriptsError::nothing_to_release(
                "No commits found since the last tag. Skipping the release notes generation.",
            ));
        }

        let context = NotesContext {
            tag: tag.clone(),
            previous_tag,
            repo_url,
            date,
        };
        let content = render(&context, &classified);

        let path = self.output_path();
        ui::display_info(&format!(
            "Done. Writing release notes to file {:?}",
            path.display().to_string()
        ));
        fs::write(&path, &content)?;

        Ok(ReleaseNotes {
            path,
            content,
            fixes,
            features,
        })
    }
}

fn count(commits: &[ClassifiedCommit], category: CommitCategory) -> usize {
    commits.iter().filter(|c| c.category == category).count()
}
