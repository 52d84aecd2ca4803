use crate::git::CommitInfo;
use regex::Regex;
use std::sync::OnceLock;

/// The two kinds of commit that make it into release notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitCategory {
    Fix,
    Feature,
}

impl CommitCategory {
    /// Section heading used in the rendered notes
    pub fn heading(self) -> &'static str {
        match self {
            CommitCategory::Fix => "Bug Fixes",
            CommitCategory::Feature => "Features",
        }
    }

    fn pattern(self) -> &'static Regex {
        static FIX: OnceLock<Regex> = OnceLock::new();
        static FEATURE: OnceLock<Regex> = OnceLock::new();
        match self {
            CommitCategory::Fix => FIX.get_or_init(|| {
                Regex::new(r"^fix(?:\((.*)\))?(!)?: (.*)$").expect("fix commit pattern")
            }),
            CommitCategory::Feature => FEATURE.get_or_init(|| {
                Regex::new(r"^feat(?:\((.*)\))?(!)?: (.*)$").expect("feature commit pattern")
            }),
        }
    }
}

/// A commit subject matched against the fix or feature prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub hash: String,
    pub category: CommitCategory,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ClassifiedCommit {
    /// Classify a commit by its subject line
    ///
    /// Supports formats:
    /// - fix: description / feat: description
    /// - fix(scope): description
    /// - fix!: description / fix(scope)!: description
    ///
    /// Anything else returns `None` and is left out of the notes.
    pub fn classify(commit: &CommitInfo) -> Option<Self> {
        [CommitCategory::Fix, CommitCategory::Feature]
            .into_iter()
            .find_map(|category| {
                let captures = category.pattern().captures(&commit.subject)?;
                Some(ClassifiedCommit {
                    hash: commit.hash.clone(),
                    category,
                    scope: captures.get(1).map(|m| m.as_str().to_string()),
                    description: captures
                        .get(3)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                    is_breaking_change: captures.get(2).is_some(),
                })
            })
    }
}
