//! License disclaimer audit
//!
//! Comment delimiters are removed by plain substring replacement, not by a
//! tokenizer. A delimiter sequence inside ordinary text (a `#` in a sentence,
//! `::` in a batch label) is stripped as well. The disclaimer boilerplate
//! rarely contains such sequences, so the audit tolerates it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LicenseConfig;
use crate::error::{DevscriptsError, Result};
use crate::git::Repository;
use crate::ui;

/// A first line that may precede the disclaimer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preamble {
    None,
    /// `#!...`, seen as `!...` once the comment marker is stripped
    Shebang,
    /// `@echo off`
    EchoOff,
}

/// Outcome of checking one file's cleaned lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclaimerCheck {
    /// Disclaimer starts at this 1-based line
    Present { line: usize },
    /// The first significant line (1-based) does not start the disclaimer
    Missing { line: usize },
    /// Only blank or preamble lines; nothing to judge
    NoContent,
}

/// Summary of an audit run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Files whose extension is recognized
    pub recognized: usize,
    /// Recognized files without the disclaimer at the top
    pub missing: Vec<PathBuf>,
    /// Recognized files that could not be read
    pub unreadable: Vec<PathBuf>,
}

/// Extension used for the lookup. `name.ext.in` maps to `ext`.
///
/// Files without an extension (including dotfiles) return `None`.
pub fn lookup_extension(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    if ext != "in" {
        return Some(ext);
    }

    let stem = path.file_stem()?;
    Path::new(stem).extension()?.to_str()
}

/// Strip every delimiter from each line, then surrounding whitespace.
pub fn clean_lines(content: &str, delimiters: &[String]) -> Vec<String> {
    content
        .lines()
        .map(|line| {
            let mut line = line.to_string();
            for delimiter in delimiters {
                line = line.replace(delimiter.as_str(), "");
            }
            line.trim().to_string()
        })
        .collect()
}

/// Check whether the disclaimer starts at the first significant line.
///
/// Blank lines are skipped, as is one preamble line if `preamble` allows it.
/// Only the first significant line is considered.
pub fn check_disclaimer(cleaned: &[String], disclaimer: &str, preamble: Preamble) -> DisclaimerCheck {
    let first_line = disclaimer.lines().next().unwrap_or_default();
    let span = disclaimer.lines().count();
    let mut preamble_seen = false;

    for (i, line) in cleaned.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        if line != first_line && !preamble_seen {
            let skippable = match preamble {
                Preamble::None => false,
                Preamble::Shebang => line.starts_with('!'),
                Preamble::EchoOff => line == "@echo off",
            };
            if skippable {
                preamble_seen = true;
                continue;
            }
        }

        let end = (i + span).min(cleaned.len());
        return if cleaned[i..end].join("\n") == disclaimer {
            DisclaimerCheck::Present { line: i + 1 }
        } else {
            DisclaimerCheck::Missing { line: i + 1 }
        };
    }

    DisclaimerCheck::NoContent
}

/// Read-only audit of a working tree
pub struct LicenseAuditor<'a> {
    root: &'a Path,
    config: &'a LicenseConfig,
    disclaimer: String,
}

impl<'a> LicenseAuditor<'a> {
    /// # Returns
    /// * `Err(Config)` - If the configured disclaimer is blank
    pub fn new(root: &'a Path, config: &'a LicenseConfig) -> Result<Self> {
        let disclaimer = config
            .text
            .trim()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");

        if disclaimer.is_empty() {
            return Err(DevscriptsError::config("License text must not be empty"));
        }

        Ok(LicenseAuditor {
            root,
            config,
            disclaimer,
        })
    }

    fn preamble_for(&self, ext: &str) -> Preamble {
        if self.config.shebang_extensions.iter().any(|e| e == ext) {
            Preamble::Shebang
        } else if self.config.batch_extensions.iter().any(|e| e == ext) {
            Preamble::EchoOff
        } else {
            Preamble::None
        }
    }

    /// Check one file relative to the root.
    ///
    /// # Returns
    /// * `Ok(None)` - Extension not recognized, file not considered
    /// * `Ok(Some(check))` - Result for a recognized file
    /// * `Err` - The file could not be read
    pub fn check_file(&self, relative: &Path) -> Result<Option<DisclaimerCheck>> {
        let Some(ext) = lookup_extension(relative) else {
            return Ok(None);
        };
        let Some(delimiters) = self.config.extensions.get(ext) else {
            ui::display_debug(&format!(
                "Unsupported file extension: {:?}",
                relative.display().to_string()
            ));
            return Ok(None);
        };

        let bytes = fs::read(self.root.join(relative))?;
        let content = String::from_utf8_lossy(&bytes);
        let cleaned = clean_lines(&content, delimiters);

        Ok(Some(check_disclaimer(
            &cleaned,
            &self.disclaimer,
            self.preamble_for(ext),
        )))
    }

    /// Audit every file the repository reports.
    pub fn audit<R: Repository + ?Sized>(&self, repo: &R) -> Result<AuditReport> {
        let files = repo.list_files()?;
        ui::display_info(&format!("Found {} files in the repository.", files.len()));
        Ok(self.audit_paths(&files))
    }

    /// Audit an explicit list of root-relative paths.
    pub fn audit_paths(&self, files: &[PathBuf]) -> AuditReport {
        let mut report = AuditReport::default();

        for file in files {
            let check = match self.check_file(file) {
                Ok(None) => continue,
                Ok(Some(check)) => check,
                Err(e) => {
                    report.recognized += 1;
                    ui::display_warning(&format!(
                        "Could not read file {:?}: {}",
                        file.display().to_string(),
                        e
                    ));
                    report.unreadable.push(file.clone());
                    continue;
                }
            };

            report.recognized += 1;
            match check {
                DisclaimerCheck::Missing { .. } => {
                    ui::display_warning(&format!(
                        "License disclaimer not found in file: {:?}",
                        file.display().to_string()
                    ));
                    report.missing.push(file.clone());
                }
                DisclaimerCheck::Present { line } => ui::display_debug(&format!(
                    "License disclaimer found in file: {:?}:{}",
                    file.display().to_string(),
                    line
                )),
                DisclaimerCheck::NoContent => {}
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LICENSE_TEXT;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    fn commented(prefix: &str, text: &str) -> String {
        text.lines()
            .map(|l| format!("{}{}", prefix, l).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cleaned(content: &str, delimiters: &[&str]) -> Vec<String> {
        let delimiters: Vec<String> = delimiters.iter().map(|d| d.to_string()).collect();
        clean_lines(content, &delimiters)
    }

    #[test]
    fn test_lookup_extension() {
        assert_eq!(lookup_extension(Path::new("src/main.cpp")), Some("cpp"));
        assert_eq!(lookup_extension(Path::new("config.h.in")), Some("h"));
        assert_eq!(lookup_extension(Path::new("CMakeLists.txt")), Some("txt"));
        assert_eq!(lookup_extension(Path::new("Makefile")), None);
        assert_eq!(lookup_extension(Path::new(".gitignore")), None);
        assert_eq!(lookup_extension(Path::new("template.in")), None);
        assert_eq!(lookup_extension(Path::new("dir.d/file.in")), None);
    }

    #[test]
    fn test_clean_lines_strips_delimiters_and_whitespace() {
        let lines = cleaned("/* hello\n * world */\r\n   \n", &["/*", "*/"]);
        assert_eq!(lines, vec!["hello", "* world", ""]);
    }

    #[test]
    fn test_c_block_comment_present() {
        let content = format!("/*\n{}\n*/\n\n#include <stdio.h>\n", DEFAULT_LICENSE_TEXT);
        let check = check_disclaimer(
            &cleaned(&content, &["/*", "*/"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::None,
        );
        assert_eq!(check, DisclaimerCheck::Present { line: 2 });
    }

    #[test]
    fn test_python_with_shebang_present() {
        let content = format!(
            "#!/usr/bin/env python3\n\n{}\n\nimport sys\n",
            commented("# ", DEFAULT_LICENSE_TEXT)
        );
        let check = check_disclaimer(
            &cleaned(&content, &["#"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::Shebang,
        );
        assert_eq!(check, DisclaimerCheck::Present { line: 3 });
    }

    #[test]
    fn test_shebang_only_skipped_once() {
        let content = format!(
            "#!/bin/sh\n#!/bin/bash\n{}\n",
            commented("# ", DEFAULT_LICENSE_TEXT)
        );
        let check = check_disclaimer(
            &cleaned(&content, &["#"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::Shebang,
        );
        assert_eq!(check, DisclaimerCheck::Missing { line: 2 });
    }

    #[test]
    fn test_shebang_not_skipped_for_c() {
        let content = format!("#!weird\n/*\n{}\n*/\n", DEFAULT_LICENSE_TEXT);
        let check = check_disclaimer(
            &cleaned(&content, &["/*", "*/"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::None,
        );
        assert_eq!(check, DisclaimerCheck::Missing { line: 1 });
    }

    #[test]
    fn test_batch_echo_off_present() {
        let content = format!(
            "@echo off\nREM\n{}\n\necho hi\n",
            commented("REM ", DEFAULT_LICENSE_TEXT)
        );
        let check = check_disclaimer(
            &cleaned(&content, &["REM", "rem", "::"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::EchoOff,
        );
        assert_eq!(check, DisclaimerCheck::Present { line: 3 });
    }

    #[test]
    fn test_inserted_blank_line_is_missing() {
        let mut lines: Vec<&str> = DEFAULT_LICENSE_TEXT.lines().collect();
        lines.insert(2, "");
        let content = format!("/*\n{}\n*/\n", lines.join("\n"));
        let check = check_disclaimer(
            &cleaned(&content, &["/*", "*/"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::None,
        );
        assert_eq!(check, DisclaimerCheck::Missing { line: 2 });
    }

    #[test]
    fn test_truncated_disclaimer_is_missing() {
        let truncated: Vec<&str> = DEFAULT_LICENSE_TEXT.lines().take(10).collect();
        let content = format!("/*\n{}\n", truncated.join("\n"));
        let check = check_disclaimer(
            &cleaned(&content, &["/*", "*/"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::None,
        );
        assert_eq!(check, DisclaimerCheck::Missing { line: 2 });
    }

    #[test]
    fn test_wrong_comment_style_is_missing() {
        let content = commented("// ", DEFAULT_LICENSE_TEXT);
        let check = check_disclaimer(
            &cleaned(&content, &["/*", "*/"]),
            DEFAULT_LICENSE_TEXT,
            Preamble::None,
        );
        assert_eq!(check, DisclaimerCheck::Missing { line: 1 });
    }

    #[test]
    fn test_empty_file_has_no_content() {
        let check = check_disclaimer(&cleaned("\n\n   \n", &["#"]), DEFAULT_LICENSE_TEXT, Preamble::None);
        assert_eq!(check, DisclaimerCheck::NoContent);
    }

    #[test]
    fn test_blank_license_text_rejected() {
        let dir = TempDir::new().unwrap();
        let config = LicenseConfig {
            text: "  \n ".to_string(),
            ..LicenseConfig::default()
        };
        assert!(LicenseAuditor::new(dir.path(), &config).is_err());
    }

    #[test]
    fn test_audit_counts_recognized_files_only() {
        let dir = TempDir::new().unwrap();
        let good = format!("/*\n{}\n*/\nint x;\n", DEFAULT_LICENSE_TEXT);
        fs::write(dir.path().join("good.c"), good).unwrap();
        fs::write(dir.path().join("bad.py"), "import os\n").unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        fs::write(dir.path().join("Makefile"), "all:\n").unwrap();

        let mut repo = MockRepository::new();
        for name in ["good.c", "bad.py", "README.md", "Makefile", "gone.h"] {
            repo.add_file(name);
        }

        let config = LicenseConfig::default();
        let report = LicenseAuditor::new(dir.path(), &config)
            .unwrap()
            .audit(&repo)
            .unwrap();

        assert_eq!(report.recognized, 3);
        assert_eq!(report.missing, vec![PathBuf::from("bad.py")]);
        assert_eq!(report.unreadable, vec![PathBuf::from("gone.h")]);
    }
}
