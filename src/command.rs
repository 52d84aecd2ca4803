use crate::error::{DevscriptsError, Result};
use std::path::Path;
use std::process::Command;

/// A shell command line run from the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    line: String,
}

impl ShellCommand {
    pub fn new(line: impl Into<String>) -> Self {
        ShellCommand { line: line.into() }
    }

    fn build(&self) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", &self.line]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", &self.line]);
            cmd
        }
    }

    /// Run the command in `dir` and return stdout followed by stderr
    ///
    /// # Returns
    /// * `Ok(String)` if the command exits with status 0
    /// * `Err` if it cannot be spawned or exits non-zero
    pub fn output_in(&self, dir: &Path) -> Result<String> {
        let output = self.build().current_dir(dir).output().map_err(|e| {
            DevscriptsError::command(format!("Failed to execute '{}': {}", self.line, e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(DevscriptsError::command(format!(
                "'{}' failed with exit code {}\nStdout: {}\nStderr: {}",
                self.line,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        let mut combined = stdout.into_owned();
        if !stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }
        Ok(combined)
    }
}
