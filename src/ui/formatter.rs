//! Pure formatting functions for status output.
//!
//! Every message is a single prefixed line. Errors go to stderr, everything
//! else to stdout, matching what the release pipeline greps for.

use console::style;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Debug,
}

impl Level {
    /// The plain prefix written before the message.
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO:",
            Level::Warning => "WARNING:",
            Level::Error => "ERROR:",
            Level::Debug => "DEBUG:",
        }
    }
}

fn styled_label(level: Level) -> String {
    let label = level.label();
    match level {
        Level::Info => style(label).cyan().to_string(),
        Level::Warning => style(label).yellow().bold().to_string(),
        Level::Error => style(label).red().bold().to_string(),
        Level::Debug => style(label).dim().to_string(),
    }
}

/// Format and print an informational message.
pub fn display_info(message: &str) {
    println!("{} {}", styled_label(Level::Info), message);
}

/// Format and print a warning.
pub fn display_warning(message: &str) {
    println!("{} {}", styled_label(Level::Warning), message);
}

/// Format and print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", styled_label(Level::Error), message);
}

/// Format and print a debug message. Callers gate on verbosity.
pub fn display_debug_line(message: &str) {
    println!("{} {}", styled_label(Level::Debug), message);
}

/// Print a block of raw text, such as captured command output, followed by spacing.
pub fn display_raw_block(text: &str) {
    println!("{}\n\n", text.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Info.label(), "INFO:");
        assert_eq!(Level::Warning.label(), "WARNING:");
        assert_eq!(Level::Error.label(), "ERROR:");
        assert_eq!(Level::Debug.label(), "DEBUG:");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        // Visual verification - output goes to the captured test streams
        display_info("test info");
        display_warning("test warning");
        display_error("test error");
        display_raw_block("raw output");
    }
}
