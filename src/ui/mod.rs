//! User-facing status output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting and printing of single status lines
//! - This module - Process-wide verbosity and the gated debug channel

use std::sync::atomic::{AtomicBool, Ordering};

pub mod formatter;

pub use formatter::{display_error, display_info, display_raw_block, display_warning, Level};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enables or disables debug output for the rest of the process.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Whether debug output is currently enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Prints a debug line when verbose output is enabled.
pub fn display_debug(message: &str) {
    if is_verbose() {
        formatter::display_debug_line(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_verbose_defaults_off_and_toggles() {
        set_verbose(false);
        assert!(!is_verbose());
        set_verbose(true);
        assert!(is_verbose());
        display_debug("visible in verbose mode");
        set_verbose(false);
        assert!(!is_verbose());
    }
}
