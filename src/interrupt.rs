//! Ctrl-C handling shared by the binaries.

use crate::ui;

/// Exit status for a generic fatal error.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status used when the user interrupts a run.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Installs a handler that reports the interruption and exits with status 130.
///
/// Installing twice in one process fails; the second attempt only logs a warning.
pub fn install_handler() {
    if let Err(e) = ctrlc::set_handler(|| {
        println!();
        ui::display_error("Interrupted by user.");
        std::process::exit(EXIT_INTERRUPTED);
    }) {
        ui::display_warning(&format!("Could not install interrupt handler: {}", e));
    }
}
