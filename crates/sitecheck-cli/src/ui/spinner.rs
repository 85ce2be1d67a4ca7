//! Simple spinner for tasks without known duration.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner shown while the page is being observed.
///
/// # Examples
///
/// ```no_run
/// use sitecheck_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Monitoring page activity...");
/// // Do work...
/// spinner.finish("Monitoring complete");
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner with the given message.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["◐", "◓", "◑", "◒"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Update the spinner message while it's running.
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish with a success message and a green checkmark.
    pub fn finish(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✓".green(), message));
    }

    /// Finish with an error message and a red X.
    pub fn fail(&self, message: &str) {
        self.pb
            .finish_with_message(format!("{} {}", "✗".red(), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_lifecycle_does_not_panic() {
        let spinner = Spinner::new("Monitoring...");
        spinner.set_message("Still monitoring...");
        spinner.finish("Done");
    }

    #[test]
    fn spinner_fail_does_not_panic() {
        let spinner = Spinner::new("Monitoring...");
        spinner.fail("Failed");
    }
}
