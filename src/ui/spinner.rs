//! Progress spinners for long-running install steps.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A progress spinner shown while an install step runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (quiet mode, CI, piped output).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Clear the spinner, leaving the line for the caller to print.
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_creation_and_clear() {
        let spinner = ProgressSpinner::new("installing git...");
        spinner.finish_clear();
    }

    #[test]
    fn hidden_spinner_clears() {
        let spinner = ProgressSpinner::hidden();
        spinner.finish_clear();
    }
}
