//! Spinner for file transfers
//!
//! Transfers go through a single store call, so progress is indeterminate.

use std::time::Duration;

use super::OutputConfig;

/// Spinner wrapper; hidden when progress is disabled or stderr is not a terminal
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Start a spinner with `message`
    pub fn start(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.no_progress || !console::user_attended_stderr() {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) =
                indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        let spinner = Spinner::start(&config, "upload");
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_spinner_follows_terminal() {
        let spinner = Spinner::start(&OutputConfig::default(), "upload");
        assert_eq!(spinner.is_visible(), console::user_attended_stderr());
        spinner.finish();
    }
}
