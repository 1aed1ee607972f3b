//! Output formatter for shell replies and errors
//!
//! Every command result passes through here so styling stays consistent.

use console::style;

use super::OutputConfig;
use crate::commands::Reply;
use crate::dispatcher::CommandError;

/// Formatter for shell output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color
    }

    /// Print the lines of a command reply
    pub fn reply(&self, reply: &Reply) {
        for line in &reply.lines {
            println!("{line}");
        }
    }

    /// Render a failed command as `[ERROR] <command>: <message>`
    pub fn render_error(&self, err: &CommandError) -> String {
        if self.colors_enabled() {
            format!(
                "{} {}: {}",
                style("[ERROR]").red().bold(),
                err.command,
                err.error
            )
        } else {
            err.to_string()
        }
    }

    /// Output a failed command to stderr
    pub fn error(&self, err: &CommandError) {
        eprintln!("{}", self.render_error(err));
    }

    /// Output a start/stop banner
    pub fn banner(&self, message: &str) {
        if self.colors_enabled() {
            println!("{}", style(message).cyan().bold());
        } else {
            println!("{message}");
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
