//! Command dispatch
//!
//! Maps the first word of an input line to a [`Command`], enforces session
//! gating and tags every failure with the command word.

use s3shell_core::Error;
use thiserror::Error;

use crate::commands::{self, Command, Reply};
use crate::context::ShellContext;

/// A failed command, printed as `[ERROR] <command>: <message>`
#[derive(Debug, Error)]
#[error("[ERROR] {command}: {error}")]
pub struct CommandError {
    /// The command word as typed
    pub command: String,
    /// What went wrong
    pub error: Error,
}

impl CommandError {
    pub fn new(command: impl Into<String>, error: Error) -> Self {
        Self {
            command: command.into(),
            error,
        }
    }
}

/// Registry of shell commands
pub struct CommandDispatcher {
    commands: Vec<Box<dyn Command>>,
}

impl CommandDispatcher {
    /// Dispatcher with every built-in command registered
    pub fn new() -> Self {
        Self {
            commands: commands::all(),
        }
    }

    /// Find the command registered under `word` or one of its aliases
    pub fn find(&self, word: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == word || c.aliases().contains(&word))
            .map(|c| c.as_ref())
    }

    /// Run one input line
    ///
    /// Blank lines produce an empty reply. Gated commands are refused while
    /// logged out and re-probe the session before they run.
    pub async fn dispatch(
        &self,
        line: &str,
        ctx: &mut ShellContext,
    ) -> Result<Reply, CommandError> {
        let argv = tokenize(line);
        let Some(word) = argv.first() else {
            return Ok(Reply::default());
        };

        let Some(command) = self.find(word) else {
            return Err(CommandError::new(
                word.as_str(),
                Error::Usage("Invalid command.".into()),
            ));
        };

        tracing::debug!(command = command.name(), args = argv.len() - 1, "dispatch");

        if command.requires_session() {
            if !ctx.session.is_active() {
                return Err(CommandError::new(
                    word.as_str(),
                    Error::Auth("Must login first.".into()),
                ));
            }
            ctx.session
                .validate()
                .await
                .map_err(|e| CommandError::new(word.as_str(), e))?;
        }

        command
            .execute(&argv, ctx)
            .await
            .map_err(|e| CommandError::new(word.as_str(), e))
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a line on whitespace, dropping empty tokens
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
