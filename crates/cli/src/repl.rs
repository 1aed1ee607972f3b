//! Read-eval-print loop
//!
//! One line is dispatched and fully executed before the next is read.
//! Command failures are printed and the loop continues; only a terminate
//! command or end of input leaves it.

use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::context::ShellContext;
use crate::dispatcher::CommandDispatcher;
use crate::output::Formatter;

const HISTORY_FILE: &str = ".s3shell_history";

pub const START_BANNER: &str = "=== S3 Shell Started ===";
pub const STOP_BANNER: &str = "=== S3 Shell Stopped ===";

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HISTORY_FILE))
}

/// Run the shell until a terminate command or end of input
pub async fn run(
    dispatcher: &CommandDispatcher,
    ctx: &mut ShellContext,
    formatter: &Formatter,
) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history
        && let Err(e) = editor.load_history(path)
    {
        tracing::debug!(error = %e, "no history loaded");
    }

    formatter.banner(START_BANNER);

    loop {
        let prompt = format!("{}> ", ctx.cwd);
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match dispatcher.dispatch(&line, ctx).await {
                    Ok(reply) => {
                        formatter.reply(&reply);
                        if reply.terminate {
                            break;
                        }
                    }
                    Err(err) => {
                        if err.error.ends_session() {
                            tracing::info!(command = %err.command, "session discarded");
                        }
                        formatter.error(&err);
                    }
                }
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                ctx.session.logout();
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history
        && let Err(e) = editor.save_history(path)
    {
        tracing::warn!(error = %e, path = %path.display(), "could not save history");
    }

    formatter.banner(STOP_BANNER);
    Ok(())
}
