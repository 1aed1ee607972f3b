//! Shell command definitions and execution
//!
//! Each command parses its own arguments with clap and runs against the
//! [`ShellContext`]. Failures are returned, never printed, so the dispatcher
//! can tag them uniformly.

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, Result};

use crate::context::ShellContext;

mod cd;
mod cp;
mod download;
mod login;
mod logout;
mod lookup;
mod ls;
mod mkbucket;
mod mkdir;
mod mv;
mod pwd;
mod rm;
mod rmdir;
mod upload;

/// Lines to print after a command succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Output lines, printed in order
    pub lines: Vec<String>,
    /// The shell should exit after printing
    pub terminate: bool,
}

impl Reply {
    /// Reply with a single line
    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            terminate: false,
        }
    }

    /// Reply with many lines
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            terminate: false,
        }
    }

    /// Reply that ends the shell
    pub fn terminate() -> Self {
        Self {
            lines: Vec::new(),
            terminate: true,
        }
    }
}

/// A shell command
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary command word
    fn name(&self) -> &'static str;

    /// Other words that run this command
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Usage line shown when arguments do not parse
    fn usage(&self) -> &'static str;

    /// Whether the command needs a live session
    fn requires_session(&self) -> bool {
        true
    }

    /// Run with the full argument vector, command word included
    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply>;
}

/// Every built-in command
pub fn all() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(login::Login),
        Box::new(logout::Logout),
        Box::new(mkbucket::MkBucket),
        Box::new(ls::Ls),
        Box::new(pwd::Pwd),
        Box::new(cd::Cd),
        Box::new(mkdir::MkDir),
        Box::new(rmdir::RmDir),
        Box::new(upload::Upload),
        Box::new(download::Download),
        Box::new(cp::Cp),
        Box::new(mv::Mv),
        Box::new(rm::Rm),
    ]
}

/// Parse `argv` into `T`, reporting any clap failure as a usage error
pub(crate) fn parse_args<T: Parser>(argv: &[String], usage: &str) -> Result<T> {
    T::try_parse_from(argv).map_err(|e| {
        tracing::debug!(error = %e.kind(), "argument parse failed");
        Error::Usage(format!("Usage: {usage}"))
    })
}
