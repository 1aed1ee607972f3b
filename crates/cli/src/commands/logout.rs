//! logout command - End the session and leave the shell

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::Result;

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "logout", disable_help_flag = true)]
pub struct LogoutArgs {}

pub struct Logout;

#[async_trait]
impl Command for Logout {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["quit", "exit"]
    }

    fn usage(&self) -> &'static str {
        "logout|quit|exit"
    }

    fn requires_session(&self) -> bool {
        false
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let _args: LogoutArgs = parse_args(argv, self.usage())?;
        ctx.session.logout();
        Ok(Reply::terminate())
    }
}
