//! pwd command - Print the working path

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::Result;

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "pwd", disable_help_flag = true)]
pub struct PwdArgs {}

pub struct Pwd;

#[async_trait]
impl Command for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn usage(&self) -> &'static str {
        "pwd"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let _args: PwdArgs = parse_args(argv, self.usage())?;
        Ok(Reply::line(ctx.cwd.to_string()))
    }
}
