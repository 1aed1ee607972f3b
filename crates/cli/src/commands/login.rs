//! login command - Open a session from a credentials profile

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Result, WorkingPath};

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "login", disable_help_flag = true)]
pub struct LoginArgs {
    /// Profile name; the file's default profile when omitted
    pub profile: Option<String>,
}

pub struct Login;

#[async_trait]
impl Command for Login {
    fn name(&self) -> &'static str {
        "login"
    }

    fn usage(&self) -> &'static str {
        "login [profile]"
    }

    fn requires_session(&self) -> bool {
        false
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        // Any attempt, even a malformed one, ends the current session.
        ctx.session.logout();

        let args: LoginArgs = parse_args(argv, self.usage())?;
        let profile = ctx.profiles.get(args.profile.as_deref())?;
        ctx.session.login(&profile).await?;
        ctx.cwd = WorkingPath::root();

        Ok(Reply::line(format!(
            "login: Successful session login using profile '{}'.",
            profile.name
        )))
    }
}
