//! mv command - Copy an object, then delete the source

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, Result};

use super::cp::copy;
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "mv", disable_help_flag = true)]
pub struct MvArgs {
    /// Source object
    #[arg(allow_hyphen_values = true)]
    pub source: String,

    /// Destination bucket, folder or key
    #[arg(allow_hyphen_values = true)]
    pub target: String,
}

pub struct Mv;

#[async_trait]
impl Command for Mv {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn usage(&self) -> &'static str {
        "mv <path> <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: MvArgs = parse_args(argv, self.usage())?;

        // The source is only deleted once the copy has landed.
        let (src, dst) = copy(ctx, &args.source, &args.target).await?;

        let store = ctx.store()?;
        store.delete_object(&src).await.map_err(|e| {
            Error::Store(format!("copied to {dst} but could not remove {src}: {e}"))
        })?;

        Ok(Reply::line(format!("mv: {src} -> {dst}")))
    }
}
