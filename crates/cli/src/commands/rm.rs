//! rm command - Delete a single object

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{NamespaceInspector, Result};

use super::lookup::require_leaf;
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "rm", disable_help_flag = true)]
pub struct RmArgs {
    /// Object path
    #[arg(allow_hyphen_values = true)]
    pub path: String,
}

pub struct Rm;

#[async_trait]
impl Command for Rm {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn usage(&self) -> &'static str {
        "rm <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: RmArgs = parse_args(argv, self.usage())?;
        let target = ctx.resolve(&args.path)?;

        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        let object = require_leaf(
            &inspector,
            &target,
            &args.path,
            "Invalid location - use rmdir for folders; buckets and the root cannot be removed.",
        )
        .await?;

        store.delete_object(&object).await?;
        tracing::debug!(%object, "object removed");
        Ok(Reply::default())
    }
}
