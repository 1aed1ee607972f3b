//! cp command - Copy an object inside the store

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, NamespaceInspector, ObjectPath, Result};

use super::lookup::{placement, require_leaf};
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "cp", disable_help_flag = true)]
pub struct CpArgs {
    /// Source object
    #[arg(allow_hyphen_values = true)]
    pub source: String,

    /// Destination bucket, folder or key
    #[arg(allow_hyphen_values = true)]
    pub target: String,
}

pub struct Cp;

#[async_trait]
impl Command for Cp {
    fn name(&self) -> &'static str {
        "cp"
    }

    fn usage(&self) -> &'static str {
        "cp <path> <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: CpArgs = parse_args(argv, self.usage())?;
        let (src, dst) = copy(ctx, &args.source, &args.target).await?;
        Ok(Reply::line(format!("cp: {src} -> {dst}")))
    }
}

/// Copy the leaf at `source` to the location `target` names
///
/// Returns the resolved source and destination on success.
pub(crate) async fn copy(
    ctx: &ShellContext,
    source: &str,
    target: &str,
) -> Result<(ObjectPath, ObjectPath)> {
    let src_path = ctx.resolve(source)?;
    let dst_path = ctx.resolve(target)?;

    let store = ctx.store()?;
    let inspector = NamespaceInspector::new(store.as_ref());
    let src = require_leaf(
        &inspector,
        &src_path,
        source,
        "Invalid location - only objects can be copied.",
    )
    .await?;
    let dst = placement(&inspector, &dst_path, src.file_name()).await?;

    if src == dst {
        return Err(Error::Conflict(format!(
            "'{source}' and '{target}' are the same object."
        )));
    }

    store.copy_object(&src, &dst).await?;
    Ok((src, dst))
}
