//! download command - Fetch an object into a local file

use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use humansize::{DECIMAL, format_size};
use s3shell_core::{Error, NamespaceInspector, Result};

use super::lookup::require_leaf;
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;
use crate::output::Spinner;

#[derive(Parser, Debug)]
#[command(name = "download", disable_help_flag = true)]
pub struct DownloadArgs {
    /// Object path
    #[arg(allow_hyphen_values = true)]
    pub path: String,

    /// Local destination; must not exist yet
    #[arg(allow_hyphen_values = true)]
    pub local: PathBuf,
}

pub struct Download;

#[async_trait]
impl Command for Download {
    fn name(&self) -> &'static str {
        "download"
    }

    fn usage(&self) -> &'static str {
        "download <path> <localFile>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: DownloadArgs = parse_args(argv, self.usage())?;
        let local = &args.local;

        if tokio::fs::try_exists(local).await? {
            return Err(Error::Conflict(format!(
                "{}: Local file already exists.",
                local.display()
            )));
        }

        let source = ctx.resolve(&args.path)?;
        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        let object = require_leaf(
            &inspector,
            &source,
            &args.path,
            "Invalid location - only objects can be downloaded.",
        )
        .await?;

        let spinner = Spinner::start(&ctx.output, &format!("downloading {}", object.file_name()));
        let result = store.download_file(&object, local).await;
        spinner.finish();
        let size = result?;

        Ok(Reply::line(format!(
            "download: {object} -> {} ({})",
            local.display(),
            format_size(size, DECIMAL)
        )))
    }
}
