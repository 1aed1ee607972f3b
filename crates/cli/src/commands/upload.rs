//! upload command - Send a local file to the store

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use humansize::{DECIMAL, format_size};
use s3shell_core::{Error, NamespaceInspector, Result};

use super::lookup::placement;
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;
use crate::output::Spinner;

#[derive(Parser, Debug)]
#[command(name = "upload", disable_help_flag = true)]
pub struct UploadArgs {
    /// Local file
    #[arg(allow_hyphen_values = true)]
    pub local: PathBuf,

    /// Destination bucket, folder or key
    #[arg(allow_hyphen_values = true)]
    pub path: String,
}

pub struct Upload;

#[async_trait]
impl Command for Upload {
    fn name(&self) -> &'static str {
        "upload"
    }

    fn usage(&self) -> &'static str {
        "upload <localFile> <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: UploadArgs = parse_args(argv, self.usage())?;
        let local = &args.local;

        let metadata = match tokio::fs::metadata(local).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "{}: No such local file.",
                    local.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(Error::WrongKind(format!(
                "{}: Not a regular file.",
                local.display()
            )));
        }
        let Some(file_name) = local.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Err(Error::Usage(format!(
                "{}: Cannot determine a file name.",
                local.display()
            )));
        };

        let dest = ctx.resolve(&args.path)?;
        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        let target = placement(&inspector, &dest, &file_name).await?;

        let content_type = mime_guess::from_path(local)
            .first()
            .map(|m| m.essence_str().to_string());

        let spinner = Spinner::start(&ctx.output, &format!("uploading {file_name}"));
        let result = store.upload_file(local, &target, content_type).await;
        spinner.finish();
        let size = result?;

        Ok(Reply::line(format!(
            "upload: {} -> {target} ({})",
            local.display(),
            format_size(size, DECIMAL)
        )))
    }
}
