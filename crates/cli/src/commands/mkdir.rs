//! mkdir command - Create a folder marker

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, NamespaceInspector, Result};

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "mkdir", disable_help_flag = true)]
pub struct MkDirArgs {
    /// Folder path
    #[arg(allow_hyphen_values = true)]
    pub path: String,
}

pub struct MkDir;

#[async_trait]
impl Command for MkDir {
    fn name(&self) -> &'static str {
        "mkdir"
    }

    fn usage(&self) -> &'static str {
        "mkdir <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: MkDirArgs = parse_args(argv, self.usage())?;
        let target = ctx.resolve(&args.path)?;
        let Some(object) = target.object_path() else {
            return Err(Error::Usage(
                "Invalid location - folders can only be created inside a bucket.".into(),
            ));
        };

        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        inspector.require_bucket(&object.bucket).await?;

        // Nested folders need their parent marker; bucket level has none.
        let parent = target.parent();
        if let Some(parent) = parent.object_path()
            && !inspector.folder_exists(&parent).await?
        {
            return Err(Error::NotFound(format!(
                "{}: Parent folder '{}' does not exist.",
                args.path,
                parent.file_name()
            )));
        }

        if inspector.folder_exists(&object).await? {
            return Err(Error::Conflict(format!(
                "{}: Folder already exists.",
                args.path
            )));
        }

        store.put_empty_marker(&object).await?;
        tracing::debug!(folder = %object.as_folder(), "folder created");
        Ok(Reply::default())
    }
}
