//! rmdir command - Remove an empty folder

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, NamespaceInspector, Result};

use super::lookup::{no_such_file, not_a_directory};
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "rmdir", disable_help_flag = true)]
pub struct RmDirArgs {
    /// Folder path
    #[arg(allow_hyphen_values = true)]
    pub path: String,
}

pub struct RmDir;

#[async_trait]
impl Command for RmDir {
    fn name(&self) -> &'static str {
        "rmdir"
    }

    fn usage(&self) -> &'static str {
        "rmdir <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: RmDirArgs = parse_args(argv, self.usage())?;
        let target = ctx.resolve(&args.path)?;
        let Some(object) = target.object_path() else {
            return Err(Error::Usage(
                "Invalid location - buckets and the root cannot be removed.".into(),
            ));
        };

        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        inspector.require_bucket(&object.bucket).await?;

        if !inspector.folder_exists(&object).await? {
            return Err(if inspector.leaf_exists(&object).await? {
                not_a_directory(&args.path)
            } else {
                no_such_file(&args.path)
            });
        }

        if ctx.cwd.starts_with(&target) {
            return Err(Error::Usage(format!(
                "{}: Cannot remove the current folder or one of its parents.",
                args.path
            )));
        }

        let marker = object.as_folder();
        if !inspector.is_empty_folder(&marker.bucket, &marker.key).await? {
            return Err(Error::NotEmpty(format!(
                "{}: Folder not empty.",
                args.path
            )));
        }

        store.delete_object(&marker).await?;
        tracing::debug!(folder = %marker, "folder removed");
        Ok(Reply::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;
    use s3shell_core::Error;

    async fn shell() -> Harness {
        let mut shell = Harness::logged_in().await;
        shell.store.add_bucket("b");
        shell.store.add_object("b", "docs/", b"");
        shell.store.add_object("b", "full/", b"");
        shell.store.add_object("b", "full/a.txt", b"a");
        shell.store.add_object("b", "leaf", b"x");
        shell
    }

    #[tokio::test]
    async fn test_rmdir_empty_folder() {
        let mut shell = shell().await;
        shell.ok("rmdir b/docs").await;
        assert!(!shell.store.has_object("b", "docs/"));
    }

    #[tokio::test]
    async fn test_rmdir_refuses_non_empty() {
        let mut shell = shell().await;
        let err = shell.err("rmdir b/full").await;
        assert!(matches!(err.error, Error::NotEmpty(_)));
        assert!(shell.store.has_object("b", "full/"));
    }

    #[tokio::test]
    async fn test_rmdir_kind_errors() {
        let mut shell = shell().await;
        let err = shell.err("rmdir b/leaf").await;
        assert!(matches!(err.error, Error::WrongKind(_)));
        let err = shell.err("rmdir b/ghost").await;
        assert!(matches!(err.error, Error::NotFound(_)));
        let err = shell.err("rmdir b").await;
        assert!(matches!(err.error, Error::Usage(_)));
    }

    #[tokio::test]
    async fn test_rmdir_refuses_current_folder() {
        let mut shell = shell().await;
        shell.ok("cd b/docs").await;
        let err = shell.err("rmdir ../docs").await;
        assert!(matches!(err.error, Error::Usage(_)));
        let err = shell.err("rmdir ~/b/docs").await;
        assert!(matches!(err.error, Error::Usage(_)));
        assert!(shell.store.has_object("b", "docs/"));
    }
}
