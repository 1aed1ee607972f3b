//! cd command - Change the working path
//!
//! Only the root, buckets and folders can be entered.

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, NamespaceInspector, PathKind, Result};

use super::lookup::{no_such_file, not_a_directory};
use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "cd", disable_help_flag = true)]
pub struct CdArgs {
    /// Target path
    #[arg(allow_hyphen_values = true)]
    pub path: String,
}

pub struct Cd;

#[async_trait]
impl Command for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn usage(&self) -> &'static str {
        "cd <path>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: CdArgs = parse_args(argv, self.usage())?;
        let target = ctx.resolve(&args.path)?;

        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        let resolved = inspector.classify(&target).await?;

        match resolved.kind {
            PathKind::Root | PathKind::Bucket | PathKind::Folder => {
                tracing::debug!(from = %ctx.cwd, to = %target, "cd");
                ctx.cwd = target;
                Ok(Reply::default())
            }
            PathKind::NoSuchBucket => Err(Error::NotFound(format!(
                "No such bucket '{}'.",
                resolved.bucket.unwrap_or_default()
            ))),
            PathKind::Leaf => Err(not_a_directory(&args.path)),
            PathKind::Absent => Err(no_such_file(&args.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;
    use s3shell_core::Error;

    async fn shell() -> Harness {
        let mut shell = Harness::logged_in().await;
        shell.store.add_bucket("photos");
        shell.store.add_object("photos", "2024/", b"");
        shell.store.add_object("photos", "2024/trip.jpg", b"jpeg");
        shell
    }

    #[tokio::test]
    async fn test_cd_into_bucket_and_folder() {
        let mut shell = shell().await;
        shell.ok("cd photos/2024").await;
        assert_eq!(shell.ok("pwd").await, vec!["root:/photos/2024"]);
        shell.ok("cd ..").await;
        assert_eq!(shell.ok("pwd").await, vec!["root:/photos"]);
        shell.ok("cd ~").await;
        assert_eq!(shell.ok("pwd").await, vec!["root:/"]);
    }

    #[tokio::test]
    async fn test_cd_parent_at_root_is_noop() {
        let mut shell = shell().await;
        shell.ok("cd ../..").await;
        assert_eq!(shell.ok("pwd").await, vec!["root:/"]);
    }

    #[tokio::test]
    async fn test_cd_absolute_from_folder() {
        let mut shell = shell().await;
        shell.ok("cd photos/2024").await;
        shell.ok("cd root:/photos").await;
        assert_eq!(shell.ok("pwd").await, vec!["root:/photos"]);
    }

    #[tokio::test]
    async fn test_cd_errors_keep_location() {
        let mut shell = shell().await;
        shell.ok("cd photos").await;

        let err = shell.err("cd 2024/trip.jpg").await;
        assert!(matches!(err.error, Error::WrongKind(_)));
        assert_eq!(err.error.to_string(), "2024/trip.jpg: Not a directory.");

        let err = shell.err("cd missing").await;
        assert!(matches!(err.error, Error::NotFound(_)));
        assert_eq!(err.error.to_string(), "missing: No such file or directory.");

        let err = shell.err("cd ~/videos").await;
        assert_eq!(err.error.to_string(), "No such bucket 'videos'.");

        assert_eq!(shell.ok("pwd").await, vec!["root:/photos"]);
    }

    #[tokio::test]
    async fn test_cd_dot_is_a_segment_name() {
        let mut shell = shell().await;
        shell.ok("cd photos").await;
        let err = shell.err("cd .").await;
        assert_eq!(err.error.to_string(), ".: No such file or directory.");
        assert_eq!(shell.ok("pwd").await, vec!["root:/photos"]);
    }

    #[tokio::test]
    async fn test_cd_requires_one_argument() {
        let mut shell = shell().await;
        let err = shell.err("cd").await;
        assert_eq!(err.to_string(), "[ERROR] cd: Usage: cd <path>");
    }
}
