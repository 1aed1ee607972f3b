//! mkbucket command - Create a bucket
//!
//! Only allowed at the root. The name is checked against every naming rule
//! before the store is contacted.

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::{Error, NamespaceInspector, Result, bucket};

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;

#[derive(Parser, Debug)]
#[command(name = "mkbucket", disable_help_flag = true)]
pub struct MkBucketArgs {
    /// Bucket name
    #[arg(allow_hyphen_values = true)]
    pub name: String,
}

pub struct MkBucket;

#[async_trait]
impl Command for MkBucket {
    fn name(&self) -> &'static str {
        "mkbucket"
    }

    fn usage(&self) -> &'static str {
        "mkbucket <name>"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: MkBucketArgs = parse_args(argv, self.usage())?;
        let name = args.name;

        if !NamespaceInspector::is_root(&ctx.cwd) {
            return Err(Error::Usage(
                "Invalid location - buckets can only be created at the root.".into(),
            ));
        }

        let violations = bucket::validate(&name);
        if !violations.is_empty() {
            return Err(Error::InvalidBucketName { name, violations });
        }

        let store = ctx.store()?;
        let inspector = NamespaceInspector::new(store.as_ref());
        if inspector.bucket_exists(&name).await? {
            return Err(Error::Conflict(format!(
                "You already have a bucket named '{name}'."
            )));
        }

        store.create_bucket(&name).await.map_err(|e| match e {
            Error::Conflict(reason) => Error::Conflict(format!(
                "Bucket creation failure - '{name}' could not be created, it is most likely not globally unique: {reason}"
            )),
            other => other,
        })?;

        tracing::info!(bucket = %name, "bucket created");
        Ok(Reply::line(format!("Created bucket '{name}'.")))
    }
}
