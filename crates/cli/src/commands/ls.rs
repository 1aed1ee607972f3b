//! ls command - List buckets and objects
//!
//! Lists buckets at the root, otherwise the direct children of the current
//! bucket or folder.

use async_trait::async_trait;
use clap::Parser;
use s3shell_core::path::Location;
use s3shell_core::{ObjectPath, ObjectStore, Probe, Result};

use super::{Command, Reply, parse_args};
use crate::context::ShellContext;
use crate::output::Renderer;
use crate::output::listing::{BucketRow, direct_children};

/// List the current location
#[derive(Parser, Debug)]
#[command(name = "ls", disable_help_flag = true)]
pub struct LsArgs {
    /// Long format: kind, size and timestamp columns
    #[arg(short = 'l')]
    pub long: bool,
}

pub struct Ls;

#[async_trait]
impl Command for Ls {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn usage(&self) -> &'static str {
        "ls [-l]"
    }

    async fn execute(&self, argv: &[String], ctx: &mut ShellContext) -> Result<Reply> {
        let args: LsArgs = parse_args(argv, self.usage())?;
        let store = ctx.store()?;
        let renderer = ctx.renderer();

        let lines = match ctx.cwd.location() {
            Location::Root => list_buckets(store.as_ref(), &renderer, args.long).await?,
            Location::Bucket(bucket) | Location::Object { bucket, .. } => {
                let prefix = ctx.cwd.listing_prefix();
                list_objects(store.as_ref(), &renderer, bucket, &prefix, args.long).await?
            }
        };

        Ok(Reply::lines(lines))
    }
}

async fn list_buckets(
    store: &dyn ObjectStore,
    renderer: &Renderer,
    long: bool,
) -> Result<Vec<String>> {
    let buckets = store.list_buckets().await?;

    let mut rows = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let size = if long {
            let objects = store.list_objects(&bucket.name, "").await?;
            Some(objects.iter().map(|o| o.size).sum())
        } else {
            None
        };
        rows.push(BucketRow {
            name: bucket.name,
            size,
            created: bucket.created,
        });
    }

    Ok(renderer.buckets(&rows, long))
}

async fn list_objects(
    store: &dyn ObjectStore,
    renderer: &Renderer,
    bucket: &str,
    prefix: &str,
    long: bool,
) -> Result<Vec<String>> {
    let objects = store.list_objects(bucket, prefix).await?;
    let mut entries = direct_children(objects, prefix);
    tracing::debug!(bucket, prefix, count = entries.len(), "ls");

    if long {
        for entry in &mut entries {
            let path = ObjectPath::new(bucket, entry.key.as_str());
            if let Probe::Found(info) = store.head_object(&path).await? {
                entry.content_type = info.content_type;
            }
        }
    }

    Ok(renderer.objects(&entries, prefix, long))
}
