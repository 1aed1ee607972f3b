//! Namespace queries
//!
//! The store has no directories. A folder is a zero-length object whose key
//! ends with `/`; a leaf is any other key. Both can exist for the same name,
//! so callers ask for the kind they need and report the other one as a
//! distinct error. Nothing here mutates the store.

use crate::error::{Error, Result};
use crate::path::{Location, ObjectPath, WorkingPath};
use crate::traits::ObjectStore;

/// What a working path denotes in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// The bucket list
    Root,
    /// An existing bucket
    Bucket,
    /// An existing folder marker
    Folder,
    /// An existing object that is not a folder marker
    Leaf,
    /// The bucket component does not exist
    NoSuchBucket,
    /// The bucket exists but neither a folder nor a leaf has this key
    Absent,
}

/// A working path classified against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Bucket name, None at the root
    pub bucket: Option<String>,
    /// Object key without trailing separator, None at root and bucket level
    pub key: Option<String>,
    /// Classification
    pub kind: PathKind,
}

/// Read-only view of the namespace through an [`ObjectStore`]
pub struct NamespaceInspector<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> NamespaceInspector<'a> {
    /// Create an inspector over `store`
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// True iff `path` is the root
    pub fn is_root(path: &WorkingPath) -> bool {
        path.is_root()
    }

    /// True iff `name` is in the caller's bucket listing
    pub async fn bucket_exists(&self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        let buckets = self.store.list_buckets().await?;
        Ok(buckets.iter().any(|b| b.name == name))
    }

    /// Fail with NotFound unless `name` is an existing bucket
    pub async fn require_bucket(&self, name: &str) -> Result<()> {
        if self.bucket_exists(name).await? {
            Ok(())
        } else {
            Err(Error::NotFound(format!("No such bucket '{name}'.")))
        }
    }

    /// True iff the exact key exists
    pub async fn key_exists(&self, path: &ObjectPath) -> Result<bool> {
        Ok(self.store.head_object(path).await?.is_found())
    }

    /// True iff `<key>/` exists
    pub async fn folder_exists(&self, path: &ObjectPath) -> Result<bool> {
        self.key_exists(&path.as_folder()).await
    }

    /// True iff `<key>` exists without a trailing separator
    pub async fn leaf_exists(&self, path: &ObjectPath) -> Result<bool> {
        if path.is_folder_marker() {
            return Ok(false);
        }
        self.key_exists(path).await
    }

    /// True iff the only key under the folder prefix is the marker itself
    pub async fn is_empty_folder(&self, bucket: &str, folder_key: &str) -> Result<bool> {
        let entries = self.store.list_objects(bucket, folder_key).await?;
        tracing::debug!(bucket, folder_key, count = entries.len(), "emptiness check");
        Ok(entries.len() == 1)
    }

    /// Classify `path`, preferring folder over leaf when both exist
    pub async fn classify(&self, path: &WorkingPath) -> Result<ResolvedPath> {
        let bucket = path.bucket().map(str::to_string);
        let key = path.key();

        let kind = match path.location() {
            Location::Root => PathKind::Root,
            Location::Bucket(name) => {
                if self.bucket_exists(name).await? {
                    PathKind::Bucket
                } else {
                    PathKind::NoSuchBucket
                }
            }
            Location::Object { bucket: name, .. } => {
                if !self.bucket_exists(name).await? {
                    PathKind::NoSuchBucket
                } else {
                    let object = ObjectPath::new(name, key.clone().unwrap_or_default());
                    if self.folder_exists(&object).await? {
                        PathKind::Folder
                    } else if self.leaf_exists(&object).await? {
                        PathKind::Leaf
                    } else {
                        PathKind::Absent
                    }
                }
            }
        };

        Ok(ResolvedPath { bucket, key, kind })
    }
}
