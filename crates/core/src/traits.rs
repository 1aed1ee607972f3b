//! ObjectStore trait definition
//!
//! This trait is the only way the shell talks to the object store. It keeps
//! the core independent of any vendor SDK and lets tests substitute the
//! store wholesale.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::error::Result;
use crate::path::{ObjectPath, SEPARATOR};

/// A bucket as returned by the bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    pub created: Option<Timestamp>,
}

impl BucketInfo {
    /// Create a new BucketInfo without a creation date
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

/// Metadata for a single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Full object key
    pub key: String,

    /// Size in bytes
    pub size: u64,

    /// Last modified timestamp
    pub last_modified: Option<Timestamp>,

    /// Content type; only populated by metadata lookups
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            content_type: None,
        }
    }

    /// Whether this object is a folder marker
    pub fn is_folder_marker(&self) -> bool {
        self.key.ends_with(SEPARATOR)
    }
}

/// Outcome of an existence probe
///
/// Connectivity failures travel in the surrounding `Result`, so absence is
/// never confused with an unreachable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// The exact key exists
    Found(ObjectInfo),
    /// The store answered that the key does not exist
    NotFound,
}

impl Probe {
    /// True for [`Probe::Found`]
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }
}

/// Trait for the object store operations the shell consumes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets visible to the authenticated identity
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// List every object whose key starts with `prefix`, without grouping
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>>;

    /// Get metadata for an exact key; doubles as the existence probe
    async fn head_object(&self, path: &ObjectPath) -> Result<Probe>;

    /// Store `data` under `path`
    async fn put_object(
        &self,
        path: &ObjectPath,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()>;

    /// Delete a single object
    async fn delete_object(&self, path: &ObjectPath) -> Result<()>;

    /// Server-side copy
    async fn copy_object(&self, src: &ObjectPath, dst: &ObjectPath) -> Result<()>;

    /// Upload a local file, returning the number of bytes sent
    async fn upload_file(
        &self,
        local: &Path,
        dst: &ObjectPath,
        content_type: Option<String>,
    ) -> Result<u64>;

    /// Download an object into a local file, returning the number of bytes written
    async fn download_file(&self, src: &ObjectPath, local: &Path) -> Result<u64>;

    /// Write a zero-length folder marker
    async fn put_empty_marker(&self, path: &ObjectPath) -> Result<()> {
        self.put_object(&path.as_folder(), Vec::new(), None).await
    }

    /// Cheap credential check: can we list buckets?
    async fn probe(&self) -> Result<()> {
        self.list_buckets().await.map(|_| ())
    }
}
