//! In-memory store and shell harness for command tests

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jiff::Timestamp;
use s3shell_core::{
    BucketInfo, Connector, Error, ObjectInfo, ObjectPath, ObjectStore, Probe, Profile,
    ProfileStore, Result,
};
use tempfile::TempDir;

use crate::commands::Reply;
use crate::context::ShellContext;
use crate::dispatcher::{CommandDispatcher, CommandError};
use crate::output::OutputConfig;

const PROFILES: &str = r#"
[profiles.default]
access_key = "AKIADEFAULT"
secret_key = "secret"
region = "us-east-1"

[profiles.other]
access_key = "AKIAOTHER"
secret_key = "secret"
region = "eu-west-1"

[profiles.badcreds]
access_key = "REJECTED"
secret_key = "secret"
region = "us-east-1"

[profiles.broken]
access_key = "AKIABROKEN"
"#;

fn fixed_time() -> Timestamp {
    Timestamp::from_second(1_600_000_000).unwrap()
}

struct StoredObject {
    data: Vec<u8>,
    content_type: Option<String>,
}

#[derive(Default)]
struct State {
    buckets: BTreeMap<String, BTreeMap<String, StoredObject>>,
    /// Names owned by someone else; creation fails
    reserved: BTreeSet<String>,
}

/// Object store kept in process memory
#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
    revoked: AtomicBool,
    fail_copies: AtomicBool,
    fail_creates: AtomicBool,
}

impl MemoryStore {
    pub fn add_bucket(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .buckets
            .entry(name.to_string())
            .or_default();
    }

    pub fn add_object(&self, bucket: &str, key: &str, data: &[u8]) {
        let content_type = mime_guess::from_path(key)
            .first()
            .map(|m| m.essence_str().to_string());
        self.insert(bucket, key, data.to_vec(), content_type);
    }

    fn insert(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: Option<String>) {
        self.state
            .lock()
            .unwrap()
            .buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), StoredObject { data, content_type });
    }

    pub fn has_bucket(&self, name: &str) -> bool {
        self.state.lock().unwrap().buckets.contains_key(name)
    }

    pub fn has_object(&self, bucket: &str, key: &str) -> bool {
        self.object_data(bucket, key).is_some()
    }

    pub fn object_data(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.buckets.get(bucket)?.get(key).map(|o| o.data.clone())
    }

    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.buckets.get(bucket)?.get(key)?.content_type.clone()
    }

    pub fn reserve(&self, name: &str) {
        self.state.lock().unwrap().reserved.insert(name.to_string());
    }

    pub fn revoke(&self) {
        self.revoked.store(true, Ordering::SeqCst);
    }

    pub fn restore(&self) {
        self.revoked.store(false, Ordering::SeqCst);
    }

    pub fn fail_copies(&self) {
        self.fail_copies.store(true, Ordering::SeqCst);
    }

    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    fn check_access(&self) -> Result<()> {
        if self.revoked.load(Ordering::SeqCst) {
            Err(Error::Store("AccessDenied: credentials revoked".into()))
        } else {
            Ok(())
        }
    }

    fn read(&self, path: &ObjectPath) -> Result<Vec<u8>> {
        let state = self.state.lock().unwrap();
        let bucket = state
            .buckets
            .get(&path.bucket)
            .ok_or_else(|| Error::Store("NoSuchBucket".into()))?;
        bucket
            .get(&path.key)
            .map(|o| o.data.clone())
            .ok_or_else(|| Error::Store("NoSuchKey".into()))
    }

    fn write(&self, path: &ObjectPath, data: Vec<u8>, content_type: Option<String>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let bucket = state
            .buckets
            .get_mut(&path.bucket)
            .ok_or_else(|| Error::Store("NoSuchBucket".into()))?;
        bucket.insert(path.key.clone(), StoredObject { data, content_type });
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        self.check_access()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .buckets
            .keys()
            .map(|name| BucketInfo {
                name: name.clone(),
                created: Some(fixed_time()),
            })
            .collect())
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.check_access()?;
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(Error::Store("TooManyBuckets: bucket limit reached".into()));
        }
        let mut state = self.state.lock().unwrap();
        if state.reserved.contains(bucket) || state.buckets.contains_key(bucket) {
            return Err(Error::Conflict("BucketAlreadyExists".into()));
        }
        state.buckets.insert(bucket.to_string(), BTreeMap::new());
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        self.check_access()?;
        let state = self.state.lock().unwrap();
        let objects = state
            .buckets
            .get(bucket)
            .ok_or_else(|| Error::Store("NoSuchBucket".into()))?;
        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| {
                let mut info = ObjectInfo::new(key.as_str(), object.data.len() as u64);
                info.last_modified = Some(fixed_time());
                info
            })
            .collect())
    }

    async fn head_object(&self, path: &ObjectPath) -> Result<Probe> {
        self.check_access()?;
        let state = self.state.lock().unwrap();
        let Some(object) = state
            .buckets
            .get(&path.bucket)
            .and_then(|b| b.get(&path.key))
        else {
            return Ok(Probe::NotFound);
        };
        let mut info = ObjectInfo::new(path.key.as_str(), object.data.len() as u64);
        info.last_modified = Some(fixed_time());
        info.content_type = object.content_type.clone();
        Ok(Probe::Found(info))
    }

    async fn put_object(
        &self,
        path: &ObjectPath,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        self.check_access()?;
        self.write(path, data, content_type)
    }

    async fn delete_object(&self, path: &ObjectPath) -> Result<()> {
        self.check_access()?;
        let mut state = self.state.lock().unwrap();
        if let Some(bucket) = state.buckets.get_mut(&path.bucket) {
            bucket.remove(&path.key);
        }
        Ok(())
    }

    async fn copy_object(&self, src: &ObjectPath, dst: &ObjectPath) -> Result<()> {
        self.check_access()?;
        if self.fail_copies.load(Ordering::SeqCst) {
            return Err(Error::Store("InternalError: copy failed".into()));
        }
        let data = self.read(src)?;
        let content_type = self.content_type(&src.bucket, &src.key);
        self.write(dst, data, content_type)
    }

    async fn upload_file(
        &self,
        local: &Path,
        dst: &ObjectPath,
        content_type: Option<String>,
    ) -> Result<u64> {
        self.check_access()?;
        let data = std::fs::read(local)?;
        let size = data.len() as u64;
        self.write(dst, data, content_type)?;
        Ok(size)
    }

    async fn download_file(&self, src: &ObjectPath, local: &Path) -> Result<u64> {
        self.check_access()?;
        let data = self.read(src)?;
        std::fs::write(local, &data)?;
        Ok(data.len() as u64)
    }
}

/// Hands out the shared memory store; rejects the `REJECTED` access key
struct MemoryConnector {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, profile: &Profile) -> Result<Arc<dyn ObjectStore>> {
        if profile.access_key == "REJECTED" {
            return Err(Error::Store("InvalidAccessKeyId".into()));
        }
        Ok(Arc::clone(&self.store) as Arc<dyn ObjectStore>)
    }
}

/// A shell wired to a [`MemoryStore`]
pub(crate) struct Harness {
    pub ctx: ShellContext,
    pub store: Arc<MemoryStore>,
    dispatcher: CommandDispatcher,
    _dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles.toml");
        std::fs::write(&path, PROFILES).unwrap();

        let store = Arc::new(MemoryStore::default());
        let connector = Arc::new(MemoryConnector {
            store: Arc::clone(&store),
        });
        let output = OutputConfig {
            no_color: true,
            no_progress: true,
        };

        Self {
            ctx: ShellContext::new(connector, ProfileStore::with_path(path), output),
            store,
            dispatcher: CommandDispatcher::new(),
            _dir: dir,
        }
    }

    pub async fn logged_in() -> Self {
        let mut harness = Self::new();
        harness.login().await;
        harness
    }

    pub async fn login(&mut self) {
        self.ok("login").await;
    }

    pub async fn run(&mut self, line: &str) -> std::result::Result<Reply, CommandError> {
        self.dispatcher.dispatch(line, &mut self.ctx).await
    }

    /// Run a line that must succeed, returning its output
    pub async fn ok(&mut self, line: &str) -> Vec<String> {
        match self.run(line).await {
            Ok(reply) => reply.lines,
            Err(e) => panic!("`{line}` failed: {e}"),
        }
    }

    /// Run a line that must fail
    pub async fn err(&mut self, line: &str) -> CommandError {
        match self.run(line).await {
            Ok(reply) => panic!("`{line}` unexpectedly succeeded: {:?}", reply.lines),
            Err(e) => e,
        }
    }
}
