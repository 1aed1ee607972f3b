//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3shell-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_smithy_types::DateTime;
use aws_smithy_types::error::display::DisplayErrorContext;
use jiff::Timestamp;
use tokio::io::AsyncWriteExt;

use s3shell_core::{BucketInfo, Error, ObjectInfo, ObjectPath, ObjectStore, Probe, Profile, Result};

/// Region that takes no location constraint on bucket creation
const DEFAULT_REGION: &str = "us-east-1";

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    region: String,
}

impl S3Client {
    /// Create a new S3 client from a credentials profile
    ///
    /// Builds the SDK configuration only; the first request is what proves
    /// the credentials.
    pub async fn new(profile: &Profile) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            profile.access_key.clone(),
            profile.secret_key.clone(),
            profile.session_token.clone(),
            None, // expiry
            "s3shell-profile",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(profile.region.clone()));

        if let Some(endpoint) = &profile.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        // Custom endpoints are usually S3-compatible servers without
        // virtual-host bucket DNS.
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(profile.endpoint.is_some())
            .build();

        tracing::debug!(profile = %profile.name, region = %profile.region, "built S3 client");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            region: profile.region.clone(),
        })
    }
}

/// Render an SDK error with its full source chain
fn store_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Store(DisplayErrorContext(err).to_string())
}

/// Whether bucket creation failed because the name is already in use
fn is_name_taken(err: &CreateBucketError) -> bool {
    err.is_bucket_already_exists() || err.is_bucket_already_owned_by_you()
}

/// Location constraint for buckets created in `region`
fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    if region == DEFAULT_REGION {
        return None;
    }
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

/// Write a response body to `local` chunk by chunk
///
/// A partially written file is removed when the stream fails.
async fn write_body(mut body: ByteStream, local: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(local).await?;
    let mut written = 0u64;

    loop {
        let chunk = match body.try_next().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                drop(file);
                let _ = tokio::fs::remove_file(local).await;
                return Err(Error::Store(e.to_string()));
            }
        };
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

fn to_timestamp(dt: &DateTime) -> Option<Timestamp> {
    Timestamp::from_second(dt.secs()).ok()
}

/// `CopySource` header value for `src`
fn copy_source(src: &ObjectPath) -> String {
    format!("{}/{}", src.bucket, src.key)
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(store_error)?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_string(),
                created: b.creation_date().and_then(to_timestamp),
            })
            .collect();

        Ok(buckets)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        tracing::debug!(bucket, region = %self.region, "create_bucket");
        self.inner
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(bucket_configuration(&self.region))
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(is_name_taken) {
                    Error::Conflict(DisplayErrorContext(&e).to_string())
                } else {
                    store_error(e)
                }
            })?;

        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let mut items = Vec::new();
        let mut continuation_token: Option<String> = None;

        // Paginate through all results
        loop {
            let response = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(store_error)?;

            for object in response.contents() {
                let size = object.size().unwrap_or(0).max(0) as u64;
                let mut info = ObjectInfo::new(object.key().unwrap_or_default(), size);
                info.last_modified = object.last_modified().and_then(to_timestamp);
                items.push(info);
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!(bucket, prefix, count = items.len(), "list_objects");
        Ok(items)
    }

    async fn head_object(&self, path: &ObjectPath) -> Result<Probe> {
        let response = match self
            .inner
            .head_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    return Ok(Probe::NotFound);
                }
                return Err(store_error(e));
            }
        };

        let size = response.content_length().unwrap_or(0).max(0) as u64;
        let mut info = ObjectInfo::new(&path.key, size);
        info.last_modified = response.last_modified().and_then(to_timestamp);
        info.content_type = response.content_type().map(str::to_string);

        Ok(Probe::Found(info))
    }

    async fn put_object(
        &self,
        path: &ObjectPath,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        tracing::debug!(bucket = %path.bucket, key = %path.key, size = data.len(), "put_object");
        self.inner
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .body(ByteStream::from(data))
            .set_content_type(content_type)
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn delete_object(&self, path: &ObjectPath) -> Result<()> {
        tracing::debug!(bucket = %path.bucket, key = %path.key, "delete_object");
        self.inner
            .delete_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn copy_object(&self, src: &ObjectPath, dst: &ObjectPath) -> Result<()> {
        tracing::debug!(%src, %dst, "copy_object");
        self.inner
            .copy_object()
            .copy_source(copy_source(src))
            .bucket(&dst.bucket)
            .key(&dst.key)
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn upload_file(
        &self,
        local: &Path,
        dst: &ObjectPath,
        content_type: Option<String>,
    ) -> Result<u64> {
        let size = tokio::fs::metadata(local).await?.len();
        let body = ByteStream::from_path(local)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        tracing::debug!(local = %local.display(), %dst, size, "upload_file");
        self.inner
            .put_object()
            .bucket(&dst.bucket)
            .key(&dst.key)
            .body(body)
            .set_content_type(content_type)
            .send()
            .await
            .map_err(store_error)?;

        Ok(size)
    }

    async fn download_file(&self, src: &ObjectPath, local: &Path) -> Result<u64> {
        let response = self
            .inner
            .get_object()
            .bucket(&src.bucket)
            .key(&src.key)
            .send()
            .await
            .map_err(store_error)?;

        let size = write_body(response.body, local).await?;
        tracing::debug!(%src, local = %local.display(), size, "download_file");

        Ok(size)
    }
}
