//! Session connector backed by the AWS SDK

use std::sync::Arc;

use async_trait::async_trait;
use s3shell_core::{Connector, ObjectStore, Profile, Result};

use crate::client::S3Client;

/// Builds an [`S3Client`] for each login
#[derive(Debug, Default, Clone, Copy)]
pub struct S3Connector;

#[async_trait]
impl Connector for S3Connector {
    async fn connect(&self, profile: &Profile) -> Result<Arc<dyn ObjectStore>> {
        let client = S3Client::new(profile).await?;
        Ok(Arc::new(client))
    }
}
