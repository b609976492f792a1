//! S3-compatible object storage (Cloudflare R2 via custom endpoint).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client as S3Client;

use super::ObjectStorage;

/// Connection settings, read from `R2_*` environment variables.
#[derive(Debug, Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Public dev URL base, e.g. `https://pub-xxxx.r2.dev`.
    pub public_base: String,
}

impl R2Config {
    /// # Environment Variables
    /// - `R2_ACCOUNT_ID` (required)
    /// - `R2_ACCESS_KEY_ID` (required)
    /// - `R2_SECRET_ACCESS_KEY` (required)
    /// - `R2_BUCKET` (required)
    /// - `R2_PUBLIC_BASE` (required)
    pub fn from_env() -> Result<Self, String> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| format!("{name} environment variable not set"))
        };
        Ok(Self {
            account_id: var("R2_ACCOUNT_ID")?,
            access_key_id: var("R2_ACCESS_KEY_ID")?,
            secret_access_key: var("R2_SECRET_ACCESS_KEY")?,
            bucket: var("R2_BUCKET")?,
            public_base: var("R2_PUBLIC_BASE")?,
        })
    }
}

/// S3-backed implementation of [`ObjectStorage`].
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    public_base: String,
}

impl S3Storage {
    /// Build a client against the R2 endpoint for the configured account.
    pub async fn connect(config: &R2Config) -> Self {
        let base = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "qrmenu-r2",
        );
        let s3_config = aws_sdk_s3::config::Builder::from(&base)
            .region(Region::new("auto"))
            .endpoint_url(format!(
                "https://{}.r2.cloudflarestorage.com",
                config.account_id
            ))
            .credentials_provider(credentials)
            .build();
        Self {
            client: S3Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(bytes.into());
        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }
        req.send()
            .await
            .map_err(|e| anyhow::anyhow!("failed to write to object storage: {e}"))?;
        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("failed to delete from object storage: {e}"))?;
        Ok(())
    }

    fn public_base(&self) -> &str {
        &self.public_base
    }
}
