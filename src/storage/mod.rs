//! Object storage for uploaded menu images.
//!
//! Uploads land under opaque keys (`uploads/{epoch_millis}-{filename}`) and
//! are served from a public base URL. When an item image is replaced or its
//! record deleted, the old object is garbage collected if its URL lives
//! under our public base; foreign URLs are left alone.

use async_trait::async_trait;

pub mod fs;
#[cfg(feature = "s3-uploads")]
pub mod s3;

pub use fs::FsStorage;
#[cfg(feature = "s3-uploads")]
pub use s3::S3Storage;

/// Backend-agnostic object store for uploaded images.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> anyhow::Result<String>;

    /// Delete the object at `key`. Deleting a missing object is not an
    /// error.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;

    /// Base URL objects are publicly served from, without trailing slash.
    fn public_base(&self) -> &str;
}

/// Extract the storage key from a URL when it lives under `public_base`.
pub fn key_for_public_url(public_base: &str, url: &str) -> Option<String> {
    let base = public_base.trim_end_matches('/');
    let rest = url.strip_prefix(base)?.strip_prefix('/')?;
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Build an upload key from an epoch-milliseconds stamp and a client-supplied
/// filename, stripping anything path-like from the name.
pub fn upload_key(epoch_millis: i64, filename: &str) -> String {
    let name: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = if name.is_empty() { "upload".to_string() } else { name };
    format!("uploads/{epoch_millis}-{name}")
}
