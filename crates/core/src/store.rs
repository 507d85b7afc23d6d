//! Storage access capability
//!
//! The `ObjectStore` trait defines the interface for S3-compatible storage
//! operations. It decouples the transfer workflow from the specific SDK
//! implementation, which also allows the batch driver to be tested against an
//! in-memory fake.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::progress::ProgressObserver;

/// Metadata for a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<jiff::Timestamp>,
}

/// Metadata for a listed object or object version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// Version ID (set only when listing versions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    /// Whether this is the latest version (set only when listing versions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_latest: Option<bool>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo with the given key and size
    pub fn new(key: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes,
            size_human: humansize::format_size(size_bytes.max(0) as u64, humansize::BINARY),
            storage_class: None,
            etag: None,
            last_modified: None,
            version_id: None,
            is_latest: None,
        }
    }
}

/// Detailed metadata for a single object, as returned by a head request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// ETag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// Version ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// User-defined metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub user_metadata: HashMap<String, String>,
}

/// Outcome of a delete request
///
/// On a versioned bucket a plain delete creates a delete marker instead of
/// removing data; the response carries that distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Whether the delete created (or removed) a delete marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_marker: Option<bool>,

    /// Version ID affected by the delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only list keys starting with this prefix
    pub prefix: Option<String>,

    /// Maximum number of entries to return
    pub limit: Option<usize>,

    /// List all object versions instead of current objects
    pub versions: bool,
}

/// Trait for S3-compatible storage operations
///
/// Implemented by the SDK adapter. Authentication, region and endpoint
/// resolution, retries, and transport timeouts are entirely the
/// implementation's responsibility.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all buckets
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Get the versioning status of a bucket ("Enabled", "Suspended", or None)
    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>>;

    /// Check whether a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create a bucket, optionally with versioning enabled
    async fn create_bucket(&self, bucket: &str, versioned: bool) -> Result<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// List objects (or versions) in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<Vec<ObjectInfo>>;

    /// Get object metadata
    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<ObjectMetadata>;

    /// Delete an object (or a specific version)
    async fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<DeleteOutcome>;

    /// Upload a local file to bucket/key, reporting progress to the observer
    ///
    /// Returns the number of bytes transferred.
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64>;

    /// Download bucket/key to a local path, reporting progress to the observer
    ///
    /// The destination must not be left partially written on failure.
    /// Returns the number of bytes transferred.
    async fn download_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
        dest: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_size_human() {
        let info = ObjectInfo::new("test.txt", 1024);
        assert_eq!(info.key, "test.txt");
        assert_eq!(info.size_bytes, 1024);
        assert_eq!(info.size_human, "1 KiB");
    }

    #[test]
    fn test_object_info_defaults() {
        let info = ObjectInfo::new("a", 0);
        assert!(info.etag.is_none());
        assert!(info.version_id.is_none());
        assert!(info.is_latest.is_none());
    }
}
