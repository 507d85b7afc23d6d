//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3c-core.
//! Credential resolution, signing, retries, and transport timeouts are the
//! SDK's responsibility; this adapter only maps operations and errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CompletedMultipartUpload, CompletedPart,
    CreateBucketConfiguration, VersioningConfiguration,
};
use aws_smithy_types::timeout::TimeoutConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use s3c_core::config::READ_TIMEOUT_SECS;
use s3c_core::{
    BucketInfo, DeleteOutcome, Error, ListOptions, ObjectInfo, ObjectMetadata, ObjectStore,
    ProgressObserver, Result, StorageConfig,
};

/// Files above this size are uploaded in parts so progress stays incremental
const MULTIPART_THRESHOLD: u64 = 8 * 1024 * 1024;

/// Part size for multipart uploads (S3 minimum is 5 MiB)
const PART_SIZE: u64 = 8 * 1024 * 1024;

/// Page size for listing requests
const LIST_PAGE_SIZE: usize = 1000;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from an explicit storage configuration
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .timeout_config(
                TimeoutConfig::builder()
                    .read_timeout(Duration::from_secs(READ_TIMEOUT_SECS))
                    .build(),
            );

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        // Path-style addressing for custom endpoints (MinIO and friends)
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    async fn list_current_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ObjectInfo>> {
        let mut items = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let remaining = limit.map(|l| l.saturating_sub(items.len()));
            if remaining == Some(0) {
                break;
            }
            let page = remaining.unwrap_or(LIST_PAGE_SIZE).min(LIST_PAGE_SIZE);

            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .max_keys(page as i32);
            if let Some(p) = prefix {
                request = request.prefix(p);
            }
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify_error(bucket, &DisplayErrorContext(&e).to_string()))?;

            for object in response.contents() {
                let mut info = ObjectInfo::new(
                    object.key().unwrap_or_default(),
                    object.size().unwrap_or(0),
                );
                info.etag = object.e_tag().map(|t| t.trim_matches('"').to_string());
                info.storage_class = object.storage_class().map(|sc| sc.as_str().to_string());
                info.last_modified = object.last_modified().and_then(to_timestamp);
                items.push(info);
            }

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(items)
    }

    async fn list_objects_versions(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ObjectInfo>> {
        let mut items = Vec::new();
        let mut key_marker: Option<String> = None;
        let mut version_id_marker: Option<String> = None;

        loop {
            let remaining = limit.map(|l| l.saturating_sub(items.len()));
            if remaining == Some(0) {
                break;
            }
            let page = remaining.unwrap_or(LIST_PAGE_SIZE).min(LIST_PAGE_SIZE);

            let mut request = self
                .inner
                .list_object_versions()
                .bucket(bucket)
                .max_keys(page as i32);
            if let Some(p) = prefix {
                request = request.prefix(p);
            }
            if let Some(marker) = &key_marker {
                request = request.key_marker(marker);
            }
            if let Some(marker) = &version_id_marker {
                request = request.version_id_marker(marker);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify_error(bucket, &DisplayErrorContext(&e).to_string()))?;

            for version in response.versions() {
                let mut info = ObjectInfo::new(
                    version.key().unwrap_or_default(),
                    version.size().unwrap_or(0),
                );
                info.etag = version.e_tag().map(|t| t.trim_matches('"').to_string());
                info.storage_class = version.storage_class().map(|sc| sc.as_str().to_string());
                info.last_modified = version.last_modified().and_then(to_timestamp);
                info.version_id = version.version_id().map(|v| v.to_string());
                info.is_latest = version.is_latest();
                items.push(info);
            }

            if response.is_truncated().unwrap_or(false) {
                key_marker = response.next_key_marker().map(|s| s.to_string());
                version_id_marker = response.next_version_id_marker().map(|s| s.to_string());
            } else {
                break;
            }
        }

        Ok(items)
    }

    async fn upload_multipart(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
        total: u64,
        content_type: Option<&str>,
        observer: &dyn ProgressObserver,
    ) -> Result<u64> {
        let mut create = self.inner.create_multipart_upload().bucket(bucket).key(key);
        if let Some(ct) = content_type {
            create = create.content_type(ct);
        }
        let created = create
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| Error::General(format!("no upload id returned for '{key}'")))?
            .to_string();

        let result = self
            .upload_parts(bucket, key, src, total, &upload_id, observer)
            .await;

        if result.is_err() {
            // Abandoned parts would otherwise accumulate storage charges
            let _ = self
                .inner
                .abort_multipart_upload()
                .bucket(bucket)
                .key(key)
                .upload_id(&upload_id)
                .send()
                .await;
        }
        result
    }

    async fn upload_parts(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
        total: u64,
        upload_id: &str,
        observer: &dyn ProgressObserver,
    ) -> Result<u64> {
        let mut file = tokio::fs::File::open(src)
            .await
            .map_err(|e| Error::Filesystem(format!("failed to read '{}': {e}", src.display())))?;

        let mut completed = Vec::new();
        let mut transferred = 0u64;
        let mut part_number = 1i32;

        while transferred < total {
            let part_len = (total - transferred).min(PART_SIZE) as usize;
            let mut buf = vec![0u8; part_len];
            file.read_exact(&mut buf).await.map_err(|e| {
                Error::Filesystem(format!("failed to read '{}': {e}", src.display()))
            })?;

            let part = self
                .inner
                .upload_part()
                .bucket(bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(buf))
                .send()
                .await
                .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

            completed.push(
                CompletedPart::builder()
                    .part_number(part_number)
                    .set_e_tag(part.e_tag().map(str::to_string))
                    .build(),
            );

            transferred += part_len as u64;
            observer.update(transferred, total);
            part_number += 1;
        }

        self.inner
            .complete_multipart_upload()
            .bucket(bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

        Ok(transferred)
    }

    async fn stream_to_file(
        body: &mut ByteStream,
        file: &mut tokio::fs::File,
        key: &str,
        tmp: &Path,
        total: u64,
        observer: &dyn ProgressObserver,
    ) -> Result<u64> {
        let mut transferred = 0u64;

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| Error::Network(format!("download '{key}': {e}")))?
        {
            file.write_all(&chunk).await.map_err(|e| {
                Error::Filesystem(format!("failed to write '{}': {e}", tmp.display()))
            })?;
            transferred += chunk.len() as u64;
            observer.update(transferred, total.max(transferred));
        }

        file.flush()
            .await
            .map_err(|e| Error::Filesystem(format!("failed to write '{}': {e}", tmp.display())))?;

        Ok(transferred)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify_error("list buckets", &DisplayErrorContext(&e).to_string()))?;

        Ok(response
            .buckets()
            .iter()
            .map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_string(),
                creation_date: b.creation_date().and_then(to_timestamp),
            })
            .collect())
    }

    async fn bucket_versioning(&self, bucket: &str) -> Result<Option<String>> {
        let response = self
            .inner
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| classify_error(bucket, &DisplayErrorContext(&e).to_string()))?;

        Ok(response.status().map(|s| s.as_str().to_string()))
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        tracing::debug!(bucket, "checking if bucket exists");
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => match classify_error(bucket, &DisplayErrorContext(&e).to_string()) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn create_bucket(&self, bucket: &str, versioned: bool) -> Result<()> {
        let region = self.inner.config().region().map(|r| r.to_string());

        let mut request = self.inner.create_bucket().bucket(bucket);
        // us-east-1 rejects an explicit location constraint
        if let Some(region) = region.filter(|r| r != "us-east-1") {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| classify_error(bucket, &DisplayErrorContext(&e).to_string()))?;

        if versioned {
            tracing::debug!(bucket, "enabling versioning");
            self.inner
                .put_bucket_versioning()
                .bucket(bucket)
                .versioning_configuration(
                    VersioningConfiguration::builder()
                        .status(BucketVersioningStatus::Enabled)
                        .build(),
                )
                .send()
                .await
                .map_err(|e| classify_error(bucket, &DisplayErrorContext(&e).to_string()))?;
        }

        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                if message.contains("BucketNotEmpty") {
                    Error::General(format!("bucket '{bucket}' is not empty"))
                } else {
                    classify_error(bucket, &message)
                }
            })?;
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<Vec<ObjectInfo>> {
        if options.versions {
            self.list_objects_versions(bucket, options.prefix.as_deref(), options.limit)
                .await
        } else {
            self.list_current_objects(bucket, options.prefix.as_deref(), options.limit)
                .await
        }
    }

    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<ObjectMetadata> {
        let mut request = self.inner.head_object().bucket(bucket).key(key);
        if let Some(v) = version_id {
            request = request.version_id(v);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

        Ok(ObjectMetadata {
            key: key.to_string(),
            size_bytes: response.content_length().unwrap_or(0),
            content_type: response.content_type().map(|s| s.to_string()),
            etag: response.e_tag().map(|t| t.trim_matches('"').to_string()),
            last_modified: response.last_modified().and_then(to_timestamp),
            version_id: response.version_id().map(|s| s.to_string()),
            storage_class: response.storage_class().map(|sc| sc.as_str().to_string()),
            user_metadata: response.metadata().cloned().unwrap_or_default(),
        })
    }

    async fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<DeleteOutcome> {
        let mut request = self.inner.delete_object().bucket(bucket).key(key);
        if let Some(v) = version_id {
            request = request.version_id(v);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

        Ok(DeleteOutcome {
            delete_marker: response.delete_marker(),
            version_id: response.version_id().map(|s| s.to_string()),
        })
    }

    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64> {
        let metadata = tokio::fs::metadata(src)
            .await
            .map_err(|e| Error::Filesystem(format!("failed to read '{}': {e}", src.display())))?;
        let total = metadata.len();

        let content_type = mime_guess::from_path(src)
            .first()
            .map(|m| m.essence_str().to_string());

        tracing::debug!(file = %src.display(), key, total, "uploading file");

        if total > MULTIPART_THRESHOLD {
            return self
                .upload_multipart(bucket, key, src, total, content_type.as_deref(), observer)
                .await;
        }

        let data = tokio::fs::read(src)
            .await
            .map_err(|e| Error::Filesystem(format!("failed to read '{}': {e}", src.display())))?;

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data));
        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

        observer.update(total, total);
        Ok(total)
    }

    async fn download_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
        dest: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<u64> {
        // Size first, so progress has a total before the first chunk arrives
        let mut head = self.inner.head_object().bucket(bucket).key(key);
        if let Some(v) = version_id {
            head = head.version_id(v);
        }
        let head = head
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;
        let total = head.content_length().unwrap_or(0).max(0) as u64;

        tracing::debug!(key, dest = %dest.display(), total, "downloading object");

        let mut request = self.inner.get_object().bucket(bucket).key(key);
        if let Some(v) = version_id {
            request = request.version_id(v);
        }
        let mut response = request
            .send()
            .await
            .map_err(|e| classify_error(key, &DisplayErrorContext(&e).to_string()))?;

        // Stream into a temporary file and rename into place on success, so a
        // failed download never leaves a partial object at the destination.
        let tmp = partial_path(dest);
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| Error::Filesystem(format!("failed to write '{}': {e}", tmp.display())))?;

        let streamed =
            Self::stream_to_file(&mut response.body, &mut file, key, &tmp, total, observer).await;
        drop(file);

        let transferred = match streamed {
            Ok(n) => n,
            Err(e) => {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&tmp, dest).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(Error::Filesystem(format!(
                "failed to write '{}': {e}",
                dest.display()
            )));
        }

        Ok(transferred)
    }
}

/// Temporary download path next to the destination
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

/// Map an SDK error message onto the core error taxonomy
///
/// The SDK surfaces service errors as display text; matching on the error
/// code substrings mirrors how callers distinguish 404s from the rest.
fn classify_error(context: &str, message: &str) -> Error {
    if message.contains("NoSuchKey")
        || message.contains("NoSuchBucket")
        || message.contains("NotFound")
        || message.contains("404")
    {
        Error::NotFound(context.to_string())
    } else if message.contains("AccessDenied") || message.contains("403") {
        Error::AccessDenied(context.to_string())
    } else {
        Error::Network(format!("{context}: {message}"))
    }
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(dt.secs()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        assert!(matches!(
            classify_error("key", "service error: NoSuchKey"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            classify_error("bucket", "NoSuchBucket: the bucket does not exist"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            classify_error("key", "unhandled error (404)"),
            Error::NotFound(_)
        ));
    }

    #[test]
    fn test_classify_access_denied() {
        assert!(matches!(
            classify_error("key", "AccessDenied: no permission"),
            Error::AccessDenied(_)
        ));
    }

    #[test]
    fn test_classify_network_fallback() {
        assert!(matches!(
            classify_error("key", "connection reset by peer"),
            Error::Network(_)
        ));
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        let dest = Path::new("/tmp/dir/x.txt");
        assert_eq!(partial_path(dest), PathBuf::from("/tmp/dir/x.txt.part"));
    }

    #[test]
    fn test_part_size_meets_s3_minimum() {
        assert!(PART_SIZE >= 5 * 1024 * 1024);
        assert!(MULTIPART_THRESHOLD >= PART_SIZE);
    }
}
