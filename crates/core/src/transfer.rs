//! Upload/download transfer workflow
//!
//! A batch is the set of transfer requests derived from one upload or download
//! invocation. Items are processed sequentially in enumeration order; one
//! item's failure is recorded in its result and does not abort the rest.
//! Exactly one `TransferResult` is produced per enumerated item.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::path::{destination_path, ensure_parent_dirs, enumerate_files, object_key_for};
use crate::progress::{NoProgress, ProgressFactory, ProgressObserver};
use crate::store::{ListOptions, ObjectStore};

/// Direction of a single transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Upload,
    Download,
}

/// One unit of work in a batch, immutable once constructed
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Transfer direction
    pub direction: TransferDirection,

    /// Target bucket
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Local source (upload) or destination (download) path
    pub local_path: PathBuf,

    /// Whether an existing destination file may be replaced
    pub overwrite: bool,

    /// Whether progress updates should be emitted
    pub show_progress: bool,

    /// Object version to download (single-key downloads only)
    pub version_id: Option<String>,
}

/// Outcome of one transfer request
#[derive(Debug)]
pub enum TransferOutcome {
    /// Bytes were transferred successfully
    Success,

    /// The item required no transfer (e.g. a directory-marker key)
    Skipped,

    /// The transfer failed; the batch continues with the next item
    Failed(Error),
}

/// Result of one transfer request, produced exactly once per request
#[derive(Debug)]
pub struct TransferResult {
    /// The request this result belongs to
    pub request: TransferRequest,

    /// Wall-clock duration of the byte transfer itself
    ///
    /// Zero when the item failed before the transfer started.
    pub elapsed_seconds: f64,

    /// What happened
    pub outcome: TransferOutcome,
}

impl TransferResult {
    fn success(request: TransferRequest, elapsed_seconds: f64) -> Self {
        Self {
            request,
            elapsed_seconds,
            outcome: TransferOutcome::Success,
        }
    }

    fn skipped(request: TransferRequest) -> Self {
        Self {
            request,
            elapsed_seconds: 0.0,
            outcome: TransferOutcome::Skipped,
        }
    }

    fn failed(request: TransferRequest, elapsed_seconds: f64, error: Error) -> Self {
        Self {
            request,
            elapsed_seconds,
            outcome: TransferOutcome::Failed(error),
        }
    }

    /// Whether this item failed
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TransferOutcome::Failed(_))
    }
}

/// Whether every item in a batch completed without failure
pub fn batch_succeeded(results: &[TransferResult]) -> bool {
    results.iter().all(|r| !r.is_failed())
}

/// Decide whether a download may proceed against the destination path
///
/// Checked per item, immediately before the transfer, so concurrent external
/// modification of the destination directory is still observed correctly.
pub fn check_overwrite(local_path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && local_path.is_file() {
        return Err(Error::OverwriteConflict(local_path.display().to_string()));
    }
    Ok(())
}

/// Source of an upload batch
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// A single regular file
    File(PathBuf),

    /// All regular files under a directory, recursively
    Dir(PathBuf),
}

/// Selector for a download batch
#[derive(Debug, Clone)]
pub enum DownloadSelector {
    /// A single object key
    Key(String),

    /// All keys sharing a prefix
    Prefix(String),
}

/// Options applied to every item of an upload batch
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Prefix prepended verbatim to each derived key
    pub key_prefix: String,

    /// Preserve the local directory structure in object keys
    pub keep_dirs: bool,

    /// Emit progress updates
    pub show_progress: bool,
}

/// Options applied to every item of a download batch
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Local directory to place downloaded files under
    pub local_dir: PathBuf,

    /// Replace existing destination files
    pub overwrite: bool,

    /// Emit progress updates
    pub show_progress: bool,

    /// Object version to download (ignored for prefix downloads)
    pub version_id: Option<String>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            local_dir: PathBuf::from("."),
            overwrite: false,
            show_progress: false,
            version_id: None,
        }
    }
}

/// Executes transfers against a storage capability
///
/// Items run sequentially on the calling task; results are returned in the
/// same order the batch items were enumerated.
pub struct TransferExecutor<'a> {
    store: &'a dyn ObjectStore,
    progress: &'a dyn ProgressFactory,
}

impl<'a> TransferExecutor<'a> {
    /// Create an executor over a store and a progress factory
    pub fn new(store: &'a dyn ObjectStore, progress: &'a dyn ProgressFactory) -> Self {
        Self { store, progress }
    }

    /// Perform a single transfer and record its outcome
    pub async fn execute(&self, request: TransferRequest) -> TransferResult {
        match request.direction {
            TransferDirection::Upload => self.execute_upload(request).await,
            TransferDirection::Download => self.execute_download(request).await,
        }
    }

    async fn execute_upload(&self, request: TransferRequest) -> TransferResult {
        let observer = self.observer_for(&request);

        tracing::debug!(
            file = %request.local_path.display(),
            key = %request.key,
            "uploading file"
        );

        let started = Instant::now();
        let transfer = self
            .store
            .upload_file(
                &request.bucket,
                &request.key,
                &request.local_path,
                observer.as_ref(),
            )
            .await;
        let elapsed = started.elapsed().as_secs_f64();
        observer.finish();

        match transfer {
            Ok(_) => TransferResult::success(request, elapsed),
            Err(e) => TransferResult::failed(request, elapsed, e),
        }
    }

    async fn execute_download(&self, request: TransferRequest) -> TransferResult {
        // Guard and directory preparation run before the clock starts and
        // before any remote read.
        if let Err(e) = check_overwrite(&request.local_path, request.overwrite) {
            return TransferResult::failed(request, 0.0, e);
        }

        if let Err(e) = ensure_parent_dirs(&request.local_path) {
            return TransferResult::failed(request, 0.0, e);
        }

        let observer = self.observer_for(&request);

        tracing::debug!(
            key = %request.key,
            dest = %request.local_path.display(),
            "downloading object"
        );

        let started = Instant::now();
        let transfer = self
            .store
            .download_object(
                &request.bucket,
                &request.key,
                request.version_id.as_deref(),
                &request.local_path,
                observer.as_ref(),
            )
            .await;
        let elapsed = started.elapsed().as_secs_f64();
        observer.finish();

        match transfer {
            Ok(_) => TransferResult::success(request, elapsed),
            Err(e) => TransferResult::failed(request, elapsed, e),
        }
    }

    fn observer_for(&self, request: &TransferRequest) -> Box<dyn ProgressObserver> {
        if request.show_progress {
            self.progress.for_request(request)
        } else {
            Box::new(NoProgress)
        }
    }

    /// Upload a file or directory tree to a bucket
    ///
    /// Enumeration and key derivation happen up front; errors there are fatal
    /// and abort the invocation before any item-level work begins.
    pub async fn run_upload(
        &self,
        bucket: &str,
        source: &UploadSource,
        options: &UploadOptions,
    ) -> Result<Vec<TransferResult>> {
        let items: Vec<(PathBuf, String)> = match source {
            UploadSource::File(path) => {
                if !path.is_file() {
                    return Err(Error::Validation(format!(
                        "file '{}' does not exist or is not a regular file",
                        path.display()
                    )));
                }
                let key = object_key_for(path, &options.key_prefix, options.keep_dirs);
                vec![(path.clone(), key)]
            }
            UploadSource::Dir(dir) => {
                if !dir.is_dir() {
                    return Err(Error::Validation(format!(
                        "directory '{}' not found",
                        dir.display()
                    )));
                }
                enumerate_files(dir)?
                    .into_iter()
                    .map(|path| {
                        let relative = path.strip_prefix(dir).unwrap_or(&path).to_path_buf();
                        let key =
                            object_key_for(&relative, &options.key_prefix, options.keep_dirs);
                        (path, key)
                    })
                    .collect()
            }
        };

        let mut results = Vec::with_capacity(items.len());
        for (path, key) in items {
            let request = TransferRequest {
                direction: TransferDirection::Upload,
                bucket: bucket.to_string(),
                key,
                local_path: path,
                overwrite: false,
                show_progress: options.show_progress,
                version_id: None,
            };
            results.push(self.run_item(request).await);
        }
        Ok(results)
    }

    /// Download a single key or every key under a prefix from a bucket
    pub async fn run_download(
        &self,
        bucket: &str,
        selector: &DownloadSelector,
        options: &DownloadOptions,
    ) -> Result<Vec<TransferResult>> {
        if !options.local_dir.is_dir() {
            return Err(Error::Validation(format!(
                "local path '{}' is not a valid directory",
                options.local_dir.display()
            )));
        }

        let (keys, version_id) = match selector {
            DownloadSelector::Key(key) => {
                if key.is_empty() {
                    return Err(Error::Validation("object key cannot be empty".into()));
                }
                (vec![key.clone()], options.version_id.clone())
            }
            DownloadSelector::Prefix(prefix) => {
                let listed = self
                    .store
                    .list_objects(
                        bucket,
                        ListOptions {
                            prefix: Some(prefix.clone()),
                            ..Default::default()
                        },
                    )
                    .await?;
                (listed.into_iter().map(|o| o.key).collect(), None)
            }
        };

        let mut results = Vec::with_capacity(keys.len());
        for key in keys {
            let base = TransferRequest {
                direction: TransferDirection::Download,
                bucket: bucket.to_string(),
                key: key.clone(),
                local_path: options.local_dir.join(&key),
                overwrite: options.overwrite,
                show_progress: options.show_progress,
                version_id: version_id.clone(),
            };

            // Directory markers carry no data worth writing locally
            if key.ends_with('/') {
                tracing::debug!(key = %key, "skipping directory marker");
                results.push(TransferResult::skipped(base));
                continue;
            }

            let result = match destination_path(&options.local_dir, &key) {
                Ok(dest) => {
                    self.run_item(TransferRequest {
                        local_path: dest,
                        ..base
                    })
                    .await
                }
                Err(e) => TransferResult::failed(base, 0.0, e),
            };
            results.push(result);
        }
        Ok(results)
    }

    async fn run_item(&self, request: TransferRequest) -> TransferResult {
        let result = self.execute(request).await;
        if let TransferOutcome::Failed(e) = &result.outcome {
            tracing::error!(
                key = %result.request.key,
                path = %result.request.local_path.display(),
                "transfer failed: {e}"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BucketInfo, DeleteOutcome, ObjectInfo, ObjectMetadata};
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory single-bucket store for driving the executor
    #[derive(Default)]
    struct FakeStore {
        remote: Mutex<BTreeMap<String, Vec<u8>>>,
        upload_order: Mutex<Vec<String>>,
        fail_keys: HashSet<String>,
        remote_reads: AtomicUsize,
    }

    impl FakeStore {
        fn with_objects(objects: &[(&str, &[u8])]) -> Self {
            let store = Self::default();
            {
                let mut remote = store.remote.lock().unwrap();
                for (key, data) in objects {
                    remote.insert(key.to_string(), data.to_vec());
                }
            }
            store
        }
    }

    #[async_trait]
    impl ObjectStore for FakeStore {
        async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
            Ok(vec![])
        }

        async fn bucket_versioning(&self, _bucket: &str) -> Result<Option<String>> {
            Ok(None)
        }

        async fn bucket_exists(&self, _bucket: &str) -> Result<bool> {
            Ok(true)
        }

        async fn create_bucket(&self, _bucket: &str, _versioned: bool) -> Result<()> {
            Ok(())
        }

        async fn delete_bucket(&self, _bucket: &str) -> Result<()> {
            Ok(())
        }

        async fn list_objects(
            &self,
            _bucket: &str,
            options: ListOptions,
        ) -> Result<Vec<ObjectInfo>> {
            let prefix = options.prefix.unwrap_or_default();
            let remote = self.remote.lock().unwrap();
            Ok(remote
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(key, data)| ObjectInfo::new(key.clone(), data.len() as i64))
                .collect())
        }

        async fn head_object(
            &self,
            _bucket: &str,
            key: &str,
            _version_id: Option<&str>,
        ) -> Result<ObjectMetadata> {
            let remote = self.remote.lock().unwrap();
            let data = remote
                .get(key)
                .ok_or_else(|| Error::NotFound(key.to_string()))?;
            Ok(ObjectMetadata {
                key: key.to_string(),
                size_bytes: data.len() as i64,
                content_type: None,
                etag: None,
                last_modified: None,
                version_id: None,
                storage_class: None,
                user_metadata: Default::default(),
            })
        }

        async fn delete_object(
            &self,
            _bucket: &str,
            key: &str,
            _version_id: Option<&str>,
        ) -> Result<DeleteOutcome> {
            self.remote.lock().unwrap().remove(key);
            Ok(DeleteOutcome {
                delete_marker: None,
                version_id: None,
            })
        }

        async fn upload_file(
            &self,
            _bucket: &str,
            key: &str,
            src: &Path,
            observer: &dyn ProgressObserver,
        ) -> Result<u64> {
            if self.fail_keys.contains(key) {
                return Err(Error::Network(format!("injected failure for '{key}'")));
            }
            let data = std::fs::read(src)
                .map_err(|e| Error::Filesystem(format!("failed to read '{}': {e}", src.display())))?;
            let len = data.len() as u64;
            observer.update(len, len);
            self.remote.lock().unwrap().insert(key.to_string(), data);
            self.upload_order.lock().unwrap().push(key.to_string());
            Ok(len)
        }

        async fn download_object(
            &self,
            _bucket: &str,
            key: &str,
            _version_id: Option<&str>,
            dest: &Path,
            observer: &dyn ProgressObserver,
        ) -> Result<u64> {
            self.remote_reads.fetch_add(1, Ordering::SeqCst);
            if self.fail_keys.contains(key) {
                return Err(Error::Network(format!("injected failure for '{key}'")));
            }
            let remote = self.remote.lock().unwrap();
            let data = remote
                .get(key)
                .ok_or_else(|| Error::NotFound(key.to_string()))?;
            std::fs::write(dest, data)?;
            let len = data.len() as u64;
            observer.update(len, len);
            Ok(len)
        }
    }

    #[test]
    fn test_check_overwrite_truth_table() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("existing.txt");
        std::fs::write(&existing, b"data").unwrap();
        let missing = dir.path().join("missing.txt");

        assert!(matches!(
            check_overwrite(&existing, false),
            Err(Error::OverwriteConflict(_))
        ));
        assert!(check_overwrite(&existing, true).is_ok());
        assert!(check_overwrite(&missing, false).is_ok());
        assert!(check_overwrite(&missing, true).is_ok());
    }

    #[test]
    fn test_overwrite_reject_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("report.csv");
        std::fs::write(&existing, b"data").unwrap();

        let err = check_overwrite(&existing, false).unwrap_err();
        assert!(err.to_string().contains("report.csv"));
    }

    #[tokio::test]
    async fn test_upload_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("report.csv");
        std::fs::write(&file, b"a,b,c").unwrap();

        let store = FakeStore::default();
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_upload(
                "my-bucket",
                &UploadSource::File(file.clone()),
                &UploadOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(matches!(result.outcome, TransferOutcome::Success));
        assert_eq!(result.request.direction, TransferDirection::Upload);
        assert_eq!(result.request.bucket, "my-bucket");
        assert_eq!(result.request.key, "report.csv");
        assert_eq!(result.request.local_path, file);
        assert!(store.remote.lock().unwrap().contains_key("report.csv"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_fatal() {
        let store = FakeStore::default();
        let executor = TransferExecutor::new(&store, &NoProgress);
        let err = executor
            .run_upload(
                "my-bucket",
                &UploadSource::File(PathBuf::from("/nonexistent-s3c/report.csv")),
                &UploadOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_upload_directory_derives_relative_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("sub").join("b.txt"), b"b").unwrap();

        let store = FakeStore::default();
        let executor = TransferExecutor::new(&store, &NoProgress);
        let options = UploadOptions {
            key_prefix: "backup/".into(),
            keep_dirs: true,
            show_progress: false,
        };
        let results = executor
            .run_upload("my-bucket", &UploadSource::Dir(dir.path().to_path_buf()), &options)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].request.key, "backup/a.txt");
        assert_eq!(results[1].request.key, "backup/sub/b.txt");
        assert!(batch_succeeded(&results));

        // Re-running derives the same key set
        let again = executor
            .run_upload("my-bucket", &UploadSource::Dir(dir.path().to_path_buf()), &options)
            .await
            .unwrap();
        let keys: Vec<_> = results.iter().map(|r| r.request.key.clone()).collect();
        let keys_again: Vec<_> = again.iter().map(|r| r.request.key.clone()).collect();
        assert_eq!(keys, keys_again);
    }

    #[tokio::test]
    async fn test_upload_failure_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("c.txt"), b"c").unwrap();

        let mut store = FakeStore::default();
        store.fail_keys.insert("b.txt".into());
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_upload(
                "my-bucket",
                &UploadSource::Dir(dir.path().to_path_buf()),
                &UploadOptions {
                    keep_dirs: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(matches!(results[0].outcome, TransferOutcome::Success));
        assert!(results[1].is_failed());
        assert!(matches!(results[2].outcome, TransferOutcome::Success));
        assert!(!batch_succeeded(&results));
    }

    #[tokio::test]
    async fn test_download_overwrite_conflict_before_network_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dir")).unwrap();
        std::fs::write(dir.path().join("dir").join("x.txt"), b"old").unwrap();

        let store = FakeStore::with_objects(&[("dir/x.txt", b"new")]);
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Key("dir/x.txt".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    overwrite: false,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            TransferOutcome::Failed(Error::OverwriteConflict(_))
        ));
        assert_eq!(results[0].elapsed_seconds, 0.0);
        assert_eq!(store.remote_reads.load(Ordering::SeqCst), 0);
        // The existing file is untouched
        assert_eq!(
            std::fs::read(dir.path().join("dir").join("x.txt")).unwrap(),
            b"old"
        );
    }

    #[tokio::test]
    async fn test_download_with_overwrite_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.txt"), b"old").unwrap();

        let store = FakeStore::with_objects(&[("x.txt", b"new")]);
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Key("x.txt".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    overwrite: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(batch_succeeded(&results));
        assert_eq!(std::fs::read(dir.path().join("x.txt")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_download_prefix_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FakeStore::with_objects(&[("logs/a", b"1"), ("logs/b", b"2")]);
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Prefix("logs/".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].request.key, "logs/a");
        assert_eq!(results[1].request.key, "logs/b");
        assert!(batch_succeeded(&results));
        assert!(dir.path().join("logs").join("a").is_file());
        assert!(dir.path().join("logs").join("b").is_file());
    }

    #[tokio::test]
    async fn test_download_prefix_skips_directory_markers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FakeStore::with_objects(&[("logs/", b""), ("logs/a", b"1")]);
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Prefix("logs/".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0].outcome, TransferOutcome::Skipped));
        assert!(matches!(results[1].outcome, TransferOutcome::Success));
        assert!(batch_succeeded(&results));
    }

    #[tokio::test]
    async fn test_download_rejects_traversal_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FakeStore::with_objects(&[("../escape.txt", b"x")]);
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Key("../escape.txt".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            TransferOutcome::Failed(Error::InvalidKey(_))
        ));
        assert_eq!(store.remote_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_download_missing_object_recorded_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = FakeStore::default();
        let executor = TransferExecutor::new(&store, &NoProgress);
        let results = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Key("missing.txt".into()),
                &DownloadOptions {
                    local_dir: dir.path().to_path_buf(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            TransferOutcome::Failed(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_download_invalid_local_dir_is_fatal() {
        let store = FakeStore::default();
        let executor = TransferExecutor::new(&store, &NoProgress);
        let err = executor
            .run_download(
                "my-bucket",
                &DownloadSelector::Key("x.txt".into()),
                &DownloadOptions {
                    local_dir: PathBuf::from("/nonexistent-s3c-dir"),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
