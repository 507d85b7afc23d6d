//! s3c-core: Core library for the s3c object storage CLI
//!
//! This crate provides the core functionality for the s3c CLI, including:
//! - Storage connection configuration
//! - The ObjectStore trait for S3-compatible operations
//! - Local path resolution and object key derivation
//! - The upload/download transfer workflow (guard, executor, batch driver)
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod path;
pub mod progress;
pub mod store;
pub mod transfer;

pub use config::StorageConfig;
pub use error::{Error, Result};
pub use path::{destination_path, enumerate_files, object_key_for, resolve_local_path};
pub use progress::{NoProgress, ProgressFactory, ProgressObserver};
pub use store::{
    BucketInfo, DeleteOutcome, ListOptions, ObjectInfo, ObjectMetadata, ObjectStore,
};
pub use transfer::{
    batch_succeeded, check_overwrite, DownloadOptions, DownloadSelector, TransferDirection,
    TransferExecutor, TransferOutcome, TransferRequest, TransferResult, UploadOptions,
    UploadSource,
};
