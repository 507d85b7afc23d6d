//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Each command module exposes an `execute` function that returns an exit
//! code; fatal connection or argument errors are reported there.

use clap::{Parser, Subcommand};

use s3c_core::{
    batch_succeeded, StorageConfig, TransferDirection, TransferOutcome, TransferResult,
};
use s3c_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod createbucket;
mod deletebucket;
mod deleteobj;
mod download;
mod listbuckets;
mod listobj;
mod metadataobj;
mod upload;

/// s3c - S3 object storage CLI
///
/// A command-line client for S3-compatible object storage services.
/// Supports AWS S3, MinIO, and other S3-compatible backends.
#[derive(Parser, Debug)]
#[command(name = "s3c")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Custom S3-compatible endpoint URL
    #[arg(long, global = true, env = "S3C_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Region name
    #[arg(long, global = true, env = "S3C_REGION")]
    pub region: Option<String>,

    /// Named credentials profile
    #[arg(long, global = true, env = "S3C_PROFILE")]
    pub profile: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all buckets with creation date and versioning status
    #[command(name = "listbuckets")]
    ListBuckets(listbuckets::ListBucketsArgs),

    /// List objects in a bucket
    #[command(name = "listobj")]
    ListObj(listobj::ListObjArgs),

    /// Show object metadata
    #[command(name = "metadataobj")]
    MetadataObj(metadataobj::MetadataObjArgs),

    /// Delete an object
    #[command(name = "deleteobj")]
    DeleteObj(deleteobj::DeleteObjArgs),

    /// Create a bucket
    #[command(name = "createbucket")]
    CreateBucket(createbucket::CreateBucketArgs),

    /// Delete an empty bucket
    #[command(name = "deletebucket")]
    DeleteBucket(deletebucket::DeleteBucketArgs),

    /// Upload a file or directory to a bucket
    Upload(upload::UploadArgs),

    /// Download an object or prefix from a bucket
    Download(download::DownloadArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        no_color: cli.no_color,
    };
    let storage_config = StorageConfig::new(cli.endpoint, cli.region, cli.profile);

    match cli.command {
        Commands::ListBuckets(args) => {
            listbuckets::execute(args, storage_config, output_config).await
        }
        Commands::ListObj(args) => listobj::execute(args, storage_config, output_config).await,
        Commands::MetadataObj(args) => {
            metadataobj::execute(args, storage_config, output_config).await
        }
        Commands::DeleteObj(args) => deleteobj::execute(args, storage_config, output_config).await,
        Commands::CreateBucket(args) => {
            createbucket::execute(args, storage_config, output_config).await
        }
        Commands::DeleteBucket(args) => {
            deletebucket::execute(args, storage_config, output_config).await
        }
        Commands::Upload(args) => upload::execute(args, storage_config, output_config).await,
        Commands::Download(args) => download::execute(args, storage_config, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Build the S3 client, reporting connection failures on the formatter
pub(crate) async fn connect(
    config: &StorageConfig,
    formatter: &Formatter,
) -> Result<S3Client, ExitCode> {
    match S3Client::new(config).await {
        Ok(client) => Ok(client),
        Err(e) => {
            formatter.error(&format!("Failed to create client: {e}"));
            Err(ExitCode::from_error(&e))
        }
    }
}

/// Print per-item transfer results and derive the batch exit code
///
/// Failures were already logged when they happened; this is the end-of-batch
/// report. The exit code of the first failed item wins.
pub(crate) fn report_results(formatter: &Formatter, results: &[TransferResult]) -> ExitCode {
    let mut exit_code = ExitCode::Success;

    for result in results {
        let what = match result.request.direction {
            TransferDirection::Upload => format!(
                "Upload of '{}' to '{}/{}'",
                result.request.local_path.display(),
                result.request.bucket,
                result.request.key
            ),
            TransferDirection::Download => format!(
                "Download of '{}/{}' to '{}'",
                result.request.bucket,
                result.request.key,
                result.request.local_path.display()
            ),
        };

        match &result.outcome {
            TransferOutcome::Success => {
                formatter.success(&format!("{what} completed successfully"));
                formatter.elapsed(result.elapsed_seconds);
            }
            TransferOutcome::Skipped => {
                formatter.println(&format!(
                    "  - Skipped directory marker '{}'",
                    result.request.key
                ));
            }
            TransferOutcome::Failed(e) => {
                formatter.error(&format!("{what} failed: {e}"));
                if exit_code == ExitCode::Success {
                    exit_code = ExitCode::from_error(e);
                }
            }
        }
    }

    if !batch_succeeded(results) {
        let failed = results.iter().filter(|r| r.is_failed()).count();
        formatter.warning(&format!(
            "{failed} of {} transfers failed",
            results.len()
        ));
    }

    exit_code
}
