//! createbucket command - Create a bucket

use clap::Args;
use s3c_core::{ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a bucket
#[derive(Args, Debug)]
pub struct CreateBucketArgs {
    /// Bucket name
    pub bucket: String,

    /// Enable versioning on the new bucket
    #[arg(long)]
    pub versioned: bool,
}

/// Execute the createbucket command
pub async fn execute(
    args: CreateBucketArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.bucket_exists(&args.bucket).await {
        Ok(true) => {
            formatter.error(&format!("Bucket '{}' already exists", args.bucket));
            return ExitCode::Conflict;
        }
        Ok(false) => {}
        Err(e) => {
            formatter.error(&format!("Failed to check bucket '{}': {e}", args.bucket));
            return ExitCode::from_error(&e);
        }
    }

    if let Err(e) = client.create_bucket(&args.bucket, args.versioned).await {
        formatter.error(&format!("Failed to create bucket '{}': {e}", args.bucket));
        return ExitCode::from_error(&e);
    }

    if args.versioned {
        formatter.success(&format!("Created versioned bucket '{}'", args.bucket));
    } else {
        formatter.success(&format!("Created bucket '{}'", args.bucket));
    }
    ExitCode::Success
}
