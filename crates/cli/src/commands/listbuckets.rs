//! listbuckets command - List all buckets
//!
//! Shows each bucket with its creation date and versioning status.

use clap::Args;
use s3c_core::{ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List all buckets
#[derive(Args, Debug)]
pub struct ListBucketsArgs {}

/// Execute the listbuckets command
pub async fn execute(
    _args: ListBucketsArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let buckets = match client.list_buckets().await {
        Ok(b) => b,
        Err(e) => {
            formatter.error(&format!("Failed to list buckets: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    for bucket in &buckets {
        let created = bucket
            .creation_date
            .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let versioning = match client.bucket_versioning(&bucket.name).await {
            Ok(Some(status)) => status,
            Ok(None) => "Disabled".to_string(),
            Err(e) => {
                formatter.warning(&format!(
                    "Failed to read versioning for '{}': {e}",
                    bucket.name
                ));
                "unknown".to_string()
            }
        };

        formatter.println(&format!(
            "{}  created: {created}  versioning: {versioning}",
            bucket.name
        ));
    }

    formatter.println(&format!("\nTotal: {} buckets", buckets.len()));
    ExitCode::Success
}
