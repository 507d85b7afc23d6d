//! deleteobj command - Delete an object
//!
//! On a versioned bucket a plain delete creates a delete marker; the
//! response is shown so the distinction is visible.

use clap::Args;
use s3c_core::{ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete an object
#[derive(Args, Debug)]
pub struct DeleteObjArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Version to delete instead of the latest
    #[arg(long = "versionid")]
    pub version_id: Option<String>,
}

/// Execute the deleteobj command
pub async fn execute(
    args: DeleteObjArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let outcome = match client
        .delete_object(&args.bucket, &args.key, args.version_id.as_deref())
        .await
    {
        Ok(o) => o,
        Err(e) => {
            formatter.error(&format!(
                "Failed to delete '{}/{}': {e}",
                args.bucket, args.key
            ));
            return ExitCode::from_error(&e);
        }
    };

    formatter.success(&format!("Deleted '{}/{}'", args.bucket, args.key));
    if let Ok(json) = serde_json::to_string_pretty(&outcome) {
        formatter.println(&json);
    }
    ExitCode::Success
}
