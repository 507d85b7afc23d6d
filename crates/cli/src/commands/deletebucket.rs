//! deletebucket command - Delete an empty bucket
//!
//! Deletion is destructive, so the bucket name must be typed back to confirm.

use std::io::{BufRead, Write};

use clap::Args;
use s3c_core::{ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Delete an empty bucket
#[derive(Args, Debug)]
pub struct DeleteBucketArgs {
    /// Bucket name
    pub bucket: String,

    /// Skip the interactive confirmation
    #[arg(long)]
    pub yes: bool,
}

/// Execute the deletebucket command
pub async fn execute(
    args: DeleteBucketArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if !args.yes {
        formatter.warning(&format!(
            "This permanently deletes bucket '{}'",
            args.bucket
        ));
        match confirm_bucket_name(&args.bucket) {
            Ok(true) => {}
            Ok(false) => {
                formatter.println("Aborted");
                return ExitCode::Interrupted;
            }
            Err(e) => {
                formatter.error(&format!("Failed to read confirmation: {e}"));
                return ExitCode::GeneralError;
            }
        }
    }

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = client.delete_bucket(&args.bucket).await {
        formatter.error(&format!("Failed to delete bucket '{}': {e}", args.bucket));
        return ExitCode::from_error(&e);
    }

    formatter.success(&format!("Deleted bucket '{}'", args.bucket));
    ExitCode::Success
}

/// Prompt for the bucket name and compare against the expected one
fn confirm_bucket_name(expected: &str) -> std::io::Result<bool> {
    print!("Type the bucket name to confirm deletion: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim() == expected)
}
