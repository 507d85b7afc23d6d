//! metadataobj command - Show object metadata

use clap::Args;
use s3c_core::{ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show object metadata
#[derive(Args, Debug)]
pub struct MetadataObjArgs {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Version to inspect instead of the latest
    #[arg(long = "versionid")]
    pub version_id: Option<String>,
}

/// Execute the metadataobj command
pub async fn execute(
    args: MetadataObjArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let metadata = match client
        .head_object(&args.bucket, &args.key, args.version_id.as_deref())
        .await
    {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!(
                "Failed to read metadata for '{}/{}': {e}",
                args.bucket, args.key
            ));
            return ExitCode::from_error(&e);
        }
    };

    match serde_json::to_string_pretty(&metadata) {
        Ok(json) => {
            formatter.println(&json);
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to render metadata: {e}"));
            ExitCode::GeneralError
        }
    }
}
