//! download command - Download an object or prefix from a bucket

use std::path::PathBuf;

use clap::Args;
use s3c_core::{DownloadOptions, DownloadSelector, StorageConfig, TransferExecutor};

use crate::commands::{connect, report_results};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, TransferBars};

/// Download an object or prefix from a bucket
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("selector").required(true))]
pub struct DownloadArgs {
    /// Bucket name
    pub bucket: String,

    /// Download a single object key
    #[arg(long, group = "selector")]
    pub file: Option<String>,

    /// Download every object under a prefix
    #[arg(long, group = "selector")]
    pub prefix: Option<String>,

    /// Local directory to place downloaded files under
    #[arg(long, default_value = ".")]
    pub localdir: PathBuf,

    /// Replace existing destination files
    #[arg(long)]
    pub overwrite: bool,

    /// Version to download instead of the latest (single key only)
    #[arg(long = "versionid", requires = "file")]
    pub version_id: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub nopbar: bool,
}

/// Execute the download command
pub async fn execute(
    args: DownloadArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let selector = match (&args.file, &args.prefix) {
        (Some(key), None) => DownloadSelector::Key(key.clone()),
        (None, Some(prefix)) => DownloadSelector::Prefix(prefix.clone()),
        _ => {
            // clap's arg group enforces exactly one
            formatter.error("Specify exactly one of --file or --prefix");
            return ExitCode::UsageError;
        }
    };

    let options = DownloadOptions {
        local_dir: args.localdir.clone(),
        overwrite: args.overwrite,
        show_progress: !args.nopbar,
        version_id: args.version_id.clone(),
    };

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let bars = TransferBars;
    let executor = TransferExecutor::new(&client, &bars);

    match executor
        .run_download(&args.bucket, &selector, &options)
        .await
    {
        Ok(results) => report_results(&formatter, &results),
        Err(e) => {
            formatter.error(&format!("Download failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
