//! upload command - Upload a file or directory to a bucket

use std::path::PathBuf;

use clap::Args;
use s3c_core::{StorageConfig, TransferExecutor, UploadOptions, UploadSource};

use crate::commands::{connect, report_results};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, TransferBars};

/// Upload a file or directory to a bucket
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("source").required(true))]
pub struct UploadArgs {
    /// Bucket name
    pub bucket: String,

    /// Upload a single file
    #[arg(long, group = "source")]
    pub file: Option<PathBuf>,

    /// Upload every file under a directory, recursively
    #[arg(long, group = "source")]
    pub dir: Option<PathBuf>,

    /// Prefix prepended verbatim to each object key
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Flatten keys to file names instead of preserving directory structure
    #[arg(long)]
    pub nokeepdir: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub nopbar: bool,
}

/// Execute the upload command
pub async fn execute(
    args: UploadArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let source = match (&args.file, &args.dir) {
        (Some(file), None) => UploadSource::File(file.clone()),
        (None, Some(dir)) => UploadSource::Dir(dir.clone()),
        _ => {
            // clap's arg group enforces exactly one
            formatter.error("Specify exactly one of --file or --dir");
            return ExitCode::UsageError;
        }
    };

    let options = UploadOptions {
        key_prefix: args.prefix.clone(),
        keep_dirs: !args.nokeepdir,
        show_progress: !args.nopbar,
    };

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let bars = TransferBars;
    let executor = TransferExecutor::new(&client, &bars);

    match executor.run_upload(&args.bucket, &source, &options).await {
        Ok(results) => report_results(&formatter, &results),
        Err(e) => {
            formatter.error(&format!("Upload failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
