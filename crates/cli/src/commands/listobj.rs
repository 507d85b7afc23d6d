//! listobj command - List objects in a bucket

use clap::Args;
use s3c_core::{ListOptions, ObjectStore as _, StorageConfig};

use crate::commands::connect;
use crate::exit_code::ExitCode;
use crate::output::{render_objects, Formatter, OutputConfig};

/// List objects in a bucket
#[derive(Args, Debug)]
pub struct ListObjArgs {
    /// Bucket name
    pub bucket: String,

    /// Only list keys starting with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Maximum number of entries to list
    #[arg(long)]
    pub limit: Option<usize>,

    /// List all object versions instead of current objects
    #[arg(long)]
    pub versions: bool,

    /// Render the listing as a table
    #[arg(long)]
    pub table: bool,
}

/// Execute the listobj command
pub async fn execute(
    args: ListObjArgs,
    config: StorageConfig,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(&config, &formatter).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let options = ListOptions {
        prefix: args.prefix.clone(),
        limit: args.limit,
        versions: args.versions,
    };

    let items = match client.list_objects(&args.bucket, options).await {
        Ok(items) => items,
        Err(e) => {
            formatter.error(&format!(
                "Failed to list objects in '{}': {e}",
                args.bucket
            ));
            return ExitCode::from_error(&e);
        }
    };

    if args.table {
        formatter.println(&render_objects(&items, args.versions).to_string());
    } else {
        for item in &items {
            let date = item
                .last_modified
                .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "                   ".to_string());

            if args.versions {
                let version = item.version_id.as_deref().unwrap_or("-");
                let latest = if item.is_latest == Some(true) { "*" } else { " " };
                formatter.println(&format!(
                    "[{date}] {:>10} {latest} {version} {}",
                    item.size_human, item.key
                ));
            } else {
                formatter.println(&format!("[{date}] {:>10} {}", item.size_human, item.key));
            }
        }
    }

    let total_size: i64 = items.iter().map(|i| i.size_bytes).sum();
    formatter.println(&format!(
        "\nTotal: {} objects, {}",
        items.len(),
        humansize::format_size(total_size.max(0) as u64, humansize::BINARY)
    ));

    ExitCode::Success
}
