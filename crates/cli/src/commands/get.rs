//! get command - Download one object
//!
//! Fetches one object's bytes into one local path. When the destination
//! is a directory the key's final segment names the file.

use std::path::PathBuf;

use clap::Args;
use bkt_core::{BucketPath, DownloadReceipt};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Download an object
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Source object (bucket/key)
    pub source: String,

    /// Local destination path (file or existing directory)
    pub dest: PathBuf,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    status: &'static str,
    #[serde(flatten)]
    receipt: DownloadReceipt,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let path = match BucketPath::parse_object(&args.source) {
        Ok(path) => path,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let store = match super::open_store(&formatter).await {
        Ok(store) => store,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&output_config, "downloading");
    let result = bkt_core::download_object(&store, &path.bucket, &path.key, &args.dest).await;
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            if formatter.is_json() {
                formatter.json(&GetOutput {
                    status: "success",
                    receipt,
                });
            } else {
                let name = receipt
                    .dest
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                formatter.row(
                    &name,
                    &receipt.size_bytes.to_string(),
                    &path.to_full_path(),
                );
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to download {path}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
