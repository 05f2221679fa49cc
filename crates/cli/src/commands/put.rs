//! put command - Upload local files matching a glob
//!
//! Expands a local filesystem glob and uploads each matching file to a
//! key equal to its base filename under the destination prefix. Local
//! directory structure is discarded. Per-file failures are reported and
//! the batch continues.

use clap::Args;
use bkt_core::{BucketPath, ItemStatus, UploadOptions, UploadOutcome};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Upload files
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Destination (bucket[/prefix])
    pub path: String,

    /// Local filesystem glob selecting the files to upload
    pub local_pattern: String,

    /// Only show what would be uploaded
    #[arg(long)]
    pub dry_run: bool,

    /// Content type for uploaded files (guessed from the name when unset)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    uploaded: usize,
    failed: usize,
    outcomes: Vec<UploadOutcome>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let path = match BucketPath::parse(&args.path) {
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

    let opts = UploadOptions {
        key_prefix: path.key.clone(),
        content_type: args.content_type.clone(),
        dry_run: args.dry_run,
    };

    let spinner = ProgressBar::spinner(&output_config, "uploading");
    let result = bkt_core::upload_matching(&store, &path.bucket, &args.local_pattern, &opts).await;
    spinner.finish_and_clear();

    let outcomes = match result {
        Ok(outcomes) => outcomes,
        Err(e) => {
            formatter.error(&format!("Upload failed: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    if outcomes.is_empty() {
        formatter.warning(&format!("No files match pattern: {}", args.local_pattern));
    }

    let failed = outcomes.iter().filter(|o| o.status.is_failed()).count();
    let uploaded = outcomes.len() - failed;

    if formatter.is_json() {
        let output = PutOutput {
            status: if failed > 0 { "partial" } else { "success" },
            uploaded,
            failed,
            outcomes,
        };
        formatter.json(&output);
    } else {
        for outcome in &outcomes {
            let name = outcome
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| outcome.source.display().to_string());
            let status = match &outcome.status {
                ItemStatus::Done => outcome.size_bytes.to_string(),
                ItemStatus::DryRun => "dry-run".to_string(),
                ItemStatus::Failed(_) => "failed".to_string(),
            };
            formatter.row(&name, &status, &format!("{}/{}", path.bucket, outcome.key));

            if let ItemStatus::Failed(reason) = &outcome.status {
                formatter.error(&format!("{name}: {reason}"));
            }
        }
    }

    if failed > 0 {
        formatter.warning(&format!(
            "Completed with errors: {uploaded} uploaded, {failed} failed"
        ));
        ExitCode::GeneralError
    } else {
        if uploaded > 0 && !args.dry_run {
            formatter.success(&format!("Uploaded {uploaded} file(s)."));
        }
        ExitCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PutArgs,
    }

    #[test]
    fn test_put_args() {
        let cli = TestCli::parse_from(["put", "data/incoming", "./logs/*.txt"]);
        assert_eq!(cli.args.path, "data/incoming");
        assert_eq!(cli.args.local_pattern, "./logs/*.txt");
        assert!(!cli.args.dry_run);
    }

    #[test]
    fn test_put_args_dry_run_and_content_type() {
        let cli = TestCli::parse_from([
            "put",
            "data",
            "*.csv",
            "--dry-run",
            "--content-type",
            "text/csv",
        ]);
        assert!(cli.args.dry_run);
        assert_eq!(cli.args.content_type.as_deref(), Some("text/csv"));
    }
}
