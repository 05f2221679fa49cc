//! rm command - Remove objects matching a glob
//!
//! Enumerates keys the same way ls does, then issues one delete per
//! selected key. A failing key is reported and the batch continues.

use clap::Args;
use bkt_core::{BucketPath, DeleteOutcome, ItemStatus, KeyFilter};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Remote path (bucket[/prefix])
    pub path: String,

    /// Glob selecting the key names to remove (*, ?, [...])
    pub pattern: String,

    /// Remove recursively instead of only direct children of the prefix
    #[arg(short, long)]
    pub recursive: bool,

    /// Match the pattern case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Only show what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    deleted: usize,
    failed: usize,
    outcomes: Vec<DeleteOutcome>,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let path = match BucketPath::parse(&args.path) {
        Ok(path) => path,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::UsageError;
        }
    };

    let filter = KeyFilter::new(
        &path.key,
        Some(&args.pattern),
        !args.ignore_case,
        args.recursive,
    );

    let store = match super::open_store(&formatter).await {
        Ok(store) => store,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&output_config, "removing");
    let result = bkt_core::delete_matching(&store, &path.bucket, &filter, args.dry_run).await;
    spinner.finish_and_clear();

    let outcomes = match result {
        Ok(outcomes) => outcomes,
        Err(e) => {
            formatter.error(&format!("Failed to remove objects: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    if outcomes.is_empty() {
        formatter.warning(&format!(
            "No objects match pattern '{}' under {}",
            args.pattern,
            path.to_full_path()
        ));
    }

    let failed = outcomes.iter().filter(|o| o.status.is_failed()).count();
    let deleted = outcomes.len() - failed;

    if formatter.is_json() {
        let output = RmOutput {
            status: if failed > 0 { "partial" } else { "success" },
            deleted,
            failed,
            outcomes,
        };
        formatter.json(&output);
    } else {
        for outcome in &outcomes {
            let name = outcome
                .key
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(&outcome.key);
            let status = match &outcome.status {
                ItemStatus::Done => "deleted",
                ItemStatus::DryRun => "dry-run",
                ItemStatus::Failed(_) => "failed",
            };
            formatter.row(name, status, &format!("{}/{}", path.bucket, outcome.key));

            if let ItemStatus::Failed(reason) = &outcome.status {
                formatter.error(&format!("{}: {reason}", outcome.key));
            }
        }
    }

    if failed > 0 {
        formatter.warning(&format!(
            "Completed with errors: {deleted} removed, {failed} failed"
        ));
        ExitCode::GeneralError
    } else {
        if deleted > 0 && !args.dry_run {
            formatter.success(&format!("Removed {deleted} object(s)."));
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
        args: RmArgs,
    }

    #[test]
    fn test_rm_args() {
        let cli = TestCli::parse_from(["rm", "data/logs", "*.txt"]);
        assert_eq!(cli.args.path, "data/logs");
        assert_eq!(cli.args.pattern, "*.txt");
        assert!(!cli.args.dry_run);
        assert!(!cli.args.recursive);
    }

    #[test]
    fn test_rm_args_flags() {
        let cli = TestCli::parse_from(["rm", "data", "*", "-r", "--dry-run", "--ignore-case"]);
        assert!(cli.args.recursive);
        assert!(cli.args.dry_run);
        assert!(cli.args.ignore_case);
    }
}
