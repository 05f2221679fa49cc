//! ls command - List objects in a bucket
//!
//! Enumerates the bucket (or a prefix within it) and renders one row per
//! object, optionally filtered by a UNIX shell glob over key names.

use clap::Args;
use bkt_core::{BucketPath, KeyFilter, ObjectSummary};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// List objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote path (bucket[/prefix])
    pub path: String,

    /// Only show keys whose name matches this glob (*, ?, [...])
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// List recursively instead of only direct children of the prefix
    #[arg(short, long)]
    pub recursive: bool,

    /// Match the pattern case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Append object and size totals
    #[arg(long)]
    pub summarize: bool,

    /// Render sizes in human-readable units
    #[arg(short = 'H', long)]
    pub human: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    objects: Vec<ObjectSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
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
        args.pattern.as_deref(),
        !args.ignore_case,
        args.recursive,
    );

    let store = match super::open_store(&formatter).await {
        Ok(store) => store,
        Err(code) => return code,
    };

    let spinner = ProgressBar::spinner(&output_config, "listing");
    let result = bkt_core::list_objects(&store, &path.bucket, &filter).await;
    spinner.finish_and_clear();

    let objects = match result {
        Ok(objects) => objects,
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let total_objects = objects.len();
    let total_size: i64 = objects.iter().map(|o| o.size_bytes).sum();

    if formatter.is_json() {
        let output = LsOutput {
            objects,
            summary: args.summarize.then(|| Summary {
                total_objects,
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(total_size.max(0) as u64, humansize::BINARY),
            }),
        };
        formatter.json(&output);
    } else {
        for object in &objects {
            let date = object
                .last_modified
                .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            let size = if args.human {
                object.size_human.clone()
            } else {
                object.size_bytes.to_string()
            };
            formatter.row(&date, &size, &format!("{}/{}", path.bucket, object.key));
        }

        if args.summarize {
            formatter.println(&format!(
                "\nTotal: {} objects, {}",
                total_objects,
                humansize::format_size(total_size.max(0) as u64, humansize::BINARY)
            ));
        }
    }

    ExitCode::Success
}
