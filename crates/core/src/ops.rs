//! Bucket operations
//!
//! The four one-shot operations — list, upload, download, delete — written
//! against the injected `ObjectStore` capability. Each returns typed
//! results and leaves rendering to the caller. Bulk operations (upload,
//! delete) never abort on a per-item failure: every item gets an outcome
//! and the caller decides what a mixed batch means.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::matcher::KeyFilter;
use crate::traits::{ListOptions, ObjectStore, ObjectSummary};

/// Page size pushed down to the store's list call
const LIST_PAGE_SIZE: i32 = 1000;

/// Per-item result of an upload or delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// The remote mutation completed
    Done,
    /// Dry-run mode, nothing was sent
    DryRun,
    /// The item failed; the batch continued without it
    Failed(String),
}

impl ItemStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }
}

/// Outcome of one file in an upload batch
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    /// Local source path
    pub source: PathBuf,
    /// Destination key
    pub key: String,
    /// Size in bytes (on-disk size in dry-run mode)
    pub size_bytes: i64,
    /// What happened to this item
    pub status: ItemStatus,
}

/// Outcome of one key in a delete batch
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    /// Object key
    pub key: String,
    /// What happened to this item
    pub status: ItemStatus,
}

/// Receipt for a completed download
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReceipt {
    /// Object key
    pub key: String,
    /// Local destination path
    pub dest: PathBuf,
    /// Size in bytes
    pub size_bytes: i64,
}

/// Options for an upload batch
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// Key prefix prepended to each file's base name
    pub key_prefix: String,
    /// Content type override (guessed from the filename when unset)
    pub content_type: Option<String>,
    /// Report what would be uploaded without sending anything
    pub dry_run: bool,
}

/// Enumerate every object the filter selects, in store-listing order.
///
/// Pagination is handled here; the filter's prefix is pushed down to the
/// store so deep buckets are not scanned in full for a scoped listing.
pub async fn list_objects(
    store: &dyn ObjectStore,
    bucket: &str,
    filter: &KeyFilter,
) -> Result<Vec<ObjectSummary>> {
    let mut objects = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions {
            prefix: (!filter.prefix().is_empty()).then(|| filter.prefix().to_string()),
            continuation_token: continuation_token.clone(),
            max_keys: Some(LIST_PAGE_SIZE),
        };

        let page = store.list_objects(bucket, options).await?;
        objects.extend(page.objects.into_iter().filter(|o| filter.selected(&o.key)));

        if !page.truncated {
            break;
        }
        continuation_token = page.continuation_token;
    }

    Ok(objects)
}

/// Expand a local filesystem glob and upload each matching file.
///
/// The destination key is the file's base name under `opts.key_prefix`;
/// local directory structure is discarded. An invalid local pattern is a
/// usage error, but per-file failures (unreadable file, failed put) only
/// mark that item and the batch continues.
pub async fn upload_matching(
    store: &dyn ObjectStore,
    bucket: &str,
    local_pattern: &str,
    opts: &UploadOptions,
) -> Result<Vec<UploadOutcome>> {
    let paths =
        glob::glob(local_pattern).map_err(|e| Error::InvalidPattern(format!("{local_pattern}: {e}")))?;

    let mut key_prefix = opts.key_prefix.clone();
    if !key_prefix.is_empty() && !key_prefix.ends_with('/') {
        key_prefix.push('/');
    }

    let mut outcomes = Vec::new();

    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                outcomes.push(UploadOutcome {
                    source: e.path().to_path_buf(),
                    key: String::new(),
                    size_bytes: 0,
                    status: ItemStatus::Failed(e.to_string()),
                });
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = format!("{key_prefix}{name}");

        outcomes.push(upload_one(store, bucket, &path, key, opts).await);
    }

    Ok(outcomes)
}

async fn upload_one(
    store: &dyn ObjectStore,
    bucket: &str,
    path: &Path,
    key: String,
    opts: &UploadOptions,
) -> UploadOutcome {
    if opts.dry_run {
        let size_bytes = std::fs::metadata(path).map(|m| m.len() as i64).unwrap_or(0);
        return UploadOutcome {
            source: path.to_path_buf(),
            key,
            size_bytes,
            status: ItemStatus::DryRun,
        };
    }

    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            return UploadOutcome {
                source: path.to_path_buf(),
                key,
                size_bytes: 0,
                status: ItemStatus::Failed(e.to_string()),
            };
        }
    };
    let size_bytes = data.len() as i64;

    let content_type = opts.content_type.clone().or_else(|| {
        mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
    });

    let status = match store.put_object(bucket, &key, data, content_type).await {
        Ok(_) => ItemStatus::Done,
        Err(e) => {
            tracing::warn!(key, error = %e, "upload failed, continuing batch");
            ItemStatus::Failed(e.to_string())
        }
    };

    UploadOutcome {
        source: path.to_path_buf(),
        key,
        size_bytes,
        status,
    }
}

/// Fetch one object's bytes into one local path.
///
/// When `dest` is an existing directory (or ends with a path separator),
/// the key's final segment names the file. Parent directories are created.
/// A missing key surfaces as `Error::NotFound`.
pub async fn download_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    dest: &Path,
) -> Result<DownloadReceipt> {
    let dest = if dest.is_dir() || dest.to_string_lossy().ends_with('/') {
        let name = key.rsplit('/').next().unwrap_or(key);
        dest.join(name)
    } else {
        dest.to_path_buf()
    };

    let data = store.get_object(bucket, key).await?;
    let size_bytes = data.len() as i64;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&dest, &data)?;

    Ok(DownloadReceipt {
        key: key.to_string(),
        dest,
        size_bytes,
    })
}

/// Delete every object the filter selects, one call per key.
///
/// Keys are enumerated exactly like `list_objects`. In dry-run mode no
/// remote mutation happens; otherwise each key yields `Done` or `Failed`
/// and a failure never aborts the rest of the batch.
pub async fn delete_matching(
    store: &dyn ObjectStore,
    bucket: &str,
    filter: &KeyFilter,
    dry_run: bool,
) -> Result<Vec<DeleteOutcome>> {
    let selected = list_objects(store, bucket, filter).await?;

    let mut outcomes = Vec::with_capacity(selected.len());
    for object in selected {
        let status = if dry_run {
            ItemStatus::DryRun
        } else {
            match store.delete_object(bucket, &object.key).await {
                Ok(()) => ItemStatus::Done,
                Err(e) => {
                    tracing::warn!(key = object.key, error = %e, "delete failed, continuing batch");
                    ItemStatus::Failed(e.to_string())
                }
            }
        };
        outcomes.push(DeleteOutcome {
            key: object.key,
            status,
        });
    }

    Ok(outcomes)
}
