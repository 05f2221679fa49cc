//! ObjectStore trait definition
//!
//! This trait is the injected store capability: the four remote calls the
//! bucket operations need, implemented by the S3 adapter and mocked in
//! tests. It keeps the core decoupled from any specific SDK.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata for one listed object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectSummary {
    /// Create a new ObjectSummary for a key of the given size
    pub fn new(key: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes,
            size_human: humansize::format_size(size_bytes.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
            storage_class: None,
        }
    }
}

/// One page of a list operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    /// Listed objects, in store order
    pub objects: Vec<ObjectSummary>,

    /// Whether the result is truncated (more pages available)
    pub truncated: bool,

    /// Continuation token for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Prefix to filter by (server side)
    pub prefix: Option<String>,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,

    /// Maximum number of keys to return per request
    pub max_keys: Option<i32>,
}

/// Trait for the remote object store
///
/// Each operation is one remote call; pagination, filtering, and batching
/// live in the callers. Implemented by `bkt-s3` and mockable for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage>;

    /// Put object bytes at a key
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectSummary>;

    /// Get object content as bytes
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Delete the object at a key
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}
