//! bkt-core: Core library for the bkt bucket CLI
//!
//! This crate provides the core functionality for bkt, including:
//! - Key matching (shell globs, directory-prefix membership)
//! - The four bucket operations (list, upload, download, delete)
//! - The ObjectStore trait the operations run against
//! - Path parsing and configuration management
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other
//! backends.

pub mod config;
pub mod error;
pub mod matcher;
pub mod ops;
pub mod path;
pub mod traits;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use matcher::{is_target_directory, matches_glob, KeyFilter};
pub use ops::{
    delete_matching, download_object, list_objects, upload_matching, DeleteOutcome,
    DownloadReceipt, ItemStatus, UploadOptions, UploadOutcome,
};
pub use path::BucketPath;
pub use traits::{ListOptions, ListPage, ObjectStore, ObjectSummary};
