//! bkt-s3: S3 SDK adapter for the bkt bucket CLI
//!
//! The only crate that touches aws-sdk-s3. Implements the ObjectStore
//! trait from bkt-core over any S3-compatible backend.

mod client;

pub use client::S3Store;
