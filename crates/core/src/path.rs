//! Path parsing
//!
//! Remote arguments have the format: bucket[/key-or-prefix]. Credentials
//! are ambient (SDK default chain), so there is no alias segment.

use crate::error::{Error, Result};

/// A parsed remote path pointing to a bucket location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketPath {
    /// Bucket name
    pub bucket: String,
    /// Object key or prefix (empty for bucket root)
    pub key: String,
    /// Whether the path ends with a slash (directory semantics)
    pub is_dir: bool,
}

impl BucketPath {
    /// Create a new BucketPath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        let is_dir = key.ends_with('/') || key.is_empty();
        Self {
            bucket: bucket.into(),
            key,
            is_dir,
        }
    }

    /// Parse a `bucket[/key]` argument
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::InvalidPath("Path cannot be empty".into()));
        }

        let (bucket, key) = match path.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (path, ""),
        };

        if bucket.is_empty() {
            return Err(Error::InvalidPath(format!(
                "Bucket name cannot be empty in '{path}'"
            )));
        }
        if !is_valid_bucket_name(bucket) {
            return Err(Error::InvalidPath(format!("Invalid bucket name: {bucket}")));
        }

        Ok(Self::new(bucket, key))
    }

    /// Parse a path that must address exactly one object (non-empty,
    /// non-directory key)
    pub fn parse_object(path: &str) -> Result<Self> {
        let parsed = Self::parse(path)?;
        if parsed.key.is_empty() || parsed.is_dir {
            return Err(Error::InvalidPath(format!(
                "'{path}' does not name an object. Use format: bucket/key"
            )));
        }
        Ok(parsed)
    }

    /// The final path segment of the key (the key itself at bucket root)
    pub fn name(&self) -> &str {
        self.key
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.key)
    }

    /// Get the full path as a string (bucket/key)
    pub fn to_full_path(&self) -> String {
        if self.key.is_empty() {
            self.bucket.clone()
        } else {
            format!("{}/{}", self.bucket, self.key)
        }
    }
}

impl std::fmt::Display for BucketPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_full_path())
    }
}

/// Bucket names are lowercase alphanumeric with dots and hyphens
fn is_valid_bucket_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bucket_only() {
        let path = BucketPath::parse("my-bucket").unwrap();
        assert_eq!(path.bucket, "my-bucket");
        assert_eq!(path.key, "");
        assert!(path.is_dir);
    }

    #[test]
    fn test_parse_bucket_and_key() {
        let path = BucketPath::parse("my-bucket/dir/file.txt").unwrap();
        assert_eq!(path.bucket, "my-bucket");
        assert_eq!(path.key, "dir/file.txt");
        assert!(!path.is_dir);
    }

    #[test]
    fn test_parse_prefix() {
        let path = BucketPath::parse("my-bucket/dir/").unwrap();
        assert_eq!(path.key, "dir/");
        assert!(path.is_dir);
    }

    #[test]
    fn test_parse_empty() {
        assert!(BucketPath::parse("").is_err());
        assert!(BucketPath::parse("/key").is_err());
    }

    #[test]
    fn test_parse_invalid_bucket_name() {
        assert!(BucketPath::parse("My_Bucket/key").is_err());
    }

    #[test]
    fn test_parse_object() {
        let path = BucketPath::parse_object("my-bucket/file.txt").unwrap();
        assert_eq!(path.key, "file.txt");

        assert!(BucketPath::parse_object("my-bucket").is_err());
        assert!(BucketPath::parse_object("my-bucket/dir/").is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(BucketPath::parse("b/a/b/c.txt").unwrap().name(), "c.txt");
        assert_eq!(BucketPath::parse("b/a/dir/").unwrap().name(), "dir");
        assert_eq!(BucketPath::parse("b").unwrap().name(), "");
    }

    #[test]
    fn test_display() {
        let path = BucketPath::parse("my-bucket/key/file.txt").unwrap();
        assert_eq!(path.to_string(), "my-bucket/key/file.txt");
        let path = BucketPath::parse("my-bucket").unwrap();
        assert_eq!(path.to_string(), "my-bucket");
    }
}
