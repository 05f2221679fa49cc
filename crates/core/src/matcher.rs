//! Key matching for object listings
//!
//! Object stores expose a flat key namespace; the delimiter convention
//! (usually `/`) is what makes it look like a directory tree. This module
//! decides whether a key name matches a UNIX shell glob and whether a key
//! is a direct child of a given directory prefix. Both predicates are pure
//! and never fail: an unparseable glob simply selects nothing, which keeps
//! list and delete total over any key set.

use glob::{MatchOptions, Pattern};

/// Default path delimiter for object keys
pub const DELIMITER: char = '/';

/// Test the final path segment of `key` against a UNIX shell glob.
///
/// Trailing delimiters are stripped before the split, so a directory
/// marker key like `"docs/"` matches the pattern `"docs"`.
///
/// # Examples
///
/// ```
/// use bkt_core::matcher::matches_glob;
///
/// assert!(matches_glob("reports/summary.txt", "*.txt", true));
/// assert!(matches_glob("Testing/", "Testing", true));
/// assert!(!matches_glob("File.TXT", "*.txt", true));
/// assert!(matches_glob("File.TXT", "*.txt", false));
/// ```
pub fn matches_glob(key: &str, pattern: &str, case_sensitive: bool) -> bool {
    let Ok(pattern) = Pattern::new(pattern) else {
        return false;
    };
    pattern.matches_with(key_name(key), match_options(case_sensitive))
}

/// Whether `key` is a direct child of the directory named by `prefix_filter`.
///
/// A prefix supplied without its trailing delimiter is treated the same as
/// one with it (`"a/b"` is `"a/b/"`). The prefix's own directory marker
/// counts as belonging; keys nested any deeper do not, and neither does a
/// bare subdirectory marker one level below (`"a/b/"` is not "in" `"a/"`).
pub fn is_target_directory(key: &str, prefix_filter: &str, delimiter: char) -> bool {
    let mut prefix = prefix_filter.to_string();
    if !prefix.is_empty() && !prefix.ends_with(delimiter) {
        prefix.push(delimiter);
    }

    match key.strip_prefix(&prefix) {
        Some(rest) => !rest.contains(delimiter),
        None => false,
    }
}

/// The final path segment of a key, ignoring trailing delimiters.
fn key_name(key: &str) -> &str {
    key.trim_end_matches(DELIMITER)
        .rsplit(DELIMITER)
        .next()
        .unwrap_or("")
}

const fn match_options(case_sensitive: bool) -> MatchOptions {
    MatchOptions {
        case_sensitive,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

/// A compiled key selector shared by list and delete.
///
/// Combines the directory-scope check with an optional glob over the key
/// name. The glob is compiled once at construction; a pattern that fails
/// to compile produces a filter that selects nothing.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    prefix: String,
    pattern: Option<Pattern>,
    pattern_invalid: bool,
    case_sensitive: bool,
    recursive: bool,
}

impl KeyFilter {
    /// Build a filter scoped to `prefix` with an optional glob pattern.
    pub fn new(prefix: &str, pattern: Option<&str>, case_sensitive: bool, recursive: bool) -> Self {
        let mut normalized = prefix.trim_start_matches(DELIMITER).to_string();
        if !normalized.is_empty() && !normalized.ends_with(DELIMITER) {
            normalized.push(DELIMITER);
        }

        let (pattern, pattern_invalid) = match pattern {
            None => (None, false),
            Some(raw) => match Pattern::new(raw) {
                Ok(compiled) => (Some(compiled), false),
                Err(e) => {
                    tracing::warn!(pattern = raw, error = %e, "glob pattern does not compile, selecting nothing");
                    (None, true)
                }
            },
        };

        Self {
            prefix: normalized,
            pattern,
            pattern_invalid,
            case_sensitive,
            recursive,
        }
    }

    /// Filter that selects every key under `prefix` (recursively).
    pub fn all(prefix: &str) -> Self {
        Self::new(prefix, None, true, true)
    }

    /// The normalized prefix, suitable for pushing down to the store's
    /// server-side prefix filter.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the filter selects `key`.
    pub fn selected(&self, key: &str) -> bool {
        if self.pattern_invalid {
            return false;
        }

        let in_scope = if self.recursive {
            key.starts_with(&self.prefix)
        } else {
            is_target_directory(key, &self.prefix, DELIMITER)
        };
        if !in_scope {
            return false;
        }

        match &self.pattern {
            Some(pattern) => {
                pattern.matches_with(key_name(key), match_options(self.case_sensitive))
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_glob_exact_name() {
        // Without wildcards a pattern is an exact match on the final segment.
        assert!(matches_glob("error.txt", "error.txt", true));
        assert!(matches_glob("a/b/error.txt", "error.txt", true));
        assert!(!matches_glob("a/b/error.txt", "b/error.txt", true));
        assert!(!matches_glob("error.txt", "Error.txt", true));
        assert!(matches_glob("error.txt", "Error.txt", false));
    }

    #[test]
    fn test_matches_glob_directory_marker() {
        assert!(matches_glob("Testing/", "Testing", true));
        assert!(matches_glob("a/b/Testing/", "Testing", true));
    }

    #[test]
    fn test_matches_glob_wildcards() {
        assert!(matches_glob("s3.py", "*.py", true));
        assert!(matches_glob("reports/2024/summary.txt", "*.txt", true));
        assert!(matches_glob("log1.txt", "log?.txt", true));
        assert!(matches_glob("log1.txt", "log[0-9].txt", true));
        assert!(!matches_glob("logx.txt", "log[0-9].txt", true));
        assert!(!matches_glob("notes.md", "*.txt", true));
    }

    #[test]
    fn test_matches_glob_star_matches_everything() {
        for key in ["error.txt", "a/b/c", "x/", "weird name.bin"] {
            assert!(matches_glob(key, "*", true), "{key} should match *");
        }
    }

    #[test]
    fn test_matches_glob_case_sensitivity() {
        assert!(!matches_glob("File.TXT", "*.txt", true));
        assert!(matches_glob("File.TXT", "*.txt", false));
    }

    #[test]
    fn test_matches_glob_invalid_pattern_matches_nothing() {
        assert!(!matches_glob("error.txt", "[invalid", true));
        assert!(!matches_glob("[invalid", "[invalid", true));
    }

    #[test]
    fn test_is_target_directory_accepts() {
        assert!(is_target_directory("error.txt", "", '/'));
        assert!(is_target_directory(
            "mramirez/development/success.txt",
            "mramirez/development/",
            '/'
        ));
        assert!(is_target_directory(
            "mramirez/development/",
            "mramirez/development/",
            '/'
        ));
        // Prefix without its trailing delimiter is equivalent.
        assert!(is_target_directory(
            "mramirez/development/",
            "mramirez/development",
            '/'
        ));
    }

    #[test]
    fn test_is_target_directory_rejects() {
        assert!(!is_target_directory("Test/error.txt", "", '/'));
        assert!(!is_target_directory("Test/Test2/Test3/error.txt", "", '/'));
        assert!(!is_target_directory(
            "Test/Test2/Test3/error.txt",
            "Test/Test2/",
            '/'
        ));
        assert!(!is_target_directory(
            "Test/Test2/Test3/error.txt",
            "Test",
            '/'
        ));
        // A subdirectory marker one level below is not in the parent itself.
        assert!(!is_target_directory("mramirez/development/", "mramirez/", '/'));
        assert!(!is_target_directory("Test/Test/test2.txt", "", '/'));
    }

    #[test]
    fn test_is_target_directory_unrelated_prefix() {
        assert!(!is_target_directory("other/file.txt", "mramirez/", '/'));
    }

    #[test]
    fn test_key_filter_root_pattern() {
        let filter = KeyFilter::new("", Some("*.txt"), true, false);
        assert!(filter.selected("error.txt"));
        assert!(filter.selected("log.txt"));
        assert!(!filter.selected("notes.md"));
        // Nested keys are out of scope for a non-recursive root filter.
        assert!(!filter.selected("a/error.txt"));
    }

    #[test]
    fn test_key_filter_prefix_normalization() {
        let with_slash = KeyFilter::new("a/b/", Some("*"), true, false);
        let without_slash = KeyFilter::new("a/b", Some("*"), true, false);
        for key in ["a/b/file.txt", "a/b/c/file.txt", "a/file.txt"] {
            assert_eq!(with_slash.selected(key), without_slash.selected(key));
        }
        assert_eq!(with_slash.prefix(), "a/b/");
        assert_eq!(without_slash.prefix(), "a/b/");
    }

    #[test]
    fn test_key_filter_recursive_scope() {
        let filter = KeyFilter::new("a/", Some("*.txt"), true, true);
        assert!(filter.selected("a/file.txt"));
        assert!(filter.selected("a/b/c/deep.txt"));
        assert!(!filter.selected("b/file.txt"));
        assert!(!filter.selected("a/b/image.png"));
    }

    #[test]
    fn test_key_filter_invalid_pattern_selects_nothing() {
        let filter = KeyFilter::new("", Some("[invalid"), true, true);
        assert!(!filter.selected("error.txt"));
        assert!(!filter.selected("[invalid"));
    }

    #[test]
    fn test_key_filter_no_pattern_equals_star() {
        // For key sets free of glob metacharacters, no pattern and "*"
        // select the same keys.
        let keys = ["error.txt", "log.txt", "a/nested.md", "dir/"];
        let unfiltered = KeyFilter::all("");
        let star = KeyFilter::new("", Some("*"), true, true);
        for key in keys {
            assert_eq!(unfiltered.selected(key), star.selected(key), "{key}");
        }
    }

    #[test]
    fn test_key_filter_ignore_case() {
        let filter = KeyFilter::new("", Some("*.txt"), false, false);
        assert!(filter.selected("File.TXT"));
        assert!(filter.selected("file.txt"));
    }
}
