//! Test-file detection by file-name convention.

use std::path::Path;

/// Default suffix of a test file's stem, as in `handler_test.go`.
pub const DEFAULT_TEST_SUFFIX: &str = "_test";

/// Decides whether a file is a test file from its name alone.
///
/// A file is a test file when it has an extension and its stem (the name
/// without that extension) ends with the configured suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFileConvention {
    suffix: String,
}

impl Default for TestFileConvention {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_SUFFIX)
    }
}

impl TestFileConvention {
    /// Creates a convention with the given stem suffix.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Whether `path` names a test file.
    #[must_use]
    pub fn is_test(&self, path: &Path) -> bool {
        if self.suffix.is_empty() || path.extension().is_none() {
            return false;
        }
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(&self.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_test_file() {
        let convention = TestFileConvention::default();
        assert!(convention.is_test(Path::new("pkg/handler_test.go")));
        assert!(convention.is_test(Path::new("/abs/dir/a_test.go")));
        assert!(!convention.is_test(Path::new("pkg/handler.go")));
        assert!(!convention.is_test(Path::new("pkg/test_handler.go")));
        assert!(!convention.is_test(Path::new("pkg/testdata/handler.go")));
    }

    #[test]
    fn test_extension_is_required() {
        let convention = TestFileConvention::default();
        assert!(!convention.is_test(Path::new("pkg/foo_test")));
        assert!(!convention.is_test(Path::new("foo_test")));
        assert!(convention.is_test(Path::new("foo_test.go")));
    }

    #[test]
    fn test_custom_suffix() {
        let convention = TestFileConvention::new(".spec");
        assert!(convention.is_test(Path::new("src/user.spec.ts")));
        assert!(!convention.is_test(Path::new("src/user_test.ts")));
    }

    #[test]
    fn test_empty_suffix_matches_nothing() {
        let convention = TestFileConvention::new("");
        assert!(!convention.is_test(Path::new("a_test.go")));
    }
}
