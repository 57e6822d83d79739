//! Rule to keep underscore-prefixed symbols private to their file.
//!
//! Top-level names starting with `_` are file-private by convention. A
//! reference from another file of the same package shows up in that file's
//! unresolved identifiers and is reported there.
//!
//! Test files are not checked.
//!
//! Import names are unresolved too, so an import aliased to a name starting
//! with `_` is reported as well.

use ctxlint_core::{Diagnostic, Package, Rule, TestFileConvention};
use tracing::debug;

/// Rule code for underscorevisibility.
pub const CODE: &str = "CL002";

/// Rule name for underscorevisibility.
pub const NAME: &str = "underscorevisibility";

/// Forbids references to another file's `_`-prefixed symbols.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRule {
    test_files: TestFileConvention,
}

impl VisibilityRule {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how test files are recognized.
    #[must_use]
    pub fn with_test_files(mut self, test_files: TestFileConvention) -> Self {
        self.test_files = test_files;
        self
    }
}

impl Rule for VisibilityRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "checks that symbols starting with _ are only used in the same file"
    }

    fn run(&self, pkg: &Package) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for file in &pkg.files {
            if self.test_files.is_test(&file.path) {
                debug!("{NAME}: skipping test file {}", file.path.display());
                continue;
            }
            diagnostics.extend(
                file.unresolved
                    .iter()
                    .filter(|ident| ident.name.starts_with('_'))
                    .map(|ident| {
                        Diagnostic::new(
                            ident.pos,
                            format!("cannot refer to file-private `{}`", ident.name),
                        )
                    }),
            );
        }
        diagnostics
    }
}
