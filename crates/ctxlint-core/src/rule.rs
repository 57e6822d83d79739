//! The rule trait.

use crate::ast::Package;
use crate::types::{Diagnostic, Severity};

/// A lint rule run once per package.
///
/// Rules are pure: they read the package and its type information and
/// return their findings. They hold no state between runs and never fail;
/// anything they cannot make sense of is simply not reported.
///
/// # Example
///
/// ```ignore
/// use ctxlint_core::{Diagnostic, Package, Rule};
///
/// pub struct NoInitFuncs;
///
/// impl Rule for NoInitFuncs {
///     fn name(&self) -> &'static str { "noinit" }
///     fn code(&self) -> &'static str { "CL900" }
///
///     fn run(&self, pkg: &Package) -> Vec<Diagnostic> {
///         pkg.files
///             .iter()
///             .flat_map(|f| f.funcs())
///             .filter(|f| f.name.name == "init")
///             .map(|f| Diagnostic::new(f.name.pos, "init functions are not allowed"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the short name users enable and disable the rule by.
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks one package and returns its diagnostics, grouped by file in
    /// package order.
    fn run(&self, pkg: &Package) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PackageBuilder;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn run(&self, pkg: &Package) -> Vec<Diagnostic> {
            pkg.files
                .iter()
                .map(|f| Diagnostic::new(crate::Pos::new(f.id, 0), "Test violation"))
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn test_rule_runs_per_package() {
        let mut pkg = PackageBuilder::new("p");
        pkg.file("a.go").finish();
        pkg.file("b.go").finish();
        let diagnostics = TestRule.run(&pkg.build());
        assert_eq!(diagnostics.len(), 2);
    }
}
