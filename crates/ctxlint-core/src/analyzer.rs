//! Core analyzer for orchestrating lint execution.

use crate::ast::Package;
use crate::config::Config;
use crate::registry::Registry;
use crate::rule::{Rule, RuleBox};
use crate::types::{Diagnostic, LintResult, Location, Violation};

use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur while building an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Glob pattern error.
    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    Glob {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: glob::PatternError,
    },

    /// The configuration names a rule that is not registered.
    #[error("Configuration refers to unknown rule `{0}`")]
    UnknownRule(String),

    /// Two rules with the same name were added.
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    registry: Registry,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule with the same name was already added.
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Result<Self, AnalyzerError> {
        self.registry.register(rule)?;
        Ok(self)
    }

    /// Adds a boxed rule to the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule with the same name was already added.
    pub fn rule_box(mut self, rule: RuleBox) -> Result<Self, AnalyzerError> {
        self.registry.register_box(rule)?;
        Ok(self)
    }

    /// Adds every rule of a registry, after the rules added so far.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule name collides with one already added.
    pub fn registry(mut self, registry: Registry) -> Result<Self, AnalyzerError> {
        for rule in registry.into_rules() {
            self.registry.register_box(rule)?;
        }
        Ok(self)
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob, or if the
    /// configuration mentions a rule that was never added.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let mut names: Vec<&String> = config.rules.keys().collect();
        names.sort();
        if let Some(unknown) = names.into_iter().find(|n| !self.registry.contains(n)) {
            return Err(AnalyzerError::UnknownRule(unknown.clone()));
        }

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let exclude = patterns
            .into_iter()
            .map(|pattern| {
                glob::Pattern::new(&pattern)
                    .map_err(|source| AnalyzerError::Glob { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            rules: self.registry.into_rules(),
            exclude,
            config,
        })
    }
}

/// The main analyzer that runs rules over packages.
///
/// Use [`Analyzer::builder()`] to construct an instance. Analysis keeps no
/// state between calls, so one analyzer can be shared across threads.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    exclude: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes packages and returns the combined results.
    ///
    /// Violations are ordered by package, then rule registration order,
    /// then the order in which each rule reported them.
    #[must_use]
    pub fn analyze(&self, packages: &[Package]) -> LintResult {
        info!("Starting analysis of {} package(s)", packages.len());

        let mut result = LintResult::new();
        for pkg in packages {
            result.extend(self.analyze_package(pkg));
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );
        result
    }

    /// Analyzes a single package.
    #[must_use]
    pub fn analyze_package(&self, pkg: &Package) -> LintResult {
        debug!("Analyzing package {} ({} files)", pkg.path, pkg.files.len());

        let mut result = LintResult {
            violations: Vec::new(),
            packages_checked: 1,
            files_checked: pkg.files.len(),
        };

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let severity = self
                .config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity());

            for diagnostic in rule.run(pkg) {
                let Some(location) = locate(pkg, &diagnostic) else {
                    warn!(
                        "{}: dropping diagnostic outside package {}: {}",
                        rule.name(),
                        pkg.path,
                        diagnostic.message
                    );
                    continue;
                };
                if self.should_exclude(&location.file) {
                    trace!("Excluding {}: {}", location.file.display(), diagnostic.message);
                    continue;
                }
                result.violations.push(Violation::new(
                    rule.code(),
                    rule.name(),
                    severity,
                    location,
                    diagnostic.message,
                ));
            }
        }

        result
    }

    /// Checks if violations in a file should be dropped.
    fn should_exclude(&self, path: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(path))
    }
}

/// Resolves a diagnostic's position within its package.
fn locate(pkg: &Package, diagnostic: &Diagnostic) -> Option<Location> {
    let position = pkg.position(diagnostic.pos)?;
    Some(
        Location::new(position.path.to_path_buf(), position.line, position.column)
            .with_span(position.offset, 0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PackageBuilder;
    use crate::position::Pos;
    use crate::Severity;

    /// Reports the first offset of every file.
    struct EveryFile(&'static str);

    impl Rule for EveryFile {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }
        fn run(&self, pkg: &Package) -> Vec<Diagnostic> {
            pkg.files
                .iter()
                .map(|f| {
                    Diagnostic::new(
                        Pos::new(f.id, 0),
                        format!("{} saw {}", self.0, f.path.display()),
                    )
                })
                .collect()
        }
    }

    fn two_file_package() -> Package {
        let mut pkg = PackageBuilder::new("example.com/app");
        pkg.file("app/a.go").finish();
        pkg.file("app/generated/b.go").finish();
        pkg.build()
    }

    #[test]
    fn test_violations_keep_rule_and_package_order() {
        let analyzer = Analyzer::builder()
            .rule(EveryFile("one"))
            .and_then(|b| b.rule(EveryFile("two")))
            .and_then(AnalyzerBuilder::build)
            .expect("Failed to build analyzer");

        let result = analyzer.analyze(&[two_file_package(), two_file_package()]);
        let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages[..4],
            [
                "one saw app/a.go",
                "one saw app/generated/b.go",
                "two saw app/a.go",
                "two saw app/generated/b.go",
            ]
        );
        assert_eq!(result.violations.len(), 8);
        assert_eq!(result.packages_checked, 2);
        assert_eq!(result.files_checked, 4);
        assert_eq!(result.violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .rule(EveryFile("one"))
            .expect("unique rule")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        let result = analyzer.analyze(&[two_file_package()]);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, Path::new("app/a.go"));
    }

    #[test]
    fn test_config_disables_and_overrides() {
        let config = Config::parse(
            r#"
[rules.one]
enabled = false

[rules.two]
severity = "error"
"#,
        )
        .unwrap();
        let analyzer = Analyzer::builder()
            .rule(EveryFile("one"))
            .and_then(|b| b.rule(EveryFile("two")))
            .unwrap()
            .config(config)
            .build()
            .unwrap();

        let result = analyzer.analyze(&[two_file_package()]);
        assert_eq!(result.violations.len(), 2);
        assert!(result.violations.iter().all(|v| v.rule == "two"));
        assert!(result.has_errors());
    }

    #[test]
    fn test_unknown_rule_in_config_is_rejected() {
        let config = Config::parse("[rules.missing]\nenabled = true\n").unwrap();
        let err = Analyzer::builder()
            .rule(EveryFile("one"))
            .unwrap()
            .config(config)
            .build()
            .err()
            .expect("unknown rule must fail");
        assert!(matches!(err, AnalyzerError::UnknownRule(name) if name == "missing"));
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let err = Analyzer::builder().exclude("a/[").build().err();
        assert!(matches!(err, Some(AnalyzerError::Glob { .. })));
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let err = Analyzer::builder()
            .rule(EveryFile("one"))
            .and_then(|b| b.rule(EveryFile("one")))
            .err();
        assert!(matches!(err, Some(AnalyzerError::Registry(_))));
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let analyzer = Analyzer::builder()
            .rule(EveryFile("one"))
            .and_then(AnalyzerBuilder::build)
            .unwrap();
        let packages = [two_file_package()];
        assert_eq!(
            analyzer.analyze(&packages).violations,
            analyzer.analyze(&packages).violations
        );
    }
}
