//! Configuration types for ctxlint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::testfile::{TestFileConvention, DEFAULT_TEST_SUFFIX};
use crate::Severity;

/// Top-level configuration for ctxlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold at which a result counts as failing
    /// (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled. Rules are enabled unless configured
    /// otherwise.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration of a rule, if any.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Severity threshold at which a result counts as failing.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }

    /// The test-file convention shared by all rules.
    #[must_use]
    pub fn test_files(&self) -> TestFileConvention {
        TestFileConvention::new(self.analyzer.test_suffix.clone())
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns of file paths whose violations are dropped.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Stem suffix that marks a test file.
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            test_suffix: default_test_suffix(),
        }
    }
}

fn default_test_suffix() -> String {
    DEFAULT_TEST_SUFFIX.to_string()
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets a string option of `rule`, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the option holds something
    /// other than a string.
    pub fn get_str(&self, rule: &str, key: &str) -> Result<Option<&str>, ConfigError> {
        match self.options.get(key) {
            None => Ok(None),
            Some(toml::Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(ConfigError::InvalidOption {
                rule: rule.to_string(),
                key: key.to_string(),
                expected: "a string",
                found: other.type_str(),
            }),
        }
    }

    /// Checks that every option of `rule` is one of `known`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for the first unknown key in
    /// name order.
    pub fn check_options(&self, rule: &str, known: &[&str]) -> Result<(), ConfigError> {
        let mut keys: Vec<&str> = self.options.keys().map(String::as_str).collect();
        keys.sort_unstable();
        match keys.into_iter().find(|key| !known.contains(key)) {
            Some(key) => Err(ConfigError::UnknownOption {
                rule: rule.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule section sets an option the rule does not have.
    #[error("unknown option `{key}` in [rules.{rule}]")]
    UnknownOption {
        /// Rule name.
        rule: String,
        /// Offending key.
        key: String,
    },

    /// A rule option has the wrong type.
    #[error("option `{key}` in [rules.{rule}] must be {expected}, found {found}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Offending key.
        key: String,
        /// Expected value type.
        expected: &'static str,
        /// Type of the configured value.
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert_eq!(config.analyzer.test_suffix, "_test");
        assert_eq!(config.fail_on(), Severity::Error);
        assert!(config.is_rule_enabled("ctxlint"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
fail_on = "warning"

[analyzer]
exclude = ["**/generated/**"]
test_suffix = "_spec"

[rules.ctxlint]
severity = "warning"
context_type = "example.com/ctx.Context"

[rules.underscorevisibility]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.fail_on(), Severity::Warning);
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.test_files().is_test(Path::new("a_spec.go")));
        assert!(config.is_rule_enabled("ctxlint"));
        assert!(!config.is_rule_enabled("underscorevisibility"));
        assert_eq!(config.rule_severity("ctxlint"), Some(Severity::Warning));

        let rule_config = config.rule("ctxlint").unwrap();
        assert_eq!(
            rule_config.get_str("ctxlint", "context_type").unwrap(),
            Some("example.com/ctx.Context")
        );
        assert_eq!(rule_config.get_str("ctxlint", "background_func").unwrap(), None);
        assert!(rule_config
            .check_options("ctxlint", &["context_type", "background_func"])
            .is_ok());
    }

    #[test]
    fn test_option_errors() {
        let config = Config::parse(
            "[rules.ctxlint]\nenabled = true\ncontext_type = 3\nbackground = \"x\"\n",
        )
        .unwrap();
        let rule_config = config.rule("ctxlint").unwrap();

        let err = rule_config.get_str("ctxlint", "context_type").unwrap_err();
        assert_eq!(
            err.to_string(),
            "option `context_type` in [rules.ctxlint] must be a string, found integer"
        );

        let err = rule_config
            .check_options("ctxlint", &["context_type"])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownOption { ref key, .. } if key == "background"
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("fail_on = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
