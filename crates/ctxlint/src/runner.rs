//! Configuration discovery and one-call analysis.

use ctxlint_core::{
    Analyzer, AnalyzerError, Config, ConfigError, LintResult, Package, RegistryError,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["ctxlint.toml", ".ctxlint.toml"];

/// Errors from [`run`] and [`load_config`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The analyzer could not be built.
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// The built-in rules could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Returns the first config candidate that exists in `root`.
#[must_use]
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Loads the configuration for a project.
///
/// An explicit path wins; relative paths are taken from `root`. Otherwise
/// the candidates in [`CONFIG_CANDIDATES`] are tried in order, and the
/// default configuration is used if none exists.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if path.is_absolute() => Some(path.to_path_buf()),
        Some(path) => Some(root.join(path)),
        None => find_config(root),
    };

    match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Config::from_file(&path)
        }
        None => {
            debug!("No config file in {}, using defaults", root.display());
            Ok(Config::default())
        }
    }
}

/// Runs the built-in rules over `packages` with `config`.
///
/// # Errors
///
/// Returns an error if the configuration names an unknown rule or holds an
/// invalid exclude pattern.
pub fn run(config: Config, packages: &[Package]) -> Result<LintResult, RunError> {
    let registry = ctxlint_rules::registry_from_config(&config)?;
    let analyzer = Analyzer::builder()
        .registry(registry)?
        .config(config)
        .build()?;
    Ok(analyzer.analyze(packages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert!(find_config(dir.path()).is_none());
        let config = load_config(dir.path(), None).unwrap();
        assert!(config.rules.is_empty());
    }

    #[test]
    fn candidates_are_tried_in_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".ctxlint.toml"), "fail_on = \"info\"\n").unwrap();
        assert_eq!(
            find_config(dir.path()),
            Some(dir.path().join(".ctxlint.toml"))
        );

        std::fs::write(dir.path().join("ctxlint.toml"), "fail_on = \"warning\"\n").unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.fail_on(), ctxlint_core::Severity::Warning);
    }

    #[test]
    fn explicit_path_is_relative_to_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("lint.toml"), "[rules.ctxlint]\nenabled = false\n").unwrap();
        let config = load_config(dir.path(), Some(Path::new("lint.toml"))).unwrap();
        assert!(!config.is_rule_enabled("ctxlint"));
    }

    #[test]
    fn unreadable_explicit_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_rule_fails_the_run() {
        let config = Config::parse("[rules.nope]\nenabled = true\n").unwrap();
        let err = run(config, &[]).unwrap_err();
        assert!(matches!(err, RunError::Analyzer(AnalyzerError::UnknownRule(_))));
    }
}
