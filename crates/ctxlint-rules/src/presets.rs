//! Registries of the built-in rules.

use crate::{ctxlint, underscore_visibility, ContextRule, VisibilityRule};
use ctxlint_core::{Config, Registry, RegistryError, RuleBox};

const CONTEXT_TYPE: &str = "context_type";
const BACKGROUND_FUNC: &str = "background_func";

/// Returns every built-in rule with default settings.
///
/// Includes:
/// - `ctxlint` (CL001) - Context parameters and `context.Background()`
/// - `underscorevisibility` (CL002) - File-private `_` symbols
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ContextRule::new()), Box::new(VisibilityRule::new())]
}

/// Returns a registry of the built-in rules with default settings.
///
/// # Errors
///
/// Returns an error if two built-in rules share a name.
pub fn default_registry() -> Result<Registry, RegistryError> {
    registry_from_config(&Config::default())
}

/// Returns a registry of the built-in rules, constructed with the designated
/// names and test-file convention from `config`.
///
/// Severity overrides and enablement are applied later by the analyzer.
///
/// # Errors
///
/// Returns an error if a rule section sets an unknown option or an option of
/// the wrong type, or if two built-in rules share a name.
pub fn registry_from_config(config: &Config) -> Result<Registry, RegistryError> {
    let test_files = config.test_files();

    let mut context = ContextRule::new().with_test_files(test_files.clone());
    if let Some(rule) = config.rule(ctxlint::NAME) {
        rule.check_options(ctxlint::NAME, &[CONTEXT_TYPE, BACKGROUND_FUNC])?;
        if let Some(name) = rule.get_str(ctxlint::NAME, CONTEXT_TYPE)? {
            context = context.with_context_type(name);
        }
        if let Some(name) = rule.get_str(ctxlint::NAME, BACKGROUND_FUNC)? {
            context = context.with_background_func(name);
        }
    }
    if let Some(rule) = config.rule(underscore_visibility::NAME) {
        rule.check_options(underscore_visibility::NAME, &[])?;
    }

    let mut registry = Registry::new();
    registry.register(context)?;
    registry.register(VisibilityRule::new().with_test_files(test_files))?;
    Ok(registry)
}
