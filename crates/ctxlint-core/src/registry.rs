//! Explicit name → rule registry.

use crate::config::ConfigError;
use crate::rule::{Rule, RuleBox};

/// Errors from building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two rules share a name.
    #[error("rule `{0}` is already registered")]
    Duplicate(&'static str),

    /// A rule's configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The set of available rules, keyed by name, in registration order.
///
/// Built explicitly at startup; there is no global registration.
#[derive(Default)]
pub struct Registry {
    rules: Vec<RuleBox>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if a rule with the same name is
    /// already registered.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> Result<(), RegistryError> {
        self.register_box(Box::new(rule))
    }

    /// Registers a boxed rule.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if a rule with the same name is
    /// already registered.
    pub fn register_box(&mut self, rule: RuleBox) -> Result<(), RegistryError> {
        if self.contains(rule.name()) {
            return Err(RegistryError::Duplicate(rule.name()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Looks a rule up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.name() == name)
            .map(|r| &**r)
    }

    /// Whether a rule with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all rules, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Consumes the registry, returning the rules in registration order.
    #[must_use]
    pub fn into_rules(self) -> Vec<RuleBox> {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Package;
    use crate::types::Diagnostic;

    struct Named(&'static str);

    impl Rule for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            "TEST"
        }
        fn run(&self, _pkg: &Package) -> Vec<Diagnostic> {
            Vec::new()
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry.register(Named("first")).unwrap();
        registry.register(Named("second")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("second"));
        assert!(registry.get("third").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = Registry::new();
        registry.register(Named("dup")).unwrap();
        let err = registry.register(Named("dup")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate("dup")));
        assert_eq!(registry.len(), 1);
    }
}
