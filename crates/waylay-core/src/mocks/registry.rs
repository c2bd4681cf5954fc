//! Rule collection registry and loader.

use crate::config::store::ConfigStore;
use crate::rules;
use crate::types::rule::Rule;
use tracing::info;

/// Named, statically declared group of rules.
pub struct RuleCollection {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl RuleCollection {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// Explicit registration list of rule collections.
///
/// Collections are registered at startup and flattened in registration
/// order. Resolution order between overlapping rules is still governed by
/// priority and insertion stability, not by which collection declared them;
/// duplicate url/method pairs across collections are permitted.
#[derive(Default)]
pub struct RuleRegistry {
    collections: Vec<RuleCollection>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in collections.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(rules::auth::collection());
        registry.register(rules::user::collection());
        registry.register(rules::catalog::collection());
        registry
    }

    pub fn register(&mut self, collection: RuleCollection) {
        self.collections.push(collection);
    }

    pub fn collections(&self) -> &[RuleCollection] {
        &self.collections
    }

    /// Flatten every registered collection, in registration order.
    pub fn load_all(&self) -> Vec<Rule> {
        self.collections
            .iter()
            .flat_map(|collection| collection.rules.iter().cloned())
            .collect()
    }

    /// Append every registered rule into the store's live configuration.
    pub fn load_into(&self, config: &ConfigStore) -> usize {
        let rules = self.load_all();
        let count = rules.len();
        config.append_rules(rules);
        info!(
            collections = self.collections.len(),
            rules = count,
            "loaded mock rule collections"
        );
        count
    }
}
