//! Runtime administration of the mock engine.

use crate::config::store::{ConfigSnapshot, ConfigStore, MockConfig};
use crate::mocks::handler::MockHandler;
use crate::types::rule::{Rule, UrlPattern};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Aggregate rule statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockStats {
    pub total_rules: usize,
    pub enabled_rules: usize,
    pub disabled_rules: usize,
    pub global_enabled: bool,
    pub debug: bool,
}

/// Partial scalar configuration accepted by [`MockController::import_config`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PartialSnapshot {
    enabled: Option<bool>,
    environments: Option<HashMap<String, bool>>,
    default_delay: Option<u64>,
    debug: Option<bool>,
}

/// Administrative surface over the store and the live handler.
///
/// Every mutating operation updates the in-memory state, re-persists the
/// scalar snapshot, and forwards structural rule changes into the handler,
/// so in-flight and subsequent requests observe the change without a
/// process restart. Persistence failures are logged and never fatal.
pub struct MockController {
    config: Arc<ConfigStore>,
    handler: Arc<MockHandler>,
}

impl MockController {
    pub fn new(config: Arc<ConfigStore>, handler: Arc<MockHandler>) -> Self {
        Self { config, handler }
    }

    fn persist(&self, config: &MockConfig) {
        if let Err(err) = self.config.persist(config) {
            warn!(error = %err, "failed to persist mock config");
        }
    }

    fn update_scalars(&self, apply: impl FnOnce(&mut MockConfig)) {
        let mut config = self.config.resolve();
        apply(&mut config);
        self.persist(&config);
    }

    /// Open the global gate.
    pub fn enable(&self) {
        self.update_scalars(|config| config.enabled = true);
    }

    /// Close the global gate.
    pub fn disable(&self) {
        self.update_scalars(|config| config.enabled = false);
    }

    /// Flip the global gate; returns the new state.
    pub fn toggle(&self) -> bool {
        let mut config = self.config.resolve();
        config.enabled = !config.enabled;
        let state = config.enabled;
        self.persist(&config);
        state
    }

    pub fn enable_debug(&self) {
        self.update_scalars(|config| config.debug = true);
    }

    pub fn disable_debug(&self) {
        self.update_scalars(|config| config.debug = false);
    }

    /// Enable or disable mocking for one environment.
    pub fn set_environment(&self, environment: &str, enabled: bool) {
        self.update_scalars(|config| {
            config.environments.insert(environment.to_string(), enabled);
        });
    }

    /// Fallback delay for rules without their own.
    pub fn set_default_delay(&self, delay_ms: u64) {
        self.update_scalars(|config| config.default_delay = delay_ms);
    }

    pub fn add_rule(&self, rule: Rule) {
        self.handler.add_rule(rule);
        self.persist(&self.config.resolve());
    }

    pub fn remove_rule(&self, pattern: &UrlPattern) {
        self.handler.remove_rule(pattern);
        self.persist(&self.config.resolve());
    }

    /// Flip one rule's enabled flag; returns the new state, or `false` when
    /// no rule carries the pattern.
    pub fn toggle_rule(&self, pattern: &UrlPattern) -> bool {
        match self.handler.toggle_rule(pattern) {
            Some(state) => {
                self.persist(&self.config.resolve());
                state
            }
            None => false,
        }
    }

    pub fn clear_rules(&self) {
        self.handler.clear_rules();
        self.persist(&self.config.resolve());
    }

    /// Snapshot of the live rules.
    pub fn rules(&self) -> Vec<Rule> {
        self.handler.rules()
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> MockConfig {
        self.config.resolve()
    }

    pub fn stats(&self) -> MockStats {
        let config = self.config.resolve();
        let enabled_rules = config.rules.iter().filter(|rule| rule.enabled).count();
        MockStats {
            total_rules: config.rules.len(),
            enabled_rules,
            disabled_rules: config.rules.len() - enabled_rules,
            global_enabled: config.enabled,
            debug: config.debug,
        }
    }

    /// Clear the live rules and drop the persisted snapshot.
    pub fn reset(&self) {
        self.handler.clear_rules();
        if let Err(err) = self.config.clear_persisted() {
            warn!(error = %err, "failed to remove persisted mock config");
        }
    }

    /// Export the scalar configuration as pretty-printed JSON.
    ///
    /// Rule definitions carry producer closures and are not exportable.
    pub fn export_config(&self) -> String {
        let snapshot = ConfigSnapshot::of(&self.config.resolve());
        serde_json::to_string_pretty(&snapshot).expect("snapshot serializes to JSON")
    }

    /// Import a (possibly partial) scalar configuration blob.
    ///
    /// A blob that fails to parse is rejected wholesale and leaves the
    /// current state untouched.
    pub fn import_config(&self, raw: &str) -> bool {
        let imported: PartialSnapshot = match serde_json::from_str(raw) {
            Ok(imported) => imported,
            Err(err) => {
                warn!(error = %err, "rejected malformed config import");
                return false;
            }
        };

        self.update_scalars(|config| {
            if let Some(enabled) = imported.enabled {
                config.enabled = enabled;
            }
            if let Some(environments) = imported.environments {
                config.environments = environments;
            }
            if let Some(default_delay) = imported.default_delay {
                config.default_delay = default_delay;
            }
            if let Some(debug) = imported.debug {
                config.debug = debug;
            }
        });
        true
    }
}
