//! Mock configuration: defaults, persisted snapshot, environment overrides.

use crate::config::error::ConfigError;
use crate::config::persistence::KvStore;
use crate::types::rule::{sort_by_priority, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;
use tracing::debug;

/// Well-known persistence key for the scalar snapshot.
pub const STORAGE_KEY: &str = "mock-config";

const ENV_ENVIRONMENT: &str = "WAYLAY_ENV";
const ENV_ENABLED: &str = "WAYLAY_MOCK_ENABLED";
const ENV_DEBUG: &str = "WAYLAY_MOCK_DEBUG";

const DEFAULT_ENVIRONMENT: &str = "development";

/// Live mock configuration.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Global gate
    pub enabled: bool,
    /// Per-environment activation; only an explicit `true` opens the gate
    pub environments: HashMap<String, bool>,
    /// Live rules, ascending by priority. Never persisted: producers are
    /// closures, so rules rebuild from registered collections at startup.
    pub rules: Vec<Rule>,
    /// Fallback delay in milliseconds for rules without their own
    pub default_delay: u64,
    /// Verbose request/response logging
    pub debug: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        let mut environments = HashMap::new();
        environments.insert("development".to_string(), true);
        environments.insert("test".to_string(), false);
        environments.insert("production".to_string(), false);

        Self {
            enabled: false,
            environments,
            rules: Vec::new(),
            default_delay: 0,
            debug: false,
        }
    }
}

/// Serializable scalar subset of [`MockConfig`].
///
/// Field names stay camelCase on the wire so exported blobs and persisted
/// snapshots keep a stable external shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub enabled: bool,
    pub environments: HashMap<String, bool>,
    pub default_delay: u64,
    pub debug: bool,
}

impl ConfigSnapshot {
    pub fn of(config: &MockConfig) -> Self {
        Self {
            enabled: config.enabled,
            environments: config.environments.clone(),
            default_delay: config.default_delay,
            debug: config.debug,
        }
    }

    fn apply(&self, config: &mut MockConfig) {
        config.enabled = self.enabled;
        config.environments = self.environments.clone();
        config.default_delay = self.default_delay;
        config.debug = self.debug;
    }
}

/// Environment-variable overrides, resolved once at the composition root.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// Current environment name (`WAYLAY_ENV`)
    pub environment: Option<String>,
    /// Force the global gate on (`WAYLAY_MOCK_ENABLED=true`)
    pub enabled: bool,
    /// Force debug logging on (`WAYLAY_MOCK_DEBUG=true`)
    pub debug: bool,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            environment: env::var(ENV_ENVIRONMENT).ok().filter(|v| !v.is_empty()),
            enabled: flag(ENV_ENABLED),
            debug: flag(ENV_DEBUG),
        }
    }
}

fn flag(name: &str) -> bool {
    env::var(name).map(|value| value == "true").unwrap_or(false)
}

/// Resolves, caches, and persists the mock configuration.
///
/// The configuration is computed once per store from defaults, the persisted
/// scalar snapshot, and the override flags, then cached; mutations go through
/// [`ConfigStore::persist`] and the rule-list setters.
pub struct ConfigStore {
    store: Box<dyn KvStore>,
    overrides: EnvOverrides,
    environment: String,
    cached: RwLock<Option<MockConfig>>,
}

impl ConfigStore {
    pub fn new(store: Box<dyn KvStore>, overrides: EnvOverrides) -> Self {
        let environment = overrides
            .environment
            .clone()
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        Self {
            store,
            overrides,
            environment,
            cached: RwLock::new(None),
        }
    }

    /// Current environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Resolve the configuration, computing and caching it on first use.
    pub fn resolve(&self) -> MockConfig {
        self.with_config(MockConfig::clone)
    }

    fn resolve_uncached(&self) -> MockConfig {
        let mut config = MockConfig::default();

        if let Some(raw) = self.store.get(STORAGE_KEY) {
            match serde_json::from_str::<ConfigSnapshot>(&raw) {
                Ok(snapshot) => snapshot.apply(&mut config),
                // a snapshot we cannot read is as good as no snapshot
                Err(err) => debug!(error = %err, "discarding malformed config snapshot"),
            }
        }

        config.enabled = config.enabled || self.overrides.enabled;
        config.debug = config.debug || self.overrides.debug;
        config
    }

    fn with_config<T>(&self, f: impl FnOnce(&MockConfig) -> T) -> T {
        {
            let cached = self.cached.read().expect("config lock poisoned");
            if let Some(config) = cached.as_ref() {
                return f(config);
            }
        }
        let mut cached = self.cached.write().expect("config lock poisoned");
        f(cached.get_or_insert_with(|| self.resolve_uncached()))
    }

    fn with_config_mut<T>(&self, f: impl FnOnce(&mut MockConfig) -> T) -> T {
        let mut cached = self.cached.write().expect("config lock poisoned");
        f(cached.get_or_insert_with(|| self.resolve_uncached()))
    }

    /// Persist the scalar fields of `config` and update the cache to match.
    ///
    /// Rules are never persisted; the cached rule list is left untouched.
    pub fn persist(&self, config: &MockConfig) -> Result<(), ConfigError> {
        let snapshot = ConfigSnapshot::of(config);
        let raw = serde_json::to_string(&snapshot)?;
        self.store.set(STORAGE_KEY, &raw)?;
        self.with_config_mut(|cached| snapshot.apply(cached));
        Ok(())
    }

    /// Drop the persisted snapshot; the in-memory state is unaffected.
    pub fn clear_persisted(&self) -> Result<(), ConfigError> {
        self.store.remove(STORAGE_KEY)?;
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        self.with_config(|config| config.enabled)
    }

    pub fn debug(&self) -> bool {
        self.with_config(|config| config.debug)
    }

    pub fn default_delay(&self) -> u64 {
        self.with_config(|config| config.default_delay)
    }

    /// True when the current environment is explicitly enabled.
    pub fn environment_enabled(&self) -> bool {
        self.with_config(|config| config.environments.get(&self.environment) == Some(&true))
    }

    /// Snapshot of the live rules.
    pub fn rules(&self) -> Vec<Rule> {
        self.with_config(|config| config.rules.clone())
    }

    /// Replace the live rule list.
    pub fn set_rules(&self, mut rules: Vec<Rule>) {
        sort_by_priority(&mut rules);
        self.with_config_mut(|config| config.rules = rules);
    }

    /// Append rules to the live list, keeping it sorted.
    pub fn append_rules(&self, rules: Vec<Rule>) {
        self.with_config_mut(|config| {
            config.rules.extend(rules);
            sort_by_priority(&mut config.rules);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::persistence::MemoryStore;
    use crate::types::rule::UrlPattern;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn store_over(backing: Arc<MemoryStore>) -> ConfigStore {
        ConfigStore::new(Box::new(backing), EnvOverrides::default())
    }

    fn rule(pattern: &str, priority: i32) -> Rule {
        Rule::new(UrlPattern::literal(pattern), |_| Ok(json!(null))).priority(priority)
    }

    #[rstest]
    fn test_resolve_defaults() {
        let config = store_over(Arc::new(MemoryStore::new())).resolve();
        assert!(!config.enabled);
        assert!(!config.debug);
        assert_eq!(config.default_delay, 0);
        assert!(config.rules.is_empty());
        assert_eq!(config.environments.get("development"), Some(&true));
        assert_eq!(config.environments.get("production"), Some(&false));
    }

    #[rstest]
    fn test_resolve_merges_persisted_snapshot() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                STORAGE_KEY,
                r#"{"enabled":true,"environments":{"staging":true},"defaultDelay":120,"debug":true}"#,
            )
            .unwrap();

        let config = store_over(backing).resolve();
        assert!(config.enabled);
        assert!(config.debug);
        assert_eq!(config.default_delay, 120);
        assert_eq!(config.environments.get("staging"), Some(&true));
        // rules always start empty, whatever the snapshot says
        assert!(config.rules.is_empty());
    }

    #[rstest]
    #[case("not json at all")]
    #[case(r#"{"enabled": "yes"}"#)]
    #[case("")]
    fn test_malformed_snapshot_falls_back_to_defaults(#[case] raw: &str) {
        let backing = Arc::new(MemoryStore::new());
        backing.set(STORAGE_KEY, raw).unwrap();

        let config = store_over(backing).resolve();
        assert!(!config.enabled);
        assert_eq!(config.default_delay, 0);
    }

    #[rstest]
    fn test_env_overrides_or_into_persisted_values() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                STORAGE_KEY,
                r#"{"enabled":false,"environments":{},"defaultDelay":0,"debug":false}"#,
            )
            .unwrap();

        let overrides = EnvOverrides {
            environment: None,
            enabled: true,
            debug: true,
        };
        let config = ConfigStore::new(Box::new(backing), overrides).resolve();
        assert!(config.enabled);
        assert!(config.debug);
    }

    #[rstest]
    fn test_env_overrides_cannot_turn_flags_off() {
        let backing = Arc::new(MemoryStore::new());
        backing
            .set(
                STORAGE_KEY,
                r#"{"enabled":true,"environments":{},"defaultDelay":0,"debug":true}"#,
            )
            .unwrap();

        let config = ConfigStore::new(Box::new(backing), EnvOverrides::default()).resolve();
        assert!(config.enabled);
        assert!(config.debug);
    }

    #[rstest]
    fn test_resolve_is_cached() {
        let backing = Arc::new(MemoryStore::new());
        let store = store_over(Arc::clone(&backing));
        assert!(!store.resolve().enabled);

        // a later change to the backing store is not observed by the cache
        backing
            .set(
                STORAGE_KEY,
                r#"{"enabled":true,"environments":{},"defaultDelay":0,"debug":false}"#,
            )
            .unwrap();
        assert!(!store.resolve().enabled);
    }

    #[rstest]
    fn test_persist_writes_scalars_and_updates_cache() {
        let backing = Arc::new(MemoryStore::new());
        let store = store_over(Arc::clone(&backing));

        let mut config = store.resolve();
        config.enabled = true;
        config.default_delay = 300;
        store.persist(&config).unwrap();

        assert!(store.enabled());
        assert_eq!(store.default_delay(), 300);

        let raw = backing.get(STORAGE_KEY).unwrap();
        let snapshot: ConfigSnapshot = serde_json::from_str(&raw).unwrap();
        assert!(snapshot.enabled);
        assert_eq!(snapshot.default_delay, 300);

        // a fresh store over the same backing sees the persisted scalars
        let reopened = store_over(backing).resolve();
        assert!(reopened.enabled);
        assert_eq!(reopened.default_delay, 300);
        assert!(reopened.rules.is_empty());
    }

    #[rstest]
    fn test_persist_does_not_touch_cached_rules() {
        let store = store_over(Arc::new(MemoryStore::new()));
        store.append_rules(vec![rule("/api/users", 0)]);

        let mut config = store.resolve();
        config.enabled = true;
        config.rules.clear();
        store.persist(&config).unwrap();

        assert!(store.enabled());
        assert_eq!(store.rules().len(), 1);
    }

    #[rstest]
    fn test_clear_persisted_removes_snapshot_only() {
        let backing = Arc::new(MemoryStore::new());
        let store = store_over(Arc::clone(&backing));

        let mut config = store.resolve();
        config.enabled = true;
        store.persist(&config).unwrap();
        assert!(backing.get(STORAGE_KEY).is_some());

        store.clear_persisted().unwrap();
        assert_eq!(backing.get(STORAGE_KEY), None);
        // the cached configuration keeps its state
        assert!(store.enabled());
    }

    #[rstest]
    fn test_environment_enabled_requires_explicit_true() {
        let store = store_over(Arc::new(MemoryStore::new()));
        assert!(store.environment_enabled());

        let mut config = store.resolve();
        config.environments.insert("development".to_string(), false);
        store.persist(&config).unwrap();
        assert!(!store.environment_enabled());
    }

    #[rstest]
    fn test_environment_name_comes_from_overrides() {
        let overrides = EnvOverrides {
            environment: Some("staging".to_string()),
            enabled: false,
            debug: false,
        };
        let store = ConfigStore::new(Box::new(MemoryStore::new()), overrides);
        assert_eq!(store.environment(), "staging");
        // staging is not in the default environment map
        assert!(!store.environment_enabled());
    }

    #[rstest]
    fn test_append_rules_keeps_priority_order() {
        let store = store_over(Arc::new(MemoryStore::new()));
        store.append_rules(vec![rule("/low", 5), rule("/high", 1)]);
        store.append_rules(vec![rule("/middle", 3)]);

        let patterns: Vec<String> = store
            .rules()
            .iter()
            .map(|r| r.url_pattern.as_str().to_string())
            .collect();
        assert_eq!(patterns, vec!["/high", "/middle", "/low"]);
    }

    #[rstest]
    fn test_snapshot_wire_format_is_camel_case() {
        let snapshot = ConfigSnapshot::of(&MockConfig {
            default_delay: 42,
            ..MockConfig::default()
        });
        let raw = serde_json::to_string(&snapshot).unwrap();
        assert!(raw.contains("\"defaultDelay\":42"));
        assert!(!raw.contains("default_delay"));
    }
}
