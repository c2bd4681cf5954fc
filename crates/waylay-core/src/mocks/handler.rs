//! Mock decision and response synthesis.

use crate::config::store::ConfigStore;
use crate::matching::url_matches;
use crate::types::context::RequestContext;
use crate::types::response::ResponseBody;
use crate::types::rule::{sort_by_priority, Rule, UrlPattern};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Decides whether a request should be mocked and synthesizes the response.
///
/// The handler keeps its own copy of the rule list, sorted ascending by
/// priority with insertion order breaking ties. Structural mutations replace
/// the whole list atomically and write the new list back into the
/// configuration store; an in-flight request scans the list reference it
/// captured and never observes a partial update.
pub struct MockHandler {
    config: Arc<ConfigStore>,
    rules: RwLock<Arc<Vec<Rule>>>,
}

impl MockHandler {
    /// Handler over the store's current rule list.
    pub fn new(config: Arc<ConfigStore>) -> Self {
        let mut rules = config.rules();
        sort_by_priority(&mut rules);
        Self {
            config,
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    fn snapshot(&self) -> Arc<Vec<Rule>> {
        Arc::clone(&self.rules.read().expect("rule list lock poisoned"))
    }

    fn replace(&self, mut rules: Vec<Rule>) {
        sort_by_priority(&mut rules);
        self.config.set_rules(rules.clone());
        *self.rules.write().expect("rule list lock poisoned") = Arc::new(rules);
    }

    fn gate_open(&self) -> bool {
        self.config.enabled() && self.config.environment_enabled()
    }

    /// Whether any enabled rule matches the request.
    pub fn should_mock(&self, ctx: &RequestContext) -> bool {
        if !self.gate_open() {
            debug!(url = %ctx.url, "mocking is gated off for this environment");
            return false;
        }

        let rules = self.snapshot();
        let matched = find_matching_rule(&rules, ctx).is_some();
        debug!(url = %ctx.url, method = %ctx.method, matched, "mock decision");
        matched
    }

    /// Synthesize the mocked response for the request.
    ///
    /// Resolves to `None` when no enabled rule matches, or when the matching
    /// rule's producer fails: a failed mock is equivalent to no mock at all.
    pub async fn generate_response(&self, ctx: &RequestContext) -> Option<Value> {
        let rule = {
            let rules = self.snapshot();
            find_matching_rule(&rules, ctx).cloned()
        }?;

        let delay = rule.delay.unwrap_or_else(|| self.config.default_delay());
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.config.debug() {
            debug!(
                url = %ctx.url,
                method = %ctx.method,
                pattern = %rule.url_pattern,
                delay_ms = delay,
                "generating mock response"
            );
        }

        match (rule.producer)(ctx) {
            Ok(value) => Some(ResponseBody::classify(value).into_envelope()),
            Err(err) => {
                warn!(url = %ctx.url, error = %err, "mock producer failed");
                None
            }
        }
    }

    pub fn add_rule(&self, rule: Rule) {
        let mut rules = self.snapshot().as_ref().clone();
        rules.push(rule);
        self.replace(rules);
    }

    /// Remove every rule whose pattern equals `pattern`.
    pub fn remove_rule(&self, pattern: &UrlPattern) {
        let rules = self
            .snapshot()
            .iter()
            .filter(|rule| &rule.url_pattern != pattern)
            .cloned()
            .collect();
        self.replace(rules);
    }

    /// Flip the enabled flag of the first rule whose pattern equals
    /// `pattern`; returns the new state, or `None` when nothing matches.
    pub fn toggle_rule(&self, pattern: &UrlPattern) -> Option<bool> {
        let mut rules = self.snapshot().as_ref().clone();
        let rule = rules.iter_mut().find(|rule| &rule.url_pattern == pattern)?;
        rule.enabled = !rule.enabled;
        let state = rule.enabled;
        self.replace(rules);
        Some(state)
    }

    pub fn clear_rules(&self) {
        self.replace(Vec::new());
    }

    /// Snapshot of the live rules.
    pub fn rules(&self) -> Vec<Rule> {
        self.snapshot().as_ref().clone()
    }
}

/// First enabled rule matching the URL and method. Both `should_mock` and
/// `generate_response` resolve matches through this scan, so they always
/// agree on the winning rule.
fn find_matching_rule<'a>(rules: &'a [Rule], ctx: &RequestContext) -> Option<&'a Rule> {
    rules.iter().find(|rule| {
        rule.enabled
            && url_matches(&rule.url_pattern, &ctx.url)
            && rule.method.map_or(true, |method| method.matches(&ctx.method))
    })
}
