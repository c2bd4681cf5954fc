//! Core rule types.

use crate::types::context::RequestContext;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// HTTP method for rule matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Case-insensitive parse (`"post"` and `"POST"` both resolve).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Compare against a request method string, case-insensitively.
    pub fn matches(&self, method: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(method)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL pattern of a rule.
///
/// A literal pattern matches by substring containment, or as a wildcard when
/// it contains `*`. A compiled pattern is tested directly against the URL.
/// See [`crate::matching::url_matches`] for the exact semantics.
#[derive(Debug, Clone)]
pub enum UrlPattern {
    Literal(String),
    Pattern(Regex),
}

impl UrlPattern {
    pub fn literal(pattern: impl Into<String>) -> Self {
        UrlPattern::Literal(pattern.into())
    }

    pub fn compiled(pattern: &str) -> Result<Self, regex::Error> {
        Ok(UrlPattern::Pattern(Regex::new(pattern)?))
    }

    /// The literal string, or the compiled pattern's source.
    pub fn as_str(&self) -> &str {
        match self {
            UrlPattern::Literal(literal) => literal,
            UrlPattern::Pattern(regex) => regex.as_str(),
        }
    }
}

/// Literal patterns compare by string identity, compiled patterns by their
/// serialized form.
impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UrlPattern::Literal(a), UrlPattern::Literal(b)) => a == b,
            (UrlPattern::Pattern(a), UrlPattern::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for UrlPattern {}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a response producer.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ProducerError(pub String);

impl ProducerError {
    pub fn new(message: impl Into<String>) -> Self {
        ProducerError(message.into())
    }
}

/// Builds a response payload (or a full envelope) from the request context.
pub type ResponseProducer =
    Arc<dyn Fn(&RequestContext) -> Result<Value, ProducerError> + Send + Sync>;

/// Mock rule definition
#[derive(Clone)]
pub struct Rule {
    /// Pattern tested against the request URL
    pub url_pattern: UrlPattern,
    /// HTTP method; `None` matches any method
    pub method: Option<HttpMethod>,
    /// Lower values win when several rules match
    pub priority: i32,
    /// Disabled rules are skipped during matching
    pub enabled: bool,
    /// Simulated latency in milliseconds; falls back to the config default
    pub delay: Option<u64>,
    /// Response producer invoked on a match
    pub producer: ResponseProducer,
}

impl Rule {
    /// Rule with defaults: any method, priority 0, enabled, no own delay.
    pub fn new<F>(url_pattern: UrlPattern, producer: F) -> Self
    where
        F: Fn(&RequestContext) -> Result<Value, ProducerError> + Send + Sync + 'static,
    {
        Self {
            url_pattern,
            method: None,
            priority: 0,
            enabled: true,
            delay: None,
            producer: Arc::new(producer),
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn delay_ms(mut self, delay: u64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("url_pattern", &self.url_pattern)
            .field("method", &self.method)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Stable ascending-priority sort; insertion order breaks ties.
pub fn sort_by_priority(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| rule.priority);
}
