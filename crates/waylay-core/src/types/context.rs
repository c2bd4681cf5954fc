//! Request context types.

use crate::matching::parse_query_string;
use serde_json::Value;
use std::collections::HashMap;

/// Client-level call options for an outgoing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub url: String,
    /// Defaults to GET when absent
    pub method: Option<String>,
    pub headers: HashMap<String, String>,
    /// Request body
    pub data: Option<Value>,
    /// Pre-parsed query parameters; parsed from the URL when absent
    pub query: Option<HashMap<String, String>>,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }
}

/// Read-only per-request context handed to rule producers.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    pub query: HashMap<String, String>,
}

impl RequestContext {
    /// Build a context from call options.
    ///
    /// The method defaults to GET and the query falls back to the URL's own
    /// query string.
    pub fn from_options(options: &RequestOptions) -> Self {
        let query = match &options.query {
            Some(query) => query.clone(),
            None => options
                .url
                .split('?')
                .nth(1)
                .map(parse_query_string)
                .unwrap_or_default(),
        };

        Self {
            url: options.url.clone(),
            method: options.method.clone().unwrap_or_else(|| "GET".to_string()),
            headers: options.headers.clone(),
            body: options.data.clone(),
            query,
        }
    }

    /// Query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Body field by name, when the body is a JSON object.
    pub fn body_field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get(name))
    }

    /// URL without its query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or("")
    }
}
