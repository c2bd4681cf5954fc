//! Request-time gate at the HTTP client boundary.

use crate::config::store::ConfigStore;
use crate::mocks::handler::MockHandler;
use crate::types::context::{RequestContext, RequestOptions};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Outcome of running a request through the mock gate.
#[derive(Debug, Clone, PartialEq)]
pub enum InterceptOutcome {
    /// Short-circuit: return this value as the final call result.
    Mocked(Value),
    /// Proceed with the real network call using the original options.
    PassThrough(RequestOptions),
}

/// The single integration point between the engine and the HTTP client.
///
/// For every outgoing request the interceptor builds a [`RequestContext`]
/// from the call options and either short-circuits with a synthesized
/// response or signals that the real request should proceed unmodified.
pub struct MockInterceptor {
    config: Arc<ConfigStore>,
    handler: Arc<MockHandler>,
}

impl MockInterceptor {
    pub fn new(config: Arc<ConfigStore>, handler: Arc<MockHandler>) -> Self {
        Self { config, handler }
    }

    /// Decide the fate of an outgoing request.
    ///
    /// A request that matches no rule, or whose matching producer fails,
    /// proceeds to the real transport with its options passed through
    /// untouched.
    pub async fn process_request(&self, options: RequestOptions) -> InterceptOutcome {
        let ctx = RequestContext::from_options(&options);

        if !self.handler.should_mock(&ctx) {
            return InterceptOutcome::PassThrough(options);
        }

        if self.config.debug() {
            debug!(
                url = %ctx.url,
                method = %ctx.method,
                body = ?ctx.body,
                "request matched mock rules"
            );
        }

        match self.handler.generate_response(&ctx).await {
            Some(response) => {
                if self.config.debug() {
                    debug!(url = %ctx.url, response = %response, "returning mock response");
                }
                InterceptOutcome::Mocked(response)
            }
            None => {
                debug!(url = %ctx.url, "mock synthesis failed, falling back to the real request");
                InterceptOutcome::PassThrough(options)
            }
        }
    }

    /// Live handler behind this interceptor.
    pub fn handler(&self) -> &Arc<MockHandler> {
        &self.handler
    }
}
