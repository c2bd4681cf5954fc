//! Client-side HTTP mock interception engine.
//!
//! Waylay sits at the HTTP client boundary and decides, per outgoing
//! request, whether a synthetic response should be returned instead of
//! hitting the network. Responses come from a prioritized rule set with
//! simulated latency, activation is gated per environment, and the live
//! rules can be mutated at runtime without a restart.
//!
//! ```
//! use waylay_core::{EnvOverrides, MemoryStore, MockEngine, RuleRegistry};
//!
//! let engine = MockEngine::new(
//!     Box::new(MemoryStore::new()),
//!     EnvOverrides::default(),
//!     &RuleRegistry::with_builtin(),
//! );
//! engine.controller().enable();
//! ```

pub mod config;
pub mod matching;
pub mod mocks;
pub mod rules;
pub mod types;

pub use config::error::ConfigError;
pub use config::persistence::{FileStore, KvStore, MemoryStore};
pub use config::store::{ConfigSnapshot, ConfigStore, EnvOverrides, MockConfig};
pub use mocks::controller::{MockController, MockStats};
pub use mocks::engine::MockEngine;
pub use mocks::handler::MockHandler;
pub use mocks::interceptor::{InterceptOutcome, MockInterceptor};
pub use mocks::registry::{RuleCollection, RuleRegistry};
pub use types::context::{RequestContext, RequestOptions};
pub use types::response::ResponseBody;
pub use types::rule::{HttpMethod, ProducerError, ResponseProducer, Rule, UrlPattern};
