//! Mock engine components.
//!
//! - [`RuleRegistry`](registry::RuleRegistry): flattens statically
//!   registered rule collections into the configuration store
//! - [`MockHandler`](handler::MockHandler): decides matches and synthesizes
//!   responses
//! - [`MockInterceptor`](interceptor::MockInterceptor): request-time gate at
//!   the HTTP client boundary
//! - [`MockController`](controller::MockController): runtime administration
//! - [`MockEngine`](engine::MockEngine): composition root

pub mod controller;
pub mod engine;
pub mod handler;
pub mod interceptor;
pub mod registry;
