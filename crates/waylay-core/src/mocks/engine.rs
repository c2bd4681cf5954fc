//! Composition root wiring the store, handler, interceptor, and controller.

use crate::config::persistence::KvStore;
use crate::config::store::{ConfigStore, EnvOverrides};
use crate::mocks::controller::MockController;
use crate::mocks::handler::MockHandler;
use crate::mocks::interceptor::MockInterceptor;
use crate::mocks::registry::RuleRegistry;
use std::sync::Arc;

/// Fully wired mock engine.
///
/// Created once at startup and passed by reference to whatever needs it;
/// there is no ambient global instance. Construction resolves the
/// configuration, loads every registered rule collection, and shares one
/// store and one handler across the interceptor and the controller.
pub struct MockEngine {
    config: Arc<ConfigStore>,
    handler: Arc<MockHandler>,
    interceptor: MockInterceptor,
    controller: MockController,
}

impl MockEngine {
    pub fn new(store: Box<dyn KvStore>, overrides: EnvOverrides, registry: &RuleRegistry) -> Self {
        let config = Arc::new(ConfigStore::new(store, overrides));
        registry.load_into(&config);

        let handler = Arc::new(MockHandler::new(Arc::clone(&config)));
        let interceptor = MockInterceptor::new(Arc::clone(&config), Arc::clone(&handler));
        let controller = MockController::new(Arc::clone(&config), Arc::clone(&handler));

        Self {
            config,
            handler,
            interceptor,
            controller,
        }
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn handler(&self) -> &Arc<MockHandler> {
        &self.handler
    }

    pub fn interceptor(&self) -> &MockInterceptor {
        &self.interceptor
    }

    pub fn controller(&self) -> &MockController {
        &self.controller
    }
}
