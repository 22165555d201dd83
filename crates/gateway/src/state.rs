//! Shared gateway state.

use std::sync::Arc;

use pharos_audit::{RunDefaults, engine::AuditRunner};

/// State handed to every handler. One runner serves all requests; each
/// request builds its own `RunConfig` and owns its own browser instances, so
/// nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<dyn AuditRunner>,
    pub defaults: RunDefaults,
}

impl AppState {
    pub fn new(runner: Arc<dyn AuditRunner>, defaults: RunDefaults) -> Self {
        Self { runner, defaults }
    }
}
