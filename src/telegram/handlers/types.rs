//! Handler dependencies shared across the dispatcher tree

use std::sync::Arc;

use crate::flow::{FlowLimits, SessionStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Arc<dyn SessionStore>,
    pub limits: FlowLimits,
}

impl HandlerDeps {
    pub fn new(sessions: Arc<dyn SessionStore>, limits: FlowLimits) -> Self {
        Self { sessions, limits }
    }
}
