//! LoggingMiddleware - logs all actions for debugging

use super::{DispatchFunction, Middleware, MiddlewareApi};
use crate::action::BoxedAction;

/// LoggingMiddleware - logs every action that passes through the store
///
/// Place it first in the middleware list to see actions before any other
/// middleware can block or replace them.
pub struct LoggingMiddleware {
    target: &'static str,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self {
            target: "flux_store::action",
        }
    }

    /// Log under a custom target, e.g. to filter store traffic separately
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Middleware<S> for LoggingMiddleware {
    fn handle(&self, action: BoxedAction, _api: &MiddlewareApi<S>, next: &DispatchFunction) {
        log::debug!(target: self.target, "Action: {:?}", action);
        // Always pass action through
        next(action);
    }
}
