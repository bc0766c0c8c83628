//! Middleware system
//!
//! Middleware sits between `Store::dispatch` and the reducer, allowing
//! side effects, logging, and other cross-cutting concerns to be handled
//! in a composable way.
//!
//! ## Design
//!
//! ```text
//! dispatch → M1 → M2 → ... → Mn → reducer → state → subscribers
//! ```
//!
//! The chain is built once when the store is created. Each middleware can:
//! - Inspect the action and the current state
//! - Dispatch new actions (they re-enter the chain from the top)
//! - Replace the action it hands to `next`
//! - Block the action by not calling `next`
//!
//! ## Example
//!
//! ```rust
//! use flux_store::{BoxedAction, DispatchFunction, Middleware, MiddlewareApi};
//!
//! struct CountingMiddleware;
//!
//! impl<S> Middleware<S> for CountingMiddleware {
//!     fn handle(&self, action: BoxedAction, _api: &MiddlewareApi<S>, next: &DispatchFunction) {
//!         log::trace!("counting {:?}", action);
//!         next(action);
//!     }
//! }
//! ```

use crate::action::BoxedAction;
use std::rc::Rc;

mod logging;

pub use logging::LoggingMiddleware;

/// A link of the composed dispatch chain
pub type DispatchFunction = Rc<dyn Fn(BoxedAction)>;

/// Reads the store's state at the time it is called
pub type GetState<S> = Rc<dyn Fn() -> Option<S>>;

/// What a middleware may do with the store besides passing the action on
///
/// Both operations hold the store weakly. Once the store is gone, `dispatch`
/// does nothing and `state` returns `None`.
pub struct MiddlewareApi<S> {
    dispatch: DispatchFunction,
    get_state: GetState<S>,
}

impl<S> Clone for MiddlewareApi<S> {
    fn clone(&self) -> Self {
        Self {
            dispatch: Rc::clone(&self.dispatch),
            get_state: Rc::clone(&self.get_state),
        }
    }
}

impl<S> MiddlewareApi<S> {
    pub fn new(dispatch: DispatchFunction, get_state: GetState<S>) -> Self {
        Self {
            dispatch,
            get_state,
        }
    }

    /// Dispatch an action from the top of the middleware chain
    pub fn dispatch(&self, action: BoxedAction) {
        (self.dispatch)(action)
    }

    /// Current state of the store
    pub fn state(&self) -> Option<S> {
        (self.get_state)()
    }
}

/// Middleware trait - handles actions before they reach the reducer
///
/// Call `next(action)` to pass the action down the chain. Not calling it
/// consumes the action: nothing after this middleware, including the
/// reducer, will see it.
pub trait Middleware<S> {
    fn handle(&self, action: BoxedAction, api: &MiddlewareApi<S>, next: &DispatchFunction);
}

impl<S, F> Middleware<S> for F
where
    F: Fn(BoxedAction, &MiddlewareApi<S>, &DispatchFunction),
{
    fn handle(&self, action: BoxedAction, api: &MiddlewareApi<S>, next: &DispatchFunction) {
        self(action, api, next)
    }
}

/// Wrap `terminal` with every middleware of the list
///
/// Folds right-to-left, so the first middleware of the list is the
/// outermost link and sees every action first. The returned function owns
/// the middleware; nothing else keeps a reference to them.
pub fn apply_middleware<S: 'static>(
    middleware: Vec<Box<dyn Middleware<S>>>,
    api: MiddlewareApi<S>,
    terminal: DispatchFunction,
) -> DispatchFunction {
    middleware
        .into_iter()
        .rev()
        .fold(terminal, |next, middleware| {
            let api = api.clone();
            let link: DispatchFunction =
                Rc::new(move |action: BoxedAction| middleware.handle(action, &api, &next));
            link
        })
}
