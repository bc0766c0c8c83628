//! Single-writer state container
//!
//! This crate provides:
//! - [`Store`]: owns the state and serializes every change through
//!   `dispatch` → middleware chain → reducer → subscribers
//! - [`Middleware`] and [`apply_middleware`]: ordered pre-processing of actions
//! - Callback subscriptions ([`StoreSubscriber`], [`Subscription`]) with
//!   projection and skip-repeats
//! - Stream subscriptions ([`Observable`], [`IncompleteSubscription`],
//!   [`SubscriptionToken`]) built on top of the callback subscriptions
//!
//! ```text
//! Action → Middleware Chain → Reducer → State → Subscribers
//! ```
//!
//! Subscribers are held weakly and dropped from the store on the next state
//! change after they are deallocated. A reducer, or a subscriber while it is
//! being notified, that dispatches is a contract violation and panics with
//! [`InvariantViolation`].

mod action;
mod error;
pub mod middleware;
mod options;
mod registry;
mod store;
pub mod stream;
mod subscriber;
mod subscription;

pub use action::{Action, BoxedAction};
pub use error::InvariantViolation;
pub use middleware::{apply_middleware, DispatchFunction, GetState, LoggingMiddleware, Middleware, MiddlewareApi};
pub use options::StoreOptions;
pub use store::{Reducer, Store};
pub use stream::{Disposable, IncompleteSubscription, Observable, Observer, SubscriptionToken};
pub use subscriber::{StoreSubscriber, SubscriberId};
pub use subscription::Subscription;
