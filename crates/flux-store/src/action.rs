//! Actions - opaque values describing "something happened"
//!
//! Any `Debug + 'static` type is an action. Reducers and middleware receive
//! actions as `&dyn Action` and downcast to the concrete types they handle:
//!
//! ```rust
//! use flux_store::Action;
//!
//! #[derive(Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! fn is_increment(action: &dyn Action) -> bool {
//!     matches!(action.downcast_ref::<CounterAction>(), Some(CounterAction::Increment))
//! }
//!
//! assert!(is_increment(&CounterAction::Increment));
//! ```

use std::any::Any;
use std::fmt::Debug;

/// Marker capability for everything that can be dispatched to a store
pub trait Action: Any + Debug + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Debug> Action for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Action {
    /// Downcast to a concrete action type
    pub fn downcast_ref<T: Action>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Check whether this action is of type `T`
    pub fn is<T: Action>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// An owned action travelling through the middleware chain
pub type BoxedAction = Box<dyn Action>;

/// Dispatched by a store created without an initial state, so the reducer
/// can produce the default state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Init;
