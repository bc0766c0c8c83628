//! Push pipeline between the store and a callback subscriber
//!
//! Every state change enters a [`Subscription`] as an `(old, new)` pair.
//! Operators create a downstream subscription and forward (possibly
//! projected or filtered) pairs to it:
//!
//! ```rust
//! use flux_store::Subscription;
//!
//! #[derive(Clone)]
//! struct AppState {
//!     count: i64,
//!     title: String,
//! }
//!
//! fn transform(subscription: Subscription<AppState>) -> Subscription<i64> {
//!     subscription.select(|state| state.count).skip_repeats()
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

type Observer<T> = Rc<dyn Fn(Option<&T>, &T)>;

/// One stage of a subscription pipeline
///
/// Clones share the same stage.
pub struct Subscription<T> {
    observer: Rc<RefCell<Option<Observer<T>>>>,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            observer: Rc::clone(&self.observer),
        }
    }
}

impl<T: 'static> Subscription<T> {
    pub(crate) fn new() -> Self {
        Self {
            observer: Rc::new(RefCell::new(None)),
        }
    }

    /// Push a transition into this stage
    pub fn new_values(&self, old: Option<&T>, new: &T) {
        // Never call out while the slot is borrowed
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(old, new);
        }
    }

    /// Install the single downstream observer of this stage
    pub(crate) fn observe(&self, observer: impl Fn(Option<&T>, &T) + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    fn forward_to<U: 'static>(
        self,
        forward: impl Fn(&Subscription<U>, Option<&T>, &T) + 'static,
    ) -> Subscription<U> {
        let downstream = Subscription::new();
        let target = downstream.clone();
        self.observe(move |old, new| forward(&target, old, new));
        downstream
    }

    /// Project both sides of every transition
    pub fn select<U: 'static>(self, selector: impl Fn(&T) -> U + 'static) -> Subscription<U> {
        self.forward_to(move |target, old, new| {
            let old = old.map(&selector);
            let new = selector(new);
            target.new_values(old.as_ref(), &new);
        })
    }

    /// Drop transitions whose old and new values are repeats of each other
    ///
    /// The first delivery (no old value) always passes.
    pub fn skip_repeats_by(self, is_repeat: impl Fn(&T, &T) -> bool + 'static) -> Subscription<T> {
        self.forward_to(move |target, old, new| match old {
            Some(previous) if is_repeat(previous, new) => {}
            _ => target.new_values(old, new),
        })
    }

    pub fn skip_repeats(self) -> Subscription<T>
    where
        T: PartialEq,
    {
        self.skip_repeats_by(|old, new| old == new)
    }

    /// Drop transitions for which `predicate(old, new)` holds
    pub fn skip_when(self, predicate: impl Fn(&T, &T) -> bool + 'static) -> Subscription<T> {
        self.skip_repeats_by(predicate)
    }

    /// Forward only transitions for which `predicate(old, new)` holds
    ///
    /// The first delivery (no old value) always passes.
    pub fn only_when(self, predicate: impl Fn(&T, &T) -> bool + 'static) -> Subscription<T> {
        self.skip_repeats_by(move |old, new| !predicate(old, new))
    }
}
