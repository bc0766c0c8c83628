//! Minimal push-based streams
//!
//! An [`Observable`] is cold: every call to `subscribe` runs the factory
//! passed to [`Observable::create`] again, and the returned [`Disposable`]
//! tears down exactly that subscription. Operators wrap the source in a new
//! observable, so per-subscription state (like the last value seen by
//! `skip_repeats`) is never shared between subscribers.

use std::cell::RefCell;
use std::rc::Rc;

mod incomplete;

pub use incomplete::{IncompleteSubscription, SubscriptionToken};

/// Receiving end handed to an observable's factory
pub struct Observer<T> {
    on_next: Rc<dyn Fn(&T)>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            on_next: Rc::clone(&self.on_next),
        }
    }
}

impl<T> Observer<T> {
    pub fn new(on_next: impl Fn(&T) + 'static) -> Self {
        Self {
            on_next: Rc::new(on_next),
        }
    }

    pub fn on_next(&self, value: &T) {
        (self.on_next)(value)
    }
}

/// Handle that detaches a stream subscription
///
/// `dispose` runs the teardown at most once; later calls are no-ops.
pub struct Disposable {
    teardown: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Disposable {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: RefCell::new(Some(Box::new(teardown))),
        }
    }

    /// A disposable with nothing to tear down
    pub fn empty() -> Self {
        Self {
            teardown: RefCell::new(None),
        }
    }

    pub fn dispose(&self) {
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.teardown.borrow().is_none()
    }
}

impl std::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A stream of values pushed to observers
pub struct Observable<T> {
    factory: Rc<dyn Fn(Observer<T>) -> Disposable>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T: 'static> Observable<T> {
    pub fn create(factory: impl Fn(Observer<T>) -> Disposable + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
        }
    }

    pub fn subscribe(&self, on_next: impl Fn(&T) + 'static) -> Disposable {
        (self.factory)(Observer::new(on_next))
    }

    pub fn map<U: 'static>(self, transform: impl Fn(&T) -> U + 'static) -> Observable<U> {
        let transform = Rc::new(transform);
        Observable::create(move |observer: Observer<U>| {
            let transform = Rc::clone(&transform);
            self.subscribe(move |value| observer.on_next(&transform(value)))
        })
    }

    pub fn filter(self, predicate: impl Fn(&T) -> bool + 'static) -> Observable<T> {
        let predicate = Rc::new(predicate);
        Observable::create(move |observer: Observer<T>| {
            let predicate = Rc::clone(&predicate);
            self.subscribe(move |value| {
                if predicate(value) {
                    observer.on_next(value);
                }
            })
        })
    }

    /// Drop every element that `is_repeat` considers equal to its predecessor
    pub fn skip_repeats_by(self, is_repeat: impl Fn(&T, &T) -> bool + 'static) -> Observable<T>
    where
        T: Clone,
    {
        let is_repeat = Rc::new(is_repeat);
        Observable::create(move |observer: Observer<T>| {
            let is_repeat = Rc::clone(&is_repeat);
            let previous: RefCell<Option<T>> = RefCell::new(None);
            self.subscribe(move |value| {
                let repeated = previous
                    .borrow()
                    .as_ref()
                    .is_some_and(|previous| is_repeat(previous, value));
                *previous.borrow_mut() = Some(value.clone());
                if !repeated {
                    observer.on_next(value);
                }
            })
        })
    }

    pub fn skip_repeats(self) -> Observable<T>
    where
        T: Clone + PartialEq,
    {
        self.skip_repeats_by(|previous, value| previous == value)
    }
}
