//! Stream-based subscriptions to a store

use super::{Disposable, Observable};
use crate::store::Store;
use crate::subscriber::{StoreSubscriber, SubscriberId};
use std::any::Any;
use std::rc::{Rc, Weak};

/// Cancellation handle of a stream-based subscription
///
/// Clones refer to the same subscription. The store keeps one clone so
/// `Store::unsubscribe` can cancel every token of a subscriber.
#[derive(Clone)]
pub struct SubscriptionToken {
    inner: Rc<TokenInner>,
}

struct TokenInner {
    subscriber_id: SubscriberId,
    subscriber: Weak<dyn Any>,
    disposable: Disposable,
}

impl SubscriptionToken {
    fn new<Sub: 'static>(subscriber: &Rc<Sub>, disposable: Disposable) -> Self {
        let weak: Weak<dyn Any> = Rc::<Sub>::downgrade(subscriber);
        Self {
            inner: Rc::new(TokenInner {
                subscriber_id: SubscriberId::of(subscriber),
                subscriber: weak,
                disposable,
            }),
        }
    }

    pub fn subscriber_id(&self) -> SubscriberId {
        self.inner.subscriber_id
    }

    pub fn dispose(&self) {
        self.inner.disposable.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposable.is_disposed()
    }

    pub(crate) fn is_subscriber_alive(&self) -> bool {
        self.inner.subscriber.strong_count() > 0
    }
}

impl PartialEq for SubscriptionToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for SubscriptionToken {}

impl std::fmt::Debug for SubscriptionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionToken")
            .field("subscriber_id", &self.inner.subscriber_id)
            .field("disposable", &self.inner.disposable)
            .finish()
    }
}

/// Builder over a store's state stream, finished by attaching a subscriber
///
/// ```rust
/// use flux_store::{Action, Store};
/// use std::rc::Rc;
///
/// let store = Store::new(|state: Option<i64>, _action: &dyn Action| state.unwrap_or(0) + 1, Some(0), Vec::new());
/// let parity = Rc::new(|even: &bool| println!("even: {}", even));
/// let token = store
///     .subscription()
///     .map(|count| count % 2 == 0)
///     .skip_repeats()
///     .subscribe(&parity);
///
/// store.dispatch("tick");
/// token.dispose();
/// ```
pub struct IncompleteSubscription<S: 'static, T> {
    store: Store<S>,
    stream: Observable<T>,
}

impl<S: Clone + 'static, T: 'static> IncompleteSubscription<S, T> {
    pub(crate) fn new(store: Store<S>, stream: Observable<T>) -> Self {
        Self { store, stream }
    }

    pub fn map<U: 'static>(self, transform: impl Fn(&T) -> U + 'static) -> IncompleteSubscription<S, U> {
        IncompleteSubscription::new(self.store, self.stream.map(transform))
    }

    /// Same as `map`, reads better when picking a substate
    pub fn select<U: 'static>(self, selector: impl Fn(&T) -> U + 'static) -> IncompleteSubscription<S, U> {
        self.map(selector)
    }

    pub fn filter(self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self::new(self.store, self.stream.filter(predicate))
    }

    pub fn skip_repeats_by(self, is_repeat: impl Fn(&T, &T) -> bool + 'static) -> Self
    where
        T: Clone,
    {
        Self::new(self.store, self.stream.skip_repeats_by(is_repeat))
    }

    pub fn skip_repeats(self) -> Self
    where
        T: Clone + PartialEq,
    {
        Self::new(self.store, self.stream.skip_repeats())
    }

    /// Attach the subscriber and start receiving values
    ///
    /// The subscriber is held weakly. The current state is delivered
    /// immediately if the store has one.
    pub fn subscribe<Sub>(self, subscriber: &Rc<Sub>) -> SubscriptionToken
    where
        Sub: StoreSubscriber<T> + 'static,
    {
        let target: Weak<dyn StoreSubscriber<T>> = Rc::<Sub>::downgrade(subscriber);
        let disposable = self.stream.subscribe(move |value| {
            if let Some(subscriber) = target.upgrade() {
                subscriber.new_state(value);
            }
        });
        let token = SubscriptionToken::new(subscriber, disposable);
        self.store.register_token(token.clone());
        token
    }
}
