use crate::action::{Action, BoxedAction, Init};
use crate::error::InvariantViolation;
use crate::middleware::{apply_middleware, DispatchFunction, Middleware, MiddlewareApi};
use crate::options::StoreOptions;
use crate::registry::{SubscriptionBox, SubscriptionRegistry};
use crate::stream::{Disposable, IncompleteSubscription, Observable, Observer, SubscriptionToken};
use crate::subscriber::{StoreSubscriber, SubscriberId};
use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Reducer - pure function that produces new state from current state + action
///
/// Receives `None` only for the very first action of a store created
/// without an initial state. Must not dispatch.
pub type Reducer<S> = Box<dyn Fn(Option<S>, &dyn Action) -> S>;

/// Store - holds application state and manages the Redux loop
///
/// The Store follows the Redux pattern:
/// - Centralized state management
/// - Actions are dispatched to modify state
/// - Pure reducers handle state transitions
/// - State is immutable (replaced on each action)
///
/// `Store` is a cheap handle; clones refer to the same state. It is
/// single-threaded by construction (`!Send`, `!Sync`).
///
/// # Example
///
/// ```rust
/// use flux_store::{Action, LoggingMiddleware, Middleware, Store};
/// use std::rc::Rc;
///
/// fn reduce(state: Option<i64>, action: &dyn Action) -> i64 {
///     let count = state.unwrap_or_default();
///     match action.downcast_ref::<&str>() {
///         Some(&"increment") => count + 1,
///         _ => count,
///     }
/// }
///
/// let middleware: Vec<Box<dyn Middleware<i64>>> = vec![Box::new(LoggingMiddleware::new())];
/// let store = Store::new(reduce, None, middleware);
/// let printer = Rc::new(|count: &i64| println!("count = {}", count));
/// store.subscribe(&printer);
///
/// store.dispatch("increment");
/// assert_eq!(store.state(), Some(1));
/// ```
pub struct Store<S: 'static> {
    inner: Rc<StoreInner<S>>,
}

struct StoreInner<S: 'static> {
    state: RefCell<Option<S>>,
    reducer: Reducer<S>,
    dispatch_function: DispatchFunction,
    is_dispatching: Cell<bool>,
    is_notifying: Cell<bool>,
    subscriptions: RefCell<SubscriptionRegistry<S>>,
    subscription_tokens: RefCell<Vec<SubscriptionToken>>,
    options: StoreOptions,
}

impl<S: 'static> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Clone + 'static> Store<S> {
    /// Create a store with default options
    ///
    /// Middleware runs in list order: the first entry sees every action
    /// first. Without an initial state the reducer is immediately asked for
    /// one with an internal init action.
    pub fn new<R>(reducer: R, state: Option<S>, middleware: Vec<Box<dyn Middleware<S>>>) -> Self
    where
        R: Fn(Option<S>, &dyn Action) -> S + 'static,
    {
        Self::with_options(reducer, state, middleware, StoreOptions::default())
    }

    /// Create a store whose subscriptions follow `options`
    pub fn with_options<R>(
        reducer: R,
        state: Option<S>,
        middleware: Vec<Box<dyn Middleware<S>>>,
        options: StoreOptions,
    ) -> Self
    where
        R: Fn(Option<S>, &dyn Action) -> S + 'static,
    {
        let needs_init = state.is_none();
        let middleware_count = middleware.len();

        let inner = Rc::new_cyclic(|store: &Weak<StoreInner<S>>| {
            let terminal: DispatchFunction = {
                let store = Weak::clone(store);
                Rc::new(move |action: BoxedAction| {
                    if let Some(store) = store.upgrade() {
                        store.default_dispatch(action);
                    }
                })
            };
            let dispatch: DispatchFunction = {
                let store = Weak::clone(store);
                Rc::new(move |action: BoxedAction| {
                    if let Some(store) = store.upgrade() {
                        (store.dispatch_function)(action);
                    }
                })
            };
            let get_state = {
                let store = Weak::clone(store);
                Rc::new(move || store.upgrade().and_then(|inner| Store { inner }.state()))
            };

            StoreInner {
                state: RefCell::new(state),
                reducer: Box::new(reducer),
                dispatch_function: apply_middleware(middleware, MiddlewareApi::new(dispatch, get_state), terminal),
                is_dispatching: Cell::new(false),
                is_notifying: Cell::new(false),
                subscriptions: RefCell::new(SubscriptionRegistry::new()),
                subscription_tokens: RefCell::new(Vec::new()),
                options,
            }
        });

        log::debug!(
            "Store created with {} middleware (initial state: {}, skip repeats: {})",
            middleware_count,
            !needs_init,
            options.automatically_skips_repeats
        );

        let store = Self { inner };
        if needs_init {
            store.dispatch(Init);
        }
        store
    }

    /// Copy of the current state
    pub fn state(&self) -> Option<S> {
        self.inner.state.borrow().clone()
    }

    /// Options the store was created with
    pub fn options(&self) -> StoreOptions {
        self.inner.options
    }

    /// Dispatch an action through the middleware chain, then the reducer
    ///
    /// Returns after every subscriber has been notified. Dispatching from
    /// inside the reducer or from a subscriber while it is being notified is
    /// a contract violation and panics.
    pub fn dispatch(&self, action: impl Action) {
        self.dispatch_boxed(Box::new(action));
    }

    /// Dispatch an action that is already boxed, e.g. one received by a
    /// middleware
    pub fn dispatch_boxed(&self, action: BoxedAction) {
        log::trace!("Dispatching {:?}", action);
        let dispatch_function = Rc::clone(&self.inner.dispatch_function);
        dispatch_function(action);
    }

    /// Subscribe to every state change
    ///
    /// Delivers the current state right away if there is one. Subscribing
    /// the same subscriber again replaces its previous plain subscription.
    pub fn subscribe<Sub>(&self, subscriber: &Rc<Sub>)
    where
        Sub: StoreSubscriber<S> + 'static,
    {
        let original = Subscription::new();
        self.subscribe_box(SubscriptionBox::new(subscriber, original.clone(), original, None));
    }

    /// Subscribe through a transform pipeline, e.g. to select a substate
    ///
    /// Each call adds an independent subscription, even for the same
    /// subscriber.
    pub fn subscribe_with<T, Sub, F>(&self, subscriber: &Rc<Sub>, transform: F)
    where
        T: 'static,
        Sub: StoreSubscriber<T> + 'static,
        F: FnOnce(Subscription<S>) -> Subscription<T>,
    {
        let original = Subscription::new();
        let transformed = transform(original.clone());
        let transform_id = self.inner.subscriptions.borrow_mut().next_transform_id();
        self.subscribe_box(SubscriptionBox::new(subscriber, original, transformed, Some(transform_id)));
    }

    /// Like `subscribe`, but skips repeated states when the store's options
    /// ask for it
    pub fn subscribe_equatable<Sub>(&self, subscriber: &Rc<Sub>)
    where
        S: PartialEq,
        Sub: StoreSubscriber<S> + 'static,
    {
        if self.inner.options.automatically_skips_repeats {
            self.subscribe_with(subscriber, Subscription::skip_repeats);
        } else {
            self.subscribe(subscriber);
        }
    }

    /// Like `subscribe_with`, but skips repeated selected values when the
    /// store's options ask for it
    pub fn subscribe_with_equatable<T, Sub, F>(&self, subscriber: &Rc<Sub>, transform: F)
    where
        T: PartialEq + 'static,
        Sub: StoreSubscriber<T> + 'static,
        F: FnOnce(Subscription<S>) -> Subscription<T>,
    {
        let skips_repeats = self.inner.options.automatically_skips_repeats;
        self.subscribe_with(subscriber, move |subscription| {
            let transformed = transform(subscription);
            if skips_repeats {
                transformed.skip_repeats()
            } else {
                transformed
            }
        });
    }

    /// Remove every subscription of `subscriber`, callback and stream based
    ///
    /// Unknown subscribers are ignored.
    pub fn unsubscribe<Sub: ?Sized>(&self, subscriber: &Rc<Sub>) {
        let subscriber_id = SubscriberId::of(subscriber);
        let removed = self.inner.subscriptions.borrow_mut().remove_subscriber(subscriber_id);

        let tokens: Vec<SubscriptionToken> = {
            let mut tokens = self.inner.subscription_tokens.borrow_mut();
            let (matching, remaining): (Vec<_>, Vec<_>) = tokens
                .drain(..)
                .partition(|token| token.subscriber_id() == subscriber_id);
            *tokens = remaining;
            matching
        };
        // Disposing re-enters `unsubscribe` for the internal stream subscriber
        for token in &tokens {
            token.dispose();
        }

        if removed > 0 || !tokens.is_empty() {
            log::debug!(
                "Unsubscribed {:?}: {} subscription(s), {} token(s)",
                subscriber_id,
                removed,
                tokens.len()
            );
        }
    }

    /// Number of callback subscriptions currently registered
    ///
    /// Each stream-based subscription accounts for one internal callback
    /// subscription.
    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.borrow().len()
    }

    /// Number of stream subscription tokens the store is tracking
    pub fn token_count(&self) -> usize {
        self.inner.subscription_tokens.borrow().len()
    }

    /// Start a stream-based subscription
    pub fn subscription(&self) -> IncompleteSubscription<S, S> {
        IncompleteSubscription::new(self.clone(), self.observable())
    }

    /// State changes as a stream
    ///
    /// Each stream subscription registers one internal subscriber with the
    /// store, so it observes exactly what callback subscribers observe,
    /// starting with the current state. Disposing unregisters it.
    pub fn observable(&self) -> Observable<S> {
        let store = Rc::downgrade(&self.inner);
        Observable::create(move |observer: Observer<S>| {
            let Some(inner) = store.upgrade() else {
                return Disposable::empty();
            };
            let store = Store { inner };
            let forwarder = Rc::new(move |state: &S| observer.on_next(state));
            store.subscribe(&forwarder);

            let weak_store = Rc::downgrade(&store.inner);
            Disposable::new(move || {
                if let Some(inner) = weak_store.upgrade() {
                    Store { inner }.unsubscribe(&forwarder);
                }
            })
        })
    }

    pub(crate) fn register_token(&self, token: SubscriptionToken) {
        log::debug!("Stream subscription created for {:?}", token.subscriber_id());
        self.inner.subscription_tokens.borrow_mut().push(token);
    }

    fn subscribe_box(&self, subscription_box: SubscriptionBox<S>) {
        let subscription_box = Rc::new(subscription_box);
        log::debug!("Subscribed {:?}", subscription_box.key());
        self.inner
            .subscriptions
            .borrow_mut()
            .insert(Rc::clone(&subscription_box));

        if let Some(state) = self.state() {
            subscription_box.new_values(None, &state);
        }
    }
}

impl<S: Clone + 'static> StoreInner<S> {
    fn default_dispatch(&self, action: BoxedAction) {
        if self.is_dispatching.get() || self.is_notifying.get() {
            InvariantViolation::ConcurrentDispatch {
                action: format!("{:?}", action),
            }
            .raise();
        }

        let previous = self.state.borrow().clone();
        self.is_dispatching.set(true);
        let new_state = (self.reducer)(previous, &*action);
        self.is_dispatching.set(false);

        self.set_state(new_state);
    }

    /// Replace the state and notify every live subscriber
    fn set_state(&self, new_state: S) {
        let old_state = self.state.replace(Some(new_state.clone()));
        self.prune_tokens();

        let boxes = self.subscriptions.borrow_mut().live_boxes();
        log::trace!("Notifying {} subscription(s)", boxes.len());
        self.is_notifying.set(true);
        for subscription_box in boxes {
            subscription_box.new_values(old_state.as_ref(), &new_state);
        }
        self.is_notifying.set(false);
    }

    /// Dispose tokens whose subscriber is gone and forget disposed tokens
    fn prune_tokens(&self) {
        let stale: Vec<SubscriptionToken> = {
            let mut tokens = self.subscription_tokens.borrow_mut();
            let (stale, live): (Vec<_>, Vec<_>) = tokens
                .drain(..)
                .partition(|token| token.is_disposed() || !token.is_subscriber_alive());
            *tokens = live;
            stale
        };
        for token in stale {
            token.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct CounterState {
        count: i64,
        label: String,
    }

    #[derive(Debug)]
    enum CounterAction {
        Increment,
        Reset,
        Rename(&'static str),
    }

    fn reduce(state: Option<CounterState>, action: &dyn Action) -> CounterState {
        let mut state = state.unwrap_or_default();
        match action.downcast_ref::<CounterAction>() {
            Some(CounterAction::Increment) => state.count += 1,
            Some(CounterAction::Reset) => state.count = 0,
            Some(CounterAction::Rename(label)) => state.label = label.to_string(),
            None => {}
        }
        state
    }

    struct Recorder<T> {
        seen: RefCell<Vec<T>>,
    }

    impl<T: Clone> StoreSubscriber<T> for Recorder<T> {
        fn new_state(&self, state: &T) {
            self.seen.borrow_mut().push(state.clone());
        }
    }

    fn recorder<T>() -> Rc<Recorder<T>> {
        Rc::new(Recorder {
            seen: RefCell::new(Vec::new()),
        })
    }

    fn counter_store() -> Store<CounterState> {
        Store::new(reduce, Some(CounterState::default()), Vec::new())
    }

    fn counts(recorder: &Recorder<CounterState>) -> Vec<i64> {
        recorder.seen.borrow().iter().map(|state| state.count).collect()
    }

    fn tagging(tag: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Middleware<CounterState>> {
        let log = Rc::clone(log);
        Box::new(
            move |action: BoxedAction, _api: &MiddlewareApi<CounterState>, next: &DispatchFunction| {
                log.borrow_mut().push(tag.to_string());
                next(action);
            },
        )
    }

    #[test]
    fn test_counter_scenario() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe(&subscriber);

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Reset);
        store.dispatch(CounterAction::Increment);

        assert_eq!(counts(&subscriber), vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_state_is_reducer_folded_over_actions() {
        let store = counter_store();
        let actions = || {
            vec![
                CounterAction::Increment,
                CounterAction::Rename("a"),
                CounterAction::Increment,
                CounterAction::Reset,
                CounterAction::Increment,
            ]
        };

        for action in actions() {
            store.dispatch(action);
        }

        let expected = actions()
            .iter()
            .fold(CounterState::default(), |state, action| reduce(Some(state), action));
        assert_eq!(store.state(), Some(expected));
    }

    #[test]
    fn test_init_action_computes_default_state() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&log);
        let spy: Box<dyn Middleware<CounterState>> = Box::new(
            move |action: BoxedAction, _api: &MiddlewareApi<CounterState>, next: &DispatchFunction| {
                seen.borrow_mut().push(format!("{:?}", action));
                next(action);
            },
        );

        let store = Store::new(reduce, None, vec![spy]);

        assert_eq!(store.state(), Some(CounterState::default()));
        assert_eq!(*log.borrow(), vec!["Init".to_string()]);
    }

    #[test]
    fn test_middleware_runs_in_construction_order_before_reducer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let reducer_log = Rc::clone(&log);
        let store = Store::new(
            move |state: Option<CounterState>, action: &dyn Action| {
                reducer_log.borrow_mut().push("reducer".to_string());
                reduce(state, action)
            },
            Some(CounterState::default()),
            vec![tagging("M1", &log), tagging("M2", &log)],
        );

        store.dispatch(CounterAction::Increment);

        assert_eq!(
            *log.borrow(),
            vec!["M1".to_string(), "M2".to_string(), "reducer".to_string()]
        );
    }

    #[test]
    fn test_middleware_can_dispatch_and_read_state() {
        let seen_counts = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&seen_counts);
        let doubler: Box<dyn Middleware<CounterState>> = Box::new(
            move |action: BoxedAction, api: &MiddlewareApi<CounterState>, next: &DispatchFunction| {
                seen.borrow_mut().push(api.state().map(|state| state.count));
                if let Some(CounterAction::Rename("double")) = action.downcast_ref::<CounterAction>() {
                    api.dispatch(Box::new(CounterAction::Increment));
                    api.dispatch(Box::new(CounterAction::Increment));
                    return;
                }
                next(action);
            },
        );
        let store = Store::new(reduce, Some(CounterState::default()), vec![doubler]);

        store.dispatch(CounterAction::Rename("double"));

        let state = store.state().unwrap();
        assert_eq!(state.count, 2);
        assert_eq!(state.label, "");
        assert_eq!(*seen_counts.borrow(), vec![Some(0), Some(0), Some(1)]);
    }

    #[test]
    #[should_panic(expected = "ConcurrentMutationError")]
    fn test_dispatch_from_reducer_is_fatal() {
        let slot: Rc<RefCell<Option<Store<CounterState>>>> = Rc::new(RefCell::new(None));
        let reducer_slot = Rc::clone(&slot);
        let store = Store::new(
            move |state: Option<CounterState>, action: &dyn Action| {
                let store = reducer_slot.borrow().clone();
                if let Some(store) = store {
                    store.dispatch(CounterAction::Reset);
                }
                reduce(state, action)
            },
            Some(CounterState::default()),
            Vec::new(),
        );
        *slot.borrow_mut() = Some(store.clone());

        store.dispatch(CounterAction::Increment);
    }

    #[test]
    fn test_every_subscriber_sees_old_and_new_state() {
        let store = counter_store();
        let transitions: Vec<Rc<RefCell<Vec<(i64, i64)>>>> =
            (0..2).map(|_| Rc::new(RefCell::new(Vec::new()))).collect();
        let subscribers: Vec<Rc<Recorder<CounterState>>> = (0..2).map(|_| recorder()).collect();

        for (subscriber, log) in subscribers.iter().zip(&transitions) {
            let log = Rc::clone(log);
            store.subscribe_with(subscriber, move |subscription| {
                subscription.only_when(move |old: &CounterState, new: &CounterState| {
                    log.borrow_mut().push((old.count, new.count));
                    true
                })
            });
        }
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Increment);

        for (subscriber, log) in subscribers.iter().zip(&transitions) {
            assert_eq!(counts(subscriber), vec![0, 1, 2]);
            assert_eq!(*log.borrow(), vec![(0, 1), (1, 2)]);
        }
    }

    #[test]
    fn test_unchanged_state_still_notifies() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe(&subscriber);

        store.dispatch(CounterAction::Rename(""));
        store.dispatch("not a counter action");

        assert_eq!(counts(&subscriber), vec![0, 0, 0]);
    }

    #[test]
    fn test_equatable_selection_skips_repeats() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe_with_equatable(&subscriber, |subscription| {
            subscription.select(|state: &CounterState| state.count)
        });

        store.dispatch(CounterAction::Rename("a"));
        store.dispatch(CounterAction::Rename("b"));
        store.dispatch(CounterAction::Increment);

        assert_eq!(*subscriber.seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn test_equatable_state_skips_repeats() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe_equatable(&subscriber);

        store.dispatch(CounterAction::Rename("x"));
        store.dispatch(CounterAction::Rename("x"));

        assert_eq!(subscriber.seen.borrow().len(), 2);
    }

    #[test]
    fn test_skip_repeats_can_be_switched_off() {
        let store = Store::with_options(
            reduce,
            Some(CounterState::default()),
            Vec::new(),
            StoreOptions {
                automatically_skips_repeats: false,
            },
        );
        let subscriber = recorder();
        store.subscribe_with_equatable(&subscriber, |subscription| {
            subscription.select(|state: &CounterState| state.count)
        });

        store.dispatch(CounterAction::Rename("a"));
        store.dispatch(CounterAction::Increment);

        assert!(!store.options().automatically_skips_repeats);
        assert_eq!(*subscriber.seen.borrow(), vec![0, 0, 1]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = counter_store();
        let kept = recorder();
        let removed = recorder();
        let stranger: Rc<Recorder<CounterState>> = recorder();
        store.subscribe(&kept);
        store.subscribe(&removed);

        store.unsubscribe(&removed);
        store.unsubscribe(&removed);
        store.unsubscribe(&stranger);
        store.dispatch(CounterAction::Increment);

        assert_eq!(counts(&kept), vec![0, 1]);
        assert_eq!(counts(&removed), vec![0]);
        assert_eq!(store.subscription_count(), 1);
    }

    #[test]
    fn test_resubscribing_replaces_plain_subscription() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe(&subscriber);
        store.subscribe(&subscriber);

        store.dispatch(CounterAction::Increment);

        assert_eq!(store.subscription_count(), 1);
        assert_eq!(counts(&subscriber), vec![0, 0, 1]);
    }

    #[test]
    fn test_transformed_subscriptions_are_independent() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe_with(&subscriber, |subscription| subscription.select(|state: &CounterState| state.count));
        store.subscribe_with(&subscriber, |subscription| {
            subscription.select(|state: &CounterState| state.count * 100)
        });
        assert_eq!(store.subscription_count(), 2);

        store.unsubscribe(&subscriber);
        store.dispatch(CounterAction::Increment);

        assert_eq!(*subscriber.seen.borrow(), vec![0, 0]);
        assert_eq!(store.subscription_count(), 0);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned_on_next_dispatch() {
        let store = counter_store();
        let subscriber = recorder::<CounterState>();
        store.subscribe(&subscriber);
        drop(subscriber);
        assert_eq!(store.subscription_count(), 1);

        store.dispatch(CounterAction::Increment);

        assert_eq!(store.subscription_count(), 0);
    }

    struct Resetter {
        store: Store<CounterState>,
    }

    impl StoreSubscriber<i64> for Resetter {
        fn new_state(&self, count: &i64) {
            if *count == 1 {
                self.store.dispatch(CounterAction::Reset);
            }
        }
    }

    #[test]
    #[should_panic(expected = "ConcurrentMutationError")]
    fn test_dispatch_from_subscriber_during_notification_is_fatal() {
        let store = counter_store();
        let resetter = Rc::new(Resetter { store: store.clone() });
        let bystander = recorder();
        store.subscribe_with(&resetter, |subscription| subscription.select(|state: &CounterState| state.count));
        store.subscribe(&bystander);

        store.dispatch(CounterAction::Increment);
    }

    #[test]
    fn test_all_subscribers_end_on_the_current_state() {
        let store = counter_store();
        let first = recorder();
        let second = recorder();
        store.subscribe(&first);
        store.subscribe(&second);

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Rename("b"));
        store.dispatch(CounterAction::Reset);
        store.dispatch(CounterAction::Increment);

        let current = store.state();
        assert_eq!(first.seen.borrow().last().cloned(), current);
        assert_eq!(second.seen.borrow().last().cloned(), current);
        assert_eq!(*first.seen.borrow(), *second.seen.borrow());
        assert_eq!(counts(&first), vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_subscriber_may_dispatch_on_its_initial_delivery() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment);
        let resetter = Rc::new(Resetter { store: store.clone() });

        store.subscribe_with(&resetter, |subscription| subscription.select(|state: &CounterState| state.count));

        assert_eq!(store.state().map(|state| state.count), Some(0));
    }

    #[test]
    fn test_state_is_handed_out_by_value() {
        let store = counter_store();
        let mut copy = store.state().unwrap();
        copy.count = 42;

        assert_eq!(copy.count, 42);
        assert_eq!(store.state().unwrap().count, 0);
    }

    #[test]
    fn test_stream_subscription_until_disposed() {
        let store = counter_store();
        let subscriber = recorder();
        let token = store
            .subscription()
            .select(|state: &CounterState| state.count)
            .subscribe(&subscriber);
        assert_eq!(store.token_count(), 1);

        store.dispatch(CounterAction::Increment);
        token.dispose();
        token.dispose();
        store.dispatch(CounterAction::Increment);

        assert!(token.is_disposed());
        assert_eq!(*subscriber.seen.borrow(), vec![0, 1]);
        assert_eq!(store.subscription_count(), 0);
        assert_eq!(store.token_count(), 0);
    }

    #[test]
    fn test_stream_skip_repeats() {
        let store = counter_store();
        let subscriber = recorder();
        let _token = store
            .subscription()
            .map(|state: &CounterState| state.count % 2 == 0)
            .skip_repeats()
            .subscribe(&subscriber);

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Rename("same parity"));
        store.dispatch(CounterAction::Increment);

        assert_eq!(*subscriber.seen.borrow(), vec![true, false, true]);
    }

    #[test]
    fn test_stream_filter() {
        let store = counter_store();
        let subscriber = recorder();
        let _token = store
            .subscription()
            .filter(|state: &CounterState| state.count > 0)
            .subscribe(&subscriber);

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Reset);

        assert_eq!(counts(&subscriber), vec![1]);
    }

    #[test]
    fn test_unsubscribe_cancels_callback_and_stream_subscriptions() {
        let store = counter_store();
        let subscriber = recorder();
        store.subscribe_with(&subscriber, |subscription| subscription.select(|state: &CounterState| state.count));
        let token = store
            .subscription()
            .select(|state: &CounterState| state.count)
            .subscribe(&subscriber);
        assert_eq!(store.subscription_count(), 2);

        store.unsubscribe(&subscriber);
        store.dispatch(CounterAction::Increment);

        assert!(token.is_disposed());
        assert_eq!(*subscriber.seen.borrow(), vec![0, 0]);
        assert_eq!(store.subscription_count(), 0);
        assert_eq!(store.token_count(), 0);
    }

    #[test]
    fn test_dropped_stream_subscriber_is_pruned() {
        let store = counter_store();
        let subscriber = recorder::<i64>();
        let token = store
            .subscription()
            .select(|state: &CounterState| state.count)
            .subscribe(&subscriber);
        drop(subscriber);

        store.dispatch(CounterAction::Increment);

        assert!(token.is_disposed());
        assert_eq!(store.token_count(), 0);
        assert_eq!(store.subscription_count(), 0);
    }

    #[test]
    fn test_observable_follows_callback_notifications() {
        let store = counter_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let disposable = store
            .observable()
            .subscribe(move |state: &CounterState| sink.borrow_mut().push(state.count));

        store.dispatch(CounterAction::Increment);
        disposable.dispose();
        store.dispatch(CounterAction::Increment);

        assert_eq!(*seen.borrow(), vec![0, 1]);
        assert_eq!(store.subscription_count(), 0);
    }
}
