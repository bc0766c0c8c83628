//! Callback subscriptions of a store
//!
//! The registry owns one [`SubscriptionBox`] per registration. Boxes hold
//! their subscriber weakly; boxes whose subscriber is gone are dropped on
//! the next notification pass.

use crate::subscriber::{StoreSubscriber, SubscriberId};
use crate::subscription::Subscription;
use std::any::Any;
use std::cell::Cell;
use std::rc::{Rc, Weak};

/// Registration identity: the subscriber plus the transform it registered
///
/// Transformed registrations get a fresh transform id each, so one
/// subscriber may hold several independent subscriptions. A plain
/// registration has no transform id and replaces an earlier plain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SubscriptionKey {
    pub subscriber: SubscriberId,
    pub transform: Option<u64>,
}

/// A subscriber bound to its subscription pipeline
pub(crate) struct SubscriptionBox<S> {
    key: SubscriptionKey,
    subscriber: Weak<dyn Any>,
    original: Subscription<S>,
    active: Cell<bool>,
}

impl<S: 'static> SubscriptionBox<S> {
    /// `transformed` must be `original` itself or derived from it
    pub fn new<T, Sub>(
        subscriber: &Rc<Sub>,
        original: Subscription<S>,
        transformed: Subscription<T>,
        transform: Option<u64>,
    ) -> Self
    where
        T: 'static,
        Sub: StoreSubscriber<T> + 'static,
    {
        let id = SubscriberId::of(subscriber);
        let target: Weak<dyn StoreSubscriber<T>> = Rc::<Sub>::downgrade(subscriber);
        transformed.observe(move |_old, new| {
            if let Some(subscriber) = target.upgrade() {
                subscriber.new_state(new);
            }
        });

        let subscriber: Weak<dyn Any> = Rc::<Sub>::downgrade(subscriber);
        Self {
            key: SubscriptionKey {
                subscriber: id,
                transform,
            },
            subscriber,
            original,
            active: Cell::new(true),
        }
    }

    pub fn key(&self) -> SubscriptionKey {
        self.key
    }

    pub fn is_alive(&self) -> bool {
        self.subscriber.strong_count() > 0
    }

    /// Feed a transition into the pipeline, unless this box was removed
    pub fn new_values(&self, old: Option<&S>, new: &S) {
        if self.active.get() {
            self.original.new_values(old, new);
        }
    }

    fn deactivate(&self) {
        self.active.set(false);
    }
}

pub(crate) struct SubscriptionRegistry<S> {
    boxes: Vec<Rc<SubscriptionBox<S>>>,
    next_transform: u64,
}

impl<S: 'static> SubscriptionRegistry<S> {
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            next_transform: 0,
        }
    }

    pub fn next_transform_id(&mut self) -> u64 {
        let id = self.next_transform;
        self.next_transform += 1;
        id
    }

    /// Add a box, replacing a registration with the same key
    pub fn insert(&mut self, subscription_box: Rc<SubscriptionBox<S>>) {
        let key = subscription_box.key();
        match self.boxes.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => {
                existing.deactivate();
                *existing = subscription_box;
            }
            None => self.boxes.push(subscription_box),
        }
    }

    /// Remove every registration of a subscriber, returns how many there were
    pub fn remove_subscriber(&mut self, subscriber: SubscriberId) -> usize {
        let before = self.boxes.len();
        self.boxes.retain(|subscription_box| {
            let keep = subscription_box.key().subscriber != subscriber;
            if !keep {
                subscription_box.deactivate();
            }
            keep
        });
        before - self.boxes.len()
    }

    /// Drop boxes of deallocated subscribers, returns how many were dropped
    pub fn prune(&mut self) -> usize {
        let before = self.boxes.len();
        self.boxes.retain(|subscription_box| subscription_box.is_alive());
        before - self.boxes.len()
    }

    /// Prune, then hand out the remaining boxes for a notification pass
    pub fn live_boxes(&mut self) -> Vec<Rc<SubscriptionBox<S>>> {
        let pruned = self.prune();
        if pruned > 0 {
            log::trace!("Pruned {} subscription(s) of dropped subscribers", pruned);
        }
        self.boxes.clone()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }
}
