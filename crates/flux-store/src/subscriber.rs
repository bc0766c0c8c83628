use std::rc::Rc;

/// Receives the (selected) state every time the store's state changes
///
/// Subscribers are registered as `Rc`s and the store only keeps weak
/// references, so a subscriber lives exactly as long as its owner wants it
/// to. Closures taking `&T` are subscribers too.
pub trait StoreSubscriber<T> {
    fn new_state(&self, state: &T);
}

impl<T, F> StoreSubscriber<T> for F
where
    F: Fn(&T),
{
    fn new_state(&self, state: &T) {
        self(state)
    }
}

/// Identity of a subscriber: the address of its `Rc` allocation
///
/// Only meaningful while something still references the allocation, which
/// the registry guarantees by holding a `Weak` next to every id it stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

impl SubscriberId {
    pub fn of<Sub: ?Sized>(subscriber: &Rc<Sub>) -> Self {
        Self(Rc::as_ptr(subscriber) as *const () as usize)
    }
}
