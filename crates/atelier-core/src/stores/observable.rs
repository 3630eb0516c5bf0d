//! Observable single-value store.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifies a subscriber so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<S> = Rc<dyn Fn(&S)>;

struct StoreInner<S> {
    state: S,
    subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
    next_id: u64,
}

/// A shareable handle to one piece of state plus the callbacks watching it.
///
/// Clones share the same state. Everything runs on the UI thread, so the
/// handle is deliberately `!Send`.
pub struct Store<S> {
    inner: Rc<RefCell<StoreInner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<S: Clone + PartialEq + 'static> Store<S> {
    pub fn new(state: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Mutate the state. Subscribers run only if the state actually changed.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        // Subscribers are called after the borrow is released so they can read the store.
        let notify = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.state.clone();
            f(&mut inner.state);

            if inner.state == before {
                None
            } else {
                let subscribers: Vec<Subscriber<S>> = inner
                    .subscribers
                    .iter()
                    .map(|(_, subscriber)| Rc::clone(subscriber))
                    .collect();
                Some((inner.state.clone(), subscribers))
            }
        };

        if let Some((state, subscribers)) = notify {
            for subscriber in subscribers {
                subscriber(&state);
            }
        }
    }

    /// Replace the whole state.
    pub fn set(&self, state: S) {
        self.update(|current| *current = state);
    }

    /// Register a callback invoked with the new state after every change.
    pub fn subscribe(&self, subscriber: impl Fn(&S) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        let subscriber: Subscriber<S> = Rc::new(subscriber);
        inner.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<S: Clone + PartialEq + Default + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
