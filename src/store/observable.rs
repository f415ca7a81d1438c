//! `Store<T>`: a shared value with synchronous change notification.
//!
//! The value and the observer list live behind one `Rc<RefCell<..>>`.
//! Cloning a `Store` hands out another handle to the same state.
//!
//! No borrow is held while observers run, so an observer is free to read,
//! write or (un)subscribe on the store that is notifying it. A `set` made
//! during a pass stores the value at once but its pass is queued, and runs
//! after the current pass ends. Every observer's last notification is
//! therefore the value `get()` returns.
//!
//! An observer that captures a clone of its own store forms an `Rc` cycle
//! and keeps the store alive until it is unsubscribed. Capture a
//! [`WeakStore`] from [`Store::downgrade`] instead.

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::store::subscription::Subscription;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Observer<T> {
    id: u64,
    callback: Callback<T>,
}

// Manual Clone: `Callback<T>` is an `Rc`, `T` itself need not be `Clone`.
impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Rc::clone(&self.callback),
        }
    }
}

struct StoreInner<T> {
    /// Name used in log events.
    label: &'static str,
    value: T,
    next_id: u64,
    /// Registration order.
    observers: Vec<Observer<T>>,
    /// A pass is running; new passes go to `pending`.
    notifying: bool,
    /// Values whose passes are waiting, FIFO.
    pending: VecDeque<T>,
}

/// A single observable value.
pub struct Store<T> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

/// Non-owning handle to a [`Store`], for observers that write back to the
/// store they watch.
pub struct WeakStore<T> {
    inner: Weak<RefCell<StoreInner<T>>>,
}

impl<T> Clone for WeakStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakStore<T> {
    /// The store, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Store<T>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("label", &inner.label)
            .field("value", &inner.value)
            .field("observer_count", &inner.observers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Create a store holding `value`, with no observers.
    pub fn new(value: T) -> Self {
        Self::named("store", value)
    }

    /// Like [`Store::new`], with a label that shows up in log events.
    pub fn named(label: &'static str, value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                label,
                value,
                next_id: 0,
                observers: Vec::new(),
                notifying: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Name given at construction, `"store"` by default.
    pub fn label(&self) -> &'static str {
        self.inner.borrow().label
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value by reference.
    ///
    /// # Panics
    ///
    /// Panics if `f` calls `set`, `update`, `subscribe` or `unsubscribe` on
    /// this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every observer registered when its pass
    /// starts.
    ///
    /// Called from inside an observer, the value is stored immediately and
    /// the pass is queued behind the one in progress.
    pub fn set(&self, value: T) {
        let mut observers = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            if inner.notifying {
                inner.pending.push_back(value);
                return;
            }
            inner.notifying = true;
            inner.observers.clone()
        };
        let mut value = value;
        loop {
            self.notify(&observers, &value);
            let mut inner = self.inner.borrow_mut();
            match inner.pending.pop_front() {
                Some(next) => {
                    observers = inner.observers.clone();
                    value = next;
                }
                None => {
                    inner.notifying = false;
                    break;
                }
            }
        }
    }

    /// Replace the value with `f(current)`.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Register `observer` and call it once with the current value.
    ///
    /// Each call is a separate registration with its own [`Subscription`].
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let (registered, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let registered = Observer {
                id,
                callback: Rc::new(observer) as Callback<T>,
            };
            inner.observers.push(registered.clone());
            (registered, inner.value.clone())
        };
        let id = registered.id;
        self.notify(std::slice::from_ref(&registered), &current);

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().observers.retain(|o| o.id != id);
            }
        })
    }

    /// Handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore<T> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    fn notify(&self, observers: &[Observer<T>], value: &T) {
        let label = self.label();
        tracing::trace!(store = label, observers = observers.len(), "notifying observers");
        for observer in observers {
            let callback = &observer.callback;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(value))) {
                tracing::warn!(
                    store = label,
                    observer = observer.id,
                    "observer panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
