//! Observable state containers for the front-end.
//!
//! A [`Store`] holds one value. Reads and writes are synchronous, and every
//! write is pushed to the registered observers before `set` returns.
//!
//! ## Notification rules
//!
//! 1. Observers run in registration order.
//! 2. Every `set` notifies, even if the value did not change.
//! 3. A new subscriber is called once immediately with the current value.
//! 4. The observer list is snapshotted when a pass starts; subscribing or
//!    unsubscribing from inside an observer only affects later passes.
//! 5. A `set` from inside an observer is queued behind the running pass, so
//!    each observer's last notification matches `get()`.
//! 6. A panicking observer is logged and skipped; the rest still run.
//!
//! Stores are `Rc`-based and stay on the thread that created them (the
//! browser's main thread or the worker that owns the WASM module).

pub mod observable;
pub mod subscription;

pub use observable::{Store, WeakStore};
pub use subscription::Subscription;
