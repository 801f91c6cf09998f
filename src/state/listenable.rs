//! Value cells with change-triggered notification.
//!
//! A `Listenable` stores a value and a list of listeners. Setting a value
//! that differs from the stored one replaces it and then calls every
//! listener, synchronously and in registration order. Setting an equal value
//! does nothing.
//!
//! Registering a listener returns a `Subscription`; dropping it removes that
//! registration and no other. Dependents that must not write receive a
//! `ListenableView`, which can read and subscribe but not `set`.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{Arc, Weak},
};

use {
    parking_lot::{Mutex, RwLock},
    tracing::trace,
};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registered listeners keyed by registration id.
#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl Registry {
    fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Takes the entry out so the caller can drop it after unlocking.
    fn remove(&mut self, id: u64) -> Option<(u64, Listener)> {
        let index = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(index))
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

struct Shared<T> {
    value: RwLock<T>,
    registry: Arc<Mutex<Registry>>,
}

/// A shared value cell that notifies listeners when its value changes.
///
/// Clones share the same value and listeners.
pub struct Listenable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Listenable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Debug> Debug for Listenable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Listenable")
            .field("value", &*self.shared.value.read())
            .field("listeners", &self.shared.registry.lock().entries.len())
            .finish()
    }
}

impl<T: Default> Default for Listenable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Listenable<T> {
    /// Creates a cell holding `value` with no listeners.
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                registry: Arc::new(Mutex::new(Registry::default())),
            }),
        }
    }

    /// Reads the current value without cloning it.
    ///
    /// The value stays read-locked while `f` runs, so `f` must not `set`
    /// this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.shared.value.read())
    }

    /// Registers `listener` to run after every change.
    ///
    /// Registering the same closure twice makes it run twice per change.
    /// The listener runs as long as the returned `Subscription` is alive.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.shared.registry.lock().insert(Arc::new(listener));
        Subscription {
            registry: Arc::downgrade(&self.shared.registry),
            id,
        }
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.registry.lock().entries.len()
    }

    /// Returns a handle that can read and subscribe but not write.
    #[must_use]
    pub fn view(&self) -> ListenableView<T> {
        ListenableView {
            inner: self.clone(),
        }
    }

    /// Whether both handles refer to the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    fn notify(&self) {
        // Snapshot so that listeners added or removed mid-round do not
        // change who is called in this round. No lock is held while calling.
        let listeners = self.shared.registry.lock().snapshot();
        trace!(listeners = listeners.len(), "Notifying listeners");
        for listener in listeners {
            listener();
        }
    }
}

impl<T: Clone> Listenable<T> {
    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.read().clone()
    }
}

impl<T: PartialEq> Listenable<T> {
    /// Stores `new_value` and notifies listeners if it differs from the
    /// current value.
    ///
    /// # Returns
    ///
    /// Whether the value changed.
    pub fn set(&self, new_value: T) -> bool {
        {
            let mut value = self.shared.value.write();
            if *value == new_value {
                return false;
            }
            *value = new_value;
        }

        self.notify();
        true
    }
}

impl Listenable<String> {
    /// Resets the text to the empty string.
    ///
    /// # Returns
    ///
    /// Whether the text changed.
    pub fn clear(&self) -> bool {
        self.set(String::new())
    }
}

/// Read-only handle to a `Listenable`.
pub struct ListenableView<T> {
    inner: Listenable<T>,
}

impl<T> Clone for ListenableView<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Debug> Debug for ListenableView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("ListenableView").field(&self.inner).finish()
    }
}

impl<T> ListenableView<T> {
    /// Reads the current value without cloning it.
    ///
    /// Same locking rule as `Listenable::with`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Registers `listener` to run after every change.
    pub fn add_listener(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.inner.add_listener(listener)
    }

    /// Whether this view observes `cell`.
    #[must_use]
    pub fn observes(&self, cell: &Listenable<T>) -> bool {
        self.inner.ptr_eq(cell)
    }
}

impl<T: Clone> ListenableView<T> {
    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get()
    }
}

/// Handle for one listener registration.
///
/// Dropping the handle removes the registration.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    /// Removes the registration now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the registration alive for as long as the cell itself lives.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }

    /// Whether the registration is still attached to a live cell.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = registry.lock();
        registry.entries.iter().any(|(id, _)| *id == self.id)
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // The listener may own subscriptions on this cell, so it is
            // dropped only once the lock is released.
            let removed = registry.lock().remove(self.id);
            drop(removed);
        }
    }
}
