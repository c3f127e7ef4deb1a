// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Arc, RwLock};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A shared latest-value cell with change notification.
///
/// Every `set` replaces the whole value and notifies every subscriber with the
/// new value; subscribing invokes the callback immediately with the current
/// value. There is one logical writer per store, writes are wholesale swaps,
/// and readers always observe a complete old or new value.
///
/// Subscriptions live for the lifetime of the store; there is no unsubscribe.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: RwLock<T>,
    subscribers: RwLock<Vec<Callback<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(initial),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// A clone of the latest value.
    pub fn get(&self) -> T {
        self.inner.value.read().expect("store lock poisoned").clone()
    }

    /// Replace the value wholesale, then notify subscribers.
    ///
    /// The value lock is released before callbacks run, so a subscriber may
    /// freely `get` this store or `set` other stores.
    pub fn set(&self, value: T) {
        *self.inner.value.write().expect("store lock poisoned") = value.clone();
        let subscribers = self.inner.subscribers.read().expect("store lock poisoned");
        for callback in subscribers.iter() {
            callback(&value);
        }
    }

    /// Register a subscriber. It is invoked immediately with the current value
    /// and again after every subsequent `set`.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let current = self.get();
        callback(&current);
        self.inner
            .subscribers
            .write()
            .expect("store lock poisoned")
            .push(Box::new(callback));
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
