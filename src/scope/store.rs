//! Mutable Node Store
//!
//! Every scope owns a single lock-protected, dynamically typed value. The only
//! mutation primitive is an atomic read-transform-write, so concurrent writers
//! never lose updates. Each scope has its own lock; contention is limited to
//! callers sharing a scope.

use crate::scope::Scope;
use std::any::{type_name, Any};

impl Scope {
    /// Atomically transform the value stored on this scope
    ///
    /// Under the scope's lock, `transform` receives a clone of the stored
    /// value, or `None` when nothing is stored yet or `force_reset` is set. Its
    /// result is stored and a clone of it returned. If `transform` panics the
    /// stored value is left as it was.
    ///
    /// # Panics
    ///
    /// If the stored value is not a `V`.
    pub fn get_set_mutable_value<V, F>(&self, force_reset: bool, transform: F) -> V
    where
        V: Any + Clone + Send + Sync,
        F: FnOnce(Option<V>) -> V,
    {
        let mut slot = self.inner.mutable.lock();
        let current = match slot.as_ref() {
            Some(_) if force_reset => None,
            Some(boxed) => match boxed.downcast_ref::<V>() {
                Some(value) => Some(value.clone()),
                None => panic!(
                    "mutable value on scope {:?} is not a {}",
                    self.display_path(),
                    type_name::<V>()
                ),
            },
            None => None,
        };

        // the slot is only replaced once transform returns
        let next = transform(current);
        *slot = Some(Box::new(next.clone()));
        next
    }

    /// Current stored value, or `zero` if nothing has been stored
    ///
    /// This does not store `zero`.
    pub fn mutable_value<V>(&self, zero: V) -> V
    where
        V: Any + Clone + Send + Sync,
    {
        let slot = self.inner.mutable.lock();
        match slot.as_ref() {
            Some(boxed) => match boxed.downcast_ref::<V>() {
                Some(value) => value.clone(),
                None => panic!(
                    "mutable value on scope {:?} is not a {}",
                    self.display_path(),
                    type_name::<V>()
                ),
            },
            None => zero,
        }
    }
}
