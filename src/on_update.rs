// Standard Library Imports
use std::{
    fmt::{self, Debug, Formatter},
    sync::{
        Arc, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

// Local Crate Imports
use crate::queue_state::Flag;

// Public API ==========================================================================================================

#[derive(Clone, Default)]
pub struct OnUpdate {
    callbacks: Arc<RwLock<Vec<(SubscriptionId, OnUpdateCallback)>>>,
    next_id: Arc<AtomicU64>,
}

pub type OnUpdateCallback = Arc<dyn Fn(Flag) + Send + Sync>;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SubscriptionId(u64);

impl OnUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, on_update: OnUpdateCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().unwrap().push((id, on_update));

        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.write().unwrap();
        let before = callbacks.len();
        callbacks.retain(|&(subscribed, _)| subscribed != id);

        callbacks.len() != before
    }

    pub fn clear(&self) {
        self.callbacks.write().unwrap().clear();
    }

    pub fn call(&self, flag: Flag) {
        // NOTE: The callbacks are cloned out and the lock released before any of them run, leaving a callback free to
        // `subscribe()` or `unsubscribe()` without deadlocking
        let callbacks: Vec<_> = self
            .callbacks
            .read()
            .unwrap()
            .iter()
            .map(|(_, on_update)| Arc::clone(on_update))
            .collect();

        for on_update in callbacks {
            on_update(flag);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for OnUpdate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self
            .callbacks
            .read()
            .unwrap()
            .iter()
            .map(|&(id, _)| id)
            .collect();

        f.debug_struct("OnUpdate").field("subscriptions", &ids).finish()
    }
}

// Unit Tests ==========================================================================================================

#[cfg(test)]
pub mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder(updates: &Arc<Mutex<Vec<(&'static str, Flag)>>>, name: &'static str) -> OnUpdateCallback {
        let updates = Arc::clone(updates);
        Arc::new(move |flag| updates.lock().unwrap().push((name, flag)))
    }

    #[test]
    fn call() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let on_update = OnUpdate::new();

        // No callbacks subscribed (`Default` impl)
        on_update.call(Flag::Saving);
        assert!(updates.lock().unwrap().is_empty());
        assert!(on_update.is_empty());

        // Subscribe a callback and call it a couple of times
        let first = on_update.subscribe(recorder(&updates, "first_callback"));
        on_update.call(Flag::Saving);
        on_update.call(Flag::AnyDirty);
        assert_eq!(
            updates.lock().unwrap()[..],
            [
                ("first_callback", Flag::Saving),
                ("first_callback", Flag::AnyDirty)
            ]
        );

        // Subscribe a second callback; both are called, in subscription order
        let second = on_update.subscribe(recorder(&updates, "second_callback"));
        assert_ne!(first, second);
        updates.lock().unwrap().clear();
        on_update.call(Flag::Error);
        assert_eq!(
            updates.lock().unwrap()[..],
            [("first_callback", Flag::Error), ("second_callback", Flag::Error)]
        );

        // Unsubscribe the first callback, then try removing it again
        assert!(on_update.unsubscribe(first));
        assert!(!on_update.unsubscribe(first));
        assert_eq!(on_update.len(), 1);
        updates.lock().unwrap().clear();
        on_update.call(Flag::NewQueue);
        assert_eq!(
            updates.lock().unwrap()[..],
            [("second_callback", Flag::NewQueue)]
        );

        // Clear everything and call it a couple of times
        on_update.clear();
        on_update.call(Flag::NewQueue);
        on_update.call(Flag::NewQueue);
        assert_eq!(
            updates.lock().unwrap()[..],
            [("second_callback", Flag::NewQueue)]
        );
    }

    #[test]
    fn unsubscribe_from_inside_callback() {
        let on_update = OnUpdate::new();
        let calls = Arc::new(Mutex::new(0));

        let id = Arc::new(Mutex::new(None));
        let subscribed = on_update.subscribe(Arc::new({
            let on_update = on_update.clone();
            let calls = Arc::clone(&calls);
            let id = Arc::clone(&id);
            move |_| {
                *calls.lock().unwrap() += 1;
                if let Some(id) = *id.lock().unwrap() {
                    on_update.unsubscribe(id);
                }
            }
        }));
        *id.lock().unwrap() = Some(subscribed);

        on_update.call(Flag::OverCapacity);
        on_update.call(Flag::OverCapacity);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(on_update.is_empty());
    }

    #[test]
    fn debug() {
        let on_update = OnUpdate::new();
        assert_eq!(
            format!("{on_update:?}"),
            "OnUpdate { subscriptions: [] }"
        );

        on_update.subscribe(Arc::new(|_| ()));
        on_update.subscribe(Arc::new(|_| ()));
        assert_eq!(
            format!("{on_update:?}"),
            "OnUpdate { subscriptions: [SubscriptionId(0), SubscriptionId(1)] }"
        );
    }
}
