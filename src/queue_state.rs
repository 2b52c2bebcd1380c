// Standard Library Imports
use std::sync::RwLock;

// External Crate Imports
use serde::{Deserialize, Serialize};
use tracing::trace;

// Local Crate Imports
use crate::on_update::{OnUpdate, OnUpdateCallback, SubscriptionId};

// Public API ==========================================================================================================

/// One of the boolean flags a queue exposes to the console.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Flag {
    Saving,
    AnyDirty,
    NewQueue,
    Error,
    DeletedQueue,
    OverCapacity,
}

impl Flag {
    pub const ALL: [Self; 6] = [
        Self::Saving,
        Self::AnyDirty,
        Self::NewQueue,
        Self::Error,
        Self::DeletedQueue,
        Self::OverCapacity,
    ];

    /// The field name used by the console (and by the queue-set JSON)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Saving => "isSaving",
            Self::AnyDirty => "isAnyDirty",
            Self::NewQueue => "isNewQueue",
            Self::Error => "isError",
            Self::DeletedQueue => "isDeletedQueue",
            Self::OverCapacity => "overCapacity",
        }
    }
}

/// A snapshot of every flag on a queue. The flags may overlap freely; the badge's priority order resolves them.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub is_saving: bool,
    pub is_any_dirty: bool,
    pub is_new_queue: bool,
    pub is_error: bool,
    pub is_deleted_queue: bool,
    pub over_capacity: bool,
}

impl Flags {
    #[must_use]
    pub const fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Saving => self.is_saving,
            Flag::AnyDirty => self.is_any_dirty,
            Flag::NewQueue => self.is_new_queue,
            Flag::Error => self.is_error,
            Flag::DeletedQueue => self.is_deleted_queue,
            Flag::OverCapacity => self.over_capacity,
        }
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        let field = match flag {
            Flag::Saving => &mut self.is_saving,
            Flag::AnyDirty => &mut self.is_any_dirty,
            Flag::NewQueue => &mut self.is_new_queue,
            Flag::Error => &mut self.is_error,
            Flag::DeletedQueue => &mut self.is_deleted_queue,
            Flag::OverCapacity => &mut self.over_capacity,
        };
        *field = value;
    }
}

/// Anything a `StatusIndicator` can watch: six boolean accessors, plus a way to hear about changes to them.
pub trait QueueStatus: Send + Sync {
    fn is_saving(&self) -> bool;
    fn is_any_dirty(&self) -> bool;
    fn is_new_queue(&self) -> bool;
    fn is_error(&self) -> bool;
    fn is_deleted_queue(&self) -> bool;
    fn over_capacity(&self) -> bool;

    /// Registers `on_update` to be called with the changed `Flag` whenever one of the accessors above changes value
    fn subscribe(&self, on_update: OnUpdateCallback) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);

    fn flags(&self) -> Flags {
        Flags {
            is_saving: self.is_saving(),
            is_any_dirty: self.is_any_dirty(),
            is_new_queue: self.is_new_queue(),
            is_error: self.is_error(),
            is_deleted_queue: self.is_deleted_queue(),
            over_capacity: self.over_capacity(),
        }
    }
}

#[derive(Debug)]
pub struct QueueState {
    name: String,
    flags: RwLock<Flags>,
    on_update: OnUpdate,
}

impl QueueState {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_flags(name, Flags::default())
    }

    #[must_use]
    pub fn with_flags(name: impl Into<String>, flags: Flags) -> Self {
        Self {
            name: name.into(),
            flags: RwLock::new(flags),
            on_update: OnUpdate::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self, flag: Flag) -> bool {
        self.flags.read().unwrap().get(flag)
    }

    /// Sets `flag`, notifying subscribers only if its value actually changed. Returns `true` if it did.
    pub fn set(&self, flag: Flag, value: bool) -> bool {
        let changed = {
            let mut flags = self.flags.write().unwrap();
            let changed = flags.get(flag) != value;
            flags.set(flag, value);
            changed
        };

        if changed {
            trace!(queue = %self.name, flag = flag.name(), value, "queue flag changed");
            self.on_update.call(flag);
        }

        changed
    }

    /// Applies a whole snapshot, notifying once for each flag that changed (in `Flag::ALL` order)
    pub fn set_flags(&self, flags: Flags) {
        for flag in Flag::ALL {
            self.set(flag, flags.get(flag));
        }
    }

    pub fn toggle(&self, flag: Flag) {
        let value = !self.get(flag);
        self.set(flag, value);
    }
}

impl QueueStatus for QueueState {
    fn is_saving(&self) -> bool {
        self.get(Flag::Saving)
    }

    fn is_any_dirty(&self) -> bool {
        self.get(Flag::AnyDirty)
    }

    fn is_new_queue(&self) -> bool {
        self.get(Flag::NewQueue)
    }

    fn is_error(&self) -> bool {
        self.get(Flag::Error)
    }

    fn is_deleted_queue(&self) -> bool {
        self.get(Flag::DeletedQueue)
    }

    fn over_capacity(&self) -> bool {
        self.get(Flag::OverCapacity)
    }

    fn subscribe(&self, on_update: OnUpdateCallback) -> SubscriptionId {
        self.on_update.subscribe(on_update)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.on_update.unsubscribe(id);
    }

    fn flags(&self) -> Flags {
        *self.flags.read().unwrap()
    }
}

// Unit Tests ==========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    fn record_updates(queue: &QueueState) -> Arc<Mutex<Vec<Flag>>> {
        let updates = Arc::new(Mutex::new(Vec::new()));
        queue.subscribe(Arc::new({
            let updates = Arc::clone(&updates);
            move |flag| updates.lock().unwrap().push(flag)
        }));
        updates
    }

    #[test]
    fn flags_get_and_set() {
        let mut flags = Flags::default();
        assert!(Flag::ALL.iter().all(|&flag| !flags.get(flag)));

        for flag in Flag::ALL {
            flags.set(flag, true);
            assert!(flags.get(flag));
        }
        assert!(Flag::ALL.iter().all(|&flag| flags.get(flag)));

        flags.set(Flag::Error, false);
        assert!(!flags.is_error);
        assert!(flags.is_saving);
    }

    #[test]
    fn flags_serde() {
        let flags = Flags {
            is_new_queue: true,
            over_capacity: true,
            ..Flags::default()
        };

        let json = serde_json::to_value(flags).unwrap();
        assert_eq!(
            json,
            json!({
                "isSaving": false,
                "isAnyDirty": false,
                "isNewQueue": true,
                "isError": false,
                "isDeletedQueue": false,
                "overCapacity": true,
            })
        );

        // Every field in the JSON object matches a `Flag::name()`
        let object = json.as_object().unwrap();
        assert!(Flag::ALL.iter().all(|flag| object.contains_key(flag.name())));

        // Missing fields default to `false`
        let partial: Flags = serde_json::from_value(json!({ "isAnyDirty": true })).unwrap();
        assert_eq!(
            partial,
            Flags {
                is_any_dirty: true,
                ..Flags::default()
            }
        );
    }

    #[test]
    fn set_only_notifies_on_change() {
        let queue = QueueState::new("root.default");
        let updates = record_updates(&queue);

        assert!(!queue.set(Flag::Saving, false));
        assert!(queue.set(Flag::Saving, true));
        assert!(!queue.set(Flag::Saving, true));
        assert!(queue.set(Flag::Saving, false));

        assert_eq!(updates.lock().unwrap()[..], [Flag::Saving, Flag::Saving]);
        assert!(!queue.is_saving());
    }

    #[test]
    fn set_flags() {
        let queue = QueueState::with_flags(
            "root.a",
            Flags {
                is_any_dirty: true,
                is_error: true,
                ..Flags::default()
            },
        );
        let updates = record_updates(&queue);

        let flags = Flags {
            is_saving: true,
            is_any_dirty: true,
            over_capacity: true,
            ..Flags::default()
        };
        queue.set_flags(flags);

        assert_eq!(
            updates.lock().unwrap()[..],
            [Flag::Saving, Flag::Error, Flag::OverCapacity]
        );
        assert_eq!(QueueStatus::flags(&queue), flags);
    }

    #[test]
    fn toggle() {
        let queue = QueueState::new("root.b");
        let updates = record_updates(&queue);

        queue.toggle(Flag::DeletedQueue);
        assert!(queue.is_deleted_queue());
        queue.toggle(Flag::DeletedQueue);
        assert!(!queue.is_deleted_queue());

        assert_eq!(
            updates.lock().unwrap()[..],
            [Flag::DeletedQueue, Flag::DeletedQueue]
        );
    }

    #[test]
    fn accessors_and_unsubscribe() {
        let queue = QueueState::new("root.c");
        assert_eq!(queue.name(), "root.c");

        let calls = Arc::new(Mutex::new(0));
        let id = queue.subscribe(Arc::new({
            let calls = Arc::clone(&calls);
            move |_| *calls.lock().unwrap() += 1
        }));

        for flag in Flag::ALL {
            queue.set(flag, true);
        }
        assert!(queue.is_saving());
        assert!(queue.is_any_dirty());
        assert!(queue.is_new_queue());
        assert!(queue.is_error());
        assert!(queue.is_deleted_queue());
        assert!(queue.over_capacity());
        assert_eq!(*calls.lock().unwrap(), 6);

        queue.unsubscribe(id);
        queue.set(Flag::Error, false);
        assert_eq!(*calls.lock().unwrap(), 6);
    }
}
