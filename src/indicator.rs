// Standard Library Imports
use std::{
    fmt::{self, Debug, Formatter},
    sync::{Arc, Mutex, Weak},
};

// External Crate Imports
use color_eyre::{Result, eyre::eyre};
use tracing::{debug, trace};

// Local Crate Imports
use crate::{
    badge::{self, Badge, Color, Derived, Icon},
    on_update::{OnUpdate, OnUpdateCallback, SubscriptionId},
    queue_state::{Flag, QueueStatus},
};

// Public API ==========================================================================================================

/// Derives a queue's badge (`loaded`, `tooltipVisible`, `warningActive`, `color` and `icon`) and keeps it current.
///
/// Each value is computed on first read and cached. When the attached queue reports a flag change, only the values
/// depending on that flag are thrown away; everything else keeps returning its cached value.
///
/// The indicator never owns its queue: it holds a `Weak` reference, so reading anything from a detached indicator,
/// or from one whose queue has since been dropped, is an error.
pub struct StatusIndicator {
    inner: Arc<Mutex<Inner>>,
    on_update: OnUpdate,
}

impl StatusIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            on_update: OnUpdate::new(),
        }
    }

    #[must_use]
    pub fn attached(queue: Arc<dyn QueueStatus>) -> Self {
        let indicator = Self::new();
        indicator.attach(queue);
        indicator
    }

    /// Starts watching `queue`, detaching from any queue that was being watched before. Only a `Weak` reference to
    /// `queue` is kept; its owner decides how long it lives.
    pub fn attach(&self, queue: Arc<dyn QueueStatus>) {
        let subscription = queue.subscribe(Arc::new({
            let inner = Arc::downgrade(&self.inner);
            let on_update = self.on_update.clone();
            move |flag| Self::queue_updated(&inner, &on_update, flag)
        }));

        // NOTE: The old attachment is swapped out under the same lock that installs the new one, so racing calls to
        // `attach()` each unsubscribe exactly the attachment they replaced
        let previous = {
            let mut inner = self.inner.lock().unwrap();
            inner.cache = Cache::default();
            inner.attachment.replace(Attachment {
                queue: Arc::downgrade(&queue),
                subscription,
            })
        };
        debug!(?subscription, "status indicator attached");

        if let Some(previous) = previous {
            previous.release();
        }
    }

    /// Stops watching the current queue (if any) and hands it back, provided it's still alive
    pub fn detach(&self) -> Option<Arc<dyn QueueStatus>> {
        let attachment = {
            let mut inner = self.inner.lock().unwrap();
            inner.cache = Cache::default();
            inner.attachment.take()
        };

        attachment.and_then(Attachment::release)
    }

    /// Whether there's a queue attached that is still alive
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner
            .lock()
            .unwrap()
            .attachment
            .as_ref()
            .is_some_and(|attachment| attachment.queue.strong_count() > 0)
    }

    /// Registers a dependent (usually a renderer) to be told whenever a value it may have read has gone stale
    pub fn subscribe(&self, on_update: OnUpdateCallback) -> SubscriptionId {
        self.on_update.subscribe(on_update)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.on_update.unsubscribe(id)
    }

    pub fn loaded(&self) -> Result<bool> {
        self.inner.lock().unwrap().loaded()
    }

    pub fn tooltip_visible(&self) -> Result<bool> {
        self.inner.lock().unwrap().tooltip_visible()
    }

    pub fn warning_active(&self) -> Result<bool> {
        self.inner.lock().unwrap().warning_active()
    }

    pub fn color(&self) -> Result<Color> {
        self.inner.lock().unwrap().color()
    }

    pub fn icon(&self) -> Result<Icon> {
        self.inner.lock().unwrap().icon()
    }

    /// Reads every value at once, under a single lock
    pub fn badge(&self) -> Result<Badge> {
        let mut inner = self.inner.lock().unwrap();

        Ok(Badge {
            loaded: inner.loaded()?,
            tooltip_visible: inner.tooltip_visible()?,
            warning_active: inner.warning_active()?,
            color: inner.color()?,
            icon: inner.icon()?,
        })
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StatusIndicator {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Debug for StatusIndicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap();

        f.debug_struct("StatusIndicator")
            .field(
                "subscription",
                &inner.attachment.as_ref().map(|a| a.subscription),
            )
            .field("cache", &inner.cache)
            .field("on_update", &self.on_update)
            .finish()
    }
}

// Private Helper Code =================================================================================================

#[derive(Default)]
struct Inner {
    attachment: Option<Attachment>,
    cache: Cache,
}

struct Attachment {
    queue: Weak<dyn QueueStatus>,
    subscription: SubscriptionId,
}

impl Attachment {
    fn release(self) -> Option<Arc<dyn QueueStatus>> {
        let Self {
            queue,
            subscription,
        } = self;
        debug!(?subscription, "status indicator detached");

        // NOTE: A queue that's already gone has taken its subscriptions with it
        let queue = queue.upgrade()?;
        queue.unsubscribe(subscription);

        Some(queue)
    }
}

#[derive(Default, Debug)]
struct Cache {
    loaded: Option<bool>,
    tooltip_visible: Option<bool>,
    warning_active: Option<bool>,
    color: Option<Color>,
    icon: Option<Icon>,
    recomputations: usize,
}

impl StatusIndicator {
    // NOTE: The queue only holds a `Weak` to the indicator's state, so a queue can't keep a dropped indicator alive
    fn queue_updated(inner: &Weak<Mutex<Inner>>, on_update: &OnUpdate, flag: Flag) {
        let Some(inner) = inner.upgrade() else {
            return;
        };

        // NOTE: The lock is released before dependents are called, so they're free to read the new values
        let invalidated = inner.lock().unwrap().cache.invalidate(flag);
        if invalidated {
            on_update.call(flag);
        }
    }
}

impl Inner {
    fn loaded(&mut self) -> Result<bool> {
        self.read(Derived::Loaded, |cache| &mut cache.loaded, |queue| {
            badge::loaded(&queue.flags())
        })
    }

    fn tooltip_visible(&mut self) -> Result<bool> {
        self.read(
            Derived::TooltipVisible,
            |cache| &mut cache.tooltip_visible,
            |queue| badge::tooltip_visible(&queue.flags()),
        )
    }

    fn warning_active(&mut self) -> Result<bool> {
        self.read(
            Derived::WarningActive,
            |cache| &mut cache.warning_active,
            |queue| badge::warning_active(&queue.flags()),
        )
    }

    fn color(&mut self) -> Result<Color> {
        self.read(Derived::Color, |cache| &mut cache.color, |queue| {
            badge::resolve(&queue.flags()).0
        })
    }

    fn icon(&mut self) -> Result<Icon> {
        self.read(Derived::Icon, |cache| &mut cache.icon, |queue| {
            badge::resolve(&queue.flags()).1
        })
    }

    fn read<T: Copy + Debug>(
        &mut self,
        derived: Derived,
        slot: impl Fn(&mut Cache) -> &mut Option<T>,
        compute: impl FnOnce(&dyn QueueStatus) -> T,
    ) -> Result<T> {
        let Some(queue) = self
            .attachment
            .as_ref()
            .and_then(|attachment| attachment.queue.upgrade())
        else {
            return Err(eyre!(
                "a `StatusIndicator` must be attached to a live queue before its `{}` can be read",
                derived.name()
            ));
        };

        if let Some(value) = *slot(&mut self.cache) {
            return Ok(value);
        }

        let value = compute(queue.as_ref());
        trace!(derived = derived.name(), ?value, "recomputed");

        *slot(&mut self.cache) = Some(value);
        self.cache.recomputations += 1;

        Ok(value)
    }
}

impl Cache {
    /// Forgets every cached value depending on `flag`. Returns `true` if anything was actually forgotten.
    fn invalidate(&mut self, flag: Flag) -> bool {
        let mut invalidated = false;

        for derived in Derived::ALL {
            if !flag.affects(derived) {
                continue;
            }

            let was_cached = match derived {
                Derived::Loaded => self.loaded.take().is_some(),
                Derived::TooltipVisible => self.tooltip_visible.take().is_some(),
                Derived::WarningActive => self.warning_active.take().is_some(),
                Derived::Color => self.color.take().is_some(),
                Derived::Icon => self.icon.take().is_some(),
            };

            if was_cached {
                trace!(flag = flag.name(), derived = derived.name(), "invalidated");
            }
            invalidated |= was_cached;
        }

        invalidated
    }
}

// Unit Tests ==========================================================================================================
