use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{trace, warn};

/// A zero-argument change callback. Identity for `unsubscribe` is the `Arc`
/// pointer, so keep a clone of what you subscribed.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

const DEFAULT_MAX_PASSES: usize = 8;

pub struct ObservableStore {
    listeners: RwLock<Vec<Listener>>,
    notifying: AtomicBool,
    pending: AtomicBool,
    max_passes: usize,
}

impl Default for ObservableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObservableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableStore")
            .field("listeners", &self.len())
            .field("notifying", &self.notifying.load(Ordering::Acquire))
            .field("max_passes", &self.max_passes)
            .finish()
    }
}

/// Marks a notification as running and clears the flag on drop, including
/// when a listener panics. `pending` is left alone so a request that arrives
/// while the guard is being released is not lost.
struct NotifyGuard<'a> {
    notifying: &'a AtomicBool,
}

impl<'a> NotifyGuard<'a> {
    fn try_enter(notifying: &'a AtomicBool) -> Option<Self> {
        notifying
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| NotifyGuard { notifying })
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.notifying.store(false, Ordering::Release);
    }
}

impl ObservableStore {
    pub fn new() -> Self {
        Self::with_max_passes(DEFAULT_MAX_PASSES)
    }

    /// `max_passes` bounds how many back-to-back passes a single `notify` runs
    /// when listeners keep re-triggering it. Values below 1 are treated as 1.
    pub fn with_max_passes(max_passes: usize) -> Self {
        ObservableStore {
            listeners: RwLock::new(Vec::new()),
            notifying: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            max_passes: max_passes.max(1),
        }
    }

    /// Register a listener. The same listener may be registered more than once
    /// and is then called once per registration.
    pub fn subscribe(&self, listener: Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Remove every registration of `listener`. No-op if it was never
    /// subscribed.
    pub fn unsubscribe(&self, listener: &Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|registered| {
                !std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(listener))
            });
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_notifying(&self) -> bool {
        self.notifying.load(Ordering::Acquire)
    }

    /// Call every listener in subscription order.
    ///
    /// Each pass runs over the listeners registered when the pass started.
    /// A `notify` issued from inside a listener does not recurse: it schedules
    /// one more pass after the current one finishes. A panicking listener
    /// aborts the remaining listeners of the pass and propagates.
    ///
    /// Notification is meant to be driven from one thread at a time. A
    /// `notify` from another thread while a pass is running is folded into
    /// the follow-up pass rather than run concurrently; if it lands after the
    /// running `notify` has checked for follow-ups but before it returns, it
    /// is carried over to the next `notify` instead.
    pub fn notify(&self) {
        let Some(_guard) = NotifyGuard::try_enter(&self.notifying) else {
            trace!("notify requested during notification; scheduling another pass");
            self.pending.store(true, Ordering::Release);
            return;
        };

        let mut passes = 0;
        loop {
            self.pending.store(false, Ordering::Release);
            passes += 1;

            let snapshot = self.snapshot();
            trace!(pass = passes, listeners = snapshot.len(), "notifying listeners");
            for listener in &snapshot {
                listener();
            }

            if !self.pending.load(Ordering::Acquire) {
                break;
            }
            if passes >= self.max_passes {
                warn!(
                    passes,
                    "listeners kept re-triggering notification; dropping further passes"
                );
                break;
            }
        }
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
