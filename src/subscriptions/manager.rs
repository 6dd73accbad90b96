//! Subscription manager for broadcasting toast events.

use crate::records::Toast;
use crate::types::ToastId;
use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    ToastEvent,
};

/// Internal subscription state.
struct Subscription {
    filter: SubscriptionFilter,
    sender: Sender<ToastEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if buffer is full (subscriber will be dropped).
    fn try_send(&self, event: ToastEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(crossbeam_channel::TrySendError::Full(_)) => false,
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => false,
        }
    }

    /// Check if this subscription wants an event about `id`.
    fn matches_toast(&self, id: &ToastId) -> bool {
        self.filter.matches(id)
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    ///
    /// When `snapshot` is given it is queued as the first event, before any
    /// live event can reach the subscriber.
    pub fn subscribe(
        &self,
        config: SubscriptionConfig,
        snapshot: Option<Vec<Toast>>,
    ) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size.max(1));

        let subscription = Subscription {
            filter: config.filter,
            sender,
        };

        // A fresh channel holds at least one event, so the snapshot always fits.
        if let Some(toasts) = snapshot {
            subscription.try_send(ToastEvent::Snapshot { toasts });
        }

        self.subscriptions.write().insert(id, subscription);
        tracing::debug!(subscription = id.0, "subscriber attached");

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Send dropped event (best effort)
            let _ = sub.sender.try_send(ToastEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    // --- Broadcasting ---

    pub fn broadcast_created(&self, toast: &Toast) {
        let event = ToastEvent::Created {
            toast: toast.clone(),
        };
        self.broadcast(|sub| sub.matches_toast(&toast.id), event);
    }

    pub fn broadcast_updated(&self, toast: &Toast) {
        let event = ToastEvent::Updated {
            toast: toast.clone(),
        };
        self.broadcast(|sub| sub.matches_toast(&toast.id), event);
    }

    pub fn broadcast_dismissed(&self, id: &ToastId) {
        let event = ToastEvent::Dismissed { id: id.clone() };
        self.broadcast(|sub| sub.matches_toast(id), event);
    }

    pub fn broadcast_removed(&self, id: &ToastId) {
        let event = ToastEvent::Removed { id: id.clone() };
        self.broadcast(|sub| sub.matches_toast(id), event);
    }

    pub fn broadcast_dismissed_all(&self, ids: Vec<ToastId>) {
        self.broadcast(|_| true, ToastEvent::DismissedAll { ids });
    }

    pub fn broadcast_cleared(&self) {
        self.broadcast(|_| true, ToastEvent::Cleared);
    }

    pub fn broadcast_reset(&self) {
        self.broadcast(|_| true, ToastEvent::Reset);
    }

    /// Internal broadcast helper. Drops subscribers that fail to receive.
    fn broadcast<F>(&self, filter: F, event: ToastEvent)
    where
        F: Fn(&Subscription) -> bool,
    {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if filter(sub) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        // Remove dropped subscriptions
        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    tracing::warn!(subscription = id.0, "dropping slow toast subscriber");
                    // Try to notify about the drop (might fail, that's ok)
                    let _ = sub.sender.try_send(ToastEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
