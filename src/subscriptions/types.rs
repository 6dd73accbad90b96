//! Subscription types for live store updates.

use crate::error::Result;
use crate::records::Toast;
use crate::types::ToastId;
use serde::Serialize;

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Send the current toasts as a `Snapshot` event first.
    /// Default: true
    pub replay: bool,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            replay: true,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Only deliver per-toast events for these ids (None = all toasts).
    /// Batch events are always delivered.
    pub ids: Option<Vec<ToastId>>,
}

impl SubscriptionFilter {
    /// Subscribe to every toast.
    pub fn all() -> Self {
        Self::default()
    }

    /// Subscribe to specific toasts.
    pub fn ids(ids: Vec<ToastId>) -> Self {
        Self { ids: Some(ids) }
    }

    pub(crate) fn matches(&self, id: &ToastId) -> bool {
        match &self.ids {
            Some(ids) => ids.contains(id),
            None => true,
        }
    }
}

/// Events emitted by subscriptions.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToastEvent {
    /// Current toasts at subscription time, newest first.
    Snapshot {
        toasts: Vec<Toast>,
    },

    // --- Record Events ---
    /// A new toast was inserted at the front.
    Created {
        toast: Toast,
    },

    /// An existing toast was overwritten in place.
    Updated {
        toast: Toast,
    },

    /// A toast was marked for removal.
    Dismissed {
        id: ToastId,
    },

    /// A toast was deleted.
    Removed {
        id: ToastId,
    },

    // --- Batch Events ---
    /// Every active toast was marked for removal.
    DismissedAll {
        ids: Vec<ToastId>,
    },

    /// Every toast was deleted.
    Cleared,

    /// The store was reset (toasts and heights).
    Reset,

    // --- Lifecycle Events ---
    /// Subscription was dropped.
    Dropped {
        reason: DropReason,
    },
}

impl ToastEvent {
    /// Id of the toast this event concerns, for per-toast events.
    pub fn toast_id(&self) -> Option<&ToastId> {
        match self {
            ToastEvent::Created { toast } | ToastEvent::Updated { toast } => Some(&toast.id),
            ToastEvent::Dismissed { id } | ToastEvent::Removed { id } => Some(id),
            _ => None,
        }
    }

    /// Encode as JSON for renderers living outside the process' Rust code.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<ToastEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> std::result::Result<ToastEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> std::result::Result<ToastEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> std::result::Result<ToastEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Take every event that is already buffered.
    pub fn drain(&self) -> Vec<ToastEvent> {
        self.receiver.try_iter().collect()
    }
}
