//! Subscription system for live store updates.
//!
//! Renderers subscribe to the store and receive:
//! - An optional snapshot of the current toasts
//! - Record events (created, updated, dismissed, removed)
//! - Batch events (dismiss all, clear, reset)
//!
//! Subscriptions support:
//! - Filtering by toast id
//! - Bounded buffers with slow-subscriber dropping
//!
//! # Example
//!
//! ```ignore
//! let handle = state.subscribe(SubscriptionConfig::default());
//!
//! loop {
//!     match handle.recv() {
//!         Ok(ToastEvent::Created { toast }) => println!("show {:?}", toast.id),
//!         Ok(ToastEvent::Dismissed { id }) => println!("animate out {:?}", id),
//!         Ok(ToastEvent::Dropped { reason }) => break,
//!         Ok(_) => {}
//!         Err(_) => break,
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    ToastEvent,
};
