//! # Sonner
//!
//! The state half of a toast notification component: a store of active
//! toasts that a renderer subscribes to, displays, times out and dismisses.
//!
//! ## Core Concepts
//!
//! - **Toasts**: Records keyed by id; creating with a known id updates in place
//! - **Dismiss vs. remove**: Dismissing marks a toast for its exit animation,
//!   removing deletes it
//! - **Promise toasts**: A loading toast that becomes success or error when an
//!   async operation settles
//! - **Subscriptions**: Ordered change events for renderers
//!
//! ## Example
//!
//! ```ignore
//! use sonner::{ToastOptions, ToastState};
//!
//! let toasts = ToastState::default();
//!
//! let id = toasts.loading("Saving...", ToastOptions::new());
//! // later, same id: the loading toast turns into a success toast
//! toasts.success("Saved", ToastOptions::new().with_id(id.clone()));
//!
//! // renderer side
//! toasts.dismiss(Some(&id));
//! toasts.remove(Some(&id));
//! ```

pub mod error;
pub mod promise;
pub mod records;
pub mod store;
pub mod subscriptions;
pub mod toaster;
pub mod types;

// Re-exports
pub use error::{Result, ToastError};
pub use promise::{
    HttpResponse, Pending, PromiseData, PromiseMessage, PromiseOutput, PromiseToast,
    ResponseFailure,
};
pub use records::{HeightRegistry, Toast, ToastData, ToastOptions};
pub use store::{Environment, StoreConfig, ToastState};
pub use subscriptions::{
    DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager, ToastEvent,
};
pub use toaster::{Offset, ToastDefaults, ToasterOptions};
pub use types::*;
