//! Toast records and renderer-reported metadata.
//!
//! Toasts are kept newest first. Heights are tracked alongside so the
//! renderer can compute stack offsets.

mod heights;
mod toast;

pub use heights::HeightRegistry;
pub use toast::{Toast, ToastData, ToastOptions};
