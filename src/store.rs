//! Main toast store tying records, heights and subscriptions together.

use crate::records::{HeightRegistry, Toast, ToastData, ToastOptions};
use crate::subscriptions::{SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager};
use crate::types::{ComponentRef, Content, HeightEntry, ToastId, ToastKind};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Whether a live renderer is attached to the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// A renderer displays the toasts.
    #[default]
    Interactive,
    /// No rendering context (server-side rendering, background jobs).
    /// New toasts are not inserted so nothing piles up unseen.
    Headless,
}

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    pub environment: Environment,
}

impl StoreConfig {
    pub fn headless() -> Self {
        Self {
            environment: Environment::Headless,
        }
    }
}

/// Shared interior of a [`ToastState`].
struct Shared {
    /// Store configuration.
    config: StoreConfig,

    /// Active toasts, newest first.
    toasts: RwLock<Vec<Toast>>,

    /// Heights measured by the renderer.
    heights: RwLock<HeightRegistry>,

    /// Next counter id.
    counter: AtomicU64,

    /// Subscribers to toast events.
    subscriptions: SubscriptionManager,
}

/// The toast store.
///
/// Provides a unified interface for:
/// - Creating toasts, or updating them in place when the id is reused
/// - Marking toasts dismissed and removing them
/// - Promise-driven loading toasts (see [`ToastState::promise`])
/// - Subscribing to changes
///
/// Cloning yields another handle to the same store. Independent stores are
/// created with [`ToastState::new`].
#[derive(Clone)]
pub struct ToastState {
    inner: Arc<Shared>,
}

impl ToastState {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Shared {
                config,
                toasts: RwLock::new(Vec::new()),
                heights: RwLock::new(HeightRegistry::new()),
                counter: AtomicU64::new(0),
                subscriptions: SubscriptionManager::new(),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    // --- Record Operations ---

    /// Create a toast, or update the active toast with the same id.
    ///
    /// Returns the id the toast was stored under.
    pub fn create(&self, mut data: ToastData) -> ToastId {
        let mut toasts = self.inner.toasts.write();

        let id = match data.options.id.take() {
            Some(id) if id.is_usable() => id,
            _ => self.next_id(&toasts),
        };

        if let Some(existing) = toasts.iter_mut().find(|t| t.id == id) {
            existing.apply_update(data);
            tracing::debug!(id = %id, kind = ?existing.kind, "toast updated");
            self.inner.subscriptions.broadcast_updated(existing);
            return id;
        }

        if self.inner.config.environment == Environment::Headless {
            tracing::trace!(id = %id, "headless store, toast not inserted");
            return id;
        }

        let toast = Toast::from_data(id.clone(), data);
        tracing::debug!(id = %id, kind = ?toast.kind, "toast created");
        self.inner.subscriptions.broadcast_created(&toast);
        toasts.insert(0, toast);

        id
    }

    /// Draw the next counter id, skipping values held by active toasts.
    fn next_id(&self, toasts: &[Toast]) -> ToastId {
        loop {
            let id = ToastId::Num(self.inner.counter.fetch_add(1, Ordering::SeqCst));
            if !toasts.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn create_kind(
        &self,
        kind: ToastKind,
        message: impl Into<Content>,
        options: ToastOptions,
    ) -> ToastId {
        self.create(ToastData::new(kind, message).with_options(options))
    }

    /// Plain toast.
    pub fn toast(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Default, message, options)
    }

    pub fn message(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Default, message, options)
    }

    pub fn success(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Success, message, options)
    }

    pub fn error(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Error, message, options)
    }

    pub fn info(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Info, message, options)
    }

    pub fn warning(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Warning, message, options)
    }

    pub fn loading(&self, message: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create_kind(ToastKind::Loading, message, options)
    }

    /// Toast rendered entirely by a host component.
    pub fn custom(&self, component: ComponentRef, options: ToastOptions) -> ToastId {
        self.create(ToastData {
            component: Some(component),
            options,
            ..Default::default()
        })
    }

    /// Mark toasts for removal.
    ///
    /// With no id every active toast is marked and `None` is returned.
    /// With an id only that toast is marked (if present) and the id is
    /// returned either way. Nothing is removed; the renderer calls
    /// [`remove`](Self::remove) once its exit animation finishes.
    pub fn dismiss(&self, id: Option<&ToastId>) -> Option<ToastId> {
        let mut toasts = self.inner.toasts.write();

        match id {
            None => {
                let mut ids = Vec::with_capacity(toasts.len());
                for toast in toasts.iter_mut() {
                    toast.dismiss = true;
                    ids.push(toast.id.clone());
                }
                tracing::debug!(count = ids.len(), "all toasts dismissed");
                self.inner.subscriptions.broadcast_dismissed_all(ids);
                None
            }
            Some(id) => {
                if let Some(toast) = toasts.iter_mut().find(|t| &t.id == id) {
                    toast.dismiss = true;
                    tracing::debug!(id = %id, "toast dismissed");
                    self.inner.subscriptions.broadcast_dismissed(id);
                }
                Some(id.clone())
            }
        }
    }

    /// Dismiss every active toast.
    pub fn dismiss_all(&self) {
        self.dismiss(None);
    }

    /// Delete toasts.
    ///
    /// With no id the collection is cleared. With an id only that toast is
    /// deleted; its id is returned when it was present.
    pub fn remove(&self, id: Option<&ToastId>) -> Option<ToastId> {
        let mut toasts = self.inner.toasts.write();

        match id {
            None => {
                toasts.clear();
                tracing::debug!("all toasts removed");
                self.inner.subscriptions.broadcast_cleared();
                None
            }
            Some(id) => {
                let idx = toasts.iter().position(|t| &t.id == id)?;
                toasts.remove(idx);
                tracing::debug!(id = %id, "toast removed");
                self.inner.subscriptions.broadcast_removed(id);
                Some(id.clone())
            }
        }
    }

    /// Clear all toasts and heights.
    pub fn reset(&self) {
        let mut toasts = self.inner.toasts.write();
        toasts.clear();
        self.inner.heights.write().clear();
        tracing::debug!("toast store reset");
        self.inner.subscriptions.broadcast_reset();
    }

    // --- Queries ---

    /// Snapshot of the active toasts, newest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.read().clone()
    }

    pub fn get(&self, id: &ToastId) -> Option<Toast> {
        self.inner.toasts.read().iter().find(|t| &t.id == id).cloned()
    }

    pub fn contains(&self, id: &ToastId) -> bool {
        self.inner.toasts.read().iter().any(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.toasts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.read().is_empty()
    }

    // --- Heights ---

    /// Record the rendered height of a toast.
    pub fn set_height(&self, entry: HeightEntry) {
        self.inner.heights.write().set(entry);
    }

    pub fn remove_height(&self, id: &ToastId) {
        self.inner.heights.write().remove(id);
    }

    /// Snapshot of the measured heights, newest first.
    pub fn heights(&self) -> Vec<HeightEntry> {
        self.inner.heights.read().entries().to_vec()
    }

    // --- Subscriptions ---

    /// Subscribe to toast events.
    ///
    /// With `config.replay` the first event is a snapshot of the current
    /// toasts; no change can slip in between the snapshot and live events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let toasts = self.inner.toasts.read();
        let snapshot = config.replay.then(|| toasts.clone());
        self.inner.subscriptions.subscribe(config, snapshot)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.subscriptions.unsubscribe(id);
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.subscription_count()
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
