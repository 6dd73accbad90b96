//! Promise-driven toasts.
//!
//! A promise toast shows a loading message while an async operation runs
//! and turns into a success or error toast (under the same id) once it
//! settles.
//!
//! # Example
//!
//! ```ignore
//! let upload = state.promise(
//!     Pending::new(async { client.upload(file).await }),
//!     Some(
//!         PromiseData::new()
//!             .loading("Uploading...")
//!             .success(PromiseMessage::computed(|r: &Receipt| format!("Uploaded {}", r.name)))
//!             .error("Upload failed"),
//!     ),
//! );
//!
//! let id = upload.spawn()?;
//! ```

mod types;

pub use types::{
    HttpResponse, Pending, PromiseData, PromiseMessage, PromiseOutput, ResponseFailure,
};

use crate::error::{Result, ToastError};
use crate::records::ToastData;
use crate::store::ToastState;
use crate::types::{ToastId, ToastKind};
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use std::fmt;
use std::future::IntoFuture;

/// A promise toast that has been set up but whose task has not run yet.
///
/// The id of the loading toast is available right away. The task reflects
/// the outcome in the store; await it, or [`spawn`](Self::spawn) it on the
/// current tokio runtime.
#[must_use = "the promise task does nothing unless it is awaited or spawned"]
pub struct PromiseToast {
    id: Option<ToastId>,
    task: Option<BoxFuture<'static, ()>>,
}

impl PromiseToast {
    fn idle() -> Self {
        Self { id: None, task: None }
    }

    /// Id of the loading toast, if one was created.
    pub fn id(&self) -> Option<&ToastId> {
        self.id.as_ref()
    }

    /// Whether there is anything to run (false when no data was supplied).
    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }

    /// Split off the task for hosts driving their own executor.
    pub fn into_parts(self) -> (Option<ToastId>, BoxFuture<'static, ()>) {
        let task = self.task.unwrap_or_else(|| future::ready(()).boxed());
        (self.id, task)
    }

    /// Run the task on the ambient tokio runtime and return the loading id.
    pub fn spawn(self) -> Result<Option<ToastId>> {
        let (id, task) = self.into_parts();
        let handle = tokio::runtime::Handle::try_current().map_err(|_| {
            tracing::warn!(id = ?id, "promise toast spawned outside a tokio runtime");
            ToastError::NoRuntime
        })?;
        handle.spawn(task);
        Ok(id)
    }
}

impl IntoFuture for PromiseToast {
    type Output = Option<ToastId>;
    type IntoFuture = BoxFuture<'static, Option<ToastId>>;

    fn into_future(self) -> Self::IntoFuture {
        let (id, task) = self.into_parts();
        task.map(move |()| id).boxed()
    }
}

impl fmt::Debug for PromiseToast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseToast")
            .field("id", &self.id)
            .field("idle", &self.is_idle())
            .finish()
    }
}

impl ToastState {
    /// Show a toast that follows the outcome of an async operation.
    ///
    /// With `data.loading` a `Loading` toast is created immediately. When
    /// the operation settles the same id becomes:
    /// - an `Error` toast if the value reports a failed response,
    /// - a `Success` toast if `data.success` is set,
    /// - an `Error` toast on rejection if `data.error` is set.
    ///
    /// A loading toast left without a terminal state is dismissed, including
    /// when a computed message panics.
    /// `data.finally` runs last in every case. Without `data` nothing
    /// happens and the operation is not started.
    pub fn promise<T, E>(
        &self,
        pending: Pending<T, E>,
        data: Option<PromiseData<T, E>>,
    ) -> PromiseToast
    where
        T: PromiseOutput + Send + 'static,
        E: fmt::Debug + Send + 'static,
    {
        let Some(data) = data else {
            return PromiseToast::idle();
        };

        let PromiseData {
            loading,
            success,
            error,
            finally,
            options,
        } = data;

        let id = loading.map(|message| {
            self.create(ToastData {
                kind: Some(ToastKind::Loading),
                message: Some(message),
                options,
                ..Default::default()
            })
        });

        let operation = pending.start();
        let state = self.clone();
        let loading_id = id.clone();

        let task = async move {
            let mut settled = false;

            match operation.await {
                Ok(value) => {
                    if let Some(failure) = value.failure() {
                        settled = true;
                        tracing::debug!(
                            id = ?loading_id,
                            %failure,
                            "promise resolved with failed response"
                        );
                        state.create(
                            ToastData::new(ToastKind::Error, failure.to_string())
                                .with_maybe_id(loading_id.clone()),
                        );
                    } else if let Some(success) = success {
                        match success.try_resolve(&value) {
                            Some(message) => {
                                settled = true;
                                state.create(
                                    ToastData::new(ToastKind::Success, message)
                                        .with_maybe_id(loading_id.clone()),
                                );
                            }
                            None => {
                                tracing::warn!(id = ?loading_id, "success message panicked");
                            }
                        }
                    }
                }
                Err(err) => {
                    tracing::debug!(id = ?loading_id, error = ?err, "promise rejected");
                    if let Some(error) = error {
                        match error.try_resolve(&err) {
                            Some(message) => {
                                settled = true;
                                state.create(
                                    ToastData::new(ToastKind::Error, message)
                                        .with_maybe_id(loading_id.clone()),
                                );
                            }
                            None => {
                                tracing::warn!(id = ?loading_id, "error message panicked");
                            }
                        }
                    }
                }
            }

            if !settled {
                if let Some(id) = &loading_id {
                    // nothing replaces the loading toast; don't leave it spinning
                    state.dismiss(Some(id));
                }
            }

            if let Some(finally) = finally {
                finally();
            }
        };

        PromiseToast {
            id,
            task: Some(task.boxed()),
        }
    }
}
