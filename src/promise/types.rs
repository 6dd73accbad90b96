//! Types describing a promise-driven toast.

use crate::records::ToastOptions;
use crate::types::Content;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// A message that is either fixed up front or computed from the outcome.
pub enum PromiseMessage<I> {
    Literal(Content),
    Computed(Box<dyn FnOnce(&I) -> Content + Send>),
}

impl<I> PromiseMessage<I> {
    pub fn literal(content: impl Into<Content>) -> Self {
        PromiseMessage::Literal(content.into())
    }

    pub fn computed<C>(f: impl FnOnce(&I) -> C + Send + 'static) -> Self
    where
        C: Into<Content>,
    {
        PromiseMessage::Computed(Box::new(move |input: &I| f(input).into()))
    }

    /// Produce the message for a settled value.
    pub fn resolve(self, input: &I) -> Content {
        match self {
            PromiseMessage::Literal(content) => content,
            PromiseMessage::Computed(f) => f(input),
        }
    }

    /// Like [`resolve`](Self::resolve), but a panicking computed message
    /// yields `None` instead of unwinding out of the promise task.
    pub(crate) fn try_resolve(self, input: &I) -> Option<Content> {
        panic::catch_unwind(AssertUnwindSafe(|| self.resolve(input))).ok()
    }
}

impl<I> fmt::Debug for PromiseMessage<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseMessage::Literal(content) => f.debug_tuple("Literal").field(content).finish(),
            PromiseMessage::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<I> From<&str> for PromiseMessage<I> {
    fn from(s: &str) -> Self {
        PromiseMessage::literal(s)
    }
}

impl<I> From<String> for PromiseMessage<I> {
    fn from(s: String) -> Self {
        PromiseMessage::literal(s)
    }
}

/// What to show while a promise is pending and once it settles.
pub struct PromiseData<T, E> {
    /// Shown immediately as a `Loading` toast. Without it no toast exists
    /// until the promise settles.
    pub loading: Option<Content>,
    pub success: Option<PromiseMessage<T>>,
    pub error: Option<PromiseMessage<E>>,
    /// Runs after the outcome has been reflected in the store.
    pub finally: Option<Box<dyn FnOnce() + Send>>,
    /// Options for the loading toast. Later updates keep them.
    pub options: ToastOptions,
}

impl<T, E> Default for PromiseData<T, E> {
    fn default() -> Self {
        Self {
            loading: None,
            success: None,
            error: None,
            finally: None,
            options: ToastOptions::default(),
        }
    }
}

impl<T, E> PromiseData<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn loading(mut self, message: impl Into<Content>) -> Self {
        self.loading = Some(message.into());
        self
    }

    #[must_use]
    pub fn success(mut self, message: impl Into<PromiseMessage<T>>) -> Self {
        self.success = Some(message.into());
        self
    }

    #[must_use]
    pub fn error(mut self, message: impl Into<PromiseMessage<E>>) -> Self {
        self.error = Some(message.into());
        self
    }

    #[must_use]
    pub fn finally(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.finally = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }
}

impl<T, E> fmt::Debug for PromiseData<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseData")
            .field("loading", &self.loading)
            .field("success", &self.success)
            .field("error", &self.error)
            .field("finally", &self.finally.is_some())
            .finish()
    }
}

/// The asynchronous operation behind a promise toast.
pub struct Pending<T, E> {
    source: PendingSource<T, E>,
}

type Factory<T, E> = Box<dyn FnOnce() -> BoxFuture<'static, Result<T, E>> + Send>;

enum PendingSource<T, E> {
    Future(BoxFuture<'static, Result<T, E>>),
    Deferred(Factory<T, E>),
}

impl<T, E> Pending<T, E> {
    /// An operation that is already in flight.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            source: PendingSource::Future(future.boxed()),
        }
    }

    /// An operation started by calling `factory` when the toast is created.
    pub fn deferred<F, Fut>(factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            source: PendingSource::Deferred(Box::new(move || factory().boxed())),
        }
    }

    pub(crate) fn start(self) -> BoxFuture<'static, Result<T, E>> {
        match self.source {
            PendingSource::Future(future) => future,
            PendingSource::Deferred(factory) => factory(),
        }
    }
}

/// An unsuccessful response carried by a fulfilled promise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseFailure {
    /// Status reported by the response, if it has one.
    pub status: Option<String>,
    /// Rendering of the whole response, used when there is no status.
    pub detail: String,
}

impl ResponseFailure {
    pub fn with_status(status: impl ToString) -> Self {
        let status = status.to_string();
        Self {
            detail: status.clone(),
            status: Some(status),
        }
    }
}

impl fmt::Display for ResponseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "HTTP error! Status: {}", status),
            None => write!(f, "Error! {}", self.detail),
        }
    }
}

/// Values a promise toast can resolve with.
///
/// HTTP-style responses report `ok == false` through [`failure`], which
/// turns an otherwise fulfilled promise into an error toast. Everything
/// else keeps the default.
///
/// [`failure`]: PromiseOutput::failure
pub trait PromiseOutput {
    fn failure(&self) -> Option<ResponseFailure> {
        None
    }
}

macro_rules! plain_output {
    ($($ty:ty),+ $(,)?) => {
        $(impl PromiseOutput for $ty {})+
    };
}

plain_output!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, &'static str,
);

impl<T> PromiseOutput for Vec<T> {}

impl<T: PromiseOutput> PromiseOutput for Option<T> {
    fn failure(&self) -> Option<ResponseFailure> {
        self.as_ref().and_then(PromiseOutput::failure)
    }
}

impl<T: PromiseOutput + ?Sized> PromiseOutput for Box<T> {
    fn failure(&self) -> Option<ResponseFailure> {
        (**self).failure()
    }
}

/// JSON objects with `"ok": false` are treated as failed responses.
impl PromiseOutput for serde_json::Value {
    fn failure(&self) -> Option<ResponseFailure> {
        let object = self.as_object()?;
        if object.get("ok")?.as_bool()? {
            return None;
        }

        let status = object.get("status").map(|status| match status {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        Some(ResponseFailure {
            status,
            detail: self.to_string(),
        })
    }
}

/// Minimal HTTP response shape for hosts that do not have their own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub ok: bool,
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status,
            status_text: String::new(),
        }
    }
}

impl PromiseOutput for HttpResponse {
    fn failure(&self) -> Option<ResponseFailure> {
        (!self.ok).then(|| ResponseFailure::with_status(self.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_resolution() {
        let literal: PromiseMessage<u32> = "done".into();
        assert_eq!(literal.resolve(&1), Content::from("done"));

        let computed = PromiseMessage::computed(|n: &u32| format!("{} files", n));
        assert_eq!(computed.resolve(&3), Content::from("3 files"));
    }

    #[test]
    fn test_panicking_message_is_contained() {
        let computed = PromiseMessage::computed(|_: &u32| -> String { panic!("bad format") });
        assert_eq!(computed.try_resolve(&1), None);

        let literal: PromiseMessage<u32> = "ok".into();
        assert_eq!(literal.try_resolve(&1), Some(Content::from("ok")));
    }

    #[test]
    fn test_json_failure_detection() {
        assert!(json!({"ok": true, "status": 200}).failure().is_none());
        assert!(json!({"status": 500}).failure().is_none());
        assert!(json!("ok").failure().is_none());

        let failure = json!({"ok": false, "status": 500}).failure().unwrap();
        assert_eq!(failure.to_string(), "HTTP error! Status: 500");

        let failure = json!({"ok": false}).failure().unwrap();
        assert_eq!(failure.to_string(), r#"Error! {"ok":false}"#);
    }

    #[test]
    fn test_http_response_failure() {
        assert!(HttpResponse::new(204).failure().is_none());
        assert_eq!(
            HttpResponse::new(404).failure().unwrap().to_string(),
            "HTTP error! Status: 404"
        );
        assert!(Some(HttpResponse::new(503)).failure().is_some());
        assert!(None::<HttpResponse>.failure().is_none());
    }
}
