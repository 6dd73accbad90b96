//! Core types for the toast store.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifier of a toast, either caller-supplied or drawn from the store's counter.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToastId {
    Num(u64),
    Str(String),
}

impl ToastId {
    /// Whether a caller-supplied id is usable as-is.
    ///
    /// Numeric ids always are; string ids must be non-empty.
    pub fn is_usable(&self) -> bool {
        match self {
            ToastId::Num(_) => true,
            ToastId::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Debug for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastId::Num(n) => write!(f, "ToastId({})", n),
            ToastId::Str(s) => write!(f, "ToastId({:?})", s),
        }
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastId::Num(n) => write!(f, "{}", n),
            ToastId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ToastId {
    fn from(n: u64) -> Self {
        ToastId::Num(n)
    }
}

impl From<u32> for ToastId {
    fn from(n: u32) -> Self {
        ToastId::Num(n as u64)
    }
}

impl From<&str> for ToastId {
    fn from(s: &str) -> Self {
        ToastId::Str(s.to_string())
    }
}

impl From<String> for ToastId {
    fn from(s: String) -> Self {
        ToastId::Str(s)
    }
}

/// Semantic category of a toast. Drives icon and styling in the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Default,
    Action,
    Success,
    Info,
    Warning,
    Error,
    Loading,
}

/// Opaque reference to a host-side renderable component.
///
/// The store never looks inside; it only carries the reference through to
/// the renderer. Two references are equal when they point at the same
/// component instance.
#[derive(Clone)]
pub struct ComponentRef {
    name: Cow<'static, str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl ComponentRef {
    pub fn new<C>(name: impl Into<Cow<'static, str>>, component: C) -> Self
    where
        C: Any + Send + Sync,
    {
        Self {
            name: name.into(),
            inner: Arc::new(component),
        }
    }

    /// Name the component was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the underlying component if it has type `C`.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.inner.downcast_ref::<C>()
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({})", self.name)
    }
}

impl Serialize for ComponentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("component", self.name())?;
        map.end()
    }
}

/// Renderable content: plain text or an opaque component.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Text(String),
    Component(ComponentRef),
}

impl Content {
    /// The text, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            Content::Component(_) => None,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<ComponentRef> for Content {
    fn from(c: ComponentRef) -> Self {
        Content::Component(c)
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Text(s) => serializer.serialize_str(s),
            Content::Component(c) => c.serialize(serializer),
        }
    }
}

/// Shared host callback invoked with a borrowed argument.
pub struct Callback<A: ?Sized>(Arc<dyn Fn(&A) + Send + Sync>);

impl<A: ?Sized> Callback<A> {
    pub fn new(f: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, arg: &A) {
        (self.0)(arg)
    }
}

impl<A: ?Sized> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<A: ?Sized> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Primary button shown on a toast.
#[derive(Clone, Debug, Serialize)]
pub struct Action {
    pub label: String,
    #[serde(skip)]
    pub on_click: Callback<()>,
}

impl Action {
    pub fn new(label: impl Into<String>, on_click: impl Fn(&()) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Callback::new(on_click),
        }
    }
}

/// Secondary button shown on a toast.
#[derive(Clone, Debug, Serialize)]
pub struct Cancel {
    pub label: String,
    #[serde(skip)]
    pub on_click: Option<Callback<()>>,
}

impl Cancel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_click: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, f: impl Fn(&()) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Callback::new(f));
        self
    }
}

/// Screen corner or edge the toaster is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    TopCenter,
    BottomCenter,
}

impl Position {
    /// Whether toasts stack downwards from the top edge.
    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopRight | Position::TopCenter
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

/// Text direction of the toaster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
    #[default]
    Auto,
}

/// Class names applied to the individual elements of a toast.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastClasses {
    pub toast: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub loader: Option<String>,
    pub close_button: Option<String>,
    pub cancel_button: Option<String>,
    pub action_button: Option<String>,
    /// Extra class per toast kind.
    #[serde(flatten)]
    pub kinds: HashMap<ToastKind, String>,
}

/// Measured height of a rendered toast, reported back by the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightEntry {
    pub toast_id: ToastId,
    pub height: f32,
}

impl HeightEntry {
    pub fn new(toast_id: impl Into<ToastId>, height: f32) -> Self {
        Self {
            toast_id: toast_id.into(),
            height,
        }
    }
}
