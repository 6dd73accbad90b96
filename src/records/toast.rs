//! Toast records and the typed option payload merged into them.

use crate::types::{
    Action, Callback, Cancel, ComponentRef, Content, Position, ToastClasses, ToastId, ToastKind,
};
use serde::Serialize;
use std::time::Duration;

/// Per-toast options supplied by the host.
///
/// The store treats everything except `id` and `dismissable` as opaque
/// pass-through data for the renderer. Every field is optional so that a
/// later call for the same id only overrides what it actually sets.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    /// Caller-chosen id. Reusing the id of an active toast updates it.
    #[serde(skip)]
    pub id: Option<ToastId>,
    #[serde(skip)]
    pub dismissable: Option<bool>,
    pub description: Option<Content>,
    #[serde(skip)]
    pub icon: Option<ComponentRef>,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Option<Duration>,
    pub important: Option<bool>,
    pub invert: Option<bool>,
    pub action: Option<Action>,
    pub cancel: Option<Cancel>,
    #[serde(skip)]
    pub on_dismiss: Option<Callback<Toast>>,
    #[serde(skip)]
    pub on_auto_close: Option<Callback<Toast>>,
    pub position: Option<Position>,
    pub unstyled: Option<bool>,
    pub class: Option<String>,
    pub style: Option<String>,
    pub description_class: Option<String>,
    pub action_button_style: Option<String>,
    pub cancel_button_style: Option<String>,
    pub classes: Option<ToastClasses>,
    pub component_props: Option<serde_json::Value>,
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

/// Overwrite each listed field of `$base` that is set in `$patch`.
macro_rules! merge_fields {
    ($base:ident, $patch:ident; $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $base.$field = $patch.$field;
            }
        )+
    };
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `patch` over these options: set fields in `patch` win.
    pub fn merge(&mut self, patch: ToastOptions) {
        let base = self;
        merge_fields!(base, patch;
            id,
            dismissable,
            description,
            icon,
            duration,
            important,
            invert,
            action,
            cancel,
            on_dismiss,
            on_auto_close,
            position,
            unstyled,
            class,
            style,
            description_class,
            action_button_style,
            cancel_button_style,
            classes,
            component_props,
        );
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<Content>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: Cancel) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[must_use]
    pub fn dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = Some(dismissable);
        self
    }

    #[must_use]
    pub fn on_dismiss(mut self, f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        self.on_dismiss = Some(Callback::new(f));
        self
    }

    #[must_use]
    pub fn on_auto_close(mut self, f: impl Fn(&Toast) + Send + Sync + 'static) -> Self {
        self.on_auto_close = Some(Callback::new(f));
        self
    }
}

/// Input to [`ToastState::create`](crate::ToastState::create).
#[derive(Clone, Debug, Default)]
pub struct ToastData {
    /// Kind of the toast; `Default` when unset.
    pub kind: Option<ToastKind>,
    /// Title content. On update this always replaces the previous title.
    pub message: Option<Content>,
    /// Custom component rendered instead of the standard layout.
    pub component: Option<ComponentRef>,
    pub options: ToastOptions,
}

impl ToastData {
    pub fn new(kind: ToastKind, message: impl Into<Content>) -> Self {
        Self {
            kind: Some(kind),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<ToastId>) -> Self {
        self.options.id = Some(id.into());
        self
    }

    /// Set or clear the id; `None` lets the store draw a counter id.
    #[must_use]
    pub fn with_maybe_id(mut self, id: Option<ToastId>) -> Self {
        self.options.id = id;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }
}

/// An active toast held by the store.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: ToastId,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: Option<Content>,
    pub component: Option<ComponentRef>,
    pub dismissable: bool,
    /// Marked for removal; the renderer plays its exit animation and then
    /// calls `remove`.
    pub dismiss: bool,
    /// Overwritten in place at least once. Renderers reset the display timer
    /// when they see this change.
    pub updated: bool,
    #[serde(flatten)]
    pub options: ToastOptions,
}

impl Toast {
    /// Build a fresh record from a create payload and a resolved id.
    pub(crate) fn from_data(id: ToastId, data: ToastData) -> Self {
        let ToastData {
            kind,
            message,
            component,
            mut options,
        } = data;
        options.id = None;

        Self {
            id,
            kind: kind.unwrap_or_default(),
            title: message,
            component,
            dismissable: options.dismissable.unwrap_or(true),
            dismiss: false,
            updated: false,
            options,
        }
    }

    /// Overwrite this record in place with a newer payload for the same id.
    pub(crate) fn apply_update(&mut self, data: ToastData) {
        let ToastData {
            kind,
            message,
            component,
            mut options,
        } = data;
        options.id = None;

        if let Some(dismissable) = options.dismissable {
            self.dismissable = dismissable;
        }
        if component.is_some() {
            self.component = component;
        }
        self.kind = kind.unwrap_or_default();
        self.title = message;
        self.options.merge(options);
        self.updated = true;
    }

    /// Title text, if the title is plain text.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(Content::as_text)
    }

    pub fn duration(&self) -> Option<Duration> {
        self.options.duration
    }

    /// Invoke the host's `on_dismiss` hook, if any.
    pub fn notify_dismissed(&self) {
        if let Some(cb) = &self.options.on_dismiss {
            cb.call(self);
        }
    }

    /// Invoke the host's `on_auto_close` hook, if any.
    pub fn notify_auto_closed(&self) {
        if let Some(cb) = &self.options.on_auto_close {
            cb.call(self);
        }
    }
}
