//! Integration tests for the toast store.

use sonner::{
    Action, Cancel, ComponentRef, Environment, HeightEntry, SubscriptionConfig, SubscriptionFilter, ToastData,
    ToastEvent, ToastId, ToastKind, ToastOptions, ToastState, ToasterOptions,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn test_state() -> ToastState {
    // surfaces store tracing output on failing tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    ToastState::default()
}

// --- Identity and Merge ---

#[test]
fn test_repeated_id_replaces_message() {
    let state = test_state();

    state.create(ToastData::new(ToastKind::Default, "A").with_id(1u64));
    state.create(ToastData::new(ToastKind::Default, "B").with_id(1u64));

    let toasts = state.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].id, ToastId::Num(1));
    assert_eq!(toasts[0].title_text(), Some("B"));
    assert!(toasts[0].updated);
}

#[test]
fn test_fresh_ids_prepend() {
    let state = test_state();

    let first = state.info("first", ToastOptions::new());
    let second = state.info("second", ToastOptions::new());
    let third = state.info("third", ToastOptions::new().with_id("named"));

    let ids: Vec<_> = state.toasts().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![third, second.clone(), first.clone()]);
    assert_ne!(first, second);
}

#[test]
fn test_update_merges_pass_through_options() {
    let state = test_state();
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&clicks);

    let id = state.loading(
        "Deleting 3 files",
        ToastOptions::new()
            .with_description("project/")
            .with_duration(Duration::from_secs(30)),
    );
    state.success(
        "Deleted",
        ToastOptions::new()
            .with_id(id.clone())
            .with_action(Action::new("Undo", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
    );

    let toast = state.get(&id).unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.duration(), Some(Duration::from_secs(30)));
    assert!(toast.options.description.is_some());

    let action = toast.options.action.as_ref().unwrap();
    assert_eq!(action.label, "Undo");
    action.on_click.call(&());
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cancel_button_survives_update() {
    let state = test_state();
    assert_eq!(state.config().environment, Environment::Interactive);
    let handle = state.subscribe(SubscriptionConfig {
        replay: false,
        filter: SubscriptionFilter::all(),
        ..Default::default()
    });
    let cancelled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cancelled);

    let id = state.warning(
        "Unsaved changes",
        ToastOptions::new().with_cancel(Cancel::new("Discard").on_click(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );
    state.warning(
        "Unsaved changes in 2 files",
        ToastOptions::new().with_id(id.clone()).with_description("main.rs, lib.rs"),
    );

    let toast = state.get(&id).unwrap();
    assert_eq!(toast.title_text(), Some("Unsaved changes in 2 files"));
    assert!(toast.options.description.is_some());

    let cancel = toast.options.cancel.as_ref().unwrap();
    assert_eq!(cancel.label, "Discard");
    cancel.on_click.as_ref().unwrap().call(&());
    assert_eq!(cancelled.load(Ordering::SeqCst), 1);

    let json = serde_json::to_value(&toast).unwrap();
    assert_eq!(json["cancel"], serde_json::json!({"label": "Discard"}));

    let events = handle.drain();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], ToastEvent::Updated { toast } if toast.options.cancel.is_some()));
}

#[test]
fn test_custom_then_text_update() {
    let state = test_state();
    let banner = ComponentRef::new("CookieBanner", "v2".to_string());

    let id = state.custom(banner.clone(), ToastOptions::new().with_id("cookies"));
    state.info("Preferences saved", ToastOptions::new().with_id("cookies"));

    let toast = state.get(&id).unwrap();
    assert_eq!(toast.kind, ToastKind::Info);
    assert_eq!(toast.component, Some(banner));
    assert_eq!(toast.title_text(), Some("Preferences saved"));
}

// --- Dismiss and Remove ---

#[test]
fn test_batch_dismiss_twice_then_remove_all() {
    let state = test_state();
    for i in 0..4 {
        state.toast(format!("toast {}", i), ToastOptions::new());
    }

    state.dismiss(None);
    state.dismiss(None);
    assert_eq!(state.len(), 4);

    state.remove(None);
    assert!(state.is_empty());
}

#[test]
fn test_single_dismiss_leaves_others_untouched() {
    let state = test_state();
    let a = state.toast("a", ToastOptions::new());
    let b = state.toast("b", ToastOptions::new());
    let c = state.toast("c", ToastOptions::new());

    state.dismiss(Some(&b));

    assert!(!state.get(&a).unwrap().dismiss);
    assert!(state.get(&b).unwrap().dismiss);
    assert!(!state.get(&c).unwrap().dismiss);
}

#[test]
fn test_renderer_lifecycle() {
    let state = test_state();
    let options = ToasterOptions::default();
    let auto_closed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&auto_closed);

    let id = state.success(
        "Uploaded",
        ToastOptions::new().on_auto_close(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    state.set_height(HeightEntry::new(id.clone(), 52.0));

    // the renderer's timer fires
    let toast = state.get(&id).unwrap();
    assert_eq!(options.expiry(&toast), Some(Duration::from_millis(4000)));
    toast.notify_auto_closed();
    state.dismiss(Some(&id));

    // exit animation finished
    state.remove(Some(&id));
    state.remove_height(&id);

    assert_eq!(auto_closed.load(Ordering::SeqCst), 1);
    assert!(state.is_empty());
    assert!(state.heights().is_empty());
}

#[test]
fn test_stack_offsets_follow_toast_order() {
    let state = test_state();
    let options = ToasterOptions::default();

    let older = state.toast("older", ToastOptions::new());
    state.set_height(HeightEntry::new(older.clone(), 40.0));
    let newer = state.toast("newer", ToastOptions::new());
    state.set_height(HeightEntry::new(newer.clone(), 60.0));

    let heights = state.heights();
    assert_eq!(options.stack_offset(&heights, &newer), Some(0.0));
    assert_eq!(options.stack_offset(&heights, &older), Some(74.0));
}

// --- Isolation ---

#[test]
fn test_independent_stores() {
    let a = test_state();
    let b = test_state();

    a.toast("only in a", ToastOptions::new());
    assert_eq!(a.len(), 1);
    assert!(b.is_empty());

    a.reset();
    assert!(a.is_empty());
}

#[test]
fn test_reset_after_mixed_activity() {
    let state = test_state();
    let id = state.loading("working", ToastOptions::new());
    state.toast("other", ToastOptions::new());
    state.dismiss(Some(&id));
    state.set_height(HeightEntry::new(id, 30.0));

    state.reset();
    assert!(state.is_empty());
    assert!(state.heights().is_empty());
}

// --- Subscriptions ---

#[test]
fn test_filtered_subscription_follows_one_toast() {
    let state = test_state();
    let watched = ToastId::from("upload");

    let handle = state
        .subscribe(SubscriptionConfig {
            replay: false,
            filter: SubscriptionFilter::ids(vec![watched.clone()]),
            ..Default::default()
        });

    state.toast("noise", ToastOptions::new());
    state.loading("Uploading", ToastOptions::new().with_id(watched.clone()));
    state.success("Uploaded", ToastOptions::new().with_id(watched.clone()));
    state.dismiss_all();

    let events = handle.drain();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], ToastEvent::Created { toast } if toast.kind == ToastKind::Loading));
    assert!(matches!(&events[1], ToastEvent::Updated { toast } if toast.kind == ToastKind::Success));
    assert!(matches!(&events[2], ToastEvent::DismissedAll { ids } if ids.len() == 2));
}

#[test]
fn test_events_serialize_for_renderers() {
    let state = test_state();
    let handle = state
        .subscribe(SubscriptionConfig {
            replay: false,
            ..Default::default()
        });

    state.error("Disk full", ToastOptions::new().with_id("disk"));

    let event = handle.try_recv().unwrap();
    let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "created");
    assert_eq!(json["toast"]["id"], "disk");
    assert_eq!(json["toast"]["type"], "error");
    assert_eq!(json["toast"]["title"], "Disk full");
    assert_eq!(json["toast"]["dismissable"], true);
}
