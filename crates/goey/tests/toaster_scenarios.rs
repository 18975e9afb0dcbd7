#![forbid(unsafe_code)]

//! End-to-end toaster scenarios through the public API.

use std::time::Duration;

use goey::prelude::*;
use goey::MorphState;

const FRAME: Duration = Duration::from_millis(16);

fn run(toaster: &mut Toaster, frames: usize) {
    for _ in 0..frames {
        toaster.advance(FRAME);
    }
}

#[derive(Debug)]
struct Batch {
    count: usize,
}

#[derive(Debug)]
struct Failure {
    message: &'static str,
}

#[test]
fn promise_resolves_into_a_success_title() {
    let mut toaster = Toaster::default();
    let (pending, resolver) = deferred::<Batch, Failure>();
    let id = toaster.promise(
        pending,
        PromiseData::new(
            "Uploading",
            Resolve::with(|b: &Batch| format!("Uploaded {} files", b.count)),
            Resolve::with(|e: &Failure| format!("Error: {}", e.message)),
        ),
    );
    run(&mut toaster, 4);
    assert_eq!(toaster.views()[0].phase, ToastPhase::Loading);

    resolver.resolve(Batch { count: 5 });
    run(&mut toaster, 1);
    let view = toaster.views().remove(0);
    assert_eq!(view.id, id);
    assert_eq!(view.title, "Uploaded 5 files");
    assert_eq!(view.phase, ToastPhase::Success);
}

#[test]
fn promise_rejects_into_an_error_title() {
    let mut toaster = Toaster::default();
    let (pending, resolver) = deferred::<Batch, Failure>();
    toaster.promise(
        pending,
        PromiseData::new(
            "Uploading",
            "Uploaded",
            Resolve::with(|e: &Failure| format!("Error: {}", e.message)),
        ),
    );
    run(&mut toaster, 2);
    resolver.reject(Failure { message: "Timeout" });
    run(&mut toaster, 1);
    let view = toaster.views().remove(0);
    assert_eq!(view.title, "Error: Timeout");
    assert_eq!(view.phase, ToastPhase::Error);
}

#[test]
fn right_anchored_toaster_mirrors_its_toasts() {
    let mut right = Toaster::new(ToasterConfig::default().position(ToastPosition::TopRight));
    let mut left = Toaster::new(ToasterConfig::default().position(ToastPosition::TopLeft));
    right.show("Right", ToastOptions::new());
    left.show("Left", ToastOptions::new());
    run(&mut right, 3);
    run(&mut left, 3);
    assert!(right.views()[0].mirrored);
    assert!(!left.views()[0].mirrored);
}

#[test]
fn described_toast_grows_then_shrinks_before_leaving() {
    let mut toaster = Toaster::default();
    let id = toaster.info("Update ready", ToastOptions::new().description("Restart to apply"));

    let mut saw_body = false;
    let mut saw_pre_dismiss = false;
    for _ in 0..400 {
        toaster.advance(FRAME);
        let Some(toast) = toaster.toast(&id) else {
            break;
        };
        match toast.state() {
            MorphState::Expanded => saw_body = true,
            MorphState::PreDismissCollapsing => saw_pre_dismiss = true,
            _ => {}
        }
    }
    assert!(saw_body);
    assert!(saw_pre_dismiss);
    assert!(toaster.toast(&id).is_none());
}

#[test]
fn plain_toast_outline_is_a_pill() {
    let mut toaster = Toaster::default();
    toaster.warning("Low battery", ToastOptions::new());
    run(&mut toaster, 20);
    let view = toaster.views().remove(0);
    assert!(view.outline.is_some());
    assert!(view.description.is_none());
    assert!(!view.expanded);
    assert_eq!(view.constraints.max_height, Some(34.0));
    assert!(view.constraints.clip.is_none());
}
