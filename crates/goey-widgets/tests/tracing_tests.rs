#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! Events enabled:
//!   cargo test -p goey-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p goey-widgets --test tracing_tests -- zero_overhead

use std::sync::{Arc, Mutex};
use std::time::Duration;

use goey_widgets::{
    Description, GoeyToast, MorphState, RenderError, RenderedBlock, TextLayout, TextMetrics,
    ToastContext, ToastId, ToastProps,
};

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its target, level and fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    target: String,
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, CaptureHandle) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            events: events.clone(),
        };
        (Self { events }, handle)
    }
}

/// Handle to read captured events after the run.
struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn with_message(&self, message: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }
}

/// Visitor that splits the message from the other fields.
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        let meta = event.metadata();
        self.events.lock().unwrap().push(CapturedEvent {
            target: meta.target().to_string(),
            level: *meta.level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured<R>(f: impl FnOnce() -> R) -> (R, CaptureHandle) {
    let (layer, handle) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, handle)
}

// ── Helpers ─────────────────────────────────────────────────────────────

const FRAME: Duration = Duration::from_millis(16);

fn run_until_expanded(toast: &mut GoeyToast, layout: &mut TextLayout) {
    for _ in 0..300 {
        toast.advance(FRAME, layout);
        if toast.state() == MorphState::Expanded {
            return;
        }
    }
    panic!("toast never expanded");
}

fn expanding_toast() -> GoeyToast {
    GoeyToast::new(
        ToastId::from("upload"),
        ToastProps::new("Uploading").description(Description::text("3 files")),
        ToastContext::default(),
    )
}

// ============================================================================
// Event tests
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn morph_transitions_are_logged_under_the_goey_target() {
    let ((), capture) = with_captured(|| {
        let mut toast = expanding_toast();
        let mut layout = TextLayout::default();
        run_until_expanded(&mut toast, &mut layout);
    });

    let events = capture.events();
    assert!(events.iter().all(|e| e.target == "goey"));
    let messages: Vec<&str> = events.iter().map(|e| e.message.as_str()).collect();
    let scheduled = messages.iter().position(|m| *m == "expand scheduled");
    let started = messages.iter().position(|m| *m == "expand started");
    let settled = messages.iter().position(|m| *m == "expand settled");
    assert!(scheduled.is_some() && started.is_some() && settled.is_some());
    assert!(scheduled < started && started < settled);
}

#[cfg(feature = "tracing")]
#[test]
fn render_failure_is_logged_once() {
    let ((), capture) = with_captured(|| {
        let broken = Description::custom(|_: &TextMetrics, _: f64| {
            Err::<RenderedBlock, _>(RenderError::failed("malformed"))
        });
        let mut toast = GoeyToast::new(
            ToastId::from("broken"),
            ToastProps::new("Oops").description(broken),
            ToastContext::default(),
        );
        let mut layout = TextLayout::default();
        let metrics = TextMetrics::default();
        for _ in 0..300 {
            toast.advance(FRAME, &mut layout);
        }
        assert!(toast.boundary_state().is_failed());
        for _ in 0..10 {
            assert!(toast.render(&metrics).is_none());
        }
    });

    let failures = capture.with_message("toast rendering failed");
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].level, tracing::Level::ERROR);
    assert!(
        failures[0]
            .fields
            .iter()
            .any(|(k, v)| k == "toast" && v == "broken")
    );
}

#[cfg(feature = "tracing")]
#[test]
fn suppressed_squishes_are_traced() {
    let ((), capture) = with_captured(|| {
        let mut toast = GoeyToast::new(
            ToastId::from("still"),
            ToastProps::new("Saved")
                .description(Description::text("All changes stored"))
                .spring(false),
            ToastContext::default(),
        );
        let mut layout = TextLayout::default();
        run_until_expanded(&mut toast, &mut layout);
    });
    let suppressed = capture.with_message("squish suppressed");
    assert!(!suppressed.is_empty());
    assert!(suppressed.iter().all(|e| e.level == tracing::Level::TRACE));
    assert!(
        suppressed
            .iter()
            .all(|e| e.fields.iter().any(|(k, v)| k == "reason" && v == "SpringDisabled"))
    );
}

// ============================================================================
// Zero-overhead
// ============================================================================

#[cfg(not(feature = "tracing"))]
#[test]
fn zero_overhead_without_feature() {
    let ((), capture) = with_captured(|| {
        let mut toast = expanding_toast();
        let mut layout = TextLayout::default();
        run_until_expanded(&mut toast, &mut layout);
    });
    assert!(capture.events().is_empty());
}
