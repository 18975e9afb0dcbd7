#![forbid(unsafe_code)]

//! Toasts that follow a pending operation.
//!
//! [`Toaster::promise`](crate::Toaster::promise) shows a loading toast and
//! polls the operation once per frame. When it settles, the title,
//! description and action are recomputed from [`PromiseData`] and the phase
//! moves to success or error exactly once.
//!
//! Any [`Future`] of a `Result` works. [`deferred`] gives a hand-settled one:
//!
//! ```
//! use goey::promise::deferred;
//!
//! let (pending, resolver) = deferred::<u32, String>();
//! resolver.resolve(5);
//! # drop(pending);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use goey_widgets::toast::DEFAULT_DISPLAY_DURATION;
use goey_widgets::{
    ClassNames, Description, ToastAction, ToastPhase, ToastProps, ToastStyle, ToastTimings,
};

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

/// A literal, or a callback of the settled value.
pub enum Resolve<A, R> {
    Value(R),
    With(Rc<dyn Fn(&A) -> R>),
}

impl<A, R: Clone> Resolve<A, R> {
    pub fn with(f: impl Fn(&A) -> R + 'static) -> Self {
        Self::With(Rc::new(f))
    }

    pub fn resolve(&self, arg: &A) -> R {
        match self {
            Self::Value(value) => value.clone(),
            Self::With(f) => f(arg),
        }
    }
}

impl<A, R: Clone> Clone for Resolve<A, R> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::With(f) => Self::With(Rc::clone(f)),
        }
    }
}

impl<A, R: fmt::Debug> fmt::Debug for Resolve<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

impl<A> From<&str> for Resolve<A, String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl<A> From<String> for Resolve<A, String> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl<A> From<Description> for Resolve<A, Description> {
    fn from(value: Description) -> Self {
        Self::Value(value)
    }
}

// ---------------------------------------------------------------------------
// PromiseData
// ---------------------------------------------------------------------------

/// Content of a promise toast for each phase.
pub struct PromiseData<T, E> {
    pub loading: String,
    pub success: Resolve<T, String>,
    pub error: Resolve<E, String>,
    pub loading_description: Option<Description>,
    pub success_description: Option<Resolve<T, Description>>,
    pub error_description: Option<Resolve<E, Description>>,
    pub success_action: Option<ToastAction>,
    pub error_action: Option<ToastAction>,
    pub class_names: ClassNames,
    pub style: ToastStyle,
    pub timing: ToastTimings,
    pub spring: Option<bool>,
    pub bounce: Option<f64>,
}

impl<T, E> PromiseData<T, E> {
    pub fn new(
        loading: impl Into<String>,
        success: impl Into<Resolve<T, String>>,
        error: impl Into<Resolve<E, String>>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
            loading_description: None,
            success_description: None,
            error_description: None,
            success_action: None,
            error_action: None,
            class_names: ClassNames::default(),
            style: ToastStyle::default(),
            timing: ToastTimings::default(),
            spring: None,
            bounce: None,
        }
    }

    pub fn loading_description(mut self, description: impl Into<Description>) -> Self {
        self.loading_description = Some(description.into());
        self
    }

    pub fn success_description(mut self, description: impl Into<Resolve<T, Description>>) -> Self {
        self.success_description = Some(description.into());
        self
    }

    pub fn error_description(mut self, description: impl Into<Resolve<E, Description>>) -> Self {
        self.error_description = Some(description.into());
        self
    }

    pub fn success_action(mut self, action: ToastAction) -> Self {
        self.success_action = Some(action);
        self
    }

    pub fn error_action(mut self, action: ToastAction) -> Self {
        self.error_action = Some(action);
        self
    }

    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn style(mut self, style: ToastStyle) -> Self {
        self.style = style;
        self
    }

    pub fn timing(mut self, timing: ToastTimings) -> Self {
        self.timing = timing;
        self
    }

    pub fn spring(mut self, enabled: bool) -> Self {
        self.spring = Some(enabled);
        self
    }

    pub fn bounce(mut self, bounce: f64) -> Self {
        self.bounce = Some(bounce);
        self
    }

    /// Any phase has a description configured.
    pub fn has_description(&self) -> bool {
        self.loading_description.is_some()
            || self.success_description.is_some()
            || self.error_description.is_some()
    }

    /// The loading toast stays mounted until the operation settles when a
    /// display duration or any description is configured.
    pub fn holds_until_settled(&self) -> bool {
        self.timing.display_duration.is_some() || self.has_description()
    }

    fn props(
        &self,
        title: String,
        phase: ToastPhase,
        description: Option<Description>,
        action: Option<ToastAction>,
    ) -> ToastProps {
        ToastProps {
            title,
            phase,
            description,
            action,
            icon: None,
            class_names: self.class_names.clone(),
            style: self.style.clone(),
            timing: self.timing,
            spring: self.spring,
            bounce: self.bounce,
        }
    }

    pub(crate) fn loading_props(&self) -> ToastProps {
        self.props(
            self.loading.clone(),
            ToastPhase::Loading,
            self.loading_description.clone(),
            None,
        )
    }

    /// Stack lifetime after settling, `None` to leave it unchanged.
    ///
    /// Settled content with a description or action gets the display
    /// duration plus one collapse, so the pre-dismiss collapse can finish.
    fn settled_duration(&self, expanded: bool) -> Option<Duration> {
        let base = self
            .timing
            .display_duration
            .or(expanded.then_some(DEFAULT_DISPLAY_DURATION));
        let collapse = self.timing.resolve().collapse_duration;
        base.map(|base| if expanded { base + collapse } else { base })
    }
}

impl<T, E> fmt::Debug for PromiseData<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromiseData")
            .field("loading", &self.loading)
            .field("success", &self.success)
            .field("error", &self.error)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// The outcome of a settled operation, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settled {
    pub props: ToastProps,
    pub duration: Option<Duration>,
}

/// Type-erased pending operation owned by a toast entry.
pub(crate) trait PendingToast {
    /// Poll once. Returns the settled content the first time the operation
    /// completes, and `None` before and after.
    fn poll_settled(&mut self) -> Option<Settled>;
}

pub(crate) struct PromiseTracker<T, E> {
    future: Option<Pin<Box<dyn Future<Output = Result<T, E>>>>>,
    data: PromiseData<T, E>,
}

impl<T, E> PromiseTracker<T, E> {
    pub fn new(
        future: impl Future<Output = Result<T, E>> + 'static,
        data: PromiseData<T, E>,
    ) -> Self {
        Self {
            future: Some(Box::pin(future)),
            data,
        }
    }
}

impl<T, E> PendingToast for PromiseTracker<T, E> {
    fn poll_settled(&mut self) -> Option<Settled> {
        let future = self.future.as_mut()?;
        let mut cx = Context::from_waker(Waker::noop());
        let Poll::Ready(outcome) = future.as_mut().poll(&mut cx) else {
            return None;
        };
        self.future = None;

        let data = &self.data;
        let (props, expanded) = match outcome {
            Ok(value) => {
                let description = data.success_description.as_ref().map(|d| d.resolve(&value));
                let action = data.success_action.clone();
                let expanded = description.is_some() || action.is_some();
                let title = data.success.resolve(&value);
                (data.props(title, ToastPhase::Success, description, action), expanded)
            }
            Err(error) => {
                let description = data.error_description.as_ref().map(|d| d.resolve(&error));
                let action = data.error_action.clone();
                let expanded = description.is_some() || action.is_some();
                let title = data.error.resolve(&error);
                (data.props(title, ToastPhase::Error, description, action), expanded)
            }
        };
        goey_core::debug!(phase = props.phase.as_str(), expanded, "promise settled");
        Some(Settled {
            props,
            duration: data.settled_duration(expanded),
        })
    }
}

// ---------------------------------------------------------------------------
// Deferred
// ---------------------------------------------------------------------------

struct Shared<T, E> {
    outcome: Option<Result<T, E>>,
    waker: Option<Waker>,
}

/// A pending operation settled by its [`Resolver`].
pub struct Deferred<T, E> {
    shared: Rc<RefCell<Shared<T, E>>>,
}

/// Settles the paired [`Deferred`]. Dropping it unsettled leaves the
/// operation pending forever.
pub struct Resolver<T, E> {
    shared: Rc<RefCell<Shared<T, E>>>,
}

/// A hand-settled pending operation.
pub fn deferred<T, E>() -> (Deferred<T, E>, Resolver<T, E>) {
    let shared = Rc::new(RefCell::new(Shared {
        outcome: None,
        waker: None,
    }));
    (
        Deferred {
            shared: Rc::clone(&shared),
        },
        Resolver { shared },
    )
}

impl<T, E> Resolver<T, E> {
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: E) {
        self.settle(Err(error));
    }

    pub fn settle(self, outcome: Result<T, E>) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.outcome = Some(outcome);
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T, E> Future for Deferred<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        match shared.outcome.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                shared.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.shared.borrow().outcome.is_some())
            .finish()
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Upload {
        count: u32,
    }

    fn data() -> PromiseData<Upload, String> {
        PromiseData::new(
            "Uploading...",
            Resolve::with(|u: &Upload| format!("Uploaded {} files", u.count)),
            Resolve::with(|e: &String| format!("Error: {e}")),
        )
    }

    #[test]
    fn pending_until_resolved() {
        let (pending, resolver) = deferred();
        let mut tracker = PromiseTracker::new(pending, data());
        assert!(tracker.poll_settled().is_none());
        resolver.resolve(Upload { count: 5 });
        let settled = tracker.poll_settled().expect("settled");
        assert_eq!(settled.props.title, "Uploaded 5 files");
        assert_eq!(settled.props.phase, ToastPhase::Success);
        assert_eq!(settled.duration, None);
        assert!(tracker.poll_settled().is_none());
    }

    #[test]
    fn rejection_feeds_the_error_callback() {
        let (pending, resolver) = deferred();
        let mut tracker = PromiseTracker::new(pending, data());
        resolver.reject("Timeout".to_owned());
        let settled = tracker.poll_settled().expect("settled");
        assert_eq!(settled.props.title, "Error: Timeout");
        assert_eq!(settled.props.phase, ToastPhase::Error);
    }

    #[test]
    fn expanded_settle_extends_by_one_collapse() {
        let data = data().success_description(Resolve::with(|u: &Upload| {
            Description::text(format!("{} files in /uploads", u.count))
        }));
        let mut tracker =
            PromiseTracker::new(std::future::ready(Ok(Upload { count: 2 })), data);
        let settled = tracker.poll_settled().expect("settled");
        assert_eq!(settled.duration, Some(Duration::from_millis(4900)));
        assert_eq!(
            settled.props.description,
            Some(Description::text("2 files in /uploads"))
        );
    }

    #[test]
    fn explicit_display_duration_applies_without_content() {
        let data = data().timing(ToastTimings::default().display_duration(Duration::from_secs(2)));
        assert!(data.holds_until_settled());
        let mut tracker = PromiseTracker::new(std::future::ready(Ok(Upload { count: 1 })), data);
        assert_eq!(
            tracker.poll_settled().map(|s| s.duration),
            Some(Some(Duration::from_secs(2)))
        );
    }

    #[test]
    fn loading_props_use_the_loading_phase() {
        let data = data().loading_description("Hang tight");
        let props = data.loading_props();
        assert_eq!(props.phase, ToastPhase::Loading);
        assert_eq!(props.title, "Uploading...");
        assert!(props.description.is_some());
        assert!(data.holds_until_settled());
    }
}
