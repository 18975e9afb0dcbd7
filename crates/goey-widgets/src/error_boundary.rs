#![forbid(unsafe_code)]

//! Per-toast render containment.
//!
//! A toast whose content fails to render, by returning an error or by
//! panicking, renders nothing from then on. The failure is logged once and
//! never reaches the rest of the stack.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::content::RenderError;
use crate::toast::ToastId;

/// A captured render failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    pub toast: ToastId,
    pub error: RenderError,
    /// Where the failure happened, e.g. `"description"`.
    pub component: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoundaryState {
    #[default]
    Healthy,
    Failed(CapturedError),
}

impl BoundaryState {
    pub fn error(&self) -> Option<&CapturedError> {
        match self {
            Self::Healthy => None,
            Self::Failed(e) => Some(e),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Catches render failures for one toast.
#[derive(Debug, Clone, Default)]
pub struct ErrorBoundary {
    state: BoundaryState,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    /// Run `render` inside the boundary.
    ///
    /// Returns `None` once the boundary has failed; `render` is not called
    /// again after a failure.
    pub fn render<T>(
        &mut self,
        toast: &ToastId,
        component: &'static str,
        render: impl FnOnce() -> Result<T, RenderError>,
    ) -> Option<T> {
        if self.state.is_failed() {
            return None;
        }
        let error = match catch_unwind(AssertUnwindSafe(render)) {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(error)) => error,
            Err(payload) => RenderError::from_panic(payload.as_ref()),
        };
        goey_core::error!(
            toast = %toast,
            component,
            error = %error,
            "toast rendering failed"
        );
        self.state = BoundaryState::Failed(CapturedError {
            toast: toast.clone(),
            error,
            component,
        });
        None
    }
}
