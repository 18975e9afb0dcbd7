#![forbid(unsafe_code)]

//! Goey toasts: morphing notification pills that grow into a rounded body
//! when they carry a description or an action.
//!
//! This crate is the public facade. A [`Toaster`] owns a stack of toasts,
//! shows them through [`show`](Toaster::show) and its typed variants or
//! [`promise`](Toaster::promise), and is driven by the host one frame at a
//! time:
//!
//! ```
//! use std::time::Duration;
//! use goey::prelude::*;
//!
//! let mut toaster = Toaster::new(ToasterConfig::default());
//! let id = toaster.success("Saved", ToastOptions::new().description("3 files synced"));
//! for _ in 0..30 {
//!     toaster.advance(Duration::from_millis(16));
//! }
//! let views = toaster.views();
//! assert_eq!(views[0].id, id);
//! assert!(views[0].outline.is_some());
//! ```

pub mod config;
pub mod options;
pub mod promise;
pub mod stack;
pub mod toaster;

pub use config::{Dir, ParseThemeError, Theme, ToasterConfig};
pub use options::ToastOptions;
pub use promise::{Deferred, PromiseData, Resolve, Resolver, deferred};
pub use stack::{DisplayDuration, MemoryStack, MountOptions, StackManager};
pub use toaster::{DEFAULT_CONTAINER, Toaster};

// --- Component re-exports -------------------------------------------------

pub use goey_core::clock::FrameClock;
pub use goey_core::motion::ReducedMotion;
pub use goey_render::{LayoutConstraints, MorphBranch, Path};
pub use goey_widgets::{
    ClassNames, ContentLayout, Description, GoeyToast, MorphState, ParsePositionError,
    RenderError, RenderedBlock, Renderable, TextLayout, TextMetrics, ToastAction, ToastIcon,
    ToastId, ToastPhase, ToastPosition, ToastProps, ToastStyle, ToastTimings, ToastType,
    ToastView,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Description, PromiseData, Resolve, Theme, ToastAction, ToastId, ToastOptions,
        ToastPhase, ToastPosition, ToastTimings, ToastView, Toaster, ToasterConfig, deferred,
    };
}
