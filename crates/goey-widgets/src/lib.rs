#![forbid(unsafe_code)]

//! The goey toast component.
//!
//! [`GoeyToast`] ties together the [`morph`] state machine, natural-size
//! [`measure`]ment against a host [`ContentLayout`], the cosmetic overlays in
//! [`cosmetics`] and the render [`error_boundary`]. [`stack_sync`] corrects a
//! stack manager's cached item heights as toasts grow and shrink.

pub mod content;
pub mod cosmetics;
pub mod error_boundary;
pub mod goey_toast;
pub mod measure;
pub mod morph;
pub mod stack_sync;
pub mod toast;
pub mod view;

pub use content::{Description, RenderError, RenderedBlock, Renderable, TextMetrics};
pub use cosmetics::{Cosmetics, SquishKind, Suppressed, Transform};
pub use error_boundary::{BoundaryState, CapturedError, ErrorBoundary};
pub use goey_toast::{GoeyToast, ToastContext, ToastOutput};
pub use measure::{ContentLayout, ContentSnapshot, Measurer, TextLayout};
pub use morph::{MorphConfig, MorphController, MorphEvent, MorphState};
pub use stack_sync::{
    ContainerId, ObserverRegistry, Registration, StackSurface, sync_stack_heights,
};
pub use toast::{
    ClassNames, ParsePositionError, ResolvedTimings, ToastAction, ToastIcon, ToastId, ToastPhase,
    ToastPosition, ToastProps, ToastStyle, ToastTimings, ToastType,
};
pub use view::{Accessibility, Politeness, Role, TextAlign, ToastView};
