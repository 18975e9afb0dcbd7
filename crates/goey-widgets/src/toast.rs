#![forbid(unsafe_code)]

//! Toast vocabulary: identity, placement, phase, action and overrides.
//!
//! # Example
//!
//! ```
//! use goey_widgets::toast::{ToastAction, ToastPhase, ToastProps};
//! use goey_widgets::content::Description;
//!
//! let props = ToastProps::new("Deploying")
//!     .phase(ToastPhase::Loading)
//!     .description(Description::text("Rolling out to 3 regions"))
//!     .action(ToastAction::new("Undo", || {}).success_label("Reverted"));
//! assert!(props.has_expanded_content());
//! ```

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use crate::content::Description;

/// Unique identifier for a toast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ToastId(pub String);

impl ToastId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Screen anchor for a toast stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl ToastPosition {
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Right-anchored stacks render mirrored so the pill lobe hugs the edge.
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown position name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError {
    pub input: String,
}

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown toast position {:?} (expected top-left, top-center, top-right, \
             bottom-left, bottom-center or bottom-right)",
            self.input
        )
    }
}

impl std::error::Error for ParsePositionError {}

impl FromStr for ToastPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePositionError {
                input: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// Type and phase
// ---------------------------------------------------------------------------

/// Toast kind chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToastType {
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

/// Semantic phase driving icon and colour. A superset of [`ToastType`]
/// adding the promise `Loading` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ToastPhase {
    Loading,
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

impl From<ToastType> for ToastPhase {
    fn from(value: ToastType) -> Self {
        match value {
            ToastType::Default => Self::Default,
            ToastType::Success => Self::Success,
            ToastType::Error => Self::Error,
            ToastType::Warning => Self::Warning,
            ToastType::Info => Self::Info,
        }
    }
}

impl ToastPhase {
    /// Type reported to the host. A loading toast presents as `Info`.
    pub fn presented_type(self) -> ToastType {
        match self {
            Self::Loading | Self::Info => ToastType::Info,
            Self::Default => ToastType::Default,
            Self::Success => ToastType::Success,
            Self::Error => ToastType::Error,
            Self::Warning => ToastType::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Default => "default",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// Icon shown before the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastIcon {
    /// Animated loading indicator.
    Spinner,
    /// Built-in glyph for a settled phase.
    Phase(ToastPhase),
    /// Caller-supplied glyph or markup, passed through verbatim.
    Custom(String),
}

impl ToastIcon {
    /// The icon for `phase`, preferring `custom` unless an action-success
    /// override is active.
    pub fn resolve(custom: Option<&str>, phase: ToastPhase, overridden: bool) -> Self {
        match custom {
            Some(icon) if !overridden => Self::Custom(icon.to_owned()),
            _ if phase == ToastPhase::Loading => Self::Spinner,
            _ => Self::Phase(phase),
        }
    }

    /// Single-character fallback for text hosts.
    pub fn as_char(&self) -> char {
        match self {
            Self::Spinner => '\u{25CC}', // ◌
            Self::Phase(ToastPhase::Success) => '\u{2713}',
            Self::Phase(ToastPhase::Error) => '\u{2717}',
            Self::Phase(ToastPhase::Warning) => '!',
            Self::Phase(ToastPhase::Info) => 'i',
            Self::Phase(_) => '\u{2022}', // •
            Self::Custom(s) => s.chars().next().unwrap_or('\u{2022}'),
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Button shown in the expanded body.
///
/// When `success_label` is set, clicking replaces the title with it, forces
/// the success phase and removes the description and action for good.
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub on_click: Rc<dyn Fn()>,
    pub success_label: Option<String>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            on_click: Rc::new(on_click),
            success_label: None,
        }
    }

    pub fn success_label(mut self, label: impl Into<String>) -> Self {
        self.success_label = Some(label.into());
        self
    }

    pub fn invoke(&self) {
        (self.on_click)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("success_label", &self.success_label)
            .finish_non_exhaustive()
    }
}

/// Same label, success label and callback instance.
impl PartialEq for ToastAction {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.success_label == other.success_label
            && std::ptr::addr_eq(Rc::as_ptr(&self.on_click), Rc::as_ptr(&other.on_click))
    }
}

// ---------------------------------------------------------------------------
// Styling hooks
// ---------------------------------------------------------------------------

/// Extra CSS class names appended to each part, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ClassNames {
    pub wrapper: Option<String>,
    pub content: Option<String>,
    pub header: Option<String>,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub action_wrapper: Option<String>,
    pub action_button: Option<String>,
}

pub const DEFAULT_FILL: &str = "#ffffff";
pub const DEFAULT_BORDER_WIDTH: f64 = 1.5;

/// Outline fill and stroke overrides.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ToastStyle {
    pub fill_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
}

impl ToastStyle {
    pub fn fill(&self) -> &str {
        self.fill_color.as_deref().unwrap_or(DEFAULT_FILL)
    }

    /// Stroke colour, or `None` for no stroke.
    pub fn stroke(&self) -> Option<&str> {
        self.border_color.as_deref()
    }

    /// Stroke width. Zero unless a border colour is set.
    pub fn stroke_width(&self) -> f64 {
        match self.border_color {
            Some(_) => self.border_width.unwrap_or(DEFAULT_BORDER_WIDTH),
            None => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Timings
// ---------------------------------------------------------------------------

pub const DEFAULT_EXPAND_DELAY: Duration = Duration::from_millis(330);
pub const DEFAULT_EXPAND_DURATION: Duration = Duration::from_millis(900);
pub const DEFAULT_COLLAPSE_DURATION: Duration = Duration::from_millis(900);
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(4000);
pub const DEFAULT_SQUISH_DELAY: Duration = Duration::from_millis(350);

/// Per-toast timing overrides. Unset fields fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ToastTimings {
    pub expand_delay: Option<Duration>,
    pub expand_duration: Option<Duration>,
    pub collapse_duration: Option<Duration>,
    pub display_duration: Option<Duration>,
    pub squish_delay: Option<Duration>,
}

impl ToastTimings {
    pub fn expand_delay(mut self, d: Duration) -> Self {
        self.expand_delay = Some(d);
        self
    }

    pub fn expand_duration(mut self, d: Duration) -> Self {
        self.expand_duration = Some(d);
        self
    }

    pub fn collapse_duration(mut self, d: Duration) -> Self {
        self.collapse_duration = Some(d);
        self
    }

    pub fn display_duration(mut self, d: Duration) -> Self {
        self.display_duration = Some(d);
        self
    }

    pub fn squish_delay(mut self, d: Duration) -> Self {
        self.squish_delay = Some(d);
        self
    }

    pub fn resolve(&self) -> ResolvedTimings {
        ResolvedTimings {
            expand_delay: self.expand_delay.unwrap_or(DEFAULT_EXPAND_DELAY),
            expand_duration: self.expand_duration.unwrap_or(DEFAULT_EXPAND_DURATION),
            collapse_duration: self.collapse_duration.unwrap_or(DEFAULT_COLLAPSE_DURATION),
            display_duration: self.display_duration.unwrap_or(DEFAULT_DISPLAY_DURATION),
            squish_delay: self.squish_delay.unwrap_or(DEFAULT_SQUISH_DELAY),
        }
    }
}

/// [`ToastTimings`] with every field filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimings {
    pub expand_delay: Duration,
    pub expand_duration: Duration,
    pub collapse_duration: Duration,
    pub display_duration: Duration,
    pub squish_delay: Duration,
}

impl Default for ResolvedTimings {
    fn default() -> Self {
        ToastTimings::default().resolve()
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// Everything a toast renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastProps {
    pub title: String,
    pub phase: ToastPhase,
    pub description: Option<Description>,
    pub action: Option<ToastAction>,
    pub icon: Option<String>,
    pub class_names: ClassNames,
    pub style: ToastStyle,
    pub timing: ToastTimings,
    /// Per-toast spring override. `None` inherits the toaster setting.
    pub spring: Option<bool>,
    pub bounce: Option<f64>,
}

impl ToastProps {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn phase(mut self, phase: ToastPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
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

    /// A description or an action is present.
    pub fn has_expanded_content(&self) -> bool {
        self.description.is_some() || self.action.is_some()
    }
}
