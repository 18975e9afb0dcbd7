#![forbid(unsafe_code)]

//! Render output of one toast for one frame.

use goey_render::{LayoutConstraints, Path};

use crate::cosmetics::{HeaderTransform, Transform};
use crate::content::RenderedBlock;
use crate::toast::{ClassNames, ToastIcon, ToastId, ToastPhase};

/// ARIA role of the toast wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Status,
    Alert,
}

/// ARIA live-region politeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    Polite,
    Assertive,
}

/// Accessibility attributes. Updates are always announced atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accessibility {
    pub role: Role,
    pub live: Politeness,
    pub atomic: bool,
}

impl Accessibility {
    pub fn for_phase(phase: ToastPhase) -> Self {
        let (role, live) = match phase {
            ToastPhase::Error => (Role::Alert, Politeness::Assertive),
            _ => (Role::Status, Politeness::Polite),
        };
        Self {
            role,
            live,
            atomic: true,
        }
    }

    pub fn role_str(&self) -> &'static str {
        match self.role {
            Role::Status => "status",
            Role::Alert => "alert",
        }
    }

    pub fn live_str(&self) -> &'static str {
        match self.live {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// Outline paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub path: Path,
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Outline {
    /// SVG `d` attribute.
    pub fn d(&self) -> String {
        self.path.to_string()
    }
}

/// Visible action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub label: String,
}

/// Everything a host needs to paint a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub id: ToastId,
    pub title: String,
    pub phase: ToastPhase,
    pub icon: ToastIcon,
    /// `None` until the toast has been measured.
    pub outline: Option<Outline>,
    pub constraints: LayoutConstraints,
    /// Present only while the body is shown.
    pub description: Option<RenderedBlock>,
    pub action: Option<ActionView>,
    /// Right-anchored toasts flip the wrapper and un-flip the content.
    pub mirrored: bool,
    pub text_align: TextAlign,
    pub wrapper_transform: Transform,
    pub header_transform: HeaderTransform,
    pub accessibility: Accessibility,
    pub expanded: bool,
    pub class_names: ClassNames,
}

impl ToastView {
    pub fn wrapper_css_transform(&self) -> String {
        self.wrapper_transform.to_css(self.mirrored)
    }

    /// Content transform undoing the wrapper flip.
    pub fn content_css_transform(&self) -> &'static str {
        if self.mirrored { "scaleX(-1)" } else { "" }
    }

    pub fn header_css_transform(&self) -> String {
        self.header_transform.to_css()
    }

    /// Wrapper class list: base class plus the caller's hook.
    pub fn wrapper_class(&self) -> String {
        join_class("goey-wrapper", self.class_names.wrapper.as_deref())
    }

    pub fn content_class(&self) -> String {
        let state = if self.expanded {
            "goey-content goey-content-expanded"
        } else {
            "goey-content goey-content-compact"
        };
        join_class(state, self.class_names.content.as_deref())
    }

    pub fn header_class(&self) -> String {
        let base = format!("goey-header goey-title-{}", self.phase.as_str());
        join_class(&base, self.class_names.header.as_deref())
    }

    pub fn title_class(&self) -> String {
        join_class("goey-title", self.class_names.title.as_deref())
    }

    pub fn icon_class(&self) -> String {
        join_class("goey-icon", self.class_names.icon.as_deref())
    }

    pub fn description_class(&self) -> String {
        join_class("goey-description", self.class_names.description.as_deref())
    }

    pub fn action_wrapper_class(&self) -> String {
        join_class("goey-action-wrapper", self.class_names.action_wrapper.as_deref())
    }

    pub fn action_button_class(&self) -> String {
        let base = format!("goey-action-button goey-action-{}", self.action_tone());
        join_class(&base, self.class_names.action_button.as_deref())
    }

    /// Loading buttons use the info tone.
    fn action_tone(&self) -> &'static str {
        match self.phase {
            ToastPhase::Loading => ToastPhase::Info.as_str(),
            phase => phase.as_str(),
        }
    }
}

fn join_class(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_owned(),
    }
}
