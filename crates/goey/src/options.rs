#![forbid(unsafe_code)]

//! Per-toast options for [`Toaster::show`](crate::Toaster::show) and its
//! typed variants.

use std::time::Duration;

use goey_widgets::{
    ClassNames, Description, ToastAction, ToastId, ToastPhase, ToastProps, ToastStyle,
    ToastTimings, ToastType,
};

/// Optional content, styling and timing for one toast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    pub description: Option<Description>,
    pub action: Option<ToastAction>,
    pub icon: Option<String>,
    /// Stack lifetime override.
    pub duration: Option<Duration>,
    /// Reusing the id of a mounted toast replaces it.
    pub id: Option<ToastId>,
    pub class_names: ClassNames,
    pub fill_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub timing: ToastTimings,
    pub spring: Option<bool>,
    pub bounce: Option<f64>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<Description>) -> Self {
        self.description = Some(description.into());
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

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn border_width(mut self, width: f64) -> Self {
        self.border_width = Some(width);
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

    pub fn has_expanded_content(&self) -> bool {
        self.description.is_some() || self.action.is_some()
    }

    pub(crate) fn style(&self) -> ToastStyle {
        ToastStyle {
            fill_color: self.fill_color.clone(),
            border_color: self.border_color.clone(),
            border_width: self.border_width,
        }
    }

    pub(crate) fn into_props(self, title: String, kind: ToastType) -> ToastProps {
        let style = self.style();
        ToastProps {
            title,
            phase: ToastPhase::from(kind),
            description: self.description,
            action: self.action,
            icon: self.icon,
            class_names: self.class_names,
            style,
            timing: self.timing,
            spring: self.spring,
            bounce: self.bounce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_carry_options_through() {
        let props = ToastOptions::new()
            .description("Saved to cloud")
            .icon("☁")
            .border_color("#222")
            .spring(false)
            .into_props("Saved".into(), ToastType::Success);
        assert_eq!(props.title, "Saved");
        assert_eq!(props.phase, ToastPhase::Success);
        assert_eq!(props.icon.as_deref(), Some("☁"));
        assert_eq!(props.style.stroke_width(), 1.5);
        assert_eq!(props.spring, Some(false));
        assert!(props.has_expanded_content());
    }

    #[test]
    fn plain_options_have_no_expanded_content() {
        assert!(!ToastOptions::new().icon("!").has_expanded_content());
    }
}
