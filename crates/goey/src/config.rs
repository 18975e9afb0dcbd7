#![forbid(unsafe_code)]

//! Toaster-level configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use goey_widgets::ToastPosition;
use goey_widgets::morph::DEFAULT_BOUNCE;
use goey_widgets::toast::DEFAULT_DISPLAY_DURATION;

pub const DEFAULT_GAP: f64 = 14.0;
pub const DEFAULT_OFFSET: f64 = 24.0;
pub const DEFAULT_VISIBLE_TOASTS: usize = 3;

/// Colour scheme passed through to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError {
    pub input: String,
}

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme {:?}, expected \"light\" or \"dark\"",
            self.input
        )
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseThemeError { input: s.to_owned() }),
        }
    }
}

/// Text direction of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dir {
    #[default]
    Ltr,
    Rtl,
}

/// Configuration for a [`Toaster`](crate::Toaster).
///
/// `position`, `spring` and `bounce` become the context every toast of the
/// toaster inherits. The remaining fields configure the stack.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ToasterConfig {
    pub position: ToastPosition,
    /// Lifetime of toasts mounted without an explicit duration.
    pub duration: Duration,
    /// Vertical space between stacked toasts.
    pub gap: f64,
    /// Distance of the stack from the viewport edge.
    pub offset: f64,
    pub theme: Theme,
    pub spring: bool,
    pub bounce: f64,
    /// Toasts past this count stay mounted but are not rendered.
    pub visible_toasts: usize,
    /// Show every toast expanded instead of collapsed behind the front one.
    pub expand: bool,
    pub close_button: bool,
    pub rich_colors: bool,
    pub dir: Dir,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            position: ToastPosition::default(),
            duration: DEFAULT_DISPLAY_DURATION,
            gap: DEFAULT_GAP,
            offset: DEFAULT_OFFSET,
            theme: Theme::default(),
            spring: true,
            bounce: DEFAULT_BOUNCE,
            visible_toasts: DEFAULT_VISIBLE_TOASTS,
            expand: false,
            close_button: false,
            rich_colors: false,
            dir: Dir::default(),
        }
    }
}

impl ToasterConfig {
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn spring(mut self, spring: bool) -> Self {
        self.spring = spring;
        self
    }

    pub fn bounce(mut self, bounce: f64) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn visible_toasts(mut self, count: usize) -> Self {
        self.visible_toasts = count;
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn close_button(mut self, close_button: bool) -> Self {
        self.close_button = close_button;
        self
    }

    pub fn rich_colors(mut self, rich_colors: bool) -> Self {
        self.rich_colors = rich_colors;
        self
    }

    pub fn dir(mut self, dir: Dir) -> Self {
        self.dir = dir;
        self
    }
}
