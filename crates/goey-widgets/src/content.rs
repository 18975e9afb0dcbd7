#![forbid(unsafe_code)]

//! Toast body content and the text metrics used to lay it out.
//!
//! A description is either plain text, wrapped by [`TextMetrics::wrap`], or a
//! caller-supplied [`Renderable`]. Custom renderables may fail; the failure is
//! reported as a [`RenderError`] and contained by the toast's error boundary.

use std::fmt;
use std::rc::Rc;

use goey_core::geometry::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Pixel metrics for laying out toast text.
///
/// Text width is the unicode display width times `glyph_advance`, so wide
/// (CJK, emoji) graphemes take two advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub glyph_advance: f64,
    pub line_height: f64,
    pub icon_size: f64,
    pub icon_gap: f64,
    /// Total horizontal padding of the header and body (both sides).
    pub padding_x: f64,
    pub padding_y: f64,
    /// Widest the expanded body may grow.
    pub max_content_width: f64,
    /// Vertical gap between header and description.
    pub description_gap: f64,
    /// Vertical gap between description and action.
    pub action_gap: f64,
    pub action_height: f64,
    pub action_padding_x: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            glyph_advance: 7.0,
            line_height: 20.0,
            icon_size: 18.0,
            icon_gap: 8.0,
            padding_x: 20.0,
            padding_y: 8.0,
            max_content_width: 340.0,
            description_gap: 6.0,
            action_gap: 10.0,
            action_height: 28.0,
            action_padding_x: 24.0,
        }
    }
}

impl TextMetrics {
    /// Rendered width of a single line of text.
    pub fn text_width(&self, text: &str) -> f64 {
        text.width() as f64 * self.glyph_advance
    }

    /// Width of the icon plus title, without padding.
    pub fn header_content_width(&self, title: &str) -> f64 {
        self.icon_size + self.icon_gap + self.text_width(title)
    }

    /// Greedy word wrap at `max_width` pixels.
    ///
    /// Explicit newlines always break. A word wider than the line is split
    /// between graphemes. Trailing whitespace is dropped from each line.
    pub fn wrap(&self, text: &str, max_width: f64) -> Vec<String> {
        let max_cols = (max_width / self.glyph_advance).floor().max(1.0) as usize;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut cols = 0usize;

            for word in paragraph.split_word_bounds() {
                let w = word.width();
                if cols + w <= max_cols {
                    line.push_str(word);
                    cols += w;
                    continue;
                }
                if word.trim().is_empty() {
                    // Break at the space instead of carrying it.
                    lines.push(finish_line(&mut line));
                    cols = 0;
                    continue;
                }
                if cols > 0 {
                    lines.push(finish_line(&mut line));
                    cols = 0;
                }
                for g in word.graphemes(true) {
                    let gw = g.width();
                    if cols + gw > max_cols && cols > 0 {
                        lines.push(finish_line(&mut line));
                        cols = 0;
                    }
                    line.push_str(g);
                    cols += gw;
                }
            }
            lines.push(finish_line(&mut line));
        }
        lines
    }
}

fn finish_line(line: &mut String) -> String {
    let out = line.trim_end().to_owned();
    line.clear();
    out
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// Laid-out description lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedBlock {
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

impl RenderedBlock {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Lay out plain text.
    pub fn text(metrics: &TextMetrics, text: &str, max_width: f64) -> Self {
        let lines = metrics.wrap(text, max_width);
        let width = lines
            .iter()
            .map(|l| metrics.text_width(l))
            .fold(0.0, f64::max);
        let height = lines.len() as f64 * metrics.line_height;
        Self {
            lines,
            width,
            height,
        }
    }
}

/// Failure to render custom content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The renderable reported an error.
    Failed { message: String },
    /// The renderable panicked.
    Panicked { message: String },
}

impl RenderError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Build from a caught panic payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Panicked { message }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message } | Self::Panicked { message } => message,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { message } => write!(f, "toast content failed to render: {message}"),
            Self::Panicked { message } => write!(f, "toast content panicked: {message}"),
        }
    }
}

impl std::error::Error for RenderError {}

// ---------------------------------------------------------------------------
// Description
// ---------------------------------------------------------------------------

/// Custom description content.
pub trait Renderable {
    fn render(&self, metrics: &TextMetrics, max_width: f64) -> Result<RenderedBlock, RenderError>;
}

impl<F> Renderable for F
where
    F: Fn(&TextMetrics, f64) -> Result<RenderedBlock, RenderError>,
{
    fn render(&self, metrics: &TextMetrics, max_width: f64) -> Result<RenderedBlock, RenderError> {
        self(metrics, max_width)
    }
}

/// Toast description.
#[derive(Clone)]
pub enum Description {
    Text(String),
    Custom(Rc<dyn Renderable>),
}

impl Description {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn custom(renderable: impl Renderable + 'static) -> Self {
        Self::Custom(Rc::new(renderable))
    }

    pub fn render(
        &self,
        metrics: &TextMetrics,
        max_width: f64,
    ) -> Result<RenderedBlock, RenderError> {
        match self {
            Self::Text(text) => Ok(RenderedBlock::text(metrics, text, max_width)),
            Self::Custom(renderable) => renderable.render(metrics, max_width),
        }
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Text compares by value, custom content by instance.
impl PartialEq for Description {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl From<&str> for Description {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Description {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
