#![forbid(unsafe_code)]

//! Natural-size measurement of toast content.
//!
//! The host owns the actual layout and exposes it through [`ContentLayout`].
//! [`Measurer`] lifts whatever clamps the previous frame applied, reads the
//! natural header and content sizes, and puts the clamps back, so an
//! in-flight animation never feeds its own constraints into the next
//! measurement.
//!
//! Measurement runs once when requested and again [`SETTLE_REMEASURE`] later
//! to catch content that lays out late. A change in the content block's
//! rendered size also triggers a measurement, like a resize observer would.

use std::time::Duration;

use goey_core::clock::Timer;
use goey_core::geometry::{Dimensions, PILL_HEIGHT, Size};
use goey_render::LayoutConstraints;

use crate::content::{Description, RenderError, RenderedBlock, TextMetrics};
use crate::toast::ToastIcon;

/// Delay of the follow-up measurement after a content change.
pub const SETTLE_REMEASURE: Duration = Duration::from_millis(100);

/// Horizontal content padding assumed when the host cannot report it.
pub const FALLBACK_PADDING_X: f64 = 20.0;

/// What the host should currently lay out.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSnapshot {
    pub title: String,
    pub icon: ToastIcon,
    pub description: Option<Description>,
    pub action_label: Option<String>,
    /// Description and action are mounted.
    pub show_body: bool,
}

impl ContentSnapshot {
    pub fn header(title: impl Into<String>, icon: ToastIcon) -> Self {
        Self {
            title: title.into(),
            icon,
            description: None,
            action_label: None,
            show_body: false,
        }
    }

    /// Description or action visible in the body.
    pub fn has_body(&self) -> bool {
        self.show_body && (self.description.is_some() || self.action_label.is_some())
    }
}

/// Host layout seen from a toast.
///
/// Every accessor returns `None` when the host has no live layout for the
/// toast (not mounted yet, or already torn down). Measurement treats that as
/// a skip, not as an error.
pub trait ContentLayout {
    /// Replace the content being laid out. Fails when custom content cannot
    /// be rendered.
    fn update_content(&mut self, content: &ContentSnapshot) -> Result<(), RenderError>;

    /// Natural width of the icon and title row, without padding.
    fn header_width(&self) -> Option<f64>;

    /// Left plus right padding of the content block.
    fn content_padding_x(&self) -> Option<f64>;

    /// Rendered size of the content block under the current clamps.
    fn content_size(&self) -> Option<Size>;

    fn constraints(&self) -> LayoutConstraints;

    fn apply_constraints(&mut self, constraints: &LayoutConstraints);
}

/// Compact pill width for the current header: header plus padding.
pub fn compact_pill_width(layout: &dyn ContentLayout) -> Option<f64> {
    let header = layout.header_width()?;
    Some(header + layout.content_padding_x().unwrap_or(FALLBACK_PADDING_X))
}

/// Schedules and performs measurements.
#[derive(Debug, Clone, Default)]
pub struct Measurer {
    pending: bool,
    settle: Timer,
    observed: Option<Size>,
    last: Option<Dimensions>,
}

impl Measurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure on the next check and once more after [`SETTLE_REMEASURE`].
    pub fn request(&mut self, now: Duration) {
        self.pending = true;
        self.settle.schedule(now, SETTLE_REMEASURE);
    }

    /// Flag a measurement if the content block changed size since last seen.
    pub fn observe(&mut self, layout: &dyn ContentLayout) {
        let size = layout.content_size();
        if size != self.observed {
            if self.observed.is_some() {
                self.pending = true;
            }
            self.observed = size;
        }
    }

    /// Whether a measurement is due at `now`. Consumes the request.
    pub fn due(&mut self, now: Duration) -> bool {
        let settled = self.settle.fire(now).is_some();
        std::mem::take(&mut self.pending) || settled
    }

    /// Most recent successful measurement.
    pub fn last(&self) -> Option<Dimensions> {
        self.last
    }

    /// Read natural dimensions with the layout's clamps lifted.
    pub fn measure(&mut self, layout: &mut dyn ContentLayout) -> Option<Dimensions> {
        let saved = layout.constraints();
        layout.apply_constraints(&LayoutConstraints::NONE);

        let header = layout.header_width();
        let padding = layout.content_padding_x().unwrap_or(FALLBACK_PADDING_X);
        let content = layout.content_size();

        layout.apply_constraints(&saved);

        let dims = Dimensions::new(header? + padding, content?.width, content?.height);
        goey_core::trace!(
            pill_width = dims.pill_width,
            body_width = dims.body_width,
            body_height = dims.body_height,
            "measured toast content"
        );
        self.last = Some(dims);
        Some(dims)
    }
}

// ---------------------------------------------------------------------------
// Text layout
// ---------------------------------------------------------------------------

/// [`ContentLayout`] computed from [`TextMetrics`].
///
/// Plain descriptions wrap at the body's maximum width. A custom description
/// that fails to render fails the update and leaves the previous content in
/// place.
#[derive(Debug, Clone)]
pub struct TextLayout {
    metrics: TextMetrics,
    content: Option<ContentSnapshot>,
    description: Option<RenderedBlock>,
    constraints: LayoutConstraints,
}

impl TextLayout {
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            content: None,
            description: None,
            constraints: LayoutConstraints::NONE,
        }
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Height of the header row inside the pill.
    fn header_row_height(&self) -> f64 {
        (PILL_HEIGHT - 2.0 * self.metrics.padding_y).max(0.0)
    }

    fn natural_size(&self, content: &ContentSnapshot) -> Size {
        let m = &self.metrics;
        let header = m.header_content_width(&content.title) + m.padding_x;
        if !content.has_body() {
            return Size::new(header, PILL_HEIGHT);
        }

        let mut width = header;
        let mut height = 2.0 * m.padding_y + self.header_row_height();
        if let Some(block) = &self.description {
            width = width.max(block.width + m.padding_x);
            height += m.description_gap + block.height;
        }
        if let Some(label) = &content.action_label {
            width = width.max(m.text_width(label) + m.action_padding_x + m.padding_x);
            height += m.action_gap + m.action_height;
        }
        Size::new(width.min(m.max_content_width.max(header)), height)
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new(TextMetrics::default())
    }
}

impl ContentLayout for TextLayout {
    fn update_content(&mut self, content: &ContentSnapshot) -> Result<(), RenderError> {
        if self.content.as_ref() == Some(content) {
            return Ok(());
        }
        let wrap_width = self.metrics.max_content_width - self.metrics.padding_x;
        self.description = match (&content.description, content.show_body) {
            (Some(desc), true) => Some(desc.render(&self.metrics, wrap_width)?),
            _ => None,
        };
        self.content = Some(content.clone());
        Ok(())
    }

    fn header_width(&self) -> Option<f64> {
        let content = self.content.as_ref()?;
        Some(self.metrics.header_content_width(&content.title))
    }

    fn content_padding_x(&self) -> Option<f64> {
        Some(self.metrics.padding_x)
    }

    fn content_size(&self) -> Option<Size> {
        let content = self.content.as_ref()?;
        let natural = self.natural_size(content);
        let c = &self.constraints;
        let width = c.content_width.or(c.wrapper_width).unwrap_or(natural.width);
        let height = c.max_height.map_or(natural.height, |h| natural.height.min(h));
        Some(Size::new(width, height))
    }

    fn constraints(&self) -> LayoutConstraints {
        self.constraints
    }

    fn apply_constraints(&mut self, constraints: &LayoutConstraints) {
        self.constraints = *constraints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastPhase;

    fn snapshot(title: &str) -> ContentSnapshot {
        ContentSnapshot::header(title, ToastIcon::Phase(ToastPhase::Info))
    }

    fn expanded(title: &str, description: &str) -> ContentSnapshot {
        ContentSnapshot {
            description: Some(Description::text(description)),
            show_body: true,
            ..snapshot(title)
        }
    }

    #[test]
    fn compact_content_is_a_pill() {
        let mut layout = TextLayout::default();
        layout.update_content(&snapshot("Saved")).expect("laid out");
        let dims = Measurer::new().measure(&mut layout).expect("mounted");
        // icon 18 + gap 8 + 5 glyphs * 7 + padding 20.
        assert_eq!(dims, Dimensions::new(81.0, 81.0, PILL_HEIGHT));
    }

    #[test]
    fn body_grows_with_description_and_action() {
        let mut layout = TextLayout::default();
        let mut content = expanded("Saved", "All changes were written to disk");
        layout.update_content(&content).expect("laid out");
        let with_desc = Measurer::new().measure(&mut layout).expect("mounted");
        assert_eq!(with_desc.body_height, 8.0 + 18.0 + 8.0 + 6.0 + 20.0);

        content.action_label = Some("Undo".into());
        layout.update_content(&content).expect("laid out");
        let with_action = Measurer::new().measure(&mut layout).expect("mounted");
        assert_eq!(with_action.body_height, with_desc.body_height + 10.0 + 28.0);
    }

    #[test]
    fn long_descriptions_wrap_at_max_width() {
        let mut layout = TextLayout::default();
        layout.update_content(&expanded("Hi", &"word ".repeat(40))).expect("laid out");
        let dims = Measurer::new().measure(&mut layout).expect("mounted");
        assert!(dims.body_width <= 340.0);
        assert!(dims.body_height > 100.0);
    }

    #[test]
    fn measurement_ignores_and_restores_clamps() {
        let mut layout = TextLayout::default();
        layout.update_content(&expanded("Saved", "Written")).expect("laid out");
        let clamp = LayoutConstraints {
            wrapper_width: Some(81.0),
            max_height: Some(PILL_HEIGHT),
            overflow_hidden: true,
            ..LayoutConstraints::NONE
        };
        layout.apply_constraints(&clamp);
        assert_eq!(layout.content_size().map(|s| s.height), Some(PILL_HEIGHT));

        let dims = Measurer::new().measure(&mut layout).expect("mounted");
        assert!(dims.body_height > PILL_HEIGHT);
        assert_eq!(layout.constraints(), clamp);
    }

    #[test]
    fn unmounted_layout_is_skipped() {
        let mut layout = TextLayout::default();
        assert_eq!(Measurer::new().measure(&mut layout), None);
        assert_eq!(compact_pill_width(&layout), None);
    }

    #[test]
    fn requests_fire_now_and_after_settle() {
        let mut m = Measurer::new();
        m.request(Duration::ZERO);
        assert!(m.due(Duration::ZERO));
        assert!(!m.due(Duration::from_millis(50)));
        assert!(m.due(Duration::from_millis(100)));
        assert!(!m.due(Duration::from_millis(116)));
    }

    #[test]
    fn resize_observation_requests_measurement() {
        let mut layout = TextLayout::default();
        layout.update_content(&snapshot("Saved")).expect("laid out");
        let mut m = Measurer::new();
        m.observe(&layout);
        assert!(!m.due(Duration::ZERO));

        layout.update_content(&snapshot("Saved again")).expect("laid out");
        m.observe(&layout);
        assert!(m.due(Duration::ZERO));
    }

    #[test]
    fn failing_custom_description_keeps_previous_content() {
        let mut layout = TextLayout::default();
        layout.update_content(&snapshot("Saved")).expect("laid out");
        let before = layout.content_size();

        let content = ContentSnapshot {
            description: Some(Description::custom(|_: &TextMetrics, _: f64| {
                Err::<RenderedBlock, _>(RenderError::failed("broken"))
            })),
            show_body: true,
            ..snapshot("Saved")
        };
        let err = layout.update_content(&content).unwrap_err();
        assert_eq!(err.message(), "broken");
        assert_eq!(layout.content_size(), before);
    }
}
