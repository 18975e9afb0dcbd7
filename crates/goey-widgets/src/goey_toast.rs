#![forbid(unsafe_code)]

//! The toast component: content, morph, overlays and render output.
//!
//! # Frame order
//!
//! [`GoeyToast::advance`] runs, in order: reduced-motion sync, content sync,
//! the morph's expanded-content edge, timers and channels, measurement and
//! reconciliation, overlays, and finally the flush that writes clamps back to
//! the host layout. Measurement always precedes the flush, and the flush
//! always precedes the stack correction the caller performs when
//! [`ToastOutput::sync_stack`] is set.

use std::time::Duration;

use goey_core::geometry::DIMENSION_EPSILON;
use goey_core::motion::ReducedMotion;
use goey_render::{Flush, LayoutConstraints};

use crate::content::{Description, TextMetrics};
use crate::cosmetics::{Cosmetics, SquishKind};
use crate::error_boundary::{BoundaryState, ErrorBoundary};
use crate::measure::{ContentLayout, ContentSnapshot, Measurer, compact_pill_width};
use crate::morph::{DEFAULT_BOUNCE, MorphConfig, MorphController, MorphEvent, MorphState};
use crate::toast::{
    ResolvedTimings, ToastAction, ToastIcon, ToastId, ToastPhase, ToastPosition, ToastProps,
};
use crate::view::{Accessibility, ActionView, Outline, TextAlign, ToastView};

/// Settings a toast inherits from its toaster.
#[derive(Debug, Clone)]
pub struct ToastContext {
    pub position: ToastPosition,
    pub spring: bool,
    pub bounce: f64,
    pub reduced_motion: ReducedMotion,
}

impl Default for ToastContext {
    fn default() -> Self {
        Self {
            position: ToastPosition::default(),
            spring: true,
            bounce: DEFAULT_BOUNCE,
            reduced_motion: ReducedMotion::default(),
        }
    }
}

/// What the owner must do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToastOutput {
    /// The rendered height changed; correct the stack's cached heights.
    pub sync_stack: bool,
    /// The display duration of an expanded toast is over.
    pub dismiss: bool,
    /// The toast's content failed to render; it will never render again.
    pub failed: bool,
    pub rendered_height: Option<f64>,
}

/// One morphing toast.
#[derive(Debug, Clone)]
pub struct GoeyToast {
    id: ToastId,
    props: ToastProps,
    context: ToastContext,
    timings: ResolvedTimings,
    /// Action-success label. Terminal once set.
    success_override: Option<String>,
    morph: MorphController,
    cosmetics: Cosmetics,
    measurer: Measurer,
    boundary: ErrorBoundary,
    motion_revision: u64,
    content: Option<ContentSnapshot>,
    last_phase: Option<ToastPhase>,
    flush: Option<Flush>,
    rendered_height: Option<f64>,
}

impl GoeyToast {
    pub fn new(id: ToastId, props: ToastProps, context: ToastContext) -> Self {
        let timings = props.timing.resolve();
        let spring = props.spring.unwrap_or(context.spring);
        let config = MorphConfig {
            timings,
            spring,
            bounce: props.bounce.unwrap_or(context.bounce),
        };
        let reduced = context.reduced_motion.get();
        let mut morph = MorphController::new(config);
        morph.set_reduced_motion(reduced);
        let mut cosmetics = Cosmetics::new(spring);
        cosmetics.set_reduced_motion(reduced);

        Self {
            id,
            props,
            motion_revision: context.reduced_motion.revision(),
            context,
            timings,
            success_override: None,
            morph,
            cosmetics,
            measurer: Measurer::new(),
            boundary: ErrorBoundary::new(),
            content: None,
            last_phase: None,
            flush: None,
            rendered_height: None,
        }
    }

    // -----------------------------------------------------------------------
    // Effective content
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &ToastId {
        &self.id
    }

    pub fn props(&self) -> &ToastProps {
        &self.props
    }

    /// Replace the props, e.g. when a tracked promise settles.
    pub fn set_props(&mut self, props: ToastProps) {
        self.props = props;
    }

    pub fn title(&self) -> &str {
        self.success_override.as_deref().unwrap_or(&self.props.title)
    }

    pub fn phase(&self) -> ToastPhase {
        if self.success_override.is_some() {
            ToastPhase::Success
        } else {
            self.props.phase
        }
    }

    pub fn description(&self) -> Option<&Description> {
        match self.success_override {
            Some(_) => None,
            None => self.props.description.as_ref(),
        }
    }

    pub fn action(&self) -> Option<&ToastAction> {
        match self.success_override {
            Some(_) => None,
            None => self.props.action.as_ref(),
        }
    }

    pub fn is_overridden(&self) -> bool {
        self.success_override.is_some()
    }

    pub fn icon(&self) -> ToastIcon {
        ToastIcon::resolve(self.props.icon.as_deref(), self.phase(), self.is_overridden())
    }

    /// Description or action present, ignoring whether the body is shown.
    pub fn has_expanded_content(&self) -> bool {
        self.description().is_some() || self.action().is_some()
    }

    /// Body content is mounted and not on its way out.
    fn body_visible(&self) -> bool {
        self.morph.show_body() && !self.morph.is_dismissing()
    }

    pub fn state(&self) -> MorphState {
        self.morph.state()
    }

    pub fn morph(&self) -> &MorphController {
        &self.morph
    }

    pub fn cosmetics(&self) -> &Cosmetics {
        &self.cosmetics
    }

    pub fn timings(&self) -> &ResolvedTimings {
        &self.timings
    }

    pub fn position(&self) -> ToastPosition {
        self.context.position
    }

    pub fn rendered_height(&self) -> Option<f64> {
        self.rendered_height
    }

    pub fn boundary_state(&self) -> &BoundaryState {
        self.boundary.state()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Click the action button. Returns false when no button is visible.
    ///
    /// With a success label the click replaces the title, forces the
    /// success phase and removes description and action for good.
    pub fn click_action(&mut self) -> bool {
        if !self.body_visible() {
            return false;
        }
        let Some(action) = self.action().cloned() else {
            return false;
        };
        action.invoke();
        if let Some(label) = action.success_label {
            goey_core::debug!(toast = %self.id, "action success override");
            self.morph.hold_for_override();
            self.success_override = Some(label);
        }
        true
    }

    /// Force a measurement on the next frame, e.g. after a font load.
    pub fn request_measure(&mut self) {
        self.measurer.request(self.morph.now());
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance by `dt`. A failed toast no longer animates and reports
    /// [`ToastOutput::failed`] on every frame.
    pub fn advance(&mut self, dt: Duration, layout: &mut dyn ContentLayout) -> ToastOutput {
        if self.boundary.state().is_failed() {
            return self.failed_output();
        }
        let mut output = ToastOutput::default();

        let revision = self.context.reduced_motion.revision();
        if revision != self.motion_revision {
            self.motion_revision = revision;
            let reduced = self.context.reduced_motion.get();
            self.morph.set_reduced_motion(reduced);
            self.cosmetics.set_reduced_motion(reduced);
        }

        self.sync_content(layout);
        let compact = compact_pill_width(layout);
        let has_content = self.has_expanded_content();
        self.morph.set_expanded_content(has_content, compact);
        self.morph.begin_frame(dt, compact);
        self.sync_content(layout);
        if self.boundary.state().is_failed() {
            return self.failed_output();
        }

        self.measurer.observe(layout);
        if self.measurer.due(self.morph.now()) {
            if let Some(dims) = self.measurer.measure(layout) {
                self.morph.reconcile(dims);
            }
        }

        let phase = self.phase();
        if phase == ToastPhase::Error && self.last_phase != Some(ToastPhase::Error) {
            self.cosmetics.shake();
        }
        self.last_phase = Some(phase);

        self.cosmetics.advance(dt);
        for event in self.morph.drain_events() {
            self.on_morph_event(event, &mut output);
        }

        self.flush = self.morph.flush(self.context.position.is_right());
        if let Some(flush) = &self.flush {
            layout.apply_constraints(&flush.constraints);
        }

        let height = layout.content_size().map(|s| s.height);
        let changed = match (height, self.rendered_height) {
            (Some(new), Some(old)) => (new - old).abs() >= DIMENSION_EPSILON,
            (new, old) => new.is_some() != old.is_some(),
        };
        if changed {
            output.sync_stack = true;
            self.rendered_height = height;
        }
        output.rendered_height = self.rendered_height;
        output
    }

    fn sync_content(&mut self, layout: &mut dyn ContentLayout) {
        let show_body = self.body_visible();
        let snapshot = ContentSnapshot {
            title: self.title().to_owned(),
            icon: self.icon(),
            description: self.description().cloned(),
            action_label: self.action().map(|a| a.label.clone()),
            show_body,
        };
        if self.content.as_ref() == Some(&snapshot) {
            return;
        }
        let updated = self
            .boundary
            .render(&self.id, "content", || layout.update_content(&snapshot));
        if updated.is_none() {
            return;
        }
        self.measurer.request(self.morph.now());
        self.content = Some(snapshot);
    }

    fn failed_output(&self) -> ToastOutput {
        ToastOutput {
            failed: true,
            rendered_height: self.rendered_height,
            ..ToastOutput::default()
        }
    }

    fn on_morph_event(&mut self, event: MorphEvent, output: &mut ToastOutput) {
        match event {
            MorphEvent::FirstMeasured => {
                self.cosmetics.schedule_landing(self.timings.squish_delay);
            }
            MorphEvent::BodyShown => {
                if !self.morph.is_dismissing() {
                    self.cosmetics.engage_header();
                }
            }
            MorphEvent::ExpandStarted => {
                self.cosmetics.squish(SquishKind::Landing);
            }
            MorphEvent::ExpandSettled => {
                self.cosmetics.squish(SquishKind::Blob);
                output.sync_stack = true;
            }
            MorphEvent::CollapseStarted { pre_dismiss } => {
                self.cosmetics.squish(SquishKind::Collapse);
                if pre_dismiss {
                    self.cosmetics.release_header();
                }
            }
            MorphEvent::Collapsed { .. } => {
                self.cosmetics.squish(SquishKind::Blob);
                output.sync_stack = true;
            }
            MorphEvent::BodyHidden => self.cosmetics.release_header(),
            MorphEvent::HeightChanged => output.sync_stack = true,
            MorphEvent::DismissRequested => output.dismiss = true,
        }
    }

    // -----------------------------------------------------------------------
    // Render
    // -----------------------------------------------------------------------

    /// Render the current frame. `None` once the toast's content has failed
    /// to render.
    pub fn render(&mut self, metrics: &TextMetrics) -> Option<ToastView> {
        if self.boundary.state().is_failed() {
            return None;
        }

        let body_visible = self.body_visible();
        let description = match self.description().filter(|_| body_visible).cloned() {
            Some(desc) => {
                let width = metrics.max_content_width - metrics.padding_x;
                Some(
                    self.boundary
                        .render(&self.id, "description", || desc.render(metrics, width))?,
                )
            }
            None => None,
        };

        let phase = self.phase();
        let mirrored = self.context.position.is_right();
        let style = &self.props.style;
        let outline = self.flush.as_ref().map(|flush| Outline {
            path: flush.path.clone(),
            fill: style.fill().to_owned(),
            stroke: style.stroke().map(str::to_owned),
            stroke_width: style.stroke_width(),
        });

        Some(ToastView {
            id: self.id.clone(),
            title: self.title().to_owned(),
            phase,
            icon: self.icon(),
            outline,
            constraints: self
                .flush
                .as_ref()
                .map_or(LayoutConstraints::NONE, |f| f.constraints),
            description,
            action: self
                .action()
                .filter(|_| body_visible)
                .map(|a| ActionView {
                    label: a.label.clone(),
                }),
            mirrored,
            text_align: if mirrored {
                TextAlign::Right
            } else {
                TextAlign::Left
            },
            wrapper_transform: self.cosmetics.wrapper_transform(),
            header_transform: self.cosmetics.header_transform(),
            accessibility: Accessibility::for_phase(phase),
            expanded: self.morph.show_body(),
            class_names: self.props.class_names.clone(),
        })
    }
}
