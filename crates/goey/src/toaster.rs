#![forbid(unsafe_code)]

//! The toaster: owns a stack of goey toasts and drives them frame by frame.

use std::collections::HashMap;
use std::future::Future;
use std::mem;
use std::time::Duration;

use goey_core::clock::FrameClock;
use goey_widgets::{
    ContainerId, GoeyToast, ObserverRegistry, Registration, TextLayout, TextMetrics,
    ToastContext, ToastId, ToastProps, ToastType, ToastView, sync_stack_heights,
};

use crate::config::ToasterConfig;
use crate::options::ToastOptions;
use crate::promise::{PendingToast, PromiseData, PromiseTracker};
use crate::stack::{DisplayDuration, MemoryStack, MountOptions, StackManager};

/// Container id of the stack a [`Toaster::new`] toaster creates.
pub const DEFAULT_CONTAINER: ContainerId = ContainerId(0);

struct Entry {
    toast: GoeyToast,
    layout: TextLayout,
    pending: Option<Box<dyn PendingToast>>,
    /// Mounted with an infinite lifetime; the toast ends itself.
    self_dismiss: bool,
    /// The stack holds the item until the operation settles.
    held: bool,
    _registration: Option<Registration>,
}

/// A stack of goey toasts sharing one position and motion context.
///
/// Each toaster owns its own [`ToastContext`], so toasters at different
/// positions never affect each other's mirroring.
pub struct Toaster<S: StackManager = MemoryStack> {
    config: ToasterConfig,
    context: ToastContext,
    metrics: TextMetrics,
    stack: S,
    registry: ObserverRegistry,
    entries: HashMap<ToastId, Entry>,
}

impl Toaster<MemoryStack> {
    pub fn new(config: ToasterConfig) -> Self {
        let stack = MemoryStack::new(DEFAULT_CONTAINER, config.duration, config.gap);
        Self::with_stack(config, stack)
    }
}

impl Default for Toaster<MemoryStack> {
    fn default() -> Self {
        Self::new(ToasterConfig::default())
    }
}

impl<S: StackManager> Toaster<S> {
    pub fn with_stack(config: ToasterConfig, mut stack: S) -> Self {
        let registry = ObserverRegistry::new();
        stack.attach_observer(registry.clone());
        let context = ToastContext {
            position: config.position,
            spring: config.spring,
            bounce: config.bounce,
            ..ToastContext::default()
        };
        Self {
            config,
            context,
            metrics: TextMetrics::default(),
            stack,
            registry,
            entries: HashMap::new(),
        }
    }

    /// Text metrics used to lay out and render every toast.
    pub fn metrics(mut self, metrics: TextMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &ToasterConfig {
        &self.config
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn toast(&self, id: &ToastId) -> Option<&GoeyToast> {
        self.entries.get(id).map(|entry| &entry.toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Update the reduced-motion preference of every toast, mounted or not.
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.context.reduced_motion.set(reduced);
    }

    // -----------------------------------------------------------------------
    // Showing toasts
    // -----------------------------------------------------------------------

    pub fn show(&mut self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(title.into(), ToastType::Default, options)
    }

    pub fn success(&mut self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(title.into(), ToastType::Success, options)
    }

    pub fn error(&mut self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(title.into(), ToastType::Error, options)
    }

    pub fn warning(&mut self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(title.into(), ToastType::Warning, options)
    }

    pub fn info(&mut self, title: impl Into<String>, options: ToastOptions) -> ToastId {
        self.create(title.into(), ToastType::Info, options)
    }

    /// Show a loading toast that follows `operation` to success or error.
    pub fn promise<T, E>(
        &mut self,
        operation: impl Future<Output = Result<T, E>> + 'static,
        data: PromiseData<T, E>,
    ) -> ToastId
    where
        T: 'static,
        E: 'static,
    {
        let held = data.holds_until_settled();
        let duration = if held {
            DisplayDuration::Infinite
        } else {
            DisplayDuration::Default
        };
        let id = self.stack.custom(MountOptions { id: None, duration });
        let props = data.loading_props();
        let tracker: Box<dyn PendingToast> = Box::new(PromiseTracker::new(operation, data));
        self.mount(id.clone(), props, false, held, Some(tracker));
        id
    }

    /// Dismiss one toast, or all of them with `None`.
    pub fn dismiss(&mut self, id: Option<&ToastId>) {
        goey_core::debug!(toast = ?id.map(ToastId::as_str), "dismiss");
        self.stack.dismiss(id);
        self.retain_mounted();
    }

    /// Click the action button of `id`. Returns false when it has none
    /// visible.
    pub fn click_action(&mut self, id: &ToastId) -> bool {
        self.entries
            .get_mut(id)
            .is_some_and(|entry| entry.toast.click_action())
    }

    fn create(&mut self, title: String, kind: ToastType, options: ToastOptions) -> ToastId {
        let expanded = options.has_expanded_content();
        let duration = match options.duration {
            Some(d) => DisplayDuration::Finite(d),
            None if expanded => DisplayDuration::Infinite,
            None => options
                .timing
                .display_duration
                .map_or(DisplayDuration::Default, DisplayDuration::Finite),
        };
        let self_dismiss = duration == DisplayDuration::Infinite;
        let id = self.stack.custom(MountOptions {
            id: options.id.clone(),
            duration,
        });
        let props = options.into_props(title, kind);
        self.mount(id.clone(), props, self_dismiss, false, None);
        id
    }

    fn mount(
        &mut self,
        id: ToastId,
        props: ToastProps,
        self_dismiss: bool,
        held: bool,
        pending: Option<Box<dyn PendingToast>>,
    ) {
        // Replacing an entry drops its registration before the new one
        // registers.
        self.entries.remove(&id);
        let registration = self
            .stack
            .container_of(&id)
            .map(|container| self.registry.register(container, id.clone()));
        let toast = GoeyToast::new(id.clone(), props, self.context.clone());
        goey_core::debug!(toast = %id, phase = toast.phase().as_str(), "toast mounted");
        self.entries.insert(
            id,
            Entry {
                toast,
                layout: TextLayout::new(self.metrics),
                pending,
                self_dismiss,
                held,
                _registration: registration,
            },
        );
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Advance every toast by `dt`, then the stack's observers and lifetimes.
    pub fn advance(&mut self, dt: Duration) {
        let mut finished = Vec::new();

        for id in self.stack.mounted() {
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };

            let settled = entry.pending.as_mut().and_then(|p| p.poll_settled());
            if let Some(settled) = settled {
                entry.pending = None;
                entry.toast.set_props(settled.props);
                let reset = match settled.duration {
                    Some(d) => Some(DisplayDuration::Finite(d)),
                    None if mem::take(&mut entry.held) => Some(DisplayDuration::Default),
                    None => None,
                };
                if let Some(duration) = reset {
                    self.stack.custom(MountOptions {
                        id: Some(id.clone()),
                        duration,
                    });
                }
            }

            let output = entry.toast.advance(dt, &mut entry.layout);
            if let Some(height) = output.rendered_height {
                self.stack.report_height(&id, height);
            }
            if output.sync_stack {
                sync_stack_heights(&mut self.stack, &id);
            }
            if output.failed || (output.dismiss && entry.self_dismiss) {
                finished.push(id);
            }
        }

        self.registry.run_frame(&mut self.stack);

        for id in &finished {
            goey_core::debug!(toast = %id, "toast finished");
            self.stack.dismiss(Some(id));
        }
        self.stack.advance(dt);
        self.retain_mounted();
    }

    /// Advance by the wall-clock time since the previous `frame` call.
    pub fn frame(&mut self, clock: &mut FrameClock) {
        let dt = clock.tick();
        self.advance(dt);
    }

    /// Render the visible toasts, front of the stack first.
    pub fn views(&mut self) -> Vec<ToastView> {
        let visible: Vec<ToastId> = self
            .stack
            .mounted()
            .into_iter()
            .filter(|id| self.entries.contains_key(id))
            .take(self.config.visible_toasts)
            .collect();
        let mut views = Vec::with_capacity(visible.len());
        for id in &visible {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            if let Some(view) = entry.toast.render(&self.metrics) {
                views.push(view);
            }
        }
        views
    }

    fn retain_mounted(&mut self) {
        let stack = &self.stack;
        self.entries.retain(|id, _| stack.is_mounted(id));
    }
}
