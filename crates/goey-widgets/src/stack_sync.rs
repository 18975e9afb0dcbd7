#![forbid(unsafe_code)]

//! Stack height correction.
//!
//! Stack managers typically measure an item once at mount, while the toast is
//! still a pill, and offset every sibling from that cached height. When a
//! toast grows, [`sync_stack_heights`] rewrites the cached height of every
//! item in its container from the real rendered heights.
//!
//! Corrections also have to survive the stack manager rewriting stale
//! heights on its own re-renders. [`ObserverRegistry`] keeps one observer per
//! container: mutations mark it pending, the next frame runs every registered
//! toast's correction once, and the frame after that re-arms it, so the
//! corrections' own writes never re-trigger the observer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use goey_core::geometry::DIMENSION_EPSILON;

use crate::toast::ToastId;

/// Identity of one stack container (one list of toasts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

/// Per-item metadata exposed by a stack manager.
pub trait StackSurface {
    fn container_of(&self, toast: &ToastId) -> Option<ContainerId>;

    /// Items of `container`, in stacking order.
    fn items(&self, container: ContainerId) -> Vec<ToastId>;

    /// Real rendered height of an item's content, if laid out.
    fn rendered_height(&self, toast: &ToastId) -> Option<f64>;

    /// Height the stack manager uses for offset math.
    fn initial_height(&self, toast: &ToastId) -> Option<f64>;

    fn set_initial_height(&mut self, toast: &ToastId, height: f64);
}

/// Rewrite the cached height of every sibling of `toast` that drifted from
/// its rendered height. Returns the number of items corrected.
pub fn sync_stack_heights(surface: &mut dyn StackSurface, toast: &ToastId) -> usize {
    let Some(container) = surface.container_of(toast) else {
        return 0;
    };
    let mut corrected = 0;
    for item in surface.items(container) {
        let Some(height) = surface.rendered_height(&item).filter(|h| *h > 0.0) else {
            continue;
        };
        let stale = surface
            .initial_height(&item)
            .is_none_or(|cached| (cached - height).abs() >= DIMENSION_EPSILON);
        if stale {
            surface.set_initial_height(&item, height);
            corrected += 1;
        }
    }
    if corrected > 0 {
        goey_core::trace!(
            toast = %toast,
            container = container.0,
            corrected,
            "stack heights corrected"
        );
    }
    corrected
}

// ---------------------------------------------------------------------------
// Observer registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    /// A mutation was seen; corrections run next frame.
    Pending,
    /// Corrections ran this frame; their writes are ignored.
    Applying,
}

#[derive(Debug, Default)]
struct Observer {
    phase: Phase,
    toasts: Vec<(u64, ToastId)>,
}

#[derive(Debug, Default)]
struct Registry {
    observers: HashMap<ContainerId, Observer>,
    next_key: u64,
}

/// Shared per-container observers. Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ObserverRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `toast` with the observer of `container`, creating the
    /// observer if this is the first registration. Dropping the returned
    /// guard unregisters; the last drop removes the observer.
    #[must_use = "dropping the registration unregisters immediately"]
    pub fn register(&self, container: ContainerId, toast: ToastId) -> Registration {
        let mut registry = self.inner.borrow_mut();
        let key = registry.next_key;
        registry.next_key += 1;
        let observer = registry.observers.entry(container).or_default();
        observer.toasts.push((key, toast));
        Registration {
            registry: Rc::downgrade(&self.inner),
            container,
            key,
        }
    }

    /// Report a change to the item metadata of `container`.
    pub fn notify_mutation(&self, container: ContainerId) {
        let Ok(mut registry) = self.inner.try_borrow_mut() else {
            return;
        };
        if let Some(observer) = registry.observers.get_mut(&container) {
            if observer.phase == Phase::Idle {
                observer.phase = Phase::Pending;
            }
        }
    }

    /// Frame boundary: run pending corrections and re-arm observers that
    /// applied last frame. Returns the number of corrections run.
    pub fn run_frame(&self, surface: &mut dyn StackSurface) -> usize {
        let due: Vec<ToastId> = {
            let mut registry = self.inner.borrow_mut();
            let mut due = Vec::new();
            for observer in registry.observers.values_mut() {
                match observer.phase {
                    Phase::Idle => {}
                    Phase::Applying => observer.phase = Phase::Idle,
                    Phase::Pending => {
                        observer.phase = Phase::Applying;
                        due.extend(observer.toasts.iter().map(|(_, id)| id.clone()));
                    }
                }
            }
            due
        };
        for toast in &due {
            sync_stack_heights(surface, toast);
        }
        due.len()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    pub fn registration_count(&self, container: ContainerId) -> usize {
        self.inner
            .borrow()
            .observers
            .get(&container)
            .map_or(0, |o| o.toasts.len())
    }
}

/// Registration guard returned by [`ObserverRegistry::register`].
#[derive(Debug)]
pub struct Registration {
    registry: Weak<RefCell<Registry>>,
    container: ContainerId,
    key: u64,
}

impl Registration {
    pub fn container(&self) -> ContainerId {
        self.container
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.try_borrow_mut() else {
            return;
        };
        let remove = match registry.observers.get_mut(&self.container) {
            Some(observer) => {
                observer.toasts.retain(|(key, _)| *key != self.key);
                observer.toasts.is_empty()
            }
            None => false,
        };
        if remove {
            registry.observers.remove(&self.container);
        }
    }
}
