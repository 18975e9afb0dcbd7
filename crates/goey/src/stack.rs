#![forbid(unsafe_code)]

//! The stack manager seam and the in-memory reference stack.
//!
//! A stack manager owns the ordered list of mounted toasts, their lifetimes
//! and the per-item height it uses for offset math. [`MemoryStack`] caches
//! that height once, on the first report after mount, like a DOM stack
//! measuring its children at insertion; the toasts correct it afterwards
//! through [`StackSurface`].

use std::time::Duration;

use goey_widgets::{ContainerId, ObserverRegistry, StackSurface, ToastId};

/// How long a mounted item lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayDuration {
    /// The stack's own default.
    #[default]
    Default,
    Finite(Duration),
    /// Until dismissed.
    Infinite,
}

/// Options for [`StackManager::custom`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MountOptions {
    /// Mounting an id that is already present re-renders that item.
    pub id: Option<ToastId>,
    pub duration: DisplayDuration,
}

/// A stacked, auto-dismissing list of items.
pub trait StackManager: StackSurface {
    /// Mount an item, or re-render the item with the same id. Returns its id.
    fn custom(&mut self, options: MountOptions) -> ToastId;

    /// Remove one item, or every item with `None`.
    fn dismiss(&mut self, toast: Option<&ToastId>);

    /// Mounted items, front of the stack first.
    fn mounted(&self) -> Vec<ToastId>;

    fn is_mounted(&self, toast: &ToastId) -> bool;

    /// The host laid out `toast` at `height`.
    fn report_height(&mut self, toast: &ToastId, height: f64);

    /// Advance lifetimes. Returns the items that expired.
    fn advance(&mut self, dt: Duration) -> Vec<ToastId>;

    /// Route item-metadata mutations to `registry`.
    fn attach_observer(&mut self, _registry: ObserverRegistry) {}
}

// ---------------------------------------------------------------------------
// MemoryStack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Item {
    id: ToastId,
    /// `None` lives until dismissed.
    remaining: Option<Duration>,
    rendered: Option<f64>,
    initial: Option<f64>,
    /// Height captured when the item was first laid out.
    mount_height: Option<f64>,
}

/// In-memory stack manager. Newest items go to the front.
#[derive(Debug)]
pub struct MemoryStack {
    container: ContainerId,
    default_duration: Duration,
    gap: f64,
    items: Vec<Item>,
    next_id: u64,
    observer: Option<ObserverRegistry>,
}

impl MemoryStack {
    pub fn new(container: ContainerId, default_duration: Duration, gap: f64) -> Self {
        Self {
            container,
            default_duration,
            gap,
            items: Vec::new(),
            next_id: 1,
            observer: None,
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remaining lifetime, `None` when the item lives until dismissed.
    pub fn remaining(&self, toast: &ToastId) -> Option<Duration> {
        self.item(toast).and_then(|item| item.remaining)
    }

    /// Offset of `toast` from the stack edge: the cached heights of every
    /// item in front of it plus one gap each.
    pub fn offset_of(&self, toast: &ToastId) -> Option<f64> {
        let mut offset = 0.0;
        for item in &self.items {
            if item.id == *toast {
                return Some(offset);
            }
            offset += item.initial.unwrap_or(0.0) + self.gap;
        }
        None
    }

    fn item(&self, toast: &ToastId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *toast)
    }

    fn item_mut(&mut self, toast: &ToastId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == *toast)
    }

    fn lifetime(&self, duration: DisplayDuration) -> Option<Duration> {
        match duration {
            DisplayDuration::Default => Some(self.default_duration),
            DisplayDuration::Finite(d) => Some(d),
            DisplayDuration::Infinite => None,
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.notify_mutation(self.container);
        }
    }
}

impl StackSurface for MemoryStack {
    fn container_of(&self, toast: &ToastId) -> Option<ContainerId> {
        self.item(toast).map(|_| self.container)
    }

    fn items(&self, container: ContainerId) -> Vec<ToastId> {
        if container != self.container {
            return Vec::new();
        }
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    fn rendered_height(&self, toast: &ToastId) -> Option<f64> {
        self.item(toast).and_then(|item| item.rendered)
    }

    fn initial_height(&self, toast: &ToastId) -> Option<f64> {
        self.item(toast).and_then(|item| item.initial)
    }

    fn set_initial_height(&mut self, toast: &ToastId, height: f64) {
        if let Some(item) = self.item_mut(toast) {
            item.initial = Some(height);
            self.notify();
        }
    }
}

impl StackManager for MemoryStack {
    fn custom(&mut self, options: MountOptions) -> ToastId {
        let remaining = self.lifetime(options.duration);
        let id = match options.id {
            Some(id) => id,
            None => {
                let id = ToastId::from(self.next_id);
                self.next_id += 1;
                id
            }
        };

        if let Some(item) = self.item_mut(&id) {
            item.remaining = remaining;
            // A re-render restores the height measured at mount.
            let stale = item
                .mount_height
                .filter(|h| item.initial != Some(*h));
            if let Some(height) = stale {
                item.initial = Some(height);
                self.notify();
            }
            goey_core::debug!(toast = %id, "stack item re-rendered");
            return id;
        }

        self.items.insert(
            0,
            Item {
                id: id.clone(),
                remaining,
                rendered: None,
                initial: None,
                mount_height: None,
            },
        );
        goey_core::debug!(toast = %id, "stack item mounted");
        id
    }

    fn dismiss(&mut self, toast: Option<&ToastId>) {
        match toast {
            Some(id) => self.items.retain(|item| item.id != *id),
            None => self.items.clear(),
        }
    }

    fn mounted(&self) -> Vec<ToastId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    fn is_mounted(&self, toast: &ToastId) -> bool {
        self.item(toast).is_some()
    }

    fn report_height(&mut self, toast: &ToastId, height: f64) {
        let Some(item) = self.item_mut(toast) else {
            return;
        };
        item.rendered = Some(height);
        if item.mount_height.is_none() {
            item.mount_height = Some(height);
            item.initial = Some(height);
        }
    }

    fn advance(&mut self, dt: Duration) -> Vec<ToastId> {
        let mut expired = Vec::new();
        for item in &mut self.items {
            if let Some(remaining) = item.remaining.as_mut() {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    expired.push(item.id.clone());
                }
            }
        }
        if !expired.is_empty() {
            self.items.retain(|item| !expired.contains(&item.id));
            goey_core::debug!(count = expired.len(), "stack items expired");
        }
        expired
    }

    fn attach_observer(&mut self, registry: ObserverRegistry) {
        self.observer = Some(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goey_widgets::sync_stack_heights;

    const C: ContainerId = ContainerId(7);

    fn stack() -> MemoryStack {
        MemoryStack::new(C, Duration::from_millis(4000), 14.0)
    }

    #[test]
    fn newest_items_go_to_the_front() {
        let mut s = stack();
        let a = s.custom(MountOptions::default());
        let b = s.custom(MountOptions::default());
        assert_eq!(s.mounted(), vec![b, a]);
    }

    #[test]
    fn durations_expire() {
        let mut s = stack();
        let short = s.custom(MountOptions {
            id: Some("short".into()),
            duration: DisplayDuration::Finite(Duration::from_millis(100)),
        });
        let forever = s.custom(MountOptions {
            id: Some("forever".into()),
            duration: DisplayDuration::Infinite,
        });
        let default = s.custom(MountOptions::default());

        assert!(s.advance(Duration::from_millis(60)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(60)), vec![short]);
        assert_eq!(s.remaining(&default), Some(Duration::from_millis(3880)));
        assert_eq!(s.advance(Duration::from_secs(60)), vec![default]);
        assert_eq!(s.mounted(), vec![forever]);
    }

    #[test]
    fn height_is_cached_once_at_mount() {
        let mut s = stack();
        let id = s.custom(MountOptions::default());
        s.report_height(&id, 34.0);
        s.report_height(&id, 120.0);
        assert_eq!(s.initial_height(&id), Some(34.0));
        assert_eq!(s.rendered_height(&id), Some(120.0));
    }

    #[test]
    fn offsets_follow_cached_heights() {
        let mut s = stack();
        let back = s.custom(MountOptions::default());
        let front = s.custom(MountOptions::default());
        s.report_height(&front, 34.0);
        s.report_height(&back, 34.0);
        assert_eq!(s.offset_of(&front), Some(0.0));
        assert_eq!(s.offset_of(&back), Some(48.0));

        s.report_height(&front, 120.0);
        assert_eq!(s.offset_of(&back), Some(48.0));
        sync_stack_heights(&mut s, &front);
        assert_eq!(s.offset_of(&back), Some(134.0));
    }

    #[test]
    fn rerender_restores_the_stale_height_and_notifies() {
        let registry = ObserverRegistry::new();
        let mut s = stack();
        s.attach_observer(registry.clone());
        let id = s.custom(MountOptions {
            id: Some("grow".into()),
            duration: DisplayDuration::Infinite,
        });
        let _registration = registry.register(C, id.clone());
        s.report_height(&id, 34.0);
        s.report_height(&id, 120.0);
        sync_stack_heights(&mut s, &id);
        assert_eq!(s.initial_height(&id), Some(120.0));
        // Drain the notification from the correction above.
        registry.run_frame(&mut s);
        registry.run_frame(&mut s);

        s.custom(MountOptions {
            id: Some("grow".into()),
            duration: DisplayDuration::Finite(Duration::from_millis(4900)),
        });
        assert_eq!(s.initial_height(&id), Some(34.0));
        assert_eq!(s.remaining(&id), Some(Duration::from_millis(4900)));

        assert_eq!(registry.run_frame(&mut s), 1);
        assert_eq!(s.initial_height(&id), Some(120.0));
    }

    #[test]
    fn dismiss_one_or_all() {
        let mut s = stack();
        let a = s.custom(MountOptions::default());
        let b = s.custom(MountOptions::default());
        s.dismiss(Some(&a));
        assert_eq!(s.mounted(), vec![b]);
        s.dismiss(None);
        assert!(s.is_empty());
    }
}
