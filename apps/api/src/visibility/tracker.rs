//! Visibility Tracker — one Observation Record per tracked element.
//!
//! A tracker turns the platform's intersection entries into a single boolean
//! and publishes changes to its listeners. It owns at most one subscription
//! at any time. Every re-evaluation (target change, option change) releases
//! the old subscription completely before the new one is created.
//!
//! Degraded mode: with no target, or on a backend without intersection
//! support, the tracker reports `false` and never subscribes.
//!
//! Once a tracker configured with `freeze_once_visible` has latched `true`,
//! it stays `true` for its lifetime. Later target or option changes do not
//! re-arm observation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::visibility::backend::{
    IntersectionBackend, IntersectionEntry, NodeId, ObserverInit, Subscription,
};
use crate::visibility::options::ObserverOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(bool)>;

#[derive(Debug, Default)]
struct TrackerState {
    visible: bool,
    latched: bool,
    freeze: bool,
}

#[derive(Default)]
struct Shared {
    state: RefCell<TrackerState>,
    subscription: RefCell<Option<Subscription>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
}

impl Shared {
    fn handle_entry(&self, entry: IntersectionEntry) {
        let (changed, latch_now) = {
            let mut st = self.state.borrow_mut();
            if st.latched {
                return;
            }
            if entry.is_intersecting {
                let changed = !st.visible;
                st.visible = true;
                st.latched = st.freeze;
                (changed, st.freeze)
            } else if !st.freeze {
                let changed = st.visible;
                st.visible = false;
                (changed, false)
            } else {
                (false, false)
            }
        };

        if latch_now {
            // The slot is empty when latching during the initial delivery;
            // `subscribe` releases the handle as soon as `observe` returns.
            let subscription = self.subscription.borrow_mut().take();
            if let Some(subscription) = subscription {
                debug!(subscription = %subscription.id(), "visibility latched; releasing");
                subscription.unsubscribe();
            }
        }

        if changed {
            self.notify(entry.is_intersecting);
        }
    }

    fn set_hidden(&self) {
        let changed = {
            let mut st = self.state.borrow_mut();
            let changed = st.visible && !st.latched;
            if changed {
                st.visible = false;
            }
            changed
        };
        if changed {
            self.notify(false);
        }
    }

    fn notify(&self, visible: bool) {
        // Listeners run without the list borrowed so they may read the
        // tracker or register further listeners.
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (_, listener) in listeners.iter_mut() {
            listener(visible);
        }
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }

    fn release(&self) {
        let subscription = self.subscription.borrow_mut().take();
        if let Some(subscription) = subscription {
            trace!(subscription = %subscription.id(), "tearing down observation");
            subscription.unsubscribe();
        }
    }
}

pub struct VisibilityTracker {
    backend: Rc<dyn IntersectionBackend>,
    target: Option<NodeId>,
    options: ObserverOptions,
    shared: Rc<Shared>,
}

impl VisibilityTracker {
    /// Creates the Observation Record and, when possible, subscribes.
    pub fn new(
        backend: Rc<dyn IntersectionBackend>,
        target: Option<NodeId>,
        options: ObserverOptions,
    ) -> Self {
        let shared = Rc::new(Shared::default());
        shared.state.borrow_mut().freeze = options.freeze_once_visible();

        let mut tracker = VisibilityTracker {
            backend,
            target,
            options,
            shared,
        };
        tracker.subscribe();
        tracker
    }

    pub fn is_visible(&self) -> bool {
        self.shared.state.borrow().visible
    }

    pub fn is_latched(&self) -> bool {
        self.shared.state.borrow().latched
    }

    pub fn has_subscription(&self) -> bool {
        self.shared.subscription.borrow().is_some()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Registers a listener invoked with the new value on every change.
    pub fn on_change(&self, listener: impl FnMut(bool) + 'static) -> ListenerId {
        let id = ListenerId(self.shared.next_listener.get());
        self.shared.next_listener.set(id.0 + 1);
        self.shared
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        before != listeners.len()
    }

    pub fn set_target(&mut self, target: Option<NodeId>) {
        if target == self.target {
            return;
        }
        self.shared.release();
        self.target = target;
        if target.is_none() {
            self.shared.set_hidden();
        }
        self.subscribe();
    }

    pub fn set_options(&mut self, options: ObserverOptions) {
        if options == self.options {
            return;
        }
        self.shared.release();
        self.shared.state.borrow_mut().freeze = options.freeze_once_visible();
        self.options = options;
        self.subscribe();
    }

    /// Releases the subscription. Dropping the tracker does the same.
    pub fn unmount(self) {}

    fn subscribe(&mut self) {
        debug_assert!(!self.has_subscription());

        if self.is_latched() {
            return;
        }
        let Some(target) = self.target else {
            return;
        };
        if !self.backend.is_supported() {
            trace!(target = target.0, "intersection observation unavailable");
            return;
        }

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let subscription = self.backend.observe(
            target,
            &ObserverInit::from(&self.options),
            Box::new(move |entry| {
                if let Some(shared) = weak.upgrade() {
                    shared.handle_entry(entry);
                }
            }),
        );

        if self.is_latched() {
            subscription.unsubscribe();
        } else {
            *self.shared.subscription.borrow_mut() = Some(subscription);
        }
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.shared.release();
    }
}

impl fmt::Debug for VisibilityTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityTracker")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("state", &*self.shared.state.borrow())
            .field("subscribed", &self.has_subscription())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::backend::UnsupportedBackend;
    use crate::visibility::geometry::Rect;
    use crate::visibility::scene::SceneBackend;

    const VIEWPORT_H: f64 = 600.0;

    fn scene_with_node(node: NodeId, y: f64) -> (SceneBackend, Rc<dyn IntersectionBackend>) {
        let scene = SceneBackend::new(800.0, VIEWPORT_H);
        scene.place_node(node, Rect::new(0.0, y, 100.0, 100.0));
        let backend: Rc<dyn IntersectionBackend> = Rc::new(scene.clone());
        (scene, backend)
    }

    fn record(tracker: &VisibilityTracker) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tracker.on_change(move |v| sink.borrow_mut().push(v));
        seen
    }

    fn opts(threshold: f64, freeze: bool) -> ObserverOptions {
        ObserverOptions::builder()
            .threshold(threshold)
            .freeze_once_visible(freeze)
            .build()
            .unwrap()
    }

    #[test]
    fn test_starts_hidden_below_the_fold() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), ObserverOptions::default());
        assert!(!tracker.is_visible());
        assert!(tracker.has_subscription());
        assert_eq!(scene.active_subscriptions(), 1);
    }

    #[test]
    fn test_enter_exit_enter_without_freeze() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        let seen = record(&tracker);

        scene.scroll_to(0.0, 1800.0);
        scene.scroll_to(0.0, 0.0);
        scene.scroll_to(0.0, 1800.0);

        assert_eq!(*seen.borrow(), vec![true, false, true]);
        assert!(tracker.is_visible());
        assert_eq!(scene.active_subscriptions(), 1);
    }

    #[test]
    fn test_listener_scrolling_the_scene_sees_the_final_state() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        let seen = record(&tracker);
        let handle = scene.clone();
        tracker.on_change(move |v| {
            if v {
                handle.scroll_to(0.0, 0.0);
            }
        });

        scene.scroll_to(0.0, 1800.0);

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!tracker.is_visible());
        assert_eq!(scene.active_subscriptions(), 1);
    }

    #[test]
    fn test_freeze_latches_and_releases_subscription() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, true));
        let sub_id = scene.subscriptions_for(NodeId(1))[0];
        let seen = record(&tracker);

        scene.scroll_to(0.0, 1800.0);
        assert!(tracker.is_visible());
        assert!(tracker.is_latched());
        assert!(!tracker.has_subscription());
        assert_eq!(scene.active_subscriptions(), 0);
        let delivered = scene.deliveries(sub_id);

        scene.scroll_to(0.0, 0.0);
        scene.scroll_to(0.0, 1800.0);
        scene.scroll_to(0.0, 0.0);

        assert!(tracker.is_visible());
        assert_eq!(*seen.borrow(), vec![true]);
        assert_eq!(scene.deliveries(sub_id), delivered);
    }

    #[test]
    fn test_freeze_latching_on_initial_delivery() {
        let (scene, backend) = scene_with_node(NodeId(1), 0.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, true));
        assert!(tracker.is_visible());
        assert!(!tracker.has_subscription());
        assert_eq!(scene.active_subscriptions(), 0);
        assert_eq!(scene.total_released(), 1);
    }

    #[test]
    fn test_unset_target_never_subscribes() {
        let (scene, backend) = scene_with_node(NodeId(1), 0.0);
        let tracker = VisibilityTracker::new(backend, None, opts(0.1, false));
        let seen = record(&tracker);

        scene.scroll_to(0.0, 100.0);
        scene.scroll_to(0.0, 0.0);

        assert!(!tracker.is_visible());
        assert_eq!(scene.total_observed(), 0);
        assert!(seen.borrow().is_empty());
        tracker.unmount();
        assert_eq!(scene.total_observed(), 0);
    }

    #[test]
    fn test_unsupported_backend_stays_hidden() {
        let backend: Rc<dyn IntersectionBackend> = Rc::new(UnsupportedBackend);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.0, true));
        assert!(!tracker.is_visible());
        assert!(!tracker.has_subscription());
    }

    #[test]
    fn test_threshold_change_keeps_exactly_one_subscription() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let mut tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        assert_eq!(scene.total_observed(), 1);
        assert_eq!(scene.total_released(), 0);

        tracker.set_options(opts(0.5, false));
        assert_eq!(scene.total_observed(), 2);
        assert_eq!(scene.total_released(), 1);
        assert_eq!(scene.active_subscriptions(), 1);

        // Identical options do not re-subscribe.
        tracker.set_options(opts(0.5, false));
        assert_eq!(scene.total_observed(), 2);

        tracker.set_options(opts(0.9, false));
        assert_eq!(scene.total_observed(), 3);
        assert_eq!(scene.total_released(), 2);
        assert_eq!(scene.active_subscriptions(), 1);
    }

    #[test]
    fn test_option_change_delivers_once_per_transition() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let mut tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        let seen = record(&tracker);

        tracker.set_options(opts(0.2, false));
        tracker.set_options(opts(0.3, false));
        scene.scroll_to(0.0, 1800.0);

        assert_eq!(*seen.borrow(), vec![true]);
        assert_eq!(scene.total_deliveries(), 4);
    }

    #[test]
    fn test_target_change_resubscribes_and_unset_hides() {
        let (scene, backend) = scene_with_node(NodeId(1), 0.0);
        scene.place_node(NodeId(2), Rect::new(0.0, 3000.0, 100.0, 100.0));
        let mut tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        assert!(tracker.is_visible());

        tracker.set_target(Some(NodeId(2)));
        assert!(!tracker.is_visible());
        assert_eq!(scene.subscriptions_for(NodeId(1)).len(), 0);
        assert_eq!(scene.subscriptions_for(NodeId(2)).len(), 1);

        scene.scroll_to(0.0, 2900.0);
        assert!(tracker.is_visible());

        tracker.set_target(None);
        assert!(!tracker.is_visible());
        assert_eq!(scene.active_subscriptions(), 0);
    }

    #[test]
    fn test_latched_tracker_ignores_later_changes() {
        let (scene, backend) = scene_with_node(NodeId(1), 0.0);
        let mut tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, true));
        assert!(tracker.is_latched());

        tracker.set_options(opts(0.9, true));
        tracker.set_target(None);
        tracker.set_target(Some(NodeId(1)));

        assert!(tracker.is_visible());
        assert_eq!(scene.total_observed(), 1);
        assert_eq!(scene.active_subscriptions(), 0);
    }

    #[test]
    fn test_unmount_releases_subscription() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        assert_eq!(scene.active_subscriptions(), 1);
        tracker.unmount();
        assert_eq!(scene.active_subscriptions(), 0);
        assert_eq!(scene.total_released(), 1);

        // Nothing left to receive the event.
        scene.scroll_to(0.0, 1800.0);
        assert_eq!(scene.total_deliveries(), 1);
    }

    #[test]
    fn test_two_trackers_on_one_node_are_independent() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let a = VisibilityTracker::new(backend.clone(), Some(NodeId(1)), opts(0.1, true));
        let b = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        assert_eq!(scene.subscriptions_for(NodeId(1)).len(), 2);

        scene.scroll_to(0.0, 1800.0);
        scene.scroll_to(0.0, 0.0);

        assert!(a.is_visible());
        assert!(!b.is_visible());
        assert_eq!(scene.subscriptions_for(NodeId(1)).len(), 1);
        drop(b);
        assert_eq!(scene.active_subscriptions(), 0);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.1, false));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = tracker.on_change(move |_| counter.set(counter.get() + 1));
        assert!(tracker.remove_listener(id));
        assert!(!tracker.remove_listener(id));

        scene.scroll_to(0.0, 1800.0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_end_to_end_forty_percent_coverage_latches() {
        let (scene, backend) = scene_with_node(NodeId(1), 2000.0);
        let tracker = VisibilityTracker::new(backend, Some(NodeId(1)), opts(0.3, true));

        // Viewport bottom at 2040: 40 of the node's 100px visible.
        scene.scroll_to(0.0, 2040.0 - VIEWPORT_H);
        assert!(tracker.is_visible());

        scene.scroll_to(0.0, 0.0);
        assert!(tracker.is_visible());
    }
}
