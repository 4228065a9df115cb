//! An event-driven, non-browser intersection backend.
//!
//! `SceneBackend` owns a small software layout (viewport, scroll containers,
//! node rectangles) and dispatches entries only when that layout changes or a
//! target is first observed. It never polls. Cloning shares the same scene,
//! so a test or a host can keep a handle while trackers hold another.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::visibility::backend::{
    IntersectionBackend, IntersectionCallback, IntersectionEntry, NodeId, ObserverInit, RootId,
    Subscription, SubscriptionId,
};
use crate::visibility::geometry::{intersection_ratio, Rect};

#[derive(Debug, Clone, Copy)]
struct Container {
    bounds: Rect,
    scroll_x: f64,
    scroll_y: f64,
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    rect: Rect,
    container: Option<RootId>,
}

#[derive(Debug, Clone)]
struct Layout {
    viewport: Rect,
    containers: HashMap<RootId, Container>,
    nodes: HashMap<NodeId, Placement>,
}

impl Layout {
    /// Document-space rectangle of a node plus the clip imposed by its
    /// scroll container, if any.
    fn resolve(&self, node: NodeId) -> Option<(Rect, Option<(RootId, Rect)>)> {
        let placement = self.nodes.get(&node)?;
        match placement.container {
            None => Some((placement.rect, None)),
            Some(root) => {
                let c = self.containers.get(&root)?;
                let rect = placement
                    .rect
                    .translate(c.bounds.x - c.scroll_x, c.bounds.y - c.scroll_y);
                Some((rect, Some((root, c.bounds))))
            }
        }
    }

    fn entry_for(&self, target: NodeId, init: &ObserverInit) -> IntersectionEntry {
        let miss = IntersectionEntry {
            target,
            intersection_ratio: 0.0,
            is_intersecting: false,
        };

        let Some((rect, clip)) = self.resolve(target) else {
            return miss;
        };

        let (root_rect, visible) = match init.root {
            None => {
                // Implicit root: the node is first clipped by its container.
                let visible = match clip {
                    Some((_, bounds)) => rect.intersect(&bounds),
                    None => Some(rect),
                };
                (self.viewport, visible)
            }
            Some(root) => match (clip, self.containers.get(&root)) {
                (Some((owner, _)), Some(container)) if owner == root => {
                    (container.bounds, Some(rect))
                }
                // Targets outside the explicit root never intersect it.
                _ => return miss,
            },
        };

        let root_rect = root_rect.expand(&init.root_margin);
        let hit = visible.and_then(|v| v.intersect(&root_rect));
        let ratio = intersection_ratio(&rect, hit.as_ref());

        IntersectionEntry {
            target,
            intersection_ratio: ratio,
            is_intersecting: hit.is_some() && ratio >= init.threshold,
        }
    }
}

struct Registration {
    id: SubscriptionId,
    target: NodeId,
    init: ObserverInit,
    /// Empty while the callback is running.
    callback: RefCell<Option<IntersectionCallback>>,
    active: Cell<bool>,
    last_delivered: Cell<Option<bool>>,
    /// Set when the layout changed under a running callback.
    stale: Cell<bool>,
    deliveries: Cell<usize>,
}

struct SceneInner {
    layout: RefCell<Layout>,
    registrations: RefCell<Vec<Rc<Registration>>>,
    next_id: Cell<u64>,
    total_observed: Cell<usize>,
    total_released: Cell<usize>,
    total_deliveries: Cell<usize>,
}

impl SceneInner {
    fn release(&self, id: SubscriptionId) {
        let removed = {
            let mut regs = self.registrations.borrow_mut();
            let before = regs.len();
            regs.retain(|r| {
                if r.id == id {
                    r.active.set(false);
                    false
                } else {
                    true
                }
            });
            before != regs.len()
        };
        if removed {
            self.total_released.set(self.total_released.get() + 1);
            trace!(subscription = %id, "intersection subscription released");
        }
    }

    fn deliver(&self, reg: &Registration) {
        loop {
            if !reg.active.get() {
                return;
            }
            let entry = self.layout.borrow().entry_for(reg.target, &reg.init);
            if reg.last_delivered.get() == Some(entry.is_intersecting) {
                return;
            }
            // A callback that changes the layout re-enters here; the outer
            // call delivers the latest state once the callback returns.
            let Some(mut callback) = reg.callback.borrow_mut().take() else {
                reg.stale.set(true);
                return;
            };
            reg.last_delivered.set(Some(entry.is_intersecting));
            reg.deliveries.set(reg.deliveries.get() + 1);
            self.total_deliveries.set(self.total_deliveries.get() + 1);

            // No scene borrows are held here: the callback may release its
            // own subscription or move things around.
            callback(entry);
            *reg.callback.borrow_mut() = Some(callback);

            if !reg.stale.replace(false) {
                return;
            }
        }
    }

    fn dispatch(&self) {
        let snapshot: Vec<Rc<Registration>> = self.registrations.borrow().clone();
        for reg in snapshot {
            self.deliver(&reg);
        }
    }
}

#[derive(Clone)]
pub struct SceneBackend {
    inner: Rc<SceneInner>,
}

impl SceneBackend {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        SceneBackend {
            inner: Rc::new(SceneInner {
                layout: RefCell::new(Layout {
                    viewport: Rect::new(0.0, 0.0, viewport_width, viewport_height),
                    containers: HashMap::new(),
                    nodes: HashMap::new(),
                }),
                registrations: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
                total_observed: Cell::new(0),
                total_released: Cell::new(0),
                total_deliveries: Cell::new(0),
            }),
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut Layout)) {
        f(&mut self.inner.layout.borrow_mut());
        self.inner.dispatch();
    }

    /// Places (or moves) a node in document coordinates.
    pub fn place_node(&self, node: NodeId, rect: Rect) {
        self.mutate(|l| {
            l.nodes.insert(
                node,
                Placement {
                    rect,
                    container: None,
                },
            );
        });
    }

    /// Places a node inside a scroll container, in the container's content
    /// coordinates.
    pub fn place_node_in(&self, node: NodeId, root: RootId, rect: Rect) {
        self.mutate(|l| {
            l.nodes.insert(
                node,
                Placement {
                    rect,
                    container: Some(root),
                },
            );
        });
    }

    pub fn remove_node(&self, node: NodeId) {
        self.mutate(|l| {
            l.nodes.remove(&node);
        });
    }

    pub fn add_root(&self, root: RootId, bounds: Rect) {
        self.mutate(|l| {
            l.containers.insert(
                root,
                Container {
                    bounds,
                    scroll_x: 0.0,
                    scroll_y: 0.0,
                },
            );
        });
    }

    /// Scrolls the top-level viewport.
    pub fn scroll_to(&self, x: f64, y: f64) {
        self.mutate(|l| {
            l.viewport.x = x;
            l.viewport.y = y;
        });
    }

    pub fn scroll_root_to(&self, root: RootId, x: f64, y: f64) {
        self.mutate(|l| {
            if let Some(c) = l.containers.get_mut(&root) {
                c.scroll_x = x;
                c.scroll_y = y;
            }
        });
    }

    pub fn resize_viewport(&self, width: f64, height: f64) {
        self.mutate(|l| {
            l.viewport.width = width;
            l.viewport.height = height;
        });
    }

    pub fn active_subscriptions(&self) -> usize {
        self.inner.registrations.borrow().len()
    }

    pub fn total_observed(&self) -> usize {
        self.inner.total_observed.get()
    }

    pub fn total_released(&self) -> usize {
        self.inner.total_released.get()
    }

    /// Entries delivered to an active subscription; released ones report 0.
    pub fn deliveries(&self, id: SubscriptionId) -> usize {
        self.inner
            .registrations
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .map_or(0, |r| r.deliveries.get())
    }

    /// Total entries delivered across every subscription ever created.
    pub fn total_deliveries(&self) -> usize {
        self.inner.total_deliveries.get()
    }

    /// Ids of the currently active subscriptions observing `node`.
    pub fn subscriptions_for(&self, node: NodeId) -> Vec<SubscriptionId> {
        self.inner
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.target == node)
            .map(|r| r.id)
            .collect()
    }
}

impl IntersectionBackend for SceneBackend {
    fn observe(
        &self,
        target: NodeId,
        init: &ObserverInit,
        callback: IntersectionCallback,
    ) -> Subscription {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let reg = Rc::new(Registration {
            id,
            target,
            init: *init,
            callback: RefCell::new(Some(callback)),
            active: Cell::new(true),
            last_delivered: Cell::new(None),
            stale: Cell::new(false),
            deliveries: Cell::new(0),
        });
        self.inner.registrations.borrow_mut().push(reg.clone());
        self.inner
            .total_observed
            .set(self.inner.total_observed.get() + 1);
        trace!(subscription = %id, target = target.0, "intersection subscription created");

        let weak: Weak<SceneInner> = Rc::downgrade(&self.inner);
        let subscription = Subscription::new(id, move || {
            if let Some(inner) = weak.upgrade() {
                inner.release(id);
            }
        });

        // The platform primitive reports the initial state right away.
        self.inner.deliver(&reg);

        subscription
    }
}
