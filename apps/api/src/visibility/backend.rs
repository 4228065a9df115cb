//! The seam between trackers and the host platform's intersection primitive.

use std::fmt;

use crate::visibility::options::{ObserverOptions, RootMargin};

/// Opaque handle to a renderable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Opaque handle to a scroll container used as an observation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// What the platform reports for one observed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

/// The subset of options the platform primitive needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverInit {
    pub threshold: f64,
    pub root: Option<RootId>,
    pub root_margin: RootMargin,
}

impl From<&ObserverOptions> for ObserverInit {
    fn from(options: &ObserverOptions) -> Self {
        ObserverInit {
            threshold: options.threshold(),
            root: options.root(),
            root_margin: options.root_margin(),
        }
    }
}

pub type IntersectionCallback = Box<dyn FnMut(IntersectionEntry)>;

/// A live platform-level observation.
///
/// `unsubscribe` releases it explicitly; dropping it releases it too.
/// Releasing twice is a no-op.
pub struct Subscription {
    id: SubscriptionId,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, release: impl FnOnce() + 'static) -> Self {
        Subscription {
            id,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// The host's event-driven intersection primitive.
///
/// Implementations deliver entries from their own event dispatch (scroll,
/// layout) and must tolerate a subscription being released from inside its
/// own callback.
pub trait IntersectionBackend {
    /// `false` when the environment has no viewport concept (e.g. SSR).
    fn is_supported(&self) -> bool {
        true
    }

    fn observe(
        &self,
        target: NodeId,
        init: &ObserverInit,
        callback: IntersectionCallback,
    ) -> Subscription;
}

/// Server-side rendering: there is no viewport and nothing to observe.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedBackend;

impl IntersectionBackend for UnsupportedBackend {
    fn is_supported(&self) -> bool {
        false
    }

    fn observe(
        &self,
        _target: NodeId,
        _init: &ObserverInit,
        _callback: IntersectionCallback,
    ) -> Subscription {
        tracing::warn!("observe() called on a backend without intersection support");
        Subscription::new(SubscriptionId(0), || {})
    }
}
