//! Scroll-triggered visibility tracking for entrance animations.
//!
//! `VisibilityTracker` adapts a host intersection primitive
//! (`IntersectionBackend`) into a boolean signal. `SceneBackend` is an
//! event-driven software host; `UnsupportedBackend` models server-side
//! rendering, where every tracker reports `false`.

pub mod backend;
pub mod geometry;
pub mod options;
pub mod scene;
pub mod section;
pub mod tracker;

pub use backend::{
    IntersectionBackend, IntersectionEntry, NodeId, ObserverInit, RootId, Subscription,
    SubscriptionId, UnsupportedBackend,
};
pub use geometry::Rect;
pub use options::{ObserverOptions, OptionsError, RootMargin};
pub use scene::SceneBackend;
pub use section::{AnimatedSection, Animation};
pub use tracker::{ListenerId, VisibilityTracker};
