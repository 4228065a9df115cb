//! Animated sections: the consumer side of a visibility tracker.
//!
//! A section starts at `opacity-0` and gains its entrance animation class
//! once its tracker reports visible.

use std::cell::Cell;
use std::rc::Rc;

use crate::visibility::backend::{IntersectionBackend, NodeId};
use crate::visibility::options::ObserverOptions;
use crate::visibility::tracker::VisibilityTracker;

const HIDDEN_CLASS: &str = "opacity-0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    FadeInUp,
    FadeInLeft,
    FadeInRight,
}

impl Animation {
    pub fn class(self) -> &'static str {
        match self {
            Animation::FadeInUp => "animate-fadeInUp",
            Animation::FadeInLeft => "animate-fadeInLeft",
            Animation::FadeInRight => "animate-fadeInRight",
        }
    }
}

#[derive(Debug)]
pub struct AnimatedSection {
    base_class: String,
    animation: Animation,
    delay_ms: Option<u32>,
    animating: Rc<Cell<bool>>,
    tracker: VisibilityTracker,
}

impl AnimatedSection {
    pub fn new(
        backend: Rc<dyn IntersectionBackend>,
        node: Option<NodeId>,
        options: ObserverOptions,
        base_class: impl Into<String>,
        animation: Animation,
    ) -> Self {
        let tracker = VisibilityTracker::new(backend, node, options);
        let animating = Rc::new(Cell::new(tracker.is_visible()));
        let flag = animating.clone();
        tracker.on_change(move |visible| flag.set(visible));

        AnimatedSection {
            base_class: base_class.into(),
            animation,
            delay_ms: None,
            animating,
            tracker,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn is_animating(&self) -> bool {
        self.animating.get()
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut VisibilityTracker {
        &mut self.tracker
    }

    pub fn class_name(&self) -> String {
        let mut classes: Vec<&str> = self.base_class.split_whitespace().collect();
        classes.push(HIDDEN_CLASS);
        if self.is_animating() {
            classes.push(self.animation.class());
        }
        classes.join(" ")
    }

    pub fn style(&self) -> Option<String> {
        self.delay_ms
            .map(|ms| format!("animation-delay: {}s", f64::from(ms) / 1000.0))
    }

    /// Wraps pre-rendered HTML in a `<section>` carrying the current classes.
    pub fn render(&self, inner_html: &str) -> String {
        let mut attrs = format!("class=\"{}\"", self.class_name());
        if let Some(style) = self.style() {
            attrs.push_str(&format!(" style=\"{style}\""));
        }
        if let Some(node) = self.tracker.target() {
            attrs.push_str(&format!(" data-node=\"{}\"", node.0));
        }
        format!("<section {attrs}>\n{inner_html}</section>\n")
    }
}
