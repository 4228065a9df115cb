//! Observer configuration: threshold, root, root margin and the freeze latch.
//!
//! Options are validated once, when built. Trackers and backends consume the
//! validated form and never re-check it on callback.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::visibility::backend::RootId;

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ROOT_MARGIN: &str = "0%";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("threshold must be a finite value in [0, 1], got {0}")]
    Threshold(f64),

    #[error("invalid root margin '{0}': expected 1 to 4 values of the form <n>px or <n>%")]
    RootMargin(String),
}

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f64),
    Percent(f64),
}

impl MarginLength {
    /// Resolves against the root's extent along the same axis.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl FromStr for MarginLength {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let parse = |n: &str| n.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or(());

        if let Some(n) = token.strip_suffix("px") {
            parse(n).map(MarginLength::Px)
        } else if let Some(n) = token.strip_suffix('%') {
            parse(n).map(MarginLength::Percent)
        } else if parse(token)? == 0.0 {
            // Unitless lengths are only valid for zero, as in CSS.
            Ok(MarginLength::Px(0.0))
        } else {
            Err(())
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(v) => write!(f, "{v}px"),
            MarginLength::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// CSS-style margin applied to the root's bounds before intersecting.
/// Positive values grow the root, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        let zero = MarginLength::Percent(0.0);
        RootMargin {
            top: zero,
            right: zero,
            bottom: zero,
            left: zero,
        }
    }
}

impl FromStr for RootMargin {
    type Err = OptionsError;

    /// Parses CSS shorthand: `a`, `a b`, `a b c` or `a b c d`
    /// (top, right, bottom, left).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OptionsError::RootMargin(s.to_string());

        let values = s
            .split_whitespace()
            .map(|t| t.parse::<MarginLength>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(invalid()),
        };

        Ok(RootMargin {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Validated observer configuration for one Observation Record.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    threshold: f64,
    root: Option<RootId>,
    root_margin: RootMargin,
    freeze_once_visible: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        ObserverOptions {
            threshold: DEFAULT_THRESHOLD,
            root: None,
            root_margin: RootMargin::default(),
            freeze_once_visible: false,
        }
    }
}

impl ObserverOptions {
    pub fn builder() -> ObserverOptionsBuilder {
        ObserverOptionsBuilder::default()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `None` means the top-level viewport.
    pub fn root(&self) -> Option<RootId> {
        self.root
    }

    pub fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    pub fn freeze_once_visible(&self) -> bool {
        self.freeze_once_visible
    }
}

#[derive(Debug, Clone)]
pub struct ObserverOptionsBuilder {
    threshold: f64,
    root: Option<RootId>,
    root_margin: String,
    freeze_once_visible: bool,
}

impl Default for ObserverOptionsBuilder {
    fn default() -> Self {
        ObserverOptionsBuilder {
            threshold: DEFAULT_THRESHOLD,
            root: None,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            freeze_once_visible: false,
        }
    }
}

impl ObserverOptionsBuilder {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn root(mut self, root: RootId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = margin.into();
        self
    }

    pub fn freeze_once_visible(mut self, freeze: bool) -> Self {
        self.freeze_once_visible = freeze;
        self
    }

    pub fn build(self) -> Result<ObserverOptions, OptionsError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(OptionsError::Threshold(self.threshold));
        }

        Ok(ObserverOptions {
            threshold: self.threshold,
            root: self.root,
            root_margin: self.root_margin.parse()?,
            freeze_once_visible: self.freeze_once_visible,
        })
    }
}
