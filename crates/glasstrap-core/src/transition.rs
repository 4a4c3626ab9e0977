#![forbid(unsafe_code)]

//! Transition descriptors attached to fragment transform updates.
//!
//! The core never animates anything itself. Each transform update carries a
//! [`Transition`] telling the presentation layer how to get there:
//!
//! | Transition | Duration | Easing |
//! |---|---|---|
//! | `None` | 0 | n/a (drag tracking, zero lag) |
//! | `Settle` | 250ms | CSS `ease` |
//! | `Scatter` | 450ms | overshoot `cubic-bezier(0.34, 1.56, 0.64, 1)` |
//!
//! [`Easing::sample`] evaluates the curve for hosts that tween on their own.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which motion a transform update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Transition {
    /// Follow the pointer exactly.
    None,
    /// Short settle after a release (snap or drop).
    Settle,
    /// Fragments flying outward at shatter time.
    Scatter,
}

/// Timing curve, expressed as CSS cubic-bezier control points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    /// CSS `ease`.
    Ease,
    /// Back-out style curve that overshoots the target before settling.
    Overshoot,
}

impl Easing {
    /// Control points `(x1, y1, x2, y2)`.
    #[must_use]
    pub const fn control_points(self) -> (f32, f32, f32, f32) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::Overshoot => (0.34, 1.56, 0.64, 1.0),
        }
    }

    /// CSS timing-function value.
    #[must_use]
    pub fn css_value(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::Overshoot => {
                let (x1, y1, x2, y2) = self.control_points();
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }

    /// Progress value at normalized time `t` (clamped to [0, 1]).
    ///
    /// May exceed 1.0 for [`Easing::Overshoot`].
    #[must_use]
    pub fn sample(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if matches!(self, Self::Linear) || t == 0.0 || t == 1.0 {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        let u = solve_curve_x(t, x1, x2);
        bezier(u, y1, y2)
    }
}

/// Duration plus curve for one transition kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    /// CSS `transition` shorthand for the `transform` property.
    #[must_use]
    pub fn css_value(&self) -> String {
        if self.duration.is_zero() {
            return "none".to_string();
        }
        format!(
            "transform {}s {}",
            self.duration.as_secs_f32(),
            self.easing.css_value()
        )
    }
}

impl Transition {
    /// Timing for this transition, given the configured durations.
    #[must_use]
    pub const fn spec(self, settle: Duration, scatter: Duration) -> TransitionSpec {
        match self {
            Self::None => TransitionSpec {
                duration: Duration::ZERO,
                easing: Easing::Linear,
            },
            Self::Settle => TransitionSpec {
                duration: settle,
                easing: Easing::Ease,
            },
            Self::Scatter => TransitionSpec {
                duration: scatter,
                easing: Easing::Overshoot,
            },
        }
    }
}

/// One coordinate of a cubic bezier with endpoints 0 and 1.
fn bezier(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

fn bezier_slope(u: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

/// Curve parameter whose x coordinate equals `x`.
///
/// Newton first; bisection when the slope flattens out.
fn solve_curve_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut u = x;
    for _ in 0..8 {
        let err = bezier(u, x1, x2) - x;
        if err.abs() < 1e-6 {
            return u;
        }
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    u = x;
    for _ in 0..32 {
        let value = bezier(u, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) * 0.5;
    }
    u
}
