use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{FULL_TURN, POINTER_ANGLE};
use crate::policy::DrawPolicy;
use crate::wheel::{normalize_angle, segment_width};

/// Interpolation curve for the spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// 1 - (1 - t)^4
    EaseOutQuart,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// CSS `ease`.
pub const CSS_EASE: Easing = Easing::CubicBezier {
    x1: 0.25,
    y1: 0.1,
    x2: 0.25,
    y2: 1.0,
};

impl Default for Easing {
    fn default() -> Self {
        CSS_EASE
    }
}

impl Easing {
    /// Eased progress for linear progress `t`; `t` is clamped to [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection if the slope flattens out
    let mut s = x;
    for _ in 0..8 {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < EPSILON {
            return bezier(s, y1, y2);
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(s, y1, y2)
}

/// Everything needed to animate one spin and know where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub target_index: usize,
    pub segment_count: usize,
    pub rotations: u32,
    /// Offset from the bisector, in segment widths.
    pub jitter: f64,
    /// Total clockwise rotation from the zero baseline, in radians.
    pub target_angle: f64,
}

impl SpinPlan {
    pub fn new(target_index: usize, segment_count: usize, rotations: u32, jitter: f64) -> Self {
        let landing = (target_index as f64 + 0.5 + jitter) * segment_width(segment_count);
        let fraction = normalize_angle(POINTER_ANGLE - landing);
        Self {
            target_index,
            segment_count,
            rotations,
            jitter,
            target_angle: rotations as f64 * FULL_TURN + fraction,
        }
    }
}

/// Picks a uniformly random target among `segment_count` segments and the
/// rotation that brings it under the pointer. `None` for an empty wheel.
pub fn plan_spin<R: Rng + ?Sized>(
    segment_count: usize,
    policy: &DrawPolicy,
    rng: &mut R,
) -> Option<SpinPlan> {
    if segment_count == 0 {
        return None;
    }
    let target_index = rng.gen_range(0..segment_count);
    let rotations = rng.gen_range(policy.min_rotations..=policy.max_rotations);
    let jitter = if policy.jitter_fraction > 0.0 {
        rng.gen_range(-policy.jitter_fraction..policy.jitter_fraction)
    } else {
        0.0
    };
    Some(SpinPlan::new(target_index, segment_count, rotations, jitter))
}
