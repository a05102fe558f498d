use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WheelError;
use crate::spin::Easing;

pub const SPIN_DURATION_MS: u64 = 14_000;
pub const REMOVAL_DELAY_MS: u64 = 1_000;
pub const INTER_SPIN_DELAY_MS: u64 = 3_000;
pub const MIN_ROTATIONS: u32 = 5;
pub const MAX_ROTATIONS: u32 = 10;
/// Landing jitter as a fraction of one segment's width, either side of the bisector.
pub const JITTER_FRACTION: f64 = 0.025;

/// Timing and motion settings for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawPolicy {
    pub spin_duration_ms: u64,
    /// Time a winner stays on the wheel after being announced.
    pub removal_delay_ms: u64,
    /// Time from a spin settling to the next spin starting.
    pub inter_spin_delay_ms: u64,
    pub min_rotations: u32,
    pub max_rotations: u32,
    pub jitter_fraction: f64,
    pub easing: Easing,
}

impl Default for DrawPolicy {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            removal_delay_ms: REMOVAL_DELAY_MS,
            inter_spin_delay_ms: INTER_SPIN_DELAY_MS,
            min_rotations: MIN_ROTATIONS,
            max_rotations: MAX_ROTATIONS,
            jitter_fraction: JITTER_FRACTION,
            easing: Easing::default(),
        }
    }
}

impl DrawPolicy {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }

    /// Wait between a winner's removal and the next spin.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.inter_spin_delay_ms.saturating_sub(self.removal_delay_ms))
    }

    pub fn validate(&self) -> Result<(), WheelError> {
        let invalid = |reason: &str| {
            Err(WheelError::InvalidPolicy {
                reason: reason.to_string(),
            })
        };

        if self.spin_duration_ms == 0 {
            return invalid("spin duration must be positive");
        }
        if self.min_rotations > self.max_rotations {
            return invalid("min_rotations exceeds max_rotations");
        }
        if !(0.0..0.5).contains(&self.jitter_fraction) {
            return invalid("jitter_fraction must be in [0, 0.5)");
        }
        if self.removal_delay_ms > self.inter_spin_delay_ms {
            return invalid("removal delay must not exceed the inter-spin delay");
        }
        if let Easing::CubicBezier { x1, x2, .. } = self.easing {
            // Outside [0, 1] the curve is no longer a function of time
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return invalid("cubic-bezier x1 and x2 must be in [0, 1]");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = DrawPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.spin_duration(), Duration::from_secs(14));
        assert_eq!(policy.settle_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_inconsistent_policies() {
        let cases = [
            DrawPolicy { spin_duration_ms: 0, ..Default::default() },
            DrawPolicy { min_rotations: 11, ..Default::default() },
            DrawPolicy { jitter_fraction: 0.5, ..Default::default() },
            DrawPolicy { jitter_fraction: -0.1, ..Default::default() },
            DrawPolicy { removal_delay_ms: 5_000, ..Default::default() },
            DrawPolicy {
                easing: Easing::CubicBezier { x1: -0.2, y1: 0.1, x2: 0.25, y2: 1.0 },
                ..Default::default()
            },
            DrawPolicy {
                easing: Easing::CubicBezier { x1: 0.25, y1: 0.1, x2: 1.5, y2: 1.0 },
                ..Default::default()
            },
            DrawPolicy {
                easing: Easing::CubicBezier { x1: f64::NAN, y1: 0.1, x2: 0.25, y2: 1.0 },
                ..Default::default()
            },
        ];
        for policy in cases {
            assert!(
                matches!(policy.validate(), Err(WheelError::InvalidPolicy { .. })),
                "{policy:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overshooting_bezier_is_allowed() {
        // y may leave [0, 1]; only the time axis is constrained
        let policy = DrawPolicy {
            easing: Easing::CubicBezier { x1: 0.3, y1: -0.5, x2: 0.7, y2: 1.4 },
            ..Default::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let raw = r#"{"spin_duration_ms": 5000, "inter_spin_delay_ms": 1000}"#;
        let policy: DrawPolicy = serde_json::from_str(raw).unwrap();
        assert_eq!(policy.spin_duration_ms, 5_000);
        assert_eq!(policy.inter_spin_delay_ms, 1_000);
        assert_eq!(policy.min_rotations, MIN_ROTATIONS);
        assert_eq!(policy.easing, Easing::default());
        assert!(policy.validate().is_ok());
    }
}
