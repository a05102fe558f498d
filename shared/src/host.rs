use std::time::Duration;

use crate::draw::SpinOutcome;
use crate::spin::Easing;
use crate::wheel::Segment;

/// The drawing surface the wheel lives on.
pub trait WheelSurface {
    /// Redraws every segment. Called whenever the entry list changes.
    fn render(&mut self, segments: &[Segment]);

    /// Jumps back to the zero-rotation baseline with no transition.
    fn reset_rotation(&mut self);

    /// Starts a timed rotation from the baseline to `target_angle` radians.
    fn animate_rotation(&mut self, target_angle: f64, duration: Duration, easing: Easing);
}

pub trait SoundCue {
    fn start_sound(&mut self);
    fn stop_sound(&mut self);
}

/// Ordered, append-only list of winners.
pub trait WinnersDisplay {
    fn clear_winners(&mut self);
    fn show_winner(&mut self, outcome: &SpinOutcome);
}

/// Everything a draw needs from its environment.
pub trait DrawHost: WheelSurface + SoundCue + WinnersDisplay {}

impl<T: WheelSurface + SoundCue + WinnersDisplay + ?Sized> DrawHost for T {}
