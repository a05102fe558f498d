use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::entries::{Entry, EntryList};
use crate::error::WheelError;
use crate::host::{DrawHost, SoundCue, WheelSurface, WinnersDisplay};
use crate::policy::DrawPolicy;
use crate::spin::{plan_spin, SpinPlan};
use crate::wheel::WheelState;

/// The result of one spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// 1-based position in the winners list.
    pub rank: usize,
    pub entry: Entry,
    /// Index of the winning segment in the wheel the spin ran against.
    pub index: usize,
    pub plan: SpinPlan,
}

impl SpinOutcome {
    pub fn display_line(&self) -> String {
        format!("{}. {}", self.rank, self.entry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Spinning { rank: usize },
    Settled { rank: usize },
    RemovalPending { rank: usize },
    InterSpinDelay { rank: usize },
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawTermination {
    Completed,
    /// The wheel ran out of entries before `requested` winners were drawn.
    Exhausted { requested: usize, drawn: usize },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawReport {
    pub winners: Vec<SpinOutcome>,
    pub termination: DrawTermination,
    /// The wheel after every winner has been removed; the baseline for the next draw.
    pub remaining: WheelState,
}

/// Stop request for a running draw, honoured at the next phase boundary.
/// A spin that is already animating always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Allows at most one draw at a time on a wheel.
#[derive(Debug, Clone, Default)]
pub struct DrawLock {
    busy: Rc<Cell<bool>>,
}

impl DrawLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Result<DrawGuard, WheelError> {
        if self.busy.replace(true) {
            return Err(WheelError::DrawInProgress);
        }
        Ok(DrawGuard {
            busy: self.busy.clone(),
        })
    }

    pub fn is_held(&self) -> bool {
        self.busy.get()
    }
}

/// Held for the lifetime of a draw; releases the lock on drop.
#[derive(Debug)]
pub struct DrawGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for DrawGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

/// Runs spins and multi-winner draws, one at a time.
pub struct DrawController<C, R> {
    clock: C,
    rng: R,
    policy: DrawPolicy,
    phase: DrawPhase,
    cancel: CancelToken,
}

impl<C: Clock, R: Rng> DrawController<C, R> {
    pub fn new(clock: C, rng: R, policy: DrawPolicy) -> Result<Self, WheelError> {
        policy.validate()?;
        Ok(Self {
            clock,
            rng,
            policy,
            phase: DrawPhase::Idle,
            cancel: CancelToken::new(),
        })
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    /// Token that stops the current or next draw. Each draw consumes its
    /// token, so fetch a fresh one per draw.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn enter(&mut self, phase: DrawPhase) {
        debug!("draw phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Spins the wheel once over `active` and resolves with the entry under
    /// the pointer once the spin duration has elapsed.
    pub async fn spin_once<H>(
        &mut self,
        active: &[Entry],
        rank: usize,
        host: &mut H,
    ) -> Result<SpinOutcome, WheelError>
    where
        H: WheelSurface + SoundCue + ?Sized,
    {
        let snapshot: EntryList = active.to_vec();
        let plan = plan_spin(snapshot.len(), &self.policy, &mut self.rng)
            .ok_or(WheelError::EmptyEntries)?;

        // Reset must reach the surface before the animation does, or the
        // next spin would unwind through all the previous turns.
        host.reset_rotation();
        self.enter(DrawPhase::Spinning { rank });
        host.start_sound();
        host.animate_rotation(plan.target_angle, self.policy.spin_duration(), self.policy.easing);

        self.clock.sleep(self.policy.spin_duration()).await;

        host.stop_sound();
        self.enter(DrawPhase::Settled { rank });

        Ok(SpinOutcome {
            rank,
            entry: snapshot[plan.target_index].clone(),
            index: plan.target_index,
            plan,
        })
    }

    /// Draws up to `requested` winners without replacement from `state`.
    ///
    /// Each winner is announced as soon as its spin settles, stays on the
    /// wheel for the removal delay, and is then removed and the wheel
    /// re-rendered. The next spin starts once the inter-spin delay (measured
    /// from the settle) has passed. Stops early, without error, when the
    /// wheel runs out of entries.
    pub async fn run_draw<H>(
        &mut self,
        mut state: WheelState,
        requested: usize,
        host: &mut H,
    ) -> Result<DrawReport, WheelError>
    where
        H: DrawHost + ?Sized,
    {
        if requested == 0 {
            return Err(WheelError::InvalidWinnerCount {
                raw: requested.to_string(),
            });
        }
        if state.is_empty() {
            return Err(WheelError::EmptyEntries);
        }

        self.enter(DrawPhase::Idle);
        info!("starting draw of {} winner(s) from {} entries", requested, state.len());
        host.clear_winners();
        host.render(&state.segments());

        let mut winners: Vec<SpinOutcome> = Vec::with_capacity(requested.min(state.len()));
        let termination = loop {
            if winners.len() == requested {
                break DrawTermination::Completed;
            }
            if self.cancel.is_cancelled() {
                break DrawTermination::Cancelled;
            }
            if state.is_empty() {
                warn!(
                    "wheel exhausted after {} of {} requested winner(s)",
                    winners.len(),
                    requested
                );
                break DrawTermination::Exhausted {
                    requested,
                    drawn: winners.len(),
                };
            }

            let rank = winners.len() + 1;
            let outcome = self.spin_once(state.entries(), rank, host).await?;
            info!("winner {}", outcome.display_line());
            host.show_winner(&outcome);
            let index = outcome.index;
            winners.push(outcome);

            self.enter(DrawPhase::RemovalPending { rank });
            if !self.cancel.is_cancelled() {
                self.clock.sleep(self.policy.removal_delay()).await;
            }
            state.remove_at(index);
            host.render(&state.segments());

            if self.cancel.is_cancelled() {
                break DrawTermination::Cancelled;
            }
            if winners.len() < requested && !state.is_empty() {
                self.enter(DrawPhase::InterSpinDelay { rank });
                self.clock.sleep(self.policy.settle_delay()).await;
            }
        };

        if termination == DrawTermination::Cancelled {
            warn!("draw cancelled after {} winner(s)", winners.len());
        }
        self.enter(DrawPhase::Finished);
        self.cancel = CancelToken::new();

        Ok(DrawReport {
            winners,
            termination,
            remaining: state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::entries::regenerate;
    use crate::spin::Easing;
    use crate::wheel::{segment_under_pointer, Segment};
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum HostCall {
        Render(Vec<String>),
        Reset,
        Animate(f64),
        SoundOn,
        SoundOff,
        Clear,
        Winner(String),
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<HostCall>,
        cancel_after_winner: Option<(usize, CancelToken)>,
    }

    impl RecordingHost {
        fn animations(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, HostCall::Animate(_))).count()
        }

        fn renders(&self) -> Vec<Vec<String>> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    HostCall::Render(labels) => Some(labels.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl WheelSurface for RecordingHost {
        fn render(&mut self, segments: &[Segment]) {
            self.calls
                .push(HostCall::Render(segments.iter().map(|s| s.label.to_string()).collect()));
        }

        fn reset_rotation(&mut self) {
            self.calls.push(HostCall::Reset);
        }

        fn animate_rotation(&mut self, target_angle: f64, _duration: Duration, _easing: Easing) {
            self.calls.push(HostCall::Animate(target_angle));
        }
    }

    impl SoundCue for RecordingHost {
        fn start_sound(&mut self) {
            self.calls.push(HostCall::SoundOn);
        }

        fn stop_sound(&mut self) {
            self.calls.push(HostCall::SoundOff);
        }
    }

    impl WinnersDisplay for RecordingHost {
        fn clear_winners(&mut self) {
            self.calls.push(HostCall::Clear);
        }

        fn show_winner(&mut self, outcome: &SpinOutcome) {
            self.calls.push(HostCall::Winner(outcome.display_line()));
            if let Some((rank, token)) = &self.cancel_after_winner {
                if *rank == outcome.rank {
                    token.cancel();
                }
            }
        }
    }

    fn controller(seed: u64) -> (DrawController<ManualClock, StdRng>, ManualClock) {
        let clock = ManualClock::new();
        let rng = StdRng::seed_from_u64(seed);
        let controller = DrawController::new(clock.clone(), rng, DrawPolicy::default()).unwrap();
        (controller, clock)
    }

    fn wheel(text: &str) -> WheelState {
        WheelState::new(regenerate(text).unwrap(), &mut StdRng::seed_from_u64(99))
    }

    fn labels(outcomes: &[SpinOutcome]) -> Vec<String> {
        outcomes.iter().map(|o| o.entry.to_string()).collect()
    }

    #[test]
    fn test_three_entries_two_winners() {
        for seed in 0..20 {
            let (mut controller, _) = controller(seed);
            let mut host = RecordingHost::default();
            let report = block_on(controller.run_draw(wheel("A\nB\nC"), 2, &mut host)).unwrap();

            assert_eq!(report.termination, DrawTermination::Completed);
            let winners = labels(&report.winners);
            assert_eq!(winners.len(), 2);
            assert_ne!(winners[0], winners[1]);

            let remaining: Vec<String> =
                report.remaining.entries().iter().map(|e| e.to_string()).collect();
            assert_eq!(remaining.len(), 1);
            assert!(!winners.contains(&remaining[0]));
            let mut all: Vec<String> = winners.into_iter().chain(remaining).collect();
            all.sort();
            assert_eq!(all, vec!["A", "B", "C"]);
            assert_eq!(report.remaining.colors().len(), 1);
        }
    }

    #[test]
    fn test_single_entry_single_winner() {
        let (mut controller, _) = controller(5);
        let mut host = RecordingHost::default();
        let report = block_on(controller.run_draw(wheel("A"), 1, &mut host)).unwrap();

        assert_eq!(labels(&report.winners), vec!["A"]);
        assert_eq!(report.termination, DrawTermination::Completed);
        assert!(report.remaining.is_empty());
        assert_eq!(report.winners[0].display_line(), "1. A");
    }

    #[test]
    fn test_exhaustion_stops_before_spinning_an_empty_wheel() {
        let (mut controller, clock) = controller(5);
        let mut host = RecordingHost::default();
        let report = block_on(controller.run_draw(wheel("A"), 2, &mut host)).unwrap();

        assert_eq!(labels(&report.winners), vec!["A"]);
        assert_eq!(
            report.termination,
            DrawTermination::Exhausted { requested: 2, drawn: 1 }
        );
        assert_eq!(host.animations(), 1);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(14), Duration::from_secs(1)]);
        assert_eq!(controller.phase(), DrawPhase::Finished);
    }

    #[test]
    fn test_winners_are_distinct_and_wheel_shrinks_by_one() {
        let original: Vec<String> = (0..9).map(|i| format!("wallet-{i}")).collect();
        let text = original.join("\n");
        for seed in 0..30 {
            let requested = (seed as usize % original.len()) + 1;
            let (mut controller, _) = controller(seed);
            let mut host = RecordingHost::default();
            let report = block_on(controller.run_draw(wheel(&text), requested, &mut host)).unwrap();

            let winners = labels(&report.winners);
            assert_eq!(winners.len(), requested);
            assert_eq!(winners.iter().collect::<HashSet<_>>().len(), requested);
            assert!(winners.iter().all(|w| original.contains(w)));
            for (i, outcome) in report.winners.iter().enumerate() {
                assert_eq!(outcome.rank, i + 1);
            }

            // First render is the full wheel, then one per removal.
            let renders = host.renders();
            assert_eq!(renders.len(), requested + 1);
            assert_eq!(renders[0], original);
            for (step, pair) in renders.windows(2).enumerate() {
                assert_eq!(pair[1].len(), pair[0].len() - 1);
                let removed: Vec<&String> =
                    pair[0].iter().filter(|l| !pair[1].contains(l)).collect();
                assert_eq!(removed, vec![&winners[step]]);
                for earlier in &winners[..=step] {
                    assert!(!pair[1].contains(earlier));
                }
            }
        }
    }

    #[test]
    fn test_duplicate_entries_are_removed_one_copy_at_a_time() {
        let (mut controller, _) = controller(11);
        let mut host = RecordingHost::default();
        let report = block_on(controller.run_draw(wheel("x\nx\ny"), 2, &mut host)).unwrap();

        assert_eq!(report.winners.len(), 2);
        assert_eq!(report.remaining.len(), 1);
        let mut all = labels(&report.winners);
        all.push(report.remaining.entries()[0].to_string());
        all.sort();
        assert_eq!(all, vec!["x", "x", "y"]);
    }

    #[test]
    fn test_draw_pacing_follows_policy() {
        let (mut controller, clock) = controller(3);
        let mut host = RecordingHost::default();
        block_on(controller.run_draw(wheel("a\nb\nc\nd"), 3, &mut host)).unwrap();

        let spin = Duration::from_secs(14);
        let removal = Duration::from_secs(1);
        let settle = Duration::from_secs(2);
        assert_eq!(
            clock.sleeps(),
            vec![spin, removal, settle, spin, removal, settle, spin, removal]
        );
        assert_eq!(clock.elapsed(), Duration::from_secs(14 * 3 + 3 + 2 * 2));
    }

    #[test]
    fn test_reset_precedes_each_animation_and_sound_spans_the_spin() {
        let (mut controller, _) = controller(8);
        let mut host = RecordingHost::default();
        block_on(controller.run_draw(wheel("a\nb\nc"), 2, &mut host)).unwrap();

        assert_eq!(host.calls[0], HostCall::Clear);
        let mut spins = 0;
        for (i, call) in host.calls.iter().enumerate() {
            if let HostCall::Animate(angle) = call {
                spins += 1;
                assert!(*angle >= 5.0 * std::f64::consts::TAU);
                assert_eq!(host.calls[i - 2], HostCall::Reset);
                assert_eq!(host.calls[i - 1], HostCall::SoundOn);
                assert_eq!(host.calls[i + 1], HostCall::SoundOff);
                assert!(matches!(host.calls[i + 2], HostCall::Winner(_)));
            }
        }
        assert_eq!(spins, 2);
        let sound_on = host.calls.iter().filter(|c| **c == HostCall::SoundOn).count();
        let sound_off = host.calls.iter().filter(|c| **c == HostCall::SoundOff).count();
        assert_eq!((sound_on, sound_off), (2, 2));
    }

    #[test]
    fn test_rejects_zero_winners_and_empty_wheel() {
        let (mut controller, clock) = controller(1);
        let mut host = RecordingHost::default();

        assert!(matches!(
            block_on(controller.run_draw(wheel("a"), 0, &mut host)),
            Err(WheelError::InvalidWinnerCount { .. })
        ));
        let empty = WheelState::with_colors(Vec::new(), Vec::new()).unwrap();
        assert_eq!(
            block_on(controller.run_draw(empty, 1, &mut host)),
            Err(WheelError::EmptyEntries)
        );
        assert!(host.calls.is_empty());
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(controller.phase(), DrawPhase::Idle);
    }

    #[test]
    fn test_spin_once_on_empty_wheel() {
        let (mut controller, _) = controller(1);
        let mut host = RecordingHost::default();
        assert_eq!(
            block_on(controller.spin_once(&[], 1, &mut host)),
            Err(WheelError::EmptyEntries)
        );
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_spin_once_resolves_from_snapshot() {
        let (mut controller, clock) = controller(21);
        let mut host = RecordingHost::default();
        let entries = regenerate("p\nq\nr\ns").unwrap();
        let outcome = block_on(controller.spin_once(&entries, 1, &mut host)).unwrap();

        assert_eq!(outcome.entry, entries[outcome.index]);
        assert_eq!(outcome.plan.segment_count, 4);
        assert_eq!(clock.elapsed(), Duration::from_secs(14));
        assert_eq!(controller.phase(), DrawPhase::Settled { rank: 1 });
    }

    #[test]
    fn test_animated_angle_settles_on_winner() {
        let (mut controller, _) = controller(13);
        let mut host = RecordingHost::default();
        let entries = regenerate("p\nq\nr\ns\nt").unwrap();
        for rank in 1..=10 {
            let outcome = block_on(controller.spin_once(&entries, rank, &mut host)).unwrap();
            let Some(HostCall::Animate(angle)) =
                host.calls.iter().rev().find(|c| matches!(c, HostCall::Animate(_))).cloned()
            else {
                panic!("spin did not animate");
            };
            assert_eq!(segment_under_pointer(angle, entries.len()), Some(outcome.index));
        }
    }

    #[test]
    fn test_cancel_after_first_winner() {
        let (mut controller, clock) = controller(4);
        let mut host = RecordingHost {
            cancel_after_winner: Some((1, controller.cancel_token())),
            ..Default::default()
        };
        let report = block_on(controller.run_draw(wheel("a\nb\nc\nd"), 3, &mut host)).unwrap();

        assert_eq!(report.termination, DrawTermination::Cancelled);
        assert_eq!(report.winners.len(), 1);
        assert_eq!(report.remaining.len(), 3);
        assert_eq!(host.animations(), 1);
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(14)]);
    }

    #[test]
    fn test_cancel_before_start() {
        let (mut controller, _) = controller(4);
        controller.cancel_token().cancel();
        let mut host = RecordingHost::default();
        let report = block_on(controller.run_draw(wheel("a\nb"), 2, &mut host)).unwrap();

        assert_eq!(report.termination, DrawTermination::Cancelled);
        assert!(report.winners.is_empty());
        assert_eq!(report.remaining.len(), 2);
    }

    #[test]
    fn test_controller_reusable_after_cancel() {
        let (mut controller, _) = controller(8);
        let stale = controller.cancel_token();
        stale.cancel();
        let mut host = RecordingHost::default();
        let first = block_on(controller.run_draw(wheel("a\nb\nc"), 1, &mut host)).unwrap();
        assert_eq!(first.termination, DrawTermination::Cancelled);
        assert!(first.winners.is_empty());
        assert_eq!(controller.phase(), DrawPhase::Finished);

        let second = block_on(controller.run_draw(first.remaining, 2, &mut host)).unwrap();
        assert_eq!(second.termination, DrawTermination::Completed);
        assert_eq!(second.winners.len(), 2);
        assert_eq!(second.remaining.len(), 1);
        assert!(stale.is_cancelled());
        assert!(!controller.cancel_token().is_cancelled());
    }

    #[test]
    fn test_draw_lock_allows_one_draw_at_a_time() {
        let lock = DrawLock::new();
        let ui_side = lock.clone();

        let guard = lock.try_acquire().unwrap();
        assert!(ui_side.is_held());
        assert_eq!(ui_side.try_acquire().unwrap_err(), WheelError::DrawInProgress);

        drop(guard);
        assert!(!ui_side.is_held());
        assert!(ui_side.try_acquire().is_ok());
    }

    #[test]
    fn test_invalid_policy_rejected_up_front() {
        let policy = DrawPolicy {
            min_rotations: 9,
            max_rotations: 3,
            ..Default::default()
        };
        assert!(matches!(
            DrawController::new(ManualClock::new(), StdRng::seed_from_u64(0), policy),
            Err(WheelError::InvalidPolicy { .. })
        ));
    }
}
