use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, FutureExt, LocalBoxFuture};

/// Source of timed suspension for the draw controller.
pub trait Clock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

#[derive(Debug, Default)]
struct ManualClockState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

/// Virtual clock: every sleep completes immediately and advances virtual time.
/// Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ManualClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.state.borrow().elapsed
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.borrow().sleeps.clone()
    }
}

impl Clock for ManualClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let mut state = self.state.borrow_mut();
        state.elapsed += duration;
        state.sleeps.push(duration);
        future::ready(()).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_manual_clock_advances_shared_timeline() {
        let clock = ManualClock::new();
        let observer = clock.clone();
        block_on(async {
            clock.sleep(Duration::from_millis(1500)).await;
            clock.sleep(Duration::from_secs(2)).await;
        });
        assert_eq!(observer.elapsed(), Duration::from_millis(3500));
        assert_eq!(observer.sleeps().len(), 2);
    }
}
