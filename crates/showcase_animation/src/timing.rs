//! Debounce, throttle and frame gating
//!
//! These wrap a [`Scheduler`] timer rather than owning a callback: the
//! caller passes the task to schedule and later handles it like any other
//! fired task.

use crate::scheduler::{Scheduler, TimerId};

/// Delays work until triggers stop arriving for `wait_ms`
///
/// Each trigger clears the pending timer and schedules a fresh one, so a
/// burst of triggers yields a single task. With `immediate`, the task runs
/// on the leading edge instead and further triggers within the window only
/// extend it.
#[derive(Clone, Debug)]
pub struct Debouncer {
    wait_ms: u32,
    immediate: bool,
    pending: Option<TimerId>,
}

/// What a [`Debouncer`] wants done after a trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Debounced {
    /// A trailing timer is scheduled
    Scheduled(TimerId),
    /// Leading edge: run the work now
    RunNow,
    /// Inside the quiet window of a leading-edge debouncer
    Suppressed,
}

impl Debouncer {
    /// Trailing-edge debouncer
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            immediate: false,
            pending: None,
        }
    }

    /// Leading-edge debouncer
    pub fn immediate(wait_ms: u32) -> Self {
        Self {
            immediate: true,
            ..Self::new(wait_ms)
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Register a trigger
    ///
    /// For trailing-edge debouncers `task` is what fires once things settle.
    /// For leading-edge ones it is the window-closing marker; pass it back to
    /// [`Debouncer::fired`] when it comes due.
    pub fn trigger<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> Debounced {
        let had_pending = self.cancel(scheduler);
        let id = scheduler.set_timeout(self.wait_ms, task);
        self.pending = Some(id);

        match (self.immediate, had_pending) {
            (false, _) => Debounced::Scheduled(id),
            (true, false) => Debounced::RunNow,
            (true, true) => Debounced::Suppressed,
        }
    }

    /// The scheduled task fired; returns whether a timer was outstanding
    ///
    /// Superseded timers are cleared from the scheduler, so whatever fires
    /// is always the current one.
    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel the pending timer; returns whether there was one
    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        match self.pending.take() {
            Some(id) => scheduler.clear(id).is_some(),
            None => false,
        }
    }

    pub fn is_pending<T>(&self, scheduler: &Scheduler<T>) -> bool {
        self.pending.is_some_and(|id| scheduler.is_pending(id))
    }
}

/// Runs the first call, drops calls within `limit_ms` of it
#[derive(Clone, Debug)]
pub struct Throttle {
    limit_ms: u32,
    last_run: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms,
            last_run: None,
        }
    }

    /// Whether a call at `now` may run; records it when it may
    pub fn try_run(&mut self, now: f64) -> bool {
        let allowed = match self.last_run {
            Some(last) => now - last >= self.limit_ms as f64,
            None => true,
        };
        if allowed {
            self.last_run = Some(now);
        }
        allowed
    }

    pub fn reset(&mut self) {
        self.last_run = None;
    }
}

/// At most one pending job per animation frame
///
/// The browser idiom is a `ticking` flag guarding `requestAnimationFrame`:
/// the first scroll event of a frame requests work, later ones within the
/// same frame are folded into it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    requested: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for work on the next frame; false if already requested
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.requested, true)
    }

    /// Consume the request at the start of a frame
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_debounce_collapses_burst() {
        let mut scheduler: Scheduler<&str> = Scheduler::new();
        let mut debouncer = Debouncer::new(500);

        for t in [0.0, 100.0, 200.0, 300.0] {
            scheduler.advance_to(t);
            assert!(matches!(
                debouncer.trigger(&mut scheduler, "render"),
                Debounced::Scheduled(_)
            ));
        }
        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.advance_to(799.0).is_empty());
        assert_eq!(scheduler.advance_to(800.0), vec!["render"]);
        assert!(debouncer.fired());
        assert!(!debouncer.is_pending(&scheduler));
    }

    #[test]
    fn test_leading_debounce() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        let mut debouncer = Debouncer::immediate(150);

        assert_eq!(debouncer.trigger(&mut scheduler, ()), Debounced::RunNow);
        scheduler.advance_to(100.0);
        assert_eq!(debouncer.trigger(&mut scheduler, ()), Debounced::Suppressed);

        // Window closes 150 ms after the last trigger
        assert_eq!(scheduler.advance_to(250.0).len(), 1);
        assert!(debouncer.fired());
        assert_eq!(debouncer.trigger(&mut scheduler, ()), Debounced::RunNow);
    }

    #[test]
    fn test_throttle() {
        let mut throttle = Throttle::new(100);
        assert!(throttle.try_run(0.0));
        assert!(!throttle.try_run(50.0));
        assert!(throttle.try_run(100.0));
        assert!(!throttle.try_run(150.0));
    }

    #[test]
    fn test_frame_gate() {
        let mut gate = FrameGate::new();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(gate.take());
        assert!(!gate.take());
        assert!(gate.request());
    }
}
