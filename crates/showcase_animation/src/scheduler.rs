//! Timer scheduler
//!
//! Every deferred piece of page work (`setTimeout`/`setInterval` in browser
//! terms) is a task value registered here. The clock is virtual: the owner
//! advances it, usually once per animation frame, and receives the tasks that
//! came due. Timers are plain data, so they can be inspected and cancelled
//! and tests never wait on a wall clock.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered timer
    pub struct TimerId;
}

#[derive(Clone, Debug)]
struct Timer<T> {
    /// Absolute due time in milliseconds
    due: f64,
    /// Registration order, breaks ties between equal due times
    seq: u64,
    /// Repeat period for interval timers
    period: Option<u32>,
    task: T,
}

/// Virtual-clock timer registry
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    now: f64,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now: 0.0,
            next_seq: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of registered timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Run `task` once, `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: u32, task: T) -> TimerId {
        self.insert(delay_ms, None, task)
    }

    /// Run `task` every `period_ms`, first after one period
    ///
    /// A zero period is treated as one millisecond so the clock always makes
    /// progress.
    pub fn set_interval(&mut self, period_ms: u32, task: T) -> TimerId {
        let period = period_ms.max(1);
        self.insert(period, Some(period), task)
    }

    fn insert(&mut self, delay_ms: u32, period: Option<u32>, task: T) -> TimerId {
        let seq = self.bump_seq();
        self.timers.insert(Timer {
            due: self.now + delay_ms as f64,
            seq,
            period,
            task,
        })
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel a timer, returning its task if it was still pending
    pub fn clear(&mut self, id: TimerId) -> Option<T> {
        self.timers.remove(id).map(|t| t.task)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Due time of a pending timer
    pub fn due_at(&self, id: TimerId) -> Option<f64> {
        self.timers.get(id).map(|t| t.due)
    }

    /// Earliest pending due time
    pub fn next_due(&self) -> Option<f64> {
        self.timers
            .values()
            .map(|t| t.due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Drop every timer
    pub fn clear_all(&mut self) {
        self.timers.clear();
    }

    fn earliest_due_by(&self, until: f64) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(id, _)| id)
    }
}

impl<T: Clone> Scheduler<T> {
    /// Fire the earliest timer due at or before `until`
    ///
    /// The clock moves to that timer's due time, so timers registered while
    /// handling the task are measured from when it was supposed to run.
    /// Returns `None` (leaving the clock alone) when nothing is due.
    pub fn pop_due(&mut self, until: f64) -> Option<T> {
        let id = self.earliest_due_by(until)?;
        let (due, period) = self.timers.get(id).map(|t| (t.due, t.period))?;
        self.now = self.now.max(due);

        let Some(period) = period else {
            return self.timers.remove(id).map(|t| t.task);
        };
        let seq = self.bump_seq();
        let timer = self.timers.get_mut(id)?;
        timer.due += period as f64;
        timer.seq = seq;
        Some(timer.task.clone())
    }

    /// Advance the clock to `now`, returning every task that came due in
    /// firing order
    pub fn advance_to(&mut self, now: f64) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(now) {
            fired.push(task);
        }
        self.now = self.now.max(now);
        fired
    }

    pub fn advance_by(&mut self, delta_ms: f64) -> Vec<T> {
        let target = self.now + delta_ms;
        self.advance_to(target)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: f64) {
        self.now = self.now.max(now);
    }
}
