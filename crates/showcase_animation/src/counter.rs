//! Counting animations
//!
//! Two independent counters drive number text on the page:
//!
//! - [`TextCounter`] reads its target from the element's current text
//!   (`"85%"`, `"<3秒"`, `"100+"`) and counts up in a fixed number of equal
//!   steps, re-applying the text's decoration on every step.
//! - [`RangeCounter`] counts between two declared values (`data-target`),
//!   sampling on a fixed interval and abbreviating large values (`1.5K`).
//!
//! Neither owns a timer. Counters are started with a timestamp and sampled
//! by the frame driver; [`CounterSet`] keeps the running ones per element.

use showcase_core::{format_number, parse_leading_number, round_half_up};
use smallvec::SmallVec;

// =============================================================================
// Text-derived counter
// =============================================================================

/// Decoration re-applied around the counted value
///
/// Chosen by substring precedence on the original text: `秒` first, then
/// `%`, then `+`. Note that `+` renders as a percentage (`"100+"` counts to
/// `">100%"`), which is what the page has always shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFormat {
    /// `<N秒`
    Seconds,
    /// `N%`
    Percent,
    /// `>N%`
    AtLeastPercent,
    /// `N`
    Plain,
}

impl CounterFormat {
    pub fn detect(text: &str) -> Self {
        if text.contains('秒') {
            CounterFormat::Seconds
        } else if text.contains('%') {
            CounterFormat::Percent
        } else if text.contains('+') {
            CounterFormat::AtLeastPercent
        } else {
            CounterFormat::Plain
        }
    }

    /// Render `value` rounded half-up
    pub fn format(self, value: f64) -> String {
        let n = round_half_up(value) as i64;
        match self {
            CounterFormat::Seconds => format!("<{}秒", n),
            CounterFormat::Percent => format!("{}%", n),
            CounterFormat::AtLeastPercent => format!(">{}%", n),
            CounterFormat::Plain => n.to_string(),
        }
    }
}

/// Step counter whose target comes from display text
#[derive(Clone, Debug, PartialEq)]
pub struct TextCounter {
    target: f64,
    format: CounterFormat,
    steps: u32,
    duration_ms: u32,
    started_at: f64,
    /// Last step written, 0 before the first one
    step: u32,
}

impl TextCounter {
    /// Parse `text`; `None` when it carries no number
    pub fn from_text(text: &str, started_at: f64, duration_ms: u32, steps: u32) -> Option<Self> {
        let target = parse_leading_number(text)?;
        Some(Self {
            target,
            format: CounterFormat::detect(text),
            steps: steps.max(1),
            duration_ms,
            started_at,
            step: 0,
        })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn format(&self) -> CounterFormat {
        self.format
    }

    /// Time between steps
    pub fn step_ms(&self) -> f64 {
        self.duration_ms as f64 / self.steps as f64
    }

    /// Counted value after step `k`, clamped to the target
    pub fn value_at_step(&self, k: u32) -> f64 {
        if k >= self.steps {
            return self.target;
        }
        (k as f64 * self.target / self.steps as f64).min(self.target)
    }

    /// Text for the step reached at `now`, `None` when no new step is due
    pub fn sample(&mut self, now: f64) -> Option<String> {
        let elapsed = (now - self.started_at).max(0.0);
        let reached = if self.step_ms() > 0.0 {
            ((elapsed / self.step_ms()).floor() as u64).min(self.steps as u64) as u32
        } else {
            self.steps
        };
        if reached <= self.step {
            return None;
        }
        self.step = reached;
        Some(self.format.format(self.value_at_step(reached)))
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps
    }
}

// =============================================================================
// Declared-range counter
// =============================================================================

/// Counter between two declared values
#[derive(Clone, Debug, PartialEq)]
pub struct RangeCounter {
    start: f64,
    end: f64,
    duration_ms: u32,
    interval_ms: u32,
    started_at: f64,
    ticks: u64,
    finished: bool,
}

impl RangeCounter {
    /// Count from `start` to `end` over `duration_ms`
    ///
    /// The sampling interval is `|floor(duration / range)|`, at least
    /// `min_interval_ms`. An empty range samples at the minimum interval.
    pub fn new(start: f64, end: f64, duration_ms: u32, min_interval_ms: u32, started_at: f64) -> Self {
        let range = end - start;
        let interval = if range == 0.0 {
            min_interval_ms
        } else {
            let step = (duration_ms as f64 / range).floor().abs();
            (step.min(u32::MAX as f64) as u32).max(min_interval_ms)
        };
        Self {
            start,
            end,
            duration_ms,
            interval_ms: interval.max(1),
            started_at,
            ticks: 0,
            finished: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Value shown at `elapsed` milliseconds
    pub fn value_at(&self, elapsed: f64) -> f64 {
        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            elapsed / self.duration_ms as f64
        };
        if progress < 1.0 {
            round_half_up(self.start + (self.end - self.start) * progress)
        } else {
            self.end
        }
    }

    /// Text for the interval tick reached at `now`, `None` when no new tick
    /// is due
    pub fn sample(&mut self, now: f64) -> Option<String> {
        if self.finished {
            return None;
        }
        let elapsed = (now - self.started_at).max(0.0);
        let ticks = (elapsed / self.interval_ms as f64).floor() as u64;
        if ticks <= self.ticks {
            return None;
        }
        self.ticks = ticks;

        let at = (ticks * self.interval_ms as u64) as f64;
        let value = self.value_at(at);
        if at >= self.duration_ms as f64 {
            self.finished = true;
        }
        Some(format_number(value))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

// =============================================================================
// Running counters
// =============================================================================

/// Either counter kind
#[derive(Clone, Debug, PartialEq)]
pub enum Counter {
    Text(TextCounter),
    Range(RangeCounter),
}

impl Counter {
    pub fn sample(&mut self, now: f64) -> Option<String> {
        match self {
            Counter::Text(c) => c.sample(now),
            Counter::Range(c) => c.sample(now),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Counter::Text(c) => c.is_finished(),
            Counter::Range(c) => c.is_finished(),
        }
    }
}

impl From<TextCounter> for Counter {
    fn from(c: TextCounter) -> Self {
        Counter::Text(c)
    }
}

impl From<RangeCounter> for Counter {
    fn from(c: RangeCounter) -> Self {
        Counter::Range(c)
    }
}

/// Running counters keyed by element
#[derive(Clone, Debug)]
pub struct CounterSet<E> {
    running: SmallVec<[(E, Counter); 8]>,
}

impl<E> Default for CounterSet<E> {
    fn default() -> Self {
        Self {
            running: SmallVec::new(),
        }
    }
}

impl<E: Clone + PartialEq> CounterSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting on `element`, replacing a counter already running there
    pub fn start(&mut self, element: E, counter: impl Into<Counter>) {
        let counter = counter.into();
        match self.running.iter_mut().find(|(e, _)| *e == element) {
            Some(slot) => slot.1 = counter,
            None => self.running.push((element, counter)),
        }
    }

    pub fn is_running(&self, element: &E) -> bool {
        self.running.iter().any(|(e, _)| e == element)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Text updates due at `now`; finished counters are dropped
    pub fn sample(&mut self, now: f64) -> Vec<(E, String)> {
        let updates = self
            .running
            .iter_mut()
            .filter_map(|(element, counter)| counter.sample(now).map(|text| (element.clone(), text)))
            .collect();
        self.running.retain(|(_, counter)| !counter.is_finished());
        updates
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}
