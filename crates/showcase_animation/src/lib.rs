//! Showcase Animation Runtime
//!
//! Time-driven building blocks for the page runtime. Nothing here touches the
//! DOM or reads a wall clock; the orchestrator advances time and applies the
//! results.
//!
//! # Features
//!
//! - **Scheduler**: virtual-clock timeouts and intervals carrying task values
//! - **Timing**: debouncing, throttling and per-frame gating
//! - **Counters**: text-derived step counters and declared-range counters
//! - **Stagger**: index-based delays and fade/slide entrance styles
//! - **Visibility**: threshold-based viewport entry observation
//! - **Effects**: short-lived class effects (pulse, shake)
//!
//! # Example
//!
//! ```rust
//! use showcase_animation::{Scheduler, TextCounter};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.set_timeout(1500, "hide-loading");
//! assert_eq!(scheduler.advance_to(1500.0), vec!["hide-loading"]);
//!
//! let mut counter = TextCounter::from_text("85%", 0.0, 1500, 50).unwrap();
//! assert_eq!(counter.sample(1500.0).as_deref(), Some("85%"));
//! ```

pub mod counter;
pub mod effects;
pub mod scheduler;
pub mod stagger;
pub mod timing;
pub mod visibility;

pub use counter::{Counter, CounterFormat, CounterSet, RangeCounter, TextCounter};
pub use effects::{EffectKind, TransientEffect};
pub use scheduler::{Scheduler, TimerId};
pub use stagger::{transition_value, EnterTransition, StaggerConfig};
pub use timing::{Debounced, Debouncer, FrameGate, Throttle};
pub use visibility::{VisibilityEntry, VisibilityObserver};
