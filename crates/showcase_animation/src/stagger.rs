//! Staggered entrance animations
//!
//! Lists of elements enter one after another: each item's reveal is delayed
//! by its index times a fixed step. The reveal itself is a CSS transition
//! from a hidden inline style to a settled one.
//!
//! # Example
//!
//! ```rust
//! use showcase_animation::{EnterTransition, StaggerConfig};
//!
//! // Hero parts: 200 ms lead-in, then every 150 ms
//! let stagger = StaggerConfig::new(150).with_base_delay(200);
//! assert_eq!(stagger.delay_for_index(2), 500);
//!
//! let enter = EnterTransition::slide_up(30.0, 800);
//! assert_eq!(enter.transition(), "all 0.8s ease-out");
//! ```

/// Delay schedule for a staggered list, first item to last
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay between consecutive items (ms)
    pub delay_ms: u32,
    /// Delay before the first item (ms)
    pub base_delay_ms: u32,
}

impl StaggerConfig {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            base_delay_ms: 0,
        }
    }

    pub fn with_base_delay(mut self, base_delay_ms: u32) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }

    /// Delay for item `index`
    pub fn delay_for_index(&self, index: usize) -> u32 {
        self.base_delay_ms + self.delay_ms * index as u32
    }
}

/// Fade-and-slide entrance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnterTransition {
    /// Initial downward offset (px)
    pub offset_y: f64,
    pub duration_ms: u32,
}

impl EnterTransition {
    pub fn slide_up(offset_y: f64, duration_ms: u32) -> Self {
        Self {
            offset_y,
            duration_ms,
        }
    }

    /// `all <seconds>s ease-out`
    pub fn transition(&self) -> String {
        transition_value("all", self.duration_ms)
    }

    /// Inline style applied before the reveal
    pub fn hidden_styles(&self) -> [(&'static str, String); 2] {
        [
            ("opacity", "0".to_string()),
            ("transform", format!("translateY({}px)", self.offset_y)),
        ]
    }

    /// Inline style the element transitions to
    pub fn settled_styles(&self) -> [(&'static str, String); 3] {
        [
            ("transition", self.transition()),
            ("opacity", "1".to_string()),
            ("transform", "translateY(0)".to_string()),
        ]
    }
}

/// CSS `transition` shorthand with ease-out timing, e.g. `width 1s ease-out`
pub fn transition_value(property: &str, duration_ms: u32) -> String {
    format!("{} {}s ease-out", property, duration_ms as f64 / 1000.0)
}
