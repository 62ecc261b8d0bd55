//! Application state
//!
//! One record per page, created at load and owned by the orchestrator.
//! Controllers receive it by reference instead of reaching for a global.

use serde::Serialize;

use crate::section::Section;

/// Page-lifetime state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppState {
    /// Id of the section currently shown
    pub current_section: String,
    /// True until the loading splash is gone
    pub is_loading: bool,
    /// Last observed vertical scroll offset
    pub scroll_position: f64,
    /// False when the user prefers reduced motion
    pub animations_enabled: bool,
}

impl AppState {
    /// Create the initial state; `reduced_motion` comes from the
    /// `prefers-reduced-motion: reduce` media query.
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            current_section: Section::Home.id().to_string(),
            is_loading: true,
            scroll_position: 0.0,
            animations_enabled: !reduced_motion,
        }
    }

    pub fn set_scroll_position(&mut self, y: f64) {
        self.scroll_position = y;
    }

    pub fn finish_loading(&mut self) {
        self.is_loading = false;
    }

    /// The current section as a registry member, if it is one
    pub fn section(&self) -> Option<Section> {
        Section::from_id(&self.current_section)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}
