//! Showcase Core
//!
//! Foundational types shared by every part of the showcase page runtime:
//!
//! - **Sections**: the fixed registry of page sections and what each one
//!   initializes when it becomes active
//! - **Application State**: the single page-lifetime state record
//! - **Page Events**: platform-neutral events fed into the orchestrator
//! - **Configuration**: timing and threshold knobs, loadable from TOML
//! - **Utilities**: number formatting and viewport visibility tests
//!
//! # Example
//!
//! ```rust
//! use showcase_core::{AppState, Key, Section};
//!
//! let state = AppState::new(false);
//! assert_eq!(state.current_section, "home");
//!
//! let key = Key::from_dom_key("3");
//! assert_eq!(key.section(), Some(Section::Performance));
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod section;
pub mod state;
pub mod util;
pub mod viewport;

pub use config::{AnimationConfig, ChromeConfig, PreloadConfig, ShowcaseConfig, TimingConfig};
pub use error::{Result, ShowcaseError};
pub use event::{Key, PageEvent};
pub use section::{DiagramId, Section, SectionContent};
pub use state::AppState;
pub use util::{format_number, parse_leading_number, round_half_up};
pub use viewport::{
    intersection_ratio, is_in_viewport, is_partially_visible, Margins, Rect, Viewport,
};
