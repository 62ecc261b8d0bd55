//! Showcase App
//!
//! The page runtime of the pipeline showcase: one section shown at a time,
//! diagrams rendered on demand, entrance animations and counters, and the
//! page chrome around them.
//!
//! # Architecture
//!
//! - [`ShowcaseApp`] - owns the document and the controllers, consumes
//!   [`PageEvent`](showcase_core::PageEvent)s and advances on frames
//! - [`NavigationController`] - section switching, URL fragment, mobile menu
//! - [`AnimationController`] - viewport reveals, counters, entrance sequences
//! - [`PageChrome`] - navigation bar look, back-to-top, splash, toasts
//! - [`PerformanceOptimizer`] - lazy images and preload hints
//! - [`DiagramController`](showcase_diagram::DiagramController) - diagrams
//!
//! # Example
//!
//! ```rust
//! use showcase_app::{fixture, ShowcaseApp};
//! use showcase_core::{Key, PageEvent, ShowcaseConfig};
//! use showcase_diagram::HeadlessRenderer;
//!
//! let doc = fixture::reference_page();
//! let mut app = ShowcaseApp::new(doc, HeadlessRenderer::new(), ShowcaseConfig::default());
//!
//! app.handle(PageEvent::DomReady);
//! app.handle(PageEvent::KeyDown(Key::from_dom_key("3")));
//! app.run_until(2_000.0);
//!
//! assert_eq!(app.state().current_section, "performance");
//! assert!(!app.state().is_loading);
//! ```

pub mod animation;
pub mod app;
pub mod chrome;
pub mod fixture;
pub mod navigation;
pub mod optimizations;

#[cfg(test)]
mod tests;

pub use animation::{AnimationController, AnimationTask};
pub use app::{PageSnapshot, ShowcaseApp, Task, FRAME_MS};
pub use chrome::{ChromeTask, NotificationKind, PageChrome};
pub use navigation::NavigationController;
pub use optimizations::{preload_kind, PerformanceOptimizer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::ShowcaseApp;
    pub use crate::chrome::NotificationKind;
    pub use showcase_core::{Key, PageEvent, ShowcaseConfig};
    pub use showcase_diagram::{DiagramRenderer, HeadlessRenderer};
    pub use showcase_dom::{Document, DocumentExt, HeadlessDocument};
}
