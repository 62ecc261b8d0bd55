//! Showcase DOM Abstraction
//!
//! Platform-agnostic access to the page document so the controllers can run
//! both in a browser and headless.
//!
//! # Architecture
//!
//! - [`Document`] - the operations the page runtime needs from a DOM
//! - [`DocumentExt`] - convenience helpers available on every document
//! - [`Selector`] - the CSS selector subset the runtime queries with
//! - [`HeadlessDocument`] - in-memory document for tests and the CLI
//! - [`IconReplacer`] - the external icon library invoked at startup
//!
//! # Backends
//!
//! - `HeadlessDocument` (this crate)
//! - `showcase_platform_web` - browsers, through `web-sys`
//!
//! # Example
//!
//! ```rust
//! use showcase_dom::{Document, DocumentExt, HeadlessDocument};
//!
//! let mut doc = HeadlessDocument::new();
//! let body = doc.body().unwrap();
//! let section = doc.create_element("section");
//! doc.set_attribute(&section, "id", "home");
//! doc.add_class(&section, "section");
//! doc.append_child(&body, &section);
//!
//! assert_eq!(doc.query_all(".section").unwrap(), vec![section]);
//! ```

mod document;
mod headless;
mod icons;
mod selector;

pub use document::{Document, DocumentExt, ScrollBehavior};
pub use headless::{HeadlessDocument, NodeId};
pub use icons::{IconReplacer, InlineIcons, NoIcons};
pub use selector::{Compound, Selector, SelectorTarget};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::document::{Document, DocumentExt, ScrollBehavior};
    pub use crate::headless::HeadlessDocument;
    pub use crate::selector::Selector;
}
