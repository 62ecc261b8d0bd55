//! Showcase Web Platform
//!
//! Runs the showcase page runtime in the browser.
//!
//! - [`WebDocument`] - the [`Document`](showcase_dom::Document) trait over `web-sys`
//! - [`MermaidRenderer`] - diagrams through the page's `mermaid` global
//! - [`FeatherIcons`] - icons through the page's `feather` global
//! - [`start`] - the `wasm-bindgen` entry point wiring browser events into
//!   [`ShowcaseApp`](showcase_app::ShowcaseApp)
//!
//! Build with `cargo build --target wasm32-unknown-unknown -p showcase_platform_web`
//! and load the output with `wasm-bindgen` after the Mermaid and Feather
//! script tags.

#![cfg(target_arch = "wasm32")]

pub mod console;
pub mod document;
pub mod libraries;
pub mod runtime;

pub use document::WebDocument;
pub use libraries::{FeatherIcons, MermaidRenderer};
pub use runtime::{start, WebApp};
