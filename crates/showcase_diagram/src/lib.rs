//! Showcase Diagrams
//!
//! The page's flowcharts and Gantt chart: their sources, the diagramming
//! library's configuration and the controller that places rendered diagrams
//! on the page.
//!
//! # Example
//!
//! ```rust
//! use showcase_diagram::{DiagramController, HeadlessRenderer, RenderOutcome};
//! use showcase_dom::{Document, HeadlessDocument};
//!
//! let mut doc = HeadlessDocument::new();
//! let body = doc.body().unwrap();
//! let container = doc.create_element("div");
//! doc.set_attribute(&container, "id", "algorithmDiagram");
//! doc.append_child(&body, &container);
//!
//! let mut diagrams = DiagramController::new(HeadlessRenderer::new(), 500);
//! diagrams.initialize::<HeadlessDocument>();
//! let outcome = diagrams.render(&mut doc, "algorithm", "algorithmDiagram").unwrap();
//! assert_eq!(outcome, RenderOutcome::Rendered);
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod outline;
pub mod renderer;

pub use catalog::{DiagramCatalog, DiagramDefinition};
pub use config::{FlowchartConfig, GanttConfig, MermaidConfig, ThemeVariables};
pub use controller::{
    modal_type_class, DiagramController, DiagramStats, RenderOutcome, RENDER_FAILED_MESSAGE,
};
pub use outline::{DiagramKind, DiagramOutline, GanttTask, OutlineEdge, OutlineNode};
pub use renderer::{DiagramRenderer, HeadlessRenderer};
