//! Diagram renderer seam
//!
//! The diagramming library itself is external. In the browser it is Mermaid
//! (see `showcase_platform_web`); headless runs use [`HeadlessRenderer`],
//! which validates the source and leaves a summary node where the SVG would
//! be.

use showcase_core::{Result, ShowcaseError};
use showcase_dom::{Document, DocumentExt};

use crate::config::MermaidConfig;
use crate::outline::DiagramOutline;

/// External diagram library
pub trait DiagramRenderer<D: Document + ?Sized> {
    /// Configure the library; called once at startup
    fn initialize(&mut self, config: &MermaidConfig) -> Result<()>;

    /// Render `source` into `host` (a `div.mermaid` already holding the
    /// source text)
    fn render(&mut self, doc: &mut D, host: &D::Element, source: &str) -> Result<()>;
}

/// In-process stand-in for the diagram library
#[derive(Clone, Debug)]
pub struct HeadlessRenderer {
    available: bool,
    initialized: bool,
    renders: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self {
            available: true,
            initialized: false,
            renders: 0,
        }
    }

    /// Library that failed to load: every call errors
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Successful renders so far
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document + ?Sized> DiagramRenderer<D> for HeadlessRenderer {
    fn initialize(&mut self, config: &MermaidConfig) -> Result<()> {
        if !self.available {
            return Err(ShowcaseError::RendererUnavailable(
                "diagram library not loaded".to_string(),
            ));
        }
        tracing::debug!("headless renderer initialized with theme {}", config.theme);
        self.initialized = true;
        Ok(())
    }

    fn render(&mut self, doc: &mut D, host: &D::Element, source: &str) -> Result<()> {
        if !self.available {
            return Err(ShowcaseError::RendererUnavailable(
                "diagram library not loaded".to_string(),
            ));
        }
        let outline = DiagramOutline::parse(source)?;

        doc.clear_children(host);
        doc.set_attribute(host, "data-processed", "true");

        let svg = doc.create_with_classes("svg", &["diagram-summary"]);
        doc.set_attribute(&svg, "aria-roledescription", outline.kind.as_str());
        doc.set_attribute(&svg, "data-kind", outline.kind.as_str());
        doc.set_attribute(&svg, "data-nodes", &outline.nodes.len().to_string());
        doc.set_attribute(&svg, "data-edges", &outline.edges.len().to_string());
        if !outline.tasks.is_empty() {
            doc.set_attribute(&svg, "data-tasks", &outline.tasks.len().to_string());
        }
        if let Some(title) = &outline.title {
            doc.set_text_content(&svg, title);
        }
        doc.append_child(host, &svg);

        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_dom::HeadlessDocument;

    #[test]
    fn test_render_replaces_source_with_summary() {
        let mut doc = HeadlessDocument::new();
        let host = doc.create_with_classes("div", &["mermaid"]);
        doc.set_text_content(&host, "graph LR\n A --> B");

        let mut renderer = HeadlessRenderer::new();
        renderer.render(&mut doc, &host, "graph LR\n A --> B").unwrap();

        assert_eq!(doc.attribute(&host, "data-processed").as_deref(), Some("true"));
        let svg = doc.children(&host)[0];
        assert_eq!(doc.attribute(&svg, "data-nodes").as_deref(), Some("2"));
        assert_eq!(doc.attribute(&svg, "data-edges").as_deref(), Some("1"));
        assert_eq!(renderer.render_count(), 1);
    }

    #[test]
    fn test_invalid_source_fails() {
        let mut doc = HeadlessDocument::new();
        let host = doc.create_element("div");
        let mut renderer = HeadlessRenderer::new();
        assert!(renderer.render(&mut doc, &host, "nonsense").is_err());
    }

    #[test]
    fn test_unavailable_library() {
        let mut doc = HeadlessDocument::new();
        let host = doc.create_element("div");
        let mut renderer = HeadlessRenderer::unavailable();
        assert!(DiagramRenderer::<HeadlessDocument>::initialize(&mut renderer, &MermaidConfig::default()).is_err());
        assert!(matches!(
            renderer.render(&mut doc, &host, "graph LR"),
            Err(ShowcaseError::RendererUnavailable(_))
        ));
    }
}
