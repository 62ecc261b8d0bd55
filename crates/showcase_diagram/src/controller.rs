//! Diagram controller
//!
//! Renders catalog diagrams into their page containers, re-renders all of
//! them after the window settles from a resize and drives the enlarge modal.
//!
//! Every failure is contained: lookups that miss are logged and leave the
//! document untouched, library failures are logged and leave an inline
//! error message in place of the diagram. Nothing is retried.

use showcase_animation::{Debouncer, Scheduler};
use showcase_core::{DiagramId, Result, ShowcaseError};
use showcase_dom::{Document, DocumentExt};

use crate::catalog::DiagramCatalog;
use crate::config::MermaidConfig;
use crate::renderer::DiagramRenderer;

/// Static message shown when a diagram fails to render
pub const RENDER_FAILED_MESSAGE: &str = "图表加载失败";

const MODAL_ID: &str = "diagramModal";
const MODAL_CONTENT_ID: &str = "modalDiagramContent";

/// Modal classes selecting per-diagram sizing
const MODAL_TYPE_CLASSES: [&str; 3] = [
    "architecture-diagram",
    "retrieval-diagram",
    "algorithm-diagram",
];

/// Modal sizing class for a diagram, if it has one
pub fn modal_type_class(id: DiagramId) -> Option<&'static str> {
    match id {
        DiagramId::Architecture => Some("architecture-diagram"),
        DiagramId::Retrieval => Some("retrieval-diagram"),
        DiagramId::Algorithm => Some("algorithm-diagram"),
        DiagramId::Performance => None,
    }
}

/// How a render attempt ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The library rendered the diagram
    Rendered,
    /// The library failed; the inline error message is shown instead
    Fallback,
}

/// Counters for diagnostics and the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagramStats {
    pub rendered: usize,
    pub fallbacks: usize,
    pub render_all_runs: usize,
}

/// Diagram orchestration over a [`DiagramRenderer`]
#[derive(Debug)]
pub struct DiagramController<R> {
    catalog: DiagramCatalog,
    config: MermaidConfig,
    renderer: R,
    initialized: bool,
    resize: Debouncer,
    modal: Option<DiagramId>,
    stats: DiagramStats,
}

impl<R> DiagramController<R> {
    /// Standard catalog and library configuration
    pub fn new(renderer: R, resize_debounce_ms: u32) -> Self {
        Self::with_catalog(
            DiagramCatalog::standard(),
            MermaidConfig::default(),
            renderer,
            resize_debounce_ms,
        )
    }

    pub fn with_catalog(
        catalog: DiagramCatalog,
        config: MermaidConfig,
        renderer: R,
        resize_debounce_ms: u32,
    ) -> Self {
        Self {
            catalog,
            config,
            renderer,
            initialized: false,
            resize: Debouncer::new(resize_debounce_ms),
            modal: None,
            stats: DiagramStats::default(),
        }
    }

    pub fn catalog(&self) -> &DiagramCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &MermaidConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn stats(&self) -> DiagramStats {
        self.stats
    }

    /// Diagram currently shown in the modal
    pub fn modal_diagram(&self) -> Option<DiagramId> {
        self.modal
    }

    /// Configure the library
    ///
    /// A failure is logged and the controller stays usable; later renders
    /// then fail into the inline error message.
    pub fn initialize<D>(&mut self) -> bool
    where
        D: Document + ?Sized,
        R: DiagramRenderer<D>,
    {
        match self.renderer.initialize(&self.config) {
            Ok(()) => {
                self.initialized = true;
                tracing::info!("diagram system initialized ({} diagrams)", self.catalog.len());
                true
            }
            Err(e) => {
                tracing::error!("diagram library unavailable: {}", e);
                false
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render `diagram_id` into the element `container_id`
    ///
    /// A missing container or definition is an error and the document is not
    /// touched. Library failures are not errors: the container shows the
    /// inline error message and [`RenderOutcome::Fallback`] is returned.
    pub fn render<D>(&mut self, doc: &mut D, diagram_id: &str, container_id: &str) -> Result<RenderOutcome>
    where
        D: Document + ?Sized,
        R: DiagramRenderer<D>,
    {
        let Some(container) = doc.element_by_id(container_id) else {
            tracing::error!("diagram container not found: {}", container_id);
            return Err(ShowcaseError::ContainerNotFound(container_id.to_string()));
        };
        let Some(definition) = self.catalog.get_str(diagram_id) else {
            tracing::error!("diagram definition not found: {}", diagram_id);
            return Err(ShowcaseError::DiagramNotFound(diagram_id.to_string()));
        };
        let source = definition.source;

        doc.clear_children(&container);
        let host = doc.create_with_classes("div", &["mermaid"]);
        doc.set_text_content(&host, source);
        doc.append_child(&container, &host);

        match self.renderer.render(doc, &host, source) {
            Ok(()) => {
                self.stats.rendered += 1;
                tracing::debug!("diagram rendered: {}", diagram_id);
                Ok(RenderOutcome::Rendered)
            }
            Err(e) => {
                self.stats.fallbacks += 1;
                tracing::error!("diagram render failed: {}: {}", diagram_id, e);
                show_render_error(doc, &container);
                Ok(RenderOutcome::Fallback)
            }
        }
    }

    /// Render every catalog diagram into its conventional container
    ///
    /// Failures are logged and the loop continues. Returns how many diagrams
    /// the library rendered.
    pub fn render_all<D>(&mut self, doc: &mut D) -> usize
    where
        D: Document + ?Sized,
        R: DiagramRenderer<D>,
    {
        self.stats.render_all_runs += 1;
        let ids: Vec<DiagramId> = self.catalog.ids().collect();
        let rendered = ids
            .into_iter()
            .filter(|id| {
                matches!(
                    self.render(doc, id.as_str(), &id.container_id()),
                    Ok(RenderOutcome::Rendered)
                )
            })
            .count();
        tracing::debug!("re-rendered {} diagrams", rendered);
        rendered
    }

    // =========================================================================
    // Resize
    // =========================================================================

    /// Note a window resize; `task` fires once resizes stop for the
    /// debounce window, then call [`DiagramController::resize_settled`]
    pub fn schedule_resize<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, task: T) {
        self.resize.trigger(scheduler, task);
    }

    /// The resize debounce fired: render everything again
    pub fn resize_settled<D>(&mut self, doc: &mut D) -> usize
    where
        D: Document + ?Sized,
        R: DiagramRenderer<D>,
    {
        if !self.resize.fired() {
            return 0;
        }
        self.render_all(doc)
    }

    // =========================================================================
    // Modal
    // =========================================================================

    /// Show a diagram enlarged in the modal
    ///
    /// `diagram` is a diagram id (`architecture`) or its container id
    /// (`architectureDiagram`). The original container, the modal and its
    /// content element must all exist.
    pub fn enlarge<D>(&mut self, doc: &mut D, diagram: &str) -> Result<()>
    where
        D: Document + ?Sized,
        R: DiagramRenderer<D>,
    {
        let diagram_type = diagram.strip_suffix("Diagram").unwrap_or(diagram);
        let container_id = format!("{}Diagram", diagram_type);

        let (Some(_original), Some(modal), Some(content)) = (
            doc.element_by_id(&container_id),
            doc.element_by_id(MODAL_ID),
            doc.element_by_id(MODAL_CONTENT_ID),
        ) else {
            tracing::error!("cannot enlarge diagram {}: required elements missing", diagram);
            return Err(ShowcaseError::ElementNotFound(container_id));
        };

        let Some(definition) = self.catalog.get_str(diagram_type) else {
            tracing::error!("diagram definition not found: {}", diagram_type);
            return Err(ShowcaseError::DiagramNotFound(diagram_type.to_string()));
        };
        let (id, source) = (definition.id, definition.source);

        doc.clear_children(&content);
        doc.remove_classes(&modal, &MODAL_TYPE_CLASSES);
        if let Some(class) = modal_type_class(id) {
            doc.add_class(&modal, class);
        }

        let host = doc.create_with_classes("div", &["mermaid"]);
        doc.set_text_content(&host, source);
        doc.append_child(&content, &host);

        doc.add_class(&modal, "active");
        if let Some(body) = doc.body() {
            doc.set_style(&body, "overflow", "hidden");
        }
        self.modal = Some(id);

        match self.renderer.render(doc, &host, source) {
            Ok(()) => {
                self.stats.rendered += 1;
                tracing::info!("diagram enlarged: {}", id);
            }
            Err(e) => {
                tracing::error!("enlarged diagram render failed: {}: {}", id, e);
            }
        }
        Ok(())
    }

    /// Hide the modal, restore page scrolling and drop the enlarged diagram
    ///
    /// Safe to call when the modal is already closed or absent.
    pub fn close<D>(&mut self, doc: &mut D)
    where
        D: Document + ?Sized,
    {
        if let Some(modal) = doc.element_by_id(MODAL_ID) {
            doc.remove_class(&modal, "active");
            doc.remove_classes(&modal, &MODAL_TYPE_CLASSES);
            if let Some(body) = doc.body() {
                doc.remove_style(&body, "overflow");
            }
        }
        if let Some(content) = doc.element_by_id(MODAL_CONTENT_ID) {
            doc.clear_children(&content);
        }
        if self.modal.take().is_some() {
            tracing::debug!("diagram modal closed");
        }
    }
}

fn show_render_error<D: Document + ?Sized>(doc: &mut D, container: &D::Element) {
    doc.clear_children(container);
    let message = doc.create_with_classes("p", &["diagram-error"]);
    doc.set_styles(
        &message,
        &[
            ("text-align", "center".to_string()),
            ("color", "#ef4444".to_string()),
            ("padding", "20px".to_string()),
        ],
    );
    doc.set_text_content(&message, RENDER_FAILED_MESSAGE);
    doc.append_child(container, &message);
}
