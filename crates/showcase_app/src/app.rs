//! Page orchestrator
//!
//! [`ShowcaseApp`] owns the document, the controllers and the scheduler. A
//! platform backend feeds it [`PageEvent`]s and calls [`ShowcaseApp::frame`]
//! once per animation frame with the current time; everything deferred
//! (splash, entrance sequences, debounced resizes, toasts) runs from there.

use serde::Serialize;

use showcase_animation::{Debouncer, FrameGate, Scheduler};
use showcase_core::{
    AppState, DiagramId, Key, PageEvent, Result, Section, SectionContent, ShowcaseConfig,
};
use showcase_diagram::{DiagramController, DiagramRenderer};
use showcase_dom::{Document, DocumentExt, IconReplacer, NoIcons};

use crate::animation::{AnimationController, AnimationTask};
use crate::chrome::{ChromeTask, NotificationKind, PageChrome};
use crate::navigation::{NavigationController, NAV_LINK_SELECTOR};
use crate::optimizations::PerformanceOptimizer;

/// Frame step used by [`ShowcaseApp::run_until`]
pub const FRAME_MS: f64 = 16.0;

/// Work deferred on the app scheduler
#[derive(Clone, Debug, PartialEq)]
pub enum Task<E> {
    /// Startup delay elapsed: fade the splash, start the hero entrance
    HideLoadingScreen,
    Chrome(ChromeTask<E>),
    Animation(AnimationTask<E>),
    /// Render a diagram whose section was just shown
    RenderDiagram(DiagramId),
    /// Resizing stopped for the layout debounce window
    LayoutSettled,
    /// Resizing stopped for the diagram debounce window
    DiagramResizeSettled,
}

impl<E> From<ChromeTask<E>> for Task<E> {
    fn from(task: ChromeTask<E>) -> Self {
        Task::Chrome(task)
    }
}

impl<E> From<AnimationTask<E>> for Task<E> {
    fn from(task: AnimationTask<E>) -> Self {
        Task::Animation(task)
    }
}

/// Serializable summary of the page, for the CLI and snapshots
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub time_ms: f64,
    #[serde(flatten)]
    pub state: AppState,
    pub location_hash: String,
    pub active_sections: Vec<String>,
    pub active_links: Vec<String>,
    pub modal_diagram: Option<String>,
    pub diagrams_rendered: usize,
    pub diagram_fallbacks: usize,
    pub render_all_runs: usize,
    pub running_counters: usize,
    pub pending_timers: usize,
}

/// The showcase page runtime
pub struct ShowcaseApp<D: Document, R> {
    doc: D,
    config: ShowcaseConfig,
    state: AppState,
    icons: Box<dyn IconReplacer<D>>,
    navigation: NavigationController,
    animations: AnimationController<D::Element>,
    diagrams: DiagramController<R>,
    chrome: PageChrome,
    optimizer: PerformanceOptimizer<D::Element>,
    scheduler: Scheduler<Task<D::Element>>,
    scroll_gate: FrameGate,
    pending_scroll_y: f64,
    layout_resize: Debouncer,
    ready: bool,
    unloaded: bool,
}

impl<D, R> ShowcaseApp<D, R>
where
    D: Document,
    R: DiagramRenderer<D>,
{
    /// Build the runtime; reduced motion is read from the document once
    pub fn new(doc: D, renderer: R, config: ShowcaseConfig) -> Self {
        let state = AppState::new(doc.prefers_reduced_motion());
        let animations =
            AnimationController::new(config.animation.clone(), state.animations_enabled);
        let diagrams = DiagramController::new(renderer, config.timing.diagram_resize_debounce_ms);
        let chrome = PageChrome::new(config.chrome.clone(), config.timing.loading_fade_ms);
        let optimizer = PerformanceOptimizer::new(config.preload.clone());
        let layout_resize = Debouncer::new(config.timing.layout_debounce_ms);

        Self {
            doc,
            config,
            state,
            icons: Box::new(NoIcons),
            navigation: NavigationController::new(),
            animations,
            diagrams,
            chrome,
            optimizer,
            scheduler: Scheduler::new(),
            scroll_gate: FrameGate::new(),
            pending_scroll_y: 0.0,
            layout_resize,
            ready: false,
            unloaded: false,
        }
    }

    /// Start the clock at `origin` instead of zero
    ///
    /// Hosts whose frame timestamps come from an already running clock pass
    /// its current reading so startup timers share that time base.
    pub fn with_clock(mut self, origin: f64) -> Self {
        self.scheduler.set_now(origin);
        self
    }

    /// Use an icon library
    pub fn with_icons(mut self, icons: impl IconReplacer<D> + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Mutable document, for backends and headless drivers that change
    /// layout (scrolling, viewport size) behind the runtime's back
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn animations(&self) -> &AnimationController<D::Element> {
        &self.animations
    }

    pub fn diagrams(&self) -> &DiagramController<R> {
        &self.diagrams
    }

    pub fn optimizer(&self) -> &PerformanceOptimizer<D::Element> {
        &self.optimizer
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Feed one page event
    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::DomReady => self.dom_ready(),
            PageEvent::Scroll { y } => {
                self.pending_scroll_y = y;
                self.scroll_gate.request();
            }
            PageEvent::Resize { width, height } => self.on_resize(width, height),
            PageEvent::KeyDown(key) => self.on_key(key),
            PageEvent::PopState { fragment } => {
                let result = self
                    .navigation
                    .on_pop_state(&mut self.doc, &mut self.state, &fragment);
                self.after_navigation(result);
            }
            PageEvent::NavLinkClicked { target } => {
                let result = self
                    .navigation
                    .on_link_clicked(&mut self.doc, &mut self.state, &target);
                self.after_navigation(result);
            }
            PageEvent::NavToggleClicked => self.navigation.toggle_mobile_menu(&mut self.doc),
            PageEvent::BackToTopClicked => self.chrome.scroll_to_top(&mut self.doc),
            PageEvent::ModalBackdropClicked | PageEvent::CloseDiagramModal => {
                self.diagrams.close(&mut self.doc)
            }
            PageEvent::EnlargeDiagram { element_id } => {
                if let Err(e) = self.diagrams.enlarge(&mut self.doc, &element_id) {
                    tracing::debug!("enlarge '{}' skipped: {}", element_id, e);
                }
            }
            PageEvent::Unload => self.unload(),
            PageEvent::ScriptError { message } => {
                tracing::error!("script error: {}", message);
            }
            PageEvent::UnhandledRejection { reason } => {
                tracing::error!("unhandled promise rejection: {}", reason);
            }
        }
    }

    /// Startup sequence, run once
    fn dom_ready(&mut self) {
        if self.ready {
            tracing::debug!("duplicate DOM ready ignored");
            return;
        }
        self.ready = true;
        tracing::info!("showcase page initializing");
        let now = self.scheduler.now();

        match self.icons.replace(&mut self.doc) {
            Ok(count) => tracing::debug!("icons replaced: {}", count),
            Err(e) => tracing::warn!("icon replacement failed: {}", e),
        }

        self.state.current_section = Section::Home.id().to_string();
        self.navigation.initialize(&mut self.doc);
        self.animations.initialize(&mut self.doc, now);
        self.diagrams.initialize::<D>();
        self.animations.trigger_scroll_animations(&mut self.doc);
        self.animations.sample_observers(&mut self.doc, now);
        self.optimizer.initialize(&mut self.doc);

        let restored = self
            .navigation
            .restore_from_fragment(&mut self.doc, &mut self.state);
        self.after_navigation(restored);

        self.scheduler
            .set_timeout(self.config.timing.loading_delay_ms, Task::HideLoadingScreen);
        tracing::info!("application initialized");
    }

    fn on_resize(&mut self, width: f64, height: f64) {
        tracing::debug!("resize to {}x{}", width, height);
        self.layout_resize
            .trigger(&mut self.scheduler, Task::LayoutSettled);
        self.diagrams
            .schedule_resize(&mut self.scheduler, Task::DiagramResizeSettled);
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                self.navigation.close_mobile_menu(&mut self.doc);
                self.diagrams.close(&mut self.doc);
            }
            Key::Digit(_) => {
                if let Some(section) = key.section() {
                    if let Err(e) = self.navigate_to(section.id()) {
                        tracing::debug!("shortcut to '{}' skipped: {}", section.id(), e);
                    }
                }
            }
            Key::Other(_) => {}
        }
    }

    fn unload(&mut self) {
        if self.unloaded {
            return;
        }
        self.unloaded = true;
        self.animations.cleanup();
        self.optimizer.disconnect();
        tracing::debug!("page unloading");
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show a section by id and initialize its content
    pub fn navigate_to(&mut self, id: &str) -> Result<()> {
        let content = self
            .navigation
            .activate(&mut self.doc, &mut self.state, id)?;
        if let Some(content) = content {
            self.initialize_section_content(content);
        }
        Ok(())
    }

    fn after_navigation(&mut self, result: Result<Option<SectionContent>>) {
        match result {
            Ok(Some(content)) => self.initialize_section_content(content),
            Ok(None) => {}
            Err(e) => tracing::debug!("navigation abandoned: {}", e),
        }
    }

    fn initialize_section_content(&mut self, content: SectionContent) {
        match content {
            SectionContent::None => {}
            SectionContent::Diagram(id) => {
                self.scheduler.set_timeout(
                    self.config.timing.diagram_render_delay_ms,
                    Task::RenderDiagram(id),
                );
            }
            SectionContent::MetricsBars => self
                .animations
                .initialize_metrics_animations(&mut self.scheduler),
            SectionContent::ValueCards => self
                .animations
                .initialize_value_animations(&mut self.doc, &mut self.scheduler),
        }
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance to `now`: due timers, then pending scroll work, then counters
    pub fn frame(&mut self, now: f64) {
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run_task(task);
        }
        self.scheduler.set_now(now);

        if self.scroll_gate.take() {
            self.scroll_frame(now);
        }
        self.animations.tick(&mut self.doc, now);
    }

    /// Step frames until `until` (headless driving)
    pub fn run_until(&mut self, until: f64) {
        let mut now = self.scheduler.now();
        loop {
            now = (now + FRAME_MS).min(until);
            self.frame(now);
            if now >= until {
                break;
            }
        }
    }

    fn scroll_frame(&mut self, now: f64) {
        let y = self.pending_scroll_y;
        self.state.set_scroll_position(y);
        self.chrome.update_navigation_scroll(&mut self.doc, y);
        self.chrome.update_back_to_top(&mut self.doc, y);
        self.animations.trigger_scroll_animations(&mut self.doc);
        self.animations.sample_observers(&mut self.doc, now);
        self.optimizer.sample(&mut self.doc);
    }

    fn run_task(&mut self, task: Task<D::Element>) {
        match task {
            Task::HideLoadingScreen => {
                if !self
                    .chrome
                    .hide_loading_screen(&mut self.doc, &mut self.scheduler)
                {
                    self.state.finish_loading();
                }
                self.animations
                    .trigger_home_animations(&mut self.doc, &mut self.scheduler);
            }
            Task::Chrome(task) => {
                self.chrome
                    .run_task(&mut self.doc, &mut self.scheduler, &mut self.state, task)
            }
            Task::Animation(task) => {
                self.animations
                    .run_task(&mut self.doc, &mut self.scheduler, task)
            }
            Task::RenderDiagram(id) => {
                if let Err(e) = self
                    .diagrams
                    .render(&mut self.doc, id.as_str(), &id.container_id())
                {
                    tracing::debug!("deferred render of '{}' skipped: {}", id, e);
                }
            }
            Task::LayoutSettled => {
                if self.layout_resize.fired() {
                    let now = self.scheduler.now();
                    self.animations.sample_observers(&mut self.doc, now);
                    self.optimizer.sample(&mut self.doc);
                    tracing::info!("responsive layout adjusted");
                }
            }
            Task::DiagramResizeSettled => {
                self.diagrams.resize_settled(&mut self.doc);
            }
        }
    }

    // =========================================================================
    // Page-facing helpers
    // =========================================================================

    /// Show a toast
    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> Option<D::Element> {
        self.chrome
            .show_notification(&mut self.doc, &mut self.scheduler, message, kind)
    }

    /// A toast's close button was clicked
    pub fn dismiss_notification(&mut self, toast: &D::Element) {
        self.chrome
            .hide_notification(&mut self.doc, &mut self.scheduler, toast);
    }

    pub fn pulse(&mut self, element: &D::Element) {
        self.animations
            .pulse(&mut self.doc, &mut self.scheduler, element);
    }

    pub fn shake(&mut self, element: &D::Element) {
        self.animations
            .shake(&mut self.doc, &mut self.scheduler, element);
    }

    /// Summarize the page state
    pub fn snapshot(&self) -> PageSnapshot {
        let ids_with_active = |selector: &str, attribute: &str| -> Vec<String> {
            self.doc
                .query_all(selector)
                .unwrap_or_default()
                .iter()
                .filter(|e| self.doc.has_class(e, "active"))
                .filter_map(|e| self.doc.attribute(e, attribute))
                .collect()
        };
        let stats = self.diagrams.stats();

        PageSnapshot {
            time_ms: self.scheduler.now(),
            state: self.state.clone(),
            location_hash: self.doc.location_hash(),
            active_sections: ids_with_active(".section", "id"),
            active_links: ids_with_active(NAV_LINK_SELECTOR, "data-target"),
            modal_diagram: self.diagrams.modal_diagram().map(|d| d.as_str().to_string()),
            diagrams_rendered: stats.rendered,
            diagram_fallbacks: stats.fallbacks,
            render_all_runs: stats.render_all_runs,
            running_counters: self.animations.running_counters(),
            pending_timers: self.scheduler.pending(),
        }
    }
}
