//! End-to-end behavior of the page runtime on the reference page

use showcase_core::{Key, PageEvent, Rect, Section, ShowcaseConfig, ShowcaseError};
use showcase_diagram::{DiagramController, HeadlessRenderer};
use showcase_dom::{Document, DocumentExt, HeadlessDocument, InlineIcons, ScrollBehavior};

use crate::app::{ShowcaseApp, FRAME_MS};
use crate::chrome::NotificationKind;
use crate::fixture::reference_page;

type App = ShowcaseApp<HeadlessDocument, HeadlessRenderer>;

fn app_for(doc: HeadlessDocument) -> App {
    ShowcaseApp::new(doc, HeadlessRenderer::new(), ShowcaseConfig::default())
        .with_icons(InlineIcons)
}

fn boot(doc: HeadlessDocument) -> App {
    let mut app = app_for(doc);
    app.handle(PageEvent::DomReady);
    app
}

fn booted() -> App {
    boot(reference_page())
}

fn key(app: &mut App, key: &str) {
    app.handle(PageEvent::KeyDown(Key::from_dom_key(key)));
}

/// Scroll the window and let one frame run
fn scroll(app: &mut App, y: f64) {
    app.document_mut().scroll_to(y, ScrollBehavior::Instant);
    app.handle(PageEvent::Scroll { y });
    let next = app.now() + FRAME_MS;
    app.frame(next);
}

fn stat_texts(app: &App) -> Vec<String> {
    let doc = app.document();
    doc.query_all(".stat-number")
        .unwrap()
        .iter()
        .map(|e| doc.text_content(e))
        .collect()
}

fn by_id(app: &App, id: &str) -> showcase_dom::NodeId {
    app.document().element_by_id(id).unwrap()
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_every_section_leaves_one_active() {
    let mut app = booted();
    for section in Section::ALL.iter().rev() {
        app.navigate_to(section.id()).unwrap();
        let snapshot = app.snapshot();
        assert_eq!(snapshot.active_sections, vec![section.id()]);
        assert_eq!(snapshot.active_links, vec![section.id()]);
        assert_eq!(snapshot.location_hash, section.id());
        assert_eq!(app.state().current_section, section.id());
    }
}

#[test]
fn test_reactivation_is_noop() {
    let mut app = booted();
    app.navigate_to("algorithm").unwrap();
    let history = app.document().hash_history().len();
    let timers = app.pending_timers();

    app.navigate_to("algorithm").unwrap();
    assert_eq!(app.document().hash_history().len(), history);
    assert_eq!(app.pending_timers(), timers);
}

#[test]
fn test_digit_shortcut_is_idempotent() {
    let mut app = booted();
    key(&mut app, "3");
    assert_eq!(app.state().current_section, "performance");
    let timers = app.pending_timers();
    let history = app.document().hash_history().len();

    key(&mut app, "3");
    assert_eq!(app.state().current_section, "performance");
    assert_eq!(app.pending_timers(), timers);
    assert_eq!(app.document().hash_history().len(), history);

    let now = app.now();
    app.run_until(now + 100.0);
    let container = by_id(&app, "performanceDiagram");
    assert!(!app.document().children(&container).is_empty());
    assert_eq!(app.diagrams().stats().rendered, 1);
}

#[test]
fn test_unmapped_keys_do_nothing() {
    let mut app = booted();
    let before = app.snapshot();
    key(&mut app, "8");
    key(&mut app, "0");
    key(&mut app, "a");
    assert_eq!(app.snapshot(), before);
}

#[test]
fn test_fragment_restored_at_load() {
    let mut app = boot(reference_page().with_hash("algorithm"));
    assert_eq!(app.state().current_section, "algorithm");

    app.run_until(100.0);
    let container = by_id(&app, "algorithmDiagram");
    let summary = app.document().query("svg.diagram-summary").unwrap().unwrap();
    assert_eq!(app.document().children(&container).len(), 1);
    assert_eq!(
        app.document().attribute(&summary, "data-kind").as_deref(),
        Some("flowchart")
    );
}

#[test]
fn test_pop_state_follows_fragment() {
    let mut app = booted();
    app.handle(PageEvent::PopState {
        fragment: "metrics".to_string(),
    });
    assert_eq!(app.state().current_section, "metrics");

    // Fragments naming nothing are ignored
    app.handle(PageEvent::PopState {
        fragment: "nowhere".to_string(),
    });
    assert_eq!(app.state().current_section, "metrics");
    assert_eq!(app.snapshot().active_sections, vec!["metrics"]);
}

#[test]
fn test_nav_link_click_runs_value_sequence() {
    let mut app = booted();
    app.handle(PageEvent::NavToggleClicked);
    let menu = by_id(&app, "navMenu");
    assert!(app.document().has_class(&menu, "active"));

    app.handle(PageEvent::NavLinkClicked {
        target: "value".to_string(),
    });
    assert!(!app.document().has_class(&menu, "active"));

    let now = app.now();
    app.run_until(now + 500.0);
    let doc = app.document();
    for card in doc.query_all(".value-card, .tech-card").unwrap() {
        assert_eq!(doc.style(&card, "opacity").as_deref(), Some("1"));
    }
}

#[test]
fn test_escape_closes_menu() {
    let mut app = booted();
    app.handle(PageEvent::NavToggleClicked);
    key(&mut app, "Escape");
    let menu = by_id(&app, "navMenu");
    let toggle = by_id(&app, "navToggle");
    assert!(!app.document().has_class(&menu, "active"));
    assert!(!app.document().has_class(&toggle, "active"));
}

// =============================================================================
// Counters and entrance animations
// =============================================================================

#[test]
fn test_counters_end_on_their_text() {
    let mut app = booted();
    app.run_until(750.0);
    assert_ne!(stat_texts(&app)[0], "85%");

    app.run_until(1500.0);
    assert_eq!(stat_texts(&app), vec!["85%", ">100%", "<3秒", "7"]);
}

#[test]
fn test_hero_entrance_after_splash() {
    let mut app = booted();
    let title = app.document().query(".hero-title").unwrap().unwrap();

    app.run_until(1499.0);
    assert_eq!(app.document().style(&title, "opacity"), None);

    app.run_until(1500.0);
    assert_eq!(app.document().style(&title, "opacity").as_deref(), Some("0"));

    app.run_until(1700.0);
    assert_eq!(app.document().style(&title, "opacity").as_deref(), Some("1"));
}

#[test]
fn test_first_frame_long_after_start() {
    // Frame timestamps from a page clock that was already running
    let mut app = app_for(reference_page()).with_clock(5000.0);
    app.handle(PageEvent::DomReady);
    let splash = by_id(&app, "loading-screen");
    let title = app.document().query(".hero-title").unwrap().unwrap();

    app.frame(5000.0 + FRAME_MS);
    assert!(!app.document().has_class(&splash, "hidden"));
    assert_eq!(app.document().style(&title, "opacity"), None);
    assert!(app.state().is_loading);

    app.run_until(6499.0);
    assert!(!app.document().has_class(&splash, "hidden"));
    app.run_until(6500.0);
    assert!(app.document().has_class(&splash, "hidden"));
    app.run_until(6700.0);
    assert_eq!(app.document().style(&title, "opacity").as_deref(), Some("1"));
}

#[test]
fn test_frames_before_ready_move_the_origin() {
    let mut app = app_for(reference_page());
    app.frame(8000.0);
    app.handle(PageEvent::DomReady);
    let splash = by_id(&app, "loading-screen");

    app.frame(8000.0 + FRAME_MS);
    assert!(!app.document().has_class(&splash, "hidden"));
    app.run_until(9500.0);
    assert!(app.document().has_class(&splash, "hidden"));
}

#[test]
fn test_reduced_motion_disables_animations() {
    let mut app = boot(reference_page().with_reduced_motion(true));
    assert!(!app.state().animations_enabled);

    app.run_until(3000.0);
    key(&mut app, "6");
    let now = app.now();
    app.run_until(now + 2000.0);

    let doc = app.document();
    assert_eq!(stat_texts(&app), vec!["85%", "100+", "<3秒", "7"]);
    let title = doc.query(".hero-title").unwrap().unwrap();
    assert_eq!(doc.style(&title, "opacity"), None);
    for bar in doc.query_all(".progress-bar").unwrap() {
        assert_eq!(doc.style(&bar, "transition"), None);
    }
    assert!(!app.state().is_loading);
}

// =============================================================================
// Diagrams
// =============================================================================

#[test]
fn test_missing_container_leaves_document_untouched() {
    let mut doc = reference_page();
    let before = doc.to_html();
    let mut diagrams = DiagramController::new(HeadlessRenderer::new(), 500);
    diagrams.initialize::<HeadlessDocument>();

    let err = diagrams
        .render(&mut doc, "architecture", "missing-container")
        .unwrap_err();
    assert_eq!(err, ShowcaseError::ContainerNotFound("missing-container".into()));
    assert_eq!(doc.to_html(), before);
}

#[test]
fn test_resize_burst_renders_once() {
    let mut app = booted();
    app.run_until(2000.0);
    let start = app.now();

    for i in 1..=5 {
        app.handle(PageEvent::Resize {
            width: 1000.0 + i as f64,
            height: 800.0,
        });
        app.run_until(start + 100.0 * i as f64);
    }
    // Last resize was handled at start + 400
    app.run_until(start + 899.0);
    assert_eq!(app.diagrams().stats().render_all_runs, 0);

    app.run_until(start + 900.0);
    assert_eq!(app.diagrams().stats().render_all_runs, 1);
    assert_eq!(app.diagrams().stats().rendered, 4);

    app.run_until(start + 3000.0);
    assert_eq!(app.diagrams().stats().render_all_runs, 1);
}

#[test]
fn test_failed_actions_leave_page_unchanged() {
    let mut app = booted();
    let before = app.snapshot();
    app.handle(PageEvent::EnlargeDiagram {
        element_id: "noSuchDiagram".to_string(),
    });
    assert_eq!(app.snapshot(), before);

    // Deferred render whose container went away meanwhile
    app.navigate_to("algorithm").unwrap();
    let container = by_id(&app, "algorithmDiagram");
    app.document_mut().remove(&container);
    let now = app.now();
    app.run_until(now + 1000.0);
    assert_eq!(app.diagrams().stats().rendered, 0);

    // Shortcut to a section the page does not have
    let mut bare = boot(HeadlessDocument::new());
    key(&mut bare, "2");
    assert_eq!(bare.state().current_section, "home");
}

#[test]
fn test_modal_close_restores_scroll() {
    let mut app = booted();
    app.handle(PageEvent::EnlargeDiagram {
        element_id: "architectureDiagram".to_string(),
    });

    let modal = by_id(&app, "diagramModal");
    let content = by_id(&app, "modalDiagramContent");
    let body = app.document().body().unwrap();
    assert!(app.document().has_class(&modal, "active"));
    assert!(app.document().has_class(&modal, "architecture-diagram"));
    assert_eq!(app.document().style(&body, "overflow").as_deref(), Some("hidden"));
    assert!(!app.document().children(&content).is_empty());

    key(&mut app, "Escape");
    assert!(!app.document().has_class(&modal, "active"));
    assert!(app.document().children(&content).is_empty());
    assert_eq!(app.document().style(&body, "overflow"), None);
    assert_eq!(app.snapshot().modal_diagram, None);

    // Closing again is harmless
    app.handle(PageEvent::ModalBackdropClicked);
    assert!(!app.document().has_class(&modal, "active"));
}

// =============================================================================
// Chrome and optimizations
// =============================================================================

#[test]
fn test_loading_splash() {
    let mut app = booted();
    let splash = by_id(&app, "loading-screen");

    app.run_until(1499.0);
    assert!(app.state().is_loading);
    assert!(!app.document().has_class(&splash, "hidden"));

    app.run_until(1500.0);
    assert!(app.document().has_class(&splash, "hidden"));
    assert!(app.state().is_loading);

    app.run_until(2000.0);
    assert_eq!(app.document().style(&splash, "display").as_deref(), Some("none"));
    assert!(!app.state().is_loading);
}

#[test]
fn test_missing_splash_still_finishes_loading() {
    let mut app = boot(HeadlessDocument::new());
    app.run_until(1500.0);
    assert!(!app.state().is_loading);
}

#[test]
fn test_scroll_updates_chrome_once_per_frame() {
    let mut app = booted();
    let nav = by_id(&app, "mainNav");
    let back_to_top = by_id(&app, "backToTop");

    app.handle(PageEvent::Scroll { y: 50.0 });
    scroll(&mut app, 400.0);
    assert_eq!(app.state().scroll_position, 400.0);
    assert_eq!(
        app.document().style(&nav, "background").as_deref(),
        Some("rgba(255, 255, 255, 0.98)")
    );
    assert!(app.document().has_class(&back_to_top, "visible"));

    scroll(&mut app, 0.0);
    assert!(!app.document().has_class(&back_to_top, "visible"));
    assert_eq!(app.document().style(&nav, "box-shadow").as_deref(), Some("none"));

    app.handle(PageEvent::BackToTopClicked);
    assert_eq!(app.document().last_scroll_behavior(), Some(ScrollBehavior::Smooth));
}

#[test]
fn test_hidden_elements_wait_until_shown() {
    // Inactive sections are `display: none`: no layout box at all
    let mut doc = reference_page();
    let values = doc.query_all(".metric-value").unwrap();
    for value in &values {
        doc.set_layout_rect(value, Rect::default());
    }
    let texts: Vec<String> = values.iter().map(|v| doc.text_content(v)).collect();
    let image = doc.query("img[data-src]").unwrap().unwrap();
    doc.set_layout_rect(&image, Rect::default());

    let mut app = boot(doc);
    for y in [0.0, 1000.0] {
        scroll(&mut app, y);
        for value in &values {
            assert!(!app.document().has_class(value, "animate"));
            assert_eq!(app.document().attribute(value, "data-animated"), None);
        }
        let now_texts: Vec<String> = values.iter().map(|v| app.document().text_content(v)).collect();
        assert_eq!(now_texts, texts);
        assert_eq!(app.document().attribute(&image, "src"), None);
        assert!(app.document().has_class(&image, "lazy"));
    }

    // Shown again with a real box inside the viewport
    app.document_mut()
        .set_layout_rect(&image, Rect::new(340.0, 1500.0, 600.0, 240.0));
    scroll(&mut app, 1100.0);
    assert_eq!(
        app.document().attribute(&image, "src").as_deref(),
        Some("images/pipeline-overview.png")
    );
}

#[test]
fn test_scrolling_reveals_and_loads() {
    let mut app = booted();
    let image = app.document().query("img[data-src]").unwrap().unwrap();
    let card = app.document().query_all(".feature-card").unwrap()[1];
    assert_eq!(app.document().attribute(&image, "src"), None);
    assert!(!app.document().has_class(&card, "animate"));

    scroll(&mut app, 1000.0);
    assert!(app.document().has_class(&card, "animate"));
    assert_eq!(
        app.document().attribute(&image, "src").as_deref(),
        Some("images/pipeline-overview.png")
    );
    assert!(!app.document().has_class(&image, "lazy"));

    let late = app.document().query_all(".scroll-animation").unwrap()[1];
    assert!(app.document().has_class(&late, "in-view"));
}

#[test]
fn test_startup_wiring() {
    let app = booted();
    let doc = app.document();
    assert_eq!(doc.query_all("link[rel=preload]").unwrap().len(), 3);
    assert!(!doc.query_all("svg.feather").unwrap().is_empty());
    assert!(app.diagrams().is_initialized());
    assert!(app.is_ready());

    let early = doc.query_all(".scroll-animation").unwrap();
    assert!(doc.has_class(&early[0], "in-view"));
    assert!(!doc.has_class(&early[1], "in-view"));
}

#[test]
fn test_duplicate_dom_ready_ignored() {
    let mut app = booted();
    let timers = app.pending_timers();
    let links = app.document().query_all("link[rel=preload]").unwrap().len();

    app.handle(PageEvent::DomReady);
    assert_eq!(app.pending_timers(), timers);
    assert_eq!(app.document().query_all("link[rel=preload]").unwrap().len(), links);
}

#[test]
fn test_notification_lifecycle() {
    let mut app = booted();
    let toast = app.notify("渲染完成", NotificationKind::Success).unwrap();
    let start = app.now();

    app.run_until(start + 100.0);
    assert_eq!(app.document().style(&toast, "opacity").as_deref(), Some("1"));

    app.dismiss_notification(&toast);
    app.run_until(start + 400.0);
    assert!(!app.document().is_connected(&toast));

    app.run_until(start + 6000.0);
    assert!(app.document().query(".notification").unwrap().is_none());
}

#[test]
fn test_errors_are_only_logged() {
    let mut app = booted();
    let before = app.snapshot();
    app.handle(PageEvent::ScriptError {
        message: "boom".to_string(),
    });
    app.handle(PageEvent::UnhandledRejection {
        reason: "nope".to_string(),
    });
    assert_eq!(app.snapshot(), before);
}

#[test]
fn test_unload_disconnects_observers() {
    let mut app = booted();
    assert!(app.animations().observed() > 0);
    app.handle(PageEvent::Unload);
    assert!(app.is_unloaded());
    assert_eq!(app.animations().observed(), 0);
    assert_eq!(app.optimizer().pending_images(), 0);
}

#[test]
fn test_effects() {
    let mut app = booted();
    let card = app.document().query(".feature-card").unwrap().unwrap();
    app.shake(&card);
    assert!(app.document().has_class(&card, "shake"));
    let now = app.now();
    app.run_until(now + 1000.0);
    assert!(!app.document().has_class(&card, "shake"));
}

#[test]
fn test_snapshot_serializes() {
    let app = booted();
    let json = serde_json::to_value(app.snapshot()).unwrap();
    assert_eq!(json["current_section"], "home");
    assert_eq!(json["is_loading"], true);
    assert_eq!(json["active_sections"][0], "home");
}
