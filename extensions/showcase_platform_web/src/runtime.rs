//! Page entry point
//!
//! Wires browser events into [`ShowcaseApp`] and drives its clock from
//! `requestAnimationFrame`. Frame timestamps and the app clock both count
//! from `performance.now()`'s origin. Listeners live as long as the page, so
//! their closures are leaked with `forget`.

use std::cell::RefCell;
use std::rc::Rc;

use showcase_app::ShowcaseApp;
use showcase_core::{Key, PageEvent, ShowcaseConfig};
use showcase_dom::Document as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, ErrorEvent, Event, EventTarget, KeyboardEvent, PromiseRejectionEvent, Window,
};

use crate::document::{describe, WebDocument};
use crate::libraries::{FeatherIcons, MermaidRenderer};

pub type WebApp = ShowcaseApp<WebDocument, MermaidRenderer>;

type SharedApp = Rc<RefCell<WebApp>>;

/// Browser entry point
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    crate::console::init(tracing::Level::INFO);

    let document = WebDocument::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let parsed = document.is_parsed();
    let window = document.window().clone();
    let dom = document.raw().clone();

    let app = ShowcaseApp::new(document, MermaidRenderer::new(), ShowcaseConfig::default())
        .with_icons(FeatherIcons)
        .with_clock(clock_now(&window));
    let app: SharedApp = Rc::new(RefCell::new(app));

    if parsed {
        dispatch(&app, PageEvent::DomReady);
    } else {
        listen(&dom, "DOMContentLoaded", &app, |_, _| Some(PageEvent::DomReady))?;
    }

    listen(&window, "scroll", &app, |app, _| {
        let y = app.document().window().scroll_y().unwrap_or(0.0);
        Some(PageEvent::Scroll { y })
    })?;

    listen(&window, "resize", &app, |app, _| {
        let viewport = app.document().viewport();
        Some(PageEvent::Resize {
            width: viewport.width,
            height: viewport.height,
        })
    })?;

    listen(&dom, "keydown", &app, |_, event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        Some(PageEvent::KeyDown(Key::from_dom_key(&key)))
    })?;

    listen(&window, "popstate", &app, |app, _| {
        let fragment = app.document().location_hash();
        Some(PageEvent::PopState { fragment })
    })?;

    listen(&dom, "click", &app, on_click)?;

    listen(&window, "beforeunload", &app, |_, _| Some(PageEvent::Unload))?;

    listen(&window, "error", &app, |_, event| {
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map(ErrorEvent::message)
            .unwrap_or_else(|| "unknown error".to_string());
        Some(PageEvent::ScriptError { message })
    })?;

    listen(&window, "unhandledrejection", &app, |_, event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|rejection| describe(&rejection.reason()))
            .unwrap_or_default();
        Some(PageEvent::UnhandledRejection { reason })
    })?;

    start_frames(app)?;
    Ok(())
}

/// What a browser event turns into
enum Action {
    Page(PageEvent),
    DismissNotification(Element),
}

impl From<PageEvent> for Action {
    fn from(event: PageEvent) -> Self {
        Action::Page(event)
    }
}

/// Milliseconds on the same time base as animation frame timestamps
fn clock_now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn dispatch(app: &SharedApp, event: PageEvent) {
    perform(app, Action::Page(event));
}

fn perform(app: &SharedApp, action: Action) {
    let Ok(mut app) = app.try_borrow_mut() else {
        tracing::warn!("dropped re-entrant browser event");
        return;
    };
    match action {
        Action::Page(PageEvent::DomReady) => {
            // Startup timers count from when the document became ready
            let now = clock_now(app.document().window());
            app.frame(now);
            app.handle(PageEvent::DomReady);
        }
        Action::Page(event) => app.handle(event),
        Action::DismissNotification(toast) => app.dismiss_notification(&toast),
    }
}

/// Register `translate` for `kind` on `target`
fn listen<F, A>(target: &EventTarget, kind: &str, app: &SharedApp, translate: F) -> Result<(), JsValue>
where
    F: Fn(&WebApp, &Event) -> Option<A> + 'static,
    A: Into<Action>,
{
    let shared = app.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let translated = match shared.try_borrow() {
            Ok(app) => translate(&app, &event),
            Err(_) => return,
        };
        if let Some(action) = translated {
            perform(&shared, action.into());
        }
    });
    target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Delegated click handling for the page's controls
fn on_click(_app: &WebApp, event: &Event) -> Option<Action> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let closest = |selector: &str| target.closest(selector).ok().flatten();

    let page_event = if let Some(link) = closest(".nav-link") {
        event.prevent_default();
        PageEvent::NavLinkClicked {
            target: link.get_attribute("data-target")?,
        }
    } else if closest("#navToggle").is_some() {
        PageEvent::NavToggleClicked
    } else if closest("#backToTop").is_some() {
        PageEvent::BackToTopClicked
    } else if let Some(button) = closest(".diagram-enlarge") {
        PageEvent::EnlargeDiagram {
            element_id: button.get_attribute("data-diagram")?,
        }
    } else if closest(".modal-close").is_some() {
        PageEvent::CloseDiagramModal
    } else if closest(".notification-close").is_some() {
        return closest(".notification").map(Action::DismissNotification);
    } else if target.id() == "diagramModal" {
        PageEvent::ModalBackdropClicked
    } else {
        return None;
    };
    Some(Action::Page(page_event))
}

/// Advance the app clock on every animation frame until unload
fn start_frames(app: SharedApp) -> Result<(), JsValue> {
    let window = app.borrow().document().window().clone();
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let loop_window = window.clone();

    *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let unloaded = match app.try_borrow_mut() {
            Ok(mut app) => {
                app.frame(timestamp);
                app.is_unloaded()
            }
            Err(_) => false,
        };
        if unloaded {
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = loop_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                tracing::error!("requestAnimationFrame failed: {}", describe(&e));
            }
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
