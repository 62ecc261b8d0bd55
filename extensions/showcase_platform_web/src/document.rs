//! Browser document backed by `web-sys`

use showcase_core::{Rect, ShowcaseError, Viewport};
use showcase_dom::{Document, ScrollBehavior, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Element, HtmlElement, ScrollToOptions, Window};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// The live page document
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    /// Handed out when element creation fails so callers keep a valid handle
    scratch: Element,
}

impl WebDocument {
    /// Wrap the current window's document
    pub fn new() -> Result<Self, ShowcaseError> {
        let window =
            web_sys::window().ok_or_else(|| ShowcaseError::Other("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ShowcaseError::Other("no document".to_string()))?;
        let scratch = document
            .create_element("div")
            .map_err(|e| ShowcaseError::Other(describe(&e)))?;

        Ok(Self {
            window,
            document,
            scratch,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }

    /// True once the document has finished parsing
    pub fn is_parsed(&self) -> bool {
        self.document.ready_state() != "loading"
    }

    fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
        element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
    }
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn warn_on_err(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!("{} failed: {}", op, describe(&e));
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector.as_str()) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("querySelectorAll('{}') failed: {}", selector, describe(&e));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_selector(&self, selector: &Selector) -> Option<Element> {
        self.document
            .query_selector(selector.as_str())
            .ok()
            .flatten()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn head(&self) -> Option<Element> {
        self.document.head().map(Element::from)
    }

    fn create_element(&mut self, tag: &str) -> Element {
        match self.document.create_element(tag) {
            Ok(element) => element,
            Err(e) => {
                tracing::error!("createElement('{}') failed: {}", tag, describe(&e));
                self.scratch.clone()
            }
        }
    }

    fn append_child(&mut self, parent: &Element, child: &Element) {
        warn_on_err("appendChild", parent.append_child(child).map(drop));
    }

    fn remove(&mut self, element: &Element) {
        element.remove();
    }

    fn clear_children(&mut self, element: &Element) {
        element.set_inner_html("");
    }

    fn children(&self, element: &Element) -> Vec<Element> {
        let collection = element.children();
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name().to_ascii_lowercase()
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        warn_on_err("classList.add", element.class_list().add_1(class));
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        warn_on_err("classList.remove", element.class_list().remove_1(class));
    }

    fn toggle_class(&mut self, element: &Element, class: &str) -> bool {
        match element.class_list().toggle(class) {
            Ok(present) => present,
            Err(e) => {
                tracing::warn!("classList.toggle failed: {}", describe(&e));
                self.has_class(element, class)
            }
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        warn_on_err("setAttribute", element.set_attribute(name, value));
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) {
        warn_on_err("removeAttribute", element.remove_attribute(name));
    }

    fn text_content(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text_content(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn style(&self, element: &Element, property: &str) -> Option<String> {
        Self::style_of(element)
            .and_then(|style| style.get_property_value(property).ok())
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        if let Some(style) = Self::style_of(element) {
            warn_on_err("style.setProperty", style.set_property(property, value));
        }
    }

    fn remove_style(&mut self, element: &Element, property: &str) {
        if let Some(style) = Self::style_of(element) {
            warn_on_err("style.removeProperty", style.remove_property(property).map(drop));
        }
    }

    fn force_reflow(&mut self, element: &Element) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            // Reading layout flushes pending style changes
            let _ = html.offset_height();
        }
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        // No layout boxes: `display: none` or detached
        if element.get_client_rects().length() == 0 {
            return Rect::default();
        }
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn location_hash(&self) -> String {
        self.window
            .location()
            .hash()
            .map(|hash| hash.trim_start_matches('#').to_string())
            .unwrap_or_default()
    }

    fn set_location_hash(&mut self, fragment: &str) {
        warn_on_err("location.hash", self.window.location().set_hash(fragment));
    }

    fn prefers_reduced_motion(&self) -> bool {
        matches!(
            self.window.match_media(REDUCED_MOTION_QUERY),
            Ok(Some(query)) if query.matches()
        )
    }
}
