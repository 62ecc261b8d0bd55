//! Document trait

use std::fmt;

use showcase_core::{Rect, Result, Viewport};

use crate::selector::Selector;

/// How `scroll_to` moves the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately
    #[default]
    Instant,
    /// Animate the scroll
    Smooth,
}

/// DOM abstraction
///
/// Backends implement this trait over a real browser document or an
/// in-memory tree. Operations on elements that are no longer part of the
/// backend's storage are silent no-ops, mirroring how the browser treats
/// detached nodes.
pub trait Document {
    /// Element handle type
    type Element: Clone + PartialEq + fmt::Debug;

    // =========================================================================
    // Lookup
    // =========================================================================

    /// First connected element with this id
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All connected elements matching the selector, in document order
    fn query_selector_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// First connected element matching the selector
    fn query_selector(&self, selector: &Selector) -> Option<Self::Element> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn body(&self) -> Option<Self::Element>;

    fn head(&self) -> Option<Self::Element>;

    // =========================================================================
    // Tree
    // =========================================================================

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Self::Element;

    /// Append `child` to `parent`, moving it if it already has a parent
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Detach an element from its parent
    fn remove(&mut self, element: &Self::Element);

    /// Drop every child (the `innerHTML = ''` idiom)
    fn clear_children(&mut self, element: &Self::Element);

    fn children(&self, element: &Self::Element) -> Vec<Self::Element>;

    /// True when the element is reachable from the document root
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Lowercase tag name
    fn tag_name(&self, element: &Self::Element) -> String;

    // =========================================================================
    // Classes, attributes, text
    // =========================================================================

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    /// Toggle a class; returns whether it is now present
    fn toggle_class(&mut self, element: &Self::Element, class: &str) -> bool;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Concatenated text of the element and its descendants
    fn text_content(&self, element: &Self::Element) -> String;

    /// Replace all content with a single text run
    fn set_text_content(&mut self, element: &Self::Element, text: &str);

    // =========================================================================
    // Inline style
    // =========================================================================

    /// Inline style property, `None` when unset
    fn style(&self, element: &Self::Element, property: &str) -> Option<String>;

    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    fn remove_style(&mut self, element: &Self::Element, property: &str);

    /// Flush pending style changes so the next change starts a transition
    fn force_reflow(&mut self, _element: &Self::Element) {}

    // =========================================================================
    // Window
    // =========================================================================

    /// Element box relative to the viewport
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn viewport(&self) -> Viewport;

    fn scroll_y(&self) -> f64;

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    /// URL fragment without the leading `#`
    fn location_hash(&self) -> String;

    fn set_location_hash(&mut self, fragment: &str);

    /// `(prefers-reduced-motion: reduce)` media query
    fn prefers_reduced_motion(&self) -> bool;
}

/// Convenience helpers for every [`Document`]
pub trait DocumentExt: Document {
    /// Parse `selector` and return all matches
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector_all(&selector))
    }

    /// Parse `selector` and return the first match
    fn query(&self, selector: &str) -> Result<Option<Self::Element>> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector(&selector))
    }

    /// The element's `id` attribute
    fn element_id(&self, element: &Self::Element) -> Option<String> {
        self.attribute(element, "id")
    }

    fn remove_classes(&mut self, element: &Self::Element, classes: &[&str]) {
        for class in classes {
            self.remove_class(element, class);
        }
    }

    fn set_styles(&mut self, element: &Self::Element, styles: &[(&str, String)]) {
        for (property, value) in styles {
            self.set_style(element, property, value);
        }
    }

    /// Create `<tag class="...">` with the given classes
    fn create_with_classes(&mut self, tag: &str, classes: &[&str]) -> Self::Element {
        let element = self.create_element(tag);
        for class in classes {
            self.add_class(&element, class);
        }
        element
    }
}

impl<D: Document + ?Sized> DocumentExt for D {}
