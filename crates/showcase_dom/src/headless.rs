//! In-memory document
//!
//! A small DOM good enough to run the page runtime without a browser. Nodes
//! live in a slotmap; layout is not computed, instead tests and fixtures
//! place elements with [`HeadlessDocument::set_layout_rect`] in page
//! coordinates and the document derives viewport-relative boxes from the
//! current scroll offset.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt::Write as _;

use showcase_core::{Rect, Viewport};

use crate::document::{Document, ScrollBehavior};
use crate::selector::{Selector, SelectorTarget};

new_key_type! {
    /// Handle to a node of a [`HeadlessDocument`]
    pub struct NodeId;
}

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    /// Layout box in page coordinates
    rect: Rect,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: SmallVec::new(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            rect: Rect::default(),
        }
    }
}

impl SelectorTarget for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        if name == "class" {
            return None;
        }
        self.attributes.get(name).map(String::as_str)
    }
}

/// In-memory [`Document`] implementation
#[derive(Clone, Debug)]
pub struct HeadlessDocument {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    /// `id` attribute → nodes carrying it, connected or not
    ids: FxHashMap<String, SmallVec<[NodeId; 1]>>,
    viewport: Viewport,
    scroll_y: f64,
    hash: String,
    /// Every fragment written through `set_location_hash`, oldest first
    hash_history: Vec<String>,
    reduced_motion: bool,
    reflow_count: usize,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl HeadlessDocument {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        let head = nodes.insert(Node::new("head"));
        let body = nodes.insert(Node::new("body"));
        nodes[root].children = vec![head, body];
        nodes[head].parent = Some(root);
        nodes[body].parent = Some(root);

        Self {
            nodes,
            root,
            head,
            body,
            ids: FxHashMap::default(),
            viewport: Viewport::default(),
            scroll_y: 0.0,
            hash: String::new(),
            hash_history: Vec::new(),
            reduced_motion: false,
            reflow_count: 0,
            last_scroll_behavior: None,
        }
    }

    /// Start with a URL fragment (as if loaded from `page#fragment`)
    pub fn with_hash(mut self, fragment: &str) -> Self {
        self.hash = fragment.trim_start_matches('#').to_string();
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Place an element in page coordinates
    pub fn set_layout_rect(&mut self, element: &NodeId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.rect = rect;
        }
    }

    /// Change the fragment without recording it (the user edited the URL)
    pub fn replace_hash(&mut self, fragment: &str) {
        self.hash = fragment.trim_start_matches('#').to_string();
    }

    pub fn hash_history(&self) -> &[String] {
        &self.hash_history
    }

    /// Number of `force_reflow` calls so far
    pub fn reflow_count(&self) -> usize {
        self.reflow_count
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    /// Number of live nodes, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Serialized inline `style` attribute
    pub fn style_attribute(&self, element: &NodeId) -> String {
        self.nodes
            .get(*element)
            .map(|node| {
                node.styles
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default()
    }

    /// Serialize the tree under `<html>` for snapshots and debugging
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, 0, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, node.tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", node.classes.join(" "));
        }
        if !node.styles.is_empty() {
            let _ = write!(out, " style=\"{}\"", escape(&self.style_attribute(&id)));
        }
        out.push('>');

        if node.children.is_empty() {
            let _ = writeln!(out, "{}</{}>", escape(&node.text), node.tag);
            return;
        }

        out.push('\n');
        if !node.text.is_empty() {
            let _ = writeln!(out, "{}  {}", indent, escape(&node.text));
        }
        for child in &node.children {
            self.write_node(*child, depth + 1, out);
        }
        let _ = writeln!(out, "{}</{}>", indent, node.tag);
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn index_id(&mut self, node: NodeId, id: &str) {
        let entry = self.ids.entry(id.to_string()).or_default();
        if !entry.contains(&node) {
            entry.push(node);
        }
    }

    fn unindex_id(&mut self, node: NodeId, id: &str) {
        if let Some(entry) = self.ids.get_mut(id) {
            entry.retain(|n| *n != node);
            if entry.is_empty() {
                self.ids.remove(id);
            }
        }
    }

    fn drop_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            if let Some(element_id) = node.attributes.get("id") {
                self.unindex_id(id, element_id);
            }
            for child in node.children {
                self.drop_subtree(child);
            }
        }
    }

    /// Depth-first pre-order walk from the root (document order)
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.nodes.get(id) {
            out.push_str(&node.text);
            for child in &node.children {
                self.collect_text(*child, out);
            }
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Document for HeadlessDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates: SmallVec<[NodeId; 1]> = self
            .ids
            .get(id)?
            .iter()
            .copied()
            .filter(|n| self.is_connected(n))
            .collect();

        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            // Duplicate ids: first in document order wins
            _ => self.walk().into_iter().find(|n| candidates.contains(n)),
        }
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|n| *n != self.root && selector.matches(&self.nodes[*n]))
            .collect()
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if !self.nodes.contains_key(*parent) || !self.nodes.contains_key(*child) {
            return;
        }
        self.detach(*child);
        self.nodes[*child].parent = Some(*parent);
        self.nodes[*parent].children.push(*child);
    }

    fn remove(&mut self, element: &NodeId) {
        if *element == self.root {
            return;
        }
        self.detach(*element);
        self.drop_subtree(*element);
    }

    fn clear_children(&mut self, element: &NodeId) {
        let Some(node) = self.nodes.get_mut(*element) else {
            return;
        };
        node.text.clear();
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.drop_subtree(child);
        }
    }

    fn children(&self, element: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(*element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        let mut current = Some(*element);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.nodes
            .get(*element)
            .map(|n| n.tag.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes
            .get(*element)
            .is_some_and(|n| SelectorTarget::has_class(n, class))
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&mut self, element: &NodeId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            self.has_class(element, class)
        }
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let node = self.nodes.get(*element)?;
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(*element) else {
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        let previous = node.attributes.insert(name.to_string(), value.to_string());
        if name == "id" {
            if let Some(previous) = previous {
                self.unindex_id(*element, &previous);
            }
            self.index_id(*element, value);
        }
    }

    fn remove_attribute(&mut self, element: &NodeId, name: &str) {
        let Some(node) = self.nodes.get_mut(*element) else {
            return;
        };
        if name == "class" {
            node.classes.clear();
            return;
        }
        if let Some(previous) = node.attributes.shift_remove(name) {
            if name == "id" {
                self.unindex_id(*element, &previous);
            }
        }
    }

    fn text_content(&self, element: &NodeId) -> String {
        let mut out = String::new();
        self.collect_text(*element, &mut out);
        out
    }

    fn set_text_content(&mut self, element: &NodeId, text: &str) {
        if !self.nodes.contains_key(*element) {
            return;
        }
        self.clear_children(element);
        self.nodes[*element].text = text.to_string();
    }

    fn style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.nodes.get(*element)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            if value.is_empty() {
                node.styles.shift_remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn remove_style(&mut self, element: &NodeId, property: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.styles.shift_remove(property);
        }
    }

    fn force_reflow(&mut self, _element: &NodeId) {
        self.reflow_count += 1;
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.nodes
            .get(*element)
            .map(|n| n.rect.offset_y(-self.scroll_y))
            .unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.scroll_y = y.max(0.0);
        self.last_scroll_behavior = Some(behavior);
    }

    fn location_hash(&self) -> String {
        self.hash.clone()
    }

    fn set_location_hash(&mut self, fragment: &str) {
        self.hash = fragment.trim_start_matches('#').to_string();
        self.hash_history.push(self.hash.clone());
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentExt;

    fn doc_with_sections() -> (HeadlessDocument, NodeId, NodeId) {
        let mut doc = HeadlessDocument::new();
        let body = doc.body().unwrap();
        let home = doc.create_with_classes("section", &["section", "active"]);
        doc.set_attribute(&home, "id", "home");
        let value = doc.create_with_classes("section", &["section"]);
        doc.set_attribute(&value, "id", "value");
        doc.append_child(&body, &home);
        doc.append_child(&body, &value);
        (doc, home, value)
    }

    #[test]
    fn test_lookup_and_query() {
        let (doc, home, value) = doc_with_sections();
        assert_eq!(doc.element_by_id("home"), Some(home));
        assert_eq!(doc.element_by_id("missing"), None);
        assert_eq!(doc.query_all(".section").unwrap(), vec![home, value]);
        assert_eq!(doc.query(".active").unwrap(), Some(home));
    }

    #[test]
    fn test_detached_elements_are_not_found() {
        let (mut doc, home, _) = doc_with_sections();
        let badge = doc.create_element("span");
        doc.append_child(&home, &badge);

        let before = doc.node_count();
        doc.remove(&home);
        assert_eq!(doc.node_count(), before - 2);
        assert!(!doc.is_connected(&home));
        assert!(!doc.is_connected(&badge));
        assert_eq!(doc.element_by_id("home"), None);
        assert_eq!(doc.query_all(".section").unwrap().len(), 1);

        // Removed nodes are freed; later mutations are no-ops
        doc.add_class(&home, "x");
        assert!(!doc.has_class(&home, "x"));
        doc.remove(&home);
        assert_eq!(doc.node_count(), before - 2);
    }

    #[test]
    fn test_text_and_clear() {
        let (mut doc, home, _) = doc_with_sections();
        let p = doc.create_element("p");
        doc.set_text_content(&p, "hello ");
        let span = doc.create_element("span");
        doc.set_text_content(&span, "world");
        doc.append_child(&home, &p);
        doc.append_child(&home, &span);
        assert_eq!(doc.text_content(&home), "hello world");

        let before = doc.node_count();
        doc.clear_children(&home);
        assert!(doc.children(&home).is_empty());
        assert_eq!(doc.node_count(), before - 2);
        assert_eq!(doc.text_content(&home), "");
    }

    #[test]
    fn test_classes_and_styles() {
        let (mut doc, home, _) = doc_with_sections();
        assert!(!doc.toggle_class(&home, "active"));
        assert!(doc.toggle_class(&home, "active"));
        assert_eq!(doc.attribute(&home, "class").as_deref(), Some("section active"));

        doc.set_style(&home, "opacity", "0");
        doc.set_style(&home, "transform", "translateY(30px)");
        assert_eq!(
            doc.style_attribute(&home),
            "opacity: 0; transform: translateY(30px)"
        );
        doc.set_style(&home, "opacity", "");
        assert_eq!(doc.style(&home, "opacity"), None);
    }

    #[test]
    fn test_scroll_moves_bounding_rect() {
        let (mut doc, home, _) = doc_with_sections();
        doc.set_layout_rect(&home, Rect::new(0.0, 1200.0, 800.0, 400.0));
        assert_eq!(doc.bounding_rect(&home).y, 1200.0);
        doc.scroll_to(1000.0, ScrollBehavior::Smooth);
        assert_eq!(doc.bounding_rect(&home).y, 200.0);
        assert_eq!(doc.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
    }

    #[test]
    fn test_id_index_follows_attribute_changes() {
        let (mut doc, home, value) = doc_with_sections();
        doc.set_attribute(&home, "id", "start");
        assert_eq!(doc.element_by_id("home"), None);
        assert_eq!(doc.element_by_id("start"), Some(home));

        // Duplicate ids resolve in document order
        doc.set_attribute(&value, "id", "start");
        assert_eq!(doc.element_by_id("start"), Some(home));
        doc.remove_attribute(&home, "id");
        assert_eq!(doc.element_by_id("start"), Some(value));

        let body = doc.body().unwrap();
        doc.clear_children(&body);
        assert_eq!(doc.element_by_id("start"), None);
    }

    #[test]
    fn test_hash_history() {
        let mut doc = HeadlessDocument::new().with_hash("#metrics");
        assert_eq!(doc.location_hash(), "metrics");
        doc.set_location_hash("value");
        doc.replace_hash("home");
        assert_eq!(doc.location_hash(), "home");
        assert_eq!(doc.hash_history(), ["value".to_string()]);
    }

    #[test]
    fn test_to_html() {
        let (doc, _, _) = doc_with_sections();
        let html = doc.to_html();
        assert!(html.contains("<section id=\"home\" class=\"section active\"></section>"));
    }
}
