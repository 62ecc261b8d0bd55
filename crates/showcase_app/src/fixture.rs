//! Reference page
//!
//! A headless copy of the showcase page's markup contract with a simple
//! stacked layout: the home section at the top of a 1280x800 viewport and
//! every other section 2000 px further down the page. Used by the tests and
//! by `showcase simulate`.

use showcase_core::{DiagramId, Rect, Section};
use showcase_dom::{Document, HeadlessDocument, NodeId};

const WIDTH: f64 = 1280.0;
const SECTION_HEIGHT: f64 = 1800.0;
const SECTION_SPACING: f64 = 2000.0;

struct PageBuilder {
    doc: HeadlessDocument,
}

impl PageBuilder {
    fn add(&mut self, parent: &NodeId, tag: &str, id: Option<&str>, classes: &[&str]) -> NodeId {
        let element = self.doc.create_element(tag);
        if let Some(id) = id {
            self.doc.set_attribute(&element, "id", id);
        }
        for class in classes {
            self.doc.add_class(&element, class);
        }
        self.doc.append_child(parent, &element);
        element
    }

    fn placed(&mut self, parent: &NodeId, tag: &str, classes: &[&str], rect: Rect) -> NodeId {
        let element = self.add(parent, tag, None, classes);
        self.doc.set_layout_rect(&element, rect);
        element
    }

    fn text(&mut self, parent: &NodeId, tag: &str, classes: &[&str], text: &str, rect: Rect) -> NodeId {
        let element = self.placed(parent, tag, classes, rect);
        self.doc.set_text_content(&element, text);
        element
    }

    fn icon(&mut self, parent: &NodeId, name: &str) {
        let icon = self.add(parent, "i", None, &[]);
        self.doc.set_attribute(&icon, "data-feather", name);
    }
}

fn row(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, WIDTH, height)
}

/// Build the reference page
pub fn reference_page() -> HeadlessDocument {
    let mut page = PageBuilder {
        doc: HeadlessDocument::new(),
    };
    let Some(body) = page.doc.body() else {
        return page.doc;
    };

    // Loading splash
    let splash = page.add(&body, "div", Some("loading-screen"), &["loading-screen"]);
    page.doc.set_layout_rect(&splash, row(0.0, 800.0));

    // Navigation
    let nav = page.add(&body, "nav", Some("mainNav"), &["navbar"]);
    page.doc.set_layout_rect(&nav, row(0.0, 70.0));
    let menu = page.add(&nav, "ul", Some("navMenu"), &["nav-menu"]);
    for section in Section::ALL {
        let item = page.add(&menu, "li", None, &[]);
        let link = page.add(&item, "a", None, &["nav-link"]);
        page.doc.set_attribute(&link, "href", &format!("#{}", section.id()));
        page.doc.set_attribute(&link, "data-target", section.id());
        page.doc.set_text_content(&link, section.id());
        if section == Section::Home {
            page.doc.add_class(&link, "active");
        }
    }
    let toggle = page.add(&nav, "button", Some("navToggle"), &["nav-toggle"]);
    page.icon(&toggle, "menu");

    let main = page.add(&body, "main", None, &["main-content"]);
    for section in Section::ALL {
        let top = section.index() as f64 * SECTION_SPACING;
        let element = page.add(&main, "section", Some(section.id()), &["section"]);
        page.doc.set_layout_rect(&element, row(top, SECTION_HEIGHT));
        if section == Section::Home {
            page.doc.add_class(&element, "active");
        }
        match section {
            Section::Home => home(&mut page, &element),
            Section::Metrics => metrics(&mut page, &element, top),
            Section::Value => value(&mut page, &element, top),
            _ => {}
        }
        if let Some(diagram) = DiagramId::ALL.iter().find(|d| d.as_str() == section.id()) {
            let container = page.add(&element, "div", Some(diagram.container_id().as_str()), &["diagram-container"]);
            page.doc.set_layout_rect(&container, row(top + 200.0, 900.0));
            let enlarge = page.add(&element, "button", None, &["diagram-enlarge"]);
            page.doc.set_attribute(&enlarge, "data-diagram", diagram.as_str());
            page.icon(&enlarge, "maximize-2");
        }
    }

    // Enlarge modal
    let modal = page.add(&body, "div", Some("diagramModal"), &["diagram-modal"]);
    let modal_body = page.add(&modal, "div", None, &["modal-body"]);
    page.add(&modal_body, "div", Some("modalDiagramContent"), &["modal-diagram-content"]);
    let close = page.add(&modal_body, "button", None, &["modal-close"]);
    page.icon(&close, "x");

    let back_to_top = page.add(&body, "button", Some("backToTop"), &["back-to-top"]);
    page.icon(&back_to_top, "arrow-up");

    page.doc
}

fn home(page: &mut PageBuilder, section: &NodeId) {
    page.text(section, "h1", &["hero-title"], "Pipeline Showcase", row(100.0, 60.0));
    page.text(section, "p", &["hero-subtitle"], "七阶段智能匹配流水线", row(180.0, 40.0));

    let stats = page.placed(section, "div", &["hero-stats"], row(260.0, 120.0));
    for (i, text) in ["85%", "100+", "<3秒", "7"].into_iter().enumerate() {
        let rect = Rect::new(100.0 + 280.0 * i as f64, 280.0, 200.0, 50.0);
        page.text(&stats, "div", &["stat-number"], text, rect);
    }

    let actions = page.placed(section, "div", &["hero-actions"], row(420.0, 60.0));
    let start = page.add(&actions, "a", None, &["btn", "btn-primary"]);
    page.doc.set_attribute(&start, "data-target", "architecture");
    page.icon(&start, "arrow-right");

    for (i, top) in [600.0, 1100.0, 1400.0].into_iter().enumerate() {
        let card = page.placed(
            section,
            "div",
            &["feature-card", "animate-on-scroll"],
            Rect::new(100.0 + 380.0 * i as f64, top, 340.0, 200.0),
        );
        page.icon(&card, "cpu");
    }

    page.placed(section, "div", &["scroll-animation"], row(700.0, 200.0));
    page.placed(section, "div", &["scroll-animation"], row(1600.0, 150.0));

    let image = page.placed(section, "img", &["lazy"], Rect::new(340.0, 1500.0, 600.0, 240.0));
    page.doc.set_attribute(&image, "data-src", "images/pipeline-overview.png");
    page.doc.set_attribute(&image, "alt", "pipeline overview");
}

fn metrics(page: &mut PageBuilder, section: &NodeId, top: f64) {
    for (i, (value, width)) in [("95%", "95%"), ("88%", "88%"), ("<3秒", "76%")]
        .into_iter()
        .enumerate()
    {
        let card_top = top + 200.0 + 260.0 * i as f64;
        let card = page.placed(section, "div", &["metric-card"], row(card_top, 240.0));
        page.text(&card, "div", &["metric-value"], value, row(card_top + 20.0, 60.0));
        let track = page.placed(&card, "div", &["progress"], row(card_top + 120.0, 12.0));
        let bar = page.placed(&track, "div", &["progress-bar"], row(card_top + 120.0, 12.0));
        page.doc.set_style(&bar, "width", width);
    }

    let summary = page.placed(section, "div", &["metric-summary"], row(top + 1000.0, 100.0));
    let processed = page.text(&summary, "span", &["counter"], "0", row(top + 1020.0, 40.0));
    page.doc.set_attribute(&processed, "data-target", "1200");
    let failures = page.text(&summary, "span", &["counter"], "0", row(top + 1060.0, 40.0));
    page.doc.set_attribute(&failures, "data-target", "0");
}

fn value(page: &mut PageBuilder, section: &NodeId, top: f64) {
    for i in 0..3 {
        let card = page.placed(section, "div", &["value-card"], row(top + 200.0 + 220.0 * i as f64, 200.0));
        page.icon(&card, "award");
    }
    for i in 0..2 {
        page.placed(section, "div", &["tech-card"], row(top + 900.0 + 220.0 * i as f64, 200.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_dom::DocumentExt;

    #[test]
    fn test_contract_elements_present() {
        let doc = reference_page();
        for id in [
            "loading-screen",
            "mainNav",
            "navMenu",
            "navToggle",
            "backToTop",
            "diagramModal",
            "modalDiagramContent",
        ] {
            assert!(doc.element_by_id(id).is_some(), "missing #{}", id);
        }
        for section in Section::ALL {
            assert!(doc.element_by_id(section.id()).is_some());
        }
        for diagram in DiagramId::ALL {
            assert!(doc.element_by_id(&diagram.container_id()).is_some());
        }
        assert_eq!(doc.query_all(".nav-link").unwrap().len(), 7);
        assert_eq!(doc.query_all(".section.active").unwrap().len(), 1);
    }

    #[test]
    fn test_sections_are_stacked() {
        let doc = reference_page();
        let metrics = doc.element_by_id("metrics").unwrap();
        assert_eq!(doc.bounding_rect(&metrics).top(), 10_000.0);
    }
}
