//! Section navigation
//!
//! Exactly one section is shown at a time. Activating a section moves the
//! `active` class from the old section to the new one, highlights the
//! matching navigation link, records the URL fragment and scrolls to the
//! top. The caller receives what the new section needs initialized.

use showcase_core::{AppState, Result, Section, SectionContent, ShowcaseError};
use showcase_dom::{Document, DocumentExt, ScrollBehavior};

pub(crate) const NAV_LINK_SELECTOR: &str = ".nav-link";
const NAV_MENU_ID: &str = "navMenu";
const NAV_TOGGLE_ID: &str = "navToggle";

/// Tracks the shown section
#[derive(Clone, Debug)]
pub struct NavigationController {
    current: String,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            current: Section::Home.id().to_string(),
        }
    }

    /// Id of the shown section
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Sync the link highlight with the current section
    pub fn initialize<D: Document + ?Sized>(&self, doc: &mut D) {
        let links = self.update_navigation_state(doc, &self.current);
        if doc.element_by_id(NAV_TOGGLE_ID).is_none() || doc.element_by_id(NAV_MENU_ID).is_none() {
            tracing::warn!("mobile menu controls missing; menu toggle disabled");
        }
        tracing::info!("navigation initialized ({} links)", links);
    }

    /// Show section `id`
    ///
    /// Returns `Ok(None)` when `id` is already shown, otherwise the content
    /// the new section needs initialized. Ids outside the registry are
    /// accepted as long as the element exists; they initialize nothing.
    /// A missing target element abandons the transition without touching
    /// the document.
    pub fn activate<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        state: &mut AppState,
        id: &str,
    ) -> Result<Option<SectionContent>> {
        if self.current == id {
            return Ok(None);
        }

        let Some(target) = doc.element_by_id(id) else {
            tracing::error!("section not found: {}", id);
            return Err(ShowcaseError::ElementNotFound(id.to_string()));
        };

        if let Some(previous) = doc.element_by_id(&self.current) {
            doc.remove_class(&previous, "active");
        }
        doc.add_class(&target, "active");

        self.current = id.to_string();
        state.current_section = id.to_string();

        self.update_navigation_state(doc, id);
        doc.set_location_hash(id);
        doc.scroll_to(0.0, ScrollBehavior::Instant);

        tracing::info!("navigated to {}", id);
        Ok(Some(
            Section::from_id(id)
                .map(Section::content)
                .unwrap_or(SectionContent::None),
        ))
    }

    /// Mark exactly the links targeting `id` active; returns the link count
    fn update_navigation_state<D: Document + ?Sized>(&self, doc: &mut D, id: &str) -> usize {
        let links = doc.query_all(NAV_LINK_SELECTOR).unwrap_or_default();
        for link in &links {
            if doc.attribute(link, "data-target").as_deref() == Some(id) {
                doc.add_class(link, "active");
            } else {
                doc.remove_class(link, "active");
            }
        }
        links.len()
    }

    /// Browser back/forward: follow the fragment
    ///
    /// The fragment is not checked against the registry here; a fragment
    /// naming no element is logged and ignored by [`Self::activate`].
    pub fn on_pop_state<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        state: &mut AppState,
        fragment: &str,
    ) -> Result<Option<SectionContent>> {
        let fragment = fragment.trim_start_matches('#');
        if fragment.is_empty() || fragment == self.current {
            return Ok(None);
        }
        self.activate(doc, state, fragment)
    }

    /// At load: show the section named by the URL fragment, if it is a
    /// registry member
    pub fn restore_from_fragment<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        state: &mut AppState,
    ) -> Result<Option<SectionContent>> {
        let fragment = doc.location_hash();
        match Section::from_id(&fragment) {
            Some(section) => self.activate(doc, state, section.id()),
            None => {
                if !fragment.is_empty() {
                    tracing::debug!("ignoring unknown fragment #{}", fragment);
                }
                Ok(None)
            }
        }
    }

    /// A navigation link was clicked
    pub fn on_link_clicked<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        state: &mut AppState,
        target: &str,
    ) -> Result<Option<SectionContent>> {
        let result = if target.is_empty() {
            Ok(None)
        } else {
            self.activate(doc, state, target)
        };
        self.close_mobile_menu(doc);
        result
    }

    /// Flip the mobile menu open or closed
    pub fn toggle_mobile_menu<D: Document + ?Sized>(&self, doc: &mut D) {
        if let (Some(menu), Some(toggle)) = (
            doc.element_by_id(NAV_MENU_ID),
            doc.element_by_id(NAV_TOGGLE_ID),
        ) {
            doc.toggle_class(&menu, "active");
            doc.toggle_class(&toggle, "active");
        }
    }

    pub fn close_mobile_menu<D: Document + ?Sized>(&self, doc: &mut D) {
        if let (Some(menu), Some(toggle)) = (
            doc.element_by_id(NAV_MENU_ID),
            doc.element_by_id(NAV_TOGGLE_ID),
        ) {
            doc.remove_class(&menu, "active");
            doc.remove_class(&toggle, "active");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::reference_page;
    use showcase_core::DiagramId;
    use showcase_dom::HeadlessDocument;

    fn active_sections(doc: &HeadlessDocument) -> Vec<String> {
        doc.query_all(".section.active")
            .unwrap()
            .iter()
            .filter_map(|s| doc.element_id(s))
            .collect()
    }

    #[test]
    fn test_activate_moves_active_class() {
        let mut doc = reference_page();
        let mut state = AppState::default();
        let mut nav = NavigationController::new();

        let content = nav.activate(&mut doc, &mut state, "architecture").unwrap();
        assert_eq!(content, Some(SectionContent::Diagram(DiagramId::Architecture)));
        assert_eq!(active_sections(&doc), vec!["architecture"]);
        assert_eq!(state.current_section, "architecture");
        assert_eq!(doc.location_hash(), "architecture");
        assert_eq!(doc.scroll_y(), 0.0);
    }

    #[test]
    fn test_reactivation_is_noop() {
        let mut doc = reference_page();
        let mut state = AppState::default();
        let mut nav = NavigationController::new();
        nav.activate(&mut doc, &mut state, "metrics").unwrap();
        let history = doc.hash_history().len();

        assert_eq!(nav.activate(&mut doc, &mut state, "metrics").unwrap(), None);
        assert_eq!(doc.hash_history().len(), history);
    }

    #[test]
    fn test_missing_target_keeps_state() {
        let mut doc = reference_page();
        let mut state = AppState::default();
        let mut nav = NavigationController::new();
        let before = doc.to_html();

        assert!(nav.activate(&mut doc, &mut state, "pricing").is_err());
        assert_eq!(nav.current(), "home");
        assert_eq!(state.current_section, "home");
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_pop_state_and_restore() {
        let mut doc = reference_page().with_hash("value");
        let mut state = AppState::default();
        let mut nav = NavigationController::new();

        let content = nav.restore_from_fragment(&mut doc, &mut state).unwrap();
        assert_eq!(content, Some(SectionContent::ValueCards));

        assert_eq!(nav.on_pop_state(&mut doc, &mut state, "").unwrap(), None);
        assert_eq!(nav.on_pop_state(&mut doc, &mut state, "value").unwrap(), None);
        nav.on_pop_state(&mut doc, &mut state, "#home").unwrap();
        assert_eq!(nav.current(), "home");

        // Unknown fragments are not restored at load
        let mut doc = reference_page().with_hash("diagramModal");
        let mut nav = NavigationController::new();
        assert_eq!(nav.restore_from_fragment(&mut doc, &mut state).unwrap(), None);
    }

    #[test]
    fn test_mobile_menu() {
        let mut doc = reference_page();
        let mut state = AppState::default();
        let mut nav = NavigationController::new();
        let menu = doc.element_by_id(NAV_MENU_ID).unwrap();

        nav.toggle_mobile_menu(&mut doc);
        assert!(doc.has_class(&menu, "active"));
        nav.on_link_clicked(&mut doc, &mut state, "retrieval").unwrap();
        assert!(!doc.has_class(&menu, "active"));
        assert_eq!(nav.current(), "retrieval");
    }
}
