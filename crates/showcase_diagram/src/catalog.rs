//! Diagram definitions
//!
//! The page ships four diagrams. Their sources live next to this crate as
//! `.mmd` files and are compiled in.

use indexmap::IndexMap;

use showcase_core::DiagramId;

/// Source text of one diagram
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramDefinition {
    pub id: DiagramId,
    pub source: &'static str,
}

impl DiagramDefinition {
    /// Id of the page element the diagram renders into
    pub fn container_id(&self) -> String {
        self.id.container_id()
    }
}

/// Ordered, immutable id → definition table
#[derive(Clone, Debug)]
pub struct DiagramCatalog {
    definitions: IndexMap<DiagramId, DiagramDefinition>,
}

impl DiagramCatalog {
    /// The page's diagrams, in page order
    pub fn standard() -> Self {
        let sources = [
            (DiagramId::Architecture, include_str!("../diagrams/architecture.mmd")),
            (DiagramId::Performance, include_str!("../diagrams/performance.mmd")),
            (DiagramId::Algorithm, include_str!("../diagrams/algorithm.mmd")),
            (DiagramId::Retrieval, include_str!("../diagrams/retrieval.mmd")),
        ];
        Self::from_definitions(
            sources
                .into_iter()
                .map(|(id, source)| DiagramDefinition { id, source }),
        )
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = DiagramDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn get(&self, id: DiagramId) -> Option<&DiagramDefinition> {
        self.definitions.get(&id)
    }

    /// Look up by textual id (`"architecture"`)
    pub fn get_str(&self, id: &str) -> Option<&DiagramDefinition> {
        id.parse::<DiagramId>().ok().and_then(|id| self.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = DiagramId> + '_ {
        self.definitions.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagramDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Conventional container id: `architecture` → `architectureDiagram`
    pub fn container_id(id: DiagramId) -> String {
        id.container_id()
    }
}

impl Default for DiagramCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = DiagramCatalog::standard();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), DiagramId::ALL.to_vec());
        assert!(catalog.get_str("retrieval").unwrap().source.starts_with("graph LR"));
        assert!(catalog.get_str("missing").is_none());
        assert_eq!(
            DiagramCatalog::container_id(DiagramId::Architecture),
            "architectureDiagram"
        );
    }
}
