//! Section registry
//!
//! The page is split into seven top-level sections, exactly one of which is
//! visible at a time. The registry order matters: digit keys `1`..`7` map to
//! the Nth entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ShowcaseError;

/// A top-level page section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Architecture,
    Performance,
    Algorithm,
    Retrieval,
    Metrics,
    Value,
}

impl Section {
    /// Registry order
    pub const ALL: [Section; 7] = [
        Section::Home,
        Section::Architecture,
        Section::Performance,
        Section::Algorithm,
        Section::Retrieval,
        Section::Metrics,
        Section::Value,
    ];

    /// Element id of the section container (also its URL fragment)
    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Architecture => "architecture",
            Section::Performance => "performance",
            Section::Algorithm => "algorithm",
            Section::Retrieval => "retrieval",
            Section::Metrics => "metrics",
            Section::Value => "value",
        }
    }

    /// Zero-based position in the registry
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    /// Section for a 1-based shortcut number (`1` → home ... `7` → value)
    pub fn from_shortcut(n: u8) -> Option<Section> {
        match n {
            1..=7 => Some(Self::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    /// Look up a registry member by id, `None` for anything unregistered
    pub fn from_id(id: &str) -> Option<Section> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }

    /// What to (re)initialize when this section becomes active
    pub fn content(self) -> SectionContent {
        match self {
            Section::Home => SectionContent::None,
            Section::Architecture => SectionContent::Diagram(DiagramId::Architecture),
            Section::Performance => SectionContent::Diagram(DiagramId::Performance),
            Section::Algorithm => SectionContent::Diagram(DiagramId::Algorithm),
            Section::Retrieval => SectionContent::Diagram(DiagramId::Retrieval),
            Section::Metrics => SectionContent::MetricsBars,
            Section::Value => SectionContent::ValueCards,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::from_id(s).ok_or_else(|| ShowcaseError::UnknownSection(s.to_string()))
    }
}

/// Section-specific content initialized on activation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionContent {
    /// Nothing beyond showing the section
    None,
    /// Render a diagram into its container
    Diagram(DiagramId),
    /// Replay the progress-bar fill sequence
    MetricsBars,
    /// Replay the value/tech card entrance
    ValueCards,
}

/// Diagrams shown on the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramId {
    Architecture,
    Performance,
    Algorithm,
    Retrieval,
}

impl DiagramId {
    pub const ALL: [DiagramId; 4] = [
        DiagramId::Architecture,
        DiagramId::Performance,
        DiagramId::Algorithm,
        DiagramId::Retrieval,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiagramId::Architecture => "architecture",
            DiagramId::Performance => "performance",
            DiagramId::Algorithm => "algorithm",
            DiagramId::Retrieval => "retrieval",
        }
    }

    /// Conventional container element id (`architecture` → `architectureDiagram`)
    pub fn container_id(self) -> String {
        format!("{}Diagram", self.as_str())
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramId {
    type Err = ShowcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagramId::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ShowcaseError::DiagramNotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let ids: Vec<_> = Section::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            [
                "home",
                "architecture",
                "performance",
                "algorithm",
                "retrieval",
                "metrics",
                "value"
            ]
        );
        assert_eq!(Section::Retrieval.index(), 4);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(Section::from_shortcut(1), Some(Section::Home));
        assert_eq!(Section::from_shortcut(3), Some(Section::Performance));
        assert_eq!(Section::from_shortcut(7), Some(Section::Value));
        assert_eq!(Section::from_shortcut(0), None);
        assert_eq!(Section::from_shortcut(8), None);
    }

    #[test]
    fn test_parse_section() {
        assert_eq!("metrics".parse::<Section>(), Ok(Section::Metrics));
        assert_eq!(
            "pricing".parse::<Section>(),
            Err(ShowcaseError::UnknownSection("pricing".into()))
        );
    }

    #[test]
    fn test_every_section_has_content() {
        let diagrams = Section::ALL
            .iter()
            .filter(|s| matches!(s.content(), SectionContent::Diagram(_)))
            .count();
        assert_eq!(diagrams, DiagramId::ALL.len());
        assert_eq!(Section::Home.content(), SectionContent::None);
        assert_eq!(Section::Metrics.content(), SectionContent::MetricsBars);
    }

    #[test]
    fn test_container_ids() {
        assert_eq!(DiagramId::Architecture.container_id(), "architectureDiagram");
        assert_eq!("retrieval".parse::<DiagramId>(), Ok(DiagramId::Retrieval));
    }
}
