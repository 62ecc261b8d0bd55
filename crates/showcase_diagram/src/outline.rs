//! Diagram source inspection
//!
//! A light structural reading of Mermaid sources: the diagram kind from the
//! header line, plus nodes, edges and subgraphs of flowcharts and the
//! sections and tasks of Gantt charts. This is not a Mermaid parser; it
//! recognizes the line shapes the page's diagrams use.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use showcase_core::{Result, ShowcaseError};

/// Diagram type named on the header line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Flowchart,
    Gantt,
    Sequence,
    Class,
    State,
    Pie,
    EntityRelationship,
    Journey,
}

impl DiagramKind {
    /// Kind of `source` from its first meaningful line
    ///
    /// Blank lines and `%%` comments before the header are skipped.
    pub fn detect(source: &str) -> Option<DiagramKind> {
        let header = source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with("%%"))?;
        let keyword = header.split_whitespace().next()?;

        match keyword {
            "graph" | "flowchart" | "flowchart-elk" => Some(DiagramKind::Flowchart),
            "gantt" => Some(DiagramKind::Gantt),
            "sequenceDiagram" => Some(DiagramKind::Sequence),
            "classDiagram" | "classDiagram-v2" => Some(DiagramKind::Class),
            "stateDiagram" | "stateDiagram-v2" => Some(DiagramKind::State),
            "pie" => Some(DiagramKind::Pie),
            "erDiagram" => Some(DiagramKind::EntityRelationship),
            "journey" => Some(DiagramKind::Journey),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Gantt => "gantt",
            DiagramKind::Sequence => "sequence",
            DiagramKind::Class => "class",
            DiagramKind::State => "state",
            DiagramKind::Pie => "pie",
            DiagramKind::EntityRelationship => "er",
            DiagramKind::Journey => "journey",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flowchart node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineNode {
    pub id: String,
    /// Label text with `<br/>` turned into spaces
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineEdge {
    pub from: String,
    pub to: String,
    /// Dotted (`-.->`) links
    pub dotted: bool,
    pub label: Option<String>,
}

/// A Gantt task line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GanttTask {
    pub section: Option<String>,
    pub name: String,
    /// Everything after the last `:` (`s2, after s1, 50s`)
    pub metadata: String,
}

/// Structural summary of a diagram source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramOutline {
    pub kind: DiagramKind,
    pub title: Option<String>,
    pub nodes: Vec<OutlineNode>,
    pub edges: Vec<OutlineEdge>,
    pub subgraphs: Vec<String>,
    pub sections: Vec<String>,
    pub tasks: Vec<GanttTask>,
}

const SHAPE: &str = r#"(?:\[[^\]]*\]|\{[^}]*\}|\([^)]*\))"#;

static NODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"([A-Za-z][\w]*)\s*({SHAPE})"#)).expect("Invalid node regex")
});

static EDGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"([A-Za-z][\w]*)\s*{SHAPE}?\s*(-->|-\.->|==>|---|-\.-)\s*(?:\|([^|]*)\|\s*)?([A-Za-z][\w]*)"#
    ))
    .expect("Invalid edge regex")
});

static TASK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(.+?)\s*:\s*([^:]+)$"#).expect("Invalid task regex"));

/// Flowchart statements that declare no nodes or edges
const FLOWCHART_DIRECTIVES: &[&str] = &[
    "classDef", "class", "style", "linkStyle", "click", "direction", "end",
];

/// Gantt statements that are not tasks
const GANTT_DIRECTIVES: &[&str] = &[
    "dateFormat", "axisFormat", "tickInterval", "excludes", "includes", "todayMarker", "weekday",
];

fn clean_label(raw: &str) -> String {
    let inner = raw
        .trim_matches(|c| matches!(c, '[' | ']' | '{' | '}' | '(' | ')'))
        .trim_matches('"');
    inner
        .replace("<br/>", " ")
        .replace("<br>", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl DiagramOutline {
    /// Read the structure of `source`
    ///
    /// Fails with [`ShowcaseError::Render`] when the header names no known
    /// diagram kind.
    pub fn parse(source: &str) -> Result<Self> {
        let kind = DiagramKind::detect(source).ok_or_else(|| ShowcaseError::Render {
            diagram: String::new(),
            message: "unknown diagram type".to_string(),
        })?;

        let mut outline = DiagramOutline {
            kind,
            title: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            subgraphs: Vec::new(),
            sections: Vec::new(),
            tasks: Vec::new(),
        };

        // Header line is consumed by kind detection
        let body = source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("%%"))
            .skip(1);

        match kind {
            DiagramKind::Flowchart => body.for_each(|line| outline.read_flowchart_line(line)),
            DiagramKind::Gantt => body.for_each(|line| outline.read_gantt_line(line)),
            _ => {
                if let Some(title) = body
                    .into_iter()
                    .find_map(|line| line.strip_prefix("title "))
                {
                    outline.title = Some(title.trim().to_string());
                }
            }
        }

        Ok(outline)
    }

    fn add_node(&mut self, id: &str, label: Option<String>) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                if node.label.is_none() {
                    node.label = label;
                }
            }
            None => self.nodes.push(OutlineNode {
                id: id.to_string(),
                label,
            }),
        }
    }

    fn read_flowchart_line(&mut self, line: &str) {
        if let Some(title) = line.strip_prefix("subgraph") {
            self.subgraphs.push(clean_label(title.trim()));
            return;
        }
        let keyword = line.split_whitespace().next().unwrap_or_default();
        if FLOWCHART_DIRECTIVES.contains(&keyword) {
            return;
        }

        for caps in NODE_REGEX.captures_iter(line) {
            self.add_node(&caps[1], Some(clean_label(&caps[2])));
        }

        let mut edge_found = false;
        for caps in EDGE_REGEX.captures_iter(line) {
            edge_found = true;
            let from = caps[1].to_string();
            let to = caps[4].to_string();
            self.add_node(&from, None);
            self.add_node(&to, None);
            self.edges.push(OutlineEdge {
                from,
                to,
                dotted: caps[2].contains('.'),
                label: caps.get(3).map(|m| m.as_str().trim().to_string()),
            });
        }

        // A bare node id on its own line
        if !edge_found
            && !line.contains(char::is_whitespace)
            && line.chars().all(|c| c.is_alphanumeric() || c == '_')
        {
            self.add_node(line, None);
        }
    }

    fn read_gantt_line(&mut self, line: &str) {
        if let Some(title) = line.strip_prefix("title ") {
            self.title = Some(title.trim().to_string());
            return;
        }
        if let Some(section) = line.strip_prefix("section ") {
            self.sections.push(section.trim().to_string());
            return;
        }
        let keyword = line.split_whitespace().next().unwrap_or_default();
        if GANTT_DIRECTIVES.contains(&keyword) {
            return;
        }
        if let Some(caps) = TASK_REGEX.captures(line) {
            self.tasks.push(GanttTask {
                section: self.sections.last().cloned(),
                name: caps[1].trim().to_string(),
                metadata: caps[2].trim().to_string(),
            });
        }
    }

    /// Node count for flowcharts, task count for Gantt charts
    pub fn item_count(&self) -> usize {
        match self.kind {
            DiagramKind::Gantt => self.tasks.len(),
            _ => self.nodes.len(),
        }
    }
}
