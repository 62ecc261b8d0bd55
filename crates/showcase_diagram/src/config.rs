//! Diagram library configuration
//!
//! Passed once to the library's `initialize`. Field names serialize in the
//! library's camelCase spelling.

use serde::{Deserialize, Serialize};

use showcase_core::{Result, ShowcaseError};

/// Top-level library configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MermaidConfig {
    /// Diagrams are rendered on demand, never scanned at load
    pub start_on_load: bool,
    pub theme: String,
    pub theme_variables: ThemeVariables,
    pub flowchart: FlowchartConfig,
    pub gantt: GanttConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub primary_color: String,
    pub primary_text_color: String,
    pub primary_border_color: String,
    pub line_color: String,
    pub secondary_color: String,
    pub tertiary_color: String,
    pub background: String,
    pub main_bkg: String,
    pub second_bkg: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartConfig {
    pub use_max_width: bool,
    pub html_labels: bool,
    pub curve: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttConfig {
    pub font_size: u32,
    pub section_font_size: u32,
    pub number_section_styles: u32,
    pub bar_height: u32,
    pub bar_gap: u32,
    pub top_padding: u32,
    pub left_padding: u32,
    pub grid_line_start_padding: u32,
    pub use_width: u32,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            start_on_load: false,
            theme: "default".to_string(),
            theme_variables: ThemeVariables::default(),
            flowchart: FlowchartConfig::default(),
            gantt: GanttConfig::default(),
        }
    }
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self {
            primary_color: "#667eea".to_string(),
            primary_text_color: "#2d3748".to_string(),
            primary_border_color: "#4a5568".to_string(),
            line_color: "#667eea".to_string(),
            secondary_color: "#f7fafc".to_string(),
            tertiary_color: "#e2e8f0".to_string(),
            background: "#ffffff".to_string(),
            main_bkg: "#ffffff".to_string(),
            second_bkg: "#f8f9fa".to_string(),
        }
    }
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            use_max_width: true,
            html_labels: true,
            curve: "linear".to_string(),
        }
    }
}

impl Default for GanttConfig {
    fn default() -> Self {
        Self {
            font_size: 13,
            section_font_size: 15,
            number_section_styles: 6,
            bar_height: 45,
            bar_gap: 12,
            top_padding: 60,
            left_padding: 200,
            grid_line_start_padding: 15,
            use_width: 2400,
        }
    }
}

impl MermaidConfig {
    /// Compact JSON for handing to the library
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ShowcaseError::Config(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ShowcaseError::Config(e.to_string()))
    }
}
