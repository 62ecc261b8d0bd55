//! Page runtime configuration
//!
//! Every knob has a default matching the shipped page, so an empty (or
//! missing) `showcase.toml` yields the stock behavior:
//!
//! ```toml
//! [timing]
//! loading_delay_ms = 1500
//! diagram_resize_debounce_ms = 500
//!
//! [animation]
//! counter_steps = 50
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowcaseError};

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ShowcaseConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub chrome: ChromeConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
}

impl ShowcaseConfig {
    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ShowcaseConfig =
            toml::from_str(content).map_err(|e| ShowcaseError::Config(e.to_string()))?;
        tracing::debug!("loaded showcase config: {:?}", config.timing);
        Ok(config)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShowcaseError::Config(e.to_string()))
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Bootstrap and resize timing
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Delay between DOM ready and hiding the loading splash
    #[serde(default = "default_loading_delay")]
    pub loading_delay_ms: u32,
    /// Splash fade-out before it is removed from layout
    #[serde(default = "default_loading_fade")]
    pub loading_fade_ms: u32,
    /// Debounce for the general layout resize handler
    #[serde(default = "default_layout_debounce")]
    pub layout_debounce_ms: u32,
    /// Debounce before all diagrams are rendered again after a resize
    #[serde(default = "default_diagram_resize_debounce")]
    pub diagram_resize_debounce_ms: u32,
    /// Delay between a section becoming active and its diagram rendering
    #[serde(default = "default_diagram_render_delay")]
    pub diagram_render_delay_ms: u32,
}

fn default_loading_delay() -> u32 {
    1500
}

fn default_loading_fade() -> u32 {
    500
}

fn default_layout_debounce() -> u32 {
    150
}

fn default_diagram_resize_debounce() -> u32 {
    500
}

fn default_diagram_render_delay() -> u32 {
    100
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: default_loading_delay(),
            loading_fade_ms: default_loading_fade(),
            layout_debounce_ms: default_layout_debounce(),
            diagram_resize_debounce_ms: default_diagram_resize_debounce(),
            diagram_render_delay_ms: default_diagram_render_delay(),
        }
    }
}

// =============================================================================
// Animation
// =============================================================================

/// Counter, observer and entrance-sequence parameters
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of the text-derived counter
    pub counter_duration_ms: u32,
    /// Number of discrete steps of the text-derived counter
    pub counter_steps: u32,
    /// Duration of the attribute-declared (`data-target`) counter
    pub range_counter_duration_ms: u32,
    /// Lower bound on the attribute-declared counter's step interval
    pub range_counter_min_step_ms: u32,
    /// Visible fraction that counts as "entered"
    pub observer_threshold: f64,
    /// Bottom root margin of the observer in pixels
    pub observer_bottom_margin: f64,
    pub hero_base_delay_ms: u32,
    pub hero_stagger_ms: u32,
    pub hero_duration_ms: u32,
    pub hero_offset_px: f64,
    pub card_stagger_ms: u32,
    pub card_duration_ms: u32,
    pub card_offset_px: f64,
    /// Delay before the progress-bar sequence starts
    pub metrics_delay_ms: u32,
    pub bar_stagger_ms: u32,
    pub bar_duration_ms: u32,
    pub pulse_ms: u32,
    pub shake_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            counter_duration_ms: 1500,
            counter_steps: 50,
            range_counter_duration_ms: 2000,
            range_counter_min_step_ms: 50,
            observer_threshold: 0.1,
            observer_bottom_margin: -50.0,
            hero_base_delay_ms: 200,
            hero_stagger_ms: 150,
            hero_duration_ms: 800,
            hero_offset_px: 30.0,
            card_stagger_ms: 100,
            card_duration_ms: 600,
            card_offset_px: 30.0,
            metrics_delay_ms: 500,
            bar_stagger_ms: 200,
            bar_duration_ms: 1000,
            pulse_ms: 2000,
            shake_ms: 1000,
        }
    }
}

// =============================================================================
// Page chrome
// =============================================================================

/// Navigation bar, back-to-top button and notification toasts
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Scroll offset past which the navigation bar turns opaque
    pub nav_scrolled_threshold: f64,
    /// Scroll offset past which the back-to-top button shows
    pub back_to_top_threshold: f64,
    pub notification_show_delay_ms: u32,
    pub notification_timeout_ms: u32,
    pub notification_exit_ms: u32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            nav_scrolled_threshold: 100.0,
            back_to_top_threshold: 300.0,
            notification_show_delay_ms: 100,
            notification_timeout_ms: 5000,
            notification_exit_ms: 300,
        }
    }
}

// =============================================================================
// Preload
// =============================================================================

/// Critical assets hinted with `<link rel="preload">`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PreloadConfig {
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
}

fn default_assets() -> Vec<String> {
    vec![
        "styles/main.css".to_string(),
        "styles/components.css".to_string(),
        "scripts/navigation.js".to_string(),
    ]
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            assets: default_assets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = ShowcaseConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShowcaseConfig::default());
        assert_eq!(config.timing.loading_delay_ms, 1500);
        assert_eq!(config.animation.counter_steps, 50);
    }

    #[test]
    fn test_partial_override() {
        let config = ShowcaseConfig::from_toml_str(
            r#"
            [timing]
            diagram_resize_debounce_ms = 250

            [animation]
            counter_steps = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.timing.diagram_resize_debounce_ms, 250);
        assert_eq!(config.timing.layout_debounce_ms, 150);
        assert_eq!(config.animation.counter_steps, 10);
        assert_eq!(config.animation.counter_duration_ms, 1500);
    }

    #[test]
    fn test_invalid_config() {
        let err = ShowcaseConfig::from_toml_str("[timing]\nloading_delay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ShowcaseError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_assets() {
        let text = ShowcaseConfig::default().to_toml().unwrap();
        assert!(text.contains("styles/main.css"));
    }
}
