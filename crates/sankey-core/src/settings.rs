use crate::config::SankeyConfig;
use serde::{Deserialize, Serialize};

/// Process-wide defaults. Never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Defaults {
    pub show_labels: bool,
    pub label_color: &'static str,
    /// Label font size in points.
    pub font_size: f64,
    pub node_color: &'static str,
    pub link_color: &'static str,
    /// Fixed pixel width of every node rectangle.
    pub node_width: f64,
    /// Share of the viewport height (percent) kept free below the busiest column.
    pub node_bottom_margin_percent: f64,
    pub node_margin: f64,
    pub label_margin: f64,
    pub min_label_width: f64,
    pub curvature_of_links: f64,
    pub margin: Margin,
}

pub static DEFAULTS: Defaults = Defaults {
    show_labels: true,
    label_color: "black",
    font_size: 12.0,
    node_color: "rgb(62, 187, 162)",
    link_color: "black",
    node_width: 21.5,
    node_bottom_margin_percent: 5.0,
    node_margin: 5.0,
    label_margin: 4.0,
    min_label_width: 35.0,
    curvature_of_links: 0.5,
    margin: Margin {
        top: 10.0,
        right: 10.0,
        bottom: 10.0,
        left: 10.0,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        DEFAULTS.margin
    }
}

/// Display settings carried next to the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub show_labels: bool,
    pub label_color: String,
    /// Points, as configured by the host.
    pub font_size: f64,
    pub link_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_labels: DEFAULTS.show_labels,
            label_color: DEFAULTS.label_color.to_string(),
            font_size: DEFAULTS.font_size,
            link_color: DEFAULTS.link_color.to_string(),
        }
    }
}

impl Settings {
    /// Reads `labels.show`, `labels.fill`, `labels.fontSize` and `links.fill`.
    ///
    /// Unusable values (wrong type, non-positive or non-finite font size) fall back to the
    /// defaults.
    pub fn from_config(config: &SankeyConfig) -> Self {
        let defaults = Self::default();
        let font_size = config
            .get_f64("labels.fontSize")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(defaults.font_size);

        Self {
            show_labels: config
                .get_bool("labels.show")
                .unwrap_or(defaults.show_labels),
            label_color: config
                .get_color("labels.fill")
                .map(str::to_string)
                .unwrap_or(defaults.label_color),
            font_size,
            link_color: config
                .get_color("links.fill")
                .map(str::to_string)
                .unwrap_or(defaults.link_color),
        }
    }
}
