//! Node label measurement and placement.

use crate::scale::Scale;
use crate::text::{TextMeasurer, TextStyle, tailored_text_or_default};
use sankey_core::utils::points_to_px;
use sankey_core::{DEFAULTS, Node, SankeyGraph, Settings, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

/// Where a node's label goes, relative to the node's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// The label name, shortened with `...` when it would run past half a column step.
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub visible: bool,
}

pub fn label_style(settings: &Settings, font_family: Option<&str>) -> TextStyle {
    TextStyle {
        font_family: font_family.map(str::to_string),
        font_size: points_to_px(settings.font_size),
    }
}

/// Fills `label.width` / `label.height` for every node.
pub fn measure_labels(graph: &mut SankeyGraph, measurer: &dyn TextMeasurer, style: &TextStyle) {
    for node in graph.nodes_mut() {
        let metrics = measurer.measure(&node.label.name, style);
        node.label.width = metrics.width;
        node.label.height = metrics.height;
    }
}

/// Labels sit right of their node unless that would overflow the viewport, in which case they
/// flip to the left side and end-anchor.
pub fn place_label(
    node: &Node,
    scale: Scale,
    viewport: Viewport,
    settings: &Settings,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> LabelPlacement {
    let label_margin = DEFAULTS.label_margin;
    let node_margin = DEFAULTS.node_margin;

    let larger_than_width =
        node.x + node.width + label_margin + node.label.width > viewport.width;
    let (x, anchor) = if larger_than_width {
        (-label_margin, TextAnchor::End)
    } else {
        (node.width + label_margin, TextAnchor::Start)
    };

    let extent = if x > 0.0 {
        x + node.x + node.label.width + node.width
    } else {
        node.x + x - node.label.width - node.width
    };

    let visible = settings.show_labels
        && extent < viewport.width
        && extent > 0.0
        && node.height + node_margin >= node.label.height
        && scale.x / 2.0 >= DEFAULTS.min_label_width;

    let max_width = scale.x / 2.0 - node.width - node_margin;
    let text = if extent > max_width {
        tailored_text_or_default(measurer, &node.label.name, style, max_width)
    } else {
        node.label.name.clone()
    };

    LabelPlacement {
        text,
        x,
        y: node.height / 2.0,
        anchor,
        visible,
    }
}

/// One placement per node, in arena order.
pub fn place_labels(
    graph: &SankeyGraph,
    scale: Scale,
    viewport: Viewport,
    settings: &Settings,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Vec<LabelPlacement> {
    graph
        .nodes()
        .iter()
        .map(|node| place_label(node, scale, viewport, settings, measurer, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use sankey_core::{DataTable, build_graph};

    // 12pt -> 16px, 0.6 * 16 = 9.6px per char, 19.2px line height.
    fn node(name: &str, x: f64, height: f64) -> (SankeyGraph, TextStyle) {
        let mut g = build_graph(&DataTable::from_rows([(name, "sink", Some(1.0))]), &[]);
        let style = label_style(&Settings::default(), None);
        measure_labels(&mut g, &DeterministicTextMeasurer::default(), &style);
        let id = g.node_by_label(name).unwrap().id;
        let n = g.node_mut(id);
        n.x = x;
        n.width = 20.0;
        n.height = height;
        (g, style)
    }

    fn place(g: &SankeyGraph, name: &str, scale_x: f64, width: f64) -> LabelPlacement {
        let style = label_style(&Settings::default(), None);
        place_label(
            g.node_by_label(name).unwrap(),
            Scale { x: scale_x, y: 1.0 },
            Viewport::new(width, 400.0),
            &Settings::default(),
            &DeterministicTextMeasurer::default(),
            &style,
        )
    }

    #[test]
    fn measures_labels_with_the_font_size_in_pixels() {
        let (g, style) = node("Coal", 0.0, 50.0);
        assert_eq!(style.font_size, 16.0);
        let label = &g.node_by_label("Coal").unwrap().label;
        assert!((label.width - 38.4).abs() < 1e-9);
        assert!((label.height - 19.2).abs() < 1e-9);
    }

    #[test]
    fn labels_go_right_of_the_node_when_they_fit() {
        let (g, _) = node("Coal", 0.0, 50.0);
        let p = place(&g, "Coal", 400.0, 800.0);
        assert_eq!(p.anchor, TextAnchor::Start);
        assert_eq!(p.x, 24.0);
        assert_eq!(p.y, 25.0);
        assert!(p.visible);
        assert_eq!(p.text, "Coal");
    }

    #[test]
    fn labels_flip_left_near_the_right_edge() {
        let (g, _) = node("Coal", 780.0, 50.0);
        let p = place(&g, "Coal", 400.0, 800.0);
        assert_eq!(p.anchor, TextAnchor::End);
        assert_eq!(p.x, -4.0);
        assert!(p.visible);
    }

    #[test]
    fn short_nodes_hide_their_labels() {
        let (g, _) = node("Coal", 0.0, 10.0);
        assert!(!place(&g, "Coal", 400.0, 800.0).visible);
    }

    #[test]
    fn narrow_column_steps_hide_labels() {
        let (g, _) = node("Coal", 0.0, 50.0);
        assert!(!place(&g, "Coal", 60.0, 800.0).visible);
    }

    #[test]
    fn hidden_labels_setting_wins() {
        let (g, style) = node("Coal", 0.0, 50.0);
        let settings = Settings {
            show_labels: false,
            ..Settings::default()
        };
        let p = place_label(
            g.node_by_label("Coal").unwrap(),
            Scale { x: 400.0, y: 1.0 },
            Viewport::new(800.0, 400.0),
            &settings,
            &DeterministicTextMeasurer::default(),
            &style,
        );
        assert!(!p.visible);
    }

    #[test]
    fn long_labels_are_cut_to_half_a_column_step() {
        let (g, _) = node("Electricity grid", 0.0, 50.0);
        // max width = 200 / 2 - 20 - 5 = 75px, room for seven chars including "...".
        let p = place(&g, "Electricity grid", 200.0, 800.0);
        assert_eq!(p.text, "Elec...");
    }
}
