use crate::columns::Column;
use crate::curves::LinkCurve;
use crate::labels::TextAnchor;
use crate::scale::Scale;
use sankey_core::{LinkId, Margin, NodeId, Settings, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyLabelLayout {
    pub text: String,
    /// Offset from the node's top-left corner.
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyNodeLayout {
    pub id: NodeId,
    pub name: String,
    pub column: usize,
    pub input_weight: f64,
    pub output_weight: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub label: SankeyLabelLayout,
    /// `false` for zero-height nodes.
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyLinkLayout {
    pub id: LinkId,
    pub source: NodeId,
    pub destination: NodeId,
    pub weight: f64,
    pub height: f64,
    pub dy_source: f64,
    pub dy_destination: f64,
    pub color: String,
    pub curve: LinkCurve,
    pub visible: bool,
}

/// Everything a renderer needs; coordinates are relative to `inner_viewport`, which starts
/// `margin.left` / `margin.top` inside `viewport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyLayout {
    pub viewport: Viewport,
    pub inner_viewport: Viewport,
    pub margin: Margin,
    pub scale: Scale,
    pub max_column: Option<usize>,
    pub columns: Vec<Column>,
    pub nodes: Vec<SankeyNodeLayout>,
    pub links: Vec<SankeyLinkLayout>,
    pub settings: Settings,
}

impl SankeyLayout {
    pub fn node_by_name(&self, name: &str) -> Option<&SankeyNodeLayout> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &SankeyNodeLayout> + '_ {
        self.nodes.iter().filter(|n| n.visible)
    }

    pub fn visible_links(&self) -> impl Iterator<Item = &SankeyLinkLayout> + '_ {
        self.links.iter().filter(|l| l.visible)
    }
}
