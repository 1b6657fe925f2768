#![forbid(unsafe_code)]

//! Headless Sankey layout.
//!
//! [`layout_sankey`] turns a [`DataTable`] into a [`SankeyLayout`]: the graph is built, nodes
//! are layered into columns, scaled into the viewport, packed vertically, and every link gets
//! its band height, per-end offsets and a cubic centre line. Label text is measured through
//! the [`TextMeasurer`] carried by [`LayoutOptions`].

pub mod columns;
pub mod curves;
pub mod labels;
pub mod model;
pub mod offsets;
pub mod pack;
pub mod scale;
pub mod text;

use crate::columns::{Column, aggregate_columns, assign_columns, busiest_column, column_members};
use crate::model::{SankeyLabelLayout, SankeyLayout, SankeyLinkLayout, SankeyNodeLayout};
use crate::scale::Scale;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use sankey_core::{DEFAULT_PALETTE, DEFAULTS, DataTable, Margin, SankeyGraph, Viewport};
use std::sync::Arc;

pub use sankey_core;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sankey_core::Error),
    #[error("data table JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub margin: Margin,
    pub node_width: f64,
    pub node_bottom_margin_percent: f64,
    pub curvature_of_links: f64,
    /// Node colours, spread evenly over the nodes. Empty keeps the default node colour.
    pub palette: Vec<String>,
    pub font_family: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            margin: DEFAULTS.margin,
            node_width: DEFAULTS.node_width,
            node_bottom_margin_percent: DEFAULTS.node_bottom_margin_percent,
            curvature_of_links: DEFAULTS.curvature_of_links,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            font_family: None,
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("margin", &self.margin)
            .field("node_width", &self.node_width)
            .field("node_bottom_margin_percent", &self.node_bottom_margin_percent)
            .field("curvature_of_links", &self.curvature_of_links)
            .field("palette", &self.palette)
            .field("font_family", &self.font_family)
            .finish_non_exhaustive()
    }
}

/// Result of positioning a graph in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass {
    pub scale: Scale,
    pub max_column: Option<usize>,
    pub columns: Vec<Column>,
}

/// Runs column assignment, aggregation, scaling, packing and link offsets on `graph`, writing
/// positions into its nodes and links. `viewport` is the drawable area (margins already
/// removed). Nodes never get wider than the viewport.
pub fn layout_graph(
    graph: &mut SankeyGraph,
    viewport: Viewport,
    options: &LayoutOptions,
) -> LayoutPass {
    let node_width = sankey_core::positive_number(options.node_width).min(viewport.width);

    let max_column = assign_columns(graph);
    let columns = aggregate_columns(graph);
    let busiest = busiest_column(&columns);
    let scale = Scale {
        x: scale::x_scale(viewport.width, node_width, max_column),
        y: scale::y_scale(viewport.height, options.node_bottom_margin_percent, &busiest),
    };
    tracing::debug!(
        ?max_column,
        busiest_weight = busiest.total_weight,
        x = scale.x,
        y = scale.y,
        "sankey scales"
    );

    let members = column_members(graph, columns.len());
    pack::pack_columns(graph, &members, &columns, scale, viewport.height, node_width);
    offsets::resolve_link_offsets(graph, scale.y);

    LayoutPass {
        scale,
        max_column,
        columns,
    }
}

pub fn layout_sankey(
    table: &DataTable,
    viewport: Viewport,
    options: &LayoutOptions,
) -> SankeyLayout {
    let viewport = Viewport::new(viewport.width, viewport.height);
    let inner_viewport = viewport.shrink(&options.margin);
    let settings = table.settings();

    let palette: Vec<&str> = options.palette.iter().map(String::as_str).collect();
    let mut graph = sankey_core::build_graph(table, &palette);
    let pass = layout_graph(&mut graph, inner_viewport, options);

    let measurer = options.text_measurer.as_ref();
    let style = labels::label_style(&settings, options.font_family.as_deref());
    labels::measure_labels(&mut graph, measurer, &style);
    let placements = labels::place_labels(
        &graph,
        pass.scale,
        inner_viewport,
        &settings,
        measurer,
        &style,
    );

    let nodes = graph
        .nodes()
        .iter()
        .zip(placements)
        .map(|(node, placement)| SankeyNodeLayout {
            id: node.id,
            name: node.label.name.clone(),
            column: node.column,
            input_weight: node.input_weight,
            output_weight: node.output_weight,
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            color: node.color.clone(),
            label: SankeyLabelLayout {
                text: placement.text,
                x: placement.x,
                y: placement.y,
                anchor: placement.anchor,
                width: node.label.width,
                height: node.label.height,
                color: node.label.color.clone(),
                visible: placement.visible,
            },
            visible: node.height > 0.0,
        })
        .collect();

    let links = graph
        .links()
        .iter()
        .map(|link| SankeyLinkLayout {
            id: link.id,
            source: link.source,
            destination: link.destination,
            weight: link.weight,
            height: link.height,
            dy_source: link.dy_source,
            dy_destination: link.dy_destination,
            color: link.color.clone(),
            curve: curves::link_curve(&graph, link, options.curvature_of_links),
            visible: link.height > 0.0,
        })
        .collect();

    SankeyLayout {
        viewport,
        inner_viewport,
        margin: options.margin,
        scale: pass.scale,
        max_column: pass.max_column,
        columns: pass.columns,
        nodes,
        links,
        settings,
    }
}

pub fn layout_json_str(
    text: &str,
    viewport: Viewport,
    options: &LayoutOptions,
) -> Result<SankeyLayout> {
    let table = DataTable::from_json_str(text)?;
    Ok(layout_sankey(&table, viewport, options))
}

pub fn layout_csv_str(
    text: &str,
    viewport: Viewport,
    options: &LayoutOptions,
) -> Result<SankeyLayout> {
    let table = sankey_core::parse_csv_table(text)?;
    Ok(layout_sankey(&table, viewport, options))
}

/// Lays out a data table that is already held as a JSON value.
pub fn layout_value(
    value: serde_json::Value,
    viewport: Viewport,
    options: &LayoutOptions,
) -> Result<SankeyLayout> {
    let table: DataTable = serde_json::from_value(value)?;
    Ok(layout_sankey(&table, viewport, options))
}
