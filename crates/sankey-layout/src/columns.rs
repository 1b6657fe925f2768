//! Column assignment (breadth-first layering) and per-column aggregation.

use rustc_hash::FxHashSet as HashSet;
use sankey_core::{NodeId, SankeyGraph};
use serde::{Deserialize, Serialize};

/// Assigns every node a column and returns the largest column index (`None` for an empty
/// graph).
///
/// All nodes start in the frontier at column 0. Each step stamps the current column on the
/// frontier and moves on to the destinations of the frontier's outgoing links. When the next
/// frontier is set-equal to the previous one (the frontier just stamped; empty on the first
/// step) the layering went round a cycle: the frontier keeps the current column and layering
/// stops.
pub fn assign_columns(graph: &mut SankeyGraph) -> Option<usize> {
    if graph.is_empty() {
        return None;
    }

    let node_count = graph.node_count();
    let mut frontier: Vec<NodeId> = graph.node_ids().collect();
    let mut previous: Vec<NodeId> = Vec::new();
    let mut column = 0usize;

    while !frontier.is_empty() {
        for &id in &frontier {
            graph.node_mut(id).column = column;
        }

        let next = next_frontier(graph, &frontier);
        if !next.is_empty() && set_equal(&next, &previous) {
            tracing::debug!(
                column,
                nodes = frontier.len(),
                "cyclic frontier reached a fixed point; freezing"
            );
            break;
        }

        // Each frontier is a subset of the one before.
        debug_assert!(column <= node_count, "column assignment did not converge");

        frontier = next;
        previous = frontier.clone();
        column += 1;
    }

    graph.nodes().iter().map(|n| n.column).max()
}

fn next_frontier(graph: &SankeyGraph, frontier: &[NodeId]) -> Vec<NodeId> {
    let mut seen: HashSet<NodeId> = HashSet::default();
    let mut next = Vec::new();
    for &id in frontier {
        for link in graph.outgoing(id) {
            if link.destination != id && seen.insert(link.destination) {
                next.push(link.destination);
            }
        }
    }
    next
}

fn set_equal(a: &[NodeId], b: &[NodeId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let members: HashSet<NodeId> = a.iter().copied().collect();
    b.iter().all(|id| members.contains(id))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub node_count: usize,
    /// Sum of `max(input_weight, output_weight)` over the column's nodes.
    pub total_weight: f64,
}

/// One entry per column index `0..=max_column`; columns without nodes stay zeroed.
pub fn aggregate_columns(graph: &SankeyGraph) -> Vec<Column> {
    let Some(max_column) = graph.nodes().iter().map(|n| n.column).max() else {
        return Vec::new();
    };
    let mut columns = vec![Column::default(); max_column + 1];
    for node in graph.nodes() {
        let column = &mut columns[node.column];
        column.node_count += 1;
        column.total_weight += node.weight();
    }
    columns
}

/// The first column with the greatest total weight, or an empty column when no column
/// carries any weight.
pub fn busiest_column(columns: &[Column]) -> Column {
    let mut busiest = Column::default();
    for column in columns {
        if column.total_weight > busiest.total_weight {
            busiest = *column;
        }
    }
    busiest
}

/// Node handles grouped by column, in creation order within each column.
pub fn column_members(graph: &SankeyGraph, column_count: usize) -> Vec<Vec<NodeId>> {
    let mut members = vec![Vec::new(); column_count];
    for node in graph.nodes() {
        if let Some(bucket) = members.get_mut(node.column) {
            bucket.push(node.id);
        }
    }
    members
}
