use crate::columns::Column;
use crate::scale::Scale;
use sankey_core::{NodeId, SankeyGraph, positive_number};

/// Gives every node its final `x`, `y`, `width` and `height`.
///
/// Inside a column, nodes stack in order; the height the column does not use is split evenly
/// and node `k` is pushed down by `k` shares of it. Every derived value goes through
/// [`positive_number`], so weights that overflow to infinity collapse to 0 instead of NaN.
pub fn pack_columns(
    graph: &mut SankeyGraph,
    members: &[Vec<NodeId>],
    columns: &[Column],
    scale: Scale,
    viewport_height: f64,
    node_width: f64,
) {
    for (index, ids) in members.iter().enumerate() {
        let column = columns.get(index).copied().unwrap_or_default();
        let slack = if column.node_count > 0 {
            let available = viewport_height - column.total_weight * scale.y;
            positive_number(available / column.node_count as f64)
        } else {
            0.0
        };

        let mut shift = 0.0;
        for (k, &id) in ids.iter().enumerate() {
            let node = graph.node_mut(id);
            node.x = positive_number(index as f64 * scale.x);
            node.width = node_width;
            node.height = positive_number(node.weight() * scale.y);
            node.y = positive_number(shift + slack * k as f64);
            shift += node.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{aggregate_columns, assign_columns, column_members};
    use sankey_core::{DataTable, build_graph};

    #[test]
    fn two_nodes_share_the_column_by_weight() {
        let mut g = build_graph(
            &DataTable::from_rows([("A", "Out", Some(3.0)), ("B", "Out", Some(7.0))]),
            &[],
        );
        let max = assign_columns(&mut g);
        let columns = aggregate_columns(&g);
        let members = column_members(&g, columns.len());
        let scale = Scale { x: 50.0, y: 9.5 };
        pack_columns(&mut g, &members, &columns, scale, 100.0, 20.0);
        assert_eq!(max, Some(1));

        let a = g.node_by_label("A").unwrap();
        let b = g.node_by_label("B").unwrap();
        assert_eq!(a.height, 28.5);
        assert_eq!(b.height, 66.5);
        assert_eq!(a.y, 0.0);
        // 100 - 95 leaves 5px, 2.5px per node.
        assert_eq!(b.y, 31.0);
        assert_eq!(a.x, 0.0);
        assert_eq!(a.width, 20.0);

        let out = g.node_by_label("Out").unwrap();
        assert_eq!(out.x, 50.0);
        assert_eq!(out.y, 0.0);
        assert_eq!(out.height, 95.0);
    }

    #[test]
    fn overflowing_weights_do_not_produce_nan() {
        let mut g = build_graph(
            &DataTable::from_rows([("A", "C", Some(1e308)), ("B", "C", Some(1e308))]),
            &[],
        );
        assign_columns(&mut g);
        let columns = aggregate_columns(&g);
        assert_eq!(columns[1].total_weight, f64::INFINITY);
        let members = column_members(&g, columns.len());
        pack_columns(&mut g, &members, &columns, Scale { x: 100.0, y: 0.0 }, 100.0, 20.0);
        for n in g.nodes() {
            assert_eq!((n.y, n.height), (0.0, 0.0), "{}", n.label.name);
        }
    }

    #[test]
    fn zero_scales_collapse_everything_without_panicking() {
        let mut g = build_graph(&DataTable::from_rows([("A", "B", Some(1.0))]), &[]);
        assign_columns(&mut g);
        let columns = aggregate_columns(&g);
        let members = column_members(&g, columns.len());
        pack_columns(&mut g, &members, &columns, Scale::default(), 0.0, 0.0);
        for n in g.nodes() {
            assert_eq!((n.x, n.y, n.width, n.height), (0.0, 0.0, 0.0, 0.0));
        }
    }
}
