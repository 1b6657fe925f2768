use sankey_core::{NodeId, SankeyGraph, positive_number};
use std::cmp::Ordering;

fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sets every link's height and stacks links at both ends of every node.
///
/// At each node, incident links are ordered by the `y` of their opposite endpoint. Links
/// coming from a lower column stack on the left side, links going to a higher column on the
/// right side, each side starting at 0. Links whose other end shares the node's column get
/// offset 0 and take no room.
pub fn resolve_link_offsets(graph: &mut SankeyGraph, y_scale: f64) {
    for link in graph.links_mut() {
        link.height = positive_number(link.weight * y_scale);
    }

    let ids: Vec<NodeId> = graph.node_ids().collect();
    for id in ids {
        let mut links = std::mem::take(&mut graph.node_mut(id).links);
        links.sort_by(|&a, &b| {
            let ya = graph.node(graph.link(a).other_end(id)).y;
            let yb = graph.node(graph.link(b).other_end(id)).y;
            f64_cmp(ya, yb)
        });

        let column = graph.node(id).column;
        let mut left = 0.0;
        let mut right = 0.0;
        for &link_id in &links {
            let link = graph.link(link_id);
            let other_column = graph.node(link.other_end(id)).column;
            let offset = match other_column.cmp(&column) {
                Ordering::Less => {
                    let offset = left;
                    left += link.height;
                    offset
                }
                Ordering::Greater => {
                    let offset = right;
                    right += link.height;
                    offset
                }
                Ordering::Equal => 0.0,
            };

            let link = graph.link_mut(link_id);
            if link.source == id {
                link.dy_source = offset;
            } else {
                link.dy_destination = offset;
            }
        }

        graph.node_mut(id).links = links;
    }
}
