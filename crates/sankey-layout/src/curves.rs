use sankey_core::{Link, SankeyGraph};
use serde::{Deserialize, Serialize};

/// Cubic band centre line: from `(x0, y0)` to `(x1, y1)` with horizontal control points at
/// `cx0` / `cx1` (both control points share the y of their end).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkCurve {
    pub x0: f64,
    pub y0: f64,
    pub cx0: f64,
    pub cx1: f64,
    pub x1: f64,
    pub y1: f64,
}

fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

pub fn link_curve(graph: &SankeyGraph, link: &Link, curvature: f64) -> LinkCurve {
    let source = graph.node(link.source);
    let destination = graph.node(link.destination);

    let (x0, x1) = if destination.x < source.x {
        (source.x, destination.x + destination.width)
    } else {
        (source.x + source.width, destination.x)
    };

    LinkCurve {
        x0,
        y0: source.y + link.dy_source + link.height / 2.0,
        cx0: interpolate(x0, x1, curvature),
        cx1: interpolate(x0, x1, 1.0 - curvature),
        x1,
        y1: destination.y + link.dy_destination + link.height / 2.0,
    }
}
