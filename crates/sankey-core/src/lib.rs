#![forbid(unsafe_code)]

//! Headless Sankey input model and graph builder.
//!
//! A [`DataTable`] (index-aligned source, destination and weight columns plus styling objects)
//! is normalized into [`table::Record`]s and turned into an arena [`SankeyGraph`] by
//! [`build_graph`]. Positioning happens in `sankey-layout`.

pub mod config;
pub mod csv;
pub mod error;
pub mod graph;
pub mod palette;
pub mod settings;
pub mod table;
pub mod utils;

pub use config::SankeyConfig;
pub use csv::parse_csv_table;
pub use error::{Error, Result};
pub use graph::{
    GraphBuilder, Label, Link, LinkId, Node, NodeId, SankeyGraph, build_graph,
    build_graph_from_records,
};
pub use palette::DEFAULT_PALETTE;
pub use settings::{DEFAULTS, Defaults, Margin, Settings};
pub use table::{DataTable, Record};
pub use utils::positive_number;

use serde::{Deserialize, Serialize};

/// Pixel size of a drawing area. Both sides are normalized with [`positive_number`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: positive_number(width),
            height: positive_number(height),
        }
    }

    /// The area left after removing `margin` from every side.
    pub fn shrink(&self, margin: &Margin) -> Self {
        Self::new(
            self.width - margin.left - margin.right,
            self.height - margin.top - margin.bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_normalizes_bad_sizes() {
        let v = Viewport::new(f64::NAN, -10.0);
        assert_eq!(v, Viewport::new(0.0, 0.0));
        assert_eq!(Viewport::new(f64::INFINITY, 5.0).width, 0.0);
    }

    #[test]
    fn shrinking_past_zero_clamps() {
        let inner = Viewport::new(15.0, 100.0).shrink(&DEFAULTS.margin);
        assert_eq!(inner, Viewport::new(0.0, 80.0));
    }
}
