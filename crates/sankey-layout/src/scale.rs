use crate::columns::Column;
use sankey_core::positive_number;
use serde::{Deserialize, Serialize};

/// Pixels per column step (`x`) and per weight unit (`y`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// Spreads columns so the last one ends flush with the right edge. A single column (or none)
/// has no horizontal step.
pub fn x_scale(viewport_width: f64, node_width: f64, max_column: Option<usize>) -> f64 {
    let steps = max_column.unwrap_or(0) as f64;
    positive_number((viewport_width - node_width) / steps)
}

/// Fits the busiest column into the viewport height minus the bottom margin.
pub fn y_scale(viewport_height: f64, bottom_margin_percent: f64, busiest: &Column) -> f64 {
    let reserved = viewport_height * bottom_margin_percent / 100.0;
    positive_number((viewport_height - reserved) / busiest.total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(total_weight: f64) -> Column {
        Column {
            node_count: 1,
            total_weight,
        }
    }

    #[test]
    fn x_scale_divides_the_free_width_by_column_steps() {
        assert_eq!(x_scale(221.5, 21.5, Some(2)), 100.0);
    }

    #[test]
    fn x_scale_is_zero_without_steps_or_room() {
        assert_eq!(x_scale(500.0, 21.5, Some(0)), 0.0);
        assert_eq!(x_scale(500.0, 21.5, None), 0.0);
        assert_eq!(x_scale(10.0, 21.5, Some(3)), 0.0);
        assert_eq!(x_scale(0.0, 0.0, Some(0)), 0.0);
    }

    #[test]
    fn y_scale_keeps_five_percent_free() {
        assert_eq!(y_scale(200.0, 5.0, &column(19.0)), 10.0);
    }

    #[test]
    fn y_scale_is_zero_for_weightless_columns_or_empty_viewports() {
        assert_eq!(y_scale(200.0, 5.0, &column(0.0)), 0.0);
        assert_eq!(y_scale(0.0, 5.0, &column(0.0)), 0.0);
        assert_eq!(y_scale(0.0, 5.0, &column(10.0)), 0.0);
    }
}
