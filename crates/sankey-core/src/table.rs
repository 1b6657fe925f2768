use crate::config::{SankeyConfig, color_from_value};
use crate::settings::Settings;
use crate::utils::{format_category, number_from_value, positive_number};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categorical query result: index-aligned source and destination categories, an optional
/// weight column and optional styling objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    #[serde(default)]
    pub source: Option<Vec<Value>>,
    #[serde(default)]
    pub destination: Option<Vec<Value>>,
    /// `None` means the relation is unweighted (every row weighs `1`).
    #[serde(default)]
    pub weight: Option<Vec<Value>>,
    /// Per-row styling, e.g. `{ "links": { "fill": "red" } }`. Shorter than the row count is fine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_objects: Vec<Value>,
    /// Visual-level styling (`labels.*`, `links.*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Value>,
}

/// One normalized row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub source: String,
    pub destination: String,
    pub weight: f64,
    pub link_color: Option<String>,
}

impl Record {
    pub fn is_self_reference(&self) -> bool {
        self.source == self.destination
    }
}

impl DataTable {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds a table from `(source, destination, weight)` rows. A `None` weight is a missing
    /// cell, not an unweighted relation.
    pub fn from_rows<I, S, D>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, D, Option<f64>)>,
        S: Into<String>,
        D: Into<String>,
    {
        let mut table = DataTable {
            source: Some(Vec::new()),
            destination: Some(Vec::new()),
            weight: Some(Vec::new()),
            ..Default::default()
        };
        for (source, destination, weight) in rows {
            push_row(&mut table, source.into(), destination.into(), weight);
        }
        table
    }

    /// Builds an unweighted table from `(source, destination)` pairs.
    pub fn from_pairs<I, S, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        let (source, destination) = pairs
            .into_iter()
            .map(|(s, d)| (Value::String(s.into()), Value::String(d.into())))
            .unzip();
        DataTable {
            source: Some(source),
            destination: Some(destination),
            ..Default::default()
        }
    }

    pub fn config(&self) -> SankeyConfig {
        match &self.objects {
            Some(v) => SankeyConfig::from_value(v.clone()),
            None => SankeyConfig::default(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings::from_config(&self.config())
    }

    pub fn row_count(&self) -> usize {
        match (&self.source, &self.destination) {
            (Some(s), Some(d)) => s.len().min(d.len()),
            _ => 0,
        }
    }

    /// Normalized rows. A table without both category columns has no rows.
    pub fn records(&self) -> Vec<Record> {
        let (Some(sources), Some(destinations)) = (&self.source, &self.destination) else {
            return Vec::new();
        };
        if sources.len() != destinations.len() {
            tracing::warn!(
                sources = sources.len(),
                destinations = destinations.len(),
                "category columns differ in length; extra rows are ignored"
            );
        }

        let visual_fill = self.config().get_color("links.fill").map(str::to_string);
        sources
            .iter()
            .zip(destinations)
            .enumerate()
            .map(|(i, (s, d))| Record {
                source: format_category(s),
                destination: format_category(d),
                weight: self.weight_at(i),
                link_color: self.row_link_color(i).or_else(|| visual_fill.clone()),
            })
            .collect()
    }

    fn weight_at(&self, row: usize) -> f64 {
        match &self.weight {
            None => 1.0,
            Some(weights) => positive_number(weights.get(row).and_then(number_from_value)),
        }
    }

    fn row_link_color(&self, row: usize) -> Option<String> {
        let obj = self.row_objects.get(row)?;
        let fill = obj.get("links")?.get("fill")?;
        color_from_value(fill).map(str::to_string)
    }
}

fn push_row(table: &mut DataTable, source: String, destination: String, weight: Option<f64>) {
    let weight = match weight.and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::Null,
    };
    if let Some(col) = table.source.as_mut() {
        col.push(Value::String(source));
    }
    if let Some(col) = table.destination.as_mut() {
        col.push(Value::String(destination));
    }
    if let Some(col) = table.weight.as_mut() {
        col.push(weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_category_columns_yield_no_records() {
        let table = DataTable::from_json_str(r#"{ "source": ["A"] }"#).unwrap();
        assert!(table.records().is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn weights_are_coerced_per_row() {
        let table = DataTable::from_json_str(
            r#"{
                "source": ["A", "A", "A", "A", "A"],
                "destination": ["B", "C", "D", "E", "F"],
                "weight": [3, -2, null, "4.5", "x"]
            }"#,
        )
        .unwrap();
        let weights: Vec<f64> = table.records().iter().map(|r| r.weight).collect();
        assert_eq!(weights, [3.0, 0.0, 0.0, 4.5, 0.0]);
    }

    #[test]
    fn short_weight_column_pads_with_zero() {
        let table = DataTable::from_json_str(
            r#"{ "source": ["A", "B"], "destination": ["B", "C"], "weight": [1] }"#,
        )
        .unwrap();
        let weights: Vec<f64> = table.records().iter().map(|r| r.weight).collect();
        assert_eq!(weights, [1.0, 0.0]);
    }

    #[test]
    fn unweighted_tables_weigh_one_per_row() {
        let table = DataTable::from_pairs([("A", "B"), ("B", "C")]);
        assert!(table.records().iter().all(|r| r.weight == 1.0));
    }

    #[test]
    fn numeric_categories_become_labels() {
        let table = DataTable::from_json_str(r#"{ "source": [2020], "destination": [2021.5] }"#)
            .unwrap();
        let rec = &table.records()[0];
        assert_eq!(rec.source, "2020");
        assert_eq!(rec.destination, "2021.5");
    }

    #[test]
    fn row_objects_override_the_visual_link_fill() {
        let table = DataTable {
            row_objects: vec![json!({ "links": { "fill": { "solid": { "color": "red" } } } })],
            objects: Some(json!({ "links": { "fill": "blue" } })),
            ..DataTable::from_rows([("A", "B", Some(1.0)), ("B", "C", Some(1.0))])
        };
        let colors: Vec<_> = table
            .records()
            .into_iter()
            .map(|r| r.link_color)
            .collect();
        assert_eq!(colors, [Some("red".to_string()), Some("blue".to_string())]);
    }

    #[test]
    fn mismatched_columns_truncate_to_the_shorter_one() {
        let table = DataTable::from_json_str(
            r#"{ "source": ["A", "B", "C"], "destination": ["B", "C"] }"#,
        )
        .unwrap();
        assert_eq!(table.records().len(), 2);
        assert_eq!(table.row_count(), 2);
    }
}
