use serde_json::{Map, Value};

/// Visual-level styling objects (`labels.*`, `links.*`) as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyConfig(Value);

impl Default for SankeyConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl SankeyConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn get_value(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get_value(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get_value(dotted_path)?.as_f64()
    }

    /// Reads a colour property. Accepts a plain string or the host's fill object
    /// (`{ "solid": { "color": "..." } }`).
    pub fn get_color(&self, dotted_path: &str) -> Option<&str> {
        color_from_value(self.get_value(dotted_path)?)
    }
}

pub(crate) fn color_from_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
        Value::Object(map) => map
            .get("solid")
            .and_then(|solid| solid.get("color"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_lookups_walk_nested_objects() {
        let cfg = SankeyConfig::from_value(json!({
            "labels": { "show": false, "fontSize": 9, "fill": "red" }
        }));
        assert_eq!(cfg.get_bool("labels.show"), Some(false));
        assert_eq!(cfg.get_f64("labels.fontSize"), Some(9.0));
        assert_eq!(cfg.get_color("labels.fill"), Some("red"));
        assert_eq!(cfg.get_value("labels.missing"), None);
        assert_eq!(cfg.get_bool("labels.show.deeper"), None);
    }

    #[test]
    fn colors_accept_plain_strings_and_solid_fill_objects() {
        let cfg = SankeyConfig::from_value(json!({
            "labels": { "fill": { "solid": { "color": "#123456" } } },
            "links": { "fill": "gray" },
            "empty": { "fill": "  " }
        }));
        assert_eq!(cfg.get_color("labels.fill"), Some("#123456"));
        assert_eq!(cfg.get_color("links.fill"), Some("gray"));
        assert_eq!(cfg.get_color("empty.fill"), None);
    }
}
