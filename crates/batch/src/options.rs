use linkfile_url::DedupeMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-batch switches supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Drop later duplicates of an earlier URL.
    pub dedupe: bool,
    pub dedupe_mode: DedupeMode,
    pub export_csv: bool,
    pub export_json: bool,
    /// Ordered export field keys. Empty means "format default".
    pub export_fields: Vec<String>,
    pub qr_png: bool,
    pub qr_svg: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dedupe: true,
            dedupe_mode: DedupeMode::Exact,
            export_csv: true,
            export_json: true,
            export_fields: Vec::new(),
            qr_png: false,
            qr_svg: false,
        }
    }
}

impl BatchOptions {
    pub fn wants_qr(&self) -> bool {
        self.qr_png || self.qr_svg
    }

    /// Overlay every recognised, correctly typed option found in `value`.
    ///
    /// Unknown keys and values of the wrong type are ignored, so a saved
    /// session from an older or newer writer restores as much as it can.
    pub fn merge_value(&mut self, value: &Value) {
        let Some(object) = value.as_object() else {
            return;
        };
        let flag = |key: &str| object.get(key).and_then(Value::as_bool);
        if let Some(dedupe) = flag("dedupe") {
            self.dedupe = dedupe;
        }
        if let Some(mode) = object.get("dedupeMode").and_then(Value::as_str).and_then(|s| s.parse().ok()) {
            self.dedupe_mode = mode;
        }
        if let Some(csv) = flag("exportCsv") {
            self.export_csv = csv;
        }
        if let Some(json) = flag("exportJson") {
            self.export_json = json;
        }
        if let Some(fields) = object.get("exportFields").and_then(Value::as_array) {
            self.export_fields = fields.iter().filter_map(Value::as_str).map(str::to_string).collect();
        }
        if let Some(png) = flag("qrPng") {
            self.qr_png = png;
        }
        if let Some(svg) = flag("qrSvg") {
            self.qr_svg = svg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(BatchOptions::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "dedupe": true,
                "dedupeMode": "exact",
                "exportCsv": true,
                "exportJson": true,
                "exportFields": [],
                "qrPng": false,
                "qrSvg": false,
            })
        );
    }

    #[test]
    fn test_merge_value_ignores_wrong_types() {
        let mut options = BatchOptions::default();
        options.merge_value(&json!({
            "dedupe": "yes",
            "dedupeMode": "aggressive",
            "exportCsv": false,
            "exportFields": ["raw", 3, "host"],
            "qrSvg": true,
            "somethingElse": 1,
        }));
        assert!(options.dedupe);
        assert_eq!(options.dedupe_mode, DedupeMode::Aggressive);
        assert!(!options.export_csv);
        assert!(options.export_json);
        assert_eq!(options.export_fields, ["raw", "host"]);
        assert!(options.wants_qr());
    }

    #[test]
    fn test_merge_value_unknown_mode_keeps_current() {
        let mut options = BatchOptions { dedupe_mode: DedupeMode::Loose, ..Default::default() };
        options.merge_value(&json!({ "dedupeMode": "fuzzy" }));
        assert_eq!(options.dedupe_mode, DedupeMode::Loose);
        options.merge_value(&json!(["not", "an", "object"]));
        assert_eq!(options, BatchOptions { dedupe_mode: DedupeMode::Loose, ..Default::default() });
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let options: BatchOptions = serde_json::from_value(json!({ "qrPng": true })).unwrap();
        assert!(options.qr_png && options.dedupe && options.export_csv);
    }
}
