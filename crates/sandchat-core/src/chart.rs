//! Chart directive model and normalization.
//!
//! A chart directive is untrusted, externally-authored JSON with only a
//! loose shape contract: the backend may evolve it, so required fields are
//! checked where they are used and everything else passes through
//! opaquely. Normalization fills visual gaps (colors, layout defaults)
//! deterministically and never overwrites a field the directive already
//! set.

use serde_json::{Map, Value, json};

/// Hue step of the color rotation, in degrees. Evenly spaced modulo 360 so
/// colors stay visually stable across renders and never repeat trivially
/// for small dataset counts.
const HUE_STEP_DEG: usize = 57;

/// Chart types that color per category (label) rather than per dataset.
const RADIAL_TYPES: [&str; 3] = ["pie", "doughnut", "polarArea"];

fn hue(index: usize) -> usize {
    (index * HUE_STEP_DEG) % 360
}

fn dataset_stroke(index: usize) -> String {
    format!("hsl({}, 70%, 55%)", hue(index))
}

fn dataset_fill(index: usize) -> String {
    format!("hsla({}, 70%, 55%, 0.35)", hue(index))
}

fn category_fill(index: usize) -> String {
    format!("hsla({}, 70%, 55%, 0.55)", hue(index))
}

fn category_stroke(index: usize) -> String {
    format!("hsl({}, 70%, 45%)", hue(index))
}

/// An embedded chart specification extracted from a reply.
///
/// Wraps the parsed JSON; construction guarantees only that the value is
/// structured (an object or an array), matching what the render pipeline
/// will accept at all. Everything deeper is validated at the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDirective(Value);

impl ChartDirective {
    /// Wraps a parsed value, rejecting anything that is not structured
    /// data. Scalars and null cannot describe a chart.
    pub fn from_value(value: Value) -> Option<Self> {
        if value.is_object() || value.is_array() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Parses a JSON string into a directive. Any parse failure or
    /// non-structured result yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw).ok().and_then(Self::from_value)
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the directive, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The declared chart type, when present and a string.
    pub fn chart_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Whether the declared type colors per category (pie family).
    pub fn is_radial(&self) -> bool {
        self.chart_type()
            .is_some_and(|t| RADIAL_TYPES.contains(&t))
    }

    /// The labels array of the directive, when present and a list.
    pub fn labels(&self) -> Option<&Vec<Value>> {
        self.0
            .get("data")
            .and_then(|d| d.get("labels"))
            .and_then(Value::as_array)
    }

    /// Fills in missing visual defaults, in place.
    ///
    /// A directive lacking a string `type` or a `data.datasets` list is a
    /// chart specification this client cannot complete; normalization is
    /// then a no-op rather than an error. Otherwise:
    ///
    /// - datasets missing a border/background color get one synthesized
    ///   from their index (hue rotation, fixed saturation/lightness);
    /// - radial types get one color per label index instead, covering the
    ///   whole `labels` array (zero colors when labels are absent);
    /// - layout defaults (`responsive`, `maintainAspectRatio`, `plugins`)
    ///   are applied only where the directive left a gap.
    ///
    /// Idempotent once every dataset carries explicit colors.
    pub fn normalize(&mut self) {
        if self.chart_type().is_none() {
            return;
        }
        let radial = self.is_radial();
        let label_count = self.labels().map_or(0, Vec::len);

        let Some(datasets) = self
            .0
            .get_mut("data")
            .and_then(|d| d.get_mut("datasets"))
            .and_then(Value::as_array_mut)
        else {
            return;
        };

        for (index, dataset) in datasets.iter_mut().enumerate() {
            let Some(dataset) = dataset.as_object_mut() else {
                continue;
            };
            fill_dataset_colors(dataset, index, radial, label_count);
        }

        self.apply_layout_defaults();
    }

    /// Layout gaps: responsive sizing on, aspect-ratio preservation off
    /// (the host supplies an explicit height), an empty plugin list.
    fn apply_layout_defaults(&mut self) {
        let Some(root) = self.0.as_object_mut() else {
            return;
        };

        let options = root
            .entry("options")
            .or_insert_with(|| Value::Object(Map::new()));
        if options.is_null() {
            *options = Value::Object(Map::new());
        }
        if let Some(options) = options.as_object_mut() {
            options.entry("responsive").or_insert(Value::Bool(true));
            let keep_aspect = options
                .get("maintainAspectRatio")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if !keep_aspect {
                options.insert("maintainAspectRatio".to_string(), Value::Bool(false));
            }
        }

        let plugins = root
            .entry("plugins")
            .or_insert_with(|| Value::Array(Vec::new()));
        if plugins.is_null() {
            *plugins = Value::Array(Vec::new());
        }
    }
}

/// Synthesizes the missing colors of one dataset.
fn fill_dataset_colors(
    dataset: &mut Map<String, Value>,
    index: usize,
    radial: bool,
    label_count: usize,
) {
    let needs_border = !dataset.contains_key("borderColor");
    let needs_background = !dataset.contains_key("backgroundColor");

    if radial {
        // Per-category coloring: one entry per label index.
        if needs_background {
            let fills: Vec<Value> = (0..label_count).map(|i| json!(category_fill(i))).collect();
            dataset.insert("backgroundColor".to_string(), Value::Array(fills));
        }
        if needs_border {
            let strokes: Vec<Value> = (0..label_count).map(|i| json!(category_stroke(i))).collect();
            dataset.insert("borderColor".to_string(), Value::Array(strokes));
        }
    } else {
        if needs_border {
            dataset.insert("borderColor".to_string(), json!(dataset_stroke(index)));
        }
        if needs_background {
            dataset.insert("backgroundColor".to_string(), json!(dataset_fill(index)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_directive(datasets: Value) -> ChartDirective {
        ChartDirective::from_value(json!({
            "type": "bar",
            "data": { "labels": ["A", "B"], "datasets": datasets }
        }))
        .unwrap()
    }

    #[test]
    fn test_from_value_requires_structured_data() {
        assert!(ChartDirective::from_value(json!({"type": "bar"})).is_some());
        assert!(ChartDirective::from_value(json!([1, 2])).is_some());
        assert!(ChartDirective::from_value(json!("bar")).is_none());
        assert!(ChartDirective::from_value(json!(42)).is_none());
        assert!(ChartDirective::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_parse_invalid_json_is_none() {
        assert!(ChartDirective::parse("{not json").is_none());
        assert!(ChartDirective::parse("\"just a string\"").is_none());
    }

    #[test]
    fn test_normalize_noop_without_type() {
        let mut directive = ChartDirective::from_value(json!({
            "data": { "datasets": [{ "data": [1] }] }
        }))
        .unwrap();
        let before = directive.clone();
        directive.normalize();
        assert_eq!(directive, before);
    }

    #[test]
    fn test_normalize_noop_without_datasets() {
        let mut directive =
            ChartDirective::from_value(json!({ "type": "bar", "data": {} })).unwrap();
        let before = directive.clone();
        directive.normalize();
        assert_eq!(directive, before);
    }

    #[test]
    fn test_dataset_colors_follow_hue_rotation() {
        let mut directive = bar_directive(json!([
            { "data": [1, 2] },
            { "data": [3, 4] }
        ]));
        directive.normalize();

        let datasets = directive.as_value()["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets[0]["borderColor"], "hsl(0, 70%, 55%)");
        assert_eq!(datasets[0]["backgroundColor"], "hsla(0, 70%, 55%, 0.35)");
        assert_eq!(datasets[1]["borderColor"], "hsl(57, 70%, 55%)");
        assert_eq!(datasets[1]["backgroundColor"], "hsla(57, 70%, 55%, 0.35)");
    }

    #[test]
    fn test_hue_wraps_past_full_circle() {
        // Index 7 lands at 399 degrees, which wraps to 39.
        assert_eq!(dataset_stroke(7), "hsl(39, 70%, 55%)");
    }

    #[test]
    fn test_caller_colors_never_overwritten() {
        let mut directive = bar_directive(json!([
            { "data": [1], "borderColor": "red", "backgroundColor": "blue" }
        ]));
        directive.normalize();

        let dataset = &directive.as_value()["data"]["datasets"][0];
        assert_eq!(dataset["borderColor"], "red");
        assert_eq!(dataset["backgroundColor"], "blue");
    }

    #[test]
    fn test_partial_colors_only_fill_the_gap() {
        let mut directive = bar_directive(json!([
            { "data": [1], "borderColor": "red" }
        ]));
        directive.normalize();

        let dataset = &directive.as_value()["data"]["datasets"][0];
        assert_eq!(dataset["borderColor"], "red");
        assert_eq!(dataset["backgroundColor"], "hsla(0, 70%, 55%, 0.35)");
    }

    #[test]
    fn test_radial_colors_cover_every_label() {
        let mut directive = ChartDirective::from_value(json!({
            "type": "pie",
            "data": { "labels": ["A", "B", "C"], "datasets": [{ "data": [1, 2, 3] }] }
        }))
        .unwrap();
        directive.normalize();

        let dataset = &directive.as_value()["data"]["datasets"][0];
        let fills = dataset["backgroundColor"].as_array().unwrap();
        let strokes = dataset["borderColor"].as_array().unwrap();
        assert_eq!(fills.len(), 3);
        assert_eq!(strokes.len(), 3);
        assert_eq!(fills[0], "hsla(0, 70%, 55%, 0.55)");
        assert_eq!(fills[2], "hsla(114, 70%, 55%, 0.55)");
        assert_eq!(strokes[1], "hsl(57, 70%, 45%)");
    }

    #[test]
    fn test_radial_without_labels_gets_zero_colors() {
        let mut directive = ChartDirective::from_value(json!({
            "type": "doughnut",
            "data": { "datasets": [{ "data": [] }] }
        }))
        .unwrap();
        directive.normalize();

        let dataset = &directive.as_value()["data"]["datasets"][0];
        assert_eq!(dataset["backgroundColor"], json!([]));
        assert_eq!(dataset["borderColor"], json!([]));
    }

    #[test]
    fn test_layout_defaults_fill_gaps_only() {
        let mut directive = bar_directive(json!([{ "data": [1] }]));
        directive.normalize();

        let options = &directive.as_value()["options"];
        assert_eq!(options["responsive"], true);
        assert_eq!(options["maintainAspectRatio"], false);
        assert_eq!(directive.as_value()["plugins"], json!([]));
    }

    #[test]
    fn test_caller_layout_flags_kept() {
        let mut directive = ChartDirective::from_value(json!({
            "type": "bar",
            "data": { "datasets": [{ "data": [1] }] },
            "options": { "responsive": false, "maintainAspectRatio": true },
            "plugins": ["datalabels"]
        }))
        .unwrap();
        directive.normalize();

        let options = &directive.as_value()["options"];
        assert_eq!(options["responsive"], false);
        assert_eq!(options["maintainAspectRatio"], true);
        assert_eq!(directive.as_value()["plugins"], json!(["datalabels"]));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let mut directive = ChartDirective::from_value(json!({
            "type": "bar",
            "data": { "datasets": [{ "data": [1], "futureField": {"x": 1} }] },
            "vendorExtension": [1, 2, 3]
        }))
        .unwrap();
        directive.normalize();

        assert_eq!(
            directive.as_value()["vendorExtension"],
            json!([1, 2, 3])
        );
        assert_eq!(
            directive.as_value()["data"]["datasets"][0]["futureField"],
            json!({"x": 1})
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut once = ChartDirective::from_value(json!({
            "type": "line",
            "data": { "labels": ["A"], "datasets": [{ "data": [1] }, { "data": [2] }] }
        }))
        .unwrap();
        once.normalize();

        let mut twice = once.clone();
        twice.normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_object_dataset_entries_skipped() {
        let mut directive = bar_directive(json!([42, { "data": [1] }]));
        directive.normalize();

        let datasets = directive.as_value()["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets[0], json!(42));
        assert_eq!(datasets[1]["borderColor"], "hsl(57, 70%, 55%)");
    }
}
