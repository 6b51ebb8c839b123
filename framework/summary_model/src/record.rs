use serde::{Deserialize, Deserializer};

use crate::MetricName;

/// Scenario name used for samples without a `scenario` tag.
pub const DEFAULT_SCENARIO: &str = "default";

/// Value of the `type` field on metric definition lines.
const METRIC_DEFINITION_TYPE: &str = "Metric";

/// A single sample line from the k6 JSON output.
///
/// Every field is optional at this level. Whether a sample is usable depends on its metric, see
/// [`MetricRecord::value`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricRecord {
    /// `"Point"` for samples, `"Metric"` for definitions.
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    /// Name of the metric the sample belongs to.
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub data: Option<MetricData>,
}

/// The `data` object of a sample line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricData {
    /// RFC 3339 timestamp of the sample.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub tags: Option<MetricTags>,
}

/// The subset of sample tags used for reporting. Other tags are ignored.
///
/// k6 writes tag values as strings; numbers and booleans are accepted and kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricTags {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub scenario: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub method: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub url: Option<String>,
    /// HTTP status code as k6 reports it, e.g. `"200"`.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub status: Option<String>,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar tag value, got {other}"
        ))),
    }
}

/// Reasons a single line cannot be folded into the statistics.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("unexpected record shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("missing `data.value` for `{0}` sample")]
    MissingValue(MetricName),
}

impl MetricRecord {
    /// Whether a raw line is a metric definition rather than a sample.
    ///
    /// Checked on the untyped value so that definitions are skipped regardless of how their
    /// `data` object is shaped.
    pub fn is_definition(value: &serde_json::Value) -> bool {
        value.get("type").and_then(serde_json::Value::as_str) == Some(METRIC_DEFINITION_TYPE)
    }

    /// The known metric a raw line belongs to, read without looking at the rest of the line.
    ///
    /// Returns [`None`] for a missing or unknown metric name, such lines are not summarised.
    pub fn metric_name_of(value: &serde_json::Value) -> Option<MetricName> {
        value
            .get("metric")
            .and_then(serde_json::Value::as_str)
            .and_then(|name| name.parse().ok())
    }

    /// Convert a raw line into a [`MetricRecord`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, RecordError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn tags(&self) -> Option<&MetricTags> {
        self.data.as_ref().and_then(|data| data.tags.as_ref())
    }

    /// The scenario tag, falling back to [`DEFAULT_SCENARIO`].
    pub fn scenario(&self) -> &str {
        self.tags()
            .and_then(|tags| tags.scenario.as_deref())
            .unwrap_or(DEFAULT_SCENARIO)
    }

    pub fn time(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.time.as_deref())
    }

    /// The numeric sample value, required for every metric except `http_reqs`.
    pub fn value(&self, metric: MetricName) -> Result<f64, RecordError> {
        self.data
            .as_ref()
            .and_then(|data| data.value)
            .ok_or(RecordError::MissingValue(metric))
    }
}
