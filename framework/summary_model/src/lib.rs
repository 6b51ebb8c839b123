//! Shared types for summarising k6 JSON output.
//!
//! k6 writes one JSON object per line when run with `--out json=<file>`. Each line is either a
//! metric definition (`"type": "Metric"`) or a sample (`"type": "Point"`). This crate models the
//! sample lines and the per-scenario accumulator they are folded into.

mod metric_name;
mod record;
mod stats;

pub use metric_name::MetricName;
pub use record::{MetricData, MetricRecord, MetricTags, RecordError, DEFAULT_SCENARIO};
pub use stats::{RequestRecord, ScenarioStats};
