//! Summarise k6 JSON output into Markdown reports.
//!
//! The k6 output for each load level is folded into per-scenario statistics by
//! [`ScenarioAggregator`], rendered by [`generate_report`], and the per-level summary rows are
//! combined by [`generate_comparison_report`]. [`generate_reports`] drives the whole process over
//! a set of load levels on disk.

mod aggregator;
mod analyze;
pub mod jsonl;
mod pipeline;
mod report;

pub use aggregator::{Aggregation, ScenarioAggregator};
pub use analyze::{success_rate, LatencyStats};
pub use pipeline::{generate_reports, LevelOutcome, ReportConfig, RunOutcome};
pub use report::{
    generate_comparison_report, generate_report, render_comparison_document,
    render_level_document, LevelReport, SummaryRow,
};
