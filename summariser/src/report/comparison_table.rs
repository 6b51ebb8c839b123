use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Compact per-scenario result for one load level, one line of the comparison report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "VUs")]
    pub vus: u64,
    #[tabled(rename = "Scenario")]
    pub scenario: String,
    #[tabled(rename = "Requests")]
    pub requests: usize,
    /// `"{avg}±{p95}ms"`
    #[tabled(rename = "Latency (avg±p95)")]
    pub latency: String,
    #[tabled(rename = "Checks Passed")]
    pub checks: String,
    #[tabled(rename = "Data Sent (KB)")]
    pub data_sent_kb: String,
    #[tabled(rename = "Data Received (KB)")]
    pub data_received_kb: String,
    #[tabled(rename = "Success Rate")]
    pub success_rate: String,
}
