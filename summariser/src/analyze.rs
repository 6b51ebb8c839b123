use itertools::Itertools;
use k6_summary_model::ScenarioStats;

/// Percentile reported alongside the average latency.
const LATENCY_PERCENTILE: f64 = 0.95;

const BYTES_PER_KB: f64 = 1024.0;

/// Latency statistics over a list of request durations, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencyStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
}

impl LatencyStats {
    /// All statistics are `0` when there are no durations.
    pub fn from_durations(durations: &[f64]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let sorted = durations
            .iter()
            .copied()
            .sorted_by(f64::total_cmp)
            .collect::<Vec<_>>();

        Self {
            avg: durations.iter().sum::<f64>() / durations.len() as f64,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p95: sorted[percentile_index(sorted.len(), LATENCY_PERCENTILE)],
        }
    }
}

/// Zero-based index of the nearest-rank-below percentile, `floor(p * len)`.
fn percentile_index(len: usize, percentile: f64) -> usize {
    ((len as f64 * percentile) as usize).min(len.saturating_sub(1))
}

/// Percentage of requests with status `200`, `0` when there are no requests.
pub fn success_rate(stats: &ScenarioStats) -> f64 {
    if stats.requests.is_empty() {
        return 0.0;
    }
    stats.successful_requests() as f64 / stats.requests.len() as f64 * 100.0
}

pub fn bytes_to_kb(bytes: f64) -> f64 {
    bytes / BYTES_PER_KB
}

/// The `passed/total` checks ratio.
///
/// Integral sums print without a fractional part.
pub fn checks_ratio(stats: &ScenarioStats) -> String {
    format!("{}/{}", stats.checks_passed, stats.checks_total)
}
