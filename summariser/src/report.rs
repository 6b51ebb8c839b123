mod comparison_table;
mod detail_table;

use indexmap::IndexMap;
use itertools::Itertools;
use k6_summary_model::ScenarioStats;
use tabled::settings::Style;
use tabled::Table;

pub use self::comparison_table::SummaryRow;
use self::detail_table::DetailRow;
use crate::analyze::{bytes_to_kb, checks_ratio, success_rate, LatencyStats};

/// Rendered detail report for one load level and the rows it contributes to the comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReport {
    /// One table per scenario, separated by newlines.
    pub body: String,
    pub summaries: Vec<SummaryRow>,
}

/// Figures shared by the detail table and the summary row of one scenario.
struct ScenarioFigures<'a> {
    scenario: &'a str,
    requests: usize,
    latency: LatencyStats,
    success_rate: f64,
    checks: String,
    data_sent_kb: String,
    data_received_kb: String,
}

impl<'a> ScenarioFigures<'a> {
    fn new(scenario: &'a str, stats: &ScenarioStats) -> Self {
        Self {
            scenario,
            requests: stats.requests.len(),
            latency: LatencyStats::from_durations(&stats.durations),
            success_rate: success_rate(stats),
            checks: checks_ratio(stats),
            data_sent_kb: float2(bytes_to_kb(stats.data_sent)),
            data_received_kb: float2(bytes_to_kb(stats.data_received)),
        }
    }

    fn detail_rows(&self, vus: u64) -> Vec<DetailRow> {
        vec![
            DetailRow::new("Virtual Users", vus),
            DetailRow::new("Scenario Name", self.scenario),
            DetailRow::new("Total Requests", self.requests),
            DetailRow::new("Success Rate", percent(self.success_rate)),
            DetailRow::new("Avg Duration (ms)", float2(self.latency.avg)),
            DetailRow::new("Min Duration (ms)", float2(self.latency.min)),
            DetailRow::new("Max Duration (ms)", float2(self.latency.max)),
            DetailRow::new("95th Percentile (ms)", float2(self.latency.p95)),
            DetailRow::new("Checks Passed", &self.checks),
            DetailRow::new("Data Sent (KB)", &self.data_sent_kb),
            DetailRow::new("Data Received (KB)", &self.data_received_kb),
        ]
    }

    fn summary_row(&self, vus: u64) -> SummaryRow {
        SummaryRow {
            vus,
            scenario: self.scenario.to_string(),
            requests: self.requests,
            latency: format!("{:.2}±{:.2}ms", self.latency.avg, self.latency.p95),
            checks: self.checks.clone(),
            data_sent_kb: self.data_sent_kb.clone(),
            data_received_kb: self.data_received_kb.clone(),
            success_rate: percent(self.success_rate),
        }
    }
}

/// Build the detail report for one load level.
///
/// Produces a table per scenario in map order and, in the same order, the summary rows to feed
/// into [`generate_comparison_report`].
pub fn generate_report(scenarios: &IndexMap<String, ScenarioStats>, vus: u64) -> LevelReport {
    let figures = scenarios
        .iter()
        .map(|(scenario, stats)| ScenarioFigures::new(scenario, stats))
        .collect::<Vec<_>>();

    let body = figures
        .iter()
        .map(|figures| {
            let mut table = Table::new(figures.detail_rows(vus));
            table.with(Style::markdown());
            table.to_string()
        })
        .join("\n");

    LevelReport {
        body,
        summaries: figures.iter().map(|f| f.summary_row(vus)).collect(),
    }
}

/// Render all summary rows, in the given order, as one table.
pub fn generate_comparison_report(summaries: &[SummaryRow]) -> String {
    let mut table = Table::new(summaries);
    table.with(Style::markdown());
    table.to_string()
}

/// The Markdown document written for one load level.
pub fn render_level_document(vus: u64, report: &LevelReport) -> String {
    format!(
        "# K6 Load Test Report - {vus} Virtual Users\n\n{}",
        report.body
    )
}

/// The Markdown document holding the cross-level comparison.
pub fn render_comparison_document(summaries: &[SummaryRow]) -> String {
    format!(
        "# K6 Load Test Comparison Report\n\n{}",
        generate_comparison_report(summaries)
    )
}

fn float2(n: f64) -> String {
    format!("{n:.2}")
}

fn percent(n: f64) -> String {
    format!("{n:.2}%")
}

/// Split a Markdown table into trimmed cells, dropping the header separator line.
#[cfg(test)]
pub(crate) fn table_cells(table: &str) -> Vec<Vec<String>> {
    table
        .lines()
        .filter(|line| line.starts_with('|'))
        .map(|line| {
            line.trim()
                .trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| {
            !cells
                .iter()
                .all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use k6_summary_model::RequestRecord;
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(status: &str) -> RequestRecord {
        RequestRecord {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn login_stats() -> ScenarioStats {
        let mut stats = ScenarioStats::default();
        stats.record_request(request("200"));
        stats.record_request(request("200"));
        stats.record_request(request("200"));
        stats.record_request(request("500"));
        stats.record_duration(100.0);
        stats.record_duration(300.0);
        stats.record_duration(200.0);
        stats.record_check(1.0);
        stats.record_check(0.0);
        stats.add_data_sent(2048.0);
        stats.add_data_received(1536.0);
        stats
    }

    #[test]
    fn test_should_render_detail_table_in_order() {
        let scenarios = IndexMap::from([("login".to_string(), login_stats())]);

        let report = generate_report(&scenarios, 100);
        let cells = table_cells(&report.body);

        assert_eq!(
            cells,
            [
                ["Metric", "Value"],
                ["Virtual Users", "100"],
                ["Scenario Name", "login"],
                ["Total Requests", "4"],
                ["Success Rate", "75.00%"],
                ["Avg Duration (ms)", "200.00"],
                ["Min Duration (ms)", "100.00"],
                ["Max Duration (ms)", "300.00"],
                ["95th Percentile (ms)", "300.00"],
                ["Checks Passed", "1/2"],
                ["Data Sent (KB)", "2.00"],
                ["Data Received (KB)", "1.50"],
            ]
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<_>>())
            .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_should_build_summary_row() {
        let scenarios = IndexMap::from([("login".to_string(), login_stats())]);

        let report = generate_report(&scenarios, 100);
        assert_eq!(
            report.summaries,
            vec![SummaryRow {
                vus: 100,
                scenario: "login".to_string(),
                requests: 4,
                latency: "200.00±300.00ms".to_string(),
                checks: "1/2".to_string(),
                data_sent_kb: "2.00".to_string(),
                data_received_kb: "1.50".to_string(),
                success_rate: "75.00%".to_string(),
            }]
        );
    }

    #[test]
    fn test_should_report_zeroes_for_empty_scenario() {
        let scenarios = IndexMap::from([("idle".to_string(), ScenarioStats::default())]);

        let report = generate_report(&scenarios, 50);
        let summary = &report.summaries[0];
        assert_eq!(summary.requests, 0);
        assert_eq!(summary.latency, "0.00±0.00ms");
        assert_eq!(summary.checks, "0/0");
        assert_eq!(summary.success_rate, "0.00%");

        let cells = table_cells(&report.body);
        assert_eq!(cells[5], ["Avg Duration (ms)", "0.00"]);
        assert_eq!(cells[8], ["95th Percentile (ms)", "0.00"]);
    }

    #[test]
    fn test_should_render_one_table_per_scenario() {
        let scenarios = IndexMap::from([
            ("login".to_string(), login_stats()),
            ("browse".to_string(), ScenarioStats::default()),
        ]);

        let report = generate_report(&scenarios, 200);
        assert_eq!(report.summaries.len(), 2);

        let headers = table_cells(&report.body)
            .into_iter()
            .filter(|row| row[0] == "Metric")
            .count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn test_should_follow_scenario_map_order() {
        let scenarios = IndexMap::from([
            ("zeta".to_string(), ScenarioStats::default()),
            ("alpha".to_string(), login_stats()),
        ]);

        let report = generate_report(&scenarios, 50);
        let names = report
            .summaries
            .iter()
            .map(|row| row.scenario.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["zeta", "alpha"]);

        let table_names = table_cells(&report.body)
            .into_iter()
            .filter(|row| row[0] == "Scenario Name")
            .map(|row| row[1].clone())
            .collect::<Vec<_>>();
        assert_eq!(table_names, ["zeta", "alpha"]);
    }

    #[test]
    fn test_should_render_nothing_without_scenarios() {
        let report = generate_report(&IndexMap::new(), 50);
        assert!(report.body.is_empty());
        assert!(report.summaries.is_empty());
        assert_eq!(
            render_level_document(50, &report),
            "# K6 Load Test Report - 50 Virtual Users\n\n"
        );
    }

    #[test]
    fn test_should_keep_comparison_row_order() {
        let scenarios = IndexMap::from([("login".to_string(), login_stats())]);
        let mut summaries = generate_report(&scenarios, 500).summaries;
        summaries.extend(generate_report(&scenarios, 50).summaries);
        summaries.extend(generate_report(&scenarios, 200).summaries);

        let cells = table_cells(&generate_comparison_report(&summaries));
        assert_eq!(
            cells[0],
            [
                "VUs",
                "Scenario",
                "Requests",
                "Latency (avg±p95)",
                "Checks Passed",
                "Data Sent (KB)",
                "Data Received (KB)",
                "Success Rate"
            ]
        );
        let vus = cells[1..].iter().map(|row| row[0].as_str()).collect::<Vec<_>>();
        assert_eq!(vus, ["500", "50", "200"]);
        assert_eq!(
            cells[1],
            ["500", "login", "4", "200.00±300.00ms", "1/2", "2.00", "1.50", "75.00%"]
        );
    }

    #[test]
    fn test_should_render_comparison_document() {
        let document = render_comparison_document(&[]);
        assert!(document.starts_with("# K6 Load Test Comparison Report\n\n|"));
        assert_eq!(table_cells(&document).len(), 1);
    }
}
