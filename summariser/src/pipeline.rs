use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::aggregator::ScenarioAggregator;
use crate::jsonl::JsonlReader;
use crate::report::{
    generate_report, render_comparison_document, render_level_document, SummaryRow,
};

/// Placeholder substituted with the load level in file name templates.
const VUS_PLACEHOLDER: &str = "{vus}";

/// Where to find the k6 output for each load level and where to write the reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Load levels, in the order they are processed and compared.
    pub levels: Vec<u64>,
    /// Input file name, `{vus}` is replaced with the load level.
    pub input_template: String,
    /// Report file name, `{vus}` is replaced with the load level.
    pub report_template: String,
    pub comparison_file: String,
    /// Optional path for a JSON dump of every summary row.
    pub json_summary: Option<PathBuf>,
    /// Skip lines that are not valid JSON instead of failing the whole load level.
    pub allow_invalid_lines: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            levels: vec![50, 100, 200, 500],
            input_template: "k6-{vus}.json".to_string(),
            report_template: "report-{vus}.md".to_string(),
            comparison_file: "comparison-report.md".to_string(),
            json_summary: None,
            allow_invalid_lines: false,
        }
    }
}

impl ReportConfig {
    pub fn input_path(&self, vus: u64) -> PathBuf {
        self.input_dir
            .join(self.input_template.replace(VUS_PLACEHOLDER, &vus.to_string()))
    }

    pub fn report_path(&self, vus: u64) -> PathBuf {
        self.output_dir
            .join(self.report_template.replace(VUS_PLACEHOLDER, &vus.to_string()))
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.output_dir.join(&self.comparison_file)
    }
}

/// What happened to a single load level.
#[derive(Debug)]
pub enum LevelOutcome {
    Generated {
        vus: u64,
        report_path: PathBuf,
    },
    /// The input file does not exist.
    Missing {
        vus: u64,
        input_path: PathBuf,
    },
    Failed {
        vus: u64,
        input_path: PathBuf,
        error: anyhow::Error,
    },
}

impl LevelOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LevelOutcome::Failed { .. })
    }
}

/// Outcome of a full run over all configured load levels.
#[derive(Debug)]
pub struct RunOutcome {
    pub levels: Vec<LevelOutcome>,
    pub summaries: Vec<SummaryRow>,
    pub comparison_path: PathBuf,
}

impl RunOutcome {
    pub fn failures(&self) -> impl Iterator<Item = &LevelOutcome> {
        self.levels.iter().filter(|outcome| outcome.is_failed())
    }
}

/// Generate a report for every configured load level, then the comparison report.
///
/// A missing or unprocessable input only skips its own load level. Only failing to write the
/// comparison report (or the JSON summary) is returned as an error.
pub fn generate_reports(config: &ReportConfig) -> anyhow::Result<RunOutcome> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut levels = Vec::with_capacity(config.levels.len());
    let mut summaries = Vec::new();

    for &vus in &config.levels {
        let input_path = config.input_path(vus);
        let report_path = config.report_path(vus);

        match process_level(config, vus, &input_path, &report_path) {
            Ok(LevelResult::Generated(level_summaries)) => {
                log::info!(
                    "Generated report for {vus} VUs: {}",
                    report_path.display()
                );
                summaries.extend(level_summaries);
                levels.push(LevelOutcome::Generated { vus, report_path });
            }
            Ok(LevelResult::Missing) => {
                log::warn!("File {} not found, skipping", input_path.display());
                levels.push(LevelOutcome::Missing { vus, input_path });
            }
            Err(error) => {
                log::error!("Error processing {}: {error:#}", input_path.display());
                levels.push(LevelOutcome::Failed {
                    vus,
                    input_path,
                    error,
                });
            }
        }
    }

    let comparison_path = config.comparison_path();
    std::fs::write(&comparison_path, render_comparison_document(&summaries)).with_context(
        || {
            format!(
                "Failed to write comparison report {}",
                comparison_path.display()
            )
        },
    )?;
    log::info!("Generated comparison report: {}", comparison_path.display());

    if let Some(json_summary) = &config.json_summary {
        write_json_summary(json_summary, &summaries)?;
        log::info!("Wrote summary rows to {}", json_summary.display());
    }

    Ok(RunOutcome {
        levels,
        summaries,
        comparison_path,
    })
}

enum LevelResult {
    Generated(Vec<SummaryRow>),
    Missing,
}

fn process_level(
    config: &ReportConfig,
    vus: u64,
    input_path: &Path,
    report_path: &Path,
) -> anyhow::Result<LevelResult> {
    log::debug!("Parsing k6 output file: {}", input_path.display());
    let reader = JsonlReader {
        allow_invalid_entries: config.allow_invalid_lines,
    };
    let records: Vec<serde_json::Value> = match reader.parse_from_file(input_path) {
        Ok(records) => records,
        Err(e) if e.is_not_found() => return Ok(LevelResult::Missing),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", input_path.display()))
        }
    };
    log::debug!("Parsed {} entries", records.len());

    let aggregation = ScenarioAggregator::aggregate(records);
    if let Some(observed) = aggregation.vus {
        if observed != vus as f64 {
            log::debug!("Last observed VU count {observed} differs from load level {vus}");
        }
    }

    let report = generate_report(&aggregation.scenarios, vus);
    std::fs::write(report_path, render_level_document(vus, &report))
        .with_context(|| format!("Failed to write report {}", report_path.display()))?;

    Ok(LevelResult::Generated(report.summaries))
}

fn write_json_summary(path: &Path, summaries: &[SummaryRow]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    serde_json::to_writer_pretty(file, summaries)?;
    Ok(())
}
