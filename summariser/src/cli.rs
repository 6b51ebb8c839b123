use std::path::PathBuf;

use clap::Parser;
use k6_summariser::ReportConfig;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Directory containing the k6 JSON output files.
    #[arg(long, env = "K6_REPORT_INPUT_DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory to write the reports to. Defaults to the input directory.
    #[arg(long, env = "K6_REPORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Load levels (virtual users) to report on, in order.
    #[arg(
        long,
        env = "K6_REPORT_LEVELS",
        value_delimiter = ',',
        default_values_t = [50u64, 100, 200, 500]
    )]
    pub levels: Vec<u64>,

    /// Input file name for each load level, `{vus}` is replaced with the level.
    #[arg(long, default_value = "k6-{vus}.json")]
    pub input_template: String,

    /// Report file name for each load level, `{vus}` is replaced with the level.
    #[arg(long, default_value = "report-{vus}.md")]
    pub report_template: String,

    /// File name of the comparison report.
    #[arg(long, default_value = "comparison-report.md")]
    pub comparison_file: String,

    /// Also write every summary row as JSON to this path.
    #[arg(long)]
    pub json_summary: Option<PathBuf>,

    /// Skip input lines that are not valid JSON instead of failing the load level.
    #[arg(long, env = "K6_REPORT_ALLOW_INVALID_LINES")]
    pub allow_invalid_lines: bool,

    /// Exit with an error if any load level failed to process.
    #[arg(long, env = "K6_REPORT_STRICT")]
    pub strict: bool,
}

impl From<CliArgs> for ReportConfig {
    fn from(args: CliArgs) -> Self {
        let output_dir = args.output_dir.unwrap_or_else(|| args.input_dir.clone());
        Self {
            input_dir: args.input_dir,
            output_dir,
            levels: args.levels,
            input_template: args.input_template,
            report_template: args.report_template,
            comparison_file: args.comparison_file,
            json_summary: args.json_summary,
            allow_invalid_lines: args.allow_invalid_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_use_defaults() {
        let args = CliArgs::try_parse_from(["k6-summariser"]).unwrap();
        assert!(!args.strict);

        let config = ReportConfig::from(args);
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_should_parse_levels_and_directories() {
        let args = CliArgs::try_parse_from([
            "k6-summariser",
            "--input-dir",
            "results",
            "--levels",
            "10,20",
            "--json-summary",
            "summary.json",
            "--strict",
            "--allow-invalid-lines",
        ])
        .unwrap();
        assert!(args.strict);

        let config = ReportConfig::from(args);
        assert!(config.allow_invalid_lines);
        assert_eq!(config.levels, vec![10, 20]);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.json_summary, Some(PathBuf::from("summary.json")));
    }
}
