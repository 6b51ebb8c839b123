use anyhow::anyhow;
use clap::Parser as _;
use k6_summariser::{generate_reports, LevelOutcome, ReportConfig};

mod cli;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    env_logger::try_init()?;

    let args = cli::CliArgs::parse();
    let strict = args.strict;
    let config = ReportConfig::from(args);

    log::info!("{CRATE_NAME} {CRATE_VERSION}");
    log::info!(
        "Reading k6 output from {} for load levels {:?}",
        config.input_dir.display(),
        config.levels
    );

    let outcome = generate_reports(&config)?;

    let skipped = outcome
        .levels
        .iter()
        .filter_map(|level| match level {
            LevelOutcome::Missing { vus, .. } => Some(*vus),
            _ => None,
        })
        .collect::<Vec<_>>();
    if !skipped.is_empty() {
        log::warn!("Skipped load levels without input: {skipped:?}");
    }

    let failures = outcome.failures().collect::<Vec<_>>();
    if !failures.is_empty() {
        let error_message = format!(
            "{} out of {} load levels failed:\n{:#?}",
            failures.len(),
            outcome.levels.len(),
            failures
        );

        if strict {
            return Err(anyhow!(error_message));
        } else {
            log::warn!("{}", error_message);
        }
    }

    Ok(())
}
