use indexmap::IndexMap;
use k6_summary_model::{MetricName, MetricRecord, RecordError, RequestRecord, ScenarioStats};

/// The result of folding one k6 output file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Statistics keyed by scenario name, in the order scenarios first appear.
    pub scenarios: IndexMap<String, ScenarioStats>,
    /// The last `vus` value seen in the stream, if any.
    pub vus: Option<f64>,
    /// Number of samples skipped because they were malformed.
    pub skipped: usize,
}

/// Groups k6 samples by their `scenario` tag into [`ScenarioStats`].
pub struct ScenarioAggregator;

impl ScenarioAggregator {
    /// Fold raw JSON lines into per-scenario statistics.
    ///
    /// Metric definitions and unknown metrics are ignored. A malformed sample is logged and
    /// skipped, the remaining samples are still aggregated.
    pub fn aggregate<I>(records: I) -> Aggregation
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let mut aggregation = Aggregation::default();
        let mut samples = 0;

        for (index, value) in records.into_iter().enumerate() {
            if MetricRecord::is_definition(&value) {
                continue;
            }

            match Self::apply(&mut aggregation, value) {
                Ok(()) => samples += 1,
                Err(e) => {
                    log::warn!("Skipping malformed entry {index}: {e}");
                    aggregation.skipped += 1;
                }
            }
        }

        log::debug!(
            "Aggregated {samples} samples into {} scenarios, skipped {}",
            aggregation.scenarios.len(),
            aggregation.skipped
        );

        aggregation
    }

    fn apply(aggregation: &mut Aggregation, value: serde_json::Value) -> Result<(), RecordError> {
        let Some(metric) = MetricRecord::metric_name_of(&value) else {
            return Ok(());
        };
        let record = MetricRecord::from_value(value)?;

        let value = if metric.requires_value() {
            record.value(metric)?
        } else {
            0.0
        };

        match metric {
            MetricName::Vus => aggregation.vus = Some(value),
            MetricName::HttpReqs => Self::stats_for(aggregation, &record)
                .record_request(RequestRecord::from_record(&record)),
            MetricName::HttpReqDuration => {
                Self::stats_for(aggregation, &record).record_duration(value)
            }
            MetricName::Checks => Self::stats_for(aggregation, &record).record_check(value),
            MetricName::DataSent => Self::stats_for(aggregation, &record).add_data_sent(value),
            MetricName::DataReceived => {
                Self::stats_for(aggregation, &record).add_data_received(value)
            }
        }

        Ok(())
    }

    fn stats_for<'a>(
        aggregation: &'a mut Aggregation,
        record: &MetricRecord,
    ) -> &'a mut ScenarioStats {
        aggregation
            .scenarios
            .entry(record.scenario().to_string())
            .or_default()
    }
}
