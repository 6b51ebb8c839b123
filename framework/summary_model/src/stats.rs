use crate::MetricRecord;

/// Status tag value counted as a successful request.
const SUCCESS_STATUS: &str = "200";

/// A request observed through an `http_reqs` sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRecord {
    pub timestamp: Option<String>,
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}

impl RequestRecord {
    pub fn from_record(record: &MetricRecord) -> Self {
        let tags = record.tags();
        Self {
            timestamp: record.time().map(str::to_string),
            method: tags.and_then(|t| t.method.clone()),
            url: tags.and_then(|t| t.url.clone()),
            status: tags.and_then(|t| t.status.clone()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}

/// Statistics accumulated for one scenario over one k6 output file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioStats {
    pub requests: Vec<RequestRecord>,
    /// Request durations in milliseconds, in arrival order.
    pub durations: Vec<f64>,
    /// Sum of the raw `checks` sample values.
    ///
    /// k6 emits `1` for a passing and `0` for a failing check, but the value is summed as-is so a
    /// non-boolean value is carried into the ratio unchanged.
    pub checks_passed: f64,
    /// Number of `checks` samples seen.
    pub checks_total: u64,
    /// Bytes sent.
    pub data_sent: f64,
    /// Bytes received.
    pub data_received: f64,
}

impl ScenarioStats {
    pub fn record_request(&mut self, request: RequestRecord) {
        self.requests.push(request);
    }

    pub fn record_duration(&mut self, duration_ms: f64) {
        self.durations.push(duration_ms);
    }

    pub fn record_check(&mut self, value: f64) {
        self.checks_passed += value;
        self.checks_total += 1;
    }

    pub fn add_data_sent(&mut self, bytes: f64) {
        self.data_sent += bytes;
    }

    pub fn add_data_received(&mut self, bytes: f64) {
        self.data_received += bytes;
    }

    pub fn successful_requests(&self) -> usize {
        self.requests.iter().filter(|r| r.is_success()).count()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_build_request_from_record() {
        let record = MetricRecord::from_value(json!({
            "metric": "http_reqs",
            "data": {
                "time": "2024-05-01T10:00:00Z",
                "value": 1,
                "tags": { "method": "GET", "url": "http://api.local/products", "status": "404" }
            }
        }))
        .unwrap();

        let request = RequestRecord::from_record(&record);
        pretty_assertions::assert_eq!(
            request,
            RequestRecord {
                timestamp: Some("2024-05-01T10:00:00Z".to_string()),
                method: Some("GET".to_string()),
                url: Some("http://api.local/products".to_string()),
                status: Some("404".to_string()),
            }
        );
        assert!(!request.is_success());
    }

    #[test]
    fn test_should_count_checks_by_record() {
        let mut stats = ScenarioStats::default();
        stats.record_check(1.0);
        stats.record_check(0.0);
        stats.record_check(1.0);

        assert_eq!(stats.checks_passed, 2.0);
        assert_eq!(stats.checks_total, 3);
    }

    #[test]
    fn test_should_count_successful_requests() {
        let mut stats = ScenarioStats::default();
        for status in [Some("200"), Some("500"), None, Some("200")] {
            stats.record_request(RequestRecord {
                status: status.map(str::to_string),
                ..Default::default()
            });
        }

        assert_eq!(stats.requests.len(), 4);
        assert_eq!(stats.successful_requests(), 2);
    }
}
