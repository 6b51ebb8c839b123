use std::{fmt, str::FromStr};

/// Name of a k6 built-in metric that the summariser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    /// Current number of active virtual users.
    Vus,
    /// One entry per HTTP request issued.
    HttpReqs,
    /// Total request time in milliseconds.
    HttpReqDuration,
    /// Outcome of a `check()` call.
    Checks,
    /// Bytes sent.
    DataSent,
    /// Bytes received.
    DataReceived,
}

impl MetricName {
    /// Whether samples of this metric must carry a numeric `data.value`.
    pub fn requires_value(&self) -> bool {
        !matches!(self, MetricName::HttpReqs)
    }
}

impl FromStr for MetricName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vus" => Ok(MetricName::Vus),
            "http_reqs" => Ok(MetricName::HttpReqs),
            "http_req_duration" => Ok(MetricName::HttpReqDuration),
            "checks" => Ok(MetricName::Checks),
            "data_sent" => Ok(MetricName::DataSent),
            "data_received" => Ok(MetricName::DataReceived),
            _ => Err("Unknown metric name"),
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricName::Vus => write!(f, "vus"),
            MetricName::HttpReqs => write!(f, "http_reqs"),
            MetricName::HttpReqDuration => write!(f, "http_req_duration"),
            MetricName::Checks => write!(f, "checks"),
            MetricName::DataSent => write!(f, "data_sent"),
            MetricName::DataReceived => write!(f, "data_received"),
        }
    }
}
