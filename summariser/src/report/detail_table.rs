use tabled::Tabled;

/// One `label | value` line of a per-scenario report table.
#[derive(Tabled)]
pub(crate) struct DetailRow {
    #[tabled(rename = "Metric")]
    pub label: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl DetailRow {
    pub(crate) fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}
