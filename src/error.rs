use chrono::NaiveDate;

/// Errors raised while validating a chart or computing its layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A label row declared a mode other than year, month or text.
    #[error("Unknown label mode '{0}' (expected year, month or text)")]
    UnknownLabelMode(String),

    /// A dimension or interval in the chart configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The text metrics provider could not measure a string.
    #[error("Text metrics unavailable for '{text}': {reason}")]
    Metrics { text: String, reason: String },
}
