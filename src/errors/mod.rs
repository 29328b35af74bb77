use thiserror::Error;

/// Errors raised by the calendar core (date parsing, expansion, submissions)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("malformed date: {0:?} (expected YYYY-MM-DD)")]
    MalformedDate(String),

    #[error("invalid day of week: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    #[error("date out of supported range: {0}")]
    OutOfRange(String),

    #[error("invalid submission: {field} {reason}")]
    InvalidSubmission { field: &'static str, reason: String },
}

impl CalendarError {
    pub fn malformed(value: &str) -> Self {
        Self::MalformedDate(value.to_string())
    }

    pub fn submission(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSubmission {
            field,
            reason: reason.into(),
        }
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to local store errors
pub fn storage_context(operation: &str, table: &str) -> String {
    format!("Failed to {} in table: {}", operation, table)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}
