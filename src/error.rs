//! Error types for arrangement queries.

use thiserror::Error;

/// The main error type for query construction.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `build()` was called before the SELECT list or the source table was set.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A filter could not be constructed from its inputs.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Page or size below 1, or an offset that does not fit.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Failed to parse a filter or sort expression.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Failed to load or decode a config file.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create a configuration error for a builder slot that was never filled.
    pub fn missing(slot: &'static str) -> Self {
        Self::Configuration(format!("{} must be set before build()", slot))
    }
}

/// Result type alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_missing_slot_display() {
        let err = QueryError::missing("select");
        assert_eq!(
            err.to_string(),
            "Configuration error: select must be set before build()"
        );
    }
}
