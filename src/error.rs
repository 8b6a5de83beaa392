use thiserror::Error;

/// Errors produced by the read API.
///
/// `UnknownDimension` and `UnknownCategory` are rejected-input outcomes, not
/// faults: they are returned before any SQL text is constructed from the
/// request.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown location dimension: {0:?}")]
    UnknownDimension(String),

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    /// A well-formed query matched no rows. Only random sampling reports
    /// this; lookups return an empty result instead.
    #[error("no matching rows")]
    NotFound,

    /// The database could not be opened, or its schema has not been
    /// bootstrapped yet.
    #[error("database unavailable: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Sql(#[from] rusqlite::Error),
}

impl QueryError {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            QueryError::UnknownDimension(_) | QueryError::UnknownCategory(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_vocabulary_errors_are_invalid_input() {
        assert!(QueryError::UnknownDimension("postal_code".into()).is_invalid_input());
        assert!(QueryError::UnknownCategory("hotel".into()).is_invalid_input());
        assert!(!QueryError::NotFound.is_invalid_input());
        assert!(!QueryError::Connection("gone".into()).is_invalid_input());
    }

    #[test]
    fn test_executor_errors_convert_to_sql() {
        let err = QueryError::from(rusqlite::Error::InvalidQuery);
        assert!(matches!(err, QueryError::Sql(_)));
        assert!(!err.is_invalid_input());
    }
}
