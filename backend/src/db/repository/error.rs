//! Error types for repository operations.
//!
//! Every variant carries an [`ErrorContext`] naming the failed operation,
//! the date or queue it touched, and whether retrying may help.

use std::fmt;

use chrono::NaiveDate;

use crate::models::QueueId;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a repository error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Repository operation, e.g. `save_schedule`
    pub operation: Option<&'static str>,
    pub date: Option<NaiveDate>,
    pub queue: Option<QueueId>,
    pub details: Option<String>,
    /// Transient failure; the postgres backend retries these.
    pub retryable: bool,
}

impl ErrorContext {
    pub fn operation(operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            ..Default::default()
        }
    }

    pub fn for_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn for_queue(mut self, queue: QueueId) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Renders as ` [op=.., date=.., ...]`, or nothing when empty.
impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        let fields = [
            self.operation.map(|op| format!("op={op}")),
            self.date.map(|date| format!("date={date}")),
            self.queue.map(|queue| format!("queue={queue}")),
            self.details.as_ref().map(|details| format!("details={details}")),
            self.retryable.then(|| "retryable".to_string()),
        ];
        let fields: Vec<String> = fields.into_iter().flatten().collect();
        write!(f, " [{}]", fields.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Pool exhaustion or a dropped connection; always retryable.
    #[error("Connection error: {message}{context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    #[error("Query error: {message}{context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    #[error("Not found: {message}{context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Stored or submitted data that does not fit the schema, such as a
    /// queue missing from the seeded `queues` table.
    #[error("Data validation error: {message}{context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    #[error("Internal error: {message}{context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Replace the context. Connection errors stay retryable.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        let retryable = matches!(self, Self::ConnectionError { .. }) || context.retryable;
        *self.context_mut() = ErrorContext { retryable, ..context };
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ConnectionError { context, .. }
            | Self::QueryError { context, .. }
            | Self::NotFound { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::InternalError { context, .. } => context,
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => RepositoryError::not_found("Record not found"),
            Error::DatabaseError(kind, info) => {
                // Concurrent replacement of the same date can fail serialization
                let mut context = ErrorContext::default().details(format!("{kind:?}"));
                context.retryable = matches!(kind, DatabaseErrorKind::SerializationFailure);
                RepositoryError::query(info.message()).with_context(context)
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Could not decode row: {e}"))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::operation("save_schedule")
            .for_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap())
            .for_queue("3.1".parse().unwrap())
            .retryable();
        assert_eq!(
            ctx.to_string(),
            " [op=save_schedule, date=2026-01-15, queue=3.1, retryable]"
        );
        assert_eq!(ErrorContext::default().to_string(), "");
    }

    #[test]
    fn test_message_without_context() {
        assert_eq!(
            RepositoryError::query("syntax error").to_string(),
            "Query error: syntax error"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RepositoryError::connection("pool exhausted").is_retryable());
        assert!(!RepositoryError::query("syntax").is_retryable());
        assert!(!RepositoryError::not_found("missing").is_retryable());
        assert!(RepositoryError::query("serialization failure")
            .with_context(ErrorContext::default().retryable())
            .is_retryable());
    }

    #[test]
    fn test_connection_stays_retryable_with_context() {
        let err = RepositoryError::connection("timeout")
            .with_context(ErrorContext::operation("get_connection"));
        assert!(err.is_retryable());
        assert_eq!(err.context().operation, Some("get_connection"));
    }
}
