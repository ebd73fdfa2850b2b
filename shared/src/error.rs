use thiserror::Error;

/// Everything that can go wrong between receiving an order and storing it.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid order: {0}")]
    Validation(#[from] ValidationError),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{service} call failed: {message}")]
    Dependency {
        service: &'static str,
        message: String,
    },
}

impl OrderError {
    pub fn dependency(service: &'static str, message: impl Into<String>) -> Self {
        Self::Dependency {
            service,
            message: message.into(),
        }
    }

    /// Only infrastructure failures can succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Dependency { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("order payload must be a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("customer_id must be an integer, got {0}")]
    InvalidCustomerId(String),
}

#[cfg(test)]
mod tests {
    use super::{OrderError, ValidationError};

    #[test]
    fn only_dependency_errors_are_retryable() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert!(!OrderError::from(parse).is_retryable());
        assert!(!OrderError::from(ValidationError::MissingField("quantity")).is_retryable());
        assert!(!OrderError::Configuration("TABLE_NAME".to_string()).is_retryable());
        assert!(OrderError::dependency("dynamodb", "throttled").is_retryable());
    }

    #[test]
    fn dependency_error_names_the_service() {
        let err = OrderError::dependency("sqs", "connection reset");

        assert_eq!(err.to_string(), "sqs call failed: connection reset");
    }
}
