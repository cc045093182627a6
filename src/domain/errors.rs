use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("image encode failed: {0}")]
    Encode(String),
    #[error("person {index} skipped: {reason}")]
    PersonParse { index: usize, reason: String },
    #[error("model not loaded")]
    NotReady,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether the failure was caused by what the client sent.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidInput(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_ownership() {
        assert!(DomainError::Decode("bad base64".into()).is_client_fault());
        assert!(DomainError::InvalidInput("empty".into()).is_client_fault());
        assert!(!DomainError::Inference("boom".into()).is_client_fault());
        assert!(!DomainError::Encode("zero sized".into()).is_client_fault());
        assert!(!DomainError::NotReady.is_client_fault());
    }
}
