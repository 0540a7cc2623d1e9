use thiserror::Error;

/// Errors that can occur during blob store operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No object exists under the requested key.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// The storage backend returned an error.
    #[error("blob backend error: {0}")]
    Backend(String),

    /// A network or transport-level error occurred.
    #[error("blob connection error: {0}")]
    Connection(String),

    /// The store was given invalid configuration.
    #[error("invalid blob store configuration: {0}")]
    Configuration(String),

    /// The key is malformed for this store.
    #[error("invalid blob key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            BlobError::NotFound("images/a.png".into()).to_string(),
            "blob not found: images/a.png"
        );
        assert_eq!(
            BlobError::Backend("500".into()).to_string(),
            "blob backend error: 500"
        );
        assert_eq!(
            BlobError::Connection("refused".into()).to_string(),
            "blob connection error: refused"
        );
    }
}
