use thiserror::Error;

/// Errors that can occur during metadata catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog backend returned an error.
    #[error("catalog backend error: {0}")]
    Backend(String),

    /// A network or transport-level error occurred.
    #[error("catalog connection error: {0}")]
    Connection(String),

    /// A record could not be marshalled to or from its stored form.
    #[error("catalog serialization error: {0}")]
    Serialization(String),

    /// The catalog was given invalid configuration.
    #[error("invalid catalog configuration: {0}")]
    Configuration(String),
}
