use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Transport failure on {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Decode failure on {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown entity: {id}")]
    UnknownEntity { id: String },

    #[error("Sub-indicator not found: {name}")]
    IndicatorNotFound { name: String },
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
