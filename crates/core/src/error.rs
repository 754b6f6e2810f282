use crate::validation::MissingFields;

/// Errors raised by the form state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0}")]
    MissingFields(MissingFields),
    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

pub type FormResult<T> = std::result::Result<T, FormError>;

/// Errors raised by a submission store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the collection service.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("invalid submission body: {0}")]
    InvalidBody(String),
    /// Only the first missing field is ever reported.
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("submission store failure: {0}")]
    Store(#[from] StoreError),
}

pub type CollectionResult<T> = std::result::Result<T, CollectionError>;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
