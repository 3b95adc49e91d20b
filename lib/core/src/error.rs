use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not computable: {0}")]
    NotComputable(String),

    #[error("Missing feature: {0}")]
    MissingFeature(String),

    #[error("Invalid fingerprint dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn missing_feature(feature: &str) -> Self {
        Error::MissingFeature(feature.to_string())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn not_computable(msg: impl Into<String>) -> Self {
        Error::NotComputable(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
