use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram api error {code}: {description}")]
    Api { code: i64, description: String },
    #[error("telegram response missing result")]
    EmptyResult,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("service account credentials unavailable: {0}")]
    Credentials(String),
    #[error("failed to sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("sheets request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheets api error {status}: {body}")]
    Api { status: u16, body: String },
}
