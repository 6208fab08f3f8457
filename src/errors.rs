// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookchatError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type HookchatResult<T> = Result<T, HookchatError>;

impl HookchatError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        HookchatError::Config(msg.into())
    }
}
