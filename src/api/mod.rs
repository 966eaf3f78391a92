pub mod auth;
pub mod client;
pub mod config;
pub mod maker;
pub mod normalize;
pub mod owner;
pub mod society;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

use crate::session::SessionError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a backend call can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),
    /// Response body was not the JSON we expected
    #[error("Failed to parse response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    /// Non-2xx response; `message` comes from the backend when it sent one
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response whose envelope did not flag success
    #[error("{0}")]
    Rejected(String),
    /// 2xx response missing a field the caller needs
    #[error("{0}")]
    MissingField(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use maker::MakerApi;
pub use owner::OwnerApi;
pub use society::SocietyApi;
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, RequestBody, Transport, UploadFile};
