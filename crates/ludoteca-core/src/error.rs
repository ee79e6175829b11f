//! Error types shared by the catalogue, the API clients and configuration

use thiserror::Error;

pub type Result<T, E = CatalogueError> = std::result::Result<T, E>;

/// Errors surfaced by the catalogue layer.
///
/// The `Display` text doubles as the human-readable message the controller
/// exposes through its `error` flag, so keep it short.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The Games API answered with a non-success status
    #[error("Games API error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, connection reset, CORS...)
    #[error("Failed to reach the Games API: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Failed to parse Games API response: {0}")]
    Decode(String),

    #[error("Unknown sort key: {0}")]
    InvalidSort(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for CatalogueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogueError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for CatalogueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = CatalogueError::Http {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Games API error: 503 - maintenance");
    }

    #[test]
    fn test_decode_from_json_error() {
        let err: CatalogueError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(matches!(err, CatalogueError::Decode(_)));
    }
}
