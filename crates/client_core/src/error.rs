use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call against the catalog service or the search
/// provider. Every variant is terminal for that call; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network failure calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error(
        "{url} responded with {status}: {}",
        .message.as_deref().unwrap_or("no details")
    )]
    NonOkResponse {
        url: String,
        status: StatusCode,
        message: Option<String>,
    },
    #[error("malformed response body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Network,
    NonOkResponse,
    Parse,
}

impl ClientError {
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::Network { .. } => ClientErrorKind::Network,
            ClientError::NonOkResponse { .. } => ClientErrorKind::NonOkResponse,
            ClientError::Parse { .. } => ClientErrorKind::Parse,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::NonOkResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ClientError::Network { url, .. }
            | ClientError::NonOkResponse { url, .. }
            | ClientError::Parse { url, .. } => url,
        }
    }
}
