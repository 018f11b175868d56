//! Request execution shared by the catalog and search clients: maps transport,
//! status and body failures onto [`ClientError`].

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use shared::error::ApiError;

use crate::error::ClientError;

pub(crate) async fn send_for_json<T: DeserializeOwned>(
    url: &str,
    request: RequestBuilder,
) -> Result<T, ClientError> {
    let body = send_expecting_success(url, request).await?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Parse {
        url: url.to_string(),
        source,
    })
}

/// Sends the request and returns the raw body of a 2xx response.
pub(crate) async fn send_expecting_success(
    url: &str,
    request: RequestBuilder,
) -> Result<Vec<u8>, ClientError> {
    let response = request.send().await.map_err(|source| ClientError::Network {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| ClientError::Network {
            url: url.to_string(),
            source,
        })?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiError>(&body)
            .ok()
            .map(|api_error| api_error.error);
        return Err(ClientError::NonOkResponse {
            url: url.to_string(),
            status,
            message,
        });
    }

    Ok(body.to_vec())
}
