use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{api::error::ServiceError, prelude::*};

/// Build a client shared by the analyzer and the comparator.
pub fn try_new(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("tarifa/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("failed to build the HTTP client")
}

/// Append the path segments to the base URL's path.
pub fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow!("`{base_url}` cannot be a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Read the body and deserialize it, a non-success status is turned into [`ServiceError::Rejected`].
pub async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ServiceError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let detail = extract_detail(status, &body);
        warn!(%status, %detail, "rejected");
        return Err(ServiceError::Rejected { status, detail });
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Extract a human-readable reason from an error response.
///
/// The services report errors as `{"detail": …}`, where the detail is either a message
/// or a list of validation errors.
fn extract_detail(status: StatusCode, body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Value,
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { detail: Value::String(detail) }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_owned()
            } else {
                text.to_owned()
            }
        }
    }
}
