//! The impls and functions
//!
use std::time::Duration;
use log::*;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use crate::config::Config;
use crate::http::{HTTP_SCHEME, HTTPS_SCHEME, ParseError, QueryError, UrlFields};

const IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

impl UrlFields {
    pub fn new(
        host: &str,
        port: u16,
        path: &str,
        force_tls: bool,
    ) -> Self
    {
        UrlFields {
            scheme: if force_tls { HTTPS_SCHEME } else { HTTP_SCHEME },
            host: host.to_string(),
            port,
            path: path.to_string(),
        }
    }
}

impl QueryError {
    fn classify(
        url: &str,
        error: reqwest::Error,
    ) -> Self
    {
        let url = url.to_string();
        if error.is_timeout() {
            QueryError::Timeout { url, source: error }
        } else if error.is_connect() {
            QueryError::Connect { url, source: error }
        } else if error.is_builder() {
            QueryError::Build { url, source: error }
        } else {
            QueryError::Transport { url, source: error }
        }
    }
}

/// Perform a GET on the url and return the response body of a successful (2xx) response.
pub async fn http_query(
    config: &Config,
    url_fields: &UrlFields,
    cancel: &CancellationToken,
) -> Result<Vec<u8>, QueryError>
{
    if cancel.is_cancelled() {
        return Err(QueryError::Cancelled);
    }
    let url = url_fields.to_string();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("query cancelled: {}", url);
            Err(QueryError::Cancelled)
        },
        result = fetch(config, &url) => result,
    }
}

/// The client for a single query.
///
/// With TLS forced, any certificate presented by the peer is accepted.
pub fn build_client(
    config: &Config,
) -> Result<reqwest::Client, reqwest::Error>
{
    reqwest::Client::builder()
        .pool_idle_timeout(IDLE_CONNECTION_TIMEOUT)
        .timeout(config.timeout)
        .danger_accept_invalid_certs(config.force_tls)
        .build()
}

async fn fetch(
    config: &Config,
    url: &str,
) -> Result<Vec<u8>, QueryError>
{
    let client = build_client(config)
        .map_err(|e| QueryError::classify(url, e))?;

    let response = client
        .get(url)
        .header(ACCEPT, HeaderValue::from_static("application/json"))
        .send()
        .await
        .map_err(|e| QueryError::classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        // dropping the response closes the connection, the body is not reused.
        debug!("Non success response: {} = {}", url, status);
        return Err(QueryError::Status { url: url.to_string(), status });
    }
    debug!("Success response: {} = {}", url, status);

    let body = response
        .bytes()
        .await
        .map_err(|e| QueryError::classify(url, e))?;
    Ok(body.to_vec())
}

/// Deserialize a response body, `what` names the endpoint in the error.
pub fn parse_json<T: DeserializeOwned>(
    http_data: &[u8],
    what: &str,
) -> Result<T, ParseError>
{
    serde_json::from_slice(http_data)
        .map_err(|e| ParseError {
            what: what.to_string(),
            payload: String::from_utf8_lossy(http_data).to_string(),
            source: e,
        })
}
