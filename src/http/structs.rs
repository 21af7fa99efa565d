//! The structs
//!
use std::fmt;
use thiserror::Error;

pub const HTTP_SCHEME: &str = "http";
pub const HTTPS_SCHEME: &str = "https";

/// The fields a query url is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFields {
    pub scheme: &'static str,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl fmt::Display for UrlFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}

/// Transport level failures of a query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query cancelled")]
    Cancelled,
    #[error("unable to build request for {url}")]
    Build { url: String, source: reqwest::Error },
    #[error("connection to {url} failed")]
    Connect { url: String, source: reqwest::Error },
    #[error("request to {url} timed out")]
    Timeout { url: String, source: reqwest::Error },
    #[error("request to {url} failed")]
    Transport { url: String, source: reqwest::Error },
    #[error("{url} returned http status {status}")]
    Status { url: String, status: reqwest::StatusCode },
}

/// A response body that could not be deserialized into the expected shape.
#[derive(Debug, Error)]
#[error("unable to unmarshal {what} response: {payload}")]
pub struct ParseError {
    pub what: String,
    pub payload: String,
    pub source: serde_json::Error,
}
