//! The structs
//!
use std::future::Future;
use tokio_util::sync::CancellationToken;
use crate::config::Config;

/// The outcome of a check.
///
/// The numbering is the process exit code: success is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Failure = 2,
    Unknown = 3,
}

/// The terminal result of a check run.
#[derive(Debug)]
pub struct Verdict {
    pub message: String,
    pub status: Status,
    pub error: Option<anyhow::Error>,
}

/// The contract of a check.
pub trait Check {
    /// A human readable identifier, used for logging and reporting.
    fn id(&self) -> &str;
    /// Run the check once.
    ///
    /// When `cancel` is triggered, pending network calls are aborted and a failure verdict is returned.
    fn run(&self, cancel: &CancellationToken, config: &Config) -> impl Future<Output = Verdict> + Send;
}
