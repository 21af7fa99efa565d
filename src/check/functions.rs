//! The impls and functions
//!
use std::{fmt, time::Instant};
use colored::Colorize;
use log::*;
use tokio_util::sync::CancellationToken;
use crate::check::{Check, Status, Verdict};
use crate::config::Config;
use crate::http::QueryError;

impl Status {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Warning => write!(f, "WARNING"),
            Status::Failure => write!(f, "FAILURE"),
            Status::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl Verdict {
    pub fn ok() -> Self {
        Verdict { message: String::new(), status: Status::Ok, error: None }
    }
    pub fn ok_with(message: &str) -> Self {
        Verdict { message: message.to_string(), status: Status::Ok, error: None }
    }
    pub fn failure(message: &str) -> Self {
        Verdict { message: message.to_string(), status: Status::Failure, error: None }
    }
    pub fn failure_with(
        message: &str,
        error: anyhow::Error,
    ) -> Self
    {
        Verdict { message: message.to_string(), status: Status::Failure, error: Some(error) }
    }
    /// A failure carrying only the error, its message is the top level context of the error.
    pub fn from_error(error: anyhow::Error) -> Self {
        Verdict { message: error.to_string(), status: Status::Failure, error: Some(error) }
    }
    /// The failure of a check that was cancelled before it could decide.
    pub fn cancelled() -> Self {
        Verdict::failure_with("Check cancelled", anyhow::Error::new(QueryError::Cancelled))
    }
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl From<anyhow::Result<Verdict>> for Verdict {
    fn from(result: anyhow::Result<Verdict>) -> Self {
        result.unwrap_or_else(Verdict::from_error)
    }
}

/// Run a check, report the verdict on stdout and return its status.
pub async fn run_check<C: Check>(
    check: &C,
    cancel: &CancellationToken,
    config: &Config,
) -> Status
{
    info!("begin check: {}", check.id());
    let timer = Instant::now();

    let verdict = check.run(cancel, config).await;

    info!("end check: {}: {} {:?}", check.id(), verdict.status, timer.elapsed());
    print_verdict(check.id(), &verdict);
    verdict.status
}

fn print_verdict(
    id: &str,
    verdict: &Verdict,
)
{
    let status = match verdict.status {
        Status::Ok => verdict.status.to_string().green(),
        Status::Warning => verdict.status.to_string().yellow(),
        Status::Failure => verdict.status.to_string().red(),
        Status::Unknown => verdict.status.to_string().purple(),
    };
    println!("{}: {}", id, status);
    if !verdict.message.is_empty() {
        println!("{}", verdict.message);
    }
    if let Some(error) = &verdict.error {
        println!("Error: {:#}", error);
    }
}
