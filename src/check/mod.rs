//! Module for the contract every check implements.
//!
//! A check has an identifier, and a single entry point: [Check::run].
//! Running a check produces a [Verdict]: a [Status], a message and optionally the error that caused it.
//! Errors never leave a check: transport, parse and validation errors are turned into a verdict
//! inside `run`, the caller only has to map the [Status] to an exit code.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
