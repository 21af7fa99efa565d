//! Module for querying the HTTP endpoints of the cluster nodes.
//!
//! Every check reaches the cluster through [http_query]:
//! - a GET request with `Accept: application/json`.
//! - the idle connections of the client are closed after 10 seconds.
//! - when TLS is forced, the peer certificate and hostname are **not** verified.
//!   The checks reach the nodes through the internal admin router, trust is given by network placement.
//!
//! A query always races against the cancellation token of the check.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
