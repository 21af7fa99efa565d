//! Module for checking the replication of the CockroachDB ranges.
//!
//! The check reads `/_status/nodes` of the local CockroachDB node (default `127.0.0.1:8090`).
//! That endpoint already holds the store statuses of every node in the CockroachDB cluster,
//! so there is no fan-out over the nodes.
//!
//! Per node, the store metrics `ranges.unavailable` and `ranges.underreplicated` are summed:
//! - unavailable ranges: no replica can serve reads.
//! - underreplicated ranges: fewer replicas than the replication target.
//!
//! Any node with unavailable or underreplicated ranges fails the check.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
