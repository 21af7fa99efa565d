//! Point-in-time health checks for the nodes of a DC/OS cluster.
//!
//! Every check implements [check::Check] and produces a [check::Verdict]:
//! - [versions::VersionCheck]: no more than two distinct versions on the masters and agents.
//! - [cockroachdb::CockroachdbCheck]: no unavailable or underreplicated CockroachDB ranges.
//! - [port_availability::PortAvailabilityCheck]: a TCP port can be listened on.
//!
#[macro_use]
extern crate serde_derive;

pub mod check;
pub mod cockroachdb;
pub mod config;
pub mod http;
pub mod port_availability;
pub mod topology;
pub mod versions;
