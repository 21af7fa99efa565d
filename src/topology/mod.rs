//! Module for discovering the masters and agents of the cluster.
//!
//! The discovery takes two steps, both on the leader host (default `master.mesos`):
//! 1. `/mesos_dns/v1/hosts/master.mesos`: leader resolution, returns the masters.
//! 2. `/mesos/master/slaves`: the membership of the leading master, returns the agents.
//!
//! The topology is built for a single check run, the order of the responses is kept.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
