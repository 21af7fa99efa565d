//! The structs
//!
use std::time::Duration;

pub const DEFAULT_LEADER_HOST: &str = "master.mesos";
pub const DEFAULT_COCKROACHDB_ADDR: &str = "127.0.0.1:8090";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Port on which the admin router on the master listens for HTTP.
pub const ADMINROUTER_MASTER_HTTP_PORT: u16 = 80;
/// Port on which the admin router on the master listens for HTTPS.
pub const ADMINROUTER_MASTER_HTTPS_PORT: u16 = 443;
/// Port on which the admin router on the agent listens for HTTP.
pub const ADMINROUTER_AGENT_HTTP_PORT: u16 = 61001;
/// Port on which the admin router on the agent listens for HTTPS.
pub const ADMINROUTER_AGENT_HTTPS_PORT: u16 = 61002;

/// The role of a node in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// control plane
    Master,
    /// worker plane
    Agent,
}

/// The ports of the admin router per role and TLS mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortLayout {
    pub master_http: u16,
    pub master_https: u16,
    pub agent_http: u16,
    pub agent_https: u16,
}

/// The address of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
    pub scheme: &'static str,
}

/// The configuration for a check run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Use https, and do not verify the certificate of the peer.
    pub force_tls: bool,
    /// The host serving the leader resolution and membership endpoints.
    pub leader_host: String,
    pub ports: PortLayout,
    /// host:port of the CockroachDB status endpoint.
    pub cockroachdb_addr: String,
    /// Timeout for a single request.
    pub timeout: Duration,
}
