//! The impls and functions
//!
use std::{env, fmt, time::Duration};
use log::*;
use anyhow::{Context, Result};
use crate::config::{
    Config,
    NodeAddress,
    PortLayout,
    Role,
    ADMINROUTER_AGENT_HTTPS_PORT,
    ADMINROUTER_AGENT_HTTP_PORT,
    ADMINROUTER_MASTER_HTTPS_PORT,
    ADMINROUTER_MASTER_HTTP_PORT,
    DEFAULT_COCKROACHDB_ADDR,
    DEFAULT_LEADER_HOST,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::http::{HTTP_SCHEME, HTTPS_SCHEME, UrlFields};

impl Default for PortLayout {
    fn default() -> Self {
        PortLayout {
            master_http: ADMINROUTER_MASTER_HTTP_PORT,
            master_https: ADMINROUTER_MASTER_HTTPS_PORT,
            agent_http: ADMINROUTER_AGENT_HTTP_PORT,
            agent_https: ADMINROUTER_AGENT_HTTPS_PORT,
        }
    }
}

impl PortLayout {
    /// The admin router port for a role.
    pub fn port(
        &self,
        role: Role,
        force_tls: bool,
    ) -> u16
    {
        match (role, force_tls) {
            (Role::Master, false) => self.master_http,
            (Role::Master, true) => self.master_https,
            (Role::Agent, false) => self.agent_http,
            (Role::Agent, true) => self.agent_https,
        }
    }
    /// Use a single port for every role and TLS mode.
    pub fn uniform(port: u16) -> Self {
        PortLayout {
            master_http: port,
            master_https: port,
            agent_http: port,
            agent_https: port,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Master => write!(f, "master"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl NodeAddress {
    pub fn url(&self, path: &str) -> UrlFields {
        UrlFields {
            scheme: self.scheme,
            host: self.host.clone(),
            port: self.port,
            path: path.to_string(),
        }
    }
}

/// Build the address for a host with a given role.
pub fn node_address(
    host: &str,
    role: Role,
    ports: &PortLayout,
    force_tls: bool,
) -> NodeAddress
{
    NodeAddress {
        host: host.to_string(),
        port: ports.port(role, force_tls),
        scheme: if force_tls { HTTPS_SCHEME } else { HTTP_SCHEME },
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            force_tls: false,
            leader_host: DEFAULT_LEADER_HOST.to_string(),
            ports: PortLayout::default(),
            cockroachdb_addr: DEFAULT_COCKROACHDB_ADDR.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl Config {
    /// The address of the host serving leader resolution and membership.
    pub fn leader_address(&self) -> NodeAddress {
        node_address(&self.leader_host, Role::Master, &self.ports, self.force_tls)
    }
    /// Resolve the configuration from the command line options, the environment and the defaults.
    pub fn resolve(
        force_tls: bool,
        leader_host: &Option<String>,
        cockroachdb_addr: &Option<String>,
        timeout: &Option<u64>,
    ) -> Result<Self>
    {
        Ok(Config {
            force_tls: set_force_tls(force_tls)?,
            leader_host: set_string(leader_host, "CLUSTER_CHECKS_LEADER_HOST", DEFAULT_LEADER_HOST),
            cockroachdb_addr: set_string(cockroachdb_addr, "CLUSTER_CHECKS_COCKROACHDB_ADDR", DEFAULT_COCKROACHDB_ADDR),
            timeout: set_timeout(timeout)?,
            ..Default::default()
        })
    }
}

fn set_force_tls(
    option: bool,
) -> Result<bool>
{
    // a flag can only switch it on, the environment is consulted when it is not set.
    if option {
        info!("force-tls argument set");
        return Ok(true);
    }
    match env::var("CLUSTER_CHECKS_FORCE_TLS") {
        Ok(set_var) => {
            info!("force-tls not set: set via .env: CLUSTER_CHECKS_FORCE_TLS: {}", set_var);
            set_var.parse::<bool>()
                .with_context(|| format!("Invalid value for CLUSTER_CHECKS_FORCE_TLS: {}", set_var))
        },
        Err(_e) => Ok(false),
    }
}

fn set_string(
    option: &Option<String>,
    variable: &str,
    default: &str,
) -> String
{
    match option {
        Some(value) => {
            info!("{} argument set: using: {}", variable, value);
            value.to_string()
        },
        None => match env::var(variable) {
            Ok(set_var) => {
                info!("{} not set: set via .env: {}", variable, set_var);
                set_var
            },
            Err(_e) => {
                info!("{} not set: and not set via .env: using default: {}", variable, default);
                default.to_string()
            },
        },
    }
}

fn set_timeout(
    option: &Option<u64>,
) -> Result<Duration>
{
    let seconds = match option {
        Some(seconds) => *seconds,
        None => match env::var("CLUSTER_CHECKS_TIMEOUT") {
            Ok(set_var) => {
                info!("timeout not set: set via .env: CLUSTER_CHECKS_TIMEOUT: {}", set_var);
                set_var.parse::<u64>()
                    .with_context(|| format!("Invalid value for CLUSTER_CHECKS_TIMEOUT: {}", set_var))?
            },
            Err(_e) => DEFAULT_TIMEOUT_SECONDS,
        },
    };
    Ok(Duration::from_secs(seconds))
}
