//! The impls and functions
//!
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener};
use log::*;
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use crate::check::{Check, Verdict};
use crate::config::Config;

#[derive(Debug)]
pub struct PortAvailabilityCheck {
    pub name: String,
    pub args: Vec<String>,
}

impl PortAvailabilityCheck {
    pub fn new(
        name: &str,
        args: Vec<String>,
    ) -> Self
    {
        PortAvailabilityCheck { name: name.to_string(), args }
    }
    /// Listen on the port on all IPv4 and all IPv6 interfaces, one after the other.
    ///
    /// Each listener is closed when it goes out of scope.
    /// A host without IPv6 is only checked on IPv4.
    pub fn port_available(port: u16) -> Verdict {
        if let Err(e) = listen(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port) {
            return Verdict::failure_with(&format!("Cannot listen on port {}", port), e);
        }
        match listen(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port) {
            Ok(()) => Verdict::ok(),
            Err(e) => match e.downcast_ref::<io::Error>().map(|io_error| io_error.kind()) {
                Some(io::ErrorKind::AddrInUse) | Some(io::ErrorKind::PermissionDenied) => {
                    Verdict::failure_with(&format!("Cannot listen on port {}", port), e)
                },
                _ => {
                    debug!("IPv6 not available, port {} checked on IPv4 only: {:#}", port, e);
                    Verdict::ok()
                },
            },
        }
    }
}

fn listen(
    address: IpAddr,
    port: u16,
) -> anyhow::Result<()>
{
    let socket_address = SocketAddr::new(address, port);
    let listener = TcpListener::bind(socket_address)
        .with_context(|| format!("bind {}", socket_address))?;
    debug!("listening on {:?}", listener.local_addr());
    Ok(())
}

impl Check for PortAvailabilityCheck {
    fn id(&self) -> &str {
        &self.name
    }
    async fn run(
        &self,
        cancel: &CancellationToken,
        _config: &Config,
    ) -> Verdict
    {
        if cancel.is_cancelled() {
            return Verdict::cancelled();
        }
        let port = match self.args.as_slice() {
            [] => return Verdict::failure("No port to check"),
            [port] => port,
            _ => return Verdict::failure("Only one port allowed"),
        };
        match port.parse::<u16>().with_context(|| format!("Invalid port: {}", port)) {
            Ok(port) => PortAvailabilityCheck::port_available(port),
            Err(e) => Verdict::failure(&e.to_string()),
        }
    }
}
