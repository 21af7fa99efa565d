use std::process;
use clap::{Parser, Subcommand};
use log::*;
use tokio_util::sync::CancellationToken;

use cluster_checks::check::{run_check, Status};
use cluster_checks::cockroachdb::CockroachdbCheck;
use cluster_checks::config::Config;
use cluster_checks::port_availability::PortAvailabilityCheck;
use cluster_checks::versions::VersionCheck;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Opts {
    /// use https, the certificate of the peer is not verified
    #[arg(long, global = true)]
    force_tls: bool,
    /// host serving leader resolution and agent membership (default master.mesos)
    #[arg(long, global = true, value_name = "hostname")]
    leader_host: Option<String>,
    /// host:port of the CockroachDB status endpoint (default 127.0.0.1:8090)
    #[arg(long, global = true, value_name = "host:port")]
    cockroachdb_addr: Option<String>,
    /// timeout of a single request in seconds (default 10)
    #[arg(long, global = true, value_name = "seconds")]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check the versions of the nodes in the cluster.
    /// At any point there should not be more than 2 versions in the cluster.
    Version,
    /// CockroachDB health checks, usage: cockroachdb ranges
    Cockroachdb {
        args: Vec<String>,
    },
    /// Check that a port is available to listen on
    PortAvailability {
        ports: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();
    let options = Opts::parse();

    let config = Config::resolve(options.force_tls, &options.leader_host, &options.cockroachdb_addr, &options.timeout)
        .unwrap_or_else(|e| {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(Status::Unknown.code());
        });

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling check");
            ctrl_c_cancel.cancel();
        }
    });

    let status = match options.command {
        Commands::Version => {
            run_check(&VersionCheck::new("DC/OS version check"), &cancel, &config).await
        },
        Commands::Cockroachdb { args } => {
            run_check(&CockroachdbCheck::new("DC/OS CockroachDB checks", args), &cancel, &config).await
        },
        Commands::PortAvailability { ports } => {
            run_check(&PortAvailabilityCheck::new("DC/OS port availability check", ports), &cancel, &config).await
        },
    };

    process::exit(status.code());
}
