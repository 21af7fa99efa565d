//! The impls and functions
//!
use std::time::Instant;
use log::*;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use crate::check::{Check, Verdict};
use crate::config::{node_address, Config, NodeAddress};
use crate::http::{http_query, parse_json};
use crate::topology::ClusterTopology;
use crate::versions::{DistinctVersion, DistinctVersionSets, HttpPackageSource, PackageSource, VersionCheck};

pub const VERSION_PATH: &str = "/pkgpanda/active/";
/// One version, or two during a rolling upgrade.
pub const MAX_DISTINCT_VERSIONS: usize = 2;

impl DistinctVersionSets {
    pub fn new() -> Self {
        Default::default()
    }
    /// Add the version of a node, returns true if it was not seen before.
    pub fn observe(
        &mut self,
        node: &str,
        mut packages: Vec<String>,
    ) -> bool
    {
        packages.sort();
        if self.versions.iter().any(|version| version.packages == packages) {
            return false;
        }
        self.versions.push(DistinctVersion { packages, first_seen_on: node.to_string() });
        true
    }
    /// The nodes each version was first found on.
    pub fn first_seen_on(&self) -> String {
        self.versions.iter()
            .map(|version| version.first_seen_on.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
    pub fn len(&self) -> usize {
        self.versions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl PackageSource for HttpPackageSource<'_> {
    async fn active_packages(
        &self,
        node: &NodeAddress,
    ) -> Result<Vec<String>>
    {
        let data_from_http = http_query(self.config, &node.url(VERSION_PATH), self.cancel).await?;
        Ok(parse_json(&data_from_http, "version")?)
    }
}

/// Read the versions node by node in topology order.
///
/// Stops at the first node that brings the number of distinct versions over [MAX_DISTINCT_VERSIONS].
/// Any node that cannot be read fails the evaluation.
pub async fn evaluate_versions<S: PackageSource + Sync>(
    topology: &ClusterTopology,
    source: &S,
    config: &Config,
) -> Result<Verdict>
{
    info!("begin version read of {} nodes", topology.len());
    let timer = Instant::now();

    let mut distinct_versions = DistinctVersionSets::new();
    for (role, host) in topology.nodes() {
        let node = node_address(host, role, &config.ports, config.force_tls);
        let packages = source.active_packages(&node)
            .await
            .with_context(|| format!("Unable to get version of {} {}", role, node))?;
        let node_label = format!("{} {}:{}", role, node.host, node.port);
        if distinct_versions.observe(&node_label, packages) {
            debug!("{}: new version, {} distinct versions", node_label, distinct_versions.len());
        }

        if distinct_versions.len() > MAX_DISTINCT_VERSIONS {
            info!("end version read: stopped at {} {:?}", node, timer.elapsed());
            return Ok(Verdict::failure(&format!(
                "More than {} distinct versions present in the cluster, versions first seen on: {}",
                MAX_DISTINCT_VERSIONS,
                distinct_versions.first_seen_on(),
            )));
        }
    }

    info!("end version read {:?}", timer.elapsed());
    Ok(Verdict::ok_with(&format!("{} nodes, {} distinct versions", topology.len(), distinct_versions.len())))
}

impl VersionCheck {
    pub fn new(name: &str) -> Self {
        VersionCheck { name: name.to_string() }
    }
    async fn check_versions(
        &self,
        cancel: &CancellationToken,
        config: &Config,
    ) -> Result<Verdict>
    {
        let topology = ClusterTopology::discover(config, cancel).await?;
        let source = HttpPackageSource { config, cancel };
        evaluate_versions(&topology, &source, config).await
    }
}

impl Check for VersionCheck {
    fn id(&self) -> &str {
        &self.name
    }
    async fn run(
        &self,
        cancel: &CancellationToken,
        config: &Config,
    ) -> Verdict
    {
        Verdict::from(self.check_versions(cancel, config).await)
    }
}
