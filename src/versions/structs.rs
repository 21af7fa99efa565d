//! The structs
//!
use std::future::Future;
use tokio_util::sync::CancellationToken;
use crate::config::{Config, NodeAddress};

/// A version, a sorted package list, with the node it was first found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctVersion {
    pub packages: Vec<String>,
    /// role and hostname:port of the node.
    pub first_seen_on: String,
}

/// The distinct versions found in the cluster, in the order they were found.
///
/// The set only grows: a version equal to an existing member is not added again.
#[derive(Debug, Default)]
pub struct DistinctVersionSets {
    pub versions: Vec<DistinctVersion>,
}

/// Where the active packages of a node come from.
pub trait PackageSource {
    fn active_packages(&self, node: &NodeAddress) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send;
}

/// Reads the active packages via the admin router of the node.
pub struct HttpPackageSource<'a> {
    pub config: &'a Config,
    pub cancel: &'a CancellationToken,
}

/// The version consistency check.
#[derive(Debug)]
pub struct VersionCheck {
    pub name: String,
}
