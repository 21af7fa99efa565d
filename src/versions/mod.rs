//! Module for checking the software versions across the nodes of the cluster.
//!
//! Every master and agent reports its active packages on `/pkgpanda/active/`:
//! ```text
//! ["dcos-config--setup_4f3d3a1b", "mesos--0c5c7a8e", "adminrouter--24d3a1c6"]
//! ```
//! A set of active packages is a version. During an upgrade, two versions can be present in the cluster.
//! More than two versions means a stuck or diverged upgrade, which fails the check.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
