//! Module for the configuration the checks run with.
//!
//! The configuration is read-only during a check run. Besides the TLS enforcement it carries
//! the addresses the checks start from, so a cluster with non-default ports can be checked too.
//!
//! Every setting is resolved in the following order:
//! 1. The command line option.
//! 2. The environment variable, which can be set via a `.env` file.
//! 3. The default.
//!
//! The ports of the nodes depend on the role of the node and on TLS enforcement,
//! see [PortLayout::port].
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
