//! Module for checking that a TCP port is available.
//!
//! The check binds a listening socket on the port on all IPv4 interfaces, then on all IPv6 interfaces,
//! releasing each right away. Without IPv6 on the host, only IPv4 is checked.
//! It takes exactly one port as argument.
//!
mod functions;

pub use functions::*;
