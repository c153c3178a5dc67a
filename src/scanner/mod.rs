//! Scanner module containing the scan engine and its domain types

pub mod engine;

use crate::network::PortState;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub use engine::ScanEngine;

/// A single scan target: one host address and one port, optionally named
///
/// Targets are immutable once constructed. Equality and hashing cover all
/// three fields so result records can be matched back to their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Optional label carried through from the input file
    pub name: Option<String>,

    /// IPv4 or IPv6 address of the host
    pub host: IpAddr,

    /// TCP port to probe
    pub port: u16,
}

impl Target {
    /// Create an unnamed target
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            name: None,
            host,
            port,
        }
    }

    /// Create a named target
    pub fn named(name: impl Into<String>, host: IpAddr, port: u16) -> Self {
        Self {
            name: Some(name.into()),
            host,
            port,
        }
    }

    /// Socket address of this target
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// Outcome of probing one target
///
/// The engine emits exactly one record per input target, in completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    /// The target that was probed
    pub target: Target,

    /// Classified connectivity state
    pub state: PortState,
}

impl ScanRecord {
    pub fn new(target: Target, state: PortState) -> Self {
        Self { target, state }
    }
}
