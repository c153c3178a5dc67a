//! Connectivity probing over plain TCP connect
//!
//! One probe is one bounded-time connection attempt. Classification is
//! deliberately coarse: a completed connection is `Open`, every kind of
//! connection failure is `Closed`. Callers that need to distinguish refused
//! from unreachable from timed out are out of scope here.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::scanner::Target;

/// Connectivity state of a probed port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    /// Connection attempt succeeded
    Open,
    /// Connection attempt failed or timed out
    Closed,
    /// Probe itself faulted; produced only by the engine, never by a probe
    Error,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Error => "error",
        };
        write!(f, "{}", state)
    }
}

/// A single-target connectivity check
///
/// Implementations classify every ordinary connection outcome into a
/// `PortState` and reserve `Err` for abnormal faults that are not connection
/// results. The engine maps such faults to `PortState::Error` without
/// stopping the batch, so implementations never need to catch their own.
/// Probes must be safe to call from many tasks at once.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &Target) -> crate::Result<PortState>;
}

/// TCP connect probe with a fixed per-attempt timeout
#[derive(Debug, Clone)]
pub struct ConnectProbe {
    timeout: Duration,
}

impl ConnectProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Probe for ConnectProbe {
    async fn probe(&self, target: &Target) -> crate::Result<PortState> {
        match timeout(self.timeout, TcpStream::connect(target.socket_addr())).await {
            Ok(Ok(stream)) => {
                // Reachability is all we wanted; hang up immediately.
                drop(stream);
                Ok(PortState::Open)
            }
            // Refused, unreachable, and timed out all collapse to Closed.
            Ok(Err(_)) => Ok(PortState::Closed),
            Err(_) => Ok(PortState::Closed),
        }
    }
}
