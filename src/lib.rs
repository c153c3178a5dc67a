//! portcheck - concurrent TCP port-connectivity checker
//!
//! Reads `host,port` targets from CSV, probes each with a bounded-time TCP
//! connect under a concurrency ceiling, and streams `open`/`closed`/`error`
//! rows back in completion order.

pub mod config;
pub mod error;
pub mod input;
pub mod network;
pub mod output;
pub mod scanner;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::ScanError;
pub use input::{read_targets, read_targets_path, TargetFile, TargetSchema};
pub use network::{ConnectProbe, PortState, Probe};
pub use output::ResultWriter;
pub use scanner::{engine::ScanEngine, ScanRecord, Target};

pub type Result<T> = std::result::Result<T, ScanError>;
